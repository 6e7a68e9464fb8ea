//! Types for the detection module.
//!
//! Field names serialize in the service's PascalCase so captured payloads
//! read like the raw responses.

use serde::{Deserialize, Serialize};

/// An object or scene label detected in an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Label {
    /// Label name as the service spells it (e.g. "Cat").
    pub name: String,
    /// Confidence percentage (0-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Located instances of the label, if the service boxed any.
    #[serde(default)]
    pub instances: Vec<LabelInstance>,
    #[serde(default)]
    pub parents: Vec<NamedRef>,
    #[serde(default)]
    pub aliases: Vec<NamedRef>,
    #[serde(default)]
    pub categories: Vec<NamedRef>,
}

impl Label {
    /// A bare label with no instances or hierarchy.
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence: Some(confidence),
            instances: Vec::new(),
            parents: Vec::new(),
            aliases: Vec::new(),
            categories: Vec::new(),
        }
    }
}

/// A reference by name (parent label, alias, category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NamedRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dominant_colors: Vec<DominantColor>,
}

/// A dominant color of a boxed instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DominantColor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex_code: Option<String>,
    #[serde(
        rename = "CSSColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub css_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simplified_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_percent: Option<f64>,
}

/// Box in ratios of the image dimensions. Sides the service omits stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
}

impl BoundingBox {
    pub fn new(width: f64, height: f64, left: f64, top: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            left: Some(left),
            top: Some(top),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Point {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Geometry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub polygon: Vec<Point>,
}

/// Granularity of a text detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextType {
    Line,
    Word,
}

/// A fragment of text detected in an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextDetection {
    pub detected_text: String,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub text_type: Option<TextType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    /// Line a word belongs to; absent for lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
}

impl TextDetection {
    /// A line detection with no geometry.
    pub fn line(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            detected_text: text.into(),
            text_type: Some(TextType::Line),
            id: None,
            parent_id: None,
            confidence: Some(confidence),
            geometry: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_serializes_like_service() {
        let mut label = Label::new("Cat", 91.2);
        label.parents.push(NamedRef {
            name: "Animal".to_string(),
        });
        label.instances.push(LabelInstance {
            bounding_box: Some(BoundingBox::new(0.5, 0.25, 0.1, 0.2)),
            confidence: Some(91.2),
            dominant_colors: Vec::new(),
        });

        let value = serde_json::to_value(&label).unwrap();
        assert_eq!(value["Name"], "Cat");
        assert_eq!(value["Confidence"], 91.2);
        assert_eq!(value["Parents"][0]["Name"], "Animal");
        assert_eq!(value["Instances"][0]["BoundingBox"]["Width"], 0.5);
        assert!(value["Instances"][0].get("DominantColors").is_none());
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let mut label = Label::new("Cat", 91.2);
        label.confidence = None;
        label.instances.push(LabelInstance {
            bounding_box: Some(BoundingBox {
                width: Some(0.5),
                ..BoundingBox::default()
            }),
            confidence: None,
            dominant_colors: vec![DominantColor {
                red: Some(12),
                green: Some(80),
                blue: Some(200),
                hex_code: Some("#0C50C8".to_string()),
                css_color: Some("royalblue".to_string()),
                simplified_color: Some("blue".to_string()),
                pixel_percent: None,
            }],
        });

        let value = serde_json::to_value(&label).unwrap();
        assert!(value.get("Confidence").is_none());
        let instance = &value["Instances"][0];
        assert!(instance.get("Confidence").is_none());
        assert!(instance["BoundingBox"].get("Top").is_none());
        assert_eq!(instance["DominantColors"][0]["CSSColor"], "royalblue");
        assert!(instance["DominantColors"][0].get("PixelPercent").is_none());
    }

    #[test]
    fn test_text_detection_serializes_type() {
        let mut detection = TextDetection::line("SALE", 99.1);
        detection.id = Some(0);

        let value = serde_json::to_value(&detection).unwrap();
        assert_eq!(value["DetectedText"], "SALE");
        assert_eq!(value["Type"], "LINE");
        assert_eq!(value["Id"], 0);
        assert!(value.get("ParentId").is_none());
        assert!(value.get("Geometry").is_none());
    }

    #[test]
    fn test_deserialize_minimal_label() {
        let label: Label = serde_json::from_str(r#"{"Name":"Dog","Confidence":80.0}"#).unwrap();
        assert_eq!(label, Label::new("Dog", 80.0));
    }
}
