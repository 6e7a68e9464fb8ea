//! Amazon Rekognition detector.
//!
//! Images are referenced in place by bucket and key; nothing is downloaded.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_rekognition::error::DisplayErrorContext;
use aws_sdk_rekognition::types as rk;
use aws_sdk_rekognition::Client;
use tracing::debug;

use crate::event::ObjectRef;

use super::types::{
    BoundingBox, DominantColor, Geometry, Label, LabelInstance, NamedRef, Point, TextDetection,
    TextType,
};
use super::{DetectionError, LabelDetector, TextDetector};

const DETECT_LABELS: &str = "DetectLabels";
const DETECT_TEXT: &str = "DetectText";

/// Label and text detector backed by Rekognition.
#[derive(Debug, Clone)]
pub struct RekognitionDetector {
    client: Client,
}

impl RekognitionDetector {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl LabelDetector for RekognitionDetector {
    fn name(&self) -> &str {
        "rekognition"
    }

    async fn detect_labels(
        &self,
        image: &ObjectRef,
        min_confidence: f32,
    ) -> Result<Vec<Label>, DetectionError> {
        debug!(
            "Rekognition detect_labels: {} (min_confidence={})",
            image, min_confidence
        );

        let response = self
            .client
            .detect_labels()
            .image(s3_image(image))
            .min_confidence(min_confidence)
            .send()
            .await
            .map_err(|e| DetectionError::service(DETECT_LABELS, DisplayErrorContext(&e).to_string()))?;

        response.labels().iter().map(convert_label).collect()
    }
}

#[async_trait]
impl TextDetector for RekognitionDetector {
    fn name(&self) -> &str {
        "rekognition"
    }

    async fn detect_text(&self, image: &ObjectRef) -> Result<Vec<TextDetection>, DetectionError> {
        debug!("Rekognition detect_text: {}", image);

        let response = self
            .client
            .detect_text()
            .image(s3_image(image))
            .send()
            .await
            .map_err(|e| DetectionError::service(DETECT_TEXT, DisplayErrorContext(&e).to_string()))?;

        response
            .text_detections()
            .iter()
            .map(convert_text_detection)
            .collect()
    }
}

fn s3_image(object: &ObjectRef) -> rk::Image {
    rk::Image::builder()
        .s3_object(
            rk::S3Object::builder()
                .bucket(&object.bucket)
                .name(&object.key)
                .build(),
        )
        .build()
}

/// Widens through the shortest decimal form so `91.2_f32` stays `91.2`.
fn widen(value: f32) -> f64 {
    value
        .to_string()
        .parse()
        .unwrap_or_else(|_| f64::from(value))
}

fn convert_label(label: &rk::Label) -> Result<Label, DetectionError> {
    let name = label
        .name()
        .ok_or_else(|| DetectionError::malformed(DETECT_LABELS, "label without a name"))?;

    Ok(Label {
        name: name.to_string(),
        confidence: label.confidence().map(widen),
        instances: label
            .instances()
            .iter()
            .map(|instance| LabelInstance {
                bounding_box: instance.bounding_box().map(convert_box),
                confidence: instance.confidence().map(widen),
                dominant_colors: instance
                    .dominant_colors()
                    .iter()
                    .map(convert_color)
                    .collect(),
            })
            .collect(),
        parents: named(label.parents().iter().map(|p| p.name())),
        aliases: named(label.aliases().iter().map(|a| a.name())),
        categories: named(label.categories().iter().map(|c| c.name())),
    })
}

fn convert_text_detection(detection: &rk::TextDetection) -> Result<TextDetection, DetectionError> {
    let text = detection
        .detected_text()
        .ok_or_else(|| DetectionError::malformed(DETECT_TEXT, "detection without text"))?;

    let text_type = match detection.r#type() {
        Some(rk::TextTypes::Line) => Some(TextType::Line),
        Some(rk::TextTypes::Word) => Some(TextType::Word),
        _ => None,
    };

    Ok(TextDetection {
        detected_text: text.to_string(),
        text_type,
        id: detection.id(),
        parent_id: detection.parent_id(),
        confidence: detection.confidence().map(widen),
        geometry: detection.geometry().map(|geometry| Geometry {
            bounding_box: geometry.bounding_box().map(convert_box),
            polygon: geometry
                .polygon()
                .iter()
                .map(|p| Point {
                    x: p.x().map(widen),
                    y: p.y().map(widen),
                })
                .collect(),
        }),
    })
}

fn convert_box(bbox: &rk::BoundingBox) -> BoundingBox {
    BoundingBox {
        width: bbox.width().map(widen),
        height: bbox.height().map(widen),
        left: bbox.left().map(widen),
        top: bbox.top().map(widen),
    }
}

fn convert_color(color: &rk::DominantColor) -> DominantColor {
    DominantColor {
        red: color.red(),
        green: color.green(),
        blue: color.blue(),
        hex_code: color.hex_code().map(str::to_string),
        css_color: color.css_color().map(str::to_string),
        simplified_color: color.simplified_color().map(str::to_string),
        pixel_percent: color.pixel_percent().map(widen),
    }
}

fn named<'a>(names: impl Iterator<Item = Option<&'a str>>) -> Vec<NamedRef> {
    names
        .flatten()
        .map(|name| NamedRef {
            name: name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen_keeps_short_form() {
        assert_eq!(widen(91.2), 91.2);
        assert_eq!(widen(0.1), 0.1);
        assert_eq!(widen(70.0), 70.0);
    }

    #[test]
    fn test_convert_label() {
        let label = rk::Label::builder()
            .name("Cat")
            .confidence(91.2)
            .instances(
                rk::Instance::builder()
                    .confidence(88.5)
                    .bounding_box(
                        rk::BoundingBox::builder()
                            .width(0.5)
                            .height(0.25)
                            .left(0.1)
                            .top(0.2)
                            .build(),
                    )
                    .dominant_colors(
                        rk::DominantColor::builder()
                            .red(12)
                            .green(80)
                            .blue(200)
                            .css_color("royalblue")
                            .pixel_percent(42.5)
                            .build(),
                    )
                    .build(),
            )
            .parents(rk::Parent::builder().name("Animal").build())
            .parents(rk::Parent::builder().name("Pet").build())
            .build();

        let converted = convert_label(&label).unwrap();
        assert_eq!(converted.name, "Cat");
        assert_eq!(converted.confidence, Some(91.2));
        assert_eq!(converted.instances.len(), 1);
        assert_eq!(converted.instances[0].confidence, Some(88.5));
        assert_eq!(converted.instances[0].bounding_box.unwrap().top, Some(0.2));

        let color = &converted.instances[0].dominant_colors[0];
        assert_eq!(color.blue, Some(200));
        assert_eq!(color.css_color.as_deref(), Some("royalblue"));
        assert_eq!(color.pixel_percent, Some(42.5));
        assert_eq!(color.hex_code, None);
        assert_eq!(
            converted
                .parents
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Animal", "Pet"]
        );
        assert!(converted.aliases.is_empty());
    }

    #[test]
    fn test_convert_label_without_name_is_malformed() {
        let label = rk::Label::builder().confidence(99.0).build();
        assert!(matches!(
            convert_label(&label),
            Err(DetectionError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_convert_text_detection() {
        let detection = rk::TextDetection::builder()
            .detected_text("great")
            .r#type(rk::TextTypes::Word)
            .id(1)
            .parent_id(0)
            .confidence(97.25)
            .geometry(
                rk::Geometry::builder()
                    .polygon(rk::Point::builder().x(0.1).y(0.2).build())
                    .build(),
            )
            .build();

        let converted = convert_text_detection(&detection).unwrap();
        assert_eq!(converted.detected_text, "great");
        assert_eq!(converted.text_type, Some(TextType::Word));
        assert_eq!(converted.parent_id, Some(0));
        assert_eq!(converted.confidence, Some(97.25));

        let geometry = converted.geometry.unwrap();
        assert!(geometry.bounding_box.is_none());
        assert_eq!(geometry.polygon, vec![Point::new(0.1, 0.2)]);
    }

    #[test]
    fn test_omitted_numbers_stay_omitted() {
        let label = rk::Label::builder()
            .name("Cat")
            .instances(
                rk::Instance::builder()
                    .bounding_box(rk::BoundingBox::builder().width(0.5).build())
                    .build(),
            )
            .build();

        let converted = convert_label(&label).unwrap();
        assert_eq!(converted.confidence, None);
        assert_eq!(converted.instances[0].confidence, None);

        let bbox = converted.instances[0].bounding_box.unwrap();
        assert_eq!(bbox.width, Some(0.5));
        assert_eq!(bbox.top, None);

        let detection = rk::TextDetection::builder()
            .detected_text("SALE")
            .geometry(
                rk::Geometry::builder()
                    .polygon(rk::Point::builder().x(0.3).build())
                    .build(),
            )
            .build();
        let converted = convert_text_detection(&detection).unwrap();
        assert_eq!(converted.confidence, None);
        assert_eq!(converted.geometry.unwrap().polygon[0].y, None);
    }

    #[test]
    fn test_both_detectors_report_service_name() {
        let config = aws_sdk_rekognition::Config::builder()
            .behavior_version(aws_sdk_rekognition::config::BehaviorVersion::latest())
            .region(aws_sdk_rekognition::config::Region::new("eu-west-1"))
            .build();
        let detector = RekognitionDetector::new(Client::from_conf(config));

        assert_eq!(LabelDetector::name(&detector), "rekognition");
        assert_eq!(TextDetector::name(&detector), "rekognition");
    }
}
