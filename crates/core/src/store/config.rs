//! Configuration for the store module.

use serde::{Deserialize, Serialize};

/// Where analysis records are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Name of the pre-provisioned table, partitioned on `ObjectKey`.
    ///
    /// Only checked when a record is written.
    #[serde(default)]
    pub table_name: Option<String>,
}

impl StorageConfig {
    pub fn with_table(table_name: impl Into<String>) -> Self {
        Self {
            table_name: Some(table_name.into()),
        }
    }
}
