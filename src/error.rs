use thiserror::Error;

use crate::dataset::{DatasetKind, FieldKey};

/// Failures of the validated update path. Everything else in the app is
/// reported through `anyhow`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("{dataset} has {len} records; index {index} is out of range")]
    IndexOutOfRange {
        dataset: DatasetKind,
        index: usize,
        len: usize,
    },

    #[error("field `{field}` of {dataset} is not editable")]
    FieldNotEditable {
        dataset: DatasetKind,
        field: FieldKey,
    },

    #[error("`{input}` is not a number")]
    NotANumber { input: String },

    #[error("unknown dataset `{0}` (expected channel, category, bugs or time)")]
    UnknownDataset(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),
}
