//! FILENAME: summary-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    #[error("no data rows to aggregate")]
    EmptyInput,

    #[error("total for '{object_id}' is outside the representable range")]
    Overflow { object_id: String },
}
