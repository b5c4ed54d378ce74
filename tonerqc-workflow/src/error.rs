//! Workflow error types.

use thiserror::Error;

use tonerqc_core::InvalidReference;
use tonerqc_store::StoreError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("reference data rejected: {0}")]
    Reference(#[from] InvalidReference),

    /// Batch ingestion aborts on the first bad row; `line` counts the
    /// header as line 1.
    #[error("batch line {line}: {message}")]
    BatchParse { line: u64, message: String },

    #[error("batch line {line}: no toner model named {model:?}")]
    UnknownModel { line: u64, model: String },

    #[error("question {question}: answer must be between 1 and 5, got {answer}")]
    AnswerOutOfRange { question: u32, answer: u8 },

    #[error("expected {expected} answers, got {got}")]
    WrongAnswerCount { expected: usize, got: usize },
}
