//! Intake Error Types

use thiserror::Error;

/// Validation errors raised while answering intake questions.
///
/// The display strings double as the inline error line the terminal
/// renders beneath the prompt.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum IntakeError {
    /// Email did not match the local@domain shape
    #[error("Invalid email format.")]
    InvalidEmail,

    /// Plan code was not one of M, A, L
    #[error("Invalid plan. Choose M, A, or L.")]
    InvalidPlan,

    /// Submit called after every question was already answered
    #[error("No question is awaiting an answer.")]
    FlowComplete,
}
