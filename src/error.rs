use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    #[error("road index {0} is out of range (expected 0..=3)")]
    InvalidDirection(usize),
    #[error("lane index {0} is out of range (expected 0..=2)")]
    InvalidTurnIntent(usize),
    #[error("view index {0} is out of range (expected 0..=1)")]
    InvalidView(usize),
}
