use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WheelError {
    #[error("A wheel needs at least one segment")]
    EmptySegments,
}
