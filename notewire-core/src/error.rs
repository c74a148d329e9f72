use thiserror::Error;

/// Failure to recover a typed notification from an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("payload of notification '{name}' is not a {expected}")]
    PayloadMismatch { name: String, expected: &'static str },
}
