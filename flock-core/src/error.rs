use thiserror::Error;

/// Errors raised while constructing a [`crate::FlockSimulator`].
///
/// Stepping never fails: zero-length vectors are normalized to zero and a
/// stalled agent simply skips speed rescaling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlockError {
    #[error("invalid configuration: {parameter} = {value}")]
    InvalidConfiguration { parameter: &'static str, value: f32 },

    #[error("invalid bounds: {width}x{height} (margin {margin})")]
    InvalidBounds { width: f32, height: f32, margin: f32 },
}
