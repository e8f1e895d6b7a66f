use globe_config::ConfigError;
use thiserror::Error;

/// Errors from a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("non-finite vertex at longitude index {longitude_index}, latitude index {latitude_index}")]
    NumericDegeneracy {
        longitude_index: u32,
        latitude_index: u32,
    },

    #[error("not enough memory for the {what} buffers")]
    ResourceExhausted { what: &'static str },
}

/// An empty vector with room for `len` elements, or `ResourceExhausted`
/// when the allocator refuses.
pub(crate) fn try_buffer<T>(len: usize, what: &'static str) -> Result<Vec<T>, GenerateError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| GenerateError::ResourceExhausted { what })?;
    Ok(buf)
}

/// Errors building a custom color ramp.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RampError {
    #[error("a color ramp needs at least two control points, got {0}")]
    TooFewPoints(usize),

    #[error("control point {index} does not lie above its predecessor")]
    Unordered { index: usize },

    #[error("control point {index} has a non-finite position")]
    NonFinitePosition { index: usize },
}
