//! Configuration error types.

/// Errors that can occur when loading, saving, parsing, or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// The globe radius must be strictly positive.
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    /// At least two latitude bands are needed to span pole to pole.
    #[error("latitude_samples must be at least 2, got {0}")]
    TooFewLatitudeSamples(u32),

    /// At least three longitude columns are needed to close the seam.
    #[error("longitude_samples must be at least 3, got {0}")]
    TooFewLongitudeSamples(u32),

    /// The texture must contain at least one pixel.
    #[error("texture must be at least 1x1, got {width}x{height}")]
    EmptyTexture {
        /// Requested texture width.
        width: u32,
        /// Requested texture height.
        height: u32,
    },

    /// The ice cap latitude must lie in `[0, π/2]`.
    #[error("ice_cap_latitude must be within [0, pi/2], got {0}")]
    IceCapLatitudeOutOfRange(f64),

    /// The ice cap level must not be negative.
    #[error("ice_cap_level must be non-negative, got {0}")]
    NegativeIceCapLevel(f64),

    /// The ice cap transition range must be strictly positive.
    #[error("ice_cap_transition_range must be positive, got {0}")]
    NonPositiveTransitionRange(f64),

    /// A floating-point setting is NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite {
        /// Name of the offending setting.
        field: &'static str,
    },

    /// The noise seed does not fit in 32 bits.
    #[error("noise_seed {0} does not fit in 32 bits")]
    SeedOutOfRange(i64),

    /// The requested resolution cannot be indexed by the output buffers.
    #[error("{what} resolution too large to allocate")]
    ResolutionTooLarge {
        /// Which buffer overflowed ("mesh" or "texture").
        what: &'static str,
    },
}
