//! Biome classification of a sampled surface point.

use std::fmt;

/// Discrete surface classification produced by the elevation field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Biome {
    /// Land below the ice caps.
    #[default]
    Default,
    /// Below sea level (elevation < 0).
    Ocean,
    /// Poleward of the perturbed cap boundary.
    IceCap,
    /// Terrain raised onto the parabolic ramp at the cap margin.
    IceCapEdge,
}

impl Biome {
    /// Returns `true` for both the flat cap and its ramp.
    pub fn is_ice(self) -> bool {
        matches!(self, Self::IceCap | Self::IceCapEdge)
    }

    /// Ordering from equator to pole, used to compare classifications
    /// along a meridian.
    pub fn polar_rank(self) -> u8 {
        match self {
            Self::Default | Self::Ocean => 0,
            Self::IceCapEdge => 1,
            Self::IceCap => 2,
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ocean => "ocean",
            Self::IceCap => "ice_cap",
            Self::IceCapEdge => "ice_cap_edge",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
