//! Cast parameters.

use serde::{Deserialize, Serialize};

use crate::error::{RaytraceError, Result};

/// Parameters of one cavity cast.
///
/// Loaded from TOML (every key optional) or built in code:
///
/// ```toml
/// max_radius = 12.0
/// prefilter_margin = 2.0
/// distance_decimals = 3
/// charge_decimals = 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastSettings {
    /// Ray length ceiling (Å). Rays are truncated here.
    pub max_radius: f64,
    /// Spheres farther than `max_radius + prefilter_margin` are dropped
    /// before casting.
    pub prefilter_margin: f64,
    /// Decimal places of reported hit distances.
    pub distance_decimals: u32,
    /// Decimal places of reported hit charges.
    pub charge_decimals: u32,
}

impl Default for CastSettings {
    fn default() -> Self {
        Self {
            max_radius: 10.0,
            prefilter_margin: 2.0,
            distance_decimals: 3,
            charge_decimals: 4,
        }
    }
}

impl CastSettings {
    /// Default settings with the given maximum radius.
    pub fn with_max_radius(max_radius: f64) -> Self {
        Self {
            max_radius,
            ..Self::default()
        }
    }

    /// Parse settings from a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Pre-filter distance: `max_radius + prefilter_margin`.
    #[inline]
    pub fn reach(&self) -> f64 {
        self.max_radius + self.prefilter_margin
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_radius.is_finite() && self.max_radius > 0.0) {
            return Err(RaytraceError::InvalidSettings(format!(
                "max_radius must be positive, got {}",
                self.max_radius
            )));
        }
        if !(self.prefilter_margin.is_finite() && self.prefilter_margin >= 0.0) {
            return Err(RaytraceError::InvalidSettings(format!(
                "prefilter_margin must be non-negative, got {}",
                self.prefilter_margin
            )));
        }
        if self.distance_decimals > 12 || self.charge_decimals > 12 {
            return Err(RaytraceError::InvalidSettings(
                "at most 12 decimal places are supported".into(),
            ));
        }
        Ok(())
    }
}
