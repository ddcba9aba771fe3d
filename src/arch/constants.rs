use serde::Serialize;

use crate::error::ConfigError;

/// Physical constants of the arch and the catenary parameters derived from them.
///
/// Widths are the leg cross-section diagonals at base and top; their squares
/// are used as the section areas. All lengths are in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArchPhysicalConstants {
    base_width_feet: f64,
    top_width_feet: f64,
    height_feet: f64,
    span_feet: f64,
    base_area: f64,
    top_area: f64,
    area_ratio: f64,
    growth_constant: f64,
    scale_constant: f64,
}

impl ArchPhysicalConstants {
    /// Leg diagonal at the base of the reference arch.
    pub const GATEWAY_BASE_WIDTH_FEET: f64 = 54.0;
    /// Leg diagonal at the top of the reference arch.
    pub const GATEWAY_TOP_WIDTH_FEET: f64 = 17.0;
    /// Height of the centroid curve at the apex.
    pub const GATEWAY_HEIGHT_FEET: f64 = 625.0925;
    /// Half-width of the centroid curve at the ground.
    pub const GATEWAY_SPAN_FEET: f64 = 299.2239;

    /// Validates the inputs and derives the catenary parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Constants` if any value is non-finite or
    /// non-positive, or the base is not wider than the top (the area ratio
    /// must exceed 1 for `acosh` to be real and the scale to be finite).
    pub fn new(
        base_width_feet: f64,
        top_width_feet: f64,
        height_feet: f64,
        span_feet: f64,
    ) -> Result<Self, ConfigError> {
        let named = [
            ("base_width_feet", base_width_feet),
            ("top_width_feet", top_width_feet),
            ("height_feet", height_feet),
            ("span_feet", span_feet),
        ];
        for (name, value) in named {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Constants(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if base_width_feet <= top_width_feet {
            return Err(ConfigError::Constants(format!(
                "base width {base_width_feet} must exceed top width {top_width_feet}"
            )));
        }
        Ok(Self::derive(
            base_width_feet,
            top_width_feet,
            height_feet,
            span_feet,
        ))
    }

    /// The reference structure's constants.
    #[must_use]
    pub fn gateway() -> Self {
        Self::derive(
            Self::GATEWAY_BASE_WIDTH_FEET,
            Self::GATEWAY_TOP_WIDTH_FEET,
            Self::GATEWAY_HEIGHT_FEET,
            Self::GATEWAY_SPAN_FEET,
        )
    }

    fn derive(base_width_feet: f64, top_width_feet: f64, height_feet: f64, span_feet: f64) -> Self {
        let base_area = base_width_feet * base_width_feet;
        let top_area = top_width_feet * top_width_feet;
        let area_ratio = base_area / top_area;
        Self {
            base_width_feet,
            top_width_feet,
            height_feet,
            span_feet,
            base_area,
            top_area,
            area_ratio,
            growth_constant: area_ratio.acosh(),
            scale_constant: height_feet / (area_ratio - 1.0),
        }
    }

    #[must_use]
    pub fn base_width_feet(&self) -> f64 {
        self.base_width_feet
    }

    #[must_use]
    pub fn top_width_feet(&self) -> f64 {
        self.top_width_feet
    }

    #[must_use]
    pub fn height_feet(&self) -> f64 {
        self.height_feet
    }

    #[must_use]
    pub fn span_feet(&self) -> f64 {
        self.span_feet
    }

    /// Section area at the base (`base_width²`).
    #[must_use]
    pub fn base_area(&self) -> f64 {
        self.base_area
    }

    /// Section area at the top (`top_width²`).
    #[must_use]
    pub fn top_area(&self) -> f64 {
        self.top_area
    }

    #[must_use]
    pub fn area_ratio(&self) -> f64 {
        self.area_ratio
    }

    /// `acosh(area_ratio)`, the catenary's growth constant.
    #[must_use]
    pub fn growth_constant(&self) -> f64 {
        self.growth_constant
    }

    /// `height / (area_ratio - 1)`, the catenary's scale constant.
    #[must_use]
    pub fn scale_constant(&self) -> f64 {
        self.scale_constant
    }
}

impl Default for ArchPhysicalConstants {
    fn default() -> Self {
        Self::gateway()
    }
}
