use crate::foundation::error::{MaskpaintError, MaskpaintResult};

/// How a stamp combines with existing mask intensity.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BrushMode {
    /// `v' = max(v, opacity)`.
    #[default]
    Paint,
    /// `v' = max(0, v - opacity)`.
    Erase,
}

impl BrushMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Paint => Self::Erase,
            Self::Erase => Self::Paint,
        }
    }
}

/// Brush radius (pixels) and blend mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrushConfig {
    /// Outer radius in image pixels, `[MIN_RADIUS, MAX_RADIUS]`.
    pub radius: u32,
    /// Blend mode.
    pub mode: BrushMode,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            radius: Self::DEFAULT_RADIUS,
            mode: BrushMode::Paint,
        }
    }
}

impl BrushConfig {
    /// Smallest radius exposed to users.
    pub const MIN_RADIUS: u32 = 5;
    /// Largest radius exposed to users.
    pub const MAX_RADIUS: u32 = 100;
    /// Radius used when nothing else is configured.
    pub const DEFAULT_RADIUS: u32 = 20;

    /// Build a validated config.
    pub fn new(radius: u32, mode: BrushMode) -> MaskpaintResult<Self> {
        let cfg = Self { radius, mode };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject radii outside `[MIN_RADIUS, MAX_RADIUS]`.
    pub fn validate(&self) -> MaskpaintResult<()> {
        if !(Self::MIN_RADIUS..=Self::MAX_RADIUS).contains(&self.radius) {
            return Err(MaskpaintError::validation(format!(
                "brush radius must be in [{}, {}] (got {})",
                Self::MIN_RADIUS,
                Self::MAX_RADIUS,
                self.radius
            )));
        }
        Ok(())
    }

    /// Clamp a radius into the supported range.
    pub fn clamp_radius(radius: u32) -> u32 {
        radius.clamp(Self::MIN_RADIUS, Self::MAX_RADIUS)
    }

    /// Maximum distance between consecutive stroke samples (`radius / 4`).
    pub fn spacing(&self) -> f64 {
        f64::from(self.radius) / 4.0
    }
}

/// Soft circular falloff: full strength up to `inner_ratio * radius`, then linear to zero at
/// `radius`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FalloffProfile {
    /// Fraction of the radius painted at full strength, `[0, 1)`.
    pub inner_ratio: f64,
}

impl Default for FalloffProfile {
    fn default() -> Self {
        Self { inner_ratio: 0.6 }
    }
}

impl FalloffProfile {
    /// Reject ratios that would leave no falloff band.
    pub fn validate(&self) -> MaskpaintResult<()> {
        if !self.inner_ratio.is_finite() || !(0.0..1.0).contains(&self.inner_ratio) {
            return Err(MaskpaintError::validation(format!(
                "falloff inner_ratio must be in [0, 1) (got {})",
                self.inner_ratio
            )));
        }
        Ok(())
    }

    /// Opacity at `dist` from the center of a brush with outer radius `radius`.
    ///
    /// `None` outside the circle.
    pub fn opacity_at(&self, dist: f64, radius: f64) -> Option<u8> {
        if dist > radius {
            return None;
        }
        let inner = radius * self.inner_ratio;
        if dist <= inner {
            return Some(255);
        }
        let falloff = (dist - inner) / (radius - inner);
        Some(crate::foundation::math::round_to_u8(
            255.0 * (1.0 - falloff).max(0.0),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/brush/config.rs"]
mod tests;
