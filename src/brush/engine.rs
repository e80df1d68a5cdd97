use crate::{
    brush::config::{BrushConfig, BrushMode, FalloffProfile},
    foundation::core::Point,
    foundation::math::hypot,
    mask::buffer::MaskBuffer,
};

/// Opacity weights for every integer offset in `[-radius, radius]^2`, row-major.
///
/// Cells outside the circle hold `0`, which is a no-op under both blend modes.
#[derive(Clone, Debug)]
struct StampKernel {
    radius: u32,
    inner_ratio: f64,
    weights: Vec<u8>,
}

impl StampKernel {
    fn build(radius: u32, falloff: FalloffProfile) -> Self {
        let r = i64::from(radius);
        let side = (2 * r + 1) as usize;
        let outer = f64::from(radius);
        let mut weights = Vec::with_capacity(side * side);
        for dy in -r..=r {
            for dx in -r..=r {
                let dist = hypot(dx as f64, dy as f64);
                weights.push(falloff.opacity_at(dist, outer).unwrap_or(0));
            }
        }
        Self {
            radius,
            inner_ratio: falloff.inner_ratio,
            weights,
        }
    }

    fn matches(&self, radius: u32, falloff: FalloffProfile) -> bool {
        self.radius == radius && self.inner_ratio == falloff.inner_ratio
    }
}

/// Applies the soft circular brush to a [`MaskBuffer`].
///
/// The opacity kernel for the last used radius is cached; a stroke at constant radius pays the
/// square roots once.
#[derive(Clone, Debug, Default)]
pub struct BrushEngine {
    falloff: FalloffProfile,
    kernel: Option<StampKernel>,
}

impl BrushEngine {
    /// Engine using `falloff` for every stamp.
    pub fn new(falloff: FalloffProfile) -> Self {
        Self {
            falloff,
            kernel: None,
        }
    }

    /// Active falloff profile.
    pub fn falloff(&self) -> FalloffProfile {
        self.falloff
    }

    /// Replace the falloff profile; the cached kernel is rebuilt lazily.
    pub fn set_falloff(&mut self, falloff: FalloffProfile) {
        self.falloff = falloff;
    }

    /// Stamp the brush once, centered on `point` in image space.
    ///
    /// Only cells within `radius` of `point` on the integer offset grid are touched; cells that
    /// fall outside the mask are skipped. Non-finite points are ignored.
    pub fn stamp(&mut self, mask: &mut MaskBuffer, point: Point, brush: &BrushConfig) {
        if !point.is_finite() {
            return;
        }

        let falloff = self.falloff;
        if !self
            .kernel
            .as_ref()
            .is_some_and(|k| k.matches(brush.radius, falloff))
        {
            self.kernel = Some(StampKernel::build(brush.radius, falloff));
        }
        let Some(kernel) = self.kernel.as_ref() else {
            return;
        };

        let canvas = mask.canvas();
        let r = i64::from(brush.radius);
        let side = (2 * r + 1) as usize;
        let data = mask.data_mut();

        for (row, dy) in (-r..=r).enumerate() {
            let py = (point.y + dy as f64).floor() as i64;
            if py < 0 || py >= i64::from(canvas.height) {
                continue;
            }
            let weights = &kernel.weights[row * side..(row + 1) * side];
            for (dx, &opacity) in (-r..=r).zip(weights) {
                if opacity == 0 {
                    continue;
                }
                let px = (point.x + dx as f64).floor() as i64;
                if !canvas.contains(px, py) {
                    continue;
                }
                let cell = &mut data[canvas.index(px as u32, py as u32)];
                *cell = blend(*cell, opacity, brush.mode);
            }
        }
    }
}

/// Combine existing intensity `v` with a stamp of strength `opacity`.
pub fn blend(v: u8, opacity: u8, mode: BrushMode) -> u8 {
    match mode {
        BrushMode::Paint => v.max(opacity),
        BrushMode::Erase => v.saturating_sub(opacity),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/brush/engine.rs"]
mod tests;
