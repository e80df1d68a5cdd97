use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::{
    brush::config::{BrushConfig, FalloffProfile},
    foundation::error::{MaskpaintError, MaskpaintResult},
    render::compositor::{CompositeThreading, OverlayStyle},
};

/// Editor-wide settings with documented defaults.
///
/// ```json
/// {
///   "brush": { "radius": 20, "mode": "paint" },
///   "falloff": { "inner_ratio": 0.6 },
///   "overlay": { "tint": [0, 255, 0], "alpha": 0.4 },
///   "composite": { "parallel": true, "min_parallel_pixels": 65536 }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Initial brush.
    pub brush: BrushConfig,
    /// Brush edge profile.
    pub falloff: FalloffProfile,
    /// Mask overlay appearance.
    pub overlay: OverlayStyle,
    /// Composite threading.
    pub composite: CompositeThreading,
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> MaskpaintResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| MaskpaintError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> MaskpaintResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| MaskpaintError::serde(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every section.
    pub fn validate(&self) -> MaskpaintResult<()> {
        self.brush.validate()?;
        self.falloff.validate()?;
        self.overlay.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/editor.rs"]
mod tests;
