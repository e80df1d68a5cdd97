use std::{fmt, str::FromStr};

/// Environment variable holding the inpainting service key.
pub const CREDENTIAL_ENV_VAR: &str = "FAL_KEY";

/// Failures reported by an inpainting backend.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The service credential is not configured.
    #[error("{0} is not set; add it to the environment")]
    MissingCredential(String),

    /// The request was rejected before or by the service.
    #[error("invalid inpainting request: {0}")]
    Validation(String),

    /// Network or service failure.
    #[error("inpainting failed: {0}")]
    Service(String),
}

impl BackendError {
    /// `true` for [`BackendError::MissingCredential`].
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential(_))
    }
}

/// Named output sizes understood by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ImageSizePreset {
    /// High-resolution square.
    #[serde(rename = "square_hd")]
    SquareHd,
    /// Square.
    #[serde(rename = "square")]
    Square,
    /// Portrait 4:3.
    #[serde(rename = "portrait_4_3")]
    Portrait4x3,
    /// Portrait 16:9.
    #[serde(rename = "portrait_16_9")]
    Portrait16x9,
    /// Landscape 4:3.
    #[serde(rename = "landscape_4_3")]
    Landscape4x3,
    /// Landscape 16:9.
    #[serde(rename = "landscape_16_9")]
    Landscape16x9,
}

/// Requested output size: a preset or explicit dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ImageSize {
    /// Named preset.
    Preset(ImageSizePreset),
    /// Explicit dimensions.
    Custom {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

impl FromStr for ImageSize {
    type Err = BackendError;

    /// Accepts a preset name (`square_hd`, `landscape_16_9`, ...) or `WIDTHxHEIGHT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let quoted = format!("\"{}\"", s.trim());
        if let Ok(preset) = serde_json::from_str::<ImageSizePreset>(&quoted) {
            return Ok(Self::Preset(preset));
        }
        let parsed = s
            .trim()
            .split_once(['x', 'X'])
            .and_then(|(w, h)| Some((w.parse::<u32>().ok()?, h.parse::<u32>().ok()?)));
        match parsed {
            Some((width, height)) if width > 0 && height > 0 => {
                Ok(Self::Custom { width, height })
            }
            _ => Err(BackendError::Validation(format!("unknown image size '{s}'"))),
        }
    }
}

/// Encoding of generated images.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JPEG.
    Jpeg,
    /// PNG.
    #[default]
    Png,
}

/// Service speed/quality tier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Acceleration {
    /// No acceleration.
    None,
    /// Balanced.
    #[default]
    Regular,
    /// Fastest.
    High,
}

/// Optional generation parameters; unset fields take service defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InpaintParams {
    /// Things the result should avoid.
    pub negative_prompt: Option<String>,
    /// Output size.
    pub image_size: Option<ImageSize>,
    /// Diffusion step count.
    pub num_inference_steps: Option<u32>,
    /// Classifier-free guidance scale.
    pub guidance_scale: Option<f64>,
    /// How strongly the masked region is regenerated, `[0, 1]`.
    pub strength: Option<f64>,
    /// Random seed for reproducible output.
    pub seed: Option<u64>,
    /// Number of images to generate.
    pub num_images: Option<u32>,
    /// Run the service-side safety checker.
    pub enable_safety_checker: Option<bool>,
    /// Result encoding.
    pub output_format: Option<OutputFormat>,
    /// Speed tier.
    pub acceleration: Option<Acceleration>,
}

/// Fully resolved request for the inpainting service.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InpaintRequest {
    /// Base image, as a URL or data URI.
    pub image_url: String,
    /// Mask image, as a URL or data URI.
    pub mask_url: String,
    /// Trimmed, non-empty prompt.
    pub prompt: String,
    /// Negative prompt (`" "` when unset).
    pub negative_prompt: String,
    /// Output size.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_size: Option<ImageSize>,
    /// Diffusion step count.
    pub num_inference_steps: u32,
    /// Guidance scale.
    pub guidance_scale: f64,
    /// Regeneration strength.
    pub strength: f64,
    /// Random seed.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seed: Option<u64>,
    /// Number of images.
    pub num_images: u32,
    /// Safety checker toggle.
    pub enable_safety_checker: bool,
    /// Result encoding.
    pub output_format: OutputFormat,
    /// Speed tier.
    pub acceleration: Acceleration,
}

impl InpaintRequest {
    /// Default step count.
    pub const DEFAULT_STEPS: u32 = 30;
    /// Default guidance scale.
    pub const DEFAULT_GUIDANCE: f64 = 4.0;
    /// Default strength.
    pub const DEFAULT_STRENGTH: f64 = 0.93;

    /// Resolve `params` against the service defaults and validate the result.
    pub fn new(
        image_url: impl Into<String>,
        mask_url: impl Into<String>,
        prompt: &str,
        params: InpaintParams,
    ) -> Result<Self, BackendError> {
        let req = Self {
            image_url: image_url.into(),
            mask_url: mask_url.into(),
            prompt: prompt.trim().to_string(),
            negative_prompt: params.negative_prompt.unwrap_or_else(|| " ".to_string()),
            image_size: params.image_size,
            num_inference_steps: params.num_inference_steps.unwrap_or(Self::DEFAULT_STEPS),
            guidance_scale: params.guidance_scale.unwrap_or(Self::DEFAULT_GUIDANCE),
            strength: params.strength.unwrap_or(Self::DEFAULT_STRENGTH),
            seed: params.seed,
            num_images: params.num_images.unwrap_or(1),
            enable_safety_checker: params.enable_safety_checker.unwrap_or(true),
            output_format: params.output_format.unwrap_or_default(),
            acceleration: params.acceleration.unwrap_or_default(),
        };
        req.validate()?;
        Ok(req)
    }

    /// Check required fields and numeric ranges.
    pub fn validate(&self) -> Result<(), BackendError> {
        if self.image_url.trim().is_empty() {
            return Err(BackendError::Validation(
                "missing image (URL or base64 data URI)".to_string(),
            ));
        }
        if self.mask_url.trim().is_empty() {
            return Err(BackendError::Validation(
                "missing mask (URL or base64 data URI)".to_string(),
            ));
        }
        if self.prompt.trim().is_empty() {
            return Err(BackendError::Validation("missing prompt".to_string()));
        }
        if self.num_inference_steps == 0 {
            return Err(BackendError::Validation(
                "num_inference_steps must be >= 1".to_string(),
            ));
        }
        if self.num_images == 0 {
            return Err(BackendError::Validation("num_images must be >= 1".to_string()));
        }
        if !self.guidance_scale.is_finite() {
            return Err(BackendError::Validation(
                "guidance_scale must be finite".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.strength) {
            return Err(BackendError::Validation(format!(
                "strength must be in [0, 1] (got {})",
                self.strength
            )));
        }
        Ok(())
    }
}

/// One generated image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InpaintImage {
    /// Where the image can be fetched (URL or data URI).
    pub url: String,
    /// Width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
    /// Height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
    /// Media type.
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Service timing metadata.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InpaintTimings {
    /// Inference time in seconds.
    pub inference: f64,
}

/// Successful service response.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InpaintResponse {
    /// Generated images.
    #[serde(default)]
    pub images: Vec<InpaintImage>,
    /// Timing metadata.
    #[serde(default)]
    pub timings: Option<InpaintTimings>,
    /// Seed actually used.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Per-image safety flags.
    #[serde(default)]
    pub has_nsfw_concepts: Option<Vec<bool>>,
    /// Prompt as seen by the service.
    #[serde(default)]
    pub prompt: Option<String>,
}

impl InpaintResponse {
    /// First generated image, if any.
    pub fn first_image(&self) -> Option<&InpaintImage> {
        self.images.first()
    }
}

/// Service credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
}

impl Credentials {
    /// Wrap an explicit key.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Read the key from [`CREDENTIAL_ENV_VAR`].
    pub fn from_env() -> Result<Self, BackendError> {
        Self::from_var(CREDENTIAL_ENV_VAR)
    }

    /// Read the key from an arbitrary environment variable.
    pub fn from_var(var: &str) -> Result<Self, BackendError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(BackendError::MissingCredential(var.to_string())),
        }
    }

    /// The raw key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Anything that can run an inpainting request. No transport ships with this crate.
pub trait InpaintBackend {
    /// Run one request.
    fn inpaint(&self, request: &InpaintRequest) -> Result<InpaintResponse, BackendError>;
}

#[cfg(test)]
#[path = "../../tests/unit/backend/contract.rs"]
mod tests;
