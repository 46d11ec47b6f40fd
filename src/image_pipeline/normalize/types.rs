//! Normalization configuration and result types

/// How the normalized array becomes a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Quantize to 8-bit grayscale and flip rows (default)
    #[default]
    Direct,
    /// Colormap the array with its origin at the bottom-left
    Rendered,
}

/// Settings fixed for one batch run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Subtract a sigma-clipped background estimate
    pub subtract_background: bool,
    /// Saturate pixels to sigma-clipped bounds
    pub clip_data: bool,
    /// Lower clipping threshold in standard deviations
    pub sigma_low: f64,
    /// Upper clipping threshold in standard deviations
    pub sigma_up: f64,
    /// Apply the zscale stretch
    pub apply_zscale: bool,
    /// Zscale contrast
    pub contrast: f64,
    /// Rescale valid pixels onto [0, 1]
    pub apply_min_max: bool,
    pub render_mode: RenderMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            subtract_background: false,
            clip_data: false,
            sigma_low: 5.0,
            sigma_up: 30.0,
            apply_zscale: false,
            contrast: 0.25,
            apply_min_max: true,
            render_mode: RenderMode::Direct,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    subtract_background: Option<bool>,
    clip_data: Option<bool>,
    sigma_low: Option<f64>,
    sigma_up: Option<f64>,
    apply_zscale: Option<bool>,
    contrast: Option<f64>,
    apply_min_max: Option<bool>,
    render_mode: Option<RenderMode>,
}

impl PipelineConfigBuilder {
    pub fn subtract_background(mut self, enable: bool) -> Self {
        self.subtract_background = Some(enable);
        self
    }

    pub fn clip_data(mut self, enable: bool) -> Self {
        self.clip_data = Some(enable);
        self
    }

    pub fn sigma_low(mut self, sigma: f64) -> Self {
        self.sigma_low = Some(sigma);
        self
    }

    pub fn sigma_up(mut self, sigma: f64) -> Self {
        self.sigma_up = Some(sigma);
        self
    }

    pub fn apply_zscale(mut self, enable: bool) -> Self {
        self.apply_zscale = Some(enable);
        self
    }

    pub fn contrast(mut self, contrast: f64) -> Self {
        self.contrast = Some(contrast);
        self
    }

    pub fn apply_min_max(mut self, enable: bool) -> Self {
        self.apply_min_max = Some(enable);
        self
    }

    pub fn render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = Some(mode);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            subtract_background: self
                .subtract_background
                .unwrap_or(default.subtract_background),
            clip_data: self.clip_data.unwrap_or(default.clip_data),
            sigma_low: self.sigma_low.unwrap_or(default.sigma_low),
            sigma_up: self.sigma_up.unwrap_or(default.sigma_up),
            apply_zscale: self.apply_zscale.unwrap_or(default.apply_zscale),
            contrast: self.contrast.unwrap_or(default.contrast),
            apply_min_max: self.apply_min_max.unwrap_or(default.apply_min_max),
            render_mode: self.render_mode.unwrap_or(default.render_mode),
        }
    }
}

/// Array produced by the pipeline, same shape as the input
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl NormalizedImage {
    /// Row `y`, counted from the first stored row.
    pub fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.width..(y + 1) * self.width]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Image(NormalizedImage),
    /// No usable signal; the caller emits an all-zero image of this shape
    Blank { width: usize, height: usize },
}

impl Normalized {
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            Normalized::Image(image) => (image.width, image.height),
            Normalized::Blank { width, height } => (*width, *height),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Normalized::Blank { .. })
    }
}
