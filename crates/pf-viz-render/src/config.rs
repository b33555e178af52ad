use serde::Deserialize;

use crate::color::Color;

/// Chart appearance configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub figure: FigureConfig,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub grid: GridConfig,
    pub palette: String,
    pub output: OutputConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            figure: FigureConfig::default(),
            font: FontConfig::default(),
            axes: AxesConfig::default(),
            grid: GridConfig::default(),
            palette: "tableau10".into(),
            output: OutputConfig::default(),
        }
    }
}

impl VizConfig {
    pub fn palette_colors(&self) -> Vec<Color> {
        crate::color::palette_colors(&self.palette)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 518.4,  // 7.2" * 72
            height: 302.4, // 4.2" * 72
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: f64,
    pub label_size: f64,
    pub tick_size: f64,
    pub title_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { size: 10.0, label_size: 11.0, tick_size: 8.5, title_size: 13.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub tick_length: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self { tick_length: 4.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub show: bool,
    pub color: Color,
    pub alpha: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { show: true, color: Color::hex("#CBD5E1"), alpha: 0.55 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub dpi: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: "png".into(), dpi: 144 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_resolves() {
        let config = VizConfig::default();
        assert_eq!(config.palette_colors().len(), 10);
    }

    #[test]
    fn partial_override_deserializes() {
        let config: VizConfig =
            serde_json::from_str(r#"{"output":{"dpi":300},"palette":"wong"}"#).unwrap();
        assert_eq!(config.output.dpi, 300);
        assert_eq!(config.palette_colors().len(), 7);
        // Untouched sections keep defaults.
        assert!((config.figure.width - 518.4).abs() < 1e-9);
    }
}
