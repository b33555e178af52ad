//! # pf-viz-render
//!
//! Renders pf-viz artifacts to SVG (and rasterizes to PNG).
//!
//! The renderer is deliberately small: an immediate-mode SVG canvas,
//! linear axes with nice-number ticks, and one plot module per artifact
//! kind. Rasterization goes through resvg with system fonts.

pub mod canvas;
pub mod color;
pub mod config;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod text;

use config::VizConfig;
use thiserror::Error;

/// Rendering failure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown artifact kind: {0}")]
    UnknownKind(String),
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("layout error: {0}")]
    Layout(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encoding error: {0}")]
    Png(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Render an artifact JSON to an SVG string.
pub fn render_svg(artifact_json: &str, kind: &str, config: &VizConfig) -> Result<String> {
    let svg = match kind {
        "rsquared" => {
            let art: pf_viz::RSquaredCurveArtifact = serde_json::from_str(artifact_json)?;
            plots::rsquared::render(&art, config)?
        }
        "coef" => {
            let art: pf_viz::CoefficientBarsArtifact = serde_json::from_str(artifact_json)?;
            plots::coef_bars::render(&art, config)?
        }
        other => return Err(RenderError::UnknownKind(other.to_string())),
    };
    Ok(svg)
}

/// Render an artifact JSON to bytes in the given format (`svg` or `png`).
pub fn render_to_bytes(
    artifact_json: &str,
    kind: &str,
    format: &str,
    config: &VizConfig,
) -> Result<Vec<u8>> {
    let svg = render_svg(artifact_json, kind, config)?;
    match format {
        "svg" => Ok(svg.into_bytes()),
        "png" => output::png::svg_to_png(&svg, config.output.dpi),
        other => Err(RenderError::UnknownKind(format!("format: {other}"))),
    }
}

/// Render an artifact JSON to a file, format inferred from the extension.
pub fn render_to_file(
    artifact_json: &str,
    kind: &str,
    path: &std::path::Path,
    config: &VizConfig,
) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("svg");
    let bytes = render_to_bytes(artifact_json, kind, ext, config)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_rejected() {
        let config = VizConfig::default();
        let err = render_svg("{}", "histogram", &config).unwrap_err();
        assert!(matches!(err, RenderError::UnknownKind(_)));
    }

    #[test]
    fn rsquared_kind_dispatches() {
        let config = VizConfig::default();
        let json = r#"{"country":"Norway","scenario":"baseline","series":[
            {"output_var":"approval_index","periods":[1,2],"values":[0.8,0.7]}]}"#;
        let svg = render_svg(json, "rsquared", &config).unwrap();
        assert!(svg.contains("</svg>"));
    }
}
