use pf_viz::RSquaredCurveArtifact;

use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::legend::{draw_legend, LegendEntry, LegendKind};
use crate::layout::margins::PlotArea;
use crate::plots::axes_draw::{draw_axes, draw_title};
use crate::primitives::*;

/// R² over period, one line per output variable.
pub fn render(artifact: &RSquaredCurveArtifact, config: &VizConfig) -> crate::Result<String> {
    if artifact.series.iter().all(|s| s.periods.is_empty()) {
        return Ok(empty_svg());
    }

    let mut canvas = Canvas::new(config.figure.width, config.figure.height);

    let p_min = artifact
        .series
        .iter()
        .flat_map(|s| s.periods.iter().copied())
        .min()
        .unwrap_or(0) as f64;
    let p_max = artifact
        .series
        .iter()
        .flat_map(|s| s.periods.iter().copied())
        .max()
        .unwrap_or(1) as f64;
    let x_axis = Axis::auto_linear(p_min, p_max, 6).with_label("period");

    // R² lives in [0, 1] after clamping upstream.
    let y_axis = Axis::auto_linear(0.0, 1.0, 6).with_label("R\u{00B2}");

    let area = PlotArea::auto(&canvas, Some(&y_axis), Some(&x_axis), config);
    draw_title(
        &mut canvas,
        &area,
        &format!("{} \u{2014} {}", artifact.country, artifact.scenario),
        config,
    );
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    let _clip = canvas.push_clip(area.left, area.top, area.width, area.height);

    let palette = config.palette_colors();
    let mut legend = Vec::new();
    for (i, series) in artifact.series.iter().enumerate() {
        let color = palette[i % palette.len()];
        let points: Vec<(f64, f64)> = series
            .periods
            .iter()
            .zip(series.values.iter())
            .filter(|(_, v)| v.is_finite())
            .map(|(&p, &v)| {
                let px = x_axis.data_to_pixel(p as f64, area.left, area.right());
                let py = y_axis.data_to_pixel(v.clamp(0.0, 1.0), area.bottom(), area.top);
                (px, py)
            })
            .collect();

        if points.len() > 1 {
            canvas.polyline(&points, &LineStyle::solid(color, 1.5));
        }
        for &(px, py) in &points {
            canvas.circle(px, py, 2.2, &Style::filled(color));
        }

        legend.push(LegendEntry {
            label: series.output_var.clone(),
            color,
            kind: LegendKind::Line,
        });
    }

    canvas.pop_clip();
    draw_legend(&mut canvas, &area, &legend, config.font.size);

    Ok(canvas.finish_svg())
}

fn empty_svg() -> String {
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><text x="10" y="30">No data</text></svg>"#.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_viz::RSquaredSeries;

    fn artifact() -> RSquaredCurveArtifact {
        RSquaredCurveArtifact {
            country: "Norway".to_string(),
            scenario: "baseline".to_string(),
            series: vec![RSquaredSeries {
                output_var: "approval_index".to_string(),
                periods: vec![1, 2, 3],
                values: vec![0.8, 0.7, 0.75],
            }],
        }
    }

    #[test]
    fn renders_title_and_legend() {
        let svg = render(&artifact(), &VizConfig::default()).unwrap();
        assert!(svg.contains("Norway"));
        assert!(svg.contains("approval_index"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn empty_series_renders_placeholder() {
        let art = RSquaredCurveArtifact {
            country: "Norway".to_string(),
            scenario: "baseline".to_string(),
            series: vec![],
        };
        let svg = render(&art, &VizConfig::default()).unwrap();
        assert!(svg.contains("No data"));
    }
}
