use pf_viz::CoefficientBarsArtifact;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::legend::{draw_legend, LegendEntry, LegendKind};
use crate::layout::margins::PlotArea;
use crate::plots::axes_draw::{draw_axes, draw_title};
use crate::primitives::*;

/// Grouped coefficient bars: one group per period, one bar per predictor.
pub fn render(artifact: &CoefficientBarsArtifact, config: &VizConfig) -> crate::Result<String> {
    if artifact.periods.is_empty() || artifact.series.is_empty() {
        return Ok(empty_svg());
    }

    let mut canvas = Canvas::new(config.figure.width, config.figure.height);

    // Y range spans all finite coefficients and always includes zero.
    let mut y_min: f64 = 0.0;
    let mut y_max: f64 = 0.0;
    for s in &artifact.series {
        for &v in &s.values {
            if v.is_finite() {
                y_min = y_min.min(v);
                y_max = y_max.max(v);
            }
        }
    }
    if y_min == 0.0 && y_max == 0.0 {
        y_max = 1.0;
    }
    let y_axis = Axis::auto_linear(y_min, y_max, 6).with_label("coefficient");

    // Categorical x axis: one slot per period, ticks at slot centers.
    let n_slots = artifact.periods.len();
    let mut x_axis = Axis::fixed(0.0, n_slots as f64).with_label("period");
    for (i, &p) in artifact.periods.iter().enumerate() {
        x_axis.tick_positions.push(i as f64 + 0.5);
        x_axis.tick_labels.push(p.to_string());
    }

    let area = PlotArea::auto(&canvas, Some(&y_axis), Some(&x_axis), config);
    draw_title(
        &mut canvas,
        &area,
        &format!(
            "{} \u{2014} {} \u{2014} {}",
            artifact.country, artifact.scenario, artifact.output_var
        ),
        config,
    );
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    let _clip = canvas.push_clip(area.left, area.top, area.width, area.height);

    let palette = config.palette_colors();
    let n_bars = artifact.series.len();
    let slot_w = area.width / n_slots as f64;
    let group_w = slot_w * 0.8;
    let bar_w = group_w / n_bars as f64;

    let zero_py = y_axis.data_to_pixel(0.0, area.bottom(), area.top);

    let mut legend = Vec::new();
    for (bi, series) in artifact.series.iter().enumerate() {
        let color = palette[bi % palette.len()];
        for (si, &v) in series.values.iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            let slot_x = area.left + si as f64 * slot_w + (slot_w - group_w) / 2.0;
            let bx = slot_x + bi as f64 * bar_w;
            let vy = y_axis.data_to_pixel(v, area.bottom(), area.top);
            let (top, height) = if v >= 0.0 { (vy, zero_py - vy) } else { (zero_py, vy - zero_py) };
            canvas.rect(bx, top, bar_w * 0.92, height, &Style::filled(color));
        }
        legend.push(LegendEntry {
            label: series.input_var.clone(),
            color,
            kind: LegendKind::FilledRect,
        });
    }

    // Zero baseline on top of the bars.
    canvas.line(
        area.left,
        zero_py,
        area.right(),
        zero_py,
        &LineStyle::solid(Color::rgb(0, 0, 0), 0.8),
    );

    canvas.pop_clip();
    draw_legend(&mut canvas, &area, &legend, config.font.size);

    Ok(canvas.finish_svg())
}

fn empty_svg() -> String {
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><text x="10" y="30">No data</text></svg>"#.into()
}
