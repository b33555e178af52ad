use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw a box frame with inward ticks, grid lines, and axis labels.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    config: &VizConfig,
) {
    let frame_color = Color::rgb(0, 0, 0);
    let frame_style = LineStyle::solid(frame_color, 0.8);
    let tick_style_line = LineStyle::solid(frame_color, 0.6);
    let tl = config.axes.tick_length;

    // Frame rectangle
    canvas.line(area.left, area.top, area.right(), area.top, &frame_style);
    canvas.line(area.left, area.bottom(), area.right(), area.bottom(), &frame_style);
    canvas.line(area.left, area.top, area.left, area.bottom(), &frame_style);
    canvas.line(area.right(), area.top, area.right(), area.bottom(), &frame_style);

    let grid_style = LineStyle {
        color: config.grid.color.with_alpha(config.grid.alpha),
        width: 0.5,
        dash: Some("3 3".into()),
    };

    // --- X axis ticks ---
    let x_tick_label_style = TextStyle {
        size: config.font.tick_size,
        color: frame_color,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };

    for (i, &val) in x_axis.tick_positions.iter().enumerate() {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        if px < area.left - 0.5 || px > area.right() + 0.5 {
            continue;
        }

        if config.grid.show {
            canvas.line(px, area.top, px, area.bottom(), &grid_style);
        }

        canvas.line(px, area.bottom(), px, area.bottom() - tl, &tick_style_line);

        if let Some(label) = x_axis.tick_labels.get(i) {
            canvas.text(px, area.bottom() + 3.0, label, &x_tick_label_style);
        }
    }

    // --- Y axis ticks ---
    let y_tick_label_style = TextStyle {
        size: config.font.tick_size,
        color: frame_color,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };

    for (i, &val) in y_axis.tick_positions.iter().enumerate() {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        if py < area.top - 0.5 || py > area.bottom() + 0.5 {
            continue;
        }

        if config.grid.show {
            canvas.line(area.left, py, area.right(), py, &grid_style);
        }

        canvas.line(area.left, py, area.left + tl, py, &tick_style_line);

        if let Some(label) = y_axis.tick_labels.get(i) {
            canvas.text(area.left - 4.0, py, label, &y_tick_label_style);
        }
    }

    // --- Axis labels ---
    let label_style = TextStyle {
        size: config.font.label_size,
        color: frame_color,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };

    if !x_axis.label.is_empty() {
        let label_y = area.bottom() + config.font.tick_size + 14.0;
        canvas.text(area.left + area.width / 2.0, label_y, &x_axis.label, &label_style);
    }

    if !y_axis.label.is_empty() {
        let label_x = area.left - 40.0;
        let label_y = area.top + area.height / 2.0;
        canvas.text_rotated(label_x, label_y, &y_axis.label, &label_style, -90.0);
    }
}

/// Draw the chart title centered above the plot area.
pub fn draw_title(canvas: &mut Canvas, area: &PlotArea, title: &str, config: &VizConfig) {
    if title.is_empty() {
        return;
    }
    let style = TextStyle {
        size: config.font.title_size,
        weight: FontWeight::Bold,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };
    canvas.text(area.left + area.width / 2.0, area.top - 8.0, title, &style);
}
