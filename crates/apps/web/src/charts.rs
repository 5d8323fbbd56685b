//! Canvas drawing for [`ChartPanel`]s.
//!
//! Scale and layout math is kept free of DOM types so it runs under
//! `cargo test` on the host.

use dashboard::{ChartBody, ChartPanel, ChartPoint, PieSlice, SeriesStyle, format_value};
use web_sys::CanvasRenderingContext2d;

use crate::{ctx_set_fill_style, ctx_set_stroke_style};

const AXIS_STROKE: &str = "rgba(255,255,255,0.35)";
const TICK_FILL: &str = "rgba(255,255,255,0.75)";
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 36.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (width - MARGIN_LEFT - MARGIN_RIGHT).max(0.0),
            height: (height - MARGIN_TOP - MARGIN_BOTTOM).max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Center x of category `i` out of `n` equal bands.
    pub fn band_center(&self, i: usize, n: usize) -> f64 {
        let band = self.width / n.max(1) as f64;
        self.left + band * (i as f64 + 0.5)
    }

    pub fn band_width(&self, n: usize) -> f64 {
        self.width / n.max(1) as f64
    }

    pub fn y_for(&self, value: f64, (lo, hi): (f64, f64)) -> f64 {
        let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.5 };
        self.bottom() - t * self.height
    }
}

/// Value range for the y axis. Bars always include zero so their heights
/// compare honestly.
pub fn value_bounds(points: &[ChartPoint], include_zero: bool) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for p in points {
        lo = lo.min(p.y);
        hi = hi.max(p.y);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if hi - lo < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    (lo, hi)
}

/// Start and end angles (radians, clockwise from 12 o'clock) per slice.
/// Negative values count as zero; an all-zero pie has no arcs.
pub fn pie_arcs(slices: &[PieSlice]) -> Vec<(f64, f64)> {
    let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut start = -std::f64::consts::FRAC_PI_2;
    slices
        .iter()
        .map(|s| {
            let end = start + s.value.max(0.0) / total * std::f64::consts::TAU;
            let arc = (start, end);
            start = end;
            arc
        })
        .collect()
}

pub fn draw_panel(ctx: &CanvasRenderingContext2d, panel: &ChartPanel, width: f64, height: f64) {
    ctx.clear_rect(0.0, 0.0, width, height);
    match &panel.body {
        ChartBody::Series {
            style,
            points,
            color,
            ..
        } => draw_series(ctx, *style, points, color, PlotArea::for_canvas(width, height)),
        ChartBody::Pie { slices } => draw_pie(ctx, slices, width, height),
        // Placeholder text lives in the DOM, not on a canvas.
        ChartBody::Unsupported { .. } => {}
    }
}

fn draw_series(
    ctx: &CanvasRenderingContext2d,
    style: SeriesStyle,
    points: &[ChartPoint],
    color: &str,
    area: PlotArea,
) {
    let bounds = value_bounds(points, style == SeriesStyle::Bar);
    let n = points.len();

    ctx_set_stroke_style(ctx, AXIS_STROKE);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(area.left, area.top);
    ctx.line_to(area.left, area.bottom());
    ctx.line_to(area.left + area.width, area.bottom());
    ctx.stroke();

    ctx_set_fill_style(ctx, TICK_FILL);
    ctx.set_font("11px sans-serif");
    let _ = ctx.fill_text(&format_value(bounds.1), 4.0, area.top + 4.0);
    let _ = ctx.fill_text(&format_value(bounds.0), 4.0, area.bottom());
    let label_every = (n / 8).max(1);
    for (i, p) in points.iter().enumerate().step_by(label_every) {
        let x = area.band_center(i, n);
        let _ = ctx.fill_text(&p.x, x - 12.0, area.bottom() + 16.0);
    }

    match style {
        SeriesStyle::Bar => {
            ctx_set_fill_style(ctx, color);
            let w = area.band_width(n) * 0.7;
            let zero = area.y_for(0.0, bounds);
            for (i, p) in points.iter().enumerate() {
                let x = area.band_center(i, n) - w / 2.0;
                let y = area.y_for(p.y, bounds);
                ctx.fill_rect(x, y.min(zero), w, (zero - y).abs());
            }
        }
        SeriesStyle::Line => {
            ctx_set_stroke_style(ctx, color);
            ctx.set_line_width(2.0);
            ctx.begin_path();
            for (i, p) in points.iter().enumerate() {
                let (x, y) = (area.band_center(i, n), area.y_for(p.y, bounds));
                if i == 0 {
                    ctx.move_to(x, y);
                } else {
                    ctx.line_to(x, y);
                }
            }
            ctx.stroke();
        }
        SeriesStyle::Scatter => {
            ctx_set_fill_style(ctx, color);
            for (i, p) in points.iter().enumerate() {
                ctx.begin_path();
                let _ = ctx.arc(
                    area.band_center(i, n),
                    area.y_for(p.y, bounds),
                    4.0,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
            }
        }
    }
}

fn draw_pie(ctx: &CanvasRenderingContext2d, slices: &[PieSlice], width: f64, height: f64) {
    let (cx, cy) = (width * 0.35, height / 2.0);
    let r = (width.min(height) / 2.0 - 12.0).max(4.0);

    for (slice, (start, end)) in slices.iter().zip(pie_arcs(slices)) {
        ctx_set_fill_style(ctx, slice.color);
        ctx.begin_path();
        ctx.move_to(cx, cy);
        let _ = ctx.arc(cx, cy, r, start, end);
        ctx.close_path();
        ctx.fill();
    }

    ctx.set_font("12px sans-serif");
    let legend_x = cx + r + 24.0;
    for (i, slice) in slices.iter().enumerate() {
        let y = 24.0 + i as f64 * 18.0;
        ctx_set_fill_style(ctx, slice.color);
        ctx.fill_rect(legend_x, y - 10.0, 10.0, 10.0);
        ctx_set_fill_style(ctx, TICK_FILL);
        let _ = ctx.fill_text(&format!("{} ({})", slice.label, format_value(slice.value)), legend_x + 16.0, y);
    }
}
