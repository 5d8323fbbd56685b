//! Visualization dispatch: backend chart descriptors to drawable panels.
//!
//! Rendering backends (canvas, terminal) only ever see [`ChartPanel`]s, so the
//! per-type key conventions and color assignment live in one place.

use chrono::{DateTime, NaiveDateTime, Utc};
use protocol::{AxisKey, ChartKind, QueryResult, Visualization};

use crate::palette::{series_color, slice_color};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    Bar,
    Scatter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    /// Line, bar, scatter and timeline charts.
    Series {
        kind: ChartKind,
        style: SeriesStyle,
        x_key: AxisKey,
        points: Vec<ChartPoint>,
        color: &'static str,
    },
    Pie {
        slices: Vec<PieSlice>,
    },
    /// Placeholder for a type tag the dashboard does not know.
    Unsupported {
        tag: String,
    },
}

impl ChartBody {
    pub fn placeholder_text(&self) -> Option<String> {
        match self {
            ChartBody::Unsupported { tag } => Some(format!("Unsupported visualization type: {tag}")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub title: String,
    pub description: String,
    pub body: ChartBody,
    /// Points dropped for lacking the type's axis key or a numeric value.
    pub skipped_points: usize,
}

impl ChartPanel {
    /// Note to show under a chart that lost points, if any.
    pub fn skipped_note(&self) -> Option<String> {
        match (&self.body, self.skipped_points) {
            (_, 0) => None,
            (ChartBody::Series { x_key, .. }, n) => Some(format!(
                "{n} data point(s) without \"{}\"/\"value\" were skipped",
                x_key.field_name()
            )),
            (_, n) => Some(format!(
                "{n} data point(s) without \"label\"/\"value\" were skipped"
            )),
        }
    }
}

pub struct ResultRenderer;

impl ResultRenderer {
    /// `index` is the descriptor's position among its siblings; it picks the
    /// chart color for everything except pies.
    pub fn render(viz: &Visualization, index: usize) -> ChartPanel {
        let (body, skipped_points) = match viz.chart_kind() {
            Some(ChartKind::Pie) => Self::pie(viz),
            Some(kind) => Self::series(viz, kind, index),
            None => (
                ChartBody::Unsupported {
                    tag: viz.kind.clone(),
                },
                0,
            ),
        };

        ChartPanel {
            title: viz.title.clone(),
            description: viz.description.clone(),
            body,
            skipped_points,
        }
    }

    pub fn render_all(result: &QueryResult) -> Vec<ChartPanel> {
        result
            .visualizations
            .iter()
            .enumerate()
            .map(|(index, viz)| Self::render(viz, index))
            .collect()
    }

    fn series(viz: &Visualization, kind: ChartKind, index: usize) -> (ChartBody, usize) {
        let style = match kind {
            ChartKind::Bar => SeriesStyle::Bar,
            ChartKind::Scatter => SeriesStyle::Scatter,
            _ => SeriesStyle::Line,
        };
        let x_key = kind.axis_key();

        let points: Vec<ChartPoint> = viz
            .data
            .iter()
            .filter_map(|dp| {
                Some(ChartPoint {
                    x: dp.axis_value(x_key)?.to_string(),
                    y: dp.value?,
                })
            })
            .collect();
        let skipped = viz.data.len() - points.len();

        (
            ChartBody::Series {
                kind,
                style,
                x_key,
                points,
                color: series_color(index),
            },
            skipped,
        )
    }

    fn pie(viz: &Visualization) -> (ChartBody, usize) {
        let slices: Vec<PieSlice> = viz
            .data
            .iter()
            .enumerate()
            .filter_map(|(i, dp)| {
                Some(PieSlice {
                    label: dp.label.clone()?,
                    value: dp.value?,
                    color: slice_color(i),
                })
            })
            .collect();
        let skipped = viz.data.len() - slices.len();
        (ChartBody::Pie { slices }, skipped)
    }
}

/// The text parts of a result, shown above the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultHeader {
    pub insights: String,
    pub query: String,
    pub timestamp: String,
}

impl ResultHeader {
    pub fn from_result(result: &QueryResult) -> Self {
        Self {
            insights: result.insights.clone(),
            query: result.query.clone(),
            timestamp: format_timestamp(&result.timestamp),
        }
    }
}

/// Human-readable form of a backend timestamp.
///
/// Accepts RFC 3339, shown in UTC, and offset-less ISO-8601 (what Python's
/// `isoformat()` emits), shown as is. Anything else is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

/// Axis ticks and data labels: whole numbers without decimals, anything else
/// to two places.
pub fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v:.2}")
    }
}
