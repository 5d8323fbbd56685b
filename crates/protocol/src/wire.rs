//! Wire types exchanged with the mission query backend.
//!
//! - `POST /query` takes a [`QueryRequest`] and answers with a [`QueryResult`]
//!   on success or an [`ErrorBody`] on failure.
//! - `GET /health` answers with a [`HealthStatus`].

use serde::{Deserialize, Serialize};

use crate::lenient;

pub const QUERY_PATH: &str = "/query";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Only non-blank queries are ever sent.
    pub fn is_submittable(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub insights: String,
    pub visualizations: Vec<Visualization>,
    pub query: String,
    /// ISO-8601; the backend does not always include a UTC offset.
    pub timestamp: String,
}

/// A chart descriptor. `kind` keeps the raw tag so unknown chart types
/// survive decoding and can be reported instead of failing the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data: Vec<DataPoint>,
}

impl Visualization {
    pub fn chart_kind(&self) -> Option<ChartKind> {
        ChartKind::from_tag(&self.kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<f64>,
}

impl DataPoint {
    pub fn labelled(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: Some(label.into()),
            date: None,
            value: Some(value),
        }
    }

    pub fn dated(date: impl Into<String>, value: f64) -> Self {
        Self {
            label: None,
            date: Some(date.into()),
            value: Some(value),
        }
    }

    pub fn axis_value(&self, key: AxisKey) -> Option<&str> {
        match key {
            AxisKey::Label => self.label.as_deref(),
            AxisKey::Date => self.date.as_deref(),
        }
    }
}

/// The five chart types the dashboard knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
    Timeline,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Scatter,
        ChartKind::Timeline,
    ];

    /// Exact, case-sensitive match on the backend tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "line" => Some(Self::Line),
            "bar" => Some(Self::Bar),
            "pie" => Some(Self::Pie),
            "scatter" => Some(Self::Scatter),
            "timeline" => Some(Self::Timeline),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Timeline => "timeline",
        }
    }

    /// Which point field supplies the category/x axis.
    pub fn axis_key(self) -> AxisKey {
        match self {
            Self::Timeline => AxisKey::Date,
            Self::Line | Self::Bar | Self::Pie | Self::Scatter => AxisKey::Label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisKey {
    Label,
    Date,
}

impl AxisKey {
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Date => "date",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The `detail` message, if it is a non-empty string.
    pub fn message(&self) -> Option<&str> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Extracts the `detail` message from a failure body, if there is a usable one.
pub fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message().map(str::to_owned))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub api_configured: bool,
}
