//! Plain-text rendering of dashboard output for the terminal.

use std::fmt::Write;

use dashboard::{format_value, ChartBody, ChartPanel, ResultHeader, ResultRenderer, SeriesStyle};
use globe::{legend, LAUNCH_SITES};
use protocol::{HealthStatus, QueryResult};

const BAR_WIDTH: usize = 40;

pub fn render_result(result: &QueryResult) -> String {
    let header = ResultHeader::from_result(result);
    let mut out = String::new();

    let _ = writeln!(out, "Insights");
    let _ = writeln!(out, "{}", header.insights);

    for panel in ResultRenderer::render_all(result) {
        let _ = writeln!(out);
        out.push_str(&render_panel(&panel));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Query: {}", header.query);
    let _ = writeln!(out, "Timestamp: {}", header.timestamp);
    out
}

pub fn render_panel(panel: &ChartPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", panel.title);
    if !panel.description.is_empty() {
        let _ = writeln!(out, "{}", panel.description);
    }

    match &panel.body {
        ChartBody::Series { style, points, .. } => {
            let max = points.iter().map(|p| p.y.abs()).fold(0.0_f64, f64::max);
            let label_w = points.iter().map(|p| p.x.chars().count()).max().unwrap_or(0);
            for p in points {
                match style {
                    SeriesStyle::Bar => {
                        let len = if max > 0.0 {
                            ((p.y.abs() / max) * BAR_WIDTH as f64).round() as usize
                        } else {
                            0
                        };
                        let _ = writeln!(out, "{:<label_w$}  {} {}", p.x, "#".repeat(len), format_value(p.y));
                    }
                    SeriesStyle::Line | SeriesStyle::Scatter => {
                        let _ = writeln!(out, "{:<label_w$}  {}", p.x, format_value(p.y));
                    }
                }
            }
        }
        ChartBody::Pie { slices } => {
            let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();
            for s in slices {
                let pct = if total > 0.0 {
                    s.value.max(0.0) / total * 100.0
                } else {
                    0.0
                };
                let _ = writeln!(out, "{}  {} ({pct:.1}%)", s.label, format_value(s.value));
            }
        }
        ChartBody::Unsupported { .. } => {}
    }

    if let Some(text) = panel.body.placeholder_text() {
        let _ = writeln!(out, "{text}");
    }
    if let Some(note) = panel.skipped_note() {
        let _ = writeln!(out, "({note})");
    }
    out
}

pub fn render_health(health: &HealthStatus) -> String {
    format!(
        "status: {}\ntimestamp: {}\napi configured: {}\n",
        health.status,
        health.timestamp,
        if health.api_configured { "yes" } else { "no" }
    )
}

pub fn render_sites() -> String {
    let mut out = String::new();
    for site in &LAUNCH_SITES {
        let _ = writeln!(
            out,
            "{:<28} {:>9.4} {:>10.4}  {} {}",
            site.name,
            site.position.lat_deg,
            site.position.lon_deg,
            site.color(),
            site.agency.name()
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Legend:");
    for agency in legend() {
        let _ = writeln!(out, "  {} {}", agency.color(), agency.name());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use protocol::{DataPoint, Visualization};

    fn viz(kind: &str, data: Vec<DataPoint>) -> Visualization {
        Visualization {
            kind: kind.to_string(),
            title: "Launches".to_string(),
            description: String::new(),
            data,
        }
    }

    #[test]
    fn bars_scale_to_the_largest_value() {
        let panel = ResultRenderer::render(
            &viz(
                "bar",
                vec![DataPoint::labelled("F9", 100.0), DataPoint::labelled("FH", 50.0)],
            ),
            0,
        );
        let text = render_panel(&panel);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "== Launches ==");
        assert_eq!(lines[1], format!("F9  {} 100", "#".repeat(40)));
        assert_eq!(lines[2], format!("FH  {} 50", "#".repeat(20)));
    }

    #[test]
    fn pie_shows_shares() {
        let panel = ResultRenderer::render(
            &viz(
                "pie",
                vec![DataPoint::labelled("NASA", 3.0), DataPoint::labelled("ISRO", 1.0)],
            ),
            0,
        );
        let text = render_panel(&panel);
        assert!(text.contains("NASA  3 (75.0%)"));
        assert!(text.contains("ISRO  1 (25.0%)"));
    }

    #[test]
    fn unknown_type_prints_placeholder() {
        let panel = ResultRenderer::render(&viz("radar", vec![]), 0);
        assert_eq!(
            render_panel(&panel),
            "== Launches ==\nUnsupported visualization type: radar\n"
        );
    }

    #[test]
    fn skipped_points_are_noted() {
        let panel = ResultRenderer::render(&viz("timeline", vec![DataPoint::labelled("x", 1.0)]), 0);
        assert!(render_panel(&panel).contains("1 data point(s) without \"date\"/\"value\" were skipped"));
    }

    #[test]
    fn sites_list_every_launch_site() {
        let text = render_sites();
        for site in &LAUNCH_SITES {
            assert!(text.contains(site.name));
        }
        assert!(text.contains("#ff9933 Indian Space Research Organisation (India)"));
    }

    #[test]
    fn result_has_header_and_metadata() {
        let result = QueryResult {
            insights: "Quiet quarter.".to_string(),
            query: "Q3 launches".to_string(),
            timestamp: "2024-09-30T12:00:00".to_string(),
            visualizations: vec![],
        };
        assert_eq!(
            render_result(&result),
            "Insights\nQuiet quarter.\n\nQuery: Q3 launches\nTimestamp: 2024-09-30 12:00:00\n"
        );
    }
}
