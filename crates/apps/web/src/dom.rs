use dashboard::{DisplayState, QueryController, ResultHeader, ResultRenderer};
use globe::legend;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlButtonElement, HtmlCanvasElement};

use crate::charts::draw_panel;

pub const QUERY_BUTTON_ID: &str = "query-button";
pub const RESULTS_ID: &str = "results";
pub const LEGEND_ID: &str = "globe-legend";

const CHART_WIDTH: u32 = 560;
const CHART_HEIGHT: u32 = 300;

pub const WELCOME_TITLE: &str = "Ready for Mission Analysis";
pub const WELCOME_BODY: &str = "Enter your query above to explore space missions from NASA, ISRO, \
SpaceX and more. Get real-time insights and interactive visualizations.";

pub fn button_label(loading: bool) -> &'static str {
    if loading {
        "Processing Query..."
    } else {
        "Analyze Mission Data"
    }
}

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

fn el(document: &Document, tag: &str, class: &str, text: Option<&str>) -> Result<Element, JsValue> {
    let e = document.create_element(tag)?;
    if !class.is_empty() {
        e.set_class_name(class);
    }
    if let Some(text) = text {
        e.set_text_content(Some(text));
    }
    Ok(e)
}

/// Redraws the query button and the results area from controller state.
pub fn render_dashboard(document: &Document, controller: &QueryController) -> Result<(), JsValue> {
    let button = by_id(document, QUERY_BUTTON_ID)?.dyn_into::<HtmlButtonElement>()?;
    button.set_disabled(controller.is_loading());
    button.set_text_content(Some(button_label(controller.is_loading())));

    let results = by_id(document, RESULTS_ID)?;
    results.set_inner_html("");

    match controller.display() {
        DisplayState::Welcome => {
            let welcome = el(document, "div", "welcome", None)?;
            welcome.append_child(&el(document, "h3", "", Some(WELCOME_TITLE))?.into())?;
            welcome.append_child(&el(document, "p", "", Some(WELCOME_BODY))?.into())?;
            results.append_child(&welcome)?;
        }
        DisplayState::Loading => {
            results.append_child(&el(document, "div", "loading", Some(button_label(true)))?.into())?;
        }
        DisplayState::Error(message) => {
            let error = el(document, "div", "error", None)?;
            error.append_child(&el(document, "h3", "", Some("Error"))?.into())?;
            error.append_child(&el(document, "p", "", Some(message))?.into())?;
            results.append_child(&error)?;
        }
        DisplayState::Result(result) => {
            let header = ResultHeader::from_result(result);

            let insights = el(document, "section", "insights", None)?;
            insights.append_child(&el(document, "h3", "", Some("Insights"))?.into())?;
            insights.append_child(&el(document, "p", "", Some(&header.insights))?.into())?;
            results.append_child(&insights)?;

            let charts = el(document, "section", "charts", None)?;
            charts.append_child(&el(document, "h3", "", Some("Mission Analytics"))?.into())?;
            for panel in ResultRenderer::render_all(result) {
                let card = el(document, "div", "chart-card", None)?;
                card.append_child(&el(document, "h4", "", Some(&panel.title))?.into())?;
                card.append_child(&el(document, "p", "chart-description", Some(&panel.description))?.into())?;

                if let Some(text) = panel.body.placeholder_text() {
                    card.append_child(&el(document, "p", "chart-unsupported", Some(&text))?.into())?;
                } else {
                    let canvas = document
                        .create_element("canvas")?
                        .dyn_into::<HtmlCanvasElement>()?;
                    canvas.set_width(CHART_WIDTH);
                    canvas.set_height(CHART_HEIGHT);
                    card.append_child(&canvas)?;
                    let ctx = canvas
                        .get_context("2d")?
                        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
                        .dyn_into::<CanvasRenderingContext2d>()?;
                    draw_panel(&ctx, &panel, CHART_WIDTH as f64, CHART_HEIGHT as f64);
                }

                if let Some(note) = panel.skipped_note() {
                    card.append_child(&el(document, "p", "chart-note", Some(&note))?.into())?;
                }
                charts.append_child(&card)?;
            }
            results.append_child(&charts)?;

            let meta = el(document, "div", "query-meta", None)?;
            meta.append_child(&el(document, "span", "", Some(&format!("Query: {}", header.query)))?.into())?;
            meta.append_child(&el(
                document,
                "span",
                "",
                Some(&format!("Timestamp: {}", header.timestamp)),
            )?.into())?;
            results.append_child(&meta)?;
        }
    }
    Ok(())
}

pub fn render_legend(document: &Document) -> Result<(), JsValue> {
    let host = by_id(document, LEGEND_ID)?;
    host.set_inner_html("");
    for agency in legend() {
        let item = el(document, "div", "legend-item", None)?;
        let swatch = el(document, "span", "legend-swatch", None)?;
        swatch.set_attribute("style", &format!("background-color: {}", agency.color()))?;
        item.append_child(&swatch)?;
        item.append_child(&el(document, "span", "", Some(agency.name()))?.into())?;
        host.append_child(&item)?;
    }
    Ok(())
}
