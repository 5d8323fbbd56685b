use console_error_panic_hook::set_once;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::CanvasRenderingContext2d;

use dashboard::{BackendConfig, Completion, QueryClient, QueryController};
use globe::{GlobeScene, GlobeView};
use runtime::FrameClock;

mod canvas_globe;
mod charts;
mod dom;
mod http;

use canvas_globe::CanvasGlobe;
use http::GlooTransport;

struct AppState {
    controller: Rc<RefCell<QueryController>>,
    client: Rc<QueryClient<GlooTransport>>,
    globe: GlobeView<CanvasGlobe>,
    clock: FrameClock,
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState {
        controller: Rc::new(RefCell::new(QueryController::new())),
        client: Rc::new(QueryClient::new(BackendConfig::from_build(), GlooTransport)),
        globe: GlobeView::new(),
        clock: FrameClock::new(),
    });
}

pub(crate) fn ctx_set_fill_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(value),
    );
}

pub(crate) fn ctx_set_stroke_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(value),
    );
}

fn log_error(context: &str, err: &JsValue) {
    web_sys::console::error_1(&JsValue::from_str(&format!("{context}: {err:?}")));
}

fn render_dashboard() -> Result<(), JsValue> {
    let controller = STATE.with(|s| s.borrow().controller.clone());
    let document = dom::document()?;
    let controller = controller.borrow();
    dom::render_dashboard(&document, &controller)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    let document = dom::document()?;
    dom::render_legend(&document)?;
    render_dashboard()
}

/// Mirrors the query input; does not submit.
#[wasm_bindgen]
pub fn set_query(text: &str) {
    STATE.with(|s| s.borrow().controller.borrow_mut().set_query(text));
}

/// Submits `query` to the backend. Blank queries are ignored.
#[wasm_bindgen]
pub fn submit_query(query: String) -> Result<(), JsValue> {
    let (controller, client) = STATE.with(|s| {
        let s = s.borrow();
        (s.controller.clone(), s.client.clone())
    });

    let ticket = {
        let mut c = controller.borrow_mut();
        c.set_query(query.as_str());
        c.submit(&query)
    };
    let Some(ticket) = ticket else {
        return Ok(());
    };
    render_dashboard()?;

    spawn_local(async move {
        let outcome = client.query(ticket.query()).await;
        let completion = controller.borrow_mut().complete(ticket, outcome);
        if completion == Completion::Applied {
            if let Err(err) = render_dashboard() {
                log_error("render", &err);
            }
        }
    });
    Ok(())
}

/// Creates the globe canvas inside `#host_id` and draws the first frame.
#[wasm_bindgen]
pub fn mount_globe(host_id: &str) -> Result<(), JsValue> {
    let document = dom::document()?;
    let host = document
        .get_element_by_id(host_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{host_id}")))?;
    let renderer = CanvasGlobe::attach(&host)?;

    STATE.with(|s| {
        let mut s = s.borrow_mut();
        s.clock.reset();
        s.globe.mount(renderer, GlobeScene::default());
    });
    Ok(())
}

/// Advances the globe to the `requestAnimationFrame` timestamp `now_ms`.
/// Returns false once the globe is unmounted so the host can stop its loop.
#[wasm_bindgen]
pub fn globe_tick(now_ms: f64) -> bool {
    STATE.with(|s| {
        let mut s = s.borrow_mut();
        if !s.globe.is_mounted() {
            return false;
        }
        let frame = s.clock.tick(now_ms);
        s.globe.tick(frame)
    })
}

#[wasm_bindgen]
pub fn unmount_globe() -> bool {
    STATE.with(|s| s.borrow_mut().globe.unmount())
}
