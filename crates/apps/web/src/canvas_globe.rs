use globe::{Camera, GlobeRenderer, GlobeSnapshot, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use crate::{ctx_set_fill_style, ctx_set_stroke_style};

const BACKGROUND: &str = "#000005";
const SPHERE_FILL: &str = "#0b1d3a";
const GRATICULE_STROKE: &str = "rgba(74,144,226,0.45)";
const STAR_FILL: &str = "rgba(255,255,255,0.85)";

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDot {
    pub x: f64,
    pub y: f64,
    pub radius_px: f64,
    pub color: &'static str,
}

/// Screen-space geometry for one globe frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobeLayout {
    /// Center x, center y, radius of the sphere silhouette.
    pub sphere: Option<(f64, f64, f64)>,
    pub stars: Vec<(f64, f64)>,
    /// Graticule polylines, split wherever they pass behind the sphere.
    pub graticule: Vec<Vec<(f64, f64)>>,
    pub markers: Vec<MarkerDot>,
}

pub fn layout(snapshot: &GlobeSnapshot, camera: &Camera, viewport: Viewport) -> GlobeLayout {
    if viewport.is_empty() {
        return GlobeLayout::default();
    }

    let sphere = camera.project(foundation::math::Vec3::ZERO, viewport).map(|c| {
        (
            c.x,
            c.y,
            camera.sphere_screen_radius(snapshot.radius, viewport),
        )
    });

    let stars = snapshot
        .stars
        .iter()
        .filter_map(|s| camera.project(*s, viewport))
        .map(|p| (p.x, p.y))
        .collect();

    let mut graticule = Vec::new();
    for line in &snapshot.graticule {
        let mut run: Vec<(f64, f64)> = Vec::new();
        for p in line {
            match camera.project(*p, viewport).filter(|_| camera.faces(*p)) {
                Some(sp) => run.push((sp.x, sp.y)),
                None => {
                    if run.len() > 1 {
                        graticule.push(std::mem::take(&mut run));
                    } else {
                        run.clear();
                    }
                }
            }
        }
        if run.len() > 1 {
            graticule.push(run);
        }
    }

    let markers = snapshot
        .markers
        .iter()
        .filter(|m| camera.faces(m.position))
        .filter_map(|m| {
            let p = camera.project(m.position, viewport)?;
            Some(MarkerDot {
                x: p.x,
                y: p.y,
                radius_px: camera.scale_at(m.size, p.depth, viewport).max(2.0),
                color: m.color,
            })
        })
        .collect();

    GlobeLayout {
        sphere,
        stars,
        graticule,
        markers,
    }
}

/// Canvas-2D globe renderer owning a canvas inside a host element.
pub struct CanvasGlobe {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    camera: Camera,
}

impl CanvasGlobe {
    /// Creates a canvas filling `host` and appends it.
    pub fn attach(host: &Element) -> Result<Self, JsValue> {
        let document = host
            .owner_document()
            .ok_or_else(|| JsValue::from_str("host has no document"))?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas.set_width(host.client_width().max(1) as u32);
        canvas.set_height(host.client_height().max(1) as u32);
        canvas.set_class_name("globe-canvas");
        host.append_child(&canvas)?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            canvas,
            ctx,
            camera: Camera::default(),
        })
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }
}

impl GlobeRenderer for CanvasGlobe {
    fn draw(&mut self, snapshot: &GlobeSnapshot) {
        let vp = self.viewport();
        let ctx = &self.ctx;
        let frame = layout(snapshot, &self.camera, vp);

        ctx_set_fill_style(ctx, BACKGROUND);
        ctx.fill_rect(0.0, 0.0, vp.width, vp.height);

        ctx_set_fill_style(ctx, STAR_FILL);
        for (x, y) in &frame.stars {
            ctx.fill_rect(*x, *y, 1.5, 1.5);
        }

        if let Some((cx, cy, r)) = frame.sphere {
            ctx_set_fill_style(ctx, SPHERE_FILL);
            ctx.begin_path();
            let _ = ctx.arc(cx, cy, r, 0.0, std::f64::consts::TAU);
            ctx.fill();
        }

        ctx_set_stroke_style(ctx, GRATICULE_STROKE);
        ctx.set_line_width(1.0);
        for line in &frame.graticule {
            ctx.begin_path();
            for (i, (x, y)) in line.iter().enumerate() {
                if i == 0 {
                    ctx.move_to(*x, *y);
                } else {
                    ctx.line_to(*x, *y);
                }
            }
            ctx.stroke();
        }

        for m in &frame.markers {
            ctx_set_fill_style(ctx, m.color);
            ctx.begin_path();
            let _ = ctx.arc(m.x, m.y, m.radius_px, 0.0, std::f64::consts::TAU);
            ctx.fill();
        }
    }

    fn release(&mut self) {
        self.canvas.remove();
    }
}
