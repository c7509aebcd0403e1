//! Canvas2D confetti rendering
//!
//! The canvas spans the viewport and is cleared and redrawn every animation
//! frame. Rendering reads the sim; it never mutates it.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::ConfettiSim;

/// Full-viewport canvas the confetti is drawn onto
pub struct ConfettiCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl ConfettiCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the backing store to the viewport; returns the new size so the
    /// sim's bounds can follow
    pub fn resize_to_viewport(&self) -> (f32, f32) {
        let window = web_sys::window().expect("no window");
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);

        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        (width as f32, height as f32)
    }

    /// Clear the surface and draw every active particle as a rotated filled
    /// square
    pub fn draw(&self, sim: &ConfettiSim) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);

        for p in sim.particles() {
            self.ctx.save();
            let _ = self.ctx.translate(p.pos.x as f64, p.pos.y as f64);
            let _ = self.ctx.rotate(p.rotation as f64);
            self.ctx.set_fill_style_str(p.color.as_css());
            let size = p.size as f64;
            self.ctx.fill_rect(-size / 2.0, -size / 2.0, size, size);
            self.ctx.restore();
        }
    }
}
