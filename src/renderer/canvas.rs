//! `Surface` over the browser 2D canvas context

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::Surface;
use crate::error::SetupError;

/// Look up a canvas by selector, size it, and grab its 2D context
pub fn acquire(
    document: &Document,
    selector: &str,
    width: f32,
    height: f32,
) -> Result<CanvasRenderingContext2d, SetupError> {
    let canvas: HtmlCanvasElement = document
        .query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(|| SetupError::missing(selector))?
        .dyn_into()
        .map_err(|_| SetupError::NotACanvas {
            selector: selector.to_string(),
        })?;

    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let no_context = || SetupError::NoContext {
        selector: selector.to_string(),
    };
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .ok_or_else(no_context)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| no_context())
}

impl Surface for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn set_fill_style(&mut self, colour: &str) {
        self.set_fill_style_str(colour);
    }

    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        CanvasRenderingContext2d::fill_rect(self, x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.begin_path();
        if let Err(e) = self.arc(x as f64, y as f64, radius as f64, 0.0, std::f64::consts::TAU) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.fill();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        if let Err(e) = CanvasRenderingContext2d::fill_text(self, text, x as f64, y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}
