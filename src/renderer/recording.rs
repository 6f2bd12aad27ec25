//! In-memory surface that records every call
//!
//! Used by tests and by the native demo to check what a frame would paint.

use super::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Save,
    Restore,
    FillStyle(String),
    Font(String),
    Clear { width: f32, height: f32 },
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    FillCircle { x: f32, y: f32, radius: f32 },
    FillText { text: String, x: f32, y: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Current save/restore nesting; zero after a well-behaved draw
    pub fn depth(&self) -> i32 {
        self.calls.iter().fold(0, |depth, call| match call {
            DrawCall::Save => depth + 1,
            DrawCall::Restore => depth - 1,
            _ => depth,
        })
    }

    pub fn count(&self, wanted: fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| wanted(c)).count()
    }

    /// All text painted, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        self.calls.push(DrawCall::Restore);
    }

    fn set_fill_style(&mut self, colour: &str) {
        self.calls.push(DrawCall::FillStyle(colour.to_string()));
    }

    fn set_font(&mut self, font: &str) {
        self.calls.push(DrawCall::Font(font.to_string()));
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.calls.push(DrawCall::Clear { width, height });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(DrawCall::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.calls.push(DrawCall::FillCircle { x, y, radius });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.calls.push(DrawCall::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }
}
