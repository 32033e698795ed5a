use egui::{Pos2, Vec2};

/// Zoom factor applied per wheel notch
pub const ZOOM_STEP: f32 = 1.05;

/// Camera over the canvas: `screen = canvas * scale + translation`.
///
/// Owned next to the stroke ledger, never inside it; panning and zooming are
/// not document edits and never appear in undo history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    scale: f32,
    translation: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translation: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn new(scale: f32, translation: Vec2) -> Self {
        Self { scale, translation }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn screen_to_canvas(&self, screen: Pos2) -> Pos2 {
        ((screen - self.translation).to_vec2() / self.scale).to_pos2()
    }

    pub fn canvas_to_screen(&self, canvas: Pos2) -> Pos2 {
        (canvas.to_vec2() * self.scale + self.translation).to_pos2()
    }

    /// Shift the view by a screen-space delta
    pub fn pan(&mut self, delta: Vec2) {
        self.translation += delta;
    }

    /// Zoom one notch about `pointer`, keeping the canvas point under it fixed.
    ///
    /// Positive `wheel_delta` (scrolling down) zooms out.
    pub fn zoom_at(&mut self, pointer: Pos2, wheel_delta: f32) {
        if wheel_delta == 0.0 {
            return;
        }
        let anchor = self.screen_to_canvas(pointer);
        self.scale = if wheel_delta > 0.0 {
            self.scale / ZOOM_STEP
        } else {
            self.scale * ZOOM_STEP
        };
        self.translation = pointer.to_vec2() - anchor.to_vec2() * self.scale;
    }
}
