use egui::{Key, Modifiers, PointerButton, Pos2, Vec2};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// Whether this position is within the drawing surface
    pub is_in_canvas: bool,
}

impl InputLocation {
    pub fn in_canvas(position: Pos2) -> Self {
        Self {
            position,
            is_in_canvas: true,
        }
    }
}

/// Discrete input the editing surface reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse button was released
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Pointer moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
    },
    /// Pointer left the drawing surface
    PointerLeave {
        last_known_location: InputLocation,
    },
    /// Window lost keyboard/pointer focus
    FocusLost,
    /// Scroll wheel or trackpad scroll, in screen pixels
    Wheel {
        location: InputLocation,
        delta: Vec2,
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Helper to check if an input event occurred within the canvas
    pub fn is_in_canvas(&self) -> bool {
        match self {
            InputEvent::PointerDown { location, .. }
            | InputEvent::PointerUp { location, .. }
            | InputEvent::PointerMove { location }
            | InputEvent::Wheel { location, .. } => location.is_in_canvas,
            InputEvent::PointerLeave {
                last_known_location,
            } => last_known_location.is_in_canvas,
            _ => false,
        }
    }

    /// Events after which no further move for the current gesture can arrive
    pub fn ends_gesture(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave { .. } | InputEvent::FocusLost
        )
    }
}
