use egui::Vec2;

use crate::stroke::{StrokeId, ToolKind};
use crate::surface::Tool;

/// Change notifications emitted by the editing surface and session.
///
/// Events describe what changed; listeners pull current state from the
/// emitter rather than receiving it here.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    StrokeStarted {
        id: StrokeId,
        tool: ToolKind,
    },
    StrokeExtended {
        id: StrokeId,
    },
    StrokeCompleted {
        id: StrokeId,
    },
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
    },
    ToolChanged {
        old: Tool,
        new: Tool,
    },
    BrushChanged,
    ViewChanged {
        scale: f32,
        translation: Vec2,
    },
    ContoursChanged {
        count: usize,
    },
}
