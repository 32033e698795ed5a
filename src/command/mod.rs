mod history;

use egui::Color32;

use crate::surface::Tool;

pub use history::EditHistory;

/// Explicit requests an editing surface accepts from its host (toolbar, menu, shortcuts)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorCommand {
    Undo,
    Redo,
    /// Switch the tool used by subsequent pointer gestures
    SelectTool(Tool),
    SetStrokeColor(Color32),
    SetStrokeWidth(f32),
}
