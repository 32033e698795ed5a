use egui::{Color32, Pos2};
use std::sync::Arc;

use crate::command::EditHistory;
use crate::stroke::{Stroke, StrokeId, StrokeLayer, ToolKind};

/// Undoable record of hand-drawn strokes.
///
/// A gesture costs exactly one history entry: [`StrokeLedger::begin_stroke`]
/// pushes a layer with the new stroke on top, [`StrokeLedger::extend_stroke`]
/// appends points to that stroke inside the present entry, and
/// [`StrokeLedger::end_stroke`] seals it without touching the stacks.
///
/// Strokes are shared between snapshots through `Arc`. The stroke being drawn
/// is extended with `Arc::make_mut`, so a snapshot that already holds it keeps
/// its own copy of the points.
#[derive(Clone, Debug, Default)]
pub struct StrokeLedger {
    history: EditHistory<StrokeLayer>,
    active: Option<StrokeId>,
}

impl StrokeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stroke at `point`, pushing one new history entry.
    ///
    /// A stroke still in progress is finished first; its end event was lost.
    pub fn begin_stroke(&mut self, tool: ToolKind, color: Color32, width: f32, point: Pos2) -> StrokeId {
        if let Some(previous) = self.end_stroke() {
            log::warn!("Stroke {} was never ended; finishing it before starting a new one", previous);
        }

        let stroke = Stroke::new_ref(tool, color, width, vec![point]);
        let id = stroke.id();
        let next = self.history.present().with_stroke(stroke);
        self.history.push(next);
        self.active = Some(id);
        log::debug!("Began {:?} stroke {}", tool, id);
        id
    }

    /// Append `point` to the stroke in progress. Returns false if no stroke is active.
    pub fn extend_stroke(&mut self, point: Pos2) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match self.history.present_mut().last_mut() {
            Some(stroke) if stroke.id() == active => {
                Arc::make_mut(stroke).push_point(point);
                true
            }
            _ => {
                // The present entry no longer ends with our stroke; nothing sane to extend.
                log::warn!("Active stroke {} is not on top of the present layer", active);
                self.active = None;
                false
            }
        }
    }

    /// Seal the stroke in progress, returning its id
    pub fn end_stroke(&mut self) -> Option<StrokeId> {
        let id = self.active.take()?;
        if let Some(stroke) = self.history.present().last() {
            log::debug!("Ended stroke {} with {} points", id, stroke.points().len());
        }
        Some(id)
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_stroke(&self) -> Option<StrokeId> {
        self.active
    }

    /// Record `layer` as a new state. Ends any stroke in progress.
    pub fn push(&mut self, layer: StrokeLayer) {
        self.end_stroke();
        self.history.push(layer);
    }

    /// Ends any stroke in progress, then steps back one entry
    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        self.history.undo()
    }

    /// Ends any stroke in progress, then steps forward one entry
    pub fn redo(&mut self) -> bool {
        self.end_stroke();
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The layer currently shown
    pub fn present(&self) -> &StrokeLayer {
        self.history.present()
    }

    pub fn history(&self) -> &EditHistory<StrokeLayer> {
        &self.history
    }
}
