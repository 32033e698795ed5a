use egui::{Color32, Pos2};
use std::sync::Arc;
use uuid::Uuid;

pub type StrokeId = Uuid;

/// Whether a stroke paints or removes previously drawn content
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToolKind {
    #[default]
    Ink,
    Erase,
}

/// One continuous hand-drawn gesture
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    tool: ToolKind,
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
}

// Layers share strokes; extending one goes through `Arc::make_mut`
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(tool: ToolKind, color: Color32, width: f32, points: Vec<Pos2>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool,
            points,
            color,
            width,
        }
    }

    pub fn new_ref(tool: ToolKind, color: Color32, width: f32, points: Vec<Pos2>) -> StrokeRef {
        Arc::new(Self::new(tool, color, width, points))
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn is_eraser(&self) -> bool {
        self.tool == ToolKind::Erase
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    // Only the ledger may call this, and only for the stroke it is drawing.
    pub(crate) fn push_point(&mut self, point: Pos2) {
        self.points.push(point);
    }
}

/// Ordered strokes; index order is paint order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeLayer {
    strokes: Vec<StrokeRef>,
}

impl StrokeLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of this layer with `stroke` painted on top
    pub fn with_stroke(&self, stroke: StrokeRef) -> Self {
        let mut strokes = Vec::with_capacity(self.strokes.len() + 1);
        strokes.extend(self.strokes.iter().cloned());
        strokes.push(stroke);
        Self { strokes }
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn last(&self) -> Option<&StrokeRef> {
        self.strokes.last()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut StrokeRef> {
        self.strokes.last_mut()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

impl FromIterator<StrokeRef> for StrokeLayer {
    fn from_iter<I: IntoIterator<Item = StrokeRef>>(iter: I) -> Self {
        Self {
            strokes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_stroke_leaves_original_untouched() {
        let base = StrokeLayer::new().with_stroke(Stroke::new_ref(
            ToolKind::Ink,
            Color32::BLACK,
            2.0,
            vec![Pos2::new(0.0, 0.0)],
        ));
        let next = base.with_stroke(Stroke::new_ref(
            ToolKind::Erase,
            Color32::BLACK,
            8.0,
            vec![Pos2::new(1.0, 1.0)],
        ));

        assert_eq!(base.len(), 1);
        assert_eq!(next.len(), 2);
        assert!(Arc::ptr_eq(&base.strokes()[0], &next.strokes()[0]));
        assert!(next.last().unwrap().is_eraser());
    }

    #[test]
    fn test_stroke_ids_are_unique() {
        let a = Stroke::new(ToolKind::Ink, Color32::RED, 1.0, Vec::new());
        let b = Stroke::new(ToolKind::Ink, Color32::RED, 1.0, Vec::new());
        assert_ne!(a.id(), b.id());
    }
}
