use egui::{Color32, Key, Modifiers, PointerButton, Pos2};

use crate::command::EditorCommand;
use crate::config::BrushSettings;
use crate::event::{EditorEvent, EventBus, EventHandler, SubscriptionId};
use crate::input::InputEvent;
use crate::ledger::StrokeLedger;
use crate::stroke::{StrokeLayer, ToolKind};
use crate::view::ViewTransform;

/// Eraser strokes are stored black; only their composite mode matters
pub const ERASER_COLOR: Color32 = Color32::BLACK;

/// What a primary-button drag does on the surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Pan,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Eraser => "Eraser",
            Tool::Pan => "Pan",
        }
    }
}

/// The drawing surface's model: strokes, camera, tool settings and subscribers.
///
/// All mutation happens synchronously inside [`EditingSurface::handle_input`]
/// or [`EditingSurface::execute`]. Listeners get an [`EditorEvent`] after each
/// change and read whatever they render back from the surface.
#[derive(Debug, Default)]
pub struct EditingSurface {
    ledger: StrokeLedger,
    view: ViewTransform,
    tool: Tool,
    brush: BrushSettings,
    space_held: bool,
    // Last screen position of an in-progress pan drag
    pan_anchor: Option<Pos2>,
    events: EventBus,
}

impl EditingSurface {
    pub fn new(brush: BrushSettings) -> Self {
        Self {
            brush,
            ..Default::default()
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> SubscriptionId {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Forward a change that happened outside the surface (e.g. new contours) to listeners
    pub fn notify(&self, event: EditorEvent) {
        self.events.emit(event);
    }

    pub fn ledger(&self) -> &StrokeLedger {
        &self.ledger
    }

    /// The stroke layer currently shown
    pub fn present(&self) -> &StrokeLayer {
        self.ledger.present()
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn set_view(&mut self, view: ViewTransform) {
        self.view = view;
        self.emit_view();
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    pub fn can_undo(&self) -> bool {
        self.ledger.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.ledger.can_redo()
    }

    /// Apply an explicit command. Returns whether anything changed.
    pub fn execute(&mut self, command: EditorCommand) -> bool {
        log::debug!("Executing {:?}", command);
        match command {
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::SelectTool(tool) => self.select_tool(tool),
            EditorCommand::SetStrokeColor(color) => {
                if self.brush.color == color {
                    return false;
                }
                self.brush.color = color;
                self.events.emit(EditorEvent::BrushChanged);
                true
            }
            EditorCommand::SetStrokeWidth(width) => {
                if !(width.is_finite() && width > 0.0) {
                    log::warn!("Ignoring invalid stroke width {}", width);
                    return false;
                }
                if self.brush.width == width {
                    return false;
                }
                self.brush.width = width;
                self.events.emit(EditorEvent::BrushChanged);
                true
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        self.finish_gesture();
        let changed = self.ledger.undo();
        if changed {
            self.emit_history();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.finish_gesture();
        let changed = self.ledger.redo();
        if changed {
            self.emit_history();
        }
        changed
    }

    fn select_tool(&mut self, tool: Tool) -> bool {
        if self.tool == tool {
            return false;
        }
        self.finish_gesture();
        let old = std::mem::replace(&mut self.tool, tool);
        log::info!("Tool changed: {} -> {}", old.name(), tool.name());
        self.events.emit(EditorEvent::ToolChanged { old, new: tool });
        true
    }

    fn is_panning(&self) -> bool {
        self.tool == Tool::Pan || self.space_held
    }

    /// React to one input event. Returns whether the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if event.ends_gesture() {
            return self.gesture_end(event);
        }

        match event {
            InputEvent::PointerDown { location, button } => {
                if *button != PointerButton::Primary || !event.is_in_canvas() {
                    return false;
                }
                self.pointer_down(location.position);
                true
            }
            InputEvent::PointerMove { location } => self.pointer_move(location.position),
            InputEvent::Wheel {
                location,
                delta,
                modifiers,
            } => {
                if !event.is_in_canvas() {
                    return false;
                }
                if is_command(modifiers) {
                    self.view.zoom_at(location.position, delta.y);
                } else {
                    self.view.pan(-*delta);
                }
                self.emit_view();
                true
            }
            InputEvent::KeyDown { key, modifiers } => self.key_down(*key, modifiers),
            InputEvent::KeyUp { key, .. } => {
                if *key == Key::Space {
                    self.space_held = false;
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// Release, leave and focus loss all close the drag in progress
    fn gesture_end(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerUp { button, .. } if *button != PointerButton::Primary => false,
            InputEvent::FocusLost => {
                self.space_held = false;
                self.finish_gesture()
            }
            InputEvent::PointerLeave { .. } if self.ledger.is_drawing() => {
                log::debug!("Pointer left the surface mid-stroke; ending the stroke");
                self.finish_gesture()
            }
            _ => self.finish_gesture(),
        }
    }

    fn key_down(&mut self, key: Key, modifiers: &Modifiers) -> bool {
        match key {
            Key::Space => {
                self.space_held = true;
                true
            }
            Key::Z if is_command(modifiers) => {
                if modifiers.shift {
                    self.redo();
                } else {
                    self.undo();
                }
                true
            }
            Key::Y if is_command(modifiers) => {
                self.redo();
                true
            }
            _ => false,
        }
    }

    fn pointer_down(&mut self, screen: Pos2) {
        if self.is_panning() {
            self.pan_anchor = Some(screen);
            return;
        }

        let point = self.view.screen_to_canvas(screen);
        let (kind, color) = match self.tool {
            Tool::Eraser => (ToolKind::Erase, ERASER_COLOR),
            _ => (ToolKind::Ink, self.brush.color),
        };

        if let Some(id) = self.ledger.end_stroke() {
            // A down without a matching up: the up was lost
            self.events.emit(EditorEvent::StrokeCompleted { id });
        }
        let id = self.ledger.begin_stroke(kind, color, self.brush.width, point);
        self.events.emit(EditorEvent::StrokeStarted { id, tool: kind });
        self.emit_history();
    }

    fn pointer_move(&mut self, screen: Pos2) -> bool {
        if let Some(anchor) = self.pan_anchor {
            self.view.pan(screen - anchor);
            self.pan_anchor = Some(screen);
            self.emit_view();
            return true;
        }

        let Some(id) = self.ledger.active_stroke() else {
            return false;
        };
        let point = self.view.screen_to_canvas(screen);
        if self.ledger.extend_stroke(point) {
            self.events.emit(EditorEvent::StrokeExtended { id });
            return true;
        }
        false
    }

    /// End whatever drag is in progress. Returns whether one was.
    fn finish_gesture(&mut self) -> bool {
        let panned = self.pan_anchor.take().is_some();
        match self.ledger.end_stroke() {
            Some(id) => {
                self.events.emit(EditorEvent::StrokeCompleted { id });
                true
            }
            None => panned,
        }
    }

    fn emit_history(&self) {
        self.events.emit(EditorEvent::HistoryChanged {
            can_undo: self.ledger.can_undo(),
            can_redo: self.ledger.can_redo(),
        });
    }

    fn emit_view(&self) {
        self.events.emit(EditorEvent::ViewChanged {
            scale: self.view.scale(),
            translation: self.view.translation(),
        });
    }
}

fn is_command(modifiers: &Modifiers) -> bool {
    modifiers.command || modifiers.ctrl
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputLocation;
    use egui::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown {
            location: InputLocation::in_canvas(Pos2::new(x, y)),
            button: PointerButton::Primary,
        }
    }

    fn move_to(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove {
            location: InputLocation::in_canvas(Pos2::new(x, y)),
        }
    }

    fn up(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerUp {
            location: InputLocation::in_canvas(Pos2::new(x, y)),
            button: PointerButton::Primary,
        }
    }

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            command: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_pointer_gesture_draws_one_stroke() {
        let mut surface = EditingSurface::default();
        for event in [down(0.0, 0.0), move_to(1.0, 1.0), move_to(2.0, 2.0), up(2.0, 2.0)] {
            surface.handle_input(&event);
        }
        assert_eq!(surface.present().len(), 1);
        assert_eq!(surface.present().strokes()[0].points().len(), 3);
        assert!(!surface.ledger().is_drawing());
    }

    #[test]
    fn test_moves_after_leave_do_not_extend() {
        let mut surface = EditingSurface::default();
        surface.handle_input(&down(0.0, 0.0));
        surface.handle_input(&move_to(1.0, 0.0));
        surface.handle_input(&InputEvent::PointerLeave {
            last_known_location: InputLocation::in_canvas(Pos2::new(1.0, 0.0)),
        });
        assert!(!surface.handle_input(&move_to(5.0, 5.0)));
        assert_eq!(surface.present().strokes()[0].points().len(), 2);
    }

    #[test]
    fn test_focus_loss_ends_stroke() {
        let mut surface = EditingSurface::default();
        surface.handle_input(&down(0.0, 0.0));
        surface.handle_input(&InputEvent::FocusLost);
        assert!(!surface.ledger().is_drawing());
    }

    #[test]
    fn test_secondary_release_keeps_stroke_open() {
        let mut surface = EditingSurface::default();
        surface.handle_input(&down(0.0, 0.0));
        let secondary_up = InputEvent::PointerUp {
            location: InputLocation::in_canvas(Pos2::new(0.0, 0.0)),
            button: PointerButton::Secondary,
        };
        assert!(!surface.handle_input(&secondary_up));
        assert!(surface.ledger().is_drawing());

        assert!(surface.handle_input(&move_to(3.0, 0.0)));
        assert!(surface.handle_input(&up(3.0, 0.0)));
        assert_eq!(surface.present().strokes()[0].points().len(), 2);
    }

    #[test]
    fn test_presses_outside_canvas_are_ignored() {
        let mut surface = EditingSurface::default();
        let outside = InputLocation {
            position: Pos2::new(-4.0, 2.0),
            is_in_canvas: false,
        };
        assert!(!surface.handle_input(&InputEvent::PointerDown {
            location: outside,
            button: PointerButton::Primary,
        }));
        assert!(!surface.handle_input(&InputEvent::Wheel {
            location: outside,
            delta: Vec2::new(0.0, 10.0),
            modifiers: ctrl(),
        }));
        assert!(surface.present().is_empty());
        assert_eq!(surface.view().scale(), 1.0);
    }

    #[test]
    fn test_eraser_tool_records_erase_strokes() {
        let mut surface = EditingSurface::default();
        assert!(surface.execute(EditorCommand::SelectTool(Tool::Eraser)));
        surface.handle_input(&down(0.0, 0.0));
        surface.handle_input(&up(0.0, 0.0));
        let stroke = &surface.present().strokes()[0];
        assert_eq!(stroke.tool(), ToolKind::Erase);
        assert_eq!(stroke.color(), ERASER_COLOR);
    }

    #[test]
    fn test_brush_settings_apply_to_new_strokes() {
        let mut surface = EditingSurface::default();
        surface.execute(EditorCommand::SetStrokeColor(Color32::RED));
        surface.execute(EditorCommand::SetStrokeWidth(9.0));
        assert!(!surface.execute(EditorCommand::SetStrokeWidth(-1.0)));
        surface.handle_input(&down(0.0, 0.0));
        let stroke = &surface.present().strokes()[0];
        assert_eq!(stroke.color(), Color32::RED);
        assert_eq!(stroke.width(), 9.0);
    }

    #[test]
    fn test_pan_tool_moves_view_not_history() {
        let mut surface = EditingSurface::default();
        surface.execute(EditorCommand::SelectTool(Tool::Pan));
        surface.handle_input(&down(10.0, 10.0));
        surface.handle_input(&move_to(15.0, 12.0));
        surface.handle_input(&up(15.0, 12.0));
        assert_eq!(surface.view().translation(), Vec2::new(5.0, 2.0));
        assert!(surface.present().is_empty());
        assert!(!surface.can_undo());
    }

    #[test]
    fn test_space_pans_temporarily() {
        let mut surface = EditingSurface::default();
        surface.handle_input(&InputEvent::KeyDown {
            key: Key::Space,
            modifiers: Modifiers::NONE,
        });
        surface.handle_input(&down(0.0, 0.0));
        surface.handle_input(&move_to(3.0, 0.0));
        surface.handle_input(&up(3.0, 0.0));
        surface.handle_input(&InputEvent::KeyUp {
            key: Key::Space,
            modifiers: Modifiers::NONE,
        });
        assert!(surface.present().is_empty());

        surface.handle_input(&down(3.0, 0.0));
        assert_eq!(surface.present().strokes()[0].points()[0], Pos2::new(0.0, 0.0));
    }

    #[test]
    fn test_strokes_land_in_canvas_coordinates() {
        let mut surface = EditingSurface::default();
        surface.set_view(ViewTransform::new(2.0, Vec2::new(10.0, 0.0)));
        surface.handle_input(&down(30.0, 40.0));
        assert_eq!(surface.present().strokes()[0].points()[0], Pos2::new(10.0, 20.0));
    }

    #[test]
    fn test_wheel_zooms_with_ctrl_and_pans_without() {
        let mut surface = EditingSurface::default();
        let at = InputLocation::in_canvas(Pos2::new(50.0, 50.0));
        surface.handle_input(&InputEvent::Wheel {
            location: at,
            delta: Vec2::new(0.0, -1.0),
            modifiers: ctrl(),
        });
        assert!(surface.view().scale() > 1.0);

        let scale = surface.view().scale();
        surface.handle_input(&InputEvent::Wheel {
            location: at,
            delta: Vec2::new(4.0, 2.0),
            modifiers: Modifiers::NONE,
        });
        assert_eq!(surface.view().scale(), scale);
    }

    #[test]
    fn test_keyboard_undo_redo() {
        let mut surface = EditingSurface::default();
        surface.handle_input(&down(0.0, 0.0));
        surface.handle_input(&up(0.0, 0.0));

        surface.handle_input(&InputEvent::KeyDown { key: Key::Z, modifiers: ctrl() });
        assert!(surface.present().is_empty());

        surface.handle_input(&InputEvent::KeyDown { key: Key::Y, modifiers: ctrl() });
        assert_eq!(surface.present().len(), 1);

        surface.handle_input(&InputEvent::KeyDown { key: Key::Z, modifiers: ctrl() });
        let redo = Modifiers { shift: true, ..ctrl() };
        surface.handle_input(&InputEvent::KeyDown { key: Key::Z, modifiers: redo });
        assert_eq!(surface.present().len(), 1);
    }

    #[test]
    fn test_listeners_are_notified() {
        let mut surface = EditingSurface::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        surface.subscribe(Box::new(move |event: &EditorEvent| {
            sink.borrow_mut().push(event.clone());
        }));

        surface.handle_input(&down(0.0, 0.0));
        surface.handle_input(&up(0.0, 0.0));
        surface.undo();

        let seen = seen.borrow();
        assert!(matches!(seen[0], EditorEvent::StrokeStarted { tool: ToolKind::Ink, .. }));
        assert_eq!(seen[1], EditorEvent::HistoryChanged { can_undo: true, can_redo: false });
        assert!(matches!(seen[2], EditorEvent::StrokeCompleted { .. }));
        assert_eq!(seen[3], EditorEvent::HistoryChanged { can_undo: false, can_redo: true });
    }
}
