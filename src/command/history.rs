/// Linear undo/redo history around a current value.
///
/// `past` holds older snapshots oldest-first. `future` is kept as a stack
/// (next redo last); [`EditHistory::future`] yields it in timeline order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditHistory<T> {
    past: Vec<T>,
    present: T,
    future: Vec<T>,
}

impl<T> EditHistory<T> {
    /// Creates a history with `initial` as the only visited state
    pub fn new(initial: T) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: Vec::new(),
        }
    }

    /// Make `next` the present state; the redo stack is dropped
    pub fn push(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        self.future.clear();
    }

    /// Step back one state. Returns false (and changes nothing) when there is no past.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        true
    }

    /// Step forward one state. Returns false (and changes nothing) when there is no future.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        true
    }

    /// Returns true if there are states that can be undone
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Returns true if there are states that can be redone
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Edit the present entry in place, without recording a new state
    pub fn present_mut(&mut self) -> &mut T {
        &mut self.present
    }

    pub fn past(&self) -> &[T] {
        &self.past
    }

    /// States reachable by redo, nearest first
    pub fn future(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.future.iter().rev()
    }

    /// Every visited state in order: past, present, then future
    pub fn timeline(&self) -> impl Iterator<Item = &T> + '_ {
        self.past
            .iter()
            .chain(std::iter::once(&self.present))
            .chain(self.future())
    }

    /// Forget past and future, keeping the present state
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
