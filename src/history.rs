// Per-player move history with an undo/redo play head.
// The head points at the current move; undoing past the first move parks
// the head at None. Recording with the head in the past prunes the future.

use serde::{Deserialize, Serialize};

use crate::geometry::{GridVector, LineSeg};

/// One turn of the simulation: the velocity vector carried into the turn,
/// the quantized force applied, and the resulting vector actually flown.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicsStep {
    pub line_seg: LineSeg,
    pub force: GridVector,
    pub final_seg: LineSeg,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    steps: Vec<PhysicsStep>,
    head: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> Option<usize> {
        self.head
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step the head currently points at.
    pub fn current(&self) -> Option<&PhysicsStep> {
        self.head.map(|h| &self.steps[h])
    }

    /// Steps up to and including the head, i.e. what should be drawn.
    pub fn up_to_head(&self) -> &[PhysicsStep] {
        match self.head {
            None => &[],
            Some(h) => &self.steps[..=h],
        }
    }

    pub fn record(&mut self, step: PhysicsStep) {
        match self.head {
            None => self.steps.clear(),
            Some(h) => self.steps.truncate(h + 1),
        }
        self.steps.push(step);
        self.move_head_forward();
    }

    fn move_head_forward(&mut self) {
        self.head = Some(match self.head {
            None => 0,
            Some(h) => (h + 1).min(self.steps.len() - 1),
        });
    }

    pub fn undo(&mut self) {
        self.head = match self.head {
            None => None,
            Some(0) => None,
            Some(h) => Some(h - 1),
        };
    }

    /// Undo everything in one go.
    pub fn undo_all(&mut self) {
        self.head = None;
    }

    pub fn redo(&mut self) {
        if !self.steps.is_empty() {
            self.move_head_forward();
        }
    }

    /// Restore a head loaded from a save file, clamped to the recorded steps.
    pub fn set_head(&mut self, head: Option<usize>) {
        self.head = head.map(|h| h.min(self.steps.len().saturating_sub(1)));
        if self.steps.is_empty() {
            self.head = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GridPoint;

    fn step(x: i32) -> PhysicsStep {
        let l = LineSeg::new(GridPoint::new(x, 0), GridPoint::new(x + 1, 0));
        PhysicsStep {
            line_seg: l,
            force: GridVector::ZERO,
            final_seg: l,
        }
    }

    #[test]
    fn empty_history_has_no_head() {
        let h = History::new();
        assert_eq!(h.head(), None);
        assert!(h.up_to_head().is_empty());
        assert!(h.current().is_none());
    }

    #[test]
    fn record_advances_head() {
        let mut h = History::new();
        h.record(step(1));
        assert_eq!(h.head(), Some(0));
        h.record(step(2));
        assert_eq!(h.head(), Some(1));
        h.record(step(3));
        assert_eq!(h.head(), Some(2));
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn undo_all_the_way_then_redo_all_the_way() {
        let mut h = History::new();
        for i in 0..3 {
            h.record(step(i));
        }
        h.undo();
        assert_eq!(h.head(), Some(1));
        h.undo();
        assert_eq!(h.head(), Some(0));
        h.undo();
        assert_eq!(h.head(), None);
        h.undo(); // already at the beginning
        assert_eq!(h.head(), None);

        h.redo();
        assert_eq!(h.head(), Some(0));
        h.redo();
        assert_eq!(h.head(), Some(1));
        h.redo();
        assert_eq!(h.head(), Some(2));
        h.redo(); // already at the end, head does not move
        assert_eq!(h.head(), Some(2));
    }

    #[test]
    fn redo_on_empty_history_keeps_no_head() {
        let mut h = History::new();
        h.redo();
        assert_eq!(h.head(), None);
    }

    #[test]
    fn record_after_undo_prunes_the_future() {
        let mut h = History::new();
        for i in 0..4 {
            h.record(step(i));
        }
        h.undo();
        h.undo();
        assert_eq!(h.head(), Some(1));
        h.record(step(9));
        assert_eq!(h.len(), 3);
        assert_eq!(h.head(), Some(2));
        assert_eq!(h.current(), Some(&step(9)));
    }

    #[test]
    fn record_after_undo_all_starts_over() {
        let mut h = History::new();
        h.record(step(1));
        h.record(step(2));
        h.undo_all();
        h.record(step(7));
        assert_eq!(h.len(), 1);
        assert_eq!(h.head(), Some(0));
    }

    #[test]
    fn up_to_head_tracks_the_play_head() {
        let mut h = History::new();
        for i in 0..3 {
            h.record(step(i));
        }
        assert_eq!(h.up_to_head().len(), 3);
        h.undo();
        assert_eq!(h.up_to_head().len(), 2);
        h.undo_all();
        assert!(h.up_to_head().is_empty());
    }

    #[test]
    fn set_head_clamps_to_recorded_steps() {
        let mut h = History::new();
        h.record(step(1));
        h.set_head(Some(10));
        assert_eq!(h.head(), Some(0));
        h.set_head(None);
        assert_eq!(h.head(), None);

        let mut empty = History::new();
        empty.set_head(Some(3));
        assert_eq!(empty.head(), None);
    }
}
