//! Linear undo/redo history of raster snapshots.
//!
//! [`EditHistory`] owns the active raster together with two stacks of
//! earlier and later snapshots (most recent last). Each slot owns its raster
//! outright, so no two slots ever share a buffer.
//!
//! # Transitions
//!
//! | Operation | undo stack | redo stack | active |
//! |-----------|------------|------------|--------|
//! | `reset(r)` | cleared | cleared | `r` |
//! | `commit(r)` | push old active | cleared | `r` |
//! | `undo()` | pop | push old active | popped |
//! | `redo()` | push old active | pop | popped |
//!
//! Depth is unbounded: nothing is evicted.

use crate::error::EditError;
use crate::raster::Raster;

/// Undo/redo stacks plus the currently active raster.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    undo: Vec<Raster>,
    redo: Vec<Raster>,
    active: Option<Raster>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh history whose only state is `raster`.
    pub fn reset(&mut self, raster: Raster) -> &Raster {
        self.undo.clear();
        self.redo.clear();
        &*self.active.insert(raster)
    }

    /// Make `raster` the active state.
    ///
    /// The previous active raster (if any) is pushed onto the undo stack and
    /// the redo stack is cleared. This is the only operation that discards
    /// redo entries.
    pub fn commit(&mut self, raster: Raster) -> &Raster {
        if let Some(previous) = self.active.take() {
            self.undo.push(previous);
        }
        self.redo.clear();
        &*self.active.insert(raster)
    }

    /// Step back one edit.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NothingToUndo` if the undo stack is empty.
    pub fn undo(&mut self) -> Result<&Raster, EditError> {
        let restored = self.undo.pop().ok_or(EditError::NothingToUndo)?;
        if let Some(current) = self.active.take() {
            self.redo.push(current);
        }
        Ok(&*self.active.insert(restored))
    }

    /// Step forward one undone edit.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NothingToRedo` if the redo stack is empty.
    pub fn redo(&mut self) -> Result<&Raster, EditError> {
        let restored = self.redo.pop().ok_or(EditError::NothingToRedo)?;
        if let Some(current) = self.active.take() {
            self.undo.push(current);
        }
        Ok(&*self.active.insert(restored))
    }

    pub fn active(&self) -> Option<&Raster> {
        self.active.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of snapshots on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of snapshots on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Commit(u8),
        Undo,
        Redo,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::Commit),
            Just(Op::Undo),
            Just(Op::Redo),
        ]
    }

    proptest! {
        /// Property: after any commit the redo stack is empty, and the
        /// total number of states never changes except on commit.
        #[test]
        fn prop_commit_clears_redo(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut history = EditHistory::new();
            history.reset(Raster::gray(1, 1, vec![0]).unwrap());

            for op in ops {
                let before = history.undo_depth() + history.redo_depth();
                match op {
                    Op::Commit(v) => {
                        history.commit(Raster::gray(1, 1, vec![v]).unwrap());
                        prop_assert_eq!(history.redo_depth(), 0);
                    }
                    Op::Undo => {
                        let had = history.can_undo();
                        prop_assert_eq!(history.undo().is_ok(), had);
                        prop_assert_eq!(history.undo_depth() + history.redo_depth(), before);
                    }
                    Op::Redo => {
                        let had = history.can_redo();
                        prop_assert_eq!(history.redo().is_ok(), had);
                        prop_assert_eq!(history.undo_depth() + history.redo_depth(), before);
                    }
                }
                prop_assert!(history.active().is_some());
            }
        }

        /// Property: undo followed by redo restores the same raster.
        #[test]
        fn prop_undo_redo_restores(values in prop::collection::vec(any::<u8>(), 1..20)) {
            let mut history = EditHistory::new();
            history.reset(Raster::gray(1, 1, vec![0]).unwrap());
            for v in &values {
                history.commit(Raster::gray(1, 1, vec![*v]).unwrap());
            }

            let current = history.active().cloned();
            history.undo().unwrap();
            history.redo().unwrap();
            prop_assert_eq!(history.active().cloned(), current);
        }
    }
}
