//! Action system for undo/redo functionality
//!
//! Every permanent change to the [`MaskLayout`] is an [`Action`] with an
//! `execute` and a `rollback`. The [`ActionExecutor`] owns the layout and the
//! two history stacks, so the history is always linear: executing a new
//! action discards anything that was undone.
//!
//! ## Live edits
//!
//! Pointer drags mutate the layout directly through `layout_mut()` every
//! frame. When the drag ends the store executes a single transform action
//! whose `execute` re-applies the final geometry, so the whole drag becomes
//! one undo step.

use crate::document::MaskLayout;

/// Action trait for undo/redo operations
///
/// Each action must be able to execute (apply changes) and rollback (undo
/// changes). Actions are stored in the undo stack and can be re-executed
/// from the redo stack.
pub trait Action: Send {
    /// Apply this action to the layout
    fn execute(&mut self, layout: &mut MaskLayout);

    /// Undo this action
    fn rollback(&mut self, layout: &mut MaskLayout);

    /// Human-readable description (for logs and the status line)
    fn description(&self) -> String;
}

/// Owns the layout and manages undo/redo
pub struct ActionExecutor {
    layout: MaskLayout,

    /// Stack of executed actions (for undo)
    undo_stack: Vec<Box<dyn Action>>,

    /// Stack of undone actions (for redo)
    redo_stack: Vec<Box<dyn Action>>,

    /// Maximum number of actions to keep in undo stack; unbounded when `None`
    max_undo_depth: Option<usize>,
}

impl ActionExecutor {
    pub fn new(layout: MaskLayout) -> Self {
        Self {
            layout,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_depth: None,
        }
    }

    /// Read-only access to the layout
    pub fn layout(&self) -> &MaskLayout {
        &self.layout
    }

    /// Mutable access for live previews
    ///
    /// Changes made here are not undoable on their own; follow them with an
    /// action that records the final state.
    pub fn layout_mut(&mut self) -> &mut MaskLayout {
        &mut self.layout
    }

    /// Swap in a different layout (e.g. after loading) and drop all history
    pub fn replace_layout(&mut self, layout: MaskLayout) {
        self.layout = layout;
        self.clear_history();
    }

    /// Execute an action and add it to the undo stack
    ///
    /// This clears the redo stack since we're creating a new timeline branch.
    pub fn execute(&mut self, mut action: Box<dyn Action>) {
        action.execute(&mut self.layout);
        log::debug!("Executed: {}", action.description());

        self.redo_stack.clear();
        self.undo_stack.push(action);

        if let Some(depth) = self.max_undo_depth {
            if self.undo_stack.len() > depth {
                self.undo_stack.remove(0);
            }
        }
    }

    /// Undo the last action
    ///
    /// Returns true if an action was undone, false if undo stack is empty.
    pub fn undo(&mut self) -> bool {
        if let Some(mut action) = self.undo_stack.pop() {
            action.rollback(&mut self.layout);
            log::debug!("Undid: {}", action.description());
            self.redo_stack.push(action);
            true
        } else {
            false
        }
    }

    /// Redo the last undone action
    ///
    /// Returns true if an action was redone, false if redo stack is empty.
    pub fn redo(&mut self) -> bool {
        if let Some(mut action) = self.redo_stack.pop() {
            action.execute(&mut self.layout);
            log::debug!("Redid: {}", action.description());
            self.undo_stack.push(action);
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the description of the next action to undo
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(|a| a.description())
    }

    /// Get the description of the next action to redo
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(|a| a.description())
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Cap the undo depth (or lift the cap with `None`), trimming the oldest
    /// entries if needed
    pub fn set_max_undo_depth(&mut self, depth: Option<usize>) {
        self.max_undo_depth = depth;

        let Some(depth) = depth else {
            return;
        };
        if self.undo_stack.len() > depth {
            let remove_count = self.undo_stack.len() - depth;
            self.undo_stack.drain(0..remove_count);
        }
    }
}
