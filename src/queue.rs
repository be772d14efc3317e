//! Pending commands and executed history.
//!
//! ```text
//! enqueue -> Pending --run_next--> Executed (history) --undo_last--> discarded
//! ```
//!
//! There is no redo: an undone command is dropped.

use std::collections::VecDeque;

use crate::command::{Command, ReversibleCommand};
use crate::model::Model;

pub const DEFAULT_HISTORY_LIMIT: usize = 200;

#[derive(Debug)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
    history: Vec<Command>,
    limit: usize,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl CommandQueue {
    pub fn new(limit: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            history: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn enqueue(&mut self, command: impl Into<Command>) {
        self.pending.push_back(command.into());
    }

    /// Executes the oldest pending command. Returns `false` if nothing was
    /// pending.
    pub fn run_next(&mut self, model: &mut Model) -> bool {
        let Some(mut command) = self.pending.pop_front() else {
            return false;
        };
        command.execute(model);
        tracing::debug!(command = command.label(), "executed");
        self.history.push(command);
        if self.history.len() > self.limit {
            let overflow = self.history.len() - self.limit;
            self.history.drain(0..overflow);
        }
        true
    }

    pub fn run_all(&mut self, model: &mut Model) -> usize {
        let mut ran = 0;
        while self.run_next(model) {
            ran += 1;
        }
        ran
    }

    /// Reverses and discards the most recent command, returning its label.
    pub fn undo_last(&mut self, model: &mut Model) -> Option<&'static str> {
        let mut command = self.history.pop()?;
        command.undo(model);
        tracing::debug!(command = command.label(), "undone");
        Some(command.label())
    }

    pub fn history(&self) -> &[Command] {
        &self.history
    }

    pub fn last(&self) -> Option<&Command> {
        self.history.last()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.history.clear();
    }
}
