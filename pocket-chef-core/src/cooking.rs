//! Step-by-step cooking mode.

use crate::models::Recipe;

/// Walks through the instructions of a recipe.
///
/// The current step and the completed steps are independent: a step can be
/// marked done without being the current one.
#[derive(Debug, Clone)]
pub struct CookingSession<'a> {
    recipe: &'a Recipe,
    current: usize,
    completed: Vec<bool>,
}

impl<'a> CookingSession<'a> {
    pub fn new(recipe: &'a Recipe) -> Self {
        Self {
            recipe,
            current: 0,
            completed: vec![false; recipe.instructions.len()],
        }
    }

    pub fn recipe(&self) -> &Recipe {
        self.recipe
    }

    pub fn total_steps(&self) -> usize {
        self.recipe.instructions.len()
    }

    /// Zero-based index of the current step.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&str> {
        self.recipe.instructions.get(self.current).map(String::as_str)
    }

    /// Moves to the next step. Returns false on the last step.
    pub fn next_step(&mut self) -> bool {
        if self.current + 1 < self.total_steps() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Moves to the previous step. Returns false on the first step.
    pub fn previous_step(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to a step; out-of-range indexes are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.total_steps() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Flips the completion mark of a step. Returns the new mark, or `None`
    /// if the index is out of range.
    pub fn toggle_step(&mut self, index: usize) -> Option<bool> {
        let done = self.completed.get_mut(index)?;
        *done = !*done;
        Some(*done)
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.get(index).copied().unwrap_or(false)
    }

    /// `(completed, total)`
    pub fn progress(&self) -> (usize, usize) {
        let done = self.completed.iter().filter(|done| **done).count();
        (done, self.total_steps())
    }

    /// True once every step is marked done. A recipe without steps is never
    /// finished.
    pub fn is_finished(&self) -> bool {
        !self.completed.is_empty() && self.completed.iter().all(|done| *done)
    }
}

/// Formats a countdown as `mm:ss`.
pub fn format_timer(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
