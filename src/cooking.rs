//! Guided cooking mode.
//!
//! A recipe's instruction block is split into steps that are shown one at a
//! time. The split is a heuristic: a run of digits followed by a period
//! (`"1."`, `"12."`) or a newline ends a step. It also fires inside numbers
//! such as `"2.5"`, which is accepted as a known limitation.

use crate::error::CookingError;
use crate::model::CookingStep;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// ASCII digits only; `\d` would also match other Unicode digit classes
static STEP_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+\.|\n").unwrap());

/// Split free-text instructions into numbered steps
///
/// Fragments that are empty after trimming are dropped, and the survivors
/// are numbered from 1. Input that is empty or only whitespace yields no
/// steps; input without any boundary yields a single step.
pub fn split_into_steps(instructions: &str) -> Vec<CookingStep> {
    STEP_BOUNDARY
        .split(instructions)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .enumerate()
        .map(|(index, fragment)| CookingStep {
            step: index + 1,
            instruction: fragment.to_string(),
            completed: false,
        })
        .collect()
}

/// Step-by-step cooking session
///
/// Starts inactive. [`CookingMode::start`] enters the first step when the
/// instructions contain at least one step; navigation never wraps around.
#[derive(Debug, Default)]
pub struct CookingMode {
    steps: Vec<CookingStep>,
    current: usize,
    active: bool,
}

impl CookingMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session from a raw instruction block
    ///
    /// On [`CookingError::EmptyInstructions`] the controller stays inactive,
    /// and a previous session, if any, is left untouched.
    pub fn start(&mut self, instructions: &str) -> Result<&CookingStep, CookingError> {
        let steps = split_into_steps(instructions);
        if steps.is_empty() {
            return Err(CookingError::EmptyInstructions);
        }

        debug!("Starting cooking mode with {} steps", steps.len());
        self.steps = steps;
        self.current = 0;
        self.active = true;
        Ok(&self.steps[0])
    }

    /// Advance one step, staying on the last one
    pub fn next(&mut self) -> Option<&CookingStep> {
        if !self.active {
            return None;
        }
        if self.current + 1 < self.steps.len() {
            self.current += 1;
        }
        self.current_step()
    }

    /// Go back one step, staying on the first one
    pub fn previous(&mut self) -> Option<&CookingStep> {
        if !self.active {
            return None;
        }
        self.current = self.current.saturating_sub(1);
        self.current_step()
    }

    /// Mark the step at a 0-based `index` as done without moving
    pub fn complete(&mut self, index: usize) -> Result<(), CookingError> {
        if !self.active {
            return Err(CookingError::NotActive);
        }
        let len = self.steps.len();
        let step = self
            .steps
            .get_mut(index)
            .ok_or(CookingError::StepOutOfRange { index, len })?;
        step.completed = true;
        Ok(())
    }

    /// Mark the step currently shown as done
    pub fn complete_current(&mut self) -> Result<(), CookingError> {
        self.complete(self.current)
    }

    /// Leave cooking mode, discarding all steps
    pub fn exit(&mut self) {
        self.steps.clear();
        self.current = 0;
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 0-based index of the step being shown
    pub fn current_index(&self) -> Option<usize> {
        self.active.then_some(self.current)
    }

    pub fn current_step(&self) -> Option<&CookingStep> {
        if self.active {
            self.steps.get(self.current)
        } else {
            None
        }
    }

    pub fn steps(&self) -> &[CookingStep] {
        &self.steps
    }

    /// (completed, total)
    pub fn progress(&self) -> (usize, usize) {
        let done = self.steps.iter().filter(|s| s.completed).count();
        (done, self.steps.len())
    }
}
