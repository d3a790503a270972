use indexmap::IndexMap;

use crate::error::{StoryError, StoryResult};
use crate::render::marks::Mark;
use crate::render::{Animator, MarkCommand};

/// Headless animator used by tests and server-side rendering.
///
/// It validates every command, then maintains the mark set the way a real
/// animation layer would after all transitions settle, so tests can assert
/// on the final visual state without a browser.
#[derive(Debug, Default)]
pub struct NullAnimator {
    marks: IndexMap<String, Mark>,
    pub enter_count: usize,
    pub update_count: usize,
    pub exit_count: usize,
    pub axis_count: usize,
    pub last_axis_y_max: Option<f64>,
    pub last_command_count: usize,
}

impl NullAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Settled marks, in draw order.
    #[must_use]
    pub fn marks(&self) -> Vec<&Mark> {
        self.marks.values().collect()
    }

    #[must_use]
    pub fn mark(&self, key: &str) -> Option<&Mark> {
        self.marks.get(key)
    }

    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn dot_count(&self) -> usize {
        self.marks
            .values()
            .filter(|mark| matches!(mark, Mark::Dot(_)))
            .count()
    }
}

impl Animator for NullAnimator {
    fn apply(&mut self, commands: &[MarkCommand]) -> StoryResult<()> {
        self.last_command_count = commands.len();

        for command in commands {
            match command {
                MarkCommand::Enter { mark, .. } => {
                    mark.validate()?;
                    if self
                        .marks
                        .insert(mark.key().to_owned(), mark.clone())
                        .is_some()
                    {
                        return Err(StoryError::InvalidData(format!(
                            "enter for mark `{}` which already exists",
                            mark.key()
                        )));
                    }
                    self.enter_count += 1;
                }
                MarkCommand::Update { key, to, .. } => {
                    to.validate()?;
                    if self.marks.insert(key.clone(), to.clone()).is_none() {
                        return Err(StoryError::InvalidData(format!(
                            "update for unknown mark `{key}`"
                        )));
                    }
                    self.update_count += 1;
                }
                MarkCommand::Exit { key, .. } => {
                    if self.marks.shift_remove(key).is_none() {
                        return Err(StoryError::InvalidData(format!(
                            "exit for unknown mark `{key}`"
                        )));
                    }
                    self.exit_count += 1;
                }
                MarkCommand::Axis { y_max, .. } => {
                    self.last_axis_y_max = Some(*y_max);
                    self.axis_count += 1;
                }
            }
        }

        Ok(())
    }
}
