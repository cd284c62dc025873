//! Click-driven step timeline with wraparound

use crate::stage::{Stage, StageTable, StageTarget};
use serde::{Deserialize, Serialize};

/// Where the timeline currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimelinePosition {
    /// `None` until the first advance.
    pub index: Option<usize>,
    /// The last advance wrapped from the final stage back to the first.
    pub cycle_complete: bool,
}

/// Result of one [`StepTimeline::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<T: StageTarget> {
    pub index: usize,
    pub stage: &'static Stage<T>,
    pub cycle_complete: bool,
}

impl<T: StageTarget> Step<T> {
    pub fn status(&self) -> StatusMessage {
        StatusMessage::for_step(self.index, self.stage, self.cycle_complete)
    }
}

/// Status line shown under a simulation: an emphasized heading followed by
/// plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub heading: String,
    pub body: String,
}

impl StatusMessage {
    pub fn for_step<T: StageTarget>(index: usize, stage: &Stage<T>, cycle_complete: bool) -> Self {
        if cycle_complete {
            StatusMessage {
                heading: "Cycle Complete!".to_string(),
                body: format!("Starting over. {}", stage.description),
            }
        } else {
            StatusMessage {
                heading: format!("Step {} ({}):", index + 1, stage.name),
                body: stage.description.to_string(),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepTimeline<T: StageTarget> {
    stages: StageTable<T>,
    position: TimelinePosition,
}

impl<T: StageTarget> StepTimeline<T> {
    pub fn new(stages: StageTable<T>) -> Self {
        StepTimeline {
            stages,
            position: TimelinePosition::default(),
        }
    }

    pub fn stages(&self) -> &StageTable<T> {
        &self.stages
    }

    pub fn position(&self) -> TimelinePosition {
        self.position
    }

    /// Move to the next stage, wrapping to the first after the last.
    pub fn advance(&mut self) -> Step<T> {
        let (index, cycle_complete) = match self.position.index {
            None => (0, false),
            Some(current) if current >= self.stages.last_index() => (0, true),
            Some(current) => (current + 1, false),
        };
        self.position = TimelinePosition {
            index: Some(index),
            cycle_complete,
        };
        Step {
            index,
            stage: self.stages.at(index),
            cycle_complete,
        }
    }

    /// Current stage without advancing, used to re-place markers after a
    /// layout change.
    pub fn current(&self) -> Option<Step<T>> {
        let index = self.position.index?;
        self.stages.get(index).map(|stage| Step {
            index,
            stage,
            cycle_complete: self.position.cycle_complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::CirculationTarget;

    fn timeline() -> StepTimeline<CirculationTarget> {
        StepTimeline::new(StageTable::circulation())
    }

    #[test]
    fn first_advance_starts_at_stage_one_without_wrapping() {
        let mut timeline = timeline();
        assert!(timeline.current().is_none());
        let step = timeline.advance();
        assert_eq!(step.index, 0);
        assert!(!step.cycle_complete);
        assert_eq!(step.stage.name, "BodyReturn");
        assert_eq!(
            step.status(),
            StatusMessage {
                heading: "Step 1 (BodyReturn):".to_string(),
                body: "Deoxygenated blood returns from body tissues.".to_string(),
            }
        );
    }

    #[test]
    fn fewer_advances_than_stages_never_wrap() {
        let mut timeline = timeline();
        let count = timeline.stages().len();
        for expected in 0..count {
            let step = timeline.advance();
            assert_eq!(step.index, expected);
            assert!(!step.cycle_complete);
        }
    }

    #[test]
    fn cycle_completes_exactly_once_every_stage_count_advances() {
        let mut timeline = timeline();
        let count = timeline.stages().len();
        timeline.advance();
        for _ in 0..3 {
            let wraps: Vec<_> = (0..count).map(|_| timeline.advance()).collect();
            assert_eq!(wraps.iter().filter(|s| s.cycle_complete).count(), 1);
            let last = wraps.last().unwrap();
            assert_eq!(last.index, 0);
            assert!(last.cycle_complete);
        }
    }

    #[test]
    fn wrap_uses_cycle_complete_message() {
        let mut timeline = timeline();
        for _ in 0..timeline.stages().len() {
            timeline.advance();
        }
        let status = timeline.advance().status();
        assert_eq!(status.heading, "Cycle Complete!");
        assert_eq!(status.body, "Starting over. Deoxygenated blood returns from body tissues.");
    }

    #[test]
    fn current_does_not_advance() {
        let mut timeline = timeline();
        timeline.advance();
        timeline.advance();
        let before = timeline.position();
        let current = timeline.current().unwrap();
        assert_eq!(current.index, 1);
        assert_eq!(current.stage.target, CirculationTarget::RightAtrium);
        assert_eq!(timeline.position(), before);
    }
}
