//! Timer-driven reflex-arc run
//!
//! A run walks the signal from the stimulus point to the effector muscle.
//! The state machine never sleeps itself: every transition that needs a
//! pause asks the [`Scheduler`] to call [`ReflexArc::dwell_elapsed`] later.
//!
//! ```text
//! Idle --trigger--> Stepping(0) --dwell--> Stepping(1) ... Stepping(last)
//!   ^                                                          |
//!   +------------------final hold------ Cooldown <----dwell----+
//! ```

use crate::config::ReflexConfig;
use crate::stage::{ReflexTarget, StageTable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const PROPAGATING_STATUS: &str = "Pain stimulus applied! Signal propagating...";
pub const COMPLETE_STATUS: &str =
    "Reflex action complete (e.g., muscle contracts). Ready for new stimulus.";

/// Deferred wake-up source. Each call must eventually lead to exactly one
/// [`ReflexArc::dwell_elapsed`].
pub trait Scheduler {
    fn schedule_after(&mut self, delay: Duration);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReflexPhase {
    #[default]
    Idle,
    Stepping(usize),
    Cooldown,
}

impl ReflexPhase {
    pub fn is_running(self) -> bool {
        !matches!(self, ReflexPhase::Idle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflexTiming {
    pub dwell: Duration,
    pub final_hold: Duration,
}

impl Default for ReflexTiming {
    fn default() -> Self {
        ReflexTiming::from(&ReflexConfig::default())
    }
}

impl From<&ReflexConfig> for ReflexTiming {
    fn from(config: &ReflexConfig) -> Self {
        ReflexTiming {
            dwell: Duration::from_millis(config.dwell_ms),
            final_hold: Duration::from_millis(config.final_hold_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerState {
    Hidden,
    Over(ReflexTarget),
}

/// Everything the page shows for the reflex arc at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReflexFrame {
    pub phase: ReflexPhase,
    pub active: Option<ReflexTarget>,
    pub marker: MarkerState,
    /// `None` leaves the page's initial text untouched.
    pub status: Option<&'static str>,
    pub trigger_enabled: bool,
}

impl Default for ReflexFrame {
    fn default() -> Self {
        ReflexFrame {
            phase: ReflexPhase::Idle,
            active: None,
            marker: MarkerState::Hidden,
            status: None,
            trigger_enabled: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReflexArc {
    stages: StageTable<ReflexTarget>,
    timing: ReflexTiming,
    phase: ReflexPhase,
    completed_runs: u32,
}

impl ReflexArc {
    pub fn new(stages: StageTable<ReflexTarget>, timing: ReflexTiming) -> Self {
        ReflexArc {
            stages,
            timing,
            phase: ReflexPhase::Idle,
            completed_runs: 0,
        }
    }

    pub fn phase(&self) -> ReflexPhase {
        self.phase
    }

    pub fn completed_runs(&self) -> u32 {
        self.completed_runs
    }

    /// Start a run. Returns `None` without scheduling anything while a run is
    /// already in progress.
    pub fn trigger(&mut self, scheduler: &mut impl Scheduler) -> Option<ReflexFrame> {
        if self.phase.is_running() {
            return None;
        }
        self.phase = ReflexPhase::Stepping(0);
        scheduler.schedule_after(self.timing.dwell);
        Some(self.frame())
    }

    /// The pending dwell finished. A stray wake-up while idle changes nothing.
    pub fn dwell_elapsed(&mut self, scheduler: &mut impl Scheduler) -> ReflexFrame {
        match self.phase {
            ReflexPhase::Idle => {}
            ReflexPhase::Stepping(index) if index < self.stages.last_index() => {
                self.phase = ReflexPhase::Stepping(index + 1);
                scheduler.schedule_after(self.timing.dwell);
            }
            ReflexPhase::Stepping(_) => {
                self.phase = ReflexPhase::Cooldown;
                scheduler.schedule_after(self.timing.final_hold);
            }
            ReflexPhase::Cooldown => {
                self.phase = ReflexPhase::Idle;
                self.completed_runs += 1;
            }
        }
        self.frame()
    }

    pub fn frame(&self) -> ReflexFrame {
        match self.phase {
            ReflexPhase::Idle => ReflexFrame {
                status: (self.completed_runs > 0).then_some(COMPLETE_STATUS),
                ..ReflexFrame::default()
            },
            ReflexPhase::Stepping(index) => {
                let target = self.stages.at(index).target;
                ReflexFrame {
                    phase: self.phase,
                    active: Some(target),
                    marker: MarkerState::Over(target),
                    status: Some(PROPAGATING_STATUS),
                    trigger_enabled: false,
                }
            }
            ReflexPhase::Cooldown => {
                let target = self.stages.at(self.stages.last_index()).target;
                ReflexFrame {
                    phase: self.phase,
                    active: Some(target),
                    marker: MarkerState::Over(target),
                    status: Some(PROPAGATING_STATUS),
                    trigger_enabled: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::StageTarget;

    #[derive(Default)]
    struct RecordingScheduler {
        delays: Vec<Duration>,
    }

    impl Scheduler for RecordingScheduler {
        fn schedule_after(&mut self, delay: Duration) {
            self.delays.push(delay);
        }
    }

    fn arc() -> ReflexArc {
        ReflexArc::new(StageTable::reflex_arc(), ReflexTiming::default())
    }

    #[test]
    fn trigger_starts_at_the_stimulus_and_locks_the_control() {
        let mut arc = arc();
        let mut scheduler = RecordingScheduler::default();
        let frame = arc.trigger(&mut scheduler).unwrap();
        assert_eq!(frame.phase, ReflexPhase::Stepping(0));
        assert_eq!(frame.active, Some(ReflexTarget::Stimulus));
        assert_eq!(frame.marker, MarkerState::Over(ReflexTarget::Stimulus));
        assert_eq!(frame.status, Some(PROPAGATING_STATUS));
        assert!(!frame.trigger_enabled);
        assert_eq!(scheduler.delays, vec![Duration::from_millis(700)]);
    }

    #[test]
    fn trigger_while_running_is_rejected_without_side_effects() {
        let mut arc = arc();
        let mut scheduler = RecordingScheduler::default();
        arc.trigger(&mut scheduler);
        arc.dwell_elapsed(&mut scheduler);
        let before = arc.frame();

        assert!(arc.trigger(&mut scheduler).is_none());
        assert_eq!(arc.frame(), before);
        assert_eq!(scheduler.delays.len(), 2);

        while arc.phase() != ReflexPhase::Cooldown {
            arc.dwell_elapsed(&mut scheduler);
        }
        assert!(arc.trigger(&mut scheduler).is_none());
    }

    #[test]
    fn full_run_visits_each_stage_then_holds_the_last() {
        let mut arc = arc();
        let mut scheduler = RecordingScheduler::default();
        let mut visited = vec![arc.trigger(&mut scheduler).unwrap().active.unwrap()];

        loop {
            let frame = arc.dwell_elapsed(&mut scheduler);
            match frame.phase {
                ReflexPhase::Stepping(_) => visited.push(frame.active.unwrap()),
                ReflexPhase::Cooldown => {
                    assert_eq!(frame.active, Some(ReflexTarget::EffectorMuscle));
                    assert!(!frame.trigger_enabled);
                }
                ReflexPhase::Idle => {
                    assert_eq!(frame.active, None);
                    assert_eq!(frame.marker, MarkerState::Hidden);
                    assert_eq!(frame.status, Some(COMPLETE_STATUS));
                    assert!(frame.trigger_enabled);
                    break;
                }
            }
        }

        assert_eq!(visited, ReflexTarget::ALL);
        let dwell = Duration::from_millis(700);
        let mut expected = vec![dwell; visited.len()];
        expected.push(Duration::from_millis(1000));
        assert_eq!(scheduler.delays, expected);
        assert_eq!(arc.completed_runs(), 1);
    }

    #[test]
    fn stray_wake_up_while_idle_is_ignored() {
        let mut arc = arc();
        let mut scheduler = RecordingScheduler::default();
        let frame = arc.dwell_elapsed(&mut scheduler);
        assert_eq!(frame, ReflexFrame::default());
        assert!(scheduler.delays.is_empty());
    }

    #[test]
    fn a_new_run_can_start_after_completion() {
        let mut arc = arc();
        let mut scheduler = RecordingScheduler::default();
        arc.trigger(&mut scheduler);
        while arc.dwell_elapsed(&mut scheduler).phase.is_running() {}
        assert!(arc.trigger(&mut scheduler).is_some());
    }
}
