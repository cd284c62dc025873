//! Simulation domain shared by the page frontend
//!
//! Pure data and transitions only: nothing here touches the DOM or a clock.

pub mod config;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod plasticity;
pub mod presentation;
pub mod reflex;
pub mod stage;
pub mod timeline;

pub use config::{PlasticityConfig, ReflexConfig, SimulationConfig};
pub use error::{ConfigError, SetupError};
pub use geometry::{
    ConnectorSpan, Point, PositionResult, Rect, Size, TargetGeometry, connector_span,
    resolve_center, resolve_position,
};
pub use highlight::{HighlightSet, HighlightToggle};
pub use plasticity::{
    Neuron, PlasticityAction, PlasticityOutcome, SynapseId, SynapseNetwork, SynapseStrengths,
};
pub use presentation::{
    PlaqueBand, PlaquePresentation, PressureCategory, PressureFactors, SynapseAppearance,
};
pub use reflex::{MarkerState, ReflexArc, ReflexFrame, ReflexPhase, ReflexTiming, Scheduler};
pub use stage::{
    CirculationTarget, ReflexTarget, Stage, StageTable, StageTarget, TargetKind, VisualState,
};
pub use timeline::{StatusMessage, Step, StepTimeline, TimelinePosition};

// ===== TEST API SNAPSHOTS =====

use serde::Serialize;

/// Circulation state as reported to browser automation.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CirculationSnapshot {
    pub index: Option<usize>,
    pub stage_name: Option<&'static str>,
    pub cycle_complete: bool,
}

impl From<TimelinePosition> for CirculationSnapshot {
    fn from(position: TimelinePosition) -> Self {
        let stage = position
            .index
            .and_then(|index| StageTable::circulation().get(index));
        CirculationSnapshot {
            index: position.index,
            stage_name: stage.map(|stage| stage.name),
            cycle_complete: position.cycle_complete,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PressureSnapshot {
    pub constriction: u8,
    pub volume: u8,
    pub category: &'static str,
}

impl From<PressureFactors> for PressureSnapshot {
    fn from(factors: PressureFactors) -> Self {
        PressureSnapshot {
            constriction: factors.constriction(),
            volume: factors.volume(),
            category: factors.category().label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circulation_snapshot_serializes_camel_case() {
        let mut timeline = StepTimeline::new(StageTable::circulation());
        timeline.advance();
        let json = serde_json::to_value(CirculationSnapshot::from(timeline.position())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "index": 0, "stageName": "BodyReturn", "cycleComplete": false })
        );
    }

    #[test]
    fn pressure_snapshot_reports_category_label() {
        let mut factors = PressureFactors::default();
        factors.increase_volume();
        factors.increase_volume();
        let json = serde_json::to_value(PressureSnapshot::from(factors)).unwrap();
        assert_eq!(json["category"], "Hypertension Stage 1");
        assert_eq!(json["volume"], 2);
    }

    #[test]
    fn reflex_frame_serializes_phase_and_status() {
        let json = serde_json::to_value(ReflexFrame::default()).unwrap();
        assert_eq!(json["phase"], "Idle");
        assert_eq!(json["status"], serde_json::Value::Null);
    }
}
