//! Stage tables for the step-through simulations
//!
//! A stage names the element a marker travels to, the marker's visual state
//! while it is there, and the text shown to the reader. Tables are `const`
//! data; their order is the physiological sequence.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// How a target element is measured and highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// Element inside the SVG diagram (bounding box in graphic coordinates).
    Shape,
    /// Ordinary page element (client rectangle).
    Rect,
}

/// Key identifying one highlightable element of a simulation.
pub trait StageTarget: Copy + Eq + Ord + Debug + 'static {
    /// Every element of this kind, in page order.
    const ALL: &'static [Self];

    fn kind(self) -> TargetKind;

    /// Short human readable name used in diagnostics.
    fn label(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CirculationTarget {
    BodyTissues,
    RightAtrium,
    RightVentricle,
    Lungs,
    LeftAtrium,
    LeftVentricle,
}

impl StageTarget for CirculationTarget {
    const ALL: &'static [Self] = &[
        CirculationTarget::RightAtrium,
        CirculationTarget::RightVentricle,
        CirculationTarget::LeftAtrium,
        CirculationTarget::LeftVentricle,
        CirculationTarget::Lungs,
        CirculationTarget::BodyTissues,
    ];

    fn kind(self) -> TargetKind {
        match self {
            CirculationTarget::RightAtrium
            | CirculationTarget::RightVentricle
            | CirculationTarget::LeftAtrium
            | CirculationTarget::LeftVentricle => TargetKind::Shape,
            CirculationTarget::Lungs | CirculationTarget::BodyTissues => TargetKind::Rect,
        }
    }

    fn label(self) -> &'static str {
        match self {
            CirculationTarget::BodyTissues => "body tissues",
            CirculationTarget::RightAtrium => "right atrium",
            CirculationTarget::RightVentricle => "right ventricle",
            CirculationTarget::Lungs => "lungs",
            CirculationTarget::LeftAtrium => "left atrium",
            CirculationTarget::LeftVentricle => "left ventricle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReflexTarget {
    Stimulus,
    SensoryNeuron,
    SpinalCord,
    MotorNeuron,
    EffectorMuscle,
}

impl StageTarget for ReflexTarget {
    const ALL: &'static [Self] = &[
        ReflexTarget::Stimulus,
        ReflexTarget::SensoryNeuron,
        ReflexTarget::SpinalCord,
        ReflexTarget::MotorNeuron,
        ReflexTarget::EffectorMuscle,
    ];

    fn kind(self) -> TargetKind {
        TargetKind::Rect
    }

    fn label(self) -> &'static str {
        match self {
            ReflexTarget::Stimulus => "stimulus point",
            ReflexTarget::SensoryNeuron => "sensory neuron",
            ReflexTarget::SpinalCord => "spinal cord",
            ReflexTarget::MotorNeuron => "motor neuron",
            ReflexTarget::EffectorMuscle => "effector muscle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualState {
    None,
    Oxygenated,
    Deoxygenated,
}

impl VisualState {
    /// Marker class for this state; the other blood class is removed.
    pub fn marker_class(self) -> Option<&'static str> {
        match self {
            VisualState::None => None,
            VisualState::Oxygenated => Some("oxygenated-blood"),
            VisualState::Deoxygenated => Some("deoxygenated-blood"),
        }
    }
}

/// Every class a [`VisualState`] may put on the marker.
pub const MARKER_STATE_CLASSES: [&str; 2] = ["oxygenated-blood", "deoxygenated-blood"];

/// Page elements outside the diagram are highlighted only with this class.
pub const CONCEPTUAL_ORGAN_CLASS: &str = "conceptual-organ";

impl TargetKind {
    /// Class marking the current circulation target, if the element takes one.
    pub fn highlight_class(self, conceptual_organ: bool) -> Option<&'static str> {
        match self {
            TargetKind::Shape => Some("highlighted-svg-chamber"),
            TargetKind::Rect if conceptual_organ => Some("highlighted-organ"),
            TargetKind::Rect => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage<T: StageTarget> {
    pub name: &'static str,
    pub target: T,
    pub visual_state: VisualState,
    pub description: &'static str,
}

/// Ordered, non-empty list of stages.
#[derive(Debug, Clone, Copy)]
pub struct StageTable<T: StageTarget> {
    stages: &'static [Stage<T>],
}

impl<T: StageTarget> StageTable<T> {
    pub fn new(stages: &'static [Stage<T>]) -> Option<Self> {
        (!stages.is_empty()).then_some(StageTable { stages })
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static Stage<T>> {
        self.stages.get(index)
    }

    /// Stage at an index known to be in range.
    pub(crate) fn at(&self, index: usize) -> &'static Stage<T> {
        &self.stages[index]
    }

    pub fn last_index(&self) -> usize {
        self.stages.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Stage<T>> {
        self.stages.iter()
    }
}

pub const CIRCULATION_STAGES: &[Stage<CirculationTarget>] = &[
    Stage {
        name: "BodyReturn",
        target: CirculationTarget::BodyTissues,
        visual_state: VisualState::Deoxygenated,
        description: "Deoxygenated blood returns from body tissues.",
    },
    Stage {
        name: "RightAtriumEntry",
        target: CirculationTarget::RightAtrium,
        visual_state: VisualState::Deoxygenated,
        description: "Blood enters the Right Atrium.",
    },
    Stage {
        name: "RightVentricleEntry",
        target: CirculationTarget::RightVentricle,
        visual_state: VisualState::Deoxygenated,
        description: "Blood moves to the Right Ventricle.",
    },
    Stage {
        name: "ToLungs",
        target: CirculationTarget::Lungs,
        visual_state: VisualState::Deoxygenated,
        description: "Blood is pumped to the Lungs.",
    },
    Stage {
        name: "LeftAtriumEntry",
        target: CirculationTarget::LeftAtrium,
        visual_state: VisualState::Oxygenated,
        description: "Oxygenated blood enters the Left Atrium.",
    },
    Stage {
        name: "LeftVentricleEntry",
        target: CirculationTarget::LeftVentricle,
        visual_state: VisualState::Oxygenated,
        description: "Blood moves to the Left Ventricle.",
    },
    Stage {
        name: "ToBody",
        target: CirculationTarget::BodyTissues,
        visual_state: VisualState::Oxygenated,
        description: "Oxygenated blood is pumped to the body.",
    },
];

/// The reflex status line reads the same for every stage, so these stages
/// carry no description.
pub const REFLEX_ARC_STAGES: &[Stage<ReflexTarget>] = &[
    Stage {
        name: "stimulus",
        target: ReflexTarget::Stimulus,
        visual_state: VisualState::None,
        description: "",
    },
    Stage {
        name: "sensory",
        target: ReflexTarget::SensoryNeuron,
        visual_state: VisualState::None,
        description: "",
    },
    Stage {
        name: "spinal",
        target: ReflexTarget::SpinalCord,
        visual_state: VisualState::None,
        description: "",
    },
    Stage {
        name: "motor",
        target: ReflexTarget::MotorNeuron,
        visual_state: VisualState::None,
        description: "",
    },
    Stage {
        name: "effector",
        target: ReflexTarget::EffectorMuscle,
        visual_state: VisualState::None,
        description: "",
    },
];

impl StageTable<CirculationTarget> {
    pub fn circulation() -> Self {
        StageTable {
            stages: CIRCULATION_STAGES,
        }
    }
}

impl StageTable<ReflexTarget> {
    pub fn reflex_arc() -> Self {
        StageTable {
            stages: REFLEX_ARC_STAGES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tables_are_rejected() {
        const NONE: &[Stage<ReflexTarget>] = &[];
        assert!(StageTable::new(NONE).is_none());
        assert!(StageTable::new(REFLEX_ARC_STAGES).is_some());
    }

    #[test]
    fn circulation_path_turns_oxygenated_after_the_lungs() {
        let table = StageTable::circulation();
        assert_eq!(table.len(), 7);
        let lungs = table
            .iter()
            .position(|stage| stage.target == CirculationTarget::Lungs)
            .unwrap();
        assert!(table.iter().take(lungs + 1).all(|s| s.visual_state == VisualState::Deoxygenated));
        assert!(table.iter().skip(lungs + 1).all(|s| s.visual_state == VisualState::Oxygenated));
    }

    #[test]
    fn reflex_arc_visits_every_path_element_once_in_order() {
        let targets: Vec<_> = StageTable::reflex_arc().iter().map(|s| s.target).collect();
        assert_eq!(targets, ReflexTarget::ALL);
    }

    #[test]
    fn chambers_are_shapes_and_organs_are_rects() {
        assert_eq!(CirculationTarget::LeftVentricle.kind(), TargetKind::Shape);
        assert_eq!(CirculationTarget::Lungs.kind(), TargetKind::Rect);
        assert!(ReflexTarget::ALL.iter().all(|t| t.kind() == TargetKind::Rect));
    }

    #[test]
    fn organs_need_the_conceptual_organ_class_to_highlight() {
        assert_eq!(
            TargetKind::Shape.highlight_class(false),
            Some("highlighted-svg-chamber")
        );
        assert_eq!(TargetKind::Rect.highlight_class(true), Some("highlighted-organ"));
        assert_eq!(TargetKind::Rect.highlight_class(false), None);
    }

    #[test]
    fn reflex_arc_stages_have_no_description() {
        assert!(StageTable::reflex_arc().iter().all(|stage| stage.description.is_empty()));
    }

    #[test]
    fn every_stage_target_is_part_of_the_universe() {
        for stage in CIRCULATION_STAGES {
            assert!(CirculationTarget::ALL.contains(&stage.target));
        }
    }
}
