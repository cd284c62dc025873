//! Synapse strengths between three neurons, changed by practice and disuse

use crate::config::PlasticityConfig;
use serde::{Deserialize, Serialize};

pub const INITIAL_STATUS: &str = "Practice skills or simulate disuse to observe neuroplasticity.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Neuron {
    N1,
    N2,
    N3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SynapseId {
    /// Between neurons 1 and 2.
    OneTwo,
    /// Between neurons 2 and 3.
    TwoThree,
}

impl SynapseId {
    pub const ALL: [SynapseId; 2] = [SynapseId::OneTwo, SynapseId::TwoThree];

    pub fn neurons(self) -> (Neuron, Neuron) {
        match self {
            SynapseId::OneTwo => (Neuron::N1, Neuron::N2),
            SynapseId::TwoThree => (Neuron::N2, Neuron::N3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlasticityAction {
    PracticeA,
    PracticeB,
    Disuse,
}

/// What a single action changed, for the page to animate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlasticityOutcome {
    /// Neurons that fire briefly.
    pub fired: Vec<Neuron>,
    /// Synapse showing a transmission effect.
    pub activity: Option<SynapseId>,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynapseStrengths {
    pub one_two: u8,
    pub two_three: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynapseNetwork {
    strengths: SynapseStrengths,
    limits: PlasticityConfig,
}

impl SynapseNetwork {
    pub fn new(limits: PlasticityConfig) -> Self {
        let initial = limits
            .initial_strength
            .clamp(limits.min_strength, limits.max_strength.max(limits.min_strength));
        SynapseNetwork {
            strengths: SynapseStrengths {
                one_two: initial,
                two_three: initial,
            },
            limits,
        }
    }

    pub fn strengths(&self) -> SynapseStrengths {
        self.strengths
    }

    pub fn strength(&self, synapse: SynapseId) -> u8 {
        match synapse {
            SynapseId::OneTwo => self.strengths.one_two,
            SynapseId::TwoThree => self.strengths.two_three,
        }
    }

    fn strength_mut(&mut self, synapse: SynapseId) -> &mut u8 {
        match synapse {
            SynapseId::OneTwo => &mut self.strengths.one_two,
            SynapseId::TwoThree => &mut self.strengths.two_three,
        }
    }

    /// Long-term potentiation on one synapse, capped at the maximum strength.
    fn strengthen(&mut self, synapse: SynapseId) {
        let (gain, max) = (self.limits.practice_gain, self.limits.max_strength);
        let strength = self.strength_mut(synapse);
        *strength = strength.saturating_add(gain).min(max);
    }

    /// Long-term depression on every synapse, floored at the minimum strength.
    fn weaken_all(&mut self) {
        let (loss, min) = (self.limits.disuse_loss, self.limits.min_strength);
        for synapse in SynapseId::ALL {
            let strength = self.strength_mut(synapse);
            *strength = strength.saturating_sub(loss).max(min);
        }
    }

    pub fn apply(&mut self, action: PlasticityAction) -> PlasticityOutcome {
        match action {
            PlasticityAction::PracticeA => self.practice(
                SynapseId::OneTwo,
                "Practiced Skill A: N1-N2 connection strengthened (LTP).",
            ),
            PlasticityAction::PracticeB => self.practice(
                SynapseId::TwoThree,
                "Practiced Skill B: N2-N3 connection strengthened (LTP).",
            ),
            PlasticityAction::Disuse => {
                self.weaken_all();
                PlasticityOutcome {
                    fired: Vec::new(),
                    activity: None,
                    status: "Simulated Disuse: Connections may weaken (LTD).",
                }
            }
        }
    }

    fn practice(&mut self, synapse: SynapseId, status: &'static str) -> PlasticityOutcome {
        self.strengthen(synapse);
        let (from, to) = synapse.neurons();
        PlasticityOutcome {
            fired: vec![from, to],
            activity: Some(synapse),
            status,
        }
    }
}

impl Default for SynapseNetwork {
    fn default() -> Self {
        SynapseNetwork::new(PlasticityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn practice_a_strengthens_by_two_up_to_fifteen() {
        let mut network = SynapseNetwork::default();
        let mut seen = vec![network.strength(SynapseId::OneTwo)];
        for _ in 0..8 {
            network.apply(PlasticityAction::PracticeA);
            seen.push(network.strength(SynapseId::OneTwo));
        }
        assert_eq!(seen, vec![5, 7, 9, 11, 13, 15, 15, 15, 15]);
        assert_eq!(network.strength(SynapseId::TwoThree), 5);
    }

    #[test]
    fn practice_b_fires_neurons_two_and_three() {
        let mut network = SynapseNetwork::default();
        let outcome = network.apply(PlasticityAction::PracticeB);
        assert_eq!(outcome.fired, vec![Neuron::N2, Neuron::N3]);
        assert_eq!(outcome.activity, Some(SynapseId::TwoThree));
        assert_eq!(network.strengths(), SynapseStrengths { one_two: 5, two_three: 7 });
    }

    #[test]
    fn disuse_weakens_both_but_never_below_one() {
        let mut network = SynapseNetwork::default();
        network.apply(PlasticityAction::PracticeA);
        for _ in 0..20 {
            let outcome = network.apply(PlasticityAction::Disuse);
            assert!(outcome.fired.is_empty());
        }
        assert_eq!(network.strengths(), SynapseStrengths { one_two: 1, two_three: 1 });
    }

    #[test]
    fn custom_limits_are_respected() {
        let limits = PlasticityConfig {
            initial_strength: 3,
            min_strength: 2,
            max_strength: 6,
            practice_gain: 5,
            disuse_loss: 4,
            neuron_flash_ms: 100,
        };
        let mut network = SynapseNetwork::new(limits);
        network.apply(PlasticityAction::PracticeA);
        assert_eq!(network.strength(SynapseId::OneTwo), 6);
        network.apply(PlasticityAction::Disuse);
        assert_eq!(network.strengths(), SynapseStrengths { one_two: 2, two_three: 2 });
    }
}
