//! Exclusive "active" marking over a fixed universe of elements

use std::collections::BTreeSet;

/// Tracks which elements of a simulation carry the active/highlighted class.
///
/// Every [`set_active`](HighlightSet::set_active) clears the whole universe
/// first, so highlights never accumulate across stages.
#[derive(Debug, Clone)]
pub struct HighlightSet<K: Copy + Ord> {
    universe: Vec<K>,
    active: BTreeSet<K>,
}

/// One class-list write: whether `key` should carry the active class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightToggle<K> {
    pub key: K,
    pub active: bool,
}

impl<K: Copy + Ord> HighlightSet<K> {
    pub fn new(universe: impl IntoIterator<Item = K>) -> Self {
        let mut seen = BTreeSet::new();
        let universe = universe.into_iter().filter(|key| seen.insert(*key)).collect();
        HighlightSet {
            universe,
            active: BTreeSet::new(),
        }
    }

    /// Make exactly `targets` active. Keys outside the universe are ignored.
    /// Returns the class write for every element of the universe.
    pub fn set_active(&mut self, targets: impl IntoIterator<Item = K>) -> Vec<HighlightToggle<K>> {
        self.active.clear();
        for target in targets {
            if self.universe.contains(&target) {
                self.active.insert(target);
            }
        }
        self.toggles()
    }

    pub fn clear(&mut self) -> Vec<HighlightToggle<K>> {
        self.set_active(std::iter::empty())
    }

    pub fn is_active(&self, key: K) -> bool {
        self.active.contains(&key)
    }

    pub fn toggles(&self) -> Vec<HighlightToggle<K>> {
        self.universe
            .iter()
            .map(|&key| HighlightToggle {
                key,
                active: self.active.contains(&key),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{ReflexTarget, StageTarget};

    #[test]
    fn only_the_latest_targets_are_active() {
        let mut highlights = HighlightSet::new(ReflexTarget::ALL.iter().copied());
        highlights.set_active([ReflexTarget::SensoryNeuron]);
        assert!(highlights.is_active(ReflexTarget::SensoryNeuron));

        let toggles = highlights.set_active([ReflexTarget::SpinalCord]);
        assert!(!highlights.is_active(ReflexTarget::SensoryNeuron));
        assert!(highlights.is_active(ReflexTarget::SpinalCord));

        assert_eq!(toggles.len(), ReflexTarget::ALL.len());
        assert_eq!(toggles.iter().filter(|t| t.active).count(), 1);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut highlights = HighlightSet::new([1, 2, 3, 2]);
        let toggles = highlights.set_active([3, 7]);
        assert_eq!(toggles.len(), 3);
        assert!(highlights.is_active(3));
        assert!(!highlights.is_active(7));
    }

    #[test]
    fn clear_deactivates_everything() {
        let mut highlights = HighlightSet::new([1, 2]);
        highlights.set_active([1, 2]);
        assert!(highlights.clear().iter().all(|toggle| !toggle.active));
        assert!(!highlights.is_active(1) && !highlights.is_active(2));
    }
}
