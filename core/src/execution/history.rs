//! Augmentation history for max-flow solver runs
//!
//! Records every augmentation (the threshold it was found under, its
//! bottleneck and the vertices of its path) together with a per-phase
//! summary, so a finished run can be inspected or serialized after the
//! fact instead of being printed while it executes.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Serialize, Deserialize};

use crate::algorithm::traits::NodeId;
use crate::data_structures::flow_network::{Capacity, Flow};

/// A single augmentation along a source-to-sink path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentationRecord {
    /// Position of the augmentation within the run
    pub index: usize,
    /// Search threshold the path was found under
    pub threshold: Capacity,
    /// Units of flow pushed along the path
    pub bottleneck: Capacity,
    /// Path vertices from source to sink
    pub path: Vec<NodeId>,
}

/// Summary of one search phase (a single phase for Edmonds-Karp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub threshold: Capacity,
    pub augmentations: usize,
    pub flow: Flow,
}

/// Ordered record of a solver run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentationHistory {
    augmentations: Vec<AugmentationRecord>,
    phases: Vec<PhaseRecord>,
}

impl AugmentationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.augmentations.clear();
        self.phases.clear();
    }

    pub fn record_augmentation(&mut self, threshold: Capacity, bottleneck: Capacity, path: Vec<NodeId>) {
        let index = self.augmentations.len();
        self.augmentations.push(AugmentationRecord {
            index,
            threshold,
            bottleneck,
            path,
        });
    }

    pub fn record_phase(&mut self, threshold: Capacity, augmentations: usize, flow: Flow) {
        self.phases.push(PhaseRecord {
            threshold,
            augmentations,
            flow,
        });
    }

    pub fn augmentations(&self) -> &[AugmentationRecord] {
        &self.augmentations
    }

    pub fn phases(&self) -> &[PhaseRecord] {
        &self.phases
    }

    pub fn len(&self) -> usize {
        self.augmentations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.augmentations.is_empty()
    }

    /// Bottleneck of each augmentation, in order
    pub fn bottlenecks(&self) -> Vec<Capacity> {
        self.augmentations.iter().map(|record| record.bottleneck).collect()
    }

    /// Sum of all recorded bottlenecks, `None` on overflow
    pub fn total_flow(&self) -> Option<Flow> {
        self.augmentations
            .iter()
            .try_fold(0 as Flow, |total, record| total.checked_add(record.bottleneck))
    }

    /// Longest augmenting path seen, in edges
    pub fn longest_path(&self) -> usize {
        self.augmentations
            .iter()
            .map(|record| record.path.len().saturating_sub(1))
            .max()
            .unwrap_or(0)
    }
}
