use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::Student;
use super::eligibility::PolicyConfig;

/// Holds the active policy configuration behind a single swappable handle.
///
/// Readers clone the `Arc`, so a snapshot stays consistent even if `replace` runs while a
/// decision is in flight.
#[derive(Debug)]
pub struct PolicyConfigStore {
    current: RwLock<Arc<PolicyConfig>>,
}

impl PolicyConfigStore {
    pub fn new(config: PolicyConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    pub fn get(&self) -> Arc<PolicyConfig> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, config: PolicyConfig) -> Arc<PolicyConfig> {
        let next = Arc::new(config);
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = next.clone();
        next
    }
}

impl Default for PolicyConfigStore {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}

/// Campus-wide placement aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementStatistics {
    pub total_students: usize,
    pub placed_students: usize,
}

impl PlacementStatistics {
    pub fn from_students(students: &[Student]) -> Self {
        Self {
            total_students: students.len(),
            placed_students: students.iter().filter(|student| student.is_placed).count(),
        }
    }

    /// Placed share of the population in percent; 0 for an empty population.
    pub fn placement_percentage(&self) -> f64 {
        if self.total_students == 0 {
            return 0.0;
        }
        self.placed_students as f64 / self.total_students as f64 * 100.0
    }
}

#[derive(Debug, Default)]
pub struct PlacementStatisticsCache {
    current: RwLock<PlacementStatistics>,
}

impl PlacementStatisticsCache {
    pub fn new(students: &[Student]) -> Self {
        Self {
            current: RwLock::new(PlacementStatistics::from_students(students)),
        }
    }

    pub fn recompute(&self, students: &[Student]) -> PlacementStatistics {
        let statistics = PlacementStatistics::from_students(students);
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = statistics;
        info!(
            total_students = statistics.total_students,
            placed_students = statistics.placed_students,
            "placement statistics updated"
        );
        statistics
    }

    pub fn get(&self) -> PlacementStatistics {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }
}
