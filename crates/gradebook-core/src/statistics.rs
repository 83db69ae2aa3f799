//! Class-wide aggregate statistics over graded records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::grading::round_to_cents;
use crate::model::{Grade, GradedRecord};

/// Count of records per grade. Always holds all twelve grades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Grade, u32>", into = "BTreeMap<Grade, u32>")]
pub struct GradeDistribution(BTreeMap<Grade, u32>);

impl GradeDistribution {
    pub fn new() -> Self {
        Self(Grade::ALL.into_iter().map(|g| (g, 0)).collect())
    }

    pub fn get(&self, grade: Grade) -> u32 {
        self.0.get(&grade).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, grade: Grade) {
        *self.0.entry(grade).or_insert(0) += 1;
    }

    /// `(grade, count)` pairs, highest grade first.
    pub fn iter(&self) -> impl Iterator<Item = (Grade, u32)> + '_ {
        self.0.iter().map(|(g, n)| (*g, *n))
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

impl Default for GradeDistribution {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<Grade, u32>> for GradeDistribution {
    fn from(counts: BTreeMap<Grade, u32>) -> Self {
        let mut dist = Self::new();
        dist.0.extend(counts);
        dist
    }
}

impl From<GradeDistribution> for BTreeMap<Grade, u32> {
    fn from(dist: GradeDistribution) -> Self {
        dist.0
    }
}

/// Summary statistics for one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAggregate {
    pub count: u32,
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    /// Percentage of records with a passing grade.
    pub pass_rate: f64,
    #[serde(default)]
    pub distribution: GradeDistribution,
}

impl ClassAggregate {
    pub fn empty() -> Self {
        Self {
            count: 0,
            average_score: 0.0,
            highest_score: 0.0,
            lowest_score: 0.0,
            pass_rate: 0.0,
            distribution: GradeDistribution::new(),
        }
    }

    pub fn failed(&self) -> u32 {
        self.distribution.get(Grade::F)
    }

    pub fn passed(&self) -> u32 {
        self.count.saturating_sub(self.failed())
    }
}

/// Compute the class aggregate in a single pass over `records`.
///
/// Record order does not matter. Empty input yields all zeros.
pub fn aggregate(records: &[GradedRecord]) -> ClassAggregate {
    let mut count = 0u32;
    let mut passed = 0u32;
    let mut sum = 0.0f64;
    let mut highest = f64::NEG_INFINITY;
    let mut lowest = f64::INFINITY;
    let mut distribution = GradeDistribution::new();

    for record in records {
        let total = record.total_score();
        count += 1;
        sum += total;
        highest = highest.max(total);
        lowest = lowest.min(total);
        if record.is_passing() {
            passed += 1;
        }
        distribution.increment(record.grade());
    }

    if count == 0 {
        return ClassAggregate::empty();
    }

    ClassAggregate {
        count,
        average_score: round_to_cents(sum / count as f64),
        highest_score: highest,
        lowest_score: lowest,
        pass_rate: round_to_cents(passed as f64 * 100.0 / count as f64),
        distribution,
    }
}
