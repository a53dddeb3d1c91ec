//! FILENAME: core/pivot-engine/src/accumulator.rs
//! Aggregate Accumulator - reduction of one column's values within a group.
//!
//! Values are kept as a list because `median` and `count-distinct` need
//! the full set. NaN coming from unparsable cells propagates into every
//! value-based aggregate (`count` still counts the row).

use std::cmp::Ordering;

use rustc_hash::FxHashSet;
use response_engine::AggregationType;

/// Wrapper around f64 that implements Eq and Hash for use as set keys.
/// NaN values are treated as equal to each other.
#[derive(Debug, Clone, Copy)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        if self.0.is_nan() && other.0.is_nan() {
            true
        } else {
            self.0 == other.0
        }
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        if self.0.is_nan() {
            // All NaN values hash to the same thing
            u64::MAX.hash(state);
        } else if self.0 == 0.0 {
            // 0.0 and -0.0 compare equal
            0u64.hash(state);
        } else {
            self.0.to_bits().hash(state);
        }
    }
}

/// Collects the values of one number column for one label group.
#[derive(Debug, Clone, Default)]
pub struct AggregateAccumulator {
    values: Vec<f64>,
}

impl AggregateAccumulator {
    pub fn new() -> Self {
        AggregateAccumulator { values: Vec::new() }
    }

    pub fn add(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn has_nan(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Computes the final aggregate value. Returns None where the aggregate
    /// is undefined (no values, or fewer than two for sample statistics).
    pub fn compute(&self, aggregation: AggregationType) -> Option<f64> {
        let n = self.values.len();
        match aggregation {
            AggregationType::Count => Some(n as f64),
            AggregationType::CountDistinct => {
                let distinct: FxHashSet<OrderedFloat> =
                    self.values.iter().map(|&v| OrderedFloat(v)).collect();
                Some(distinct.len() as f64)
            }
            _ if n == 0 => None,
            AggregationType::Sum => Some(self.values.iter().sum()),
            AggregationType::Avg => Some(self.values.iter().sum::<f64>() / n as f64),
            AggregationType::Min => Some(self.extreme(f64::min)),
            AggregationType::Max => Some(self.extreme(f64::max)),
            AggregationType::Median => Some(self.median()),
            AggregationType::Variance => self.sample_variance(),
            AggregationType::Deviation => self.sample_variance().map(f64::sqrt),
        }
    }

    /// min/max that propagate NaN instead of skipping it.
    fn extreme(&self, pick: fn(f64, f64) -> f64) -> f64 {
        if self.has_nan() {
            return f64::NAN;
        }
        self.values[1..].iter().fold(self.values[0], |acc, &v| pick(acc, v))
    }

    fn median(&self) -> f64 {
        if self.has_nan() {
            return f64::NAN;
        }
        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }

    /// Sample variance using Welford's algorithm for numerical stability.
    fn sample_variance(&self) -> Option<f64> {
        if self.values.len() < 2 {
            return None;
        }
        let mut mean = 0.0;
        let mut m2 = 0.0;
        for (i, &value) in self.values.iter().enumerate() {
            let delta = value - mean;
            mean += delta / ((i + 1) as f64);
            let delta2 = value - mean;
            m2 += delta * delta2;
        }
        Some(m2 / ((self.values.len() - 1) as f64))
    }
}
