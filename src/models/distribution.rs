use std::ops::{Index, IndexMut};

use serde::{Serialize, Serializer};

use super::enums::{ClassId, CLASS_COUNT};

// ═══════════════════════════════════════════════════════════
// ClassScores
// ═══════════════════════════════════════════════════════════

/// Unnormalized per-class evidence, one entry per `ClassId`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClassScores([f64; CLASS_COUNT]);

impl ClassScores {
    pub fn new(values: [f64; CLASS_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_array(&self) -> &[f64; CLASS_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, f64)> + '_ {
        ClassId::ALL.iter().map(move |&id| (id, self.0[id.index()]))
    }

    /// Class with the largest score; ties go to the lowest class id.
    pub fn top_class(&self) -> ClassId {
        argmax(&self.0)
    }
}

impl Index<ClassId> for ClassScores {
    type Output = f64;

    fn index(&self, id: ClassId) -> &f64 {
        &self.0[id.index()]
    }
}

impl IndexMut<ClassId> for ClassScores {
    fn index_mut(&mut self, id: ClassId) -> &mut f64 {
        &mut self.0[id.index()]
    }
}

// ═══════════════════════════════════════════════════════════
// ClassProbabilities
// ═══════════════════════════════════════════════════════════

/// A probability distribution over the seven lesion classes.
///
/// Only constructed through [`ClassProbabilities::from_weights`], which
/// guarantees every entry is finite and strictly positive and that the
/// entries sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities([f64; CLASS_COUNT]);

impl ClassProbabilities {
    /// Normalize arbitrary weights into a distribution.
    ///
    /// Non-finite and negative weights count as zero. Every weight is then
    /// raised to `floor`, so an all-zero input yields the uniform
    /// distribution. `floor` must be positive.
    pub fn from_weights(weights: [f64; CLASS_COUNT], floor: f64) -> Self {
        let floor = if floor.is_finite() && floor > 0.0 {
            floor
        } else {
            f64::MIN_POSITIVE
        };

        let mut floored = weights.map(|w| if w.is_finite() { w.max(floor) } else { floor });
        let total: f64 = floored.iter().sum();
        if !total.is_finite() {
            // Finite weights near f64::MAX can overflow the sum.
            let max = floored.iter().cloned().fold(floor, f64::max);
            floored = floored.map(|w| (w / max).max(floor));
            let total: f64 = floored.iter().sum();
            return Self(floored.map(|w| w / total));
        }
        Self(floored.map(|w| w / total))
    }

    /// The uniform distribution.
    pub fn uniform() -> Self {
        Self([1.0 / CLASS_COUNT as f64; CLASS_COUNT])
    }

    pub fn get(&self, id: ClassId) -> f64 {
        self.0[id.index()]
    }

    pub fn as_array(&self) -> &[f64; CLASS_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, f64)> + '_ {
        ClassId::ALL.iter().map(move |&id| (id, self.0[id.index()]))
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Most probable class; ties go to the lowest class id.
    pub fn argmax(&self) -> ClassId {
        argmax(&self.0)
    }
}

impl Index<ClassId> for ClassProbabilities {
    type Output = f64;

    fn index(&self, id: ClassId) -> &f64 {
        &self.0[id.index()]
    }
}

impl Serialize for ClassProbabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

fn argmax(values: &[f64; CLASS_COUNT]) -> ClassId {
    let mut best = 0usize;
    for (i, v) in values.iter().enumerate().skip(1) {
        // Strict comparison keeps the earliest index on ties.
        if *v > values[best] {
            best = i;
        }
    }
    ClassId::ALL[best]
}
