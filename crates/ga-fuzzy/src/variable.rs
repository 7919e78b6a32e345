//! `FuzzyVariable` — named sets over one numeric domain.

use std::fmt;

use ga_core::EPSILON;

use crate::{FuzzyError, FuzzyResult, FuzzySet};

/// Index of a variable inside its [`FuzzyModule`](crate::FuzzyModule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

/// Handle to one set of one variable.  Terms are built from these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetId {
    pub var: VarId,
    pub set: usize,
}

#[derive(Debug, Clone)]
pub struct FuzzyVariable {
    id: VarId,
    name: String,
    sets: Vec<(String, FuzzySet)>,
    min: f64,
    max: f64,
}

impl FuzzyVariable {
    pub(crate) fn new(id: VarId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sets: Vec::new(),
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn id(&self) -> VarId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Domain covered by the sets added so far.  `None` while empty.
    pub fn range(&self) -> Option<(f64, f64)> {
        (self.min <= self.max).then_some((self.min, self.max))
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    // ── Set construction ──────────────────────────────────────────────────
    //
    // Bounds are absolute (`min`, `peak`, `max`); they are stored as offsets
    // from the peak.  The variable's range widens to cover every set.

    pub fn add_triangle(&mut self, name: &str, min: f64, peak: f64, max: f64) -> FuzzyResult<SetId> {
        check_bounds(name, min, peak, max)?;
        Ok(self.push(name, min, max, FuzzySet::triangle(peak, peak - min, max - peak)))
    }

    pub fn add_left_shoulder(&mut self, name: &str, min: f64, peak: f64, max: f64) -> FuzzyResult<SetId> {
        check_bounds(name, min, peak, max)?;
        Ok(self.push(name, min, max, FuzzySet::left_shoulder(peak, peak - min, max - peak)))
    }

    pub fn add_right_shoulder(&mut self, name: &str, min: f64, peak: f64, max: f64) -> FuzzyResult<SetId> {
        check_bounds(name, min, peak, max)?;
        Ok(self.push(name, min, max, FuzzySet::right_shoulder(peak, peak - min, max - peak)))
    }

    pub fn add_singleton(&mut self, name: &str, min: f64, peak: f64, max: f64) -> FuzzyResult<SetId> {
        check_bounds(name, min, peak, max)?;
        Ok(self.push(name, min, max, FuzzySet::singleton(peak, peak - min, max - peak)))
    }

    fn push(&mut self, name: &str, min: f64, max: f64, set: FuzzySet) -> SetId {
        self.min = self.min.min(min);
        self.max = self.max.max(max);
        self.sets.push((name.to_owned(), set));
        SetId { var: self.id, set: self.sets.len() - 1 }
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub fn set(&self, index: usize) -> Option<&FuzzySet> {
        self.sets.get(index).map(|(_, s)| s)
    }

    pub(crate) fn set_mut(&mut self, index: usize) -> Option<&mut FuzzySet> {
        self.sets.get_mut(index).map(|(_, s)| s)
    }

    /// Handle of the set called `name`.
    pub fn set_id(&self, name: &str) -> Option<SetId> {
        self.sets
            .iter()
            .position(|(n, _)| n == name)
            .map(|set| SetId { var: self.id, set })
    }

    pub fn sets(&self) -> impl Iterator<Item = (&str, &FuzzySet)> + '_ {
        self.sets.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    // ── Fuzzify / defuzzify ───────────────────────────────────────────────

    /// Set every member's DOM to its membership of `value`.
    pub fn fuzzify(&mut self, value: f64) -> FuzzyResult<()> {
        if !self.contains(value) {
            return Err(FuzzyError::OutOfRange {
                variable: self.name.clone(),
                value,
                min: self.min,
                max: self.max,
            });
        }
        for (_, set) in &mut self.sets {
            let dom = set.calculate_dom(value);
            set.set_dom(dom);
        }
        Ok(())
    }

    pub(crate) fn clear_doms(&mut self) {
        for (_, set) in &mut self.sets {
            set.clear_dom();
        }
    }

    /// Average of the representative values weighted by DOM.
    /// 0 when every DOM is 0.
    pub fn defuzzify_max_av(&self) -> f64 {
        let (weighted, total) = self.sets.iter().fold((0.0, 0.0), |(w, t), (_, s)| {
            (w + s.representative() * s.dom(), t + s.dom())
        });
        if total.abs() < EPSILON { 0.0 } else { weighted / total }
    }

    /// Discrete centroid over `samples` evenly spaced points
    /// `min + i * step` for `i` in `1..=samples`.  Each set contributes the
    /// lower of its membership at the point and its DOM.  0 when the area
    /// is 0.
    pub fn defuzzify_centroid(&self, samples: usize) -> FuzzyResult<f64> {
        if samples == 0 {
            return Err(FuzzyError::NoSamples);
        }
        let Some((min, max)) = self.range() else {
            return Ok(0.0);
        };
        let step = (max - min) / samples as f64;

        let mut moment = 0.0;
        let mut area = 0.0;
        for i in 1..=samples {
            let x = min + step * i as f64;
            for (_, set) in &self.sets {
                let contribution = set.calculate_dom(x).min(set.dom());
                moment += x * contribution;
                area += contribution;
            }
        }
        Ok(if area.abs() < EPSILON { 0.0 } else { moment / area })
    }
}

fn check_bounds(name: &str, min: f64, peak: f64, max: f64) -> FuzzyResult<()> {
    if min <= peak && peak <= max {
        Ok(())
    } else {
        Err(FuzzyError::InvalidShape { name: name.to_owned(), min, peak, max })
    }
}

/// One line per set: `name is <dom>`.
impl fmt::Display for FuzzyVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        for (name, set) in &self.sets {
            writeln!(f, "  {name:<24} is {set}")?;
        }
        if let Some((min, max)) = self.range() {
            writeln!(f, "  range [{min}, {max}]")?;
        }
        Ok(())
    }
}
