//! `FuzzyTerm` — antecedent / consequent expression tree.

use crate::{FuzzyError, FuzzyResult, FuzzyVariable, SetId};

/// A fuzzy expression over the sets of one module.
///
/// Evaluated against the module's variables by recursive fold:
///
/// | Term     | `dom`              | `or_with_dom(v)`        |
/// |----------|--------------------|-------------------------|
/// | `Set`    | set's DOM          | `dom = max(dom, v)`     |
/// | `And`    | min of operands    | not a consequent        |
/// | `Or`     | max of operands    | not a consequent        |
/// | `Very`   | `dom²`             | inner with `v²`         |
/// | `Fairly` | `sqrt(dom)`        | inner with `sqrt(v)`    |
#[derive(Debug, Clone, PartialEq)]
pub enum FuzzyTerm {
    Set(SetId),
    And(Vec<FuzzyTerm>),
    Or(Vec<FuzzyTerm>),
    Very(Box<FuzzyTerm>),
    Fairly(Box<FuzzyTerm>),
}

impl From<SetId> for FuzzyTerm {
    fn from(id: SetId) -> Self {
        FuzzyTerm::Set(id)
    }
}

impl FuzzyTerm {
    pub fn and<T: Into<FuzzyTerm>>(terms: impl IntoIterator<Item = T>) -> Self {
        FuzzyTerm::And(terms.into_iter().map(Into::into).collect())
    }

    pub fn or<T: Into<FuzzyTerm>>(terms: impl IntoIterator<Item = T>) -> Self {
        FuzzyTerm::Or(terms.into_iter().map(Into::into).collect())
    }

    pub fn very(term: impl Into<FuzzyTerm>) -> Self {
        FuzzyTerm::Very(Box::new(term.into()))
    }

    pub fn fairly(term: impl Into<FuzzyTerm>) -> Self {
        FuzzyTerm::Fairly(Box::new(term.into()))
    }

    /// Degree of membership given the variables' current set DOMs.
    pub fn dom(&self, vars: &[FuzzyVariable]) -> f64 {
        match self {
            FuzzyTerm::Set(id) => lookup(vars, *id).map_or(0.0, |s| s.dom()),
            FuzzyTerm::And(terms) => terms
                .iter()
                .map(|t| t.dom(vars))
                .reduce(f64::min)
                .unwrap_or(0.0),
            FuzzyTerm::Or(terms) => terms
                .iter()
                .map(|t| t.dom(vars))
                .reduce(f64::max)
                .unwrap_or(0.0),
            FuzzyTerm::Very(inner) => {
                let d = inner.dom(vars);
                d * d
            }
            FuzzyTerm::Fairly(inner) => inner.dom(vars).sqrt(),
        }
    }

    /// Raise the consequent's DOM to at least `v` (after hedging).
    /// `And` / `Or` are rejected when the rule is built, so they are
    /// ignored here.
    pub(crate) fn or_with_dom(&self, vars: &mut [FuzzyVariable], v: f64) {
        match self {
            FuzzyTerm::Set(id) => {
                if let Some(set) = lookup_mut(vars, *id) {
                    set.or_with_dom(v);
                }
            }
            FuzzyTerm::Very(inner) => inner.or_with_dom(vars, v * v),
            FuzzyTerm::Fairly(inner) => inner.or_with_dom(vars, v.sqrt()),
            FuzzyTerm::And(_) | FuzzyTerm::Or(_) => {}
        }
    }

    pub(crate) fn clear_dom(&self, vars: &mut [FuzzyVariable]) {
        match self {
            FuzzyTerm::Set(id) => {
                if let Some(set) = lookup_mut(vars, *id) {
                    set.clear_dom();
                }
            }
            FuzzyTerm::Very(inner) | FuzzyTerm::Fairly(inner) => inner.clear_dom(vars),
            FuzzyTerm::And(terms) | FuzzyTerm::Or(terms) => {
                for t in terms {
                    t.clear_dom(vars);
                }
            }
        }
    }

    /// A set, possibly under hedges.
    pub fn is_valid_consequent(&self) -> bool {
        match self {
            FuzzyTerm::Set(_) => true,
            FuzzyTerm::Very(inner) | FuzzyTerm::Fairly(inner) => inner.is_valid_consequent(),
            FuzzyTerm::And(_) | FuzzyTerm::Or(_) => false,
        }
    }

    /// Every referenced set exists and no operator is empty.
    pub(crate) fn validate(&self, vars: &[FuzzyVariable]) -> FuzzyResult<()> {
        match self {
            FuzzyTerm::Set(id) => lookup(vars, *id).map(|_| ()).ok_or(FuzzyError::UnknownSet(*id)),
            FuzzyTerm::Very(inner) | FuzzyTerm::Fairly(inner) => inner.validate(vars),
            FuzzyTerm::And(terms) | FuzzyTerm::Or(terms) => {
                if terms.is_empty() {
                    return Err(FuzzyError::EmptyTerm);
                }
                terms.iter().try_for_each(|t| t.validate(vars))
            }
        }
    }
}

fn lookup(vars: &[FuzzyVariable], id: SetId) -> Option<&crate::FuzzySet> {
    vars.get(id.var.0).and_then(|v| v.set(id.set))
}

fn lookup_mut(vars: &mut [FuzzyVariable], id: SetId) -> Option<&mut crate::FuzzySet> {
    vars.get_mut(id.var.0).and_then(|v| v.set_mut(id.set))
}
