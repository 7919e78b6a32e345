//! `FuzzyModule` — variables, rules, fuzzify and defuzzify.

use std::collections::HashMap;
use std::fmt;

use ga_core::FuzzyConfig;
use tracing::trace;

use crate::{FuzzyError, FuzzyResult, FuzzyTerm, FuzzyVariable, VarId};

/// How a consequent variable is turned back into a crisp value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefuzzifyMethod {
    /// DOM-weighted average of each set's representative value.
    MaxAv,
    /// Discrete centroid with the given number of samples.
    Centroid(usize),
}

impl DefuzzifyMethod {
    /// Centroid with the configured sample count.
    pub fn centroid(config: &FuzzyConfig) -> Self {
        DefuzzifyMethod::Centroid(config.centroid_samples)
    }
}

/// `IF antecedent THEN consequent`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyRule {
    pub antecedent: FuzzyTerm,
    pub consequent: FuzzyTerm,
}

#[derive(Debug, Clone, Default)]
pub struct FuzzyModule {
    variables: Vec<FuzzyVariable>,
    by_name: HashMap<String, VarId>,
    rules: Vec<FuzzyRule>,
}

impl FuzzyModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty variable and return it for set construction.
    pub fn create_variable(&mut self, name: &str) -> FuzzyResult<&mut FuzzyVariable> {
        if self.by_name.contains_key(name) {
            return Err(FuzzyError::DuplicateVariable(name.to_owned()));
        }
        let id = VarId(self.variables.len());
        self.by_name.insert(name.to_owned(), id);
        self.variables.push(FuzzyVariable::new(id, name));
        Ok(&mut self.variables[id.0])
    }

    pub fn variable(&self, name: &str) -> Option<&FuzzyVariable> {
        self.by_name.get(name).map(|id| &self.variables[id.0])
    }

    pub fn variables(&self) -> &[FuzzyVariable] {
        &self.variables
    }

    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }

    /// Append a rule.  The consequent must be a set, optionally hedged,
    /// and every set either term names must exist in this module.
    pub fn add_rule(
        &mut self,
        antecedent: impl Into<FuzzyTerm>,
        consequent: impl Into<FuzzyTerm>,
    ) -> FuzzyResult<()> {
        let antecedent = antecedent.into();
        let consequent = consequent.into();
        if !consequent.is_valid_consequent() {
            return Err(FuzzyError::InvalidConsequent);
        }
        antecedent.validate(&self.variables)?;
        consequent.validate(&self.variables)?;
        self.rules.push(FuzzyRule { antecedent, consequent });
        Ok(())
    }

    /// Set the DOM of every set of `name` from the crisp `value`.
    pub fn fuzzify(&mut self, name: &str, value: f64) -> FuzzyResult<()> {
        let id = self.lookup(name)?;
        self.variables[id.0].fuzzify(value)
    }

    /// Fire every rule into its consequent and return the crisp value of
    /// `name`.
    ///
    /// Antecedents are evaluated from whatever DOMs the input variables
    /// currently hold.  Inputs that were not re-fuzzified since the last
    /// call keep their old DOMs.
    pub fn defuzzify(&mut self, name: &str, method: DefuzzifyMethod) -> FuzzyResult<f64> {
        let id = self.lookup(name)?;

        for rule in &self.rules {
            rule.consequent.clear_dom(&mut self.variables);
        }
        for rule in &self.rules {
            let strength = rule.antecedent.dom(&self.variables);
            rule.consequent.or_with_dom(&mut self.variables, strength);
        }

        let variable = &self.variables[id.0];
        let crisp = match method {
            DefuzzifyMethod::MaxAv => variable.defuzzify_max_av(),
            DefuzzifyMethod::Centroid(samples) => variable.defuzzify_centroid(samples)?,
        };
        trace!(variable = name, ?method, crisp, "defuzzified");
        Ok(crisp)
    }

    /// Zero the DOM of every set in every variable.
    pub fn clear(&mut self) {
        for v in &mut self.variables {
            v.clear_doms();
        }
    }

    fn lookup(&self, name: &str) -> FuzzyResult<VarId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_owned()))
    }
}

impl fmt::Display for FuzzyModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.variables {
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
