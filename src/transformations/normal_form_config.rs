// crusti_clausal
// Copyright (C) 2021  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use crate::FormulaNodeKind;

/// The clausal normal forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NormalForm {
    /// Conjunctive normal form: a conjunction of clauses
    Cnf,
    /// Disjunctive normal form: a disjunction of terms
    Dnf,
}

impl NormalForm {
    /// Returns the other normal form.
    pub fn dual(self) -> Self {
        match self {
            NormalForm::Cnf => NormalForm::Dnf,
            NormalForm::Dnf => NormalForm::Cnf,
        }
    }

    pub(crate) fn outer_kind(self) -> FormulaNodeKind {
        match self {
            NormalForm::Cnf => FormulaNodeKind::And,
            NormalForm::Dnf => FormulaNodeKind::Or,
        }
    }

    pub(crate) fn inner_kind(self) -> FormulaNodeKind {
        self.dual().outer_kind()
    }
}

impl std::fmt::Display for NormalForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalForm::Cnf => write!(f, "CNF"),
            NormalForm::Dnf => write!(f, "DNF"),
        }
    }
}

/// The algorithms used to turn an NNF formula into a clausal one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClausificationStrategy {
    /// The distributive law only; exceeding the literal budget is an error.
    Distributive,
    /// The Tseitin encoding only (CNF only).
    Tseitin,
    /// The distributive law, restarting the whole formula with the Tseitin encoding if the literal budget is exceeded.
    DistributiveWithTseitinFallback,
}

impl Default for ClausificationStrategy {
    fn default() -> Self {
        ClausificationStrategy::DistributiveWithTseitinFallback
    }
}

/// The prefix of the auxiliary variables introduced by the Tseitin encoding, unless another one is set.
pub const DEFAULT_AUXILIARY_PREFIX: &str = "_tseitin_";

/// Configuration for the normal form computation.
///
/// # Examples
///
/// ```
/// use crusti_clausal::{ClausificationStrategy, NormalForm, NormalFormConfig};
///
/// let config = NormalFormConfig::default()
///     .with_form(NormalForm::Dnf)
///     .with_literal_budget(Some(1000));
/// assert_eq!(NormalForm::Dnf, config.form());
/// assert_eq!(ClausificationStrategy::DistributiveWithTseitinFallback, config.strategy());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalFormConfig {
    form: NormalForm,
    strategy: ClausificationStrategy,
    literal_budget: Option<usize>,
    auxiliary_prefix: String,
    share_subexpressions: bool,
}

impl Default for NormalFormConfig {
    fn default() -> Self {
        Self {
            form: NormalForm::Cnf,
            strategy: ClausificationStrategy::default(),
            literal_budget: None,
            auxiliary_prefix: DEFAULT_AUXILIARY_PREFIX.to_string(),
            share_subexpressions: false,
        }
    }
}

impl NormalFormConfig {
    /// Sets the target normal form.
    ///
    /// The default value is [`NormalForm::Cnf`].
    #[must_use]
    pub fn with_form(mut self, form: NormalForm) -> Self {
        self.form = form;
        self
    }

    /// Sets the clausification strategy.
    ///
    /// The default value is [`ClausificationStrategy::DistributiveWithTseitinFallback`].
    #[must_use]
    pub fn with_strategy(mut self, strategy: ClausificationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the maximal number of literals the distributive clausification may emit.
    ///
    /// `None`, the default value, means there is no limit.
    #[must_use]
    pub fn with_literal_budget(mut self, literal_budget: Option<usize>) -> Self {
        self.literal_budget = literal_budget;
        self
    }

    /// Sets the prefix of the auxiliary variables introduced by the Tseitin encoding.
    #[must_use]
    pub fn with_auxiliary_prefix(mut self, prefix: &str) -> Self {
        self.auxiliary_prefix = prefix.to_string();
        self
    }

    /// Sets whether the Tseitin encoding reuses one auxiliary variable for structurally equal subformulas.
    ///
    /// The default value is `false`.
    #[must_use]
    pub fn with_shared_subexpressions(mut self, share: bool) -> Self {
        self.share_subexpressions = share;
        self
    }

    pub fn form(&self) -> NormalForm {
        self.form
    }

    pub fn strategy(&self) -> ClausificationStrategy {
        self.strategy
    }

    pub fn literal_budget(&self) -> Option<usize> {
        self.literal_budget
    }

    pub fn auxiliary_prefix(&self) -> &str {
        &self.auxiliary_prefix
    }

    pub fn share_subexpressions(&self) -> bool {
        self.share_subexpressions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = NormalFormConfig::default();
        assert_eq!(NormalForm::Cnf, config.form());
        assert_eq!(
            ClausificationStrategy::DistributiveWithTseitinFallback,
            config.strategy()
        );
        assert_eq!(None, config.literal_budget());
        assert_eq!("_tseitin_", config.auxiliary_prefix());
        assert!(!config.share_subexpressions());
    }

    #[test]
    fn test_builder() {
        let config = NormalFormConfig::default()
            .with_strategy(ClausificationStrategy::Tseitin)
            .with_auxiliary_prefix("aux")
            .with_shared_subexpressions(true)
            .with_literal_budget(Some(3));
        assert_eq!(ClausificationStrategy::Tseitin, config.strategy());
        assert_eq!("aux", config.auxiliary_prefix());
        assert!(config.share_subexpressions());
        assert_eq!(Some(3), config.literal_budget());
    }

    #[test]
    fn test_normal_form_kinds() {
        assert_eq!(NormalForm::Dnf, NormalForm::Cnf.dual());
        assert_eq!(FormulaNodeKind::And, NormalForm::Cnf.outer_kind());
        assert_eq!(FormulaNodeKind::Or, NormalForm::Cnf.inner_kind());
        assert_eq!(FormulaNodeKind::Or, NormalForm::Dnf.outer_kind());
        assert_eq!("DNF", format!("{}", NormalForm::Dnf));
    }
}
