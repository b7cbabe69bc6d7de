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

use crate::{
    ClausalError, ClausificationStrategy, Cnf, DistributiveClausifier, FormulaNode, NnfSimplifier,
    NormalForm, NormalFormConfig, Result, TseitinClausifier, VariableMap,
};
use log::{debug, warn};
use std::sync::Arc;

/// The whole normalization process: a formula is put in negation normal form, then clausified.
///
/// The clausification algorithm is chosen according to the [`ClausificationStrategy`] of the configuration.
/// With the default strategy, the distributive law is tried first;
/// if it exceeds the literal budget, the whole NNF formula is encoded again using the Tseitin encoding.
///
/// # Examples
///
/// ```
/// use crusti_clausal::{FormulaNode, NormalFormComputation, NormalFormConfig};
///
/// let f = FormulaNode::and(vec![
///     FormulaNode::or(vec![FormulaNode::var("a"), FormulaNode::var("b")]),
///     FormulaNode::not(FormulaNode::and(vec![FormulaNode::var("a"), FormulaNode::var("b")])),
/// ]);
/// let computation = NormalFormComputation::new(NormalFormConfig::default());
/// let cnf = computation.compute_cnf(&f).unwrap();
/// assert_eq!("and(or(a, b), or(-b, -a))", format!("{}", cnf));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalFormComputation {
    config: NormalFormConfig,
}

impl NormalFormComputation {
    pub fn new(config: NormalFormConfig) -> Self {
        NormalFormComputation { config }
    }

    pub fn config(&self) -> &NormalFormConfig {
        &self.config
    }

    /// Computes the clausal form of a formula, in the normal form set by the configuration.
    ///
    /// The result is a two-level formula (an `and` of `or`s for a CNF).
    /// When the Tseitin encoding is used, the result contains auxiliary variables.
    pub fn compute_formula(&self, formula: &FormulaNode) -> Result<FormulaNode> {
        let form = self.config.form();
        let nnf = NnfSimplifier::new().simplify(formula);
        self.apply_strategy(
            form,
            || self.distributive(form).clausify(&nnf),
            || {
                self.tseitin()
                    .encode_to_cnf(&nnf, VariableMap::from_formula(formula))?
                    .to_formula()
            },
        )
    }

    /// Computes a [`Cnf`] equivalent (or equisatisfiable, if the Tseitin encoding is used) to a formula.
    ///
    /// The normal form set by the configuration is ignored.
    /// The variables of the formula are numbered in the order given by [`FormulaNode::variables`].
    pub fn compute_cnf(&self, formula: &FormulaNode) -> Result<Cnf> {
        self.compute_cnf_with_map(formula, VariableMap::new())
    }

    /// Computes a [`Cnf`] like [`compute_cnf`](NormalFormComputation::compute_cnf),
    /// using the given map as initial numbering.
    ///
    /// The variables of the formula that are absent from the map are appended to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::{FormulaNode, NormalFormComputation, VariableMap};
    ///
    /// let f = FormulaNode::implies(FormulaNode::var("a"), FormulaNode::var("b"));
    /// let map = VariableMap::from_names(vec!["b", "c"]);
    /// let cnf = NormalFormComputation::default().compute_cnf_with_map(&f, map).unwrap();
    /// assert_eq!(vec!["b", "c", "a"], cnf.variable_map().names().collect::<Vec<&str>>());
    /// assert_eq!(vec![-3, 1], cnf.clauses().as_clauses()[0].to_dimacs());
    /// ```
    pub fn compute_cnf_with_map(&self, formula: &FormulaNode, map: VariableMap) -> Result<Cnf> {
        let mut map = map;
        formula.variables().into_iter().for_each(|v| {
            map.add(v);
        });
        let nnf = NnfSimplifier::new().simplify(formula);
        self.apply_strategy(
            NormalForm::Cnf,
            || {
                let mut target = map.clone();
                let clauses = self
                    .distributive(NormalForm::Cnf)
                    .clausify_indexed(&nnf, &mut target)?;
                Ok(Cnf::from_data_unchecked(Arc::new(target), clauses))
            },
            || self.tseitin().encode_to_cnf(&nnf, map.clone()),
        )
    }

    fn apply_strategy<T, D, S>(&self, form: NormalForm, distributive: D, tseitin: S) -> Result<T>
    where
        D: FnOnce() -> Result<T>,
        S: FnOnce() -> Result<T>,
    {
        match self.config.strategy() {
            ClausificationStrategy::Distributive => distributive(),
            ClausificationStrategy::Tseitin if form == NormalForm::Cnf => tseitin(),
            ClausificationStrategy::Tseitin => Err(ClausalError::malformed(format!(
                "the Tseitin encoding cannot produce a {}",
                form
            ))),
            ClausificationStrategy::DistributiveWithTseitinFallback => match distributive() {
                Err(ClausalError::LiteralBudgetExceeded { limit }) if form == NormalForm::Cnf => {
                    warn!(
                        "literal budget of {} exceeded by the distributive law; falling back to the Tseitin encoding",
                        limit
                    );
                    let result = tseitin();
                    debug!("Tseitin fallback done");
                    result
                }
                result => result,
            },
        }
    }

    fn distributive(&self, form: NormalForm) -> DistributiveClausifier {
        let clausifier = DistributiveClausifier::new(form);
        match self.config.literal_budget() {
            Some(budget) => clausifier.with_literal_budget(budget),
            None => clausifier,
        }
    }

    fn tseitin(&self) -> TseitinClausifier {
        TseitinClausifier::new()
            .with_auxiliary_prefix(self.config.auxiliary_prefix())
            .with_shared_subexpressions(self.config.share_subexpressions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> FormulaNode {
        FormulaNode::var(name)
    }

    fn ab_or_cd() -> FormulaNode {
        FormulaNode::or(vec![
            FormulaNode::and(vec![var("a"), var("b")]),
            FormulaNode::and(vec![var("c"), var("d")]),
        ])
    }

    #[test]
    fn test_implies_to_single_clause() {
        let f = FormulaNode::implies(var("a"), FormulaNode::or(vec![var("b"), var("c")]));
        let computation = NormalFormComputation::default();
        assert_eq!(
            "and(or(-a, b, c))",
            format!("{}", computation.compute_formula(&f).unwrap())
        );
        let cnf = computation.compute_cnf(&f).unwrap();
        assert_eq!(
            vec![vec![-1, 2, 3]],
            cnf.clauses()
                .iter()
                .map(|c| c.to_dimacs())
                .collect::<Vec<Vec<isize>>>()
        );
    }

    #[test]
    fn test_dnf() {
        let f = FormulaNode::implies(var("a"), var("b"));
        let computation =
            NormalFormComputation::new(NormalFormConfig::default().with_form(NormalForm::Dnf));
        assert_eq!(
            "or(and(-a), and(b))",
            format!("{}", computation.compute_formula(&f).unwrap())
        );
    }

    #[test]
    fn test_fallback_to_tseitin() {
        let config = NormalFormConfig::default().with_literal_budget(Some(11));
        let cnf = NormalFormComputation::new(config)
            .compute_cnf(&ab_or_cd())
            .unwrap();
        assert!(cnf.variable_map().contains_name("_tseitin_1"));
        assert!(cnf.variable_map().contains_name("_tseitin_2"));
        assert_eq!(7, cnf.clauses().len());
    }

    #[test]
    fn test_no_fallback_within_budget() {
        let config = NormalFormConfig::default().with_literal_budget(Some(12));
        let cnf = NormalFormComputation::new(config)
            .compute_cnf(&ab_or_cd())
            .unwrap();
        assert_eq!(4, cnf.variable_map().len());
        assert_eq!(4, cnf.clauses().len());
    }

    #[test]
    fn test_distributive_strategy_reports_budget() {
        let config = NormalFormConfig::default()
            .with_strategy(ClausificationStrategy::Distributive)
            .with_literal_budget(Some(11));
        assert_eq!(
            Err(ClausalError::LiteralBudgetExceeded { limit: 11 }),
            NormalFormComputation::new(config).compute_formula(&ab_or_cd())
        );
    }

    #[test]
    fn test_dnf_has_no_fallback() {
        let f = FormulaNode::and(vec![
            FormulaNode::or(vec![var("a"), var("b")]),
            FormulaNode::or(vec![var("c"), var("d")]),
        ]);
        let config = NormalFormConfig::default()
            .with_form(NormalForm::Dnf)
            .with_literal_budget(Some(5));
        assert_eq!(
            Err(ClausalError::LiteralBudgetExceeded { limit: 5 }),
            NormalFormComputation::new(config).compute_formula(&f)
        );
    }

    #[test]
    fn test_tseitin_strategy() {
        let config = NormalFormConfig::default()
            .with_strategy(ClausificationStrategy::Tseitin)
            .with_auxiliary_prefix("x");
        let computation = NormalFormComputation::new(config);
        let formula = computation.compute_formula(&ab_or_cd()).unwrap();
        assert!(formula.is_clausal_cnf());
        assert!(formula.variables().contains(&"x1".to_string()));
        let dnf_computation = NormalFormComputation::new(
            computation.config().clone().with_form(NormalForm::Dnf),
        );
        assert!(matches!(
            dnf_computation.compute_formula(&ab_or_cd()),
            Err(ClausalError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_constant_formula_keeps_variables() {
        let f = FormulaNode::or(vec![var("a"), FormulaNode::not(var("a"))]);
        let cnf = NormalFormComputation::default().compute_cnf(&f).unwrap();
        assert!(cnf.clauses().is_empty());
        assert_eq!(Some(1), cnf.variable_map().index_of("a").map(usize::from));
    }

    fn alternating_chain(depth: usize) -> FormulaNode {
        let mut f = var("c");
        for _ in 0..depth {
            f = FormulaNode::or(vec![var("a"), FormulaNode::and(vec![f, var("b")])]);
        }
        f
    }

    #[test]
    fn test_deep_formula() {
        let cnf = NormalFormComputation::default()
            .compute_cnf(&alternating_chain(10_000))
            .unwrap();
        assert_eq!(
            vec!["a", "c", "b"],
            cnf.variable_map().names().collect::<Vec<&str>>()
        );
        let mut clauses = cnf
            .clauses()
            .iter()
            .map(|c| c.to_dimacs())
            .collect::<Vec<Vec<isize>>>();
        clauses.sort();
        assert_eq!(vec![vec![1, 2], vec![1, 3]], clauses);
    }

    #[test]
    fn test_deep_formula_with_fallback() {
        let config = NormalFormConfig::default().with_literal_budget(Some(100));
        let cnf = NormalFormComputation::new(config)
            .compute_cnf(&alternating_chain(1_000))
            .unwrap();
        assert_eq!(2_002, cnf.variable_map().len());
        assert_eq!(5_998, cnf.clauses().len());
    }
}
