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

use crate::{ClausalError, ClauseList, FormulaNode, NormalForm, Result, VariableMap};
use std::sync::Arc;

/// A formula in conjunctive normal form, given by a [`ClauseList`] and the [`VariableMap`] its indices refer to.
///
/// Every literal of the clauses refers to a variable of the map.
/// The map is shared through an [`Arc`], so that several formulas may use the same numbering.
///
/// # Examples
///
/// ```
/// use crusti_clausal::{ClauseList, Cnf, VariableMap};
/// use std::sync::Arc;
///
/// let map = Arc::new(VariableMap::from_names(vec!["a", "b"]));
/// let cnf = Cnf::new(map, ClauseList::from_dimacs(&[vec![-1, 2]]).unwrap()).unwrap();
/// assert_eq!("and(or(-a, b))", format!("{}", cnf));
/// assert!(cnf.evaluate(|name| name == "b"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cnf {
    variable_map: Arc<VariableMap>,
    clauses: ClauseList,
}

impl Cnf {
    /// Builds a new CNF.
    ///
    /// An [`UnknownVariable`](ClausalError::UnknownVariable) error is returned if a literal refers to an index absent from the map.
    pub fn new(variable_map: Arc<VariableMap>, clauses: ClauseList) -> Result<Self> {
        if let Some(v) = clauses
            .variables()
            .into_iter()
            .find(|v| variable_map.name_of(*v).is_none())
        {
            return Err(ClausalError::unknown_variable(format!("#{}", v)));
        }
        Ok(Cnf {
            variable_map,
            clauses,
        })
    }

    pub(crate) fn from_data_unchecked(variable_map: Arc<VariableMap>, clauses: ClauseList) -> Self {
        Cnf {
            variable_map,
            clauses,
        }
    }

    /// Returns the map giving the names of the variables the clauses refer to.
    pub fn variable_map(&self) -> &Arc<VariableMap> {
        &self.variable_map
    }

    /// Returns the clauses of this CNF.
    pub fn clauses(&self) -> &ClauseList {
        &self.clauses
    }

    /// Consumes this CNF, returning its map and its clauses.
    pub fn into_parts(self) -> (Arc<VariableMap>, ClauseList) {
        (self.variable_map, self.clauses)
    }

    /// Replaces the variable map, translating every clause into the numbering of the new one.
    ///
    /// If a variable of this formula is absent from the new map, an [`UnknownVariable`](ClausalError::UnknownVariable)
    /// error is returned and this formula is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::{ClauseList, Cnf, VariableMap};
    /// use std::sync::Arc;
    ///
    /// let map = Arc::new(VariableMap::from_names(vec!["a", "b"]));
    /// let mut cnf = Cnf::new(map, ClauseList::from_dimacs(&[vec![-1, 2]]).unwrap()).unwrap();
    /// assert!(cnf.set_variable_map(Arc::new(VariableMap::from_names(vec!["b"]))).is_err());
    /// assert_eq!(vec![-1, 2], cnf.clauses().as_clauses()[0].to_dimacs());
    /// cnf.set_variable_map(Arc::new(VariableMap::from_names(vec!["c", "b", "a"]))).unwrap();
    /// assert_eq!(vec![-3, 2], cnf.clauses().as_clauses()[0].to_dimacs());
    /// ```
    pub fn set_variable_map(&mut self, variable_map: Arc<VariableMap>) -> Result<()> {
        let mut target = VariableMap::clone(&variable_map);
        let clauses = self
            .clauses
            .adapt(&self.variable_map, &mut target, false)?;
        self.clauses = clauses;
        self.variable_map = variable_map;
        Ok(())
    }

    /// Returns a copy of this formula expressed with the numbering of another map.
    ///
    /// Variables absent from `variable_map` are appended to the map of the result.
    pub fn adapt(&self, variable_map: &VariableMap) -> Result<Cnf> {
        let mut target = variable_map.clone();
        let clauses = self
            .clauses
            .adapt(&self.variable_map, &mut target, true)?;
        Ok(Cnf::from_data_unchecked(Arc::new(target), clauses))
    }

    /// Builds the conjunction of several CNFs.
    ///
    /// The map of the result is the merge of the maps of the operands (see [`VariableMap::merge`]);
    /// the clauses of each operand are translated into this map and concatenated.
    pub fn conjoin(cnfs: &[&Cnf]) -> Result<Cnf> {
        let maps = cnfs
            .iter()
            .map(|c| c.variable_map.as_ref())
            .collect::<Vec<&VariableMap>>();
        let mut merged = VariableMap::merge(&maps);
        let mut clauses = ClauseList::default();
        for cnf in cnfs {
            cnf.clauses
                .adapt(&cnf.variable_map, &mut merged, false)?
                .into_iter()
                .for_each(|c| clauses.add_clause(c));
        }
        Ok(Cnf::from_data_unchecked(Arc::new(merged), clauses))
    }

    /// Evaluates this formula given the values of its variables by their names.
    pub fn evaluate<F>(&self, value_of: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        self.clauses.evaluate_as_cnf(|v| {
            self.variable_map
                .name_of(v)
                .map(|n| value_of(n))
                .unwrap_or(false)
        })
    }

    /// Returns this formula as a clausal tree (an `and` of `or`s).
    pub fn to_formula(&self) -> Result<FormulaNode> {
        self.clauses.to_formula(NormalForm::Cnf, &self.variable_map)
    }

    /// Returns the DNF equivalent to this formula, expressed with the same map.
    pub fn to_dnf(&self) -> ClauseList {
        self.clauses.convert()
    }
}

impl std::fmt::Display for Cnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let formula = self.to_formula().map_err(|_| std::fmt::Error)?;
        write!(f, "{}", formula.default_display())
    }
}
