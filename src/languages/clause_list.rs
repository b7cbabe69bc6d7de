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
    ClausalError, Clause, FormulaNode, Literal, NormalForm, Result, Subsumable, VarId, VariableMap,
};
use std::iter::FromIterator;

/// An ordered sequence of [`Clause`]s.
///
/// The list carries no form tag: depending on the algorithm that produced it,
/// it is either a conjunction of disjunctions (CNF) or a disjunction of conjunctions (DNF).
///
/// # Examples
///
/// ```
/// use crusti_clausal::{Clause, ClauseList};
///
/// // (1 or 2) and (-1 or -2), read as a CNF
/// let cnf = ClauseList::from_dimacs(&[vec![1, 2], vec![-1, -2]]).unwrap();
/// // its DNF counterpart is (-1 and 2) or (1 and -2)
/// let dnf = cnf.convert();
/// assert_eq!(2, dnf.len());
/// assert!(dnf.as_clauses().contains(&Clause::from_dimacs(&[-1, 2]).unwrap()));
/// assert!(dnf.as_clauses().contains(&Clause::from_dimacs(&[1, -2]).unwrap()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClauseList {
    clauses: Vec<Clause>,
}

impl ClauseList {
    /// Builds a list of clauses.
    pub fn new(clauses: Vec<Clause>) -> Self {
        ClauseList { clauses }
    }

    /// Builds a list of clauses given as signed integers.
    pub fn from_dimacs(clauses: &[Vec<isize>]) -> Result<Self> {
        clauses
            .iter()
            .map(|c| Clause::from_dimacs(c))
            .collect::<Result<Vec<Clause>>>()
            .map(ClauseList::new)
    }

    /// Appends a clause at the end of this list.
    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Returns the clauses of this list, in order.
    pub fn as_clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }

    /// Returns the number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns an iterator over the clauses of this list.
    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Switches between the CNF and the DNF readings of this list.
    ///
    /// The result is equivalent to this list when read in the other normal form,
    /// and contains no pair of clauses such that one subsumes the other.
    /// It is computed by backtracking over the choices of one literal per clause:
    /// a choice contradicting a literal already chosen is pruned,
    /// and a clause already satisfied by the chosen literals is skipped.
    ///
    /// An empty list converts into a list made of the empty clause, and vice versa.
    pub fn convert(&self) -> ClauseList {
        let mut combinations = Vec::new();
        let mut partial = Vec::new();
        convert_from(&self.clauses, 0, &mut partial, &mut combinations);
        let mut result = ClauseList::new(combinations);
        result.remove_subsumed();
        result
    }

    /// Removes the clauses subsumed by another clause of this list.
    ///
    /// Among equal clauses, the first one is kept.
    /// The relative order of the remaining clauses is preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::ClauseList;
    ///
    /// let mut list = ClauseList::from_dimacs(&[vec![1, 2, 3], vec![2], vec![-1], vec![2]]).unwrap();
    /// list.remove_subsumed();
    /// assert_eq!(ClauseList::from_dimacs(&[vec![2], vec![-1]]).unwrap(), list);
    /// ```
    pub fn remove_subsumed(&mut self) {
        let mut by_size = (0..self.clauses.len()).collect::<Vec<usize>>();
        by_size.sort_by_key(|i| self.clauses[*i].len());
        let mut kept: Vec<usize> = Vec::with_capacity(self.clauses.len());
        let mut keep = vec![false; self.clauses.len()];
        for i in by_size {
            if !kept
                .iter()
                .any(|k| self.clauses[*k].subsumes(&self.clauses[i]))
            {
                kept.push(i);
                keep[i] = true;
            }
        }
        let mut flags = keep.into_iter();
        self.clauses.retain(|_| flags.next().unwrap_or(false));
    }

    /// Negates each clause of the list.
    ///
    /// Read as a CNF, the result is the DNF of the negation of this list, and vice versa.
    pub fn negate(&self) -> ClauseList {
        self.clauses.iter().map(Clause::negate).collect()
    }

    /// Conditions this list, read as a CNF, by a literal assumed to be true.
    ///
    /// Clauses containing the literal are removed, and the negation of the literal is removed from the others.
    pub fn condition(&self, literal: Literal) -> ClauseList {
        let negation = literal.negate();
        self.clauses
            .iter()
            .filter(|c| !c.contains(literal))
            .map(|c| {
                Clause::from_sorted_unchecked(
                    c.as_literals()
                        .iter()
                        .copied()
                        .filter(|l| *l != negation)
                        .collect(),
                )
            })
            .collect()
    }

    /// Evaluates this list read as a CNF.
    pub fn evaluate_as_cnf<F>(&self, value_of: F) -> bool
    where
        F: Fn(VarId) -> bool,
    {
        self.clauses.iter().all(|c| c.is_satisfied_by(&value_of))
    }

    /// Evaluates this list read as a DNF.
    pub fn evaluate_as_dnf<F>(&self, value_of: F) -> bool
    where
        F: Fn(VarId) -> bool,
    {
        self.clauses.iter().any(|c| c.is_implied_by(&value_of))
    }

    /// Returns the sorted, distinct variables involved in this list.
    pub fn variables(&self) -> Vec<VarId> {
        let mut vars = self
            .clauses
            .iter()
            .flat_map(|c| c.as_literals().iter().map(Literal::var_id))
            .collect::<Vec<VarId>>();
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    /// Translates every clause from the numbering of a [`VariableMap`] to the one of another map.
    ///
    /// If a clause cannot be translated, an error is returned and `to` is left untouched,
    /// even if `integrate` is `true`.
    pub fn adapt(&self, from: &VariableMap, to: &mut VariableMap, integrate: bool) -> Result<ClauseList> {
        let mut target = to.clone();
        let adapted = self
            .clauses
            .iter()
            .map(|c| c.adapt(from, &mut target, integrate))
            .collect::<Result<ClauseList>>()?;
        *to = target;
        Ok(adapted)
    }

    /// Extracts the clauses of a clausal formula, adding its variables to a [`VariableMap`].
    ///
    /// For [`NormalForm::Cnf`], the formula may be a literal, a disjunction of literals,
    /// a conjunction of such formulas, or a constant; [`NormalForm::Dnf`] is the dual.
    /// Any other shape produces a [`MalformedInput`](ClausalError::MalformedInput) error, and leaves the map untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::{ClauseList, FormulaNode, NormalForm, VariableMap};
    ///
    /// let f = FormulaNode::and(vec![
    ///     FormulaNode::or(vec![FormulaNode::var("a"), FormulaNode::lit("b", false)]),
    ///     FormulaNode::var("b"),
    /// ]);
    /// let mut map = VariableMap::new();
    /// let clauses = ClauseList::from_formula(&f, NormalForm::Cnf, &mut map).unwrap();
    /// assert_eq!(ClauseList::from_dimacs(&[vec![-2, 1], vec![2]]).unwrap(), clauses);
    /// ```
    pub fn from_formula(formula: &FormulaNode, form: NormalForm, map: &mut VariableMap) -> Result<ClauseList> {
        let mut target = map.clone();
        let clauses = extract_clauses(formula, form, &mut target)?;
        *map = target;
        Ok(clauses)
    }

    /// Builds the clausal formula corresponding to this list, read in the given normal form.
    ///
    /// The result is always a two-level formula (an `and` of `or`s for a CNF), even for single clauses or literals.
    pub fn to_formula(&self, form: NormalForm, map: &VariableMap) -> Result<FormulaNode> {
        let inner = |children| match form {
            NormalForm::Cnf => FormulaNode::or(children),
            NormalForm::Dnf => FormulaNode::and(children),
        };
        let children = self
            .clauses
            .iter()
            .map(|c| {
                c.as_literals()
                    .iter()
                    .map(|l| {
                        map.name_of(l.var_id())
                            .map(|n| FormulaNode::lit(n, l.polarity()))
                            .ok_or_else(|| ClausalError::unknown_variable(format!("#{}", l.var_id())))
                    })
                    .collect::<Result<Vec<FormulaNode>>>()
                    .map(inner)
            })
            .collect::<Result<Vec<FormulaNode>>>()?;
        Ok(match form {
            NormalForm::Cnf => FormulaNode::and(children),
            NormalForm::Dnf => FormulaNode::or(children),
        })
    }
}

fn convert_from(clauses: &[Clause], index: usize, partial: &mut Vec<Literal>, combinations: &mut Vec<Clause>) {
    if index == clauses.len() {
        combinations.push(Clause::new(partial.clone()));
        return;
    }
    let clause = clauses[index].as_literals();
    if clause.iter().any(|l| partial.contains(l)) {
        convert_from(clauses, index + 1, partial, combinations);
        return;
    }
    for l in clause {
        if partial.contains(&l.negate()) {
            continue;
        }
        partial.push(*l);
        convert_from(clauses, index + 1, partial, combinations);
        partial.pop();
    }
}

fn extract_clauses(formula: &FormulaNode, form: NormalForm, map: &mut VariableMap) -> Result<ClauseList> {
    let (neutral, absorbing) = match form {
        NormalForm::Cnf => (FormulaNode::True, FormulaNode::False),
        NormalForm::Dnf => (FormulaNode::False, FormulaNode::True),
    };
    if *formula == neutral {
        return Ok(ClauseList::default());
    }
    if *formula == absorbing {
        return Ok(ClauseList::new(vec![Clause::default()]));
    }
    if formula.kind() == form.outer_kind() {
        formula
            .children()
            .into_iter()
            .map(|c| extract_clause(c, form, map))
            .collect()
    } else {
        extract_clause(formula, form, map).map(|c| ClauseList::new(vec![c]))
    }
}

fn extract_clause(node: &FormulaNode, form: NormalForm, map: &mut VariableMap) -> Result<Clause> {
    if let Some(l) = extract_literal(node, map) {
        return Ok(Clause::from_sorted_unchecked(vec![l]));
    }
    if node.kind() != form.inner_kind() {
        return Err(ClausalError::malformed(format!(
            "unexpected {} node in a {}",
            node.kind(),
            form
        )));
    }
    node.children()
        .into_iter()
        .map(|c| {
            extract_literal(c, map).ok_or_else(|| {
                ClausalError::malformed(format!("unexpected {} node in a {}", c.kind(), form))
            })
        })
        .collect()
}

fn extract_literal(node: &FormulaNode, map: &mut VariableMap) -> Option<Literal> {
    node.is_literal()
        .map(|(name, polarity)| Literal::new(map.add(name), polarity))
}

impl FromIterator<Clause> for ClauseList {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        ClauseList::new(iter.into_iter().collect())
    }
}

impl IntoIterator for ClauseList {
    type Item = Clause;
    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl<'a> IntoIterator for &'a ClauseList {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}
