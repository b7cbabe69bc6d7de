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
    ClausalError, Clause, ClauseList, FormulaNode, Literal, NormalForm, Result, Subsumable,
    VariableMap,
};
use log::debug;

/// A structure used to translate a formula in negation normal form into a clausal CNF or DNF using the distributive law.
///
/// The formula is traversed bottom-up with an explicit stack, so deep formulas do not exhaust the call stack.
/// Each node is reduced to a list of clauses (or terms):
/// the children of the outer connective of the normal form (a conjunction for a CNF) are concatenated,
/// while the children of the inner connective are combined by choosing one clause of each child.
/// Combinations involving a literal and its negation are discarded,
/// and subsumed clauses are removed after each combination step.
///
/// Since the size of the result may be exponential in the size of the formula,
/// a literal budget can be set; it bounds the number of literals emitted during the whole process.
///
/// # Examples
///
/// ```
/// use crusti_clausal::{DistributiveClausifier, FormulaNode, NormalForm};
///
/// let f = FormulaNode::or(vec![
///     FormulaNode::and(vec![FormulaNode::var("a"), FormulaNode::var("b")]),
///     FormulaNode::var("c"),
/// ]);
/// let cnf = DistributiveClausifier::new(NormalForm::Cnf).clausify(&f).unwrap();
/// assert_eq!("and(or(a, c), or(b, c))", format!("{}", cnf));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistributiveClausifier {
    form: NormalForm,
    literal_budget: Option<usize>,
}

enum Frame<'a> {
    Enter(&'a FormulaNode),
    Exit(&'a FormulaNode),
}

struct LiteralCounter {
    count: usize,
    limit: Option<usize>,
}

impl LiteralCounter {
    fn add(&mut self, n: usize) -> Result<()> {
        self.count += n;
        match self.limit {
            Some(limit) if self.count > limit => Err(ClausalError::LiteralBudgetExceeded { limit }),
            _ => Ok(()),
        }
    }
}

impl DistributiveClausifier {
    /// Builds a clausifier targeting the given normal form, without literal budget.
    pub fn new(form: NormalForm) -> Self {
        DistributiveClausifier {
            form,
            literal_budget: None,
        }
    }

    /// Sets the maximal number of literals that may be emitted.
    ///
    /// Each literal of the formula counts for one, and each clause created when combining the children
    /// of an inner connective counts for its length.
    #[must_use]
    pub fn with_literal_budget(mut self, budget: usize) -> Self {
        self.literal_budget = Some(budget);
        self
    }

    /// Returns the normal form this clausifier targets.
    pub fn form(&self) -> NormalForm {
        self.form
    }

    /// Returns the literal budget, or `None` if the number of emitted literals is not bounded.
    pub fn literal_budget(&self) -> Option<usize> {
        self.literal_budget
    }

    /// Returns the number of literals emitted while clausifying a formula in negation normal form.
    ///
    /// The literal budget of this clausifier is ignored.
    /// A clausification with a budget fails iff the budget is lower than this number.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::{DistributiveClausifier, FormulaNode, NormalForm};
    ///
    /// let f = FormulaNode::or(vec![
    ///     FormulaNode::and(vec![FormulaNode::var("a"), FormulaNode::var("b")]),
    ///     FormulaNode::var("c"),
    /// ]);
    /// let clausifier = DistributiveClausifier::new(NormalForm::Cnf);
    /// assert_eq!(7, clausifier.count_literals(&f).unwrap());
    /// assert!(clausifier.with_literal_budget(7).clausify(&f).is_ok());
    /// assert!(clausifier.with_literal_budget(6).clausify(&f).is_err());
    /// ```
    pub fn count_literals(&self, formula: &FormulaNode) -> Result<usize> {
        let mut map = VariableMap::from_formula(formula);
        let mut counter = LiteralCounter {
            count: 0,
            limit: None,
        };
        self.reduce(formula, &mut map, &mut counter)?;
        Ok(counter.count)
    }

    /// Computes the clausal normal form of a formula in negation normal form.
    ///
    /// The result is always a two-level formula (an `and` of `or`s for a CNF).
    ///
    /// A [`MalformedInput`](ClausalError::MalformedInput) error is returned if the formula is not in NNF,
    /// and a [`LiteralBudgetExceeded`](ClausalError::LiteralBudgetExceeded) one if the budget is exhausted.
    pub fn clausify(&self, formula: &FormulaNode) -> Result<FormulaNode> {
        let mut map = VariableMap::from_formula(formula);
        let clauses = self.clausify_indexed(formula, &mut map)?;
        clauses.to_formula(self.form, &map)
    }

    /// Computes the clausal normal form of a formula in negation normal form, as a list of indexed clauses.
    ///
    /// The variables of the formula that are absent from the map are added to it.
    /// In case of error, the map is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::{ClauseList, DistributiveClausifier, FormulaNode, NormalForm, VariableMap};
    ///
    /// let f = FormulaNode::and(vec![
    ///     FormulaNode::var("a"),
    ///     FormulaNode::or(vec![FormulaNode::lit("a", false), FormulaNode::var("b")]),
    /// ]);
    /// let mut map = VariableMap::new();
    /// let dnf = DistributiveClausifier::new(NormalForm::Dnf).clausify_indexed(&f, &mut map).unwrap();
    /// assert_eq!(ClauseList::from_dimacs(&[vec![1, 2]]).unwrap(), dnf);
    /// ```
    pub fn clausify_indexed(&self, formula: &FormulaNode, map: &mut VariableMap) -> Result<ClauseList> {
        let mut target = map.clone();
        let mut counter = LiteralCounter {
            count: 0,
            limit: self.literal_budget,
        };
        let clauses = self.reduce(formula, &mut target, &mut counter)?;
        debug!(
            "distributive {} computed: {} clause(s), {} literal(s) emitted",
            self.form,
            clauses.len(),
            counter.count
        );
        *map = target;
        Ok(clauses)
    }

    fn reduce(&self, root: &FormulaNode, map: &mut VariableMap, counter: &mut LiteralCounter) -> Result<ClauseList> {
        let (neutral, absorbing) = match self.form {
            NormalForm::Cnf => (FormulaNode::True, FormulaNode::False),
            NormalForm::Dnf => (FormulaNode::False, FormulaNode::True),
        };
        let outer_kind = self.form.outer_kind();
        let inner_kind = self.form.inner_kind();
        let mut stack = vec![Frame::Enter(root)];
        // the reduced children, with the sizes of their subtrees
        let mut reduced: Vec<(ClauseList, usize)> = Vec::new();
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(node) => match node {
                    FormulaNode::Lit(name, polarity) => {
                        counter.add(1)?;
                        let literal = Literal::new(map.add(name.as_str()), *polarity);
                        reduced.push((
                            ClauseList::new(vec![Clause::from_sorted_unchecked(vec![literal])]),
                            1,
                        ));
                    }
                    FormulaNode::True | FormulaNode::False if *node == neutral => {
                        reduced.push((ClauseList::default(), 1));
                    }
                    FormulaNode::True | FormulaNode::False if *node == absorbing => {
                        reduced.push((ClauseList::new(vec![Clause::default()]), 1));
                    }
                    FormulaNode::And(children) | FormulaNode::Or(children) => {
                        stack.push(Frame::Exit(node));
                        children.iter().rev().for_each(|c| stack.push(Frame::Enter(c)));
                    }
                    _ => {
                        return Err(ClausalError::malformed(format!(
                            "unexpected {} node in a formula in negation normal form",
                            node.kind()
                        )))
                    }
                },
                Frame::Exit(node) => {
                    let n_children = node.children().len();
                    let mut children = reduced.split_off(reduced.len() - n_children);
                    let size = 1 + children.iter().map(|(_, s)| s).sum::<usize>();
                    let kind = node.kind();
                    let clauses = if kind == outer_kind {
                        let mut concatenation = children
                            .into_iter()
                            .flat_map(|(c, _)| c.into_iter())
                            .collect::<ClauseList>();
                        concatenation.remove_subsumed();
                        concatenation
                    } else {
                        debug_assert_eq!(inner_kind, kind);
                        children.sort_by_key(|(_, s)| *s);
                        distribute(
                            &children.into_iter().map(|(c, _)| c).collect::<Vec<ClauseList>>(),
                            counter,
                        )?
                    };
                    reduced.push((clauses, size));
                }
            }
        }
        Ok(reduced.pop().map(|(c, _)| c).unwrap_or_default())
    }
}

// combines the clauses of the children, choosing one clause per child
fn distribute(children: &[ClauseList], counter: &mut LiteralCounter) -> Result<ClauseList> {
    let mut combinations = Vec::new();
    let mut work = vec![(0, Clause::default())];
    while let Some((i, partial)) = work.pop() {
        if i == children.len() {
            counter.add(partial.len())?;
            combinations.push(partial);
            continue;
        }
        let child = children[i].as_clauses();
        if child.iter().any(|c| c.subsumes(&partial)) {
            work.push((i + 1, partial));
            continue;
        }
        for clause in child.iter().rev() {
            if let Some(union) = union_without_complement(&partial, clause) {
                work.push((i + 1, union));
            }
        }
    }
    let mut result = ClauseList::new(combinations);
    result.remove_subsumed();
    Ok(result)
}

fn union_without_complement(first: &Clause, second: &Clause) -> Option<Clause> {
    let mut literals = Vec::with_capacity(first.len() + second.len());
    literals.extend_from_slice(first.as_literals());
    literals.extend_from_slice(second.as_literals());
    literals.sort_unstable();
    literals.dedup();
    let union = Clause::from_sorted_unchecked(literals);
    if union.is_tautology() {
        None
    } else {
        Some(union)
    }
}
