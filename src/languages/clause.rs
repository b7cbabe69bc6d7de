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

use crate::{Literal, Result, Subsumable, VarId, VariableMap};
use std::{convert::TryFrom, iter::FromIterator};

/// A sorted array of [`Literal`]s.
///
/// Whether a clause is read as a disjunction (in a CNF) or as a conjunction (a term in a DNF)
/// depends on the list holding it; the clause itself carries no such tag.
///
/// Literals are kept in ascending order (see the ordering of [`Literal`]).
/// Duplicated literals are allowed.
///
/// # Examples
///
/// ```
/// use crusti_clausal::Clause;
///
/// let clause = Clause::from_dimacs(&[3, -1, 2]).unwrap();
/// assert_eq!(vec![-1, 2, 3], clause.to_dimacs());
/// assert_eq!(vec![-3, -2, 1], clause.negate().to_dimacs());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// Builds a clause from a vector of literals, sorting them.
    pub fn new(mut literals: Vec<Literal>) -> Self {
        literals.sort_unstable();
        Clause { literals }
    }

    pub(crate) fn from_sorted_unchecked(literals: Vec<Literal>) -> Self {
        debug_assert!(literals.windows(2).all(|w| w[0] <= w[1]));
        Clause { literals }
    }

    /// Builds a clause from signed integers.
    ///
    /// A [`MalformedInput`](crate::ClausalError::MalformedInput) error is returned if `0` is given.
    pub fn from_dimacs(values: &[isize]) -> Result<Self> {
        values
            .iter()
            .map(|v| Literal::try_from(*v))
            .collect::<Result<Vec<Literal>>>()
            .map(Clause::new)
    }

    /// Returns the literals of this clause as signed integers.
    pub fn to_dimacs(&self) -> Vec<isize> {
        self.literals.iter().map(Literal::to_isize).collect()
    }

    /// Returns the (sorted) literals of this clause.
    pub fn as_literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Returns the number of literals, duplicates included.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns `true` iff this clause has no literal.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Returns `true` iff this clause contains the given literal.
    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.binary_search(&literal).is_ok()
    }

    /// Returns the clause made of the negations of the literals of this one.
    ///
    /// Negation reverses the literal order, so the literals are negated from the last one to the first one.
    pub fn negate(&self) -> Clause {
        Clause::from_sorted_unchecked(self.literals.iter().rev().map(Literal::negate).collect())
    }

    /// Returns the clause made of the positive literals of this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::Clause;
    ///
    /// let clause = Clause::from_dimacs(&[-4, -1, 2, 3]).unwrap();
    /// assert_eq!(vec![2, 3], clause.positives().to_dimacs());
    /// assert_eq!(vec![-4, -1], clause.negatives().to_dimacs());
    /// ```
    pub fn positives(&self) -> Clause {
        Clause::from_sorted_unchecked(self.literals[self.split_point()..].to_vec())
    }

    /// Returns the clause made of the negative literals of this one.
    pub fn negatives(&self) -> Clause {
        Clause::from_sorted_unchecked(self.literals[..self.split_point()].to_vec())
    }

    fn split_point(&self) -> usize {
        self.literals.partition_point(|l| !l.polarity())
    }

    /// Returns `true` iff this clause contains both a literal and its negation.
    pub fn is_tautology(&self) -> bool {
        let split = self.split_point();
        self.literals[split..]
            .iter()
            .any(|l| self.literals[..split].binary_search(&l.negate()).is_ok())
    }

    /// Returns the sorted, distinct variables involved in this clause.
    pub fn variables(&self) -> Vec<VarId> {
        let mut vars = self
            .literals
            .iter()
            .map(Literal::var_id)
            .collect::<Vec<VarId>>();
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    /// Translates this clause from the numbering of a [`VariableMap`] to the one of another map.
    ///
    /// See [`VariableMap::adapt`] for the meaning of `integrate` and for the errors.
    /// The returned clause is sorted according to its new indices.
    pub fn adapt(&self, from: &VariableMap, to: &mut VariableMap, integrate: bool) -> Result<Clause> {
        self.literals
            .iter()
            .map(|l| from.adapt(*l, to, integrate))
            .collect::<Result<Vec<Literal>>>()
            .map(Clause::new)
    }

    /// Returns `true` iff some literal is satisfied by the assignment (disjunctive reading).
    pub fn is_satisfied_by<F>(&self, value_of: F) -> bool
    where
        F: Fn(VarId) -> bool,
    {
        self.literals
            .iter()
            .any(|l| value_of(l.var_id()) == l.polarity())
    }

    /// Returns `true` iff every literal is satisfied by the assignment (conjunctive reading).
    pub fn is_implied_by<F>(&self, value_of: F) -> bool
    where
        F: Fn(VarId) -> bool,
    {
        self.literals
            .iter()
            .all(|l| value_of(l.var_id()) == l.polarity())
    }
}

pub(crate) fn is_lit_vec_included(first: &[Literal], other: &[Literal]) -> bool {
    let mut j = 0;
    for l in first.iter() {
        while j < other.len() && other[j] < *l {
            j += 1;
        }
        if j == other.len() || &other[j] != l {
            return false;
        }
    }
    true
}

impl Subsumable<Clause> for Clause {
    fn subsumes(&self, other: &Clause) -> bool {
        is_lit_vec_included(self.as_literals(), other.as_literals())
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Clause::new(literals)
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Clause::new(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for l in self.literals.iter() {
            write!(f, "{} ", l)?;
        }
        write!(f, "0")
    }
}
