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

use crate::{ClausalError, Result};
use std::{convert::TryFrom, num::NonZeroUsize};

/// A variable identifier, that is the index of a variable in a [`VariableMap`](crate::VariableMap).
///
/// Indices begin at `1`.
///
/// # Examples
///
/// ```
/// use crusti_clausal::VarId;
///
/// assert_eq!(3, usize::from(VarId::new(3).unwrap()));
/// assert!(VarId::new(0).is_none());
/// ```
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct VarId(NonZeroUsize);

impl VarId {
    /// Builds a variable identifier, returning `None` for the forbidden index `0`.
    pub fn new(index: usize) -> Option<Self> {
        NonZeroUsize::new(index).map(VarId)
    }

    pub(crate) fn from_non_zero(index: NonZeroUsize) -> Self {
        VarId(index)
    }

    /// Returns the index of this variable.
    pub fn index(self) -> usize {
        self.0.get()
    }
}

impl From<VarId> for usize {
    fn from(v: VarId) -> Self {
        v.index()
    }
}

impl std::fmt::Display for VarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A literal, composed by a [`VarId`] and a `bool` (its polarity).
///
/// # Order
///
/// Literals are ordered like their signed integer representation (see [`to_isize`](Literal::to_isize)).
/// Sorting literals thus puts the negative ones first, by decreasing variable index,
/// followed by the positive ones, by increasing variable index.
///
/// # Examples
///
/// ```
/// use crusti_clausal::Literal;
/// use std::convert::TryFrom;
///
/// let mut lits = vec![
///     Literal::try_from(2).unwrap(),
///     Literal::try_from(-1).unwrap(),
///     Literal::try_from(-3).unwrap(),
/// ];
/// lits.sort();
/// assert_eq!(vec![-3, -1, 2], lits.iter().map(|l| l.to_isize()).collect::<Vec<isize>>());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal(VarId, bool);

impl Literal {
    /// Builds a new literal, given its [`VarId`] and its polarity as a `bool`.
    pub fn new(var_id: VarId, polarity: bool) -> Self {
        Literal(var_id, polarity)
    }

    /// Returns the negation of the literal, as a new `Literal`.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::{Literal, VarId};
    ///
    /// let v = VarId::new(1).unwrap();
    /// let l = Literal::new(v, true);
    /// assert_eq!(Literal::new(v, false), l.negate())
    /// ```
    pub fn negate(&self) -> Self {
        Literal(self.0, !self.1)
    }

    /// Checks if a literal is the negation of this literal.
    pub fn is_negation_of(&self, other: &Literal) -> bool {
        self.0 == other.0 && self.1 != other.1
    }

    /// Returns the [`VarId`] of this literal.
    pub fn var_id(&self) -> VarId {
        self.0
    }

    /// Returns the polarity of this literal.
    pub fn polarity(&self) -> bool {
        self.1
    }

    /// Returns the signed integer representation of this literal:
    /// its variable index, negated if the polarity is negative.
    pub fn to_isize(&self) -> isize {
        let index = self.0.index() as isize;
        if self.1 {
            index
        } else {
            -index
        }
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_isize().cmp(&other.to_isize())
    }
}

impl TryFrom<isize> for Literal {
    type Error = ClausalError;

    fn try_from(value: isize) -> Result<Self> {
        VarId::new(value.unsigned_abs())
            .map(|v| Literal::new(v, value > 0))
            .ok_or_else(|| ClausalError::malformed("0 is not a literal"))
    }
}

impl From<(VarId, bool)> for Literal {
    fn from(couple: (VarId, bool)) -> Self {
        Literal::new(couple.0, couple.1)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_isize())
    }
}
