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

/// A trait for objects that may subsume other ones.
///
/// A clause subsumes another one if its literal set is included in the literal set of the other one;
/// the subsumed clause is then redundant in a conjunction holding both of them.
/// Read as terms of a disjunction, the same inclusion makes the larger term redundant.
pub trait Subsumable<T> {
    /// Returns `true` iff `self` subsumes `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::{Clause, Subsumable};
    ///
    /// let c1 = Clause::from_dimacs(&[-1, 3]).unwrap();
    /// let c2 = Clause::from_dimacs(&[-1, 2, 3]).unwrap();
    /// assert!(c1.subsumes(&c2));
    /// assert!(!c2.subsumes(&c1));
    /// ```
    fn subsumes(&self, other: &T) -> bool;
}
