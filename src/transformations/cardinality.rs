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

/// Calls `f` on each subset of size `k` of `0..n`, in lexicographic order.
pub(crate) fn for_each_k_subset<F>(n: usize, k: usize, mut f: F)
where
    F: FnMut(&[usize]),
{
    if k > n {
        return;
    }
    let mut indices = (0..k).collect::<Vec<usize>>();
    loop {
        f(&indices);
        let mut i = k;
        loop {
            if i == 0 {
                return;
            }
            i -= 1;
            if indices[i] < n - k + i {
                break;
            }
        }
        indices[i] += 1;
        for j in i + 1..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

/// How a cardinality constraint over `n` children is written with conjunctions and disjunctions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Expansion {
    /// The constraint is a constant.
    Constant(bool),
    /// The constraint is the conjunction, over all the subsets of `subset_size` children,
    /// of the disjunction of these children (or of their negations if `negated` is set).
    Subsets { subset_size: usize, negated: bool },
}

/// Rewrites "at least `k` children hold".
///
/// At least `k` children hold iff each subset of `n - k + 1` children contains a child that holds.
pub(crate) fn at_least(k: usize, n: usize) -> Expansion {
    if k == 0 {
        Expansion::Constant(true)
    } else if k > n {
        Expansion::Constant(false)
    } else {
        Expansion::Subsets {
            subset_size: n - k + 1,
            negated: false,
        }
    }
}

/// Rewrites "at most `k` children hold".
///
/// At most `k` children hold iff each subset of `k + 1` children contains a child that does not hold.
pub(crate) fn at_most(k: usize, n: usize) -> Expansion {
    if k >= n {
        Expansion::Constant(true)
    } else {
        Expansion::Subsets {
            subset_size: k + 1,
            negated: true,
        }
    }
}

/// Rewrites "less than `k` children hold", the negation of [`at_least`].
pub(crate) fn less_than(k: usize, n: usize) -> Expansion {
    match k.checked_sub(1) {
        Some(max) => at_most(max, n),
        None => Expansion::Constant(false),
    }
}

/// Rewrites "more than `k` children hold", the negation of [`at_most`].
pub(crate) fn more_than(k: usize, n: usize) -> Expansion {
    at_least(k.saturating_add(1), n)
}
