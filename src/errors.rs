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

use thiserror::Error;

/// The errors returned by the normalization and clausification algorithms.
///
/// None of them is fatal: the structures involved are left in their state before the failing call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClausalError {
    /// A variable (given by its name, or by `#index` when no name is known) is missing from a [`VariableMap`](crate::VariableMap).
    #[error("unknown variable: {variable}")]
    UnknownVariable { variable: String },
    /// The distributive clausification emitted more literals than allowed.
    #[error("literal budget of {limit} exceeded")]
    LiteralBudgetExceeded { limit: usize },
    /// A node or a value appeared where it is not structurally valid.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },
    /// A variable name is already in use.
    #[error("variable name already in use: {variable}")]
    DuplicateVariable { variable: String },
}

impl ClausalError {
    pub(crate) fn unknown_variable<T>(variable: T) -> Self
    where
        T: Into<String>,
    {
        ClausalError::UnknownVariable {
            variable: variable.into(),
        }
    }

    pub(crate) fn malformed<T>(reason: T) -> Self
    where
        T: Into<String>,
    {
        ClausalError::MalformedInput {
            reason: reason.into(),
        }
    }
}

/// A `Result` alias where the error type is [`ClausalError`].
pub type Result<T> = std::result::Result<T, ClausalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            "unknown variable: a",
            format!("{}", ClausalError::unknown_variable("a"))
        );
        assert_eq!(
            "literal budget of 10 exceeded",
            format!("{}", ClausalError::LiteralBudgetExceeded { limit: 10 })
        );
        assert_eq!(
            "malformed input: unexpected implies",
            format!("{}", ClausalError::malformed("unexpected implies"))
        );
    }
}
