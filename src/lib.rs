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

mod core;
mod errors;
mod languages;
mod queries;
mod transformations;

pub use crate::core::DefaultDisplay;
pub use crate::core::FormulaNode;
pub use crate::core::FormulaNodeKind;
pub use crate::core::Literal;
pub use crate::core::VarId;
pub use crate::core::VariableMap;

pub use errors::ClausalError;
pub use errors::Result;

pub use languages::Clause;
pub use languages::ClauseList;
pub use languages::Cnf;

pub use queries::Subsumable;

pub use transformations::ClausificationStrategy;
pub use transformations::DistributiveClausifier;
pub use transformations::NnfSimplifier;
pub use transformations::NormalForm;
pub use transformations::NormalFormComputation;
pub use transformations::NormalFormConfig;
pub use transformations::Substitute;
pub use transformations::TseitinClausifier;
pub use transformations::DEFAULT_AUXILIARY_PREFIX;
