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

mod cardinality;

mod distributive_clausifier;
pub use distributive_clausifier::DistributiveClausifier;

mod nnf_simplifier;
pub use nnf_simplifier::NnfSimplifier;

mod normal_form;
pub use normal_form::NormalFormComputation;

mod normal_form_config;
pub use normal_form_config::ClausificationStrategy;
pub use normal_form_config::NormalForm;
pub use normal_form_config::NormalFormConfig;
pub use normal_form_config::DEFAULT_AUXILIARY_PREFIX;

mod tseitin_clausifier;
pub use tseitin_clausifier::Substitute;
pub use tseitin_clausifier::TseitinClausifier;
