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

use crusti_clausal::{
    ClausalError, Cnf, DistributiveClausifier, FormulaNode, NnfSimplifier, NormalForm,
    NormalFormComputation, NormalFormConfig, Substitute, Subsumable, TseitinClausifier,
    VariableMap,
};
use proptest::prelude::*;
use std::sync::Arc;

const NAMES: [&str; 5] = ["a", "b", "c", "d", "e"];

fn arb_leaf() -> impl Strategy<Value = FormulaNode> {
    prop_oneof![
        6 => (prop::sample::select(NAMES.to_vec()), any::<bool>())
            .prop_map(|(name, polarity)| FormulaNode::lit(name, polarity)),
        1 => Just(FormulaNode::True),
        1 => Just(FormulaNode::False),
    ]
}

fn arb_formula() -> impl Strategy<Value = FormulaNode> {
    arb_leaf().prop_recursive(3, 24, 3, |inner| {
        let children = prop::collection::vec(inner.clone(), 0..4);
        prop_oneof![
            inner.clone().prop_map(FormulaNode::not),
            children.clone().prop_map(FormulaNode::and),
            children.clone().prop_map(FormulaNode::or),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| FormulaNode::implies(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| FormulaNode::bi_implies(l, r)),
            (0..4usize, children.clone()).prop_map(|(k, c)| FormulaNode::at_least(k, c)),
            (0..4usize, children.clone()).prop_map(|(k, c)| FormulaNode::at_most(k, c)),
            (0..4usize, children.clone()).prop_map(|(k, c)| FormulaNode::exactly(k, c)),
            (0..4usize, 0..4usize, children).prop_map(|(min, max, c)| FormulaNode::between(min, max, c)),
        ]
    })
}

// evaluates a formula under the assignment encoded by the bits of `bits` (bit i is the value of NAMES[i])
fn eval(formula: &FormulaNode, bits: usize) -> Option<bool> {
    formula.evaluate(&|name: &str| NAMES.iter().position(|n| *n == name).map(|i| bits & (1 << i) != 0))
}

fn all_assignments() -> std::ops::Range<usize> {
    0..(1 << NAMES.len())
}

proptest! {
    #[test]
    fn prop_nnf_is_equivalent(f in arb_formula()) {
        let nnf = NnfSimplifier::new().simplify(&f);
        prop_assert!(nnf.is_nnf(), "{} is not in NNF", nnf);
        for bits in all_assignments() {
            prop_assert_eq!(eval(&f, bits), eval(&nnf, bits), "{} / {} differ on {:b}", f, nnf, bits);
        }
    }

    #[test]
    fn prop_nnf_is_idempotent(f in arb_formula()) {
        let simplifier = NnfSimplifier::new();
        let nnf = simplifier.simplify(&f);
        prop_assert_eq!(nnf.clone(), simplifier.simplify(&nnf));
    }

    #[test]
    fn prop_distributive_cnf_is_equivalent_and_minimal(f in arb_formula()) {
        let nnf = NnfSimplifier::new().simplify(&f);
        let mut map = VariableMap::new();
        let clauses = match DistributiveClausifier::new(NormalForm::Cnf)
            .with_literal_budget(20_000)
            .clausify_indexed(&nnf, &mut map)
        {
            Ok(c) => c,
            Err(ClausalError::LiteralBudgetExceeded { .. }) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(format!("{}", e))),
        };
        let as_tree = clauses.to_formula(NormalForm::Cnf, &map).unwrap();
        prop_assert!(as_tree.is_clausal_cnf());
        for bits in all_assignments() {
            prop_assert_eq!(eval(&f, bits), eval(&as_tree, bits), "{} / {} differ on {:b}", f, as_tree, bits);
        }
        let all = clauses.as_clauses();
        for (i, c) in all.iter().enumerate() {
            prop_assert!(c.as_literals().windows(2).all(|w| w[0] < w[1]), "unsorted clause {}", c);
            prop_assert!(!c.is_tautology(), "tautology {}", c);
            for (j, other) in all.iter().enumerate() {
                prop_assert!(i == j || !c.subsumes(other), "{} subsumes {}", c, other);
            }
        }
    }

    #[test]
    fn prop_distributive_dnf_is_equivalent(f in arb_formula()) {
        let nnf = NnfSimplifier::new().simplify(&f);
        let dnf = match DistributiveClausifier::new(NormalForm::Dnf)
            .with_literal_budget(20_000)
            .clausify(&nnf)
        {
            Ok(d) => d,
            Err(ClausalError::LiteralBudgetExceeded { .. }) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(format!("{}", e))),
        };
        prop_assert!(dnf.is_clausal_dnf());
        for bits in all_assignments() {
            prop_assert_eq!(eval(&f, bits), eval(&dnf, bits));
        }
    }

    #[test]
    fn prop_budget_is_exceeded_iff_lower_than_literal_count(f in arb_formula(), dnf in any::<bool>()) {
        let form = if dnf { NormalForm::Dnf } else { NormalForm::Cnf };
        let nnf = NnfSimplifier::new().simplify(&f);
        let clausifier = DistributiveClausifier::new(form);
        let count = clausifier.count_literals(&nnf).unwrap();
        let unbounded = clausifier.clausify(&nnf).unwrap();
        prop_assert_eq!(Ok(unbounded), clausifier.with_literal_budget(count).clausify(&nnf));
        if count > 0 {
            prop_assert_eq!(
                Err(ClausalError::LiteralBudgetExceeded { limit: count - 1 }),
                clausifier.with_literal_budget(count - 1).clausify(&nnf)
            );
        }
    }

    #[test]
    fn prop_tseitin_models_extend(f in arb_formula()) {
        let nnf = NnfSimplifier::new().simplify(&f);
        let mut map = VariableMap::from_names(NAMES.iter().copied());
        let substitutes = TseitinClausifier::new().encode(&nnf, &mut map).unwrap();
        let cnf = Cnf::new(Arc::new(map), Substitute::concatenate(&substitutes)).unwrap();
        for bits in all_assignments() {
            if eval(&f, bits) != Some(true) {
                continue;
            }
            // each auxiliary variable takes the value of the subformula it stands for
            let value_of = |name: &str| {
                if let Some(i) = NAMES.iter().position(|n| *n == name) {
                    return bits & (1 << i) != 0;
                }
                substitutes
                    .iter()
                    .find(|s| s.variable().and_then(|v| cnf.variable_map().name_of(v)) == Some(name))
                    .and_then(|s| eval(s.expression(), bits))
                    .unwrap_or(false)
            };
            prop_assert!(cnf.evaluate(value_of), "model {:b} of {} is not extended in {}", bits, f, cnf);
        }
    }

    #[test]
    fn prop_tseitin_models_project(f in arb_formula()) {
        let nnf = NnfSimplifier::new().simplify(&f);
        let cnf = TseitinClausifier::new()
            .encode_to_cnf(&nnf, VariableMap::from_names(NAMES.iter().copied()))
            .unwrap();
        let n_vars = cnf.variable_map().len();
        if n_vars > 12 {
            return Ok(());
        }
        let names = cnf.variable_map().names().map(str::to_string).collect::<Vec<String>>();
        for bits in 0..(1usize << n_vars) {
            let value_of = |name: &str| {
                names
                    .iter()
                    .position(|n| n == name)
                    .map(|i| bits & (1 << i) != 0)
                    .unwrap_or(false)
            };
            if cnf.evaluate(value_of) {
                // the original variables come first in the map
                let projection = bits & ((1 << NAMES.len()) - 1);
                prop_assert_eq!(Some(true), eval(&f, projection), "{} has a spurious model", cnf);
            }
        }
    }

    #[test]
    fn prop_pipeline_numbers_variables_in_order(f in arb_formula()) {
        let config = NormalFormConfig::default().with_literal_budget(Some(200));
        let cnf = NormalFormComputation::new(config).compute_cnf(&f).unwrap();
        let mut expected = Vec::new();
        for v in f.variables() {
            if !expected.contains(&v) {
                expected.push(v);
            }
        }
        let actual = cnf
            .variable_map()
            .names()
            .take(expected.len())
            .map(str::to_string)
            .collect::<Vec<String>>();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn prop_variable_map_round_trip(names in prop::collection::vec("[a-z]{1,3}", 0..12)) {
        let map = VariableMap::from_names(names.iter().cloned());
        for (v, name) in map.iter() {
            prop_assert_eq!(Some(v), map.index_of(name));
            prop_assert_eq!(Some(name), map.name_of(v));
        }
        for name in &names {
            prop_assert!(map.contains_name(name));
        }
        prop_assert_eq!(map.clone(), VariableMap::merge(&[&map]));
    }
}
