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

use super::normal_form_config::DEFAULT_AUXILIARY_PREFIX;
use crate::{ClausalError, Clause, ClauseList, Cnf, FormulaNode, Literal, Result, VarId, VariableMap};
use log::debug;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// The clauses introduced by the Tseitin encoding for a subformula.
///
/// When the subformula is nested in another connective, an auxiliary variable is introduced,
/// and the clauses state that this variable is equivalent to the subformula.
/// When the subformula is asserted (the formula itself, or a conjunct of an asserted conjunction),
/// there is no auxiliary variable and the clauses state the subformula directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Substitute {
    expression: FormulaNode,
    variable: Option<VarId>,
    clauses: ClauseList,
}

impl Substitute {
    /// Returns the subformula this substitute encodes.
    pub fn expression(&self) -> &FormulaNode {
        &self.expression
    }

    /// Returns the auxiliary variable introduced for the subformula, if any.
    pub fn variable(&self) -> Option<VarId> {
        self.variable
    }

    /// Returns the clauses of this substitute.
    ///
    /// If an auxiliary variable was introduced, the clauses state its equivalence with the subformula.
    pub fn clauses(&self) -> &ClauseList {
        &self.clauses
    }

    /// Concatenates the clauses of substitutes, in the order they are given.
    pub fn concatenate(substitutes: &[Substitute]) -> ClauseList {
        substitutes
            .iter()
            .flat_map(|s| s.clauses.iter().cloned())
            .collect()
    }
}

/// A structure used to translate a formula in negation normal form into an equisatisfiable CNF by adding auxiliary variables.
///
/// Each conjunction or disjunction nested in another connective is replaced by a fresh auxiliary variable,
/// which gets defined by clauses.
/// The size of the result is linear in the size of the formula.
/// The formula is put in a canonical form before being encoded,
/// so that two runs on equal formulas produce the same auxiliary variables.
///
/// Auxiliary variables are named by a prefix (`_tseitin_` by default) followed by a number beginning at `1`;
/// names that are already in use are skipped.
///
/// # Examples
///
/// ```
/// use crusti_clausal::{FormulaNode, TseitinClausifier, VariableMap};
///
/// let f = FormulaNode::or(vec![
///     FormulaNode::and(vec![FormulaNode::var("a"), FormulaNode::var("b")]),
///     FormulaNode::var("c"),
/// ]);
/// let cnf = TseitinClausifier::new().encode_to_cnf(&f, VariableMap::from_formula(&f)).unwrap();
/// assert_eq!(
///     "and(or(-_tseitin_1, a), or(-_tseitin_1, b), or(-b, -a, _tseitin_1), or(c, _tseitin_1))",
///     format!("{}", cnf)
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TseitinClausifier {
    auxiliary_prefix: String,
    share_subexpressions: bool,
}

impl Default for TseitinClausifier {
    fn default() -> Self {
        TseitinClausifier {
            auxiliary_prefix: DEFAULT_AUXILIARY_PREFIX.to_string(),
            share_subexpressions: false,
        }
    }
}

impl TseitinClausifier {
    pub fn new() -> Self {
        TseitinClausifier::default()
    }

    /// Sets the prefix of the names of the auxiliary variables.
    #[must_use]
    pub fn with_auxiliary_prefix(mut self, prefix: &str) -> Self {
        self.auxiliary_prefix = prefix.to_string();
        self
    }

    /// Sets whether structurally equal subformulas share a single auxiliary variable.
    ///
    /// When disabled (the default), each occurrence of a subformula gets its own auxiliary variable.
    #[must_use]
    pub fn with_shared_subexpressions(mut self, share: bool) -> Self {
        self.share_subexpressions = share;
        self
    }

    /// Encodes a formula in negation normal form, returning the substitutes in dependency order.
    ///
    /// The substitute defining an auxiliary variable always comes before the substitutes using it.
    /// The variables of the formula and the auxiliary variables are added to the map.
    ///
    /// A [`MalformedInput`](ClausalError::MalformedInput) error is returned if the formula is not in NNF;
    /// the map is then left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::{FormulaNode, Substitute, TseitinClausifier, VariableMap};
    ///
    /// let f = FormulaNode::and(vec![
    ///     FormulaNode::or(vec![FormulaNode::var("a"), FormulaNode::var("b")]),
    ///     FormulaNode::or(vec![FormulaNode::lit("a", false), FormulaNode::lit("b", false)]),
    /// ]);
    /// let mut map = VariableMap::new();
    /// let substitutes = TseitinClausifier::new().encode(&f, &mut map).unwrap();
    /// assert!(substitutes.iter().all(|s| s.variable().is_none()));
    /// assert_eq!(2, Substitute::concatenate(&substitutes).len());
    /// ```
    pub fn encode(&self, formula: &FormulaNode, map: &mut VariableMap) -> Result<Vec<Substitute>> {
        let canonical = formula.canonical();
        let mut encoder = Encoder {
            map: map.clone(),
            prefix: &self.auxiliary_prefix,
            next_auxiliary: 1,
            n_auxiliaries: 0,
            cache: if self.share_subexpressions {
                Some(FxHashMap::default())
            } else {
                None
            },
            substitutes: Vec::new(),
        };
        encoder.encode_root(&canonical)?;
        debug!(
            "Tseitin encoding computed: {} substitute(s), {} auxiliary variable(s)",
            encoder.substitutes.len(),
            encoder.n_auxiliaries
        );
        *map = encoder.map;
        Ok(encoder.substitutes)
    }

    /// Encodes a formula in negation normal form into a [`Cnf`], using the given map as initial numbering.
    pub fn encode_to_cnf(&self, formula: &FormulaNode, map: VariableMap) -> Result<Cnf> {
        let mut map = map;
        let substitutes = self.encode(formula, &mut map)?;
        Ok(Cnf::from_data_unchecked(
            Arc::new(map),
            Substitute::concatenate(&substitutes),
        ))
    }
}

struct Encoder<'a> {
    map: VariableMap,
    prefix: &'a str,
    next_auxiliary: usize,
    n_auxiliaries: usize,
    cache: Option<FxHashMap<FormulaNode, VarId>>,
    substitutes: Vec<Substitute>,
}

enum Frame<'a> {
    Enter(&'a FormulaNode),
    Exit(&'a FormulaNode, &'a [FormulaNode]),
}

impl Encoder<'_> {
    fn encode_root(&mut self, root: &FormulaNode) -> Result<()> {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            match node {
                FormulaNode::True => {}
                FormulaNode::False => self.push_asserted(node, vec![Clause::default()]),
                FormulaNode::Lit(_, _) => {
                    let literal = self.encode_node(node)?;
                    self.push_asserted(node, vec![Clause::from_sorted_unchecked(vec![literal])]);
                }
                FormulaNode::And(children) => stack.extend(children.iter().rev()),
                FormulaNode::Or(children) => {
                    let literals = children
                        .iter()
                        .map(|c| self.encode_node(c))
                        .collect::<Result<Vec<Literal>>>()?;
                    self.push_asserted(node, vec![Clause::new(literals)]);
                }
                _ => return Err(unexpected_node(node)),
            }
        }
        Ok(())
    }

    // Children are encoded before their parents, so auxiliary variables are numbered bottom-up.
    fn encode_node(&mut self, root: &FormulaNode) -> Result<Literal> {
        let mut stack = vec![Frame::Enter(root)];
        let mut literals: Vec<Literal> = Vec::new();
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(node) => {
                    if let FormulaNode::Lit(name, polarity) = node {
                        literals.push(Literal::new(self.map.add(name.as_str()), *polarity));
                        continue;
                    }
                    if let Some(v) = self.cache.as_ref().and_then(|c| c.get(node)) {
                        literals.push(Literal::new(*v, true));
                        continue;
                    }
                    match node {
                        FormulaNode::True | FormulaNode::False => {
                            let v = self.new_auxiliary();
                            let literal = Literal::new(v, matches!(node, FormulaNode::True));
                            self.define(node, v, vec![Clause::from_sorted_unchecked(vec![literal])]);
                            literals.push(Literal::new(v, true));
                        }
                        FormulaNode::And(children) | FormulaNode::Or(children) => {
                            stack.push(Frame::Exit(node, children));
                            stack.extend(children.iter().rev().map(Frame::Enter));
                        }
                        _ => return Err(unexpected_node(node)),
                    }
                }
                Frame::Exit(node, children) => {
                    let children_lits = literals.split_off(literals.len() - children.len());
                    let v = self.new_auxiliary();
                    let (pos_lit, neg_lit) = (Literal::new(v, true), Literal::new(v, false));
                    let clauses = if let FormulaNode::And(_) = node {
                        let mut clauses = children_lits
                            .iter()
                            .map(|c| Clause::new(vec![neg_lit, *c]))
                            .collect::<Vec<Clause>>();
                        clauses.push(
                            std::iter::once(pos_lit)
                                .chain(children_lits.iter().map(Literal::negate))
                                .collect(),
                        );
                        clauses
                    } else {
                        let mut clauses = children_lits
                            .iter()
                            .map(|c| Clause::new(vec![pos_lit, c.negate()]))
                            .collect::<Vec<Clause>>();
                        clauses.push(
                            std::iter::once(neg_lit)
                                .chain(children_lits.into_iter())
                                .collect(),
                        );
                        clauses
                    };
                    self.define(node, v, clauses);
                    literals.push(pos_lit);
                }
            }
        }
        Ok(literals[0])
    }

    fn define(&mut self, node: &FormulaNode, v: VarId, clauses: Vec<Clause>) {
        self.substitutes.push(Substitute {
            expression: node.clone(),
            variable: Some(v),
            clauses: ClauseList::new(clauses),
        });
        if let Some(cache) = self.cache.as_mut() {
            cache.insert(node.clone(), v);
        }
    }

    fn new_auxiliary(&mut self) -> VarId {
        loop {
            let name = format!("{}{}", self.prefix, self.next_auxiliary);
            self.next_auxiliary += 1;
            if !self.map.contains_name(&name) {
                self.n_auxiliaries += 1;
                return self.map.add(name);
            }
        }
    }

    fn push_asserted(&mut self, node: &FormulaNode, clauses: Vec<Clause>) {
        self.substitutes.push(Substitute {
            expression: node.clone(),
            variable: None,
            clauses: ClauseList::new(clauses),
        });
    }
}

fn unexpected_node(node: &FormulaNode) -> ClausalError {
    ClausalError::malformed(format!(
        "unexpected {} node in a formula in negation normal form",
        node.kind()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> FormulaNode {
        FormulaNode::var(name)
    }

    fn neg(name: &str) -> FormulaNode {
        FormulaNode::lit(name, false)
    }

    fn encode(f: &FormulaNode) -> String {
        format!(
            "{}",
            TseitinClausifier::new()
                .encode_to_cnf(f, VariableMap::from_formula(f))
                .unwrap()
        )
    }

    #[test]
    fn test_flat_cnf_needs_no_auxiliary() {
        let f = FormulaNode::and(vec![
            FormulaNode::or(vec![var("a"), var("b")]),
            FormulaNode::or(vec![neg("a"), neg("b")]),
        ]);
        let mut map = VariableMap::new();
        let substitutes = TseitinClausifier::new().encode(&f, &mut map).unwrap();
        assert_eq!(2, map.len());
        assert!(substitutes.iter().all(|s| s.variable().is_none()));
        assert_eq!(
            ClauseList::from_dimacs(&[vec![-2, -1], vec![1, 2]]).unwrap(),
            Substitute::concatenate(&substitutes)
        );
    }

    #[test]
    fn test_nested_and() {
        assert_eq!(
            "and(or(-_tseitin_1, a), or(-_tseitin_1, b), or(-a, -b, _tseitin_1), or(c, _tseitin_1))",
            encode(&FormulaNode::or(vec![
                var("c"),
                FormulaNode::and(vec![var("b"), var("a")]),
            ]))
        );
    }

    #[test]
    fn test_nested_or() {
        let f = FormulaNode::or(vec![
            var("a"),
            FormulaNode::and(vec![var("b"), FormulaNode::or(vec![var("c"), var("d")])]),
        ]);
        let mut map = VariableMap::new();
        let substitutes = TseitinClausifier::new().encode(&f, &mut map).unwrap();
        assert_eq!(3, substitutes.len());
        let or_var = substitutes[0].variable().unwrap();
        let and_var = substitutes[1].variable().unwrap();
        assert_eq!(Some("_tseitin_1"), map.name_of(or_var));
        assert_eq!(Some("_tseitin_2"), map.name_of(and_var));
        assert_eq!(
            "or(c, d)",
            format!("{}", substitutes[0].expression())
        );
        assert_eq!(None, substitutes[2].variable());
        assert_eq!(
            "and(or(-c, _tseitin_1), or(-d, _tseitin_1), or(-_tseitin_1, c, d))",
            format!(
                "{}",
                substitutes[0]
                    .clauses()
                    .to_formula(crate::NormalForm::Cnf, &map)
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_asserted_constants_and_literals() {
        assert_eq!("and()", encode(&FormulaNode::True));
        assert_eq!("and(or())", encode(&FormulaNode::False));
        assert_eq!("and(or(-a))", encode(&neg("a")));
        assert_eq!(
            "and(or(a), or(-b))",
            encode(&FormulaNode::and(vec![var("a"), neg("b")]))
        );
    }

    #[test]
    fn test_nested_constant() {
        let f = FormulaNode::or(vec![var("a"), FormulaNode::False]);
        assert_eq!("and(or(-_tseitin_1), or(a, _tseitin_1))", encode(&f));
    }

    #[test]
    fn test_auxiliary_names_skip_used_ones() {
        let f = FormulaNode::or(vec![
            var("_tseitin_1"),
            FormulaNode::and(vec![var("a"), var("b")]),
        ]);
        let mut map = VariableMap::new();
        let substitutes = TseitinClausifier::new().encode(&f, &mut map).unwrap();
        assert_eq!(Some("_tseitin_2"), map.name_of(substitutes[0].variable().unwrap()));
    }

    #[test]
    fn test_custom_prefix() {
        let f = FormulaNode::or(vec![var("c"), FormulaNode::and(vec![var("a"), var("b")])]);
        let mut map = VariableMap::new();
        TseitinClausifier::new()
            .with_auxiliary_prefix("aux")
            .encode(&f, &mut map)
            .unwrap();
        assert!(map.contains_name("aux1"));
    }

    #[test]
    fn test_deterministic_numbering() {
        let f1 = FormulaNode::or(vec![
            FormulaNode::and(vec![var("a"), var("b")]),
            FormulaNode::and(vec![var("c"), neg("d")]),
        ]);
        let f2 = FormulaNode::or(vec![
            FormulaNode::and(vec![neg("d"), var("c")]),
            FormulaNode::and(vec![var("b"), var("a")]),
        ]);
        let clausifier = TseitinClausifier::new();
        assert_eq!(
            clausifier.encode_to_cnf(&f1, VariableMap::new()).unwrap(),
            clausifier.encode_to_cnf(&f2, VariableMap::new()).unwrap()
        );
    }

    #[test]
    fn test_shared_subexpressions() {
        let ab = FormulaNode::and(vec![var("a"), var("b")]);
        let f = FormulaNode::and(vec![
            FormulaNode::or(vec![var("c"), ab.clone()]),
            FormulaNode::or(vec![var("d"), ab]),
        ]);
        let mut map = VariableMap::new();
        let unshared = TseitinClausifier::new().encode(&f, &mut map).unwrap();
        assert_eq!(4, unshared.len());
        let mut map = VariableMap::new();
        let shared = TseitinClausifier::new()
            .with_shared_subexpressions(true)
            .encode(&f, &mut map)
            .unwrap();
        assert_eq!(3, shared.len());
        assert_eq!(1, shared.iter().filter(|s| s.variable().is_some()).count());
    }

    #[test]
    fn test_malformed_input() {
        let mut map = VariableMap::from_names(vec!["z"]);
        let f = FormulaNode::or(vec![var("a"), FormulaNode::implies(var("b"), var("c"))]);
        assert!(matches!(
            TseitinClausifier::new().encode(&f, &mut map),
            Err(ClausalError::MalformedInput { .. })
        ));
        assert_eq!(VariableMap::from_names(vec!["z"]), map);
    }
}
