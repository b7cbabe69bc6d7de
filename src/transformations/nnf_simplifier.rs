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

use super::cardinality::{self, Expansion};
use crate::FormulaNode;
use log::trace;

/// A structure used to rewrite any formula into an equivalent one in negation normal form.
///
/// The result is only made of literals, conjunctions and disjunctions,
/// except if the formula simplifies into a constant, in which case the result is this single constant.
/// Nested conjunctions (resp. disjunctions) are flattened, and conjunctions or disjunctions never have a single child.
///
/// The elimination of implications, equivalences and cardinality connectives,
/// the application of De Morgan's laws, the propagation of constants
/// and the flattening of conjunctions and disjunctions are applied in a single bottom-up pass
/// whose result is the fixpoint of these rewritings.
/// The traversal uses an explicit stack, so the depth of the formula is not bounded by the call stack.
///
/// # Examples
///
/// ```
/// use crusti_clausal::{FormulaNode, NnfSimplifier};
///
/// let f = FormulaNode::implies(
///     FormulaNode::var("a"),
///     FormulaNode::or(vec![FormulaNode::var("b"), FormulaNode::var("c")]),
/// );
/// let nnf = NnfSimplifier::new().simplify(&f);
/// assert_eq!("or(-a, b, c)", format!("{}", nnf));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NnfSimplifier;

impl NnfSimplifier {
    pub fn new() -> Self {
        NnfSimplifier
    }

    /// Computes the negation normal form of a formula.
    ///
    /// The formula given as parameter is left untouched.
    pub fn simplify(&self, formula: &FormulaNode) -> FormulaNode {
        let mut stack = vec![Frame::Enter(formula, true)];
        let mut results: Vec<FormulaNode> = Vec::new();
        let mut n_visited = 0;
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(node, positive) => {
                    n_visited += 1;
                    match rewrite(node, positive) {
                        Rewriting::Done(result) => results.push(result),
                        Rewriting::Frames(frames) => stack.extend(frames.into_iter().rev()),
                    }
                }
                Frame::Constant(value) => results.push(constant(value)),
                Frame::Exit(operator, n_children) => {
                    let children = results.split_off(results.len() - n_children);
                    results.push(merge(operator, children));
                }
            }
        }
        let nnf = results.pop().unwrap_or(FormulaNode::True);
        trace!(
            "NNF computed after {} visit(s); formula has {} node(s)",
            n_visited,
            nnf.size()
        );
        nnf
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operator {
    And,
    Or,
}

impl Operator {
    fn with_polarity(self, positive: bool) -> Self {
        match (self, positive) {
            (_, true) => self,
            (Operator::And, false) => Operator::Or,
            (Operator::Or, false) => Operator::And,
        }
    }
}

// `Enter(node, false)` stands for the negation of `node`.
enum Frame<'a> {
    Enter(&'a FormulaNode, bool),
    Constant(bool),
    Exit(Operator, usize),
}

enum Rewriting<'a> {
    Done(FormulaNode),
    Frames(Vec<Frame<'a>>),
}

fn constant(value: bool) -> FormulaNode {
    if value {
        FormulaNode::True
    } else {
        FormulaNode::False
    }
}

fn enter(node: &FormulaNode, positive: bool) -> Vec<Frame<'_>> {
    vec![Frame::Enter(node, positive)]
}

fn combine(operator: Operator, operands: Vec<Vec<Frame<'_>>>) -> Vec<Frame<'_>> {
    let n_operands = operands.len();
    let mut frames = operands.into_iter().flatten().collect::<Vec<Frame>>();
    frames.push(Frame::Exit(operator, n_operands));
    frames
}

fn rewrite(node: &FormulaNode, positive: bool) -> Rewriting<'_> {
    let frames = match node {
        FormulaNode::True => return Rewriting::Done(constant(positive)),
        FormulaNode::False => return Rewriting::Done(constant(!positive)),
        FormulaNode::Lit(name, polarity) => {
            return Rewriting::Done(FormulaNode::lit(name.as_str(), *polarity == positive))
        }
        FormulaNode::Not(child) => enter(child, !positive),
        FormulaNode::And(children) => combine(
            Operator::And.with_polarity(positive),
            children.iter().map(|c| enter(c, positive)).collect(),
        ),
        FormulaNode::Or(children) => combine(
            Operator::Or.with_polarity(positive),
            children.iter().map(|c| enter(c, positive)).collect(),
        ),
        FormulaNode::Implies(left, right) => combine(
            Operator::Or.with_polarity(positive),
            vec![enter(left, !positive), enter(right, positive)],
        ),
        FormulaNode::BiImplies(left, right) => {
            let operator = Operator::And.with_polarity(positive);
            combine(
                operator,
                vec![
                    combine(
                        operator.with_polarity(false),
                        vec![enter(left, !positive), enter(right, positive)],
                    ),
                    combine(
                        operator.with_polarity(false),
                        vec![enter(right, !positive), enter(left, positive)],
                    ),
                ],
            )
        }
        FormulaNode::AtLeast(k, children) => {
            let n = children.len();
            let expansion = if positive {
                cardinality::at_least(*k, n)
            } else {
                cardinality::less_than(*k, n)
            };
            expand(expansion, children)
        }
        FormulaNode::AtMost(k, children) => {
            let n = children.len();
            let expansion = if positive {
                cardinality::at_most(*k, n)
            } else {
                cardinality::more_than(*k, n)
            };
            expand(expansion, children)
        }
        FormulaNode::Exactly(k, children) => between(*k, *k, children, positive),
        FormulaNode::Between(min, max, children) => between(*min, *max, children, positive),
    };
    Rewriting::Frames(frames)
}

fn between(min: usize, max: usize, children: &[FormulaNode], positive: bool) -> Vec<Frame<'_>> {
    let n = children.len();
    let (lower, upper) = if positive {
        (cardinality::at_least(min, n), cardinality::at_most(max, n))
    } else {
        (cardinality::less_than(min, n), cardinality::more_than(max, n))
    };
    combine(
        Operator::And.with_polarity(positive),
        vec![expand(lower, children), expand(upper, children)],
    )
}

fn expand(expansion: Expansion, children: &[FormulaNode]) -> Vec<Frame<'_>> {
    match expansion {
        Expansion::Constant(value) => vec![Frame::Constant(value)],
        Expansion::Subsets {
            subset_size,
            negated,
        } => {
            let mut disjunctions = Vec::new();
            cardinality::for_each_k_subset(children.len(), subset_size, |subset| {
                disjunctions.push(combine(
                    Operator::Or,
                    subset.iter().map(|i| enter(&children[*i], !negated)).collect(),
                ))
            });
            combine(Operator::And, disjunctions)
        }
    }
}

// Children are already simplified: constants are propagated
// and children with the same operator are merged into the result.
fn merge(operator: Operator, children: Vec<FormulaNode>) -> FormulaNode {
    let absorbing = operator == Operator::Or;
    let mut merged = Vec::with_capacity(children.len());
    for mut child in children {
        match child {
            FormulaNode::True | FormulaNode::False => {
                if matches!(child, FormulaNode::True) == absorbing {
                    return constant(absorbing);
                }
            }
            FormulaNode::And(_) if operator == Operator::And => {
                merged.append(&mut child.take_children())
            }
            FormulaNode::Or(_) if operator == Operator::Or => {
                merged.append(&mut child.take_children())
            }
            _ => merged.push(child),
        }
    }
    match merged.len() {
        0 => constant(!absorbing),
        1 => merged.remove(0),
        _ => match operator {
            Operator::And => FormulaNode::and(merged),
            Operator::Or => FormulaNode::or(merged),
        },
    }
}
