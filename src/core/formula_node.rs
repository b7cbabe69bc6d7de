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

use rustc_hash::FxHashSet;
use std::{
    cmp::Ordering,
    fmt::Display,
    hash::{Hash, Hasher},
};

/// The kinds of nodes a [`FormulaNode`] can be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormulaNodeKind {
    /// The `true` constant
    True,
    /// The `false` constant
    False,
    /// A literal
    Lit,
    /// A negation
    Not,
    /// A conjunction
    And,
    /// A disjunction
    Or,
    /// An implication
    Implies,
    /// An equivalence
    BiImplies,
    /// An "at least k" cardinality connective
    AtLeast,
    /// An "at most k" cardinality connective
    AtMost,
    /// An "exactly k" cardinality connective
    Exactly,
    /// A "between min and max" cardinality connective
    Between,
}

impl Display for FormulaNodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FormulaNodeKind::True => "true",
            FormulaNodeKind::False => "false",
            FormulaNodeKind::Lit => "literal",
            FormulaNodeKind::Not => "not",
            FormulaNodeKind::And => "and",
            FormulaNodeKind::Or => "or",
            FormulaNodeKind::Implies => "implies",
            FormulaNodeKind::BiImplies => "equiv",
            FormulaNodeKind::AtLeast => "atleast",
            FormulaNodeKind::AtMost => "atmost",
            FormulaNodeKind::Exactly => "exactly",
            FormulaNodeKind::Between => "between",
        };
        write!(f, "{}", name)
    }
}

/// A propositional formula, given as an owned syntactic tree.
///
/// Literals refer to variables by their names.
/// Two formulas are equal iff their trees are.
/// Nodes are ordered by kind, then by their parameters, then by their children.
///
/// Copying, comparing, hashing, displaying and dropping a formula use explicit stacks,
/// so deep formulas do not exhaust the call stack.
#[derive(Debug)]
pub enum FormulaNode {
    /// The `true` constant
    True,
    /// The `false` constant
    False,
    /// A literal, given by its variable name and its polarity
    Lit(String, bool),
    /// A negation
    Not(Box<FormulaNode>),
    /// A conjunction
    And(Vec<FormulaNode>),
    /// A disjunction
    Or(Vec<FormulaNode>),
    /// An implication
    Implies(Box<FormulaNode>, Box<FormulaNode>),
    /// An equivalence
    BiImplies(Box<FormulaNode>, Box<FormulaNode>),
    /// Holds iff at least `k` children hold
    AtLeast(usize, Vec<FormulaNode>),
    /// Holds iff at most `k` children hold
    AtMost(usize, Vec<FormulaNode>),
    /// Holds iff exactly `k` children hold
    Exactly(usize, Vec<FormulaNode>),
    /// Holds iff the number of children that hold is between `min` and `max` (both included)
    Between(usize, usize, Vec<FormulaNode>),
}

impl FormulaNode {
    /// Builds a positive literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::FormulaNode;
    ///
    /// assert_eq!(Some(("a", true)), FormulaNode::var("a").is_literal());
    /// ```
    pub fn var<T>(name: T) -> Self
    where
        T: Into<String>,
    {
        FormulaNode::Lit(name.into(), true)
    }

    /// Builds a literal given its variable name and its polarity.
    pub fn lit<T>(name: T, polarity: bool) -> Self
    where
        T: Into<String>,
    {
        FormulaNode::Lit(name.into(), polarity)
    }

    /// Builds a negation.
    #[allow(clippy::should_implement_trait)]
    pub fn not(child: FormulaNode) -> Self {
        FormulaNode::Not(Box::new(child))
    }

    /// Builds a conjunction.
    pub fn and(children: Vec<FormulaNode>) -> Self {
        FormulaNode::And(children)
    }

    /// Builds a disjunction.
    pub fn or(children: Vec<FormulaNode>) -> Self {
        FormulaNode::Or(children)
    }

    /// Builds an implication.
    pub fn implies(left: FormulaNode, right: FormulaNode) -> Self {
        FormulaNode::Implies(Box::new(left), Box::new(right))
    }

    /// Builds an equivalence.
    pub fn bi_implies(left: FormulaNode, right: FormulaNode) -> Self {
        FormulaNode::BiImplies(Box::new(left), Box::new(right))
    }

    /// Builds an "at least k" cardinality connective.
    pub fn at_least(k: usize, children: Vec<FormulaNode>) -> Self {
        FormulaNode::AtLeast(k, children)
    }

    /// Builds an "at most k" cardinality connective.
    pub fn at_most(k: usize, children: Vec<FormulaNode>) -> Self {
        FormulaNode::AtMost(k, children)
    }

    /// Builds an "exactly k" cardinality connective.
    pub fn exactly(k: usize, children: Vec<FormulaNode>) -> Self {
        FormulaNode::Exactly(k, children)
    }

    /// Builds a "between min and max" cardinality connective.
    pub fn between(min: usize, max: usize, children: Vec<FormulaNode>) -> Self {
        FormulaNode::Between(min, max, children)
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> FormulaNodeKind {
        match self {
            FormulaNode::True => FormulaNodeKind::True,
            FormulaNode::False => FormulaNodeKind::False,
            FormulaNode::Lit(_, _) => FormulaNodeKind::Lit,
            FormulaNode::Not(_) => FormulaNodeKind::Not,
            FormulaNode::And(_) => FormulaNodeKind::And,
            FormulaNode::Or(_) => FormulaNodeKind::Or,
            FormulaNode::Implies(_, _) => FormulaNodeKind::Implies,
            FormulaNode::BiImplies(_, _) => FormulaNodeKind::BiImplies,
            FormulaNode::AtLeast(_, _) => FormulaNodeKind::AtLeast,
            FormulaNode::AtMost(_, _) => FormulaNodeKind::AtMost,
            FormulaNode::Exactly(_, _) => FormulaNodeKind::Exactly,
            FormulaNode::Between(_, _, _) => FormulaNodeKind::Between,
        }
    }

    /// Returns the children of this node, in order.
    pub fn children(&self) -> Vec<&FormulaNode> {
        match self {
            FormulaNode::True | FormulaNode::False | FormulaNode::Lit(_, _) => vec![],
            FormulaNode::Not(child) => vec![child.as_ref()],
            FormulaNode::Implies(left, right) | FormulaNode::BiImplies(left, right) => {
                vec![left.as_ref(), right.as_ref()]
            }
            FormulaNode::And(children)
            | FormulaNode::Or(children)
            | FormulaNode::AtLeast(_, children)
            | FormulaNode::AtMost(_, children)
            | FormulaNode::Exactly(_, children)
            | FormulaNode::Between(_, _, children) => children.iter().collect(),
        }
    }

    /// Returns the variable name and the polarity of this node if it is a literal.
    pub fn is_literal(&self) -> Option<(&str, bool)> {
        match self {
            FormulaNode::Lit(name, polarity) => Some((name.as_str(), *polarity)),
            _ => None,
        }
    }

    /// Returns the variable name of this node if it is a literal.
    pub fn variable_name(&self) -> Option<&str> {
        self.is_literal().map(|(name, _)| name)
    }

    /// Returns the names of the variables that appear in the formula rooted by this node.
    ///
    /// Each name appears once, in the order of its first occurrence in a preorder traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::FormulaNode;
    ///
    /// let f = FormulaNode::and(vec![
    ///     FormulaNode::or(vec![FormulaNode::var("b"), FormulaNode::lit("a", false)]),
    ///     FormulaNode::var("c"),
    ///     FormulaNode::var("a"),
    /// ]);
    /// assert_eq!(vec!["b", "a", "c"], f.variables());
    /// ```
    pub fn variables(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let FormulaNode::Lit(name, _) = node {
                if seen.insert(name.as_str()) {
                    result.push(name.clone());
                }
            }
            stack.extend(node.children().into_iter().rev());
        }
        result
    }

    /// Returns the number of nodes of the formula rooted by this node.
    pub fn size(&self) -> usize {
        let mut size = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            size += 1;
            stack.extend(node.children());
        }
        size
    }

    /// Evaluates the formula given a (partial) assignment of its variables.
    ///
    /// The evaluation is three-valued: `None` is returned when the value of the formula
    /// depends on variables for which `value_of` returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::FormulaNode;
    ///
    /// let f = FormulaNode::implies(FormulaNode::var("a"), FormulaNode::var("b"));
    /// assert_eq!(Some(true), f.evaluate(&|v: &str| if v == "a" { Some(false) } else { None }));
    /// assert_eq!(None, f.evaluate(&|v: &str| if v == "a" { Some(true) } else { None }));
    /// ```
    pub fn evaluate<F>(&self, value_of: &F) -> Option<bool>
    where
        F: Fn(&str) -> Option<bool>,
    {
        let mut stack = vec![Frame::Enter(self)];
        let mut values: Vec<Option<bool>> = Vec::new();
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(node) => match node {
                    FormulaNode::True => values.push(Some(true)),
                    FormulaNode::False => values.push(Some(false)),
                    FormulaNode::Lit(name, polarity) => {
                        values.push(value_of(name.as_str()).map(|v| v == *polarity))
                    }
                    _ => {
                        stack.push(Frame::Exit(node));
                        stack.extend(node.children().into_iter().rev().map(Frame::Enter));
                    }
                },
                Frame::Exit(node) => {
                    let children = values.split_off(values.len() - node.arity());
                    values.push(evaluate_connective(node, &children));
                }
            }
        }
        values.pop().flatten()
    }

    /// Returns a copy of this formula in which the children of commutative connectives are recursively sorted.
    ///
    /// Two formulas that only differ by the order of such children have the same canonical form.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::FormulaNode;
    ///
    /// let f1 = FormulaNode::or(vec![FormulaNode::var("b"), FormulaNode::var("a")]);
    /// let f2 = FormulaNode::or(vec![FormulaNode::var("a"), FormulaNode::var("b")]);
    /// assert_ne!(f1, f2);
    /// assert_eq!(f1.canonical(), f2.canonical());
    /// ```
    pub fn canonical(&self) -> FormulaNode {
        self.copy(true)
    }

    fn arity(&self) -> usize {
        match self {
            FormulaNode::True | FormulaNode::False | FormulaNode::Lit(_, _) => 0,
            FormulaNode::Not(_) => 1,
            FormulaNode::Implies(_, _) | FormulaNode::BiImplies(_, _) => 2,
            FormulaNode::And(children)
            | FormulaNode::Or(children)
            | FormulaNode::AtLeast(_, children)
            | FormulaNode::AtMost(_, children)
            | FormulaNode::Exactly(_, children)
            | FormulaNode::Between(_, _, children) => children.len(),
        }
    }

    // Rebuilds the tree bottom-up, sorting the children of commutative connectives if asked.
    fn copy(&self, sorted: bool) -> FormulaNode {
        let mut stack = vec![Frame::Enter(self)];
        let mut copies: Vec<FormulaNode> = Vec::new();
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(node) => {
                    stack.push(Frame::Exit(node));
                    stack.extend(node.children().into_iter().rev().map(Frame::Enter));
                }
                Frame::Exit(node) => {
                    let children = copies.split_off(copies.len() - node.arity());
                    copies.push(node.with_children(children, sorted));
                }
            }
        }
        copies.pop().unwrap_or(FormulaNode::True)
    }

    fn with_children(&self, mut children: Vec<FormulaNode>, sorted: bool) -> FormulaNode {
        if sorted && self.is_commutative() {
            children.sort_unstable();
        }
        match self {
            FormulaNode::True => FormulaNode::True,
            FormulaNode::False => FormulaNode::False,
            FormulaNode::Lit(name, polarity) => FormulaNode::Lit(name.clone(), *polarity),
            FormulaNode::Not(_) => FormulaNode::not(children.remove(0)),
            FormulaNode::Implies(_, _) => {
                let right = children.remove(1);
                FormulaNode::implies(children.remove(0), right)
            }
            FormulaNode::BiImplies(_, _) => {
                let mut right = children.remove(1);
                let mut left = children.remove(0);
                if sorted && right < left {
                    std::mem::swap(&mut left, &mut right);
                }
                FormulaNode::bi_implies(left, right)
            }
            FormulaNode::And(_) => FormulaNode::And(children),
            FormulaNode::Or(_) => FormulaNode::Or(children),
            FormulaNode::AtLeast(k, _) => FormulaNode::AtLeast(*k, children),
            FormulaNode::AtMost(k, _) => FormulaNode::AtMost(*k, children),
            FormulaNode::Exactly(k, _) => FormulaNode::Exactly(*k, children),
            FormulaNode::Between(min, max, _) => FormulaNode::Between(*min, *max, children),
        }
    }

    fn is_commutative(&self) -> bool {
        !matches!(
            self,
            FormulaNode::Not(_) | FormulaNode::Implies(_, _) | FormulaNode::BiImplies(_, _)
        )
    }

    /// Moves the children out of this node, which is left without children.
    ///
    /// The operands of negations, implications and equivalences are replaced by `true`.
    pub(crate) fn take_children(&mut self) -> Vec<FormulaNode> {
        fn take(child: &mut FormulaNode) -> FormulaNode {
            std::mem::replace(child, FormulaNode::True)
        }
        match self {
            FormulaNode::True | FormulaNode::False | FormulaNode::Lit(_, _) => Vec::new(),
            FormulaNode::Not(child) => vec![take(child)],
            FormulaNode::Implies(left, right) | FormulaNode::BiImplies(left, right) => {
                vec![take(left), take(right)]
            }
            FormulaNode::And(children)
            | FormulaNode::Or(children)
            | FormulaNode::AtLeast(_, children)
            | FormulaNode::AtMost(_, children)
            | FormulaNode::Exactly(_, children)
            | FormulaNode::Between(_, _, children) => std::mem::take(children),
        }
    }

    fn tokens(&self) -> Tokens<'_> {
        Tokens {
            stack: vec![Frame::Enter(self)],
        }
    }

    /// Checks if this formula is in negation normal form.
    ///
    /// A formula is in NNF if it is only made of literals, conjunctions and disjunctions,
    /// or if it is a single constant.
    pub fn is_nnf(&self) -> bool {
        if matches!(self, FormulaNode::True | FormulaNode::False) {
            return true;
        }
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                FormulaNode::Lit(_, _) => {}
                FormulaNode::And(children) | FormulaNode::Or(children) => stack.extend(children),
                _ => return false,
            }
        }
        true
    }

    /// Checks if this formula is a conjunction of disjunctions of literals.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::FormulaNode;
    ///
    /// let f = FormulaNode::and(vec![FormulaNode::or(vec![FormulaNode::var("a")])]);
    /// assert!(f.is_clausal_cnf());
    /// assert!(!f.is_clausal_dnf());
    /// ```
    pub fn is_clausal_cnf(&self) -> bool {
        is_clausal(self, FormulaNodeKind::And, FormulaNodeKind::Or)
    }

    /// Checks if this formula is a disjunction of conjunctions of literals.
    pub fn is_clausal_dnf(&self) -> bool {
        is_clausal(self, FormulaNodeKind::Or, FormulaNodeKind::And)
    }

    /// Returns an object dedicated to the display of this node.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::FormulaNode;
    ///
    /// let f = FormulaNode::and(vec![
    ///     FormulaNode::lit("a", false),
    ///     FormulaNode::at_most(1, vec![FormulaNode::var("b"), FormulaNode::var("c")]),
    /// ]);
    /// assert_eq!("and(-a, atmost(1, b, c))", format!("{}", f.default_display()));
    /// ```
    pub fn default_display(&self) -> DefaultDisplay<'_> {
        DefaultDisplay::new(self)
    }
}

enum Frame<'a> {
    Enter(&'a FormulaNode),
    Exit(&'a FormulaNode),
}

fn evaluate_connective(node: &FormulaNode, children: &[Option<bool>]) -> Option<bool> {
    match node {
        FormulaNode::Not(_) => children[0].map(|v| !v),
        FormulaNode::And(_) => evaluate_count(children, children.len(), children.len()),
        FormulaNode::Or(_) => evaluate_count(children, 1, children.len()),
        FormulaNode::Implies(_, _) => match (children[0], children[1]) {
            (Some(false), _) | (_, Some(true)) => Some(true),
            (Some(true), Some(false)) => Some(false),
            _ => None,
        },
        FormulaNode::BiImplies(_, _) => match (children[0], children[1]) {
            (Some(l), Some(r)) => Some(l == r),
            _ => None,
        },
        FormulaNode::AtLeast(k, _) => evaluate_count(children, *k, children.len()),
        FormulaNode::AtMost(k, _) => evaluate_count(children, 0, *k),
        FormulaNode::Exactly(k, _) => evaluate_count(children, *k, *k),
        FormulaNode::Between(min, max, _) => evaluate_count(children, *min, *max),
        FormulaNode::True => Some(true),
        FormulaNode::False => Some(false),
        FormulaNode::Lit(_, _) => None,
    }
}

fn evaluate_count(children: &[Option<bool>], min: usize, max: usize) -> Option<bool> {
    let n_true = children.iter().filter(|v| **v == Some(true)).count();
    let n_undefined = children.iter().filter(|v| v.is_none()).count();
    if n_true >= min && n_true + n_undefined <= max {
        Some(true)
    } else if n_true + n_undefined < min || n_true > max {
        Some(false)
    } else {
        None
    }
}

fn is_clausal(node: &FormulaNode, outer: FormulaNodeKind, inner: FormulaNodeKind) -> bool {
    node.kind() == outer
        && node.children().iter().all(|c| {
            c.kind() == inner
                && c
                    .children()
                    .iter()
                    .all(|l| l.kind() == FormulaNodeKind::Lit)
        })
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Token<'a> {
    Close,
    Open(FormulaNodeKind, &'a str, bool, usize, usize),
}

fn token(node: &FormulaNode) -> Token<'_> {
    let (name, polarity, first, second) = match node {
        FormulaNode::Lit(name, polarity) => (name.as_str(), *polarity, 0, 0),
        FormulaNode::AtLeast(k, _) | FormulaNode::AtMost(k, _) | FormulaNode::Exactly(k, _) => {
            ("", false, *k, 0)
        }
        FormulaNode::Between(min, max, _) => ("", false, *min, *max),
        _ => ("", false, 0, 0),
    };
    Token::Open(node.kind(), name, polarity, first, second)
}

// Preorder walk in which each node is closed after its children.
struct Tokens<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.stack.pop()? {
            Frame::Exit(_) => Some(Token::Close),
            Frame::Enter(node) => {
                self.stack.push(Frame::Exit(node));
                self.stack
                    .extend(node.children().into_iter().rev().map(Frame::Enter));
                Some(token(node))
            }
        }
    }
}

impl Clone for FormulaNode {
    fn clone(&self) -> Self {
        self.copy(false)
    }
}

impl PartialEq for FormulaNode {
    fn eq(&self, other: &Self) -> bool {
        self.tokens().eq(other.tokens())
    }
}

impl Eq for FormulaNode {}

impl PartialOrd for FormulaNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FormulaNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tokens().cmp(other.tokens())
    }
}

impl Hash for FormulaNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tokens().for_each(|t| t.hash(state));
    }
}

impl Drop for FormulaNode {
    fn drop(&mut self) {
        let mut stack = self.take_children();
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.take_children());
        }
    }
}

impl Display for FormulaNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.default_display())
    }
}

pub struct DefaultDisplay<'a> {
    n: &'a FormulaNode,
}

impl<'a> DefaultDisplay<'a> {
    fn new(n: &'a FormulaNode) -> Self {
        DefaultDisplay { n }
    }
}

enum DisplayItem<'a> {
    Node(&'a FormulaNode),
    Text(&'static str),
}

impl Display for DefaultDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut stack = vec![DisplayItem::Node(self.n)];
        while let Some(item) = stack.pop() {
            let node = match item {
                DisplayItem::Text(text) => {
                    write!(f, "{}", text)?;
                    continue;
                }
                DisplayItem::Node(node) => node,
            };
            let has_parameters = match node {
                FormulaNode::True | FormulaNode::False => {
                    write!(f, "{}", node.kind())?;
                    continue;
                }
                FormulaNode::Lit(name, polarity) => {
                    write!(f, "{}{}", if *polarity { "" } else { "-" }, name)?;
                    continue;
                }
                FormulaNode::AtLeast(k, _) | FormulaNode::AtMost(k, _) | FormulaNode::Exactly(k, _) => {
                    write!(f, "{}({}", node.kind(), k)?;
                    true
                }
                FormulaNode::Between(min, max, _) => {
                    write!(f, "{}({}, {}", node.kind(), min, max)?;
                    true
                }
                _ => {
                    write!(f, "{}(", node.kind())?;
                    false
                }
            };
            stack.push(DisplayItem::Text(")"));
            for (i, child) in node.children().into_iter().enumerate().rev() {
                stack.push(DisplayItem::Node(child));
                if i > 0 || has_parameters {
                    stack.push(DisplayItem::Text(", "));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> FormulaNode {
        FormulaNode::var("a")
    }

    fn b() -> FormulaNode {
        FormulaNode::var("b")
    }

    fn c() -> FormulaNode {
        FormulaNode::var("c")
    }

    fn assignment(trues: &'static [&'static str]) -> impl Fn(&str) -> Option<bool> {
        move |v: &str| Some(trues.iter().any(|t| *t == v))
    }

    #[test]
    fn test_kind_and_children() {
        let f = FormulaNode::implies(a(), FormulaNode::or(vec![b(), c()]));
        assert_eq!(FormulaNodeKind::Implies, f.kind());
        let children = f.children();
        assert_eq!(2, children.len());
        assert_eq!(&a(), children[0]);
        assert_eq!(FormulaNodeKind::Or, children[1].kind());
        assert!(FormulaNode::True.children().is_empty());
        assert_eq!(Some("a"), a().variable_name());
        assert_eq!(None, f.variable_name());
    }

    #[test]
    fn test_variables() {
        let f = FormulaNode::bi_implies(
            FormulaNode::not(c()),
            FormulaNode::at_least(1, vec![a(), c(), FormulaNode::lit("b", false)]),
        );
        assert_eq!(vec!["c", "a", "b"], f.variables());
        assert!(FormulaNode::True.variables().is_empty());
    }

    #[test]
    fn test_size() {
        assert_eq!(1, a().size());
        let f = FormulaNode::and(vec![FormulaNode::or(vec![a(), b()]), FormulaNode::not(c())]);
        assert_eq!(6, f.size());
    }

    #[test]
    fn test_evaluate_connectives() {
        let f = FormulaNode::and(vec![
            FormulaNode::or(vec![a(), b()]),
            FormulaNode::not(FormulaNode::and(vec![a(), b()])),
        ]);
        assert_eq!(Some(false), f.evaluate(&assignment(&[])));
        assert_eq!(Some(true), f.evaluate(&assignment(&["a"])));
        assert_eq!(Some(true), f.evaluate(&assignment(&["b"])));
        assert_eq!(Some(false), f.evaluate(&assignment(&["a", "b"])));
        let eq = FormulaNode::bi_implies(a(), b());
        assert_eq!(Some(true), eq.evaluate(&assignment(&["a", "b"])));
        assert_eq!(Some(false), eq.evaluate(&assignment(&["b"])));
    }

    #[test]
    fn test_evaluate_partial() {
        let only_a = |v: &str| if v == "a" { Some(true) } else { None };
        assert_eq!(Some(true), FormulaNode::or(vec![a(), b()]).evaluate(&only_a));
        assert_eq!(None, FormulaNode::and(vec![a(), b()]).evaluate(&only_a));
        assert_eq!(
            Some(true),
            FormulaNode::at_least(1, vec![a(), b()]).evaluate(&only_a)
        );
        assert_eq!(
            None,
            FormulaNode::at_most(1, vec![a(), b()]).evaluate(&only_a)
        );
    }

    #[test]
    fn test_evaluate_cardinalities() {
        let children = || vec![a(), b(), c()];
        let two = assignment(&["a", "c"]);
        assert_eq!(Some(true), FormulaNode::at_least(2, children()).evaluate(&two));
        assert_eq!(Some(false), FormulaNode::at_least(3, children()).evaluate(&two));
        assert_eq!(Some(false), FormulaNode::at_most(1, children()).evaluate(&two));
        assert_eq!(Some(true), FormulaNode::at_most(2, children()).evaluate(&two));
        assert_eq!(Some(true), FormulaNode::exactly(2, children()).evaluate(&two));
        assert_eq!(Some(false), FormulaNode::exactly(1, children()).evaluate(&two));
        assert_eq!(Some(true), FormulaNode::between(1, 2, children()).evaluate(&two));
        assert_eq!(Some(false), FormulaNode::between(0, 1, children()).evaluate(&two));
    }

    #[test]
    fn test_canonical() {
        let f1 = FormulaNode::and(vec![
            FormulaNode::or(vec![c(), a()]),
            FormulaNode::bi_implies(b(), a()),
        ]);
        let f2 = FormulaNode::and(vec![
            FormulaNode::bi_implies(a(), b()),
            FormulaNode::or(vec![a(), c()]),
        ]);
        assert_eq!(f1.canonical(), f2.canonical());
        assert_eq!(f1.canonical(), f1.canonical().canonical());
        let imp1 = FormulaNode::implies(b(), a());
        assert_ne!(FormulaNode::implies(a(), b()).canonical(), imp1.canonical());
    }

    #[test]
    fn test_shapes() {
        let cnf = FormulaNode::and(vec![
            FormulaNode::or(vec![a(), FormulaNode::lit("b", false)]),
            FormulaNode::or(vec![c()]),
        ]);
        assert!(cnf.is_nnf());
        assert!(cnf.is_clausal_cnf());
        assert!(!cnf.is_clausal_dnf());
        let not_flat = FormulaNode::and(vec![a(), FormulaNode::or(vec![b()])]);
        assert!(not_flat.is_nnf());
        assert!(!not_flat.is_clausal_cnf());
        assert!(FormulaNode::True.is_nnf());
        assert!(!FormulaNode::and(vec![FormulaNode::True]).is_nnf());
        assert!(!FormulaNode::not(a()).is_nnf());
    }

    #[test]
    fn test_default_display() {
        let f = FormulaNode::or(vec![
            FormulaNode::and(vec![FormulaNode::lit("a", false), b()]),
            FormulaNode::implies(FormulaNode::True, FormulaNode::not(c())),
            FormulaNode::between(1, 2, vec![a(), b()]),
            FormulaNode::and(vec![]),
        ]);
        assert_eq!(
            "or(and(-a, b), implies(true, not(c)), between(1, 2, a, b), and())",
            format!("{}", f)
        );
    }

    #[test]
    fn test_order_follows_kind_then_parameters_then_children() {
        assert!(FormulaNode::True < FormulaNode::False);
        assert!(FormulaNode::lit("a", false) < a());
        assert!(a() < b());
        assert!(a() < FormulaNode::not(a()));
        assert!(FormulaNode::and(vec![a()]) < FormulaNode::and(vec![a(), b()]));
        assert!(FormulaNode::and(vec![b()]) > FormulaNode::and(vec![a(), b()]));
        assert!(FormulaNode::at_least(1, vec![b()]) < FormulaNode::at_least(2, vec![a()]));
        assert!(FormulaNode::between(1, 2, vec![]) < FormulaNode::between(1, 3, vec![]));
        assert_ne!(
            FormulaNode::and(vec![FormulaNode::and(vec![a()]), b()]),
            FormulaNode::and(vec![FormulaNode::and(vec![a(), b()])])
        );
    }

    #[test]
    fn test_equal_formulas_hash_equally() {
        fn hash_of(f: &FormulaNode) -> u64 {
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            f.hash(&mut hasher);
            hasher.finish()
        }
        let f = FormulaNode::or(vec![a(), FormulaNode::at_most(1, vec![b(), c()])]);
        assert_eq!(hash_of(&f), hash_of(&f.clone()));
        let mut set = FxHashSet::default();
        set.insert(f.clone());
        assert!(set.contains(&f));
        assert!(!set.contains(&FormulaNode::or(vec![a(), FormulaNode::at_most(2, vec![b(), c()])])));
    }

    #[test]
    fn test_deep_formula() {
        let mut f = c();
        for i in 0..50_000 {
            f = if i % 2 == 0 {
                FormulaNode::or(vec![FormulaNode::and(vec![b(), a()]), FormulaNode::not(f)])
            } else {
                FormulaNode::implies(f, a())
            };
        }
        assert_eq!(175_001, f.size());
        let copy = f.clone();
        assert_eq!(f, copy);
        let canonical = f.canonical();
        assert_eq!(canonical, copy.canonical());
        assert_ne!(f, canonical);
        assert_eq!(Some(true), f.evaluate(&assignment(&["a"])));
        assert!(!f.is_nnf());
        assert_eq!(vec!["b", "a", "c"], f.variables());
        assert!(format!("{}", f).starts_with("implies(or(and(b, a), not(implies(or(and(b, a), not("));
    }
}
