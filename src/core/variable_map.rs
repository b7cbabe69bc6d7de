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

use crate::{ClausalError, FormulaNode, Literal, Result, VarId};
use rustc_hash::FxHashMap;
use std::num::NonZeroUsize;

/// A bijective mapping between variable names and variable indices.
///
/// Indices begin at `1` and are allocated in increasing order.
/// Removing a variable leaves a gap: the freed index is never allocated again.
///
/// # Examples
///
/// ```
/// use crusti_clausal::VariableMap;
///
/// let mut map = VariableMap::new();
/// let a = map.add("a");
/// let b = map.add("b");
/// assert_eq!(a, map.add("a"));
/// assert_eq!(2, usize::from(b));
/// assert_eq!(Some("b"), map.name_of(b));
/// assert_eq!(Some(a), map.index_of("a"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableMap {
    index_to_name: Vec<Option<String>>,
    name_to_index: FxHashMap<String, VarId>,
}

fn var_id_at(position: usize) -> VarId {
    VarId::from_non_zero(NonZeroUsize::MIN.saturating_add(position))
}

impl VariableMap {
    /// Builds an empty map.
    pub fn new() -> Self {
        VariableMap::default()
    }

    /// Builds a map containing the given names, indexed in the order they are given.
    ///
    /// Repeated names are mapped once.
    pub fn from_names<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut map = VariableMap::new();
        names.into_iter().for_each(|n| {
            map.add(n);
        });
        map
    }

    /// Builds a map containing the variables of a formula, in the order of [`FormulaNode::variables`].
    pub fn from_formula(formula: &FormulaNode) -> Self {
        VariableMap::from_names(formula.variables())
    }

    /// Returns the index of a variable, adding it to the map if it is absent.
    pub fn add<T>(&mut self, name: T) -> VarId
    where
        T: Into<String>,
    {
        let name = name.into();
        if let Some(v) = self.name_to_index.get(&name) {
            return *v;
        }
        let v = var_id_at(self.index_to_name.len());
        self.index_to_name.push(Some(name.clone()));
        self.name_to_index.insert(name, v);
        v
    }

    /// Returns the index of the variable with the given name, if any.
    pub fn index_of(&self, name: &str) -> Option<VarId> {
        self.name_to_index.get(name).copied()
    }

    /// Returns the name of the variable with the given index, if any.
    pub fn name_of(&self, var_id: VarId) -> Option<&str> {
        self.index_to_name
            .get(var_id.index() - 1)
            .and_then(|n| n.as_deref())
    }

    /// Returns `true` iff a variable with the given name is mapped.
    pub fn contains_name(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// Removes a variable given its name, returning the index it had.
    pub fn remove_name(&mut self, name: &str) -> Option<VarId> {
        let v = self.name_to_index.remove(name)?;
        self.index_to_name[v.index() - 1] = None;
        Some(v)
    }

    /// Removes a variable given its index, returning the name it had.
    pub fn remove_index(&mut self, var_id: VarId) -> Option<String> {
        let name = self.index_to_name.get_mut(var_id.index() - 1)?.take()?;
        self.name_to_index.remove(&name);
        Some(name)
    }

    /// Renames a variable, keeping its index.
    ///
    /// Fails if `old` is not mapped or if `new` is already used by another variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::{ClausalError, VariableMap};
    ///
    /// let mut map = VariableMap::from_names(vec!["a", "b"]);
    /// map.rename("a", "c").unwrap();
    /// assert_eq!(1, usize::from(map.index_of("c").unwrap()));
    /// assert!(matches!(map.rename("c", "b"), Err(ClausalError::DuplicateVariable { .. })));
    /// ```
    pub fn rename<T>(&mut self, old: &str, new: T) -> Result<()>
    where
        T: Into<String>,
    {
        let new = new.into();
        let v = self
            .index_of(old)
            .ok_or_else(|| ClausalError::unknown_variable(old))?;
        if old == new {
            return Ok(());
        }
        if self.name_to_index.contains_key(&new) {
            return Err(ClausalError::DuplicateVariable { variable: new });
        }
        self.name_to_index.remove(old);
        self.name_to_index.insert(new.clone(), v);
        self.index_to_name[v.index() - 1] = Some(new);
        Ok(())
    }

    /// Merges maps from left to right.
    ///
    /// The result is a copy of the first map, to which the names of the next maps that are still absent
    /// are added in ascending index order.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::VariableMap;
    ///
    /// let m1 = VariableMap::from_names(vec!["a", "b"]);
    /// let m2 = VariableMap::from_names(vec!["c", "a"]);
    /// let merged = VariableMap::merge(&[&m1, &m2]);
    /// assert_eq!(vec!["a", "b", "c"], merged.names().collect::<Vec<&str>>());
    /// ```
    pub fn merge(maps: &[&VariableMap]) -> VariableMap {
        let mut it = maps.iter();
        let mut result = match it.next() {
            Some(first) => (*first).clone(),
            None => return VariableMap::new(),
        };
        for map in it {
            for (_, name) in map.iter() {
                result.add(name);
            }
        }
        result
    }

    /// Translates a literal expressed with the indices of this map into the indices of another map.
    ///
    /// If the variable is absent from `other`, it is added when `integrate` is `true`;
    /// else, an [`UnknownVariable`](ClausalError::UnknownVariable) error is returned.
    /// An error is also returned if the literal does not refer to a variable of this map.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_clausal::{Literal, VariableMap};
    ///
    /// let m1 = VariableMap::from_names(vec!["a", "b"]);
    /// let mut m2 = VariableMap::from_names(vec!["b"]);
    /// let not_b = Literal::new(m1.index_of("b").unwrap(), false);
    /// assert_eq!(-1, m1.adapt(not_b, &mut m2, false).unwrap().to_isize());
    /// let a = Literal::new(m1.index_of("a").unwrap(), true);
    /// assert!(m1.adapt(a, &mut m2, false).is_err());
    /// assert_eq!(2, m1.adapt(a, &mut m2, true).unwrap().to_isize());
    /// ```
    pub fn adapt(&self, literal: Literal, other: &mut VariableMap, integrate: bool) -> Result<Literal> {
        let name = self
            .name_of(literal.var_id())
            .ok_or_else(|| ClausalError::unknown_variable(format!("#{}", literal.var_id())))?;
        let v = match other.index_of(name) {
            Some(v) => v,
            None if integrate => other.add(name),
            None => return Err(ClausalError::unknown_variable(name)),
        };
        Ok(Literal::new(v, literal.polarity()))
    }

    /// Returns the number of mapped variables.
    pub fn len(&self) -> usize {
        self.name_to_index.len()
    }

    /// Returns `true` iff no variable is mapped.
    pub fn is_empty(&self) -> bool {
        self.name_to_index.is_empty()
    }

    /// Returns the highest index of a mapped variable, or `0` if the map is empty.
    pub fn max_index(&self) -> usize {
        self.index_to_name
            .iter()
            .rposition(Option::is_some)
            .map(|p| p + 1)
            .unwrap_or(0)
    }

    /// Iterates over the mapped variables in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &str)> + '_ {
        self.index_to_name
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_deref().map(|n| (var_id_at(i), n)))
    }

    /// Iterates over the mapped names in ascending index order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(_, n)| n)
    }
}
