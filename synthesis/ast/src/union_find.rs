// Copyright (C) 2019-2025 Provable Inc.
// This file is part of the Espalier library.

// The Espalier library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Espalier library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Espalier library. If not, see <https://www.gnu.org/licenses/>.

use crate::START;

use indexmap::IndexMap;

/// A union-find over string-named elements (terminals or nonterminals).
///
/// Iteration over classes is deterministic: elements keep their insertion
/// order. When a class contains [`START`], its representative is START.
#[derive(Clone, Debug, Default)]
pub struct UnionFind {
    parent: IndexMap<String, String>,
}

impl UnionFind {
    /// Creates a union-find with each of `elements` in its own class.
    pub fn new(elements: impl IntoIterator<Item = String>) -> Self {
        let mut uf = Self::default();
        for element in elements {
            uf.insert(element);
        }
        uf
    }

    /// Adds `element` as a singleton class if it is not yet tracked.
    pub fn insert(&mut self, element: impl Into<String>) {
        let element = element.into();
        self.parent.entry(element.clone()).or_insert(element);
    }

    /// Returns the representative of `element`'s class, inserting it as a
    /// singleton first if needed. Compresses paths as it goes.
    pub fn find(&mut self, element: &str) -> String {
        self.insert(element);
        let parent = self.parent[element].clone();
        if parent == element {
            return parent;
        }
        let root = self.find(&parent);
        self.parent.insert(element.to_string(), root.clone());
        root
    }

    /// Merges the classes of `a` and `b`. START, if present in either class,
    /// stays the representative.
    pub fn connect(&mut self, a: &str, b: &str) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }
        if root_b == START {
            self.parent.insert(root_a, root_b);
        } else {
            self.parent.insert(root_b, root_a);
        }
    }

    /// Returns `true` if `a` and `b` are in the same class.
    pub fn is_connected(&mut self, a: &str, b: &str) -> bool {
        self.find(a) == self.find(b)
    }

    /// Returns every class as a map from representative to members, in
    /// first-insertion order. Singleton classes are included.
    pub fn classes(&mut self) -> IndexMap<String, Vec<String>> {
        let elements: Vec<String> = self.parent.keys().cloned().collect();
        let mut classes: IndexMap<String, Vec<String>> = IndexMap::new();
        for element in elements {
            let root = self.find(&element);
            classes.entry(root).or_default().push(element);
        }
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_is_transitive() {
        let mut uf = UnionFind::new(["a", "b", "c", "d"].map(String::from));
        uf.connect("a", "b");
        uf.connect("b", "c");
        assert!(uf.is_connected("a", "c"));
        assert!(!uf.is_connected("a", "d"));
    }

    #[test]
    fn classes_group_members_deterministically() {
        let mut uf = UnionFind::new(["a", "b", "c"].map(String::from));
        uf.connect("a", "c");
        let classes = uf.classes();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes["a"], ["a", "c"]);
        assert_eq!(classes["b"], ["b"]);
    }

    #[test]
    fn start_stays_the_representative() {
        let mut uf = UnionFind::new(["t1", "t0", "t2"].map(String::from));
        uf.connect("t1", "t0");
        uf.connect("t1", "t2");
        assert_eq!(uf.find("t2"), START);
        assert!(uf.classes().contains_key(START));
    }
}
