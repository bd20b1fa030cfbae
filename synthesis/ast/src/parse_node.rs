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

use crate::fixup_terminal;

/// A node of a parse tree: either a terminal carrying its lexeme, or a
/// nonterminal carrying its name and an ordered list of children.
///
/// `Clone` is the deep copy the pipeline relies on before speculative
/// rewrites; equality is label plus recursive structural equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParseNode {
    /// A token of the input. Terminals never have children.
    Terminal(String),
    /// An interior node labelled with a nonterminal name.
    Nonterminal(String, Vec<ParseNode>),
}

impl ParseNode {
    /// Creates a terminal node from a lexeme.
    pub fn terminal(lexeme: impl Into<String>) -> Self {
        Self::Terminal(lexeme.into())
    }

    /// Creates a nonterminal node with the given children.
    pub fn nonterminal(name: impl Into<String>, children: Vec<ParseNode>) -> Self {
        Self::Nonterminal(name.into(), children)
    }

    /// Returns the label of this node: the lexeme of a terminal or the name
    /// of a nonterminal.
    pub fn payload(&self) -> &str {
        match self {
            Self::Terminal(lexeme) => lexeme,
            Self::Nonterminal(name, _) => name,
        }
    }

    /// Returns `true` if this node is a terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    /// Returns the children of this node; terminals have none.
    pub fn children(&self) -> &[ParseNode] {
        match self {
            Self::Terminal(_) => &[],
            Self::Nonterminal(_, children) => children,
        }
    }

    /// The string this subtree derives: the in-order concatenation of its
    /// terminal lexemes, with quote fixup applied to each.
    pub fn derived_string(&self) -> String {
        match self {
            Self::Terminal(lexeme) => fixup_terminal(lexeme).to_string(),
            Self::Nonterminal(_, children) => children.iter().map(ParseNode::derived_string).collect(),
        }
    }

    /// Returns `true` if any subtree is a nonterminal named `nt`.
    pub fn contains_nonterminal(&self, nt: &str) -> bool {
        match self {
            Self::Terminal(_) => false,
            Self::Nonterminal(name, children) => {
                name == nt || children.iter().any(|child| child.contains_nonterminal(nt))
            }
        }
    }

    /// Renames every nonterminal `from` in this subtree to `to`. Terminal
    /// lexemes are never touched.
    pub fn rename_nonterminal(&mut self, from: &str, to: &str) {
        if let Self::Nonterminal(name, children) = self {
            if name == from {
                *name = to.to_string();
            }
            for child in children {
                child.rename_nonterminal(from, to);
            }
        }
    }

    /// Calls `visit` on this node and every descendant, parents first,
    /// children in order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ParseNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> ParseNode {
        ParseNode::nonterminal("t0", vec![
            ParseNode::nonterminal("t1", vec![ParseNode::terminal("int")]),
            ParseNode::nonterminal("t2", vec![ParseNode::terminal("+")]),
            ParseNode::nonterminal("t1", vec![ParseNode::terminal("int")]),
        ])
    }

    #[test]
    fn derived_string_concatenates_leaves() {
        assert_eq!(sample_tree().derived_string(), "int+int");
        // Quoted lexemes are fixed up in the yield.
        let quoted = ParseNode::nonterminal("t0", vec![ParseNode::terminal("\"4\"")]);
        assert_eq!(quoted.derived_string(), "4");
    }

    #[test]
    fn clone_is_deep_and_independent() {
        let original = sample_tree();
        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.rename_nonterminal("t1", "t9");
        assert_ne!(copy, original);
        assert_eq!(original.children()[0].payload(), "t1");
    }

    #[test]
    fn contains_nonterminal_searches_all_levels() {
        let tree = sample_tree();
        assert!(tree.contains_nonterminal("t0"));
        assert!(tree.contains_nonterminal("t2"));
        assert!(!tree.contains_nonterminal("t3"));
        // Terminal lexemes are not nonterminals.
        assert!(!tree.contains_nonterminal("int"));
    }

    #[test]
    fn walk_visits_parents_first() {
        let tree = sample_tree();
        let mut seen = Vec::new();
        tree.walk(&mut |node| seen.push(node.payload().to_string()));
        assert_eq!(seen, ["t0", "t1", "int", "t2", "+", "t1", "int"]);
    }
}
