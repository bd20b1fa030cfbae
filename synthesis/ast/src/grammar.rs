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
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// One production of the grammar: a left-hand-side nonterminal and an
/// ordered list of alternative bodies.
///
/// A body is an ordered sequence of symbols; a symbol is a nonterminal name
/// or a quoted terminal lexeme. Body equality is structural equality on the
/// symbol sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    /// The left-hand-side nonterminal.
    pub start: String,
    /// The alternative bodies, in insertion order.
    pub bodies: Vec<Vec<String>>,
}

impl Rule {
    /// Creates a rule with no bodies yet.
    pub fn new(start: impl Into<String>) -> Self {
        Self { start: start.into(), bodies: Vec::new() }
    }

    /// Appends a body to this rule.
    pub fn add_body(&mut self, body: Vec<String>) {
        self.bodies.push(body);
    }

    /// Returns `true` if an identical symbol sequence is already a body of
    /// this rule.
    pub fn contains_body(&self, body: &[String]) -> bool {
        self.bodies.iter().any(|existing| existing == body)
    }

    /// Removes duplicate bodies, keeping the first occurrence of each.
    pub fn dedup_bodies(&mut self) {
        let mut kept: Vec<Vec<String>> = Vec::with_capacity(self.bodies.len());
        for body in self.bodies.drain(..) {
            if !kept.contains(&body) {
                kept.push(body);
            }
        }
        self.bodies = kept;
    }
}

/// An ordered mapping from nonterminal name to [`Rule`].
///
/// The start nonterminal [`START`] is always present as a key. A symbol is a
/// nonterminal exactly when it is a key of the grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grammar {
    rules: IndexMap<String, Rule>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar {
    /// Creates a grammar holding an empty rule for [`START`].
    pub fn new() -> Self {
        let mut rules = IndexMap::new();
        rules.insert(START.to_string(), Rule::new(START));
        Self { rules }
    }

    /// Adds `rule` to the grammar. If a rule for the same nonterminal
    /// already exists, the new bodies are merged in, skipping duplicates.
    pub fn add_rule(&mut self, rule: Rule) {
        match self.rules.get_mut(&rule.start) {
            Some(existing) => {
                for body in rule.bodies {
                    if !existing.contains_body(&body) {
                        existing.add_body(body);
                    }
                }
            }
            None => {
                self.rules.insert(rule.start.clone(), rule);
            }
        }
    }

    /// Removes and returns the rule for `name`, preserving the order of the
    /// remaining rules.
    pub fn remove_rule(&mut self, name: &str) -> Option<Rule> {
        self.rules.shift_remove(name)
    }

    /// Returns `true` if `symbol` is a nonterminal of this grammar.
    pub fn contains(&self, symbol: &str) -> bool {
        self.rules.contains_key(symbol)
    }

    /// Returns the rule for `name`, if any.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Returns the rule for `name` mutably, if any.
    pub fn rule_mut(&mut self, name: &str) -> Option<&mut Rule> {
        self.rules.get_mut(name)
    }

    /// Iterates over the rules in insertion order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Iterates mutably over the rules in insertion order.
    pub fn rules_mut(&mut self) -> impl Iterator<Item = &mut Rule> {
        self.rules.values_mut()
    }

    /// Iterates over the nonterminal names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.rules.keys()
    }

    /// The number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the grammar has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The total number of symbol occurrences across all bodies of all
    /// rules.
    pub fn size(&self) -> usize {
        self.rules.values().flat_map(|rule| rule.bodies.iter()).map(Vec::len).sum()
    }

    /// Rewrites every occurrence of `from` to `to` in every body of every
    /// rule. Rule keys are not renamed.
    pub fn rename_symbol(&mut self, from: &str, to: &str) {
        for rule in self.rules.values_mut() {
            for body in &mut rule.bodies {
                for symbol in body {
                    if symbol == from {
                        *symbol = to.to_string();
                    }
                }
            }
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in self.rules.values() {
            let alternatives =
                rule.bodies.iter().map(|body| body.join(" ")).collect::<Vec<_>>().join(" | ");
            writeln!(f, "{} ::= {alternatives}", rule.start)?;
        }
        Ok(())
    }
}

impl Serialize for Grammar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rules.len()))?;
        for (name, rule) in &self.rules {
            map.serialize_entry(name, &rule.bodies)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn body(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    fn sample_grammar() -> Grammar {
        let mut grammar = Grammar::new();
        let mut start = Rule::new(START);
        start.add_body(body(&["t1", "t2"]));
        grammar.add_rule(start);
        let mut t1 = Rule::new("t1");
        t1.add_body(body(&["\"int\""]));
        grammar.add_rule(t1);
        let mut t2 = Rule::new("t2");
        t2.add_body(body(&["\"+\""]));
        t2.add_body(body(&["\"*\""]));
        grammar.add_rule(t2);
        grammar
    }

    #[test]
    fn start_is_always_present() {
        assert!(Grammar::new().contains(START));
    }

    #[test]
    fn size_counts_symbol_occurrences() {
        assert_eq!(sample_grammar().size(), 5);
    }

    #[test]
    fn add_rule_merges_and_skips_duplicate_bodies() {
        let mut grammar = sample_grammar();
        let mut more = Rule::new("t2");
        more.add_body(body(&["\"+\""]));
        more.add_body(body(&["\"-\""]));
        grammar.add_rule(more);
        assert_eq!(grammar.rule("t2").unwrap().bodies.len(), 3);
    }

    #[test]
    fn dedup_bodies_keeps_first_occurrence() {
        let mut rule = Rule::new("t1");
        rule.add_body(body(&["t2"]));
        rule.add_body(body(&["\"x\""]));
        rule.add_body(body(&["t2"]));
        rule.dedup_bodies();
        assert_eq!(rule.bodies, vec![body(&["t2"]), body(&["\"x\""])]);
    }

    #[test]
    fn rename_symbol_rewrites_all_bodies() {
        let mut grammar = sample_grammar();
        grammar.rename_symbol("t2", "t7");
        assert_eq!(grammar.rule(START).unwrap().bodies[0], body(&["t1", "t7"]));
        // Keys are untouched.
        assert!(grammar.contains("t2"));
    }

    #[test]
    fn display_lists_rules_in_order() {
        expect![[r#"
            t0 ::= t1 t2
            t1 ::= "int"
            t2 ::= "+" | "*"
        "#]]
        .assert_eq(&sample_grammar().to_string());
    }

    #[test]
    fn serialises_as_a_rule_map() {
        let json = serde_json::to_string(&sample_grammar()).unwrap();
        assert_eq!(
            json,
            r#"{"t0":[["t1","t2"]],"t1":[["\"int\""]],"t2":[["\"+\""],["\"*\""]]}"#
        );
    }
}
