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

use espalier_ast::{NtAllocator, ParseNode};

use indexmap::IndexMap;

/// A candidate for bubbling: a contiguous sibling payload sequence, the
/// fresh nonterminal that would wrap it, and how often it occurs.
#[derive(Clone, Debug)]
pub struct Grouping {
    /// The concatenated payloads, used as the counting key.
    pub key: String,
    /// The payload sequence to match against child lists.
    pub template: Vec<String>,
    /// The nonterminal allocated for this grouping.
    pub fresh_nt: String,
    /// How many sibling ranges matched this sequence.
    pub count: usize,
}

/// Enumerates every grouping of the current trees, prunes the ones that
/// only ever span a full child list, and sorts the survivors by
/// (count descending, key length descending).
///
/// A sub-range equal to the entire child list of its parent is a "full
/// bubble": wrapping it would only introduce a unit production, so
/// groupings that never occur as a proper sub-range are discarded.
/// Sub-ranges of length one are never enumerated.
pub fn enumerate_groupings(trees: &[ParseNode], allocator: &NtAllocator) -> Vec<Grouping> {
    let mut groupings: IndexMap<String, Grouping> = IndexMap::new();
    let mut full_bubbles: IndexMap<String, usize> = IndexMap::new();

    for tree in trees {
        tree.walk(&mut |node| {
            let children = node.children();
            let payloads: Vec<&str> = children.iter().map(ParseNode::payload).collect();
            for i in 0..children.len() {
                for j in (i + 2)..=children.len() {
                    let key: String = payloads[i..j].concat();
                    groupings
                        .entry(key.clone())
                        .and_modify(|grouping| grouping.count += 1)
                        .or_insert_with(|| Grouping {
                            key: key.clone(),
                            template: payloads[i..j].iter().map(|p| p.to_string()).collect(),
                            fresh_nt: allocator.next_nt(),
                            count: 1,
                        });
                    if i == 0 && j == children.len() {
                        *full_bubbles.entry(key).or_insert(0) += 1;
                    }
                }
            }
        });
    }

    let mut groupings: Vec<Grouping> = groupings
        .into_values()
        .filter(|grouping| {
            full_bubbles.get(&grouping.key).copied().unwrap_or(0) != grouping.count
        })
        .collect();
    // Stable sort: ties keep enumeration order.
    groupings.sort_by(|a, b| b.count.cmp(&a.count).then(b.key.len().cmp(&a.key.len())));
    groupings
}

/// Wraps every match of `grouping` in every tree: at each node, the
/// leftmost occurrence of the template among the children is replaced by a
/// single fresh-nonterminal node adopting the matched slice, repeatedly,
/// until no occurrence remains. Returns whether anything was wrapped.
pub fn apply_grouping(trees: &mut [ParseNode], grouping: &Grouping) -> bool {
    let mut changed = false;
    for tree in trees.iter_mut() {
        apply_to_node(tree, grouping, &mut changed);
    }
    changed
}

fn apply_to_node(node: &mut ParseNode, grouping: &Grouping, changed: &mut bool) {
    let ParseNode::Nonterminal(_, children) = node else {
        return;
    };
    for child in children.iter_mut() {
        apply_to_node(child, grouping, changed);
    }
    while let Some(index) = find_template(children, &grouping.template) {
        let grouped: Vec<ParseNode> =
            children.drain(index..index + grouping.template.len()).collect();
        children.insert(index, ParseNode::nonterminal(grouping.fresh_nt.clone(), grouped));
        *changed = true;
    }
}

/// The leftmost index at which `template` matches the children's payloads.
fn find_template(children: &[ParseNode], template: &[String]) -> Option<usize> {
    if template.len() > children.len() {
        return None;
    }
    (0..=children.len() - template.len()).find(|&index| {
        template
            .iter()
            .enumerate()
            .all(|(offset, symbol)| children[index + offset].payload() == symbol)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use espalier_ast::START;

    fn leaf(nt: &str, lexeme: &str) -> ParseNode {
        ParseNode::nonterminal(nt, vec![ParseNode::terminal(lexeme)])
    }

    fn chain(nts: &[&str]) -> ParseNode {
        ParseNode::nonterminal(
            START,
            nts.iter().map(|nt| leaf(nt, "x")).collect(),
        )
    }

    #[test]
    fn single_symbol_ranges_are_never_enumerated() {
        let trees = vec![chain(&["t1", "t2"])];
        let groupings = enumerate_groupings(&trees, &NtAllocator::new(10));
        // The only length >= 2 range is the full child list, which is
        // pruned as a full bubble.
        assert!(groupings.is_empty());
    }

    #[test]
    fn proper_occurrences_rescue_a_grouping() {
        let trees = vec![chain(&["t1", "t2"]), chain(&["t1", "t2", "t3"])];
        let groupings = enumerate_groupings(&trees, &NtAllocator::new(10));
        let keys: Vec<&str> = groupings.iter().map(|g| g.key.as_str()).collect();
        // t1t2 occurs as the full list of tree one but properly in tree
        // two, and t2t3 properly in tree two; t1t2t3 never occurs
        // properly and is pruned.
        assert_eq!(keys, ["t1t2", "t2t3"]);
        assert_eq!(groupings[0].count, 2);
    }

    #[test]
    fn groupings_sort_by_count_then_length() {
        let trees = vec![
            chain(&["t1", "t2", "t3"]),
            chain(&["t1", "t2", "t4"]),
            chain(&["t5", "t1", "t2", "t3"]),
        ];
        let groupings = enumerate_groupings(&trees, &NtAllocator::new(10));
        let keys: Vec<&str> = groupings.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys[0], "t1t2");
        assert_eq!(groupings[0].count, 3);
        // Longer keys win ties.
        let pos_t1t2t3 = keys.iter().position(|k| *k == "t1t2t3").unwrap();
        let pos_t2t3 = keys.iter().position(|k| *k == "t2t3").unwrap();
        assert!(pos_t1t2t3 < pos_t2t3);
    }

    #[test]
    fn apply_wraps_every_occurrence_leftmost_first() {
        let mut trees = vec![chain(&["t1", "t2", "t1", "t2"])];
        let grouping = Grouping {
            key: "t1t2".into(),
            template: vec!["t1".into(), "t2".into()],
            fresh_nt: "t9".into(),
            count: 2,
        };
        assert!(apply_grouping(&mut trees, &grouping));
        let payloads: Vec<&str> =
            trees[0].children().iter().map(ParseNode::payload).collect();
        assert_eq!(payloads, ["t9", "t9"]);
        assert_eq!(trees[0].children()[0].children().len(), 2);
        assert_eq!(trees[0].derived_string(), "xxxx");
    }
}
