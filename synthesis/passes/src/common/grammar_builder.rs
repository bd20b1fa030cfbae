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

use espalier_ast::{Grammar, ParseNode, Rule, fixup_terminal, quote_terminal};

/// Rebuilds the grammar a set of parse trees induces.
///
/// Every nonterminal node with at least one child contributes a rule body:
/// its children's payloads, with terminal lexemes normalised to their
/// quoted form. Duplicate bodies of the same nonterminal are skipped by
/// structural comparison of the symbol sequences.
pub fn build_grammar(trees: &[ParseNode]) -> Grammar {
    let mut grammar = Grammar::new();
    for tree in trees {
        add_rules(&mut grammar, tree);
    }
    grammar
}

fn add_rules(grammar: &mut Grammar, node: &ParseNode) {
    let ParseNode::Nonterminal(name, children) = node else {
        return;
    };
    if children.is_empty() {
        return;
    }

    let body: Vec<String> = children
        .iter()
        .map(|child| match child {
            ParseNode::Terminal(lexeme) => quote_terminal(fixup_terminal(lexeme)),
            ParseNode::Nonterminal(child_name, _) => child_name.clone(),
        })
        .collect();

    let mut rule = Rule::new(name.clone());
    rule.add_body(body);
    // `add_rule` merges into an existing rule and drops duplicate bodies.
    grammar.add_rule(rule);

    for child in children {
        add_rules(grammar, child);
    }
}
