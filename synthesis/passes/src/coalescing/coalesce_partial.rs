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

use crate::{
    Pass, REPLACE_SENTINEL, SynthesisState, derivable_strings, replace_every_occurrence,
    rule_replacement_templates,
};

use espalier_ast::{Grammar, NtAllocator, ParseNode, Rule, START, fixup_terminal};
use espalier_errors::Result;
use espalier_oracle::CachingOracle;

use indexmap::IndexMap;

/// A rule position found to accept one-directional substitution: the
/// `position`-th symbol of `body` under `start`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSite {
    /// The left-hand side of the rule.
    pub start: String,
    /// The body as it was when the site was found.
    pub body: Vec<String>,
    /// The index of the substitutable symbol.
    pub position: usize,
}

/// The positions rewritten per freshly allocated nonterminal.
pub type Replacements = IndexMap<String, Vec<RuleSite>>;

/// Partial coalescing as a pipeline pass. The input optionally restricts
/// the fully-replaceable side to a single target nonterminal.
pub struct CoalescePartial;

impl Pass for CoalescePartial {
    type Input = Option<String>;
    type Output = Replacements;

    const NAME: &str = "partial-coalescing";

    fn do_pass(target: Self::Input, state: &mut SynthesisState<'_>) -> Result<Replacements> {
        Ok(coalesce_partial(
            &mut state.grammar,
            &mut state.trees,
            state.oracle,
            state.allocator,
            target.as_deref(),
        ))
    }
}

/// Merges nonterminal pairs that are replaceable in one direction only,
/// restricted to the rule positions where the oracle allows it.
///
/// For a pair `(F, P)`, where `F` is any candidate nonterminal and `P` a
/// single-terminal nonterminal, `F` must be replaceable by `P`'s
/// derivations everywhere, and the substitution of `F`'s derivations for
/// `P` is then probed one rule position at a time. The positions that
/// always parse get rewritten to a fresh nonterminal that carries `F`'s
/// bodies plus the bodies of every `P` involved; `P`'s own rule stays.
///
/// Callers must run full coalescing first: this pass assumes no pair is
/// mutually replaceable, and may otherwise produce redundant merges.
pub fn coalesce_partial(
    grammar: &mut Grammar,
    trees: &mut Vec<ParseNode>,
    oracle: &mut CachingOracle,
    allocator: &NtAllocator,
    target: Option<&str>,
) -> Replacements {
    let mut replacements = Replacements::new();

    let candidates: Vec<String> = match target {
        Some(target) => vec![target.to_string()],
        None => grammar.keys().filter(|name| *name != START).cloned().collect(),
    };

    for full in candidates {
        // An earlier iteration may have folded this nonterminal away.
        if !grammar.contains(&full) {
            continue;
        }
        let full_strings = derivable_strings(trees, &full);
        if full_strings.is_empty() {
            continue;
        }

        let partials: Vec<String> = grammar
            .rules()
            .filter(|rule| {
                rule.start != full
                    && rule.bodies.len() == 1
                    && rule.bodies[0].len() == 1
                    && !grammar.contains(&rule.bodies[0][0])
            })
            .map(|rule| rule.start.clone())
            .collect();

        let mut sites: Vec<RuleSite> = Vec::new();
        let mut involved: Vec<String> = Vec::new();
        for partial in partials {
            let partial_strings = derivable_strings(trees, &partial);
            if partial_strings.is_empty() {
                continue;
            }

            // The full candidate must tolerate the partial's derivations
            // in all of its own occurrences.
            let everywhere = partial_strings.iter().all(|replacement| {
                trees
                    .iter()
                    .all(|tree| oracle.accepts(&replace_every_occurrence(tree, &full, replacement)))
            });
            if !everywhere {
                continue;
            }

            let found = replaceable_sites(grammar, trees, oracle, &partial, &full_strings);
            if !found.is_empty() {
                involved.push(partial);
                sites.extend(found);
            }
        }

        if sites.is_empty() {
            continue;
        }

        let new_nt =
            if full == START { START.to_string() } else { allocator.next_nt() };
        tracing::debug!(%full, %new_nt, sites = sites.len(), "partially coalescing");

        // Positions grouped per rule application, for the grammar and tree
        // rewrites below.
        let mut site_positions: IndexMap<(String, Vec<String>), Vec<usize>> = IndexMap::new();
        for site in &sites {
            site_positions
                .entry((site.start.clone(), site.body.clone()))
                .or_default()
                .push(site.position);
        }

        // Rewrite the collected positions, then every remaining occurrence
        // of the full candidate.
        for ((rule_start, body), positions) in &site_positions {
            if let Some(rule) = grammar.rule_mut(rule_start) {
                for existing in &mut rule.bodies {
                    if existing == body {
                        for &position in positions {
                            existing[position] = new_nt.clone();
                        }
                    }
                }
            }
        }
        grammar.rename_symbol(&full, &new_nt);
        for rule in grammar.rules_mut() {
            rule.dedup_bodies();
        }

        // The fresh rule unions the full candidate's bodies with those of
        // every partial involved; the partials' own rules stay in place.
        let Some(full_rule) = grammar.remove_rule(&full) else {
            continue;
        };
        let mut new_rule = Rule::new(new_nt.clone());
        let self_unit = |body: &[String]| body.len() == 1 && body[0] == new_nt;
        for body in full_rule.bodies {
            if !self_unit(&body) && !new_rule.contains_body(&body) {
                new_rule.add_body(body);
            }
        }
        for partial in &involved {
            let partial_bodies =
                grammar.rule(partial).map(|rule| rule.bodies.clone()).unwrap_or_default();
            for body in partial_bodies {
                if !self_unit(&body) && !new_rule.contains_body(&body) {
                    new_rule.add_body(body);
                }
            }
        }
        grammar.add_rule(new_rule);

        // Trees: relabel the children at the rewritten sites while the
        // original labels still match, then rename the full candidate.
        for tree in trees.iter_mut() {
            rewrite_tree_sites(tree, &site_positions, &new_nt);
        }
        for tree in trees.iter_mut() {
            tree.rename_nonterminal(&full, &new_nt);
        }

        replacements.insert(new_nt, sites);
    }

    replacements
}

/// Probes every `(rule, body, position)` triple whose symbol is `partial`:
/// the site qualifies when substituting each of `full_strings` at that
/// position alone, in every combination of occurrences, always parses.
fn replaceable_sites(
    grammar: &Grammar,
    trees: &[ParseNode],
    oracle: &mut CachingOracle,
    partial: &str,
    full_strings: &[String],
) -> Vec<RuleSite> {
    let mut sites = Vec::new();
    for rule in grammar.rules() {
        for body in &rule.bodies {
            for (position, symbol) in body.iter().enumerate() {
                if symbol != partial {
                    continue;
                }
                let accepted = full_strings.iter().all(|replacement| {
                    trees.iter().all(|tree| {
                        rule_replacement_templates(tree, &rule.start, body, position)
                            .iter()
                            .all(|template| {
                                oracle.accepts(&template.replace(REPLACE_SENTINEL, replacement))
                            })
                    })
                });
                if accepted {
                    sites.push(RuleSite {
                        start: rule.start.clone(),
                        body: body.clone(),
                        position,
                    });
                }
            }
        }
    }
    sites
}

fn rewrite_tree_sites(
    node: &mut ParseNode,
    site_positions: &IndexMap<(String, Vec<String>), Vec<usize>>,
    new_nt: &str,
) {
    if let ParseNode::Nonterminal(name, children) = node {
        for ((rule_start, body), positions) in site_positions {
            if name != rule_start || children.len() != body.len() {
                continue;
            }
            let matches = children
                .iter()
                .zip(body)
                .all(|(child, symbol)| fixup_terminal(child.payload()) == fixup_terminal(symbol));
            if !matches {
                continue;
            }
            for &position in positions {
                if let ParseNode::Nonterminal(child_name, _) = &mut children[position] {
                    *child_name = new_nt.to_string();
                }
            }
        }
        for child in children.iter_mut() {
            rewrite_tree_sites(child, site_positions, new_nt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_grammar;

    /// Membership in D -> "s" | "b" D "e".
    fn nested(candidate: &str) -> bool {
        candidate == "s"
            || (candidate.len() >= 3
                && candidate.starts_with('b')
                && candidate.ends_with('e')
                && nested(&candidate[1..candidate.len() - 1]))
    }

    /// One example "bse": a block wrapping a statement.
    fn block_state() -> (Grammar, Vec<ParseNode>) {
        let trees = vec![ParseNode::nonterminal(START, vec![ParseNode::nonterminal(
            "t1",
            vec![
                ParseNode::terminal("b"),
                ParseNode::nonterminal("t2", vec![ParseNode::terminal("s")]),
                ParseNode::terminal("e"),
            ],
        )])];
        (build_grammar(&trees), trees)
    }

    #[test]
    fn one_directional_pairs_merge_at_their_positions() {
        let (mut grammar, mut trees) = block_state();
        let mut oracle = CachingOracle::new(|s: &str| nested(s));
        let allocator = NtAllocator::new(3);

        let replacements =
            coalesce_partial(&mut grammar, &mut trees, &mut oracle, &allocator, None);

        // t1 (the block) is replaceable by t2 (the statement) everywhere,
        // and t2 by t1 only inside the block body: one site, one merge.
        assert_eq!(replacements.len(), 1);
        let sites = &replacements["t3"];
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].start, "t1");
        assert_eq!(sites[0].position, 1);

        // The fresh rule is recursive and carries both alternatives; the
        // statement rule survives untouched.
        let new_rule = grammar.rule("t3").expect("fresh rule");
        assert_eq!(new_rule.bodies, vec![
            vec!["\"b\"".to_string(), "t3".to_string(), "\"e\"".to_string()],
            vec!["\"s\"".to_string()],
        ]);
        assert!(!grammar.contains("t1"));
        assert_eq!(grammar.rule("t2").unwrap().bodies, vec![vec!["\"s\"".to_string()]]);
        assert_eq!(grammar.rule(START).unwrap().bodies, vec![vec!["t3".to_string()]]);

        // The tree matches the rewritten grammar and still yields the
        // example.
        let block = &trees[0].children()[0];
        assert_eq!(block.payload(), "t3");
        assert_eq!(block.children()[1].payload(), "t3");
        assert_eq!(trees[0].derived_string(), "bse");
    }

    #[test]
    fn no_merge_without_an_accepting_position() {
        let (mut grammar, mut trees) = block_state();
        // Only the original string parses: no substitution position
        // survives.
        let mut oracle = CachingOracle::new(|s: &str| s == "bse");
        let allocator = NtAllocator::new(3);

        let replacements =
            coalesce_partial(&mut grammar, &mut trees, &mut oracle, &allocator, None);
        assert!(replacements.is_empty());
        assert!(grammar.contains("t1"));
        assert!(grammar.contains("t2"));
    }
}
