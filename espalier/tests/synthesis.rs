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

//! End-to-end synthesis scenarios driven by closure oracles.

use espalier::ast::{Grammar, ParseNode, START, fixup_terminal};
use espalier::oracle::CachingOracle;
use espalier::synthesis::{SynthesisOptions, Synthesizer};

use std::collections::HashSet;

fn example(tokens: &[&str]) -> Vec<ParseNode> {
    tokens.iter().map(|token| ParseNode::terminal(*token)).collect()
}

fn synthesize(
    oracle: impl FnMut(&str) -> bool + 'static,
    examples: Vec<Vec<ParseNode>>,
    options: SynthesisOptions,
) -> Grammar {
    let mut oracle = CachingOracle::new(oracle);
    Synthesizer::new(&mut oracle, options).synthesize(examples).expect("synthesis should succeed")
}

/// Bounded-depth derivation membership: whether `grammar` derives exactly
/// `target` from START. Sentential forms are pruned by their minimum
/// possible yield length, so recursive rules terminate.
fn derives(grammar: &Grammar, target: &str) -> bool {
    // Minimum yield length per nonterminal, to a fixed point.
    let unknown = usize::MAX / 4;
    let mut min_len: std::collections::HashMap<String, usize> =
        grammar.keys().map(|name| (name.clone(), unknown)).collect();
    loop {
        let mut changed = false;
        for rule in grammar.rules() {
            let best = rule
                .bodies
                .iter()
                .map(|body| {
                    body.iter()
                        .map(|symbol| {
                            min_len
                                .get(symbol)
                                .copied()
                                .unwrap_or_else(|| fixup_terminal(symbol).len())
                        })
                        .sum::<usize>()
                })
                .min()
                .unwrap_or(unknown);
            if best < min_len[&rule.start] {
                min_len.insert(rule.start.clone(), best);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let form_min = |form: &[String]| -> usize {
        form.iter()
            .map(|symbol| {
                min_len.get(symbol).copied().unwrap_or_else(|| fixup_terminal(symbol).len())
            })
            .sum()
    };

    let mut stack = vec![vec![START.to_string()]];
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    while let Some(form) = stack.pop() {
        // Split the form into its terminal prefix and the leftmost
        // nonterminal.
        let mut prefix = String::new();
        let mut leftmost = None;
        for (index, symbol) in form.iter().enumerate() {
            if grammar.contains(symbol) {
                leftmost = Some(index);
                break;
            }
            prefix.push_str(fixup_terminal(symbol));
        }
        match leftmost {
            None => {
                if prefix == target {
                    return true;
                }
            }
            Some(index) => {
                if !target.starts_with(&prefix) || form_min(&form) > target.len() {
                    continue;
                }
                let Some(rule) = grammar.rule(&form[index]) else {
                    continue;
                };
                for body in &rule.bodies {
                    let mut next: Vec<String> = form[..index].to_vec();
                    next.extend(body.iter().cloned());
                    next.extend(form[index + 1..].iter().cloned());
                    if seen.insert(next.clone()) {
                        stack.push(next);
                    }
                }
            }
        }
    }
    false
}

/// Recursive-descent membership for well-formed arithmetic over the tokens
/// `int`, `+`, `*`, `(`, `)` (concatenated without separators).
fn arithmetic(candidate: &str) -> bool {
    fn factor(input: &str) -> Option<&str> {
        if let Some(rest) = input.strip_prefix("int") {
            return Some(rest);
        }
        let rest = input.strip_prefix('(')?;
        let rest = expression(rest)?;
        rest.strip_prefix(')')
    }

    fn expression(input: &str) -> Option<&str> {
        let mut rest = factor(input)?;
        while let Some(after_op) =
            rest.strip_prefix('+').or_else(|| rest.strip_prefix('*'))
        {
            rest = factor(after_op)?;
        }
        Some(rest)
    }

    expression(candidate) == Some("")
}

#[test]
fn arithmetic_examples_generalise_to_expressions() {
    let grammar = synthesize(
        arithmetic,
        vec![
            example(&["int", "+", "int"]),
            example(&["int", "*", "int"]),
            example(&["(", "int", "+", "int", ")"]),
            example(&["(", "int", "*", "int", ")"]),
        ],
        SynthesisOptions::default(),
    );

    // The two operators were unified into a single class.
    let operator_rule = grammar
        .rules()
        .find(|rule| rule.bodies.contains(&vec!["\"+\"".to_string()]))
        .expect("operator rule");
    assert!(operator_rule.bodies.contains(&vec!["\"*\"".to_string()]));

    // All inputs and their obvious recombinations are derivable.
    for input in ["int+int", "int*int", "(int+int)", "(int*int)", "int+int*int", "(int)"] {
        assert!(derives(&grammar, input), "expected the grammar to derive {input}");
    }
    assert!(!derives(&grammar, "+"));
    assert!(!derives(&grammar, "int+"));
}

#[test]
fn digit_literals_expand_to_the_digit_schemas() {
    let grammar = synthesize(
        |candidate: &str| !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_digit()),
        vec![example(&["3"]), example(&["7"]), example(&["42"])],
        SynthesisOptions::default(),
    );

    assert!(grammar.contains("tdigits"));
    assert!(grammar.contains("tdigit"));
    assert!(
        grammar.rules().any(|rule| rule.bodies.contains(&vec!["tdigits".to_string()])),
        "some rule should defer to the digit-sequence schema"
    );
    for input in ["0", "9", "42", "007", "123456"] {
        assert!(derives(&grammar, input), "expected the grammar to derive {input}");
    }
}

#[test]
fn repetition_bubbles_into_a_recursive_rule() {
    let grammar = synthesize(
        |candidate: &str| {
            !candidate.is_empty()
                && candidate.len() % 3 == 0
                && candidate.as_bytes().chunks(3).all(|chunk| chunk == b"abc")
        },
        vec![example(&["a", "b", "c"]), example(&["a", "b", "c", "a", "b", "c"])],
        SynthesisOptions::default(),
    );

    // The bubbled sequence coalesced with the example roots into a
    // self-recursive nonterminal.
    let recursive = grammar
        .rules()
        .find(|rule| {
            rule.bodies
                .iter()
                .any(|body| body.iter().filter(|symbol| **symbol == rule.start).count() >= 2)
        })
        .expect("a self-recursive rule");
    assert_ne!(recursive.start, START);

    for input in ["abc", "abcabc", "abcabcabc", "abcabcabcabc"] {
        assert!(derives(&grammar, input), "expected the grammar to derive {input}");
    }
    assert!(!derives(&grammar, "ab"));
}

#[test]
fn an_always_accepting_oracle_coalesces_aggressively() {
    let examples = || {
        vec![
            example(&["int", "+", "int"]),
            example(&["int", "*", "int"]),
            example(&["(", "int", "+", "int", ")"]),
            example(&["(", "int", "*", "int", ")"]),
        ]
    };
    let exact = synthesize(arithmetic, examples(), SynthesisOptions::default());
    // Every probe "times out": the wrapper reports accept for everything.
    let permissive = synthesize(|_: &str| true, examples(), SynthesisOptions::default());

    // Unbounded acceptance can only merge more, never less.
    assert!(permissive.len() <= exact.len());
    assert!(permissive.size() <= exact.size());
    assert!(derives(&permissive, "int+int"));
}

#[test]
fn rejected_guide_examples_abort_the_pipeline() {
    let mut oracle = CachingOracle::new(|_: &str| false);
    let result = Synthesizer::new(&mut oracle, SynthesisOptions::default())
        .synthesize(vec![example(&["a", "b"])]);
    let error = result.expect_err("guide examples that do not parse must abort");
    assert!(error.to_string().contains("guide examples do not compile"));
}

#[test]
fn a_single_one_token_example_yields_a_single_path() {
    let grammar = synthesize(
        |candidate: &str| candidate == "x",
        vec![example(&["x"])],
        SynthesisOptions::default(),
    );
    assert_eq!(grammar.len(), 1);
    assert!(derives(&grammar, "x"));
    assert!(!derives(&grammar, "xx"));
}

#[test]
fn identical_examples_collapse_to_one_chain() {
    let grammar = synthesize(
        |candidate: &str| candidate == "xy",
        vec![example(&["x", "y"]), example(&["x", "y"])],
        SynthesisOptions::default(),
    );
    assert!(derives(&grammar, "xy"));
    assert!(!derives(&grammar, "x"));
    // Nothing to generalise: the grammar stays a single chain from START.
    assert_eq!(grammar.rule(START).map(|rule| rule.bodies.len()), Some(1));
}
