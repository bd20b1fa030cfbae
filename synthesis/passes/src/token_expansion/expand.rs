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
    Pass, SynthesisState, TerminalClass, classify_terminal, strings_with_replacement,
};

use espalier_ast::{ParseNode, Rule, fixup_terminal, quote_terminal};
use espalier_errors::Result;
use espalier_oracle::CachingOracle;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// How many random strings are probed per numeric schema.
pub const MAX_SAMPLES: usize = 10;

/// Options for token expansion. The seed makes the sampled probe strings
/// reproducible across runs.
#[derive(Clone, Copy, Debug)]
pub struct ExpandConfig {
    /// Seed for the probe-string sampler.
    pub seed: u64,
    /// Samples per numeric schema.
    pub max_samples: usize,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self { seed: 0, max_samples: MAX_SAMPLES }
    }
}

/// The numeric schema a digit rule can be promoted to, narrowest last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigitSchema {
    /// A single decimal digit.
    Digit,
    /// A non-zero-led digit sequence (or a lone digit).
    Integer,
    /// Any digit sequence, leading zeroes included.
    Digits,
}

impl DigitSchema {
    /// The nonterminal the promoted bodies point at.
    pub fn name(self) -> &'static str {
        match self {
            Self::Digit => "tdigit",
            Self::Integer => "tinteger",
            Self::Digits => "tdigits",
        }
    }

    /// The fixed rules this schema needs in the grammar, the schema's own
    /// rule first.
    pub fn rules(self) -> Vec<Rule> {
        match self {
            Self::Digit => vec![digit_rule()],
            Self::Digits => vec![digits_rule(), digit_rule()],
            Self::Integer => {
                vec![integer_rule(), nz_digit_rule(), digits_rule(), digit_rule()]
            }
        }
    }
}

fn digit_rule() -> Rule {
    let mut rule = Rule::new("tdigit");
    for digit in '0'..='9' {
        rule.add_body(vec![quote_terminal(&digit.to_string())]);
    }
    rule
}

fn nz_digit_rule() -> Rule {
    let mut rule = Rule::new("tnzdigit");
    for digit in '1'..='9' {
        rule.add_body(vec![quote_terminal(&digit.to_string())]);
    }
    rule
}

fn digits_rule() -> Rule {
    let mut rule = Rule::new("tdigits");
    rule.add_body(vec!["tdigit".to_string()]);
    rule.add_body(vec!["tdigit".to_string(), "tdigits".to_string()]);
    rule
}

fn integer_rule() -> Rule {
    let mut rule = Rule::new("tinteger");
    rule.add_body(vec!["tdigit".to_string()]);
    rule.add_body(vec!["tnzdigit".to_string(), "tdigits".to_string()]);
    rule
}

/// Promotes literal digit bodies to the broadest numeric schema the oracle
/// accepts.
///
/// For every rule with single-terminal digit bodies, three progressively
/// broader generalisations are probed on the trees containing the rule:
/// the missing single digits, sampled non-zero-led integers, and sampled
/// zero-led digit sequences. On success the literal bodies are replaced by
/// the schema nonterminal and the fixed schema rules are inserted. Rules
/// the oracle refuses to generalise are left untouched.
pub struct ExpandTokens;

impl Pass for ExpandTokens {
    type Input = ExpandConfig;
    type Output = ();

    const NAME: &str = "token-expansion";

    fn do_pass(config: Self::Input, state: &mut SynthesisState<'_>) -> Result<()> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let rule_names: Vec<String> = state.grammar.keys().cloned().collect();
        for rule_start in rule_names {
            let Some(rule) = state.grammar.rule(&rule_start) else {
                continue;
            };
            let bodies = rule.bodies.clone();
            let digit_idxs: Vec<usize> = bodies
                .iter()
                .enumerate()
                .filter(|(_, body)| body.len() == 1 && !state.grammar.contains(&body[0]))
                .filter(|(_, body)| {
                    classify_terminal(fixup_terminal(&body[0])) == Some(TerminalClass::Digit)
                })
                .map(|(index, _)| index)
                .collect();
            if digit_idxs.is_empty() {
                continue;
            }

            let Some(schema) = generalize_digits(
                &state.trees,
                state.oracle,
                &rule_start,
                &bodies,
                &digit_idxs,
                &mut rng,
                config.max_samples,
            ) else {
                continue;
            };
            tracing::debug!(rule = %rule_start, schema = schema.name(), "promoting digit bodies");

            if let Some(rule) = state.grammar.rule_mut(&rule_start) {
                for &index in digit_idxs.iter().rev() {
                    rule.bodies.remove(index);
                }
                let body = vec![schema.name().to_string()];
                if !rule.contains_body(&body) {
                    rule.add_body(body);
                }
            }
            for schema_rule in schema.rules() {
                if !state.grammar.contains(&schema_rule.start) {
                    state.grammar.add_rule(schema_rule);
                }
            }
        }

        Ok(())
    }
}

/// Decides the broadest schema the digit bodies of `rule_start` can take.
fn generalize_digits(
    trees: &[ParseNode],
    oracle: &mut CachingOracle,
    rule_start: &str,
    bodies: &[Vec<String>],
    digit_idxs: &[usize],
    rng: &mut ChaCha8Rng,
    max_samples: usize,
) -> Option<DigitSchema> {
    let existing: Vec<&str> =
        digit_idxs.iter().map(|&index| fixup_terminal(&bodies[index][0])).collect();
    let all_single = existing.iter().all(|lexeme| lexeme.len() == 1);
    let single_candidates: Vec<String> = if all_single {
        ('0'..='9')
            .map(String::from)
            .filter(|digit| !existing.contains(&digit.as_str()))
            .collect()
    } else {
        Vec::new()
    };

    let mut integer_candidates = Vec::with_capacity(max_samples);
    let mut digits_candidates = Vec::with_capacity(max_samples);
    for _ in 0..max_samples {
        let first = (b'1' + rng.gen_range(0u8..9)) as char;
        let length = rng.gen_range(1usize..=10);
        let others: String = rand::seq::index::sample(rng, 10, length)
            .iter()
            .map(|digit| (b'0' + digit as u8) as char)
            .collect();
        integer_candidates.push(format!("{first}{others}"));
        digits_candidates.push(format!("0{others}"));
    }

    let hosts: Vec<&ParseNode> =
        trees.iter().filter(|tree| tree.contains_nonterminal(rule_start)).collect();
    if hosts.is_empty() {
        return None;
    }

    // The ladder: a failure at one width rules out every broader one.
    let mut digit_ok = all_single;
    let mut ints_ok = true;
    let mut digits_ok = true;
    for tree in hosts {
        if digit_ok
            && !single_candidates.is_empty()
            && !try_strings(oracle, &strings_with_replacement(tree, rule_start, &single_candidates))
        {
            digit_ok = false;
            ints_ok = false;
            digits_ok = false;
        }
        if ints_ok
            && !try_strings(oracle, &strings_with_replacement(tree, rule_start, &integer_candidates))
        {
            ints_ok = false;
            digits_ok = false;
        }
        if digits_ok
            && !try_strings(oracle, &strings_with_replacement(tree, rule_start, &digits_candidates))
        {
            digits_ok = false;
        }
    }

    if digits_ok {
        Some(DigitSchema::Digits)
    } else if ints_ok {
        Some(DigitSchema::Integer)
    } else if digit_ok {
        Some(DigitSchema::Digit)
    } else {
        None
    }
}

fn try_strings(oracle: &mut CachingOracle, candidates: &[String]) -> bool {
    candidates.iter().all(|candidate| oracle.accepts(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use espalier_ast::{Grammar, NtAllocator, START};
    use crate::build_grammar;

    fn digit_trees() -> Vec<ParseNode> {
        ["3", "7"]
            .iter()
            .map(|digit| {
                ParseNode::nonterminal(START, vec![ParseNode::nonterminal("t1", vec![
                    ParseNode::terminal(*digit),
                ])])
            })
            .collect()
    }

    fn expand_with(oracle: impl FnMut(&str) -> bool + 'static) -> (Grammar, Vec<ParseNode>) {
        let trees = digit_trees();
        let mut oracle = CachingOracle::new(oracle);
        let allocator = NtAllocator::new(5);
        let mut state = SynthesisState::new(&mut oracle, &allocator);
        state.grammar = build_grammar(&trees);
        state.trees = trees;
        ExpandTokens::do_pass(ExpandConfig::default(), &mut state).unwrap();
        (state.grammar, state.trees)
    }

    #[test]
    fn free_digit_strings_promote_to_tdigits() {
        let (grammar, _) =
            expand_with(|s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(grammar.rule("t1").unwrap().bodies, vec![vec!["tdigits".to_string()]]);
        assert!(grammar.contains("tdigits"));
        assert_eq!(grammar.rule("tdigit").unwrap().bodies.len(), 10);
    }

    #[test]
    fn no_leading_zeroes_promotes_to_tinteger() {
        let (grammar, _) = expand_with(|s: &str| {
            !s.is_empty()
                && s.chars().all(|c| c.is_ascii_digit())
                && (s == "0" || !s.starts_with('0'))
        });
        assert_eq!(grammar.rule("t1").unwrap().bodies, vec![vec!["tinteger".to_string()]]);
        assert!(grammar.contains("tnzdigit"));
        assert!(grammar.contains("tdigits"));
    }

    #[test]
    fn single_digits_only_promote_to_tdigit() {
        let (grammar, _) =
            expand_with(|s: &str| s.len() == 1 && s.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(grammar.rule("t1").unwrap().bodies, vec![vec!["tdigit".to_string()]]);
        assert!(!grammar.contains("tdigits"));
        assert!(!grammar.contains("tinteger"));
    }

    #[test]
    fn refused_generalisation_leaves_the_rule_alone() {
        let (grammar, _) = expand_with(|s: &str| s == "3" || s == "7");
        assert_eq!(grammar.rule("t1").unwrap().bodies, vec![
            vec![quote_terminal("3")],
            vec![quote_terminal("7")],
        ]);
        assert!(!grammar.contains("tdigit"));
    }

    #[test]
    fn schema_rules_are_inserted_once() {
        let rules = DigitSchema::Integer.rules();
        let names: Vec<&str> = rules.iter().map(|rule| rule.start.as_str()).collect();
        assert_eq!(names, ["tinteger", "tnzdigit", "tdigits", "tdigit"]);
        let (grammar, _) =
            expand_with(|s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()));
        // tdigit appears exactly once even though two schemas reference it.
        assert_eq!(grammar.keys().filter(|k| *k == "tdigit").count(), 1);
    }
}
