// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! The combination engine: reducing a sequence of lexical readings to a
//! single constituent by typed function application.

use itertools::Itertools;
use logic::syntax::{Formula, SentenceNode, Type};
use logic::term::beta::simplify;
use std::collections::HashSet;
use thiserror::Error;

use crate::lexicon::Lexicon;

/// Two adjacent terms whose types do not allow function application in
/// either direction. Internal to the search: every failed combination
/// attempt is caught and prunes that branch, so this error never reaches a
/// caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("the terms cannot be combined by function application")]
pub struct CombinationError;

/// An error encountered while translating a whole sentence.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TranslationError {
    /// The sentence had no words.
    #[error("cannot translate an empty sentence")]
    EmptySentence,
    /// No assignment of readings reduced the sentence to one constituent.
    /// Carries the most-reduced stalled hypothesis for diagnosis.
    #[error("no reading of the sentence type-checks; stuck at {}", format_stuck(.0))]
    Untranslatable(Vec<SentenceNode>),
}

fn format_stuck(terms: &[SentenceNode]) -> String {
    terms
        .iter()
        .map(|t| format!("'{}' : {}", t.text, t.typ.concise()))
        .join(", ")
}

/// Translate an English sentence into its logical readings.
///
/// Each word contributes its lexicon readings (or the [`default_readings`]
/// for words the lexicon does not know), and every combination of readings
/// is reduced by pairwise function application until a single constituent
/// remains. Finished readings are beta-reduced and deduplicated, preserving
/// the order in which they were found. More than one reading is a normal
/// outcome for an ambiguous sentence; zero readings is a
/// [`TranslationError`].
pub fn translate_sentence(
    sentence: &str,
    lexicon: &Lexicon,
) -> Result<Vec<SentenceNode>, TranslationError> {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    if words.is_empty() {
        return Err(TranslationError::EmptySentence);
    }

    let candidates: Vec<Vec<SentenceNode>> = words
        .iter()
        .map(|word| {
            lexicon
                .get(*word)
                .cloned()
                .unwrap_or_else(|| default_readings(word))
        })
        .collect();

    let mut in_progress: Vec<Vec<SentenceNode>> = Vec::new();
    let mut finished: Vec<SentenceNode> = Vec::new();
    // the most-reduced hypothesis that stalled, kept for error reporting
    let mut stalled: Option<Vec<SentenceNode>> = None;

    for hypothesis in candidates.into_iter().multi_cartesian_product() {
        if hypothesis.len() == 1 {
            finished.extend(hypothesis);
        } else {
            in_progress.push(hypothesis);
        }
    }
    log::debug!(
        "translating {} words, {} initial hypotheses",
        words.len(),
        in_progress.len() + finished.len()
    );

    while !in_progress.is_empty() {
        let mut next = Vec::new();
        for terms in in_progress {
            let stepped = step(&terms);
            if stepped.is_empty() {
                // no adjacent pair combines; this hypothesis is dead
                if stalled.as_ref().map_or(true, |s| terms.len() < s.len()) {
                    stalled = Some(terms);
                }
                continue;
            }
            for new_terms in stepped {
                if new_terms.len() == 1 {
                    finished.extend(new_terms);
                } else {
                    next.push(new_terms);
                }
            }
        }
        in_progress = next;
    }

    let mut seen = HashSet::new();
    let mut readings = Vec::new();
    for node in finished {
        let node = SentenceNode {
            formula: simplify(&node.formula),
            ..node
        };
        if seen.insert((node.formula.clone(), node.typ.clone())) {
            readings.push(node);
        }
    }

    if readings.is_empty() {
        log::debug!("no finished reading; most-reduced stall: {stalled:?}");
        Err(TranslationError::Untranslatable(
            stalled.unwrap_or_default(),
        ))
    } else {
        Ok(readings)
    }
}

/// Produce every sequence reachable from `terms` by combining one adjacent
/// pair. An empty result means the hypothesis is stuck.
fn step(terms: &[SentenceNode]) -> Vec<Vec<SentenceNode>> {
    let mut stepped = Vec::new();
    for i in 0..terms.len() - 1 {
        if let Ok(combined) = combine(&terms[i], &terms[i + 1]) {
            let mut new_terms = terms[..i].to_vec();
            new_terms.push(combined);
            new_terms.extend_from_slice(&terms[i + 2..]);
            stepped.push(new_terms);
        }
    }
    stepped
}

/// Whether `t1` can apply to `t2`: `t1` must denote a function whose
/// argument type is exactly `t2`'s type.
pub fn can_combine(t1: &SentenceNode, t2: &SentenceNode) -> bool {
    matches!(&t1.typ, Type::Complex(left, _) if left.as_ref() == &t2.typ)
}

/// Combine two adjacent constituents by function application, in whichever
/// direction the types allow. The combined `text` keeps the surface order
/// even when the right-hand term was the function.
pub fn combine(t1: &SentenceNode, t2: &SentenceNode) -> Result<SentenceNode, CombinationError> {
    let text = format!("{} {}", t1.text, t2.text);
    let apply = |applier: &SentenceNode, appliee: &SentenceNode| {
        let result = match &applier.typ {
            Type::Complex(_, right) => right.as_ref().clone(),
            _ => unreachable!("can_combine only accepts complex types"),
        };
        SentenceNode {
            text: text.clone(),
            formula: Formula::call(&applier.formula, &appliee.formula),
            typ: result,
        }
    };
    if can_combine(t1, t2) {
        Ok(apply(t1, t2))
    } else if can_combine(t2, t1) {
        Ok(apply(t2, t1))
    } else {
        Err(CombinationError)
    }
}

/// The built-in readings for a word the lexicon does not know: an entity, a
/// one-place predicate, and a two-place predicate.
pub fn default_readings(word: &str) -> Vec<SentenceNode> {
    let predicate = Formula::var(&title_case(word));
    vec![
        SentenceNode::new(word, Formula::var(&word.to_lowercase()), Type::entity()),
        SentenceNode::new(
            word,
            Formula::lambda("x", Formula::call(&predicate, Formula::var("x"))),
            Type::complex(Type::entity(), Type::truth()),
        ),
        SentenceNode::new(
            word,
            Formula::lambda(
                "x",
                Formula::lambda(
                    "y",
                    Formula::app(&predicate, [Formula::var("x"), Formula::var("y")]),
                ),
            ),
            Type::complex(
                Type::entity(),
                Type::complex(Type::entity(), Type::truth()),
            ),
        ),
    ]
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::load_lexicon;
    use logic::parser::{formula, semtype};

    fn fragment() -> Lexicon {
        let json = serde_json::json!({
            "John": [{"d": "j", "t": "e"}],
            "Mary": [{"d": "m", "t": "e"}],
            "is": [{"d": "LP.P", "t": "<et, et>"}],
            "good": [{"d": "Lx.Good(x)", "t": "et"}],
            "bad": [{"d": "Lx.Bad(x)", "t": "et"}],
            "every": [{"d": "LP.LQ.Ax.P(x) -> Q(x)", "t": "<et, <et, t>>"}],
            "child": [{"d": "Lx.Child(x)", "t": "et"}],
            "the": [{"d": "LP.ix.P(x)", "t": "<et, e>"}],
        });
        load_lexicon(&json).expect("test lexicon should load")
    }

    #[test]
    fn test_combine_to_saturate_predicate() {
        let pred = SentenceNode::new("does", formula("Lx.P(x)"), semtype("et"));
        let entity = SentenceNode::new("me", formula("me"), semtype("e"));
        assert!(can_combine(&pred, &entity));
        let node = combine(&pred, &entity).unwrap();
        assert_eq!(node.text, "does me");
        assert_eq!(node.formula, Formula::call(&pred.formula, &entity.formula));
        assert_eq!(node.typ, semtype("t"));
    }

    #[test]
    fn test_combine_keeps_surface_order() {
        // the entity comes first in the sentence but the predicate applies
        let entity = SentenceNode::new("me", formula("me"), semtype("e"));
        let pred = SentenceNode::new("sleeps", formula("Lx.Sleeps(x)"), semtype("et"));
        let node = combine(&entity, &pred).unwrap();
        assert_eq!(node.text, "me sleeps");
        assert_eq!(node.formula, Formula::call(&pred.formula, &entity.formula));
        assert_eq!(node.typ, semtype("t"));
    }

    #[test]
    fn test_combine_every_child() {
        let lexicon = fragment();
        let every = &lexicon["every"][0];
        let child = &lexicon["child"][0];
        let node = combine(every, child).unwrap();
        assert_eq!(node.text, "every child");
        assert_eq!(node.formula, Formula::call(&every.formula, &child.formula));
        assert_eq!(node.typ, semtype("<et, t>"));
    }

    #[test]
    fn test_cannot_combine_mismatched_types() {
        let pred = SentenceNode::new("does", formula("Lx.P(x)"), semtype("et"));
        let entity = SentenceNode::new("me", formula("me"), semtype("e"));
        assert!(!can_combine(&pred, &pred));
        assert!(!can_combine(&entity, &pred));
        assert!(!can_combine(&entity, &entity));
        assert_eq!(combine(&pred, &pred), Err(CombinationError));
    }

    #[test]
    fn test_translate_is_good() {
        let readings = translate_sentence("is good", &fragment()).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].text, "is good");
        assert_eq!(readings[0].formula, formula("Lx.Good(x)"));
        assert_eq!(readings[0].typ, semtype("et"));
    }

    #[test]
    fn test_translate_john_is_good() {
        let readings = translate_sentence("John is good", &fragment()).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].text, "John is good");
        assert_eq!(readings[0].formula, formula("Good(j)"));
        assert_eq!(readings[0].typ, semtype("t"));
    }

    #[test]
    fn test_translate_every_child_is_good() {
        let readings = translate_sentence("every child is good", &fragment()).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].formula, formula("Ax.Child(x) -> Good(x)"));
        assert_eq!(readings[0].typ, semtype("t"));
    }

    #[test]
    fn test_translate_the_child() {
        let readings = translate_sentence("the child", &fragment()).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].formula, formula("ix.Child(x)"));
        assert_eq!(readings[0].typ, semtype("e"));
    }

    #[test]
    fn test_translate_unknown_word_defaults() {
        // an unknown word is ambiguous between its predicate readings
        let readings = translate_sentence("John whorlious", &fragment()).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].formula, formula("Whorlious(j)"));
        assert_eq!(readings[0].typ, semtype("t"));
        assert_eq!(readings[1].formula, formula("Ly.Whorlious(j, y)"));
        assert_eq!(readings[1].typ, semtype("et"));
    }

    #[test]
    fn test_translate_invalid_sentence() {
        let err = translate_sentence("every John is good", &fragment()).unwrap_err();
        assert!(matches!(err, TranslationError::Untranslatable(_)));
    }

    #[test]
    fn test_translate_stuck_unknown_word_is_named() {
        let err = translate_sentence("John is good whorlious", &fragment()).unwrap_err();
        assert!(
            err.to_string().contains("whorlious"),
            "error should name the stuck word: {err}"
        );
    }

    #[test]
    fn test_translate_empty_sentence() {
        assert_eq!(
            translate_sentence("   ", &fragment()),
            Err(TranslationError::EmptySentence)
        );
    }

    #[test]
    fn test_duplicate_readings_are_deduplicated() {
        let json = serde_json::json!({
            "John": [{"d": "j", "t": "e"}, {"d": "j", "t": "e"}],
            "sleeps": [{"d": "Lx.Sleeps(x)", "t": "et"}],
        });
        let lexicon = load_lexicon(&json).unwrap();
        let readings = translate_sentence("John sleeps", &lexicon).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].formula, formula("Sleeps(j)"));
    }

    #[test]
    fn test_default_readings() {
        let readings = default_readings("walks");
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].formula, formula("walks"));
        assert_eq!(readings[0].typ, semtype("e"));
        assert_eq!(readings[1].formula, formula("Lx.Walks(x)"));
        assert_eq!(readings[1].typ, semtype("et"));
        assert_eq!(readings[2].formula, formula("Lx.Ly.Walks(x, y)"));
        assert_eq!(readings[2].typ, semtype("<e, <e, t>>"));
    }
}
