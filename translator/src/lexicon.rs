// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Loading the lexicon from its JSON source format.
//!
//! The source format maps each word to an array of readings, each a
//! `{"d": <formula-text>, "t": <type-text>}` object. Ambiguous words simply
//! carry more than one reading.

use logic::parser::{parse_formula, parse_type};
use logic::syntax::SentenceNode;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// A lexicon maps each surface word to its candidate readings.
pub type Lexicon = HashMap<String, Vec<SentenceNode>>;

/// An error encountered while loading a lexicon.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The lexicon as a whole was not an object of word entries.
    #[error("lexicon is not a JSON object mapping words to readings")]
    NotAnObject,
    /// An entry did not have the expected `{"d": …, "t": …}` shape.
    #[error("entry for {word} is malformed: {message}")]
    MalformedEntry {
        /// The offending word
        word: String,
        /// What was wrong with its entry
        message: String,
    },
    /// The `d` field of an entry did not parse as a formula.
    #[error("could not parse denotation of {word}: {message}")]
    BadDenotation {
        /// The offending word
        word: String,
        #[allow(missing_docs)]
        message: String,
    },
    /// The `t` field of an entry did not parse as a type.
    #[error("could not parse type of {word}: {message}")]
    BadType {
        /// The offending word
        word: String,
        #[allow(missing_docs)]
        message: String,
    },
}

/// One reading in the lexicon's source format.
#[derive(Debug, Clone, Deserialize)]
struct RawReading {
    /// Formula-text for the word's denotation
    d: String,
    /// Type-text for the denotation's semantic type
    t: String,
}

/// Load a lexicon from parsed JSON.
///
/// Every reading's `d` and `t` fields are parsed with the formula and type
/// parsers; any failure is reported as a [`LexiconError`] naming the
/// offending word.
pub fn load_lexicon(json: &serde_json::Value) -> Result<Lexicon, LexiconError> {
    let entries = json.as_object().ok_or(LexiconError::NotAnObject)?;
    let mut lexicon = Lexicon::new();
    for (word, readings) in entries {
        lexicon.insert(word.clone(), load_entry(word, readings)?);
    }
    Ok(lexicon)
}

fn load_entry(word: &str, readings: &serde_json::Value) -> Result<Vec<SentenceNode>, LexiconError> {
    let readings = readings
        .as_array()
        .ok_or_else(|| LexiconError::MalformedEntry {
            word: word.to_string(),
            message: "expected an array of readings".to_string(),
        })?;
    readings
        .iter()
        .map(|reading| {
            let raw: RawReading = serde_json::from_value(reading.clone()).map_err(|err| {
                LexiconError::MalformedEntry {
                    word: word.to_string(),
                    message: err.to_string(),
                }
            })?;
            let denotation = parse_formula(&raw.d).map_err(|err| LexiconError::BadDenotation {
                word: word.to_string(),
                message: err.to_string(),
            })?;
            let typ = parse_type(&raw.t).map_err(|err| LexiconError::BadType {
                word: word.to_string(),
                message: err.to_string(),
            })?;
            Ok(SentenceNode::new(word, denotation, typ))
        })
        .collect()
}
