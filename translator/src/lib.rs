// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Translation from English sentences to logical formulas.
//!
//! A sentence is translated by looking up candidate readings for each word in
//! a [`lexicon::Lexicon`] and reducing each sequence of candidates to a single
//! constituent by typed function application.

// configure clippy
#![allow(clippy::needless_return)]
// documentation-related lints (only checked when running rustdoc)
#![warn(missing_docs)]
#![allow(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod combination;
pub mod lexicon;

pub use combination::{translate_sentence, TranslationError};
pub use lexicon::{load_lexicon, Lexicon, LexiconError};
