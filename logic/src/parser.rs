// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Parsers for formula-text and type-text.
//!
//! These two grammars are the durable wire format for formulas and types:
//! everything the system prints can be parsed back. Both the ASCII and the
//! Unicode spellings of the binding operators are accepted.

use crate::syntax::*;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use peg::{error::ParseError, str::LineCol};

peg::parser! {

grammar parser() for str {
    // A symbol is a letter other than the operator letters L, A, E and i,
    // followed by letters, digits, underscores, hyphens and apostrophes.
    rule symbol_start() = ['B'..='D' | 'F'..='K' | 'M'..='Z' | 'a'..='h' | 'j'..='z']
    rule symbol_char() = ['A'..='Z' | 'a'..='z' | '0'..='9' | '_' | '-' | '\'']

    pub(super) rule symbol() -> String
    = s:$(quiet!{symbol_start() symbol_char()*} / expected!("symbol"))
    { s.to_string() }

    rule _ = quiet!{ [' ' | '\t' | '\n' | '\r']* }

    rule binder() -> Binder
    = ("L" / "λ") { Binder::Lambda }
    / ("A" / "∀") { Binder::ForAll }
    / ("E" / "∃") { Binder::Exists }
    / ("i" / "ι") { Binder::Iota }

    // Call arguments; a zero-argument call is a syntax error.
    rule arglist() -> Vec<Formula>
    = "(" _ args:(expr() ++ (_ "," _)) _ ")" { args }

    pub(super) rule expr() -> Formula = precedence!{
        x:@ _ "->" _ y:(@) { Formula::implies(x, y) }
        x:@ _ "<->" _ y:(@) { Formula::iff(x, y) }
        --
        x:@ _ "|" _ y:(@) { Formula::or(x, y) }
        --
        x:@ _ "&" _ y:(@) { Formula::and(x, y) }
        --
        "~" _ x:@ { Formula::not(x) }
        --
        b:binder() _ s:symbol() _ "." _ body:expr() { Formula::binding(b, &s, body) }
        f:symbol() _ args:arglist() { Formula::app(Formula::Var(f), args) }
        "(" _ head:expr() _ ")" _ args:arglist() { Formula::app(head, args) }
        s:symbol() { Formula::Var(s) }
        "[" _ e:expr() _ "]" { e }
    }

    rule atomic() -> Type
    = "e" { Type::entity() }
    / "t" { Type::truth() }
    / "v" { Type::event() }
    / "s" { Type::world() }

    pub(super) rule semtype() -> Type
    = "<" _ l:semtype() _ "," _ r:semtype() _ ">" { Type::complex(l, r) }
    / l:atomic() r:atomic() { Type::complex(l, r) }
    / a:atomic() { a }

    pub(super) rule formula_text() -> Formula = _ f:expr() _ { f }
    pub(super) rule type_text() -> Type = _ t:semtype() _ { t }
}

}

/// Parse formula-text, reporting a position-qualified error on failure.
pub fn parse_formula(s: &str) -> Result<Formula, ParseError<LineCol>> {
    parser::formula_text(s)
}

/// Parse type-text, reporting a position-qualified error on failure.
pub fn parse_type(s: &str) -> Result<Type, ParseError<LineCol>> {
    parser::type_text(s)
}

/// Parse a single formula that is known to be valid.
pub fn formula(s: &str) -> Formula {
    parse_formula(s).expect("formula in test should parse")
}

/// Parse a single type that is known to be valid.
pub fn semtype(s: &str) -> Type {
    parse_type(s).expect("type in test should parse")
}

/// Convert an opaque FileId and error to a readable `Diagnostic`
pub fn parse_error_diagnostic<FileId>(
    file_id: FileId,
    e: &ParseError<LineCol>,
) -> Diagnostic<FileId> {
    Diagnostic::error()
        .with_message("could not parse input")
        .with_labels(vec![Label::primary(
            file_id,
            e.location.offset..e.location.offset + 1,
        )
        .with_message(format!("expected {}", e.expected))])
}
