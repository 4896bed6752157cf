// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! The AST for logical formulas, semantic types, and sentence constituents.

use serde::Serialize;
use std::fmt;

/// An atomic semantic type, written as a single letter in type expressions.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Serialize, PartialOrd, Ord)]
pub enum AtomicType {
    /// Individuals in the domain of a model (`e`)
    Entity,
    /// Truth values (`t`)
    Truth,
    /// Events (`v`)
    Event,
    /// Possible worlds (`s`)
    World,
}

impl AtomicType {
    /// The one-letter spelling used in type expressions.
    pub fn letter(&self) -> char {
        match self {
            AtomicType::Entity => 'e',
            AtomicType::Truth => 't',
            AtomicType::Event => 'v',
            AtomicType::World => 's',
        }
    }
}

impl fmt::Display for AtomicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A semantic type: either atomic, or a function from the left type to the
/// right type.
#[derive(PartialEq, Eq, Clone, Debug, Hash, Serialize, PartialOrd, Ord)]
pub enum Type {
    /// One of the four atomic types
    Atomic(AtomicType),
    /// A function type, written `<left, right>`
    Complex(Box<Type>, Box<Type>),
}

impl From<&Type> for Type {
    /// Allows smart constructors to take either Type or &Type.
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

impl Type {
    /// The type of entities, `e`.
    pub fn entity() -> Self {
        Self::Atomic(AtomicType::Entity)
    }

    /// The type of truth values, `t`.
    pub fn truth() -> Self {
        Self::Atomic(AtomicType::Truth)
    }

    /// The type of events, `v`.
    pub fn event() -> Self {
        Self::Atomic(AtomicType::Event)
    }

    /// The type of possible worlds, `s`.
    pub fn world() -> Self {
        Self::Atomic(AtomicType::World)
    }

    /// Smart constructor for a function type.
    pub fn complex<T1, T2>(left: T1, right: T2) -> Self
    where
        T1: Into<Type>,
        T2: Into<Type>,
    {
        Self::Complex(Box::new(left.into()), Box::new(right.into()))
    }

    /// Render the type, recursively abbreviating `<x, y>` as `xy` whenever
    /// both `x` and `y` are atomic.
    pub fn concise(&self) -> String {
        match self {
            Type::Atomic(a) => a.to_string(),
            Type::Complex(left, right) => match (left.as_ref(), right.as_ref()) {
                (Type::Atomic(l), Type::Atomic(r)) => format!("{l}{r}"),
                _ => format!("<{}, {}>", left.concise(), right.concise()),
            },
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Atomic(a) => write!(f, "{a}"),
            Type::Complex(left, right) => write!(f, "<{left}, {right}>"),
        }
    }
}

/// Binary logical connectives.
#[allow(missing_docs)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Serialize, PartialOrd, Ord)]
pub enum BinOp {
    And,
    Or,
    Implies,
    Iff,
}

/// Variable-binding operators: each binds one symbol over a body.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Serialize, PartialOrd, Ord)]
pub enum Binder {
    /// Function abstraction, `Lx.body`
    Lambda,
    /// Universal quantification, `Ax.body`
    ForAll,
    /// Existential quantification, `Ex.body`
    Exists,
    /// Definite description ("the unique x such that body"), `ix.body`
    Iota,
}

/// A formula of the logical representation language.
///
/// Formulas are immutable trees compared by structural equality. Application
/// is unary; the n-ary surface syntax `F(x, y, z)` is represented as
/// `Call(Call(Call(F, x), y), z)`.
#[derive(PartialEq, Eq, Clone, Debug, Hash, Serialize, PartialOrd, Ord)]
pub enum Formula {
    /// A free or bound symbolic name
    Var(String),
    /// An applied binary connective
    BinOp(BinOp, Box<Formula>, Box<Formula>),
    /// Logical negation
    Not(Box<Formula>),
    /// A binding operator applied to a symbol and a body in which the symbol
    /// may occur free
    Binding {
        /// Which operator binds the symbol
        binder: Binder,
        /// The bound symbol
        symbol: String,
        /// The scope of the binding
        body: Box<Formula>,
    },
    /// Unary function application
    Call(Box<Formula>, Box<Formula>),
}

impl From<&Formula> for Formula {
    /// Allows smart constructors to take either Formula or &Formula.
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

/// Smart constructors for Formula. These generally take arguments by value or
/// reference and clone as needed; formulas are small so this is not a
/// performance concern.
impl Formula {
    /// Smart constructor for Var.
    pub fn var(name: &str) -> Self {
        Self::Var(name.to_string())
    }

    /// Smart constructor for `lhs & rhs`.
    pub fn and<T1, T2>(lhs: T1, rhs: T2) -> Self
    where
        T1: Into<Formula>,
        T2: Into<Formula>,
    {
        Self::BinOp(BinOp::And, Box::new(lhs.into()), Box::new(rhs.into()))
    }

    /// Smart constructor for `lhs | rhs`.
    pub fn or<T1, T2>(lhs: T1, rhs: T2) -> Self
    where
        T1: Into<Formula>,
        T2: Into<Formula>,
    {
        Self::BinOp(BinOp::Or, Box::new(lhs.into()), Box::new(rhs.into()))
    }

    /// Smart constructor for `lhs -> rhs`.
    pub fn implies<T1, T2>(lhs: T1, rhs: T2) -> Self
    where
        T1: Into<Formula>,
        T2: Into<Formula>,
    {
        Self::BinOp(BinOp::Implies, Box::new(lhs.into()), Box::new(rhs.into()))
    }

    /// Smart constructor for `lhs <-> rhs`.
    pub fn iff<T1, T2>(lhs: T1, rhs: T2) -> Self
    where
        T1: Into<Formula>,
        T2: Into<Formula>,
    {
        Self::BinOp(BinOp::Iff, Box::new(lhs.into()), Box::new(rhs.into()))
    }

    /// Smart constructor for negation.
    pub fn not<T>(operand: T) -> Self
    where
        T: Into<Formula>,
    {
        Self::Not(Box::new(operand.into()))
    }

    /// Smart constructor for an arbitrary binding operator.
    pub fn binding<T>(binder: Binder, symbol: &str, body: T) -> Self
    where
        T: Into<Formula>,
    {
        Self::Binding {
            binder,
            symbol: symbol.to_string(),
            body: Box::new(body.into()),
        }
    }

    /// Smart constructor for `Lsymbol.body`.
    pub fn lambda<T>(symbol: &str, body: T) -> Self
    where
        T: Into<Formula>,
    {
        Self::binding(Binder::Lambda, symbol, body)
    }

    /// Smart constructor for `Asymbol.body`.
    pub fn forall<T>(symbol: &str, body: T) -> Self
    where
        T: Into<Formula>,
    {
        Self::binding(Binder::ForAll, symbol, body)
    }

    /// Smart constructor for `Esymbol.body`.
    pub fn exists<T>(symbol: &str, body: T) -> Self
    where
        T: Into<Formula>,
    {
        Self::binding(Binder::Exists, symbol, body)
    }

    /// Smart constructor for `isymbol.body`.
    pub fn iota<T>(symbol: &str, body: T) -> Self
    where
        T: Into<Formula>,
    {
        Self::binding(Binder::Iota, symbol, body)
    }

    /// Smart constructor for unary application.
    pub fn call<T1, T2>(caller: T1, arg: T2) -> Self
    where
        T1: Into<Formula>,
        T2: Into<Formula>,
    {
        Self::Call(Box::new(caller.into()), Box::new(arg.into()))
    }

    /// Apply `caller` to a sequence of arguments, currying `F(x, y, z)` into
    /// `Call(Call(Call(F, x), y), z)`.
    pub fn app<T, I>(caller: T, args: I) -> Self
    where
        T: Into<Formula>,
        I: IntoIterator,
        I::Item: Into<Formula>,
    {
        args.into_iter()
            .fold(caller.into(), |acc, arg| Self::call(acc, arg))
    }

    // Rendering precedence; lower binds tighter. Used only by Display.
    fn prec(&self) -> u8 {
        match self {
            Formula::Var(_) | Formula::Not(_) | Formula::Call(..) => 1,
            Formula::BinOp(BinOp::And, ..) => 2,
            Formula::BinOp(BinOp::Or, ..) => 3,
            Formula::BinOp(BinOp::Implies | BinOp::Iff, ..) => 4,
            Formula::Binding { .. } => 5,
        }
    }

    // Render a child of `self`, bracketed when its precedence is looser than
    // the parent's, or equal and the child is on the right.
    fn fmt_child(
        &self,
        child: &Formula,
        right: bool,
        f: &mut fmt::Formatter<'_>,
        unicode: bool,
    ) -> fmt::Result {
        if child.prec() > self.prec() || (child.prec() == self.prec() && right) {
            write!(f, "[")?;
            child.fmt_op(f, unicode)?;
            write!(f, "]")
        } else {
            child.fmt_op(f, unicode)
        }
    }

    fn fmt_op(&self, f: &mut fmt::Formatter<'_>, unicode: bool) -> fmt::Result {
        match self {
            Formula::Var(name) => write!(f, "{name}"),
            Formula::BinOp(op, lhs, rhs) => {
                let glyph = match op {
                    BinOp::And => "&",
                    BinOp::Or => "|",
                    BinOp::Implies => "->",
                    BinOp::Iff => "<->",
                };
                self.fmt_child(lhs, false, f, unicode)?;
                write!(f, " {glyph} ")?;
                self.fmt_child(rhs, true, f, unicode)
            }
            Formula::Not(operand) => {
                write!(f, "~")?;
                self.fmt_child(operand, false, f, unicode)
            }
            Formula::Binding {
                binder,
                symbol,
                body,
            } => {
                let glyph = match (binder, unicode) {
                    (Binder::Lambda, false) => "L",
                    (Binder::Lambda, true) => "λ",
                    (Binder::ForAll, false) => "A",
                    (Binder::ForAll, true) => "∀",
                    (Binder::Exists, false) => "E",
                    (Binder::Exists, true) => "∃",
                    (Binder::Iota, false) => "i",
                    (Binder::Iota, true) => "ι",
                };
                write!(f, "{glyph}{symbol}.")?;
                body.fmt_op(f, unicode)
            }
            Formula::Call(caller, arg) => {
                // F(x)(y) is printed as F(x, y): walk down the left spine of
                // nested calls collecting the arguments.
                let mut args: Vec<&Formula> = vec![arg];
                let mut head: &Formula = caller;
                while let Formula::Call(c, a) = head {
                    args.push(a);
                    head = c;
                }
                match head {
                    Formula::Var(name) => write!(f, "{name}(")?,
                    // a non-constant function must be parenthesized in a call
                    _ => {
                        write!(f, "(")?;
                        head.fmt_op(f, unicode)?;
                        write!(f, ")(")?;
                    }
                }
                for (i, a) in args.iter().rev().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    a.fmt_op(f, unicode)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Formula {
    /// Renders the ASCII spelling; the alternate form (`{:#}`) uses the
    /// Unicode operator glyphs `λ`, `∀`, `∃` and `ι` instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unicode = f.alternate();
        self.fmt_op(f, unicode)
    }
}

/// A sentence constituent: some surface text together with the formula and
/// semantic type it denotes.
///
/// Nodes are immutable; combination builds new nodes rather than editing old
/// ones. `text` always preserves surface word order, even when the combined
/// constituents' logical order was swapped.
#[derive(PartialEq, Eq, Clone, Debug, Hash, Serialize)]
pub struct SentenceNode {
    /// The surface text this constituent covers
    pub text: String,
    /// Its denotation
    pub formula: Formula,
    /// The semantic type of the denotation
    pub typ: Type,
}

impl SentenceNode {
    /// Smart constructor taking the text by reference.
    pub fn new<F, T>(text: &str, formula: F, typ: T) -> Self
    where
        F: Into<Formula>,
        T: Into<Type>,
    {
        Self {
            text: text.to_string(),
            formula: formula.into(),
            typ: typ.into(),
        }
    }
}

impl fmt::Display for SentenceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.formula, self.typ.concise())
    }
}
