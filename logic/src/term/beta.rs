// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Beta-reduction of formulas.

use crate::syntax::{Binder, Formula};
use crate::term::subst::replace_variable;

/// Simplify a formula by call-by-name beta-reduction.
///
/// A `Call` whose simplified caller is a lambda reduces to the lambda's body
/// with the argument substituted for the parameter, and the result is
/// simplified again. Every other variant is rebuilt with simplified children.
/// The result contains no redex and simplifying it again is a no-op.
pub fn simplify(formula: &Formula) -> Formula {
    match formula {
        Formula::Var(_) => formula.clone(),
        Formula::BinOp(op, lhs, rhs) => {
            Formula::BinOp(*op, Box::new(simplify(lhs)), Box::new(simplify(rhs)))
        }
        Formula::Not(operand) => Formula::Not(Box::new(simplify(operand))),
        Formula::Binding {
            binder,
            symbol,
            body,
        } => Formula::Binding {
            binder: *binder,
            symbol: symbol.clone(),
            body: Box::new(simplify(body)),
        },
        Formula::Call(caller, arg) => {
            let caller = simplify(caller);
            let arg = simplify(arg);
            match caller {
                Formula::Binding {
                    binder: Binder::Lambda,
                    symbol,
                    body,
                } => simplify(&replace_variable(&body, &symbol, &arg)),
                _ => Formula::Call(Box::new(caller), Box::new(arg)),
            }
        }
    }
}
