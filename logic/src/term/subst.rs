// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Substitution of free variables in formulas.

use crate::syntax::Formula;

/// Replace every unbound occurrence of `name` in `formula` with `replacement`,
/// returning a new formula.
///
/// A binding construct whose bound symbol equals `name` shadows it: the
/// substitution does not enter that body. The substitution is not
/// capture-avoiding: a variable occurring free in `replacement` may be
/// captured by a binder in `formula` that reuses its name. The formulas built
/// by the translator never exercise that case.
pub fn replace_variable(formula: &Formula, name: &str, replacement: &Formula) -> Formula {
    match formula {
        Formula::Var(v) if v == name => replacement.clone(),
        Formula::Var(_) => formula.clone(),
        Formula::BinOp(op, lhs, rhs) => Formula::BinOp(
            *op,
            Box::new(replace_variable(lhs, name, replacement)),
            Box::new(replace_variable(rhs, name, replacement)),
        ),
        Formula::Not(operand) => {
            Formula::Not(Box::new(replace_variable(operand, name, replacement)))
        }
        Formula::Call(caller, arg) => Formula::Call(
            Box::new(replace_variable(caller, name, replacement)),
            Box::new(replace_variable(arg, name, replacement)),
        ),
        Formula::Binding { symbol, .. } if symbol == name => formula.clone(),
        Formula::Binding {
            binder,
            symbol,
            body,
        } => Formula::Binding {
            binder: *binder,
            symbol: symbol.clone(),
            body: Box::new(replace_variable(body, name, replacement)),
        },
    }
}
