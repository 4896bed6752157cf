// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Evaluation of formulas against a finite model of individuals.

use crate::syntax::{BinOp, Binder, Formula};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Individual is an integer type for representing members of a model's
/// domain.
pub type Individual = usize;

/// The denotation of an evaluated formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Denotation {
    /// A truth value
    Truth(bool),
    /// A single individual
    Entity(Individual),
    /// The extension of a one-place predicate
    Set(BTreeSet<Individual>),
    /// A definite description with no unique referent
    Undefined,
}

impl Denotation {
    /// A short description of the denotation's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Denotation::Truth(_) => "a truth value",
            Denotation::Entity(_) => "an individual",
            Denotation::Set(_) => "a predicate extension",
            Denotation::Undefined => "an undefined description",
        }
    }
}

/// An error encountered while evaluating a formula.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EvalError {
    /// The formula referred to a name with no assignment in the model.
    #[error("no assignment for variable {0}")]
    UnboundVariable(String),
    /// Lambdas denote unsaturated functions, not truth values or individuals.
    #[error("cannot evaluate the unsaturated function {0}")]
    UnsaturatedLambda(String),
    /// An operand had the wrong kind of denotation.
    #[error("expected {expected} but found {found}")]
    ExpectedButFound {
        /// The kind of denotation the operator needed
        expected: &'static str,
        #[allow(missing_docs)]
        found: &'static str,
    },
}

/// Transient variable bindings introduced during quantifier and iota
/// evaluation. Each frame extends the environment functionally, so sibling
/// subformulas can never observe one another's bindings.
pub type Environment = im::HashMap<String, Denotation>;

/// A finite model of the world: a domain of individuals together with fixed
/// assignments of names to individuals or predicate extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldModel {
    /// The domain of discourse
    pub individuals: BTreeSet<Individual>,
    /// Name assignments; one-place predicates denote subsets of the domain
    pub assignments: HashMap<String, Denotation>,
}

impl WorldModel {
    /// Constructor for a WorldModel.
    pub fn new(
        individuals: impl IntoIterator<Item = Individual>,
        assignments: impl IntoIterator<Item = (String, Denotation)>,
    ) -> Self {
        Self {
            individuals: individuals.into_iter().collect(),
            assignments: assignments.into_iter().collect(),
        }
    }

    /// Evaluate a formula to its denotation in this model.
    pub fn eval(&self, formula: &Formula) -> Result<Denotation, EvalError> {
        self.eval_env(formula, &Environment::new())
    }

    /// Evaluate a formula under an environment of transient variable
    /// bindings. The environment takes precedence over the model's fixed
    /// assignments.
    pub fn eval_env(&self, formula: &Formula, env: &Environment) -> Result<Denotation, EvalError> {
        match formula {
            Formula::Var(name) => match env.get(name).or_else(|| self.assignments.get(name)) {
                Some(d) => Ok(d.clone()),
                None => Err(EvalError::UnboundVariable(name.clone())),
            },
            Formula::BinOp(BinOp::And, lhs, rhs) => {
                if !self.eval_bool(lhs, env)? {
                    Ok(Denotation::Truth(false))
                } else {
                    Ok(Denotation::Truth(self.eval_bool(rhs, env)?))
                }
            }
            Formula::BinOp(BinOp::Or, lhs, rhs) => {
                if self.eval_bool(lhs, env)? {
                    Ok(Denotation::Truth(true))
                } else {
                    Ok(Denotation::Truth(self.eval_bool(rhs, env)?))
                }
            }
            Formula::BinOp(BinOp::Implies, lhs, rhs) => {
                if !self.eval_bool(lhs, env)? {
                    Ok(Denotation::Truth(true))
                } else {
                    Ok(Denotation::Truth(self.eval_bool(rhs, env)?))
                }
            }
            Formula::BinOp(BinOp::Iff, lhs, rhs) => Ok(Denotation::Truth(
                self.eval_bool(lhs, env)? == self.eval_bool(rhs, env)?,
            )),
            Formula::Not(operand) => Ok(Denotation::Truth(!self.eval_bool(operand, env)?)),
            Formula::Call(caller, arg) => {
                let extension = match self.eval_env(caller, env)? {
                    Denotation::Set(s) => s,
                    other => {
                        return Err(EvalError::ExpectedButFound {
                            expected: "a predicate extension",
                            found: other.kind(),
                        })
                    }
                };
                match self.eval_env(arg, env)? {
                    Denotation::Entity(d) => Ok(Denotation::Truth(extension.contains(&d))),
                    // a description without a referent is a member of nothing
                    Denotation::Undefined => Ok(Denotation::Truth(false)),
                    other => Err(EvalError::ExpectedButFound {
                        expected: "an individual",
                        found: other.kind(),
                    }),
                }
            }
            Formula::Binding {
                binder: Binder::Lambda,
                ..
            } => Err(EvalError::UnsaturatedLambda(formula.to_string())),
            Formula::Binding {
                binder: Binder::ForAll,
                symbol,
                body,
            } => {
                let sat = self.satisfiers(body, symbol, env)?;
                Ok(Denotation::Truth(sat == self.individuals))
            }
            Formula::Binding {
                binder: Binder::Exists,
                symbol,
                body,
            } => {
                let sat = self.satisfiers(body, symbol, env)?;
                Ok(Denotation::Truth(!sat.is_empty()))
            }
            Formula::Binding {
                binder: Binder::Iota,
                symbol,
                body,
            } => {
                let sat = self.satisfiers(body, symbol, env)?;
                if sat.len() == 1 {
                    Ok(Denotation::Entity(*sat.iter().next().unwrap()))
                } else {
                    // no unique referent; a valid outcome, not an error
                    Ok(Denotation::Undefined)
                }
            }
        }
    }

    /// The set of individuals that make `body` true when bound to `symbol`.
    pub fn satisfiers(
        &self,
        body: &Formula,
        symbol: &str,
        env: &Environment,
    ) -> Result<BTreeSet<Individual>, EvalError> {
        let mut sat = BTreeSet::new();
        for &individual in &self.individuals {
            let env = env.update(symbol.to_string(), Denotation::Entity(individual));
            if self.eval_bool(body, &env)? {
                sat.insert(individual);
            }
        }
        Ok(sat)
    }

    fn eval_bool(&self, formula: &Formula, env: &Environment) -> Result<bool, EvalError> {
        match self.eval_env(formula, env)? {
            Denotation::Truth(b) => Ok(b),
            other => Err(EvalError::ExpectedButFound {
                expected: "a truth value",
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::formula;

    const JOHN: Individual = 0;
    const MARY: Individual = 1;

    fn test_model() -> WorldModel {
        let set = |members: &[Individual]| Denotation::Set(members.iter().copied().collect());
        WorldModel::new(
            [JOHN, MARY],
            [
                ("j".to_string(), Denotation::Entity(JOHN)),
                ("m".to_string(), Denotation::Entity(MARY)),
                ("Good".to_string(), set(&[JOHN])),
                ("Bad".to_string(), set(&[MARY])),
                ("Man".to_string(), set(&[JOHN])),
                ("Human".to_string(), set(&[JOHN, MARY])),
                ("Alien".to_string(), set(&[])),
            ],
        )
    }

    fn eval_truth(model: &WorldModel, s: &str) -> bool {
        match model.eval(&formula(s)) {
            Ok(Denotation::Truth(b)) => b,
            other => panic!("expected a truth value from {s}, got {other:?}"),
        }
    }

    #[test]
    fn test_membership() {
        let model = test_model();
        assert!(eval_truth(&model, "Good(j)"));
        assert!(!eval_truth(&model, "~Good(j)"));
        assert!(!eval_truth(&model, "Bad(j)"));
        assert!(eval_truth(&model, "~Bad(j)"));
    }

    #[test]
    fn test_connectives() {
        let model = test_model();
        assert!(eval_truth(&model, "Bad(m) & Good(j)"));
        assert!(!eval_truth(&model, "Bad(j) & Good(j)"));
        assert!(eval_truth(&model, "Bad(j) | Good(j)"));
        assert!(eval_truth(&model, "Bad(j) -> Alien(m)"));
        assert!(!eval_truth(&model, "Good(j) -> Alien(m)"));
        assert!(eval_truth(&model, "Good(j) <-> Bad(m)"));
        assert!(!eval_truth(&model, "Good(j) <-> Good(m)"));
    }

    #[test]
    fn test_short_circuit() {
        // the right operand is never evaluated, so its unbound variable
        // cannot fail the evaluation
        let model = test_model();
        assert!(!eval_truth(&model, "Bad(j) & Mystery(j)"));
        assert!(eval_truth(&model, "Good(j) | Mystery(j)"));
        assert!(eval_truth(&model, "Bad(j) -> Mystery(j)"));
    }

    #[test]
    fn test_quantifiers() {
        let model = test_model();
        assert!(!eval_truth(&model, "Ax.Good(x)"));
        assert!(eval_truth(&model, "Ex.Good(x)"));
        assert!(!eval_truth(&model, "Ax.Bad(x)"));
        assert!(eval_truth(&model, "Ax.Human(x)"));
        assert!(eval_truth(&model, "Ex.Bad(x)"));
        assert!(!eval_truth(&model, "Ex.Alien(x)"));
        assert!(eval_truth(&model, "Ax.Good(x) | Bad(x)"));
        assert!(eval_truth(&model, "Ex.Good(x) & Human(x)"));
    }

    #[test]
    fn test_iota() {
        let model = test_model();
        assert_eq!(
            model.eval(&formula("ix.Man(x)")),
            Ok(Denotation::Entity(JOHN))
        );
        // zero or two or more satisfiers leave the description undefined
        assert_eq!(model.eval(&formula("ix.Human(x)")), Ok(Denotation::Undefined));
        assert_eq!(model.eval(&formula("ix.Alien(x)")), Ok(Denotation::Undefined));
        // an undefined description is a member of nothing
        assert!(!eval_truth(&model, "Good(ix.Human(x))"));
        // the man is good
        assert!(eval_truth(&model, "Good(ix.Man(x))"));
    }

    #[test]
    fn test_satisfiers() {
        let model = test_model();
        let env = Environment::new();
        let good = model
            .satisfiers(&formula("Good(x)"), "x", &env)
            .unwrap();
        assert_eq!(good, BTreeSet::from([JOHN]));
        let human = model
            .satisfiers(&formula("Human(x)"), "x", &env)
            .unwrap();
        assert_eq!(human, BTreeSet::from([JOHN, MARY]));
        let alien = model
            .satisfiers(&formula("Alien(x)"), "x", &env)
            .unwrap();
        assert_eq!(alien, BTreeSet::new());
    }

    #[test]
    fn test_assignments_do_not_leak() {
        let model = test_model();
        let before = model.assignments.clone();

        // a quantifier over a name the model also assigns does not disturb it
        assert!(eval_truth(&model, "Ex.Good(x) & [Aj.Human(j)]"));
        assert_eq!(model.assignments, before);

        // nested quantifiers over the same variable restore each frame
        assert!(eval_truth(&model, "Ex.Good(x) & [Ex.Bad(x)]"));
        assert_eq!(model.assignments, before);

        // the binding introduced for a satisfier search is invisible outside
        let env = Environment::new();
        model.satisfiers(&formula("Good(q)"), "q", &env).unwrap();
        assert!(env.get("q").is_none());
        assert!(!model.assignments.contains_key("q"));
    }

    #[test]
    fn test_environment_shadows_model() {
        let model = test_model();
        // within the quantifier, j is rebound away from John
        let shadowed = formula("Aj.Human(j)");
        assert_eq!(model.eval(&shadowed), Ok(Denotation::Truth(true)));
        assert_eq!(model.assignments["j"], Denotation::Entity(JOHN));
    }

    #[test]
    fn test_eval_errors() {
        let model = test_model();
        assert_eq!(
            model.eval(&formula("Mystery(j)")),
            Err(EvalError::UnboundVariable("Mystery".to_string()))
        );
        assert_eq!(
            model.eval(&formula("Lx.Good(x)")),
            Err(EvalError::UnsaturatedLambda("Lx.Good(x)".to_string()))
        );
        // an individual is not a predicate extension
        assert_eq!(
            model.eval(&formula("j(m)")),
            Err(EvalError::ExpectedButFound {
                expected: "a predicate extension",
                found: "an individual",
            })
        );
        // a connective needs truth values
        assert_eq!(
            model.eval(&formula("j & Good(j)")),
            Err(EvalError::ExpectedButFound {
                expected: "a truth value",
                found: "an individual",
            })
        );
    }
}
