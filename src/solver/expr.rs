// src/solver/expr.rs

//! Backend-independent linear expressions.

use std::ops::{Add, Mul};

/// Opaque reference to a variable created by a [`MipSolver`](super::MipSolver).
///
/// The wrapped index is the creation order within that solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarHandle(pub usize);

/// Relation between the two sides of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Le,
    Ge,
    Eq,
}

/// `Σ coef · var + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarHandle, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    pub fn term(var: VarHandle, coef: f64) -> Self {
        Self {
            terms: vec![(var, coef)],
            constant: 0.0,
        }
    }

    /// Unit-coefficient sum of `vars`.
    pub fn sum(vars: impl IntoIterator<Item = VarHandle>) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1.0)).collect(),
            constant: 0.0,
        }
    }

    pub fn add_term(&mut self, var: VarHandle, coef: f64) {
        self.terms.push((var, coef));
    }

    pub fn terms(&self) -> &[(VarHandle, f64)] {
        &self.terms
    }

    pub fn constant_part(&self) -> f64 {
        self.constant
    }

    /// Value of the expression under the given assignment.
    pub fn evaluate(&self, mut value: impl FnMut(VarHandle) -> f64) -> f64 {
        self.terms
            .iter()
            .map(|&(v, c)| c * value(v))
            .sum::<f64>()
            + self.constant
    }
}

impl From<VarHandle> for LinearExpr {
    fn from(var: VarHandle) -> Self {
        LinearExpr::term(var, 1.0)
    }
}

impl From<f64> for LinearExpr {
    fn from(value: f64) -> Self {
        LinearExpr::constant(value)
    }
}

impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: LinearExpr) -> LinearExpr {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl Mul<f64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(mut self, rhs: f64) -> LinearExpr {
        for (_, c) in &mut self.terms {
            *c *= rhs;
        }
        self.constant *= rhs;
        self
    }
}
