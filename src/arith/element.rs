//! Value types that a recurrence can be evaluated on.

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

use num_complex::Complex;
use num_traits::Zero;

use super::{Exact, Scalar};
use crate::polynomial::Polynomial;

/// A ring element that can be scaled by the real scalar `R`.
///
/// Recurrences only ever add, subtract and multiply values and scale them
/// by coefficients, so real points, complex points and whole polynomials
/// (for symbolic evaluation) all go through the same evaluator.
pub trait Element<R: Scalar>:
    Clone + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
    /// `factor · self`.
    fn scale(&self, factor: &R) -> Self;

    /// The constant `value`, shaped like `self` (same variable count for
    /// polynomials).
    fn constant_like(&self, value: &R) -> Self;
}

impl Element<f64> for f64 {
    fn scale(&self, factor: &f64) -> Self {
        factor * self
    }

    fn constant_like(&self, value: &f64) -> Self {
        *value
    }
}

impl Element<Exact> for Exact {
    fn scale(&self, factor: &Exact) -> Self {
        factor.clone() * self.clone()
    }

    fn constant_like(&self, value: &Exact) -> Self {
        value.clone()
    }
}

impl<R: Scalar> Element<R> for Complex<R> {
    fn scale(&self, factor: &R) -> Self {
        self.clone() * factor.clone()
    }

    fn constant_like(&self, value: &R) -> Self {
        Complex::new(value.clone(), R::zero())
    }
}

impl<R, T> Element<R> for Polynomial<T>
where
    R: Scalar,
    T: Element<R> + Zero,
{
    fn scale(&self, factor: &R) -> Self {
        self.map(|c| c.scale(factor))
    }

    fn constant_like(&self, value: &R) -> Self {
        Polynomial::constant(self.nvars(), T::zero().constant_like(value))
    }
}
