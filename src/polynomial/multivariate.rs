//! Sparse multivariate polynomials.
//!
//! Used as evaluation "points" for symbolic evaluation: running a recurrence
//! on the coordinate variables yields the basis polynomials themselves, which
//! can then be integrated exactly monomial by monomial.

use std::collections::BTreeMap;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};

/// Polynomial in `nvars` variables with coefficients in `T`.
///
/// Monomials are keyed by their exponent vector; zero coefficients are never
/// stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial<T> {
    nvars: usize,
    terms: BTreeMap<Vec<u32>, T>,
}

impl<T: Clone + Zero> Polynomial<T> {
    /// The zero polynomial.
    pub fn zero(nvars: usize) -> Self {
        Self {
            nvars,
            terms: BTreeMap::new(),
        }
    }

    /// Constant polynomial.
    pub fn constant(nvars: usize, value: T) -> Self {
        let mut p = Self::zero(nvars);
        p.insert(vec![0; nvars], value);
        p
    }

    /// Single monomial `coefficient · Π xᵢ^exponents[i]`.
    pub fn monomial(exponents: Vec<u32>, coefficient: T) -> Self {
        let mut p = Self::zero(exponents.len());
        p.insert(exponents, coefficient);
        p
    }

    /// The coordinate `x_index` with coefficient `one`.
    pub fn variable(nvars: usize, index: usize, one: T) -> Self {
        let mut exponents = vec![0; nvars];
        if let Some(e) = exponents.get_mut(index) {
            *e = 1;
        }
        Self::monomial(exponents, one)
    }

    fn insert(&mut self, exponents: Vec<u32>, value: T) {
        if value.is_zero() {
            self.terms.remove(&exponents);
        } else {
            self.terms.insert(exponents, value);
        }
    }

    fn accumulate(&mut self, exponents: Vec<u32>, value: T) {
        let sum = match self.terms.get(&exponents) {
            Some(existing) => existing.clone() + value,
            None => value,
        };
        self.insert(exponents, sum);
    }

    pub fn nvars(&self) -> usize {
        self.nvars
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total degree; `None` for the zero polynomial.
    pub fn degree(&self) -> Option<u32> {
        self.terms.keys().map(|e| e.iter().sum()).max()
    }

    /// Coefficient of the monomial with the given exponents.
    pub fn coefficient(&self, exponents: &[u32]) -> T {
        self.terms.get(exponents).cloned().unwrap_or_else(T::zero)
    }

    /// `(exponents, coefficient)` pairs in lexicographic exponent order.
    pub fn terms(&self) -> impl Iterator<Item = (&[u32], &T)> {
        self.terms.iter().map(|(e, c)| (e.as_slice(), c))
    }

    /// Apply `f` to every coefficient.
    pub fn map<U: Clone + Zero, F: FnMut(&T) -> U>(&self, mut f: F) -> Polynomial<U> {
        let mut out = Polynomial::zero(self.nvars);
        for (e, c) in &self.terms {
            out.insert(e.clone(), f(c));
        }
        out
    }

    /// Apply a linear functional given by its values on monomials, e.g. an
    /// integral from a table of moments.
    pub fn apply_linear<F>(&self, mut on_monomial: F) -> T
    where
        T: Mul<Output = T>,
        F: FnMut(&[u32]) -> T,
    {
        self.terms
            .iter()
            .fold(T::zero(), |acc, (e, c)| acc + c.clone() * on_monomial(e))
    }

    /// Evaluate at a point.
    pub fn eval(&self, point: &[T]) -> T
    where
        T: Mul<Output = T> + One,
    {
        self.apply_linear(|e| {
            e.iter().zip(point).fold(T::one(), |acc, (&k, x)| {
                (0..k).fold(acc, |acc, _| acc * x.clone())
            })
        })
    }
}

impl<T> Add for Polynomial<T>
where
    T: Clone + Zero,
{
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        for (e, c) in rhs.terms {
            self.accumulate(e, c);
        }
        self
    }
}

impl<T> Neg for Polynomial<T>
where
    T: Clone + Zero + Neg<Output = T>,
{
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c.clone())
    }
}

impl<T> Sub for Polynomial<T>
where
    T: Clone + Zero + Sub<Output = T>,
{
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        for (e, c) in rhs.terms {
            self.accumulate(e, T::zero() - c);
        }
        self
    }
}

impl<T> Mul for Polynomial<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = Self::zero(self.nvars.max(rhs.nvars));
        for (ea, ca) in &self.terms {
            for (eb, cb) in &rhs.terms {
                let exponents = (0..out.nvars)
                    .map(|i| ea.get(i).copied().unwrap_or(0) + eb.get(i).copied().unwrap_or(0))
                    .collect();
                out.accumulate(exponents, ca.clone() * cb.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::Exact;

    fn q(n: i64, d: i64) -> Exact {
        Exact::ratio(n, d)
    }

    #[test]
    fn test_arithmetic_and_degree() {
        let x = Polynomial::variable(2, 0, q(1, 1));
        let y = Polynomial::variable(2, 1, q(1, 1));
        let p = (x.clone() + y.clone()) * (x.clone() - y.clone());
        assert_eq!(p.degree(), Some(2));
        assert_eq!(p.coefficient(&[2, 0]), q(1, 1));
        assert_eq!(p.coefficient(&[0, 2]), q(-1, 1));
        assert_eq!(p.coefficient(&[1, 1]), q(0, 1));
        assert_eq!(p.terms().count(), 2);
    }

    #[test]
    fn test_cancellation_drops_terms() {
        let x = Polynomial::variable(1, 0, q(1, 1));
        let zero = x.clone() - x;
        assert!(zero.is_zero());
        assert_eq!(zero.degree(), None);
    }

    #[test]
    fn test_eval_and_linear_functional() {
        let x = Polynomial::variable(1, 0, q(1, 1));
        let p = x.clone() * x.clone() - Polynomial::constant(1, q(1, 3));
        assert_eq!(p.eval(&[q(1, 2)]), q(-1, 12));
        // ∫_{-1}^{1} x^k dx
        let integral = p.apply_linear(|e| {
            if e[0] % 2 == 1 { q(0, 1) } else { q(2, i64::from(e[0]) + 1) }
        });
        assert_eq!(integral, q(0, 1));
    }

    #[test]
    fn test_float_coefficients() {
        let x = Polynomial::variable(1, 0, 1.0);
        let p = x.clone() * x + Polynomial::constant(1, 2.0);
        assert_eq!(p.eval(&[3.0]), 11.0);
        assert_eq!((-p).coefficient(&[0]), -2.0);
    }
}
