//! Recurrence coefficients from moments, inner products and quadrature.
//!
//! Every routine here produces a [`CoefficientTable`]: the monic recurrence
//! `π_{k+1} = (x − α_k)·π_k − β_k·π_{k−1}` of an unknown weight, plus
//! `int_1 = √μ₀`. `β_0` has no meaning and is always `None`.
//!
//! The routines run in the arithmetic of their inputs, so exact moments give
//! exact coefficients (except for the eigenvalue and Lanczos conversions,
//! which are floating point only).

mod chebyshev;
mod check;
mod golub_welsch;
mod scheme;
mod stieltjes;

use crate::arith::{Arithmetic, Scalar};
use crate::recurrence::{Recurrence, RecurrenceRecord};

pub use chebyshev::{chebyshev, chebyshev_modified};
pub use check::check_coefficients;
pub use golub_welsch::golub_welsch;
pub use scheme::{GaussScheme, coefficients_from_scheme, gauss_from_moments, scheme_from_coefficients};
pub use stieltjes::stieltjes;

/// Monic recurrence coefficients of a weight function.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable<R> {
    pub alpha: Vec<R>,
    /// `beta[0]` is `None`.
    pub beta: Vec<Option<R>>,
    /// `√μ₀`.
    pub int_1: R,
}

impl<R: Scalar> CoefficientTable<R> {
    pub fn new(alpha: Vec<R>, beta: Vec<Option<R>>, int_1: R) -> Self {
        Self { alpha, beta, int_1 }
    }

    /// Number of recurrence steps available.
    pub fn len(&self) -> usize {
        self.alpha.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    /// `μ₀ = int_1²`.
    pub fn zeroth_moment(&self) -> R {
        self.int_1.clone() * self.int_1.clone()
    }

    /// `β_k` for `k ≥ 1`, NaN when absent.
    pub(crate) fn beta_at(&self, k: usize) -> R {
        self.beta.get(k).cloned().flatten().unwrap_or_else(R::nan)
    }

    pub(crate) fn alpha_at(&self, k: usize) -> R {
        self.alpha.get(k).cloned().unwrap_or_else(R::nan)
    }
}

/// The table as a monic line recurrence; steps past its length are NaN.
impl<R: Scalar> Recurrence<R> for CoefficientTable<R> {
    type Record = RecurrenceRecord<R>;

    fn p0(&self) -> R {
        R::one()
    }

    fn record(&self, n: usize) -> RecurrenceRecord<R> {
        RecurrenceRecord {
            a: R::one(),
            b: self.alpha_at(n),
            c: (n > 0).then(|| self.beta_at(n)),
        }
    }

    fn arithmetic(&self) -> Arithmetic<R> {
        Arithmetic::default()
    }
}
