//! Arithmetic-mode selection.
//!
//! Every provider and evaluator binds one [`Arithmetic`] at construction and
//! keeps it for its lifetime. The mode decides which arithmetic computes
//! coefficients and point preprocessing:
//!
//! - [`ArithmeticMode::Exact`]: exact rationals with square roots and powers
//!   of π ([`Exact`]); quantities outside that set are rejected at
//!   construction.
//! - [`ArithmeticMode::Floating`]: IEEE double precision.
//! - [`ArithmeticMode::Auto`]: exact for [`Exact`] points, floating for
//!   everything else.
//!
//! Results are always returned in the caller's scalar type `R`, so an `f64`
//! evaluation can still take its coefficients from exact arithmetic.

mod element;
mod exact;
mod scalar;

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use ndarray::ArrayD;
use num_complex::Complex;

use crate::error::OrthoError;

pub use element::Element;
pub use exact::Exact;
pub use scalar::{Scalar, cast};

/// Which arithmetic computes coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArithmeticMode {
    /// Infer from the scalar type of the evaluation points.
    #[default]
    Auto,
    /// Exact (symbolic) arithmetic.
    Exact,
    /// Floating-point arithmetic.
    Floating,
}

impl ArithmeticMode {
    /// Resolve `Auto` against the scalar type `R`.
    pub fn resolve<R: Scalar>(self) -> Self {
        match self {
            Self::Auto => R::MODE,
            other => other,
        }
    }
}

impl fmt::Display for ArithmeticMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Exact => write!(f, "exact"),
            Self::Floating => write!(f, "floating"),
        }
    }
}

impl FromStr for ArithmeticMode {
    type Err = OrthoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "exact" | "symbolic" => Ok(Self::Exact),
            "floating" | "numeric" => Ok(Self::Floating),
            _ => Err(OrthoError::UnknownMode(s.to_string())),
        }
    }
}

impl From<bool> for ArithmeticMode {
    /// `true` selects exact arithmetic.
    fn from(symbolic: bool) -> Self {
        if symbolic { Self::Exact } else { Self::Floating }
    }
}

/// Arithmetic strategy bound to one provider or evaluator.
///
/// `mode()` is never `Auto`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arithmetic<R> {
    mode: ArithmeticMode,
    _scalar: PhantomData<fn() -> R>,
}

impl<R: Scalar> Arithmetic<R> {
    /// Bind an arithmetic; `Auto` resolves from `R`.
    pub fn select(mode: ArithmeticMode) -> Self {
        Self {
            mode: mode.resolve::<R>(),
            _scalar: PhantomData,
        }
    }

    pub fn mode(&self) -> ArithmeticMode {
        self.mode
    }

    pub fn is_exact(&self) -> bool {
        self.mode == ArithmeticMode::Exact
    }

    /// Evaluate a constant in the bound arithmetic and convert it to `R`.
    pub fn compute(&self, exact: impl FnOnce() -> Exact, floating: impl FnOnce() -> f64) -> R {
        if self.is_exact() {
            R::from_exact(&exact())
        } else {
            R::from_f64(floating())
        }
    }

    /// `√(num/den)` in the bound arithmetic.
    pub fn sqrt_ratio(&self, num: i64, den: i64) -> R {
        self.compute(
            || Exact::ratio(num, den).sqrt(),
            || (num as f64 / den as f64).sqrt(),
        )
    }

    /// `num/den` in the bound arithmetic.
    pub fn ratio(&self, num: i64, den: i64) -> R {
        self.compute(|| Exact::ratio(num, den), || num as f64 / den as f64)
    }

    /// Apply a unary function in the bound arithmetic.
    fn lift(&self, x: &R, exact: fn(&Exact) -> Exact, floating: fn(f64) -> f64) -> R {
        if self.is_exact() {
            cast(&exact(&cast::<R, Exact>(x)))
        } else {
            R::from_f64(floating(x.to_f64()))
        }
    }

    pub fn pi(&self) -> R {
        self.compute(Exact::pi, || std::f64::consts::PI)
    }

    pub fn imag_unit(&self) -> Complex<R> {
        Complex::new(R::zero(), R::one())
    }

    pub fn sqrt_scalar(&self, x: &R) -> R {
        self.lift(x, Exact::sqrt, f64::sqrt)
    }

    pub fn sqrt(&self, x: &ArrayD<R>) -> ArrayD<R> {
        x.map(|v| self.sqrt_scalar(v))
    }

    pub fn sin(&self, x: &ArrayD<R>) -> ArrayD<R> {
        x.map(|v| self.lift(v, Exact::sin, f64::sin))
    }

    pub fn cos(&self, x: &ArrayD<R>) -> ArrayD<R> {
        x.map(|v| self.lift(v, Exact::cos, f64::cos))
    }

    pub fn exp(&self, x: &ArrayD<R>) -> ArrayD<R> {
        x.map(|v| self.lift(v, Exact::exp, f64::exp))
    }
}

impl<R: Scalar> Default for Arithmetic<R> {
    fn default() -> Self {
        Self::select(ArithmeticMode::Auto)
    }
}
