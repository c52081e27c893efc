//! Classical orthogonal polynomials on `[-1, 1]`.
//!
//! All families are Jacobi polynomials with weight `(1-x)^α (1+x)^β`:
//!
//! | family     | α      | β      |
//! |------------|--------|--------|
//! | Legendre   | 0      | 0      |
//! | Chebyshev1 | -1/2   | -1/2   |
//! | Chebyshev2 | 1/2    | 1/2    |
//! | Gegenbauer | λ      | λ      |
//!
//! Every scaling is derived from the monic recurrence
//! `π_{n+1} = (x - α_n) π_n - β_n π_{n-1}`:
//! - monic: `(1, α_n, β_n)`, `p_0 = 1`
//! - classical: rescaled by the leading-coefficient ratio `r_n = k_{n+1}/k_n`
//! - normal: `(1/√β_{n+1}, α_n/√β_{n+1}, √(β_n/β_{n+1}))`, `p_0 = 1/√μ_0`

use std::fmt;

use log::debug;

use super::{Recurrence, RecurrenceRecord, Scaling, require_scaling};
use crate::arith::{Arithmetic, ArithmeticMode, Exact, Scalar, cast};
use crate::error::{OrthoError, Result};

const LINE_SCALINGS: [Scaling; 3] = [Scaling::Monic, Scaling::Classical, Scaling::Normal];

/// Named family on the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineFamily {
    Chebyshev1,
    Chebyshev2,
    Legendre,
    Gegenbauer,
    Jacobi,
}

impl LineFamily {
    pub fn name(self) -> &'static str {
        match self {
            Self::Chebyshev1 => "Chebyshev (first kind)",
            Self::Chebyshev2 => "Chebyshev (second kind)",
            Self::Legendre => "Legendre",
            Self::Gegenbauer => "Gegenbauer",
            Self::Jacobi => "Jacobi",
        }
    }
}

impl fmt::Display for LineFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Jacobi coefficients in one working arithmetic.
#[derive(Debug, Clone)]
struct Jacobi<S> {
    family: LineFamily,
    alpha: S,
    beta: S,
    scaling: Scaling,
}

impl<S: Scalar> Jacobi<S> {
    fn int(n: usize) -> S {
        S::from_int(n as i64)
    }

    fn sum(&self) -> S {
        self.alpha.clone() + self.beta.clone()
    }

    /// Monic diagonal coefficient α_n.
    fn diagonal(&self, n: usize) -> S {
        if self.family != LineFamily::Jacobi {
            return S::zero();
        }
        let (a, b) = (self.alpha.clone(), self.beta.clone());
        let s = self.sum();
        if n == 0 {
            return (b - a) / (s + S::from_int(2));
        }
        let k = Self::int(2 * n) + s;
        (b.clone() * b - a.clone() * a) / (k.clone() * (k + S::from_int(2)))
    }

    /// Monic off-diagonal coefficient β_n, `n ≥ 1`.
    fn off_diagonal(&self, n: usize) -> S {
        let nn = Self::int(n);
        match self.family {
            LineFamily::Chebyshev1 if n == 1 => S::from_ratio(1, 2),
            LineFamily::Chebyshev1 | LineFamily::Chebyshev2 => S::from_ratio(1, 4),
            LineFamily::Legendre => {
                let n2 = (n * n) as i64;
                S::from_ratio(n2, 4 * n2 - 1)
            }
            LineFamily::Gegenbauer => {
                let two_l = S::from_int(2) * self.alpha.clone();
                if n == 1 {
                    return S::one() / (S::from_int(3) + two_l);
                }
                let k = Self::int(2 * n) + two_l.clone();
                nn.clone() * (nn + two_l)
                    / ((k.clone() + S::one()) * (k - S::one()))
            }
            LineFamily::Jacobi => {
                let (a, b) = (self.alpha.clone(), self.beta.clone());
                let s = self.sum();
                let four = S::from_int(4);
                if n == 1 {
                    let k = s.clone() + S::from_int(2);
                    return four * (S::one() + a) * (S::one() + b)
                        / (k.clone() * k * (s + S::from_int(3)));
                }
                let k = Self::int(2 * n) + s.clone();
                four * nn.clone() * (nn.clone() + a) * (nn.clone() + b) * (nn + s)
                    / (k.clone() * k.clone() * (k.clone() + S::one()) * (k - S::one()))
            }
        }
    }

    /// Ratio `k_{n+1}/k_n` of leading coefficients in the classical scaling.
    fn leading_ratio(&self, n: usize) -> S {
        let s = self.sum();
        if n == 0 {
            return (s + S::from_int(2)) / S::from_int(2);
        }
        let k = Self::int(2 * n) + s.clone();
        (k.clone() + S::one()) * (k + S::from_int(2))
            / (S::from_int(2) * Self::int(n + 1) * (Self::int(n + 1) + s))
    }

    /// `∫ (1-x)^α (1+x)^β dx` over `[-1, 1]`.
    fn zeroth_moment(&self) -> S {
        match self.family {
            LineFamily::Legendre => S::from_int(2),
            LineFamily::Chebyshev1 => S::pi(),
            LineFamily::Chebyshev2 => S::pi() / S::from_int(2),
            LineFamily::Gegenbauer | LineFamily::Jacobi => {
                let s = self.sum();
                S::from_int(2).powr(&(s.clone() + S::one()))
                    * (self.alpha.clone() + S::one()).gamma()
                    * (self.beta.clone() + S::one()).gamma()
                    / (s + S::from_int(2)).gamma()
            }
        }
    }

    fn p0(&self) -> S {
        match self.scaling {
            Scaling::Normal => S::one() / self.zeroth_moment().sqrt(),
            _ => S::one(),
        }
    }

    fn record(&self, n: usize) -> RecurrenceRecord<S> {
        let alpha = self.diagonal(n);
        match self.scaling {
            Scaling::Classical => {
                let r = self.leading_ratio(n);
                let c = (n > 0).then(|| {
                    r.clone() * self.leading_ratio(n - 1) * self.off_diagonal(n)
                });
                RecurrenceRecord {
                    a: r.clone(),
                    b: r * alpha,
                    c,
                }
            }
            Scaling::Normal => {
                let next = self.off_diagonal(n + 1);
                let root = next.sqrt();
                let c = (n > 0).then(|| (self.off_diagonal(n) / next).sqrt());
                RecurrenceRecord {
                    a: S::one() / root.clone(),
                    b: alpha / root,
                    c,
                }
            }
            _ => RecurrenceRecord {
                a: S::one(),
                b: alpha,
                c: (n > 0).then(|| self.off_diagonal(n)),
            },
        }
    }
}

#[derive(Debug, Clone)]
enum Engine {
    Exact(Jacobi<Exact>),
    Floating(Jacobi<f64>),
}

/// Coefficient provider for the families on `[-1, 1]`.
///
/// # Example
///
/// ```
/// use orthopoly::{ArithmeticMode, LineRecurrence, Recurrence, Scaling};
///
/// let legendre = LineRecurrence::<f64>::legendre(Scaling::Monic, ArithmeticMode::Auto).unwrap();
/// let record = legendre.record(1);
/// assert_eq!(record.a, 1.0);
/// assert!((record.c.unwrap() - 1.0 / 3.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct LineRecurrence<R> {
    family: LineFamily,
    scaling: Scaling,
    arithmetic: Arithmetic<R>,
    engine: Engine,
}

impl<R: Scalar> LineRecurrence<R> {
    /// Chebyshev polynomials of the first kind, weight `1/√(1-x²)`.
    pub fn chebyshev1(scaling: Scaling, mode: ArithmeticMode) -> Result<Self> {
        let half = R::from_ratio(-1, 2);
        Self::build(LineFamily::Chebyshev1, scaling, half.clone(), half, mode)
    }

    /// Chebyshev polynomials of the second kind, weight `√(1-x²)`.
    pub fn chebyshev2(scaling: Scaling, mode: ArithmeticMode) -> Result<Self> {
        let half = R::from_ratio(1, 2);
        Self::build(LineFamily::Chebyshev2, scaling, half.clone(), half, mode)
    }

    /// Legendre polynomials, weight 1.
    pub fn legendre(scaling: Scaling, mode: ArithmeticMode) -> Result<Self> {
        Self::build(LineFamily::Legendre, scaling, R::zero(), R::zero(), mode)
    }

    /// Gegenbauer polynomials, weight `(1-x²)^λ`.
    pub fn gegenbauer(scaling: Scaling, lambda: R, mode: ArithmeticMode) -> Result<Self> {
        check_exponent("lambda", &lambda)?;
        Self::build(LineFamily::Gegenbauer, scaling, lambda.clone(), lambda, mode)
    }

    /// Jacobi polynomials, weight `(1-x)^α (1+x)^β`.
    pub fn jacobi(scaling: Scaling, alpha: R, beta: R, mode: ArithmeticMode) -> Result<Self> {
        check_exponent("alpha", &alpha)?;
        check_exponent("beta", &beta)?;
        Self::build(LineFamily::Jacobi, scaling, alpha, beta, mode)
    }

    fn build(
        family: LineFamily,
        scaling: Scaling,
        alpha: R,
        beta: R,
        mode: ArithmeticMode,
    ) -> Result<Self> {
        require_scaling(family.name(), scaling, &LINE_SCALINGS)?;
        let arithmetic = Arithmetic::<R>::select(mode);

        let engine = if arithmetic.is_exact() {
            Engine::Exact(Jacobi {
                family,
                alpha: rational("alpha", &alpha)?,
                beta: rational("beta", &beta)?,
                scaling,
            })
        } else {
            Engine::Floating(Jacobi {
                family,
                alpha: alpha.to_f64(),
                beta: beta.to_f64(),
                scaling,
            })
        };

        let provider = Self {
            family,
            scaling,
            arithmetic,
            engine,
        };
        if provider.p0().is_nan() {
            return Err(OrthoError::Inexact(format!(
                "normalisation constant of the {family} weight"
            )));
        }

        debug!(
            "{} recurrence: scaling={}, alpha={}, beta={}, mode={}",
            family,
            scaling,
            alpha,
            beta,
            provider.arithmetic.mode()
        );
        Ok(provider)
    }

    pub fn family(&self) -> LineFamily {
        self.family
    }

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    /// Integral of the weight function over `[-1, 1]`; NaN if not
    /// representable in the bound arithmetic.
    pub fn zeroth_moment(&self) -> R {
        match &self.engine {
            Engine::Exact(j) => cast(&j.zeroth_moment()),
            Engine::Floating(j) => cast(&j.zeroth_moment()),
        }
    }
}

impl<R: Scalar> Recurrence<R> for LineRecurrence<R> {
    type Record = RecurrenceRecord<R>;

    fn p0(&self) -> R {
        match &self.engine {
            Engine::Exact(j) => cast(&j.p0()),
            Engine::Floating(j) => cast(&j.p0()),
        }
    }

    fn record(&self, n: usize) -> RecurrenceRecord<R> {
        match &self.engine {
            Engine::Exact(j) => j.record(n).map(|v| cast(&v)),
            Engine::Floating(j) => j.record(n).map(|v| cast(&v)),
        }
    }

    fn arithmetic(&self) -> Arithmetic<R> {
        self.arithmetic.clone()
    }
}

/// Weight exponents must keep the weight integrable.
fn check_exponent<R: Scalar>(name: &'static str, value: &R) -> Result<()> {
    if value.is_nan() || value.to_f64() <= -1.0 {
        return Err(OrthoError::invalid_parameter(
            name,
            value,
            "must be greater than -1",
        ));
    }
    Ok(())
}

fn rational<R: Scalar>(name: &'static str, value: &R) -> Result<Exact> {
    let exact: Exact = cast(value);
    match exact.as_rational() {
        Some(_) => Ok(exact),
        None => Err(OrthoError::Inexact(format!("parameter {name} = {value}"))),
    }
}

/// The monomials `1, x, x², …` as a degenerate recurrence
/// (`a = 1`, `b = 0`, `c = 0`).
///
/// Reference basis under which modified moments are plain moments.
#[derive(Debug, Clone)]
pub struct MonomialBasis<R> {
    arithmetic: Arithmetic<R>,
}

impl<R: Scalar> MonomialBasis<R> {
    pub fn new(mode: ArithmeticMode) -> Self {
        Self {
            arithmetic: Arithmetic::select(mode),
        }
    }
}

impl<R: Scalar> Recurrence<R> for MonomialBasis<R> {
    type Record = RecurrenceRecord<R>;

    fn p0(&self) -> R {
        R::one()
    }

    fn record(&self, n: usize) -> RecurrenceRecord<R> {
        RecurrenceRecord {
            a: R::one(),
            b: R::zero(),
            c: (n > 0).then(R::zero),
        }
    }

    fn arithmetic(&self) -> Arithmetic<R> {
        self.arithmetic.clone()
    }
}
