//! Zernike polynomials on the unit disk.
//!
//! Level `n` holds the `n + 1` functions of orders `m = -n, -n+2, …, n`:
//! `R_n^|m|(ρ)·cos(mφ)` for `m ≥ 0` and `R_n^|m|(ρ)·sin(|m|φ)` for `m < 0`.
//! They are the real and imaginary parts of `W_n^m = R_n^|m| e^{imφ}`, which
//! obey
//!
//! ```text
//! W_{n+1}^m = z·W_n^{m-1} + z̄·W_n^{m+1} − W_{n-1}^m,    z = x + iy
//! ```
//!
//! A record carries the per-slot factors that turn this classical recurrence
//! into the one for the chosen scaling.

use log::debug;

use super::{Recurrence, Scaling, require_scaling};
use crate::arith::{Arithmetic, ArithmeticMode, Exact, Scalar};
use crate::error::Result;

/// Factors lifting Zernike level `n` to level `L = n + 1`.
///
/// Slot `i` of level `L` has order `m = -L + 2i`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskRecord<R> {
    /// Weight of the order `m - 1` source, for slots `1..=L`.
    pub lower: Vec<R>,
    /// Weight of the order `m + 1` source, for slots `0..L`.
    pub upper: Vec<R>,
    /// Weight of level `L - 2` at order `m`, for slots `1..L`; `None` at `n = 0`.
    pub back: Option<Vec<R>>,
}

/// Coefficient provider for Zernike polynomials.
#[derive(Debug, Clone)]
pub struct DiskRecurrence<R> {
    scaling: Scaling,
    arithmetic: Arithmetic<R>,
}

impl<R: Scalar> DiskRecurrence<R> {
    /// Zernike polynomials with scaling `classical` (`R_n^m(1) = 1`) or
    /// `normal` (orthonormal on the unit disk).
    pub fn zernike(scaling: Scaling, mode: ArithmeticMode) -> Result<Self> {
        require_scaling("Zernike", scaling, &[Scaling::Classical, Scaling::Normal])?;
        let arithmetic = Arithmetic::select(mode);
        debug!("Zernike recurrence: scaling={}, mode={}", scaling, arithmetic.mode());
        Ok(Self { scaling, arithmetic })
    }

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    /// `N(L, m₁)/N(L − d, m₀)` for the orthonormal scaling,
    /// `N(k, m)² = (k + 1)/π · (2 if m ≠ 0)`.
    fn factor(&self, level: i64, order: i64, source_level: i64, source_order: i64) -> R {
        if self.scaling == Scaling::Classical {
            return R::one();
        }
        let weight = |m: i64| if m == 0 { 1 } else { 2 };
        self.arithmetic.sqrt_ratio(
            (level + 1) * weight(order),
            (source_level + 1) * weight(source_order),
        )
    }
}

impl<R: Scalar> Recurrence<R> for DiskRecurrence<R> {
    type Record = DiskRecord<R>;

    fn p0(&self) -> R {
        match self.scaling {
            Scaling::Normal => self.arithmetic.compute(
                || Exact::pi().sqrt().recip(),
                || 1.0 / std::f64::consts::PI.sqrt(),
            ),
            _ => R::one(),
        }
    }

    fn record(&self, n: usize) -> DiskRecord<R> {
        let level = n as i64 + 1;
        let order = |i: i64| -level + 2 * i;

        let lower = (1..=level)
            .map(|i| {
                let m = order(i);
                self.factor(level, m.abs(), level - 1, (m - 1).abs())
            })
            .collect();
        let upper = (0..level)
            .map(|i| {
                let m = order(i);
                self.factor(level, m.abs(), level - 1, (m + 1).abs())
            })
            .collect();
        let back = (n > 0).then(|| {
            (1..level)
                .map(|i| {
                    let m = order(i).abs();
                    self.factor(level, m, level - 2, m)
                })
                .collect()
        });

        DiskRecord { lower, upper, back }
    }

    fn arithmetic(&self) -> Arithmetic<R> {
        self.arithmetic.clone()
    }
}
