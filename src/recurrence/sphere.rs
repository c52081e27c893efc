//! Spherical harmonics on the unit sphere.
//!
//! Level `L` holds the `2L + 1` harmonics of orders `m = -L..=L`. With
//! `t = cos θ` and `ξ∓ = sin θ·e^{∓iφ}`, level `L` is built from the two
//! previous levels as
//!
//! ```text
//! Y_L^{-L}   = z0 · ξ− · Y_{L-1}^{-(L-1)}
//! Y_L^{L}    = z1 · ξ+ · Y_{L-1}^{L-1}
//! Y_L^m      = c0_m · t · Y_{L-1}^m − c1_m · Y_{L-2}^m      (|m| < L)
//! ```
//!
//! where the `c1` term only exists for `|m| ≤ L - 2`.

use log::debug;

use super::{Recurrence, Scaling, require_scaling};
use crate::arith::{Arithmetic, ArithmeticMode, Exact, Scalar};
use crate::error::Result;

const SPHERE_SCALINGS: [Scaling; 4] = [
    Scaling::Acoustic,
    Scaling::QuantumMechanic,
    Scaling::Geodetic,
    Scaling::Schmidt,
];

/// Coefficients lifting level `n` to level `L = n + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereRecord<R> {
    /// Factor of the lowest order, `m = -L`.
    pub z0: R,
    /// Factor of the highest order, `m = L`, including the phase.
    pub z1: R,
    /// Coupling to level `L - 1` for `m = -L+1..=L-1`.
    pub c0: Vec<R>,
    /// Coupling to level `L - 2` for `m = -L+2..=L-2`; `None` at `n = 0`.
    pub c1: Option<Vec<R>>,
}

/// Coefficient provider for spherical harmonics.
#[derive(Debug, Clone)]
pub struct SphereRecurrence<R> {
    scaling: Scaling,
    arithmetic: Arithmetic<R>,
}

impl<R: Scalar> SphereRecurrence<R> {
    /// Spherical harmonics under one of the conventions
    ///
    /// - `acoustic`: orthonormal, no Condon–Shortley phase
    /// - `quantum mechanic`: orthonormal, with the Condon–Shortley phase
    /// - `geodetic`: `∫ |Y|² = 4π`
    /// - `schmidt`: `∫ |Y_L|² = 4π/(2L + 1)`
    pub fn spherical_harmonics(scaling: Scaling, mode: ArithmeticMode) -> Result<Self> {
        require_scaling("spherical harmonics", scaling, &SPHERE_SCALINGS)?;
        let arithmetic = Arithmetic::select(mode);
        debug!(
            "spherical harmonics recurrence: scaling={}, mode={}",
            scaling,
            arithmetic.mode()
        );
        Ok(Self { scaling, arithmetic })
    }

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    fn phase(&self) -> R {
        if self.scaling == Scaling::QuantumMechanic {
            -R::one()
        } else {
            R::one()
        }
    }
}

impl<R: Scalar> Recurrence<R> for SphereRecurrence<R> {
    type Record = SphereRecord<R>;

    fn p0(&self) -> R {
        match self.scaling {
            Scaling::Geodetic | Scaling::Schmidt => R::one(),
            _ => self.arithmetic.compute(
                || (Exact::from_integer(4) * Exact::pi()).sqrt().recip(),
                || 1.0 / (4.0 * std::f64::consts::PI).sqrt(),
            ),
        }
    }

    fn record(&self, n: usize) -> SphereRecord<R> {
        let l = n as i64 + 1;
        let arith = &self.arithmetic;
        let schmidt = self.scaling == Scaling::Schmidt;

        let z0 = if schmidt {
            arith.sqrt_ratio(2 * l - 1, 2 * l)
        } else {
            arith.sqrt_ratio(2 * l + 1, 2 * l)
        };
        let z1 = z0.clone() * self.phase();

        let c0 = (-l + 1..l)
            .map(|m| {
                if schmidt {
                    arith.sqrt_ratio((2 * l - 1) * (2 * l - 1), (l + m) * (l - m))
                } else {
                    arith.sqrt_ratio((2 * l - 1) * (2 * l + 1), (l + m) * (l - m))
                }
            })
            .collect();

        let c1 = (l > 1).then(|| {
            (-l + 2..l - 1)
                .map(|m| {
                    let num = (l + m - 1) * (l - m - 1);
                    let den = (l + m) * (l - m);
                    if schmidt {
                        arith.sqrt_ratio(num, den)
                    } else {
                        arith.sqrt_ratio(num * (2 * l + 1), (2 * l - 3) * den)
                    }
                })
                .collect()
        });

        SphereRecord { z0, z1, c0, c1 }
    }

    fn arithmetic(&self) -> Arithmetic<R> {
        self.arithmetic.clone()
    }
}
