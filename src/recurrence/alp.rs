//! Associated Legendre functions `P_ℓ^m(x)` on `[-1, 1]`.
//!
//! The functions share the two-index layout of the spherical harmonics:
//! level `L` holds orders `m = -L..=L` and is produced by the same record,
//! with `t = x` and `ξ∓ = √(1 − x²)`. In the natural scaling the record
//! reads
//!
//! ```text
//! P_L^{-L} = ξ · P_{L-1}^{-(L-1)} / (2L)
//! P_L^{L}  = ∓(2L − 1) · ξ · P_{L-1}^{L-1}
//! P_L^m    = ((2L − 1)·x·P_{L-1}^m − (L + m − 1)·P_{L-2}^m) / (L − m)
//! ```
//!
//! with the sign of the top order set by the Condon–Shortley phase.

use log::debug;

use super::{Recurrence, Scaling, SphereRecord, SphereRecurrence, require_scaling};
use crate::arith::{Arithmetic, ArithmeticMode, Exact, Scalar};
use crate::error::Result;

const ALP_SCALINGS: [Scaling; 3] = [Scaling::Natural, Scaling::Spherical, Scaling::Normal];

/// Coefficient provider for associated Legendre functions.
#[derive(Debug, Clone)]
pub struct AlpRecurrence<R> {
    scaling: Scaling,
    condon_shortley: bool,
    arithmetic: Arithmetic<R>,
    // normalised scalings reuse the orthonormal harmonic records
    harmonics: SphereRecurrence<R>,
}

impl<R: Scalar> AlpRecurrence<R> {
    /// Associated Legendre functions under one of the conventions
    ///
    /// - `natural`: `P_ℓ^m = (1 − x²)^{m/2} dᵐP_ℓ/dxᵐ` for `m ≥ 0`, and
    ///   `P_ℓ^{-m} = (ℓ − m)!/(ℓ + m)! · P_ℓ^m` up to the phase
    /// - `spherical`: orthonormal on the sphere with `e^{imφ}` attached
    /// - `normal`: `∫_{-1}^{1} (P_ℓ^m)² dx = 1`
    ///
    /// `condon_shortley` multiplies order `m` by `(-1)^m`.
    pub fn associated_legendre(
        scaling: Scaling,
        condon_shortley: bool,
        mode: ArithmeticMode,
    ) -> Result<Self> {
        require_scaling("associated Legendre functions", scaling, &ALP_SCALINGS)?;
        let harmonic_scaling = if condon_shortley {
            Scaling::QuantumMechanic
        } else {
            Scaling::Acoustic
        };
        let harmonics = SphereRecurrence::spherical_harmonics(harmonic_scaling, mode)?;
        let arithmetic = Arithmetic::select(mode);
        debug!(
            "associated Legendre recurrence: scaling={}, condon_shortley={}, mode={}",
            scaling,
            condon_shortley,
            arithmetic.mode()
        );
        Ok(Self {
            scaling,
            condon_shortley,
            arithmetic,
            harmonics,
        })
    }

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    pub fn condon_shortley(&self) -> bool {
        self.condon_shortley
    }

    fn natural_record(&self, l: i64) -> SphereRecord<R> {
        let arith = &self.arithmetic;
        let top = arith.ratio(2 * l - 1, 1);
        let z1 = if self.condon_shortley { -top } else { top };
        SphereRecord {
            z0: arith.ratio(1, 2 * l),
            z1,
            c0: (-l + 1..l).map(|m| arith.ratio(2 * l - 1, l - m)).collect(),
            c1: (l > 1).then(|| (-l + 2..l - 1).map(|m| arith.ratio(l + m - 1, l - m)).collect()),
        }
    }
}

impl<R: Scalar> Recurrence<R> for AlpRecurrence<R> {
    type Record = SphereRecord<R>;

    fn p0(&self) -> R {
        match self.scaling {
            Scaling::Spherical => self.harmonics.p0(),
            Scaling::Normal => self.arithmetic.compute(
                || Exact::ratio(1, 2).sqrt(),
                || std::f64::consts::FRAC_1_SQRT_2,
            ),
            _ => R::one(),
        }
    }

    fn record(&self, n: usize) -> SphereRecord<R> {
        match self.scaling {
            Scaling::Natural => self.natural_record(n as i64 + 1),
            _ => self.harmonics.record(n),
        }
    }

    fn arithmetic(&self) -> Arithmetic<R> {
        self.arithmetic.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrthoError;

    fn natural(condon_shortley: bool) -> AlpRecurrence<Exact> {
        AlpRecurrence::associated_legendre(Scaling::Natural, condon_shortley, ArithmeticMode::Auto)
            .unwrap()
    }

    #[test]
    fn test_natural_record() {
        let r = natural(true).record(2);
        assert_eq!(r.z0, Exact::ratio(1, 6));
        assert_eq!(r.z1, Exact::ratio(-5, 1));
        // m = -2..=2: 5/(3 - m)
        assert_eq!(
            r.c0,
            [5, 4, 3, 2, 1].map(|d| Exact::ratio(5, d)).to_vec()
        );
        // m = -1..=1: (2 + m)/(3 - m)
        assert_eq!(
            r.c1,
            Some(vec![Exact::ratio(1, 4), Exact::ratio(2, 3), Exact::ratio(3, 2)])
        );
        assert!(natural(true).record(0).c1.is_none());
    }

    #[test]
    fn test_phase_only_flips_top_order() {
        let (with, without) = (natural(true).record(4), natural(false).record(4));
        assert_eq!(with.z1, -without.z1.clone());
        assert_eq!(with.z0, without.z0);
        assert_eq!(with.c0, without.c0);
        assert_eq!(with.c1, without.c1);
    }

    #[test]
    fn test_normal_rescales_spherical() {
        let spherical =
            AlpRecurrence::<Exact>::associated_legendre(Scaling::Spherical, true, ArithmeticMode::Auto)
                .unwrap();
        let normal =
            AlpRecurrence::<Exact>::associated_legendre(Scaling::Normal, true, ArithmeticMode::Auto)
                .unwrap();
        assert_eq!(spherical.record(3), normal.record(3));
        assert_eq!(normal.p0(), Exact::ratio(1, 2).sqrt());
        assert_eq!(
            spherical.p0(),
            (Exact::from_integer(4) * Exact::pi()).sqrt().recip()
        );
    }

    #[test]
    fn test_rejects_harmonic_scalings() {
        assert!(matches!(
            AlpRecurrence::<f64>::associated_legendre(Scaling::Schmidt, false, ArithmeticMode::Auto),
            Err(OrthoError::UnsupportedScaling { .. })
        ));
    }
}
