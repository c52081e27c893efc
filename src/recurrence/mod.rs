//! Recurrence-coefficient providers.
//!
//! A provider answers "what are the coefficients that lift level `n` to level
//! `n + 1`" for one family under one scaling convention. Coefficients depend
//! only on the degree, the family parameters and the scaling, never on the
//! evaluation point, so one provider can drive any number of evaluators.
//!
//! - [`LineRecurrence`]: Chebyshev, Legendre, Gegenbauer and Jacobi on `[-1, 1]`
//! - [`DiskRecurrence`]: Zernike polynomials on the unit disk
//! - [`SphereRecurrence`]: spherical harmonics on the unit sphere
//! - [`AlpRecurrence`]: associated Legendre functions `P_ℓ^m` on `[-1, 1]`

mod alp;
mod disk;
mod line;
mod sphere;

use std::fmt;
use std::str::FromStr;

use crate::arith::{Arithmetic, Scalar};
use crate::error::OrthoError;

pub use alp::AlpRecurrence;
pub use disk::{DiskRecord, DiskRecurrence};
pub use line::{LineFamily, LineRecurrence, MonomialBasis};
pub use sphere::{SphereRecord, SphereRecurrence};

/// Normalisation convention of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scaling {
    /// Leading coefficient 1.
    Monic,
    /// Textbook normalisation (`P_n(1) = binom(n + α, n)` for Jacobi).
    Classical,
    /// Orthonormal with respect to the weight.
    Normal,
    /// Spherical harmonics with `∫ Y² = 4π`.
    Geodetic,
    /// Schmidt semi-normalised spherical harmonics.
    Schmidt,
    /// Orthonormal spherical harmonics without the Condon–Shortley phase.
    Acoustic,
    /// Orthonormal spherical harmonics with the Condon–Shortley phase.
    QuantumMechanic,
    /// Associated Legendre functions as defined through derivatives of `P_ℓ`.
    Natural,
    /// Associated Legendre functions that are orthonormal on the sphere once
    /// the azimuthal factor `e^{imφ}` is attached.
    Spherical,
}

impl fmt::Display for Scaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Monic => "monic",
            Self::Classical => "classical",
            Self::Normal => "normal",
            Self::Geodetic => "geodetic",
            Self::Schmidt => "schmidt",
            Self::Acoustic => "acoustic",
            Self::QuantumMechanic => "quantum mechanic",
            Self::Natural => "natural",
            Self::Spherical => "spherical",
        };
        write!(f, "{tag}")
    }
}

impl FromStr for Scaling {
    type Err = OrthoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match tag.as_str() {
            "monic" => Ok(Self::Monic),
            "classical" => Ok(Self::Classical),
            "normal" => Ok(Self::Normal),
            "geodetic" => Ok(Self::Geodetic),
            "schmidt" => Ok(Self::Schmidt),
            "acoustic" => Ok(Self::Acoustic),
            "quantum mechanic" => Ok(Self::QuantumMechanic),
            "natural" => Ok(Self::Natural),
            "spherical" => Ok(Self::Spherical),
            _ => Err(OrthoError::UnknownScaling(s.to_string())),
        }
    }
}

/// Coefficients of `p_{n+1} = (a·x − b)·p_n − c·p_{n−1}`.
///
/// `c` is `None` at `n = 0`: there is no `p_{−1}` to couple to.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceRecord<R> {
    pub a: R,
    pub b: R,
    pub c: Option<R>,
}

impl<R> RecurrenceRecord<R> {
    pub fn map<S>(self, mut f: impl FnMut(R) -> S) -> RecurrenceRecord<S> {
        RecurrenceRecord {
            a: f(self.a),
            b: f(self.b),
            c: self.c.map(f),
        }
    }
}

/// A source of recurrence coefficients.
pub trait Recurrence<R: Scalar> {
    /// What one degree step needs.
    type Record;

    /// Value of the degree-0 basis function.
    fn p0(&self) -> R;

    /// Coefficients lifting level `n` to level `n + 1`.
    fn record(&self, n: usize) -> Self::Record;

    /// Arithmetic the provider was bound to.
    fn arithmetic(&self) -> Arithmetic<R>;
}

impl<R: Scalar, P: Recurrence<R> + ?Sized> Recurrence<R> for &P {
    type Record = P::Record;

    fn p0(&self) -> R {
        (**self).p0()
    }

    fn record(&self, n: usize) -> Self::Record {
        (**self).record(n)
    }

    fn arithmetic(&self) -> Arithmetic<R> {
        (**self).arithmetic()
    }
}

/// A line recurrence: one polynomial per degree.
pub trait LineRecurrenceSource<R: Scalar>: Recurrence<R, Record = RecurrenceRecord<R>> {}

impl<R: Scalar, P: Recurrence<R, Record = RecurrenceRecord<R>> + ?Sized> LineRecurrenceSource<R>
    for P
{
}

/// Reject a scaling the family does not offer.
pub(crate) fn require_scaling(
    family: &'static str,
    scaling: Scaling,
    allowed: &[Scaling],
) -> Result<(), OrthoError> {
    if allowed.contains(&scaling) {
        Ok(())
    } else {
        Err(OrthoError::UnsupportedScaling { family, scaling })
    }
}
