//! Evaluator for spherical harmonics.
//!
//! The recurrence only sees three values per point: `t = cos θ` and the pair
//! `ξ∓ = sin θ·e^{∓iφ}`. The complex constructors feed exactly those; the
//! real constructors replace both `ξ` by `sin θ`, which yields the
//! normalised associated Legendre functions without the azimuthal factor.
//! [`SphereTree::associated_legendre`] takes `x = cos θ` directly.

use std::marker::PhantomData;

use log::{debug, trace};
use ndarray::{ArrayD, Zip};
use num_complex::Complex;

use super::{assemble, axpy, components, constant_like, product, require_exact, scaled};
use crate::arith::{Element, Scalar};
use crate::error::{OrthoError, Result};
use crate::recurrence::{Recurrence, SphereRecord};

/// Lazy sequence of spherical-harmonic levels; level `n` has shape
/// `(2n + 1,) ++ point_shape`, ordered by `m = -n..=n`.
pub struct SphereTree<R, V, P> {
    provider: P,
    t: ArrayD<V>,
    xi_minus: ArrayD<V>,
    xi_plus: ArrayD<V>,
    prev: Vec<ArrayD<V>>,
    curr: Vec<ArrayD<V>>,
    degree: usize,
    _scalar: PhantomData<R>,
}

impl<R, V, P> SphereTree<R, V, P>
where
    R: Scalar,
    V: Element<R>,
    P: Recurrence<R, Record = SphereRecord<R>>,
{
    /// Build from precomputed `t = cos θ` and `ξ∓`.
    pub fn from_parts(
        provider: P,
        t: ArrayD<V>,
        xi_minus: ArrayD<V>,
        xi_plus: ArrayD<V>,
    ) -> Result<Self> {
        for (name, xi) in [("ξ−", &xi_minus), ("ξ+", &xi_plus)] {
            if xi.shape() != t.shape() {
                return Err(OrthoError::shape_mismatch(
                    format!("{name} of shape {:?}", t.shape()),
                    format!("{:?}", xi.shape()),
                ));
            }
        }
        debug!(
            "sphere tree: points {:?}, mode={}",
            t.shape(),
            provider.arithmetic().mode()
        );
        Ok(Self {
            provider,
            t,
            xi_minus,
            xi_plus,
            prev: Vec::new(),
            curr: Vec::new(),
            degree: 0,
            _scalar: PhantomData,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    fn step(&self, record: &SphereRecord<R>) -> Vec<ArrayD<V>> {
        let width = self.curr.len();
        let mut level = Vec::with_capacity(width + 2);

        level.push(scaled(&product(&self.xi_minus, &self.curr[0]), &record.z0));
        let t_curr = self.curr.iter().zip(&record.c0).map(|(p, c)| scaled(&product(&self.t, p), c));
        level.extend(t_curr);
        level.push(scaled(&product(&self.xi_plus, &self.curr[width - 1]), &record.z1));

        if let Some(c1) = &record.c1 {
            for (j, (p, c)) in self.prev.iter().zip(c1).enumerate() {
                level[j + 2] = axpy(&level[j + 2], &-c.clone(), p);
            }
        }
        level
    }
}

impl<R, P> SphereTree<R, Complex<R>, P>
where
    R: Scalar,
    P: Recurrence<R, Record = SphereRecord<R>>,
{
    /// Complex harmonics at Cartesian points on the unit sphere, leading
    /// axis `(x, y, z)`.
    pub fn cartesian_complex(provider: P, xyz: &ArrayD<R>) -> Result<Self> {
        let [x, y, z] = components(xyz, "sphere points")?;
        let xi = |sign: R| {
            Zip::from(&x)
                .and(&y)
                .map_collect(|x, y| Complex::new(x.clone(), sign.clone() * y.clone()))
        };
        let (xi_minus, xi_plus) = (xi(-R::one()), xi(R::one()));
        let t = z.map(|v| Complex::new(v.clone(), R::zero()));
        Self::from_parts(provider, t, xi_minus, xi_plus)
    }

    /// Complex harmonics at `(polar, azimuthal)` angles along the leading
    /// axis.
    pub fn spherical_complex(provider: P, angles: &ArrayD<R>) -> Result<Self> {
        let [theta, phi] = components(angles, "polar/azimuthal angles")?;
        let arith = provider.arithmetic();
        let (sin_theta, cos_theta) = (arith.sin(&theta), arith.cos(&theta));
        let (sin_phi, cos_phi) = (arith.sin(&phi), arith.cos(&phi));
        if arith.is_exact() {
            for values in [&sin_theta, &cos_theta, &sin_phi, &cos_phi] {
                require_exact(values, "trigonometric values of the angles")?;
            }
        }

        let xi = |sign: R| {
            Zip::from(&sin_theta)
                .and(&cos_phi)
                .and(&sin_phi)
                .map_collect(|s, c, si| {
                    Complex::new(s.clone() * c.clone(), sign.clone() * s.clone() * si.clone())
                })
        };
        let (xi_minus, xi_plus) = (xi(-R::one()), xi(R::one()));
        let t = cos_theta.map(|v| Complex::new(v.clone(), R::zero()));
        Self::from_parts(provider, t, xi_minus, xi_plus)
    }
}

impl<R, P> SphereTree<R, R, P>
where
    R: Scalar + Element<R>,
    P: Recurrence<R, Record = SphereRecord<R>>,
{
    /// Real-valued variant at Cartesian points: `ξ∓ = √(x² + y²)`.
    pub fn cartesian_real(provider: P, xyz: &ArrayD<R>) -> Result<Self> {
        let [x, y, z] = components(xyz, "sphere points")?;
        let arith = provider.arithmetic();
        let radius = arith.sqrt(&Zip::from(&x).and(&y).map_collect(|x, y| {
            x.clone() * x.clone() + y.clone() * y.clone()
        }));
        if arith.is_exact() {
            require_exact(&radius, "√(x² + y²)")?;
        }
        Self::from_parts(provider, z, radius.clone(), radius)
    }

    /// Real-valued variant at `(polar, azimuthal)` angles: `ξ∓ = sin θ`.
    /// The azimuthal angle is only checked for shape.
    pub fn spherical_real(provider: P, angles: &ArrayD<R>) -> Result<Self> {
        let [theta, _phi] = components(angles, "polar/azimuthal angles")?;
        let arith = provider.arithmetic();
        let (sin_theta, cos_theta) = (arith.sin(&theta), arith.cos(&theta));
        if arith.is_exact() {
            require_exact(&sin_theta, "sin θ")?;
            require_exact(&cos_theta, "cos θ")?;
        }
        Self::from_parts(provider, cos_theta, sin_theta.clone(), sin_theta)
    }

    /// Associated Legendre functions at `x ∈ [-1, 1]`: `t = x` and
    /// `ξ∓ = √(1 − x²)`. Pair with an
    /// [`AlpRecurrence`](crate::recurrence::AlpRecurrence) for the natural
    /// scaling or any real-valued harmonic provider.
    pub fn associated_legendre(provider: P, x: &ArrayD<R>) -> Result<Self> {
        let arith = provider.arithmetic();
        let xi = arith.sqrt(&x.map(|v| R::one() - v.clone() * v.clone()));
        if arith.is_exact() {
            require_exact(&xi, "√(1 − x²)")?;
        }
        Self::from_parts(provider, x.clone(), xi.clone(), xi)
    }
}

impl<R, V, P> Iterator for SphereTree<R, V, P>
where
    R: Scalar,
    V: Element<R>,
    P: Recurrence<R, Record = SphereRecord<R>>,
{
    type Item = ArrayD<V>;

    fn next(&mut self) -> Option<ArrayD<V>> {
        let level = if self.degree == 0 {
            vec![constant_like(&self.t, &self.provider.p0())]
        } else {
            let record = self.provider.record(self.degree - 1);
            self.step(&record)
        };
        trace!("sphere tree: produced degree {}", self.degree);
        self.prev = std::mem::replace(&mut self.curr, level);
        self.degree += 1;
        Some(assemble(&self.curr, self.t.shape()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::{ArithmeticMode, Exact};
    use crate::recurrence::{Scaling, SphereRecurrence};
    use crate::tree::Levels;
    use approx::assert_relative_eq;
    use ndarray::{IxDyn, arr1, arr2};
    use std::f64::consts::PI;

    fn quantum() -> SphereRecurrence<f64> {
        SphereRecurrence::spherical_harmonics(Scaling::QuantumMechanic, ArithmeticMode::Auto)
            .unwrap()
    }

    #[test]
    fn test_closed_form_low_degrees() {
        let (theta, phi) = (0.7_f64, 1.9_f64);
        let y = quantum();
        let angles = arr1(&[theta, phi]).into_dyn();
        let levels = SphereTree::spherical_complex(&y, &angles).unwrap().tree(2);
        let e = |k: f64| Complex::new((k * phi).cos(), (k * phi).sin());
        let (s, c) = (theta.sin(), theta.cos());

        let expected = [
            vec![Complex::new(0.5 / PI.sqrt(), 0.0)],
            vec![
                e(-1.0) * (s * (3.0 / (8.0 * PI)).sqrt()),
                Complex::new(c * (3.0 / (4.0 * PI)).sqrt(), 0.0),
                e(1.0) * (-s * (3.0 / (8.0 * PI)).sqrt()),
            ],
            vec![
                e(-2.0) * (s * s * (15.0 / (32.0 * PI)).sqrt()),
                e(-1.0) * (s * c * (15.0 / (8.0 * PI)).sqrt()),
                Complex::new((3.0 * c * c - 1.0) * (5.0 / (16.0 * PI)).sqrt(), 0.0),
                e(1.0) * (-s * c * (15.0 / (8.0 * PI)).sqrt()),
                e(2.0) * (s * s * (15.0 / (32.0 * PI)).sqrt()),
            ],
        ];
        for (level, row) in levels.iter().zip(&expected) {
            assert_eq!(level.shape(), &[row.len()]);
            for (got, want) in level.iter().zip(row) {
                assert_relative_eq!(got.re, want.re, epsilon = 1e-14);
                assert_relative_eq!(got.im, want.im, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_cartesian_matches_spherical() {
        let (theta, phi) = (1.1_f64, -0.4_f64);
        let y = quantum();
        let xyz = arr1(&[theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos()]).into_dyn();
        let angles = arr1(&[theta, phi]).into_dyn();
        let a = SphereTree::cartesian_complex(&y, &xyz).unwrap().nth(4).unwrap();
        let b = SphereTree::spherical_complex(&y, &angles).unwrap().nth(4).unwrap();
        for (u, v) in a.iter().zip(&b) {
            assert_relative_eq!(u.re, v.re, epsilon = 1e-13);
            assert_relative_eq!(u.im, v.im, epsilon = 1e-13);
        }

        let ra = SphereTree::cartesian_real(&y, &xyz).unwrap().nth(4).unwrap();
        let rb = SphereTree::spherical_real(&y, &angles).unwrap().nth(4).unwrap();
        for (u, v) in ra.iter().zip(&rb) {
            assert_relative_eq!(*u, *v, epsilon = 1e-13);
        }
        // the m = 0 harmonics are real either way
        assert_relative_eq!(ra[IxDyn(&[4])], a[IxDyn(&[4])].re, epsilon = 1e-13);
    }

    #[test]
    fn test_point_shape_is_kept() {
        let y = quantum();
        let angles = arr2(&[[0.1, 0.2, 0.3], [1.0, 2.0, 3.0]]).into_dyn();
        let level = SphereTree::spherical_real(&y, &angles).unwrap().nth(3).unwrap();
        assert_eq!(level.shape(), &[7, 3]);
    }

    #[test]
    fn test_shape_errors() {
        let y = quantum();
        let two = arr1(&[0.0, 1.0]).into_dyn();
        assert!(SphereTree::cartesian_complex(&y, &two).is_err());
        let t = arr1(&[0.5, 0.5]).into_dyn();
        let xi = arr1(&[0.5]).into_dyn();
        assert!(matches!(
            SphereTree::from_parts(&y, t, xi.clone(), xi),
            Err(OrthoError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_exact_rejects_transcendental_angles() {
        let y = SphereRecurrence::<Exact>::spherical_harmonics(Scaling::Geodetic, ArithmeticMode::Auto)
            .unwrap();
        let angles = arr1(&[Exact::ratio(1, 3), Exact::ratio(0, 1)]).into_dyn();
        assert!(matches!(
            SphereTree::spherical_real(&y, &angles),
            Err(OrthoError::Inexact(_))
        ));

        // the north pole is fine: ξ = 0, t = 1
        let pole = arr1(&[Exact::ratio(0, 1), Exact::ratio(0, 1), Exact::ratio(1, 1)]).into_dyn();
        let level = SphereTree::cartesian_real(&y, &pole).unwrap().nth(2).unwrap();
        assert_eq!(level[IxDyn(&[0])], Exact::ratio(0, 1));
        // geodetic Y_2^0(pole) = √5
        assert_eq!(level[IxDyn(&[2])], Exact::ratio(5, 1).sqrt());
    }
}
