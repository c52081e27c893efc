//! Evaluator for Zernike polynomials on the unit disk.
//!
//! Slots hold the real (`m ≥ 0`) and imaginary (`m < 0`) parts of
//! `W_k^m = R_k^|m| e^{imφ}`; the complex recurrence is split into its real
//! and imaginary halves so the values stay in `V`.

use std::marker::PhantomData;

use log::{debug, trace};
use ndarray::ArrayD;

use super::{assemble, axpy, components, constant_like, product};
use crate::arith::{Element, Scalar};
use crate::error::Result;
use crate::recurrence::{DiskRecord, Recurrence};

/// Lazy sequence of Zernike levels; level `n` has shape
/// `(n + 1,) ++ point_shape`, ordered by `m = -n, -n+2, …, n`.
pub struct DiskTree<R, V, P> {
    provider: P,
    x: ArrayD<V>,
    y: ArrayD<V>,
    point_shape: Vec<usize>,
    prev: Vec<ArrayD<V>>,
    curr: Vec<ArrayD<V>>,
    degree: usize,
    _scalar: PhantomData<R>,
}

/// Real part of `W_k^μ` on a level of `k + 1` slots.
fn real_part<V>(level: &[ArrayD<V>], mu: i64) -> Option<&ArrayD<V>> {
    let k = level.len() as i64 - 1;
    (mu.abs() <= k).then(|| &level[((k + mu.abs()) / 2) as usize])
}

/// Imaginary part of `W_k^μ` as `(is_negated, slot)`.
fn imag_part<V>(level: &[ArrayD<V>], mu: i64) -> Option<(bool, &ArrayD<V>)> {
    let k = level.len() as i64 - 1;
    (mu != 0 && mu.abs() <= k).then(|| (mu < 0, &level[((k - mu.abs()) / 2) as usize]))
}

fn signed<R: Scalar>(value: &R, negate: bool) -> R {
    if negate { -value.clone() } else { value.clone() }
}

impl<R, V, P> DiskTree<R, V, P>
where
    R: Scalar,
    V: Element<R>,
    P: Recurrence<R, Record = DiskRecord<R>>,
{
    /// `xy` carries the Cartesian coordinates along a leading axis of
    /// length 2.
    pub fn new(provider: P, xy: &ArrayD<V>) -> Result<Self> {
        let [x, y] = components(xy, "disk points")?;
        let point_shape = x.shape().to_vec();
        debug!(
            "disk tree: points {:?}, mode={}",
            point_shape,
            provider.arithmetic().mode()
        );
        Ok(Self {
            provider,
            x,
            y,
            point_shape,
            prev: Vec::new(),
            curr: Vec::new(),
            degree: 0,
            _scalar: PhantomData,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Slot `i` (order `m = -L + 2i`) of level `L = degree`.
    fn slot(&self, record: &DiskRecord<R>, level: usize, i: usize) -> ArrayD<V> {
        let m = 2 * i as i64 - level as i64;
        let mut value = constant_like(&self.x, &R::zero());

        let mut sources = Vec::with_capacity(2);
        if i >= 1 {
            sources.push((m - 1, &record.lower[i - 1], true));
        }
        if i < level {
            sources.push((m + 1, &record.upper[i], false));
        }

        for (mu, factor, from_below) in sources {
            let re = real_part(&self.curr, mu);
            let im = imag_part(&self.curr, mu);
            if m >= 0 {
                // Re(z·W) = x·Re W − y·Im W,  Re(z̄·W) = x·Re W + y·Im W
                if let Some(re) = re {
                    value = axpy(&value, factor, &product(&self.x, re));
                }
                if let Some((negated, im)) = im {
                    let f = signed(factor, negated != from_below);
                    value = axpy(&value, &f, &product(&self.y, im));
                }
            } else {
                // Im(z·W) = x·Im W + y·Re W,  Im(z̄·W) = x·Im W − y·Re W,
                // and the slot stores −Im W^m.
                if let Some((negated, im)) = im {
                    let f = signed(factor, !negated);
                    value = axpy(&value, &f, &product(&self.x, im));
                }
                if let Some(re) = re {
                    let f = signed(factor, from_below);
                    value = axpy(&value, &f, &product(&self.y, re));
                }
            }
        }

        if let Some(back) = &record.back {
            if (1..level).contains(&i) {
                value = axpy(&value, &-back[i - 1].clone(), &self.prev[i - 1]);
            }
        }
        value
    }
}

impl<R, V, P> Iterator for DiskTree<R, V, P>
where
    R: Scalar,
    V: Element<R>,
    P: Recurrence<R, Record = DiskRecord<R>>,
{
    type Item = ArrayD<V>;

    fn next(&mut self) -> Option<ArrayD<V>> {
        let level = if self.degree == 0 {
            vec![constant_like(&self.x, &self.provider.p0())]
        } else {
            let record = self.provider.record(self.degree - 1);
            (0..=self.degree)
                .map(|i| self.slot(&record, self.degree, i))
                .collect()
        };
        trace!("disk tree: produced degree {}", self.degree);
        self.prev = std::mem::replace(&mut self.curr, level);
        self.degree += 1;
        Some(assemble(&self.curr, &self.point_shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::{ArithmeticMode, Exact};
    use crate::polynomial::Polynomial;
    use crate::recurrence::{DiskRecurrence, Scaling};
    use crate::tree::Levels;
    use approx::assert_relative_eq;
    use ndarray::{IxDyn, arr1, arr2};

    type Poly = Polynomial<Exact>;

    fn q(n: i64, d: i64) -> Exact {
        Exact::ratio(n, d)
    }

    fn coordinates() -> ArrayD<Poly> {
        let one = q(1, 1);
        arr1(&[
            Poly::variable(2, 0, one.clone()),
            Poly::variable(2, 1, one),
        ])
        .into_dyn()
    }

    fn mono(a: u32, b: u32, c: Exact) -> Poly {
        Poly::monomial(vec![a, b], c)
    }

    #[test]
    fn test_classical_low_levels() {
        let z = DiskRecurrence::<Exact>::zernike(Scaling::Classical, ArithmeticMode::Auto).unwrap();
        let levels = DiskTree::new(&z, &coordinates()).unwrap().tree(2);
        assert_eq!(levels[0].shape(), &[1]);
        assert_eq!(levels[1].shape(), &[2]);
        assert_eq!(levels[2].shape(), &[3]);

        // level 1: ρ sin φ = y, ρ cos φ = x
        assert_eq!(levels[1][IxDyn(&[0])], mono(0, 1, q(1, 1)));
        assert_eq!(levels[1][IxDyn(&[1])], mono(1, 0, q(1, 1)));

        // level 2: 2xy, 2ρ² − 1, x² − y²
        assert_eq!(levels[2][IxDyn(&[0])], mono(1, 1, q(2, 1)));
        assert_eq!(
            levels[2][IxDyn(&[1])],
            mono(2, 0, q(2, 1)) + mono(0, 2, q(2, 1)) - mono(0, 0, q(1, 1))
        );
        assert_eq!(
            levels[2][IxDyn(&[2])],
            mono(2, 0, q(1, 1)) - mono(0, 2, q(1, 1))
        );
    }

    #[test]
    fn test_float_points_keep_point_shape() {
        let z = DiskRecurrence::<f64>::zernike(Scaling::Classical, ArithmeticMode::Auto).unwrap();
        let xy = arr2(&[[0.3, -0.5], [0.4, 0.1]]).into_dyn();
        let level3 = DiskTree::new(&z, &xy).unwrap().nth(3).unwrap();
        assert_eq!(level3.shape(), &[4, 2]);
        // R_3^3(ρ) cos 3φ = x³ − 3xy²
        let (x, y) = (0.3_f64, 0.4_f64);
        assert_relative_eq!(level3[[3, 0].as_slice()], x.powi(3) - 3.0 * x * y * y, epsilon = 1e-15);
        // R_3^1(ρ) sin φ = (3ρ² − 2)·y
        let rho2 = x * x + y * y;
        assert_relative_eq!(level3[[1, 0].as_slice()], (3.0 * rho2 - 2.0) * y, epsilon = 1e-15);
    }

    #[test]
    fn test_rejects_wrong_leading_axis() {
        let z = DiskRecurrence::<f64>::zernike(Scaling::Normal, ArithmeticMode::Auto).unwrap();
        let xyz = arr1(&[0.1, 0.2, 0.3]).into_dyn();
        assert!(DiskTree::new(&z, &xyz).is_err());
    }
}
