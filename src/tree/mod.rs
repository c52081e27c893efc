//! Lazy degree-by-degree evaluation.
//!
//! An evaluator owns its evaluation points and the last two levels it
//! produced. Each call to `next()` asks the provider for one record and
//! combines the stored levels elementwise; nothing else is retained. The
//! sequence is infinite, so callers cap it with `take`, `nth` or
//! [`Levels::tree`].
//!
//! Level `n` has shape `(multiplicity(n),) ++ point_shape`, where the
//! multiplicity is 1 on the interval, `n + 1` on the disk and `2n + 1` on the
//! sphere. A scalar point is a 0-dimensional array (see [`point`]).

mod disk;
mod line;
mod sphere;

use ndarray::{ArrayD, Axis, Dimension, IxDyn, Zip};

use crate::arith::{Element, Scalar};
use crate::error::{OrthoError, Result};

pub use disk::DiskTree;
pub use line::LineTree;
pub use sphere::SphereTree;

/// Wrap a single value as a 0-dimensional evaluation point.
pub fn point<V: Clone>(value: V) -> ArrayD<V> {
    ArrayD::from_elem(IxDyn(&[]), value)
}

/// Convenience collection of the first levels of an evaluator.
pub trait Levels<V>: Iterator<Item = ArrayD<V>> + Sized {
    /// Levels `0..=n`.
    fn tree(self, n: usize) -> Vec<ArrayD<V>> {
        self.take(n + 1).collect()
    }
}

impl<V, I: Iterator<Item = ArrayD<V>>> Levels<V> for I {}

/// Stack point-shaped slots along a new leading axis.
pub(crate) fn assemble<V: Clone>(slots: &[ArrayD<V>], point_shape: &[usize]) -> ArrayD<V> {
    let mut shape = Vec::with_capacity(point_shape.len() + 1);
    shape.push(slots.len());
    shape.extend_from_slice(point_shape);
    ArrayD::from_shape_fn(IxDyn(&shape), |idx| {
        slots[idx[0]][&idx.slice()[1..]].clone()
    })
}

/// Split the leading axis of a coordinate array into its `N` components.
pub(crate) fn components<V: Clone, const N: usize>(
    points: &ArrayD<V>,
    what: &str,
) -> Result<[ArrayD<V>; N]> {
    let mismatch = || {
        OrthoError::shape_mismatch(
            format!("{what} with leading axis of length {N}"),
            format!("{:?}", points.shape()),
        )
    };
    if points.ndim() == 0 {
        return Err(mismatch());
    }
    let parts: Vec<ArrayD<V>> = points.axis_iter(Axis(0)).map(|c| c.to_owned()).collect();
    parts.try_into().map_err(|_| mismatch())
}

/// Reject exact-mode preprocessing results that are not representable.
pub(crate) fn require_exact<R: Scalar>(values: &ArrayD<R>, what: &str) -> Result<()> {
    if values.iter().any(Scalar::is_nan) {
        return Err(OrthoError::Inexact(what.to_string()));
    }
    Ok(())
}

pub(crate) fn constant_like<R: Scalar, V: Element<R>>(template: &ArrayD<V>, value: &R) -> ArrayD<V> {
    template.map(|v| v.constant_like(value))
}

pub(crate) fn product<V: Clone + std::ops::Mul<Output = V>>(a: &ArrayD<V>, b: &ArrayD<V>) -> ArrayD<V> {
    Zip::from(a).and(b).map_collect(|x, y| x.clone() * y.clone())
}

pub(crate) fn scaled<R: Scalar, V: Element<R>>(a: &ArrayD<V>, factor: &R) -> ArrayD<V> {
    a.map(|v| v.scale(factor))
}

/// `a + factor·b`, elementwise.
pub(crate) fn axpy<R: Scalar, V: Element<R>>(a: &ArrayD<V>, factor: &R, b: &ArrayD<V>) -> ArrayD<V> {
    Zip::from(a)
        .and(b)
        .map_collect(|x, y| x.clone() + y.scale(factor))
}
