//! Evaluator for three-term recurrences on the interval.

use std::marker::PhantomData;

use log::{debug, trace};
use ndarray::{ArrayD, Axis, Zip};

use super::constant_like;
use crate::arith::{Element, Scalar};
use crate::recurrence::{Recurrence, RecurrenceRecord};

/// Lazy sequence `p_0(x), p_1(x), …` for a line recurrence.
///
/// Each item has shape `(1,) ++ x.shape()`.
///
/// # Example
///
/// ```
/// use orthopoly::{ArithmeticMode, LineRecurrence, LineTree, Scaling, point};
///
/// let chebyshev = LineRecurrence::<f64>::chebyshev1(Scaling::Monic, ArithmeticMode::Auto).unwrap();
/// let mut levels = LineTree::new(&chebyshev, point(0.5));
/// let p2 = levels.nth(2).unwrap();
/// assert!((p2[[0].as_slice()] + 0.25).abs() < 1e-15);
/// ```
pub struct LineTree<R, V, P> {
    provider: P,
    x: ArrayD<V>,
    prev: Option<ArrayD<V>>,
    curr: Option<ArrayD<V>>,
    degree: usize,
    _scalar: PhantomData<R>,
}

impl<R, V, P> LineTree<R, V, P>
where
    R: Scalar,
    V: Element<R>,
    P: Recurrence<R, Record = RecurrenceRecord<R>>,
{
    pub fn new(provider: P, x: ArrayD<V>) -> Self {
        debug!(
            "line tree: points {:?}, mode={}",
            x.shape(),
            provider.arithmetic().mode()
        );
        Self {
            provider,
            x,
            prev: None,
            curr: None,
            degree: 0,
            _scalar: PhantomData,
        }
    }

    /// Degree of the next level to be produced.
    pub fn degree(&self) -> usize {
        self.degree
    }

    fn advance(&self, curr: &ArrayD<V>) -> ArrayD<V> {
        let RecurrenceRecord { a, b, c } = self.provider.record(self.degree - 1);
        let lifted = Zip::from(&self.x)
            .and(curr)
            .map_collect(|x, p| x.scale(&a) * p.clone() - p.scale(&b));
        match (c, &self.prev) {
            (Some(c), Some(prev)) => Zip::from(&lifted)
                .and(prev)
                .map_collect(|v, q| v.clone() - q.scale(&c)),
            _ => lifted,
        }
    }
}

impl<R, V, P> Iterator for LineTree<R, V, P>
where
    R: Scalar,
    V: Element<R>,
    P: Recurrence<R, Record = RecurrenceRecord<R>>,
{
    type Item = ArrayD<V>;

    fn next(&mut self) -> Option<ArrayD<V>> {
        let level = match &self.curr {
            None => constant_like(&self.x, &self.provider.p0()),
            Some(curr) => self.advance(curr),
        };
        trace!("line tree: produced degree {}", self.degree);
        self.prev = self.curr.replace(level.clone());
        self.degree += 1;
        Some(level.insert_axis(Axis(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::{ArithmeticMode, Exact};
    use crate::recurrence::{LineRecurrence, Scaling};
    use crate::tree::{Levels, point};
    use approx::assert_relative_eq;
    use ndarray::{IxDyn, arr1};

    fn q(n: i64, d: i64) -> Exact {
        Exact::ratio(n, d)
    }

    #[test]
    fn test_chebyshev1_monic_levels() {
        let p = LineRecurrence::<Exact>::chebyshev1(Scaling::Monic, ArithmeticMode::Auto).unwrap();
        let x = arr1(&[q(0, 1), q(1, 2), q(1, 1)]).into_dyn();
        let expected = [
            [q(1, 1), q(1, 1), q(1, 1)],
            [q(0, 1), q(1, 2), q(1, 1)],
            [q(-1, 2), q(-1, 4), q(1, 2)],
            [q(0, 1), q(-1, 4), q(1, 4)],
            [q(1, 8), q(-1, 16), q(1, 8)],
            [q(0, 1), q(1, 32), q(1, 16)],
        ];
        for (level, row) in LineTree::new(&p, x).zip(expected) {
            assert_eq!(level.shape(), &[1, 3]);
            assert_eq!(level.into_raw_vec_and_offset().0, row.to_vec());
        }
    }

    #[test]
    fn test_chebyshev1_normal_values() {
        let p = LineRecurrence::<Exact>::chebyshev1(Scaling::Normal, ArithmeticMode::Auto).unwrap();
        let levels = LineTree::new(&p, point(q(1, 2))).tree(2);
        let inv_sqrt_pi = Exact::pi().sqrt().recip();
        assert_eq!(levels[0][IxDyn(&[0])], inv_sqrt_pi.clone());
        assert_eq!(
            levels[1][IxDyn(&[0])],
            q(1, 2) * q(2, 1).sqrt() * inv_sqrt_pi.clone()
        );
        assert_eq!(levels[2][IxDyn(&[0])], q(-1, 2) * q(2, 1).sqrt() * inv_sqrt_pi);
    }

    #[test]
    fn test_float_points_follow_recurrence() {
        let p = LineRecurrence::<f64>::legendre(Scaling::Classical, ArithmeticMode::Auto).unwrap();
        let x = arr1(&[-0.7, 0.2, 0.9]).into_dyn();
        let levels: Vec<_> = LineTree::new(&p, x.clone()).take(8).collect();
        for n in 1..7 {
            let r = p.record(n);
            for i in 0..3 {
                let expected = (r.a * x[[i].as_slice()] - r.b) * levels[n][[0, i].as_slice()]
                    - r.c.unwrap() * levels[n - 1][[0, i].as_slice()];
                assert_relative_eq!(levels[n + 1][[0, i].as_slice()], expected, epsilon = 1e-14);
            }
        }
        // P_n(1) = 1
        let at_one = LineTree::new(&p, point(1.0)).nth(6).unwrap();
        assert_relative_eq!(at_one[IxDyn(&[0])], 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_degree_counter() {
        let p = LineRecurrence::<f64>::legendre(Scaling::Monic, ArithmeticMode::Auto).unwrap();
        let mut tree = LineTree::new(&p, point(0.3));
        assert_eq!(tree.degree(), 0);
        tree.next();
        tree.next();
        assert_eq!(tree.degree(), 2);
    }
}
