use log::{trace, warn};

use super::CoefficientTable;
use crate::arith::Scalar;
use crate::polynomial::Polynomial;

/// Stieltjes procedure from an inner-product oracle.
///
/// `integrate` returns `∫ p(x) w(x) dx` for a univariate polynomial. The
/// monic orthogonal polynomials are built by Gram–Schmidt, keeping only the
/// last two of them:
///
/// ```text
/// α_k = ⟨x·π_k, π_k⟩ / ⟨π_k, π_k⟩,    β_k = ⟨π_k, π_k⟩ / ⟨π_{k−1}, π_{k−1}⟩
/// ```
pub fn stieltjes<R, F>(mut integrate: F, n: usize) -> CoefficientTable<R>
where
    R: Scalar,
    F: FnMut(&Polynomial<R>) -> R,
{
    let x = Polynomial::variable(1, 0, R::one());
    let mut prev = Polynomial::zero(1);
    let mut curr = Polynomial::constant(1, R::one());

    let mut alpha = Vec::with_capacity(n);
    let mut beta = Vec::with_capacity(n);
    let mut norm_prev = R::one();
    let mut norm = integrate(&(curr.clone() * curr.clone()));
    let int_1 = norm.sqrt();

    for k in 0..n {
        if norm.to_f64() <= 0.0 {
            warn!("stieltjes: non-positive norm at step {k}");
        }
        let x_curr = x.clone() * curr.clone();
        let a = integrate(&(x_curr.clone() * curr.clone())) / norm.clone();
        let b = (k > 0).then(|| norm.clone() / norm_prev.clone());
        trace!("stieltjes: step {k}, alpha={a}");

        let mut next = x_curr - curr.map(|c: &R| c.clone() * a.clone());
        if let Some(b) = &b {
            next = next - prev.map(|c: &R| c.clone() * b.clone());
        }
        alpha.push(a);
        beta.push(b);

        prev = std::mem::replace(&mut curr, next);
        norm_prev = std::mem::replace(&mut norm, integrate(&(curr.clone() * curr.clone())));
    }

    CoefficientTable::new(alpha, beta, int_1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::{ArithmeticMode, Exact};
    use crate::polynomial::interval_monomial_integral;
    use crate::recurrence::{LineRecurrence, Recurrence, Scaling};

    #[test]
    fn test_legendre_weight() {
        let n = 5;
        let table = stieltjes(
            |p: &Polynomial<Exact>| p.apply_linear(interval_monomial_integral),
            n,
        );
        let legendre = LineRecurrence::<Exact>::legendre(Scaling::Monic, ArithmeticMode::Auto).unwrap();
        for k in 0..n {
            let r = legendre.record(k);
            assert_eq!(table.alpha[k], r.b);
            assert_eq!(table.beta[k], r.c);
        }
        assert_eq!(table.int_1, legendre.zeroth_moment().sqrt());
    }

    #[test]
    fn test_x_squared_weight() {
        // ∫ |x|² p(x) dx on [-1, 1]
        let table = stieltjes(
            |p: &Polynomial<Exact>| {
                p.apply_linear(|e| interval_monomial_integral(&[e[0] + 2]))
            },
            5,
        );
        let expected = [(3, 5), (4, 35), (25, 63), (16, 99)];
        assert!(table.beta[0].is_none());
        for (k, (num, den)) in expected.iter().enumerate() {
            assert_eq!(table.beta[k + 1], Some(Exact::ratio(*num, *den)));
        }
        assert!(table.alpha.iter().all(|a| *a == Exact::ratio(0, 1)));
        assert_eq!(table.int_1, Exact::ratio(2, 3).sqrt());
    }
}
