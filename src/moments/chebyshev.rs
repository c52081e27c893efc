//! Chebyshev's algorithm and its modified form.

use log::{debug, warn};

use super::CoefficientTable;
use crate::arith::{ArithmeticMode, Scalar};
use crate::error::{OrthoError, Result};
use crate::recurrence::{LineRecurrenceSource, MonomialBasis, RecurrenceRecord};

/// Recurrence coefficients from ordinary moments `μ_k = ∫ x^k w(x) dx`.
///
/// `moments.len() / 2` coefficients are produced. The map from moments to
/// coefficients is badly conditioned, so in floating point only a handful of
/// coefficients are trustworthy; use [`chebyshev_modified`] with a basis
/// suited to the weight, or exact moments, for more.
pub fn chebyshev<R: Scalar>(moments: &[R]) -> Result<CoefficientTable<R>> {
    chebyshev_modified(moments, MonomialBasis::<R>::new(ArithmeticMode::Auto))
}

/// Recurrence coefficients from modified moments `m_l = ∫ p_l(x) w(x) dx`
/// of a reference family `p_l` given by its recurrence.
///
/// With `σ_{k,l} = ∫ π_k p_l w` and the reference recurrence
/// `x·p_l = (p_{l+1} + b_l·p_l + c_l·p_{l−1}) / a_l`:
///
/// ```text
/// σ_{k,l} = (σ_{k−1,l+1} + b_l σ_{k−1,l} + c_l σ_{k−1,l−1}) / a_l
///           − α_{k−1} σ_{k−1,l} − β_{k−1} σ_{k−2,l}
/// α_k = b_k/a_k + σ_{k,k+1}/(a_k σ_{k,k}) − σ_{k−1,k}/(a_{k−1} σ_{k−1,k−1})
/// β_k = σ_{k,k} / (a_{k−1} σ_{k−1,k−1})
/// ```
///
/// Only two rows of `σ` are kept.
pub fn chebyshev_modified<R, P>(moments: &[R], reference: P) -> Result<CoefficientTable<R>>
where
    R: Scalar,
    P: LineRecurrenceSource<R>,
{
    if moments.len() < 2 {
        return Err(OrthoError::NotEnoughMoments {
            needed: 2,
            got: moments.len(),
        });
    }
    let n = moments.len() / 2;
    let width = 2 * n;
    debug!("modified chebyshev: {} moments, {n} coefficients", moments.len());

    let records: Vec<RecurrenceRecord<R>> = (0..width).map(|l| reference.record(l)).collect();
    let p0 = reference.p0();

    // σ_{k−2,·} and σ_{k−1,·}, indexed by l
    let mut older = vec![R::zero(); width];
    let mut row = moments[..width].to_vec();

    let mut alpha = Vec::with_capacity(n);
    let mut beta: Vec<Option<R>> = Vec::with_capacity(n);
    alpha.push(records[0].b.clone() / records[0].a.clone()
        + row[1].clone() / (records[0].a.clone() * row[0].clone()));
    beta.push(None);

    for k in 1..n {
        let mut next = vec![R::zero(); width];
        for l in k..width - k {
            let RecurrenceRecord { a, b, c } = &records[l];
            let mut s = (row[l + 1].clone() + b.clone() * row[l].clone()) / a.clone()
                - alpha[k - 1].clone() * row[l].clone();
            if let Some(c) = c {
                s = s + c.clone() * row[l - 1].clone() / a.clone();
            }
            if let Some(b_prev) = &beta[k - 1] {
                s = s - b_prev.clone() * older[l].clone();
            }
            next[l] = s;
        }

        if next[k].to_f64() <= 0.0 {
            warn!("modified chebyshev: non-positive σ at step {k}, moments are ill-conditioned");
        }
        let (a_k, a_prev) = (records[k].a.clone(), records[k - 1].a.clone());
        let b_k = next[k].clone() / (a_prev.clone() * row[k - 1].clone());
        let a = records[k].b.clone() / a_k.clone()
            + next[k + 1].clone() / (a_k * next[k].clone())
            - row[k].clone() / (a_prev * row[k - 1].clone());
        alpha.push(a);
        beta.push(Some(b_k));

        older = std::mem::replace(&mut row, next);
    }

    let int_1 = (moments[0].clone() / p0).sqrt();
    Ok(CoefficientTable::new(alpha, beta, int_1))
}
