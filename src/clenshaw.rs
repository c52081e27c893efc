//! Clenshaw summation of line expansions.

use log::debug;
use ndarray::{ArrayD, Zip};

use crate::arith::{Element, Scalar};
use crate::error::{OrthoError, Result};
use crate::recurrence::LineRecurrenceSource;
use crate::tree::{axpy, constant_like, scaled};

/// Evaluate `Σ_k coefficients[k]·p_k(x)` with Clenshaw's backward
/// recurrence
///
/// ```text
/// b_k = d_k + (a_k·x − b_k)·b_{k+1} − c_{k+1}·b_{k+2},    sum = p0·b_0
/// ```
///
/// Only two work arrays are kept and each record is requested once.
///
/// # Errors
///
/// [`OrthoError::EmptyExpansion`] when `coefficients` is empty.
pub fn clenshaw<R, V, P>(coefficients: &[R], provider: P, x: &ArrayD<V>) -> Result<ArrayD<V>>
where
    R: Scalar,
    V: Element<R>,
    P: LineRecurrenceSource<R>,
{
    let (last, rest) = coefficients.split_last().ok_or(OrthoError::EmptyExpansion)?;
    debug!(
        "clenshaw: {} coefficients, points {:?}",
        coefficients.len(),
        x.shape()
    );

    let mut b1 = constant_like(x, last);
    let mut b2: Option<ArrayD<V>> = None;
    let mut coupling: Option<R> = None;
    for (k, d) in rest.iter().enumerate().rev() {
        let record = provider.record(k);
        let mut b0 = Zip::from(x)
            .and(&b1)
            .map_collect(|x, v| x.scale(&record.a) * v.clone() - v.scale(&record.b) + v.constant_like(d));
        if let (Some(c), Some(b2)) = (&coupling, &b2) {
            b0 = axpy(&b0, &-c.clone(), b2);
        }
        b2 = Some(std::mem::replace(&mut b1, b0));
        coupling = record.c;
    }
    Ok(scaled(&b1, &provider.p0()))
}
