use log::{debug, warn};

use super::CoefficientTable;
use crate::arith::Scalar;
use crate::error::{OrthoError, Result};

/// Recompute moments from a coefficient table and compare them with the
/// input.
///
/// Moment `j` is `μ₀·⟨e₀, Jʲ e₀⟩` for the monic Jacobi operator
/// `x·π_k = π_{k+1} + α_k π_k + β_k π_{k−1}`; a table of `n` steps
/// reproduces moments `0..2n` exactly. The first moment whose deviation
/// exceeds `tol·max(1, |μ_j|)` is returned as
/// [`OrthoError::MomentMismatch`].
pub fn check_coefficients<R: Scalar>(
    moments: &[R],
    table: &CoefficientTable<R>,
    tol: f64,
) -> Result<()> {
    let n = table.len();
    let count = moments.len().min(2 * n);
    debug!("checking {count} moments against {n} coefficients");

    let mu0 = table.zeroth_moment();
    // coordinates of x^j in the basis π_0..π_{n−1}
    let mut v = vec![R::zero(); n];
    if let Some(first) = v.first_mut() {
        *first = R::one();
    }

    for (j, expected) in moments.iter().take(count).enumerate() {
        let actual = mu0.clone() * v[0].clone();
        let deviation = (actual.clone() - expected.clone()).to_f64().abs();
        let scale = expected.to_f64().abs().max(1.0);
        if !(deviation <= tol * scale) {
            warn!("moment {j} does not match: expected {expected}, recomputed {actual}");
            return Err(OrthoError::MomentMismatch {
                index: j,
                expected: expected.to_f64(),
                actual: actual.to_f64(),
            });
        }

        v = (0..n)
            .map(|k| {
                let mut s = table.alpha_at(k) * v[k].clone();
                if k > 0 {
                    s = s + v[k - 1].clone();
                }
                if k + 1 < n {
                    s = s + table.beta_at(k + 1) * v[k + 1].clone();
                }
                s
            })
            .collect();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::Exact;
    use crate::moments::{chebyshev, golub_welsch};

    fn x_squared_moments(count: usize) -> Vec<f64> {
        (0..count)
            .map(|k| if k % 2 == 1 { 0.0 } else { 2.0 / (k as f64 + 3.0) })
            .collect()
    }

    #[test]
    fn test_reconstructed_tables_pass() {
        let moments = x_squared_moments(11);
        let table = golub_welsch(&moments).unwrap();
        check_coefficients(&moments, &table, 1e-12).unwrap();

        let exact: Vec<Exact> = (0..10)
            .map(|k| if k % 2 == 1 { Exact::ratio(0, 1) } else { Exact::ratio(2, k + 3) })
            .collect();
        let table = chebyshev(&exact).unwrap();
        check_coefficients(&exact, &table, 0.0).unwrap();
    }

    #[test]
    fn test_perturbed_table_fails() {
        let moments = x_squared_moments(10);
        let mut table = golub_welsch(&moments[..9]).unwrap();
        table.beta[2] = table.beta[2].map(|b| b * 1.01);
        match check_coefficients(&moments, &table, 1e-12) {
            Err(OrthoError::MomentMismatch { index, .. }) => assert_eq!(index, 4),
            other => panic!("expected a mismatch, got {other:?}"),
        }
    }
}
