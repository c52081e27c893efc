use log::{debug, warn};
use ndarray::Array2;

use super::CoefficientTable;
use crate::arith::Scalar;
use crate::error::{OrthoError, Result};

/// Golub–Welsch reconstruction from ordinary moments.
///
/// Factors the Hankel matrix `H_{ij} = μ_{i+j}`, `i, j = 0..=n` with
/// `n = (len − 1)/2`, as `L·D·Lᵀ` (the square-root free form of its Cholesky
/// factor `R = √D·Lᵀ`) and reads off
///
/// ```text
/// α_k = l_{k+1,k} − l_{k,k−1},    β_k = d_k / d_{k−1},    int_1 = √d_0
/// ```
///
/// No square roots are taken until `int_1`, so exact moments stay exact.
pub fn golub_welsch<R: Scalar>(moments: &[R]) -> Result<CoefficientTable<R>> {
    if moments.len() < 3 {
        return Err(OrthoError::NotEnoughMoments {
            needed: 3,
            got: moments.len(),
        });
    }
    let n = (moments.len() - 1) / 2;
    debug!("golub-welsch: {} moments, {n} coefficients", moments.len());

    let size = n + 1;
    let mut lower = Array2::from_elem((size, size), R::zero());
    let mut diag: Vec<R> = Vec::with_capacity(size);
    for j in 0..size {
        let mut d = moments[2 * j].clone();
        for k in 0..j {
            d = d - lower[(j, k)].clone() * lower[(j, k)].clone() * diag[k].clone();
        }
        if d.to_f64() <= 0.0 {
            warn!("golub-welsch: Hankel matrix is not positive definite at pivot {j}");
        }
        lower[(j, j)] = R::one();
        for i in j + 1..size {
            let mut s = moments[i + j].clone();
            for k in 0..j {
                s = s - lower[(i, k)].clone() * lower[(j, k)].clone() * diag[k].clone();
            }
            lower[(i, j)] = s / d.clone();
        }
        diag.push(d);
    }

    let alpha = (0..n)
        .map(|k| {
            let below = lower[(k + 1, k)].clone();
            if k == 0 { below } else { below - lower[(k, k - 1)].clone() }
        })
        .collect();
    let beta = (0..n)
        .map(|k| (k > 0).then(|| diag[k].clone() / diag[k - 1].clone()))
        .collect();

    Ok(CoefficientTable::new(alpha, beta, diag[0].sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::Exact;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_x_squared_weight() {
        let moments: Vec<f64> = (0..11)
            .map(|k| if k % 2 == 1 { 0.0 } else { 2.0 / (k as f64 + 3.0) })
            .collect();
        let table = golub_welsch(&moments).unwrap();
        assert_eq!(table.len(), 5);
        for a in &table.alpha {
            assert_abs_diff_eq!(*a, 0.0, epsilon = 1e-14);
        }
        assert!(table.beta[0].is_none());
        let expected = [3.0 / 5.0, 4.0 / 35.0, 25.0 / 63.0, 16.0 / 99.0];
        for (b, e) in table.beta[1..].iter().zip(expected) {
            assert_abs_diff_eq!(b.unwrap(), e, epsilon = 1e-14);
        }
        assert_abs_diff_eq!(table.int_1, (2.0_f64 / 3.0).sqrt(), epsilon = 1e-14);
    }

    #[test]
    fn test_exact_legendre_moments() {
        let moments: Vec<Exact> = (0..7)
            .map(|k| if k % 2 == 1 { Exact::ratio(0, 1) } else { Exact::ratio(2, k + 1) })
            .collect();
        let table = golub_welsch(&moments).unwrap();
        assert_eq!(
            table.beta,
            vec![None, Some(Exact::ratio(1, 3)), Some(Exact::ratio(4, 15))]
        );
        assert_eq!(table.int_1, Exact::ratio(2, 1).sqrt());
    }

    #[test]
    fn test_shifted_weight_has_nonzero_alpha() {
        // w = 1 on [0, 1]: μ_k = 1/(k + 1), shifted Legendre has α_k = 1/2
        let moments: Vec<Exact> = (0..5).map(|k| Exact::ratio(1, k + 1)).collect();
        let table = golub_welsch(&moments).unwrap();
        assert_eq!(table.alpha, vec![Exact::ratio(1, 2), Exact::ratio(1, 2)]);
        assert_eq!(table.beta[1], Some(Exact::ratio(1, 12)));
    }
}
