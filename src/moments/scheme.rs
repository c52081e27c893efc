//! Conversions between recurrence coefficients and Gauss quadrature.

use faer::{Col, Mat, Side};
use log::{debug, trace, warn};

use super::{CoefficientTable, golub_welsch};
use crate::arith::Scalar;
use crate::error::{OrthoError, Result};

/// Gauss quadrature rule with nodes in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussScheme {
    pub nodes: Vec<f64>,
    pub weights: Vec<f64>,
}

impl GaussScheme {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `Σ wᵢ f(xᵢ)`.
    pub fn integrate(&self, f: impl Fn(f64) -> f64) -> f64 {
        self.nodes
            .iter()
            .zip(&self.weights)
            .map(|(&x, &w)| w * f(x))
            .sum()
    }
}

/// Gauss rule of a coefficient table by eigendecomposition of the symmetric
/// Jacobi matrix (diagonal `α_k`, off-diagonal `√β_{k+1}`).
///
/// Nodes are the eigenvalues, weights `μ₀·u₀ⱼ²` from the first component of
/// each normalised eigenvector. An empty table is rejected.
pub fn scheme_from_coefficients<R: Scalar>(table: &CoefficientTable<R>) -> Result<GaussScheme> {
    let n = table.len();
    if n == 0 {
        return Err(OrthoError::Empty("coefficient table"));
    }
    let mut jacobi = Mat::<f64>::zeros(n, n);
    for k in 0..n {
        let diag = table.alpha_at(k).to_f64();
        let off = if k + 1 < n { table.beta_at(k + 1).to_f64().sqrt() } else { 0.0 };
        if diag.is_nan() || off.is_nan() {
            return Err(OrthoError::Decomposition(format!(
                "Jacobi matrix row {k} is not finite (negative or missing β)"
            )));
        }
        jacobi[(k, k)] = diag;
        if k + 1 < n {
            jacobi[(k, k + 1)] = off;
            jacobi[(k + 1, k)] = off;
        }
    }

    let eigen = jacobi
        .self_adjoint_eigen(Side::Lower)
        .map_err(|e| OrthoError::Decomposition(format!("{e:?}")))?;
    let values = eigen.S().column_vector();
    let vectors = eigen.U();
    let mu0 = table.zeroth_moment().to_f64();

    let mut pairs: Vec<(f64, f64)> = (0..n)
        .map(|j| (values[j], mu0 * vectors[(0, j)] * vectors[(0, j)]))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    debug!("gauss scheme: {n} nodes, mu0={mu0}");

    let (nodes, weights) = pairs.into_iter().unzip();
    Ok(GaussScheme { nodes, weights })
}

/// Coefficient table of the discrete measure `Σ wᵢ δ(x − xᵢ)` by the
/// Lanczos process on `diag(nodes)`, started from `√w/‖√w‖`, with full
/// reorthogonalisation.
pub fn coefficients_from_scheme(nodes: &[f64], weights: &[f64]) -> Result<CoefficientTable<f64>> {
    if nodes.len() != weights.len() {
        return Err(OrthoError::LengthMismatch {
            what: "nodes and weights",
            left: nodes.len(),
            right: weights.len(),
        });
    }
    let n = nodes.len();
    if n == 0 {
        return Err(OrthoError::Empty("quadrature scheme"));
    }
    let mu0: f64 = weights.iter().sum();
    let int_1 = mu0.sqrt();

    let mut basis = Mat::<f64>::zeros(n, n);
    for (i, &w) in weights.iter().enumerate() {
        basis[(i, 0)] = w.sqrt() / int_1;
    }

    let mut alpha = Vec::with_capacity(n);
    let mut beta = Vec::with_capacity(n);
    beta.push(None);
    for k in 0..n {
        let mut v = Col::<f64>::from_fn(n, |i| nodes[i] * basis[(i, k)]);
        let a: f64 = (0..n).map(|i| basis[(i, k)] * v[i]).sum();
        alpha.push(a);
        if k + 1 == n {
            break;
        }

        // project out every previous Lanczos vector, twice for stability
        for _ in 0..2 {
            for j in 0..=k {
                let overlap: f64 = (0..n).map(|i| basis[(i, j)] * v[i]).sum();
                for i in 0..n {
                    v[i] -= overlap * basis[(i, j)];
                }
            }
        }

        let norm = v.norm_l2();
        if norm <= f64::EPSILON * int_1 {
            warn!("lanczos: breakdown at step {k}, nodes are not distinct");
        }
        trace!("lanczos: step {k}, alpha={a}, beta={}", norm * norm);
        for i in 0..n {
            basis[(i, k + 1)] = v[i] / norm;
        }
        beta.push(Some(norm * norm));
    }

    Ok(CoefficientTable::new(alpha, beta, int_1))
}

/// Gauss rule straight from ordinary moments: [`golub_welsch`] followed by
/// [`scheme_from_coefficients`].
pub fn gauss_from_moments<R: Scalar>(moments: &[R]) -> Result<GaussScheme> {
    scheme_from_coefficients(&golub_welsch(moments)?)
}
