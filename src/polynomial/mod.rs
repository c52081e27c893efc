//! Polynomial values for symbolic evaluation.
//!
//! This module provides:
//! - sparse multivariate polynomials over any coefficient ring
//! - exact monomial integrals on the interval, disk and sphere

mod integrals;
mod multivariate;

pub use integrals::{disk_monomial_integral, interval_monomial_integral, sphere_monomial_integral};
pub use multivariate::Polynomial;
