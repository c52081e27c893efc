//! # orthopoly
//!
//! Orthogonal polynomials driven by their recurrence coefficients.
//!
//! This crate provides:
//! - Recurrence-coefficient providers (Chebyshev, Legendre, Gegenbauer,
//!   Jacobi, Zernike, spherical harmonics, associated Legendre functions)
//!   under several scalings
//! - Lazy degree-by-degree evaluation on arrays of points
//! - Clenshaw summation of line expansions
//! - Reconstruction of recurrence coefficients and Gauss rules from moments
//!   (Stieltjes, Chebyshev, modified Chebyshev, Golub–Welsch)
//! - Exact arithmetic (rationals, square roots, powers of π) alongside `f64`
//!
//! ```
//! use orthopoly::{ArithmeticMode, Exact, LineRecurrence, LineTree, Scaling, point};
//!
//! let legendre = LineRecurrence::<Exact>::legendre(Scaling::Monic, ArithmeticMode::Auto).unwrap();
//! let p5 = LineTree::new(&legendre, point(Exact::ratio(1, 1))).nth(5).unwrap();
//! assert_eq!(p5.iter().next(), Some(&Exact::ratio(8, 63)));
//! ```

pub mod arith;
pub mod clenshaw;
pub mod error;
pub mod moments;
pub mod polynomial;
pub mod recurrence;
pub mod tree;

// Re-export main types for convenience
pub use arith::{Arithmetic, ArithmeticMode, Element, Exact, Scalar, cast};
pub use clenshaw::clenshaw;
pub use error::{OrthoError, Result};
pub use moments::{
    CoefficientTable, GaussScheme, check_coefficients, chebyshev, chebyshev_modified,
    coefficients_from_scheme, gauss_from_moments, golub_welsch, scheme_from_coefficients,
    stieltjes,
};
pub use polynomial::{
    Polynomial, disk_monomial_integral, interval_monomial_integral, sphere_monomial_integral,
};
pub use recurrence::{
    AlpRecurrence, DiskRecord, DiskRecurrence, LineFamily, LineRecurrence, LineRecurrenceSource,
    MonomialBasis, Recurrence, RecurrenceRecord, Scaling, SphereRecord, SphereRecurrence,
};
pub use tree::{DiskTree, Levels, LineTree, SphereTree, point};
