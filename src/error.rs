//! Error types for coefficient providers, evaluators and moment reconstruction.
//!
//! Structural problems (unknown scaling, out-of-domain parameters, malformed
//! point arrays, too few moments) are reported when an object is built.
//! Numerical ill-conditioning is never an error: it shows up as NaN or
//! meaningless coefficients and is caught by
//! [`check_coefficients`](crate::moments::check_coefficients).

use thiserror::Error;

use crate::recurrence::Scaling;

/// Errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrthoError {
    /// Scaling tag that names no known convention.
    #[error("unknown scaling `{0}`")]
    UnknownScaling(String),

    /// Known scaling that the chosen family does not offer.
    #[error("scaling `{scaling}` is not available for {family}")]
    UnsupportedScaling {
        family: &'static str,
        scaling: Scaling,
    },

    /// Arithmetic mode tag that is neither `auto`, exact nor floating.
    #[error("unknown arithmetic mode `{0}`")]
    UnknownMode(String),

    /// Family parameter outside its domain.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Evaluation points whose layout does not fit the family.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// A quantity that exact arithmetic cannot represent.
    #[error("{0} cannot be represented in exact arithmetic")]
    Inexact(String),

    /// Clenshaw summation called without coefficients.
    #[error("expansion coefficient list is empty")]
    EmptyExpansion,

    /// Moment sequence too short for the requested algorithm.
    #[error("need at least {needed} moments, got {got}")]
    NotEnoughMoments { needed: usize, got: usize },

    /// Conversion that needs at least one node or recurrence step.
    #[error("{0} is empty")]
    Empty(&'static str),

    /// Two sequences that must have equal length do not.
    #[error("length mismatch: {what} ({left} vs {right})")]
    LengthMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },

    /// Matrix factorisation failed.
    #[error("decomposition failed: {0}")]
    Decomposition(String),

    /// Moment recomputed from a coefficient table disagrees with the input.
    #[error("moment {index} mismatch: expected {expected}, recomputed {actual}")]
    MomentMismatch {
        index: usize,
        expected: f64,
        actual: f64,
    },
}

impl OrthoError {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OrthoError>;
