//! Integrals of monomials over the standard domains.
//!
//! Combined with [`Polynomial::apply_linear`](super::Polynomial::apply_linear)
//! these integrate polynomial basis functions exactly.

use crate::arith::Scalar;

fn exponent(exponents: &[u32], i: usize) -> i64 {
    exponents.get(i).map_or(0, |&e| i64::from(e))
}

/// `Γ((k+1)/2)`.
fn half_gamma<R: Scalar>(k: i64) -> R {
    R::from_ratio(k + 1, 2).gamma()
}

/// `∫_{-1}^{1} x^k dx`.
pub fn interval_monomial_integral<R: Scalar>(exponents: &[u32]) -> R {
    let k = exponent(exponents, 0);
    if k % 2 == 1 {
        R::zero()
    } else {
        R::from_ratio(2, k + 1)
    }
}

/// `∫ x^a y^b` over the unit disk.
pub fn disk_monomial_integral<R: Scalar>(exponents: &[u32]) -> R {
    let (a, b) = (exponent(exponents, 0), exponent(exponents, 1));
    if a % 2 == 1 || b % 2 == 1 {
        return R::zero();
    }
    // ∫ r^(a+b+1) dr · ∫ cos^a sin^b dθ
    let angular =
        R::from_int(2) * half_gamma::<R>(a) * half_gamma::<R>(b) / R::from_ratio(a + b + 2, 2).gamma();
    angular / R::from_int(a + b + 2)
}

/// `∫ x^a y^b z^c` over the unit sphere surface.
pub fn sphere_monomial_integral<R: Scalar>(exponents: &[u32]) -> R {
    let (a, b, c) = (
        exponent(exponents, 0),
        exponent(exponents, 1),
        exponent(exponents, 2),
    );
    if a % 2 == 1 || b % 2 == 1 || c % 2 == 1 {
        return R::zero();
    }
    R::from_int(2) * half_gamma::<R>(a) * half_gamma::<R>(b) * half_gamma::<R>(c)
        / R::from_ratio(a + b + c + 3, 2).gamma()
}
