//! The real scalar types the crate computes with.

use std::f64::consts::PI;
use std::fmt::{Debug, Display};
use std::ops::Neg;

use num_traits::Num;

use super::{ArithmeticMode, Exact};

/// A real scalar: either an IEEE float or an [`Exact`] number.
///
/// Every operation is total. Results that the type cannot represent are
/// NaN, never a panic.
pub trait Scalar: Num + Clone + Debug + Display + Neg<Output = Self> + 'static {
    /// Arithmetic that `ArithmeticMode::Auto` resolves to for this type.
    const MODE: ArithmeticMode;

    fn from_ratio(num: i64, den: i64) -> Self;
    fn from_f64(value: f64) -> Self;
    fn to_f64(&self) -> f64;
    fn from_exact(value: &Exact) -> Self;
    fn to_exact(&self) -> Exact;

    fn nan() -> Self;
    fn is_nan(&self) -> bool;
    fn pi() -> Self;
    fn sqrt(&self) -> Self;
    fn gamma(&self) -> Self;
    fn powr(&self, exponent: &Self) -> Self;
    fn sin(&self) -> Self;
    fn cos(&self) -> Self;
    fn exp(&self) -> Self;

    /// Integer constant.
    fn from_int(value: i64) -> Self {
        Self::from_ratio(value, 1)
    }
}

/// Convert between scalar types. Float to float stays in floating point;
/// everything else goes through [`Exact`].
pub fn cast<S: Scalar, T: Scalar>(value: &S) -> T {
    if S::MODE == ArithmeticMode::Floating && T::MODE == ArithmeticMode::Floating {
        T::from_f64(value.to_f64())
    } else {
        T::from_exact(&value.to_exact())
    }
}

impl Scalar for f64 {
    const MODE: ArithmeticMode = ArithmeticMode::Floating;

    fn from_ratio(num: i64, den: i64) -> Self {
        num as f64 / den as f64
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(&self) -> f64 {
        *self
    }

    fn from_exact(value: &Exact) -> Self {
        value.to_f64()
    }

    fn to_exact(&self) -> Exact {
        Exact::from_f64(*self)
    }

    fn nan() -> Self {
        f64::NAN
    }

    fn is_nan(&self) -> bool {
        f64::is_nan(*self)
    }

    fn pi() -> Self {
        PI
    }

    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    fn gamma(&self) -> Self {
        gamma_f64(*self)
    }

    fn powr(&self, exponent: &Self) -> Self {
        f64::powf(*self, *exponent)
    }

    fn sin(&self) -> Self {
        f64::sin(*self)
    }

    fn cos(&self) -> Self {
        f64::cos(*self)
    }

    fn exp(&self) -> Self {
        f64::exp(*self)
    }
}

impl Scalar for Exact {
    const MODE: ArithmeticMode = ArithmeticMode::Exact;

    fn from_ratio(num: i64, den: i64) -> Self {
        Exact::ratio(num, den)
    }

    fn from_f64(value: f64) -> Self {
        Exact::from_f64(value)
    }

    fn to_f64(&self) -> f64 {
        Exact::to_f64(self)
    }

    fn from_exact(value: &Exact) -> Self {
        value.clone()
    }

    fn to_exact(&self) -> Exact {
        self.clone()
    }

    fn nan() -> Self {
        Exact::nan()
    }

    fn is_nan(&self) -> bool {
        Exact::is_nan(self)
    }

    fn pi() -> Self {
        Exact::pi()
    }

    fn sqrt(&self) -> Self {
        Exact::sqrt(self)
    }

    fn gamma(&self) -> Self {
        Exact::gamma(self)
    }

    fn powr(&self, exponent: &Self) -> Self {
        Exact::powr(self, exponent)
    }

    fn sin(&self) -> Self {
        Exact::sin(self)
    }

    fn cos(&self) -> Self {
        Exact::cos(self)
    }

    fn exp(&self) -> Self {
        Exact::exp(self)
    }
}

// Lanczos approximation, g = 7, n = 9.
const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Gamma function in double precision.
///
/// Integer arguments up to 170 use the factorial product, which is exact in
/// that range as far as `f64` allows; the rest uses the Lanczos series with
/// reflection for `x < 1/2`.
fn gamma_f64(x: f64) -> f64 {
    if x.is_nan() || (x <= 0.0 && x.fract() == 0.0) {
        return f64::NAN;
    }
    if x.fract() == 0.0 && x <= 171.0 {
        return (2..x as u32).fold(1.0, |acc, k| acc * f64::from(k));
    }
    if x < 0.5 {
        return PI / ((PI * x).sin() * gamma_f64(1.0 - x));
    }
    let z = x - 1.0;
    let mut sum = LANCZOS_COEFFS[0];
    for (i, &c) in LANCZOS_COEFFS[1..].iter().enumerate() {
        sum += c / (z + (i + 1) as f64);
    }
    let t = z + LANCZOS_G + 0.5;
    (2.0 * PI).sqrt() * t.powf(z + 0.5) * (-t).exp() * sum
}
