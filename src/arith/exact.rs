//! Exact real numbers for symbolic-mode coefficient generation.
//!
//! Values are finite sums
//!
//! ```text
//! Σᵢ qᵢ · √sᵢ · π^(kᵢ/2)
//! ```
//!
//! with big rational `qᵢ`, square-free `sᵢ` and integer `kᵢ`. That is enough
//! to carry every normalisation constant the supported families need
//! (`√((2n+1)/2)`, `1/√π`, `1/√(4π)`, half-integer gamma values) without
//! rounding. Sums, differences and products stay in this set; division
//! rationalises radicals in the divisor; square roots are exact for
//! `q · π^k`. Anything outside that set becomes [`Exact::nan`], which absorbs
//! every further operation just like an IEEE NaN.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_rational::{BigRational, ParseRatioError};
use num_traits::{Num, One, Signed, ToPrimitive, Zero};

/// Basis element `√root · π^(pi_halves/2)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Radical {
    root: BigUint,
    pi_halves: i32,
}

impl Radical {
    fn unit() -> Self {
        Self {
            root: BigUint::one(),
            pi_halves: 0,
        }
    }

    fn is_unit(&self) -> bool {
        self.root.is_one() && self.pi_halves == 0
    }

    /// Product of two radicals, returned as an integer factor and a new radical.
    fn product(&self, other: &Self) -> (BigUint, Self) {
        let g = self.root.gcd(&other.root);
        let root = (&self.root / &g) * (&other.root / &g);
        (
            g,
            Self {
                root,
                pi_halves: self.pi_halves + other.pi_halves,
            },
        )
    }

    fn to_f64(&self) -> f64 {
        let root = self.root.to_f64().unwrap_or(f64::NAN);
        root.sqrt() * PI.powf(f64::from(self.pi_halves) / 2.0)
    }
}

/// Exact real number; see the module documentation.
#[derive(Clone)]
pub struct Exact {
    /// `None` marks the undefined value.
    terms: Option<BTreeMap<Radical, BigRational>>,
}

impl Exact {
    fn from_terms(mut terms: BTreeMap<Radical, BigRational>) -> Self {
        terms.retain(|_, c| !c.is_zero());
        Self { terms: Some(terms) }
    }

    fn single(coefficient: BigRational, radical: Radical) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(radical, coefficient);
        Self::from_terms(terms)
    }

    /// The undefined value.
    pub fn nan() -> Self {
        Self { terms: None }
    }

    /// `true` for the undefined value.
    pub fn is_nan(&self) -> bool {
        self.terms.is_none()
    }

    /// Exact rational number.
    pub fn from_rational(value: BigRational) -> Self {
        Self::single(value, Radical::unit())
    }

    /// Exact integer.
    pub fn from_integer(value: i64) -> Self {
        Self::from_rational(BigRational::from_integer(BigInt::from(value)))
    }

    /// `num / den`; undefined for a zero denominator.
    pub fn ratio(num: i64, den: i64) -> Self {
        if den == 0 {
            return Self::nan();
        }
        Self::from_rational(BigRational::new(BigInt::from(num), BigInt::from(den)))
    }

    /// The binary value of a float, exactly. NaN and infinities are undefined.
    pub fn from_f64(value: f64) -> Self {
        BigRational::from_float(value).map_or_else(Self::nan, Self::from_rational)
    }

    /// The constant π.
    pub fn pi() -> Self {
        Self::single(
            BigRational::one(),
            Radical {
                root: BigUint::one(),
                pi_halves: 2,
            },
        )
    }

    /// Rational value, if the number has no radical or π part.
    pub fn as_rational(&self) -> Option<BigRational> {
        let terms = self.terms.as_ref()?;
        match terms.len() {
            0 => Some(BigRational::zero()),
            1 => terms
                .iter()
                .next()
                .filter(|(r, _)| r.is_unit())
                .map(|(_, c)| c.clone()),
            _ => None,
        }
    }

    /// Nearest float.
    pub fn to_f64(&self) -> f64 {
        match &self.terms {
            None => f64::NAN,
            Some(terms) => terms
                .iter()
                .map(|(r, c)| c.to_f64().unwrap_or(f64::NAN) * r.to_f64())
                .sum(),
        }
    }

    fn only_term(&self) -> Option<(&Radical, &BigRational)> {
        let terms = self.terms.as_ref()?;
        if terms.len() == 1 {
            terms.iter().next()
        } else {
            None
        }
    }

    fn add_ref(&self, other: &Self) -> Self {
        let (Some(a), Some(b)) = (&self.terms, &other.terms) else {
            return Self::nan();
        };
        let mut out = a.clone();
        for (r, c) in b {
            *out.entry(r.clone()).or_insert_with(BigRational::zero) += c;
        }
        Self::from_terms(out)
    }

    fn neg_ref(&self) -> Self {
        match &self.terms {
            None => Self::nan(),
            Some(terms) => Self {
                terms: Some(terms.iter().map(|(r, c)| (r.clone(), -c)).collect()),
            },
        }
    }

    fn mul_ref(&self, other: &Self) -> Self {
        let (Some(a), Some(b)) = (&self.terms, &other.terms) else {
            return Self::nan();
        };
        let mut out = BTreeMap::new();
        for (ra, ca) in a {
            for (rb, cb) in b {
                let (factor, radical) = ra.product(rb);
                let factor = BigRational::from_integer(BigInt::from_biguint(Sign::Plus, factor));
                *out.entry(radical).or_insert_with(BigRational::zero) += ca * cb * factor;
            }
        }
        Self::from_terms(out)
    }

    /// Multiplicative inverse. Radicals in a multi-term value are removed one
    /// prime at a time by multiplying with the conjugate; a remaining sum of
    /// distinct powers of π has no exact inverse here.
    pub fn recip(&self) -> Self {
        if self.is_nan() || self.is_zero() {
            return Self::nan();
        }
        if let Some((r, c)) = self.only_term() {
            let scale = c * BigRational::from_integer(BigInt::from_biguint(Sign::Plus, r.root.clone()));
            return Self::single(
                scale.recip(),
                Radical {
                    root: r.root.clone(),
                    pi_halves: -r.pi_halves,
                },
            );
        }

        let mut num = Self::one();
        let mut den = self.clone();
        let mut steps = 0;
        while let Some(p) = den.radical_prime() {
            steps += 1;
            if steps > MAX_RATIONALISE_STEPS {
                return Self::nan();
            }
            let conjugate = match &den.terms {
                Some(terms) => Self::from_terms(
                    terms
                        .iter()
                        .map(|(r, c)| {
                            if (&r.root % &p).is_zero() {
                                (r.clone(), -c)
                            } else {
                                (r.clone(), c.clone())
                            }
                        })
                        .collect(),
                ),
                None => return Self::nan(),
            };
            num = num.mul_ref(&conjugate);
            den = den.mul_ref(&conjugate);
        }
        match den.only_term() {
            Some(_) => num.mul_ref(&den.recip()),
            None => Self::nan(),
        }
    }

    /// Smallest prime dividing any radicand.
    fn radical_prime(&self) -> Option<BigUint> {
        self.terms
            .as_ref()?
            .keys()
            .filter(|r| !r.root.is_one())
            .map(|r| smallest_prime_factor(&r.root))
            .min()
    }

    /// Square root of `q · π^k` with `q ≥ 0`; undefined otherwise.
    pub fn sqrt(&self) -> Self {
        if self.is_nan() {
            return Self::nan();
        }
        if self.is_zero() {
            return Self::zero();
        }
        let Some((r, c)) = self.only_term() else {
            return Self::nan();
        };
        if !r.root.is_one() || r.pi_halves % 2 != 0 || !c.is_positive() {
            return Self::nan();
        }
        let (Some(p), Some(q)) = (c.numer().to_biguint(), c.denom().to_biguint()) else {
            return Self::nan();
        };
        let Some((outside, inside)) = split_square(&p * &q) else {
            return Self::nan();
        };
        let coefficient = BigRational::new(
            BigInt::from_biguint(Sign::Plus, outside),
            BigInt::from_biguint(Sign::Plus, q),
        );
        Self::single(
            coefficient,
            Radical {
                root: inside,
                pi_halves: r.pi_halves / 2,
            },
        )
    }

    /// Gamma function at integer and half-integer arguments.
    pub fn gamma(&self) -> Self {
        let Some(x) = self.as_rational() else {
            return Self::nan();
        };
        let half = BigRational::new(BigInt::one(), BigInt::from(2));
        if x.is_integer() {
            let Some(n) = x.to_integer().to_i64() else {
                return Self::nan();
            };
            if n <= 0 {
                return Self::nan();
            }
            let mut acc = BigInt::one();
            for k in 2..n {
                acc *= BigInt::from(k);
            }
            return Self::from_rational(BigRational::from_integer(acc));
        }
        let shifted = &x - &half;
        if !shifted.is_integer() {
            return Self::nan();
        }
        let Some(k) = shifted.to_integer().to_i64() else {
            return Self::nan();
        };
        // Γ(1/2) = √π
        let mut acc = BigRational::one();
        if k >= 0 {
            for j in 0..k {
                acc *= BigRational::from_integer(BigInt::from(j)) + &half;
            }
        } else {
            for j in 1..=-k {
                acc /= &half - BigRational::from_integer(BigInt::from(j));
            }
        }
        Self::single(
            acc,
            Radical {
                root: BigUint::one(),
                pi_halves: 1,
            },
        )
    }

    /// `self^exponent` for a positive rational base and an integer or
    /// half-integer exponent.
    pub fn powr(&self, exponent: &Self) -> Self {
        let (Some(base), Some(e)) = (self.as_rational(), exponent.as_rational()) else {
            return Self::nan();
        };
        if base.is_zero() {
            return if e.is_positive() {
                Self::zero()
            } else {
                Self::nan()
            };
        }
        if base.is_negative() {
            return Self::nan();
        }
        let twice = &e * BigRational::from_integer(BigInt::from(2));
        if !twice.is_integer() {
            return Self::nan();
        }
        let Some(t) = twice.to_integer().to_i64() else {
            return Self::nan();
        };
        let whole = t.div_euclid(2);
        let factor = if whole >= 0 {
            base.clone()
        } else {
            base.recip()
        };
        let mut acc = BigRational::one();
        for _ in 0..whole.unsigned_abs() {
            acc *= &factor;
        }
        let value = Self::from_rational(acc);
        if t.rem_euclid(2) == 1 {
            value.mul_ref(&Self::from_rational(base).sqrt())
        } else {
            value
        }
    }

    /// Exact only at zero.
    pub fn sin(&self) -> Self {
        if self.is_zero() { Self::zero() } else { Self::nan() }
    }

    /// Exact only at zero.
    pub fn cos(&self) -> Self {
        if self.is_zero() { Self::one() } else { Self::nan() }
    }

    /// Exact only at zero.
    pub fn exp(&self) -> Self {
        if self.is_zero() { Self::one() } else { Self::nan() }
    }
}

/// Trial division stops at this divisor.
const TRIAL_LIMIT: u64 = 1 << 16;

/// Bound on conjugate multiplications while rationalising a divisor.
const MAX_RATIONALISE_STEPS: usize = 64;

/// Write `m = outside² · inside` with square-free `inside`.
///
/// `None` when `m` keeps a cofactor that trial division cannot classify.
fn split_square(m: BigUint) -> Option<(BigUint, BigUint)> {
    if let Some(small) = m.to_u64() {
        if small < TRIAL_LIMIT * TRIAL_LIMIT {
            let (outside, inside) = split_square_u64(small);
            return Some((BigUint::from(outside), BigUint::from(inside)));
        }
    }
    let mut m = m;
    let mut outside = BigUint::one();
    let mut inside = BigUint::one();
    for d in 2..=TRIAL_LIMIT {
        let d = BigUint::from(d);
        if &d * &d > m {
            break;
        }
        let mut count = 0u32;
        while (&m % &d).is_zero() {
            m /= &d;
            count += 1;
        }
        for _ in 0..count / 2 {
            outside *= &d;
        }
        if count % 2 == 1 {
            inside *= &d;
        }
    }
    if m <= BigUint::from(TRIAL_LIMIT * TRIAL_LIMIT) {
        // 1 or a prime
        return Some((outside, inside * m));
    }
    let root = m.sqrt();
    if &root * &root == m {
        Some((outside * root, inside))
    } else {
        None
    }
}

fn split_square_u64(mut m: u64) -> (u64, u64) {
    let mut outside = 1u64;
    let mut inside = 1u64;
    let mut d = 2u64;
    while d * d <= m {
        let mut count = 0u32;
        while m % d == 0 {
            m /= d;
            count += 1;
        }
        for _ in 0..count / 2 {
            outside *= d;
        }
        if count % 2 == 1 {
            inside *= d;
        }
        d += 1;
    }
    (outside, inside * m)
}

/// Smallest prime factor of a square-free radicand.
fn smallest_prime_factor(m: &BigUint) -> BigUint {
    for d in 2..=TRIAL_LIMIT {
        let d = BigUint::from(d);
        if &d * &d > *m {
            break;
        }
        if (m % &d).is_zero() {
            return d;
        }
    }
    m.clone()
}

impl PartialEq for Exact {
    fn eq(&self, other: &Self) -> bool {
        match (&self.terms, &other.terms) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Add for Exact {
    type Output = Exact;

    fn add(self, rhs: Self) -> Self {
        self.add_ref(&rhs)
    }
}

impl Sub for Exact {
    type Output = Exact;

    fn sub(self, rhs: Self) -> Self {
        self.add_ref(&rhs.neg_ref())
    }
}

impl Mul for Exact {
    type Output = Exact;

    fn mul(self, rhs: Self) -> Self {
        self.mul_ref(&rhs)
    }
}

impl Div for Exact {
    type Output = Exact;

    fn div(self, rhs: Self) -> Self {
        self.mul_ref(&rhs.recip())
    }
}

impl Rem for Exact {
    type Output = Exact;

    fn rem(self, rhs: Self) -> Self {
        match (self.as_rational(), rhs.as_rational()) {
            (Some(a), Some(b)) if !b.is_zero() => Self::from_rational(a % b),
            _ => Self::nan(),
        }
    }
}

impl Neg for Exact {
    type Output = Exact;

    fn neg(self) -> Self {
        self.neg_ref()
    }
}

impl Zero for Exact {
    fn zero() -> Self {
        Self {
            terms: Some(BTreeMap::new()),
        }
    }

    fn is_zero(&self) -> bool {
        self.terms.as_ref().is_some_and(BTreeMap::is_empty)
    }
}

impl One for Exact {
    fn one() -> Self {
        Self::from_rational(BigRational::one())
    }
}

impl Num for Exact {
    type FromStrRadixErr = ParseRatioError;

    fn from_str_radix(s: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        BigRational::from_str_radix(s, radix).map(Self::from_rational)
    }
}

impl From<i64> for Exact {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<BigRational> for Exact {
    fn from(value: BigRational) -> Self {
        Self::from_rational(value)
    }
}

impl fmt::Display for Exact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(terms) = &self.terms else {
            return write!(f, "nan");
        };
        if terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (r, c)) in terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{c}")?;
            if !r.root.is_one() {
                write!(f, "*sqrt({})", r.root)?;
            }
            match r.pi_halves {
                0 => {}
                2 => write!(f, "*pi")?,
                1 => write!(f, "*sqrt(pi)")?,
                k => write!(f, "*pi^({k}/2)")?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Exact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exact({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> Exact {
        Exact::ratio(n, d)
    }

    #[test]
    fn test_rational_arithmetic() {
        assert_eq!(q(1, 2) + q(1, 3), q(5, 6));
        assert_eq!(q(1, 2) * q(2, 3), q(1, 3));
        assert_eq!(q(1, 2) / q(1, 4), q(2, 1));
        assert_eq!(q(1, 2) - q(1, 2), Exact::zero());
    }

    #[test]
    fn test_sqrt_extracts_squares() {
        assert_eq!(q(9, 4).sqrt(), q(3, 2));
        let s = q(1, 2).sqrt();
        // √(1/2) · √(1/2) = 1/2
        assert_eq!(s.clone() * s.clone(), q(1, 2));
        assert!((s.to_f64() - 0.5f64.sqrt()).abs() < 1e-15);
        assert_eq!(q(8, 1).sqrt(), q(2, 1) * q(2, 1).sqrt());
    }

    #[test]
    fn test_sqrt_of_pi() {
        let s = (q(4, 1) * Exact::pi()).sqrt();
        assert_eq!(s.clone() * s, q(4, 1) * Exact::pi());
        assert!(Exact::pi().sqrt().sqrt().is_nan());
    }

    #[test]
    fn test_radicals_combine() {
        let a = q(2, 1).sqrt();
        let b = q(3, 1).sqrt();
        assert_eq!(a.clone() * b.clone(), q(6, 1).sqrt());
        assert_eq!(q(6, 1).sqrt() * q(10, 1).sqrt(), q(2, 1) * q(15, 1).sqrt());
    }

    #[test]
    fn test_rationalised_division() {
        // 1 / (1 + √2) = √2 - 1
        let den = Exact::one() + q(2, 1).sqrt();
        assert_eq!(Exact::one() / den, q(2, 1).sqrt() - Exact::one());
        // (√2 + √3)(√3 − √2) = 1
        let a = q(2, 1).sqrt() + q(3, 1).sqrt();
        assert_eq!(Exact::one() / a, q(3, 1).sqrt() - q(2, 1).sqrt());
    }

    #[test]
    fn test_undefined_propagates() {
        let nan = Exact::nan();
        assert!((nan.clone() + q(1, 1)).is_nan());
        assert!((q(1, 1) / Exact::zero()).is_nan());
        assert!(q(-1, 1).sqrt().is_nan());
        assert_ne!(nan.clone(), nan);
        assert!((Exact::one() + Exact::pi()).recip().is_nan());
    }

    #[test]
    fn test_gamma_values() {
        assert_eq!(q(5, 1).gamma(), q(24, 1));
        assert_eq!(q(1, 2).gamma(), Exact::pi().sqrt());
        assert_eq!(q(5, 2).gamma(), q(3, 4) * Exact::pi().sqrt());
        assert_eq!(q(-1, 2).gamma(), q(-2, 1) * Exact::pi().sqrt());
        assert!(q(0, 1).gamma().is_nan());
        assert!(q(1, 3).gamma().is_nan());
    }

    #[test]
    fn test_half_integer_powers() {
        assert_eq!(q(2, 1).powr(&q(3, 1)), q(8, 1));
        assert_eq!(q(2, 1).powr(&q(-1, 1)), q(1, 2));
        assert_eq!(q(2, 1).powr(&q(1, 2)), q(2, 1).sqrt());
        assert!(q(2, 1).powr(&q(1, 3)).is_nan());
    }

    #[test]
    fn test_float_round_trip() {
        let x = Exact::from_f64(0.375);
        assert_eq!(x, q(3, 8));
        assert!(Exact::from_f64(f64::NAN).is_nan());
    }

    #[test]
    fn test_sqrt_of_float_value() {
        // 0.1 is a dyadic rational with a large denominator
        let s = Exact::from_f64(0.1).sqrt();
        if !s.is_nan() {
            assert!((s.to_f64() - 0.1f64.sqrt()).abs() < 1e-15);
        }
        let big = Exact::from_f64(2f64.powi(80)).sqrt();
        assert_eq!(big, Exact::from_f64(2f64.powi(40)));
    }

    #[test]
    fn test_display() {
        assert_eq!(q(1, 2).sqrt().to_string(), "1/2*sqrt(2)");
        assert_eq!(Exact::pi().to_string(), "1*pi");
        assert_eq!(Exact::zero().to_string(), "0");
    }
}
