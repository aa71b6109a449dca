use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::algebra::field::Field;
use crate::algebra::ring::Ring;
use crate::utils::{factor, is_prime};

/// Prime field GF(p) where `p` is a `u64`-sized modulus.
///
/// The value is stored as its canonical representative in `[0, P)`.
/// For correct field behavior `P` must be prime; use [`Fp::validate_prime`]
/// at startup to verify, or rely on `debug_assert!` checks during
/// development. Unlike a Montgomery representation, this works for every
/// prime including `P = 2`, which the extension-field layer needs for
/// binary fields.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fp<const P: u64> {
    value: u64,
}

impl<const P: u64> rand::distributions::Distribution<Fp<P>> for rand::distributions::Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Fp<P> {
        Fp::new(rng.gen_range(0..P))
    }
}

#[cfg(feature = "serde")]
impl<const P: u64> serde::Serialize for Fp<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, const P: u64> serde::Deserialize<'de> for Fp<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u64::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}

impl<const P: u64> Fp<P> {
    /// Create a new field element, reducing the value modulo `P`.
    ///
    /// In debug builds, this asserts that `P` is prime.
    pub fn new(value: u64) -> Self {
        debug_assert!(is_prime(P), "Fp modulus P={} is not prime", P);
        Self { value: value % P }
    }

    /// Get the representative in `[0, P-1]`.
    pub const fn value(self) -> u64 {
        self.value
    }

    /// The modulus `p`.
    pub const fn modulus() -> u64 {
        P
    }

    /// Validate that the modulus `P` is prime.
    ///
    /// Call this at application startup for early failure on
    /// misconfiguration.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::Fp;
    ///
    /// assert!(Fp::<17>::validate_prime().is_ok());
    /// assert!(Fp::<2>::validate_prime().is_ok());
    /// assert!(Fp::<15>::validate_prime().is_err());
    /// ```
    pub const fn validate_prime() -> Result<(), &'static str> {
        if !is_prime(P) {
            return Err("modulus P is not prime");
        }
        Ok(())
    }

    /// Compute `self^exp` using square-and-multiply.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::{Fp, Ring};
    ///
    /// type F17 = Fp<17>;
    ///
    /// let a = F17::new(3);
    /// assert_eq!(a.pow(0), F17::ONE);
    /// assert_eq!(a.pow(2), a * a);
    /// assert_eq!(a.pow(16), F17::ONE); // Fermat: a^(p-1) = 1
    /// ```
    #[inline]
    pub fn pow(self, exp: u64) -> Self {
        let mut base = self;
        let mut result = Self::ONE;
        let mut e = exp;

        while e > 0 {
            if e & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            e >>= 1;
        }
        result
    }

    /// Compute `self^exp` where `exp` can be negative.
    ///
    /// For negative exponents, computes `(self^(-1))^|exp|`.
    /// Returns `None` if `self` is zero and `exp` is negative.
    pub fn pow_signed(self, exp: i64) -> Option<Self> {
        if exp >= 0 {
            Some(self.pow(exp as u64))
        } else {
            let inv = self.inverse()?;
            Some(inv.pow(exp.unsigned_abs()))
        }
    }

    /// Compute the Legendre symbol (a/p).
    ///
    /// Returns:
    /// - `1` if `a` is a nonzero quadratic residue
    /// - `-1` if `a` is a non-residue
    /// - `0` if `a == 0`
    ///
    /// Uses Euler's criterion: `a^((p-1)/2) = (a/p) mod p`. For `P = 2`
    /// every element is a square, so nonzero values give `1`.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::Fp;
    ///
    /// type F5 = Fp<5>;
    ///
    /// assert_eq!(F5::new(4).legendre(), 1);  // 2^2 = 4
    /// assert_eq!(F5::new(2).legendre(), -1); // no square root mod 5
    /// assert_eq!(F5::new(0).legendre(), 0);
    /// ```
    pub fn legendre(self) -> i8 {
        if self.value == 0 {
            return 0;
        }
        if self.pow((P - 1) / 2) == Self::ONE {
            1
        } else {
            // The only other value of a^((p-1)/2) is -1 mod p
            -1
        }
    }

    /// Check if this element has a square root in GF(p).
    ///
    /// Zero counts as a residue (with sqrt = 0).
    pub fn is_quadratic_residue(self) -> bool {
        self.legendre() >= 0
    }

    /// Compute a square root using the Tonelli–Shanks algorithm.
    ///
    /// Returns `Some(r)` with `r^2 = self`, or `None` if no square root
    /// exists. When two roots exist (±r), the smaller representative is
    /// returned.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::Fp;
    ///
    /// type F17 = Fp<17>;
    ///
    /// let r = F17::new(2).sqrt().unwrap();
    /// assert_eq!(r * r, F17::new(2));
    /// assert!(F17::new(3).sqrt().is_none());
    /// ```
    pub fn sqrt(self) -> Option<Self> {
        // 0 and 1 are their own roots; this also covers all of GF(2).
        if self.value <= 1 {
            return Some(self);
        }

        if self.legendre() != 1 {
            return None;
        }

        // Fast path: p ≡ 3 (mod 4), sqrt(a) = a^((p+1)/4)
        if P % 4 == 3 {
            let r = self.pow((P + 1) / 4);
            return Some(self.smaller_root(r));
        }

        // Write p - 1 = odd * 2^evenlog
        let mut odd = P - 1;
        let mut evenlog = 0u32;
        while odd % 2 == 0 {
            odd /= 2;
            evenlog += 1;
        }

        // Find a quadratic non-residue
        let mut z = Self::new(2);
        while z.legendre() != -1 {
            z = z + Self::ONE;
        }

        let mut m = evenlog;
        let mut c = z.pow(odd);
        let mut t = self.pow(odd);
        let mut r = self.pow((odd + 1) / 2);

        loop {
            if t == Self::ONE {
                return Some(self.smaller_root(r));
            }

            // Least i with t^(2^i) = 1
            let mut i = 1u32;
            let mut t_pow = t * t;
            while t_pow != Self::ONE {
                t_pow = t_pow * t_pow;
                i += 1;
            }

            let b = c.pow(1u64 << (m - i - 1));
            m = i;
            c = b * b;
            t = t * c;
            r = r * b;
        }
    }

    /// Return whichever of `r`, `-r` has the smaller representative.
    #[inline]
    fn smaller_root(self, r: Self) -> Self {
        let neg_r = -r;
        if r.value <= neg_r.value {
            r
        } else {
            neg_r
        }
    }

    /// Compute the multiplicative order of `self` in GF(p)*.
    ///
    /// Returns the smallest positive `k` such that `self^k = 1`, or
    /// `None` for the zero element.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::Fp;
    ///
    /// type F17 = Fp<17>;
    ///
    /// assert_eq!(F17::new(2).multiplicative_order(), Some(8));
    /// assert_eq!(F17::new(3).multiplicative_order(), Some(16));
    /// assert_eq!(F17::new(16).multiplicative_order(), Some(2)); // -1
    /// ```
    pub fn multiplicative_order(self) -> Option<u64> {
        if self == Self::ZERO {
            return None;
        }

        // The order divides p-1: start from p-1 and strip prime factors
        // while the power stays 1.
        let mut order = P - 1;
        for (&prime, &exp) in factor(P - 1).iter() {
            for _ in 0..exp {
                let candidate = order / prime;
                if self.pow(candidate) == Self::ONE {
                    order = candidate;
                } else {
                    break;
                }
            }
        }

        Some(order.max(1))
    }

    /// Check whether `self` generates the multiplicative group GF(p)*.
    ///
    /// True iff the multiplicative order of `self` is exactly `p - 1`,
    /// tested through the prime divisors of `p - 1`.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::Fp;
    ///
    /// type F17 = Fp<17>;
    ///
    /// assert!(F17::new(3).is_primitive_root());
    /// assert!(!F17::new(2).is_primitive_root()); // order 8, not 16
    /// ```
    pub fn is_primitive_root(self) -> bool {
        if self == Self::ZERO {
            return false;
        }

        for &prime in factor(P - 1).keys() {
            if self.pow((P - 1) / prime) == Self::ONE {
                return false;
            }
        }

        true
    }

    /// Find the smallest primitive root modulo P.
    ///
    /// Candidates are scanned upward from 1, so for `P = 2` this returns
    /// the element 1 (the trivial group's generator).
    pub fn primitive_root() -> Option<Self> {
        for a in 1..P {
            let elem = Self::new(a);
            if elem.is_primitive_root() {
                return Some(elem);
            }
        }
        None
    }
}

impl<const P: u64> fmt::Debug for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp<{}>({})", P, self.value)
    }
}

impl<const P: u64> fmt::Display for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/* ---- From/Into conversions ---- */

impl<const P: u64> From<u64> for Fp<P> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<const P: u64> From<u32> for Fp<P> {
    fn from(value: u32) -> Self {
        Self::new(value as u64)
    }
}

impl<const P: u64> From<Fp<P>> for u64 {
    fn from(fp: Fp<P>) -> Self {
        fp.value
    }
}

/* ---- standard arithmetic operators ---- */

impl<const P: u64> Add for Fp<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let mut sum = self.value + rhs.value;
        if sum >= P {
            sum -= P;
        }
        Self { value: sum }
    }
}

impl<const P: u64> Sub for Fp<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        if self.value >= rhs.value {
            Self {
                value: self.value - rhs.value,
            }
        } else {
            Self {
                value: self.value + P - rhs.value,
            }
        }
    }
}

impl<const P: u64> Mul for Fp<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        // Widen to 128 bits: P can be close to 2^64.
        let prod = (self.value as u128) * (rhs.value as u128) % (P as u128);
        Self { value: prod as u64 }
    }
}

impl<const P: u64> Neg for Fp<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        if self.value == 0 {
            self
        } else {
            Self {
                value: P - self.value,
            }
        }
    }
}

/// Division implemented via multiplicative inverse.
impl<const P: u64> Div for Fp<P> {
    type Output = Self;

    #[inline]
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.inverse().expect("division by zero in Fp")
    }
}

/* ---- implement Ring ---- */

impl<const P: u64> Ring for Fp<P> {
    const ZERO: Self = Self { value: 0 };
    const ONE: Self = Self { value: 1 % P };
}

/* ---- implement Field ---- */

impl<const P: u64> Field for Fp<P> {
    fn inverse(self) -> Option<Self> {
        if self.value == 0 {
            return None;
        }

        let m = P as i128;
        let (g, x, _) = egcd(self.value as i128, m);
        if g != 1 {
            return None;
        }

        let mut x = x % m;
        if x < 0 {
            x += m;
        }
        Some(Self::new(x as u64))
    }
}

/* ---- internal helper: extended Euclidean algorithm ---- */

/// Returns `(g, x, y)` such that `g = gcd(a, b)` and `a*x + b*y = g`.
fn egcd(a: i128, b: i128) -> (i128, i128, i128) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (g, x1, y1) = egcd(b, a % b);
        (g, y1, x1 - (a / b) * y1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type F17 = Fp<17>;
    type F2 = Fp<2>;

    #[test]
    fn construction_reduces() {
        for x in 0u64..40 {
            assert_eq!(F17::new(x).value(), x % 17);
        }
    }

    #[test]
    fn add_basic() {
        let a = F17::new(5);
        let b = F17::new(13);
        assert_eq!((a + b).value(), 1); // 18 ≡ 1 (mod 17)
    }

    #[test]
    fn mul_basic() {
        let a = F17::new(3);
        let b = F17::new(7);
        assert_eq!((a * b).value(), 4); // 21 ≡ 4 (mod 17)
    }

    #[test]
    fn neg_cancels() {
        for x in 0u64..17 {
            let a = F17::new(x);
            assert_eq!(a + (-a), F17::ZERO);
        }
    }

    #[test]
    fn sub_matches_add_neg() {
        let a = F17::new(3);
        let b = F17::new(11);
        assert_eq!(a - b, a + (-b));
    }

    #[test]
    fn inverse_exists_for_nonzero() {
        for x in 1u64..17 {
            let a = F17::new(x);
            let inv = a.inverse().expect("nonzero must be invertible");
            assert_eq!(a * inv, F17::ONE);
        }
    }

    #[test]
    fn inverse_none_for_zero() {
        assert!(F17::ZERO.inverse().is_none());
    }

    #[test]
    fn division_consistency() {
        for a in 0u64..17 {
            for b in 1u64..17 {
                let x = F17::new(a);
                let y = F17::new(b);
                assert_eq!((x / y) * y, x);
            }
        }
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn division_by_zero_panics() {
        let _ = F17::ONE / F17::ZERO;
    }

    #[test]
    fn binary_field_arithmetic() {
        // GF(2): addition is xor, multiplication is and.
        assert_eq!(F2::new(1) + F2::new(1), F2::ZERO);
        assert_eq!(F2::new(1) * F2::new(1), F2::ONE);
        assert_eq!(F2::new(1).inverse(), Some(F2::ONE));
        assert_eq!(-F2::new(1), F2::new(1));
    }

    #[test]
    fn pow_basic() {
        let a = F17::new(3);
        assert_eq!(a.pow(0), F17::ONE);
        assert_eq!(a.pow(1), a);
        assert_eq!(a.pow(3), a * a * a);
    }

    #[test]
    fn pow_zero_base() {
        assert_eq!(F17::ZERO.pow(0), F17::ONE); // 0^0 = 1 by convention
        assert_eq!(F17::ZERO.pow(5), F17::ZERO);
    }

    #[test]
    fn pow_fermat() {
        for x in 1u64..17 {
            assert_eq!(F17::new(x).pow(16), F17::ONE);
        }
    }

    #[test]
    fn pow_signed_negative() {
        let a = F17::new(3);
        let inv = a.inverse().unwrap();
        assert_eq!(a.pow_signed(-1), Some(inv));
        assert_eq!(a.pow_signed(-2), Some(inv * inv));
        assert_eq!(F17::ZERO.pow_signed(-1), None);
    }

    #[test]
    fn legendre_partition() {
        // Quadratic residues mod 17: 1, 2, 4, 8, 9, 13, 15, 16
        let residues = [1u64, 2, 4, 8, 9, 13, 15, 16];
        for x in 1u64..17 {
            let expected = if residues.contains(&x) { 1 } else { -1 };
            assert_eq!(F17::new(x).legendre(), expected, "legendre({})", x);
        }
        assert_eq!(F17::ZERO.legendre(), 0);
    }

    #[test]
    fn sqrt_perfect_squares() {
        for x in 0u64..17 {
            let sq = F17::new(x) * F17::new(x);
            let r = sq.sqrt().expect("square must have a root");
            assert_eq!(r * r, sq);
        }
    }

    #[test]
    fn sqrt_non_residues() {
        for x in [3u64, 5, 6, 7, 10, 11, 12, 14] {
            assert!(F17::new(x).sqrt().is_none(), "{} is a non-residue", x);
        }
    }

    #[test]
    fn sqrt_returns_smaller_root() {
        for x in 1u64..17 {
            if let Some(r) = F17::new(x).sqrt() {
                assert!(r.value() <= (-r).value());
            }
        }
    }

    #[test]
    fn sqrt_p_mod_4_eq_1() {
        // 41 ≡ 1 (mod 4): exercises the full Tonelli–Shanks loop
        type F41 = Fp<41>;
        for x in 0u64..41 {
            let sq = F41::new(x) * F41::new(x);
            let r = sq.sqrt().unwrap();
            assert_eq!(r * r, sq);
        }
    }

    #[test]
    fn sqrt_p_mod_4_eq_3() {
        // 23 ≡ 3 (mod 4): exercises the fast path
        type F23 = Fp<23>;
        for x in 0u64..23 {
            let sq = F23::new(x) * F23::new(x);
            let r = sq.sqrt().unwrap();
            assert_eq!(r * r, sq);
        }
    }

    #[test]
    fn sqrt_in_gf2() {
        assert_eq!(F2::new(0).sqrt(), Some(F2::new(0)));
        assert_eq!(F2::new(1).sqrt(), Some(F2::new(1)));
    }

    #[test]
    fn orders() {
        assert_eq!(F17::ONE.multiplicative_order(), Some(1));
        assert_eq!(F17::new(16).multiplicative_order(), Some(2));
        assert_eq!(F17::new(2).multiplicative_order(), Some(8));
        assert_eq!(F17::new(3).multiplicative_order(), Some(16));
        assert_eq!(F17::ZERO.multiplicative_order(), None);
    }

    #[test]
    fn primitive_root_smallest() {
        // The smallest primitive root mod 17 is 3.
        assert_eq!(F17::primitive_root().unwrap().value(), 3);
        // Mod 5 it is 2, mod 7 it is 3.
        assert_eq!(Fp::<5>::primitive_root().unwrap().value(), 2);
        assert_eq!(Fp::<7>::primitive_root().unwrap().value(), 3);
    }

    #[test]
    fn primitive_root_gf2() {
        // GF(2)* is trivial; 1 generates it.
        let g = F2::primitive_root().unwrap();
        assert_eq!(g.value(), 1);
        assert!(g.is_primitive_root());
    }

    #[test]
    fn primitive_root_predicate_counts() {
        // φ(16) = 8 primitive roots mod 17
        let count = (1u64..17).filter(|&x| F17::new(x).is_primitive_root()).count();
        assert_eq!(count, 8);
    }

    #[test]
    fn random_in_range() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let a: F17 = rng.gen();
            assert!(a.value() < 17);
        }
    }
}
