use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Mul, Neg, Shl, Shr, Sub};

use crate::algebra::field::Field;
use crate::algebra::ring::Ring;
use crate::structures::fp::Fp;
use crate::utils::{factor, field_order};

/// Polynomial over the prime field GF(p), with no reduction modulus: the
/// raw ring (Z/pZ)[X].
///
/// Coefficients are stored in ascending order of degree: `coeffs[i]` is
/// the coefficient of `x^i`. The zero polynomial is represented as an
/// empty coefficient vector.
///
/// Besides ring arithmetic and Euclidean division this type carries the
/// order-theoretic machinery the Conway-polynomial search needs:
/// modular exponentiation ([`Poly::powmod_x`]), composition with a power
/// of the variable ([`Poly::compose_x_pow`]), and Parker's alternating
/// lexicographic ordering (the [`Ord`] impl).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Poly<const P: u64> {
    coeffs: Vec<Fp<P>>,
}

impl<const P: u64> Poly<P> {
    /// Create a polynomial from coefficients in ascending order.
    ///
    /// `coeffs[i]` is the coefficient of `x^i`. Trailing zeros are
    /// removed.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::{Fp, Poly};
    ///
    /// type F17 = Fp<17>;
    ///
    /// // 3 + 2x + x^2
    /// let p = Poly::new(vec![F17::new(3), F17::new(2), F17::new(1)]);
    /// assert_eq!(p.degree(), Some(2));
    /// ```
    pub fn new(coeffs: Vec<Fp<P>>) -> Self {
        let mut poly = Self { coeffs };
        poly.normalize();
        poly
    }

    /// Create the zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// Create the polynomial equal to one.
    pub fn one() -> Self {
        Self::constant(Fp::ONE)
    }

    /// Create a constant polynomial.
    pub fn constant(c: Fp<P>) -> Self {
        if c == Fp::ZERO {
            Self::zero()
        } else {
            Self { coeffs: vec![c] }
        }
    }

    /// Create the polynomial `x`.
    pub fn x() -> Self {
        Self {
            coeffs: vec![Fp::ZERO, Fp::ONE],
        }
    }

    /// Create a monomial `c * x^n`.
    pub fn monomial(c: Fp<P>, n: usize) -> Self {
        if c == Fp::ZERO {
            return Self::zero();
        }
        let mut coeffs = vec![Fp::ZERO; n + 1];
        coeffs[n] = c;
        Self { coeffs }
    }

    /// Build the monic polynomial `(x - r1)(x - r2)...(x - rk)` from its
    /// roots.
    ///
    /// With no roots this is the constant one.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::{Fp, Poly};
    ///
    /// type F17 = Fp<17>;
    ///
    /// let p = Poly::from_roots(&[F17::new(2), F17::new(5)]);
    /// assert_eq!(p.eval(F17::new(2)), F17::new(0));
    /// assert_eq!(p.eval(F17::new(5)), F17::new(0));
    /// assert_eq!(p.degree(), Some(2));
    /// ```
    pub fn from_roots(roots: &[Fp<P>]) -> Self {
        let mut result = Self::one();
        for &root in roots {
            result = result * Self::new(vec![-root, Fp::ONE]);
        }
        result
    }

    /// Sample a uniform polynomial of degree lower than `deg`.
    ///
    /// Draws `deg` uniform coefficients; trailing zeros mean the result
    /// can have any smaller degree, including the zero polynomial.
    pub fn random<R: rand::Rng>(rng: &mut R, deg: usize) -> Self {
        let coeffs = (0..deg).map(|_| Fp::new(rng.gen_range(0..P))).collect();
        Self::new(coeffs)
    }

    /// Check if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// The degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// The leading coefficient, or `None` for the zero polynomial.
    pub fn leading_coeff(&self) -> Option<Fp<P>> {
        self.coeffs.last().copied()
    }

    /// The coefficient of `x^i` (zero beyond the degree).
    pub fn coeff(&self, i: usize) -> Fp<P> {
        self.coeffs.get(i).copied().unwrap_or(Fp::ZERO)
    }

    /// All coefficients, ascending by power, trailing zeros trimmed.
    pub fn coefficients(&self) -> &[Fp<P>] {
        &self.coeffs
    }

    /// Evaluate at a point using Horner's method.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::{Fp, Poly};
    ///
    /// type F17 = Fp<17>;
    ///
    /// // p(x) = 1 + 2x + 3x^2, p(2) = 1 + 4 + 12 = 17 ≡ 0
    /// let p = Poly::new(vec![F17::new(1), F17::new(2), F17::new(3)]);
    /// assert_eq!(p.eval(F17::new(2)), F17::new(0));
    /// ```
    pub fn eval(&self, x: Fp<P>) -> Fp<P> {
        let mut result = Fp::ZERO;
        for &coeff in self.coeffs.iter().rev() {
            result = result * x + coeff;
        }
        result
    }

    /// Remove trailing zero coefficients.
    fn normalize(&mut self) {
        while self.coeffs.last() == Some(&Fp::ZERO) {
            self.coeffs.pop();
        }
    }

    /// Make the polynomial monic. `None` for the zero polynomial.
    pub fn monic(&self) -> Option<Self> {
        let inv = self.leading_coeff()?.inverse()?;
        Some(self.clone() * inv)
    }

    /// Substitute `x^k` for `x`: maps `Σ c_i x^i` to `Σ c_i x^(i*k)`.
    ///
    /// This is how a lower-degree polynomial is composed with a power of
    /// the variable when checking cross-degree compatibility of reduction
    /// moduli.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::{Fp, Poly};
    ///
    /// type F3 = Fp<3>;
    ///
    /// // (x^2 + 2x + 1) at x := x^3 is x^6 + 2x^3 + 1
    /// let p = Poly::new(vec![F3::new(1), F3::new(2), F3::new(1)]);
    /// let q = p.compose_x_pow(3);
    /// assert_eq!(q.degree(), Some(6));
    /// assert_eq!(q.coeff(3), F3::new(2));
    /// ```
    pub fn compose_x_pow(&self, k: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        if k == 0 {
            // x^0 = 1: every term collapses onto the constant
            let sum = self.coeffs.iter().fold(Fp::ZERO, |acc, &c| acc + c);
            return Self::constant(sum);
        }
        let deg = self.coeffs.len() - 1;
        let mut coeffs = vec![Fp::ZERO; deg * k + 1];
        for (i, &c) in self.coeffs.iter().enumerate() {
            coeffs[i * k] = c;
        }
        Self::new(coeffs)
    }

    /// Euclidean division: `(quotient, remainder)` with
    /// `deg(remainder) < deg(divisor)`.
    ///
    /// Returns `None` if the divisor is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::{Fp, Poly};
    ///
    /// type F17 = Fp<17>;
    ///
    /// // (x^2 + 2x + 1) / (x + 1) = (x + 1), remainder 0
    /// let dividend = Poly::new(vec![F17::new(1), F17::new(2), F17::new(1)]);
    /// let divisor = Poly::new(vec![F17::new(1), F17::new(1)]);
    /// let (q, r) = dividend.div_rem(&divisor).unwrap();
    /// assert_eq!(q, divisor);
    /// assert!(r.is_zero());
    /// ```
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        let divisor_deg = divisor.degree()?;
        match self.degree() {
            None => return Some((Self::zero(), Self::zero())),
            Some(d) if d < divisor_deg => return Some((Self::zero(), self.clone())),
            _ => {}
        }

        let lc_inv = divisor.leading_coeff()?.inverse()?;
        let mut remainder = self.clone();
        let mut quotient = vec![Fp::ZERO; self.coeffs.len() - divisor.coeffs.len() + 1];

        while let Some(rem_deg) = remainder.degree() {
            if rem_deg < divisor_deg {
                break;
            }

            let coeff = remainder.coeffs[rem_deg] * lc_inv;
            let shift = rem_deg - divisor_deg;
            quotient[shift] = coeff;

            // remainder -= coeff * x^shift * divisor
            for (i, &d) in divisor.coeffs.iter().enumerate() {
                remainder.coeffs[i + shift] = remainder.coeffs[i + shift] - coeff * d;
            }
            remainder.normalize();
        }

        Some((Self::new(quotient), remainder))
    }

    /// Remainder of division; `None` for a zero divisor.
    pub fn rem(&self, divisor: &Self) -> Option<Self> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    /// Greatest common divisor, monic unless both inputs are zero.
    pub fn gcd(a: &Self, b: &Self) -> Self {
        if b.is_zero() {
            return a.monic().unwrap_or_else(Self::zero);
        }
        let r = a.rem(b).unwrap_or_else(Self::zero);
        Self::gcd(b, &r)
    }

    /// Extended Euclidean algorithm.
    ///
    /// Returns `(g, s, t)` with `g = gcd(a, b) = s*a + t*b`; `g` is monic
    /// unless both inputs are zero. The field layer inverts an element
    /// against its reduction modulus with this.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::{Fp, Poly};
    ///
    /// type F17 = Fp<17>;
    ///
    /// let a = Poly::new(vec![F17::new(1), F17::new(2), F17::new(1)]);
    /// let b = Poly::new(vec![F17::new(1), F17::new(1)]);
    /// let (g, s, t) = Poly::extended_gcd(&a, &b);
    /// assert_eq!(s * a + t * b, g);
    /// ```
    pub fn extended_gcd(a: &Self, b: &Self) -> (Self, Self, Self) {
        if b.is_zero() {
            let Some(lc) = a.leading_coeff() else {
                return (Self::zero(), Self::zero(), Self::zero());
            };
            let lc_inv = lc.inverse().expect("leading coefficient of a nonzero polynomial");
            return (
                a.clone() * lc_inv,
                Self::constant(lc_inv),
                Self::zero(),
            );
        }

        let (q, r) = a.div_rem(b).expect("divisor checked nonzero");
        let (g, s1, t1) = Self::extended_gcd(b, &r);

        // g = s1*b + t1*r = s1*b + t1*(a - q*b) = t1*a + (s1 - t1*q)*b
        let s = t1.clone();
        let t = s1 - t1 * q;
        (g, s, t)
    }

    /// Compute `base^exp mod self` by repeated squaring.
    ///
    /// Returns `None` if `self` is zero.
    pub fn powmod(&self, base: &Self, exp: u64) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        if exp == 0 {
            return Some(Self::one());
        }

        let mut b = base.rem(self)?;
        let mut result = Self::one();
        let mut e = exp;

        while e > 0 {
            if e & 1 == 1 {
                result = (result * &b).rem(self)?;
            }
            b = (b.clone() * &b).rem(self)?;
            e >>= 1;
        }

        Some(result)
    }

    /// Compute `x^exp mod self`.
    ///
    /// The workhorse of the primitivity test: order conditions on the
    /// residue of `x` are all phrased as `x^e mod f`.
    pub fn powmod_x(&self, exp: u64) -> Option<Self> {
        self.powmod(&Self::x(), exp)
    }

    /// The formal derivative.
    pub fn derivative(&self) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero();
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| c * Fp::new(i as u64))
            .collect();
        Self::new(coeffs)
    }

    /// Test irreducibility over GF(p) with Rabin's algorithm.
    ///
    /// `f` of degree n is irreducible iff `x^(p^n) ≡ x (mod f)` and
    /// `gcd(x^(p^(n/q)) - x, f) = 1` for each prime divisor q of n.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::{Fp, Poly};
    ///
    /// type F3 = Fp<3>;
    ///
    /// // x^2 + 1 is irreducible over F_3 (-1 is a non-residue)
    /// let f = Poly::new(vec![F3::new(1), F3::new(0), F3::new(1)]);
    /// assert!(f.is_irreducible());
    ///
    /// // x^2 + 2 = (x+1)(x+2) is not
    /// let g = Poly::new(vec![F3::new(2), F3::new(0), F3::new(1)]);
    /// assert!(!g.is_irreducible());
    /// ```
    pub fn is_irreducible(&self) -> bool {
        let n = match self.degree() {
            None | Some(0) => return false,
            Some(1) => return true,
            Some(d) => d,
        };

        let f = match self.monic() {
            Some(m) => m,
            None => return false,
        };

        let degree_primes: Vec<usize> = factor(n as u64).into_keys().map(|q| q as usize).collect();

        // h tracks x^(p^i) mod f
        let mut h = Self::x();
        for i in 1..=n {
            h = match f.powmod(&h, P) {
                Some(r) => r,
                None => return false,
            };

            for &q in &degree_primes {
                if n == i * q {
                    let g = Self::gcd(&(h.clone() - Self::x()), &f);
                    if g.degree() != Some(0) {
                        return false;
                    }
                }
            }
        }

        (h - Self::x()).is_zero()
    }

    /// Test primitivity via the multiplicative order of `x`.
    ///
    /// A monic degree-n polynomial is primitive when, for every prime
    /// factor `f` of `m = p^n - 1`, the residue `x^(m/f) mod self` is not
    /// one — i.e. `(x^(m/f) - 1) mod self ≠ 0`. Primitive polynomials are
    /// exactly the reduction moduli whose residue `x` generates the whole
    /// multiplicative group.
    ///
    /// Returns `false` for constants, the zero polynomial, and fields
    /// whose order overflows `u64`.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::{Fp, Poly};
    ///
    /// type F3 = Fp<3>;
    ///
    /// // x^2 + 1 is irreducible over F_3 but x has order 4, not 8
    /// let f = Poly::new(vec![F3::new(1), F3::new(0), F3::new(1)]);
    /// assert!(!f.is_primitive());
    ///
    /// // x^2 + 2x + 2: x has full order 8
    /// let g = Poly::new(vec![F3::new(2), F3::new(2), F3::new(1)]);
    /// assert!(g.is_primitive());
    /// ```
    pub fn is_primitive(&self) -> bool {
        let n = match self.degree() {
            None | Some(0) => return false,
            Some(d) => d,
        };
        let f = match self.monic() {
            Some(m) => m,
            None => return false,
        };

        let m = match field_order(P, n as u32) {
            Some(order) => order - 1,
            None => return false,
        };

        for &q in factor(m).keys() {
            match f.powmod_x(m / q) {
                Some(r) if r == Self::one() => return false,
                Some(_) => {}
                None => return false,
            }
        }
        true
    }

    /// Parker's alternating lexicographic comparison.
    ///
    /// Lower degree orders first. For equal degrees, coefficients are
    /// compared from the leading end down, with every other position
    /// compared through its negation: at offset `i` below the leading
    /// coefficient the comparison key is `(-1)^i * c` as a representative
    /// in `[0, p)`. This is the total order that makes "the smallest
    /// primitive compatible polynomial" well-defined.
    pub fn parker_cmp(&self, other: &Self) -> Ordering {
        let self_deg = self.degree().map_or(-1, |d| d as i64);
        let other_deg = other.degree().map_or(-1, |d| d as i64);
        if self_deg != other_deg {
            return self_deg.cmp(&other_deg);
        }

        for offset in 0..self.coeffs.len() {
            let idx = self.coeffs.len() - 1 - offset;
            let (a, b) = (self.coeffs[idx], other.coeffs[idx]);
            if a == b {
                continue;
            }
            let (a, b) = if offset % 2 == 1 { (-a, -b) } else { (a, b) };
            return a.value().cmp(&b.value());
        }
        Ordering::Equal
    }

    /// The rank of this polynomial in Parker order, as a base-p numeral.
    ///
    /// Digit `i` is the representative of `(-1)^(deg-i) * c_i`; the
    /// numeral read in base `p` orders polynomials of equal degree the
    /// same way [`Poly::parker_cmp`] does. Saturates for large fields;
    /// meant as a small-field diagnostic.
    pub fn parker_norm(&self) -> u64 {
        let Some(deg) = self.degree() else {
            return 0;
        };
        let mut norm = 0u64;
        let mut place = 1u64;
        for (i, &c) in self.coeffs.iter().enumerate() {
            let digit = if (deg - i) % 2 == 1 {
                (-c).value()
            } else {
                c.value()
            };
            norm = norm.saturating_add(digit.saturating_mul(place));
            place = place.saturating_mul(P);
        }
        norm
    }

    /* ---- factorization ---- */

    /// Square-free factorization.
    ///
    /// Returns `(factor, multiplicity)` pairs where each factor is monic
    /// and square-free and the product of `factor^multiplicity` equals
    /// `self` up to a constant. Yun's algorithm, with the p-th-power part
    /// handled by recursion on the p-th root.
    pub fn square_free_factors(&self) -> Vec<(Self, usize)> {
        let Some(f) = self.monic() else {
            return vec![];
        };
        if f.degree() == Some(0) {
            return vec![];
        }

        let mut result = Vec::new();
        let df = f.derivative();

        if df.is_zero() {
            // All exponents divisible by p: f(x) = g(x^p)
            for (factor, mult) in f.pth_root().square_free_factors() {
                result.push((factor, mult * P as usize));
            }
            return result;
        }

        let mut c = Self::gcd(&f, &df);
        let mut w = f.div_rem(&c).map(|(q, _)| q).unwrap_or_else(Self::zero);
        let mut i = 1usize;

        while w.degree().unwrap_or(0) > 0 {
            let y = Self::gcd(&w, &c);
            let z = w.div_rem(&y).map(|(q, _)| q).unwrap_or_else(Self::zero);
            if z.degree().unwrap_or(0) > 0 {
                result.push((z.monic().unwrap_or(z), i));
            }
            w = y;
            c = c.div_rem(&w).map(|(q, _)| q).unwrap_or_else(Self::zero);
            i += 1;
        }

        // Whatever is left has multiplicity divisible by p
        if c.degree().unwrap_or(0) > 0 {
            for (factor, mult) in c.pth_root().square_free_factors() {
                result.push((factor, mult * P as usize));
            }
        }

        result
    }

    /// The p-th root of a polynomial whose exponents are all multiples
    /// of p. Coefficients are Frobenius fixed points in GF(p), so only
    /// the exponents shrink.
    fn pth_root(&self) -> Self {
        let p = P as usize;
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .filter(|(i, _)| i % p == 0)
            .map(|(_, &c)| c)
            .collect();
        Self::new(coeffs)
    }

    /// Distinct-degree factorization of a monic square-free polynomial.
    ///
    /// Returns `(g, d)` pairs where `g` is the product of all monic
    /// irreducible factors of degree `d`.
    pub fn distinct_degree_factors(&self) -> Vec<(Self, usize)> {
        let Some(f) = self.monic() else {
            return vec![];
        };
        let n = match f.degree() {
            None | Some(0) => return vec![],
            Some(d) => d,
        };

        let mut result = Vec::new();
        let mut remaining = f;
        let mut h = Self::x();

        for d in 1..=n / 2 {
            // Gauss: x^(p^d) - x is the product of all monic irreducibles
            // whose degree divides d
            h = match remaining.powmod(&h, P) {
                Some(r) => r,
                None => break,
            };

            let g = Self::gcd(&(h.clone() - Self::x()), &remaining);
            if g.degree().unwrap_or(0) > 0 {
                result.push((g.clone(), d));
                remaining = remaining
                    .div_rem(&g)
                    .map(|(q, _)| q)
                    .unwrap_or_else(Self::zero);
                h = h.rem(&remaining).unwrap_or_else(Self::zero);
            }
        }

        // A leftover of degree > n/2 is a single irreducible factor
        if remaining.degree().unwrap_or(0) > 0 {
            let d = remaining.degree().unwrap_or(0);
            result.push((remaining, d));
        }

        result
    }

    /// Equal-degree factorization with Cantor–Zassenhaus.
    ///
    /// `self` must be a monic square-free product of irreducible factors
    /// all of degree `d`. Splits with random gcd probes: for odd p via
    /// `a^((p^d-1)/2) - 1`, for p = 2 via the trace map
    /// `a + a^2 + ... + a^(2^(d-1))`.
    pub fn equal_degree_factors<R: rand::Rng>(&self, d: usize, rng: &mut R) -> Vec<Self> {
        let Some(f) = self.monic() else {
            return vec![];
        };
        let n = match f.degree() {
            None | Some(0) => return vec![],
            Some(deg) => deg,
        };
        if d == 0 || n == d {
            return vec![f];
        }
        debug_assert!(n % d == 0, "not an equal-degree product");

        loop {
            let a = Self::random(rng, n);
            if a.is_zero() {
                continue;
            }

            // A lucky probe shares a factor outright
            let g = Self::gcd(&a, &f);
            if let Some(gd) = g.degree() {
                if gd > 0 && gd < n {
                    return Self::split(&f, &g, d, rng);
                }
            }

            let probe = if P == 2 {
                // Trace map lands in a proper factor with probability 1/2
                let mut acc = Self::zero();
                let mut s = a.rem(&f).unwrap_or_else(Self::zero);
                for _ in 0..d {
                    acc = acc + &s;
                    s = (s.clone() * &s).rem(&f).unwrap_or_else(Self::zero);
                }
                acc
            } else {
                let half = (Self::saturating_order(d) - 1) / 2;
                match f.powmod(&a, half) {
                    Some(b) => b - Self::one(),
                    None => continue,
                }
            };

            let g = Self::gcd(&probe, &f);
            if let Some(gd) = g.degree() {
                if gd > 0 && gd < n {
                    return Self::split(&f, &g, d, rng);
                }
            }
        }
    }

    /// Recurse into both halves of a successful split.
    fn split<R: rand::Rng>(f: &Self, g: &Self, d: usize, rng: &mut R) -> Vec<Self> {
        let g = g.monic().unwrap_or_else(Self::zero);
        let other = f.div_rem(&g).map(|(q, _)| q).unwrap_or_else(Self::zero);
        let mut factors = g.equal_degree_factors(d, rng);
        factors.extend(other.equal_degree_factors(d, rng));
        factors
    }

    /// `p^d` with saturation; the CZ exponent for degrees near the u64
    /// limit is out of supported range anyway.
    fn saturating_order(d: usize) -> u64 {
        let mut result: u64 = 1;
        for _ in 0..d {
            result = result.saturating_mul(P);
        }
        result
    }

    /// Full factorization into monic irreducible factors with
    /// multiplicities, sorted by degree then coefficients.
    ///
    /// Combines square-free, distinct-degree, and equal-degree stages.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::{Fp, Poly};
    /// use rand::SeedableRng;
    ///
    /// type F17 = Fp<17>;
    ///
    /// // (x - 1)^2 (x - 2)
    /// let a = Poly::from_roots(&[F17::new(1), F17::new(1), F17::new(2)]);
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let factors = a.factor(&mut rng);
    /// assert_eq!(factors.len(), 2);
    /// ```
    pub fn factor<R: rand::Rng>(&self, rng: &mut R) -> Vec<(Self, usize)> {
        if self.is_zero() {
            return vec![];
        }

        let mut result = Vec::new();
        for (square_free, mult) in self.square_free_factors() {
            for (product, d) in square_free.distinct_degree_factors() {
                for irreducible in product.equal_degree_factors(d, rng) {
                    result.push((irreducible, mult));
                }
            }
        }

        result.sort_by(|(a, _), (b, _)| {
            a.degree().cmp(&b.degree()).then_with(|| {
                a.coeffs
                    .iter()
                    .map(|c| c.value())
                    .cmp(b.coeffs.iter().map(|c| c.value()))
            })
        });
        result
    }

    /// All roots in GF(p) with multiplicities, read off the linear
    /// factors.
    pub fn roots<R: rand::Rng>(&self, rng: &mut R) -> Vec<(Fp<P>, usize)> {
        self.factor(rng)
            .into_iter()
            .filter(|(f, _)| f.degree() == Some(1))
            .map(|(f, mult)| (-f.coeff(0), mult)) // factors are monic: x - r
            .collect()
    }
}

/* ---- Parker ordering as the canonical order ---- */

impl<const P: u64> PartialOrd for Poly<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const P: u64> Ord for Poly<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parker_cmp(other)
    }
}

/* ---- arithmetic operators ---- */

impl<const P: u64> Add for Poly<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self + &rhs
    }
}

impl<const P: u64> Add<&Poly<P>> for Poly<P> {
    type Output = Self;

    fn add(self, rhs: &Poly<P>) -> Self::Output {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..len).map(|i| self.coeff(i) + rhs.coeff(i)).collect();
        Self::new(coeffs)
    }
}

impl<const P: u64> Neg for Poly<P> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        let coeffs = self.coeffs.into_iter().map(|c| -c).collect();
        Self { coeffs }
    }
}

impl<const P: u64> Sub for Poly<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self - &rhs
    }
}

impl<const P: u64> Sub<&Poly<P>> for Poly<P> {
    type Output = Self;

    fn sub(self, rhs: &Poly<P>) -> Self::Output {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..len).map(|i| self.coeff(i) - rhs.coeff(i)).collect();
        Self::new(coeffs)
    }
}

impl<const P: u64> Mul for Poly<P> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self * &rhs
    }
}

impl<const P: u64> Mul<&Poly<P>> for Poly<P> {
    type Output = Self;

    /// Full convolution, Θ(deg·deg) coefficient multiplications, no
    /// reduction.
    fn mul(self, rhs: &Poly<P>) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }

        let mut coeffs = vec![Fp::ZERO; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] = coeffs[i + j] + a * b;
            }
        }
        Self::new(coeffs)
    }
}

/// Scalar multiplication.
impl<const P: u64> Mul<Fp<P>> for Poly<P> {
    type Output = Self;

    fn mul(self, rhs: Fp<P>) -> Self::Output {
        if rhs == Fp::ZERO {
            return Self::zero();
        }
        let coeffs = self.coeffs.into_iter().map(|c| c * rhs).collect();
        Self::new(coeffs)
    }
}

/// Degree shift up: multiply by `x^rhs`.
impl<const P: u64> Shl<usize> for Poly<P> {
    type Output = Self;

    fn shl(self, rhs: usize) -> Self::Output {
        if self.is_zero() {
            return self;
        }
        let mut coeffs = vec![Fp::ZERO; rhs];
        coeffs.extend(self.coeffs);
        Self { coeffs }
    }
}

/// Degree shift down: divide by `x^rhs`, discarding the low
/// coefficients.
impl<const P: u64> Shr<usize> for Poly<P> {
    type Output = Self;

    fn shr(self, rhs: usize) -> Self::Output {
        if rhs >= self.coeffs.len() {
            return Self::zero();
        }
        Self {
            coeffs: self.coeffs[rhs..].to_vec(),
        }
    }
}

impl<const P: u64> fmt::Debug for Poly<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (i, &coeff) in self.coeffs.iter().enumerate() {
            if coeff == Fp::ZERO {
                continue;
            }

            if !first {
                write!(f, " + ")?;
            }
            first = false;

            match i {
                0 => write!(f, "{}", coeff.value())?,
                1 if coeff == Fp::ONE => write!(f, "x")?,
                1 => write!(f, "{}*x", coeff.value())?,
                _ if coeff == Fp::ONE => write!(f, "x^{}", i)?,
                _ => write!(f, "{}*x^{}", coeff.value(), i)?,
            }
        }

        Ok(())
    }
}

impl<const P: u64> fmt::Display for Poly<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(feature = "serde")]
impl<const P: u64> serde::Serialize for Poly<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let values: Vec<u64> = self.coeffs.iter().map(|c| c.value()).collect();
        values.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, const P: u64> serde::Deserialize<'de> for Poly<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<u64>::deserialize(deserializer)?;
        Ok(Self::new(values.into_iter().map(Fp::new).collect()))
    }
}
