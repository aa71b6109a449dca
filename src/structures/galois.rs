//! Galois extension fields GF(p^n) and their elements.
//!
//! A [`GaloisField`] is a cheap-to-clone handle bundling the degree with
//! the field's Conway polynomial; a [`GfElement`] is a residue polynomial
//! of degree below `n` tagged with its field. All arithmetic reduces
//! modulo the Conway polynomial, so two elements of GF(p^n) constructed
//! anywhere in the process are always expressed over the same basis.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use crate::algebra::field::Field;
use crate::structures::conway::conway_shared;
use crate::structures::fp::Fp;
use crate::structures::poly::Poly;
use crate::utils::field_order;

/// Attempts to find a random quadratic non-residue before giving up.
/// Half the nonzero elements qualify, so hitting this bound means the
/// supplied random source is broken.
const MAX_SEED_TRIES: u32 = 128;

/// Error type for field construction and arithmetic.
///
/// Cross-prime mixing and negative exponents have no variants here: the
/// prime is a type parameter and exponents are unsigned, so both are
/// rejected by the compiler instead of at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// The modulus is not a prime number.
    InvalidModulus { modulus: u64 },
    /// The degree is unusable: zero, large enough that `p^n` overflows,
    /// or a root count outside `1..=n-1` passed to `from_roots`.
    DegreeOutOfRange { degree: u32 },
    /// Arithmetic between elements of fields with different degrees.
    FieldMismatch { left: u32, right: u32 },
    /// Inversion or division involving the zero element.
    DivisionByZero,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidModulus { modulus } => {
                write!(f, "modulus {} is not prime", modulus)
            }
            FieldError::DegreeOutOfRange { degree } => {
                write!(f, "degree {} is out of range for this field", degree)
            }
            FieldError::FieldMismatch { left, right } => {
                write!(
                    f,
                    "elements belong to different fields (degrees {} and {})",
                    left, right
                )
            }
            FieldError::DivisionByZero => write!(f, "division by the zero element"),
        }
    }
}

impl std::error::Error for FieldError {}

/// A handle to the field GF(p^n).
///
/// Carries the degree and a shared reference to the Conway polynomial
/// that defines multiplication. Cloning is cheap; handles to the same
/// `(p, n)` compare equal and share one cached modulus.
///
/// # Example
///
/// ```
/// use gfield::GaloisField;
///
/// let gf9 = GaloisField::<3>::new(2).unwrap();
/// assert_eq!(gf9.order(), 9);
///
/// let a = gf9.element_from_ints(&[1, 2]); // 1 + 2x
/// let b = a.pow(8);
/// assert!(b.is_one()); // Lagrange: a^(q-1) = 1
/// ```
#[derive(Clone)]
pub struct GaloisField<const P: u64> {
    degree: u32,
    order: u64,
    modulus: Arc<Poly<P>>,
}

impl<const P: u64> GaloisField<P> {
    /// Construct the field GF(p^n).
    ///
    /// Validates that `P` is prime and `n >= 1`, and computes (or fetches
    /// from the process-wide cache) the Conway polynomial defining the
    /// field.
    ///
    /// # Errors
    ///
    /// `InvalidModulus` if `P` is not prime, `DegreeOutOfRange` if
    /// `n = 0` or `p^n` overflows a `u64`.
    pub fn new(degree: u32) -> Result<Self, FieldError> {
        let coeffs = conway_shared::<P>(degree)?;
        let modulus = Poly::new(coeffs.iter().map(|&v| Fp::new(v)).collect());
        let order = field_order(P, degree).ok_or(FieldError::DegreeOutOfRange { degree })?;
        Ok(Self {
            degree,
            order,
            modulus: Arc::new(modulus),
        })
    }

    /// The extension degree `n`.
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// The number of field elements, `p^n`.
    pub fn order(&self) -> u64 {
        self.order
    }

    /// The prime characteristic `p`.
    pub fn characteristic(&self) -> u64 {
        P
    }

    /// The Conway polynomial this field reduces by.
    pub fn modulus(&self) -> &Poly<P> {
        &self.modulus
    }

    /// Wrap a raw polynomial as an element, reducing when its degree
    /// reaches `n`.
    fn wrap(&self, poly: Poly<P>) -> GfElement<P> {
        let poly = if poly.degree() >= Some(self.degree as usize) {
            poly.rem(&self.modulus)
                .expect("reduction modulus is nonzero")
        } else {
            poly
        };
        GfElement {
            field: self.clone(),
            poly,
        }
    }

    /// Build an element from coefficients, reducing modulo the Conway
    /// polynomial if the degree is `n` or more.
    pub fn element(&self, coeffs: Vec<Fp<P>>) -> GfElement<P> {
        self.wrap(Poly::new(coeffs))
    }

    /// Build an element from plain integer coefficients (index = power).
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::GaloisField;
    ///
    /// let gf8 = GaloisField::<2>::new(3).unwrap();
    /// // x^3 reduces to x + 1 modulo x^3 + x + 1
    /// let a = gf8.element_from_ints(&[0, 0, 0, 1]);
    /// assert_eq!(a.coeffs(), vec![1, 1]);
    /// ```
    pub fn element_from_ints(&self, values: &[u64]) -> GfElement<P> {
        self.element(values.iter().map(|&v| Fp::new(v)).collect())
    }

    /// The additive identity.
    pub fn zero(&self) -> GfElement<P> {
        self.wrap(Poly::zero())
    }

    /// The multiplicative identity.
    pub fn one(&self) -> GfElement<P> {
        self.wrap(Poly::one())
    }

    /// The residue of the variable `x` — for `n > 1` a root of the
    /// Conway polynomial, and a generator of the multiplicative group.
    pub fn x(&self) -> GfElement<P> {
        self.wrap(Poly::x())
    }

    /// The monic element with the given roots, `(x - r1)...(x - rk)`.
    ///
    /// # Errors
    ///
    /// `DegreeOutOfRange` when no roots are given or more than `n - 1`
    /// are, since the product would not determine a proper residue.
    pub fn from_roots(&self, roots: &[Fp<P>]) -> Result<GfElement<P>, FieldError> {
        if roots.is_empty() || roots.len() > (self.degree as usize).saturating_sub(1) {
            return Err(FieldError::DegreeOutOfRange {
                degree: roots.len() as u32,
            });
        }
        Ok(self.wrap(Poly::from_roots(roots)))
    }

    /// Draw an element uniformly from all `p^n` elements of the field.
    ///
    /// This is the randomness collaborator [`GfElement::sqrt`] relies on.
    pub fn random_element<R: rand::Rng>(&self, rng: &mut R) -> GfElement<P> {
        let coeffs = (0..self.degree)
            .map(|_| Fp::new(rng.gen_range(0..P)))
            .collect();
        self.element(coeffs)
    }
}

impl<const P: u64> PartialEq for GaloisField<P> {
    fn eq(&self, other: &Self) -> bool {
        // Same prime (by type) and same degree determine the same Conway
        // modulus.
        self.degree == other.degree
    }
}

impl<const P: u64> Eq for GaloisField<P> {}

impl<const P: u64> fmt::Debug for GaloisField<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GaloisField(p={}, n={})", P, self.degree)
    }
}

/// Construct an element of GF(p^n) in one call: `field_element::<P>(n,
/// coeffs)` builds the field handle (cached) and reduces the
/// coefficients.
///
/// # Example
///
/// ```
/// use gfield::field_element;
///
/// let a = field_element::<5>(1, &[9]).unwrap();
/// assert_eq!(a.coeffs(), vec![4]);
/// ```
pub fn field_element<const P: u64>(degree: u32, values: &[u64]) -> Result<GfElement<P>, FieldError> {
    Ok(GaloisField::<P>::new(degree)?.element_from_ints(values))
}

/// An element of GF(p^n): a polynomial of degree `< n` over GF(p),
/// reduced modulo the field's Conway polynomial.
///
/// Immutable value type. Equality and hashing compare the field degree
/// and the reduced coefficients; the prime is part of the type.
///
/// Operators panic on cross-field operands and division by zero; the
/// `checked_*` methods and [`GfElement::inverse`] report the same
/// conditions as typed [`FieldError`] values instead.
#[derive(Clone)]
pub struct GfElement<const P: u64> {
    field: GaloisField<P>,
    poly: Poly<P>,
}

impl<const P: u64> GfElement<P> {
    /// The field this element belongs to.
    pub fn field(&self) -> &GaloisField<P> {
        &self.field
    }

    /// The reduced coefficient vector as plain integers in `[0, p)`,
    /// index = power. The zero element is rendered as `[0]`.
    ///
    /// This is the boundary handed to formatting or parsing layers; the
    /// engine itself attaches no string syntax to it.
    pub fn coeffs(&self) -> Vec<u64> {
        if self.poly.is_zero() {
            return vec![0];
        }
        self.poly.coefficients().iter().map(|c| c.value()).collect()
    }

    /// The coefficient of `x^i` (zero beyond the reduced degree).
    pub fn coeff(&self, i: usize) -> Fp<P> {
        self.poly.coeff(i)
    }

    /// The underlying reduced polynomial.
    pub fn poly(&self) -> &Poly<P> {
        &self.poly
    }

    /// Check for the additive identity.
    pub fn is_zero(&self) -> bool {
        self.poly.is_zero()
    }

    /// Check for the multiplicative identity.
    pub fn is_one(&self) -> bool {
        self.poly == Poly::one()
    }

    fn require_same_field(&self, other: &Self) -> Result<(), FieldError> {
        if self.field.degree != other.field.degree {
            return Err(FieldError::FieldMismatch {
                left: self.field.degree,
                right: other.field.degree,
            });
        }
        Ok(())
    }

    /// Sum, rejecting cross-field operands.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, FieldError> {
        self.require_same_field(rhs)?;
        Ok(self.field.wrap(self.poly.clone() + &rhs.poly))
    }

    /// Difference, rejecting cross-field operands.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, FieldError> {
        self.require_same_field(rhs)?;
        Ok(self.field.wrap(self.poly.clone() - &rhs.poly))
    }

    /// Product, rejecting cross-field operands.
    ///
    /// The raw convolution can reach degree `2n - 2`; the result is
    /// reduced modulo the Conway polynomial.
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, FieldError> {
        self.require_same_field(rhs)?;
        Ok(self.mul_reduced(rhs))
    }

    /// Quotient `self * rhs⁻¹`, rejecting cross-field operands and a
    /// zero divisor.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, FieldError> {
        self.require_same_field(rhs)?;
        Ok(self.mul_reduced(&rhs.inverse()?))
    }

    /// Multiply without the cross-field check (operands already
    /// validated, or produced internally).
    fn mul_reduced(&self, rhs: &Self) -> Self {
        self.field.wrap(self.poly.clone() * &rhs.poly)
    }

    /// Raise to a non-negative power by square-and-multiply, reducing at
    /// every step. `pow(0)` is one, for the zero element too.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::GaloisField;
    ///
    /// let gf8 = GaloisField::<2>::new(3).unwrap();
    /// let x = gf8.x();
    /// assert!(x.pow(7).is_one()); // x generates GF(8)*
    /// assert!(!x.pow(3).is_one());
    /// ```
    pub fn pow(&self, exp: u64) -> Self {
        let mut result = self.field.one();
        let mut base = self.clone();
        let mut e = exp;

        while e > 0 {
            if e & 1 == 1 {
                result = result.mul_reduced(&base);
            }
            base = base.mul_reduced(&base);
            e >>= 1;
        }
        result
    }

    /// The multiplicative inverse, by the extended Euclidean algorithm
    /// against the Conway polynomial.
    ///
    /// The gcd of a nonzero residue and an irreducible modulus is a
    /// nonzero constant; normalizing the Bézout coefficient by it gives
    /// the inverse.
    ///
    /// # Errors
    ///
    /// `DivisionByZero` for the zero element.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::GaloisField;
    ///
    /// let gf9 = GaloisField::<3>::new(2).unwrap();
    /// let a = gf9.element_from_ints(&[1, 1]);
    /// let inv = a.inverse().unwrap();
    /// assert!(a.checked_mul(&inv).unwrap().is_one());
    /// ```
    pub fn inverse(&self) -> Result<Self, FieldError> {
        if self.is_zero() {
            return Err(FieldError::DivisionByZero);
        }

        let (g, s, _t) = Poly::extended_gcd(&self.poly, &self.field.modulus);
        let scale = g
            .leading_coeff()
            .and_then(|c| c.inverse())
            .ok_or(FieldError::DivisionByZero)?;
        Ok(self.field.wrap(s * scale))
    }

    /// A square root of this element, or `None` if it is a non-residue.
    ///
    /// - the zero element is its own root;
    /// - in characteristic 2 squaring is a bijection, so the root is
    ///   `self^(q/2)`;
    /// - otherwise Euler's criterion `self^((q-1)/2)` decides existence,
    ///   and the Adleman–Manders–Miller iteration extracts the root. The
    ///   required quadratic non-residue is found by Las-Vegas sampling
    ///   from `rng`, with a bounded number of tries.
    ///
    /// # Example
    ///
    /// ```
    /// use gfield::GaloisField;
    ///
    /// let gf5 = GaloisField::<5>::new(1).unwrap();
    /// let mut rng = rand::thread_rng();
    ///
    /// // 4 = (±2)^2 has a root; 2 is a non-residue mod 5
    /// let r = gf5.element_from_ints(&[4]).sqrt(&mut rng).unwrap();
    /// assert_eq!(r.checked_mul(&r).unwrap(), gf5.element_from_ints(&[4]));
    /// assert!(gf5.element_from_ints(&[2]).sqrt(&mut rng).is_none());
    /// ```
    pub fn sqrt<R: rand::Rng>(&self, rng: &mut R) -> Option<Self> {
        if self.is_zero() {
            return Some(self.clone());
        }

        let order = self.field.order();
        if P == 2 {
            // Frobenius: squaring permutes the field, q/2 squarings undo one
            return Some(self.pow(order / 2));
        }

        let criterion = (order - 1) / 2;
        if !self.pow(criterion).is_one() {
            return None;
        }

        // Las Vegas: half the nonzero elements are non-residues, so this
        // terminates almost immediately for any honest random source.
        let mut seed = None;
        for _ in 0..MAX_SEED_TRIES {
            let candidate = self.field.random_element(rng);
            if !candidate.is_zero() && !candidate.pow(criterion).is_one() {
                seed = Some(candidate);
                break;
            }
        }
        let seed =
            seed.expect("random source failed to produce a quadratic non-residue");

        // order - 1 = odd * 2^evenlog
        let mut odd = order - 1;
        let mut evenlog = 0u32;
        while odd % 2 == 0 {
            odd /= 2;
            evenlog += 1;
        }

        let mut c = seed.pow(odd);
        let mut t = self.pow(odd);
        let mut root = self.pow((odd + 1) / 2);
        let mut max_pow = evenlog;

        while !t.is_one() {
            // Smallest i with t^(2^i) = 1
            let mut i = 0u32;
            let mut t_sq = t.clone();
            for step in 1..=max_pow {
                t_sq = t_sq.mul_reduced(&t_sq);
                if t_sq.is_one() {
                    i = step;
                    break;
                }
            }
            if i == 0 || i == max_pow {
                // Euler's criterion passed, so this only triggers on a
                // broken invariant; report absence rather than loop.
                return None;
            }

            let b = c.pow(1u64 << (max_pow - i - 1));
            c = b.mul_reduced(&b);
            t = t.mul_reduced(&c);
            root = root.mul_reduced(&b);
            max_pow = i;
        }

        Some(root)
    }

    /// The Frobenius endomorphism `a ↦ a^p`, an automorphism of GF(p^n)
    /// fixing the base field.
    pub fn frobenius(&self) -> Self {
        self.pow(P)
    }
}

/* ---- operator sugar over the checked operations ---- */

impl<const P: u64> Add for GfElement<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl<const P: u64> Add for &GfElement<P> {
    type Output = GfElement<P>;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<const P: u64> Sub for GfElement<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl<const P: u64> Sub for &GfElement<P> {
    type Output = GfElement<P>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<const P: u64> Mul for GfElement<P> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl<const P: u64> Mul for &GfElement<P> {
    type Output = GfElement<P>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<const P: u64> Div for GfElement<P> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        &self / &rhs
    }
}

impl<const P: u64> Div for &GfElement<P> {
    type Output = GfElement<P>;

    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<const P: u64> Neg for GfElement<P> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl<const P: u64> Neg for &GfElement<P> {
    type Output = GfElement<P>;

    fn neg(self) -> Self::Output {
        self.field.wrap(-self.poly.clone())
    }
}

impl<const P: u64> PartialEq for GfElement<P> {
    fn eq(&self, other: &Self) -> bool {
        self.field.degree == other.field.degree && self.poly == other.poly
    }
}

impl<const P: u64> Eq for GfElement<P> {}

impl<const P: u64> Hash for GfElement<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        P.hash(state);
        self.field.degree.hash(state);
        self.poly.hash(state);
    }
}

impl<const P: u64> fmt::Debug for GfElement<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.poly)
    }
}

impl<const P: u64> fmt::Display for GfElement<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Elements serialize as their reduced coefficient vector. There is no
/// `Deserialize`: reconstructing an element needs its field, which the
/// coefficients alone do not carry — deserialize a `Vec<u64>` and hand it
/// to [`GaloisField::element_from_ints`].
#[cfg(feature = "serde")]
impl<const P: u64> serde::Serialize for GfElement<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.coeffs().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    type Gf = GaloisField<3>;

    fn rng() -> rand::rngs::StdRng {
        rand::rngs::StdRng::seed_from_u64(1)
    }

    /// Every element of a small field, by enumerating coefficient ranks.
    fn all_elements<const P: u64>(field: &GaloisField<P>) -> Vec<GfElement<P>> {
        (0..field.order())
            .map(|mut rank| {
                let coeffs: Vec<u64> = (0..field.degree())
                    .map(|_| {
                        let d = rank % P;
                        rank /= P;
                        d
                    })
                    .collect();
                field.element_from_ints(&coeffs)
            })
            .collect()
    }

    #[test]
    fn construction_validates_parameters() {
        assert_eq!(
            GaloisField::<6>::new(2).unwrap_err(),
            FieldError::InvalidModulus { modulus: 6 }
        );
        assert_eq!(
            GaloisField::<5>::new(0).unwrap_err(),
            FieldError::DegreeOutOfRange { degree: 0 }
        );
        assert_eq!(
            GaloisField::<2>::new(70).unwrap_err(),
            FieldError::DegreeOutOfRange { degree: 70 }
        );
    }

    #[test]
    fn field_metadata() {
        let gf = GaloisField::<5>::new(3).unwrap();
        assert_eq!(gf.degree(), 3);
        assert_eq!(gf.order(), 125);
        assert_eq!(gf.characteristic(), 5);
        assert_eq!(gf.modulus().degree(), Some(3));
    }

    #[test]
    fn construction_reduces_high_degrees() {
        let gf8 = GaloisField::<2>::new(3).unwrap();
        // x^3 ≡ x + 1 (mod x^3 + x + 1)
        let a = gf8.element_from_ints(&[0, 0, 0, 1]);
        assert_eq!(a.coeffs(), vec![1, 1]);
        // x^4 ≡ x^2 + x
        let b = gf8.element_from_ints(&[0, 0, 0, 0, 1]);
        assert_eq!(b.coeffs(), vec![0, 1, 1]);
    }

    #[test]
    fn low_degree_input_unchanged() {
        let gf = Gf::new(2).unwrap();
        let a = gf.element_from_ints(&[2, 1]);
        assert_eq!(a.coeffs(), vec![2, 1]);
        assert_eq!(gf.zero().coeffs(), vec![0]);
        assert_eq!(gf.one().coeffs(), vec![1]);
    }

    #[test]
    fn x_in_prime_field_is_the_primitive_root() {
        // In GF(5) the Conway modulus is x - 2, so x reduces to 2
        let gf5 = GaloisField::<5>::new(1).unwrap();
        assert_eq!(gf5.x().coeffs(), vec![2]);
    }

    #[test]
    fn addition_and_negation() {
        let gf = Gf::new(2).unwrap();
        let a = gf.element_from_ints(&[1, 2]);
        let b = gf.element_from_ints(&[2, 2]);
        assert_eq!((&a + &b).coeffs(), vec![0, 1]);
        assert_eq!((&a - &a).coeffs(), vec![0]);
        assert!((&a + &(-&a)).is_zero());
    }

    #[test]
    fn multiplication_reduces() {
        let gf4 = GaloisField::<2>::new(2).unwrap();
        let x = gf4.x();
        // x * x = x^2 ≡ x + 1 (mod x^2 + x + 1)
        assert_eq!((&x * &x).coeffs(), vec![1, 1]);
    }

    #[test]
    fn inverse_of_every_nonzero_element() {
        for gf in [GaloisField::<3>::new(2).unwrap(), GaloisField::<3>::new(3).unwrap()] {
            for a in all_elements(&gf) {
                if a.is_zero() {
                    assert_eq!(a.inverse().unwrap_err(), FieldError::DivisionByZero);
                } else {
                    let inv = a.inverse().unwrap();
                    assert!(a.checked_mul(&inv).unwrap().is_one(), "a = {:?}", a);
                }
            }
        }
    }

    #[test]
    fn division_round_trip() {
        let gf = GaloisField::<5>::new(3).unwrap();
        let a = gf.element_from_ints(&[1, 4, 2]);
        let b = gf.element_from_ints(&[3, 0, 1]);
        let q = &a / &b;
        assert_eq!(&q * &b, a);
    }

    #[test]
    fn division_by_zero() {
        let gf = Gf::new(2).unwrap();
        let a = gf.element_from_ints(&[1, 1]);
        assert_eq!(
            a.checked_div(&gf.zero()).unwrap_err(),
            FieldError::DivisionByZero
        );
    }

    #[test]
    fn pow_edge_cases() {
        let gf = Gf::new(2).unwrap();
        let a = gf.element_from_ints(&[1, 2]);
        assert!(a.pow(0).is_one());
        assert_eq!(a.pow(1), a);
        assert_eq!(a.pow(3), a.checked_mul(&a).unwrap().checked_mul(&a).unwrap());
        // 0^0 = 1 by convention, 0^k = 0
        assert!(gf.zero().pow(0).is_one());
        assert!(gf.zero().pow(5).is_zero());
    }

    #[test]
    fn lagrange_order_property() {
        // Every nonzero element of GF(8) and GF(9) has order dividing q-1
        let gf8 = GaloisField::<2>::new(3).unwrap();
        for a in all_elements(&gf8) {
            if !a.is_zero() {
                assert!(a.pow(7).is_one(), "a = {:?}", a);
            }
        }
        let gf9 = Gf::new(2).unwrap();
        for a in all_elements(&gf9) {
            if !a.is_zero() {
                assert!(a.pow(8).is_one(), "a = {:?}", a);
            }
        }
    }

    #[test]
    fn x_generates_the_multiplicative_group() {
        // The Conway modulus is primitive, so x has full order
        let gf9 = Gf::new(2).unwrap();
        let x = gf9.x();
        let mut seen = std::collections::HashSet::new();
        let mut acc = gf9.one();
        for _ in 0..8 {
            acc = acc.checked_mul(&x).unwrap();
            seen.insert(acc.coeffs());
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn cross_field_operands_rejected() {
        let a = GaloisField::<2>::new(2).unwrap().x();
        let b = GaloisField::<2>::new(3).unwrap().x();
        assert_eq!(
            a.checked_add(&b).unwrap_err(),
            FieldError::FieldMismatch { left: 2, right: 3 }
        );
        assert!(a.checked_mul(&b).is_err());
    }

    #[test]
    #[should_panic(expected = "different fields")]
    fn cross_field_operator_panics() {
        let a = GaloisField::<2>::new(2).unwrap().x();
        let b = GaloisField::<2>::new(3).unwrap().x();
        let _ = &a * &b;
    }

    #[test]
    fn from_roots_validates_count() {
        let gf = GaloisField::<5>::new(3).unwrap();
        assert!(gf.from_roots(&[]).is_err());
        let too_many = [Fp::new(1), Fp::new(2), Fp::new(3)];
        assert!(gf.from_roots(&too_many).is_err());

        let ok = gf.from_roots(&[Fp::new(1), Fp::new(2)]).unwrap();
        // (x - 1)(x - 2) = x^2 - 3x + 2 = x^2 + 2x + 2
        assert_eq!(ok.coeffs(), vec![2, 2, 1]);

        // a degree-1 field has no root slots at all
        let gf5 = GaloisField::<5>::new(1).unwrap();
        assert!(gf5.from_roots(&[Fp::new(1)]).is_err());
    }

    #[test]
    fn sqrt_in_prime_field() {
        let gf5 = GaloisField::<5>::new(1).unwrap();
        let mut rng = rng();

        let four = gf5.element_from_ints(&[4]);
        let r = four.sqrt(&mut rng).unwrap();
        assert!(r.coeffs() == vec![2] || r.coeffs() == vec![3]);
        assert_eq!(r.checked_mul(&r).unwrap(), four);

        // 2 is a non-residue mod 5
        assert!(gf5.element_from_ints(&[2]).sqrt(&mut rng).is_none());
        // 0 is its own root
        assert!(gf5.zero().sqrt(&mut rng).unwrap().is_zero());
    }

    #[test]
    fn sqrt_in_characteristic_two() {
        // Squaring is a bijection: every element has exactly one root
        let gf8 = GaloisField::<2>::new(3).unwrap();
        let mut rng = rng();
        for a in all_elements(&gf8) {
            let r = a.sqrt(&mut rng).expect("char 2: everything is a square");
            assert_eq!(r.checked_mul(&r).unwrap(), a);
        }
    }

    #[test]
    fn sqrt_in_gf9() {
        let gf9 = Gf::new(2).unwrap();
        let mut rng = rng();

        let mut with_root = 0;
        for a in all_elements(&gf9) {
            if let Some(r) = a.sqrt(&mut rng) {
                assert_eq!(r.checked_mul(&r).unwrap(), a, "a = {:?}", a);
                with_root += 1;
            }
        }
        // zero plus half the nonzero elements
        assert_eq!(with_root, 5);
    }

    #[test]
    fn sqrt_of_squares_in_gf125() {
        let gf = GaloisField::<5>::new(3).unwrap();
        let mut rng = rng();
        for seed in 0..10u64 {
            let a = gf.element_from_ints(&[seed % 5, (seed / 5) % 5, seed % 3]);
            let sq = a.checked_mul(&a).unwrap();
            let r = sq.sqrt(&mut rng).expect("a square has a root");
            assert_eq!(r.checked_mul(&r).unwrap(), sq);
        }
    }

    #[test]
    fn frobenius_is_additive_and_fixes_base() {
        let gf9 = Gf::new(2).unwrap();
        let a = gf9.element_from_ints(&[1, 2]);
        let b = gf9.element_from_ints(&[2, 1]);
        let lhs = a.checked_add(&b).unwrap().frobenius();
        let rhs = a.frobenius().checked_add(&b.frobenius()).unwrap();
        assert_eq!(lhs, rhs);

        let scalar = gf9.element_from_ints(&[2]);
        assert_eq!(scalar.frobenius(), scalar);
    }

    #[test]
    fn equality_and_hashing() {
        use std::collections::HashSet;

        let gf = Gf::new(2).unwrap();
        let a = gf.element_from_ints(&[1, 2]);
        let b = gf.element_from_ints(&[1, 2]);
        let c = gf.element_from_ints(&[2, 1]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        // same coefficients in a different field compare unequal
        let other = GaloisField::<3>::new(3).unwrap().element_from_ints(&[1, 2]);
        assert_ne!(a, other);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn random_elements_are_reduced() {
        let gf = GaloisField::<5>::new(3).unwrap();
        let mut rng = rng();
        for _ in 0..50 {
            let a = gf.random_element(&mut rng);
            assert!(a.poly().degree() < Some(3) || a.poly().degree().is_none());
            assert!(a.coeffs().iter().all(|&c| c < 5));
        }
    }

    #[test]
    fn free_function_constructor() {
        let a = field_element::<2>(3, &[0, 0, 0, 1]).unwrap();
        assert_eq!(a.coeffs(), vec![1, 1]);
        assert!(field_element::<4>(2, &[1]).is_err());
    }
}
