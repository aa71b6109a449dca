//! Conway polynomial selection.
//!
//! The Conway polynomial of GF(p^n) is the Parker-least monic degree-n
//! polynomial over Z/pZ that is primitive and compatible with the Conway
//! polynomials of every proper divisor degree. It is the canonical
//! reduction modulus defining the field's multiplication, so all callers
//! agree on one representation of GF(p^n).
//!
//! Computing one is a search over up to `p^n` candidates, each gated by
//! order tests that cost a modular exponentiation, so results are
//! memoized in a process-wide cache keyed by `(p, n)`. Entries are
//! computed at most once and never change afterwards.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::algebra::ring::Ring;
use crate::structures::fp::Fp;
use crate::structures::galois::FieldError;
use crate::structures::poly::Poly;
use crate::utils::{factor, field_order, is_prime};

type CacheKey = (u64, u32);
type CacheCell = Arc<OnceLock<Arc<Vec<u64>>>>;

/// The cache stores raw coefficient values so one map serves every
/// const-generic instantiation.
static CACHE: OnceLock<Mutex<HashMap<CacheKey, CacheCell>>> = OnceLock::new();

/// Fetch or insert the compute-once cell for a key. The map lock is held
/// only for the lookup; the search itself runs under the cell's own
/// `OnceLock`, so a degree-n computation can recurse into divisor degrees
/// without deadlocking, and concurrent callers of the same key block on
/// exactly one search.
fn cache_cell(key: CacheKey) -> CacheCell {
    let map = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = map.lock().expect("conway cache lock poisoned");
    guard.entry(key).or_default().clone()
}

/// The Conway polynomial of GF(p^n), from the cache when already known.
///
/// Returns the shared coefficient vector; pointer equality across calls
/// witnesses that the search ran once.
pub(crate) fn conway_shared<const P: u64>(n: u32) -> Result<Arc<Vec<u64>>, FieldError> {
    if !is_prime(P) {
        return Err(FieldError::InvalidModulus { modulus: P });
    }
    if n == 0 {
        return Err(FieldError::DegreeOutOfRange { degree: n });
    }
    let order = field_order(P, n).ok_or(FieldError::DegreeOutOfRange { degree: n })?;

    let cell = cache_cell((P, n));
    let coeffs = cell.get_or_init(|| Arc::new(search::<P>(n, order)));
    Ok(Arc::clone(coeffs))
}

/// The Conway polynomial of GF(p^n).
///
/// Monic of degree `n`, primitive, and compatible with the Conway
/// polynomial of every proper divisor degree of `n`. Computed lazily and
/// memoized per `(p, n)`; subsequent calls are cache hits.
///
/// # Errors
///
/// `InvalidModulus` if `P` is not prime; `DegreeOutOfRange` for `n = 0`
/// or when `p^n` does not fit in a `u64`.
///
/// # Example
///
/// ```
/// use gfield::{conway_polynomial, Fp, Poly};
///
/// // GF(8) is defined by x^3 + x + 1
/// let c = conway_polynomial::<2>(3).unwrap();
/// let expected = Poly::new(vec![Fp::new(1), Fp::new(1), Fp::new(0), Fp::new(1)]);
/// assert_eq!(c, expected);
/// ```
pub fn conway_polynomial<const P: u64>(n: u32) -> Result<Poly<P>, FieldError> {
    let coeffs = conway_shared::<P>(n)?;
    Ok(Poly::new(coeffs.iter().map(|&v| Fp::new(v)).collect()))
}

/// Run the search for the degree-n Conway polynomial. Only called once
/// per key, from inside the cache cell.
fn search<const P: u64>(n: u32, order: u64) -> Vec<u64> {
    // Degree 1: the minimal polynomial x - g of the smallest primitive
    // root generates everything there is to generate.
    if n == 1 {
        let g = Fp::<P>::primitive_root()
            .unwrap_or_else(|| panic!("no primitive root modulo prime {}", P));
        return poly_values(&Poly::from_roots(&[g]));
    }

    let m = order - 1;
    let m_primes: Vec<u64> = factor(m).into_keys().collect();

    // Compatibility targets: the Conway polynomial C_d for each proper
    // divisor d of n with n/d prime, paired with the subgroup exponent
    // (p^n - 1)/(p^d - 1).
    let mut divisor_degrees: Vec<u32> = factor(n as u64).into_keys().map(|q| n / q as u32).collect();
    divisor_degrees.sort_unstable();
    divisor_degrees.dedup();

    let compat: Vec<(Poly<P>, u64)> = divisor_degrees
        .into_iter()
        .map(|d| {
            let cd = conway_polynomial::<P>(d)
                .unwrap_or_else(|e| panic!("conway polynomial for divisor degree {}: {}", d, e));
            let sub_order = field_order(P, d).unwrap_or_else(|| panic!("p^{} overflow", d)) - 1;
            (cd, m / sub_order)
        })
        .collect();

    for candidate in ParkerMonic::<P>::new(n as usize) {
        if !x_is_primitive(&candidate, m, &m_primes) {
            continue;
        }
        if compat
            .iter()
            .all(|(cd, e)| composes_to_zero(cd, *e, &candidate))
        {
            return poly_values(&candidate);
        }
    }

    // A valid candidate exists for every prime p and degree n; running
    // out of candidates means the search itself is broken.
    panic!("conway polynomial search exhausted for p={}, n={}", P, n);
}

/// Spec test for primitivity of the residue x: for every prime factor f
/// of m = p^n - 1, `(x^(m/f) - 1) mod candidate` must be nonzero.
fn x_is_primitive<const P: u64>(candidate: &Poly<P>, m: u64, m_primes: &[u64]) -> bool {
    for &f in m_primes {
        match candidate.powmod_x(m / f) {
            Some(r) if r == Poly::one() => return false,
            Some(_) => {}
            None => return false,
        }
    }
    true
}

/// Check `cd(x^e) ≡ 0 (mod candidate)` without materializing the
/// composed polynomial: reduce x^e first, then run Horner over cd's
/// coefficients with reduction at each step.
fn composes_to_zero<const P: u64>(cd: &Poly<P>, e: u64, candidate: &Poly<P>) -> bool {
    let Some(xe) = candidate.powmod_x(e) else {
        return false;
    };
    let mut acc = Poly::zero();
    for &coeff in cd.coefficients().iter().rev() {
        acc = acc * &xe + Poly::constant(coeff);
        acc = match acc.rem(candidate) {
            Some(r) => r,
            None => return false,
        };
    }
    acc.is_zero()
}

fn poly_values<const P: u64>(poly: &Poly<P>) -> Vec<u64> {
    poly.coefficients().iter().map(|c| c.value()).collect()
}

/// Lazy enumeration of all monic degree-n polynomials over Z/pZ in
/// ascending Parker order.
///
/// The candidate of rank `a` has coefficient `c_i = (-1)^(n-i) * d_i`
/// (mod p) for the base-p digits `d_i` of `a`, plus a unit leading
/// coefficient; ascending rank is exactly ascending
/// [`Poly::parker_cmp`] order among monic polynomials of the degree.
pub(crate) struct ParkerMonic<const P: u64> {
    degree: usize,
    rank: u64,
    count: u64,
}

impl<const P: u64> ParkerMonic<P> {
    pub(crate) fn new(degree: usize) -> Self {
        let count = field_order(P, degree as u32).expect("candidate count overflows u64");
        Self {
            degree,
            rank: 0,
            count,
        }
    }
}

impl<const P: u64> Iterator for ParkerMonic<P> {
    type Item = Poly<P>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rank == self.count {
            return None;
        }

        let mut digits = self.rank;
        let mut coeffs = Vec::with_capacity(self.degree + 1);
        for i in 0..self.degree {
            let d = digits % P;
            digits /= P;
            let c = if (self.degree - i) % 2 == 1 {
                (P - d) % P
            } else {
                d
            };
            coeffs.push(Fp::new(c));
        }
        coeffs.push(Fp::ONE);

        self.rank += 1;
        Some(Poly::new(coeffs))
    }
}
