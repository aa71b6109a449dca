//! # gfield
//!
//! Exact arithmetic in Galois extension fields GF(p^n).
//!
//! The crate is built bottom-up from four pieces:
//!
//! - [`Fp`]: the prime field GF(p), with a primitivity predicate and a
//!   Tonelli–Shanks square root;
//! - [`Poly`]: the unreduced polynomial ring (Z/pZ)\[X\] — Euclidean
//!   division, extended gcd, modular exponentiation, Parker's ordering,
//!   and a full factorization stack;
//! - [`conway_polynomial`]: the canonical (Parker-least, primitive,
//!   cross-degree-compatible) reduction modulus of GF(p^n), memoized
//!   process-wide per `(p, n)`;
//! - [`GaloisField`] / [`GfElement`]: field handles and immutable
//!   elements with add/sub/mul/div, inversion by extended Euclid,
//!   exponentiation, and Adleman–Manders–Miller square roots.
//!
//! The prime is a const generic; the degree is a runtime parameter.
//!
//! ```
//! use gfield::GaloisField;
//!
//! let gf9 = GaloisField::<3>::new(2).unwrap();
//! let a = gf9.element_from_ints(&[1, 2]); // 1 + 2x
//! let b = a.inverse().unwrap();
//! assert!(a.checked_mul(&b).unwrap().is_one());
//! ```

pub mod algebra;
pub mod structures;
pub mod utils;

pub use algebra::field::Field;
pub use algebra::ring::Ring;

pub use structures::conway::conway_polynomial;
pub use structures::fp::Fp;
pub use structures::galois::{field_element, FieldError, GaloisField, GfElement};
pub use structures::poly::Poly;
pub use utils::{factor, field_order, is_prime};
