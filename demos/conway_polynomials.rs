//! Conway polynomials
//!
//! Prints the canonical reduction moduli for a grid of small fields and
//! demonstrates the two defining properties: primitivity and
//! compatibility across divisor degrees.
//!
//! Run with: cargo run --example conway_polynomials

use gfield::{conway_polynomial, Poly};

fn print_table<const P: u64>(max_n: u32) {
    for n in 1..=max_n {
        match conway_polynomial::<P>(n) {
            Ok(c) => println!("  C({}, {}) = {}", P, n, c),
            Err(e) => println!("  C({}, {}): {}", P, n, e),
        }
    }
}

fn main() {
    println!("=== Conway polynomials ===\n");

    println!("p = 2:");
    print_table::<2>(8);
    println!("\np = 3:");
    print_table::<3>(5);
    println!("\np = 5:");
    print_table::<5>(4);
    println!("\np = 7:");
    print_table::<7>(3);

    // Primitivity: x generates GF(16)* through the degree-4 polynomial
    println!("\nC(2, 4) is primitive: {}", conway_polynomial::<2>(4).unwrap().is_primitive());

    // Compatibility: C_2 composed with x^5 vanishes modulo C_4
    let c4 = conway_polynomial::<2>(4).unwrap();
    let c2 = conway_polynomial::<2>(2).unwrap();
    let composed = c2.compose_x_pow(5);
    println!(
        "C(2, 2)(x^5) mod C(2, 4) = {}",
        composed.rem(&c4).unwrap()
    );

    // Second lookups hit the process-wide cache
    let again: Poly<2> = conway_polynomial::<2>(8).unwrap();
    println!("\ncached C(2, 8) = {}", again);
}
