//! Field basics
//!
//! Constructs GF(9) and walks through element arithmetic: addition,
//! multiplication with reduction, inversion, division, and powers.
//!
//! Run with: cargo run --example field_basics

use gfield::GaloisField;

fn main() {
    println!("=== GF(3^2) basics ===\n");

    let gf9 = GaloisField::<3>::new(2).unwrap();
    println!("field: {:?}", gf9);
    println!("reduction modulus: {}", gf9.modulus());
    println!("order: {}\n", gf9.order());

    let a = gf9.element_from_ints(&[1, 2]); // 1 + 2x
    let b = gf9.element_from_ints(&[2, 1]); // 2 + x

    println!("a     = {}", a);
    println!("b     = {}", b);
    println!("a + b = {}", &a + &b);
    println!("a - b = {}", &a - &b);
    println!("a * b = {}", &a * &b);
    println!();

    let inv = a.inverse().unwrap();
    println!("a^-1      = {}", inv);
    println!("a * a^-1  = {}", &a * &inv);
    println!("a / b * b = {}", &(&a / &b) * &b);
    println!();

    // The multiplicative group is cyclic of order 8 and x generates it
    let x = gf9.x();
    for k in 1..=8 {
        println!("x^{} = {}", k, x.pow(k));
    }
    println!();

    // Elements constructed from high-degree coefficient vectors reduce
    let c = gf9.element_from_ints(&[0, 0, 0, 1]); // x^3
    println!("x^3 reduces to {}  (coeffs {:?})", c, c.coeffs());
}
