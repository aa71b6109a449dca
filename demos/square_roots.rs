//! Square roots
//!
//! Euler's criterion and the Adleman–Manders–Miller algorithm at work in
//! prime fields, odd extension fields, and characteristic 2.
//!
//! Run with: cargo run --example square_roots

use gfield::GaloisField;

fn main() {
    let mut rng = rand::thread_rng();

    println!("=== Square roots in GF(5) ===\n");
    let gf5 = GaloisField::<5>::new(1).unwrap();
    for v in 0..5 {
        let a = gf5.element_from_ints(&[v]);
        match a.sqrt(&mut rng) {
            Some(r) => println!("sqrt({}) = {}  (check: {})", a, r, &r * &r),
            None => println!("sqrt({}): no square root", a),
        }
    }

    println!("\n=== Square roots in GF(9) ===\n");
    let gf9 = GaloisField::<3>::new(2).unwrap();
    let mut residues = 0;
    for hi in 0..3 {
        for lo in 0..3 {
            let a = gf9.element_from_ints(&[lo, hi]);
            if let Some(r) = a.sqrt(&mut rng) {
                println!("sqrt({}) = {}", a, r);
                residues += 1;
            }
        }
    }
    println!("{} of 9 elements are squares", residues);

    println!("\n=== Characteristic 2: GF(8) ===\n");
    // Squaring is a bijection, so every element has exactly one root
    let gf8 = GaloisField::<2>::new(3).unwrap();
    for rank in 0..8u64 {
        let a = gf8.element_from_ints(&[rank & 1, (rank >> 1) & 1, (rank >> 2) & 1]);
        let r = a.sqrt(&mut rng).unwrap();
        println!("sqrt({}) = {}", a, r);
    }
}
