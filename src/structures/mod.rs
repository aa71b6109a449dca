pub mod conway;
pub mod fp;
pub mod galois;
pub mod poly;
