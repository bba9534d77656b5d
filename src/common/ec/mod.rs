mod block;
mod decoder;
mod encoder;
mod galois;

pub(crate) use block::*;
pub use decoder::rectify;
pub use encoder::{ecc, generator_polynomial};
pub use galois::{Poly, G};
