use super::galois::{Poly, G};

// Error correction codeword generator
//------------------------------------------------------------------------------

// g(x) = (x - 2^0)(x - 2^1)...(x - 2^(n-1))
pub fn generator_polynomial(ec_len: usize) -> Poly {
    (0..ec_len).fold(Poly::one(), |g, i| g.mul(&Poly(vec![G::ONE, G::gen_pow(i)])))
}

// Remainder of data * x^n divided by g(x)
pub fn ecc(data: &[u8], ec_len: usize) -> Vec<u8> {
    let gen = generator_polynomial(ec_len);
    let mut res = data.to_vec();
    res.resize(data.len() + ec_len, 0);

    for i in 0..data.len() {
        let lead = G(res[i]);
        if lead.is_zero() {
            continue;
        }
        for (r, &g) in res[i + 1..].iter_mut().zip(gen.iter().skip(1)) {
            *r ^= u8::from(g * lead);
        }
    }

    res.split_off(data.len())
}
