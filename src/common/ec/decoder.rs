use super::galois::{Poly, G};
use crate::common::error::{QRError, QRResult};

// Rectifier
//------------------------------------------------------------------------------

// Corrects up to ec_len / 2 corrupted codewords of a single block in place
pub fn rectify(block: &mut [u8], ec_len: usize) -> QRResult<()> {
    let synd = match syndromes(block, ec_len) {
        Some(s) => s,
        None => return Ok(()),
    };

    let err_loc = error_locator(&synd, ec_len)?;
    let err_pos = error_positions(&err_loc.reversed(), block.len())?;
    let err_mag = error_magnitudes(block.len(), &synd, &err_pos)?;

    // Rectify errors by XORing data with magnitude
    for (&p, &m) in err_pos.iter().zip(err_mag.iter()) {
        block[p] ^= u8::from(m);
    }

    match syndromes(block, ec_len) {
        None => Ok(()),
        Some(_) => Err(QRError::UncorrectableMessage),
    }
}

// Evaluations at 2^0..2^(n-1) behind a leading zero, None if all are zero
fn syndromes(block: &[u8], ec_len: usize) -> Option<Poly> {
    let msg = Poly::from(block);
    let mut synd = Vec::with_capacity(ec_len + 1);
    synd.push(G::ZERO);
    synd.extend((0..ec_len).map(|i| msg.eval(G::gen_pow(i))));

    if synd.iter().all(|s| s.is_zero()) {
        None
    } else {
        Some(Poly(synd))
    }
}

// Berlekamp-Massey
fn error_locator(synd: &Poly, ec_len: usize) -> QRResult<Poly> {
    let mut err_loc = Poly::one();
    let mut old_loc = Poly::one();

    for k in 1..=ec_len {
        // Discrepancy
        let mut delta = synd[k];
        let len = err_loc.len();
        for j in 1..len.min(k + 1) {
            delta += err_loc[len - 1 - j] * synd[k - j];
        }

        old_loc.0.push(G::ZERO);

        if !delta.is_zero() {
            if old_loc.len() > err_loc.len() {
                let new_loc = old_loc.scale(delta);
                old_loc = err_loc.scale(delta.inverse()?);
                err_loc = new_loc;
            }
            err_loc = err_loc.add(&old_loc.scale(delta));
        }
    }

    err_loc.trim_leading_zeros();
    let err_cnt = err_loc.len().saturating_sub(1);
    if err_cnt * 2 > ec_len {
        return Err(QRError::TooManyErrors);
    }
    Ok(err_loc)
}

// Brute force root search over every codeword position
fn error_positions(rev_loc: &Poly, len: usize) -> QRResult<Vec<usize>> {
    let err_cnt = rev_loc.len().saturating_sub(1);
    let err_pos: Vec<usize> =
        (0..len).filter(|&i| rev_loc.eval(G::gen_pow(i)).is_zero()).map(|i| len - 1 - i).collect();

    if err_pos.is_empty() {
        return Err(QRError::NoErrorsLocated);
    }
    if err_pos.len() != err_cnt {
        return Err(QRError::LocatorMismatch);
    }
    Ok(err_pos)
}

// Forney
fn error_magnitudes(len: usize, synd: &Poly, err_pos: &[usize]) -> QRResult<Vec<G>> {
    let coef_pos: Vec<usize> = err_pos.iter().map(|&p| len - 1 - p).collect();

    // Errata locator
    let errata_loc = coef_pos.iter().fold(Poly::one(), |loc, &c| {
        loc.mul(&Poly::one().add(&Poly(vec![G::gen_pow(c), G::ZERO])))
    });

    // Error evaluator
    let mut divisor = vec![G::ZERO; errata_loc.len() + 1];
    divisor[0] = G::ONE;
    let (_, err_eval) = synd.reversed().mul(&errata_loc).div_rem(&Poly(divisor))?;

    let xs: Vec<G> = coef_pos.iter().map(|&c| G::gen_pow(c)).collect();
    xs.iter()
        .enumerate()
        .map(|(i, &xi)| {
            let xi_inv = xi.inverse()?;
            let loc_prime = xs
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(G::ONE, |acc, (_, &xj)| acc * (G::ONE + xi_inv * xj));
            if loc_prime.is_zero() {
                return Err(QRError::ZeroDivisor);
            }
            let y = err_eval.eval(xi_inv) * xi;
            y.checked_div(loc_prime)
        })
        .collect()
}
