use std::ops::{Add, AddAssign, Deref, Mul, MulAssign};

use crate::common::error::{QRError, QRResult};

// Log & exp tables
//------------------------------------------------------------------------------

// Primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
const PRIMITIVE: u16 = 0x11d;

pub(crate) struct GfTables {
    // Doubled so that the sum of two logs never needs reducing
    exp: [u8; 512],
    log: [u8; 256],
}

impl GfTables {
    const fn new() -> Self {
        let mut exp = [0u8; 512];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        let mut i = 0;
        while i < 255 {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE;
            }
            i += 1;
        }
        while i < 512 {
            exp[i] = exp[i - 255];
            i += 1;
        }
        Self { exp, log }
    }
}

pub(crate) static GF: GfTables = GfTables::new();

// Galois field element
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct G(pub u8);

impl G {
    pub const ZERO: G = G(0);
    pub const ONE: G = G(1);

    // 2^i
    pub fn gen_pow(i: usize) -> Self {
        Self(GF.exp[i % 255])
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn log(self) -> QRResult<usize> {
        if self.is_zero() {
            return Err(QRError::DivideByZero);
        }
        Ok(GF.log[self.0 as usize] as usize)
    }

    pub fn checked_div(self, rhs: Self) -> QRResult<Self> {
        if rhs.is_zero() {
            return Err(QRError::DivideByZero);
        }
        if self.is_zero() {
            return Ok(Self::ZERO);
        }
        let (a, b) = (GF.log[self.0 as usize] as usize, GF.log[rhs.0 as usize] as usize);
        Ok(Self(GF.exp[a + 255 - b]))
    }

    pub fn inverse(self) -> QRResult<Self> {
        let l = self.log()?;
        Ok(Self(GF.exp[255 - l]))
    }

    pub fn pow(self, exp: i32) -> QRResult<Self> {
        if self.is_zero() {
            return match exp {
                0 => Ok(Self::ONE),
                e if e > 0 => Ok(Self::ZERO),
                _ => Err(QRError::DivideByZero),
            };
        }
        let l = GF.log[self.0 as usize] as i64;
        let e = (l * exp as i64).rem_euclid(255);
        Ok(Self(GF.exp[e as usize]))
    }
}

impl From<G> for u8 {
    fn from(g: G) -> Self {
        g.0
    }
}

impl Add for G {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        let (a, b) = (GF.log[self.0 as usize] as usize, GF.log[rhs.0 as usize] as usize);
        Self(GF.exp[a + b])
    }
}

impl MulAssign for G {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}


// Polynomial
//------------------------------------------------------------------------------

// Coefficients are stored most significant first
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Poly(pub Vec<G>);

impl Deref for Poly {
    type Target = [G];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&[u8]> for Poly {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.iter().map(|&b| G(b)).collect())
    }
}

impl Poly {
    pub fn one() -> Self {
        Self(vec![G::ONE])
    }

    pub fn scale(&self, x: G) -> Self {
        Self(self.iter().map(|&c| c * x).collect())
    }

    // Right aligned so that constant terms line up
    pub fn add(&self, other: &Self) -> Self {
        let len = self.len().max(other.len());
        let mut res = vec![G::ZERO; len];
        let (so, oo) = (len - self.len(), len - other.len());
        for (i, &c) in self.iter().enumerate() {
            res[i + so] = c;
        }
        for (i, &c) in other.iter().enumerate() {
            res[i + oo] += c;
        }
        Self(res)
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::default();
        }
        let mut res = vec![G::ZERO; self.len() + other.len() - 1];
        for (i, &a) in self.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, &b) in other.iter().enumerate() {
                res[i + j] += a * b;
            }
        }
        Self(res)
    }

    // Synthetic division, returns (quotient, remainder)
    pub fn div_rem(&self, divisor: &Self) -> QRResult<(Self, Self)> {
        let lead = divisor.first().copied().unwrap_or(G::ZERO);
        if lead.is_zero() {
            return Err(QRError::DivideByZero);
        }
        let sep = divisor.len() - 1;
        if self.len() < divisor.len() {
            return Ok((Self::default(), self.clone()));
        }
        let mut out = self.0.clone();
        for i in 0..self.len() - sep {
            let coef = out[i].checked_div(lead)?;
            out[i] = coef;
            if coef.is_zero() {
                continue;
            }
            for (j, &d) in divisor.iter().enumerate().skip(1) {
                out[i + j] += d * coef;
            }
        }
        let rem = out.split_off(out.len() - sep);
        Ok((Self(out), Self(rem)))
    }

    // Horner's rule
    pub fn eval(&self, x: G) -> G {
        self.iter().fold(G::ZERO, |acc, &c| acc * x + c)
    }

    pub fn reversed(&self) -> Self {
        Self(self.iter().rev().copied().collect())
    }

    pub fn trim_leading_zeros(&mut self) {
        let nz = self.iter().position(|c| !c.is_zero()).unwrap_or(self.len());
        self.0.drain(..nz);
    }
}
