use std::ops::Deref;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    // Callers outside the crate go through try_new
    pub(crate) fn new(pattern: u8) -> Self {
        debug_assert!(pattern < 8, "Invalid masking pattern");
        Self(pattern)
    }

    pub fn try_new(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=7 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidMaskingPattern),
        }
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl MaskPattern {
    // True where the module at (r, c) is flipped
    pub fn is_masked(self, r: i16, c: i16) -> bool {
        let (r, c) = (r as i32, c as i32);
        match self.0 {
            0b000 => (r + c) & 1 == 0,
            0b001 => r & 1 == 0,
            0b010 => c % 3 == 0,
            0b011 => (r + c) % 3 == 0,
            0b100 => ((r >> 1) + (c / 3)) & 1 == 0,
            0b101 => ((r * c) & 1) + ((r * c) % 3) == 0,
            0b110 => (((r * c) & 1) + ((r * c) % 3)) & 1 == 0,
            0b111 => (((r + c) & 1) + ((r * c) % 3)) & 1 == 0,
            _ => unreachable!("Invalid masking pattern {}", self.0),
        }
    }
}


// Mask selection
//------------------------------------------------------------------------------

fn masked_penalty(qr: &QR, pattern: u8) -> u32 {
    let mut qr = qr.clone();
    qr.apply_mask(MaskPattern(pattern));
    let pen = compute_total_penalty(&qr);
    log::trace!("Mask {pattern}: penalty {pen}");
    pen
}

pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let base: &QR = qr;
    #[cfg(feature = "parallel")]
    let penalties: Vec<u32> = (0..8u8).into_par_iter().map(|m| masked_penalty(base, m)).collect();
    #[cfg(not(feature = "parallel"))]
    let penalties: Vec<u32> = (0..8u8).map(|m| masked_penalty(base, m)).collect();

    let best_mask = lowest_penalty(&penalties);
    qr.apply_mask(best_mask);
    best_mask
}

// Ties keep the lower pattern
fn lowest_penalty(penalties: &[u32]) -> MaskPattern {
    let best = penalties
        .iter()
        .enumerate()
        .fold(0, |best, (m, &pen)| if pen < penalties[best] { m } else { best });
    MaskPattern(best as u8)
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// 3 for a run of 5 and 1 for every module beyond
fn run_penalty(line: impl Iterator<Item = Color>) -> u32 {
    let mut pen = 0;
    let mut last = None;
    let mut run = 0;
    for clr in line {
        if last == Some(clr) {
            run += 1;
        } else {
            last = Some(clr);
            run = 1;
        }
        match run {
            5 => pen += 3,
            r if r > 5 => pen += 1,
            _ => (),
        }
    }
    pen
}

fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let rows: u32 = (0..w).map(|r| run_penalty((0..w).map(|c| *qr.get(r, c)))).sum();
    let cols: u32 = (0..w).map(|c| run_penalty((0..w).map(|r| *qr.get(r, c)))).sum();
    rows + cols
}

fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// 40 for each side of a 1:1:3:1:1 run that has four light modules, provided the
// module just past the run on the opposite side is light as well. Out of bounds
// counts as light.
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];
    let mut pen = 0;
    let w = qr.width() as i16;
    for i in 0..w {
        let get = |j: i16| {
            if !(0..w).contains(&j) {
                Color::Light
            } else if is_hor {
                *qr.get(i, j)
            } else {
                *qr.get(j, i)
            }
        };
        for j in 0..w - 6 {
            if !(j..j + 7).map(get).eq(PATTERN.iter().copied()) {
                continue;
            }
            let light = |k: i16| get(k) == Color::Light;
            if (j - 4..j).all(light) && light(j + 7) {
                pen += 40;
            }
            if (j + 7..j + 11).all(light) && light(j - 1) {
                pen += 40;
            }
        }
    }
    pen
}

fn compute_balance_penalty(qr: &QR) -> u32 {
    let w = qr.width();
    balance_penalty(qr.count_dark_modules(), w * w)
}

// 10 points per 5% away from half dark. The percent is truncated from a float,
// so a ratio sitting exactly on a 5% step may score the step below. Ratios above
// 50% are free up to 55% and then lag one step behind.
fn balance_penalty(dark: usize, total: usize) -> u32 {
    let ratio = dark as f64 / total as f64;
    let steps = |dev: f64| (dev * 100.0) as u32 / 5;
    if ratio < 0.5 {
        steps(0.5 - ratio) * 10
    } else if ratio > 0.55 {
        steps(ratio - 0.5).saturating_sub(1) * 10
    } else {
        0
    }
}
