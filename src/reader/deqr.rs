use std::ops::{Deref, Not};

use crate::common::{
    error::{QRError, QRResult},
    info::{parse_format_info, parse_version_info},
    iter::EncRegionIter,
    layout::{fixed_patterns, grid_index, info_areas},
    mask::MaskPattern,
    metadata::{
        Color, ECLevel, Metadata, Version, FORMAT_INFO_COORDS_MAIN, FORMAT_INFO_COORDS_SIDE,
        VERSION_INFO_COORDS_BL, VERSION_INFO_COORDS_TR,
    },
};

// Sampled module. Function modules get marked so the data walk skips them.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DeModule {
    Unmarked(Color),
    Marked,
}

impl Deref for DeModule {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            DeModule::Unmarked(clr) => clr,
            DeModule::Marked => &Color::Dark,
        }
    }
}

impl Not for DeModule {
    type Output = DeModule;
    fn not(self) -> Self::Output {
        match self {
            DeModule::Unmarked(clr) => DeModule::Unmarked(!clr),
            DeModule::Marked => DeModule::Marked,
        }
    }
}

// Symbol being read
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DeQR {
    modules: Vec<DeModule>,
    width: usize,
    version: Version,
    format: Option<(ECLevel, MaskPattern)>,
}

impl DeQR {
    // Row major grid of a sampled symbol without quiet zone
    pub fn from_grid(grid: &[Color], width: usize) -> QRResult<Self> {
        let version = Version::from_width(width)?;
        if grid.len() != width * width {
            return Err(QRError::InvalidGridSize(grid.len()));
        }
        let modules = grid.iter().map(|&clr| DeModule::Unmarked(clr)).collect();
        Ok(Self { modules, width, version, format: None })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    // Version implied by the grid width
    pub fn version(&self) -> Version {
        self.version
    }

    // Available once format info is read
    pub fn metadata(&self) -> Option<Metadata> {
        self.format.map(|(ecl, mask)| Metadata::new(self.version, ecl, mask))
    }

    pub fn get(&self, r: i16, c: i16) -> DeModule {
        self.modules[grid_index(self.width, r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, module: DeModule) {
        let idx = grid_index(self.width, r, c);
        self.modules[idx] = module;
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl DeQR {
    // Falls back to the side copy when the main copy can't be corrected
    pub fn read_format_info(&mut self) -> QRResult<(ECLevel, MaskPattern)> {
        let format = parse_format_info(self.read_bits(&FORMAT_INFO_COORDS_MAIN)).or_else(|e| {
            log::warn!("Main format info unreadable ({e}), trying side copy");
            parse_format_info(self.read_bits(&FORMAT_INFO_COORDS_SIDE))
        })?;
        self.format = Some(format);
        Ok(format)
    }

    // Falls back to the top right copy when the bottom left can't be corrected
    pub fn read_version_info(&self) -> QRResult<Version> {
        debug_assert!(*self.version >= 7, "Version is too small to read version info");

        parse_version_info(self.read_bits(&VERSION_INFO_COORDS_BL)).or_else(|e| {
            log::warn!("Bottom left version info unreadable ({e}), trying top right copy");
            parse_version_info(self.read_bits(&VERSION_INFO_COORDS_TR))
        })
    }

    // First coord is the most significant bit
    fn read_bits(&self, coords: &[(i16, i16)]) -> u32 {
        coords.iter().fold(0, |bits, &(r, c)| (bits << 1) | u32::from(*self.get(r, c)))
    }
}


// Function patterns
//------------------------------------------------------------------------------

impl DeQR {
    // Marks every module outside the data region so unmasking and extraction
    // skip them
    pub fn mark_all_function_patterns(&mut self) {
        for (r, c, _) in fixed_patterns(self.version) {
            self.set(r, c, DeModule::Marked);
        }
        for (r, c) in info_areas(self.version) {
            self.set(r, c, DeModule::Marked);
        }
    }
}


// Data region
//------------------------------------------------------------------------------

impl DeQR {
    // Only unmarked modules flip, function patterns must be marked first
    pub fn unmask(&mut self, pattern: MaskPattern) {
        let w = self.width;
        for (i, module) in self.modules.iter_mut().enumerate() {
            if pattern.is_masked((i / w) as i16, (i % w) as i16) {
                *module = !*module;
            }
        }
    }

    // Regroups unmarked modules along the zigzag into codewords, MSB first.
    // Remainder bits past the last codeword are dropped.
    pub fn extract_payload(&self) -> Vec<u8> {
        let bits: Vec<u8> = EncRegionIter::new(self.version)
            .filter_map(|(r, c)| match self.get(r, c) {
                DeModule::Unmarked(clr) => Some(u8::from(clr)),
                DeModule::Marked => None,
            })
            .collect();
        bits.chunks_exact(8)
            .take(self.version.total_codewords())
            .map(|byte| byte.iter().fold(0, |cw, &b| (cw << 1) | b))
            .collect()
    }
}
