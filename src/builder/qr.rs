use std::iter;
use std::ops::Deref;

use crate::common::info::format_info;
use crate::common::layout::{fixed_patterns, grid_index};
use crate::common::metadata::*;
use crate::common::{BitStream, EncRegionIter, MaskPattern};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(clr) | Module::Version(clr) | Module::Format(clr) | Module::Data(clr) => {
                clr
            }
        }
    }
}

// Symbol under construction. Modules are row major and remember which part of
// the symbol they belong to, so masking can tell data from function modules.
#[derive(Debug, Clone)]
pub struct QR {
    modules: Box<[Module]>,
    width: usize,
    version: Version,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

// Grid access
//------------------------------------------------------------------------------

impl QR {
    pub fn new(version: Version, ec_level: ECLevel) -> Self {
        let width = version.width();
        let modules = vec![Module::Empty; width * width].into_boxed_slice();
        Self { modules, width, version, ec_level, mask: None }
    }

    pub fn grid(&self) -> &[Module] {
        &self.modules
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    // Built symbols always carry a mask, pattern 0 stands in before that
    pub fn metadata(&self) -> Metadata {
        Metadata::new(self.version, self.ec_level, self.mask.unwrap_or(MaskPattern::new(0)))
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.iter().filter(|m| ***m == Color::Dark).count()
    }

    // Row major colors for renderers, without quiet zone
    pub fn to_grid(&self) -> Vec<Color> {
        self.modules.iter().map(|m| **m).collect()
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.modules[grid_index(self.width, r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        let idx = grid_index(self.width, r, c);
        self.modules[idx] = module;
    }

    #[cfg(test)]
    pub fn render(&self, glyph: impl Fn(Module) -> char) -> String {
        self.modules
            .chunks(self.width)
            .map(|row| row.iter().map(|&m| glyph(m)).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}


// Function patterns
//------------------------------------------------------------------------------

impl QR {
    // Everything outside the data region. Format modules stay dark until a mask
    // is applied, version modules are final.
    pub fn draw_all_function_patterns(&mut self) {
        for (r, c, clr) in fixed_patterns(self.version) {
            self.set(r, c, Module::Func(clr));
        }
        self.draw_format_info((1 << FORMAT_INFO_BIT_LEN) - 1);
        if *self.version >= 7 {
            let info = self.version.info();
            self.write_bits(info, &VERSION_INFO_COORDS_BL, Module::Version);
            self.write_bits(info, &VERSION_INFO_COORDS_TR, Module::Version);
        }
    }

    fn draw_format_info(&mut self, info: u32) {
        self.write_bits(info, &FORMAT_INFO_COORDS_MAIN, Module::Format);
        self.write_bits(info, &FORMAT_INFO_COORDS_SIDE, Module::Format);
        let (r, c) = DARK_MODULE_COORD;
        self.set(r, c, Module::Format(Color::Dark));
    }

    // First coord takes the most significant bit
    fn write_bits(&mut self, bits: u32, coords: &[(i16, i16)], kind: fn(Color) -> Module) {
        let top = coords.len() - 1;
        for (i, &(r, c)) in coords.iter().enumerate() {
            self.set(r, c, kind(Color::from((bits >> (top - i)) & 1 == 1)));
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    // Places payload bits MSB first along the zigzag. Open modules left after
    // the payload hold the remainder bits and stay light.
    pub fn draw_encoding_region(&mut self, payload: BitStream) {
        let open: Vec<_> = EncRegionIter::new(self.version)
            .filter(|&(r, c)| self.get(r, c) == Module::Empty)
            .collect();
        debug_assert!(payload.len() <= open.len(), "Payload overflows the encoding region");

        for ((r, c), bit) in open.into_iter().zip(payload.chain(iter::repeat(false))) {
            self.set(r, c, Module::Data(Color::from(bit)));
        }
        debug_assert!(!self.modules.contains(&Module::Empty), "Empty module left in encoding region");
    }

    // Flips data modules only, then writes the format info for the pattern
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        let w = self.width;
        for (i, module) in self.modules.iter_mut().enumerate() {
            if let Module::Data(clr) = module {
                if pattern.is_masked((i / w) as i16, (i % w) as i16) {
                    *clr = !*clr;
                }
            }
        }
        self.mask = Some(pattern);
        self.draw_format_info(format_info(self.ec_level, pattern));
    }
}
