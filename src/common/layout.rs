use std::iter;

use super::metadata::{
    Color, Version, DARK_MODULE_COORD, FORMAT_INFO_COORDS_MAIN, FORMAT_INFO_COORDS_SIDE,
    VERSION_INFO_COORDS_BL, VERSION_INFO_COORDS_TR,
};

// Row, column and color of a module that is identical in every symbol of a version
pub type PatternModule = (i16, i16, Color);

// Coordinates
//------------------------------------------------------------------------------

// Row major index into a square grid. Negative coords count back from the far edge.
pub fn grid_index(width: usize, r: i16, c: i16) -> usize {
    let w = width as i16;
    let wrap = |i: i16| {
        assert!((-w..w).contains(&i), "Coord {i} is outside a grid of width {w}");
        if i < 0 {
            i + w
        } else {
            i
        }
    };
    wrap(r) as usize * width + wrap(c) as usize
}


// Fixed patterns
//------------------------------------------------------------------------------

// Finders with their separators, then timing lines, then alignment patterns.
// Where a timing line runs through an alignment pattern the module is yielded
// twice with the same color.
pub fn fixed_patterns(ver: Version) -> impl Iterator<Item = PatternModule> {
    let w = ver.width() as i16;
    finder_patterns(w).chain(timing_patterns(w)).chain(alignment_patterns(ver))
}

// Concentric rings around the center: 3x3 dark core, light ring, dark ring,
// light separator. Separator modules outside the grid are dropped.
fn finder_patterns(w: i16) -> impl Iterator<Item = PatternModule> {
    [(3, 3), (3, w - 4), (w - 4, 3)].into_iter().flat_map(move |(cr, cc)| {
        (cr - 4..=cr + 4).flat_map(move |r| {
            (cc - 4..=cc + 4).filter_map(move |c| {
                if !(0..w).contains(&r) || !(0..w).contains(&c) {
                    return None;
                }
                let ring = (r - cr).abs().max((c - cc).abs());
                Some((r, c, Color::from(ring != 2 && ring != 4)))
            })
        })
    })
}

// Alternating line between the finder separators, dark on even indices
fn timing_patterns(w: i16) -> impl Iterator<Item = PatternModule> {
    (8..w - 8).flat_map(|i| {
        let clr = Color::from(i & 1 == 0);
        [(6, i, clr), (i, 6, clr)]
    })
}

// 5x5 patterns on every pair of listed centers except the three that would
// land on a finder
fn alignment_patterns(ver: Version) -> impl Iterator<Item = PatternModule> {
    let centers = ver.alignment_pattern();
    let first = centers.first().copied();
    let last = centers.last().copied();
    centers
        .iter()
        .flat_map(move |&r| centers.iter().map(move |&c| (r, c)))
        .filter(move |&(r, c)| {
            let (r, c) = (Some(r), Some(c));
            !((r == first && (c == first || c == last)) || (r == last && c == first))
        })
        .flat_map(|(cr, cc)| {
            (-2..=2i16).flat_map(move |i| {
                (-2..=2i16).map(move |j| (cr + i, cc + j, Color::from(i.abs().max(j.abs()) != 1)))
            })
        })
}


// Reserved info areas
//------------------------------------------------------------------------------

// Both format copies and the dark module, plus both version copies from version 7
pub fn info_areas(ver: Version) -> impl Iterator<Item = (i16, i16)> {
    let has_version_info = *ver >= 7;
    let version_areas = [&VERSION_INFO_COORDS_BL, &VERSION_INFO_COORDS_TR]
        .into_iter()
        .filter(move |_| has_version_info)
        .flatten();
    FORMAT_INFO_COORDS_MAIN
        .iter()
        .chain(&FORMAT_INFO_COORDS_SIDE)
        .chain(version_areas)
        .copied()
        .chain(iter::once(DARK_MODULE_COORD))
}
