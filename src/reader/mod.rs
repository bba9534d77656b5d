mod deqr;

pub use deqr::{DeModule, DeQR};

use crate::common::{
    codec::decode,
    ec::Blocks,
    error::{QRError, QRResult},
    metadata::{Color, Metadata, Version},
    BitStream,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct QRReader {
    version_hint: Option<Version>,
}

impl QRReader {
    pub fn new() -> Self {
        Self::default()
    }

    // Used when version info of a large symbol is unreadable
    pub fn version_hint(&mut self, version: Version) -> &mut Self {
        self.version_hint = Some(version);
        self
    }

    pub fn read(&self, grid: &[Color], width: usize) -> QRResult<(Metadata, Vec<u8>)> {
        log::debug!("Reading QR of width {width}");
        let mut deqr = DeQR::from_grid(grid, width)?;

        log::debug!("Reading format info");
        let (ecl, mask) = deqr.read_format_info()?;

        log::debug!("Reading version info");
        let ver = self.resolve_version(&deqr)?;
        let meta = Metadata::new(ver, ecl, mask);
        log::debug!("Read metadata {meta}");

        log::debug!("Marking all function patterns & unmasking");
        deqr.mark_all_function_patterns();
        deqr.unmask(mask);

        log::debug!("Extracting payload");
        let pld = deqr.extract_payload();

        log::debug!("Deinterleaving & rectifying payload");
        let mut blocks = Blocks::deinterleave(&pld, ver, ecl);
        blocks.rectify()?;

        log::debug!("Decoding data blocks");
        let mut enc = BitStream::from_bytes(&blocks.data());
        let msg = decode(&mut enc, ver)?;

        Ok((meta, msg))
    }

    // Width decides the version. Version info of larger symbols and the hint
    // must agree with it.
    fn resolve_version(&self, deqr: &DeQR) -> QRResult<Version> {
        let ver = deqr.version();
        if let Some(hint) = self.version_hint {
            if hint != ver {
                log::warn!("Version hint {} disagrees with grid version {}", *hint, *ver);
                return Err(QRError::InvalidVersionInfo);
            }
        }
        if *ver < 7 {
            return Ok(ver);
        }

        match deqr.read_version_info() {
            Ok(v) if v == ver => Ok(ver),
            Ok(v) => {
                log::warn!("Version info {} disagrees with grid version {}", *v, *ver);
                Err(QRError::InvalidVersionInfo)
            }
            Err(e) => match self.version_hint {
                Some(hint) => {
                    log::warn!("Version info unreadable ({e}), using hint {}", *hint);
                    Ok(hint)
                }
                None => Err(e),
            },
        }
    }
}
