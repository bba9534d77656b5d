mod qr;

pub use qr::{Module, QR};

use crate::common::{
    codec::{encode, encode_with_version, Mode},
    ec::Blocks,
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
    BitStream,
};

pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mode: Option<Mode>,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mode: None, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        let version = match self.version {
            Some(v) => (*v).to_string(),
            None => "Auto".to_string(),
        };
        let mode = match self.mode {
            Some(m) => format!("{m:?}"),
            None => "Auto".to_string(),
        };
        let mask = match self.mask {
            Some(m) => (*m).to_string(),
            None => "Auto".to_string(),
        };
        format!(
            "{{ Version: {version}, Ec level: {:?}, Mode: {mode}, Mask: {mask} }}",
            self.ec_level
        )
    }
}

#[cfg(test)]
mod qrbuilder_util_tests {
    use super::QRBuilder;
    use crate::common::{ECLevel, MaskPattern, Mode, Version};

    #[test]
    fn test_metadata() {
        let data = "Hello, world!".as_bytes();
        let mut qr_builder = QRBuilder::new(data);
        qr_builder.version(Version::new(1).unwrap()).ec_level(ECLevel::L).mode(Mode::Byte);
        assert_eq!(qr_builder.metadata(), "{ Version: 1, Ec level: L, Mode: Byte, Mask: Auto }");
        qr_builder.unset_version().mask(MaskPattern::new(3));
        assert_eq!(qr_builder.metadata(), "{ Version: Auto, Ec level: L, Mode: Byte, Mask: 3 }");
    }
}

impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        log::debug!("Generating QR {}", self.metadata());

        log::debug!("Encoding {} bytes", self.data.len());
        let (encoded_data, version) = match self.version {
            Some(v) => (encode_with_version(self.data, v, self.ec_level, self.mode)?, v),
            None => {
                log::debug!("Finding smallest version");
                encode(self.data, self.ec_level, self.mode)?
            }
        };

        log::debug!("Computing ecc & interleaving for version {}", *version);
        let blocks = Blocks::from_data(encoded_data.data(), version, self.ec_level);
        let payload = BitStream::from_bytes(&blocks.interleave());

        log::debug!("Drawing function patterns & encoding region");
        let mut qr = QR::new(version, self.ec_level);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(payload);

        let mask = match self.mask {
            Some(m) => {
                log::debug!("Applying mask {}", *m);
                qr.apply_mask(m);
                m
            }
            None => {
                log::debug!("Finding & applying best mask");
                apply_best_mask(&mut qr)
            }
        };
        log::debug!("QR generated with mask {}", *mask);

        Self::report(&qr, encoded_data.len() >> 3);

        Ok(qr)
    }

    fn report(qr: &QR, encoded_len: usize) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        let version = qr.version();
        let ec_level = qr.ec_level();
        let data_len = version.data_codewords(ec_level);
        let total_modules = qr.width() * qr.width();
        let dark_modules = qr.count_dark_modules();
        let light_modules = total_modules - dark_modules;

        log::trace!("Report: {}", qr.metadata());
        log::trace!(
            "Data capacity: {data_len}, Error capacity: {}",
            Self::ec_capacity(version, ec_level)
        );
        log::trace!(
            "Data size: {data_len}, Encoded size: {encoded_len}, Compression: {}%",
            encoded_len * 100 / data_len
        );
        log::trace!(
            "Dark cells: {dark_modules}, Light cells: {light_modules}, Balance: {}",
            dark_modules * 100 / total_modules
        );
    }

    // Codewords correctable across all blocks. Small symbols reserve a few
    // ec codewords for misdecode protection.
    pub fn ec_capacity(version: Version, ec_level: ECLevel) -> usize {
        let p = match (*version, ec_level) {
            (1, ECLevel::L) => 3,
            (2, ECLevel::L) | (1, ECLevel::M) => 2,
            (1, _) | (3, ECLevel::L) => 1,
            _ => 0,
        };

        let ec_bytes = version.block_count(ec_level) * version.ecc_per_block(ec_level);

        (ec_bytes - p) / 2
    }
}
