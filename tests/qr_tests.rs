#[cfg(test)]
mod qr_proptests {

    use prop::string::string_regex;
    use proptest::prelude::*;

    use qrsymbol::*;

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    pub fn qr_strategy(regex: String, max_sz: usize) -> impl Strategy<Value = (ECLevel, String)> {
        ec_level_strategy().prop_flat_map(move |ecl| {
            let pattern = format!(r"{}{{0,{}}}", regex, max_sz);
            string_regex(&pattern).unwrap().prop_map(move |data| (ecl, data))
        })
    }

    fn round_trip(data: &[u8], ecl: ECLevel) -> Vec<u8> {
        let _ = env_logger::builder().is_test(true).try_init();
        let qr = QRBuilder::new(data).ec_level(ecl).build().unwrap();
        let (meta, decoded) = QRReader::new().read(&qr.to_grid(), qr.width()).expect("Failed to read QR");
        assert_eq!(meta, qr.metadata());
        decoded
    }

    proptest! {
        #[test]
        fn proptest_numeric(params in qr_strategy("[0-9]".to_string(), 600)) {
            let (ecl, data) = params;
            let decoded = round_trip(data.as_bytes(), ecl);
            prop_assert_eq!(data.as_bytes(), &decoded[..]);
        }

        #[test]
        fn proptest_alphanumeric(params in qr_strategy(r"[0-9A-Z $%*+\-./:]".to_string(), 400)) {
            let (ecl, data) = params;
            let decoded = round_trip(data.as_bytes(), ecl);
            prop_assert_eq!(data.as_bytes(), &decoded[..]);
        }

        #[test]
        fn proptest_bytes(data in prop::collection::vec(any::<u8>(), 0..300), ecl in ec_level_strategy()) {
            let decoded = round_trip(&data, ecl);
            prop_assert_eq!(data, decoded);
        }

        #[test]
        fn proptest_text(data in "\\PC{0,100}", ecl in ec_level_strategy()) {
            let decoded = round_trip(data.as_bytes(), ecl);
            prop_assert_eq!(data, decode_text(&decoded));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        #[ignore]
        fn proptest_full_capacity(params in qr_strategy("[0-9]".to_string(), 3057)) {
            let (ecl, data) = params;
            let decoded = round_trip(data.as_bytes(), ecl);
            prop_assert_eq!(data.as_bytes(), &decoded[..]);
        }
    }
}

#[cfg(test)]
mod qr_tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    use qrsymbol::{
        decode_text, Color, ECLevel, MaskPattern, Module, QRBuilder, QRError, QRReader, Version, QR,
    };

    fn read(qr: &QR) -> Vec<u8> {
        let _ = env_logger::builder().is_test(true).try_init();
        let (meta, decoded) = QRReader::new().read(&qr.to_grid(), qr.width()).expect("Failed to read QR");
        assert_eq!(meta, qr.metadata());
        decoded
    }

    #[test_case("Hello, world!🌎".to_string(), 1, ECLevel::L; "test_qr_1")]
    #[test_case("TEST".to_string(), 1, ECLevel::M; "test_qr_2")]
    #[test_case("12345".to_string(), 1, ECLevel::Q; "test_qr_3")]
    #[test_case("OK".to_string(), 1, ECLevel::H; "test_qr_4")]
    #[test_case("B3@j🎮#Z%8v🍣K!🔑3zC^8📖&r💾F9*🔐b6🌼".repeat(3), 7, ECLevel::L; "test_qr_5")]
    #[test_case("A11111111111111".repeat(11), 7, ECLevel::M; "test_qr_6")]
    #[test_case("aAAAAAA1111111111111AAAAAAa".repeat(3), 7, ECLevel::Q; "test_qr_7")]
    #[test_case("1234567890".repeat(15), 7, ECLevel::H; "test_qr_8")]
    #[test_case("B3@j🎮#Z%8v🍣K!🔑3zC^8📖&r💾F9*🔐b6🌼".repeat(4), 10, ECLevel::L; "test_qr_9")]
    #[test_case("A11111111111111".repeat(20), 10, ECLevel::M; "test_qr_10")]
    #[test_case("aAAAAAAAAA1111111111111111AAAAAAAAAAa".repeat(4), 10, ECLevel::Q; "test_qr_11")]
    #[test_case("1234567890".repeat(28), 10, ECLevel::H; "test_qr_12")]
    #[test_case("B3@j🎮#Z%8v🍣K!🔑3zC^8📖&r💾F9*🔐b6🌼".repeat(22), 27, ECLevel::L; "test_qr_13")]
    #[test_case("A111111111111111".repeat(100), 27, ECLevel::M; "test_qr_14")]
    #[test_case("aAAAAAAAAA111111111111111111AAAAAAAAAAa".repeat(20), 27, ECLevel::Q; "test_qr_15")]
    #[test_case("1234567890".repeat(145), 27, ECLevel::H; "test_qr_16")]
    #[test_case("B3@j🎮#Z%8v🍣K!🔑3zC^8📖&r💾F9*🔐b6🌼".repeat(57), 40, ECLevel::L; "test_qr_17")]
    #[test_case("A111111111111111".repeat(97), 40, ECLevel::M; "test_qr_18")]
    #[test_case("aAAAAAAAAA111111111111111111AAAAAAAAAAa".repeat(42), 40, ECLevel::Q; "test_qr_19")]
    #[test_case("1234567890".repeat(305), 40, ECLevel::H; "test_qr_20")]
    #[test_case("aA00000298542515764186657331886415260738886433510273480049978764987230758543376676257538587037428591120694472658573041637".to_string(), 6, ECLevel::L; "test_qr_21")]
    fn test_qr(data: String, v: usize, ecl: ECLevel) {
        let ver = Version::new(v).unwrap();
        let qr = QRBuilder::new(data.as_bytes()).version(ver).ec_level(ecl).build().unwrap();
        assert_eq!(qr.version(), ver);

        let decoded = read(&qr);
        assert_eq!(data, decode_text(&decoded));
    }

    #[test_case(ECLevel::L, 40)]
    #[test_case(ECLevel::M, 40)]
    #[test_case(ECLevel::Q, 40)]
    #[test_case(ECLevel::H, 40)]
    fn test_qr_max_numeric(ecl: ECLevel, exp_ver: usize) {
        let max = match ecl {
            ECLevel::L => 7089,
            ECLevel::M => 5596,
            ECLevel::Q => 3993,
            ECLevel::H => 3057,
        };
        let data = "1234567890".repeat(max / 10 + 1)[..max].to_string();
        let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
        assert_eq!(*qr.version(), exp_ver);
        assert_eq!(data.as_bytes(), &read(&qr)[..]);

        let overflow = format!("{data}1");
        let res = QRBuilder::new(overflow.as_bytes()).ec_level(ecl).build();
        assert_eq!(res.err(), Some(QRError::CapacityExceeded));
    }

    #[test]
    fn test_qr_0() {
        let data = "000003102240522040101032134589200040100032256802000001000230031030100051322320302010102287757583444005058202946794230192593114436932953370175316685191098675305648442486981451187345202833326821009949644832254029455434265792710428622979190276282956185887462621840559174608893562970842263910702908981904037304248915".to_string();
        let ecl = ECLevel::M;

        let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();

        assert_eq!(data, decode_text(&read(&qr)));
    }

    #[test]
    fn test_empty_data() {
        let qr = QRBuilder::new(b"").build().unwrap();
        assert_eq!(*qr.version(), 1);
        assert!(read(&qr).is_empty());
    }

    #[test]
    fn test_latin1_fallback() {
        let data = b"caf\xe9";
        let qr = QRBuilder::new(data).ec_level(ECLevel::H).build().unwrap();
        let decoded = read(&qr);
        assert_eq!(decoded, data);
        assert_eq!(decode_text(&decoded), "café");
    }

    #[test]
    fn test_builder_reuse() {
        let mut builder = QRBuilder::new(b"first");
        builder.ec_level(ECLevel::Q).mask(MaskPattern::try_new(2).unwrap());
        let first = builder.build().unwrap();
        let second = builder.data(b"second").build().unwrap();
        assert_eq!(read(&first), b"first");
        assert_eq!(read(&second), b"second");
        assert_eq!(second.mask(), MaskPattern::try_new(2).ok());
    }

    #[test]
    fn test_every_mask_pattern() {
        for m in 0..8 {
            let mask = MaskPattern::try_new(m).unwrap();
            let qr = QRBuilder::new(b"masked").mask(mask).build().unwrap();
            assert_eq!(qr.mask(), Some(mask));
            assert_eq!(read(&qr), b"masked");
        }
        assert_eq!(MaskPattern::try_new(8), Err(QRError::InvalidMaskingPattern));
    }

    #[test]
    fn test_mask_selection_is_deterministic() {
        let data = "Deterministic mask selection".repeat(5);
        let first = QRBuilder::new(data.as_bytes()).build().unwrap();
        let second = QRBuilder::new(data.as_bytes()).build().unwrap();
        assert_eq!(first.mask(), second.mask());
        assert_eq!(first.to_grid(), second.to_grid());
    }

    // Each flipped data module lands in at most one codeword, so flipping no more
    // modules than a block can correct always recovers
    #[test_case(1, ECLevel::L)]
    #[test_case(5, ECLevel::Q)]
    #[test_case(10, ECLevel::H)]
    #[test_case(25, ECLevel::M)]
    fn test_qr_corrupted_within_capacity(v: usize, ecl: ECLevel) {
        let ver = Version::new(v).unwrap();
        let data = "Corrupted symbol";
        let mut rng = StdRng::seed_from_u64(v as u64);
        let w = ver.width() as i16;

        for _ in 0..10 {
            let mut qr = QRBuilder::new(data.as_bytes()).version(ver).ec_level(ecl).build().unwrap();
            let mut flips = ver.ecc_per_block(ecl) / 2;
            while flips > 0 {
                let (r, c) = (rng.random_range(0..w), rng.random_range(0..w));
                if let Module::Data(clr) = qr.get(r, c) {
                    qr.set(r, c, Module::Data(!clr));
                    flips -= 1;
                }
            }
            let (_, decoded) = QRReader::new().read(&qr.to_grid(), qr.width()).unwrap();
            assert_eq!(data.as_bytes(), &decoded[..]);
        }
    }

    #[test]
    fn test_qr_corrupted_beyond_capacity() {
        let ver = Version::new(3).unwrap();
        let data = "Too many errors";
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let w = ver.width() as i16;

        for _ in 0..10 {
            let mut qr = QRBuilder::new(data.as_bytes()).version(ver).ec_level(ECLevel::L).build().unwrap();
            for _ in 0..200 {
                let (r, c) = (rng.random_range(0..w), rng.random_range(0..w));
                if let Module::Data(clr) = qr.get(r, c) {
                    qr.set(r, c, Module::Data(!clr));
                }
            }
            let res = QRReader::new().read(&qr.to_grid(), qr.width());
            assert!(res.map(|(_, d)| d != data.as_bytes()).unwrap_or(true));
        }
    }

    #[test]
    fn test_qr_invalid_grid() {
        let grid = vec![Color::Light; 100];
        assert_eq!(QRReader::new().read(&grid, 10).err(), Some(QRError::InvalidGridSize(10)));
        assert_eq!(QRReader::new().read(&grid, 21).err(), Some(QRError::InvalidGridSize(100)));
    }
}
