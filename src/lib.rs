//! # qrsymbol
//!
//! A Rust library for encoding bytes into QR symbols and decoding sampled symbols back,
//! with Reed-Solomon error correction over GF(256).
//!
//! The library works on abstract module grids. Rasterizing a finished symbol and
//! sampling one from a camera frame are left to the caller.
//!
//! ## Features
//!
//! - **QR Code Generation**: Build symbols with a chosen or automatically fitted version,
//!   error correction level, character mode and mask
//! - **QR Code Reading**: Decode a sampled row major grid of dark and light modules
//! - **Reed-Solomon Error Correction**: Blocks are interleaved and corrected per level (L, M, Q, H)
//! - **Metadata Recovery**: BCH coded format & version info with fallback to the redundant copy
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrsymbol::{Color, QRBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - provide only data, all other settings are automatically chosen
//! let qr = QRBuilder::new(b"Hello, World!").build()?;
//!
//! // Row major modules, ready for any renderer. Quiet zone is not included.
//! let grid = qr.to_grid();
//! assert_eq!(grid.len(), qr.width() * qr.width());
//! let dark = grid.iter().filter(|&&c| c == Color::Dark).count();
//! assert!(dark > 0);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrsymbol::{ECLevel, MaskPattern, Mode, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = "HELLO WORLD";
//! let qr = QRBuilder::new(data.as_bytes())
//!     .version(Version::new(2)?)      // QR version (size) - if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)           // Error correction level - if not provided, defaults to ECLevel::M
//!     .mode(Mode::Alphanumeric)       // Character mode - if not provided, picks the most compact mode
//!     .mask(MaskPattern::try_new(3)?) // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! println!("{}", qr.metadata());
//! # Ok(())
//! # }
//! ```
//!
//! ### Reading a QR Code
//!
//! ```rust
//! use qrsymbol::{decode_text, QRBuilder, QRReader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("Hello, world! 🌎".as_bytes()).build()?;
//!
//! let (metadata, message) = QRReader::new().read(&qr.to_grid(), qr.width())?;
//! assert_eq!(metadata, qr.metadata());
//! assert_eq!(decode_text(&message), "Hello, world! 🌎");
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ### Character Modes
//! - **Numeric**: Digits 0-9, 3 digits in 10 bits
//! - **Alphanumeric**: Digits, uppercase letters and ` $%*+-./:`, 2 characters in 11 bits
//! - **Byte**: Any byte, 8 bits each
//!
//! ## Cargo Features
//!
//! - **parallel**: Evaluates the 8 mask candidates concurrently with `rayon`
//! - **benchmark**: Enables the codec benchmark target

#![allow(
    clippy::items_after_test_module,
    clippy::suspicious_arithmetic_impl,
    clippy::suspicious_op_assign_impl
)]

pub mod builder;
pub(crate) mod common;
pub mod reader;

pub use builder::{Module, QRBuilder, QR};
pub use common::codec::{decode_text, Mode};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Metadata, Version};
pub use reader::{DeModule, DeQR, QRReader};
