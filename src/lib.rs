pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod format;
pub mod parse;
pub mod units;

// Re-export commonly used types
pub use config::Config;
pub use converter::{
    convert_byte_unit, convert_bytes, from_bytes, to_bytes, ConversionResult, ConverterOptions,
};
pub use error::{ByteError, Result, UnitRole};
pub use format::format_bytes;
pub use parse::parse_bytes;
pub use units::{Base, ByteUnit};
