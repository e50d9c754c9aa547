use crate::converter::{to_bytes, ConverterOptions};
use crate::error::{ByteError, Result};
use crate::units::ByteUnit;
use regex::Regex;
use std::sync::OnceLock;

const BYTES_REGEX: &str = r"(?i)^([\d.]+)\s*([KMGTP]?B|[KMGTP]?iB)$";

fn bytes_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BYTES_REGEX).expect("invalid byte size regex"))
}

/// Map an upper-cased unit token to its unit. Binary spellings share the
/// decimal unit; the base is chosen separately.
fn lookup_unit(token: &str) -> Option<ByteUnit> {
    let unit = match token {
        "B" => ByteUnit::B,
        "KB" | "KIB" => ByteUnit::KB,
        "MB" | "MIB" => ByteUnit::MB,
        "GB" | "GIB" => ByteUnit::GB,
        "TB" | "TIB" => ByteUnit::TB,
        "PB" | "PIB" => ByteUnit::PB,
        _ => return None,
    };
    Some(unit)
}

/// Parse a human-readable size into a byte count.
///
/// Supported examples:
/// - `1.5 MB`, `1.5MB`
/// - `1024KB`
/// - `1 KiB` (an `iB` suffix always uses the binary base)
pub fn parse_bytes(input: &str, options: &ConverterOptions) -> Result<f64> {
    let invalid = || ByteError::InvalidFormat(input.to_string());

    let caps = bytes_regex().captures(input.trim()).ok_or_else(invalid)?;
    let (Some(number), Some(token)) = (caps.get(1), caps.get(2)) else {
        return Err(invalid());
    };

    let value: f64 = number.as_str().parse().map_err(|_| invalid())?;
    let token = token.as_str().to_ascii_uppercase();
    let unit = lookup_unit(&token).ok_or_else(|| ByteError::UnknownUnit(token.clone()))?;

    let binary = options.binary || token.ends_with("IB");
    to_bytes(value, unit, &options.with_binary(binary))
}
