use crate::error::{ByteError, Result};
use crate::format::{display_value, round_to};
use crate::units::{Base, ByteUnit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Options shared by every conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterOptions {
    /// Number of fractional digits kept after rounding
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Use 1024 between units instead of 1000
    #[serde(default)]
    pub binary: bool,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            binary: false,
        }
    }
}

fn default_precision() -> usize {
    2
}

impl ConverterOptions {
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    pub fn base(&self) -> Base {
        Base::from_binary(self.binary)
    }
}

/// A magnitude expressed in a specific unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Rounded magnitude in `unit`
    pub value: f64,

    pub unit: ByteUnit,

    /// `value` with trailing zeros trimmed, followed by the unit code
    pub formatted: String,
}

impl ConversionResult {
    fn new(raw: f64, unit: ByteUnit, precision: usize) -> Self {
        Self {
            value: round_to(raw, precision),
            unit,
            formatted: display_value(raw, precision, unit),
        }
    }

    fn zero() -> Self {
        Self {
            value: 0.0,
            unit: ByteUnit::B,
            formatted: String::from("0 B"),
        }
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

/// Validate a magnitude and return it with the sign of a negative zero cleared.
fn check_magnitude(amount: f64, negative: &'static str, non_finite: &'static str) -> Result<f64> {
    if amount < 0.0 {
        return Err(ByteError::InvalidArgument(negative));
    }
    if !amount.is_finite() {
        return Err(ByteError::InvalidArgument(non_finite));
    }
    Ok(amount + 0.0)
}

fn check_bytes(bytes: f64) -> Result<f64> {
    check_magnitude(
        bytes,
        "Bytes cannot be negative",
        "Bytes must be a finite number",
    )
}

fn check_value(value: f64) -> Result<f64> {
    check_magnitude(
        value,
        "Value cannot be negative",
        "Value must be a finite number",
    )
}

/// Largest unit whose size does not exceed `bytes`, `B` below one unit step.
fn best_fit_unit(bytes: f64, base: Base) -> ByteUnit {
    ByteUnit::ALL
        .into_iter()
        .rev()
        .find(|unit| unit.multiplier(base) <= bytes)
        .unwrap_or(ByteUnit::B)
}

/// Convert a raw byte count to the most appropriate unit.
///
/// Zero always yields `0 B`. Counts past the largest unit stay in `PB`.
pub fn convert_bytes(bytes: f64, options: &ConverterOptions) -> Result<ConversionResult> {
    let bytes = check_bytes(bytes)?;
    if bytes == 0.0 {
        return Ok(ConversionResult::zero());
    }

    let base = options.base();
    let unit = best_fit_unit(bytes, base);
    let value = bytes / unit.multiplier(base);

    Ok(ConversionResult::new(value, unit, options.precision))
}

/// Convert `value` expressed in `from` into `to`.
pub fn convert_byte_unit(
    value: f64,
    from: ByteUnit,
    to: ByteUnit,
    options: &ConverterOptions,
) -> Result<ConversionResult> {
    let value = check_value(value)?;

    let base = options.base();
    let bytes = value * from.multiplier(base);
    let converted = bytes / to.multiplier(base);

    Ok(ConversionResult::new(converted, to, options.precision))
}

/// Raw byte count for `value` in `unit`. The product is not rounded.
pub fn to_bytes(value: f64, unit: ByteUnit, options: &ConverterOptions) -> Result<f64> {
    let value = check_value(value)?;
    Ok(value * unit.multiplier(options.base()))
}

/// Express a raw byte count in a fixed `unit`.
pub fn from_bytes(bytes: f64, unit: ByteUnit, options: &ConverterOptions) -> Result<ConversionResult> {
    let bytes = check_bytes(bytes)?;
    let value = bytes / unit.multiplier(options.base());
    Ok(ConversionResult::new(value, unit, options.precision))
}
