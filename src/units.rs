use crate::error::{ByteError, Result, UnitRole};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Magnitude units, ordered from smallest to largest.
///
/// The position of a unit in [`ByteUnit::ALL`] is the power of the base it
/// stands for, so `KB` is `base^1` and `PB` is `base^5`.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ByteUnit {
    B,
    KB,
    MB,
    GB,
    TB,
    PB,
}

impl ByteUnit {
    pub const ALL: [ByteUnit; 6] = [
        ByteUnit::B,
        ByteUnit::KB,
        ByteUnit::MB,
        ByteUnit::GB,
        ByteUnit::TB,
        ByteUnit::PB,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::B => "B",
            Self::KB => "KB",
            Self::MB => "MB",
            Self::GB => "GB",
            Self::TB => "TB",
            Self::PB => "PB",
        }
    }

    /// Number of bytes in one of this unit.
    pub fn multiplier(self, base: Base) -> f64 {
        base.value().powi(self.index() as i32)
    }

    /// Parse a unit code, reporting failures against the given argument role.
    pub fn parse_as(input: &str, role: UnitRole) -> Result<Self> {
        let code = input.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|unit| unit.code() == code)
            .ok_or_else(|| ByteError::InvalidUnit {
                role,
                unit: input.to_string(),
            })
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ByteUnit {
    type Err = ByteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_as(s, UnitRole::Any)
    }
}

/// Multiplier between two neighbouring units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Base {
    #[default]
    Decimal,
    Binary,
}

impl Base {
    pub fn from_binary(binary: bool) -> Self {
        if binary {
            Self::Binary
        } else {
            Self::Decimal
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Self::Decimal => 1000.0,
            Self::Binary => 1024.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_order_matches_index() {
        for (idx, unit) in ByteUnit::ALL.iter().enumerate() {
            assert_eq!(unit.index(), idx);
        }
        assert!(ByteUnit::B < ByteUnit::KB);
        assert!(ByteUnit::TB < ByteUnit::PB);
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(ByteUnit::B.multiplier(Base::Decimal), 1.0);
        assert_eq!(ByteUnit::KB.multiplier(Base::Binary), 1024.0);
        assert_eq!(ByteUnit::PB.multiplier(Base::Decimal), 1e15);
        assert_eq!(ByteUnit::PB.multiplier(Base::Binary), 1125899906842624.0);
    }

    #[test]
    fn test_base_selection() {
        assert_eq!(Base::from_binary(true).value(), 1024.0);
        assert_eq!(Base::from_binary(false).value(), 1000.0);
        assert_eq!(Base::default(), Base::Decimal);
    }

    #[test]
    fn test_parse_unit_codes() {
        assert_eq!("KB".parse::<ByteUnit>().unwrap(), ByteUnit::KB);
        assert_eq!("mb".parse::<ByteUnit>().unwrap(), ByteUnit::MB);
        assert_eq!(" pb ".parse::<ByteUnit>().unwrap(), ByteUnit::PB);

        let err = "INVALID".parse::<ByteUnit>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid unit: INVALID");

        let err = ByteUnit::parse_as("KiB", UnitRole::Target).unwrap_err();
        assert_eq!(err.to_string(), "Invalid target unit: KiB");
    }

    #[test]
    fn test_role_is_available_from_crate_root() {
        let err = ByteUnit::parse_as("XB", crate::UnitRole::Source).unwrap_err();
        assert_eq!(err.to_string(), "Invalid source unit: XB");
    }

    #[test]
    fn test_unit_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&ByteUnit::GB).unwrap(), "\"GB\"");
        let unit: ByteUnit = serde_json::from_str("\"TB\"").unwrap();
        assert_eq!(unit, ByteUnit::TB);
    }
}
