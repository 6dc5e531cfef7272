use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length unit in which pieces and containers are expressed.
/// Every unit maps onto millimeters with a fixed multiplicative factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Mm,
    Cm,
    M,
    In,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Mm, Unit::Cm, Unit::M, Unit::In];

    /// Number of millimeters in one `self`.
    pub const fn factor(self) -> f64 {
        match self {
            Unit::Mm => 1.0,
            Unit::Cm => 10.0,
            Unit::M => 1000.0,
            Unit::In => 25.4,
        }
    }

    pub fn to_base(self, value: f64) -> f64 {
        value * self.factor()
    }

    pub fn from_base(self, value_mm: f64) -> f64 {
        value_mm / self.factor()
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::M => "m",
            Unit::In => "in",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Unit::Mm => "millimeters",
            Unit::Cm => "centimeters",
            Unit::M => "meters",
            Unit::In => "inches",
        }
    }
}

/// Converts `value` expressed in `unit` to millimeters.
pub fn to_base(value: f64, unit: Unit) -> f64 {
    unit.to_base(value)
}

/// Converts `value_mm` to `unit`.
pub fn from_base(value_mm: f64, unit: Unit) -> f64 {
    unit.from_base(value_mm)
}

/// Converts `value` from one unit to another, going through the millimeter base.
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    match from == to {
        true => value,
        false => to.from_base(from.to_base(value)),
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown length unit {0:?}, expected one of: mm, cm, m, in")]
pub struct UnknownUnit(pub String);

impl FromStr for Unit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" => Ok(Unit::Mm),
            "cm" => Ok(Unit::Cm),
            "m" => Ok(Unit::M),
            "in" => Ok(Unit::In),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use test_case::test_case;

    #[test_case(Unit::Mm, 1.0; "mm")]
    #[test_case(Unit::Cm, 10.0; "cm")]
    #[test_case(Unit::M, 1000.0; "m")]
    #[test_case(Unit::In, 25.4; "in")]
    fn one_unit_in_millimeters(unit: Unit, expected_mm: f64) {
        assert_eq!(to_base(1.0, unit), expected_mm);
        assert!(approx_eq!(f64, from_base(expected_mm, unit), 1.0));
    }

    #[test]
    fn convert_goes_through_base() {
        assert!(approx_eq!(f64, convert(2.0, Unit::In, Unit::Cm), 5.08));
        assert!(approx_eq!(f64, convert(150.0, Unit::Cm, Unit::M), 1.5));
        assert_eq!(convert(7.0, Unit::Mm, Unit::Mm), 7.0);
    }

    #[test]
    fn parse_and_serde_agree() {
        for unit in Unit::ALL {
            let parsed: Unit = unit.symbol().parse().unwrap();
            assert_eq!(parsed, unit);
            let json = serde_json::to_string(&unit).unwrap();
            assert_eq!(json, format!("\"{}\"", unit.symbol()));
        }
        assert!("yard".parse::<Unit>().is_err());
        assert!(serde_json::from_str::<Unit>("\"ft\"").is_err());
    }
}
