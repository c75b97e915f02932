//! Wei conversions for report output.
//!
//! Clients hand out amounts in one of two shapes: native `U256` integers, or
//! wrapped big-number objects (`{"_hex": "0x..", "_isBigNumber": true}`) that
//! must be converted explicitly. The shape is chosen once at startup and every
//! figure in a report goes through the same [`UnitFormatter`].

use std::str::FromStr;

use ethers_core::types::U256;
use serde::{Deserialize, Serialize};

pub const ETHER_DECIMALS: u32 = 18;
pub const GWEI_DECIMALS: u32 = 9;

#[derive(thiserror::Error, Debug)]
pub enum UnitsError {
    #[error("unit conversion failed: {0}")]
    Conversion(String),
    #[error("invalid big number hex `{0}`")]
    InvalidHex(String),
    #[error("formatted amount `{0}` is not a number")]
    InvalidNumber(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ClientShape {
    /// Amounts arrive as native integers.
    #[default]
    Native,
    /// Amounts arrive as wrapped big-number objects.
    Legacy,
}

impl FromStr for ClientShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(s, true)
    }
}

impl ClientShape {
    pub fn formatter(self) -> Box<dyn UnitFormatter> {
        match self {
            ClientShape::Native => Box::new(NativeUnits),
            ClientShape::Legacy => Box::new(WrappedUnits),
        }
    }
}

pub trait UnitFormatter: Send + Sync {
    /// Decimal rendering of `value / 10^decimals`, with trailing fractional
    /// zeros removed but at least one fractional digit kept.
    fn format_units(&self, value: U256, decimals: u32) -> Result<String, UnitsError>;

    fn format_ether(&self, value: U256) -> Result<String, UnitsError> {
        self.format_units(value, ETHER_DECIMALS)
    }

    /// Gwei rounded to exactly two decimals.
    fn format_gwei(&self, value: U256) -> Result<String, UnitsError> {
        to_fixed_2(&self.format_units(value, GWEI_DECIMALS)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeUnits;

impl UnitFormatter for NativeUnits {
    fn format_units(&self, value: U256, decimals: u32) -> Result<String, UnitsError> {
        ethers_core::utils::format_units(value, decimals)
            .map(|s| trim_fraction(&s))
            .map_err(|e| UnitsError::Conversion(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WrappedUnits;

impl UnitFormatter for WrappedUnits {
    fn format_units(&self, value: U256, decimals: u32) -> Result<String, UnitsError> {
        BigNumber::from(value).format_units(decimals)
    }
}

/// Wrapped big-number object as serialized by older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigNumber {
    #[serde(rename = "_hex")]
    pub hex: String,
    #[serde(rename = "_isBigNumber", default)]
    pub is_big_number: bool,
}

impl From<U256> for BigNumber {
    fn from(value: U256) -> Self {
        Self {
            hex: format!("0x{:x}", value),
            is_big_number: true,
        }
    }
}

impl BigNumber {
    pub fn to_u256(&self) -> Result<U256, UnitsError> {
        let digits = self
            .hex
            .strip_prefix("0x")
            .or_else(|| self.hex.strip_prefix("0X"))
            .unwrap_or(&self.hex);
        if digits.is_empty() {
            return Err(UnitsError::InvalidHex(self.hex.clone()));
        }
        U256::from_str_radix(digits, 16).map_err(|_| UnitsError::InvalidHex(self.hex.clone()))
    }

    pub fn format_units(&self, decimals: u32) -> Result<String, UnitsError> {
        if decimals > 77 {
            return Err(UnitsError::Conversion(format!(
                "{} decimals exceed U256 precision",
                decimals
            )));
        }
        let value = self.to_u256()?;
        let width = decimals as usize;
        let (whole, fraction) = value.div_mod(U256::exp10(width));
        if width == 0 {
            return Ok(format!("{}.0", whole));
        }
        Ok(trim_fraction(&format!(
            "{}.{:0>width$}",
            whole,
            fraction.to_string(),
            width = width
        )))
    }
}

/// `1.500` -> `1.5`, `2.000` -> `2.0`.
fn trim_fraction(s: &str) -> String {
    match s.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            let fraction = if fraction.is_empty() { "0" } else { fraction };
            format!("{}.{}", whole, fraction)
        }
        None => format!("{}.0", s),
    }
}

fn to_fixed_2(s: &str) -> Result<String, UnitsError> {
    let n: f64 = s
        .parse()
        .map_err(|_| UnitsError::InvalidNumber(s.to_string()))?;
    // Exact ties at the third decimal are odd multiples of 1/8 and round up;
    // `{:.2}` alone would round them to even.
    if (n * 8.0).fract() == 0.0 && (n * 4.0).fract() != 0.0 {
        let cents = (n * 100.0).ceil() as u64;
        return Ok(format!("{}.{:02}", cents / 100, cents % 100));
    }
    Ok(format!("{:.2}", n))
}
