use alloc::string::String;
use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

const PAIRS: usize = 6;
const TEXT_LEN: usize = PAIRS * 3 - 1;

/// Hardware address used as a device identity.
///
/// Accepts six hex pairs separated by `:` or `-`, e.g. `00:1A:C2:7B:00:47`.
/// The input text is kept as is, so two spellings of the same address are
/// distinct identities.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "docs", schema(value_type = String, example = "00:1A:C2:7B:00:47"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacAddressError {
    /// Input is not 17 bytes long
    Length(usize),
    /// Character at the given position is not a hex digit
    Digit(usize),
    /// Character at the given position is not `:` or `-`
    Separator(usize),
}

impl MacAddress {
    pub fn parse(value: &str) -> Result<Self, MacAddressError> {
        Self::validate(value)?;

        Ok(Self(String::from(value)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), MacAddressError> {
        let bytes = value.as_bytes();
        if bytes.len() != TEXT_LEN {
            return Err(MacAddressError::Length(bytes.len()));
        }

        for (index, byte) in bytes.iter().enumerate() {
            if index % 3 == 2 {
                if *byte != b':' && *byte != b'-' {
                    return Err(MacAddressError::Separator(index));
                }
            } else if !byte.is_ascii_hexdigit() {
                return Err(MacAddressError::Digit(index));
            }
        }

        Ok(())
    }
}

impl FromStr for MacAddress {
    type Err = MacAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = MacAddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::validate(&value)?;

        Ok(Self(value))
    }
}

impl From<MacAddress> for String {
    fn from(value: MacAddress) -> Self {
        value.0
    }
}

impl AsRef<str> for MacAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for MacAddress {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Display for MacAddressError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            MacAddressError::Length(len) => {
                write!(f, "expected {TEXT_LEN} bytes, found {len}")
            }
            MacAddressError::Digit(index) => write!(f, "expected hex digit at position {index}"),
            MacAddressError::Separator(index) => {
                write!(f, "expected ':' or '-' at position {index}")
            }
        }
    }
}

impl core::error::Error for MacAddressError {}
