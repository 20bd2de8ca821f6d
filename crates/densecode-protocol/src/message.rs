//! The two-bit classical message.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// One of the four two-bit messages Alice can send.
///
/// The string form lists the high bit first: `"10"` is high = 1, low = 0.
/// After decoding, the high bit lands in classical bit `c1` and the low bit
/// in `c0`, so the measured bitstring reads the same as the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Message(u8);

impl Message {
    /// Message "00".
    pub const ZERO_ZERO: Self = Self(0b00);
    /// Message "01".
    pub const ZERO_ONE: Self = Self(0b01);
    /// Message "10".
    pub const ONE_ZERO: Self = Self(0b10);
    /// Message "11".
    pub const ONE_ONE: Self = Self(0b11);

    /// Every message, in ascending order.
    pub const ALL: [Self; 4] = [
        Self::ZERO_ZERO,
        Self::ZERO_ONE,
        Self::ONE_ZERO,
        Self::ONE_ONE,
    ];

    /// Build a message from its two bits.
    pub fn from_bits(high: bool, low: bool) -> Self {
        Self((u8::from(high) << 1) | u8::from(low))
    }

    /// The first character of the message; selects the Z flip.
    pub fn high(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// The second character of the message; selects the X flip.
    pub fn low(self) -> bool {
        self.0 & 0b01 != 0
    }

    /// The message as a two-character bitstring.
    pub fn as_str(self) -> &'static str {
        match self.0 {
            0b00 => "00",
            0b01 => "01",
            0b10 => "10",
            _ => "11",
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "00" => Ok(Self::ZERO_ZERO),
            "01" => Ok(Self::ZERO_ONE),
            "10" => Ok(Self::ONE_ZERO),
            "11" => Ok(Self::ONE_ONE),
            other => Err(ProtocolError::InvalidMessage(other.to_string())),
        }
    }
}

impl TryFrom<String> for Message {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Message> for String {
    fn from(message: Message) -> Self {
        message.as_str().to_string()
    }
}
