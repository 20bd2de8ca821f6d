//! Qubit and classical bit types.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! wire_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Bit position of this wire; wire 0 is the least significant.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                $name(id)
            }
        }
    };
}

wire_id!(
    /// Identifier of a qubit; also its bit in a basis-state index.
    QubitId,
    "q"
);

wire_id!(
    /// Identifier of a classical bit; also its bit in an outcome value.
    ClbitId,
    "c"
);

/// A circuit wire, optionally declared as slot `index` of a named register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bit<I> {
    /// The wire identifier.
    pub id: I,
    /// Register name and slot, when the wire came from `add_qreg`/`add_creg`.
    pub register: Option<(String, u32)>,
}

/// A quantum wire.
pub type Qubit = Bit<QubitId>;
/// A classical wire.
pub type Clbit = Bit<ClbitId>;

impl<I> Bit<I> {
    /// A wire outside any register.
    pub fn new(id: I) -> Self {
        Self { id, register: None }
    }

    /// A wire at `index` of register `register`.
    pub fn with_register(id: I, register: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            register: Some((register.into(), index)),
        }
    }
}

impl<I: fmt::Display> fmt::Display for Bit<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.register {
            Some((name, index)) => write!(f, "{name}[{index}]"),
            None => self.id.fmt(f),
        }
    }
}
