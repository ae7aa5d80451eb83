//! Wire types and field numbers
//!
//! The tag prefix of every record packs a field number and a wire type
//! into a single varint: `(field << 3) | wire_type`. This module holds
//! both halves: the `WireType` enumeration (which must stay in sync
//! with the Protocol Buffers encoding documentation) and the
//! `FieldNumber` coercion trait that lets callers name their fields
//! with an enum instead of magic integers.

/// Smallest legal field number
pub const MIN_FIELD_NUMBER: u32 = 1;

/// Largest legal field number
///
/// Out of the 32 bits of a tag, 29 are reserved for the field number:
/// 2^29 - 1 = 536,870,911.
pub const MAX_FIELD_NUMBER: u32 = 536_870_911;

/// Protocol Buffers wire type (low 3 bits of a tag)
///
/// `StartGroup` and `EndGroup` are deprecated proto2 codes; they are
/// defined for completeness of the numeric space but the emitter
/// refuses to produce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    /// Variable-length base-128 integer
    VarInt = 0,
    /// Fixed 8-byte little-endian payload
    I64 = 1,
    /// Varint byte count followed by that many raw bytes
    LengthDelimited = 2,
    /// Deprecated proto2 group start (never emitted)
    StartGroup = 3,
    /// Deprecated proto2 group end (never emitted)
    EndGroup = 4,
    /// Fixed 4-byte little-endian payload
    I32 = 5,
}

impl WireType {
    /// Parse a wire type from the low 3 bits of a tag
    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::VarInt),
            1 => Some(Self::I64),
            2 => Some(Self::LengthDelimited),
            3 => Some(Self::StartGroup),
            4 => Some(Self::EndGroup),
            5 => Some(Self::I32),
            _ => None,
        }
    }

    /// Convert to the raw 3-bit tag code
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether the emitter may produce tags of this wire type
    ///
    /// Group codes are valid on the wire but are a non-goal here.
    #[inline]
    #[must_use]
    pub const fn is_emittable(self) -> bool {
        !matches!(self, Self::StartGroup | Self::EndGroup)
    }

    /// Get the documentation mnemonic of this wire type
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VarInt => "VARINT",
            Self::I64 => "I64",
            Self::LengthDelimited => "LEN",
            Self::StartGroup => "SGROUP",
            Self::EndGroup => "EGROUP",
            Self::I32 => "I32",
        }
    }
}

impl std::fmt::Display for WireType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Conversion from a caller-side field name to its wire number
///
/// Every emitting method takes `impl FieldNumber`, so plain `u32`
/// literals work out of the box, and a message's fields can be named
/// by an enum with a one-line impl:
///
/// ```
/// use pbwire::FieldNumber;
///
/// #[derive(Clone, Copy)]
/// #[repr(u32)]
/// enum Person {
///     Name = 1,
///     Id = 2,
/// }
///
/// impl FieldNumber for Person {
///     fn number(self) -> u32 {
///         self as u32
///     }
/// }
/// ```
///
/// Range validation happens at emission time, not here: numbers
/// outside `MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER` are rejected with
/// [`EncodeError::InvalidFieldNumber`](crate::EncodeError).
pub trait FieldNumber: Copy {
    /// The wire-level field number
    fn number(self) -> u32;
}

impl FieldNumber for u32 {
    #[inline]
    fn number(self) -> u32 {
        self
    }
}

impl FieldNumber for i32 {
    /// Negative numbers wrap into the invalid range and are rejected
    /// at emission time.
    #[inline]
    fn number(self) -> u32 {
        self as u32
    }
}
