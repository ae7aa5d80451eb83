//! Scalar value conversions
//!
//! One trait per wire category. The traits carry the compile-time
//! guarantees the wire format needs: nothing wider than 64 bits can
//! reach a varint field, nothing but 4-byte payloads can reach I32,
//! nothing outside signed 32-bit range can pose as an enum. A type
//! that doesn't implement the trait simply cannot be passed, so the
//! checks cost nothing at runtime.
//!
//! The signed-integer impls perform the sign extension the wire
//! format mandates: `-1i32` emitted as `int32` becomes the ten-byte
//! all-ones varint, exactly as if it had been an `i64`.

/// Values accepted by varint fields (`int32`, `int64`, `uint32`,
/// `uint64`, `bool`)
///
/// Signed impls sign-extend to 64 bits before the unsigned
/// reinterpretation.
pub trait VarIntValue: Copy {
    /// The 64-bit payload to varint-encode
    fn into_varint(self) -> u64;
}

impl VarIntValue for bool {
    #[inline]
    fn into_varint(self) -> u64 {
        u64::from(self)
    }
}

macro_rules! varint_unsigned {
    ($($ty:ty),*) => {
        $(impl VarIntValue for $ty {
            #[inline]
            fn into_varint(self) -> u64 {
                u64::from(self)
            }
        })*
    };
}

varint_unsigned!(u8, u16, u32);

impl VarIntValue for u64 {
    #[inline]
    fn into_varint(self) -> u64 {
        self
    }
}

macro_rules! varint_signed {
    ($($ty:ty),*) => {
        $(impl VarIntValue for $ty {
            // Sign-extend first, reinterpret second
            #[inline]
            fn into_varint(self) -> u64 {
                i64::from(self) as u64
            }
        })*
    };
}

varint_signed!(i8, i16, i32);

impl VarIntValue for i64 {
    #[inline]
    fn into_varint(self) -> u64 {
        self as u64
    }
}

/// Values accepted by ZigZag varint fields (`sint32`, `sint64`)
pub trait SignedVarIntValue: Copy {
    /// The signed 64-bit value to ZigZag-encode
    fn into_signed(self) -> i64;
}

macro_rules! signed_varint {
    ($($ty:ty),*) => {
        $(impl SignedVarIntValue for $ty {
            #[inline]
            fn into_signed(self) -> i64 {
                i64::from(self)
            }
        })*
    };
}

signed_varint!(i8, i16, i32, i64);

/// Values accepted by 4-byte fixed fields (`fixed32`, `sfixed32`,
/// `float`)
///
/// `f32` converts bit-preservingly; signed integers sign-extend to
/// the full 32 bits.
pub trait Fixed32Value: Copy {
    /// The 4-byte payload, as its unsigned bit pattern
    fn into_fixed32(self) -> u32;
}

macro_rules! fixed32_int {
    ($($ty:ty),*) => {
        $(impl Fixed32Value for $ty {
            #[inline]
            fn into_fixed32(self) -> u32 {
                self as u32
            }
        })*
    };
}

fixed32_int!(u8, u16, u32, i8, i16, i32);

impl Fixed32Value for f32 {
    #[inline]
    fn into_fixed32(self) -> u32 {
        self.to_bits()
    }
}

/// Values accepted by 8-byte fixed fields (`fixed64`, `sfixed64`,
/// `double`)
pub trait Fixed64Value: Copy {
    /// The 8-byte payload, as its unsigned bit pattern
    fn into_fixed64(self) -> u64;
}

macro_rules! fixed64_int {
    ($($ty:ty),*) => {
        $(impl Fixed64Value for $ty {
            #[inline]
            fn into_fixed64(self) -> u64 {
                self as u64
            }
        })*
    };
}

fixed64_int!(u8, u16, u32, u64, i8, i16, i32, i64);

impl Fixed64Value for f64 {
    #[inline]
    fn into_fixed64(self) -> u64 {
        self.to_bits()
    }
}

/// Values accepted by `enum` fields
///
/// Protobuf enums are `int32` on the wire, so only `i32` and narrower
/// integers qualify (`u32` does not: half its range overflows).
/// Caller-side enums get a one-line impl:
///
/// ```
/// use pbwire::EnumValue;
///
/// #[derive(Clone, Copy)]
/// #[repr(i32)]
/// enum Corpus {
///     Universal = 0,
///     Web = 1,
/// }
///
/// impl EnumValue for Corpus {
///     fn as_i32(self) -> i32 {
///         self as i32
///     }
/// }
/// ```
pub trait EnumValue: Copy {
    /// The enum's wire value
    fn as_i32(self) -> i32;
}

macro_rules! enum_int {
    ($($ty:ty),*) => {
        $(impl EnumValue for $ty {
            #[inline]
            fn as_i32(self) -> i32 {
                i32::from(self)
            }
        })*
    };
}

enum_int!(i8, i16, u8, u16);

impl EnumValue for i32 {
    #[inline]
    fn as_i32(self) -> i32 {
        self
    }
}
