//! Typed emitting facade
//!
//! One method per protobuf scalar type, named after the schema syntax
//! so hand-written serializers read like the `.proto` they implement:
//! `emit_int32`, `emit_sint64`, `emit_fixed32`, `emit_string`, and so
//! on. Each category comes in singular, `_repeated` (one tagged
//! record per element) and, where the wire type supports packing,
//! `_packed` form. `string`, `bytes` and submessages have no packed
//! form; those methods simply do not exist.
//!
//! Width rules are enforced by the parameter types: `emit_int32`
//! takes an `i32`, so a value that doesn't fit can't be passed.
//! Negative `int32`/`int64`/`enum` values sign-extend to 64 bits and
//! occupy ten bytes on the wire, per the encoding rules.
//!
//! ```
//! use pbwire::Builder;
//!
//! let mut builder = Builder::new(Vec::new());
//! builder.emit_string(1u32, "test").unwrap();
//! builder.emit_int32_packed(2u32, &[0, -1, 65537]).unwrap();
//! let message = builder.into_sink();
//! ```

use crate::Result;
use crate::emitter::Emitter;
use crate::scalar::EnumValue;
use crate::sink::ByteSink;
use crate::varint::varint_len;
use crate::wire::{FieldNumber, WireType};

/// High-level Protocol Buffers message builder
///
/// A thin facade over [`Emitter`] that maps each protobuf scalar
/// type to its wire type. Holds no state besides the sink cursor;
/// fields may be emitted in any order and any number of times, which
/// is exactly what the wire format allows.
#[derive(Debug)]
pub struct Builder<S> {
    emitter: Emitter<S>,
}

impl<S: ByteSink> Builder<S> {
    /// Create a builder over the given sink
    #[inline]
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            emitter: Emitter::new(sink),
        }
    }

    /// Consume the builder and reclaim the sink
    #[inline]
    pub fn into_sink(self) -> S {
        self.emitter.into_sink()
    }

    /// Borrow the sink
    #[inline]
    pub fn sink(&self) -> &S {
        self.emitter.sink()
    }

    // double / float

    /// Emit a `double` field (I64 wire type, bit-preserving)
    pub fn emit_double(&mut self, field: impl FieldNumber, value: f64) -> Result<()> {
        self.emitter.emit_i64(field, value)
    }

    /// Emit an unpacked repeated `double` field
    pub fn emit_double_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = f64>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_i64(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `double` field
    pub fn emit_double_packed(&mut self, field: impl FieldNumber, values: &[f64]) -> Result<()> {
        self.emitter.emit_i64_packed(field, values)
    }

    /// Emit a `float` field (I32 wire type, bit-preserving)
    pub fn emit_float(&mut self, field: impl FieldNumber, value: f32) -> Result<()> {
        self.emitter.emit_i32(field, value)
    }

    /// Emit an unpacked repeated `float` field
    pub fn emit_float_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = f32>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_i32(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `float` field
    pub fn emit_float_packed(&mut self, field: impl FieldNumber, values: &[f32]) -> Result<()> {
        self.emitter.emit_i32_packed(field, values)
    }

    // int32 / int64

    /// Emit an `int32` field
    ///
    /// Negative values sign-extend to 64 bits and always occupy ten
    /// bytes; `sint32` is the compact choice for signed data.
    pub fn emit_int32(&mut self, field: impl FieldNumber, value: i32) -> Result<()> {
        self.emitter.emit_varint(field, value)
    }

    /// Emit an unpacked repeated `int32` field
    pub fn emit_int32_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = i32>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_varint(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `int32` field
    pub fn emit_int32_packed(&mut self, field: impl FieldNumber, values: &[i32]) -> Result<()> {
        self.emitter.emit_varint_packed(field, values)
    }

    /// Emit an `int64` field
    pub fn emit_int64(&mut self, field: impl FieldNumber, value: i64) -> Result<()> {
        self.emitter.emit_varint(field, value)
    }

    /// Emit an unpacked repeated `int64` field
    pub fn emit_int64_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = i64>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_varint(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `int64` field
    pub fn emit_int64_packed(&mut self, field: impl FieldNumber, values: &[i64]) -> Result<()> {
        self.emitter.emit_varint_packed(field, values)
    }

    // uint32 / uint64

    /// Emit a `uint32` field
    pub fn emit_uint32(&mut self, field: impl FieldNumber, value: u32) -> Result<()> {
        self.emitter.emit_varint(field, value)
    }

    /// Emit an unpacked repeated `uint32` field
    pub fn emit_uint32_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = u32>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_varint(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `uint32` field
    pub fn emit_uint32_packed(&mut self, field: impl FieldNumber, values: &[u32]) -> Result<()> {
        self.emitter.emit_varint_packed(field, values)
    }

    /// Emit a `uint64` field
    pub fn emit_uint64(&mut self, field: impl FieldNumber, value: u64) -> Result<()> {
        self.emitter.emit_varint(field, value)
    }

    /// Emit an unpacked repeated `uint64` field
    pub fn emit_uint64_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = u64>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_varint(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `uint64` field
    pub fn emit_uint64_packed(&mut self, field: impl FieldNumber, values: &[u64]) -> Result<()> {
        self.emitter.emit_varint_packed(field, values)
    }

    // sint32 / sint64

    /// Emit a `sint32` field (ZigZag varint)
    ///
    /// Small magnitudes of either sign encode compactly: `-1` is one
    /// payload byte, unlike the ten bytes `int32` would spend.
    pub fn emit_sint32(&mut self, field: impl FieldNumber, value: i32) -> Result<()> {
        self.emitter.emit_signed_varint(field, value)
    }

    /// Emit an unpacked repeated `sint32` field
    pub fn emit_sint32_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = i32>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_signed_varint(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `sint32` field
    pub fn emit_sint32_packed(&mut self, field: impl FieldNumber, values: &[i32]) -> Result<()> {
        self.emitter.emit_signed_varint_packed(field, values)
    }

    /// Emit a `sint64` field (ZigZag varint)
    pub fn emit_sint64(&mut self, field: impl FieldNumber, value: i64) -> Result<()> {
        self.emitter.emit_signed_varint(field, value)
    }

    /// Emit an unpacked repeated `sint64` field
    pub fn emit_sint64_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = i64>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_signed_varint(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `sint64` field
    pub fn emit_sint64_packed(&mut self, field: impl FieldNumber, values: &[i64]) -> Result<()> {
        self.emitter.emit_signed_varint_packed(field, values)
    }

    // fixed32 / fixed64

    /// Emit a `fixed32` field (4 little-endian bytes)
    pub fn emit_fixed32(&mut self, field: impl FieldNumber, value: u32) -> Result<()> {
        self.emitter.emit_i32(field, value)
    }

    /// Emit an unpacked repeated `fixed32` field
    pub fn emit_fixed32_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = u32>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_i32(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `fixed32` field
    pub fn emit_fixed32_packed(&mut self, field: impl FieldNumber, values: &[u32]) -> Result<()> {
        self.emitter.emit_i32_packed(field, values)
    }

    /// Emit a `fixed64` field (8 little-endian bytes)
    pub fn emit_fixed64(&mut self, field: impl FieldNumber, value: u64) -> Result<()> {
        self.emitter.emit_i64(field, value)
    }

    /// Emit an unpacked repeated `fixed64` field
    pub fn emit_fixed64_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = u64>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_i64(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `fixed64` field
    pub fn emit_fixed64_packed(&mut self, field: impl FieldNumber, values: &[u64]) -> Result<()> {
        self.emitter.emit_i64_packed(field, values)
    }

    // sfixed32 / sfixed64

    /// Emit an `sfixed32` field (two's complement, 4 little-endian
    /// bytes)
    pub fn emit_sfixed32(&mut self, field: impl FieldNumber, value: i32) -> Result<()> {
        self.emitter.emit_i32(field, value)
    }

    /// Emit an unpacked repeated `sfixed32` field
    pub fn emit_sfixed32_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = i32>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_i32(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `sfixed32` field
    pub fn emit_sfixed32_packed(&mut self, field: impl FieldNumber, values: &[i32]) -> Result<()> {
        self.emitter.emit_i32_packed(field, values)
    }

    /// Emit an `sfixed64` field (two's complement, 8 little-endian
    /// bytes)
    pub fn emit_sfixed64(&mut self, field: impl FieldNumber, value: i64) -> Result<()> {
        self.emitter.emit_i64(field, value)
    }

    /// Emit an unpacked repeated `sfixed64` field
    pub fn emit_sfixed64_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = i64>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_i64(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `sfixed64` field
    pub fn emit_sfixed64_packed(&mut self, field: impl FieldNumber, values: &[i64]) -> Result<()> {
        self.emitter.emit_i64_packed(field, values)
    }

    // bool

    /// Emit a `bool` field
    pub fn emit_bool(&mut self, field: impl FieldNumber, value: bool) -> Result<()> {
        self.emitter.emit_varint(field, value)
    }

    /// Emit an unpacked repeated `bool` field
    pub fn emit_bool_repeated(
        &mut self,
        field: impl FieldNumber,
        values: impl IntoIterator<Item = bool>,
    ) -> Result<()> {
        for value in values {
            self.emitter.emit_varint(field, value)?;
        }
        Ok(())
    }

    /// Emit a packed repeated `bool` field (one byte per element)
    pub fn emit_bool_packed(&mut self, field: impl FieldNumber, values: &[bool]) -> Result<()> {
        self.emitter.emit_varint_packed(field, values)
    }

    // string / bytes / submessage

    /// Emit a `string` field
    ///
    /// The borrow is a plain byte view; `&str` already guarantees the
    /// UTF-8 the wire format mandates, and content is not
    /// re-validated.
    pub fn emit_string(&mut self, field: impl FieldNumber, value: &str) -> Result<()> {
        self.emitter.emit_len(field, value.as_bytes())
    }

    /// Emit an unpacked repeated `string` field
    pub fn emit_string_repeated<I>(&mut self, field: impl FieldNumber, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for value in values {
            self.emitter.emit_len(field, value.as_ref().as_bytes())?;
        }
        Ok(())
    }

    /// Emit a `bytes` field
    ///
    /// Accepts anything with contiguous byte storage (`&[u8]`,
    /// `Vec<u8>`, arrays, `Bytes`); there is no packed form for
    /// length-delimited data.
    pub fn emit_bytes(&mut self, field: impl FieldNumber, value: impl AsRef<[u8]>) -> Result<()> {
        self.emitter.emit_len(field, value.as_ref())
    }

    /// Emit an unpacked repeated `bytes` field
    pub fn emit_bytes_repeated<I>(&mut self, field: impl FieldNumber, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for value in values {
            self.emitter.emit_len(field, value.as_ref())?;
        }
        Ok(())
    }

    /// Emit an embedded message field
    ///
    /// The caller serializes the submessage first (typically with its
    /// own `Builder` over a scratch buffer) and passes the finished
    /// bytes; they go out as an ordinary length-delimited record. Map
    /// entries are submessages and take this path too.
    pub fn emit_message(&mut self, field: impl FieldNumber, value: impl AsRef<[u8]>) -> Result<()> {
        self.emitter.emit_len(field, value.as_ref())
    }

    /// Emit an unpacked repeated embedded message field
    pub fn emit_message_repeated<I>(&mut self, field: impl FieldNumber, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for value in values {
            self.emitter.emit_len(field, value.as_ref())?;
        }
        Ok(())
    }

    // enum

    /// Emit an `enum` field
    ///
    /// Enums are `int32` on the wire: the value sign-extends to 64
    /// bits, so negative enum values occupy ten bytes. The
    /// [`EnumValue`] bound is the compile-time guarantee that the
    /// value fits in signed 32 bits.
    pub fn emit_enum(&mut self, field: impl FieldNumber, value: impl EnumValue) -> Result<()> {
        self.emitter.emit_varint(field, value.as_i32())
    }

    /// Emit an unpacked repeated `enum` field
    pub fn emit_enum_repeated<I>(&mut self, field: impl FieldNumber, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: EnumValue,
    {
        for value in values {
            self.emitter.emit_varint(field, value.as_i32())?;
        }
        Ok(())
    }

    /// Emit a packed repeated `enum` field
    ///
    /// The payload is each element's `int32` value as a bare varint;
    /// the length prefix is the sum of the elements' varint lengths.
    pub fn emit_enum_packed(
        &mut self,
        field: impl FieldNumber,
        values: &[impl EnumValue],
    ) -> Result<()> {
        self.emitter.emit_tag(field, WireType::LengthDelimited)?;
        let payload_len: usize = values
            .iter()
            .map(|v| varint_len(i64::from(v.as_i32()) as u64))
            .sum();
        self.emitter.emit_varint_raw(payload_len as u64)?;
        for value in values {
            self.emitter
                .emit_varint_raw(i64::from(value.as_i32()) as u64)?;
        }
        Ok(())
    }
}
