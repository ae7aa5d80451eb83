//! Low-level wire-format primitives
//!
//! One method per wire type plus the packed variants. Every record is
//! a tag (field number and wire type packed into one varint) followed
//! by a payload whose shape the wire type dictates. The emitter is
//! stateless between calls: each method validates its arguments,
//! appends the record and returns, leaving the sink ready for the
//! next field.
//!
//! Validation happens before the first byte goes out, so a returned
//! usage error leaves the sink untouched. A sink failure mid-record
//! leaves the partial bytes in place; the stream is corrupt and the
//! emitter should be discarded.
//!
//! Most callers want the typed facade in [`crate::Builder`]; this
//! layer is public for code generators that already speak in wire
//! types.

use crate::Result;
use crate::error::EncodeError;
use crate::scalar::{Fixed32Value, Fixed64Value, SignedVarIntValue, VarIntValue};
use crate::sink::ByteSink;
use crate::varint::{varint_len, zigzag};
use crate::wire::{FieldNumber, MAX_FIELD_NUMBER, MIN_FIELD_NUMBER, WireType};

/// Protocol Buffers wire-format emitter
///
/// Generic over the destination; pass a sink by value to own it or a
/// `&mut` reference to borrow it for the emitter's lifetime:
///
/// ```
/// use pbwire::Emitter;
///
/// let mut buf = Vec::new();
/// let mut emitter = Emitter::new(&mut buf);
/// emitter.emit_varint(1u32, 150u64).unwrap();
/// assert_eq!(buf, [0x08, 0x96, 0x01]);
/// ```
#[derive(Debug)]
pub struct Emitter<S> {
    sink: S,
}

impl<S: ByteSink> Emitter<S> {
    /// Create an emitter over the given sink
    #[inline]
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Consume the emitter and reclaim the sink
    #[inline]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Borrow the sink
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Emit the tag of a record: `(field << 3) | wire_type`, as a
    /// varint
    ///
    /// # Errors
    ///
    /// `InvalidFieldNumber` when the field is outside
    /// `1..=536870911`; `InvalidWireType` when the wire type is a
    /// deprecated group code. Nothing is appended on error.
    pub fn emit_tag(&mut self, field: impl FieldNumber, wire_type: WireType) -> Result<()> {
        let number = field.number();
        if number < MIN_FIELD_NUMBER || number > MAX_FIELD_NUMBER {
            return Err(EncodeError::invalid_field_number(number));
        }
        if !wire_type.is_emittable() {
            return Err(EncodeError::InvalidWireType(wire_type));
        }
        let tag = (number << 3) | u32::from(wire_type.as_u8());
        self.emit_varint_raw(u64::from(tag))
    }

    /// Emit a bare varint: little-endian base-128, continuation bit
    /// on every non-terminal byte
    ///
    /// Always the shortest form; exactly one byte for zero, at most
    /// ten bytes for any 64-bit value.
    pub fn emit_varint_raw(&mut self, value: u64) -> Result<()> {
        let mut value = value;
        loop {
            let payload = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                return self.sink.put_byte(payload);
            }
            self.sink.put_byte(payload | 0x80)?;
        }
    }

    /// Emit a two's complement varint field
    ///
    /// Matches the `uint32`, `uint64`, `int32`, `int64` and `bool`
    /// categories. Signed inputs sign-extend to 64 bits first, so a
    /// negative `i32` still produces the ten-byte encoding the wire
    /// format requires.
    pub fn emit_varint(&mut self, field: impl FieldNumber, value: impl VarIntValue) -> Result<()> {
        self.emit_tag(field, WireType::VarInt)?;
        self.emit_varint_raw(value.into_varint())
    }

    /// Emit a ZigZag-encoded varint field
    ///
    /// Matches the `sint32` and `sint64` categories.
    pub fn emit_signed_varint(
        &mut self,
        field: impl FieldNumber,
        value: impl SignedVarIntValue,
    ) -> Result<()> {
        self.emit_tag(field, WireType::VarInt)?;
        self.emit_varint_raw(zigzag(value.into_signed()))
    }

    /// Emit a fixed 4-byte little-endian field
    ///
    /// Matches the `fixed32`, `sfixed32` and `float` categories;
    /// floats convert bit-preservingly.
    pub fn emit_i32(&mut self, field: impl FieldNumber, value: impl Fixed32Value) -> Result<()> {
        self.emit_tag(field, WireType::I32)?;
        self.sink.put_slice(&value.into_fixed32().to_le_bytes())
    }

    /// Emit a fixed 8-byte little-endian field
    ///
    /// Matches the `fixed64`, `sfixed64` and `double` categories.
    pub fn emit_i64(&mut self, field: impl FieldNumber, value: impl Fixed64Value) -> Result<()> {
        self.emit_tag(field, WireType::I64)?;
        self.sink.put_slice(&value.into_fixed64().to_le_bytes())
    }

    /// Emit a length-delimited record: varint byte count, then the
    /// raw bytes
    ///
    /// Matches `string`, `bytes`, submessages (caller provides the
    /// already-serialized bytes) and map entries (a map entry is
    /// itself a submessage).
    pub fn emit_len(&mut self, field: impl FieldNumber, bytes: &[u8]) -> Result<()> {
        self.emit_tag(field, WireType::LengthDelimited)?;
        self.emit_varint_raw(bytes.len() as u64)?;
        self.sink.put_slice(bytes)
    }

    /// Emit a packed run of two's complement varints
    ///
    /// One length-delimited record whose payload is the concatenation
    /// of the bare varints, no per-element tags. The length prefix is
    /// a fold over [`varint_len`]; no scratch buffer is involved.
    pub fn emit_varint_packed(
        &mut self,
        field: impl FieldNumber,
        values: &[impl VarIntValue],
    ) -> Result<()> {
        self.emit_tag(field, WireType::LengthDelimited)?;
        let payload_len: usize = values.iter().map(|v| varint_len(v.into_varint())).sum();
        self.emit_varint_raw(payload_len as u64)?;
        for value in values {
            self.emit_varint_raw(value.into_varint())?;
        }
        Ok(())
    }

    /// Emit a packed run of ZigZag-encoded varints
    pub fn emit_signed_varint_packed(
        &mut self,
        field: impl FieldNumber,
        values: &[impl SignedVarIntValue],
    ) -> Result<()> {
        self.emit_tag(field, WireType::LengthDelimited)?;
        let payload_len: usize = values
            .iter()
            .map(|v| varint_len(zigzag(v.into_signed())))
            .sum();
        self.emit_varint_raw(payload_len as u64)?;
        for value in values {
            self.emit_varint_raw(zigzag(value.into_signed()))?;
        }
        Ok(())
    }

    /// Emit a packed run of fixed 4-byte values
    ///
    /// The length prefix is `4 * n` by construction.
    pub fn emit_i32_packed(
        &mut self,
        field: impl FieldNumber,
        values: &[impl Fixed32Value],
    ) -> Result<()> {
        self.emit_tag(field, WireType::LengthDelimited)?;
        self.emit_varint_raw((values.len() * 4) as u64)?;
        for value in values {
            self.sink.put_slice(&value.into_fixed32().to_le_bytes())?;
        }
        Ok(())
    }

    /// Emit a packed run of fixed 8-byte values
    ///
    /// The length prefix is `8 * n` by construction.
    pub fn emit_i64_packed(
        &mut self,
        field: impl FieldNumber,
        values: &[impl Fixed64Value],
    ) -> Result<()> {
        self.emit_tag(field, WireType::LengthDelimited)?;
        self.emit_varint_raw((values.len() * 8) as u64)?;
        for value in values {
            self.sink.put_slice(&value.into_fixed64().to_le_bytes())?;
        }
        Ok(())
    }
}
