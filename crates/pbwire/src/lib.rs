//! pbwire - Protocol Buffers wire-format emitter
//!
//! This crate serializes strongly-typed field values into the binary
//! protobuf encoding, for embedding by code generators or by
//! hand-written serializers that already know their message schema:
//! - `Builder` - typed facade, one method per protobuf scalar type
//! - `Emitter` - low-level primitives, one method per wire type
//! - `ByteSink` - caller-owned append-only byte destination
//! - `varint_len` / `zigzag` / `unzigzag` - pure wire arithmetic
//!
//! # Design Principles
//!
//! - **Schema-agnostic**: no `.proto` parsing, no descriptors, no
//!   message types; callers choose which scalar goes into which field
//! - **Push-only**: caller → `Builder` → `Emitter` → `ByteSink`, no
//!   state between calls beyond the sink cursor, no seeking or
//!   rewriting
//! - **Static width checks**: value widths and packability are
//!   enforced by parameter types, not runtime branches; there is no
//!   packed `string`/`bytes`/message method to misuse
//! - **No allocations in the hot path**: packed length prefixes are
//!   computed by a fold over `varint_len`, never a scratch buffer
//!
//! # Wire format
//!
//! Exactly as documented in the Protocol Buffers encoding reference
//! (<https://protobuf.dev/programming-guides/encoding>): varint tags
//! and integers in shortest form, little-endian fixed widths on any
//! host, length-delimited records for strings/bytes/submessages,
//! ZigZag for the `sint*` categories. Proto2 groups are a non-goal.
//!
//! # Example
//!
//! ```
//! use pbwire::Builder;
//!
//! let mut builder = Builder::new(Vec::new());
//! builder.emit_string(1u32, "test").unwrap();
//! builder.emit_bool(2u32, true).unwrap();
//! builder.emit_uint32_packed(3u32, &[0, 1, 65537]).unwrap();
//! let message: Vec<u8> = builder.into_sink();
//! ```

mod builder;
mod emitter;
mod error;
mod scalar;
mod sink;
mod varint;
mod wire;

pub use builder::Builder;
pub use emitter::Emitter;
pub use error::EncodeError;
pub use scalar::{EnumValue, Fixed32Value, Fixed64Value, SignedVarIntValue, VarIntValue};
pub use sink::{ByteSink, CountingSink, HasherSink, SliceSink};
pub use varint::{MAX_VARINT_LEN, unzigzag, varint_len, zigzag};
pub use wire::{FieldNumber, MAX_FIELD_NUMBER, MIN_FIELD_NUMBER, WireType};

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

/// Result type for emitter operations
pub type Result<T> = std::result::Result<T, EncodeError>;

#[cfg(test)]
mod emitter_test;
