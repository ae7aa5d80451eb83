//! Tests for the low-level emitter primitives

use proptest::prelude::*;

use crate::emitter::Emitter;
use crate::error::EncodeError;
use crate::sink::SliceSink;
use crate::varint::varint_len;
use crate::wire::{MAX_FIELD_NUMBER, WireType};

/// Decode one varint from the front of `bytes` (test support)
fn decode_varint(bytes: &[u8]) -> (u64, usize) {
    let mut value = 0u64;
    let mut shift = 0u32;
    for (index, &byte) in bytes.iter().enumerate() {
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return (value, index + 1);
        }
        shift += 7;
    }
    panic!("truncated varint");
}

fn emit_into_vec(emit: impl FnOnce(&mut Emitter<&mut Vec<u8>>)) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut emitter = Emitter::new(&mut buf);
    emit(&mut emitter);
    buf
}

// =============================================================================
// emit_varint_raw tests
// =============================================================================

#[test]
fn test_varint_raw_zero_is_single_zero_byte() {
    let buf = emit_into_vec(|e| e.emit_varint_raw(0).unwrap());
    assert_eq!(buf, [0x00]);
}

#[test]
fn test_varint_raw_single_byte_boundary() {
    let buf = emit_into_vec(|e| e.emit_varint_raw(127).unwrap());
    assert_eq!(buf, [0x7F]);

    let buf = emit_into_vec(|e| e.emit_varint_raw(128).unwrap());
    assert_eq!(buf, [0x80, 0x01]);
}

#[test]
fn test_varint_raw_multi_byte() {
    let buf = emit_into_vec(|e| e.emit_varint_raw(150).unwrap());
    assert_eq!(buf, [0x96, 0x01]);

    let buf = emit_into_vec(|e| e.emit_varint_raw(300).unwrap());
    assert_eq!(buf, [0xAC, 0x02]);

    let buf = emit_into_vec(|e| e.emit_varint_raw(65537).unwrap());
    assert_eq!(buf, [0x81, 0x80, 0x04]);
}

#[test]
fn test_varint_raw_max_is_ten_bytes_ending_in_01() {
    let buf = emit_into_vec(|e| e.emit_varint_raw(u64::MAX).unwrap());
    assert_eq!(
        buf,
        [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
    );
}

// =============================================================================
// emit_tag tests
// =============================================================================

#[test]
fn test_tag_field_one_all_wire_types() {
    let cases = [
        (WireType::VarInt, 0x08),
        (WireType::I64, 0x09),
        (WireType::LengthDelimited, 0x0A),
        (WireType::I32, 0x0D),
    ];
    for (wire_type, expected) in cases {
        let buf = emit_into_vec(|e| e.emit_tag(1u32, wire_type).unwrap());
        assert_eq!(buf, [expected], "tag for {wire_type}");
    }
}

#[test]
fn test_tag_multi_byte_field_number() {
    // Field 16 is the first tag that doesn't fit in one byte
    let buf = emit_into_vec(|e| e.emit_tag(16u32, WireType::VarInt).unwrap());
    assert_eq!(buf, [0x80, 0x01]);

    let buf = emit_into_vec(|e| e.emit_tag(100_000u32, WireType::VarInt).unwrap());
    assert_eq!(buf, [0x80, 0xEA, 0x30]);
}

#[test]
fn test_tag_max_field_number() {
    // (536870911 << 3) | 5 = 0xFFFFFFFD
    let buf = emit_into_vec(|e| e.emit_tag(MAX_FIELD_NUMBER, WireType::I32).unwrap());
    assert_eq!(buf, [0xFD, 0xFF, 0xFF, 0xFF, 0x0F]);
}

#[test]
fn test_tag_rejects_field_zero() {
    let mut buf = Vec::new();
    let mut emitter = Emitter::new(&mut buf);
    assert_eq!(
        emitter.emit_tag(0u32, WireType::VarInt),
        Err(EncodeError::InvalidFieldNumber { number: 0 })
    );
    assert!(buf.is_empty(), "nothing may be appended on error");
}

#[test]
fn test_tag_rejects_field_above_max() {
    let mut buf = Vec::new();
    let mut emitter = Emitter::new(&mut buf);
    assert_eq!(
        emitter.emit_tag(MAX_FIELD_NUMBER + 1, WireType::VarInt),
        Err(EncodeError::InvalidFieldNumber {
            number: MAX_FIELD_NUMBER + 1
        })
    );
    assert!(buf.is_empty());
}

#[test]
fn test_tag_rejects_negative_field() {
    let mut buf = Vec::new();
    let mut emitter = Emitter::new(&mut buf);
    assert_eq!(
        emitter.emit_tag(-1i32, WireType::VarInt),
        Err(EncodeError::InvalidFieldNumber { number: u32::MAX })
    );
}

#[test]
fn test_tag_rejects_group_wire_types() {
    let mut buf = Vec::new();
    let mut emitter = Emitter::new(&mut buf);
    assert_eq!(
        emitter.emit_tag(1u32, WireType::StartGroup),
        Err(EncodeError::InvalidWireType(WireType::StartGroup))
    );
    assert_eq!(
        emitter.emit_tag(1u32, WireType::EndGroup),
        Err(EncodeError::InvalidWireType(WireType::EndGroup))
    );
    assert!(buf.is_empty());
}

// =============================================================================
// emit_varint / emit_signed_varint tests
// =============================================================================

#[test]
fn test_varint_field_sign_extends_narrow_negatives() {
    // -1 as int32 still produces the ten-byte all-ones varint
    let expected = [
        0x08, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01,
    ];
    let buf = emit_into_vec(|e| e.emit_varint(1u32, -1i32).unwrap());
    assert_eq!(buf, expected);

    let buf = emit_into_vec(|e| e.emit_varint(1u32, -1i64).unwrap());
    assert_eq!(buf, expected);
}

#[test]
fn test_signed_varint_field_zigzags() {
    let buf = emit_into_vec(|e| e.emit_signed_varint(1u32, -1i64).unwrap());
    assert_eq!(buf, [0x08, 0x01]);

    let buf = emit_into_vec(|e| e.emit_signed_varint(1u32, 1i64).unwrap());
    assert_eq!(buf, [0x08, 0x02]);
}

// =============================================================================
// emit_i32 / emit_i64 tests
// =============================================================================

#[test]
fn test_i32_little_endian() {
    let buf = emit_into_vec(|e| e.emit_i32(1u32, 65537u32).unwrap());
    assert_eq!(buf, [0x0D, 0x01, 0x00, 0x01, 0x00]);
}

#[test]
fn test_i32_float_bit_preserving() {
    let buf = emit_into_vec(|e| e.emit_i32(1u32, 1.0f32).unwrap());
    assert_eq!(buf, [0x0D, 0x00, 0x00, 0x80, 0x3F]);
}

#[test]
fn test_i64_little_endian() {
    let buf = emit_into_vec(|e| e.emit_i64(1u32, 65537u64).unwrap());
    assert_eq!(buf, [0x09, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn test_i64_double_bit_preserving() {
    let buf = emit_into_vec(|e| e.emit_i64(1u32, 1.0f64).unwrap());
    assert_eq!(buf, [0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F]);
}

// =============================================================================
// emit_len tests
// =============================================================================

#[test]
fn test_len_empty_payload() {
    let buf = emit_into_vec(|e| e.emit_len(1u32, b"").unwrap());
    assert_eq!(buf, [0x0A, 0x00]);
}

#[test]
fn test_len_prefixes_byte_count() {
    let buf = emit_into_vec(|e| e.emit_len(1u32, b"test").unwrap());
    assert_eq!(buf, [0x0A, 0x04, 0x74, 0x65, 0x73, 0x74]);
}

#[test]
fn test_len_long_payload_gets_multi_byte_prefix() {
    let payload = vec![0xAB; 300];
    let buf = emit_into_vec(|e| e.emit_len(1u32, &payload).unwrap());
    assert_eq!(buf[0], 0x0A);
    assert_eq!(buf[1..3], [0xAC, 0x02]);
    assert_eq!(buf.len(), 3 + 300);
}

// =============================================================================
// Packed tests
// =============================================================================

#[test]
fn test_varint_packed_empty_is_tag_and_zero() {
    let values: &[u32] = &[];
    let buf = emit_into_vec(|e| e.emit_varint_packed(1u32, values).unwrap());
    assert_eq!(buf, [0x0A, 0x00]);
}

#[test]
fn test_varint_packed_prefix_is_payload_byte_count() {
    let buf = emit_into_vec(|e| e.emit_varint_packed(1u32, &[0u32, 1, 65537]).unwrap());
    assert_eq!(buf, [0x0A, 0x05, 0x00, 0x01, 0x81, 0x80, 0x04]);
}

#[test]
fn test_signed_varint_packed_zigzags_elements() {
    let buf = emit_into_vec(|e| e.emit_signed_varint_packed(1u32, &[0i32, -1, 65537]).unwrap());
    assert_eq!(buf, [0x0A, 0x05, 0x00, 0x01, 0x82, 0x80, 0x08]);
}

#[test]
fn test_i32_packed_length_is_four_per_element() {
    let buf = emit_into_vec(|e| e.emit_i32_packed(1u32, &[0u32, 1, 65537]).unwrap());
    assert_eq!(
        buf,
        [
            0x0A, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00
        ]
    );
}

#[test]
fn test_i64_packed_length_is_eight_per_element() {
    let buf = emit_into_vec(|e| e.emit_i64_packed(1u32, &[1u64, 65537]).unwrap());
    assert_eq!(
        buf,
        [
            0x0A, 0x10, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00,
            0x00, 0x00, 0x00, 0x00
        ]
    );
}

// =============================================================================
// Sink failure tests
// =============================================================================

#[test]
fn test_sink_failure_leaves_partial_record() {
    let mut buf = [0u8; 1];
    let mut sink = SliceSink::new(&mut buf);
    let mut emitter = Emitter::new(&mut sink);

    // Tag fits, payload doesn't; the partial byte stays in the sink
    let result = emitter.emit_varint(1u32, 300u64);
    assert!(matches!(result, Err(EncodeError::SinkFull { .. })));
    assert_eq!(sink.written(), 1);
    assert_eq!(buf[0], 0x08);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_varint_raw_round_trips_with_length(value in any::<u64>()) {
        let buf = emit_into_vec(|e| e.emit_varint_raw(value).unwrap());
        prop_assert_eq!(buf.len(), varint_len(value));

        let (decoded, consumed) = decode_varint(&buf);
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(consumed, buf.len());
    }

    #[test]
    fn prop_varint_raw_continuation_bits(value in any::<u64>()) {
        let buf = emit_into_vec(|e| e.emit_varint_raw(value).unwrap());
        let (last, rest) = buf.split_last().unwrap();
        prop_assert_eq!(last & 0x80, 0, "terminal byte must clear the continuation bit");
        for byte in rest {
            prop_assert_eq!(byte & 0x80, 0x80, "non-terminal bytes must set it");
        }
    }

    #[test]
    fn prop_tag_decodes_to_field_and_wire_type(
        field in 1u32..=MAX_FIELD_NUMBER,
        code in prop::sample::select(vec![0u8, 1, 2, 5]),
    ) {
        let wire_type = WireType::from_u8(code).unwrap();
        let buf = emit_into_vec(|e| e.emit_tag(field, wire_type).unwrap());
        let (tag, consumed) = decode_varint(&buf);
        prop_assert_eq!(consumed, buf.len());
        prop_assert_eq!(tag, (u64::from(field) << 3) | u64::from(code));
    }

    #[test]
    fn prop_signed_field_equals_sign_extended_unsigned(value in any::<i32>()) {
        let as_int32 = emit_into_vec(|e| e.emit_varint(1u32, value).unwrap());
        let sign_extended = emit_into_vec(|e| e.emit_varint(1u32, i64::from(value) as u64).unwrap());
        prop_assert_eq!(as_int32, sign_extended);
    }
}
