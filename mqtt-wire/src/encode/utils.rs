/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

/*!
Internal utilities to encode MQTT packets into a caller-supplied, fixed-capacity buffer.
 */

use crate::error::{MqttError, MqttResult};
use crate::mqtt::*;

use log::*;

pub(crate) enum EncodingStep<'a> {
    Uint8(u8),
    Uint16(u16),
    Vli(u32),
    Bytes(&'a [u8]),
}

macro_rules! encode_integral_expression {
    ($target: ident, $enum_variant: ident, $value: expr) => {
        $target.push(EncodingStep::$enum_variant($value));
    };
}

pub(crate) use encode_integral_expression;

macro_rules! encode_length_prefixed_string {
    ($target: ident, $value: expr) => {
        $target.push(EncodingStep::Uint16($value.len() as u16));
        $target.push(EncodingStep::Bytes($value.as_bytes()));
    };
}

pub(crate) use encode_length_prefixed_string;

macro_rules! encode_raw_bytes {
    ($target: ident, $value: expr) => {
        $target.push(EncodingStep::Bytes($value));
    };
}

pub(crate) use encode_raw_bytes;

macro_rules! encode_enum {
    ($target: ident, $enum_variant: ident, $int_type: ty, $value: expr) => {
        $target.push(EncodingStep::$enum_variant($value as $int_type));
    };
}

pub(crate) use encode_enum;

macro_rules! encode_property_section {
    ($target: ident, $property_length: expr, $properties: expr) => {
        $target.push(EncodingStep::Uint16($property_length as u16));
        for property in $properties.iter() {
            $target.push(EncodingStep::Uint8(property.identifier));
            $target.push(EncodingStep::Uint16(property.value.len() as u16));
            $target.push(EncodingStep::Bytes(property.value));
        }
    };
}

pub(crate) use encode_property_section;

pub static MAXIMUM_VARIABLE_LENGTH_INTEGER: usize = (1 << 28) - 1;

/// Sum of the wire sizes of every property in the list, excluding the section's own length
/// prefix.
pub fn compute_property_list_length(properties: &[Property]) -> usize {
    properties.iter().map(|property| property.encoded_length()).sum()
}

pub fn compute_variable_length_integer_encode_size(packet_type: PacketType, value: usize) -> MqttResult<usize> {
    if value < 1usize << 7 {
        Ok(1)
    } else if value < 1usize << 14 {
        Ok(2)
    } else if value < 1usize << 21 {
        Ok(3)
    } else if value < 1usize << 28 {
        Ok(4)
    } else {
        error!("{}Packet Encode - variable length integer maximum exceeded ({})", packet_type, value);
        Err(MqttError::new_encoding_failure(packet_type, "variable length integer maximum exceeded"))
    }
}

/// Total packet size for a given remaining length: first byte, remaining length field, and body
pub(crate) fn compute_total_packet_length(packet_type: PacketType, total_remaining_length: usize) -> MqttResult<usize> {
    if total_remaining_length > MAXIMUM_VARIABLE_LENGTH_INTEGER {
        error!("{}Packet Encode - remaining length {} exceeds the variable length integer maximum", packet_type, total_remaining_length);
        return Err(MqttError::new_encoding_failure(packet_type, "remaining length exceeds variable length integer maximum"));
    }

    Ok(1 + compute_variable_length_integer_encode_size(packet_type, total_remaining_length)? + total_remaining_length)
}

struct SliceWriter<'a> {
    packet_type: PacketType,
    dest: &'a mut [u8],
    position: usize,
}

impl<'a> SliceWriter<'a> {
    fn new(packet_type: PacketType, dest: &'a mut [u8]) -> Self {
        SliceWriter {
            packet_type,
            dest,
            position: 0
        }
    }

    fn put_slice(&mut self, bytes: &[u8]) -> MqttResult<()> {
        let end = self.position + bytes.len();
        match self.dest.get_mut(self.position..end) {
            Some(target) => {
                target.copy_from_slice(bytes);
                self.position = end;
                Ok(())
            }
            None => {
                error!("{}Packet Encode - encoding step overran destination buffer", self.packet_type);
                Err(MqttError::new_encoding_failure(self.packet_type, "encoding step overran destination buffer"))
            }
        }
    }
}

fn encode_vli(value: u32, writer: &mut SliceWriter) -> MqttResult<()> {
    if value > MAXIMUM_VARIABLE_LENGTH_INTEGER as u32 {
        error!("{}Packet Encode - variable length integer maximum exceeded ({})", writer.packet_type, value);
        return Err(MqttError::new_encoding_failure(writer.packet_type, "variable length integer maximum exceeded"));
    }

    let mut done = false;
    let mut val = value;
    while !done {
        let mut byte: u8 = (val & 0x7F) as u8;
        val /= 128;

        if val != 0 {
            byte |= 128;
        }

        writer.put_slice(&[byte])?;

        done = val == 0;
    }

    Ok(())
}

fn process_encoding_step(step: &EncodingStep, writer: &mut SliceWriter) -> MqttResult<()> {
    match step {
        EncodingStep::Uint8(val) => {
            writer.put_slice(&[*val])
        }
        EncodingStep::Uint16(val) => {
            writer.put_slice(&val.to_be_bytes())
        }
        EncodingStep::Vli(val) => {
            encode_vli(*val, writer)
        }
        EncodingStep::Bytes(bytes) => {
            writer.put_slice(bytes)
        }
    }
}

/// Number of bytes [`process_encoding_steps`] writes for `steps`, computed without writing.
pub(crate) fn compute_encoding_steps_length(packet_type: PacketType, steps: &[EncodingStep]) -> MqttResult<usize> {
    let mut length : usize = 0;
    for step in steps {
        length += match step {
            EncodingStep::Uint8(_) => { 1 }
            EncodingStep::Uint16(_) => { 2 }
            EncodingStep::Vli(val) => { compute_variable_length_integer_encode_size(packet_type, *val as usize)? }
            EncodingStep::Bytes(bytes) => { bytes.len() }
        };
    }

    Ok(length)
}

/// Writes every step into `dest` in order and returns the number of bytes written.
pub(crate) fn process_encoding_steps(packet_type: PacketType, steps: &[EncodingStep], dest: &mut [u8]) -> MqttResult<usize> {
    let mut writer = SliceWriter::new(packet_type, dest);
    for step in steps {
        process_encoding_step(step, &mut writer)?;
    }

    Ok(writer.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::utils::*;
    use crate::mqtt::utils::property_key;

    macro_rules! assert_vli_encoding_equals {
        ($value: expr, $expected_result: expr) => {{
            let mut dest = [0u8; 4];
            let written = process_encoding_steps(PacketType::Publish, &[EncodingStep::Vli($value)], &mut dest).unwrap();
            assert_eq!($expected_result, &dest[..written]);
        }};
    }

    macro_rules! assert_vli_encoding_fails {
        ($value: expr) => {{
            let mut dest = [0u8; 8];
            assert!(process_encoding_steps(PacketType::Publish, &[EncodingStep::Vli($value)], &mut dest).is_err());
        }};
    }

    macro_rules! assert_vli_round_trip_success {
        ($value: expr) => {{
            let mut dest = [0u8; 4];
            let written = process_encoding_steps(PacketType::Publish, &[EncodingStep::Vli($value)], &mut dest).unwrap();
            let encoded = &dest[..written];

            for i in 1..encoded.len() {
                let insufficient_data_result = decode_vli(&encoded[..i]);
                assert!(insufficient_data_result.is_ok());
                assert_eq!(
                    DecodeVliResult::InsufficientData,
                    insufficient_data_result.unwrap()
                );
            }

            let final_result = decode_vli(encoded);
            let expected_bytes =
                compute_variable_length_integer_encode_size(PacketType::Publish, $value as usize).unwrap();
            assert_eq!(expected_bytes, written);
            assert!(final_result.is_ok());
            assert_eq!(
                DecodeVliResult::Value($value, &encoded[expected_bytes..]),
                final_result.unwrap()
            );
        }};
    }

    #[test]
    fn vli_round_trips() {
        assert_vli_round_trip_success!(0);
        assert_vli_round_trip_success!(1);
        assert_vli_round_trip_success!(47);
        assert_vli_round_trip_success!(127);
        assert_vli_round_trip_success!(128);
        assert_vli_round_trip_success!(129);
        assert_vli_round_trip_success!(511);
        assert_vli_round_trip_success!(16383);
        assert_vli_round_trip_success!(16384);
        assert_vli_round_trip_success!(2097151);
        assert_vli_round_trip_success!(2097152);
        assert_vli_round_trip_success!(MAXIMUM_VARIABLE_LENGTH_INTEGER as u32);
    }

    #[test]
    fn encode_vli_successes() {
        assert_vli_encoding_equals!(0, [0u8]);
        assert_vli_encoding_equals!(1, [1u8]);
        assert_vli_encoding_equals!(127, [127u8]);
        assert_vli_encoding_equals!(128, [0x80u8, 1u8]);
        assert_vli_encoding_equals!(129, [0x81u8, 1u8]);
        assert_vli_encoding_equals!(321, [0xC1u8, 0x02u8]);
    }

    #[test]
    fn encode_vli_failures() {
        assert_vli_encoding_fails!(MAXIMUM_VARIABLE_LENGTH_INTEGER as u32 + 1);
        assert_vli_encoding_fails!(0x80000000u32);
        assert_vli_encoding_fails!(0xFFFFFFFFu32);
    }

    #[test]
    #[rustfmt::skip]
    fn compute_vli_encoding_size_successes() {
        assert_eq!(1, compute_variable_length_integer_encode_size(PacketType::Publish, 0).unwrap());
        assert_eq!(1, compute_variable_length_integer_encode_size(PacketType::Publish, 127).unwrap());
        assert_eq!(2, compute_variable_length_integer_encode_size(PacketType::Publish, 128).unwrap());
        assert_eq!(2, compute_variable_length_integer_encode_size(PacketType::Publish, 16383).unwrap());
        assert_eq!(3, compute_variable_length_integer_encode_size(PacketType::Publish, 16384).unwrap());
        assert_eq!(3, compute_variable_length_integer_encode_size(PacketType::Publish, 2097151).unwrap());
        assert_eq!(4, compute_variable_length_integer_encode_size(PacketType::Publish, 2097152).unwrap());
        assert_eq!(4, compute_variable_length_integer_encode_size(PacketType::Publish, MAXIMUM_VARIABLE_LENGTH_INTEGER).unwrap());
    }

    #[test]
    fn compute_vli_encoding_size_failures() {
        assert!(compute_variable_length_integer_encode_size(PacketType::Publish, MAXIMUM_VARIABLE_LENGTH_INTEGER + 1).is_err());
        assert!(compute_variable_length_integer_encode_size(PacketType::Publish, usize::MAX).is_err());
    }

    #[test]
    fn total_packet_length_accounts_for_vli_width() {
        assert_eq!(2, compute_total_packet_length(PacketType::Disconnect, 0).unwrap());
        assert_eq!(129, compute_total_packet_length(PacketType::Publish, 127).unwrap());
        assert_eq!(131, compute_total_packet_length(PacketType::Publish, 128).unwrap());
        assert!(compute_total_packet_length(PacketType::Publish, MAXIMUM_VARIABLE_LENGTH_INTEGER + 1).is_err());
    }

    #[test]
    fn property_list_length_sums_entries() {
        let properties = [
            Property::new(property_key::CONTENT_TYPE, b"json"),
            Property::new(property_key::USER_PROPERTY, b""),
        ];

        assert_eq!(10, compute_property_list_length(&properties));
        assert_eq!(0, compute_property_list_length(&[]));
    }

    #[test]
    fn steps_write_in_order() {
        let steps = [
            EncodingStep::Uint8(0x30),
            EncodingStep::Vli(5),
            EncodingStep::Uint16(0x0102),
            EncodingStep::Bytes(b"abc"),
        ];

        let mut dest = [0u8; 16];
        let written = process_encoding_steps(PacketType::Publish, &steps, &mut dest).unwrap();
        assert_eq!(7, written);
        assert_eq!([0x30, 0x05, 0x01, 0x02, b'a', b'b', b'c'], dest[..7]);
    }

    #[test]
    fn steps_overrunning_destination_fail() {
        let steps = [ EncodingStep::Bytes(b"abcdef") ];
        let mut dest = [0u8; 4];
        assert!(process_encoding_steps(PacketType::Publish, &steps, &mut dest).is_err());
    }

    #[test]
    fn encoding_steps_length_matches_bytes_written() {
        let steps = [
            EncodingStep::Uint8(0x30),
            EncodingStep::Vli(200),
            EncodingStep::Uint16(3),
            EncodingStep::Bytes(b"a/b"),
            EncodingStep::Bytes(b""),
        ];

        assert_eq!(8, compute_encoding_steps_length(PacketType::Publish, &steps).unwrap());

        let mut dest = [0u8; 16];
        assert_eq!(8, process_encoding_steps(PacketType::Publish, &steps, &mut dest).unwrap());
    }

    #[test]
    fn encoding_steps_length_rejects_oversized_vli() {
        let steps = [ EncodingStep::Vli(MAXIMUM_VARIABLE_LENGTH_INTEGER as u32 + 1) ];
        assert!(compute_encoding_steps_length(PacketType::Publish, &steps).is_err());
    }
}
