/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

extern crate log;

use crate::error::{MqttError, MqttResult};

use log::*;

#[derive(Eq, PartialEq, Debug)]
pub(crate) enum DecodeVliResult<'a> {
    InsufficientData,
    Value(u32, &'a[u8]), /* (decoded value, remaining bytes) */
}

pub(crate) fn decode_vli(buffer: &[u8]) -> MqttResult<DecodeVliResult> {
    let mut value: u32 = 0;
    let mut needs_data: bool;
    let mut shift: u32 = 0;
    let data_len = buffer.len();

    for i in 0..4 {
        if i >= data_len {
            return Ok(DecodeVliResult::InsufficientData);
        }

        let byte = buffer[i];
        value |= ((byte & 0x7F) as u32) << shift;
        shift += 7;

        needs_data = (byte & 0x80) != 0;
        if !needs_data {
            return Ok(DecodeVliResult::Value(value, &buffer[(i + 1)..]));
        }
    }

    error!("Packet Decode - invalid variable length integer");
    Err(MqttError::new_decoding_failure("invalid variable length integer"))
}

pub(crate) fn decode_vli_into_mutable<'a>(buffer: &'a[u8], value: &mut usize) -> MqttResult<&'a[u8]> {
    match decode_vli(buffer)? {
        DecodeVliResult::InsufficientData => {
            error!("Packet Decode - truncated variable length integer");
            Err(MqttError::new_decoding_failure("truncated variable length integer"))
        }
        DecodeVliResult::Value(vli, remaining_slice) => {
            *value = vli as usize;
            Ok(remaining_slice)
        }
    }
}

pub(crate) fn decode_u8<'a>(bytes: &'a[u8], value: &mut u8) -> MqttResult<&'a[u8]> {
    if bytes.is_empty() {
        error!("Packet Decode - Insufficient packet bytes for u8 field");
        return Err(MqttError::new_decoding_failure("insufficient packet bytes for u8 field"));
    }

    *value = bytes[0];

    Ok(&bytes[1..])
}

pub(crate) fn decode_u16<'a>(bytes: &'a[u8], value: &mut u16) -> MqttResult<&'a[u8]> {
    if bytes.len() < 2 {
        error!("Packet Decode - Insufficient packet bytes for u16 field");
        return Err(MqttError::new_decoding_failure("insufficient packet bytes for u16 field"));
    }

    *value = u16::from_be_bytes([bytes[0], bytes[1]]);

    Ok(&bytes[2..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_vli_insufficient_data() {
        assert_eq!(DecodeVliResult::InsufficientData, decode_vli(&[]).unwrap());
        assert_eq!(DecodeVliResult::InsufficientData, decode_vli(&[0x80, 0x80]).unwrap());
    }

    #[test]
    fn decode_vli_too_many_continuation_bytes() {
        assert!(decode_vli(&[0x80, 0x80, 0x80, 0x80, 0x01]).is_err());
    }

    #[test]
    fn decode_vli_into_mutable_truncated_fails() {
        let mut value = 0;
        assert!(decode_vli_into_mutable(&[0xFF], &mut value).is_err());
    }

    #[test]
    fn decode_u16_big_endian() {
        let mut value = 0;
        let remaining = decode_u16(&[0x12, 0x34, 0x56], &mut value).unwrap();
        assert_eq!(0x1234, value);
        assert_eq!([0x56u8], remaining);
    }

    #[test]
    fn decode_integers_short_input_fails() {
        let mut short_value = 0u16;
        assert!(decode_u16(&[0x01], &mut short_value).is_err());

        let mut byte_value = 0u8;
        assert!(decode_u8(&[], &mut byte_value).is_err());
    }
}
