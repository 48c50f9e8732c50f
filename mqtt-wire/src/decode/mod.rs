/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub(crate) mod utils;

extern crate log;

use crate::decode::utils::*;
use crate::error::{MqttError, MqttResult};
use crate::mqtt::utils::*;

use log::*;

/// Splits a complete packet into its first byte and body, where the body is exactly
/// `remaining length` bytes.  Trailing bytes past the packet are ignored.
pub(crate) fn split_fixed_header(bytes: &[u8]) -> MqttResult<(u8, &[u8])> {
    if bytes.is_empty() {
        error!("Packet Decode - empty buffer");
        return Err(MqttError::new_decoding_failure("empty buffer"));
    }

    let first_byte = bytes[0];
    debug!("Decoding a packet of type {}", packet_type_to_str(first_byte >> 4));

    let mut remaining_length : usize = 0;
    let body = decode_vli_into_mutable(&bytes[1..], &mut remaining_length)?;
    if remaining_length > body.len() {
        error!("Packet Decode - remaining length ({}) exceeds available bytes ({})", remaining_length, body.len());
        return Err(MqttError::new_decoding_failure("remaining length exceeds available bytes"));
    }

    Ok((first_byte, &body[..remaining_length]))
}
