/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::encode::utils::*;
use crate::error::MqttResult;
use crate::mqtt::utils::*;

use std::fmt;

/// A DISCONNECT packet carries no variable header or payload in either protocol version.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DisconnectPacket {}

pub(crate) fn compute_disconnect_packet_remaining_length(_: &DisconnectPacket) -> MqttResult<usize> {
    Ok(0)
}

#[rustfmt::skip]
pub(crate) fn write_disconnect_encoding_steps(_: &DisconnectPacket, total_remaining_length: usize, steps: &mut Vec<EncodingStep>) {
    encode_integral_expression!(steps, Uint8, DISCONNECT_FIRST_BYTE);
    encode_integral_expression!(steps, Vli, total_remaining_length as u32);
}

impl fmt::Display for DisconnectPacket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DisconnectPacket {{ }}")
    }
}
