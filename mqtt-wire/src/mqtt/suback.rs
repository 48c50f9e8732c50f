/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::decode::*;
use crate::decode::utils::*;
use crate::error::{MqttError, MqttResult};
use crate::logging::*;
use crate::mqtt::*;
use crate::mqtt::utils::*;

use log::*;
use std::fmt;

/// Fields extracted from a received SUBACK packet.
///
/// Only the first reason code is reported, matching the single topic filter that
/// [`Encoder::encode_subscribe`](crate::Encoder::encode_subscribe) sends.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SubackPacket {

    /// Packet id of the SUBSCRIBE this SUBACK acknowledges
    pub packet_id: u16,

    /// First return code.  Values of 0x80 and above indicate that the subscription was
    /// rejected.
    pub reason_code: u8,
}

/// Where the first return code sits relative to the packet id.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SubackLayout {

    /// The return code immediately follows the packet id (offset 4 with a one-byte
    /// remaining length).
    Compact,

    /// MQTT5 layout: a variable length property section sits between the packet id and
    /// the reason codes.
    WithProperties,
}

#[rustfmt::skip]
pub(crate) fn decode_suback_packet(buffer: Option<&[u8]>, layout: SubackLayout) -> MqttResult<SubackPacket> {
    let bytes = match buffer {
        Some(bytes) if !bytes.is_empty() => { bytes }
        _ => {
            error!("SubackPacket Decode - buffer is absent or empty");
            return Err(MqttError::new_null_input(PacketType::Suback, "buffer"));
        }
    };

    if bytes[0] != SUBACK_FIRST_BYTE {
        error!("SubackPacket Decode - invalid first byte 0x{:02X}", bytes[0]);
        return Err(MqttError::new_not_suback(bytes[0]));
    }

    let (_, body) = split_fixed_header(bytes)?;

    let mut packet = SubackPacket::default();
    let mut mutable_body = decode_u16(body, &mut packet.packet_id)?;

    if layout == SubackLayout::WithProperties {
        let mut properties_length : usize = 0;
        mutable_body = decode_vli_into_mutable(mutable_body, &mut properties_length)?;
        if properties_length > mutable_body.len() {
            error!("SubackPacket Decode - property length ({}) exceeds remaining packet bytes ({})", properties_length, mutable_body.len());
            return Err(MqttError::new_decoding_failure("property length exceeds remaining packet bytes"));
        }

        mutable_body = &mutable_body[properties_length..];
    }

    decode_u8(mutable_body, &mut packet.reason_code)?;

    debug!("Decoded {}", packet);

    Ok(packet)
}

impl fmt::Display for SubackPacket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SubackPacket {{")?;
        log_primitive_value!(self.packet_id, f, "packet_id");
        log_primitive_value!(self.reason_code, f, "reason_code");
        write!(f, " }}")
    }
}
