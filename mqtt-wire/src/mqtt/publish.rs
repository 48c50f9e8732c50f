/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::EncoderOptions;
use crate::encode::utils::*;
use crate::error::MqttResult;
use crate::logging::*;
use crate::mqtt::*;
use crate::mqtt::utils::*;
use crate::validate::*;

use std::fmt;

/// Borrowed view of a QoS 0 PUBLISH packet.  There is no packet identifier at this QoS.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PublishPacket<'a> {
    pub protocol_version: ProtocolVersion,
    pub topic: &'a str,
    pub payload: &'a [u8],
    pub properties: &'a [Property<'a>],
}

#[rustfmt::skip]
pub(crate) fn compute_publish_packet_remaining_length(packet: &PublishPacket) -> MqttResult<usize> {
    let mut total_remaining_length : usize = 2 + packet.topic.len();

    if packet.protocol_version.has_properties() {
        total_remaining_length += 2 + compute_property_list_length(packet.properties);
    }

    total_remaining_length += packet.payload.len();

    Ok(total_remaining_length)
}

#[rustfmt::skip]
pub(crate) fn write_publish_encoding_steps<'a>(packet: &PublishPacket<'a>, total_remaining_length: usize, steps: &mut Vec<EncodingStep<'a>>) {
    encode_integral_expression!(steps, Uint8, PUBLISH_FIRST_BYTE);
    encode_integral_expression!(steps, Vli, total_remaining_length as u32);

    /* Variable header */
    encode_length_prefixed_string!(steps, packet.topic);

    if packet.protocol_version.has_properties() {
        encode_property_section!(steps, compute_property_list_length(packet.properties), packet.properties);
    }

    /* Payload */
    encode_raw_bytes!(steps, packet.payload);
}

pub(crate) fn validate_publish_packet_outbound(packet: &PublishPacket, options: &EncoderOptions) -> MqttResult<()> {

    validate_string_length(packet.topic, PacketType::Publish, "topic")?;
    validate_properties(packet.properties, packet.protocol_version, options, PacketType::Publish)?;

    Ok(())
}

impl fmt::Display for PublishPacket<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PublishPacket {{")?;
        log_primitive_value!(self.protocol_version, f, "protocol_version");
        log_string!(self.topic, f, "topic");
        log_binary_data!(self.payload, f, "payload");
        log_properties!(self.properties, f, "properties");
        write!(f, " }}")
    }
}
