/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::EncoderOptions;
use crate::encode::utils::*;
use crate::error::{MqttError, MqttResult};
use crate::logging::*;
use crate::mqtt::*;
use crate::mqtt::utils::*;
use crate::validate::*;

use log::*;
use std::fmt;

/// Borrowed view of an MQTT5 SUBSCRIBE packet with a single topic filter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SubscribePacket<'a> {
    pub packet_id: u16,
    pub topic: &'a str,
    pub qos: QualityOfService,
    pub properties: &'a [Property<'a>],
}

#[rustfmt::skip]
pub(crate) fn compute_subscribe_packet_remaining_length(packet: &SubscribePacket) -> MqttResult<usize> {
    let mut total_remaining_length : usize = 2;

    total_remaining_length += 2 + compute_property_list_length(packet.properties);

    /* topic filter plus its options byte */
    total_remaining_length += 2 + packet.topic.len() + 1;

    Ok(total_remaining_length)
}

#[rustfmt::skip]
pub(crate) fn write_subscribe_encoding_steps<'a>(packet: &SubscribePacket<'a>, total_remaining_length: usize, steps: &mut Vec<EncodingStep<'a>>) {
    encode_integral_expression!(steps, Uint8, SUBSCRIBE_FIRST_BYTE);
    encode_integral_expression!(steps, Vli, total_remaining_length as u32);

    /* Variable header */
    encode_integral_expression!(steps, Uint16, packet.packet_id);
    encode_property_section!(steps, compute_property_list_length(packet.properties), packet.properties);

    /* Payload */
    encode_length_prefixed_string!(steps, packet.topic);
    encode_enum!(steps, Uint8, u8, packet.qos);
}

pub(crate) fn validate_subscribe_packet_outbound(packet: &SubscribePacket, options: &EncoderOptions) -> MqttResult<()> {

    if packet.packet_id == 0 {
        error!("SubscribePacket Validation - packet id may not be zero");
        return Err(MqttError::new_encoding_failure(PacketType::Subscribe, "packet id may not be zero"));
    }

    validate_string_length(packet.topic, PacketType::Subscribe, "topic")?;
    validate_properties(packet.properties, ProtocolVersion::Mqtt5, options, PacketType::Subscribe)?;

    Ok(())
}

impl fmt::Display for SubscribePacket<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SubscribePacket {{")?;
        log_primitive_value!(self.packet_id, f, "packet_id");
        log_string!(self.topic, f, "topic");
        log_enum!(self.qos, f, "qos", quality_of_service_to_str);
        log_properties!(self.properties, f, "properties");
        write!(f, " }}")
    }
}
