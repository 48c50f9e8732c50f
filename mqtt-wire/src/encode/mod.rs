/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub(crate) mod utils;

use crate::config::EncoderOptions;
use crate::encode::utils::*;
use crate::error::{MqttError, MqttResult};
use crate::logging::*;
use crate::mqtt::*;
use crate::mqtt::connect::*;
use crate::mqtt::disconnect::*;
use crate::mqtt::publish::*;
use crate::mqtt::subscribe::*;

use log::*;

fn compute_packet_remaining_length(mqtt_packet: &MqttPacket) -> MqttResult<usize> {
    match mqtt_packet {
        MqttPacket::Connect(packet) => { compute_connect_packet_remaining_length(packet) }
        MqttPacket::Publish(packet) => { compute_publish_packet_remaining_length(packet) }
        MqttPacket::Subscribe(packet) => { compute_subscribe_packet_remaining_length(packet) }
        MqttPacket::Disconnect(packet) => { compute_disconnect_packet_remaining_length(packet) }
    }
}

fn write_encoding_steps<'a>(mqtt_packet: &MqttPacket<'a>, total_remaining_length: usize, steps: &mut Vec<EncodingStep<'a>>) {
    match mqtt_packet {
        MqttPacket::Connect(packet) => { write_connect_encoding_steps(packet, total_remaining_length, steps) }
        MqttPacket::Publish(packet) => { write_publish_encoding_steps(packet, total_remaining_length, steps) }
        MqttPacket::Subscribe(packet) => { write_subscribe_encoding_steps(packet, total_remaining_length, steps) }
        MqttPacket::Disconnect(packet) => { write_disconnect_encoding_steps(packet, total_remaining_length, steps) }
    }
}

/// Sizes the packet, checks it against the destination and against its own encoding steps,
/// and only then writes it.
pub(crate) fn encode_packet(mqtt_packet: &MqttPacket, dest: &mut [u8]) -> MqttResult<usize> {
    let packet_type = mqtt_packet_to_packet_type(mqtt_packet);
    let total_remaining_length = compute_packet_remaining_length(mqtt_packet)?;
    let total_length = compute_total_packet_length(packet_type, total_remaining_length)?;

    if total_length > dest.len() {
        error!("{}Packet Encode - packet requires {} bytes but destination capacity is {}", packet_type, total_length, dest.len());
        return Err(MqttError::new_buffer_too_small(packet_type, total_length, dest.len()));
    }

    let mut steps = Vec::new();
    write_encoding_steps(mqtt_packet, total_remaining_length, &mut steps);

    /* the step list must agree with the size check above before anything is written */
    let steps_length = compute_encoding_steps_length(packet_type, &steps)?;
    if steps_length != total_length {
        error!("{}Packet Encode - encoding steps produce {} bytes but computed {}", packet_type, steps_length, total_length);
        return Err(MqttError::new_encoding_failure(packet_type, "encoding steps do not match computed length"));
    }

    log_packet("Encoding packet: ", mqtt_packet);

    process_encoding_steps(packet_type, &steps, dest)
}

fn check_destination(dest: &[u8], packet_type: PacketType) -> MqttResult<()> {
    if dest.is_empty() {
        error!("{}Packet Encode - destination buffer is absent or empty", packet_type);
        return Err(MqttError::new_null_input(packet_type, "dest"));
    }

    Ok(())
}

fn require_input<T>(value: Option<T>, packet_type: PacketType, field_name: &'static str) -> MqttResult<T> {
    match value {
        Some(value) => { Ok(value) }
        None => {
            error!("{}Packet Encode - required input {} is absent", packet_type, field_name);
            Err(MqttError::new_null_input(packet_type, field_name))
        }
    }
}

/// Packet encoder bound to a set of [`EncoderOptions`].
///
/// Every operation writes into a caller-supplied buffer and returns the number of bytes
/// written.  All validation happens before the first byte is written, so on failure the
/// destination is left untouched.  An `Encoder` holds no mutable state and may be shared
/// freely between threads.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Encoder {
    options: EncoderOptions,
}

impl Encoder {

    /// Creates a new encoder that uses the supplied options
    pub fn new(options: EncoderOptions) -> Encoder {
        Encoder {
            options
        }
    }

    /// Returns the options this encoder was created with
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Encodes a CONNECT packet for the requested protocol version.
    ///
    /// Properties are only valid for [`ProtocolVersion::Mqtt5`].
    pub fn encode_connect(&self, dest: &mut [u8], client_id: Option<&str>, protocol_version: ProtocolVersion, properties: Option<&[Property]>) -> MqttResult<usize> {
        check_destination(dest, PacketType::Connect)?;
        let client_id = require_input(client_id, PacketType::Connect, "client_id")?;

        let packet = ConnectPacket {
            protocol_version,
            client_id,
            keep_alive_interval_seconds: self.options.keep_alive_interval_seconds(),
            clean_session: self.options.clean_session(),
            properties: properties.unwrap_or(&[]),
        };

        validate_connect_packet_outbound(&packet, &self.options)?;

        encode_packet(&MqttPacket::Connect(packet), dest)
    }

    /// Encodes a QoS 0 PUBLISH packet for the requested protocol version.
    ///
    /// Properties are only valid for [`ProtocolVersion::Mqtt5`].
    pub fn encode_publish(&self, dest: &mut [u8], topic: Option<&str>, payload: Option<&[u8]>, protocol_version: ProtocolVersion, properties: Option<&[Property]>) -> MqttResult<usize> {
        check_destination(dest, PacketType::Publish)?;
        let topic = require_input(topic, PacketType::Publish, "topic")?;
        let payload = require_input(payload, PacketType::Publish, "payload")?;

        let packet = PublishPacket {
            protocol_version,
            topic,
            payload,
            properties: properties.unwrap_or(&[]),
        };

        validate_publish_packet_outbound(&packet, &self.options)?;

        encode_packet(&MqttPacket::Publish(packet), dest)
    }

    /// Encodes an MQTT5 SUBSCRIBE packet containing a single topic filter.
    pub fn encode_subscribe(&self, dest: &mut [u8], packet_id: u16, topic: Option<&str>, qos: QualityOfService, properties: Option<&[Property]>) -> MqttResult<usize> {
        check_destination(dest, PacketType::Subscribe)?;
        let topic = require_input(topic, PacketType::Subscribe, "topic")?;

        let packet = SubscribePacket {
            packet_id,
            topic,
            qos,
            properties: properties.unwrap_or(&[]),
        };

        validate_subscribe_packet_outbound(&packet, &self.options)?;

        encode_packet(&MqttPacket::Subscribe(packet), dest)
    }

    /// Encodes a DISCONNECT packet.  The framing is identical for every protocol version.
    pub fn encode_disconnect(&self, dest: &mut [u8]) -> MqttResult<usize> {
        check_destination(dest, PacketType::Disconnect)?;

        encode_packet(&MqttPacket::Disconnect(DisconnectPacket {}), dest)
    }
}
