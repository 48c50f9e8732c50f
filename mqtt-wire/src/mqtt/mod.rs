/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

/*!
Module containing the data types that describe packets at the wire level, along with the
per-packet encode and decode implementations.
 */

use std::fmt;
use crate::error::MqttError;

pub(crate) mod connect;
pub(crate) mod disconnect;
pub(crate) mod publish;
pub(crate) mod suback;
pub(crate) mod subscribe;
pub mod utils;

pub use suback::SubackPacket;

/// MQTT protocol revision that selects the framing of CONNECT and PUBLISH packets.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ProtocolVersion {

    /// MQTT 3.1: protocol name "MQIsdp", protocol level 3, no properties.
    Mqtt31,

    /// MQTT 5.0: protocol name "MQTT", protocol level 5, with a property section.
    #[default]
    Mqtt5,
}

impl ProtocolVersion {

    /// Protocol name written into the CONNECT variable header
    pub fn protocol_name(&self) -> &'static str {
        match self {
            ProtocolVersion::Mqtt31 => { utils::PROTOCOL_NAME_MQTT_31 }
            ProtocolVersion::Mqtt5 => { utils::PROTOCOL_NAME_MQTT_5 }
        }
    }

    /// Protocol level byte written into the CONNECT variable header
    pub fn protocol_level(&self) -> u8 {
        match self {
            ProtocolVersion::Mqtt31 => { utils::PROTOCOL_LEVEL_MQTT_31 }
            ProtocolVersion::Mqtt5 => { utils::PROTOCOL_LEVEL_MQTT_5 }
        }
    }

    pub(crate) fn has_properties(&self) -> bool {
        *self == ProtocolVersion::Mqtt5
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVersion::Mqtt31 => { write!(f, "3.1") }
            ProtocolVersion::Mqtt5 => { write!(f, "5.0") }
        }
    }
}

/// MQTT message delivery quality of service.
///
/// Enum values match [MQTT5 standard](https://docs.oasis-open.org/mqtt/mqtt/v5.0/os/mqtt-v5.0-os.html#_Toc3901234) encoding values.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum QualityOfService {

    /// The message is delivered according to the capabilities of the underlying network. No response is sent by the
    /// receiver and no retry is performed by the sender. The message arrives at the receiver either once or not at all.
    #[default]
    AtMostOnce = 0,

    /// A level of service that ensures that the message arrives at the receiver at least once.
    AtLeastOnce = 1,

    /// A level of service that ensures that the message arrives at the receiver exactly once.
    ExactlyOnce = 2,
}

impl TryFrom<u8> for QualityOfService {
    type Error = MqttError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        utils::convert_u8_to_quality_of_service(value)
    }
}

/// The kinds of packets this crate produces or inspects.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PacketType {

    /// A CONNECT packet
    Connect,

    /// A PUBLISH packet
    Publish,

    /// A SUBSCRIBE packet
    Subscribe,

    /// A SUBACK packet
    Suback,

    /// A DISCONNECT packet
    Disconnect,
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketType::Connect => { write!(f, "Connect") }
            PacketType::Publish => { write!(f, "Publish") }
            PacketType::Subscribe => { write!(f, "Subscribe") }
            PacketType::Suback => { write!(f, "Suback") }
            PacketType::Disconnect => { write!(f, "Disconnect") }
        }
    }
}

/// A single entry in an MQTT5 property list: an identifier byte followed by a length-prefixed
/// value.
///
/// The value is borrowed from the caller for the duration of an encode call.  Its wire
/// length prefix is always derived from the slice length.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Property<'a> {

    /// Property identifier byte
    pub identifier: u8,

    /// Raw property value
    pub value: &'a [u8],
}

impl<'a> Property<'a> {

    /// Creates a property from an identifier and a borrowed value
    pub fn new(identifier: u8, value: &'a [u8]) -> Self {
        Property {
            identifier,
            value
        }
    }

    /// Number of bytes this property occupies on the wire: identifier, two-byte length and value
    pub fn encoded_length(&self) -> usize {
        3 + self.value.len()
    }
}

/// Borrowed views of every packet this crate can encode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MqttPacket<'a> {
    Connect(connect::ConnectPacket<'a>),
    Publish(publish::PublishPacket<'a>),
    Subscribe(subscribe::SubscribePacket<'a>),
    Disconnect(disconnect::DisconnectPacket),
}

pub(crate) fn mqtt_packet_to_packet_type(packet: &MqttPacket) -> PacketType {
    match packet {
        MqttPacket::Connect(_) => { PacketType::Connect }
        MqttPacket::Publish(_) => { PacketType::Publish }
        MqttPacket::Subscribe(_) => { PacketType::Subscribe }
        MqttPacket::Disconnect(_) => { PacketType::Disconnect }
    }
}
