/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

/*!
Wire-level MQTT packet encoding for callers that own a fixed-size byte buffer.

The crate serializes CONNECT, PUBLISH, SUBSCRIBE and DISCONNECT packets for MQTT 3.1 and
MQTT 5.0 directly into a caller-supplied `&mut [u8]` and extracts the packet id and
first reason code from a received SUBACK.  There is no transport, session, or retry
logic; the caller hands `dest[..bytes_written]` to whatever socket it manages.

Every encode validates the complete packet, including its total size against the
destination capacity, before writing anything.  A failed call leaves the destination
untouched.

```
use mqtt_wire::*;

let mut buffer = [0u8; DEFAULT_PACKET_BUFFER_SIZE];
let length = encode_connect(&mut buffer, Some("dev1"), ProtocolVersion::Mqtt31, None).unwrap();

assert_eq!(20, length);
assert_eq!(0x10, buffer[0]);
```

The free functions use [`EncoderOptions::default`]; build an [`Encoder`] to change the
keep alive interval, clean session flag, or property limit.
 */

#![warn(missing_docs)]

pub mod config;
mod decode;
mod encode;
pub mod error;
mod logging;
pub mod mqtt;
mod validate;

pub use config::{EncoderOptions, EncoderOptionsBuilder};
pub use encode::Encoder;
pub use error::{MqttError, MqttResult};
pub use mqtt::{PacketType, Property, ProtocolVersion, QualityOfService, SubackPacket};
pub use mqtt::utils::{DEFAULT_PACKET_BUFFER_SIZE, DEFAULT_SUBSCRIBE_PACKET_ID, property_key};


/// Encodes a CONNECT packet into `dest` using default encoder options.
///
/// Returns the number of bytes written.
pub fn encode_connect(dest: &mut [u8], client_id: Option<&str>, protocol_version: ProtocolVersion, properties: Option<&[Property]>) -> MqttResult<usize> {
    Encoder::default().encode_connect(dest, client_id, protocol_version, properties)
}

/// Encodes a QoS 0 PUBLISH packet into `dest` using default encoder options.
///
/// Returns the number of bytes written.
pub fn encode_publish(dest: &mut [u8], topic: Option<&str>, payload: Option<&[u8]>, protocol_version: ProtocolVersion, properties: Option<&[Property]>) -> MqttResult<usize> {
    Encoder::default().encode_publish(dest, topic, payload, protocol_version, properties)
}

/// Encodes an MQTT5 SUBSCRIBE packet for a single topic filter into `dest`.
///
/// Callers without their own packet id bookkeeping can pass [`DEFAULT_SUBSCRIBE_PACKET_ID`].
pub fn encode_subscribe(dest: &mut [u8], packet_id: u16, topic: Option<&str>, qos: QualityOfService, properties: Option<&[Property]>) -> MqttResult<usize> {
    Encoder::default().encode_subscribe(dest, packet_id, topic, qos, properties)
}

/// Encodes a DISCONNECT packet into `dest`.  Always two bytes.
pub fn encode_disconnect(dest: &mut [u8]) -> MqttResult<usize> {
    Encoder::default().encode_disconnect(dest)
}

/// Extracts the packet id and return code from a SUBACK whose return code immediately
/// follows the packet id, as sent in reply to [`encode_subscribe`].
///
/// With a one-byte remaining length the packet id sits at offset 2 and the return code at
/// offset 4.  Any further return codes are ignored.
pub fn decode_suback(buffer: Option<&[u8]>) -> MqttResult<SubackPacket> {
    mqtt::suback::decode_suback_packet(buffer, mqtt::suback::SubackLayout::Compact)
}

/// Extracts the packet id and first reason code from an MQTT5 SUBACK that carries a
/// variable length property section after the packet id.  The properties are skipped.
pub fn decode_suback_with_properties(buffer: Option<&[u8]>) -> MqttResult<SubackPacket> {
    mqtt::suback::decode_suback_packet(buffer, mqtt::suback::SubackLayout::WithProperties)
}
