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

/// Borrowed view of a CONNECT packet, valid for a single encode call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ConnectPacket<'a> {
    pub protocol_version: ProtocolVersion,
    pub client_id: &'a str,
    pub keep_alive_interval_seconds: u16,
    pub clean_session: bool,
    pub properties: &'a [Property<'a>],
}

impl ConnectPacket<'_> {
    fn connect_flags(&self) -> u8 {
        if self.clean_session {
            CONNECT_PACKET_CLEAN_SESSION_FLAG_MASK
        } else {
            0
        }
    }
}

#[rustfmt::skip]
pub(crate) fn compute_connect_packet_remaining_length(packet: &ConnectPacket) -> MqttResult<usize> {
    /* protocol name, level, flags, keep alive */
    let mut total_remaining_length : usize = 2 + packet.protocol_version.protocol_name().len() + 1 + 1 + 2;

    if packet.protocol_version.has_properties() {
        total_remaining_length += 2 + compute_property_list_length(packet.properties);
    }

    total_remaining_length += 2 + packet.client_id.len();

    Ok(total_remaining_length)
}

#[rustfmt::skip]
pub(crate) fn write_connect_encoding_steps<'a>(packet: &ConnectPacket<'a>, total_remaining_length: usize, steps: &mut Vec<EncodingStep<'a>>) {
    encode_integral_expression!(steps, Uint8, CONNECT_FIRST_BYTE);
    encode_integral_expression!(steps, Vli, total_remaining_length as u32);

    /* Variable header */
    encode_length_prefixed_string!(steps, packet.protocol_version.protocol_name());
    encode_integral_expression!(steps, Uint8, packet.protocol_version.protocol_level());
    encode_integral_expression!(steps, Uint8, packet.connect_flags());
    encode_integral_expression!(steps, Uint16, packet.keep_alive_interval_seconds);

    if packet.protocol_version.has_properties() {
        encode_property_section!(steps, compute_property_list_length(packet.properties), packet.properties);
    }

    /* Payload */
    encode_length_prefixed_string!(steps, packet.client_id);
}

pub(crate) fn validate_connect_packet_outbound(packet: &ConnectPacket, options: &EncoderOptions) -> MqttResult<()> {

    validate_string_length(packet.client_id, PacketType::Connect, "client_id")?;
    validate_properties(packet.properties, packet.protocol_version, options, PacketType::Connect)?;

    Ok(())
}

impl fmt::Display for ConnectPacket<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ConnectPacket {{")?;
        log_primitive_value!(self.protocol_version, f, "protocol_version");
        log_string!(self.client_id, f, "client_id");
        log_primitive_value!(self.keep_alive_interval_seconds, f, "keep_alive_interval_seconds");
        log_primitive_value!(self.clean_session, f, "clean_session");
        log_properties!(self.properties, f, "properties");
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use crate::mqtt::utils::property_key;
    use assert_matches::assert_matches;
    use rand::Rng;

    #[test]
    fn connect_mqtt31_reference_bytes() {
        let mut dest = [0u8; 256];
        let length = encode_connect(&mut dest, Some("dev1"), ProtocolVersion::Mqtt31, None).unwrap();

        assert_eq!(20, length);
        assert_eq!(
            [0x10, 0x12, 0x00, 0x06, b'M', b'Q', b'I', b's', b'd', b'p', 0x03, 0x02, 0x00, 0x0F, 0x00, 0x04, b'd', b'e', b'v', b'1'],
            dest[..length]
        );
    }

    #[test]
    fn connect_mqtt31_length_for_single_byte_remaining_length() {
        let mut dest = [0u8; 256];
        for client_id_length in 0..=113usize {
            let client_id = "x".repeat(client_id_length);
            let length = encode_connect(&mut dest, Some(&client_id), ProtocolVersion::Mqtt31, None).unwrap();

            assert_eq!(16 + client_id_length, length);
            assert_eq!(0x10, dest[0]);
            assert_eq!((14 + client_id_length) as u8, dest[1]);
            assert_eq!(client_id.as_bytes(), &dest[16..length]);
        }
    }

    #[test]
    fn connect_mqtt31_long_client_id_uses_two_byte_remaining_length() {
        let mut dest = [0u8; 512];
        for client_id_length in 114..=255usize {
            let client_id = "y".repeat(client_id_length);
            let length = encode_connect(&mut dest, Some(&client_id), ProtocolVersion::Mqtt31, None).unwrap();

            let remaining_length = 14 + client_id_length;
            assert_eq!(17 + client_id_length, length);
            assert_eq!(((remaining_length & 0x7F) | 0x80) as u8, dest[1]);
            assert_eq!((remaining_length >> 7) as u8, dest[2]);
            assert_eq!([0x00u8, 0x06], dest[3..5]);
            assert_eq!([0x00, client_id_length as u8], dest[15..17]);
        }
    }

    #[test]
    fn connect_mqtt31_uuid_client_id() {
        let client_id = uuid::Uuid::new_v4().to_string();
        let mut dest = [0u8; DEFAULT_PACKET_BUFFER_SIZE];
        let length = encode_connect(&mut dest, Some(&client_id), ProtocolVersion::Mqtt31, None).unwrap();

        assert_eq!(16 + 36, length);
        assert_eq!(client_id.as_bytes(), &dest[16..length]);
    }

    #[test]
    fn connect_mqtt31_capacity_boundary() {
        let mut rng = rand::thread_rng();
        for _ in 0..32 {
            let client_id_length = rng.gen_range(0..=113usize);
            let client_id = "z".repeat(client_id_length);

            let mut exact = vec![0u8; 16 + client_id_length];
            assert_eq!(Ok(16 + client_id_length), encode_connect(&mut exact, Some(&client_id), ProtocolVersion::Mqtt31, None).map_err(|_| ()));

            let mut short = vec![0u8; 15 + client_id_length];
            let result = encode_connect(&mut short, Some(&client_id), ProtocolVersion::Mqtt31, None);
            assert_matches!(result, Err(MqttError::BufferTooSmall(context)) => {
                assert_eq!(16 + client_id_length, context.required);
                assert_eq!(15 + client_id_length, context.capacity);
            });
            assert!(short.iter().all(|byte| *byte == 0));
        }
    }

    #[test]
    fn connect_mqtt5_without_properties() {
        let mut dest = [0u8; 64];
        let length = encode_connect(&mut dest, Some("dev1"), ProtocolVersion::Mqtt5, None).unwrap();

        assert_eq!(20, length);
        assert_eq!(
            [0x10, 0x12, 0x00, 0x04, b'M', b'Q', b'T', b'T', 0x05, 0x02, 0x00, 0x0F, 0x00, 0x00, 0x00, 0x04, b'd', b'e', b'v', b'1'],
            dest[..length]
        );
    }

    #[test]
    fn connect_mqtt5_with_properties() {
        let properties = [
            Property::new(property_key::SESSION_EXPIRY_INTERVAL, &[0x00, 0x00, 0x0E, 0x10]),
            Property::new(property_key::RECEIVE_MAXIMUM, &[0x00, 0x14]),
        ];

        let mut dest = [0u8; 64];
        let length = encode_connect(&mut dest, Some("id"), ProtocolVersion::Mqtt5, Some(&properties)).unwrap();

        /* 10 header + 2 property length + 12 properties + 4 client id */
        assert_eq!(30, length);
        assert_eq!(28, dest[1]);
        assert_eq!([0x00u8, 12], dest[12..14]);
        assert_eq!([property_key::SESSION_EXPIRY_INTERVAL, 0x00, 0x04, 0x00, 0x00, 0x0E, 0x10], dest[14..21]);
        assert_eq!([property_key::RECEIVE_MAXIMUM, 0x00, 0x02, 0x00, 0x14], dest[21..26]);
        assert_eq!([0x00, 0x02, b'i', b'd'], dest[26..30]);
    }

    #[test]
    fn connect_remaining_length_matches_bytes_written() {
        let value = [0x42u8; 40];
        let properties = [
            Property::new(property_key::USER_PROPERTY, &value),
            Property::new(property_key::USER_PROPERTY, &value),
            Property::new(property_key::AUTHENTICATION_DATA, &value),
        ];

        let mut dest = [0u8; 256];
        let length = encode_connect(&mut dest, Some("remaining-length-check"), ProtocolVersion::Mqtt5, Some(&properties)).unwrap();

        let remaining_length = ((dest[1] & 0x7F) as usize) | ((dest[2] as usize) << 7);
        assert_eq!(length - 3, remaining_length);
    }

    #[test]
    fn connect_missing_client_id_writes_nothing() {
        let mut dest = [0u8; 32];
        assert_matches!(encode_connect(&mut dest, None, ProtocolVersion::Mqtt31, None), Err(MqttError::NullInput(_)));
        assert!(dest.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn connect_mqtt31_rejects_properties() {
        let properties = [ Property::new(property_key::RECEIVE_MAXIMUM, &[0x00, 0x01]) ];
        let mut dest = [0u8; 64];

        assert_matches!(encode_connect(&mut dest, Some("a"), ProtocolVersion::Mqtt31, Some(&properties)), Err(MqttError::EncodingFailure(_)));
        assert_eq!(Ok(17), encode_connect(&mut dest, Some("a"), ProtocolVersion::Mqtt31, Some(&[])).map_err(|_| ()));
    }
}
