/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::EncoderOptions;
use crate::encode::utils::*;
use crate::error::{MqttError, MqttResult};
use crate::mqtt::*;

use log::*;

pub(crate) const MAXIMUM_STRING_PROPERTY_LENGTH : usize = 65535;
pub(crate) const MAXIMUM_BINARY_PROPERTY_LENGTH : usize = 65535;
pub(crate) const MAXIMUM_PROPERTY_SECTION_LENGTH : usize = 65535;

pub(crate) fn validate_string_length(value: &str, packet_type: PacketType, field_name: &str) -> MqttResult<()> {
    if value.len() > MAXIMUM_STRING_PROPERTY_LENGTH {
        error!("{}Packet Validation - {} string field too long", packet_type, field_name);
        return Err(MqttError::new_encoding_failure(packet_type, format!("{} string field too long", field_name)));
    }

    Ok(())
}

/// Checks a property list against the protocol version, the configured count limit and the
/// two-byte length prefixes used for values and for the whole section.
pub(crate) fn validate_properties(properties: &[Property], protocol_version: ProtocolVersion, options: &EncoderOptions, packet_type: PacketType) -> MqttResult<()> {
    if properties.is_empty() {
        return Ok(());
    }

    if !protocol_version.has_properties() {
        error!("{}Packet Validation - properties are not supported by MQTT {}", packet_type, protocol_version);
        return Err(MqttError::new_encoding_failure(packet_type, "properties are not supported by this protocol version"));
    }

    if properties.len() > options.maximum_property_count() {
        error!("{}Packet Validation - {} properties exceeds the configured maximum of {}", packet_type, properties.len(), options.maximum_property_count());
        return Err(MqttError::new_encoding_failure(packet_type, "too many properties"));
    }

    for property in properties {
        if property.value.len() > MAXIMUM_BINARY_PROPERTY_LENGTH {
            error!("{}Packet Validation - property {} value too long", packet_type, property.identifier);
            return Err(MqttError::new_encoding_failure(packet_type, "property value too long"));
        }
    }

    if compute_property_list_length(properties) > MAXIMUM_PROPERTY_SECTION_LENGTH {
        error!("{}Packet Validation - property section too long", packet_type);
        return Err(MqttError::new_encoding_failure(packet_type, "property section too long"));
    }

    Ok(())
}
