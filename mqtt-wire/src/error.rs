/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

/*!
A module containing the core crate error enumeration, context structures, and conversion
definitions.
 */

use crate::mqtt::PacketType;

use std::error::Error;
use std::fmt;

/// Additional details about a NullInput error variant
#[derive(Debug)]
pub struct NullInputContext {

    /// type of packet whose encode or decode was attempted
    pub packet_type: PacketType,

    /// name of the absent input
    pub field_name: &'static str,
}

/// Additional details about a BufferTooSmall error variant
#[derive(Debug)]
pub struct BufferTooSmallContext {

    /// type of packet that did not fit
    pub packet_type: PacketType,

    /// number of bytes the complete packet needs
    pub required: usize,

    /// number of bytes available in the destination
    pub capacity: usize,
}

/// Additional details about a NotSuback error variant
#[derive(Debug)]
pub struct NotSubackContext {

    /// the first byte of the rejected buffer
    pub first_byte: u8,
}

/// Additional details about an EncodingFailure error variant
#[derive(Debug)]
pub struct EncodingFailureContext {

    /// type of packet that could not be encoded
    pub packet_type: PacketType,

    source: Box<dyn Error + Send + Sync + 'static>
}

/// Additional details about a DecodingFailure error variant
#[derive(Debug)]
pub struct DecodingFailureContext {
    source: Box<dyn Error + Send + Sync + 'static>
}

/// Basic error type for the entire mqtt-wire crate.
#[derive(Debug)]
#[non_exhaustive]
pub enum MqttError {

    /// A required destination buffer or string reference was absent.  An empty destination
    /// buffer is treated as absent.
    NullInput(NullInputContext),

    /// The encoded packet would be larger than the destination buffer.  Nothing was written.
    BufferTooSmall(BufferTooSmallContext),

    /// A SUBACK decode was attempted on a buffer whose first byte is not the SUBACK marker.
    NotSuback(NotSubackContext),

    /// The packet fields cannot be represented on the wire.  Examples include strings longer
    /// than a two-byte length prefix allows, too many properties, or a remaining length
    /// above the variable length integer maximum.
    EncodingFailure(EncodingFailureContext),

    /// A received buffer is truncated or internally inconsistent.
    DecodingFailure(DecodingFailureContext),
}

impl MqttError {

    pub(crate) fn new_null_input(packet_type: PacketType, field_name: &'static str) -> Self {
        MqttError::NullInput(
            NullInputContext {
                packet_type,
                field_name
            }
        )
    }

    pub(crate) fn new_buffer_too_small(packet_type: PacketType, required: usize, capacity: usize) -> Self {
        MqttError::BufferTooSmall(
            BufferTooSmallContext {
                packet_type,
                required,
                capacity
            }
        )
    }

    pub(crate) fn new_not_suback(first_byte: u8) -> Self {
        MqttError::NotSuback(
            NotSubackContext {
                first_byte
            }
        )
    }

    pub(crate) fn new_encoding_failure(packet_type: PacketType, source: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        MqttError::EncodingFailure(
            EncodingFailureContext {
                packet_type,
                source : source.into()
            }
        )
    }

    pub(crate) fn new_decoding_failure(source: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        MqttError::DecodingFailure(
            DecodingFailureContext {
                source : source.into()
            }
        )
    }
}

impl Error for MqttError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MqttError::EncodingFailure(context) => {
                Some(context.source.as_ref())
            }
            MqttError::DecodingFailure(context) => {
                Some(context.source.as_ref())
            }
            _ => { None }
        }
    }
}

impl fmt::Display for MqttError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MqttError::NullInput(context) => {
                write!(f, "required input '{}' for {} packet is absent", context.field_name, context.packet_type)
            }
            MqttError::BufferTooSmall(context) => {
                write!(f, "{} packet needs {} bytes but the destination holds {}", context.packet_type, context.required, context.capacity)
            }
            MqttError::NotSuback(context) => {
                write!(f, "buffer is not a SUBACK packet (first byte 0x{:02X})", context.first_byte)
            }
            MqttError::EncodingFailure(context) => {
                write!(f, "failure encountered while encoding an outbound {} packet", context.packet_type)
            }
            MqttError::DecodingFailure(_) => {
                write!(f, "failure encountered while decoding an incoming MQTT packet")
            }
        }
    }
}

/// Crate-wide result type for functions that can fail
pub type MqttResult<T> = Result<T, MqttError>;

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn buffer_too_small_display_names_sizes() {
        let error = MqttError::new_buffer_too_small(PacketType::Publish, 6, 4);
        assert_eq!("Publish packet needs 6 bytes but the destination holds 4", error.to_string());
        assert!(error.source().is_none());
    }

    #[test]
    fn encoding_failure_keeps_source() {
        let error = MqttError::new_encoding_failure(PacketType::Connect, "client id too long");
        assert_matches!(error, MqttError::EncodingFailure(EncodingFailureContext { packet_type: PacketType::Connect, .. }));
        assert_eq!("client id too long", error.source().unwrap().to_string());
    }

    #[test]
    fn not_suback_display_shows_first_byte() {
        let error = MqttError::new_not_suback(0x20);
        assert_eq!("buffer is not a SUBACK packet (first byte 0x20)", error.to_string());
    }

    #[test]
    fn decoding_failure_keeps_source() {
        let error = MqttError::new_decoding_failure("truncated variable length integer");
        assert_eq!("failure encountered while decoding an incoming MQTT packet", error.to_string());
        assert_eq!("truncated variable length integer", error.source().unwrap().to_string());
    }
}
