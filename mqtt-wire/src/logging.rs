/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::mqtt::*;
use log::*;
use std::fmt;
use std::fmt::Write;

impl fmt::Display for Property<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, <{} Bytes>)", self.identifier, self.value.len())
    }
}

pub(crate) fn create_properties_log_string(properties: &[Property]) -> String {
    let mut val : String = "[".to_string();
    for property in properties {
        write!(&mut val, " {}", property).ok();
    }
    write!(&mut val, " ]").ok();
    val
}

macro_rules! log_primitive_value {
    ($integral_value: expr, $formatter: expr, $log_field: expr) => {
        write!($formatter, " {}:{}", $log_field, $integral_value)?;
    };
}

pub(crate) use log_primitive_value;

macro_rules! log_enum {
    ($enum_value: expr, $formatter: expr, $log_field: expr, $converter: ident) => {
        write!($formatter, " {}:{}", $log_field, $converter($enum_value))?;
    };
}

pub(crate) use log_enum;

macro_rules! log_string {
    ($value: expr, $formatter: expr, $log_field: expr) => {
        write!($formatter, " {}:\"{}\"", $log_field, $value)?;
    };
}

pub(crate) use log_string;

macro_rules! log_binary_data {
    ($data: expr, $formatter: expr, $log_field: expr) => {
        write!($formatter, " {}:<{} Bytes>",  $log_field, $data.len())?;
    };
}

pub(crate) use log_binary_data;

macro_rules! log_properties {
    ($properties: expr, $formatter: expr, $log_field: expr) => {
        if !$properties.is_empty() {
            write!($formatter, " {}:{}", $log_field, create_properties_log_string($properties))?;
        }
    };
}

pub(crate) use log_properties;

fn get_packet_type_for_logging(packet: &MqttPacket) -> &'static str {
    match packet {
        MqttPacket::Connect(_) => { "ConnectPacket{...}" }
        MqttPacket::Publish(_) => { "PublishPacket{...}" }
        MqttPacket::Subscribe(_) => { "SubscribePacket{...}" }
        MqttPacket::Disconnect(_) => { "DisconnectPacket{...}" }
    }
}

impl fmt::Display for MqttPacket<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MqttPacket::Connect(packet) => { fmt::Display::fmt(packet, f) }
            MqttPacket::Publish(packet) => { fmt::Display::fmt(packet, f) }
            MqttPacket::Subscribe(packet) => { fmt::Display::fmt(packet, f) }
            MqttPacket::Disconnect(packet) => { fmt::Display::fmt(packet, f) }
        }
    }
}

pub(crate) fn log_packet(prefix: &str, packet: &MqttPacket) {
    let level = log::max_level();
    match level {
        LevelFilter::Info => {
            info!("{}{}", prefix, get_packet_type_for_logging(packet));
        }
        LevelFilter::Debug | LevelFilter::Trace => {
            debug!("{}{}", prefix, packet);
        }
        _ => {}
    }
}
