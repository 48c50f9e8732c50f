/*
 * Copyright Bret Ambrose. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

/*!
Module containing types for configuring packet encoding.
 */

/// Keep alive, in seconds, written into CONNECT packets unless configured otherwise.
pub const DEFAULT_KEEP_ALIVE_INTERVAL_SECONDS: u16 = 15;

/// Maximum number of entries accepted in a single property list unless configured otherwise.
pub const DEFAULT_MAXIMUM_PROPERTY_COUNT: usize = 10;

/// Configuration values that shape the packets an [`Encoder`](crate::Encoder) produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EncoderOptions {

    pub(crate) keep_alive_interval_seconds: u16,

    pub(crate) clean_session: bool,

    pub(crate) maximum_property_count: usize,
}

impl EncoderOptions {

    /// Keep alive interval, in seconds, written into CONNECT packets
    pub fn keep_alive_interval_seconds(&self) -> u16 { self.keep_alive_interval_seconds }

    /// Whether CONNECT packets request a clean session
    pub fn clean_session(&self) -> bool { self.clean_session }

    /// Largest property list an encode call accepts
    pub fn maximum_property_count(&self) -> usize { self.maximum_property_count }
}

impl Default for EncoderOptions {

    /// Creates an EncoderOptions object with default values.
    ///
    /// A 15 second keep alive, a clean session request, and at most 10 properties per packet.
    fn default() -> Self {
        EncoderOptions {
            keep_alive_interval_seconds: DEFAULT_KEEP_ALIVE_INTERVAL_SECONDS,
            clean_session: true,
            maximum_property_count: DEFAULT_MAXIMUM_PROPERTY_COUNT,
        }
    }
}

/// Builder type for EncoderOptions instances.
#[derive(Default)]
pub struct EncoderOptionsBuilder {
    options: EncoderOptions
}

impl EncoderOptionsBuilder {

    /// Creates a new builder object for EncoderOptions
    pub fn new() -> Self {
        EncoderOptionsBuilder {
            ..Default::default()
        }
    }

    /// Creates a new builder object for EncoderOptions using an existing EncoderOptions
    /// value as a starting point.
    pub fn new_from_existing(options: EncoderOptions) -> Self {
        EncoderOptionsBuilder {
            options
        }
    }

    /// Sets the maximum time interval, in seconds, that is permitted to elapse between the point at which the client
    /// finishes transmitting one MQTT packet and the point it starts sending the next.
    ///
    /// A value of zero disables keep alive on the broker side.
    pub fn with_keep_alive_interval_seconds(&mut self, keep_alive: u16) -> &mut Self {
        self.options.keep_alive_interval_seconds = keep_alive;
        self
    }

    /// Controls the clean session (clean start in MQTT5) flag of CONNECT packets.
    pub fn with_clean_session(&mut self, clean_session: bool) -> &mut Self {
        self.options.clean_session = clean_session;
        self
    }

    /// Sets the largest number of properties accepted in one property list.  Longer lists
    /// fail to encode.
    pub fn with_maximum_property_count(&mut self, maximum_property_count: usize) -> &mut Self {
        self.options.maximum_property_count = maximum_property_count;
        self
    }

    /// Builds a new set of encoder options.  Consumes nothing; the builder can be reused.
    pub fn build(&self) -> EncoderOptions {
        self.options
    }
}
