//! Configuration applied when opening a device

use crate::{connstring::ConnString, constants::Property};

/// Value for a device property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValue {
    /// Integer value (timeouts, in ms)
    Int(i32),
    /// Boolean value
    Bool(bool),
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Options for opening a device
///
/// Properties are applied in the order they were added, after an optional `initiator_init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Device to open, `None` for the first available one
    pub connstring: Option<ConnString>,

    /// Properties to set once the device is open
    pub properties: Vec<(Property, PropertyValue)>,

    /// Put the device in initiator mode before applying properties
    pub initiator: bool,
}

impl DeviceConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the device to open
    pub fn with_connstring(mut self, connstring: ConnString) -> Self {
        self.connstring = Some(connstring);
        self
    }

    /// Add a property to set after opening
    pub fn with_property(mut self, property: Property, value: impl Into<PropertyValue>) -> Self {
        self.properties.push((property, value.into()));
        self
    }

    /// Set the command timeout in ms (0 disables it)
    pub fn with_timeout_command(self, ms: i32) -> Self {
        self.with_property(Property::TimeoutCommand, ms)
    }

    /// Set the ATR timeout in ms
    pub fn with_timeout_atr(self, ms: i32) -> Self {
        self.with_property(Property::TimeoutAtr, ms)
    }

    /// Set the communication timeout in ms
    pub fn with_timeout_com(self, ms: i32) -> Self {
        self.with_property(Property::TimeoutCom, ms)
    }

    /// Enable or disable automatic frame encapsulation and chaining
    pub fn with_easy_framing(self, enabled: bool) -> Self {
        self.with_property(Property::EasyFraming, enabled)
    }

    /// Enable or disable blocking selects
    pub fn with_infinite_select(self, enabled: bool) -> Self {
        self.with_property(Property::InfiniteSelect, enabled)
    }

    /// Set whether to initialize the device as initiator
    pub const fn with_initiator(mut self, initiator: bool) -> Self {
        self.initiator = initiator;
        self
    }
}
