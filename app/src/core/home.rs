use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

/// A Nest structure. The unit whose away mode is toggled, exposed as one switch endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Home {
    pub id: String,
    pub display_name: String,
}

impl Home {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum AwayState {
    #[display("home")]
    Home,
    #[display("away")]
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerState {
    #[display("ON")]
    On,
    #[display("OFF")]
    Off,
}

//Switch is "on" while somebody is at home
impl From<AwayState> for PowerState {
    fn from(value: AwayState) -> Self {
        match value {
            AwayState::Home => PowerState::On,
            AwayState::Away => PowerState::Off,
        }
    }
}

impl From<PowerState> for AwayState {
    fn from(value: PowerState) -> Self {
        match value {
            PowerState::On => AwayState::Home,
            PowerState::Off => AwayState::Away,
        }
    }
}
