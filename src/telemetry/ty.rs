use serde::Deserialize;

/// A light as listed by the bridge.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Light {
    pub name: String,
    /// Device class, e.g. "Extended color light".
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub productname: Option<String>,
    pub state: LightState,
}

/// Last known state of a light (or the last command sent to a group).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightState {
    pub on: bool,
    /// Brightness, 1 to 254.
    pub bri: Option<u8>,
    /// Hue, wrapping from 0 to 65535.
    pub hue: Option<u16>,
    /// Saturation, 0 (white) to 254.
    pub sat: Option<u8>,
    pub xy: Option<[f64; 2]>,
    pub colormode: Option<ColorMode>,
    pub reachable: bool,
}

impl Default for LightState {
    fn default() -> Self {
        LightState { on: false, bri: None, hue: None, sat: None, xy: None,
                     colormode: None, reachable: true }
    }
}

/// Command type the light received last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Hue and saturation.
    Hs,
    /// CIE xy coordinates.
    Xy,
    /// Color temperature (white light).
    Ct,
    #[serde(other)]
    Other,
}

/// A group of lights (a room, a zone,...).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub state: GroupState,
    #[serde(default)]
    pub action: LightState,
    /// Identifiers of the member lights.
    #[serde(default)]
    pub lights: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GroupState {
    pub all_on: bool,
    pub any_on: bool,
}
