//! Lights and groups as reported by a bridge.
//!
//! A [`Snapshot`] is the immutable input of one render: it is parsed
//! from the bridge JSON (`/lights` and `/groups` merged into one
//! object) and handed by reference to the
//! [`StyleComposer`](crate::style::StyleComposer).

use std::collections::BTreeMap;
use std::io::Read;
use rgb::RGB8;
use serde::Deserialize;
use tracing::{debug, trace};
use crate::convert::{hue_sat_to_rgb, Chromaticity};
use crate::Error;

pub(crate) mod ty;
pub use ty::{ColorMode, Group, GroupState, Light, LightState};

/// The color information carried by a [`LightState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorData {
    /// White light, or not enough data to tell the color.
    NoColor,
    /// Hue/saturation without a color point.
    HueSat { hue: u16, sat: u8 },
    Xy(Chromaticity),
}

impl ColorData {
    /// RGB color, if any.
    pub fn to_rgb(&self) -> Option<RGB8> {
        match self {
            ColorData::NoColor => None,
            ColorData::HueSat { hue, sat } => Some(hue_sat_to_rgb(*hue, *sat)),
            ColorData::Xy(c) => Some(c.to_rgb()),
        }
    }
}

impl LightState {
    /// Classify the color of the light.
    ///
    /// Only lights in `hs` or `xy` mode are colored (`ct` lights still
    /// report a color point, but it is the white they emulate).  The
    /// color point is preferred over hue/saturation.  A missing or
    /// null brightness means no color.
    pub fn color_data(&self) -> ColorData {
        let bri = match self.bri { Some(b) if b > 0 => b, _ => return ColorData::NoColor };
        if !matches!(self.colormode, Some(ColorMode::Xy | ColorMode::Hs)) {
            return ColorData::NoColor
        }
        match (self.xy, self.hue, self.sat) {
            (Some([x, y]), _, _) =>
                ColorData::Xy(Chromaticity { x, y, brightness: bri }),
            (None, Some(hue), Some(sat)) => ColorData::HueSat { hue, sat },
            _ => ColorData::NoColor,
        }
    }

    /// Brightness, 0 when unknown.
    #[inline]
    pub fn brightness(&self) -> u8 { self.bri.unwrap_or(0) }
}

impl Group {
    /// Whether at least one light of the group is on.
    #[inline]
    pub fn is_on(&self) -> bool { self.state.all_on || self.state.any_on }

    /// Whether the group is a room (as opposed to a zone, a light
    /// group or an entertainment area).  Dashboards usually show
    /// rooms only.
    #[inline]
    pub fn is_room(&self) -> bool { self.kind.eq_ignore_ascii_case("room") }
}

/// All lights and groups known to the bridge, keyed by identifier.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub lights: BTreeMap<String, Light>,
    pub groups: BTreeMap<String, Group>,
}

impl Snapshot {
    /// Parse a snapshot from JSON.
    ///
    /// ```
    /// use hue_brewery::telemetry::Snapshot;
    /// let s = Snapshot::from_json(r#"{"lights": {"1": {"name": "Desk",
    ///     "type": "Dimmable light", "state": {"on": true, "bri": 80}}}}"#)?;
    /// assert!(s.lights["1"].state.on);
    /// assert!(s.groups.is_empty());
    /// # Ok::<(), hue_brewery::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot from a JSON stream.
    pub fn from_reader(rdr: impl Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(rdr)?)
    }

    /// Light `id`, if the bridge knows it.
    #[inline]
    pub fn light(&self, id: &str) -> Option<&Light> { self.lights.get(id) }

    /// Member lights of `group` present in the snapshot.  Identifiers
    /// the bridge no longer lists are skipped.
    pub fn members<'a>(&'a self, group: &'a Group)
                       -> impl Iterator<Item = &'a Light> + 'a {
        group.lights.iter().filter_map(move |id| {
            let l = self.lights.get(id);
            if l.is_none() { trace!(group = %group.name, id = id.as_str(), "unknown member light") }
            l })
    }

    /// Turn off the lights the bridge cannot reach (it keeps reporting
    /// their last state) and update the group flags accordingly:
    /// `all_on` is cleared for groups holding an unreachable light and
    /// `any_on` is recomputed from the reachable members.  Return
    /// whether any light was forced off.
    pub fn mark_unreachable_off(&mut self) -> bool {
        let mut forced = false;
        for (id, light) in self.lights.iter_mut() {
            if !light.state.reachable && light.state.on {
                debug!(id = id.as_str(), name = %light.name, "unreachable light marked off");
                light.state.on = false;
                forced = true;
            }
        }
        let lights = &self.lights;
        for group in self.groups.values_mut() {
            let mut any_on = false;
            for light in group.lights.iter().filter_map(|id| lights.get(id)) {
                if !light.state.reachable { group.state.all_on = false }
                else if light.state.on { any_on = true }
            }
            group.state.any_on = any_on;
        }
        forced
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const BRIDGE: &str = r#"{
      "lights": {
        "1": {"name": "Sofa", "type": "Extended color light",
              "productname": "Hue color lamp",
              "state": {"on": true, "bri": 144, "hue": 7676, "sat": 199,
                        "effect": "none", "xy": [0.5016, 0.4151], "ct": 443,
                        "colormode": "xy", "reachable": true}},
        "2": {"name": "Hall", "type": "Color temperature light",
              "state": {"on": true, "bri": 254, "ct": 366,
                        "colormode": "ct", "reachable": false}},
        "3": {"name": "Strip", "type": "Color light",
              "state": {"on": false, "bri": 10, "hue": 46920, "sat": 254,
                        "colormode": "hs", "reachable": true}}
      },
      "groups": {
        "1": {"name": "Living", "type": "Room", "lights": ["1", "2", "9"],
              "state": {"all_on": true, "any_on": true},
              "action": {"on": true, "bri": 144, "colormode": "xy",
                         "xy": [0.5016, 0.4151]}}
      }
    }"#;

    #[test]
    fn parse_bridge_json() {
        let s = Snapshot::from_json(BRIDGE).unwrap();
        assert_eq!(s.lights.len(), 3);
        let sofa = &s.lights["1"];
        assert_eq!(sofa.kind, "Extended color light");
        assert_eq!(sofa.productname.as_deref(), Some("Hue color lamp"));
        assert_eq!(sofa.state.colormode, Some(ColorMode::Xy));
        assert_eq!(s.lights["2"].state.colormode, Some(ColorMode::Ct));
        assert!(s.groups["1"].is_on());
        assert!(s.groups["1"].action.reachable);
        assert!(s.groups["1"].is_room());
        let zone = Group { kind: "Zone".to_string(), ..s.groups["1"].clone() };
        assert!(!zone.is_room());
        assert!(Snapshot::from_json("{\"lights\": 3}").is_err());
    }

    #[test]
    fn unknown_color_mode() {
        let st: LightState = serde_json::from_str(
            r#"{"on": true, "bri": 3, "colormode": "gradient"}"#).unwrap();
        assert_eq!(st.colormode, Some(ColorMode::Other));
        assert!(st.reachable);
    }

    #[test]
    fn color_data_variants() {
        let s = Snapshot::from_json(BRIDGE).unwrap();
        assert!(matches!(s.lights["1"].state.color_data(),
                         ColorData::Xy(Chromaticity { brightness: 144, .. })));
        assert_eq!(s.lights["2"].state.color_data(), ColorData::NoColor);
        assert_eq!(s.lights["3"].state.color_data(),
                   ColorData::HueSat { hue: 46920, sat: 254 });
        let dark = LightState { bri: Some(0), ..s.lights["1"].state.clone() };
        assert_eq!(dark.color_data(), ColorData::NoColor);
        assert_eq!(ColorData::NoColor.to_rgb(), None);
    }

    #[test]
    fn members_skip_unknown_ids() {
        let s = Snapshot::from_json(BRIDGE).unwrap();
        let names: Vec<&str> = s.members(&s.groups["1"])
            .map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Sofa", "Hall"]);
    }

    #[test]
    fn unreachable_lights_are_turned_off() {
        let mut s = Snapshot::from_json(BRIDGE).unwrap();
        assert!(s.mark_unreachable_off());
        assert!(!s.lights["2"].state.on);
        let living = &s.groups["1"].state;
        assert!(!living.all_on);
        assert!(living.any_on);
        assert!(!s.mark_unreachable_off());
    }
}
