//! Styles of the dashboard tiles.
//!
//! [`StyleComposer`] turns the lights and groups of a [`Snapshot`]
//! into [`StyleDescriptor`]s: the background (solid color or
//! gradient), the text color that stays legible over it and how far
//! the brightness bar extends.  Descriptors are recomputed from
//! scratch for every snapshot.

use std::fmt;
use rgb::RGB8;
use serde::{Deserialize, Serialize, Serializer};
use tracing::trace;
use crate::cluster::{gradient_stops, order, GradientStop};
use crate::contrast::Legibility;
use crate::convert::css_hex;
use crate::telemetry::{Group, Light, Snapshot};

/// Tuning of the composed styles.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Contrast against white up to which a single light gets dark
    /// text.
    pub single_threshold: f64,
    /// Same for groups, checked on the first gradient stop.
    pub gradient_threshold: f64,
    /// Paint the light colors.  When `false`, descriptors carry no
    /// background but are otherwise unchanged.
    pub colored: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig { single_threshold: 1.5, gradient_threshold: 2.0,
                      colored: true }
    }
}

/// Background of a tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Solid(RGB8),
    /// At least two stops, left to right.
    Gradient(Vec<GradientStop>),
}

/// CSS declaration of the background.
impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Solid(c) => write!(f, "background-color: {};", css_hex(*c)),
            Background::Gradient(stops) => {
                write!(f, "background: linear-gradient(to right")?;
                for s in stops {
                    write!(f, ", {} {}%", css_hex(s.color), s.percent)?;
                }
                write!(f, ");")
            }
        }
    }
}

/// Extent of the brightness bar.
///
/// The bar does not grow linearly with the brightness: low values get
/// a fixed 20px head start and values close to the maximum fill the
/// whole tile, which matches how the brightness is perceived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrightnessScale {
    /// Below 91%: `calc((p - 1)% + 20px)`.
    Offset(i64),
    /// From 91% to 97%.
    Percent(i64),
    /// Above 97%.
    Full,
}

impl BrightnessScale {
    /// Scale for a device brightness (1 to 254, or an aggregate of
    /// several lights).
    ///
    /// ```
    /// use hue_brewery::style::BrightnessScale;
    /// assert_eq!(BrightnessScale::from_brightness(254.).to_string(), "100%");
    /// assert_eq!(BrightnessScale::from_brightness(1.).to_string(),
    ///            "calc(0% + 20px)");
    /// ```
    pub fn from_brightness(bri: f64) -> Self {
        let p = (100. / 254. * bri).ceil() as i64;
        if p < 91 { BrightnessScale::Offset(p) }
        else if p > 97 { BrightnessScale::Full }
        else { BrightnessScale::Percent(p) }
    }
}

/// CSS length of the bar.
impl fmt::Display for BrightnessScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrightnessScale::Offset(p) => write!(f, "calc({}% + 20px)", p - 1),
            BrightnessScale::Percent(p) => write!(f, "{p}%"),
            BrightnessScale::Full => f.write_str("100%"),
        }
    }
}

impl Serialize for BrightnessScale {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// What a tile shows, derived from the current state only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemState {
    Off,
    /// On, white or without color data.
    OnUncolored,
    OnColored,
}

/// Everything the templates need to draw a tile.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyleDescriptor {
    pub state: ItemState,
    pub background: Option<Background>,
    pub legibility: Legibility,
    /// Absent for tiles that are off.
    pub brightness: Option<BrightnessScale>,
    /// Text opacity for white lights, in \]0, 1\].
    pub opacity: Option<f64>,
    /// Number of lights on: 0 or 1 for a light, the members that are
    /// on for a group.
    pub lights_on: usize,
}

impl StyleDescriptor {
    fn off() -> Self {
        StyleDescriptor { state: ItemState::Off, background: None,
                          legibility: Legibility::Dark, brightness: None,
                          opacity: None, lights_on: 0 }
    }

    #[inline]
    pub fn is_on(&self) -> bool { self.state != ItemState::Off }
}

/// Text opacity over a white light: the brightness as a whole
/// percentage of 255, none when it rounds to 0, full above 98%.
fn white_opacity(bri: u8) -> Option<f64> {
    let p = (100. / 255. * f64::from(bri)).floor();
    if p <= 0. { None }
    else if p > 98. { Some(1.) }
    else { Some(p / 100.) }
}

/// A tile of the dashboard.
#[derive(Clone, Copy, Debug)]
pub enum Item<'a> {
    Light(&'a Light),
    Group(&'a Group),
}

/// Compose the styles of the items of a snapshot.
///
/// # Example
///
/// ```
/// use hue_brewery::{style::{StyleComposer, StyleConfig}, telemetry::Snapshot};
/// let snapshot = Snapshot::from_json(r#"{"lights": {"7": {"name": "Desk",
///     "state": {"on": true, "bri": 254, "colormode": "xy",
///               "xy": [0.7007, 0.2993]}}}}"#)?;
/// let styles = StyleComposer::new(&snapshot, StyleConfig::default());
/// let desk = styles.light("7").unwrap();
/// assert_eq!(desk.background.unwrap().to_string(),
///            "background-color: #ff0000;");
/// assert_eq!(desk.brightness.unwrap().to_string(), "100%");
/// # Ok::<(), hue_brewery::Error>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StyleComposer<'a> {
    snapshot: &'a Snapshot,
    config: StyleConfig,
}

impl<'a> StyleComposer<'a> {
    pub fn new(snapshot: &'a Snapshot, config: StyleConfig) -> Self {
        StyleComposer { snapshot, config }
    }

    #[inline]
    pub fn config(&self) -> &StyleConfig { &self.config }

    pub fn compose(&self, item: Item<'_>) -> StyleDescriptor {
        match item {
            Item::Light(l) => self.compose_light(l),
            Item::Group(g) => self.compose_group(g),
        }
    }

    /// Style of the light `id`, if the snapshot lists it.
    pub fn light(&self, id: &str) -> Option<StyleDescriptor> {
        self.snapshot.light(id).map(|l| self.compose_light(l))
    }

    /// Style of the group `id`, if the snapshot lists it.
    pub fn group(&self, id: &str) -> Option<StyleDescriptor> {
        self.snapshot.groups.get(id).map(|g| self.compose_group(g))
    }

    /// Styles of all lights, by identifier.
    pub fn lights(&self) -> impl Iterator<Item = (&'a str, StyleDescriptor)> + '_ {
        self.snapshot.lights.iter()
            .map(move |(id, l)| (id.as_str(), self.compose_light(l)))
    }

    /// Styles of all groups, by identifier.
    pub fn groups(&self) -> impl Iterator<Item = (&'a str, StyleDescriptor)> + '_ {
        self.snapshot.groups.iter()
            .map(move |(id, g)| (id.as_str(), self.compose_group(g)))
    }

    fn background(&self, b: Background) -> Option<Background> {
        if self.config.colored { Some(b) } else { None }
    }

    pub fn compose_light(&self, light: &Light) -> StyleDescriptor {
        let state = &light.state;
        if !state.on { return StyleDescriptor::off() }
        let bri = state.brightness();
        let brightness = Some(BrightnessScale::from_brightness(f64::from(bri)));
        match state.color_data().to_rgb() {
            Some(c) => StyleDescriptor {
                state: ItemState::OnColored,
                background: self.background(Background::Solid(c)),
                legibility: Legibility::against_white(
                    c, self.config.single_threshold),
                brightness,
                opacity: None,
                lights_on: 1,
            },
            None => StyleDescriptor {
                state: ItemState::OnUncolored,
                background: None,
                legibility: Legibility::Light,
                brightness,
                opacity: white_opacity(bri),
                lights_on: 1,
            },
        }
    }

    /// Style of a group.
    ///
    /// Colored member lights that are on are drawn as a gradient,
    /// ordered by [`order`], and the text color is chosen against the
    /// first stop.  The brightness is the total brightness of the
    /// members that are on divided by the number of *colored* ones;
    /// without colored members it is the plain total.
    pub fn compose_group(&self, group: &Group) -> StyleDescriptor {
        if !group.is_on() { return StyleDescriptor::off() }
        let mut lights_on = 0;
        let mut total = 0u32;
        let mut colors = vec![];
        for light in self.snapshot.members(group).filter(|l| l.state.on) {
            lights_on += 1;
            total += u32::from(light.state.brightness());
            if let Some(c) = light.state.color_data().to_rgb() {
                colors.push(c)
            }
        }
        if colors.is_empty() {
            trace!(group = %group.name, lights_on, "no colored light on");
            return StyleDescriptor {
                state: ItemState::OnUncolored,
                background: None,
                legibility: Legibility::Dark,
                brightness: Some(BrightnessScale::from_brightness(f64::from(total))),
                opacity: None,
                lights_on,
            }
        }
        let ordered = order(&colors);
        let first = ordered[0];
        let background = if ordered.len() > 1 {
            Background::Gradient(gradient_stops(&ordered))
        } else {
            Background::Solid(first)
        };
        let avg = f64::from(total) / colors.len() as f64;
        StyleDescriptor {
            state: ItemState::OnColored,
            background: self.background(background),
            legibility: Legibility::against_white(
                first, self.config.gradient_threshold),
            brightness: Some(BrightnessScale::from_brightness(avg)),
            opacity: None,
            lights_on,
        }
    }
}
