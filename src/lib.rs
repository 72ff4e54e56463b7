//! Colors and gradients for smart-light dashboards.
//!
//! - [`convert`]: device color points (CIE xy + brightness) to sRGB.
//! - [`contrast`]: WCAG luminance and contrast, to pick a legible
//!   [`Legibility`] for text drawn over a light's color.
//! - [`cluster`]: ordering of the colors of several lights so that a
//!   gradient through them has no harsh transitions.
//! - [`style`]: the [`StyleComposer`] putting everything together
//!   into one [`StyleDescriptor`] per light or group of a
//!   [`Snapshot`].
//!
//! ```
//! use hue_brewery::{Snapshot, StyleComposer, StyleConfig, style::ItemState};
//! let json = r#"{
//!   "lights": {
//!     "1": {"name": "Lamp", "state": {"on": true, "bri": 200,
//!           "colormode": "xy", "xy": [0.7007, 0.2993]}},
//!     "2": {"name": "Strip", "state": {"on": true, "bri": 200,
//!           "colormode": "xy", "xy": [0.11, 0.02]}}
//!   },
//!   "groups": {
//!     "1": {"name": "Office", "type": "Room", "lights": ["1", "2"],
//!           "state": {"all_on": true, "any_on": true}}
//!   }
//! }"#;
//! let snapshot = Snapshot::from_json(json)?;
//! let styles = StyleComposer::new(&snapshot, StyleConfig::default());
//! let office = styles.group("1").unwrap();
//! assert_eq!(office.state, ItemState::OnColored);
//! assert_eq!(office.background.unwrap().to_string(),
//!            "background: linear-gradient(to right, #ff0000 0%, #0000ff 100%);");
//! assert_eq!(office.brightness.unwrap().to_string(), "calc(78% + 20px)");
//! # Ok::<(), hue_brewery::Error>(())
//! ```
//!
//! All computations are pure functions of the snapshot; nothing is
//! cached between two renders.

pub use rgb::RGB8;

pub mod cluster;
pub mod contrast;
pub mod convert;
mod error;
pub mod style;
pub mod telemetry;

pub use contrast::Legibility;
pub use error::Error;
pub use style::{StyleComposer, StyleConfig, StyleDescriptor};
pub use telemetry::Snapshot;
