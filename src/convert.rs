//! Conversion of device colors to 8-bit sRGB.
//!
//! Lights report their color as a point of the CIE 1931 xy diagram
//! together with a brightness in 1..=254.  [`xy_to_rgb`] maps it to
//! sRGB using the "Wide RGB D65" matrix, keeping the hue of colors
//! that fall out of the gamut by scaling them against their dominant
//! channel.

use rgb::RGB8;
use tracing::debug;

/// Brightness assumed when a light does not report one.
pub const DEFAULT_BRIGHTNESS: u8 = 254;

/// A color point as reported by a light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chromaticity {
    /// CIE x coordinate in \[0, 1\].
    pub x: f64,
    /// CIE y coordinate in \[0, 1\].  Must be non-zero.
    pub y: f64,
    /// Device brightness, from 1 (dimmest) to 254.
    pub brightness: u8,
}

impl Chromaticity {
    /// Color point with the [`DEFAULT_BRIGHTNESS`].
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Chromaticity { x, y, brightness: DEFAULT_BRIGHTNESS }
    }

    /// See [`xy_to_rgb`].
    #[inline]
    pub fn to_rgb(&self) -> RGB8 { xy_to_rgb(self.x, self.y, self.brightness) }
}

/// Scale an out of gamut color by its dominant channel.  Only a
/// channel strictly larger than the two others is considered.
fn normalize_gamut([r, g, b]: [f64; 3]) -> [f64; 3] {
    if r > g && r > b && r > 1. { [1., g / r, b / r] }
    else if g > r && g > b && g > 1. { [r / g, 1., b / g] }
    else if b > r && b > g && b > 1. { [r / b, g / b, 1.] }
    else { [r, g, b] }
}

/// sRGB transfer function (linear → display referred).
#[inline]
fn gamma_encode(c: f64) -> f64 {
    if c <= 0.0031308 { 12.92 * c } else { 1.055 * c.powf(1. / 2.4) - 0.055 }
}

#[inline]
fn to_u8(c: f64) -> u8 {
    let c = (c * 255.).round();
    if c.is_nan() { 0 } else { c.clamp(0., 255.) as u8 }
}

/// Return the RGB color of the point (`x`, `y`) of the CIE diagram
/// at the device `brightness`.
///
/// The brightness is used as is for the Y component (it is not
/// normalized to \[0, 1\]), which is how the bridge firmware treats
/// it.  A degenerate `y == 0` gives black.
///
/// # Example
///
/// ```
/// use hue_brewery::convert::xy_to_rgb;
/// let red = xy_to_rgb(0.7007, 0.2993, 254);
/// assert_eq!((red.r, red.g, red.b), (255, 0, 0));
/// ```
pub fn xy_to_rgb(x: f64, y: f64, brightness: u8) -> RGB8 {
    if y == 0. || !x.is_finite() || !y.is_finite() {
        debug!(x, y, "degenerate chromaticity, using black");
        return RGB8::new(0, 0, 0);
    }
    let z = 1. - x - y;
    let cap_y = f64::from(brightness);
    let cap_x = (cap_y / y) * x;
    let cap_z = (cap_y / y) * z;
    let r = 1.656492 * cap_x - 0.354851 * cap_y - 0.255038 * cap_z;
    let g = -0.707196 * cap_x + 1.655397 * cap_y + 0.036152 * cap_z;
    let b = 0.051713 * cap_x - 0.121364 * cap_y + 1.011530 * cap_z;
    let linear = normalize_gamut([r, g, b]);
    // Gamma may push the dominant channel above 1 again.
    let [r, g, b] = normalize_gamut(linear.map(gamma_encode));
    RGB8::new(to_u8(r), to_u8(g), to_u8(b))
}

/// Return the RGB color of a light driven in hue/saturation mode.
///
/// `hue` wraps around 0..=65535 (both ends are red, 25500 is green
/// and 46920 blue) and `sat` goes from 0 (white) to 254.  The color
/// is taken at full value; brightness is rendered separately.
pub fn hue_sat_to_rgb(hue: u16, sat: u8) -> RGB8 {
    let h = (f64::from(hue) / 65535. * 360.) % 360.;
    let s = (f64::from(sat) / 254.).min(1.);
    let c = s;
    let x = c * (1. - ((h / 60.) % 2. - 1.).abs());
    let m = 1. - c;
    let (r, g, b) = {
        if h < 60. { (c, x, 0.) }
        else if h < 120. { (x, c, 0.) }
        else if h < 180. { (0., c, x) }
        else if h < 240. { (0., x, c) }
        else if h < 300. { (x, 0., c) }
        else { (c, 0., x) } };
    RGB8::new(to_u8(r + m), to_u8(g + m), to_u8(b + m))
}

/// CSS hexadecimal notation `#rrggbb` of the color.
pub fn css_hex(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}
