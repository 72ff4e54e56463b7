//! WCAG relative luminance and contrast, used to pick a legible text
//! color over a light's background.

use rgb::RGB8;
use serde::Serialize;

/// Reference every background is compared against.
pub const WHITE: RGB8 = RGB8 { r: 255, g: 255, b: 255 };

/// Relative luminance of `c` in \[0, 1\] (WCAG 2 definition).
pub fn luminance(c: RGB8) -> f64 {
    fn linear(v: u8) -> f64 {
        let v = f64::from(v) / 255.;
        if v <= 0.03928 { v / 12.92 } else { ((v + 0.055) / 1.055).powf(2.4) }
    }
    0.2126 * linear(c.r) + 0.7152 * linear(c.g) + 0.0722 * linear(c.b)
}

/// Contrast ratio between `a` and `b`, in \[1, 21\].  The order of
/// the arguments does not matter.
///
/// ```
/// use hue_brewery::{RGB8, contrast::{contrast_ratio, WHITE}};
/// let black = RGB8::new(0, 0, 0);
/// assert!((contrast_ratio(WHITE, black) - 21.).abs() < 1e-9);
/// ```
pub fn contrast_ratio(a: RGB8, b: RGB8) -> f64 {
    let la = luminance(a) + 0.05;
    let lb = luminance(b) + 0.05;
    la.max(lb) / la.min(lb)
}

/// Text color to overlay on a background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Legibility {
    /// Light text, for dark or saturated backgrounds.
    Light,
    /// Dark text, for backgrounds close to white.
    Dark,
}

impl Legibility {
    /// Dark text when the contrast of `background` against white is at
    /// most `threshold`, light text otherwise.
    pub fn against_white(background: RGB8, threshold: f64) -> Self {
        if contrast_ratio(WHITE, background) <= threshold { Legibility::Dark }
        else { Legibility::Light }
    }

    /// CSS class suffix used by the dashboard templates.
    pub fn as_str(self) -> &'static str {
        match self {
            Legibility::Light => "light",
            Legibility::Dark => "dark",
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    #[test]
    fn luminance_extremes() {
        assert!(approx_eq(luminance(RGB8::new(0, 0, 0)), 0.));
        assert!(approx_eq(luminance(WHITE), 1.));
        assert!(approx_eq(luminance(RGB8::new(255, 0, 0)), 0.2126));
        assert!(approx_eq(luminance(RGB8::new(0, 0, 255)), 0.0722));
    }

    #[test]
    fn contrast_bounds() {
        assert!(approx_eq(contrast_ratio(WHITE, WHITE), 1.));
        assert!(approx_eq(contrast_ratio(WHITE, RGB8::new(0, 0, 0)), 21.));
        let c = RGB8::new(12, 200, 99);
        assert!(approx_eq(contrast_ratio(WHITE, c), contrast_ratio(c, WHITE)));
    }

    #[test]
    fn legibility_thresholds() {
        // Red against white ≈ 4.
        let red = RGB8::new(255, 0, 0);
        assert_eq!(Legibility::against_white(red, 2.), Legibility::Light);
        assert_eq!(Legibility::against_white(red, 4.5), Legibility::Dark);
        let pale = RGB8::new(255, 250, 230);
        assert_eq!(Legibility::against_white(pale, 1.5), Legibility::Dark);
        // The threshold itself counts as "not enough contrast".
        assert_eq!(Legibility::against_white(WHITE, 1.), Legibility::Dark);
    }
}
