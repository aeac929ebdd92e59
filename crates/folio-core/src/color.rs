//! Color handling for Folio documents
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are used for the renderer background and the
//! page title fill.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// assert_eq!(red.alpha(), 1.0);
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the red, green and blue components in sRGB, each in `0.0..=1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_core::color::Color;
    ///
    /// let [r, g, b] = Color::new("white").unwrap().to_rgb();
    /// assert_eq!((r, g, b), (1.0, 1.0, 1.0));
    /// ```
    pub fn to_rgb(&self) -> [f32; 3] {
        let [r, g, b, _] = self.color.to_alpha_color::<Srgb>().components;
        [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_color_new_valid() {
        assert!(Color::new("red").is_ok());
        assert!(Color::new("#F0F0F0").is_ok());
        assert!(Color::new("rgb(10, 20, 30)").is_ok());
    }

    #[test]
    fn test_color_new_invalid() {
        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_default_is_opaque_black() {
        let color = Color::default();
        assert_eq!(color.to_rgb(), [0.0, 0.0, 0.0]);
        assert_eq!(color.alpha(), 1.0);
    }

    #[test]
    fn test_to_rgb_hex() {
        let [r, g, b] = Color::new("#ff8000").unwrap().to_rgb();
        assert!(approx_eq!(f32, r, 1.0, epsilon = 0.001));
        assert!(approx_eq!(f32, g, 128.0 / 255.0, epsilon = 0.001));
        assert!(approx_eq!(f32, b, 0.0, epsilon = 0.001));
    }
}
