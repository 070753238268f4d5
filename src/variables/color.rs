//! Color handling for variable values
//!
//! The design tool stores colors as float channels in `[0, 1]`. This module projects
//! them into the 0-255 space CSS and the style framework expect.

use serde::{Deserialize, Serialize};

fn default_alpha() -> f64 {
    1.0
}

/// Represents a color with float RGBA channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

impl Rgba {
    /// Create a new color with full opacity
    pub fn new_rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn new_rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Get RGB components scaled to 0-255
    pub fn rgb(&self) -> (u8, u8, u8) {
        (to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Space separated channels, `"R G B"`, ready for `rgb(var(--x) / <alpha>)`.
    ///
    /// With `preserve_alpha` a translucent color becomes `"R G B / A"`; opaque colors
    /// are always emitted without the alpha part.
    pub fn to_channels(&self, preserve_alpha: bool) -> String {
        let (r, g, b) = self.rgb();
        if preserve_alpha && !self.is_opaque() {
            let alpha = (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
            format!("{} {} {} / {}", r, g, b, alpha)
        } else {
            format!("{} {} {}", r, g, b)
        }
    }

    /// Convert to hex string format (#rrggbb)
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Convert to hex string with alpha (#rrggbbaa)
    pub fn to_hex_with_alpha(&self) -> String {
        format!("{}{:02x}", self.to_hex(), to_byte(self.a))
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_projection() {
        let color = Rgba::new_rgb(1.0, 0.5, 0.0);
        assert_eq!(color.rgb(), (255, 128, 0));
        assert_eq!(color.to_channels(false), "255 128 0");
    }

    #[test]
    fn test_alpha_is_dropped_by_default() {
        let color = Rgba::new_rgba(0.0, 0.0, 0.0, 0.5);
        assert_eq!(color.to_channels(false), "0 0 0");
        assert_eq!(color.to_channels(true), "0 0 0 / 0.5");
    }

    #[test]
    fn test_opaque_color_ignores_preserve_alpha() {
        let color = Rgba::new_rgb(0.0, 0.0, 1.0);
        assert_eq!(color.to_channels(true), "0 0 255");
    }

    #[test]
    fn test_out_of_range_channels_are_clamped() {
        let color = Rgba::new_rgb(1.2, -0.1, 0.0);
        assert_eq!(color.rgb(), (255, 0, 0));
    }

    #[test]
    fn test_hex_output() {
        let color = Rgba::new_rgba(1.0, 0.0, 0.0, 0.0);
        assert_eq!(color.to_hex(), "#ff0000");
        assert_eq!(color.to_hex_with_alpha(), "#ff000000");
    }
}
