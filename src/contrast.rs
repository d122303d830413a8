// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast evaluation - WCAG 1.4.3 Contrast (Minimum), 1.4.6 Contrast (Enhanced)
//!
//! Resolves CSS color strings into [`ColorSample`]s and computes the WCAG 2.1
//! relative luminance and contrast ratio between two of them.
//! - AAA: 7:1 for normal text
//! - AA: 4.5:1 for normal text

use crate::error::ColorParseError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Minimum ratio for WCAG AA normal text
pub const AA_NORMAL_TEXT: f64 = 4.5;

/// Minimum ratio for WCAG AAA normal text
pub const AAA_NORMAL_TEXT: f64 = 7.0;

/// Normalised channel value at or below which sRGB is linear
const LINEAR_THRESHOLD: f64 = 0.03928;

/// A resolved color: three 8-bit channels plus alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSample {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// 255 is fully opaque, 0 fully transparent
    pub alpha: u8,
}

impl ColorSample {
    /// An opaque color
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue, alpha: 255 }
    }

    /// A color with explicit alpha
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self { red, green, blue, alpha }
    }

    pub const BLACK: ColorSample = ColorSample::rgb(0, 0, 0);
    pub const WHITE: ColorSample = ColorSample::rgb(255, 255, 255);
    pub const TRANSPARENT: ColorSample = ColorSample::rgba(0, 0, 0, 0);

    /// Whether the color contributes nothing when painted
    pub fn is_transparent(&self) -> bool {
        self.alpha == 0
    }

    /// `#rrggbb` form, ignoring alpha
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for ColorSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha == 255 {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "{}{:02x}", self.to_hex(), self.alpha)
        }
    }
}

impl std::str::FromStr for ColorSample {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

/// Compliance level reached by a contrast ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContrastLevel {
    AAA,
    AA,
    #[serde(rename = "fail")]
    Fail,
}

impl ContrastLevel {
    pub fn passed(&self) -> bool {
        !matches!(self, ContrastLevel::Fail)
    }
}

impl fmt::Display for ContrastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContrastLevel::AAA => write!(f, "AAA"),
            ContrastLevel::AA => write!(f, "AA"),
            ContrastLevel::Fail => write!(f, "fail"),
        }
    }
}

/// Outcome of evaluating one foreground/background pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    pub foreground: ColorSample,
    pub background: ColorSample,
    pub ratio: f64,
    pub level: ContrastLevel,
    pub passed: bool,
}

impl ContrastResult {
    /// Evaluate two already-resolved colors
    pub fn between(foreground: ColorSample, background: ColorSample) -> Self {
        let ratio = contrast_ratio(foreground, background);
        let level = classify(ratio);
        Self { foreground, background, ratio, level, passed: level.passed() }
    }
}

/// Parse and evaluate a foreground/background pair of CSS color strings
pub fn evaluate_contrast(foreground: &str, background: &str) -> Result<ContrastResult, ColorParseError> {
    let fg = parse_color(foreground)?;
    let bg = parse_color(background)?;
    Ok(ContrastResult::between(fg, bg))
}

/// Calculate relative luminance per WCAG 2.1
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn relative_luminance(color: ColorSample) -> f64 {
    let linear = [color.red, color.green, color.blue].map(|c| {
        let v = c as f64 / 255.0;
        if v <= LINEAR_THRESHOLD {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * linear[0] + 0.7152 * linear[1] + 0.0722 * linear[2]
}

/// Calculate contrast ratio between two colors, in [1.0, 21.0]
pub fn contrast_ratio(a: ColorSample, b: ColorSample) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Classify a ratio against the normal-text thresholds
pub fn classify(ratio: f64) -> ContrastLevel {
    if ratio >= AAA_NORMAL_TEXT {
        ContrastLevel::AAA
    } else if ratio >= AA_NORMAL_TEXT {
        ContrastLevel::AA
    } else {
        ContrastLevel::Fail
    }
}

/// Whether a ratio satisfies a caller-supplied minimum
pub fn meets_threshold(ratio: f64, minimum: f64) -> bool {
    ratio >= minimum
}

/// Parse any supported CSS color value
pub fn parse_color(value: &str) -> Result<ColorSample, ColorParseError> {
    let trimmed = value.trim().to_ascii_lowercase();
    if trimmed.starts_with('#') {
        parse_hex_color(&trimmed)
    } else if trimmed.starts_with("rgb") {
        parse_rgb_color(&trimmed)
    } else {
        parse_named_color(&trimmed).ok_or_else(|| ColorParseError::Unrecognised(value.to_string()))
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
pub fn parse_hex_color(value: &str) -> Result<ColorSample, ColorParseError> {
    let unrecognised = || ColorParseError::Unrecognised(value.to_string());
    let hex = value.trim().strip_prefix('#').ok_or_else(unrecognised)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(unrecognised());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| unrecognised());
    match hex.len() {
        3 => Ok(ColorSample::rgb(
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        6 => Ok(ColorSample::rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        8 => Ok(ColorSample::rgba(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => Err(unrecognised()),
    }
}

fn rgb_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*(\d*\.?\d+)\s*)?\)$",
        )
        .expect("valid regex")
    })
}

/// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)`
pub fn parse_rgb_color(value: &str) -> Result<ColorSample, ColorParseError> {
    let trimmed = value.trim();
    let caps = rgb_regex()
        .captures(trimmed)
        .ok_or_else(|| ColorParseError::Unrecognised(value.to_string()))?;

    let channel = |idx: usize| -> Result<u8, ColorParseError> {
        caps[idx]
            .parse::<u16>()
            .ok()
            .and_then(|c| u8::try_from(c).ok())
            .ok_or_else(|| ColorParseError::ChannelOutOfRange(value.to_string()))
    };

    let alpha = match caps.get(4) {
        Some(a) => {
            let a: f64 = a
                .as_str()
                .parse()
                .map_err(|_| ColorParseError::Unrecognised(value.to_string()))?;
            alpha_byte(a)
        }
        None => 255,
    };

    Ok(ColorSample::rgba(channel(1)?, channel(2)?, channel(3)?, alpha))
}

/// Scale a CSS alpha to a byte; only an alpha of exactly 0 maps to 0
fn alpha_byte(alpha: f64) -> u8 {
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha == 0.0 {
        return 0;
    }
    ((alpha * 255.0).round() as u8).max(1)
}

/// Parse a named CSS color
pub fn parse_named_color(name: &str) -> Option<ColorSample> {
    let rgb = match name {
        "transparent" => return Some(ColorSample::TRANSPARENT),
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "lime" => (0, 255, 0),
        "aqua" | "cyan" => (0, 255, 255),
        "teal" => (0, 128, 128),
        "navy" => (0, 0, 128),
        "fuchsia" | "magenta" => (255, 0, 255),
        "purple" => (128, 0, 128),
        "orange" => (255, 165, 0),
        _ => return None,
    };
    Some(ColorSample::rgb(rgb.0, rgb.1, rgb.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_color("#fff"), Ok(ColorSample::WHITE));
        assert_eq!(parse_color("#000000"), Ok(ColorSample::BLACK));
        assert_eq!(parse_color("#FF0000"), Ok(ColorSample::rgb(255, 0, 0)));
        assert_eq!(parse_color("#00ff0080"), Ok(ColorSample::rgba(0, 255, 0, 128)));
    }

    #[test]
    fn test_parse_rgb_color() {
        assert_eq!(parse_color("rgb(255, 0, 0)"), Ok(ColorSample::rgb(255, 0, 0)));
        assert_eq!(parse_color("rgba(0, 128, 0, 0.5)"), Ok(ColorSample::rgba(0, 128, 0, 128)));
        assert!(parse_color("rgba(0, 0, 0, 0)").unwrap().is_transparent());
        assert!(parse_color("transparent").unwrap().is_transparent());
    }

    #[test]
    fn test_tiny_alpha_is_not_transparent() {
        let faint = parse_color("rgba(255, 255, 255, 0.001)").unwrap();
        assert_eq!(faint.alpha, 1);
        assert!(!faint.is_transparent());
        assert_eq!(parse_color("rgba(0, 0, 0, 0.0)").unwrap().alpha, 0);
        assert_eq!(parse_color("rgba(0, 0, 0, 1)").unwrap().alpha, 255);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_color("hsl(0, 0%, 0%)"), Err(ColorParseError::Unrecognised(_))));
        assert!(matches!(parse_color("#ggg"), Err(ColorParseError::Unrecognised(_))));
        assert!(matches!(parse_color("#+ff"), Err(ColorParseError::Unrecognised(_))));
        assert!(matches!(parse_color("#12345"), Err(ColorParseError::Unrecognised(_))));
        assert!(matches!(parse_color("rgb(300, 0, 0)"), Err(ColorParseError::ChannelOutOfRange(_))));
        assert!(parse_color("").is_err());
    }

    #[test]
    fn test_relative_luminance() {
        assert!((relative_luminance(ColorSample::WHITE) - 1.0).abs() < 1e-9);
        assert_eq!(relative_luminance(ColorSample::BLACK), 0.0);
    }

    #[test]
    fn test_linear_segment_uses_wcag_threshold() {
        // 10/255 ~ 0.0392 sits on the linear side of 0.03928
        let dark = ColorSample::rgb(10, 10, 10);
        let expected = (10.0 / 255.0) / 12.92;
        assert!((relative_luminance(dark) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio(ColorSample::BLACK, ColorSample::WHITE);
        assert!((ratio - 21.0).abs() < 1e-9, "Black on white should be 21:1, got {}", ratio);
    }

    #[test]
    fn test_contrast_ratio_same_color() {
        for c in [ColorSample::BLACK, ColorSample::WHITE, ColorSample::rgb(128, 64, 200)] {
            assert_eq!(contrast_ratio(c, c), 1.0);
        }
    }

    #[test]
    fn test_contrast_ratio_symmetric() {
        let samples = [
            ColorSample::rgb(0x77, 0x77, 0x77),
            ColorSample::rgb(0x12, 0xab, 0xef),
            ColorSample::rgb(255, 165, 0),
            ColorSample::rgb(3, 7, 9),
            ColorSample::WHITE,
        ];
        for a in samples {
            for b in samples {
                assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
                let ratio = contrast_ratio(a, b);
                assert!((1.0..=21.0 + 1e-9).contains(&ratio));
            }
        }
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(4.5), ContrastLevel::AA);
        assert_eq!(classify(4.499999), ContrastLevel::Fail);
        assert_eq!(classify(7.0), ContrastLevel::AAA);
        assert_eq!(classify(6.999999), ContrastLevel::AA);
        assert!(classify(4.5).passed());
        assert!(!classify(1.0).passed());
    }

    #[test]
    fn test_near_boundary_gray_fails() {
        let result = evaluate_contrast("#777777", "#FFFFFF").unwrap();
        assert!((result.ratio - 4.48).abs() < 0.01, "got {}", result.ratio);
        assert_eq!(result.level, ContrastLevel::Fail);
        assert!(!result.passed);
    }

    #[test]
    fn test_dark_gray_reaches_aaa() {
        let result = evaluate_contrast("#595959", "#FFFFFF").unwrap();
        assert!(result.ratio >= 7.0, "got {}", result.ratio);
        assert_eq!(result.level, ContrastLevel::AAA);
        assert!(result.passed);
    }

    #[test]
    fn test_evaluate_contrast_parse_error() {
        assert!(evaluate_contrast("not-a-color", "#fff").is_err());
        assert!(evaluate_contrast("#000", "nope").is_err());
    }

    #[test]
    fn test_level_serializes_as_spelled() {
        assert_eq!(serde_json::to_string(&ContrastLevel::Fail).unwrap(), "\"fail\"");
        assert_eq!(serde_json::to_string(&ContrastLevel::AAA).unwrap(), "\"AAA\"");
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(ColorSample::rgb(255, 0, 16).to_string(), "#ff0010");
        assert_eq!(ColorSample::rgba(0, 0, 0, 0).to_string(), "#00000000");
    }
}
