// wcag-audit-core/src/color.rs
// ============================================================================
// Module: Color Model
// Description: Color parsing, HSV conversion, and WCAG contrast computation.
// Purpose: Provide the numeric core for contrast assessment tools.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module implements the color model used by the contrast-check tool:
//! parsing of hex, `rgb()`, and `hsv()` notations into 8-bit RGB triples,
//! hex re-serialization, and the WCAG 2.x relative-luminance contrast
//! formula. All functions are pure; nothing here touches the browser or the
//! rules engine. The contrast math must stay bit-reproducible to two decimal
//! places because clients compare ratios against the WCAG thresholds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Font size in pixels at which regular-weight text counts as large.
const LARGE_TEXT_PX: f64 = 18.0;
/// Font size in pixels at which bold text counts as large.
const LARGE_BOLD_TEXT_PX: f64 = 14.0;
/// Required AA contrast ratio for normal text.
const AA_NORMAL: f64 = 4.5;
/// Required AA contrast ratio for large text.
const AA_LARGE: f64 = 3.0;
/// Required AAA contrast ratio for normal text.
const AAA_NORMAL: f64 = 7.0;
/// Required AAA contrast ratio for large text.
const AAA_LARGE: f64 = 4.5;

// ============================================================================
// SECTION: Color Types
// ============================================================================

/// An 8-bit RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel in `[0, 255]`.
    pub r: u8,
    /// Green channel in `[0, 255]`.
    pub g: u8,
    /// Blue channel in `[0, 255]`.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its three channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
        }
    }
}

/// Color model errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    /// The input matched none of the recognized color grammars.
    #[error("unsupported color format: {0}")]
    UnsupportedFormat(String),
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses a color expressed as `#RGB`, `#RRGGBB`, `rgb(r,g,b)`, or
/// `hsv(h,s%,v%)` into an RGB triple.
///
/// Matching is case-insensitive and tolerant of surrounding whitespace.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedFormat`] when the input matches none of
/// the recognized grammars, echoing the offending string.
pub fn parse_color(input: &str) -> Result<Rgb, ColorError> {
    let trimmed = input.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if let Some(hex) = lowered.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorError::UnsupportedFormat(input.to_string()));
    }
    if let Some(body) = function_body(&lowered, "rgb") {
        return parse_rgb_triplet(body)
            .ok_or_else(|| ColorError::UnsupportedFormat(input.to_string()));
    }
    if let Some(body) = function_body(&lowered, "hsv") {
        return parse_hsv_triplet(body)
            .ok_or_else(|| ColorError::UnsupportedFormat(input.to_string()));
    }
    Err(ColorError::UnsupportedFormat(input.to_string()))
}

/// Extracts the argument body of `name(...)` notation, if present.
fn function_body<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    input.strip_prefix(name)?.trim_start().strip_prefix('(')?.trim_end().strip_suffix(')')
}

/// Parses a 3- or 6-digit hex body into an RGB triple.
fn parse_hex(hex: &str) -> Option<Rgb> {
    match hex.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (idx, ch) in hex.chars().enumerate() {
                let digit = ch.to_digit(16)?;
                // #abc expands to #aabbcc: each digit doubles.
                channels[idx] = u8::try_from(digit * 16 + digit).ok()?;
            }
            Some(Rgb::new(channels[0], channels[1], channels[2]))
        }
        6 => {
            let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

/// Parses the body of `rgb(r,g,b)` with integer channels in `[0, 255]`.
fn parse_rgb_triplet(body: &str) -> Option<Rgb> {
    let mut parts = body.split(',');
    let r = parts.next()?.trim().parse::<u8>().ok()?;
    let g = parts.next()?.trim().parse::<u8>().ok()?;
    let b = parts.next()?.trim().parse::<u8>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgb::new(r, g, b))
}

/// Parses the body of `hsv(h,s%,v%)`; the percent signs are optional.
///
/// `h` must be in `[0, 360]`; out-of-range hues are rejected like
/// out-of-range `rgb()` channels, not clamped.
fn parse_hsv_triplet(body: &str) -> Option<Rgb> {
    let mut parts = body.split(',');
    let h = parts.next()?.trim().parse::<f64>().ok()?;
    if !(0.0..=360.0).contains(&h) {
        return None;
    }
    let s = parse_percent(parts.next()?)?;
    let v = parse_percent(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(hsv_to_rgb(h, s / 100.0, v / 100.0))
}

/// Parses a percent component, tolerating a trailing `%`.
fn parse_percent(part: &str) -> Option<f64> {
    let trimmed = part.trim();
    let numeric = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let value = numeric.parse::<f64>().ok()?;
    (0.0..=100.0).contains(&value).then_some(value)
}

// ============================================================================
// SECTION: Conversions
// ============================================================================

/// Converts an HSV color to RGB using the canonical six-sector table.
///
/// `h` is clamped to `[0, 360]` degrees; `s` and `v` are clamped to
/// `[0, 1]` before conversion.
#[must_use]
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let h = if h.is_finite() { h.clamp(0.0, 360.0) } else { 0.0 };
    let s = if s.is_finite() { s.clamp(0.0, 1.0) } else { 0.0 };
    let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
    let c = v * s;
    let sector = h / 60.0;
    let x = c * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match sector {
        s if s < 1.0 => (c, x, 0.0),
        s if s < 2.0 => (x, c, 0.0),
        s if s < 3.0 => (0.0, c, x),
        s if s < 4.0 => (0.0, x, c),
        s if s < 5.0 => (x, 0.0, c),
        // h == 360 lands here and wraps back to red.
        _ => (c, 0.0, x),
    };
    let m = v - c;
    Rgb::new(channel(r1 + m), channel(g1 + m), channel(b1 + m))
}

/// Scales a normalized channel to `[0, 255]` with rounding.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Value is clamped to the channel range before the cast."
)]
fn channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Renders a color as a lowercase `#rrggbb` string.
#[must_use]
pub fn rgb_to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

// ============================================================================
// SECTION: Contrast
// ============================================================================

/// Computes the WCAG 2.x contrast ratio between two colors, rounded to two
/// decimal places.
///
/// The maximum possible ratio (black on white) is 21.0; identical colors
/// yield 1.0. The function is symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let ratio = (la.max(lb) + 0.05) / (la.min(lb) + 0.05);
    round2(ratio)
}

/// Computes WCAG relative luminance for a color.
fn relative_luminance(color: Rgb) -> f64 {
    let r = linearize(f64::from(color.r) / 255.0);
    let g = linearize(f64::from(color.g) / 255.0);
    let b = linearize(f64::from(color.b) / 255.0);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Applies the sRGB transfer function to a normalized channel.
fn linearize(v: f64) -> f64 {
    if v <= 0.03928 { v / 12.92 } else { ((v + 0.055) / 1.055).powf(2.4) }
}

/// Rounds to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// SECTION: Contrast Assessment
// ============================================================================

/// A WCAG contrast assessment for a foreground/background pair at a given
/// font size and weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastAssessment {
    /// Foreground color as `#rrggbb`.
    pub foreground_color: String,
    /// Background color as `#rrggbb`.
    pub background_color: String,
    /// Font size in CSS pixels.
    pub font_size_px: f64,
    /// Whether the text is bold.
    pub is_bold: bool,
    /// Computed contrast ratio, rounded to two decimals.
    pub contrast_ratio: f64,
    /// Whether the text qualifies as WCAG large text.
    pub is_large_text: bool,
    /// Required ratio for AA conformance at this size/weight.
    #[serde(rename = "requiredRatioAA")]
    pub required_ratio_aa: f64,
    /// Required ratio for AAA conformance at this size/weight.
    #[serde(rename = "requiredRatioAAA")]
    pub required_ratio_aaa: f64,
    /// Whether the pair meets AA.
    #[serde(rename = "passesAA")]
    pub passes_aa: bool,
    /// Whether the pair meets AAA.
    #[serde(rename = "passesAAA")]
    pub passes_aaa: bool,
}

impl ContrastAssessment {
    /// Assesses a foreground/background pair against the WCAG thresholds.
    ///
    /// Large text is `>= 18px`, or `>= 14px` when bold; large text lowers
    /// the required ratios to 3.0 (AA) and 4.5 (AAA).
    #[must_use]
    pub fn assess(foreground: Rgb, background: Rgb, font_size_px: f64, is_bold: bool) -> Self {
        let ratio = contrast_ratio(foreground, background);
        let is_large_text =
            font_size_px >= LARGE_TEXT_PX || (font_size_px >= LARGE_BOLD_TEXT_PX && is_bold);
        let required_ratio_aa = if is_large_text { AA_LARGE } else { AA_NORMAL };
        let required_ratio_aaa = if is_large_text { AAA_LARGE } else { AAA_NORMAL };
        Self {
            foreground_color: rgb_to_hex(foreground),
            background_color: rgb_to_hex(background),
            font_size_px,
            is_bold,
            contrast_ratio: ratio,
            is_large_text,
            required_ratio_aa,
            required_ratio_aaa,
            passes_aa: ratio >= required_ratio_aa,
            passes_aaa: ratio >= required_ratio_aaa,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        clippy::dbg_macro,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::float_cmp,
        reason = "Test-only assertions on exact rounded values."
    )]

    use proptest::prelude::*;

    use super::ColorError;
    use super::ContrastAssessment;
    use super::Rgb;
    use super::contrast_ratio;
    use super::hsv_to_rgb;
    use super::parse_color;
    use super::rgb_to_hex;

    const BLACK: Rgb = Rgb::new(0, 0, 0);
    const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[test]
    fn parse_color_accepts_long_hex() {
        assert_eq!(parse_color("#1a2B3c").unwrap(), Rgb::new(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn parse_color_expands_short_hex() {
        assert_eq!(parse_color("#f0c").unwrap(), Rgb::new(0xff, 0x00, 0xcc));
    }

    #[test]
    fn parse_color_accepts_rgb_notation() {
        assert_eq!(parse_color(" RGB(12, 34, 255) ").unwrap(), Rgb::new(12, 34, 255));
    }

    #[test]
    fn parse_color_accepts_hsv_notation() {
        assert_eq!(parse_color("hsv(0, 100%, 100%)").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(parse_color("hsv(240, 100, 100)").unwrap(), Rgb::new(0, 0, 255));
    }

    #[test]
    fn parse_color_rejects_out_of_range_hue() {
        for input in ["hsv(720, 50%, 50%)", "hsv(-1, 100%, 100%)", "hsv(360.5, 0%, 0%)"] {
            assert_eq!(
                parse_color(input),
                Err(ColorError::UnsupportedFormat(input.to_string())),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_color_rejects_unknown_grammars() {
        for input in ["", "#12", "#12345", "rgb(300,0,0)", "rgb(1,2)", "hsl(0,0%,0%)", "blue"] {
            assert_eq!(
                parse_color(input),
                Err(ColorError::UnsupportedFormat(input.to_string())),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn hsv_primaries_map_to_pure_channels() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn hsv_zero_saturation_is_grayscale() {
        for h in [0.0, 42.0, 199.0, 360.0] {
            assert_eq!(hsv_to_rgb(h, 0.0, 0.5), Rgb::new(128, 128, 128));
        }
    }

    #[test]
    fn hsv_full_circle_wraps_to_red() {
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), Rgb::new(255, 0, 0));
    }

    #[test]
    fn rgb_to_hex_is_lowercase_and_padded() {
        assert_eq!(rgb_to_hex(Rgb::new(0, 10, 255)), "#000aff");
    }

    #[test]
    fn contrast_black_on_white_is_maximal() {
        assert_eq!(contrast_ratio(BLACK, WHITE), 21.0);
    }

    #[test]
    fn contrast_of_identical_colors_is_one() {
        for color in [BLACK, WHITE, Rgb::new(12, 200, 99)] {
            assert_eq!(contrast_ratio(color, color), 1.0);
        }
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = Rgb::new(33, 66, 99);
        let b = Rgb::new(240, 240, 10);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn assessment_black_on_white_normal_text() {
        let assessment = ContrastAssessment::assess(BLACK, WHITE, 16.0, false);
        assert!(!assessment.is_large_text);
        assert_eq!(assessment.required_ratio_aa, 4.5);
        assert_eq!(assessment.required_ratio_aaa, 7.0);
        assert!(assessment.passes_aa);
        assert!(assessment.passes_aaa);
    }

    #[test]
    fn assessment_large_text_lowers_thresholds() {
        let assessment = ContrastAssessment::assess(BLACK, WHITE, 20.0, false);
        assert!(assessment.is_large_text);
        assert_eq!(assessment.required_ratio_aa, 3.0);
        assert_eq!(assessment.required_ratio_aaa, 4.5);
    }

    #[test]
    fn assessment_bold_text_is_large_at_fourteen_px() {
        assert!(ContrastAssessment::assess(BLACK, WHITE, 14.0, true).is_large_text);
        assert!(!ContrastAssessment::assess(BLACK, WHITE, 14.0, false).is_large_text);
    }

    proptest! {
        #[test]
        fn hex_round_trip_preserves_channels(r: u8, g: u8, b: u8) {
            let color = Rgb::new(r, g, b);
            prop_assert_eq!(parse_color(&rgb_to_hex(color)).unwrap(), color);
        }

        #[test]
        fn contrast_stays_within_wcag_bounds(r: u8, g: u8, b: u8) {
            let ratio = contrast_ratio(Rgb::new(r, g, b), WHITE);
            prop_assert!((1.0..=21.0).contains(&ratio));
        }
    }
}
