use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{StripletError, StripletResult};

/// Horizontal alignment of an entity inside its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical alignment of an entity inside its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

/// Facing direction of a character. Assets are authored facing right; a
/// left-facing character is drawn mirrored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

/// Cosmetic dialog bubble tag. Carried onto the text node as a class, never
/// consulted by layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleStyle {
    Rounded,
    Square,
    Thought,
}

impl HAlign {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl VAlign {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(Self::Top),
            "middle" => Some(Self::Middle),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn as_name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

impl Direction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl BubbleStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rounded" => Some(Self::Rounded),
            "square" => Some(Self::Square),
            "thought" => Some(Self::Thought),
            _ => None,
        }
    }

    pub fn as_name(self) -> &'static str {
        match self {
            Self::Rounded => "rounded",
            Self::Square => "square",
            Self::Thought => "thought",
        }
    }
}

// Alignment names arrive from callers as free-form strings. An unrecognized
// name deserializes to "absent" so the entity-specific default is
// substituted downstream; it is never a deserialization error.

fn lenient_h_align<'de, D: Deserializer<'de>>(d: D) -> Result<Option<HAlign>, D::Error> {
    let name = Option::<String>::deserialize(d)?;
    Ok(name.as_deref().and_then(HAlign::from_name))
}

fn lenient_v_align<'de, D: Deserializer<'de>>(d: D) -> Result<Option<VAlign>, D::Error> {
    let name = Option::<String>::deserialize(d)?;
    Ok(name.as_deref().and_then(VAlign::from_name))
}

fn lenient_direction<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Direction>, D::Error> {
    let name = Option::<String>::deserialize(d)?;
    Ok(name.as_deref().and_then(Direction::from_name))
}

fn lenient_style<'de, D: Deserializer<'de>>(d: D) -> Result<Option<BubbleStyle>, D::Error> {
    let name = Option::<String>::deserialize(d)?;
    Ok(name.as_deref().and_then(BubbleStyle::from_name))
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Comic construction options.
///
/// Absent options fall back to documented defaults. So do zero-valued
/// numeric options and empty strings: a caller cannot set a numeric option
/// to 0 (documented quirk, kept for interface compatibility).
pub struct ComicConfig {
    /// Author name (defaults to "A. N. Onymous").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Copyright statement (defaults to "© YEAR AUTHOR. All rights reserved.").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    /// Gutter color (defaults to black).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Font size for title/author/subtitle/copyright and dialog stacking
    /// (defaults to 12).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Comic height (defaults to 300).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Secondary/episode title (defaults to blank).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Color for header/footer text (defaults to white).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Title (defaults to "Untitled").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Comic width (defaults to 800).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Horizontal gutter between and around panels (defaults to 10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_gutter: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Panel construction options.
pub struct PanelConfig {
    /// Panel width. A nonzero value fixes the panel's width; otherwise the
    /// panel shares leftover space with the other flexible panels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Panel height (defaults to comic height minus header/footer bands).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Initial x-position (recomputed on every relayout).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// y-position (defaults to the header band height).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Background color (defaults to "aliceblue").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Character construction options.
pub struct CharacterConfig {
    /// SVG file representing the character (defaults to
    /// "assets/characters/default.svg").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Vertical alignment (defaults to bottom; unrecognized names normalize
    /// to the default).
    #[serde(deserialize_with = "lenient_v_align", skip_serializing_if = "Option::is_none")]
    pub v_align: Option<VAlign>,
    /// Horizontal alignment (defaults to left).
    #[serde(deserialize_with = "lenient_h_align", skip_serializing_if = "Option::is_none")]
    pub h_align: Option<HAlign>,
    /// Facing direction (defaults to right).
    #[serde(deserialize_with = "lenient_direction", skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Initial x-offset, superseded by alignment on the first relayout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Initial y-offset, superseded by alignment on the first relayout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Dialog construction options.
pub struct DialogConfig {
    /// Dialog text (defaults to empty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Bubble style tag (defaults to rounded).
    #[serde(deserialize_with = "lenient_style", skip_serializing_if = "Option::is_none")]
    pub style: Option<BubbleStyle>,
    /// Horizontal alignment (defaults to the owning character's).
    #[serde(deserialize_with = "lenient_h_align", skip_serializing_if = "Option::is_none")]
    pub h_align: Option<HAlign>,
    /// Vertical alignment (defaults to top).
    #[serde(deserialize_with = "lenient_v_align", skip_serializing_if = "Option::is_none")]
    pub v_align: Option<VAlign>,
}

/// Apply the falsy-fallback rule to a numeric option.
pub(crate) fn non_zero_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 => v,
        _ => default,
    }
}

/// Apply the falsy-fallback rule to a string option.
pub(crate) fn non_empty_or(value: &Option<String>, default: &str) -> String {
    match value {
        Some(s) if !s.is_empty() => s.clone(),
        _ => default.to_string(),
    }
}

/// Boundary validation: the layout core assumes finite, non-negative sizes.
pub(crate) fn finite_dimension(name: &str, value: f64) -> StripletResult<f64> {
    if !value.is_finite() {
        return Err(StripletError::invalid_dimension(format!(
            "{name} must be finite, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(StripletError::invalid_dimension(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    Ok(value)
}

/// Default copyright line generated from the current year and author.
pub(crate) fn default_copyright(author: &str) -> String {
    format!("© {} {}. All rights reserved.", current_year(), author)
}

// Civil-from-days conversion; enough calendar math for a copyright year.
fn current_year() -> i64 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let z = (secs / 86_400) as i64 + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400;
    if month <= 2 { year + 1 } else { year }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_values_fall_back_to_defaults() {
        assert_eq!(non_zero_or(None, 12.0), 12.0);
        assert_eq!(non_zero_or(Some(0.0), 12.0), 12.0);
        assert_eq!(non_zero_or(Some(14.0), 12.0), 14.0);

        assert_eq!(non_empty_or(&None, "Untitled"), "Untitled");
        assert_eq!(non_empty_or(&Some(String::new()), "Untitled"), "Untitled");
        assert_eq!(non_empty_or(&Some("Strip".into()), "Untitled"), "Strip");
    }

    #[test]
    fn dimension_validation_rejects_bad_input() {
        assert!(finite_dimension("width", f64::NAN).is_err());
        assert!(finite_dimension("width", f64::INFINITY).is_err());
        assert!(finite_dimension("width", -1.0).is_err());
        assert_eq!(finite_dimension("width", 800.0).unwrap(), 800.0);
    }

    #[test]
    fn unrecognized_alignment_names_normalize_to_absent() {
        let cfg: CharacterConfig =
            serde_json::from_str(r#"{"vAlign": "sideways", "hAlign": "middle-out"}"#).unwrap();
        assert_eq!(cfg.v_align, None);
        assert_eq!(cfg.h_align, None);

        let cfg: CharacterConfig =
            serde_json::from_str(r#"{"vAlign": "middle", "direction": "left"}"#).unwrap();
        assert_eq!(cfg.v_align, Some(VAlign::Middle));
        assert_eq!(cfg.direction, Some(Direction::Left));
    }

    #[test]
    fn config_accepts_camel_case_documents() {
        let cfg: ComicConfig = serde_json::from_str(
            r#"{"fontSize": 14, "xGutter": 8, "textColor": "ivory"}"#,
        )
        .unwrap();
        assert_eq!(cfg.font_size, Some(14.0));
        assert_eq!(cfg.x_gutter, Some(8.0));
        assert_eq!(cfg.text_color.as_deref(), Some("ivory"));
    }

    #[test]
    fn copyright_default_embeds_a_plausible_year() {
        let line = default_copyright("A. N. Onymous");
        assert!(line.starts_with("© 2"));
        assert!(line.ends_with("A. N. Onymous. All rights reserved."));
        assert!(current_year() >= 2024);
    }
}
