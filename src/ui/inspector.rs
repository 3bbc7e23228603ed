//! Popup content for clicks on covered-network features.
//!
//! A covered segment carries the track files that traversed it in its
//! `filenames` property, either as an array of strings or as a string
//! holding a JSON-encoded array. Entries are ordered by the integer at the
//! end of their path, the activity id.

use crate::core::constants::FILENAMES_PROPERTY;
use crate::input::events::ClickEvent;
use crate::ui::popup::{Popup, PopupContent, TrackLink};
use crate::{MapError, Result};
use serde_json::Value;
use std::cmp::Ordering;

/// Extracts the list of track files from a raw `filenames` property value.
pub fn parse_filenames(raw: &Value) -> Result<Vec<String>> {
    let parsed;
    let value = match raw {
        Value::String(encoded) => {
            parsed = serde_json::from_str::<Value>(encoded).map_err(|e| {
                MapError::MalformedFeatureMetadata(format!(
                    "failed to parse filenames {:?}: {}",
                    encoded, e
                ))
            })?;
            &parsed
        }
        other => other,
    };

    let entries = value.as_array().ok_or_else(|| {
        MapError::MalformedFeatureMetadata(format!("filenames is not an array: {}", value))
    })?;

    entries
        .iter()
        .map(|entry| {
            entry.as_str().map(str::to_string).ok_or_else(|| {
                MapError::MalformedFeatureMetadata(format!(
                    "filenames entry is not a string: {}",
                    entry
                ))
            })
        })
        .collect()
}

/// Final `/`-separated segment of a track reference
pub fn track_id(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Integer prefix of a track id, kept as digits so ids of any length compare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackNumber<'a> {
    negative: bool,
    /// Significant digits without leading zeros; empty for zero
    digits: &'a str,
}

impl TrackNumber<'_> {
    /// The value, when it fits an `i64`
    pub fn as_i64(&self) -> Option<i64> {
        if self.digits.is_empty() {
            return Some(0);
        }
        let value: i64 = self.digits.parse().ok()?;
        Some(if self.negative { -value } else { value })
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(other.digits))
    }
}

impl Ord for TrackNumber<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for TrackNumber<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Integer prefix of the final path segment:
/// leading whitespace and an optional sign, then as many digits as present.
pub fn numeric_track_id(url: &str) -> Option<TrackNumber<'_>> {
    let segment = track_id(url).trim_start();
    let (negative, rest) = match segment.as_bytes().first() {
        Some(b'-') => (true, &segment[1..]),
        Some(b'+') => (false, &segment[1..]),
        _ => (false, segment),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let digits = rest[..end].trim_start_matches('0');
    Some(TrackNumber {
        negative: negative && !digits.is_empty(),
        digits,
    })
}

/// Returns a sorted copy ordered by numeric track id.
///
/// The sort is stable. Entries without a numeric id keep their relative
/// order and are placed after all numeric entries; callers should not rely
/// on that placement.
pub fn sort_by_track_id(filenames: &[String]) -> Vec<String> {
    let mut sorted = filenames.to_vec();
    sorted.sort_by(|a, b| match (numeric_track_id(a), numeric_track_id(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// Header and one link per track, in the given order
pub fn popup_content(sorted_filenames: &[String]) -> PopupContent {
    let count = sorted_filenames.len();
    PopupContent {
        header: format!(
            "Covered by {} track{}:",
            count,
            if count == 1 { "" } else { "s" }
        ),
        links: sorted_filenames
            .iter()
            .map(|url| TrackLink {
                label: format!("Activity {}", track_id(url)),
                url: url.clone(),
                new_tab: true,
            })
            .collect(),
    }
}

/// Turns feature clicks into the single track popup
pub struct FeatureInspector {
    popup: Popup,
}

impl FeatureInspector {
    pub fn new() -> Self {
        Self {
            popup: Popup::new("covered-tracks"),
        }
    }

    /// Opens the popup for a click, replacing any popup already shown.
    ///
    /// On malformed metadata the current popup is left untouched.
    pub fn handle_click(&mut self, event: &ClickEvent) -> Result<&Popup> {
        let raw = event.property(FILENAMES_PROPERTY).ok_or_else(|| {
            MapError::MalformedFeatureMetadata(format!(
                "feature on {} has no {} property",
                event.layer_id, FILENAMES_PROPERTY
            ))
        })?;
        let filenames = parse_filenames(raw)?;
        let sorted = sort_by_track_id(&filenames);

        self.popup.open(event.lng_lat, popup_content(&sorted));
        Ok(&self.popup)
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }
}

impl Default for FeatureInspector {
    fn default() -> Self {
        Self::new()
    }
}
