//! Filename templating engine
//!
//! A [`FilenameFormatter`] expands a rename rule into a concrete filename
//! using a merged field set: date fields derived from a stored capture date,
//! a monotonically increasing sequence counter, fragments of the original
//! filename, and caller-defined keys.
//!
//! Recognized built-in keys:
//!
//! - `{text}` / `{custom_text}` - a custom text fragment
//! - `{YYYY}` - four digit year
//! - `{YY}` - two digit year
//! - `{MM}` - two digit month
//! - `{mon}` - month name, abbreviated
//! - `{month}` - month name
//! - `{DD}` - two digit day
//! - `{seq:0N}` - an N digit sequence counter
//! - `{original}` - original filename with extension
//! - `{filename}` - original filename without extension
//! - `{ext}` / `{EXT}` - original extension, lowercase/uppercase, no dot
//!
//! Callers may add new keys (a camera serial number, a session name, …) with
//! [`set`](FilenameFormatter::set) or [`add_keys`](FilenameFormatter::add_keys).
//! A rule referencing a key that is not in the field set fails with
//! [`FormatError::MissingKey`]; the formatter never emits a partially
//! substituted name.

use std::collections::HashMap;
use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::core::error::FormatError;

/// Rename rule used when none is configured
pub const DEFAULT_RENAME_RULE: &str = "IMG_{seq:04}.{EXT}";

/// Date-derived field names, paired with their strftime spec
const DATE_FIELDS: [(&str, &str); 6] = [
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("mon", "%b"),
    ("month", "%B"),
    ("DD", "%d"),
];

/// Stateful filename builder driven by a rename rule
///
/// The sequence counter increments by exactly one per formatted name and is
/// never reset on its own. The capture date is fixed at construction and only
/// re-read by [`refresh_date`](Self::refresh_date).
#[derive(Debug, Clone)]
pub struct FilenameFormatter {
    rename_rule: String,
    counter: u64,
    date: NaiveDate,
    keys: HashMap<String, String>,
}

impl Default for FilenameFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl FilenameFormatter {
    /// Create a formatter with the default rule and a counter starting at 0
    pub fn new() -> Self {
        let mut formatter = Self {
            rename_rule: DEFAULT_RENAME_RULE.to_string(),
            counter: 0,
            date: Local::now().date_naive(),
            keys: HashMap::new(),
        };
        for key in ["text", "custom_text", "filename", "ext", "EXT", "original"] {
            formatter.keys.insert(key.to_string(), String::new());
        }
        formatter.keys.insert("seq".to_string(), "0".to_string());
        formatter.fill_date();
        formatter
    }

    /// Replace the rename rule
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rename_rule = rule.into();
        self
    }

    /// Set the initial value of the sequence counter
    ///
    /// The first formatted name uses `initial + 1`.
    pub fn with_initial(mut self, initial: u64) -> Self {
        self.counter = initial;
        self
    }

    /// Fix the capture date instead of reading the wall clock
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self.fill_date();
        self
    }

    /// Set the `{text}` / `{custom_text}` fragment
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.keys.insert("text".to_string(), text.clone());
        self.keys.insert("custom_text".to_string(), text);
        self
    }

    /// The active rename rule
    pub fn rename_rule(&self) -> &str {
        &self.rename_rule
    }

    /// Replace the rename rule in place
    pub fn set_rename_rule(&mut self, rule: impl Into<String>) {
        self.rename_rule = rule.into();
    }

    /// Current value of the sequence counter
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Reset the sequence counter to a specific value
    pub fn set_counter(&mut self, value: u64) {
        self.counter = value;
    }

    /// Re-read the capture date from the wall clock
    pub fn refresh_date(&mut self) {
        self.date = Local::now().date_naive();
        self.fill_date();
    }

    /// The keys currently stored in the field set
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Add or modify a substitution key
    ///
    /// Fails with [`FormatError::InvalidKey`] when the key could never name a
    /// `{placeholder}` (empty, or containing non-word characters).
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), FormatError> {
        if key.is_empty() || !key.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(FormatError::InvalidKey(key.to_string()));
        }
        self.keys.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Merge several key-value pairs into the field set
    ///
    /// Existing keys of the same name are overwritten; built-ins taken over
    /// this way are recomputed again on the next formatting call.
    pub fn add_keys<K, V>(&mut self, keys: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in keys {
            self.keys.insert(key.into(), value.into());
        }
    }

    /// Format the next filename for a captured file
    ///
    /// Increments the sequence counter, recomputes the date and original-name
    /// fields, then expands the rename rule against the merged field set.
    pub fn get_filename(&mut self, original: &str) -> Result<String, FormatError> {
        self.get_filename_with(original, &[])
    }

    /// Format the next filename with per-call key overrides
    ///
    /// Overrides are applied last and take precedence over every stored and
    /// derived field of the same name.
    pub fn get_filename_with(
        &mut self,
        original: &str,
        overrides: &[(&str, &str)],
    ) -> Result<String, FormatError> {
        self.counter += 1;
        self.keys
            .insert("seq".to_string(), self.counter.to_string());
        self.fill_date();
        self.fill_original(original);
        for &(key, value) in overrides {
            self.set(key, value)?;
        }
        self.render()
    }

    /// Format the next filename without an original file to draw from
    ///
    /// Equivalent to `get_filename("")`, for rules that do not reference the
    /// original name.
    pub fn next_filename(&mut self) -> Result<String, FormatError> {
        self.get_filename("")
    }

    fn fill_date(&mut self) {
        for (key, spec) in DATE_FIELDS {
            self.keys
                .insert(key.to_string(), self.date.format(spec).to_string());
        }
    }

    fn fill_original(&mut self, original: &str) {
        let path = Path::new(original);
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let base = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.keys.insert("ext".to_string(), ext.to_lowercase());
        self.keys.insert("EXT".to_string(), ext.to_uppercase());
        self.keys.insert("filename".to_string(), stem.to_string());
        self.keys.insert("original".to_string(), base.to_string());
    }

    fn render(&self) -> Result<String, FormatError> {
        let mut out = String::with_capacity(self.rename_rule.len() + 16);
        let mut chars = self.rename_rule.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '{' => {
                    let mut token = String::new();
                    let mut closed = false;
                    for t in chars.by_ref() {
                        if t == '}' {
                            closed = true;
                            break;
                        }
                        token.push(t);
                    }
                    if !closed {
                        return Err(FormatError::UnbalancedBraces);
                    }
                    let (key, spec) = match token.split_once(':') {
                        Some((key, spec)) => (key, Some(spec)),
                        None => (token.as_str(), None),
                    };
                    let value = self
                        .keys
                        .get(key)
                        .ok_or_else(|| FormatError::MissingKey(key.to_string()))?;
                    out.push_str(&expand(key, value, spec)?);
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '}' => return Err(FormatError::UnbalancedBraces),
                _ => out.push(c),
            }
        }
        Ok(out)
    }
}

/// Apply a `{key:spec}` format spec to a resolved value
///
/// The spec grammar is `[0]WIDTH[d]`: a leading `0` (or a trailing `d`)
/// requests integer presentation with zero padding, a bare width right-aligns
/// text.
fn expand(key: &str, value: &str, spec: Option<&str>) -> Result<String, FormatError> {
    let Some(spec) = spec else {
        return Ok(value.to_string());
    };
    if spec.is_empty() {
        return Ok(value.to_string());
    }
    let bad = || FormatError::BadFormatSpec {
        key: key.to_string(),
        spec: spec.to_string(),
    };

    let digits = spec.strip_suffix('d').unwrap_or(spec);
    let wants_integer = spec.ends_with('d') || digits.starts_with('0');
    if digits.is_empty() {
        // spec was exactly "d"
        let n: i64 = value.parse().map_err(|_| bad())?;
        return Ok(n.to_string());
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(bad());
    }
    let width: usize = digits.parse().map_err(|_| bad())?;
    if wants_integer {
        let n: i64 = value.parse().map_err(|_| bad())?;
        Ok(format!("{n:0width$}"))
    } else {
        Ok(format!("{value:>width$}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_counts_up() {
        let mut formatter = FilenameFormatter::new();
        assert_eq!(formatter.get_filename("foo.CR2").unwrap(), "IMG_0001.CR2");
        assert_eq!(formatter.get_filename("foo.CR2").unwrap(), "IMG_0002.CR2");
        assert_eq!(formatter.counter(), 2);
    }

    #[test]
    fn test_added_keys_and_counter_continuity() {
        let mut formatter = FilenameFormatter::new();
        formatter.get_filename("photo.jpg").unwrap();

        formatter.add_keys([("session", "wedding")]);
        formatter.set_rename_rule("{session}_{seq:02}.{ext}");

        assert_eq!(formatter.get_filename("photo.jpg").unwrap(), "wedding_02.jpg");
    }

    #[test]
    fn test_unknown_key_fails_without_partial_output() {
        let mut formatter = FilenameFormatter::new().with_rule("{unknown}.jpg");
        assert_eq!(
            formatter.get_filename("a.jpg").err(),
            Some(FormatError::MissingKey("unknown".to_string()))
        );
    }

    #[test]
    fn test_date_fields_come_from_stored_date() {
        let date = NaiveDate::from_ymd_opt(2019, 3, 7).unwrap();
        let mut formatter = FilenameFormatter::new()
            .with_rule("{YYYY}-{YY}-{MM}-{mon}-{month}-{DD}")
            .with_date(date);

        assert_eq!(
            formatter.next_filename().unwrap(),
            "2019-19-03-Mar-March-07"
        );
    }

    #[test]
    fn test_original_name_fragments() {
        let mut formatter =
            FilenameFormatter::new().with_rule("{filename}|{original}|{ext}|{EXT}");
        assert_eq!(
            formatter.get_filename("holiday/DSC_0042.NeF").unwrap(),
            "DSC_0042|DSC_0042.NeF|nef|NEF"
        );
    }

    #[test]
    fn test_empty_original_yields_empty_fragments() {
        let mut formatter = FilenameFormatter::new().with_rule("x{filename}{ext}_{seq}");
        assert_eq!(formatter.next_filename().unwrap(), "x_1");
    }

    #[test]
    fn test_custom_text_and_initial_counter() {
        let mut formatter = FilenameFormatter::new()
            .with_rule("{text}_{seq:03}")
            .with_text("studio")
            .with_initial(41);

        assert_eq!(formatter.get_filename("").unwrap(), "studio_042");
    }

    #[test]
    fn test_overrides_win_over_stored_keys() {
        let mut formatter = FilenameFormatter::new()
            .with_rule("{text}.{ext}")
            .with_text("base");

        let name = formatter
            .get_filename_with("shot.jpg", &[("text", "override")])
            .unwrap();
        assert_eq!(name, "override.jpg");
    }

    #[test]
    fn test_shadowed_builtin_is_recomputed_next_call() {
        let mut formatter = FilenameFormatter::new().with_rule("{seq}");
        formatter.add_keys([("seq", "shadow")]);
        // The per-call recomputation wins over the stale stored value.
        assert_eq!(formatter.get_filename("").unwrap(), "1");
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let mut formatter = FilenameFormatter::new();
        assert_eq!(
            formatter.set("bad key", "value").err(),
            Some(FormatError::InvalidKey("bad key".to_string()))
        );
        assert_eq!(
            formatter.set("", "value").err(),
            Some(FormatError::InvalidKey(String::new()))
        );
        assert!(formatter.set("camera", "ILCE-7M3").is_ok());
    }

    #[test]
    fn test_brace_escapes() {
        let mut formatter = FilenameFormatter::new().with_rule("{{raw}}_{seq}");
        assert_eq!(formatter.next_filename().unwrap(), "{raw}_1");
    }

    #[test]
    fn test_unbalanced_braces() {
        let mut formatter = FilenameFormatter::new().with_rule("IMG_{seq");
        assert_eq!(
            formatter.next_filename().err(),
            Some(FormatError::UnbalancedBraces)
        );

        let mut formatter = FilenameFormatter::new().with_rule("IMG_}");
        assert_eq!(
            formatter.next_filename().err(),
            Some(FormatError::UnbalancedBraces)
        );
    }

    #[test]
    fn test_bad_format_specs() {
        let mut formatter = FilenameFormatter::new().with_rule("{seq:xx}");
        assert!(matches!(
            formatter.next_filename(),
            Err(FormatError::BadFormatSpec { .. })
        ));

        // Zero padding requires a numeric value.
        let mut formatter = FilenameFormatter::new()
            .with_rule("{text:04}")
            .with_text("abc");
        assert!(matches!(
            formatter.next_filename(),
            Err(FormatError::BadFormatSpec { .. })
        ));
    }

    #[test]
    fn test_integer_spec_variants() {
        let mut formatter = FilenameFormatter::new()
            .with_rule("{seq:04d}")
            .with_initial(6);
        assert_eq!(formatter.next_filename().unwrap(), "0007");

        let mut formatter = FilenameFormatter::new().with_rule("{seq:d}");
        assert_eq!(formatter.next_filename().unwrap(), "1");
    }

    #[test]
    fn test_set_counter_resets_sequence() {
        let mut formatter = FilenameFormatter::new().with_rule("{seq:02}");
        formatter.get_filename("").unwrap();
        formatter.set_counter(9);
        assert_eq!(formatter.get_filename("").unwrap(), "10");
    }
}
