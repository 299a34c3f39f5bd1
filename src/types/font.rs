use serde::{Deserialize, Serialize};

/// One face as reported by a font source, before deduplication.
///
/// Field names follow the browser `FontData` shape so browser reports
/// deserialize directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFontRecord {
    pub family: String,
    pub full_name: String,
    pub postscript_name: String,
}

impl RawFontRecord {
    pub fn new(
        family: impl Into<String>,
        full_name: impl Into<String>,
        postscript_name: impl Into<String>,
    ) -> Self {
        Self {
            family: family.into(),
            full_name: full_name.into(),
            postscript_name: postscript_name.into(),
        }
    }
}

/// A deduplicated font in the review list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontEntry {
    pub family: String,
    /// Deduplication key and the name written to the stored record.
    pub full_name: String,
    /// Stable key for list rendering.
    pub postscript_name: String,
    pub included: bool,
}

impl FontEntry {
    pub fn new(
        family: impl Into<String>,
        full_name: impl Into<String>,
        postscript_name: impl Into<String>,
    ) -> Self {
        Self {
            family: family.into(),
            full_name: full_name.into(),
            postscript_name: postscript_name.into(),
            included: true,
        }
    }

    /// CSS family name used to bind a `local()` preview for this entry.
    ///
    /// Unique per list position, so two entries with similar names never
    /// share a rule.
    pub fn preview_family(&self, index: usize) -> String {
        let sanitized: String = self
            .full_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        format!("font-preview-{}-{}", index, sanitized)
    }
}

impl From<RawFontRecord> for FontEntry {
    fn from(raw: RawFontRecord) -> Self {
        Self {
            family: raw.family,
            full_name: raw.full_name,
            postscript_name: raw.postscript_name,
            included: true,
        }
    }
}
