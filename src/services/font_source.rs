//! Font sources for fontsurvey.
//!
//! A font source is the host's font-enumeration capability behind a narrow
//! trait. Availability is probed by picking an implementation: hosts without
//! the capability get [`UnsupportedFontSource`], which always reports
//! [`CollectError::UnsupportedCapability`].

use std::sync::Arc;

use serde::Deserialize;

use crate::types::errors::CollectError;
use crate::types::font::RawFontRecord;
use crate::types::settings::FontSourceKind;

/// Trait defining the font-enumeration capability.
pub trait FontSource {
    /// Lists every face the host exposes. Duplicates are allowed; the
    /// reviewer deduplicates.
    fn query_local_fonts(&self) -> Result<Vec<RawFontRecord>, CollectError>;
}

impl<T: FontSource + ?Sized> FontSource for Arc<T> {
    fn query_local_fonts(&self) -> Result<Vec<RawFontRecord>, CollectError> {
        (**self).query_local_fonts()
    }
}

/// Source for hosts with no enumeration capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedFontSource;

impl FontSource for UnsupportedFontSource {
    fn query_local_fonts(&self) -> Result<Vec<RawFontRecord>, CollectError> {
        Err(CollectError::UnsupportedCapability)
    }
}

/// Source returning a fixed list, or a fixed failure.
#[derive(Debug, Clone)]
pub struct StaticFontSource {
    result: Result<Vec<RawFontRecord>, CollectError>,
}

impl StaticFontSource {
    pub fn new(fonts: Vec<RawFontRecord>) -> Self {
        Self { result: Ok(fonts) }
    }

    pub fn failing(error: CollectError) -> Self {
        Self { result: Err(error) }
    }
}

impl FontSource for StaticFontSource {
    fn query_local_fonts(&self) -> Result<Vec<RawFontRecord>, CollectError> {
        self.result.clone()
    }
}

/// Installed faces found by scanning the system font directories.
#[cfg(feature = "system-fonts")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFontSource;

#[cfg(feature = "system-fonts")]
impl SystemFontSource {
    /// Full name (name id 4) from the face's `name` table, preferring the
    /// US English record.
    fn full_name_from_table(data: &[u8], index: u32) -> Option<String> {
        let face = ttf_parser::Face::parse(data, index).ok()?;
        let mut fallback = None;
        for name in face.names() {
            if name.name_id != ttf_parser::name_id::FULL_NAME || !name.is_unicode() {
                continue;
            }
            let Some(value) = name.to_string() else { continue };
            if name.language() == ttf_parser::Language::English_UnitedStates {
                return Some(value);
            }
            fallback.get_or_insert(value);
        }
        fallback
    }
}

#[cfg(feature = "system-fonts")]
impl FontSource for SystemFontSource {
    fn query_local_fonts(&self) -> Result<Vec<RawFontRecord>, CollectError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let mut records = Vec::with_capacity(db.len());
        for face in db.faces() {
            let Some((family, _)) = face.families.first() else {
                log::debug!("skipping face {:?} without a family name", face.id);
                continue;
            };
            let full_name = db
                .with_face_data(face.id, Self::full_name_from_table)
                .flatten()
                .unwrap_or_else(|| family.clone());
            records.push(RawFontRecord {
                family: family.clone(),
                full_name,
                postscript_name: face.post_script_name.clone(),
            });
        }

        log::info!("system font scan found {} faces", records.len());
        Ok(records)
    }
}

/// Picks the source for a configured kind.
///
/// `Browser` enumeration runs in the hosting page, which reports its result
/// through [`BrowserFontReport`]; on the Rust side it is unsupported.
pub fn source_for(kind: FontSourceKind) -> Arc<dyn FontSource + Send + Sync> {
    match kind {
        #[cfg(feature = "system-fonts")]
        FontSourceKind::System => Arc::new(SystemFontSource),
        #[cfg(not(feature = "system-fonts"))]
        FontSourceKind::System => {
            log::warn!("built without system-fonts; font collection is unsupported");
            Arc::new(UnsupportedFontSource)
        }
        FontSourceKind::Browser | FontSourceKind::None => Arc::new(UnsupportedFontSource),
    }
}

/// Result of `window.queryLocalFonts()` as posted by a hosting page.
///
/// Accepted shapes:
/// - `{"fonts": [{"family", "fullName", "postscriptName"}, ...]}`
/// - `{"error": {"name": "NotAllowedError", "message": "..."}}`
/// - `{"unsupported": true}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BrowserFontReport {
    Fonts { fonts: Vec<RawFontRecord> },
    Failed { error: BrowserErrorInfo },
    Unsupported { unsupported: bool },
}

/// A `DOMException` as reported by the page.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserErrorInfo {
    pub name: String,
    #[serde(default)]
    pub message: String,
}

impl BrowserFontReport {
    pub fn into_result(self) -> Result<Vec<RawFontRecord>, CollectError> {
        match self {
            BrowserFontReport::Fonts { fonts } => Ok(fonts),
            BrowserFontReport::Failed { error } => match error.name.as_str() {
                "NotAllowedError" | "SecurityError" => {
                    Err(CollectError::PermissionDenied(error.message))
                }
                _ => Err(CollectError::QueryFailed(format!("{}: {}", error.name, error.message))),
            },
            BrowserFontReport::Unsupported { unsupported: true } => {
                Err(CollectError::UnsupportedCapability)
            }
            BrowserFontReport::Unsupported { unsupported: false } => Err(
                CollectError::QueryFailed("browser report carried neither fonts nor an error".to_string()),
            ),
        }
    }
}
