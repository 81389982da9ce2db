//! # Letterhead Branding
//!
//! Organization data that decorates the header and footer. The lookup is the
//! one collaborator the engine depends on, and it is optional: whatever the
//! lookup returns, including an error, resolves to a [`Branding`] value the
//! renderers can consume without further checks.
//!
//! Resolution happens before layout. The engine never performs the lookup
//! itself.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::QuoteError;
use crate::logo::Logo;
use crate::model::LayoutConfig;

/// Organization record as the lookup returns it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Letterhead {
    pub name: String,
    pub secondary_name: Option<String>,
    /// Data URI, raw base64, or a `/`, `./`, `../` prefixed file path.
    pub logo: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    /// Replaces the contact fields in the footer when set.
    pub footer_text: Option<String>,
}

#[derive(Debug, Error)]
pub enum LetterheadError {
    #[error("letterhead lookup failed: {0}")]
    Lookup(String),
    #[error("failed to read letterhead file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid letterhead JSON in {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read-only organization lookup. `Ok(None)` means "no letterhead configured".
pub trait LetterheadSource {
    fn fetch(&self) -> Result<Option<Letterhead>, LetterheadError>;
}

impl<F> LetterheadSource for F
where
    F: Fn() -> Result<Option<Letterhead>, LetterheadError>,
{
    fn fetch(&self) -> Result<Option<Letterhead>, LetterheadError> {
        self()
    }
}

/// A letterhead already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticLetterhead(pub Option<Letterhead>);

impl LetterheadSource for StaticLetterhead {
    fn fetch(&self) -> Result<Option<Letterhead>, LetterheadError> {
        Ok(self.0.clone())
    }
}

/// A letterhead stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileLetterhead {
    path: PathBuf,
}

impl JsonFileLetterhead {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LetterheadSource for JsonFileLetterhead {
    fn fetch(&self) -> Result<Option<Letterhead>, LetterheadError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| LetterheadError::Read {
            path: self.path.clone(),
            source,
        })?;
        let letterhead =
            serde_json::from_str(&raw).map_err(|source| LetterheadError::Invalid {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(letterhead))
    }
}

/// A letterhead with its logo decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub letterhead: Letterhead,
    pub logo: Option<Logo>,
}

/// What the header and footer are decorated with.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Branding {
    Organization(Organization),
    /// No letterhead: generic title, no contact line.
    #[default]
    Generic,
}

impl Branding {
    /// Run the lookup and degrade to [`Branding::Generic`] on absence or failure.
    pub fn resolve(source: &dyn LetterheadSource) -> Self {
        match source.fetch() {
            Ok(Some(letterhead)) => Self::from_letterhead(letterhead),
            Ok(None) => {
                log::debug!("No letterhead configured, using generic branding");
                Branding::Generic
            }
            Err(e) => {
                log::warn!("{e}; continuing with generic branding");
                Branding::Generic
            }
        }
    }

    /// Decode the logo, if any. A logo that fails to load is dropped; the rest
    /// of the letterhead is kept.
    pub fn from_letterhead(letterhead: Letterhead) -> Self {
        let logo = letterhead
            .logo
            .as_deref()
            .filter(|src| !src.trim().is_empty())
            .and_then(|src| match load_logo(src) {
                Ok(img) => Some(img),
                Err(e) => {
                    log::warn!("Letterhead logo skipped: {e}");
                    None
                }
            });
        Branding::Organization(Organization { letterhead, logo })
    }

    /// Heading for the first page.
    pub fn title<'a>(&'a self, config: &'a LayoutConfig) -> &'a str {
        match self {
            Branding::Organization(org) if !org.letterhead.name.trim().is_empty() => {
                &org.letterhead.name
            }
            _ => &config.generic_title,
        }
    }

    pub fn secondary_name(&self) -> Option<&str> {
        match self {
            Branding::Organization(org) => non_blank(org.letterhead.secondary_name.as_deref()),
            Branding::Generic => None,
        }
    }

    pub fn logo(&self) -> Option<&Logo> {
        match self {
            Branding::Organization(org) => org.logo.as_ref(),
            Branding::Generic => None,
        }
    }

    /// Single footer line: custom footer text, else the contact fields.
    pub fn contact_line(&self) -> Option<String> {
        let org = match self {
            Branding::Organization(org) => &org.letterhead,
            Branding::Generic => return None,
        };
        if let Some(text) = non_blank(org.footer_text.as_deref()) {
            return Some(text.to_string());
        }
        let parts: Vec<&str> = [&org.address, &org.phone, &org.email, &org.website]
            .into_iter()
            .filter_map(|field| non_blank(field.as_deref()))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" · "))
        }
    }
}

/// Load and decode a logo source (data URI, base64, or path).
pub fn load_logo(src: &str) -> Result<Logo, QuoteError> {
    Logo::decode(src).map_err(QuoteError::Image)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
