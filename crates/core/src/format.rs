//! Target metadata schemas and the export scheme whitelist.
//!
//! Each [`MetadataFormat`] maps to exactly one XSLT stylesheet and one
//! artifact file prefix. The mapping is static; adding a schema means adding
//! a variant here.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Scheme key that selects the combined envelope instead of a single schema.
pub const SCHEME_ALL: &str = "all";

/// Message returned to clients when a scheme is not in the whitelist.
pub const INVALID_SCHEME_MESSAGE: &str =
    "Invalid metadata scheme. Supported schemes are: datacite, iso, dif";

// ---------------------------------------------------------------------------
// MetadataFormat
// ---------------------------------------------------------------------------

/// One of the three standards-compliant schemas a resource can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataFormat {
    DataCite,
    Iso,
    Dif,
}

impl MetadataFormat {
    /// All formats, in the order their documents appear inside an envelope.
    pub const ALL: [MetadataFormat; 3] = [
        MetadataFormat::DataCite,
        MetadataFormat::Iso,
        MetadataFormat::Dif,
    ];

    /// Lowercase key used in URLs and configuration.
    pub fn key(self) -> &'static str {
        match self {
            Self::DataCite => "datacite",
            Self::Iso => "iso",
            Self::Dif => "dif",
        }
    }

    /// File name of the stylesheet inside the XSLT directory.
    pub fn stylesheet(self) -> &'static str {
        match self {
            Self::DataCite => "MappingMapToDataCiteSchema45.xslt",
            Self::Iso => "MappingMapToIso.xslt",
            Self::Dif => "MappingMapToDIF.xslt",
        }
    }

    /// Prefix of the persisted artifact (`{prefix}_resource_{id}.xml`).
    pub fn artifact_prefix(self) -> &'static str {
        self.key()
    }

    /// Parse a format key, ignoring ASCII case.
    pub fn from_key(key: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(key.trim()))
            .ok_or_else(|| CoreError::InvalidFormat(INVALID_SCHEME_MESSAGE.to_string()))
    }
}

impl std::fmt::Display for MetadataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// ExportScheme
// ---------------------------------------------------------------------------

/// What an export request asks for: one schema, or the envelope of all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScheme {
    Single(MetadataFormat),
    All,
}

impl ExportScheme {
    /// Validate a requested scheme against `{datacite, iso, dif}` plus `all`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.trim().eq_ignore_ascii_case(SCHEME_ALL) {
            return Ok(Self::All);
        }
        MetadataFormat::from_key(raw).map(Self::Single)
    }

    /// Label used in download file names (`dataset_{id}_{label}.xml`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Single(format) => format.key(),
            Self::All => SCHEME_ALL,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
