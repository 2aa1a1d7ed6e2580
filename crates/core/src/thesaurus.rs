//! Read-only access to the vocabulary cache files.
//!
//! The vocabulary mirroring jobs write one JSON file per thesaurus into the
//! thesauri directory. Each file carries a top-level `lastUpdated` field,
//! which the canonical document reports alongside the thesaurus keywords.

use std::path::Path;

use serde::Deserialize;

/// Cache file name -> canonical XML element carrying its `lastUpdated` value.
pub const THESAURUS_CACHE_FILES: &[(&str, &str)] = &[
    ("gcmdPlatformsKeywords.json", "lastUpdatedPlatforms"),
    ("gcmdInstrumentsKeywords.json", "lastUpdatedInstruments"),
    ("gcmdScienceKeywords.json", "lastUpdatedScienceKeywords"),
    ("msl-vocabularies.json", "lastUpdatedMSL"),
];

/// The subset of a cache file this crate cares about.
#[derive(Debug, Deserialize)]
struct ThesaurusCacheHeader {
    #[serde(rename = "lastUpdated")]
    last_updated: Option<String>,
}

/// `lastUpdated` value of one vocabulary, tagged with its XML element name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThesaurusTimestamp {
    pub element: &'static str,
    pub last_updated: String,
}

/// Read the `lastUpdated` field of every known vocabulary cache in `dir`.
///
/// Missing, unreadable, or malformed files are skipped with a warning so a
/// stale vocabulary mirror never blocks an export. The result keeps the
/// order of [`THESAURUS_CACHE_FILES`].
pub async fn read_last_updated(dir: &Path) -> Vec<ThesaurusTimestamp> {
    let mut timestamps = Vec::with_capacity(THESAURUS_CACHE_FILES.len());

    for (file_name, element) in THESAURUS_CACHE_FILES {
        let path = dir.join(file_name);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Thesaurus cache not readable");
                continue;
            }
        };

        match serde_json::from_str::<ThesaurusCacheHeader>(&raw) {
            Ok(ThesaurusCacheHeader {
                last_updated: Some(value),
            }) if !value.trim().is_empty() => timestamps.push(ThesaurusTimestamp {
                element,
                last_updated: value,
            }),
            Ok(_) => {
                tracing::warn!(path = %path.display(), "Thesaurus cache has no lastUpdated field");
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Thesaurus cache is not valid JSON"
                );
            }
        }
    }

    timestamps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_available_caches_in_table_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("msl-vocabularies.json"),
            r#"{"lastUpdated":"2026-01-02 10:00:00","data":[]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("gcmdPlatformsKeywords.json"),
            r#"{"lastUpdated":"2025-12-31 08:15:00","data":[]}"#,
        )
        .unwrap();

        let stamps = read_last_updated(dir.path()).await;

        assert_eq!(
            stamps,
            vec![
                ThesaurusTimestamp {
                    element: "lastUpdatedPlatforms",
                    last_updated: "2025-12-31 08:15:00".to_string(),
                },
                ThesaurusTimestamp {
                    element: "lastUpdatedMSL",
                    last_updated: "2026-01-02 10:00:00".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn malformed_or_incomplete_caches_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("gcmdScienceKeywords.json"), "not json").unwrap();
        std::fs::write(dir.path().join("gcmdInstrumentsKeywords.json"), r#"{"data":[]}"#).unwrap();

        assert!(read_last_updated(dir.path()).await.is_empty());
    }

    #[tokio::test]
    async fn missing_directory_yields_nothing() {
        let stamps = read_last_updated(Path::new("/nonexistent/thesauri")).await;
        assert!(stamps.is_empty());
    }
}
