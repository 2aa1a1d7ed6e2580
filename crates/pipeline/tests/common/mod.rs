#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use mde_core::format::MetadataFormat;
use mde_core::types::DbId;
use mde_core::xslt::{XsltError, XsltProcessor};
use mde_db::memory::{MemoryStore, ResourceFixture};
use mde_db::models::coverage::SpatialTemporalCoverage;
use mde_db::models::ggm::GgmProperties;
use mde_db::models::keyword::{FreeKeyword, ThesaurusKeyword};
use mde_db::models::party::{
    Affiliation, Author, ContactPerson, ContributorInstitution, ContributorPerson, Role,
};
use mde_db::models::reference::{FundingReference, RelatedWork};
use mde_db::models::resource::{Description, ResourceDetail, Title};
use mde_db::repositories::{AffiliationOwner, RoleOwner};
use mde_pipeline::{ExportPipeline, ExportSettings};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Stub XSLT engine
// ---------------------------------------------------------------------------

/// Returns a tiny document per stylesheet and records every call.
#[derive(Default)]
pub struct StubXslt {
    fail_on: Option<MetadataFormat>,
    calls: Mutex<Vec<String>>,
}

impl StubXslt {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stub whose transform to `format` exits with an error.
    pub fn failing_on(format: MetadataFormat) -> Self {
        Self {
            fail_on: Some(format),
            calls: Mutex::default(),
        }
    }

    /// Stylesheet file names, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn stub_root(format: MetadataFormat) -> &'static str {
    match format {
        MetadataFormat::DataCite => "resource",
        MetadataFormat::Iso => "MD_Metadata",
        MetadataFormat::Dif => "DIF",
    }
}

#[async_trait]
impl XsltProcessor for StubXslt {
    async fn transform(&self, stylesheet: &Path, document: &Path) -> Result<String, XsltError> {
        let name = stylesheet
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        self.calls.lock().unwrap().push(name.clone());

        let format = MetadataFormat::ALL
            .into_iter()
            .find(|f| f.stylesheet() == name)
            .unwrap();
        if self.fail_on == Some(format) {
            return Err(XsltError::ExecutionFailed {
                exit_code: Some(5),
                stderr: "stub failure".to_string(),
            });
        }

        // Reading the canonical file proves it was handed over complete.
        let canonical = tokio::fs::read_to_string(document)
            .await
            .map_err(XsltError::ProcessorUnavailable)?;
        assert!(canonical.contains("</Resource>"));

        Ok(format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<{root} source=\"{source}\"/>\n",
            root = stub_root(format),
            source = document.file_name().unwrap().to_string_lossy(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

pub struct TestEnv {
    pub dir: TempDir,
    pub settings: ExportSettings,
    pub xslt: Arc<StubXslt>,
    pub pipeline: ExportPipeline,
}

impl TestEnv {
    pub fn output_file(&self, name: &str) -> std::path::PathBuf {
        self.settings.output_dir.join(name)
    }
}

/// Temp directories for artifacts, stylesheets and vocabulary caches, with
/// all three stylesheets present and only the MSL cache populated.
pub fn test_env(store: MemoryStore, xslt: StubXslt) -> TestEnv {
    let dir = tempfile::tempdir().unwrap();
    let settings = ExportSettings {
        output_dir: dir.path().join("xml"),
        xslt_dir: dir.path().join("schemas/XSLT"),
        thesauri_dir: dir.path().join("json/thesauri"),
        xsltproc_bin: "unused".to_string(),
    };

    std::fs::create_dir_all(&settings.xslt_dir).unwrap();
    for format in MetadataFormat::ALL {
        std::fs::write(settings.xslt_dir.join(format.stylesheet()), "<xsl:stylesheet/>").unwrap();
    }
    std::fs::create_dir_all(&settings.thesauri_dir).unwrap();
    std::fs::write(
        settings.thesauri_dir.join("msl-vocabularies.json"),
        r#"{"lastUpdated":"2026-01-02 10:00:00"}"#,
    )
    .unwrap();

    let xslt = Arc::new(xslt);
    let pipeline = ExportPipeline::new(Arc::new(store), xslt.clone(), &settings);

    TestEnv {
        dir,
        settings,
        xslt,
        pipeline,
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn resource_detail(id: DbId) -> ResourceDetail {
    ResourceDetail {
        id,
        doi: Some(format!("10.5880/GFZ.{id}")),
        version: Some("1.0".to_string()),
        year: 2024,
        date_created: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        date_embargo_until: None,
        rights_text: "Creative Commons Attribution 4.0 International".to_string(),
        rights_identifier: Some("CC-BY-4.0".to_string()),
        rights_uri: Some("https://creativecommons.org/licenses/by/4.0/legalcode".to_string()),
        resource_type_general: "Dataset".to_string(),
        resource_type_description: None,
        language_code: "en".to_string(),
        language_name: "English".to_string(),
        updated_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

/// A resource with one title and nothing else.
pub fn minimal_resource(id: DbId) -> ResourceFixture {
    let mut fixture = ResourceFixture::new(resource_detail(id));
    fixture.titles.push(Title {
        id: id * 100,
        text: format!("Dataset {id}"),
        title_type: "Main".to_string(),
    });
    fixture
}

fn affiliation(id: DbId, name: &str, ror_id: Option<&str>) -> Affiliation {
    Affiliation {
        id,
        name: name.to_string(),
        ror_id: ror_id.map(str::to_string),
    }
}

/// Resource 1 with every relation populated.
///
/// Affiliations: exactly one of the three carries a ROR id. Funding
/// references: the first has only a funder, the second has every field.
pub fn populated_store() -> MemoryStore {
    let mut fixture = ResourceFixture::new(resource_detail(1));

    fixture.titles = vec![
        Title {
            id: 1,
            text: "Global gravity field model EIGEN-6C4".to_string(),
            title_type: "Main".to_string(),
        },
        Title {
            id: 2,
            text: "EIGEN-6C4".to_string(),
            title_type: "Alternative".to_string(),
        },
    ];
    fixture.authors = vec![
        Author {
            id: 10,
            position: 0,
            family_name: Some("Förste".to_string()),
            given_name: Some("Christoph".to_string()),
            orcid: Some("0000-0002-1234-5678".to_string()),
            institution_name: None,
        },
        Author {
            id: 11,
            position: 1,
            family_name: None,
            given_name: None,
            orcid: None,
            institution_name: Some("GRGS Toulouse".to_string()),
        },
    ];
    fixture.contact_persons = vec![ContactPerson {
        id: 20,
        position: 0,
        ..Default::default()
    }];
    fixture.contributor_persons = vec![ContributorPerson {
        id: 30,
        family_name: "Barthelmes".to_string(),
        given_name: Some("Franz".to_string()),
        orcid: None,
    }];
    fixture.contributor_institutions = vec![ContributorInstitution {
        id: 31,
        name: "ICGEM".to_string(),
    }];
    fixture.descriptions = vec![Description {
        id: 40,
        description_type: "Abstract".to_string(),
        description: "Combined satellite and surface gravity model.".to_string(),
    }];
    fixture.thesaurus_keywords = vec![ThesaurusKeyword {
        id: 50,
        keyword: "EARTH SCIENCE > SOLID EARTH > GRAVITY/GRAVITATIONAL FIELD".to_string(),
        scheme: Some("NASA/GCMD Earth Science Keywords".to_string()),
        scheme_uri: Some("https://gcmd.earthdata.nasa.gov/kms/concepts".to_string()),
        value_uri: None,
        language: Some("en".to_string()),
    }];
    fixture.free_keywords = vec![FreeKeyword {
        id: 60,
        keyword: "geoid".to_string(),
        is_curated: true,
    }];
    fixture.coverages = vec![SpatialTemporalCoverage {
        id: 70,
        latitude_min: -90.0,
        latitude_max: None,
        longitude_min: 13.05,
        longitude_max: None,
        description: Some("Global".to_string()),
        date_start: NaiveDate::from_ymd_opt(2003, 1, 1),
        date_end: None,
        time_start: NaiveTime::from_hms_opt(0, 0, 0),
        time_end: None,
        timezone: Some("+00:00".to_string()),
    }];
    fixture.related_works = vec![RelatedWork {
        id: 80,
        identifier: "10.5880/icgem.2015.1".to_string(),
        relation: "IsDerivedFrom".to_string(),
        identifier_type: "DOI".to_string(),
    }];
    fixture.funding_references = vec![
        FundingReference {
            id: 90,
            funder: "Deutsche Forschungsgemeinschaft".to_string(),
            ..Default::default()
        },
        FundingReference {
            id: 91,
            funder: "European Space Agency".to_string(),
            funder_id: Some("https://ror.org/03wd9za21".to_string()),
            funder_id_type: Some("ROR".to_string()),
            grant_number: Some("4000108662".to_string()),
            grant_name: Some("GOCE HPF".to_string()),
            award_uri: Some("https://example.org/award/4000108662".to_string()),
        },
    ];
    fixture.ggm_properties = GgmProperties {
        model_name: Some("EIGEN-6C4".to_string()),
        celestial_body: Some("Earth".to_string()),
        product_type: Some("gravity_field".to_string()),
        model_type: Some("Combined".to_string()),
        mathematical_representation: None,
        file_format: Some("ICGEM1.0".to_string()),
    };

    let mut store = MemoryStore::new();
    store
        .insert(fixture)
        .set_affiliations(
            AffiliationOwner::Author,
            10,
            vec![affiliation(1, "GFZ Helmholtz Centre for Geosciences", Some("04z8jg394"))],
        )
        .set_affiliations(
            AffiliationOwner::Author,
            11,
            vec![affiliation(2, "Université de Toulouse", None)],
        )
        .set_affiliations(
            AffiliationOwner::ContributorPerson,
            30,
            vec![affiliation(3, "TU Berlin", Some("  "))],
        )
        .set_roles(
            RoleOwner::ContributorPerson,
            30,
            vec![Role {
                id: 1,
                name: "DataCurator".to_string(),
            }],
        )
        .set_roles(
            RoleOwner::ContributorInstitution,
            31,
            vec![Role {
                id: 2,
                name: "HostingInstitution".to_string(),
            }],
        );
    store
}

/// A store holding [`minimal_resource`] for each id.
pub fn store_with(ids: &[DbId]) -> MemoryStore {
    let mut store = MemoryStore::new();
    for &id in ids {
        store.insert(minimal_resource(id));
    }
    store
}

// ---------------------------------------------------------------------------
// XML helpers
// ---------------------------------------------------------------------------

/// Inner text of every non-nested `<tag>...</tag>` block, in order.
pub fn blocks<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let mut out = Vec::new();
    let mut rest = xml;
    while let Some(start) = rest.find(&open) {
        let after = &rest[start + open.len()..];
        let Some(end) = after.find(&close) else {
            break;
        };
        out.push(&after[..end]);
        rest = &after[end + close.len()..];
    }
    out
}

/// The document with its `<currentDate>` line removed.
pub fn without_current_date(xml: &str) -> String {
    xml.lines()
        .filter(|line| !line.contains("<currentDate>"))
        .collect::<Vec<_>>()
        .join("\n")
}
