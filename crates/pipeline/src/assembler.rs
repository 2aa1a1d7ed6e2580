//! ResourceAssembler: relational graph -> canonical `<Resource>` document.
//!
//! The canonical document is the only input of every XSLT mapping. Optional
//! values are written only when they carry content; blocks listed as
//! optional (contact persons, laboratories, related works, funding
//! references, GGM properties) disappear entirely when no entry carries
//! any content.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use mde_core::artifact::{ArtifactRecord, ArtifactStore};
use mde_core::thesaurus::{self, ThesaurusTimestamp};
use mde_core::types::DbId;
use mde_core::xml::{XmlDocumentWriter, XmlWriteError};
use mde_db::models::party::{Affiliation, Author, AuthorIdentity, Role};
use mde_db::store::ResourceStore;

use crate::error::ExportError;
use crate::graph::{Affiliated, Contributor, ResourceGraph};
use crate::lock::ExportLocks;

/// Root element of the canonical document.
pub const CANONICAL_ROOT: &str = "Resource";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

type XmlResult = Result<(), XmlWriteError>;

/// A freshly assembled canonical document and where it was written.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    pub xml: String,
    pub record: ArtifactRecord,
}

/// Builds and persists canonical documents.
#[derive(Clone)]
pub struct ResourceAssembler {
    store: Arc<dyn ResourceStore>,
    artifacts: ArtifactStore,
    thesauri_dir: PathBuf,
    locks: Arc<ExportLocks>,
}

impl ResourceAssembler {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        artifacts: ArtifactStore,
        thesauri_dir: impl Into<PathBuf>,
        locks: Arc<ExportLocks>,
    ) -> Self {
        Self {
            store,
            artifacts,
            thesauri_dir: thesauri_dir.into(),
            locks,
        }
    }

    pub fn store(&self) -> &dyn ResourceStore {
        self.store.as_ref()
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub(crate) fn locks(&self) -> &ExportLocks {
        &self.locks
    }

    /// Assemble the canonical document of `resource_id` and write it to
    /// `resource_{id}.xml`.
    pub async fn assemble(&self, resource_id: DbId) -> Result<AssembledDocument, ExportError> {
        let _guard = self.locks.acquire(resource_id).await;
        self.build(resource_id).await
    }

    /// [`assemble`](Self::assemble) without taking the resource lock. The
    /// caller must already hold it.
    pub(crate) async fn build(&self, resource_id: DbId) -> Result<AssembledDocument, ExportError> {
        tracing::debug!(resource_id, "Assembling canonical document");

        let graph = ResourceGraph::load(self.store.as_ref(), resource_id).await?;
        let timestamps = thesaurus::read_last_updated(&self.thesauri_dir).await;
        let xml = render_resource(&graph, Utc::now().date_naive(), &timestamps)?;

        let path = self.artifacts.canonical_path(resource_id);
        let record = self.artifacts.write(&path, &xml).await?;
        tracing::info!(
            resource_id,
            path = %record.path.display(),
            bytes = record.bytes,
            sha256 = %record.sha256,
            "Canonical document written"
        );

        Ok(AssembledDocument { xml, record })
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a loaded graph into the canonical document.
///
/// `today` becomes `<currentDate>`; it is the only value that differs
/// between two renderings of unchanged data.
pub fn render_resource(
    graph: &ResourceGraph,
    today: NaiveDate,
    thesauri: &[ThesaurusTimestamp],
) -> Result<String, XmlWriteError> {
    let mut w = XmlDocumentWriter::new()?;
    w.open(CANONICAL_ROOT)?;

    write_header(&mut w, graph, today)?;
    write_titles(&mut w, graph)?;
    write_authors(&mut w, &graph.authors)?;
    write_contact_persons(&mut w, graph)?;
    write_laboratories(&mut w, graph)?;
    write_contributors(&mut w, graph)?;
    write_descriptions(&mut w, graph)?;
    write_thesaurus_keywords(&mut w, graph, thesauri)?;
    write_free_keywords(&mut w, graph)?;
    write_coverages(&mut w, graph)?;
    write_related_works(&mut w, graph)?;
    write_funding_references(&mut w, graph)?;
    write_ggm_properties(&mut w, graph)?;

    w.close(CANONICAL_ROOT)?;
    w.finish()
}

fn write_header(w: &mut XmlDocumentWriter, graph: &ResourceGraph, today: NaiveDate) -> XmlResult {
    let r = &graph.detail;

    w.display("currentDate", today.format(DATE_FORMAT))?;
    w.display("id", r.id)?;
    w.optional("doi", r.doi.as_deref())?;
    w.optional("version", r.version.as_deref())?;
    w.display("year", r.year)?;
    w.display("dateCreated", r.date_created.format(DATE_FORMAT))?;
    w.optional_display(
        "dateEmbargoUntil",
        r.date_embargo_until.map(|d| d.format(DATE_FORMAT)),
    )?;

    w.open("Rights")?;
    w.element("text", &r.rights_text)?;
    w.optional("rightsIdentifier", r.rights_identifier.as_deref())?;
    w.optional("rightsURI", r.rights_uri.as_deref())?;
    w.close("Rights")?;

    w.open("ResourceType")?;
    w.element("resourceTypeGeneral", &r.resource_type_general)?;
    w.optional("description", r.resource_type_description.as_deref())?;
    w.close("ResourceType")?;

    w.open("Language")?;
    w.element("code", &r.language_code)?;
    w.element("name", &r.language_name)?;
    w.close("Language")
}

fn write_titles(w: &mut XmlDocumentWriter, graph: &ResourceGraph) -> XmlResult {
    w.open("Titles")?;
    for title in &graph.titles {
        w.open("Title")?;
        w.element("text", &title.text)?;
        w.element("type", &title.title_type)?;
        w.close("Title")?;
    }
    w.close("Titles")
}

fn write_affiliations(w: &mut XmlDocumentWriter, affiliations: &[Affiliation]) -> XmlResult {
    w.open("Affiliations")?;
    for affiliation in affiliations {
        w.open("Affiliation")?;
        w.element("name", &affiliation.name)?;
        w.optional("rorId", affiliation.ror_id.as_deref())?;
        w.close("Affiliation")?;
    }
    w.close("Affiliations")
}

fn write_roles(w: &mut XmlDocumentWriter, roles: &[Role]) -> XmlResult {
    w.open("Roles")?;
    for role in roles {
        w.element("Role", &role.name)?;
    }
    w.close("Roles")
}

fn write_authors(w: &mut XmlDocumentWriter, authors: &[Affiliated<Author>]) -> XmlResult {
    w.open("Authors")?;
    for Affiliated {
        party,
        affiliations,
    } in authors
    {
        let Some(identity) = party.identity() else {
            tracing::warn!(author_id = party.id, "Author has neither person nor institution");
            continue;
        };

        w.open("Author")?;
        match identity {
            AuthorIdentity::Person {
                family_name,
                given_name,
                orcid,
            } => {
                w.open("Person")?;
                w.element("familyName", family_name)?;
                w.optional("givenName", given_name)?;
                w.optional("orcid", orcid)?;
                write_affiliations(w, affiliations)?;
                w.close("Person")?;
            }
            AuthorIdentity::Institution { name } => {
                w.open("Institution")?;
                w.element("name", name)?;
                write_affiliations(w, affiliations)?;
                w.close("Institution")?;
            }
        }
        w.close("Author")?;
    }
    w.close("Authors")
}

fn write_contact_persons(w: &mut XmlDocumentWriter, graph: &ResourceGraph) -> XmlResult {
    let persons: Vec<_> = graph
        .contact_persons
        .iter()
        .filter(|p| !p.party.is_empty())
        .collect();
    if persons.is_empty() {
        return Ok(());
    }

    w.open("ContactPersons")?;
    for Affiliated {
        party,
        affiliations,
    } in persons
    {
        w.open("ContactPerson")?;
        w.optional("familyName", party.family_name.as_deref())?;
        w.optional("givenName", party.given_name.as_deref())?;
        w.optional("orcid", party.orcid.as_deref())?;
        w.optional("email", party.email.as_deref())?;
        w.optional("website", party.website.as_deref())?;
        write_affiliations(w, affiliations)?;
        w.close("ContactPerson")?;
    }
    w.close("ContactPersons")
}

fn write_laboratories(w: &mut XmlDocumentWriter, graph: &ResourceGraph) -> XmlResult {
    let labs: Vec<_> = graph
        .originating_laboratories
        .iter()
        .filter(|lab| !lab.party.is_empty() || !lab.affiliations.is_empty())
        .collect();
    if labs.is_empty() {
        return Ok(());
    }

    w.open("OriginatingLaboratories")?;
    for Affiliated {
        party,
        affiliations,
    } in labs
    {
        w.open("OriginatingLaboratory")?;
        w.optional("labName", Some(party.lab_name.as_str()))?;
        w.optional("labId", party.lab_id.as_deref())?;
        write_affiliations(w, affiliations)?;
        w.close("OriginatingLaboratory")?;
    }
    w.close("OriginatingLaboratories")
}

fn write_contributors(w: &mut XmlDocumentWriter, graph: &ResourceGraph) -> XmlResult {
    w.open("Contributors")?;

    w.open("Persons")?;
    for Contributor {
        party,
        roles,
        affiliations,
    } in &graph.contributor_persons
    {
        w.open("Person")?;
        w.element("familyName", &party.family_name)?;
        w.optional("givenName", party.given_name.as_deref())?;
        w.optional("orcid", party.orcid.as_deref())?;
        write_roles(w, roles)?;
        write_affiliations(w, affiliations)?;
        w.close("Person")?;
    }
    w.close("Persons")?;

    w.open("Institutions")?;
    for Contributor {
        party,
        roles,
        affiliations,
    } in &graph.contributor_institutions
    {
        w.open("Institution")?;
        w.element("name", &party.name)?;
        write_roles(w, roles)?;
        write_affiliations(w, affiliations)?;
        w.close("Institution")?;
    }
    w.close("Institutions")?;

    w.close("Contributors")
}

fn write_descriptions(w: &mut XmlDocumentWriter, graph: &ResourceGraph) -> XmlResult {
    w.open("Descriptions")?;
    for description in &graph.descriptions {
        w.open("Description")?;
        w.element("type", &description.description_type)?;
        w.element("description", &description.description)?;
        w.close("Description")?;
    }
    w.close("Descriptions")
}

fn write_thesaurus_keywords(
    w: &mut XmlDocumentWriter,
    graph: &ResourceGraph,
    thesauri: &[ThesaurusTimestamp],
) -> XmlResult {
    w.open("ThesaurusKeywords")?;
    for stamp in thesauri {
        w.optional(stamp.element, Some(stamp.last_updated.as_str()))?;
    }
    for keyword in &graph.thesaurus_keywords {
        w.open("Keyword")?;
        w.element("keyword", &keyword.keyword)?;
        w.optional("scheme", keyword.scheme.as_deref())?;
        w.optional("schemeURI", keyword.scheme_uri.as_deref())?;
        w.optional("valueURI", keyword.value_uri.as_deref())?;
        w.optional("language", keyword.language.as_deref())?;
        w.close("Keyword")?;
    }
    w.close("ThesaurusKeywords")
}

fn write_free_keywords(w: &mut XmlDocumentWriter, graph: &ResourceGraph) -> XmlResult {
    w.open("FreeKeywords")?;
    for keyword in &graph.free_keywords {
        w.open("Keyword")?;
        w.element("free_keyword", &keyword.keyword)?;
        w.display("isCurated", keyword.is_curated)?;
        w.close("Keyword")?;
    }
    w.close("FreeKeywords")
}

fn write_coverages(w: &mut XmlDocumentWriter, graph: &ResourceGraph) -> XmlResult {
    w.open("SpatialTemporalCoverages")?;
    for c in &graph.coverages {
        w.open("SpatialTemporalCoverage")?;
        w.display("latitudeMin", c.latitude_min)?;
        w.optional_display("latitudeMax", c.latitude_max)?;
        w.display("longitudeMin", c.longitude_min)?;
        w.optional_display("longitudeMax", c.longitude_max)?;
        w.optional_display("dateStart", c.date_start.map(|d| d.format(DATE_FORMAT)))?;
        w.optional_display("dateEnd", c.date_end.map(|d| d.format(DATE_FORMAT)))?;
        w.optional_display("timeStart", c.time_start.map(|t| t.format(TIME_FORMAT)))?;
        w.optional_display("timeEnd", c.time_end.map(|t| t.format(TIME_FORMAT)))?;
        w.optional("timezone", c.timezone.as_deref())?;
        w.optional("description", c.description.as_deref())?;
        w.close("SpatialTemporalCoverage")?;
    }
    w.close("SpatialTemporalCoverages")
}

fn write_related_works(w: &mut XmlDocumentWriter, graph: &ResourceGraph) -> XmlResult {
    let works: Vec<_> = graph
        .related_works
        .iter()
        .filter(|work| !work.is_empty())
        .collect();
    if works.is_empty() {
        return Ok(());
    }

    w.open("RelatedWorks")?;
    for work in works {
        w.open("RelatedWork")?;
        w.element("identifier", &work.identifier)?;
        w.element("relation", &work.relation)?;
        w.element("identifierType", &work.identifier_type)?;
        w.close("RelatedWork")?;
    }
    w.close("RelatedWorks")
}

fn write_funding_references(w: &mut XmlDocumentWriter, graph: &ResourceGraph) -> XmlResult {
    if graph.funding_references.is_empty() {
        return Ok(());
    }

    w.open("FundingReferences")?;
    for f in &graph.funding_references {
        w.open("FundingReference")?;
        w.display("funding_reference_id", f.id)?;
        w.element("funder", &f.funder)?;
        w.optional("funderId", f.funder_id.as_deref())?;
        w.optional("funderIdType", f.funder_id_type.as_deref())?;
        w.optional("grantNumber", f.grant_number.as_deref())?;
        w.optional("grantName", f.grant_name.as_deref())?;
        w.optional("awardUri", f.award_uri.as_deref())?;
        w.close("FundingReference")?;
    }
    w.close("FundingReferences")
}

fn write_ggm_properties(w: &mut XmlDocumentWriter, graph: &ResourceGraph) -> XmlResult {
    let ggm = &graph.ggm_properties;
    if ggm.is_empty() {
        return Ok(());
    }

    w.open("ggm_properties")?;
    w.optional("model_name", ggm.model_name.as_deref())?;
    w.optional("celestial_body", ggm.celestial_body.as_deref())?;
    w.optional("model_type", ggm.model_type.as_deref())?;
    w.optional(
        "mathematical_representation",
        ggm.mathematical_representation.as_deref(),
    )?;
    w.optional("file_format", ggm.file_format.as_deref())?;
    w.optional("product_type", ggm.product_type.as_deref())?;
    w.close("ggm_properties")
}
