use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u32);

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        RecordId(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value the store can persist. The reference is the record's natural key
/// and decides whether a store is an insert or a replace.
pub trait Record: Serialize + DeserializeOwned + Default + Send + Sync + 'static {
    fn reference(&self) -> &str;
}

/// One (facet, term) pair to be indexed for a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexEntry {
    pub facet: String,
    pub term: String,
}

impl IndexEntry {
    pub fn new(facet: impl Into<String>, term: impl Into<String>) -> Self {
        IndexEntry {
            facet: facet.into(),
            term: term.into(),
        }
    }
}

// Bibliographic product record. A subset of the ONIX 3.0 product block:
// enough structure for identifiers, titles, contributors and subjects.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub record_reference: String,
    pub notification_type: String,
    pub record_source_type: Option<String>,
    pub identifiers: Vec<ProductIdentifier>,
    pub descriptive_detail: DescriptiveDetail,
    pub publishing_detail: PublishingDetail,
    pub collateral_detail: CollateralDetail,
}

impl Record for Product {
    fn reference(&self) -> &str {
        &self.record_reference
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductIdentifier {
    pub id_type: String,
    pub id_type_name: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveDetail {
    pub product_form: Option<String>,
    pub title_details: Vec<TitleDetail>,
    pub collections: Vec<Collection>,
    pub contributors: Vec<Contributor>,
    pub no_edition: bool,
    pub languages: Vec<Language>,
    pub subjects: Vec<Subject>,
    pub extent_pages: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleDetail {
    pub title_type: String,
    pub elements: Vec<TitleElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleElement {
    pub level: String,
    pub title_text: Option<String>,
    pub title_prefix: Option<String>,
    pub title_without_prefix: Option<String>,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub collection_type: String,
    pub title_details: Vec<TitleDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub sequence_number: Option<u32>,
    pub roles: Vec<String>,
    pub name_identifiers: Vec<NameIdentifier>,
    pub person_name: Option<String>,
    pub person_name_inverted: Option<String>,
    pub names_before_key: Option<String>,
    pub key_names: Option<String>,
    pub corporate_name: Option<String>,
    pub corporate_name_inverted: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameIdentifier {
    pub id_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub role: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub scheme_identifier: String,
    pub subject_code: Option<String>,
    pub heading_texts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishingDetail {
    pub publishers: Vec<Publisher>,
    pub city_of_publication: Option<String>,
    pub country_of_publication: Option<String>,
    pub publishing_dates: Vec<PublishingDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub role: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishingDate {
    pub role: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollateralDetail {
    pub supporting_resources: Vec<SupportingResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportingResource {
    pub content_type: String,
    pub mode: String,
    pub links: Vec<String>,
}
