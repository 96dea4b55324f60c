//! FHIR Bundle resource

use crate::datatypes::{Identifier, Meta, Signature};
use crate::error::{Error, Result};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR Bundle resource
///
/// A container for a collection of resources. Entry resources stay raw JSON;
/// a [`ResourceRegistry`](crate::ResourceRegistry) resolves them on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "Bundle")]
pub struct Bundle {
    /// Resource type - always "Bundle"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id of this artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_rules: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Persistent identifier for the bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,

    /// Indicates the purpose of this bundle - how it was intended to be used
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub bundle_type: Option<BundleType>,

    /// When the bundle was assembled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// If search, the total number of matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,

    /// Links related to this Bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Vec<BundleLink>>,

    /// Entry in the bundle - will have a resource or information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Vec<BundleEntry>>,

    /// Digital Signature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,

    /// Issues with the Bundle (an OperationOutcome)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Value>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Bundle".to_string()
}

/// Type of Bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub enum BundleType {
    /// A set of resources composing a single coherent document
    Document,
    /// A message (application/response or application/request)
    Message,
    /// A transaction - intended to be processed atomically
    Transaction,
    /// Response to a transaction
    TransactionResponse,
    /// A set of resources to be processed independently
    Batch,
    /// Response to a batch
    BatchResponse,
    /// A list of resources with history
    History,
    /// Results of a search operation
    Searchset,
    /// A set of resources collected for a specific purpose
    Collection,
    /// A set of changes to be applied to a subscription topic
    SubscriptionNotification,
}

/// Links related to this Bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BundleLink {
    /// See http://www.iana.org/assignments/link-relations/link-relations.xhtml#link-relations-1
    #[serde(default)]
    #[fhir(required)]
    pub relation: String,

    /// Reference details for the link
    #[serde(default)]
    #[fhir(required)]
    pub url: String,
}

/// Entry in the bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// Links related to this entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Vec<BundleLink>>,

    /// URI for resource (e.g. the absolute URL server address, or urn:uuid:...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    /// A resource in this bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,

    /// Search-related information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<BundleEntrySearch>,

    /// Additional execution information (transaction/batch/history)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<BundleEntryRequest>,

    /// Results of execution (transaction/batch/history)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<BundleEntryResponse>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

/// Request details for a Bundle entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntryRequest {
    /// GET | HEAD | POST | PUT | DELETE | PATCH
    #[serde(default)]
    #[fhir(required)]
    pub method: String,

    /// URL for HTTP equivalent of this entry
    #[serde(default)]
    #[fhir(required)]
    pub url: String,

    /// For managing cache validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_none_match: Option<String>,

    /// For managing cache validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_modified_since: Option<String>,

    /// For managing update contention
    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_match: Option<String>,

    /// For conditional creates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_none_exist: Option<String>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

/// Response details for a Bundle entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntryResponse {
    /// Status response code (text optional)
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    /// The location (if the operation returns a location)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// The Etag for the resource (if relevant)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Server's date time modified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    /// OperationOutcome with hints and warnings (for batch/transaction)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Value>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

/// Search-related information for a Bundle entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntrySearch {
    /// Why this entry is in the result set
    #[serde(rename = "mode", skip_serializing_if = "Option::is_none")]
    pub search_mode: Option<BundleEntrySearchMode>,

    /// Search ranking (between 0 and 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

/// Why an entry is in the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "lowercase")]
pub enum BundleEntrySearchMode {
    /// This resource matched the search specification
    Match,
    /// This resource is returned because it is referred to from another resource in the search set
    Include,
    /// An OperationOutcome providing additional information about the processing of a search entry
    Outcome,
}

impl Bundle {
    /// Create a new Bundle with minimal required fields
    pub fn new(bundle_type: BundleType) -> Self {
        Self {
            resource_type: default_resource_type(),
            bundle_type: Some(bundle_type),
            ..Default::default()
        }
    }

    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(Error::from)
    }

    /// Convert to JSON Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::from)
    }

    /// Check if this is a transaction bundle
    pub fn is_transaction(&self) -> bool {
        matches!(self.bundle_type, Some(BundleType::Transaction))
    }

    /// Check if this is a batch bundle
    pub fn is_batch(&self) -> bool {
        matches!(self.bundle_type, Some(BundleType::Batch))
    }

    /// Check if this is a search result bundle
    pub fn is_searchset(&self) -> bool {
        matches!(self.bundle_type, Some(BundleType::Searchset))
    }

    /// Get the number of entries in the bundle
    pub fn entry_count(&self) -> usize {
        self.entry.as_ref().map_or(0, Vec::len)
    }

    /// Get entries as a slice
    pub fn entries(&self) -> &[BundleEntry] {
        self.entry.as_deref().unwrap_or(&[])
    }

    /// Get entries as a mutable slice
    pub fn entries_mut(&mut self) -> &mut [BundleEntry] {
        self.entry.as_deref_mut().unwrap_or(&mut [])
    }

    /// Add an entry to the bundle
    pub fn add_entry(&mut self, entry: BundleEntry) {
        self.entry.get_or_insert_with(Vec::new).push(entry);
    }

    /// Add a link to the bundle
    pub fn add_link(&mut self, relation: impl Into<String>, url: impl Into<String>) {
        self.link.get_or_insert_with(Vec::new).push(BundleLink {
            relation: relation.into(),
            url: url.into(),
        });
    }
}

impl BundleEntry {
    /// Entry carrying a resource and a transaction request
    pub fn request(
        resource: Value,
        method: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            resource: Some(resource),
            request: Some(BundleEntryRequest {
                method: method.into(),
                url: url.into(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::{Resource, ValidationError};
    use serde_json::json;

    #[test]
    fn test_deserialize_bundle() {
        let json = json!({
            "resourceType": "Bundle",
            "id": "example-bundle",
            "type": "searchset",
            "total": 1,
            "entry": [
                {
                    "fullUrl": "http://example.org/fhir/Patient/123",
                    "resource": {
                        "resourceType": "Patient",
                        "id": "123"
                    },
                    "search": {
                        "mode": "match",
                        "score": 1.0
                    }
                }
            ]
        });

        let bundle: Bundle = serde_json::from_value(json).unwrap();
        assert_eq!(bundle.id, Some("example-bundle".to_string()));
        assert_eq!(bundle.bundle_type, Some(BundleType::Searchset));
        assert_eq!(bundle.total, Some(1));
        assert_eq!(bundle.entry_count(), 1);
        assert!(bundle.validate().is_ok());
    }

    #[test]
    fn test_serialize_bundle() {
        let bundle = Bundle::new(BundleType::Transaction);
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["resourceType"], "Bundle");
        assert_eq!(json["type"], "transaction");
    }

    #[test]
    fn test_bundle_type_predicates() {
        assert!(Bundle::new(BundleType::Transaction).is_transaction());
        assert!(Bundle::new(BundleType::Batch).is_batch());
        assert!(Bundle::new(BundleType::Searchset).is_searchset());
        assert!(!Bundle::new(BundleType::Batch).is_transaction());
    }

    #[test]
    fn test_add_entry_and_link() {
        let mut bundle = Bundle::new(BundleType::Collection);
        bundle.add_entry(BundleEntry {
            full_url: Some("http://example.org/fhir/Patient/123".to_string()),
            resource: Some(json!({"resourceType": "Patient", "id": "123"})),
            ..Default::default()
        });
        bundle.add_link("self", "http://example.org/fhir/Patient?_id=123");

        assert_eq!(bundle.entry_count(), 1);
        assert_eq!(bundle.link.as_ref().unwrap()[0].relation, "self");
        assert!(bundle.validate().is_ok());
    }

    #[test]
    fn test_missing_type_is_required() {
        assert_eq!(
            Bundle::empty().validate(),
            Err(ValidationError::RequiredField { field: "type" })
        );
    }

    #[test]
    fn test_wrong_resource_type() {
        let bundle = Bundle {
            resource_type: "Bundl".to_string(),
            ..Bundle::new(BundleType::Batch)
        };
        assert_eq!(
            bundle.validate(),
            Err(ValidationError::InvalidResourceType {
                expected: "Bundle",
                actual: "Bundl".to_string()
            })
        );
    }

    #[test]
    fn test_empty_request_method_is_located() {
        let mut bundle = Bundle::new(BundleType::Transaction);
        for _ in 0..2 {
            bundle.add_entry(BundleEntry::request(
                json!({"resourceType": "Patient"}),
                "POST",
                "Patient",
            ));
        }
        bundle.add_entry(BundleEntry::request(json!({"resourceType": "Patient"}), "", "Patient"));

        let err = bundle.validate().unwrap_err();
        assert_eq!(err.location(), "entry[2].request.method");
        assert_eq!(err.leaf(), &ValidationError::RequiredField { field: "method" });
    }

    #[test]
    fn test_bundle_entry_response() {
        let response = BundleEntryResponse {
            status: "201 Created".to_string(),
            location: Some("Patient/123/_history/1".to_string()),
            etag: Some("W/\"1\"".to_string()),
            last_modified: Some("2023-01-01T00:00:00Z".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "201 Created");
        assert_eq!(json["location"], "Patient/123/_history/1");
        assert!(response.validate().is_ok());
    }
}
