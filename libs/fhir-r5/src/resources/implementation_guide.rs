//! FHIR ImplementationGuide resource

use crate::datatypes::{
    CodeableConcept, Coding, ContactDetail, Extension, Identifier, Meta, Narrative,
    PublicationStatus, Reference, UsageContext,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A set of rules about how FHIR is used
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "ImplementationGuide")]
pub struct ImplementationGuide {
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_rules: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Canonical identifier for this implementation guide
    #[serde(default)]
    #[fhir(required)]
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub version_algorithm: Option<ImplementationGuideVersionAlgorithm>,

    #[serde(default)]
    #[fhir(required)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub status: Option<PublicationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Vec<ContactDetail>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_context: Option<Vec<UsageContext>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_label: Option<String>,

    /// NPM Package name for IG
    #[serde(default)]
    #[fhir(required)]
    pub package_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// FHIR Version(s) this Implementation Guide targets
    #[serde(default)]
    #[fhir(min = 1)]
    pub fhir_version: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Vec<ImplementationGuideDependsOn>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<Vec<ImplementationGuideGlobal>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<ImplementationGuideDefinition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<ImplementationGuideManifest>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "ImplementationGuide".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum ImplementationGuideVersionAlgorithm {
    #[serde(rename = "versionAlgorithmString")]
    String(String),
    #[serde(rename = "versionAlgorithmCoding")]
    Coding(Coding),
}

/// Another Implementation guide this depends on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuideDependsOn {
    #[serde(default)]
    #[fhir(required)]
    pub uri: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Profiles that apply globally
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuideGlobal {
    #[serde(rename = "type", default)]
    #[fhir(required)]
    pub type_: String,

    #[serde(default)]
    #[fhir(required)]
    pub profile: String,
}

/// Information needed to build the IG
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuideDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<Vec<ImplementationGuideGrouping>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Vec<ImplementationGuideResource>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<ImplementationGuidePage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Vec<ImplementationGuideParameter>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Vec<ImplementationGuideTemplate>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuideGrouping {
    #[serde(default)]
    #[fhir(required)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Resource in the implementation guide
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuideResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub reference: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fhir_version: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_example: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping_id: Option<String>,
}

/// Page/Section in the Guide
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuidePage {
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub source: Option<ImplementationGuidePageSource>,

    /// Name of the page when published
    #[serde(default)]
    #[fhir(required)]
    pub name: String,

    #[serde(default)]
    #[fhir(required)]
    pub title: String,

    /// html | markdown | xml | generated
    #[serde(default)]
    #[fhir(required)]
    pub generation: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Vec<ImplementationGuidePage>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum ImplementationGuidePageSource {
    #[serde(rename = "sourceUrl")]
    Url(String),
    #[serde(rename = "sourceString")]
    String(String),
    #[serde(rename = "sourceMarkdown")]
    Markdown(String),
}

/// Defines how IG is built by tools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuideParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub code: Option<Coding>,

    #[serde(default)]
    #[fhir(required)]
    pub value: String,
}

/// A template for building resources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuideTemplate {
    #[serde(default)]
    #[fhir(required)]
    pub code: String,

    #[serde(default)]
    #[fhir(required)]
    pub source: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Information about an assembled IG
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuideManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendering: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Vec<ImplementationGuideManifestResource>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Vec<ImplementationGuideManifestPage>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuideManifestResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub reference: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_example: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationGuideManifestPage {
    #[serde(default)]
    #[fhir(required)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Vec<String>>,
}

impl ImplementationGuide {
    /// Package ids of every declared dependency
    pub fn dependency_packages(&self) -> Vec<&str> {
        self.depends_on
            .iter()
            .flatten()
            .filter_map(|d| d.package_id.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::ValidationError;
    use serde_json::json;

    fn guide(definition: Value) -> ImplementationGuide {
        serde_json::from_value(json!({
            "resourceType": "ImplementationGuide",
            "url": "http://hl7.org/fhir/us/core/ImplementationGuide/hl7.fhir.us.core",
            "name": "USCore",
            "status": "active",
            "packageId": "hl7.fhir.us.core",
            "fhirVersion": ["5.0.0"],
            "dependsOn": [{ "uri": "http://hl7.org/fhir/uv/extensions", "packageId": "hl7.fhir.uv.extensions" }],
            "definition": definition
        }))
        .unwrap()
    }

    #[test]
    fn test_fhir_version_cardinality() {
        let mut ig = guide(json!({}));
        assert!(ig.validate().is_ok());
        assert_eq!(ig.dependency_packages(), vec!["hl7.fhir.uv.extensions"]);

        ig.fhir_version.clear();
        assert_eq!(
            ig.validate().unwrap_err(),
            ValidationError::MinCardinality {
                field: "fhirVersion",
                min: 1,
                found: 0
            }
        );
    }

    #[test]
    fn test_nested_page_generation_required() {
        let ig = guide(json!({
            "page": {
                "sourceUrl": "toc.html",
                "name": "toc.html",
                "title": "Table of Contents",
                "generation": "html",
                "page": [{ "name": "index.html", "title": "Home" }]
            }
        }));

        assert_eq!(
            ig.validate().unwrap_err().location(),
            "definition.page.page[0].generation"
        );
    }

    #[test]
    fn test_page_source_conflict() {
        let ig = guide(json!({
            "page": {
                "sourceUrl": "toc.html",
                "sourceMarkdown": "# Contents",
                "name": "toc.html",
                "title": "Table of Contents",
                "generation": "markdown"
            }
        }));

        let err = ig.validate().unwrap_err();
        assert_eq!(err.location(), "definition.page.source[x]");
        assert_eq!(
            err.leaf(),
            &ValidationError::ChoiceConflict {
                field: "source[x]",
                variants: vec!["sourceUrl", "sourceMarkdown"]
            }
        );
    }

    #[test]
    fn test_parameter_code_required() {
        let ig = guide(json!({ "parameter": [{ "value": "true" }] }));
        assert_eq!(ig.validate().unwrap_err().location(), "definition.parameter[0].code");
    }
}
