//! Special-purpose datatypes: extensions, metadata and narrative

use super::general::Coding;
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Optional extension element
///
/// The `value[x]` and nested `extension` members are kept as raw JSON, since
/// the set of allowed value types covers every datatype.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Extension {
    /// Identifies the meaning of the extension
    #[serde(default)]
    #[fhir(required)]
    pub url: String,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

impl Extension {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extensions: HashMap::new(),
        }
    }

    /// The `value[x]` member, if any, with its JSON key.
    ///
    /// Input carrying several `value*` members yields the one whose key sorts
    /// first.
    pub fn value(&self) -> Option<(&str, &Value)> {
        self.extensions
            .iter()
            .filter(|(key, _)| key.starts_with("value"))
            .min_by_key(|(key, _)| key.as_str())
            .map(|(key, value)| (key.as_str(), value))
    }
}

/// Metadata about a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<Coding>>,
}

/// Human-readable summary of the resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    /// generated | extensions | additional | empty
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    /// Limited xhtml content
    #[serde(default)]
    #[fhir(required)]
    pub div: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::ValidationError;
    use serde_json::json;

    #[test]
    fn test_extension_keeps_value() {
        let ext: Extension = serde_json::from_value(json!({
            "url": "http://example.org/fhir/StructureDefinition/eye-colour",
            "valueString": "blue"
        }))
        .unwrap();

        assert!(ext.validate().is_ok());
        assert_eq!(ext.value(), Some(("valueString", &json!("blue"))));
        assert_eq!(serde_json::to_value(&ext).unwrap()["valueString"], "blue");
    }

    #[test]
    fn test_extension_value_is_deterministic() {
        // Each map gets its own hasher seed, so iteration order differs between runs.
        for _ in 0..8 {
            let ext: Extension = serde_json::from_value(json!({
                "url": "http://example.org/fhir/StructureDefinition/eye-colour",
                "valueString": "blue",
                "valueCode": "blue",
                "valueBoolean": true,
                "extension": []
            }))
            .unwrap();

            assert_eq!(ext.value(), Some(("valueBoolean", &json!(true))));
        }
    }

    #[test]
    fn test_extension_requires_url() {
        assert_eq!(
            Extension::default().validate(),
            Err(ValidationError::RequiredField { field: "url" })
        );
    }

    #[test]
    fn test_narrative_required_members() {
        let narrative = Narrative {
            status: "generated".to_string(),
            div: String::new(),
        };
        assert_eq!(
            narrative.validate(),
            Err(ValidationError::RequiredField { field: "div" })
        );
    }
}
