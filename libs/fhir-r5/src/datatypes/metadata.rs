//! Metadata datatypes used by canonical resources

use super::general::{
    Attachment, CodeableConcept, Coding, ContactPoint, Money, Quantity, Range, Reference, Timing,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Publication status of a canonical resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    #[default]
    Draft,
    Active,
    Retired,
    Unknown,
}

/// Contact information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub telecom: Option<Vec<ContactPoint>>,
}

/// Describes the context of use for a conformance or knowledge resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UsageContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub code: Option<Coding>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(required, choice)]
    pub value: Option<UsageContextValue>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

/// UsageContext.value[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum UsageContextValue {
    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "valueQuantity")]
    Quantity(Quantity),
    #[serde(rename = "valueRange")]
    Range(Range),
    #[serde(rename = "valueReference")]
    Reference(Reference),
}

/// Related artifacts for a knowledge resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RelatedArtifact {
    /// documentation | justification | citation | predecessor | successor | derived-from | ...
    #[serde(rename = "type", default)]
    #[fhir(required)]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Attachment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_reference: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_status: Option<PublicationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
}

/// An expression that can be used to generate a value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Expression {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Short name assigned to expression for reuse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// text/cql | text/fhirpath | application/x-fhir-query | etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Defines an expected trigger for a module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDefinition {
    /// named-event | periodic | data-changed | data-added | data-modified | data-removed | ...
    #[serde(rename = "type", default)]
    #[fhir(required)]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_topic: Option<String>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub timing: Option<TriggerDefinitionTiming>,

    /// Triggering data of the event (DataRequirement, kept as raw JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Expression>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

/// TriggerDefinition.timing[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum TriggerDefinitionTiming {
    #[serde(rename = "timingTiming")]
    Timing(Timing),
    #[serde(rename = "timingReference")]
    Reference(Reference),
    #[serde(rename = "timingDate")]
    Date(String),
    #[serde(rename = "timingDateTime")]
    DateTime(String),
}

/// Availability data for an item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MonetaryComponent {
    /// base | surcharge | deduction | discount | tax | informational
    #[serde(rename = "type", default)]
    #[fhir(required)]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::ValidationError;
    use serde_json::json;

    #[test]
    fn test_usage_context_requires_code_then_value() {
        assert_eq!(
            UsageContext::default().violations(),
            vec![
                ValidationError::RequiredField { field: "code" },
                ValidationError::RequiredField { field: "value[x]" },
            ]
        );
    }

    #[test]
    fn test_usage_context_value_is_validated() {
        let context: UsageContext = serde_json::from_value(json!({
            "code": { "system": "http://terminology.hl7.org/CodeSystem/usage-context-type", "code": "age" },
            "valueRange": { "low": { "value": 18, "unit": "a" } }
        }))
        .unwrap();

        assert!(context.validate().is_ok());
        assert!(matches!(context.value, Some(UsageContextValue::Range(_))));
    }

    #[test]
    fn test_publication_status_codes() {
        let status: PublicationStatus = serde_json::from_value(json!("retired")).unwrap();
        assert_eq!(status, PublicationStatus::Retired);
        assert_eq!(PublicationStatus::default(), PublicationStatus::Draft);
    }

    #[test]
    fn test_trigger_definition_type_required() {
        let trigger = TriggerDefinition {
            timing: Some(TriggerDefinitionTiming::DateTime("2024-01-01T00:00:00Z".to_string())),
            ..Default::default()
        };
        assert_eq!(
            trigger.validate(),
            Err(ValidationError::RequiredField { field: "type" })
        );
    }

    #[test]
    fn test_monetary_component_amount() {
        let component: MonetaryComponent = serde_json::from_value(json!({
            "type": "base",
            "amount": { "value": 12.5, "currency": "EUR" }
        }))
        .unwrap();
        assert!(component.validate().is_ok());
    }
}
