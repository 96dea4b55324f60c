//! General-purpose datatypes

use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A reference to a code defined by a terminology system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_selected: Option<bool>,
}

impl Coding {
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            code: Some(code.into()),
            ..Default::default()
        }
    }
}

/// Concept - reference to a terminology or just text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CodeableConcept {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coding: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            coding: None,
            text: Some(text.into()),
        }
    }
}

/// Reference to a resource or a concept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CodeableReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

/// A reference from one resource to another
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Literal reference, relative, internal or absolute URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Type the reference refers to (e.g. "Patient")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Box<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    pub fn to(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Default::default()
        }
    }
}

/// An identifier intended for computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    /// usual | official | temp | secondary | old
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigner: Option<Box<Reference>>,
}

/// Time range defined by start and end date/time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// A measured or measurable amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// < | <= | >= | > | ad
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// A duration of time during which an organism (or a process) has existed
pub type Age = Quantity;

/// A length of time
pub type Duration = Quantity;

/// A fixed quantity (no comparator)
pub type SimpleQuantity = Quantity;

/// An amount of economic utility in some recognized currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Set of values bounded by low and high
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<SimpleQuantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<SimpleQuantity>,
}

/// A ratio of two Quantity values - a numerator and a denominator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Ratio {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerator: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub denominator: Option<SimpleQuantity>,
}

/// Text node with attribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub author: Option<AnnotationAuthor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// The annotation - text content (as markdown)
    #[serde(default)]
    #[fhir(required)]
    pub text: String,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

/// Annotation.author[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum AnnotationAuthor {
    #[serde(rename = "authorReference")]
    Reference(Reference),
    #[serde(rename = "authorString")]
    String(String),
}

/// Content in a format defined elsewhere
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Mime type of the content, with charset etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Data inline, base64ed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
}

/// Details of a technology mediated contact point (phone, fax, email, etc.)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    /// phone | fax | email | pager | url | sms | other
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// home | work | temp | old | mobile
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

/// A signature along with supporting context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub who: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sig_format: Option<String>,

    /// The actual signature content (XML DigSig, JWS, picture, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// A timing schedule that specifies an event that may occur multiple times
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<TimingRepeat>,

    /// C | BID | TID | QID | AM | PM | QD | QOD | +
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
}

/// When the event is to occur
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TimingRepeat {
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub bounds: Option<TimingRepeatBounds>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_max: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_max: Option<f64>,

    /// s | min | h | d | wk | mo | a
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_max: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_max: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<Vec<String>>,

    /// Minutes from event (before or after)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

/// Timing.repeat.bounds[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum TimingRepeatBounds {
    #[serde(rename = "boundsDuration")]
    Duration(Duration),
    #[serde(rename = "boundsRange")]
    Range(Range),
    #[serde(rename = "boundsPeriod")]
    Period(Period),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::{ValidationError, ViolationKind};
    use serde_json::json;

    #[test]
    fn test_value_objects_without_required_members_pass_empty() {
        assert!(Coding::default().validate().is_ok());
        assert!(Identifier::default().validate().is_ok());
        assert!(Quantity::default().validate().is_ok());
        assert!(Timing::default().validate().is_ok());
    }

    #[test]
    fn test_annotation_requires_text() {
        let annotation: Annotation = serde_json::from_value(json!({
            "authorString": "Dr. Who",
            "time": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(
            annotation.validate(),
            Err(ValidationError::RequiredField { field: "text" })
        );
        assert!(matches!(annotation.author, Some(AnnotationAuthor::String(_))));
    }

    #[test]
    fn test_annotation_author_conflict() {
        let annotation: Annotation = serde_json::from_value(json!({
            "authorString": "Dr. Who",
            "authorReference": { "reference": "Practitioner/1" },
            "text": "note"
        }))
        .unwrap();

        let err = annotation.validate().unwrap_err();
        assert_eq!(err.kind(), ViolationKind::ChoiceConflict);
        assert_eq!(err.field(), "author[x]");
    }

    #[test]
    fn test_timing_bounds_roundtrip_keeps_single_key() {
        let timing: Timing = serde_json::from_value(json!({
            "repeat": {
                "boundsPeriod": { "start": "2024-01-01" },
                "frequency": 2,
                "period": 1.0,
                "periodUnit": "d"
            }
        }))
        .unwrap();

        let value = serde_json::to_value(&timing).unwrap();
        assert_eq!(value["repeat"]["boundsPeriod"]["start"], "2024-01-01");
        assert!(value["repeat"].get("bounds").is_none());
    }

    #[test]
    fn test_reference_identifier_nesting() {
        let reference: Reference = serde_json::from_value(json!({
            "identifier": {
                "system": "urn:oid:1.2.3",
                "value": "42",
                "assigner": { "display": "Registry" }
            }
        }))
        .unwrap();

        assert!(reference.validate().is_ok());
        assert_eq!(
            reference.identifier.as_ref().and_then(|i| i.value.as_deref()),
            Some("42")
        );
    }
}
