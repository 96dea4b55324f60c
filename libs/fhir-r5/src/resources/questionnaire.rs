//! FHIR Questionnaire resource

use crate::datatypes::{
    Attachment, CodeableConcept, Coding, ContactDetail, Extension, Identifier, Meta, Narrative,
    Period, PublicationStatus, Quantity, Reference, UsageContext,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A structured set of questions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "Questionnaire")]
pub struct Questionnaire {
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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub status: Option<PublicationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<bool>,

    /// Resource that can be subject of QuestionnaireResponse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<Vec<String>>,

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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<QuestionnaireItem>>,
}

fn default_resource_type() -> String {
    "Questionnaire".to_string()
}

/// Questions and sections within the Questionnaire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireItem {
    /// Unique id for item in questionnaire
    #[serde(default)]
    #[fhir(required)]
    pub link_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// group | display | boolean | decimal | integer | date | dateTime | time | string | text | url | coding | attachment | reference | quantity
    #[serde(rename = "type", default)]
    #[fhir(required)]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_when: Option<Vec<QuestionnaireEnableWhen>>,

    /// all | any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_behavior: Option<String>,

    /// hidden | protected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_display: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeats: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i32>,

    /// optionsOnly | optionsOrType | optionsOrString
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_constraint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_value_set: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_option: Option<Vec<QuestionnaireAnswerOption>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<Vec<QuestionnaireInitial>>,

    /// Nested questionnaire items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<QuestionnaireItem>>,
}

/// Only allow data when
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireEnableWhen {
    /// The linkId of question that determines whether item is enabled/disabled
    #[serde(default)]
    #[fhir(required)]
    pub question: String,

    /// exists | = | != | > | < | >= | <=
    #[serde(default)]
    #[fhir(required)]
    pub operator: String,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(required, choice)]
    pub answer: Option<QuestionnaireEnableWhenAnswer>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum QuestionnaireEnableWhenAnswer {
    #[serde(rename = "answerBoolean")]
    Boolean(bool),
    #[serde(rename = "answerDecimal")]
    Decimal(f64),
    #[serde(rename = "answerInteger")]
    Integer(i64),
    #[serde(rename = "answerDate")]
    Date(String),
    #[serde(rename = "answerDateTime")]
    DateTime(String),
    #[serde(rename = "answerTime")]
    Time(String),
    #[serde(rename = "answerString")]
    String(String),
    #[serde(rename = "answerCoding")]
    Coding(Coding),
    #[serde(rename = "answerQuantity")]
    Quantity(Quantity),
    #[serde(rename = "answerReference")]
    Reference(Reference),
}

/// Permitted answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireAnswerOption {
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(required, choice)]
    pub value: Option<QuestionnaireAnswerOptionValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_selected: Option<bool>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum QuestionnaireAnswerOptionValue {
    #[serde(rename = "valueInteger")]
    Integer(i64),
    #[serde(rename = "valueDate")]
    Date(String),
    #[serde(rename = "valueTime")]
    Time(String),
    #[serde(rename = "valueString")]
    String(String),
    #[serde(rename = "valueCoding")]
    Coding(Coding),
    #[serde(rename = "valueReference")]
    Reference(Reference),
}

/// Initial value(s) when item is first rendered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireInitial {
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(required, choice)]
    pub value: Option<QuestionnaireAnswerValue>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

/// Any value an item can carry as an initial value or an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum QuestionnaireAnswerValue {
    #[serde(rename = "valueBoolean")]
    Boolean(bool),
    #[serde(rename = "valueDecimal")]
    Decimal(f64),
    #[serde(rename = "valueInteger")]
    Integer(i64),
    #[serde(rename = "valueDate")]
    Date(String),
    #[serde(rename = "valueDateTime")]
    DateTime(String),
    #[serde(rename = "valueTime")]
    Time(String),
    #[serde(rename = "valueString")]
    String(String),
    #[serde(rename = "valueUri")]
    Uri(String),
    #[serde(rename = "valueAttachment")]
    Attachment(Attachment),
    #[serde(rename = "valueCoding")]
    Coding(Coding),
    #[serde(rename = "valueQuantity")]
    Quantity(Quantity),
    #[serde(rename = "valueReference")]
    Reference(Reference),
}

impl Questionnaire {
    /// Finds an item anywhere in the item tree by its linkId
    pub fn find_item(&self, link_id: &str) -> Option<&QuestionnaireItem> {
        fn walk<'a>(
            items: &'a [QuestionnaireItem],
            link_id: &str,
        ) -> Option<&'a QuestionnaireItem> {
            items.iter().find_map(|item| {
                if item.link_id == link_id {
                    Some(item)
                } else {
                    walk(item.item.as_deref().unwrap_or_default(), link_id)
                }
            })
        }

        walk(self.item.as_deref().unwrap_or_default(), link_id)
    }
}
