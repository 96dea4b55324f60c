//! FHIR QuestionnaireResponse resource

use super::questionnaire::QuestionnaireAnswerValue;
use crate::datatypes::{Extension, Identifier, Meta, Narrative, Reference};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A structured set of questions and their answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "QuestionnaireResponse")]
pub struct QuestionnaireResponse {
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
    pub identifier: Option<Vec<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Vec<Reference>>,

    /// Canonical URL of the Questionnaire being answered
    #[serde(default)]
    #[fhir(required)]
    pub questionnaire: String,

    /// in-progress | completed | amended | entered-in-error | stopped
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authored: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<QuestionnaireResponseItem>>,
}

fn default_resource_type() -> String {
    "QuestionnaireResponse".to_string()
}

/// Groups and questions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponseItem {
    /// Pointer to specific item from Questionnaire
    #[serde(default)]
    #[fhir(required)]
    pub link_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<Vec<QuestionnaireResponseAnswer>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<QuestionnaireResponseItem>>,
}

/// The response(s) to the question
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponseAnswer {
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(required, choice)]
    pub value: Option<QuestionnaireAnswerValue>,

    /// Child items of question
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<QuestionnaireResponseItem>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

impl QuestionnaireResponse {
    /// Answers given to the item with `link_id`, searched depth first
    pub fn answers(&self, link_id: &str) -> Vec<&QuestionnaireAnswerValue> {
        fn collect<'a>(
            items: &'a [QuestionnaireResponseItem],
            link_id: &str,
            out: &mut Vec<&'a QuestionnaireAnswerValue>,
        ) {
            for item in items {
                for answer in item.answer.iter().flatten() {
                    if item.link_id == link_id {
                        out.extend(answer.value.as_ref());
                    }
                    collect(answer.item.as_deref().unwrap_or_default(), link_id, out);
                }
                collect(item.item.as_deref().unwrap_or_default(), link_id, out);
            }
        }

        let mut out = Vec::new();
        collect(self.item.as_deref().unwrap_or_default(), link_id, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(items: Value) -> QuestionnaireResponse {
        serde_json::from_value(json!({
            "resourceType": "QuestionnaireResponse",
            "questionnaire": "http://example.org/Questionnaire/intake",
            "status": "completed",
            "item": items
        }))
        .unwrap()
    }

    #[test]
    fn test_answers_under_answers() {
        let qr = response(json!([{
            "linkId": "smoker",
            "answer": [{
                "valueBoolean": true,
                "item": [{ "linkId": "packs", "answer": [{ "valueInteger": 2 }] }]
            }]
        }]));

        assert_eq!(qr.answers("smoker"), vec![&QuestionnaireAnswerValue::Boolean(true)]);
        assert_eq!(qr.answers("packs"), vec![&QuestionnaireAnswerValue::Integer(2)]);
        assert!(qr.validate().is_ok());
    }

    #[test]
    fn test_nested_answer_value_required() {
        let qr = response(json!([{
            "linkId": "smoker",
            "answer": [{
                "valueBoolean": true,
                "item": [{ "linkId": "packs", "answer": [{}] }]
            }]
        }]));

        assert_eq!(
            qr.validate().unwrap_err().location(),
            "item[0].answer[0].item[0].answer[0].value[x]"
        );
    }

    #[test]
    fn test_questionnaire_required() {
        let mut qr = response(json!([]));
        qr.questionnaire.clear();
        assert_eq!(qr.validate().unwrap_err().field(), "questionnaire");
    }
}
