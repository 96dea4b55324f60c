//! FHIR SubscriptionTopic resource

use crate::datatypes::{
    CodeableConcept, ContactDetail, Extension, Identifier, Meta, Narrative, Period,
    PublicationStatus, UsageContext,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// The definition of a specific topic for triggering events within the Subscriptions framework
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "SubscriptionTopic")]
pub struct SubscriptionTopic {
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

    /// Canonical identifier for this subscription topic
    #[serde(default)]
    #[fhir(required)]
    pub url: String,

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
    pub resource_trigger: Option<Vec<SubscriptionTopicResourceTrigger>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_trigger: Option<Vec<SubscriptionTopicEventTrigger>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_filter_by: Option<Vec<SubscriptionTopicCanFilterBy>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_shape: Option<Vec<SubscriptionTopicNotificationShape>>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "SubscriptionTopic".to_string()
}

/// Definition of a resource-based trigger for the subscription topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTopicResourceTrigger {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Data Type or Resource (reference to definition) for this trigger definition
    #[serde(default)]
    #[fhir(required)]
    pub resource: String,

    /// create | update | delete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_interaction: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_criteria: Option<SubscriptionTopicQueryCriteria>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fhir_path_criteria: Option<String>,
}

/// Query based trigger rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTopicQueryCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,

    /// test-passes | test-fails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_for_create: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_for_delete: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_both: Option<bool>,
}

/// Event definitions the SubscriptionTopic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTopicEventTrigger {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub event: Option<CodeableConcept>,

    #[serde(default)]
    #[fhir(required)]
    pub resource: String,
}

/// Properties by which a Subscription can filter notifications from the SubscriptionTopic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTopicCanFilterBy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    /// Human-readable and computation-friendly name for a filter parameter usable by subscriptions on this topic
    #[serde(default)]
    #[fhir(required)]
    pub filter_parameter: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_definition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Vec<String>>,
}

/// Properties for describing the shape of notifications generated by this topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTopicNotificationShape {
    #[serde(default)]
    #[fhir(required)]
    pub resource: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev_include: Option<Vec<String>>,
}

impl SubscriptionTopic {
    /// Resource types that can fire this topic
    pub fn trigger_resources(&self) -> Vec<&str> {
        let resource = self
            .resource_trigger
            .iter()
            .flatten()
            .map(|t| t.resource.as_str());
        let event = self
            .event_trigger
            .iter()
            .flatten()
            .map(|t| t.resource.as_str());
        resource.chain(event).collect()
    }
}
