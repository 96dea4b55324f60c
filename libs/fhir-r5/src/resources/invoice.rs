//! FHIR Invoice resource

use crate::datatypes::{
    Annotation, CodeableConcept, Extension, Identifier, Meta, MonetaryComponent, Money,
    Narrative, Period, Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Invoice containing ChargeItems from an Account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "Invoice")]
pub struct Invoice {
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

    /// draft | issued | balanced | cancelled | entered-in-error
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_reason: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation: Option<String>,

    /// Billing date or period
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub period: Option<InvoicePeriod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<Vec<InvoiceParticipant>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_item: Option<Vec<InvoiceLineItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price_component: Option<Vec<MonetaryComponent>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_net: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_gross: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Invoice".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum InvoicePeriod {
    #[serde(rename = "periodDate")]
    Date(String),
    #[serde(rename = "periodPeriod")]
    Period(Period),
}

/// Participant in creation of this Invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceParticipant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub actor: Option<Reference>,
}

/// Line items of this Invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub serviced: Option<InvoiceLineItemServiced>,

    /// Reference to ChargeItem containing details of this line item or an inline billing code
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(required, choice)]
    pub charge_item: Option<InvoiceLineItemChargeItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_component: Option<Vec<MonetaryComponent>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum InvoiceLineItemServiced {
    #[serde(rename = "servicedDate")]
    Date(String),
    #[serde(rename = "servicedPeriod")]
    Period(Period),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum InvoiceLineItemChargeItem {
    #[serde(rename = "chargeItemReference")]
    Reference(Reference),
    #[serde(rename = "chargeItemCodeableConcept")]
    CodeableConcept(CodeableConcept),
}

impl Invoice {
    /// Sum of the `base` price components over all line items
    pub fn base_total(&self) -> f64 {
        self.line_item
            .iter()
            .flatten()
            .flat_map(|item| item.price_component.iter().flatten())
            .filter(|component| component.type_ == "base")
            .filter_map(|component| component.amount.as_ref().and_then(|m| m.value))
            .sum()
    }
}
