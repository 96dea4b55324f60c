//! R5 resources
//!
//! One module per resource. Every top-level type derives `Validate` with a
//! `#[fhir(resource = "...")]` discriminator, which also implements
//! [`Resource`](ferrum_validator::Resource).

pub mod account;
pub mod actor_definition;
pub mod biologically_derived_product;
pub mod bundle;
pub mod canonical_resource;
pub mod capability_statement;
pub mod compartment_definition;
pub mod composition;
pub mod condition;
pub mod consent;
pub mod device_definition;
pub mod diagnostic_report;
pub mod episode_of_care;
pub mod event_definition;
pub mod evidence;
pub mod example_scenario;
pub mod family_member_history;
pub mod imaging_study;
pub mod implementation_guide;
pub mod invoice;
pub mod message_definition;
pub mod message_header;
pub mod observation_definition;
pub mod procedure;
pub mod questionnaire;
pub mod questionnaire_response;
pub mod regulated_authorization;
pub mod requirements;
pub mod research_study;
pub mod research_subject;
pub mod risk_assessment;
pub mod specimen;
pub mod specimen_definition;
pub mod subscription_topic;

// Re-export commonly used types
pub use account::*;
pub use actor_definition::*;
pub use biologically_derived_product::*;
pub use bundle::*;
pub use canonical_resource::*;
pub use capability_statement::*;
pub use compartment_definition::*;
pub use composition::*;
pub use condition::*;
pub use consent::*;
pub use device_definition::*;
pub use diagnostic_report::*;
pub use episode_of_care::*;
pub use event_definition::*;
pub use evidence::*;
pub use example_scenario::*;
pub use family_member_history::*;
pub use imaging_study::*;
pub use implementation_guide::*;
pub use invoice::*;
pub use message_definition::*;
pub use message_header::*;
pub use observation_definition::*;
pub use procedure::*;
pub use questionnaire::*;
pub use questionnaire_response::*;
pub use regulated_authorization::*;
pub use requirements::*;
pub use research_study::*;
pub use research_subject::*;
pub use risk_assessment::*;
pub use specimen::*;
pub use specimen_definition::*;
pub use subscription_topic::*;
