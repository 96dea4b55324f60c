//! CLI commands module.

pub mod types;
pub mod validate;

pub use types::TypesCommand;
pub use validate::ValidateCommand;
