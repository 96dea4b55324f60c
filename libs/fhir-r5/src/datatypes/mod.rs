//! R5 datatypes
//!
//! Value objects embedded in resources. Most have no required members and
//! validate only through their children.

pub mod general;
pub mod metadata;
pub mod special;

pub use general::*;
pub use metadata::*;
pub use special::*;
