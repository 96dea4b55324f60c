//! Deserialization of flattened `[x]` choice groups
//!
//! Choice fields are declared as
//!
//! ```ignore
//! #[serde(flatten, deserialize_with = "ferrum_validator::choice::deserialize")]
//! onset: Option<ConditionOnset>,
//! ```
//!
//! An absent group yields `None`. A group key whose value does not fit its
//! variant fails deserialization of the whole document instead of being
//! dropped.

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

use serde::de::value::EnumAccessDeserializer;
use serde::de::{Deserialize, Deserializer, EnumAccess, Visitor};

use crate::Choice;

pub fn deserialize<'de, D, C>(deserializer: D) -> Result<Option<C>, D::Error>
where
    D: Deserializer<'de>,
    C: Choice + Deserialize<'de>,
{
    let found = Cell::new(false);
    let visitor = ChoiceVisitor {
        found: &found,
        marker: PhantomData,
    };

    match deserializer.deserialize_enum("choice", C::KEYS, visitor) {
        Ok(choice) => Ok(Some(choice)),
        // No key of the group was present.
        Err(_) if !found.get() => Ok(None),
        Err(err) => Err(err),
    }
}

struct ChoiceVisitor<'a, C> {
    found: &'a Cell<bool>,
    marker: PhantomData<C>,
}

impl<'de, C> Visitor<'de> for ChoiceVisitor<'_, C>
where
    C: Deserialize<'de>,
{
    type Value = C;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a single variant of a choice group")
    }

    fn visit_enum<A>(self, data: A) -> Result<C, A::Error>
    where
        A: EnumAccess<'de>,
    {
        self.found.set(true);
        C::deserialize(EnumAccessDeserializer::new(data))
    }
}
