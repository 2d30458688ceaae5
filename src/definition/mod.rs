//! Config definitions: qualifier schema, candidate values, ordering and
//! validation.
//!
//! ## Flow
//! 1. [`RawDefinition::extract`] splits a parsed document into name, schema,
//!    candidate values and remaining fields.
//! 2. [`validate`] checks the candidates against the schema.
//! 3. [`QualifierComparator`] orders the candidates, most specific first.
//! 4. [`DefinitionAssembler`] ties it together into a [`ConfigDefinition`].
//!
//! Nothing here performs I/O or holds shared state.

mod assembler;
mod comparator;
mod extract;
mod schema;
mod validator;
mod value;

pub use assembler::{ConfigDefinition, DefinitionAssembler, assemble};
pub use comparator::{DecidingRule, QualifierComparator};
pub use extract::{RawDefinition, ReservedKeys, extract_metadata};
pub use schema::QualifierSchema;
pub use validator::validate;
pub use value::{ConfigValue, QualifierMap};
