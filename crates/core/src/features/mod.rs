//! Navigation queries over indexed files.
//!
//! Every query answers "nothing here" with `None` (or an empty list); that
//! outcome is never an error.

pub mod navigation;

pub use navigation::{
    definition_of, get_definition, get_references, get_signature, get_type_definition,
    node_at_selection, references_of, type_definition_of,
};
