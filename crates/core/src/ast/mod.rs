pub mod node;
pub mod raw;
pub mod walker;

pub use node::AstNode;
pub use raw::{ChildRef, RawNode};
pub use walker::{AstVisitor, walk};
