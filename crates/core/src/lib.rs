//! Navigation over solc ASTs: indexing, spatial lookup and
//! definition/type-definition/reference queries.

pub mod ast;
pub mod error;
pub mod features;
pub mod index;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod source_map;

pub use ast::AstNode;
pub use error::{Result, SolscopeError};
pub use index::StaticInfo;
pub use model::SolidityFile;
pub use runtime::{CompileStatus, ManagerConfig, SolidityManager};
