pub mod location;
pub mod node_type;
pub mod position;
pub mod range;

pub use location::*;
pub use node_type::*;
pub use position::*;
pub use range::*;
