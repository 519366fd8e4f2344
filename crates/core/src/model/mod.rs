pub mod source;

pub use source::{SolidityFile, hash_content};
