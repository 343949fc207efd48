//! Invoice filename parsing and screenshot association.

mod parser;
pub mod patterns;
mod validator;

pub use parser::FilenameParser;
pub use validator::{DirectoryListing, SiblingFiles, Validator};

use crate::error::ParseError;

/// Result type for filename parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
