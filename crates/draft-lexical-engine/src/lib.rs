pub mod convert;
pub mod io;
pub mod json;
pub mod models;

// Re-export key types for easier usage
pub use convert::{ConvertError, ConvertOptions, convert_document};
pub use convert::embedded::convert_embedded;
pub use convert::segments::segment;
pub use convert::styles::{FontCatalog, StyleResolver};
pub use json::{expand_keys, shorten_keys, to_json};
pub use models::{draft::*, lexical::*};
