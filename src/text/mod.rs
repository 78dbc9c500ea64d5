mod error;
mod reader;
mod scanner;
mod writer;

/// Error types and source-location record.
pub use error::{Location, ReadError, WriteError};
/// Reader trait, text reader, and load helpers.
pub use reader::{ElementReader, TextReader, TextReaderOptions, load_all, load_one};
/// Writer trait, text writer, and render helper.
pub use writer::{ElementWriter, TextWriter, to_text};

/// Meta key under which the reader attaches a [`Location`] when
/// [`TextReaderOptions::include_location_meta`] is set.
pub const LOCATION_META_KEY: &str = "location";
