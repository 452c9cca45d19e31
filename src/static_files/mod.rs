//! Static file serving subsystem.
//!
//! Every path outside the API prefix lands here. The URL path is mapped
//! onto the document root, the content type comes from the extension, and
//! filesystem failures become plain-text 404/500 responses.

pub mod error;
pub mod mime;
pub mod responder;

pub use error::StaticFileError;
pub use mime::content_type_for;
pub use responder::StaticFiles;
