mod content_root;
mod errors;
mod mime;
mod static_files_handler;

pub use content_root::ContentRoot;
pub use errors::StaticFileError;
pub use static_files_handler::serve_static;
