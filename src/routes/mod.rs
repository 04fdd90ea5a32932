mod helpers;
mod static_files;
mod subscribe;

pub use static_files::*;
pub use subscribe::*;
