mod errors;
mod helpers;
mod subscribe_handler;

pub use errors::SubscribeError;
pub use subscribe_handler::{MAX_BODY_BYTES, subscribe, subscribe_method_not_allowed};
