mod engine;
mod mime;

pub use engine::QueryEngine;
pub use mime::MimeFilter;
