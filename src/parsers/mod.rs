pub mod comment;
pub mod json;

pub use comment::strip_comments;
pub use json::{FileLoader, JsonFileLoader};
