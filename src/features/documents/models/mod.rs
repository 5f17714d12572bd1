pub mod document;

pub use document::{AccessLevel, Classification, Document, NewDocument};
