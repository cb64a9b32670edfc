//! Custom extractors that reject with [`AppError`](crate::errors::AppError)
//! so every failure renders the standard error body.

pub mod id_path;
pub mod json_payload;

pub use id_path::IdPath;
pub use json_payload::JsonPayload;
