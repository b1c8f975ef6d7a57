// services/api/src/adapters/mod.rs

pub mod db;
pub mod gemini;

pub use db::DbAdapter;
pub use gemini::GeminiAdapter;
