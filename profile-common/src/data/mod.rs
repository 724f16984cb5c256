pub mod encoding;
pub mod types;
