pub mod error;
pub mod layout;
pub mod reader;
pub mod types;
