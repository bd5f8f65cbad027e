pub mod error;
pub mod pages;
pub mod store;
pub mod text;
pub mod types;
