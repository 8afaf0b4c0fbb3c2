pub mod core;
pub mod import;
pub mod rules;
