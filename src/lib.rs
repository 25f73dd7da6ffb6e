pub mod core;
pub mod engine;
pub mod nodes;
pub mod observability;
pub mod registry;
