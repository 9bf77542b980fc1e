pub mod config;
pub mod fetch;
pub mod history;
pub mod pipeline;
pub mod process;
pub mod render;
pub mod schema;
