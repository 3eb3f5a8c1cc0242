//! Reference destination loggers

pub mod console;
pub mod json;
pub mod memory;

pub use console::ConsoleLogger;
pub use json::JsonLogger;
pub use memory::CollectingLogger;
