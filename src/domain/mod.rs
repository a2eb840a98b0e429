// Domain types and value objects
mod bar;
mod trim;

// Re-export commonly used types to the world
pub use bar::Bar;
pub use trim::Trim;
