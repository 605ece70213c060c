// Code Playground - Core Library

pub mod classifier;
pub mod compose;
pub mod config;
pub mod debounce;
pub mod export;
pub mod models;
pub mod truncate;
pub mod validation;

pub use classifier::*;
pub use compose::compose;
pub use config::PlaygroundConfig;
pub use debounce::*;
pub use export::*;
pub use models::*;
pub use truncate::*;
pub use validation::*;
