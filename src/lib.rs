//! A decorative loading indicator for ratatui: a rounded plate with a soft
//! gradient shine sweeping across it.

pub mod animation;
pub mod color;
pub mod config;
pub mod gradient;
pub mod loader;

pub use color::Rgba;
pub use config::LoaderConfig;
pub use loader::Loader;
