pub mod character;
pub mod platform;
pub mod ron;
pub use crate::ron as ron_loader;
pub mod debug;
pub mod settings;
pub mod ui;
