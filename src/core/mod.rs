pub mod density;
pub mod engine;
pub mod heat_map;
pub mod pipeline;
pub mod registry;

pub use crate::domain::ports::{ConfigProvider, Renderer, Storage};
pub use crate::utils::error::Result;
