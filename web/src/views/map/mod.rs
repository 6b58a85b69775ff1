pub mod bridge;
pub mod map_renderer;
pub mod map_wrapper;
pub mod plugins;
