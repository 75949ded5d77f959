pub mod nav_renderer;

pub use nav_renderer::NavRenderer;
