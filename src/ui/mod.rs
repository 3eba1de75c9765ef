pub mod renderer;
pub mod view;

pub use renderer::{CardLayout, CardRenderer, RendererError};
pub use view::PageView;
