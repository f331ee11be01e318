mod context;
mod present;
mod texture;

pub use context::GpuContext;
pub use present::PresentPipeline;
pub use texture::FrameTexture;
