use wgpu::{Device, Queue, Texture, TextureFormat, TextureView};

use crate::buffer::ColorBuffer;

/// GPU copy of a frame's pixels, sized to match the image uploaded into it
pub struct FrameTexture {
    texture: Texture,
    view: TextureView,
    width: u32,
    height: u32,
}

impl FrameTexture {
    /// Allocate an uninitialised texture
    pub fn new(device: &Device, width: u32, height: u32, format: TextureFormat) -> Self {
        log::debug!("Allocating {width}x{height} frame texture");

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("frame-texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            width,
            height,
        }
    }

    /// Whether `image` can be uploaded without reallocating
    pub fn fits(&self, image: &ColorBuffer) -> bool {
        self.width == image.width() && self.height == image.height()
    }

    /// Copy the image's RGBA bytes into the texture
    pub fn upload(&self, queue: &Queue, image: &ColorBuffer) {
        debug_assert!(self.fits(image));

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    pub fn view(&self) -> &TextureView {
        &self.view
    }
}
