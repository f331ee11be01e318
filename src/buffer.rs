use bytemuck::{Pod, Zeroable};

/// One RGBA8 pixel, laid out byte for byte as it is uploaded to the GPU.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Split a packed `0xRRGGBB` colour into channels with full opacity
    pub const fn from_rgb24(color: u32) -> Self {
        Self {
            r: ((color >> 16) & 0xff) as u8,
            g: ((color >> 8) & 0xff) as u8,
            b: (color & 0xff) as u8,
            a: 0xff,
        }
    }

    /// Pack the colour channels back into `0xRRGGBB`, dropping alpha
    pub const fn to_rgb24(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Row-major 2D array of pixels. Every frame overwrites it completely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl ColorBuffer {
    /// Create a transparent black buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::zeroed(); width as usize * height as usize],
        }
    }

    /// Build a buffer from existing pixels
    ///
    /// # Panics
    /// When `pixels` doesn't hold exactly `width * height` entries
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "Pixel count doesn't match {width}x{height}"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Change the dimensions, reallocating only when they differ. Contents are
    /// unspecified afterwards.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        log::debug!(
            "Resizing colour buffer {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.width = width;
        self.height = height;
        self.pixels
            .resize(width as usize * height as usize, Rgba::zeroed());
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn row(&self, y: u32) -> &[Rgba] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Raw RGBA bytes, ready for a texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_size() {
        assert_eq!(std::mem::size_of::<Rgba>(), 4);
    }

    #[test]
    fn test_from_rgb24_channel_order() {
        let pixel = Rgba::from_rgb24(0x12_34_56);
        assert_eq!(
            pixel,
            Rgba {
                r: 0x12,
                g: 0x34,
                b: 0x56,
                a: 0xff
            }
        );
        assert_eq!(pixel.to_rgb24(), 0x12_34_56);
    }

    #[test]
    fn test_bytes_are_rgba_ordered() {
        let buffer = ColorBuffer::from_pixels(1, 1, vec![Rgba::from_rgb24(0xff00ff)]);
        assert_eq!(buffer.as_bytes(), &[0xff, 0x00, 0xff, 0xff]);
    }

    #[test]
    fn test_new_buffer_is_transparent() {
        let buffer = ColorBuffer::new(3, 2);
        assert_eq!(buffer.pixels().len(), 6);
        assert!(buffer.pixels().iter().all(|pixel| *pixel == Rgba::zeroed()));
    }

    #[test]
    fn test_resize_changes_dimensions() {
        let mut buffer = ColorBuffer::new(4, 3);
        buffer.resize(10, 5);
        assert_eq!((buffer.width(), buffer.height()), (10, 5));
        assert_eq!(buffer.pixels().len(), 50);
        assert_eq!(buffer.row(4).len(), 10);
    }
}
