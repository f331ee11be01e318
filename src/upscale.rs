//! Nearest-neighbour magnification of the sampled field to display resolution.

use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::buffer::ColorBuffer;

/// Where the low resolution buffer gets magnified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Upscaling {
    /// Replicate pixels on the CPU with [`expand_into`]
    Software,
    /// Hand the low resolution buffer to the GPU and sample it with a nearest filter
    #[default]
    Hardware,
}

impl Upscaling {
    pub fn toggled(self) -> Self {
        match self {
            Self::Software => Self::Hardware,
            Self::Hardware => Self::Software,
        }
    }
}

/// Expand `source` by an integer `scale`, allocating a new buffer.
pub fn expand(source: &ColorBuffer, scale: u32) -> ColorBuffer {
    let mut output = ColorBuffer::new(0, 0);
    expand_into(source, scale, &mut output);
    output
}

/// Expand `source` into `output`, replacing each pixel with a `scale`×`scale`
/// block of copies. `output` is resized to exactly `scale` times the source
/// dimensions.
///
/// # Panics
/// When `scale` is zero
pub fn expand_into(source: &ColorBuffer, scale: u32, output: &mut ColorBuffer) {
    assert!(scale > 0, "Scale factor must be at least 1");
    log::trace!("begin expand x{scale}");

    output.resize(source.width() * scale, source.height() * scale);

    if scale == 1 {
        output.pixels_mut().copy_from_slice(source.pixels());
        return;
    }

    let output_width = output.width() as usize;
    let block = scale as usize;
    if output_width == 0 {
        return;
    }

    output
        .pixels_mut()
        .par_chunks_mut(output_width)
        .enumerate()
        .for_each(|(y, row)| {
            let source_row = source.row((y / block) as u32);
            for (cells, pixel) in row.chunks_exact_mut(block).zip(source_row) {
                cells.fill(*pixel);
            }
        });

    log::trace!("end expand x{scale}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgba;

    fn patterned(width: u32, height: u32) -> ColorBuffer {
        let pixels = (0..width * height)
            .map(|index| Rgba::from_rgb24(index.wrapping_mul(0x01_03_07) & 0xff_ff_ff))
            .collect();
        ColorBuffer::from_pixels(width, height, pixels)
    }

    #[test]
    fn test_expand_dimensions() {
        let source = patterned(5, 3);
        for scale in [1, 2, 4, 8, 10, 20] {
            let output = expand(&source, scale);
            assert_eq!(output.width(), 5 * scale);
            assert_eq!(output.height(), 3 * scale);
        }
    }

    #[test]
    fn test_every_block_matches_its_source_pixel() {
        let source = patterned(4, 3);
        for scale in [2, 3, 8] {
            let output = expand(&source, scale);
            for y in 0..output.height() {
                for x in 0..output.width() {
                    assert_eq!(
                        output.pixel(x, y),
                        source.pixel(x / scale, y / scale),
                        "x{scale} at ({x}, {y})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_scale_one_is_identity() {
        let source = patterned(7, 5);
        assert_eq!(expand(&source, 1), source);
    }

    #[test]
    fn test_expand_into_reuses_output() {
        let mut output = ColorBuffer::new(1, 1);
        expand_into(&patterned(2, 2), 4, &mut output);
        assert_eq!((output.width(), output.height()), (8, 8));

        let smaller = patterned(3, 1);
        expand_into(&smaller, 2, &mut output);
        assert_eq!((output.width(), output.height()), (6, 2));
        assert_eq!(output.pixel(5, 1), smaller.pixel(2, 0));
    }

    #[test]
    fn test_expand_empty_buffer() {
        let output = expand(&ColorBuffer::new(0, 0), 8);
        assert_eq!(output.pixels().len(), 0);
    }

    #[test]
    fn test_toggle_upscaling() {
        assert_eq!(Upscaling::Hardware.toggled(), Upscaling::Software);
        assert_eq!(Upscaling::Software.toggled(), Upscaling::Hardware);
    }
}
