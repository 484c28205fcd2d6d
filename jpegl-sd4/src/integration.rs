//! Integration with the [image] crate.
//!
//! SD4 streams don't record their dimensions, so there is no format
//! detection hook. Decode the stream first and hand the resulting [`Image`]
//! to `image`, for example via `DynamicImage::from_decoder`.

use ::image::error::{DecodingError, ImageFormatHint};
use ::image::{ColorType, ExtendedColorType, ImageDecoder, ImageError, ImageResult};

use crate::Image;

impl ImageDecoder for Image {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn color_type(&self) -> ColorType {
        if self.bit_depth <= 8 {
            ColorType::L8
        } else {
            ColorType::L16
        }
    }

    fn original_color_type(&self) -> ExtendedColorType {
        match self.bit_depth {
            1 => ExtendedColorType::L1,
            2 => ExtendedColorType::L2,
            4 => ExtendedColorType::L4,
            8 => ExtendedColorType::L8,
            16 => ExtendedColorType::L16,
            depth => ExtendedColorType::Unknown(depth),
        }
    }

    fn read_image(self, buf: &mut [u8]) -> ImageResult<()>
    where
        Self: Sized,
    {
        write_samples(&self, buf)
    }

    fn read_image_boxed(self: Box<Self>, buf: &mut [u8]) -> ImageResult<()> {
        write_samples(&self, buf)
    }
}

/// Write the samples scaled to the full range of the output color type.
fn write_samples(image: &Image, buf: &mut [u8]) -> ImageResult<()> {
    let max = (1_u32 << image.bit_depth) - 1;
    let bytes_per_sample = if image.bit_depth <= 8 { 1 } else { 2 };

    if buf.len() != image.samples.len() * bytes_per_sample {
        return Err(ImageError::Decoding(DecodingError::new(
            ImageFormatHint::Name("SD4".to_string()),
            "output buffer has the wrong size",
        )));
    }

    if bytes_per_sample == 1 {
        for (out, sample) in buf.iter_mut().zip(&image.samples) {
            *out = scale(*sample, max, 255) as u8;
        }
    } else {
        for (out, sample) in buf.chunks_exact_mut(2).zip(&image.samples) {
            out.copy_from_slice(&(scale(*sample, max, 65535) as u16).to_ne_bytes());
        }
    }

    Ok(())
}

#[inline]
fn scale(sample: u16, max: u32, target_max: u32) -> u32 {
    if max == target_max {
        u32::from(sample)
    } else {
        (u32::from(sample) * target_max + max / 2) / max
    }
}
