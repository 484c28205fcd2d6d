/*!
A memory-safe, pure-Rust decoder for the legacy lossless JPEG format of NIST
Special Database 4.

The fingerprint images of Special Database 4 were compressed with an early
variant of lossless JPEG that predates the final standard. A stream consists
of

- a single Huffman table (the number of parameters, 16 code-length counts and
  the category symbols),
- a byte selecting one of the lossless predictors,
- the bit-packed category codes and magnitude bits of every sample,

and nothing else: there are no markers, no byte stuffing and no frame header,
so the dimensions and the bit depth of the image have to be supplied by the
caller.

# Example
```rust,no_run
let data = std::fs::read("f0001_01.sd4").unwrap();
let samples = jpegl_sd4::decode(&data, 512, 512, 8).unwrap();

assert_eq!(samples.len(), 512 * 512);
```

# Cargo features
- `std` (default): Use the standard library. Without it the crate is
  `no_std` and only requires `alloc`.
- `image` (default): Implement `image::ImageDecoder` for [`Image`].
- `logging`: Emit diagnostics via the `log` crate.

# Safety
This crate forbids unsafe code via a crate-level attribute.
*/

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod log;

mod bit_reader;
mod decode;
mod difference;
mod error;
mod huffman;
#[cfg(feature = "image")]
mod integration;
mod predictor;

use alloc::vec::Vec;

pub use error::{DecodeError, HeaderError, Result, SettingsError};
pub use predictor::Predictor;

/// How the predictor used for reconstruction is chosen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PredictorSelection {
    /// Use the predictor selected by the stream.
    #[default]
    FromStream,
    /// Always use the given predictor.
    ///
    /// The selector byte is still read, but its value is ignored.
    Fixed(Predictor),
}

/// Settings to apply during decoding.
///
/// None of these are stored in the stream itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodeSettings {
    /// The width of the image in samples.
    pub width: u32,
    /// The height of the image in samples.
    pub height: u32,
    /// The number of bits per sample, between 1 and 16.
    pub bit_depth: u8,
    /// How to choose the predictor.
    pub predictor: PredictorSelection,
}

impl DecodeSettings {
    /// Settings for an image of the given size, using the predictor from
    /// the stream.
    pub fn new(width: u32, height: u32, bit_depth: u8) -> Self {
        Self {
            width,
            height,
            bit_depth,
            predictor: PredictorSelection::FromStream,
        }
    }
}

/// A decoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    bit_depth: u8,
    predictor: Predictor,
    samples: Vec<u16>,
}

impl Image {
    /// The width of the image.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The height of the image.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The number of bits per sample.
    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    /// The predictor that was used to reconstruct the samples.
    pub fn predictor(&self) -> Predictor {
        self.predictor
    }

    /// The samples in row-major order.
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// Consume the image and return its samples.
    pub fn into_samples(self) -> Vec<u16> {
        self.samples
    }

    /// The samples as bytes.
    ///
    /// Images with a bit depth of up to 8 use one byte per sample, deeper
    /// images two big-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.bit_depth <= 8 {
            self.samples.iter().map(|s| *s as u8).collect()
        } else {
            self.samples.iter().flat_map(|s| s.to_be_bytes()).collect()
        }
    }
}

/// Decode an SD4 stream with the given dimensions and bit depth.
///
/// Returns the samples in row-major order, see [`Image::to_bytes`] for the
/// layout.
pub fn decode(data: &[u8], width: u32, height: u32, bit_depth: u8) -> Result<Vec<u8>> {
    decode_with_settings(data, &DecodeSettings::new(width, height, bit_depth))
        .map(|image| image.to_bytes())
}

/// Decode an SD4 stream.
pub fn decode_with_settings(data: &[u8], settings: &DecodeSettings) -> Result<Image> {
    decode::decode(data, settings)
}
