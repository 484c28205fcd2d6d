#![no_main]

use jpegl_sd4::{DecodeSettings, Predictor, PredictorSelection};
use libfuzzer_sys::fuzz_target;

// Header layout (6 bytes):
// [0..2]  width (u16 LE)
// [2..4]  height (u16 LE)
// [4]     bit depth (taken modulo 17, 0 exercises the settings check)
// [5]     predictor override (0 = from stream, 1-7 = fixed)
// [6..]   SD4 encoded data

const HEADER_SIZE: usize = 6;

fuzz_target!(|data: &[u8]| {
    if data.len() < HEADER_SIZE {
        return;
    }

    // Keep the images small so that the fuzzer spends its time in the
    // bitstream and not in allocating huge buffers.
    let width = u16::from_le_bytes([data[0], data[1]]) as u32 % 1024;
    let height = u16::from_le_bytes([data[2], data[3]]) as u32 % 1024;
    let bit_depth = data[4] % 17;
    let predictor = match Predictor::from_selector(data[5]) {
        Some(predictor) => PredictorSelection::Fixed(predictor),
        None => PredictorSelection::FromStream,
    };

    let settings = DecodeSettings {
        width,
        height,
        bit_depth,
        predictor,
    };

    if let Ok(image) = jpegl_sd4::decode_with_settings(&data[HEADER_SIZE..], &settings) {
        assert_eq!(image.samples().len(), (width * height) as usize);
        assert!(
            image
                .samples()
                .iter()
                .all(|s| u32::from(*s) < 1 << image.bit_depth())
        );
    }
});
