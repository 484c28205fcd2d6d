//! This example shows you how to convert an SD4 stream into a PNG file.

#![allow(missing_docs)]

use std::process::ExitCode;

use image::DynamicImage;

fn main() -> ExitCode {
    #[cfg(feature = "logging")]
    if let Ok(()) = log::set_logger(&LOGGER) {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let args: Vec<String> = std::env::args().collect();

    if args.len() != 6 {
        eprintln!(
            "Usage: {} <input.sd4> <width> <height> <bit depth> <output.png>",
            args[0]
        );

        return ExitCode::FAILURE;
    }

    let (Ok(width), Ok(height), Ok(bit_depth)) = (
        args[2].parse::<u32>(),
        args[3].parse::<u32>(),
        args[4].parse::<u8>(),
    ) else {
        eprintln!("Width, height and bit depth must be numbers");

        return ExitCode::FAILURE;
    };

    let input_path = &args[1];
    let output_path = &args[5];

    let data = match std::fs::read(input_path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Failed to read input file: {err}");

            return ExitCode::FAILURE;
        }
    };

    let settings = jpegl_sd4::DecodeSettings::new(width, height, bit_depth);

    let decoded = match jpegl_sd4::decode_with_settings(&data, &settings) {
        Ok(decoded) => decoded,
        Err(err) => {
            eprintln!("Failed to decode SD4 stream: {err}");

            return ExitCode::FAILURE;
        }
    };

    println!(
        "Decoded: {}x{} image, predictor {}",
        decoded.width(),
        decoded.height(),
        decoded.predictor().selector()
    );

    let image = match DynamicImage::from_decoder(decoded) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("Failed to convert image: {err}");

            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = image.save(output_path) {
        eprintln!("Failed to save PNG: {err}");

        return ExitCode::FAILURE;
    }

    eprintln!("Saved: {output_path}");

    ExitCode::SUCCESS
}

#[cfg(feature = "logging")]
static LOGGER: SimpleLogger = SimpleLogger;

#[cfg(feature = "logging")]
struct SimpleLogger;

#[cfg(feature = "logging")]
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::LevelFilter::Debug
    }

    fn log(&self, record: &log::Record<'_>) {
        eprintln!("{}: {}", record.level(), record.args());
    }

    fn flush(&self) {}
}
