//! The decoding loop.

use alloc::vec::Vec;

use crate::bit_reader::BitReader;
use crate::difference::DifferenceTable;
use crate::error::{HeaderError, Result, SettingsError, bail};
use crate::huffman::{HuffmanSpec, HuffmanTable};
use crate::predictor::{Predictor, reconstruct};
use crate::{DecodeSettings, Image, PredictorSelection};

/// The point transform is not stored in the stream and is always zero.
const POINT_TRANSFORM: u8 = 0;

pub(crate) fn decode(data: &[u8], settings: &DecodeSettings) -> Result<Image> {
    if !(1..=16).contains(&settings.bit_depth) {
        bail!(SettingsError::InvalidBitDepth);
    }

    let width = settings.width as usize;
    let num_samples = width
        .checked_mul(settings.height as usize)
        .ok_or(SettingsError::ImageTooLarge)?;

    let mut reader = BitReader::new(data);

    let table = HuffmanTable::new(HuffmanSpec::read(&mut reader)?)?;
    let predictor = read_predictor(&mut reader, settings.predictor)?;

    ldebug!(
        "decoding {}x{} image with {} bits per sample using {:?}",
        settings.width,
        settings.height,
        settings.bit_depth,
        predictor
    );

    let differences = DifferenceTable::new(table.max_category())?;

    let mut samples = Vec::new();
    samples.try_reserve_exact(num_samples)?;

    for _ in 0..num_samples {
        let category = reader.decode_category(&table)?;
        let raw = reader.read_bits(category)?;
        let difference = differences.get(category, raw)?;

        let prediction = predictor.predict(&samples, width, settings.bit_depth, POINT_TRANSFORM);
        samples.push(reconstruct(prediction, difference, settings.bit_depth));
    }

    if reader.remaining_bytes() > 0 {
        ldebug!(
            "stream ends at byte {}, ignoring {} trailing bytes",
            reader.byte_pos(),
            reader.remaining_bytes()
        );
    }

    Ok(Image {
        width: settings.width,
        height: settings.height,
        bit_depth: settings.bit_depth,
        predictor,
        samples,
    })
}

fn read_predictor(reader: &mut BitReader<'_>, selection: PredictorSelection) -> Result<Predictor> {
    let selector = reader.read_byte()?;

    match selection {
        PredictorSelection::FromStream => match Predictor::from_selector(selector) {
            Some(predictor) => Ok(predictor),
            None => {
                lwarn!("invalid predictor selector {selector}");

                bail!(HeaderError::InvalidPredictor)
            }
        },
        PredictorSelection::Fixed(predictor) => {
            if predictor.selector() != selector {
                ldebug!(
                    "ignoring predictor selector {selector} in favor of {}",
                    predictor.selector()
                );
            }

            Ok(predictor)
        }
    }
}
