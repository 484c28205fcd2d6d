//! Sample prediction for lossless JPEG (ISO/IEC 10918-1, Annex H).

/// One of the seven lossless JPEG predictors.
///
/// `Ra` is the sample to the left, `Rb` the one above and `Rc` the one above
/// and to the left of the current sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Predictor {
    /// `Ra`.
    Left,
    /// `Rb`.
    Above,
    /// `Rc`.
    AboveLeft,
    /// `Ra + Rb - Rc`.
    Plane,
    /// `Ra + ((Rb - Rc) >> 1)`.
    LeftGradient,
    /// `Rb + ((Ra - Rc) >> 1)`.
    AboveGradient,
    /// `(Ra + Rb) >> 1`.
    Average,
}

impl Predictor {
    /// Map a selection value as stored in the stream (1-7) to a predictor.
    pub fn from_selector(selector: u8) -> Option<Self> {
        Some(match selector {
            1 => Self::Left,
            2 => Self::Above,
            3 => Self::AboveLeft,
            4 => Self::Plane,
            5 => Self::LeftGradient,
            6 => Self::AboveGradient,
            7 => Self::Average,
            _ => return None,
        })
    }

    /// The selection value of this predictor.
    pub fn selector(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Above => 2,
            Self::AboveLeft => 3,
            Self::Plane => 4,
            Self::LeftGradient => 5,
            Self::AboveGradient => 6,
            Self::Average => 7,
        }
    }

    #[inline]
    fn apply(self, ra: i32, rb: i32, rc: i32) -> i32 {
        match self {
            Self::Left => ra,
            Self::Above => rb,
            Self::AboveLeft => rc,
            Self::Plane => ra + rb - rc,
            Self::LeftGradient => ra + ((rb - rc) >> 1),
            Self::AboveGradient => rb + ((ra - rc) >> 1),
            Self::Average => (ra + rb) >> 1,
        }
    }

    /// Predict the sample at `samples.len()`.
    ///
    /// `samples` holds everything decoded so far in scan order. The first
    /// sample is predicted as the middle of the (point-transformed) sample
    /// range, the rest of the first row from the left neighbor and the start
    /// of every other row from the sample above.
    #[inline]
    pub(crate) fn predict(
        self,
        samples: &[u16],
        width: usize,
        bit_depth: u8,
        point_transform: u8,
    ) -> i32 {
        let index = samples.len();

        if index == 0 {
            return 1 << (bit_depth - point_transform - 1);
        }

        let ra = i32::from(samples[index - 1]);

        if index < width {
            return ra;
        }

        let rb = i32::from(samples[index - width]);

        if index % width == 0 {
            return rb;
        }

        let rc = i32::from(samples[index - width - 1]);

        self.apply(ra, rb, rc)
    }
}

/// Add a difference to a prediction, wrapping around modulo `2^bit_depth`.
#[inline]
pub(crate) fn reconstruct(prediction: i32, difference: i32, bit_depth: u8) -> u16 {
    let mask = (1_i32 << bit_depth) - 1;

    ((prediction + difference) & mask) as u16
}
