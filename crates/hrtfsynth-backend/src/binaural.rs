//! Left/right ear derivation from a mono impulse response.
//!
//! The left ear is the reference. The right ear gets an interaural time
//! difference proportional to `sin(azimuth)` and an interaural level
//! difference affine in `cos(azimuth)`. The constants are placeholders that
//! give the two ears distinguishable, direction-dependent content; they are
//! not derived from head measurements.

use hrtfsynth_spec::Ear;

use crate::impulse::ImpulseResponse;

/// Maximum interaural delay in seconds, reached at ±90° azimuth.
pub const ITD_SCALE_SECONDS: f64 = 0.0001;

/// Constant term of the right-ear gain.
pub const ILD_OFFSET: f64 = 0.95;

/// `cos(azimuth)` coefficient of the right-ear gain.
pub const ILD_SLOPE: f64 = 0.1;

/// Interaural time and level difference model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinauralDifferentiator {
    /// Delay scale in seconds, multiplied by `sin(azimuth)`.
    pub itd_scale: f64,
    /// Gain offset.
    pub ild_offset: f64,
    /// Gain slope, multiplied by `cos(azimuth)`.
    pub ild_slope: f64,
}

impl Default for BinauralDifferentiator {
    fn default() -> Self {
        Self {
            itd_scale: ITD_SCALE_SECONDS,
            ild_offset: ILD_OFFSET,
            ild_slope: ILD_SLOPE,
        }
    }
}

/// The two ear variants of one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct BinauralPair {
    /// Left ear response.
    pub left: ImpulseResponse,
    /// Right ear response.
    pub right: ImpulseResponse,
}

impl BinauralPair {
    /// Returns the response for an ear.
    pub fn ear(&self, ear: Ear) -> &ImpulseResponse {
        match ear {
            Ear::Left => &self.left,
            Ear::Right => &self.right,
        }
    }
}

impl BinauralDifferentiator {
    /// Sample shift applied to an ear at `azimuth` degrees.
    ///
    /// Positive values delay the signal. Fractional samples are truncated
    /// toward zero.
    pub fn shift_samples(&self, ear: Ear, azimuth: i32, sample_rate: u32) -> i64 {
        match ear {
            Ear::Left => 0,
            Ear::Right => {
                let seconds = f64::from(azimuth).to_radians().sin() * self.itd_scale;
                (seconds * f64::from(sample_rate)) as i64
            }
        }
    }

    /// Gain applied to an ear at `azimuth` degrees.
    pub fn gain(&self, ear: Ear, azimuth: i32) -> f64 {
        match ear {
            Ear::Left => 1.0,
            Ear::Right => self.ild_offset + self.ild_slope * f64::from(azimuth).to_radians().cos(),
        }
    }

    /// Derives one ear's response.
    pub fn apply(
        &self,
        response: &ImpulseResponse,
        ear: Ear,
        azimuth: i32,
        sample_rate: u32,
    ) -> ImpulseResponse {
        if ear == Ear::Left {
            return response.clone();
        }

        let shift = self.shift_samples(ear, azimuth, sample_rate);
        let gain = self.gain(ear, azimuth);
        shift_preserving_length(response.samples(), shift)
            .into_iter()
            .map(|s| s * gain)
            .collect::<Vec<_>>()
            .into()
    }

    /// Derives both ears.
    pub fn differentiate(
        &self,
        response: &ImpulseResponse,
        azimuth: i32,
        sample_rate: u32,
    ) -> BinauralPair {
        BinauralPair {
            left: self.apply(response, Ear::Left, azimuth, sample_rate),
            right: self.apply(response, Ear::Right, azimuth, sample_rate),
        }
    }
}

/// Shifts `samples` by `shift` positions, keeping the length.
///
/// A positive shift zero-pads the front and drops the tail; a negative shift
/// drops the head and zero-pads the tail. Shifting by the full length or more
/// leaves only zeros.
pub fn shift_preserving_length(samples: &[f64], shift: i64) -> Vec<f64> {
    let len = samples.len();
    let amount = usize::try_from(shift.unsigned_abs())
        .unwrap_or(usize::MAX)
        .min(len);
    let mut out = Vec::with_capacity(len);

    if shift >= 0 {
        out.resize(amount, 0.0);
        out.extend_from_slice(&samples[..len - amount]);
    } else {
        out.extend_from_slice(&samples[amount..]);
        out.resize(len, 0.0);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impulse::ImpulseSynthesizer;
    use hrtfsynth_spec::SynthesisParams;

    fn mono() -> ImpulseResponse {
        ImpulseSynthesizer::default().synthesize(&SynthesisParams::default())
    }

    #[test]
    fn test_shift_preserving_length() {
        let s = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(shift_preserving_length(&s, 0), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(shift_preserving_length(&s, 1), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(shift_preserving_length(&s, -2), vec![3.0, 4.0, 0.0, 0.0]);
        assert_eq!(shift_preserving_length(&s, 9), vec![0.0; 4]);
        assert_eq!(shift_preserving_length(&s, -9), vec![0.0; 4]);
        assert!(shift_preserving_length(&[], 3).is_empty());
    }

    #[test]
    fn test_shift_samples() {
        let d = BinauralDifferentiator::default();
        assert_eq!(d.shift_samples(Ear::Right, 0, 44100), 0);
        // 0.0001 s * 44100 = 4.41 samples, truncated
        assert_eq!(d.shift_samples(Ear::Right, 90, 44100), 4);
        assert_eq!(d.shift_samples(Ear::Right, -90, 44100), -4);
        // sin(30°) * 4.41 = 2.2
        assert_eq!(d.shift_samples(Ear::Right, 30, 44100), 2);
        assert_eq!(d.shift_samples(Ear::Left, 90, 44100), 0);
    }

    #[test]
    fn test_gain() {
        let d = BinauralDifferentiator::default();
        assert!((d.gain(Ear::Right, 0) - 1.05).abs() < 1e-12);
        assert!((d.gain(Ear::Right, 90) - 0.95).abs() < 1e-12);
        assert_eq!(d.gain(Ear::Left, 45), 1.0);
    }

    #[test]
    fn test_left_is_unmodified() {
        let ir = mono();
        let pair = BinauralDifferentiator::default().differentiate(&ir, 60, 44100);
        assert_eq!(pair.left, ir);
    }

    #[test]
    fn test_zero_azimuth_only_scales() {
        let ir = mono();
        let d = BinauralDifferentiator::default();
        let pair = d.differentiate(&ir, 0, 44100);
        let gain = d.gain(Ear::Right, 0);
        for (l, r) in pair.left.samples().iter().zip(pair.right.samples()) {
            assert_eq!(l * gain, *r);
        }
    }

    #[test]
    fn test_positive_azimuth_delays_right() {
        let ir = mono();
        let pair = BinauralDifferentiator::default().differentiate(&ir, 90, 44100);
        let right = pair.right.samples();
        assert_eq!(right.len(), ir.len());
        assert!(right[..4].iter().all(|&s| s == 0.0));
        assert!((right[4] - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_negative_azimuth_advances_right() {
        let ir = mono();
        let pair = BinauralDifferentiator::default().differentiate(&ir, -90, 44100);
        let right = pair.right.samples();
        assert_eq!(right.len(), ir.len());
        assert!(right[right.len() - 4..].iter().all(|&s| s == 0.0));
        assert_eq!(right[0], ir.samples()[4] * pair_gain(-90));
        assert_eq!(pair.ear(Ear::Right), &pair.right);
    }

    fn pair_gain(azimuth: i32) -> f64 {
        BinauralDifferentiator::default().gain(Ear::Right, azimuth)
    }
}
