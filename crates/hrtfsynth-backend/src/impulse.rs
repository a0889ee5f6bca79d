//! Mono impulse response synthesis.
//!
//! The response is a unit impulse at sample 0 (the direct path) plus a faint
//! bank of sinusoidal resonances standing in for ear canal, pinna and head
//! diffraction, all shaped by an exponential decay:
//!
//! ```text
//! h(t) = (δ(t) + mix · Σ wₖ sin(2π fₖ t)) · e^(-decay · t)
//! ```
//!
//! This is a fixture signal with plausible shape, not an acoustic model.

use std::f64::consts::PI;

use hrtfsynth_spec::SynthesisParams;

/// An immutable sequence of real-valued samples, nominally in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseResponse {
    samples: Vec<f64>,
}

impl ImpulseResponse {
    /// Wraps a sample buffer.
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// The samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest absolute sample value (0.0 for an empty buffer).
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()))
    }

    /// Consumes the response, returning its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

impl From<Vec<f64>> for ImpulseResponse {
    fn from(samples: Vec<f64>) -> Self {
        Self::new(samples)
    }
}

/// A fixed sinusoidal resonance component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resonance {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Weight within the resonance mix.
    pub weight: f64,
}

impl Resonance {
    /// Creates a new resonance.
    pub const fn new(frequency: f64, weight: f64) -> Self {
        Self { frequency, weight }
    }

    /// Value of this resonance at time `t` seconds.
    pub fn at(&self, t: f64) -> f64 {
        self.weight * (2.0 * PI * self.frequency * t).sin()
    }
}

/// The four resonances: 1 kHz body, 3 kHz ear canal, 6 kHz pinna,
/// 8 kHz head diffraction.
pub const RESONANCES: [Resonance; 4] = [
    Resonance::new(1000.0, 0.3),
    Resonance::new(3000.0, 0.2),
    Resonance::new(6000.0, 0.1),
    Resonance::new(8000.0, 0.05),
];

/// Gain applied to the summed resonances.
pub const RESONANCE_MIX: f64 = 0.1;

/// Exponential decay rate in 1/s.
pub const DECAY_RATE: f64 = 800.0;

/// Exponential decay envelope `e^(-rate · t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayEnvelope {
    /// Decay rate in 1/s. Must be positive for the envelope to decrease.
    pub rate: f64,
}

impl Default for DecayEnvelope {
    fn default() -> Self {
        Self { rate: DECAY_RATE }
    }
}

impl DecayEnvelope {
    /// Envelope gain at time `t` seconds.
    pub fn at(&self, t: f64) -> f64 {
        (-t * self.rate).exp()
    }
}

/// Deterministic mono impulse response generator.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseSynthesizer {
    /// Resonance bank.
    pub resonances: [Resonance; 4],
    /// Gain applied to the summed resonances.
    pub resonance_mix: f64,
    /// Decay envelope.
    pub envelope: DecayEnvelope,
}

impl Default for ImpulseSynthesizer {
    fn default() -> Self {
        Self {
            resonances: RESONANCES,
            resonance_mix: RESONANCE_MIX,
            envelope: DecayEnvelope::default(),
        }
    }
}

impl ImpulseSynthesizer {
    /// Time in seconds of each sample.
    ///
    /// The samples span `[0, duration]` with both ends included, so the step
    /// is `duration / (n - 1)` rather than `1 / sample_rate`.
    pub fn time_axis(params: &SynthesisParams) -> Vec<f64> {
        let n = params.sample_count();
        let duration = params.duration_seconds();
        match n {
            0 => Vec::new(),
            1 => vec![0.0],
            _ => {
                let step = duration / (n - 1) as f64;
                (0..n).map(|i| i as f64 * step).collect()
            }
        }
    }

    /// Synthesizes the mono impulse response.
    ///
    /// The caller is expected to have validated `params`; an empty buffer is
    /// returned when the duration is shorter than one sample.
    pub fn synthesize(&self, params: &SynthesisParams) -> ImpulseResponse {
        let samples = Self::time_axis(params)
            .into_iter()
            .enumerate()
            .map(|(i, t)| {
                let direct = if i == 0 { 1.0 } else { 0.0 };
                let resonance: f64 = self.resonances.iter().map(|r| r.at(t)).sum();
                (direct + self.resonance_mix * resonance) * self.envelope.at(t)
            })
            .collect();

        ImpulseResponse::new(samples)
    }
}
