//! Frequency module - represents a frequency sweep
//!
//! A sweep keeps three index-aligned sequences: the sample points in Hz, the
//! same points in the declared display unit, and the angular frequency.
//! Points are only ever appended.

use std::f64::consts::PI;
use std::fmt;

/// Frequency unit enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    Hz,
    KHz,
    MHz,
    #[default]
    GHz,
    THz,
}

impl FrequencyUnit {
    /// Get the multiplier to convert to Hz
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => 1e9,
            FrequencyUnit::THz => 1e12,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hz" => Some(FrequencyUnit::Hz),
            "khz" => Some(FrequencyUnit::KHz),
            "mhz" => Some(FrequencyUnit::MHz),
            "ghz" => Some(FrequencyUnit::GHz),
            "thz" => Some(FrequencyUnit::THz),
            _ => None,
        }
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FrequencyUnit::Hz => "Hz",
            FrequencyUnit::KHz => "kHz",
            FrequencyUnit::MHz => "MHz",
            FrequencyUnit::GHz => "GHz",
            FrequencyUnit::THz => "THz",
        };
        f.write_str(s)
    }
}

/// Sweep type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepType {
    #[default]
    Linear,
    Log,
}

/// A frequency sweep
#[derive(Debug, Clone, PartialEq)]
pub struct Frequency {
    /// Sample points in Hz
    f: Vec<f64>,
    /// Sample points in the display unit
    f_scaled: Vec<f64>,
    /// Angular frequency in rad/s
    w: Vec<f64>,
    /// Display unit
    unit: FrequencyUnit,
    /// Sweep type (linear or log)
    sweep_type: SweepType,
}

impl Default for Frequency {
    fn default() -> Self {
        Self::with_unit(FrequencyUnit::default())
    }
}

impl Frequency {
    /// Create an empty sweep displayed in `unit`
    ///
    /// # Example
    /// ```
    /// use rfnet_core::frequency::{Frequency, FrequencyUnit};
    /// let mut freq = Frequency::with_unit(FrequencyUnit::MHz);
    /// freq.append(100.0);
    /// assert_eq!(freq.f(), &[100e6]);
    /// ```
    pub fn with_unit(unit: FrequencyUnit) -> Self {
        Self {
            f: Vec::new(),
            f_scaled: Vec::new(),
            w: Vec::new(),
            unit,
            sweep_type: SweepType::Linear,
        }
    }

    /// Create from values expressed in `unit`
    pub fn from_f(f: Vec<f64>, unit: FrequencyUnit) -> Self {
        let mut freq = Self::with_unit(unit);
        freq.f.reserve(f.len());
        freq.f_scaled.reserve(f.len());
        freq.w.reserve(f.len());
        for x in f {
            freq.append(x);
        }
        freq
    }

    /// Append one point given in the display unit.
    ///
    /// All three sequences grow together.
    pub fn append(&mut self, scaled: f64) {
        let hz = scaled * self.unit.multiplier();
        self.f_scaled.push(scaled);
        self.f.push(hz);
        self.w.push(2.0 * PI * hz);
    }

    /// Get frequency vector in Hz
    #[inline]
    pub fn f(&self) -> &[f64] {
        &self.f
    }

    /// Get frequency vector in the display unit
    #[inline]
    pub fn f_scaled(&self) -> &[f64] {
        &self.f_scaled
    }

    /// Get angular frequency vector (rad/s)
    #[inline]
    pub fn w(&self) -> &[f64] {
        &self.w
    }

    /// Get the number of frequency points
    #[inline]
    pub fn npoints(&self) -> usize {
        self.f.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.f.is_empty()
    }

    /// Get the start frequency in Hz
    #[inline]
    pub fn start(&self) -> f64 {
        self.f.first().copied().unwrap_or(0.0)
    }

    /// Get the stop frequency in Hz
    #[inline]
    pub fn stop(&self) -> f64 {
        self.f.last().copied().unwrap_or(0.0)
    }

    /// Get the center frequency in Hz
    pub fn center(&self) -> f64 {
        (self.start() + self.stop()) / 2.0
    }

    /// Get the frequency span in Hz
    #[inline]
    pub fn span(&self) -> f64 {
        self.stop() - self.start()
    }

    /// Get the display unit
    #[inline]
    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    /// Get the sweep type
    #[inline]
    pub fn sweep_type(&self) -> SweepType {
        self.sweep_type
    }

    /// Get the multiplier for the display unit
    pub fn multiplier(&self) -> f64 {
        self.unit.multiplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_append_keeps_sequences_aligned() {
        let mut freq = Frequency::with_unit(FrequencyUnit::GHz);
        assert!(freq.is_empty());

        freq.append(1.0);
        freq.append(2.5);

        assert_eq!(freq.npoints(), 2);
        assert_eq!(freq.f().len(), freq.f_scaled().len());
        assert_eq!(freq.f().len(), freq.w().len());

        assert_relative_eq!(freq.f()[1], 2.5e9, epsilon = 1e-3);
        assert_relative_eq!(freq.f_scaled()[1], 2.5, epsilon = 1e-12);
        assert_relative_eq!(freq.w()[0], 2.0 * PI * 1e9, max_relative = 1e-12);
    }

    #[test]
    fn test_from_f() {
        let f = vec![1.0, 5.0, 200.0];
        let freq = Frequency::from_f(f, FrequencyUnit::KHz);

        assert_eq!(freq.npoints(), 3);
        assert_relative_eq!(freq.f()[0], 1e3, epsilon = 1e-10);
        assert_relative_eq!(freq.f()[1], 5e3, epsilon = 1e-10);
        assert_relative_eq!(freq.f()[2], 200e3, epsilon = 1e-10);
        assert_eq!(freq.f_scaled(), &[1.0, 5.0, 200.0]);
    }

    #[test]
    fn test_start_stop_span() {
        let freq = Frequency::from_f(vec![1.0, 2.0, 3.0], FrequencyUnit::MHz);
        assert_relative_eq!(freq.start(), 1e6);
        assert_relative_eq!(freq.stop(), 3e6);
        assert_relative_eq!(freq.center(), 2e6);
        assert_relative_eq!(freq.span(), 2e6);
        assert_eq!(freq.sweep_type(), SweepType::Linear);
    }

    #[test]
    fn test_empty_sweep() {
        let freq = Frequency::default();
        assert_eq!(freq.unit(), FrequencyUnit::GHz);
        assert_eq!(freq.start(), 0.0);
        assert_eq!(freq.stop(), 0.0);
    }

    #[test]
    fn test_frequency_unit_multiplier() {
        assert_eq!(FrequencyUnit::Hz.multiplier(), 1.0);
        assert_eq!(FrequencyUnit::KHz.multiplier(), 1e3);
        assert_eq!(FrequencyUnit::MHz.multiplier(), 1e6);
        assert_eq!(FrequencyUnit::GHz.multiplier(), 1e9);
        assert_eq!(FrequencyUnit::THz.multiplier(), 1e12);
    }

    #[test]
    fn test_frequency_unit_from_str() {
        assert_eq!(FrequencyUnit::from_str("ghz"), Some(FrequencyUnit::GHz));
        assert_eq!(FrequencyUnit::from_str("GHZ"), Some(FrequencyUnit::GHz));
        assert_eq!(FrequencyUnit::from_str("MHz"), Some(FrequencyUnit::MHz));
        assert_eq!(FrequencyUnit::from_str("invalid"), None);
        assert_eq!(FrequencyUnit::KHz.to_string(), "kHz");
    }
}
