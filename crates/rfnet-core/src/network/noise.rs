//! Noise parameters for 2-port networks
//!
//! Touchstone 2-port files may carry a trailing noise block with one line per
//! noise frequency: `freq NFmin |Γopt| ∠Γopt Rn`. The block has its own sweep,
//! independent of the network data sweep.

use num_complex::Complex64;

use crate::constants::NEAR_ZERO;
use crate::frequency::{Frequency, FrequencyUnit};
use crate::math::conversions::{db_2_magnitude, magnitude_2_db};

/// Noise sub-network of a 2-port
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoiseNetwork {
    /// Noise frequency sweep
    pub frequency: Frequency,
    /// Minimum noise figure in dB, as read
    pub nfmin: Vec<f64>,
    /// Optimum source reflection coefficient
    pub gamma_opt: Vec<Complex64>,
    /// Effective noise resistance, normalized to the reference impedance
    pub rn: Vec<f64>,
}

impl NoiseNetwork {
    /// Empty noise block whose sweep is displayed in `unit`
    pub fn with_unit(unit: FrequencyUnit) -> Self {
        Self {
            frequency: Frequency::with_unit(unit),
            ..Self::default()
        }
    }

    /// Append one noise point; `freq` is in the sweep's display unit
    pub fn push(&mut self, freq: f64, nfmin_db: f64, gamma_opt: Complex64, rn: f64) {
        self.frequency.append(freq);
        self.nfmin.push(nfmin_db);
        self.gamma_opt.push(gamma_opt);
        self.rn.push(rn);
    }

    /// Number of noise points
    #[inline]
    pub fn npoints(&self) -> usize {
        self.frequency.npoints()
    }

    /// Calculate noise figure for given source reflection coefficient
    ///
    /// NF = NFmin + 4*Rn*|Γs - Γopt|² / ((1-|Γs|²)*|1+Γopt|²)
    ///
    /// # Returns
    /// Noise figure in dB for each noise point; `inf` where Γs lies on or
    /// outside the unit circle
    pub fn noise_figure(&self, gamma_s: Complex64) -> Vec<f64> {
        let gamma_s_mag_sq = gamma_s.norm_sqr();

        self.nfmin
            .iter()
            .zip(&self.gamma_opt)
            .zip(&self.rn)
            .map(|((&nfmin_db, &gamma_opt), &rn)| {
                let one_plus_gamma_opt = Complex64::new(1.0, 0.0) + gamma_opt;
                if gamma_s_mag_sq >= 1.0 || one_plus_gamma_opt.norm_sqr() <= NEAR_ZERO {
                    return f64::INFINITY;
                }
                let nfmin = nf_db_2_linear(nfmin_db);
                let nf = nfmin
                    + 4.0 * rn * (gamma_s - gamma_opt).norm_sqr()
                        / ((1.0 - gamma_s_mag_sq) * one_plus_gamma_opt.norm_sqr());
                nf_linear_2_db(nf)
            })
            .collect()
    }

    /// Constant noise figure circle on the source reflection plane.
    ///
    /// Returns `(center, radius)`, or None when `idx` is out of range or
    /// `nf_db` is below NFmin at that point.
    pub fn noise_circle(&self, nf_db: f64, idx: usize) -> Option<(Complex64, f64)> {
        let nfmin = nf_db_2_linear(*self.nfmin.get(idx)?);
        let gamma_opt = *self.gamma_opt.get(idx)?;
        let rn = *self.rn.get(idx)?;
        if rn <= 0.0 {
            return None;
        }

        let n_factor = (nf_db_2_linear(nf_db) - nfmin) / (4.0 * rn);
        if n_factor < 0.0 {
            return None;
        }

        let n = n_factor * (Complex64::new(1.0, 0.0) + gamma_opt).norm_sqr();
        let center = gamma_opt / (1.0 + n);
        let r_sq = (n * n + n * (1.0 - gamma_opt.norm_sqr())) / ((1.0 + n) * (1.0 + n));
        Some((center, r_sq.max(0.0).sqrt()))
    }

    /// Optimum source impedance at each noise point
    pub fn z_opt(&self, z0: f64) -> Vec<Complex64> {
        self.gamma_opt.iter().map(|&g| gamma_to_z(g, z0)).collect()
    }
}

/// Impedance seen through reflection coefficient `gamma` on a `z0` line
pub fn gamma_to_z(gamma: Complex64, z0: f64) -> Complex64 {
    let one = Complex64::new(1.0, 0.0);
    z0 * (one + gamma) / (one - gamma)
}

// Noise figure is a power ratio: 10*log10.
#[inline]
fn nf_db_2_linear(db: f64) -> f64 {
    db_2_magnitude(2.0 * db)
}

#[inline]
fn nf_linear_2_db(nf: f64) -> f64 {
    magnitude_2_db(nf) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn single_point(nfmin_db: f64, gamma_opt: Complex64, rn: f64) -> NoiseNetwork {
        let mut noise = NoiseNetwork::with_unit(FrequencyUnit::GHz);
        noise.push(1.0, nfmin_db, gamma_opt, rn);
        noise
    }

    #[test]
    fn test_noise_figure_at_optimum() {
        // At optimum source, NF should equal NFmin
        let noise = single_point(0.5, Complex64::new(0.5, 0.3), 0.1);
        let nf_db = noise.noise_figure(noise.gamma_opt[0]);
        assert_relative_eq!(nf_db[0], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_noise_figure_rises_away_from_optimum() {
        let noise = single_point(0.5, Complex64::new(0.3, 0.0), 0.2);
        let nf_db = noise.noise_figure(Complex64::new(0.0, 0.0));
        assert!(nf_db[0] > 0.5);

        let outside = noise.noise_figure(Complex64::new(1.0, 0.0));
        assert!(outside[0].is_infinite());
    }

    #[test]
    fn test_noise_circle() {
        let noise = single_point(0.5, Complex64::new(0.3, 0.2), 0.2);

        let (center, radius) = noise.noise_circle(1.0, 0).unwrap();
        assert!(center.norm() < 1.0);
        assert!(radius > 0.0);

        // Circle at NFmin collapses onto Γopt
        let (center, radius) = noise.noise_circle(0.5, 0).unwrap();
        assert_relative_eq!(center.re, 0.3, epsilon = 1e-12);
        assert_relative_eq!(radius, 0.0, epsilon = 1e-12);

        assert!(noise.noise_circle(0.1, 0).is_none());
        assert!(noise.noise_circle(1.0, 5).is_none());
    }

    #[test]
    fn test_gamma_to_z() {
        let z = gamma_to_z(Complex64::new(0.0, 0.0), 50.0);
        assert_relative_eq!(z.re, 50.0, epsilon = 1e-12);

        let z = gamma_to_z(Complex64::new(1.0 / 3.0, 0.0), 50.0);
        assert_relative_eq!(z.re, 100.0, epsilon = 1e-9);

        let noise = single_point(1.0, Complex64::new(-1.0 / 3.0, 0.0), 0.3);
        assert_relative_eq!(noise.z_opt(50.0)[0].re, 25.0, epsilon = 1e-9);
    }
}
