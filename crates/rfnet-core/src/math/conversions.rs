//! Scalar encoding conversions
//!
//! Touchstone stores each complex entry as a pair of reals in one of three
//! encodings. Angles are in degrees at the encoding boundary.

use num_complex::Complex64;
use std::f64::consts::PI;
use std::fmt;

/// Encoding of a complex value as two reals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    /// Real, imaginary
    RI,
    /// Magnitude, angle in degrees
    #[default]
    MA,
    /// 20*log10(magnitude), angle in degrees
    DB,
}

impl DataFormat {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ri" => Some(DataFormat::RI),
            "ma" => Some(DataFormat::MA),
            "db" => Some(DataFormat::DB),
            _ => None,
        }
    }

    /// Decode a pair in this encoding to a complex value
    pub fn to_complex(self, a: f64, b: f64) -> Complex64 {
        let (re, im) = convert_number(a, b, self, DataFormat::RI);
        Complex64::new(re, im)
    }

    /// Encode a complex value as a pair in this encoding
    pub fn encode(self, z: Complex64) -> (f64, f64) {
        convert_number(z.re, z.im, DataFormat::RI, self)
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataFormat::RI => "RI",
            DataFormat::MA => "MA",
            DataFormat::DB => "DB",
        };
        f.write_str(s)
    }
}

/// Convert the pair `(a, b)` from one encoding to another.
///
/// Total: NaN and infinities propagate, and a zero magnitude becomes
/// `-inf` dB.
pub fn convert_number(a: f64, b: f64, from: DataFormat, to: DataFormat) -> (f64, f64) {
    if from == to {
        return (a, b);
    }
    match (from, to) {
        (DataFormat::RI, DataFormat::MA) => ri_2_ma(a, b),
        (DataFormat::RI, DataFormat::DB) => ri_2_db(a, b),
        (DataFormat::MA, DataFormat::RI) => ma_2_ri(a, b),
        (DataFormat::MA, DataFormat::DB) => (magnitude_2_db(a), b),
        (DataFormat::DB, DataFormat::RI) => db_2_ri(a, b),
        (DataFormat::DB, DataFormat::MA) => (db_2_magnitude(a), b),
        _ => (a, b),
    }
}

/// (real, imag) to (magnitude, degrees)
pub fn ri_2_ma(re: f64, im: f64) -> (f64, f64) {
    let z = Complex64::new(re, im);
    (complex_2_magnitude(z), complex_2_degree(z))
}

/// (real, imag) to (dB, degrees)
pub fn ri_2_db(re: f64, im: f64) -> (f64, f64) {
    let z = Complex64::new(re, im);
    (complex_2_db(z), complex_2_degree(z))
}

/// (magnitude, degrees) to (real, imag)
pub fn ma_2_ri(mag: f64, deg: f64) -> (f64, f64) {
    let z = magdeg_2_reim(mag, deg);
    (z.re, z.im)
}

/// (dB, degrees) to (real, imag)
pub fn db_2_ri(db: f64, deg: f64) -> (f64, f64) {
    let z = dbdeg_2_reim(db, deg);
    (z.re, z.im)
}

/// Convert complex number to magnitude
pub fn complex_2_magnitude(z: Complex64) -> f64 {
    z.norm()
}

/// Convert complex number to dB (20*log10(|z|))
pub fn complex_2_db(z: Complex64) -> f64 {
    magnitude_2_db(z.norm())
}

/// Convert complex number to phase in degrees
pub fn complex_2_degree(z: Complex64) -> f64 {
    radian_2_degree(z.arg())
}

/// Convert magnitude to dB (20*log10(mag))
pub fn magnitude_2_db(mag: f64) -> f64 {
    20.0 * mag.log10()
}

/// Convert dB to magnitude (10^(dB/20))
pub fn db_2_magnitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert (magnitude, degree) to complex
pub fn magdeg_2_reim(mag: f64, deg: f64) -> Complex64 {
    Complex64::from_polar(mag, degree_2_radian(deg))
}

/// Convert (dB, degree) to complex
pub fn dbdeg_2_reim(db: f64, deg: f64) -> Complex64 {
    magdeg_2_reim(db_2_magnitude(db), deg)
}

/// Convert radians to degrees
pub fn radian_2_degree(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Convert degrees to radians
pub fn degree_2_radian(deg: f64) -> f64 {
    deg * PI / 180.0
}
