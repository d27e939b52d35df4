//! Touchstone file parser
//!
//! Implements parsing of Touchstone v1 `.sNp` files.
//!
//! The parser is a line-driven state machine:
//!
//! ```text
//! AwaitOption --#--> ReadingData --"! ... noise parameters"--> ReadingNoise
//!      \                  \                                         \
//!       +------------------+------------------EOF--------------------+--> Done
//! ```
//!
//! The data row layout depends only on the port count taken from the file
//! name: one line per point for 1- and 2-ports, N lines per point otherwise.

use ndarray::Array2;
use num_complex::Complex64;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::DEFAULT_Z0;
use crate::frequency::{Frequency, FrequencyUnit};
use crate::math::conversions::DataFormat;
use crate::math::matrix_ops::zeros;
use crate::math::transforms::ParameterType;
use crate::network::NoiseNetwork;

/// Touchstone parsing errors
#[derive(Error, Debug)]
pub enum TouchstoneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file name '{0}': expected a .sNp extension")]
    InvalidExtension(String),

    #[error("Invalid port count: {0}")]
    InvalidPortCount(usize),

    #[error("Invalid option line: {0}")]
    InvalidOption(String),

    #[error("Unknown frequency unit '{0}'")]
    UnknownUnit(String),

    #[error("Unknown parameter type '{0}'")]
    UnknownParameter(String),

    #[error("Unknown data format '{0}'")]
    UnknownFormat(String),

    #[error("Data at line {line} before the option line")]
    DataBeforeOption { line: usize },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Frequency point starting at line {line} is incomplete: {found} of {expected} rows")]
    Truncated {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Contents of the `#` option line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionLine {
    pub unit: FrequencyUnit,
    pub param_type: ParameterType,
    pub format: DataFormat,
    pub z0: f64,
}

impl Default for OptionLine {
    fn default() -> Self {
        Self {
            unit: FrequencyUnit::GHz,
            param_type: ParameterType::S,
            format: DataFormat::MA,
            z0: DEFAULT_Z0,
        }
    }
}

/// Touchstone file parser and data container
#[derive(Debug, Clone)]
pub struct Touchstone {
    /// Number of ports
    pub nports: usize,
    /// Frequency data
    pub frequency: Frequency,
    /// One `nports x nports` matrix per frequency point, in `param_type`
    pub data: Vec<Array2<Complex64>>,
    /// Reference impedance, shared by all ports
    pub z0: f64,
    /// Comment lines, without the leading `!`
    pub comments: Vec<String>,
    /// Encoding the values were stored in
    pub format: DataFormat,
    /// Parameter type declared by the option line
    pub param_type: ParameterType,
    /// Trailing noise block, if any
    pub noise: Option<NoiseNetwork>,
}

impl Touchstone {
    /// Parse a Touchstone file with the default [`Config`]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TouchstoneError> {
        Self::from_file_with_config(path, &Config::default())
    }

    /// Parse a Touchstone file.
    ///
    /// The port count comes from the `.sNp` extension and is checked before
    /// the file is opened.
    pub fn from_file_with_config<P: AsRef<Path>>(
        path: P,
        config: &Config,
    ) -> Result<Self, TouchstoneError> {
        let path = path.as_ref();
        let invalid = || TouchstoneError::InvalidExtension(path.display().to_string());

        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(invalid)?;
        let nports = Self::parse_extension(ext).map_err(|_| invalid())?;

        debug!(path = %path.display(), nports, "reading touchstone file");
        let reader = BufReader::new(File::open(path)?);
        Self::from_reader(reader, nports, config)
    }

    /// Parse extension (`s2p`, `S4P`, ...) to get number of ports
    pub fn parse_extension(ext: &str) -> Result<usize, TouchstoneError> {
        let invalid = || TouchstoneError::InvalidExtension(ext.to_string());
        let lower = ext.to_lowercase();
        let digits = lower
            .strip_prefix('s')
            .and_then(|rest| rest.strip_suffix('p'))
            .ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        match digits.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(invalid()),
        }
    }

    /// Parse from string content
    ///
    /// # Arguments
    /// * `content` - Touchstone file content as string
    /// * `nports` - Number of ports (normally derived from the file extension)
    ///
    /// # Example
    /// ```
    /// use rfnet_core::touchstone::Touchstone;
    /// let content = "# GHz S RI R 50\n1.0 0.1 0.0 0.9 0.0 0.9 0.0 0.1 0.0";
    /// let ts = Touchstone::from_content(content, 2).unwrap();
    /// assert_eq!(ts.nfreq(), 1);
    /// ```
    pub fn from_content(content: &str, nports: usize) -> Result<Self, TouchstoneError> {
        Self::from_reader(std::io::Cursor::new(content), nports, &Config::default())
    }

    /// Parse from a reader, line by line
    pub fn from_reader<R: BufRead>(
        reader: R,
        nports: usize,
        config: &Config,
    ) -> Result<Self, TouchstoneError> {
        if nports == 0 {
            return Err(TouchstoneError::InvalidPortCount(nports));
        }

        let mut state = ParserState::new(nports, config);
        for (idx, line) in reader.lines().enumerate() {
            state.feed(idx + 1, &line?)?;
        }
        state.finish()
    }

    /// Parse the option line `# <unit> <param> <format> R <z0>`.
    ///
    /// Fields are positional and case-insensitive. Trailing fields may be
    /// omitted and then take the Touchstone defaults (`GHz S MA R 50`).
    pub fn parse_option_line(line: &str) -> Result<OptionLine, TouchstoneError> {
        let body = line.trim().strip_prefix('#').ok_or_else(|| {
            TouchstoneError::InvalidOption(line.to_string())
        })?;
        let parts: Vec<&str> = body.split_whitespace().collect();
        let mut opt = OptionLine::default();

        if let Some(tok) = parts.first() {
            opt.unit = FrequencyUnit::from_str(tok)
                .ok_or_else(|| TouchstoneError::UnknownUnit(tok.to_string()))?;
        }
        if let Some(tok) = parts.get(1) {
            opt.param_type = match ParameterType::from_str(tok) {
                Some(ParameterType::T) | None => {
                    return Err(TouchstoneError::UnknownParameter(tok.to_string()))
                }
                Some(p) => p,
            };
        }
        if let Some(tok) = parts.get(2) {
            opt.format = DataFormat::from_str(tok)
                .ok_or_else(|| TouchstoneError::UnknownFormat(tok.to_string()))?;
        }
        if let Some(tok) = parts.get(3) {
            if !tok.eq_ignore_ascii_case("r") {
                return Err(TouchstoneError::InvalidOption(line.to_string()));
            }
            opt.z0 = parts
                .get(4)
                .and_then(|z| z.parse::<f64>().ok())
                .ok_or_else(|| TouchstoneError::InvalidOption(line.to_string()))?;
        }

        Ok(opt)
    }

    /// Get the number of frequency points
    #[inline]
    pub fn nfreq(&self) -> usize {
        self.data.len()
    }

    /// All comment lines joined with newlines
    pub fn comment_text(&self) -> String {
        self.comments.join("\n")
    }
}

/// Parser states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitOption,
    ReadingData,
    ReadingNoise,
    Done,
}

/// A multi-line frequency point still being filled
struct Pending {
    line: usize,
    freq: f64,
    matrix: Array2<Complex64>,
    rows: usize,
}

struct ParserState {
    state: State,
    nports: usize,
    config: Config,
    option: OptionLine,
    comments: Vec<String>,
    frequency: Frequency,
    data: Vec<Array2<Complex64>>,
    pending: Option<Pending>,
    noise: Option<NoiseNetwork>,
}

impl ParserState {
    fn new(nports: usize, config: &Config) -> Self {
        let option = OptionLine::default();
        Self {
            state: State::AwaitOption,
            nports,
            config: *config,
            option,
            comments: Vec::new(),
            frequency: Frequency::with_unit(option.unit),
            data: Vec::new(),
            pending: None,
            noise: None,
        }
    }

    fn feed(&mut self, line_no: usize, raw: &str) -> Result<(), TouchstoneError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        if let Some(comment) = trimmed.strip_prefix('!') {
            match self.state {
                // Everything inside the noise block is skipped, markers included
                State::ReadingNoise => {}
                State::ReadingData if comment.to_lowercase().contains("noise parameters") => {
                    self.enter_noise(line_no)?;
                }
                _ => self.comments.push(comment.trim().to_string()),
            }
            return Ok(());
        }

        // Trailing inline comment
        let content = match trimmed.find('!') {
            Some(idx) => trimmed[..idx].trim_end(),
            None => trimmed,
        };

        if content.starts_with('#') {
            return self.option_line(line_no, content);
        }

        match self.state {
            State::AwaitOption => Err(TouchstoneError::DataBeforeOption { line: line_no }),
            State::ReadingData => self.data_line(line_no, content),
            State::ReadingNoise => self.noise_line(line_no, content),
            State::Done => Ok(()),
        }
    }

    fn option_line(&mut self, line_no: usize, line: &str) -> Result<(), TouchstoneError> {
        if self.state != State::AwaitOption {
            warn!(line = line_no, "ignoring repeated option line");
            return Ok(());
        }

        let opt = Touchstone::parse_option_line(line)?;
        debug!(
            nports = self.nports,
            unit = %opt.unit,
            param = %opt.param_type,
            format = %opt.format,
            z0 = opt.z0,
            "option line"
        );
        self.option = opt;
        self.frequency = Frequency::with_unit(opt.unit);
        self.state = State::ReadingData;
        Ok(())
    }

    fn enter_noise(&mut self, line_no: usize) -> Result<(), TouchstoneError> {
        self.check_complete()?;
        debug!(line = line_no, points = self.data.len(), "noise block");
        self.noise = Some(NoiseNetwork::with_unit(self.option.unit));
        self.state = State::ReadingNoise;
        Ok(())
    }

    fn data_line(&mut self, line_no: usize, line: &str) -> Result<(), TouchstoneError> {
        let values = parse_values(line_no, line)?;
        let n = self.nports;

        match n {
            1 => {
                expect_len(line_no, &values, 3)?;
                let mut m = zeros(1, 1, self.config.layout);
                m[[0, 0]] = self.decode(values[1], values[2]);
                self.push_point(values[0], m);
            }
            2 => {
                expect_len(line_no, &values, 9)?;
                let mut m = zeros(2, 2, self.config.layout);
                // Column order on the line is 11, 21, 12, 22
                for (k, pair) in values[1..].chunks_exact(2).enumerate() {
                    m[[k % 2, k / 2]] = self.decode(pair[0], pair[1]);
                }
                self.push_point(values[0], m);
            }
            _ => match self.pending.take() {
                None => {
                    expect_len(line_no, &values, 1 + 2 * n)?;
                    let mut pending = Pending {
                        line: line_no,
                        freq: values[0],
                        matrix: zeros(n, n, self.config.layout),
                        rows: 0,
                    };
                    self.fill_row(&mut pending, &values[1..]);
                    self.pending = Some(pending);
                }
                Some(mut pending) => {
                    expect_len(line_no, &values, 2 * n)?;
                    self.fill_row(&mut pending, &values);
                    if pending.rows == n {
                        self.push_point(pending.freq, pending.matrix);
                    } else {
                        self.pending = Some(pending);
                    }
                }
            },
        }
        Ok(())
    }

    fn fill_row(&self, pending: &mut Pending, values: &[f64]) {
        let row = pending.rows;
        for (j, pair) in values.chunks_exact(2).enumerate() {
            pending.matrix[[row, j]] = self.decode(pair[0], pair[1]);
        }
        pending.rows += 1;
    }

    fn noise_line(&mut self, line_no: usize, line: &str) -> Result<(), TouchstoneError> {
        let values = parse_values(line_no, line)?;
        expect_len(line_no, &values, 5)?;
        let gamma_opt = DataFormat::MA.to_complex(values[2], values[3]);
        if let Some(noise) = self.noise.as_mut() {
            noise.push(values[0], values[1], gamma_opt, values[4]);
        }
        Ok(())
    }

    #[inline]
    fn decode(&self, a: f64, b: f64) -> Complex64 {
        self.option.format.to_complex(a, b)
    }

    fn push_point(&mut self, freq: f64, matrix: Array2<Complex64>) {
        self.frequency.append(freq);
        self.data.push(matrix);
    }

    fn check_complete(&self) -> Result<(), TouchstoneError> {
        match &self.pending {
            Some(p) => Err(TouchstoneError::Truncated {
                line: p.line,
                expected: self.nports,
                found: p.rows,
            }),
            None => Ok(()),
        }
    }

    fn finish(mut self) -> Result<Touchstone, TouchstoneError> {
        self.check_complete()?;
        self.state = State::Done;

        debug!(
            nports = self.nports,
            points = self.data.len(),
            noise_points = self.noise.as_ref().map_or(0, NoiseNetwork::npoints),
            "touchstone parsed"
        );

        Ok(Touchstone {
            nports: self.nports,
            frequency: self.frequency,
            data: self.data,
            z0: self.option.z0,
            comments: self.comments,
            format: self.option.format,
            param_type: self.option.param_type,
            noise: self.noise,
        })
    }
}

fn parse_values(line_no: usize, line: &str) -> Result<Vec<f64>, TouchstoneError> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| TouchstoneError::Parse {
                line: line_no,
                message: format!("invalid number '{tok}'"),
            })
        })
        .collect()
}

fn expect_len(line_no: usize, values: &[f64], expected: usize) -> Result<(), TouchstoneError> {
    if values.len() != expected {
        return Err(TouchstoneError::Parse {
            line: line_no,
            message: format!("expected {expected} values, found {}", values.len()),
        });
    }
    Ok(())
}
