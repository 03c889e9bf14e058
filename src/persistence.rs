//! Flat-file formats for boards.
//!
//! - `tsp{N}.dat`: first line `N`, then `N` lines of `N` space-padded fields.
//!   Only the upper triangle is written; the lower one is its mirror, so an
//!   asymmetric matrix comes back symmetric.
//! - `coordinates_{N}.csv`: one `x,y` pair per line, no header.
//!
//! Numbers are written with 6 significant digits and trailing zeros removed.

use crate::error::{Error, Result};
use crate::instance::Point;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Width of a matrix field, separator included
const FIELD_WIDTH: usize = 8;
/// Minimum number of spaces after a field
const MIN_PADDING: usize = 2;
const SIGNIFICANT_DIGITS: usize = 6;

pub fn matrix_file_name(num_holes: usize) -> String {
    format!("tsp{}.dat", num_holes)
}

pub fn coordinates_file_name(num_holes: usize) -> String {
    format!("coordinates_{}.csv", num_holes)
}

/// Shortest representation with 6 significant digits, switching to
/// scientific notation for very small or very large magnitudes.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let precision = SIGNIFICANT_DIGITS - 1;
    let scientific = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Write a matrix in `.dat` layout
pub fn write_matrix<W: Write>(mut writer: W, matrix: &[Vec<f64>]) -> std::io::Result<()> {
    let n = matrix.len();
    writeln!(writer, "{}", n)?;

    for i in 0..n {
        let mut line = String::with_capacity(n * FIELD_WIDTH);
        for j in 0..n {
            let value = if j >= i { matrix[i][j] } else { matrix[j][i] };
            let field = format_number(value);
            let padding = FIELD_WIDTH.saturating_sub(field.len()).max(MIN_PADDING);
            line.push_str(&field);
            line.extend(std::iter::repeat(' ').take(padding));
        }
        writeln!(writer, "{}", line)?;
    }

    writer.flush()
}

/// Read a matrix in `.dat` layout from any buffered reader
pub fn read_matrix<R: BufRead>(reader: R) -> Result<Vec<Vec<f64>>> {
    parse_matrix(reader, Path::new("<stream>"))
}

fn parse_matrix<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<Vec<f64>>> {
    let mut tokens: Vec<(usize, String)> = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        tokens.extend(line.split_whitespace().map(|t| (index + 1, t.to_string())));
    }

    let mut tokens = tokens.into_iter();
    let n = match tokens.next() {
        Some((line, token)) => token.parse::<usize>().map_err(|_| {
            Error::parse(origin, line, format!("expected hole count, found {:?}", token))
        })?,
        None => return Err(Error::parse(origin, 1, "empty file")),
    };
    if n == 0 {
        return Err(Error::parse(origin, 1, "hole count must be positive"));
    }
    let expected = n.checked_mul(n).ok_or_else(|| {
        Error::parse(origin, 1, format!("hole count {} is too large", n))
    })?;
    if tokens.len() < expected {
        return Err(Error::parse(
            origin,
            1,
            format!("expected {} values, found {}", expected, tokens.len()),
        ));
    }

    let mut matrix = vec![vec![0.0; n]; n];
    let mut last_line = 1;
    for i in 0..n {
        for j in 0..n {
            let (line, token) = tokens.next().ok_or_else(|| {
                Error::parse(
                    origin,
                    last_line,
                    format!("expected {} values, file ends at row {} column {}", n * n, i, j),
                )
            })?;
            matrix[i][j] = token.parse::<f64>().map_err(|_| {
                Error::parse(origin, line, format!("invalid number {:?}", token))
            })?;
            last_line = line;
        }
    }

    let extra = tokens.count();
    if extra > 0 {
        log::warn!("{:?}: ignoring {} trailing values", origin, extra);
    }

    Ok(matrix)
}

pub fn save_matrix_dat<P: AsRef<Path>>(path: P, matrix: &[Vec<f64>]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::persistence(path, e))?;
    write_matrix(BufWriter::new(file), matrix).map_err(|e| Error::persistence(path, e))?;
    log::info!("saved {}x{} matrix to {:?}", matrix.len(), matrix.len(), path);
    Ok(())
}

pub fn load_matrix_dat<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::persistence(path, e))?;
    parse_matrix(BufReader::new(file), path)
}

/// Write coordinates as `x,y` lines
pub fn write_coordinates<W: Write>(writer: W, points: &[Point]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for p in points {
        csv_writer.write_record([format_number(p.x), format_number(p.y)])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_coordinates<R: Read>(reader: R) -> Result<Vec<Point>> {
    parse_coordinates(reader, Path::new("<stream>"))
}

fn parse_coordinates<R: Read>(reader: R, origin: &Path) -> Result<Vec<Point>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let field = |k: usize| -> Result<f64> {
            let raw = record
                .get(k)
                .ok_or_else(|| Error::parse(origin, line, "expected two fields"))?;
            raw.parse::<f64>()
                .map_err(|_| Error::parse(origin, line, format!("invalid number {:?}", raw)))
        };
        points.push(Point::new(field(0)?, field(1)?));
    }

    Ok(points)
}

pub fn save_coordinates_csv<P: AsRef<Path>>(path: P, points: &[Point]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::persistence(path, e))?;
    write_coordinates(BufWriter::new(file), points).map_err(|e| match e {
        Error::Csv(e) => Error::persistence(path, e.into()),
        Error::Io(e) => Error::persistence(path, e),
        other => other,
    })?;
    log::info!("saved {} coordinates to {:?}", points.len(), path);
    Ok(())
}

pub fn load_coordinates_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::persistence(path, e))?;
    parse_coordinates(file, path)
}
