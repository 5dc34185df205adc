use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::dataset::DrawDataset;
use crate::error::{ImportError, ParseError, ParseErrorKind};
use crate::models::{validate_draw, DrawRecord, MAIN_COUNT};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Ligne brute : seule la position des colonnes compte, pas leur nom.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub date: String,
    pub numbers: String,
    pub multiplier: String,
}

impl RawRow {
    pub fn new(date: &str, numbers: &str, multiplier: &str) -> Self {
        Self {
            date: date.to_string(),
            numbers: numbers.to_string(),
            multiplier: multiplier.to_string(),
        }
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ParseErrorKind> {
    let raw = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Ok(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.date());
        }
    }
    Err(ParseErrorKind::Date(raw.to_string()))
}

/// "N1 N2 N3 N4 N5 PB" -> (boules, Powerball), bornes vérifiées.
pub fn parse_numbers(raw: &str) -> Result<([u8; MAIN_COUNT], u8), ParseErrorKind> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() != MAIN_COUNT + 1 {
        return Err(ParseErrorKind::NumberCount(tokens.len()));
    }

    let mut values = [0u8; MAIN_COUNT + 1];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        *slot = token
            .parse::<u8>()
            .map_err(|_| ParseErrorKind::Number(token.to_string()))?;
    }

    let main = [values[0], values[1], values[2], values[3], values[4]];
    let powerball = values[MAIN_COUNT];
    validate_draw(&main, powerball)?;
    Ok((main, powerball))
}

pub fn parse_multiplier(raw: &str) -> Result<Option<u8>, ParseErrorKind> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u8>()
        .map(Some)
        .map_err(|_| ParseErrorKind::Multiplier(raw.to_string()))
}

pub fn parse_row(row: &RawRow) -> Result<DrawRecord, ParseErrorKind> {
    let date = parse_date(&row.date)?;
    let (main, powerball) = parse_numbers(&row.numbers)?;
    let multiplier = parse_multiplier(&row.multiplier)?;
    Ok(DrawRecord {
        date,
        main,
        powerball,
        multiplier,
    })
}

fn field(record: &csv::StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or_default().trim()
}

fn raw_row(record: &csv::StringRecord, row: usize) -> Result<RawRow, ParseError> {
    if record.len() < 3 {
        return Err(ParseError {
            row,
            kind: ParseErrorKind::MissingColumns(record.len()),
        });
    }
    Ok(RawRow::new(field(record, 0), field(record, 1), field(record, 2)))
}

pub fn read_rows<R: Read>(reader: R, has_headers: bool) -> Result<Vec<RawRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(raw_row(&record, i + 1)?);
    }
    Ok(rows)
}

pub fn import_reader<R: Read>(reader: R, has_headers: bool) -> Result<DrawDataset, ImportError> {
    let rows = read_rows(reader, has_headers)?;
    let dataset = DrawDataset::load(&rows)?;
    Ok(dataset)
}

pub fn import_csv(path: &Path, has_headers: bool) -> Result<DrawDataset, ImportError> {
    log::debug!("Lecture de {:?}", path);
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    let dataset = import_reader(file, has_headers)?;
    log::info!("{} tirages chargés depuis {:?}", dataset.len(), path);
    Ok(dataset)
}
