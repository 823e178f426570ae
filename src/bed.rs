//! BED reader for region-set input.

use std::{io::Read, num};

use csv::StringRecord;
use thiserror::Error;

use crate::{
    feature::{Feature, Strand},
    interval::{ChromosomeInterval, InvalidIntervalError},
};

const CHROM_INDEX: usize = 0;
const START_INDEX: usize = 1;
const END_INDEX: usize = 2;
const NAME_INDEX: usize = 3;
const STRAND_INDEX: usize = 5;

const MISSING_FIELD: &str = ".";
const HEADER_PREFIXES: [&str; 2] = ["track", "browser"];

#[derive(Debug, Error)]
pub enum ReadFeaturesError {
    #[error("invalid record")]
    InvalidRecord(#[source] csv::Error),
    #[error("line {0}: missing field: {1}")]
    MissingField(u64, &'static str),
    #[error("line {0}: invalid position")]
    InvalidPosition(u64, #[source] num::ParseIntError),
    #[error("line {0}: invalid interval")]
    InvalidInterval(u64, #[source] InvalidIntervalError),
}

/// Reads features from BED3 to BED6 records.
///
/// Features without a name (or named `.`) are named after their locus. Header lines (`#`,
/// `track`, `browser`) are skipped.
pub fn read_features<R>(reader: R) -> Result<Vec<Feature>, ReadFeaturesError>
where
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);

    let mut features = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(ReadFeaturesError::InvalidRecord)?;

        if is_header(&record) {
            continue;
        }

        let feature = parse_record(&record)?;
        features.push(feature);
    }

    Ok(features)
}

fn is_header(record: &StringRecord) -> bool {
    record
        .get(CHROM_INDEX)
        .map(|field| {
            HEADER_PREFIXES
                .iter()
                .any(|prefix| field.starts_with(prefix))
        })
        .unwrap_or(false)
}

fn parse_record(record: &StringRecord) -> Result<Feature, ReadFeaturesError> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();

    let get = |i: usize, name: &'static str| {
        record
            .get(i)
            .filter(|s| !s.is_empty())
            .ok_or(ReadFeaturesError::MissingField(line, name))
    };

    let chrom = get(CHROM_INDEX, "chrom")?;

    let start = get(START_INDEX, "chromStart")?
        .parse()
        .map_err(|e| ReadFeaturesError::InvalidPosition(line, e))?;

    let end = get(END_INDEX, "chromEnd")?
        .parse()
        .map_err(|e| ReadFeaturesError::InvalidPosition(line, e))?;

    let locus = ChromosomeInterval::new(chrom, start, end)
        .map_err(|e| ReadFeaturesError::InvalidInterval(line, e))?;

    let strand = match record.get(STRAND_INDEX) {
        Some(s) => match s.parse() {
            Ok(strand) => strand,
            Err(e) => match e {},
        },
        None => Strand::None,
    };

    let feature = match record.get(NAME_INDEX) {
        Some(name) if !name.is_empty() && name != MISSING_FIELD => {
            Feature::new(name, locus, strand)
        }
        _ => Feature::from_locus(locus, strand),
    };

    Ok(feature)
}
