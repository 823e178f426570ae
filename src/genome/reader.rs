//! UCSC `chrom.sizes` reader.

use std::{io::Read, num};

use csv::StringRecord;
use thiserror::Error;

use super::{Chromosome, Genome, GenomeError};

const NAME_INDEX: usize = 0;
const LENGTH_INDEX: usize = 1;

#[derive(Debug, Error)]
pub enum ReadGenomeError {
    #[error("invalid record")]
    InvalidRecord(#[source] csv::Error),
    #[error("missing chromosome name")]
    MissingName,
    #[error("missing length for chromosome {0}")]
    MissingLength(String),
    #[error("invalid length for chromosome {0}")]
    InvalidLength(String, #[source] num::ParseIntError),
    #[error("invalid genome")]
    InvalidGenome(#[source] GenomeError),
}

/// Reads a tab-delimited list of chromosome names and lengths.
pub fn read_chrom_sizes<R, N>(reader: R, name: N) -> Result<Genome, ReadGenomeError>
where
    R: Read,
    N: Into<String>,
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);

    let mut chromosomes = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(ReadGenomeError::InvalidRecord)?;
        let chromosome = parse_record(&record)?;
        chromosomes.push(chromosome);
    }

    Genome::new(name, chromosomes).map_err(ReadGenomeError::InvalidGenome)
}

fn parse_record(record: &StringRecord) -> Result<Chromosome, ReadGenomeError> {
    let name = record
        .get(NAME_INDEX)
        .filter(|s| !s.is_empty())
        .ok_or(ReadGenomeError::MissingName)?;

    let length = record
        .get(LENGTH_INDEX)
        .ok_or_else(|| ReadGenomeError::MissingLength(name.into()))?
        .trim()
        .parse()
        .map_err(|e| ReadGenomeError::InvalidLength(name.into(), e))?;

    Ok(Chromosome::new(name, length))
}
