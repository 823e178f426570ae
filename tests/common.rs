use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

pub const GENOME_SRC: &str = "tests/fixtures/sq.chrom.sizes";
pub const REGIONS_SRC: &str = "tests/fixtures/regions.bed";

/// Returns a scratch path for a test output, creating its parent directory.
pub fn working_path<P>(name: P) -> io::Result<PathBuf>
where
    P: AsRef<Path>,
{
    let working_prefix = env::temp_dir().join(env!("CARGO_PKG_NAME"));
    fs::create_dir_all(&working_prefix)?;
    Ok(working_prefix.join(name))
}
