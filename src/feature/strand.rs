use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The strand a feature is transcribed from.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Strand {
    Forward,
    Reverse,
    #[default]
    None,
}

impl Strand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "+",
            Self::Reverse => "-",
            Self::None => "",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strand {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Forward),
            "-" => Ok(Self::Reverse),
            _ => Ok(Self::None),
        }
    }
}

impl From<String> for Strand {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(strand) => strand,
            Err(e) => match e {},
        }
    }
}

impl From<Strand> for String {
    fn from(strand: Strand) -> Self {
        strand.as_str().into()
    }
}
