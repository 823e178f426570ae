use serde::{Deserialize, Serialize};

/// Annotation attached to a feature.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Details {
    /// A plain named interval, e.g., a chromosome.
    #[default]
    None,
    Gene(GeneAnnotation),
    UserRegion(UserRegion),
}

impl Details {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GeneAnnotation {
    pub id: String,
    pub transcript: Option<String>,
    pub description: Option<String>,
}

/// A region drawn or typed by a user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UserRegion {
    pub label: Option<String>,
}
