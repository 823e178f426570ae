#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chromosome {
    name: String,
    length: i64,
}

impl Chromosome {
    pub fn new<N>(name: N, length: i64) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            length,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> i64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}
