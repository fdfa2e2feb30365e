#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Something {
    pub id: String,
    pub name: String,
}

impl Something {
    pub fn new(id: String, name: String) -> Self {
        Self { id, name }
    }
}
