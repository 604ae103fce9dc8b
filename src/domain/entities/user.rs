/// Chat member reference, rebuilt from every interaction payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Chat mention markup for this user
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}
