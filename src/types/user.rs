use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

impl User {
    /// Display name when set, otherwise the full name.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }
}
