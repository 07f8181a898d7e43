use crate::prelude::*;

/// One remote folder to expose as an album, tagged with a display category.
#[derive(Deserialize, Debug, Clone)]
pub struct FolderSpec {
    pub id: String,
    pub category: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub folders: Vec<FolderSpec>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid settings JSON")
    }
}
