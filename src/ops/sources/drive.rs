use crate::base::catalog::FileReference;
use crate::ops::sources::AlbumSource;
use crate::prelude::*;
use crate::utils::{http, retryable};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3/files";
const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType, modifiedTime)";
const PAGE_SIZE: u32 = 1000;

/// Client for public Google Drive folders. Listing goes through the Drive v3
/// `files` endpoint with an API key; content is served from the public
/// download endpoint, so no OAuth flow is involved.
pub struct DriveSource {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    name: String,
    mime_type: String,
    modified_time: Option<String>,
}

pub fn content_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={file_id}")
}

pub fn thumbnail_url(file_id: &str) -> String {
    format!("https://drive.google.com/thumbnail?id={file_id}&sz=w1000")
}

impl DriveSource {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

impl TryFrom<DriveFile> for FileReference {
    type Error = anyhow::Error;

    fn try_from(file: DriveFile) -> Result<Self> {
        let modified_time = match &file.modified_time {
            Some(ts) => DateTime::parse_from_rfc3339(ts)
                .with_context(|| format!("invalid modifiedTime for file {}", file.id))?
                .with_timezone(&Utc),
            None => DateTime::<Utc>::UNIX_EPOCH,
        };
        Ok(FileReference {
            content_url: content_url(&file.id),
            thumbnail_url: thumbnail_url(&file.id),
            id: file.id,
            name: file.name,
            media_type: file.mime_type,
            modified_time,
        })
    }
}

#[async_trait]
impl AlbumSource for DriveSource {
    async fn list_files(&self, folder_id: &str) -> Result<Vec<FileReference>> {
        let query = format!("'{folder_id}' in parents");
        let mut result = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            debug!("listing Drive folder {folder_id} with query: {query}");
            let mut params = vec![
                ("q", query.clone()),
                ("key", self.api_key.clone()),
                ("fields", LIST_FIELDS.to_string()),
                ("pageSize", PAGE_SIZE.to_string()),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }

            let resp = self.client.get(DRIVE_API_URL).query(&params).send().await?;
            if !resp.status().is_success() {
                bail!(
                    "Drive API error: {:?}\n{}\n",
                    resp.status(),
                    resp.text().await?
                );
            }

            let page: DriveFileList = resp.json().await?;
            for file in page.files {
                result.push(file.try_into()?);
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!("found {} files in Drive folder {folder_id}", result.len());
        Ok(result)
    }

    async fn fetch_content(&self, file: &FileReference) -> retryable::Result<Bytes> {
        http::fetch_bytes(&self.client, &file.content_url).await
    }
}
