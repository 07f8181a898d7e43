//! Storage backends that provide album listings and per-file content.

use crate::base::catalog::{Album, FileReference};
use crate::prelude::*;
use crate::utils::retryable;
use async_trait::async_trait;

pub mod drive;

#[async_trait]
pub trait AlbumSource: Send + Sync {
    /// Lists all files directly under the given folder.
    async fn list_files(&self, folder_id: &str) -> Result<Vec<FileReference>>;

    /// Fetches the raw bytes of one file. Errors carry a retryable flag so
    /// the caller's retry policy can tell transient failures from permanent
    /// ones.
    async fn fetch_content(&self, file: &FileReference) -> retryable::Result<Bytes>;

    /// Loads a whole album, dropping duplicate entries on exact id match.
    async fn load_album(&self, name: &str, folder_id: &str) -> Result<Album> {
        let mut album = Album::new(name, folder_id);
        for file in self.list_files(folder_id).await? {
            album.push(file);
        }
        Ok(album)
    }
}

#[async_trait]
impl<T: AlbumSource + ?Sized> AlbumSource for Arc<T> {
    async fn list_files(&self, folder_id: &str) -> Result<Vec<FileReference>> {
        (**self).list_files(folder_id).await
    }

    async fn fetch_content(&self, file: &FileReference) -> retryable::Result<Bytes> {
        (**self).fetch_content(file).await
    }
}
