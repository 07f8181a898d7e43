use crate::prelude::*;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Immutable descriptor of one remote file. Built once during album
/// population and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct FileReference {
    /// Opaque identifier assigned by the storage service.
    pub id: String,
    /// Display name, also used as the entry name inside an export archive.
    pub name: String,
    /// MIME tag as reported by the listing call (e.g. `image/jpeg`).
    pub media_type: String,
    /// URL serving the raw file bytes.
    pub content_url: String,
    /// URL serving a render-sized thumbnail.
    pub thumbnail_url: String,
    pub modified_time: DateTime<Utc>,
}

impl FileReference {
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// A named, ordered collection of file references sharing one parent folder.
///
/// Append-only while being populated; a refresh replaces the whole album.
/// Duplicate entries are dropped on exact id match, first occurrence wins.
#[derive(Debug, Clone)]
pub struct Album {
    pub name: String,
    pub folder_id: String,
    files: Vec<FileReference>,
    seen_ids: HashSet<String>,
}

impl Album {
    pub fn new(name: impl Into<String>, folder_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder_id: folder_id.into(),
            files: Vec::new(),
            seen_ids: HashSet::new(),
        }
    }

    /// Appends a file unless its id was already seen. Returns whether the
    /// file was added.
    pub fn push(&mut self, file: FileReference) -> bool {
        if !self.seen_ids.insert(file.id.clone()) {
            return false;
        }
        self.files.push(file);
        true
    }

    pub fn files(&self) -> &[FileReference] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn image_files(&self) -> impl Iterator<Item = &FileReference> {
        self.files.iter().filter(|f| f.is_image())
    }

    /// Case-insensitive substring search over display names.
    pub fn search<'a>(&'a self, term: &str) -> Vec<&'a FileReference> {
        let term = term.to_lowercase();
        self.files
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&term))
            .collect()
    }

    pub fn sort_newest_first(&mut self) {
        self.files
            .sort_by(|a, b| b.modified_time.cmp(&a.modified_time));
    }

    pub fn shuffle(&mut self) {
        let mut rng = rand::rng();
        self.files.shuffle(&mut rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn file(id: &str, name: &str, media_type: &str, ts: i64) -> FileReference {
        FileReference {
            id: id.to_string(),
            name: name.to_string(),
            media_type: media_type.to_string(),
            content_url: format!("https://example.com/{id}"),
            thumbnail_url: format!("https://example.com/{id}/thumb"),
            modified_time: Utc.timestamp_opt(ts, 0).unwrap(),
        }
    }

    #[test]
    fn push_dedups_on_exact_id() {
        let mut album = Album::new("Trip", "folder-1");
        assert!(album.push(file("a", "a.jpg", "image/jpeg", 1)));
        assert!(album.push(file("b", "b.jpg", "image/jpeg", 2)));
        // Same id, different name: still a duplicate.
        assert!(!album.push(file("a", "renamed.jpg", "image/jpeg", 3)));
        assert_eq!(album.len(), 2);
        assert_eq!(album.files()[0].name, "a.jpg");
    }

    #[test]
    fn image_files_skips_other_media_types() {
        let mut album = Album::new("Mixed", "folder-1");
        album.push(file("a", "a.jpg", "image/jpeg", 1));
        album.push(file("b", "b.mp4", "video/mp4", 2));
        album.push(file("c", "c.png", "image/png", 3));
        let names: Vec<_> = album.image_files().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "c.png"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut album = Album::new("Trip", "folder-1");
        album.push(file("a", "Sunset_Beach.jpg", "image/jpeg", 1));
        album.push(file("b", "mountain.jpg", "image/jpeg", 2));
        let hits = album.search("BEACH");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
        assert!(album.search("river").is_empty());
    }

    #[test]
    fn sort_newest_first_orders_by_timestamp() {
        let mut album = Album::new("Trip", "folder-1");
        album.push(file("old", "old.jpg", "image/jpeg", 100));
        album.push(file("new", "new.jpg", "image/jpeg", 300));
        album.push(file("mid", "mid.jpg", "image/jpeg", 200));
        album.sort_newest_first();
        let ids: Vec<_> = album.files().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn shuffle_keeps_the_same_set_of_files() {
        let mut album = Album::new("Trip", "folder-1");
        for i in 0..20 {
            album.push(file(&format!("f{i}"), &format!("f{i}.jpg"), "image/jpeg", i));
        }
        album.shuffle();
        assert_eq!(album.len(), 20);
        let mut ids: Vec<_> = album.files().iter().map(|f| f.id.clone()).collect();
        ids.sort();
        assert_eq!(ids[0], "f0");
        assert_eq!(ids.len(), 20);
    }
}
