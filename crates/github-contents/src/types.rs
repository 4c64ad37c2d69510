//! Response types for the contents API

use serde::{Deserialize, Serialize};

/// Kind of a repository entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// One entry of a directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_deserialization() {
        let json = r#"[
            {
                "name": "art",
                "path": "public/imgs/art",
                "type": "dir",
                "size": 0,
                "download_url": null
            },
            {
                "name": "a.png",
                "path": "public/imgs/a.png",
                "type": "file",
                "size": 2048,
                "download_url": "https://raw.githubusercontent.com/o/r/main/public/imgs/a.png"
            }
        ]"#;

        let entries: Vec<ContentEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_dir());
        assert!(entries[1].is_file());
        assert_eq!(entries[1].size, Some(2048));
        assert!(entries[0].download_url.is_none());
    }

    #[test]
    fn test_unknown_type_maps_to_other() {
        let json = r#"{ "name": "x", "type": "something-new" }"#;
        let entry: ContentEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.entry_type, EntryType::Other);
        assert!(!entry.is_dir());
        assert!(!entry.is_file());
    }
}
