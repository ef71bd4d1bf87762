//! Tab-separated index file of dataset examples.
//!
//! The index pairs every stored tensor row with its string metadata. Format:
//! one header row naming the columns, then one row per example. The `id` and
//! `caption` columns are required; any other columns are ignored.

use std::path::Path;

use crate::{Error, Result};

/// One row of the index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord {
    pub id: String,
    pub caption: String,
}

/// An ordered, in-memory copy of the index file.
#[derive(Debug, Clone)]
pub struct TsvIndex {
    records: Vec<IndexRecord>,
}

impl TsvIndex {
    /// Read and parse an index file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Index(format!("failed to read {}: {e}", path.display())))?;
        Self::parse(&content)
    }

    /// Parse index content from an in-memory string.
    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content.lines().enumerate().filter(|(_, l)| !l.is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| Error::Index("empty index file".to_string()))?;
        let columns: Vec<&str> = header.split('\t').collect();

        let col = |name: &str| {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or_else(|| Error::Index(format!("header is missing required column '{name}'")))
        };
        let id_col = col("id")?;
        let caption_col = col("caption")?;

        let mut records = Vec::new();
        for (line_no, line) in lines {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != columns.len() {
                return Err(Error::Index(format!(
                    "line {}: expected {} tab-separated fields, got {}",
                    line_no + 1,
                    columns.len(),
                    fields.len()
                )));
            }
            records.push(IndexRecord {
                id: fields[id_col].to_string(),
                caption: fields[caption_col].to_string(),
            });
        }

        Ok(Self { records })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at `idx`, in file order.
    pub fn get(&self, idx: usize) -> Option<&IndexRecord> {
        self.records.get(idx)
    }

    /// All ids, in file order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_index() {
        let tsv = "id\tcaption\nclip_001\tdog barking in the rain\nclip_002\tfreight train passing\n";
        let index = TsvIndex::parse(tsv).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(0).unwrap().id, "clip_001");
        assert_eq!(index.get(0).unwrap().caption, "dog barking in the rain");
        assert_eq!(index.get(1).unwrap().id, "clip_002");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let tsv = "duration\tid\tcaption\n8.0\tclip_001\tthunder\n9.5\tclip_002\twind chimes\n";
        let index = TsvIndex::parse(tsv).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(1).unwrap().id, "clip_002");
        assert_eq!(index.get(1).unwrap().caption, "wind chimes");
    }

    #[test]
    fn missing_caption_column_fails() {
        let tsv = "id\tlabel\nclip_001\tthunder\n";
        let err = TsvIndex::parse(tsv).unwrap_err();
        assert!(err.to_string().contains("caption"), "{err}");
    }

    #[test]
    fn ragged_row_fails_with_line_number() {
        let tsv = "id\tcaption\nclip_001\tthunder\nclip_002\n";
        let err = TsvIndex::parse(tsv).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn empty_file_fails() {
        assert!(TsvIndex::parse("").is_err());
    }

    #[test]
    fn header_only_is_empty() {
        let index = TsvIndex::parse("id\tcaption\n").unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.tsv");
        std::fs::write(&path, "id\tcaption\nclip_001\tsea waves\n").unwrap();
        let index = TsvIndex::load(&path).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.ids().collect::<Vec<_>>(), vec!["clip_001"]);
    }
}
