use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use super::{Occurrence, StringTable, TextId};

/// Canonical base name used to pair a `.d` file with its `.tra` file.
///
/// The file stem, lower-cased: `dlg/AC#Test.D` and `tra/english/ac#test.tra`
/// both map to `ac#test`.
pub fn canonical_key(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Parsed dialogue script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFile {
    pub key: String,
    pub path: PathBuf,
    pub occurrences: Vec<Occurrence>,
}

impl ScriptFile {
    pub fn new(path: impl Into<PathBuf>, occurrences: Vec<Occurrence>) -> Self {
        let path = path.into();
        Self {
            key: canonical_key(&path),
            path,
            occurrences,
        }
    }

    /// Every id the script references, ascending.
    pub fn referenced_ids(&self) -> BTreeSet<TextId> {
        self.occurrences.iter().map(|o| o.text_id).collect()
    }
}

/// Parsed string table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringFile {
    pub key: String,
    pub path: PathBuf,
    pub table: StringTable,
}

impl StringFile {
    pub fn new(path: impl Into<PathBuf>, table: StringTable) -> Self {
        let path = path.into();
        Self {
            key: canonical_key(&path),
            path,
            table,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_canonical_key_strips_extension_and_lowercases() {
        assert_eq!(canonical_key(Path::new("dlg/AC#Test.D")), "ac#test");
        assert_eq!(canonical_key(Path::new("tra/english/ac#test.tra")), "ac#test");
        assert_eq!(canonical_key(Path::new("01 Dialog.d")), "01 dialog");
    }

    #[test]
    fn test_referenced_ids_are_deduplicated() {
        use crate::core::{OccurrenceKind, Target};

        let occurrence = |id| Occurrence {
            kind: OccurrenceKind::Npc,
            text_id: id,
            speaker_dialogue: "D".to_string(),
            dialogue: "D".to_string(),
            state: "S".to_string(),
            reply_index: None,
            target: Target::None,
            condition: String::new(),
            notes: Vec::new(),
            line: 1,
        };
        let file = ScriptFile::new("d.d", vec![occurrence(3), occurrence(1), occurrence(3)]);
        assert_eq!(file.referenced_ids().into_iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_canonical_key_keeps_inner_dots() {
        assert_eq!(canonical_key(Path::new("a.b.tra")), "a.b");
    }
}
