//! Sheet rows: the join of occurrences with string-table text.

use crate::core::{Occurrence, OccurrenceKind, ScriptFile, StringFile, TextId, missing_placeholder};

/// Comment of string-table rows whose id the paired script never uses.
pub const UNUSED_COMMENT: &str = "UNUSED IN .D";
/// Comment of rows exported from a string table with no paired script.
pub const STRINGS_ONLY_COMMENT: &str = "TRA_ONLY";

/// One line of an exported sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    pub npc_name: String,
    pub dialogue_id: String,
    pub state: String,
    pub npc_strref: String,
    pub npc_text: String,
    pub pc_strref: String,
    pub pc_text: String,
    pub goto: String,
    pub comment: String,
}

impl SheetRow {
    /// Row for one occurrence. `text` is the resolved string for its id.
    pub fn from_occurrence(occurrence: &Occurrence, text: String) -> Self {
        let mut row = SheetRow {
            npc_name: occurrence.speaker_dialogue.clone(),
            dialogue_id: occurrence.dialogue.clone(),
            state: occurrence.state.clone(),
            goto: occurrence.target.to_string(),
            comment: occurrence.comment(),
            ..Default::default()
        };
        match occurrence.kind {
            OccurrenceKind::Npc => {
                row.npc_strref = occurrence.strref();
                row.npc_text = text;
            }
            OccurrenceKind::Pc => {
                row.pc_strref = occurrence.strref();
                row.pc_text = text;
            }
        }
        row
    }

    /// Row for a bare string-table entry.
    pub fn from_entry(key: &str, id: TextId, text: &str, comment: &str) -> Self {
        SheetRow {
            dialogue_id: key.to_string(),
            npc_strref: format!("@{}", id),
            npc_text: text.to_string(),
            comment: comment.to_string(),
            ..Default::default()
        }
    }

    pub fn fields(&self) -> [&str; 9] {
        [
            &self.npc_name,
            &self.dialogue_id,
            &self.state,
            &self.npc_strref,
            &self.npc_text,
            &self.pc_strref,
            &self.pc_text,
            &self.goto,
            &self.comment,
        ]
    }
}

/// Column names; the two text columns carry the locale suffix.
pub fn header(locale: &str) -> [String; 9] {
    [
        "npc_name".to_string(),
        "dialogue_id".to_string(),
        "state".to_string(),
        "npc_strref".to_string(),
        format!("npc_text_{}", locale),
        "pc_strref".to_string(),
        format!("pc_text_{}", locale),
        "goto".to_string(),
        "comment".to_string(),
    ]
}

/// Rows of a script sheet: every occurrence in script order, then the unused
/// entries of the paired table in ascending id order.
///
/// Without a paired table every text is the missing-text placeholder.
pub fn dialogue_rows(script: &ScriptFile, strings: Option<&StringFile>) -> Vec<SheetRow> {
    let mut rows: Vec<SheetRow> = script
        .occurrences
        .iter()
        .map(|o| {
            let text = match strings {
                Some(strings) => strings.table.text(o.text_id).into_owned(),
                None => missing_placeholder(o.text_id),
            };
            SheetRow::from_occurrence(o, text)
        })
        .collect();

    if let Some(strings) = strings {
        let used = script.referenced_ids();
        rows.extend(
            strings
                .table
                .iter()
                .filter(|(id, _)| !used.contains(id))
                .map(|(id, text)| SheetRow::from_entry(&script.key, id, text, UNUSED_COMMENT)),
        );
    }

    rows
}

/// Rows of a string table exported on its own, in ascending id order.
pub fn strings_only_rows(strings: &StringFile) -> Vec<SheetRow> {
    strings
        .table
        .iter()
        .map(|(id, text)| SheetRow::from_entry(&strings.key, id, text, STRINGS_ONLY_COMMENT))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{StringTable, Target};

    fn occurrence(kind: OccurrenceKind, id: TextId, target: Target) -> Occurrence {
        Occurrence {
            kind,
            text_id: id,
            speaker_dialogue: if kind == OccurrenceKind::Npc {
                "AC#TEST".to_string()
            } else {
                String::new()
            },
            dialogue: "AC#TEST".to_string(),
            state: "START".to_string(),
            reply_index: (kind == OccurrenceKind::Pc).then_some(0),
            target,
            condition: String::new(),
            notes: Vec::new(),
            line: 1,
        }
    }

    fn table(entries: &[(TextId, &str)]) -> StringTable {
        entries
            .iter()
            .map(|(id, text)| (*id, text.to_string()))
            .collect()
    }

    #[test]
    fn test_header_uses_locale_suffix() {
        let header = header("pl");
        assert_eq!(header[4], "npc_text_pl");
        assert_eq!(header[6], "pc_text_pl");
    }

    #[test]
    fn test_dialogue_rows_with_unused_entries() {
        let mut npc = occurrence(OccurrenceKind::Npc, 100, Target::None);
        npc.notes = vec!["CHAIN".to_string()];
        npc.condition = r#"Global("AC#X","GLOBAL",1)"#.to_string();
        let pc = occurrence(
            OccurrenceKind::Pc,
            101,
            Target::Extern {
                dialogue: "AC#TEST".to_string(),
                state: "NEXT".to_string(),
            },
        );
        let script = ScriptFile::new("01 Dialog.d", vec![npc, pc]);
        let strings = StringFile::new(
            "01 Dialog.tra",
            table(&[(100, "Hello there."), (101, "Goodbye."), (999, "I am unused.")]),
        );

        let rows: Vec<Vec<String>> = dialogue_rows(&script, Some(&strings))
            .iter()
            .map(|r| r.fields().iter().map(|f| f.to_string()).collect())
            .collect();

        assert_eq!(
            rows,
            vec![
                vec![
                    "AC#TEST",
                    "AC#TEST",
                    "START",
                    "@100",
                    "Hello there.",
                    "",
                    "",
                    "",
                    r#"CHAIN | Global("AC#X","GLOBAL",1)"#,
                ],
                vec![
                    "",
                    "AC#TEST",
                    "START",
                    "",
                    "",
                    "@101",
                    "Goodbye.",
                    "EXTERN:AC#TEST:NEXT",
                    "",
                ],
                vec![
                    "",
                    "01 dialog",
                    "",
                    "@999",
                    "I am unused.",
                    "",
                    "",
                    "",
                    "UNUSED IN .D",
                ],
            ]
        );
    }

    #[test]
    fn test_missing_text_uses_placeholder() {
        let script = ScriptFile::new(
            "d.d",
            vec![occurrence(OccurrenceKind::Pc, 7, Target::Exit)],
        );
        let strings = StringFile::new("d.tra", table(&[]));

        let rows = dialogue_rows(&script, Some(&strings));
        assert_eq!(rows[0].pc_text, "#MISSING(@7)");
        assert_eq!(rows[0].goto, "EXIT");

        let unpaired = dialogue_rows(&script, None);
        assert_eq!(unpaired.len(), 1);
        assert_eq!(unpaired[0].pc_text, "#MISSING(@7)");
    }

    #[test]
    fn test_npc_row_keeps_attached_target() {
        let npc = occurrence(OccurrenceKind::Npc, 1, Target::Exit);
        let rows = dialogue_rows(&ScriptFile::new("d.d", vec![npc]), None);
        assert_eq!(rows[0].goto, "EXIT");
    }

    #[test]
    fn test_strings_only_rows_sorted_by_id() {
        let strings = StringFile::new("02_Quest.tra", table(&[(10, "Alpha"), (2, "Beta")]));
        let rows = strings_only_rows(&strings);

        assert_eq!(
            rows,
            vec![
                SheetRow::from_entry("02_quest", 2, "Beta", "TRA_ONLY"),
                SheetRow::from_entry("02_quest", 10, "Alpha", "TRA_ONLY"),
            ]
        );
        assert_eq!(rows[0].dialogue_id, "02_quest");
        assert_eq!(rows[0].npc_strref, "@2");
    }
}
