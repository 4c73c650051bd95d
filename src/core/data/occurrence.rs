use std::fmt;

/// Numeric string reference (`@123`) into a string table.
pub type TextId = u32;

/// Who speaks a line: the NPC owning the dialogue or the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OccurrenceKind {
    Npc,
    Pc,
}

impl fmt::Display for OccurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OccurrenceKind::Npc => write!(f, "NPC"),
            OccurrenceKind::Pc => write!(f, "PC"),
        }
    }
}

/// Flow-control destination of a reply or of an auto-attached chain line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Target {
    #[default]
    None,
    Exit,
    /// Jump to a state of the current dialogue.
    Goto { state: String },
    /// Jump to a state of another dialogue.
    Extern { dialogue: String, state: String },
}

impl fmt::Display for Target {
    /// Sheet notation: `EXIT`, `GOTO:state`, `EXTERN:dialogue:state`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::None => Ok(()),
            Target::Exit => write!(f, "EXIT"),
            Target::Goto { state } => write!(f, "GOTO:{}", state),
            Target::Extern { dialogue, state } => write!(f, "EXTERN:{}:{}", dialogue, state),
        }
    }
}

/// One narrator (NPC) or reply (PC) line recovered from a dialogue script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub kind: OccurrenceKind,
    pub text_id: TextId,
    /// Dialogue voicing the line. Differs from `dialogue` for interjections,
    /// empty for player replies.
    pub speaker_dialogue: String,
    pub dialogue: String,
    pub state: String,
    /// Position among the replies of the enclosing state. `Some` iff `kind` is `Pc`.
    pub reply_index: Option<usize>,
    pub target: Target,
    pub condition: String,
    pub notes: Vec<String>,
    /// 1-based line of the statement that emitted this occurrence.
    pub line: usize,
}

impl Occurrence {
    pub fn is_pc(&self) -> bool {
        self.kind == OccurrenceKind::Pc
    }

    /// `@123` notation used in sheets and reports.
    pub fn strref(&self) -> String {
        format!("@{}", self.text_id)
    }

    /// Notes joined with `, `, followed by ` | condition` when a condition exists.
    pub fn comment(&self) -> String {
        let notes = self.notes.join(", ");
        match (notes.is_empty(), self.condition.is_empty()) {
            (_, true) => notes,
            (true, false) => self.condition.clone(),
            (false, false) => format!("{} | {}", notes, self.condition),
        }
    }
}
