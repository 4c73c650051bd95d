//! `.d` dialogue-script parser.
//!
//! A single forward pass turns a script into an ordered list of
//! [`Occurrence`]s. The parser is a small state machine:
//!
//! - `Normal`: dialogue headers, state/chain/patch headers, and the replies
//!   that follow a chain's `END`
//! - `ChainBody`: chain text lines and interjections until `END`, `EXTERN`,
//!   `EXIT` or `COPY_TRANS`
//! - `StateBody`: `SAY`, continuation lines and replies until `END`
//!
//! Comments are collected as notes and attached to the next occurrence.
//! Statements whose `~guard~` spans several lines are buffered and dispatched
//! once the guard closes.

mod patterns;

use std::io::{BufRead, Cursor};

use regex::Captures;

use crate::core::{
    Occurrence, OccurrenceKind, ParseError, ParseErrorKind, Target, TextId,
    scan::{CommentScanner, SplitLine, normalize_condition},
};
use patterns::{
    CHAIN_EXIT, CHAIN_EXTERN, CHAIN_HEADER, CONTINUATION, COPY_TRANS, DIALOGUE_HEADER, DO_EXIT,
    END_WITH_TARGET, GUARDED_STATEMENT, INTERJECTION, INTERJECTION_IF, PATCH_HEADER, REPLY, SAY,
    STATE_HEADER, TEXT_LINE, looks_like_script_syntax, parse_target,
};

/// Which header opened the current state body; decides what `END` closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    /// `IF ~guard~ THEN BEGIN state`
    Ordinary,
    /// `EXTEND_TOP` / `EXTEND_BOTTOM`
    Patch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    ChainBody,
    StateBody(BlockKind),
}

/// A statement whose guard is still open at end of line.
#[derive(Debug)]
struct PendingStatement {
    start_line: usize,
    text: String,
}

/// Speaker and guard shared by the `= @id` lines of a chain segment.
#[derive(Debug, Default)]
struct Segment {
    speaker: String,
    condition: String,
}

struct DialogueParser<'a> {
    file_name: &'a str,
    scanner: CommentScanner,
    mode: Mode,

    dialogue: String,
    state: String,
    speaker: String,
    reply_index: usize,
    in_state: bool,
    state_condition: String,

    pending_notes: Vec<String>,
    pending: Option<PendingStatement>,
    /// Index into `out` of the last chain text line, for `EXTERN`/`EXIT` attach.
    last_text: Option<usize>,
    segment: Segment,
    /// Line of the `CHAIN` header whose body is open.
    chain_line: usize,

    /// Line of the statement being dispatched.
    line: usize,
    out: Vec<Occurrence>,
}

/// Parse a dialogue script from any buffered reader.
///
/// `file_name` is only used to tag errors.
pub fn parse_reader<R: BufRead>(reader: R, file_name: &str) -> Result<Vec<Occurrence>, ParseError> {
    let mut parser = DialogueParser::new(file_name);
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let raw = line.map_err(|e| {
            ParseError::new(file_name, line_no, ParseErrorKind::Read(e.to_string()))
        })?;
        parser.feed(&raw, line_no)?;
    }
    parser.finish()
}

pub fn parse_str(content: &str, file_name: &str) -> Result<Vec<Occurrence>, ParseError> {
    parse_reader(Cursor::new(content), file_name)
}

impl<'a> DialogueParser<'a> {
    fn new(file_name: &'a str) -> Self {
        Self {
            file_name,
            scanner: CommentScanner::for_dialogue(),
            mode: Mode::Normal,
            dialogue: String::new(),
            state: String::new(),
            speaker: String::new(),
            reply_index: 0,
            in_state: false,
            state_condition: String::new(),
            pending_notes: Vec::new(),
            pending: None,
            last_text: None,
            segment: Segment::default(),
            chain_line: 0,
            line: 0,
            out: Vec::new(),
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.file_name, self.line, kind)
    }

    fn feed(&mut self, raw: &str, line_no: usize) -> Result<(), ParseError> {
        if let Some(mut pending) = self.pending.take() {
            let SplitLine { code, comment } = self.scanner.split_continued(raw);
            self.collect_note(comment);
            if !code.is_empty() {
                pending.text.push(' ');
                pending.text.push_str(&code);
            }
            if self.scanner.in_quote() {
                self.pending = Some(pending);
                return Ok(());
            }
            self.line = pending.start_line;
            return self.dispatch(&pending.text);
        }

        let SplitLine { code, comment } = self.scanner.split(raw);
        self.collect_note(comment);
        if code.is_empty() {
            return Ok(());
        }
        if self.scanner.in_quote() && GUARDED_STATEMENT.is_match(&code) {
            self.pending = Some(PendingStatement {
                start_line: line_no,
                text: code,
            });
            return Ok(());
        }

        self.line = line_no;
        self.dispatch(&code)
    }

    fn collect_note(&mut self, comment: String) {
        if comment.is_empty() || looks_like_script_syntax(&comment) {
            return;
        }
        // Top-level notes outside any dialogue have nothing to attach to.
        if self.mode == Mode::Normal && self.dialogue.is_empty() {
            return;
        }
        self.pending_notes.push(comment);
    }

    fn dispatch(&mut self, code: &str) -> Result<(), ParseError> {
        match self.mode {
            Mode::Normal => self.top_level(code),
            Mode::ChainBody => self.chain_body(code),
            Mode::StateBody(kind) => self.state_body(code, kind),
        }
    }

    fn top_level(&mut self, code: &str) -> Result<(), ParseError> {
        if let Some(caps) = DIALOGUE_HEADER.captures(code) {
            self.dialogue = caps[1].to_string();
            self.speaker = self.dialogue.clone();
            self.state.clear();
            self.in_state = false;
            self.reply_index = 0;
            self.state_condition.clear();
            self.pending_notes.clear();
            return Ok(());
        }

        if let Some(caps) = PATCH_HEADER.captures(code) {
            self.dialogue = caps[1].to_string();
            self.speaker = self.dialogue.clone();
            self.state = caps[2].to_string();
            self.state_condition.clear();
            self.open_body(Mode::StateBody(BlockKind::Patch));
            return Ok(());
        }

        if let Some(caps) = CHAIN_HEADER.captures(code) {
            self.dialogue = caps[1].to_string();
            self.speaker = self.dialogue.clone();
            self.state = caps[2].to_string();
            self.state_condition.clear();
            self.segment = Segment {
                speaker: self.dialogue.clone(),
                condition: String::new(),
            };
            self.chain_line = self.line;
            self.open_body(Mode::ChainBody);
            return Ok(());
        }

        if let Some(caps) = STATE_HEADER.captures(code) {
            if self.dialogue.is_empty() {
                return Err(self.error(ParseErrorKind::StateBeforeDialogue));
            }
            self.state = caps[2].to_string();
            self.speaker = self.dialogue.clone();
            self.state_condition = normalize_condition(&caps[1]);
            self.open_body(Mode::StateBody(BlockKind::Ordinary));
            return Ok(());
        }

        // A bare END here closes nothing: ordinary states close from inside
        // their body, and a chain's END was already consumed by the chain.
        if code.eq_ignore_ascii_case("END") {
            return Ok(());
        }

        if let Some(caps) = SAY.captures(code) {
            if !self.has_open_state() {
                return Err(self.error(ParseErrorKind::SayOutsideState));
            }
            let id = self.text_id(&caps[1], "SAY")?;
            self.emit_npc(id, self.speaker.clone(), self.state_condition.clone());
            return Ok(());
        }

        if let Some(caps) = REPLY.captures(code) {
            if !self.has_open_state() {
                return Err(self.error(ParseErrorKind::ReplyOutsideState));
            }
            return self.emit_reply(&caps);
        }

        Ok(())
    }

    fn chain_body(&mut self, code: &str) -> Result<(), ParseError> {
        if code.eq_ignore_ascii_case("END") {
            self.close_chain();
            return Ok(());
        }

        if let Some(caps) = END_WITH_TARGET.captures(code) {
            self.attach(
                Target::Extern {
                    dialogue: caps[1].to_string(),
                    state: caps[2].to_string(),
                },
                "END",
            )?;
            self.close_chain();
            return Ok(());
        }

        if let Some(caps) = INTERJECTION_IF.captures(code) {
            let id = self.text_id(&caps[3], "interjection")?;
            self.segment = Segment {
                speaker: caps[1].to_string(),
                condition: normalize_condition(&caps[2]),
            };
            self.emit_chain_text(id);
            return Ok(());
        }

        if let Some(caps) = INTERJECTION.captures(code) {
            let id = self.text_id(&caps[2], "interjection")?;
            self.segment = Segment {
                speaker: caps[1].to_string(),
                condition: String::new(),
            };
            self.emit_chain_text(id);
            return Ok(());
        }

        if let Some(caps) = TEXT_LINE.captures(code) {
            let id = self.text_id(&caps[1], "chain line")?;
            self.segment = Segment {
                speaker: self.dialogue.clone(),
                condition: String::new(),
            };
            self.emit_chain_text(id);
            return Ok(());
        }

        if let Some(caps) = CONTINUATION.captures(code) {
            let id = self.text_id(&caps[1], "continuation")?;
            self.emit_chain_text(id);
            return Ok(());
        }

        if let Some(caps) = CHAIN_EXTERN.captures(code) {
            self.attach(
                Target::Extern {
                    dialogue: caps[1].to_string(),
                    state: caps[2].to_string(),
                },
                "EXTERN",
            )?;
            self.close_chain();
            return Ok(());
        }

        if CHAIN_EXIT.is_match(code) {
            self.attach(Target::Exit, "EXIT")?;
            self.close_chain();
            return Ok(());
        }

        if COPY_TRANS.is_match(code) {
            self.close_chain();
        }

        Ok(())
    }

    fn state_body(&mut self, code: &str, kind: BlockKind) -> Result<(), ParseError> {
        if code.eq_ignore_ascii_case("END") {
            self.close_state_body(kind);
            return Ok(());
        }

        // A patch block left open runs until the next dialogue header.
        if kind == BlockKind::Patch && DIALOGUE_HEADER.is_match(code) {
            self.close_state_body(kind);
            return self.top_level(code);
        }

        let text_line = SAY
            .captures(code)
            .map(|caps| (caps, "SAY"))
            .or_else(|| TEXT_LINE.captures(code).map(|caps| (caps, "continuation")))
            .or_else(|| CONTINUATION.captures(code).map(|caps| (caps, "continuation")));
        if let Some((caps, context)) = text_line {
            let id = self.text_id(&caps[1], context)?;
            self.emit_npc(id, self.speaker.clone(), self.state_condition.clone());
            return Ok(());
        }

        if code == "=" {
            return Ok(());
        }

        if let Some(caps) = REPLY.captures(code) {
            return self.emit_reply(&caps);
        }

        if DO_EXIT.is_match(code) {
            log::trace!("{}:{}: action-only transition", self.file_name, self.line);
        }

        Ok(())
    }

    fn close_state_body(&mut self, kind: BlockKind) {
        self.mode = Mode::Normal;
        self.in_state = false;
        self.state.clear();
        self.speaker.clear();
        self.state_condition.clear();
        if kind == BlockKind::Patch {
            self.dialogue.clear();
        }
    }

    fn open_body(&mut self, mode: Mode) {
        self.mode = mode;
        self.in_state = true;
        self.reply_index = 0;
        self.last_text = None;
    }

    /// Leave a chain body. Replies that follow at top level belong to the chain's state.
    fn close_chain(&mut self) {
        self.mode = Mode::Normal;
        self.in_state = true;
        self.last_text = None;
    }

    fn has_open_state(&self) -> bool {
        self.in_state && !self.dialogue.is_empty() && !self.state.is_empty()
    }

    fn text_id(&self, digits: &str, context: &'static str) -> Result<TextId, ParseError> {
        digits.parse().map_err(|_| {
            self.error(ParseErrorKind::InvalidTextId {
                context,
                value: digits.to_string(),
            })
        })
    }

    fn attach(&mut self, target: Target, keyword: &'static str) -> Result<(), ParseError> {
        let Some(idx) = self.last_text else {
            return Err(self.error(ParseErrorKind::AttachWithoutText { keyword }));
        };
        self.out[idx].target = target;
        Ok(())
    }

    fn emit_chain_text(&mut self, id: TextId) {
        let speaker = self.segment.speaker.clone();
        let condition = self.segment.condition.clone();
        self.emit_npc(id, speaker, condition);
        self.last_text = Some(self.out.len() - 1);
    }

    fn emit_npc(&mut self, id: TextId, speaker: String, condition: String) {
        let occurrence = Occurrence {
            kind: OccurrenceKind::Npc,
            text_id: id,
            speaker_dialogue: speaker,
            dialogue: self.dialogue.clone(),
            state: self.state.clone(),
            reply_index: None,
            target: Target::None,
            condition,
            notes: std::mem::take(&mut self.pending_notes),
            line: self.line,
        };
        self.out.push(occurrence);
    }

    fn emit_reply(&mut self, caps: &Captures<'_>) -> Result<(), ParseError> {
        let id = self.text_id(&caps[2], "REPLY")?;
        let reply_index = self.reply_index;
        self.reply_index += 1;

        let occurrence = Occurrence {
            kind: OccurrenceKind::Pc,
            text_id: id,
            speaker_dialogue: String::new(),
            dialogue: self.dialogue.clone(),
            state: self.state.clone(),
            reply_index: Some(reply_index),
            target: parse_target(&caps[3]),
            condition: normalize_condition(&caps[1]),
            notes: std::mem::take(&mut self.pending_notes),
            line: self.line,
        };
        self.out.push(occurrence);
        Ok(())
    }

    fn finish(self) -> Result<Vec<Occurrence>, ParseError> {
        if let Some(pending) = &self.pending {
            return Err(ParseError::new(
                self.file_name,
                pending.start_line,
                ParseErrorKind::UnterminatedCondition,
            ));
        }
        if self.mode == Mode::ChainBody {
            return Err(ParseError::new(
                self.file_name,
                self.chain_line,
                ParseErrorKind::UnterminatedChain,
            ));
        }
        log::debug!("{}: {} occurrences", self.file_name, self.out.len());
        Ok(self.out)
    }
}
