//! `.tra` string-table parser.
//!
//! Entries look like `@N = ~text~` or `@N = "text"`. A literal may span lines
//! and may be followed by a second (female) variant, which is read and dropped.

use std::io::{BufRead, Cursor};

use crate::core::{
    ParseError, ParseErrorKind, StringTable, TextId,
    scan::{CommentScanner, comment::STRING_TABLE_QUOTES},
};

/// A literal whose closing delimiter has not been seen yet.
#[derive(Debug)]
struct OpenLiteral {
    id: TextId,
    delimiter: char,
    /// `false` for a second variant that is consumed but not stored.
    retained: bool,
    buf: String,
}

#[derive(Debug)]
enum Mode {
    Normal,
    ReadingMultilineLiteral(OpenLiteral),
}

struct StringTableParser<'a> {
    file_name: &'a str,
    scanner: CommentScanner,
    mode: Mode,
    table: StringTable,
    line: usize,
}

/// Parse a string table from any buffered reader.
///
/// `file_name` is only used to tag errors.
pub fn parse_reader<R: BufRead>(reader: R, file_name: &str) -> Result<StringTable, ParseError> {
    let mut parser = StringTableParser::new(file_name);
    for line in reader.lines() {
        parser.line += 1;
        let raw = line.map_err(|e| parser.error(ParseErrorKind::Read(e.to_string())))?;
        parser.feed(&raw)?;
    }
    parser.finish()
}

pub fn parse_str(content: &str, file_name: &str) -> Result<StringTable, ParseError> {
    parse_reader(Cursor::new(content), file_name)
}

impl<'a> StringTableParser<'a> {
    fn new(file_name: &'a str) -> Self {
        Self {
            file_name,
            scanner: CommentScanner::for_string_table(),
            mode: Mode::Normal,
            table: StringTable::new(),
            line: 0,
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.file_name, self.line, kind)
    }

    fn feed(&mut self, raw: &str) -> Result<(), ParseError> {
        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Normal => self.parse_entry(raw),
            Mode::ReadingMultilineLiteral(mut open) => match raw.find(open.delimiter) {
                Some(end) => {
                    open.buf.push_str(&raw[..end]);
                    let tail = &raw[end + open.delimiter.len_utf8()..];
                    self.close_literal(open, tail)
                }
                None => {
                    open.buf.push_str(raw);
                    open.buf.push('\n');
                    self.mode = Mode::ReadingMultilineLiteral(open);
                    Ok(())
                }
            },
        }
    }

    fn parse_entry(&mut self, raw: &str) -> Result<(), ParseError> {
        let code = self.scanner.split(raw).code;
        let Some(after_at) = code.strip_prefix('@') else {
            return Ok(());
        };

        let digits_len = after_at
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after_at.len());
        if digits_len == 0 {
            return Err(self.error(ParseErrorKind::ExpectedNumericId));
        }
        let digits = &after_at[..digits_len];
        let id: TextId = digits
            .parse()
            .map_err(|_| self.error(ParseErrorKind::InvalidIdNumber(digits.to_string())))?;

        let rest = &after_at[digits_len..];
        let Some(eq) = rest.find('=') else {
            return Err(self.error(ParseErrorKind::ExpectedEquals));
        };
        let literal = rest[eq + 1..].trim_start();

        let Some(delimiter) = literal.chars().next().filter(|c| STRING_TABLE_QUOTES.contains(c))
        else {
            return Err(self.error(ParseErrorKind::ExpectedLiteral));
        };
        let body = &literal[delimiter.len_utf8()..];

        match body.find(delimiter) {
            Some(end) => {
                let open = OpenLiteral {
                    id,
                    delimiter,
                    retained: true,
                    buf: body[..end].to_string(),
                };
                self.close_literal(open, &body[end + delimiter.len_utf8()..])
            }
            None => {
                let mut buf = body.to_string();
                buf.push('\n');
                self.mode = Mode::ReadingMultilineLiteral(OpenLiteral {
                    id,
                    delimiter,
                    retained: true,
                    buf,
                });
                Ok(())
            }
        }
    }

    /// Store a completed literal, then look for a second variant opening in `tail`.
    fn close_literal(&mut self, open: OpenLiteral, tail: &str) -> Result<(), ParseError> {
        if !open.retained {
            return Ok(());
        }

        let id = open.id;
        if self.table.insert(id, open.buf).is_err() {
            return Err(self.error(ParseErrorKind::DuplicateStringId(id)));
        }

        let tail = tail.trim_start();
        if let Some(delimiter) = tail.chars().next().filter(|c| STRING_TABLE_QUOTES.contains(c)) {
            let body = &tail[delimiter.len_utf8()..];
            if !body.contains(delimiter) {
                self.mode = Mode::ReadingMultilineLiteral(OpenLiteral {
                    id,
                    delimiter,
                    retained: false,
                    buf: String::new(),
                });
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<StringTable, ParseError> {
        if let Mode::ReadingMultilineLiteral(open) = &self.mode {
            return Err(self.error(ParseErrorKind::UnterminatedLiteral(open.id)));
        }
        log::debug!("{}: {} strings", self.file_name, self.table.len());
        Ok(self.table)
    }
}
