use std::collections::VecDeque;

use crate::comment::{Comment, CommentPosition};
use crate::libyaml::macros::{is_alpha, is_blank, is_blankz, is_break, is_breakz};
use crate::libyaml::{Encoding, Mark, Reader, ReaderError, ScannerError, Token, TokenData};

/// Indentation-stack depth and flow-nesting depth guard. A hand-authored
/// document should never need this much nesting; a runaway generator or a
/// hostile input might, so both are bounded.
const MAX_NESTING_DEPTH: usize = 10_000;
/// A simple key candidate expires if its value indicator has not appeared
/// within this many scanned characters on the same line.
const MAX_SIMPLE_KEY_LENGTH: usize = 1024;

/// Bookkeeping for a potential "simple key" (an unquoted mapping key that
/// is recognized retroactively once a `:` is seen after it).
#[derive(Copy, Clone)]
#[non_exhaustive]
pub struct SimpleKey {
    pub possible: bool,
    pub required: bool,
    pub token_number: usize,
    pub mark: Mark,
}

impl Default for SimpleKey {
    fn default() -> Self {
        SimpleKey {
            possible: false,
            required: false,
            token_number: 0,
            mark: Mark::default(),
        }
    }
}

/// Converts a decoded character stream into a flat token sequence,
/// resolving YAML's indentation-sensitive block structure and simple-key
/// lookahead as it goes.
#[non_exhaustive]
pub struct Scanner<'r> {
    reader: Reader<'r>,
    mark: Mark,
    stream_start_produced: bool,
    stream_end_produced: bool,
    flow_level: usize,
    tokens: VecDeque<Token>,
    tokens_parsed: usize,
    indents: Vec<i64>,
    indent: i64,
    simple_key_allowed: bool,
    simple_keys: Vec<SimpleKey>,
    /// Comments seen between tokens, in source order. Drained by the
    /// parser/composer layer; the scanner itself never inspects them
    /// past classifying whether a line already had content before one.
    comments: VecDeque<Comment>,
}

impl<'r> Scanner<'r> {
    pub fn new(reader: Reader<'r>) -> Self {
        Scanner {
            reader,
            mark: Mark::default(),
            stream_start_produced: false,
            stream_end_produced: false,
            flow_level: 0,
            tokens: VecDeque::with_capacity(16),
            tokens_parsed: 0,
            indents: Vec::with_capacity(16),
            indent: -1,
            simple_key_allowed: false,
            simple_keys: vec![SimpleKey::default()],
            comments: VecDeque::new(),
        }
    }

    /// Drains every comment scanned so far, in source order. The caller
    /// (the composer) is responsible for classifying `Head` comments
    /// that turn out to sit immediately before a collection closes as
    /// `Foot` comments instead — the scanner has no notion of
    /// collections.
    pub(crate) fn take_comments(&mut self) -> Vec<Comment> {
        self.comments.drain(..).collect()
    }

    /// Produce the next token, or `None` once STREAM-END has been returned.
    pub fn next_token(&mut self) -> Result<Option<Token>, ScannerError> {
        if self.stream_end_produced && self.tokens.is_empty() {
            return Ok(None);
        }
        self.fetch_more_tokens()?;
        let token = self.tokens.pop_front();
        if token.is_some() {
            self.tokens_parsed += 1;
        }
        Ok(token)
    }

    fn peek(&mut self, offset: usize) -> Result<Option<char>, ScannerError> {
        self.reader.update_buffer(offset + 1)?;
        Ok(self.reader.buffer.get(offset).copied())
    }

    fn peek0(&mut self) -> Result<Option<char>, ScannerError> {
        self.peek(0)
    }

    fn skip(&mut self) -> Result<(), ScannerError> {
        let ch = self.reader.buffer.pop_front();
        if let Some(ch) = ch {
            self.mark.index += 1;
            if is_break(Some(ch)) {
                self.mark.line += 1;
                self.mark.column = 0;
            } else {
                self.mark.column += 1;
            }
        }
        Ok(())
    }

    fn skip_line(&mut self) -> Result<(), ScannerError> {
        if self.peek0()? == Some('\r') && self.peek(1)? == Some('\n') {
            self.skip()?;
            self.skip()?;
        } else if is_break(self.peek0()?) {
            self.skip()?;
        }
        Ok(())
    }

    fn read_string(&mut self, string: &mut String) -> Result<(), ScannerError> {
        if let Some(ch) = self.peek0()? {
            string.push(ch);
        }
        self.skip()
    }

    fn read_line_string(&mut self, string: &mut String) -> Result<(), ScannerError> {
        if self.peek0()? == Some('\r') && self.peek(1)? == Some('\n') {
            string.push('\n');
            self.skip()?;
            self.skip()?;
        } else if let Some(ch) = self.peek0().ok().flatten().filter(|c| is_break(Some(*c))) {
            string.push(if ch == '\r' { '\n' } else { ch });
            self.skip()?;
        }
        Ok(())
    }

    fn problem(&self, problem: &'static str) -> ScannerError {
        ScannerError::Problem {
            context: "while scanning a token",
            context_mark: self.mark,
            problem,
            problem_mark: self.mark,
        }
    }

    fn fetch_more_tokens(&mut self) -> Result<(), ScannerError> {
        loop {
            if !self.tokens.is_empty() {
                let needs_more = {
                    self.stale_simple_keys()?;
                    let next_possible = self
                        .simple_keys
                        .last()
                        .map(|k| k.possible && k.token_number == self.tokens_parsed + self.tokens.len())
                        .unwrap_or(false);
                    next_possible
                };
                if !needs_more {
                    return Ok(());
                }
            }
            self.fetch_next_token()?;
            if self.tokens.is_empty() {
                continue;
            }
            return Ok(());
        }
    }

    fn fetch_next_token(&mut self) -> Result<(), ScannerError> {
        if !self.stream_start_produced {
            self.fetch_stream_start()?;
            return Ok(());
        }

        self.scan_to_next_token()?;
        self.stale_simple_keys()?;
        self.unroll_indent(self.mark.column as i64)?;

        let Some(ch) = self.peek0()? else {
            self.fetch_stream_end()?;
            return Ok(());
        };

        if self.mark.column == 0 && ch == '%' {
            return self.fetch_directive();
        }
        if self.mark.column == 0 && self.at_document_indicator("---")? {
            return self.fetch_document_indicator(TokenData::DocumentStart);
        }
        if self.mark.column == 0 && self.at_document_indicator("...")? {
            return self.fetch_document_indicator(TokenData::DocumentEnd);
        }
        match ch {
            '[' => self.fetch_flow_collection_start(TokenData::FlowSequenceStart),
            '{' => self.fetch_flow_collection_start(TokenData::FlowMappingStart),
            ']' => self.fetch_flow_collection_end(TokenData::FlowSequenceEnd),
            '}' => self.fetch_flow_collection_end(TokenData::FlowMappingEnd),
            ',' => self.fetch_flow_entry(),
            '-' if is_blankz(self.peek(1)?) => self.fetch_block_entry(),
            '?' if self.flow_level > 0 || is_blankz(self.peek(1)?) => self.fetch_key(),
            ':' if self.flow_level > 0 || is_blankz(self.peek(1)?) => self.fetch_value(),
            '*' => self.fetch_anchor(true),
            '&' => self.fetch_anchor(false),
            '!' => self.fetch_tag(),
            '|' if self.flow_level == 0 => self.fetch_block_scalar(false),
            '>' if self.flow_level == 0 => self.fetch_block_scalar(true),
            '\'' => self.fetch_flow_scalar(true),
            '"' => self.fetch_flow_scalar(false),
            _ if self.is_plain_scalar_start(ch)? => self.fetch_plain_scalar(),
            _ => Err(self.problem("found character that cannot start any token")),
        }
    }

    fn at_document_indicator(&mut self, indicator: &str) -> Result<bool, ScannerError> {
        for (i, expected) in indicator.chars().enumerate() {
            if self.peek(i)? != Some(expected) {
                return Ok(false);
            }
        }
        Ok(is_blankz(self.peek(indicator.len())?))
    }

    fn is_plain_scalar_start(&mut self, ch: char) -> Result<bool, ScannerError> {
        if matches!(ch, ',' | '[' | ']' | '{' | '}') {
            return Ok(false);
        }
        match ch {
            '-' | '?' | ':' => Ok(!is_blankz(self.peek(1)?)),
            '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@' | '`' => Ok(false),
            _ => Ok(true),
        }
    }

    fn scan_to_next_token(&mut self) -> Result<(), ScannerError> {
        loop {
            let line_has_content = self.mark.column > 0;
            while self.peek0()? == Some(' ') {
                self.skip()?;
            }
            while is_blank(self.peek0()?) {
                self.skip()?;
            }
            if self.peek0()? == Some('#') {
                let start_mark = self.mark;
                self.skip()?;
                let mut text = String::new();
                while !is_breakz(self.peek0()?) {
                    self.read_string(&mut text)?;
                }
                let position = if line_has_content {
                    CommentPosition::Line
                } else {
                    CommentPosition::Head
                };
                self.comments.push_back(Comment {
                    text: text.trim_start_matches(' ').to_owned(),
                    position,
                    mark: start_mark,
                });
            }
            if is_break(self.peek0()?) {
                self.skip_line()?;
                if self.flow_level == 0 {
                    self.simple_key_allowed = true;
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn stale_simple_keys(&mut self) -> Result<(), ScannerError> {
        for key in &mut self.simple_keys {
            if key.possible
                && (key.mark.line < self.mark.line
                    || self.mark.index.saturating_sub(key.mark.index) as usize
                        > MAX_SIMPLE_KEY_LENGTH)
            {
                if key.required {
                    return Err(ScannerError::Problem {
                        context: "while scanning a simple key",
                        context_mark: key.mark,
                        problem: "could not find expected ':'",
                        problem_mark: self.mark,
                    });
                }
                key.possible = false;
            }
        }
        Ok(())
    }

    fn save_simple_key(&mut self) -> Result<(), ScannerError> {
        let required = self.flow_level == 0 && self.indent == self.mark.column as i64;
        if self.simple_key_allowed {
            self.remove_simple_key()?;
            let key = SimpleKey {
                possible: true,
                required,
                token_number: self.tokens_parsed + self.tokens.len(),
                mark: self.mark,
            };
            *self.simple_keys.last_mut().expect("always at least one level") = key;
        }
        Ok(())
    }

    fn remove_simple_key(&mut self) -> Result<(), ScannerError> {
        let key = self.simple_keys.last_mut().expect("always at least one level");
        if key.possible && key.required {
            return Err(ScannerError::Problem {
                context: "while scanning a simple key",
                context_mark: key.mark,
                problem: "could not find expected ':'",
                problem_mark: self.mark,
            });
        }
        key.possible = false;
        Ok(())
    }

    fn increase_flow_level(&mut self) -> Result<(), ScannerError> {
        self.simple_keys.push(SimpleKey::default());
        self.flow_level += 1;
        if self.flow_level > MAX_NESTING_DEPTH {
            return Err(self.problem("too many nested flow collections"));
        }
        Ok(())
    }

    fn decrease_flow_level(&mut self) {
        if self.flow_level > 0 {
            self.flow_level -= 1;
            self.simple_keys.pop();
        }
    }

    fn roll_indent(
        &mut self,
        column: i64,
        token_number: Option<usize>,
        data: TokenData,
        mark: Mark,
    ) -> Result<(), ScannerError> {
        if self.flow_level > 0 {
            return Ok(());
        }
        if self.indent < column {
            if self.indents.len() >= MAX_NESTING_DEPTH {
                return Err(self.problem("too many nested indentation levels"));
            }
            self.indents.push(self.indent);
            self.indent = column;
            let token = Token {
                data,
                start_mark: mark,
                end_mark: mark,
            };
            match token_number {
                Some(n) => {
                    let at = n.saturating_sub(self.tokens_parsed).min(self.tokens.len());
                    self.tokens.insert(at, token);
                }
                None => self.tokens.push_back(token),
            }
        }
        Ok(())
    }

    fn unroll_indent(&mut self, column: i64) -> Result<(), ScannerError> {
        if self.flow_level > 0 {
            return Ok(());
        }
        while self.indent > column {
            self.indent = self.indents.pop().unwrap_or(-1);
            self.tokens.push_back(Token {
                data: TokenData::BlockEnd,
                start_mark: self.mark,
                end_mark: self.mark,
            });
        }
        Ok(())
    }

    fn fetch_stream_start(&mut self) -> Result<(), ScannerError> {
        self.indent = -1;
        self.simple_key_allowed = true;
        self.stream_start_produced = true;
        self.tokens.push_back(Token {
            data: TokenData::StreamStart {
                encoding: self.reader.encoding,
            },
            start_mark: self.mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn fetch_stream_end(&mut self) -> Result<(), ScannerError> {
        self.unroll_indent(-1)?;
        self.remove_simple_key()?;
        self.simple_key_allowed = false;
        self.stream_end_produced = true;
        self.tokens.push_back(Token {
            data: TokenData::StreamEnd,
            start_mark: self.mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn fetch_directive(&mut self) -> Result<(), ScannerError> {
        self.unroll_indent(-1)?;
        self.remove_simple_key()?;
        self.simple_key_allowed = false;
        let start_mark = self.mark;
        self.skip()?;
        let mut name = String::new();
        while is_alpha(self.peek0()?) {
            self.read_string(&mut name)?;
        }
        let data = if name == "YAML" {
            self.skip_blanks()?;
            let major = self.scan_version_number()?;
            if self.peek0()? != Some('.') {
                return Err(self.problem("while scanning a %YAML directive, did not find expected digit or '.' character"));
            }
            self.skip()?;
            let minor = self.scan_version_number()?;
            TokenData::VersionDirective { major, minor }
        } else if name == "TAG" {
            self.skip_blanks()?;
            let handle = self.scan_tag_handle()?;
            self.skip_blanks()?;
            let prefix = self.scan_tag_prefix()?;
            TokenData::TagDirective { handle, prefix }
        } else {
            return Err(self.problem("found unknown directive name"));
        };
        while is_blank(self.peek0()?) {
            self.skip()?;
        }
        if self.peek0()? == Some('#') {
            while !is_breakz(self.peek0()?) {
                self.skip()?;
            }
        }
        if !is_breakz(self.peek0()?) {
            return Err(self.problem("did not find expected comment or line break"));
        }
        self.skip_line()?;
        self.tokens.push_back(Token {
            data,
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn skip_blanks(&mut self) -> Result<(), ScannerError> {
        while is_blank(self.peek0()?) {
            self.skip()?;
        }
        Ok(())
    }

    fn scan_version_number(&mut self) -> Result<i32, ScannerError> {
        const MAX_NUMBER_LENGTH: usize = 9;
        let mut value = 0i32;
        let mut length = 0;
        while let Some(ch) = self.peek0()?.filter(|c| c.is_ascii_digit()) {
            length += 1;
            if length > MAX_NUMBER_LENGTH {
                return Err(self.problem("found extremely long version number"));
            }
            value = value * 10 + ch.to_digit(10).expect("checked ascii digit") as i32;
            self.skip()?;
        }
        if length == 0 {
            return Err(self.problem("did not find expected version number"));
        }
        Ok(value)
    }

    fn scan_tag_handle(&mut self) -> Result<String, ScannerError> {
        if self.peek0()? != Some('!') {
            return Err(self.problem("while scanning a tag, did not find expected '!'"));
        }
        let mut handle = String::from('!');
        self.skip()?;
        while is_alpha(self.peek0()?) {
            self.read_string(&mut handle)?;
        }
        if self.peek0()? == Some('!') {
            self.read_string(&mut handle)?;
        }
        Ok(handle)
    }

    fn scan_tag_prefix(&mut self) -> Result<String, ScannerError> {
        let mut prefix = String::new();
        while let Some(ch) = self.peek0()? {
            if is_blankz(Some(ch)) {
                break;
            }
            if ch == '%' {
                prefix.push(self.scan_uri_escape()?);
            } else {
                prefix.push(ch);
                self.skip()?;
            }
        }
        if prefix.is_empty() {
            return Err(self.problem("while parsing a tag, did not find expected tag URI"));
        }
        Ok(prefix)
    }

    fn scan_uri_escape(&mut self) -> Result<char, ScannerError> {
        self.skip()?;
        let mut code = 0u32;
        for _ in 0..2 {
            let Some(ch) = self.peek0()?.and_then(|c| c.to_digit(16)) else {
                return Err(self.problem("while parsing a tag, did not find URI escaped octet"));
            };
            code = code * 16 + ch;
            self.skip()?;
        }
        char::from_u32(code).ok_or_else(|| self.problem("while parsing a tag, found invalid URI escape"))
    }

    fn fetch_document_indicator(&mut self, data: TokenData) -> Result<(), ScannerError> {
        self.unroll_indent(-1)?;
        self.remove_simple_key()?;
        self.simple_key_allowed = false;
        let start_mark = self.mark;
        self.skip()?;
        self.skip()?;
        self.skip()?;
        self.tokens.push_back(Token {
            data,
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn fetch_flow_collection_start(&mut self, data: TokenData) -> Result<(), ScannerError> {
        self.save_simple_key()?;
        self.increase_flow_level()?;
        self.simple_key_allowed = true;
        let start_mark = self.mark;
        self.skip()?;
        self.tokens.push_back(Token {
            data,
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn fetch_flow_collection_end(&mut self, data: TokenData) -> Result<(), ScannerError> {
        self.remove_simple_key()?;
        self.decrease_flow_level();
        self.simple_key_allowed = false;
        let start_mark = self.mark;
        self.skip()?;
        self.tokens.push_back(Token {
            data,
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn fetch_flow_entry(&mut self) -> Result<(), ScannerError> {
        self.remove_simple_key()?;
        self.simple_key_allowed = true;
        let start_mark = self.mark;
        self.skip()?;
        self.tokens.push_back(Token {
            data: TokenData::FlowEntry,
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn fetch_block_entry(&mut self) -> Result<(), ScannerError> {
        if self.flow_level == 0 {
            if !self.simple_key_allowed {
                return Err(self.problem("block sequence entries are not allowed in this context"));
            }
            let column = self.mark.column as i64;
            let mark = self.mark;
            let token_number = self.tokens_parsed + self.tokens.len();
            self.roll_indent(column, Some(token_number), TokenData::BlockSequenceStart, mark)?;
        }
        self.remove_simple_key()?;
        self.simple_key_allowed = true;
        let start_mark = self.mark;
        self.skip()?;
        self.tokens.push_back(Token {
            data: TokenData::BlockEntry,
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn fetch_key(&mut self) -> Result<(), ScannerError> {
        if self.flow_level == 0 {
            if !self.simple_key_allowed {
                return Err(self.problem("mapping keys are not allowed in this context"));
            }
            let column = self.mark.column as i64;
            let mark = self.mark;
            let token_number = self.tokens_parsed + self.tokens.len();
            self.roll_indent(column, Some(token_number), TokenData::BlockMappingStart, mark);
        }
        self.remove_simple_key()?;
        self.simple_key_allowed = self.flow_level == 0;
        let start_mark = self.mark;
        self.skip()?;
        self.tokens.push_back(Token {
            data: TokenData::Key,
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn fetch_value(&mut self) -> Result<(), ScannerError> {
        let simple_key = *self.simple_keys.last().expect("always at least one level");
        if simple_key.possible {
            let key = Token {
                data: TokenData::Key,
                start_mark: simple_key.mark,
                end_mark: simple_key.mark,
            };
            let at = simple_key
                .token_number
                .saturating_sub(self.tokens_parsed)
                .min(self.tokens.len());
            self.tokens.insert(at, key);
            if self.flow_level == 0 {
                self.roll_indent(
                    simple_key.mark.column as i64,
                    Some(simple_key.token_number),
                    TokenData::BlockMappingStart,
                    simple_key.mark,
                );
            }
            self.simple_keys.last_mut().expect("always at least one level").possible = false;
            self.simple_key_allowed = false;
        } else {
            if self.flow_level == 0 {
                if !self.simple_key_allowed {
                    return Err(self.problem("mapping values are not allowed in this context"));
                }
                let column = self.mark.column as i64;
                let mark = self.mark;
                let token_number = self.tokens_parsed + self.tokens.len();
                self.roll_indent(column, Some(token_number), TokenData::BlockMappingStart, mark);
            }
            self.simple_key_allowed = self.flow_level == 0;
        }
        let start_mark = self.mark;
        self.skip()?;
        self.tokens.push_back(Token {
            data: TokenData::Value,
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn fetch_anchor(&mut self, is_alias: bool) -> Result<(), ScannerError> {
        self.save_simple_key()?;
        self.simple_key_allowed = false;
        let start_mark = self.mark;
        self.skip()?;
        let mut value = String::new();
        while is_alpha(self.peek0()?) {
            self.read_string(&mut value)?;
        }
        if value.is_empty() {
            return Err(self.problem("while scanning an anchor or alias, did not find expected alphabetic or numeric character"));
        }
        let data = if is_alias {
            TokenData::Alias { value }
        } else {
            TokenData::Anchor { value }
        };
        self.tokens.push_back(Token {
            data,
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn fetch_tag(&mut self) -> Result<(), ScannerError> {
        self.save_simple_key()?;
        self.simple_key_allowed = false;
        let start_mark = self.mark;
        self.skip()?;

        let (handle, suffix) = if self.peek0()? == Some('<') {
            self.skip()?;
            let mut suffix = String::new();
            while self.peek0()? != Some('>') {
                if is_breakz(self.peek0()?) {
                    return Err(self.problem("while scanning a tag, did not find expected '>'"));
                }
                if self.peek0()? == Some('%') {
                    suffix.push(self.scan_uri_escape()?);
                } else {
                    suffix.push(self.peek0()?.expect("checked not breakz"));
                    self.skip()?;
                }
            }
            self.skip()?;
            (String::new(), suffix)
        } else if self.peek0()? == Some('!') {
            let handle = self.scan_tag_handle()?;
            let mut suffix = String::new();
            while !is_blankz(self.peek0()?) && !matches!(self.peek0()?, Some(',' | '[' | ']' | '{' | '}')) {
                if self.peek0()? == Some('%') {
                    suffix.push(self.scan_uri_escape()?);
                } else {
                    suffix.push(self.peek0()?.expect("checked present"));
                    self.skip()?;
                }
            }
            (handle, suffix)
        } else {
            self.skip()?;
            let mut suffix = String::new();
            while !is_blankz(self.peek0()?) && !matches!(self.peek0()?, Some(',' | '[' | ']' | '{' | '}')) {
                if self.peek0()? == Some('%') {
                    suffix.push(self.scan_uri_escape()?);
                } else {
                    suffix.push(self.peek0()?.expect("checked present"));
                    self.skip()?;
                }
            }
            (String::from('!'), suffix)
        };

        self.tokens.push_back(Token {
            data: TokenData::Tag { handle, suffix },
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn fetch_block_scalar(&mut self, folded: bool) -> Result<(), ScannerError> {
        self.remove_simple_key()?;
        self.simple_key_allowed = true;
        let start_mark = self.mark;
        self.skip()?;

        let mut chomping: i8 = 0; // -1 strip, 0 clip, 1 keep
        let mut increment = 0i64;
        if matches!(self.peek0()?, Some('+' | '-')) {
            chomping = if self.peek0()? == Some('+') { 1 } else { -1 };
            self.skip()?;
            if let Some(d) = self.peek0()?.and_then(|c| c.to_digit(10)) {
                increment = i64::from(d);
                self.skip()?;
            }
        } else if let Some(d) = self.peek0()?.and_then(|c| c.to_digit(10)) {
            increment = i64::from(d);
            self.skip()?;
            if matches!(self.peek0()?, Some('+' | '-')) {
                chomping = if self.peek0()? == Some('+') { 1 } else { -1 };
                self.skip()?;
            }
        }
        while is_blank(self.peek0()?) {
            self.skip()?;
        }
        if self.peek0()? == Some('#') {
            while !is_breakz(self.peek0()?) {
                self.skip()?;
            }
        }
        if !is_breakz(self.peek0()?) {
            return Err(self.problem("did not find expected comment or line break"));
        }
        self.skip_line()?;

        let mut value = String::new();
        let mut max_indent = 0i64;
        let mut block_indent: Option<i64> = if increment > 0 {
            Some(self.indent.max(0) + increment)
        } else {
            None
        };
        let mut leading_blank;
        let mut trailing_blanks = 0usize;
        let mut first_line = true;

        loop {
            // measure leading spaces of this line to find/confirm block indent
            let mut column = 0i64;
            while self.peek0()? == Some(' ') {
                self.skip()?;
                column += 1;
            }
            max_indent = max_indent.max(column);
            if block_indent.is_none() && !is_breakz(self.peek0()?) {
                block_indent = Some(column.max(self.indent.max(0) + 1));
            }
            let indent = block_indent.unwrap_or(self.indent.max(0) + 1);
            if column < indent && !is_breakz(self.peek0()?) {
                break;
            }
            leading_blank = is_break(self.peek0()?);
            if is_breakz(self.peek0()?) {
                // blank line
                trailing_blanks += 1;
                self.read_line_string(&mut value)?;
                value.pop();
                continue;
            }
            // consume extra indent spaces beyond the block indent as content
            for _ in 0..(column - indent).max(0) {
                value.push(' ');
            }
            if !first_line {
                if folded && !leading_blank && trailing_blanks == 0 {
                    value.push(' ');
                } else {
                    for _ in 0..trailing_blanks.max(if folded { 0 } else { 1 }) {
                        value.push('\n');
                    }
                    if trailing_blanks == 0 && !folded {
                        value.push('\n');
                    }
                }
            }
            trailing_blanks = 0;
            first_line = false;
            while !is_breakz(self.peek0()?) {
                self.read_string(&mut value)?;
            }
            if is_breakz(self.peek0()?) && self.peek0()?.is_some() {
                self.read_line_string(&mut value)?;
                value.pop();
                trailing_blanks += 1;
            }
            if self.peek0()?.is_none() {
                break;
            }
        }

        match chomping {
            1 => {
                for _ in 0..trailing_blanks {
                    value.push('\n');
                }
                if trailing_blanks == 0 {
                    value.push('\n');
                }
            }
            0 => value.push('\n'),
            _ => {}
        }

        self.tokens.push_back(Token {
            data: TokenData::Scalar {
                value,
                style: if folded {
                    crate::libyaml::ScalarStyle::Folded
                } else {
                    crate::libyaml::ScalarStyle::Literal
                },
            },
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn fetch_flow_scalar(&mut self, single: bool) -> Result<(), ScannerError> {
        self.save_simple_key()?;
        self.simple_key_allowed = false;
        let start_mark = self.mark;
        self.skip()?;
        let mut value = String::new();

        loop {
            while !matches!(self.peek0()?, None | Some('\'' | '"')) && !is_blankz(self.peek0()?) {
                if !single && self.peek0()? == Some('\\') && is_break(self.peek(1)?) {
                    self.skip()?;
                    self.skip_line()?;
                    continue;
                }
                if !single && self.peek0()? == Some('\\') {
                    self.skip()?;
                    value.push(self.scan_escape()?);
                    continue;
                }
                if single && self.peek0()? == Some('\'') && self.peek(1)? == Some('\'') {
                    value.push('\'');
                    self.skip()?;
                    self.skip()?;
                    continue;
                }
                value.push(self.peek0()?.expect("checked present"));
                self.skip()?;
            }
            match self.peek0()? {
                Some(q) if (single && q == '\'') || (!single && q == '"') => {
                    self.skip()?;
                    break;
                }
                None => return Err(self.problem("while scanning a quoted scalar, found unexpected end of stream")),
                _ => {
                    // run of blanks/line breaks, folded per YAML flow-scalar rules
                    let mut blanks = String::new();
                    while is_blank(self.peek0()?) {
                        self.read_string(&mut blanks)?;
                    }
                    if is_break(self.peek0()?) {
                        self.skip_line()?;
                        let mut breaks = 0usize;
                        loop {
                            while is_blank(self.peek0()?) {
                                self.skip()?;
                            }
                            if is_break(self.peek0()?) {
                                self.skip_line()?;
                                breaks += 1;
                            } else {
                                break;
                            }
                        }
                        if breaks == 0 {
                            value.push(' ');
                        } else {
                            for _ in 0..breaks {
                                value.push('\n');
                            }
                        }
                    } else {
                        value.push_str(&blanks);
                    }
                }
            }
        }

        self.tokens.push_back(Token {
            data: TokenData::Scalar {
                value,
                style: if single {
                    crate::libyaml::ScalarStyle::SingleQuoted
                } else {
                    crate::libyaml::ScalarStyle::DoubleQuoted
                },
            },
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }

    fn scan_escape(&mut self) -> Result<char, ScannerError> {
        let Some(ch) = self.peek0()? else {
            return Err(self.problem("found unexpected end of stream while scanning an escape"));
        };
        self.skip()?;
        Ok(match ch {
            '0' => '\0',
            'a' => '\u{7}',
            'b' => '\u{8}',
            't' | '\t' => '\t',
            'n' => '\n',
            'v' => '\u{b}',
            'f' => '\u{c}',
            'r' => '\r',
            'e' => '\u{1b}',
            ' ' => ' ',
            '"' => '"',
            '\'' => '\'',
            '\\' => '\\',
            'N' => '\u{85}',
            '_' => '\u{a0}',
            'L' => '\u{2028}',
            'P' => '\u{2029}',
            'x' => self.scan_hex_escape(2)?,
            'u' => self.scan_hex_escape(4)?,
            'U' => self.scan_hex_escape(8)?,
            _ => return Err(self.problem("found unknown escape character")),
        })
    }

    fn scan_hex_escape(&mut self, digits: usize) -> Result<char, ScannerError> {
        let mut code = 0u32;
        for _ in 0..digits {
            let Some(d) = self.peek0()?.and_then(|c| c.to_digit(16)) else {
                return Err(self.problem("did not find expected hexadecimal number"));
            };
            code = code * 16 + d;
            self.skip()?;
        }
        char::from_u32(code).ok_or_else(|| self.problem("found invalid Unicode character escape code"))
    }

    fn fetch_plain_scalar(&mut self) -> Result<(), ScannerError> {
        self.save_simple_key()?;
        self.simple_key_allowed = false;
        let start_mark = self.mark;
        let mut value = String::new();
        let indent = self.indent + 1;

        loop {
            if self.mark.column == 0 && (self.at_document_indicator("---")? || self.at_document_indicator("...")?) {
                break;
            }
            if self.flow_level > 0 && matches!(self.peek0()?, Some(',' | '[' | ']' | '{' | '}')) {
                break;
            }
            if self.peek0()? == Some(':') && (self.flow_level > 0 || is_blankz(self.peek(1)?)) {
                break;
            }
            if self.peek0()? == Some('#') && matches!(value.chars().last(), Some(c) if is_blank(Some(c)) || c == '\0') {
                break;
            }
            while !is_blankz(self.peek0()?)
                && !(self.peek0()? == Some(':') && (self.flow_level > 0 || is_blankz(self.peek(1)?)))
                && !(self.flow_level > 0 && matches!(self.peek0()?, Some(',' | '[' | ']' | '{' | '}')))
            {
                value.push(self.peek0()?.expect("checked present"));
                self.skip()?;
            }
            if !is_blankz(self.peek0()?) {
                break;
            }
            let mut blanks = String::new();
            while is_blank(self.peek0()?) {
                self.read_string(&mut blanks)?;
            }
            if is_break(self.peek0()?) {
                self.skip_line()?;
                if (self.mark.column as i64) < indent {
                    break;
                }
                let mut breaks = 0usize;
                loop {
                    while self.peek0()? == Some(' ') {
                        self.skip()?;
                    }
                    if is_break(self.peek0()?) {
                        self.skip_line()?;
                        breaks += 1;
                    } else {
                        break;
                    }
                }
                if (self.mark.column as i64) < indent || self.peek0().ok().flatten().is_none() {
                    break;
                }
                if breaks == 0 {
                    value.push(' ');
                } else {
                    for _ in 0..breaks {
                        value.push('\n');
                    }
                }
            } else {
                value.push_str(&blanks);
            }
        }

        self.tokens.push_back(Token {
            data: TokenData::Scalar {
                value,
                style: crate::libyaml::ScalarStyle::Plain,
            },
            start_mark,
            end_mark: self.mark,
        });
        Ok(())
    }
}
