use super::reader::Reader;
use super::scanner::Scanner;
use crate::libyaml::{
    Event as RawEvent, EventData as RawEventData, MappingStyle, Mark, ParserError, SequenceStyle,
    TagDirective, Token, TokenData, VersionDirective,
};
pub use crate::libyaml::ScalarStyle;
use crate::libyaml::tag::Tag;

/// Drives a [`Scanner`] through the grammar productions of the YAML
/// spec, turning its flat token stream into a matched sequence of
/// parsing events (stream/document/node start and end markers).
#[non_exhaustive]
pub struct Parser<'r> {
    scanner: Scanner<'r>,
    lookahead: Option<Token>,
    stream_end_produced: bool,
    /// The parser states stack.
    states: Vec<ParserState>,
    /// The current parser state.
    state: ParserState,
    /// The stack of marks.
    marks: Vec<Mark>,
    /// The list of TAG directives.
    tag_directives: Vec<TagDirective>,
    /// The alias data.
    aliases: Vec<AliasData>,
}

/// This structure holds aliases data.
#[non_exhaustive]
pub struct AliasData {
    /// The anchor.
    pub anchor: String,
    /// The node id.
    pub index: i32,
    /// The anchor mark.
    pub mark: Mark,
}

/// The states of the parser.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub enum ParserState {
    /// Expect STREAM-START.
    #[default]
    StreamStart,
    /// Expect the beginning of an implicit document.
    ImplicitDocumentStart,
    /// Expect DOCUMENT-START.
    DocumentStart,
    /// Expect the content of a document.
    DocumentContent,
    /// Expect DOCUMENT-END.
    DocumentEnd,
    /// Expect a block node.
    BlockNode,
    /// Expect a block node or indentless sequence.
    BlockNodeOrIndentlessSequence,
    /// Expect a flow node.
    FlowNode,
    /// Expect the first entry of a block sequence.
    BlockSequenceFirstEntry,
    /// Expect an entry of a block sequence.
    BlockSequenceEntry,
    /// Expect an entry of an indentless sequence.
    IndentlessSequenceEntry,
    /// Expect the first key of a block mapping.
    BlockMappingFirstKey,
    /// Expect a block mapping key.
    BlockMappingKey,
    /// Expect a block mapping value.
    BlockMappingValue,
    /// Expect the first entry of a flow sequence.
    FlowSequenceFirstEntry,
    /// Expect an entry of a flow sequence.
    FlowSequenceEntry,
    /// Expect a key of an ordered mapping.
    FlowSequenceEntryMappingKey,
    /// Expect a value of an ordered mapping.
    FlowSequenceEntryMappingValue,
    /// Expect the end of an ordered mapping entry.
    FlowSequenceEntryMappingEnd,
    /// Expect the first key of a flow mapping.
    FlowMappingFirstKey,
    /// Expect a key of a flow mapping.
    FlowMappingKey,
    /// Expect a value of a flow mapping.
    FlowMappingValue,
    /// Expect an empty value of a flow mapping.
    FlowMappingEmptyValue,
    /// Expect nothing.
    End,
}

impl<'r> Parser<'r> {
    /// Create a parser reading from `input`, autodetecting its encoding.
    pub fn new(input: impl std::io::Read + 'r) -> Self {
        Parser {
            scanner: Scanner::new(Reader::new(input)),
            lookahead: None,
            stream_end_produced: false,
            states: Vec::with_capacity(16),
            state: ParserState::default(),
            marks: Vec::with_capacity(16),
            tag_directives: Vec::with_capacity(16),
            aliases: Vec::new(),
        }
    }

    fn peek_token(&mut self) -> Result<&Token, ParserError> {
        if self.lookahead.is_none() {
            self.lookahead = Some(
                self.scanner
                    .next_token()?
                    .ok_or(ParserError::UnexpectedEof)?,
            );
        }
        Ok(self.lookahead.as_ref().expect("just populated"))
    }

    fn peek_token_mut(&mut self) -> Result<&mut Token, ParserError> {
        if self.lookahead.is_none() {
            self.lookahead = Some(
                self.scanner
                    .next_token()?
                    .ok_or(ParserError::UnexpectedEof)?,
            );
        }
        Ok(self.lookahead.as_mut().expect("just populated"))
    }

    fn skip_token(&mut self) {
        let skipped = self.lookahead.take().expect("skip_token but no token peeked");
        if matches!(skipped.data, TokenData::StreamEnd) {
            self.stream_end_produced = true;
        }
    }

    /// Parse the input stream and produce the next parsing event.
    ///
    /// Call the function subsequently to produce a sequence of events
    /// corresponding to the input stream. The initial event has the type
    /// [`RawEventData::StreamStart`] while the ending event has the type
    /// [`RawEventData::StreamEnd`].
    pub fn parse(&mut self) -> Result<RawEvent, ParserError> {
        if self.stream_end_produced || self.state == ParserState::End {
            return Ok(RawEvent {
                data: RawEventData::StreamEnd,
                start_mark: Mark::default(),
                end_mark: Mark::default(),
            });
        }
        self.state_machine()
    }

    fn set_parser_error<T>(problem: &'static str, problem_mark: Mark) -> Result<T, ParserError> {
        Err(ParserError::Problem {
            problem,
            mark: problem_mark,
        })
    }

    fn set_parser_error_context<T>(
        context: &'static str,
        context_mark: Mark,
        problem: &'static str,
        problem_mark: Mark,
    ) -> Result<T, ParserError> {
        Err(ParserError::ProblemWithContext {
            context,
            context_mark,
            problem,
            mark: problem_mark,
        })
    }

    fn state_machine(&mut self) -> Result<RawEvent, ParserError> {
        match self.state {
            ParserState::StreamStart => self.parse_stream_start(),
            ParserState::ImplicitDocumentStart => self.parse_document_start(true),
            ParserState::DocumentStart => self.parse_document_start(false),
            ParserState::DocumentContent => self.parse_document_content(),
            ParserState::DocumentEnd => self.parse_document_end(),
            ParserState::BlockNode => self.parse_node(true, false),
            ParserState::BlockNodeOrIndentlessSequence => self.parse_node(true, true),
            ParserState::FlowNode => self.parse_node(false, false),
            ParserState::BlockSequenceFirstEntry => self.parse_block_sequence_entry(true),
            ParserState::BlockSequenceEntry => self.parse_block_sequence_entry(false),
            ParserState::IndentlessSequenceEntry => self.parse_indentless_sequence_entry(),
            ParserState::BlockMappingFirstKey => self.parse_block_mapping_key(true),
            ParserState::BlockMappingKey => self.parse_block_mapping_key(false),
            ParserState::BlockMappingValue => self.parse_block_mapping_value(),
            ParserState::FlowSequenceFirstEntry => self.parse_flow_sequence_entry(true),
            ParserState::FlowSequenceEntry => self.parse_flow_sequence_entry(false),
            ParserState::FlowSequenceEntryMappingKey => {
                self.parse_flow_sequence_entry_mapping_key()
            }
            ParserState::FlowSequenceEntryMappingValue => {
                self.parse_flow_sequence_entry_mapping_value()
            }
            ParserState::FlowSequenceEntryMappingEnd => {
                self.parse_flow_sequence_entry_mapping_end()
            }
            ParserState::FlowMappingFirstKey => self.parse_flow_mapping_key(true),
            ParserState::FlowMappingKey => self.parse_flow_mapping_key(false),
            ParserState::FlowMappingValue => self.parse_flow_mapping_value(false),
            ParserState::FlowMappingEmptyValue => self.parse_flow_mapping_value(true),
            ParserState::End => panic!("parser end state reached unexpectedly"),
        }
    }

    fn parse_stream_start(&mut self) -> Result<RawEvent, ParserError> {
        let token = self.peek_token()?;

        if let TokenData::StreamStart { encoding } = &token.data {
            let event = RawEvent {
                data: RawEventData::StreamStart {
                    encoding: *encoding,
                },
                start_mark: token.start_mark,
                end_mark: token.end_mark,
            };
            self.state = ParserState::ImplicitDocumentStart;
            self.skip_token();
            Ok(event)
        } else {
            let mark = token.start_mark;
            Self::set_parser_error("did not find expected <stream-start>", mark)
        }
    }

    fn parse_document_start(&mut self, implicit: bool) -> Result<RawEvent, ParserError> {
        let mut version_directive: Option<VersionDirective> = None;
        let mut tag_directives = vec![];

        let mut token = self.peek_token()?;
        if !implicit {
            while let TokenData::DocumentEnd = &token.data {
                self.skip_token();
                token = self.peek_token()?;
            }
        }
        if implicit
            && !matches!(
                token.data,
                TokenData::VersionDirective { .. }
                    | TokenData::TagDirective { .. }
                    | TokenData::DocumentStart
                    | TokenData::StreamEnd
            )
        {
            let event = RawEvent {
                data: RawEventData::DocumentStart {
                    version_directive: None,
                    tag_directives: vec![],
                    implicit: true,
                },
                start_mark: token.start_mark,
                end_mark: token.end_mark,
            };
            self.process_directives(None, None)?;
            self.states.push(ParserState::DocumentEnd);
            self.state = ParserState::BlockNode;
            Ok(event)
        } else if !matches!(token.data, TokenData::StreamEnd) {
            let end_mark: Mark;
            let start_mark: Mark = token.start_mark;
            self.process_directives(Some(&mut version_directive), Some(&mut tag_directives))?;
            token = self.peek_token()?;
            if let TokenData::DocumentStart = token.data {
                end_mark = token.end_mark;
                let event = RawEvent {
                    data: RawEventData::DocumentStart {
                        version_directive,
                        tag_directives: std::mem::take(&mut tag_directives),
                        implicit: false,
                    },
                    start_mark,
                    end_mark,
                };
                self.states.push(ParserState::DocumentEnd);
                self.state = ParserState::DocumentContent;
                self.skip_token();
                Ok(event)
            } else {
                Self::set_parser_error("did not find expected <document start>", token.start_mark)
            }
        } else {
            let event = RawEvent {
                data: RawEventData::StreamEnd,
                start_mark: token.start_mark,
                end_mark: token.end_mark,
            };
            self.state = ParserState::End;
            self.skip_token();
            Ok(event)
        }
    }

    fn parse_document_content(&mut self) -> Result<RawEvent, ParserError> {
        let token = self.peek_token()?;
        if let TokenData::VersionDirective { .. }
        | TokenData::TagDirective { .. }
        | TokenData::DocumentStart
        | TokenData::DocumentEnd
        | TokenData::StreamEnd = &token.data
        {
            let mark = token.start_mark;
            self.state = self.states.pop().expect("state stack not empty");
            Self::process_empty_scalar(mark)
        } else {
            self.parse_node(true, false)
        }
    }

    fn parse_document_end(&mut self) -> Result<RawEvent, ParserError> {
        let mut end_mark: Mark;
        let mut implicit = true;
        let token = self.peek_token()?;
        end_mark = token.start_mark;
        let start_mark: Mark = end_mark;
        if let TokenData::DocumentEnd = &token.data {
            end_mark = token.end_mark;
            self.skip_token();
            implicit = false;
        }
        self.tag_directives.clear();
        self.state = ParserState::DocumentStart;
        Ok(RawEvent {
            data: RawEventData::DocumentEnd { implicit },
            start_mark,
            end_mark,
        })
    }

    fn parse_node(&mut self, block: bool, indentless_sequence: bool) -> Result<RawEvent, ParserError> {
        let mut anchor: Option<String> = None;
        let mut tag_handle: Option<String> = None;
        let mut tag_suffix: Option<String> = None;
        let mut tag: Option<String> = None;
        let mut start_mark: Mark;
        let mut end_mark: Mark;
        let mut tag_mark = Mark::default();

        let mut token = self.peek_token_mut()?;

        if let TokenData::Alias { value } = &mut token.data {
            let event = RawEvent {
                data: RawEventData::Alias {
                    anchor: std::mem::take(value),
                },
                start_mark: token.start_mark,
                end_mark: token.end_mark,
            };
            self.state = self.states.pop().expect("state stack not empty");
            self.skip_token();
            return Ok(event);
        }

        end_mark = token.start_mark;
        start_mark = end_mark;
        if let TokenData::Anchor { value } = &mut token.data {
            anchor = Some(std::mem::take(value));
            start_mark = token.start_mark;
            end_mark = token.end_mark;
            self.skip_token();
            token = self.peek_token_mut()?;
            if let TokenData::Tag { handle, suffix } = &mut token.data {
                tag_handle = Some(std::mem::take(handle));
                tag_suffix = Some(std::mem::take(suffix));
                tag_mark = token.start_mark;
                end_mark = token.end_mark;
                self.skip_token();
            }
        } else if let TokenData::Tag { handle, suffix } = &mut token.data {
            tag_handle = Some(std::mem::take(handle));
            tag_suffix = Some(std::mem::take(suffix));
            tag_mark = token.start_mark;
            start_mark = tag_mark;
            end_mark = token.end_mark;
            self.skip_token();
            token = self.peek_token_mut()?;
            if let TokenData::Anchor { value } = &mut token.data {
                anchor = Some(std::mem::take(value));
                end_mark = token.end_mark;
                self.skip_token();
            }
        }

        if let Some(ref tag_handle_value) = tag_handle {
            if tag_handle_value.is_empty() {
                tag = tag_suffix;
            } else {
                for tag_directive in &self.tag_directives {
                    if tag_directive.handle == *tag_handle_value {
                        let suffix = tag_suffix.as_deref().unwrap_or("");
                        tag = Some(format!("{}{}", tag_directive.prefix, suffix));
                        break;
                    }
                }
                if tag.is_none() {
                    return Self::set_parser_error_context(
                        "while parsing a node",
                        start_mark,
                        "found undefined tag handle",
                        tag_mark,
                    );
                }
            }
        }

        let token = self.peek_token_mut()?;

        let implicit = tag.is_none() || tag.as_deref() == Some("");

        if indentless_sequence && matches!(token.data, TokenData::BlockEntry) {
            end_mark = token.end_mark;
            self.state = ParserState::IndentlessSequenceEntry;
            let event = RawEvent {
                data: RawEventData::SequenceStart {
                    anchor,
                    tag,
                    implicit,
                    style: SequenceStyle::Block,
                },
                start_mark,
                end_mark,
            };
            Ok(event)
        } else if let TokenData::Scalar { value, style } = &mut token.data {
            let mut plain_implicit = false;
            let mut quoted_implicit = false;
            end_mark = token.end_mark;
            if *style == ScalarStyle::Plain && tag.is_none() || tag.as_deref() == Some("!") {
                plain_implicit = true;
            } else if tag.is_none() {
                quoted_implicit = true;
            }
            let event = RawEvent {
                data: RawEventData::Scalar {
                    anchor,
                    tag,
                    value: std::mem::take(value),
                    plain_implicit,
                    quoted_implicit,
                    style: *style,
                },
                start_mark,
                end_mark,
            };
            self.state = self.states.pop().expect("state stack not empty");
            self.skip_token();
            return Ok(event);
        } else if let TokenData::FlowSequenceStart = &token.data {
            end_mark = token.end_mark;
            self.state = ParserState::FlowSequenceFirstEntry;
            Ok(RawEvent {
                data: RawEventData::SequenceStart {
                    anchor,
                    tag,
                    implicit,
                    style: SequenceStyle::Flow,
                },
                start_mark,
                end_mark,
            })
        } else if let TokenData::FlowMappingStart = &token.data {
            end_mark = token.end_mark;
            self.state = ParserState::FlowMappingFirstKey;
            Ok(RawEvent {
                data: RawEventData::MappingStart {
                    anchor,
                    tag,
                    implicit,
                    style: MappingStyle::Flow,
                },
                start_mark,
                end_mark,
            })
        } else if block && matches!(token.data, TokenData::BlockSequenceStart) {
            end_mark = token.end_mark;
            self.state = ParserState::BlockSequenceFirstEntry;
            Ok(RawEvent {
                data: RawEventData::SequenceStart {
                    anchor,
                    tag,
                    implicit,
                    style: SequenceStyle::Block,
                },
                start_mark,
                end_mark,
            })
        } else if block && matches!(token.data, TokenData::BlockMappingStart) {
            end_mark = token.end_mark;
            self.state = ParserState::BlockMappingFirstKey;
            Ok(RawEvent {
                data: RawEventData::MappingStart {
                    anchor,
                    tag,
                    implicit,
                    style: MappingStyle::Block,
                },
                start_mark,
                end_mark,
            })
        } else if anchor.is_some() || tag.is_some() {
            self.state = self.states.pop().expect("state stack not empty");
            Ok(RawEvent {
                data: RawEventData::Scalar {
                    anchor,
                    tag,
                    value: String::new(),
                    plain_implicit: implicit,
                    quoted_implicit: false,
                    style: ScalarStyle::Plain,
                },
                start_mark,
                end_mark,
            })
        } else {
            Self::set_parser_error_context(
                if block {
                    "while parsing a block node"
                } else {
                    "while parsing a flow node"
                },
                start_mark,
                "did not find expected node content",
                token.start_mark,
            )
        }
    }

    fn parse_block_sequence_entry(&mut self, first: bool) -> Result<RawEvent, ParserError> {
        if first {
            let mark = self.peek_token()?.start_mark;
            self.marks.push(mark);
            self.skip_token();
        }

        let mut token = self.peek_token()?;

        if let TokenData::BlockEntry = &token.data {
            let mark: Mark = token.end_mark;
            self.skip_token();
            token = self.peek_token()?;
            if matches!(token.data, TokenData::BlockEntry | TokenData::BlockEnd) {
                self.state = ParserState::BlockSequenceEntry;
                Self::process_empty_scalar(mark)
            } else {
                self.states.push(ParserState::BlockSequenceEntry);
                self.parse_node(true, false)
            }
        } else if let TokenData::BlockEnd = token.data {
            let event = RawEvent {
                data: RawEventData::SequenceEnd,
                start_mark: token.start_mark,
                end_mark: token.end_mark,
            };
            self.state = self.states.pop().expect("state stack not empty");
            let _ = self.marks.pop();
            self.skip_token();
            Ok(event)
        } else {
            let token_mark = token.start_mark;
            let mark = self.marks.pop().expect("mark stack not empty");
            Self::set_parser_error_context(
                "while parsing a block collection",
                mark,
                "did not find expected '-' indicator",
                token_mark,
            )
        }
    }

    fn parse_indentless_sequence_entry(&mut self) -> Result<RawEvent, ParserError> {
        let mut token = self.peek_token()?;
        if let TokenData::BlockEntry = token.data {
            let mark: Mark = token.end_mark;
            self.skip_token();
            token = self.peek_token()?;

            if matches!(
                token.data,
                TokenData::BlockEntry | TokenData::Key | TokenData::Value | TokenData::BlockEnd
            ) {
                self.state = ParserState::IndentlessSequenceEntry;
                Self::process_empty_scalar(mark)
            } else {
                self.states.push(ParserState::IndentlessSequenceEntry);
                self.parse_node(true, false)
            }
        } else {
            let event = RawEvent {
                data: RawEventData::SequenceEnd,
                start_mark: token.start_mark,
                end_mark: token.end_mark,
            };
            self.state = self.states.pop().expect("state stack not empty");
            Ok(event)
        }
    }

    fn parse_block_mapping_key(&mut self, first: bool) -> Result<RawEvent, ParserError> {
        if first {
            let mark = self.peek_token()?.start_mark;
            self.marks.push(mark);
            self.skip_token();
        }

        let mut token = self.peek_token()?;
        if let TokenData::Key = token.data {
            let mark: Mark = token.end_mark;
            self.skip_token();
            token = self.peek_token()?;
            if matches!(
                token.data,
                TokenData::Key | TokenData::Value | TokenData::BlockEnd
            ) {
                self.state = ParserState::BlockMappingValue;
                Self::process_empty_scalar(mark)
            } else {
                self.states.push(ParserState::BlockMappingValue);
                self.parse_node(true, true)
            }
        } else if let TokenData::BlockEnd = token.data {
            let event = RawEvent {
                data: RawEventData::MappingEnd,
                start_mark: token.start_mark,
                end_mark: token.end_mark,
            };
            self.state = self.states.pop().expect("state stack not empty");
            let _ = self.marks.pop();
            self.skip_token();
            Ok(event)
        } else {
            let token_mark = token.start_mark;
            let mark = self.marks.pop().expect("mark stack not empty");
            Self::set_parser_error_context(
                "while parsing a block mapping",
                mark,
                "did not find expected key",
                token_mark,
            )
        }
    }

    fn parse_block_mapping_value(&mut self) -> Result<RawEvent, ParserError> {
        let mut token = self.peek_token()?;
        if let TokenData::Value = token.data {
            let mark: Mark = token.end_mark;
            self.skip_token();
            token = self.peek_token()?;
            if matches!(
                token.data,
                TokenData::Key | TokenData::Value | TokenData::BlockEnd
            ) {
                self.state = ParserState::BlockMappingKey;
                Self::process_empty_scalar(mark)
            } else {
                self.states.push(ParserState::BlockMappingKey);
                self.parse_node(true, true)
            }
        } else {
            let mark = token.start_mark;
            self.state = ParserState::BlockMappingKey;
            Self::process_empty_scalar(mark)
        }
    }

    fn parse_flow_sequence_entry(&mut self, first: bool) -> Result<RawEvent, ParserError> {
        if first {
            let mark = self.peek_token()?.start_mark;
            self.marks.push(mark);
            self.skip_token();
        }

        let mut token = self.peek_token()?;
        if !matches!(token.data, TokenData::FlowSequenceEnd) {
            if !first {
                if let TokenData::FlowEntry = token.data {
                    self.skip_token();
                    token = self.peek_token()?;
                } else {
                    let token_mark = token.start_mark;
                    let mark = self.marks.pop().expect("mark stack not empty");
                    return Self::set_parser_error_context(
                        "while parsing a flow sequence",
                        mark,
                        "did not find expected ',' or ']'",
                        token_mark,
                    );
                }
            }
            if let TokenData::Key = token.data {
                let event = RawEvent {
                    data: RawEventData::MappingStart {
                        anchor: None,
                        tag: None,
                        implicit: true,
                        style: MappingStyle::Flow,
                    },
                    start_mark: token.start_mark,
                    end_mark: token.end_mark,
                };
                self.state = ParserState::FlowSequenceEntryMappingKey;
                self.skip_token();
                return Ok(event);
            } else if !matches!(token.data, TokenData::FlowSequenceEnd) {
                self.states.push(ParserState::FlowSequenceEntry);
                return self.parse_node(false, false);
            }
        }
        let token = self.peek_token()?;
        let event = RawEvent {
            data: RawEventData::SequenceEnd,
            start_mark: token.start_mark,
            end_mark: token.end_mark,
        };
        self.state = self.states.pop().expect("state stack not empty");
        let _ = self.marks.pop();
        self.skip_token();
        Ok(event)
    }

    fn parse_flow_sequence_entry_mapping_key(&mut self) -> Result<RawEvent, ParserError> {
        let token = self.peek_token()?;
        if matches!(
            token.data,
            TokenData::Value | TokenData::FlowEntry | TokenData::FlowSequenceEnd
        ) {
            let mark: Mark = token.end_mark;
            self.skip_token();
            self.state = ParserState::FlowSequenceEntryMappingValue;
            Self::process_empty_scalar(mark)
        } else {
            self.states.push(ParserState::FlowSequenceEntryMappingValue);
            self.parse_node(false, false)
        }
    }

    fn parse_flow_sequence_entry_mapping_value(&mut self) -> Result<RawEvent, ParserError> {
        let mut token = self.peek_token()?;
        if let TokenData::Value = token.data {
            self.skip_token();
            token = self.peek_token()?;
            if !matches!(
                token.data,
                TokenData::FlowEntry | TokenData::FlowSequenceEnd
            ) {
                self.states.push(ParserState::FlowSequenceEntryMappingEnd);
                return self.parse_node(false, false);
            }
        }
        let mark = token.start_mark;
        self.state = ParserState::FlowSequenceEntryMappingEnd;
        Self::process_empty_scalar(mark)
    }

    fn parse_flow_sequence_entry_mapping_end(&mut self) -> Result<RawEvent, ParserError> {
        let token = self.peek_token()?;
        let start_mark = token.start_mark;
        let end_mark = token.end_mark;
        self.state = ParserState::FlowSequenceEntry;
        Ok(RawEvent {
            data: RawEventData::MappingEnd,
            start_mark,
            end_mark,
        })
    }

    fn parse_flow_mapping_key(&mut self, first: bool) -> Result<RawEvent, ParserError> {
        if first {
            let mark = self.peek_token()?.start_mark;
            self.marks.push(mark);
            self.skip_token();
        }

        let mut token = self.peek_token()?;
        if !matches!(token.data, TokenData::FlowMappingEnd) {
            if !first {
                if let TokenData::FlowEntry = token.data {
                    self.skip_token();
                    token = self.peek_token()?;
                } else {
                    let token_mark = token.start_mark;
                    let mark = self.marks.pop().expect("mark stack not empty");
                    return Self::set_parser_error_context(
                        "while parsing a flow mapping",
                        mark,
                        "did not find expected ',' or '}'",
                        token_mark,
                    );
                }
            }
            if let TokenData::Key = token.data {
                self.skip_token();
                token = self.peek_token()?;
                if !matches!(
                    token.data,
                    TokenData::Value | TokenData::FlowEntry | TokenData::FlowMappingEnd
                ) {
                    self.states.push(ParserState::FlowMappingValue);
                    return self.parse_node(false, false);
                }
                let mark = token.start_mark;
                self.state = ParserState::FlowMappingValue;
                return Self::process_empty_scalar(mark);
            } else if !matches!(token.data, TokenData::FlowMappingEnd) {
                self.states.push(ParserState::FlowMappingEmptyValue);
                return self.parse_node(false, false);
            }
        }
        let token = self.peek_token()?;
        let event = RawEvent {
            data: RawEventData::MappingEnd,
            start_mark: token.start_mark,
            end_mark: token.end_mark,
        };
        self.state = self.states.pop().expect("state stack not empty");
        let _ = self.marks.pop();
        self.skip_token();
        Ok(event)
    }

    fn parse_flow_mapping_value(&mut self, empty: bool) -> Result<RawEvent, ParserError> {
        let mut token = self.peek_token()?;
        if empty {
            let mark = token.start_mark;
            self.state = ParserState::FlowMappingKey;
            return Self::process_empty_scalar(mark);
        }
        if let TokenData::Value = token.data {
            self.skip_token();
            token = self.peek_token()?;
            if !matches!(token.data, TokenData::FlowEntry | TokenData::FlowMappingEnd) {
                self.states.push(ParserState::FlowMappingKey);
                return self.parse_node(false, false);
            }
        }
        let mark = token.start_mark;
        self.state = ParserState::FlowMappingKey;
        Self::process_empty_scalar(mark)
    }

    fn process_empty_scalar(mark: Mark) -> Result<RawEvent, ParserError> {
        Ok(RawEvent {
            data: RawEventData::Scalar {
                anchor: None,
                tag: None,
                value: String::new(),
                plain_implicit: true,
                quoted_implicit: false,
                style: ScalarStyle::Plain,
            },
            start_mark: mark,
            end_mark: mark,
        })
    }

    fn process_directives(
        &mut self,
        version_directive_ref: Option<&mut Option<VersionDirective>>,
        tag_directives_ref: Option<&mut Vec<TagDirective>>,
    ) -> Result<(), ParserError> {
        let default_tag_directives: [TagDirective; 2] = [
            TagDirective {
                handle: String::from("!"),
                prefix: String::from("!"),
            },
            TagDirective {
                handle: String::from("!!"),
                prefix: String::from("tag:yaml.org,2002:"),
            },
        ];
        let mut version_directive: Option<VersionDirective> = None;
        let mut tag_directives = Vec::with_capacity(16);

        let mut token = self.peek_token_mut()?;

        loop {
            if !matches!(
                token.data,
                TokenData::VersionDirective { .. } | TokenData::TagDirective { .. }
            ) {
                break;
            }

            if let TokenData::VersionDirective { major, minor } = &token.data {
                let mark = token.start_mark;
                if version_directive.is_some() {
                    return Self::set_parser_error("found duplicate %YAML directive", mark);
                } else if *major != 1 || *minor != 1 && *minor != 2 {
                    return Self::set_parser_error("found incompatible YAML document", mark);
                }
                version_directive = Some(VersionDirective {
                    major: *major,
                    minor: *minor,
                });
            } else if let TokenData::TagDirective { handle, prefix } = &mut token.data {
                let value = TagDirective {
                    handle: std::mem::take(handle),
                    prefix: std::mem::take(prefix),
                };
                let mark = token.start_mark;
                self.append_tag_directive(
                    TagDirective {
                        handle: value.handle.clone(),
                        prefix: value.prefix.clone(),
                    },
                    false,
                    mark,
                )?;
                tag_directives.push(value);
            }

            self.skip_token();
            token = self.peek_token_mut()?;
        }

        let start_mark = token.start_mark;
        for default_tag_directive in default_tag_directives {
            self.append_tag_directive(default_tag_directive, true, start_mark)?;
        }

        if let Some(version_directive_ref) = version_directive_ref {
            *version_directive_ref = version_directive;
        }
        if let Some(tag_directives_ref) = tag_directives_ref {
            *tag_directives_ref = tag_directives;
        }

        Ok(())
    }

    fn append_tag_directive(
        &mut self,
        value: TagDirective,
        allow_duplicates: bool,
        mark: Mark,
    ) -> Result<(), ParserError> {
        for tag_directive in &self.tag_directives {
            if value.handle == tag_directive.handle {
                if allow_duplicates {
                    return Ok(());
                }
                return Self::set_parser_error("found duplicate %TAG directive", mark);
            }
        }
        self.tag_directives.push(value);
        Ok(())
    }

    pub(crate) fn delete_aliases(&mut self) {
        self.aliases.clear();
    }

    /// Drains every comment the scanner has collected so far, in source
    /// order.
    pub(crate) fn take_comments(&mut self) -> Vec<crate::comment::Comment> {
        self.scanner.take_comments()
    }

    /// Parse the input stream and produce the next document-level event,
    /// with tags resolved against the active TAG directives and anchors
    /// left for the caller to track.
    ///
    /// This is the entry point used by [`crate::loader::Loader`]; it wraps
    /// [`Parser::parse`] and translates the wire-level [`RawEvent`] into the
    /// richer [`Event`] the deserializer understands.
    pub fn next(&mut self) -> Result<(Event<'r>, Mark), ParserError> {
        let raw = self.parse()?;
        let mark = raw.start_mark;
        let event = match raw.data {
            RawEventData::StreamStart { .. } => Event::StreamStart,
            RawEventData::StreamEnd => Event::StreamEnd,
            RawEventData::DocumentStart { .. } => Event::DocumentStart,
            RawEventData::DocumentEnd { .. } => Event::DocumentEnd,
            RawEventData::Alias { anchor } => Event::Alias(anchor),
            RawEventData::Scalar {
                anchor,
                tag,
                value,
                style,
                ..
            } => Event::Scalar(Scalar {
                anchor,
                tag: tag.as_deref().map(Tag::new),
                value: value.into_bytes().into_boxed_slice(),
                style,
                repr: None,
            }),
            RawEventData::SequenceStart { anchor, tag, .. } => {
                Event::SequenceStart(SequenceStart {
                    anchor,
                    tag: tag.as_deref().map(Tag::new),
                })
            }
            RawEventData::SequenceEnd => Event::SequenceEnd,
            RawEventData::MappingStart { anchor, tag, .. } => {
                Event::MappingStart(MappingStart {
                    anchor,
                    tag: tag.as_deref().map(Tag::new),
                })
            }
            RawEventData::MappingEnd => Event::MappingEnd,
        };
        Ok((event, mark))
    }
}

/// A scalar node as seen by the composer, with its tag already resolved
/// against the document's `%TAG` directives.
#[derive(Debug)]
#[non_exhaustive]
pub struct Scalar<'r> {
    /// The anchor assigned to this node, if any.
    pub anchor: Option<String>,
    /// The resolved tag, if the node carried one.
    pub tag: Option<Tag>,
    /// The decoded scalar content.
    pub value: Box<[u8]>,
    /// The style the scanner observed for this scalar.
    pub style: ScalarStyle,
    /// The raw source slice backing `value`, when the input allows a
    /// zero-copy borrow. This scanner always owns its decoded bytes, so
    /// this is always `None`.
    pub repr: Option<&'r [u8]>,
}

/// The start of a sequence node.
#[derive(Debug)]
#[non_exhaustive]
pub struct SequenceStart {
    /// The anchor assigned to this node, if any.
    pub anchor: Option<String>,
    /// The resolved tag, if the node carried one.
    pub tag: Option<Tag>,
}

/// The start of a mapping node.
#[derive(Debug)]
#[non_exhaustive]
pub struct MappingStart {
    /// The anchor assigned to this node, if any.
    pub anchor: Option<String>,
    /// The resolved tag, if the node carried one.
    pub tag: Option<Tag>,
}

/// A document-level parsing event, with aliases left unresolved and tags
/// already bound to their resolved `tag:...` form.
#[derive(Debug)]
#[non_exhaustive]
pub enum Event<'r> {
    /// The start of the event stream.
    StreamStart,
    /// The end of the event stream.
    StreamEnd,
    /// The start of a document.
    DocumentStart,
    /// The end of a document.
    DocumentEnd,
    /// An alias, referring to the anchor of a previously seen node.
    Alias(String),
    /// A scalar node.
    Scalar(Scalar<'r>),
    /// The start of a sequence node.
    SequenceStart(SequenceStart),
    /// The end of a sequence node.
    SequenceEnd,
    /// The start of a mapping node.
    MappingStart(MappingStart),
    /// The end of a mapping node.
    MappingEnd,
}
