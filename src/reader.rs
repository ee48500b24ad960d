//! Table-driven JSON tokenizer.
//!
//! [`TokenReader`] walks a caller-owned byte buffer one byte at a time,
//! dispatching each byte through the 256-entry table selected by the current
//! lexing mode. One call to [`read`](TokenReader::read) produces one token;
//! while a container token is being consumed, the reader counts its direct
//! children and total descendants so the token comes out ready for flat-array
//! navigation.
//!
//! ## Two entry points
//!
//! - [`TokenReader::new`] reads a whole document: the first token is the
//!   document root (a container with its counters filled, or a lone scalar),
//!   and any further top-level values follow.
//! - [`TokenReader::members`] enumerates the direct members of one container
//!   span, braces included: object names and values (or array elements) come
//!   out one at a time, with nested containers as single counted tokens.
//!
//! Both run the same transition tables; they differ only in the depth the
//! counter starts at. A container opened one level above the enumeration
//! floor becomes a single token spanning to its matching closer; everything
//! at the floor is yielded individually.
//!
//! ## Depth bookkeeping
//!
//! For `{"a":{"b":1}}` in document mode:
//!
//! ```text
//! Byte:   {  "  a  "  :  {  "  b  "  :  1  }  }
//! Depth:  2  2  2  2  2  3  3  3  3  3  3  2  1   <- after each byte
//! ```
//!
//! The root token starts at the `{` that lifts depth to 2 and is yielded at
//! the `}` that drops it back to 1, with `children = 1` (one pair) and
//! `sub = 4` (name `a`, inner object, name `b`, number). The separator
//! action compensates the child counter so that objects count pairs while
//! arrays count elements, without the reader knowing which it is lexing.

use crate::error::ParseError;
use crate::tables::{Action, Mode};
use crate::token::{Pair, Token, TokenKind, classify};

/// Streaming tokenizer over a borrowed byte buffer.
///
/// The reader owns nothing: tokens borrow the buffer it was started on.
/// After a parse error the reader is poisoned and every further call
/// returns the same error.
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    buf: &'a [u8],
    pos: usize,
    depth: u32,
    /// Depth the reader started at; reads are exhausted when the cursor is
    /// back at this level with nothing pending.
    base: u32,
    mode: Mode,
    err: Option<ParseError>,
    fused: bool,
}

impl<'a> TokenReader<'a> {
    /// Starts reading `buf` as a whole document.
    ///
    /// The first successful [`read`](Self::read) yields the document root:
    /// a container spanning from its opener to its matching closer, or a
    /// bare/quoted scalar. Additional top-level values, if the buffer has
    /// them, are yielded by further reads.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            depth: 1,
            base: 1,
            mode: Mode::Struct,
            err: None,
            fused: false,
        }
    }

    /// Starts enumerating the direct members of a container span.
    ///
    /// `container` must be the full span of an object or array, braces or
    /// brackets included - exactly the `text` of a container token. Object
    /// members are yielded name, value, name, value; array members one
    /// element at a time; nested containers as single counted tokens.
    pub fn members(container: &'a [u8]) -> Self {
        Self {
            buf: container,
            pos: 0,
            depth: 0,
            base: 0,
            mode: Mode::Struct,
            err: None,
            fused: false,
        }
    }

    /// Byte offset of the read cursor, relative to the reader's buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Reads the next token.
    ///
    /// Returns `Ok(None)` when the buffer is cleanly exhausted. Errors
    /// latch: once a read fails, every subsequent read returns the same
    /// error.
    pub fn read(&mut self) -> Result<Option<Token<'a>>, ParseError> {
        if let Some(err) = self.err {
            return Err(err);
        }

        let mut start: Option<usize> = None;
        let mut children: u32 = 0;
        let mut sub: u32 = 0;
        let mut utf8_remain: u8 = 0;

        while self.pos < self.buf.len() {
            let b = self.buf[self.pos];

            // A NUL at structural level ends the input.
            if self.mode == Mode::Struct && b == 0 {
                break;
            }

            // The last byte closes the enclosing container with nothing
            // pending: enumeration is complete.
            if self.depth == self.base + 1
                && (b == b'}' || b == b']')
                && self.pos + 1 == self.buf.len()
                && start.is_none()
            {
                self.pos += 1;
                self.depth = self.base;
                return Ok(None);
            }

            match self.mode.table()[b as usize] {
                Action::Fail => {
                    return Err(self.fail(ParseError::Syntax { offset: self.pos }));
                }
                Action::Loop => {}
                Action::Sep => {
                    if self.depth == 2 {
                        children = children.saturating_sub(1);
                    }
                }
                Action::Up => {
                    if self.depth > 1 {
                        if self.depth == 2 {
                            children += 1;
                        }
                        sub += 1;
                    }
                    if self.depth == 1 {
                        start = Some(self.pos);
                    }
                    self.depth += 1;
                }
                Action::Down => {
                    if self.depth == 0 {
                        return Err(self.fail(ParseError::Syntax { offset: self.pos }));
                    }
                    self.depth -= 1;
                    if self.depth < self.base {
                        return Err(self.fail(ParseError::Syntax { offset: self.pos }));
                    }
                    if self.depth == 1 {
                        if let Some(s) = start {
                            let text = &self.buf[s..=self.pos];
                            self.pos += 1;
                            return Ok(Some(finish(text, children, sub)));
                        }
                    }
                }
                Action::QuoteUp => {
                    self.mode = Mode::Str;
                    if self.depth <= 1 {
                        start = Some(self.pos);
                    } else {
                        if self.depth == 2 {
                            children += 1;
                        }
                        sub += 1;
                    }
                }
                Action::QuoteDown => {
                    self.mode = Mode::Struct;
                    if self.depth <= 1 {
                        if let Some(s) = start {
                            let text = &self.buf[s..=self.pos];
                            self.pos += 1;
                            return Ok(Some(finish(text, children, sub)));
                        }
                    }
                }
                Action::Esc => self.mode = Mode::Esc,
                Action::Unesc => self.mode = Mode::Str,
                Action::Bare => {
                    self.mode = Mode::Bare;
                    if self.depth <= 1 {
                        start = Some(self.pos);
                    } else {
                        if self.depth == 2 {
                            children += 1;
                        }
                        sub += 1;
                    }
                }
                Action::Unbare => {
                    self.mode = Mode::Struct;
                    if self.depth <= 1 {
                        if let Some(s) = start {
                            // The terminator stays unconsumed; the next read
                            // sees it at structural level.
                            let text = &self.buf[s..self.pos];
                            return Ok(Some(finish(text, children, sub)));
                        }
                    }
                    // Re-present the terminator to the structural table.
                    continue;
                }
                Action::Utf8Two => {
                    self.mode = Mode::Utf8;
                    utf8_remain = 1;
                }
                Action::Utf8Three => {
                    self.mode = Mode::Utf8;
                    utf8_remain = 2;
                }
                Action::Utf8Four => {
                    self.mode = Mode::Utf8;
                    utf8_remain = 3;
                }
                Action::Utf8Next => {
                    utf8_remain -= 1;
                    if utf8_remain == 0 {
                        self.mode = Mode::Str;
                    }
                }
            }
            self.pos += 1;
        }

        // End of input.
        if self.depth != self.base {
            return Err(self.fail(ParseError::UnexpectedEof {
                offset: self.buf.len(),
            }));
        }
        match start {
            None => Ok(None),
            Some(s) => match self.mode {
                // A bare literal may run to end of input.
                Mode::Bare => {
                    self.mode = Mode::Struct;
                    let text = &self.buf[s..self.pos];
                    Ok(Some(finish(text, children, sub)))
                }
                _ => Err(self.fail(ParseError::UnexpectedEof {
                    offset: self.buf.len(),
                })),
            },
        }
    }

    /// Reads a name/value pair: two successive tokens.
    ///
    /// Returns `Ok(None)` when the buffer is exhausted before the name. A
    /// name without a value is an error.
    pub fn read_pair(&mut self) -> Result<Option<Pair<'a>>, ParseError> {
        let name = match self.read()? {
            Some(tok) => tok,
            None => return Ok(None),
        };
        let value = match self.read()? {
            Some(tok) => tok,
            None => {
                return Err(self.fail(ParseError::UnexpectedEof { offset: self.pos }));
            }
        };
        Ok(Some(Pair { name, value }))
    }

    fn fail(&mut self, err: ParseError) -> ParseError {
        self.err = Some(err);
        err
    }
}

impl<'a> Iterator for TokenReader<'a> {
    type Item = Result<Token<'a>, ParseError>;

    /// Yields tokens until exhaustion; a parse error is yielded once and
    /// ends the iteration.
    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        match self.read() {
            Ok(Some(tok)) => Some(Ok(tok)),
            Ok(None) => {
                self.fused = true;
                None
            }
            Err(err) => {
                self.fused = true;
                Some(Err(err))
            }
        }
    }
}

/// Classifies a completed span and strips string quotes.
fn finish(text: &[u8], children: u32, sub: u32) -> Token<'_> {
    let kind = classify(text);
    let text = if kind == TokenKind::String && text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        text
    };
    Token {
        kind,
        text,
        children,
        sub,
    }
}
