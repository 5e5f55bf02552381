//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use crate::consts::{BEL, CSI, ESC, MAX_OSC_LENGTH, MAX_SEQUENCE_LENGTH, OSC, ST};
use crate::{AnsiError, AnsiResult};

/// One unit of terminal output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnsiToken<'a> {
    /// Plain text up to the next `ESC`.
    Text(&'a str),
    /// A complete `ESC [ <params> <final>` sequence.
    Csi(CsiSequence<'a>),
    /// A complete `ESC ] <data>` sequence, terminator removed.
    Osc(&'a str),
    /// An `ESC` followed by anything other than `[` or `]`. Only the `ESC`
    /// is consumed.
    Escape,
}

/// A Control Sequence Introducer command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CsiSequence<'a> {
    params: &'a str,
    command: char,
}

impl<'a> CsiSequence<'a> {
    /// Creates a sequence from its parameter text and final byte.
    pub fn new(params: &'a str, command: char) -> Self {
        Self { params, command }
    }

    /// Raw parameter text between `ESC [` and the final byte.
    pub fn params(&self) -> &'a str {
        self.params
    }

    /// The final byte.
    pub fn command(&self) -> char {
        self.command
    }

    /// Splits the parameters on `;`.
    ///
    /// An empty field reads as `0`. A field that is not a number reads as
    /// `None` and is skipped by the caller.
    ///
    /// ```
    /// use decafmud_ansicodec::CsiSequence;
    ///
    /// let seq = CsiSequence::new("1;;x;31", 'm');
    /// assert_eq!(seq.numbers().collect::<Vec<_>>(), [Some(1), Some(0), None, Some(31)]);
    /// ```
    pub fn numbers(&self) -> impl Iterator<Item = Option<u16>> + 'a {
        self.params.split(';').map(|field| {
            if field.is_empty() {
                Some(0)
            } else {
                field.parse().ok()
            }
        })
    }

    /// The leading numeral, or `default` when there are no parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AnsiError::InvalidParameter`] if the parameters do not start
    /// with a number that fits in a `u16`.
    pub fn count(&self, default: u16) -> AnsiResult<u16> {
        if self.params.is_empty() {
            return Ok(default);
        }
        let digits = self
            .params
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.params.len());
        self.params[..digits]
            .parse()
            .map_err(|_| AnsiError::InvalidParameter {
                value: self.params.to_string(),
                command: self.command,
            })
    }
}

impl std::fmt::Display for CsiSequence<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ESC [{}{}", self.params, self.command)
    }
}

/// Index based scanner over decoded terminal output.
///
/// The parser never copies its input. [`AnsiParser::next`] hands out
/// borrowed tokens until it reaches the end or a sequence that is not
/// complete yet; [`AnsiParser::remainder`] is then the text to keep for the
/// next delivery.
///
/// ```
/// use decafmud_ansicodec::{AnsiParser, AnsiToken};
///
/// let mut parser = AnsiParser::new("hp: \x1b[1;31m12\x1b[0");
/// assert_eq!(parser.next().unwrap(), Some(AnsiToken::Text("hp: ")));
/// assert!(matches!(parser.next().unwrap(), Some(AnsiToken::Csi(seq)) if seq.command() == 'm'));
/// assert_eq!(parser.next().unwrap(), Some(AnsiToken::Text("12")));
/// assert_eq!(parser.next().unwrap(), None);
/// assert_eq!(parser.remainder(), "\x1b[0");
/// ```
#[derive(Clone, Debug)]
pub struct AnsiParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> AnsiParser<'a> {
    /// Starts scanning `input` from the beginning.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Everything not consumed yet.
    pub fn remainder(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Reads the next token.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(token))` - a complete token was consumed
    /// - `Ok(None)` - the input is exhausted, or what is left is the start
    ///   of a sequence still missing its terminator
    ///
    /// # Errors
    ///
    /// Returns [`AnsiError::SequenceTooLong`] when no terminator shows up
    /// within [`MAX_SEQUENCE_LENGTH`] bytes, or [`MAX_OSC_LENGTH`] for an
    /// OSC sequence. The `ESC` is skipped so the
    /// next call continues with the text after it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> AnsiResult<Option<AnsiToken<'a>>> {
        let rest = self.remainder();
        if rest.is_empty() {
            return Ok(None);
        }

        match rest.find(ESC) {
            Some(0) => self.sequence(rest),
            Some(end) => {
                self.pos += end;
                Ok(Some(AnsiToken::Text(&rest[..end])))
            }
            None => {
                self.pos = self.input.len();
                Ok(Some(AnsiToken::Text(rest)))
            }
        }
    }

    fn sequence(&mut self, rest: &'a str) -> AnsiResult<Option<AnsiToken<'a>>> {
        let bytes = rest.as_bytes();
        let Some(&second) = bytes.get(1) else {
            return Ok(None);
        };
        let limit = if char::from(second) == OSC {
            MAX_OSC_LENGTH
        } else {
            MAX_SEQUENCE_LENGTH
        };
        let window = &bytes[2..bytes.len().min(limit)];

        let found = match char::from(second) {
            CSI => window
                .iter()
                .position(|b| (0x40..=0x7E).contains(b))
                .map(|end| {
                    let seq = CsiSequence::new(&rest[2..2 + end], char::from(window[end]));
                    (AnsiToken::Csi(seq), 2 + end + 1)
                }),
            OSC => osc_end(window).map(|(end, len)| (AnsiToken::Osc(&rest[2..2 + end]), 2 + end + len)),
            _ => Some((AnsiToken::Escape, 1)),
        };

        match found {
            Some((token, used)) => {
                self.pos += used;
                Ok(Some(token))
            }
            None if bytes.len() >= limit => {
                let position = self.pos;
                self.pos += 1;
                Err(AnsiError::SequenceTooLong { position, max: limit })
            }
            None => Ok(None),
        }
    }
}

/// Finds the earliest `BEL` or `ESC \`, returning its offset and length.
fn osc_end(window: &[u8]) -> Option<(usize, usize)> {
    let bel = BEL as u8;
    let esc = ESC as u8;
    let st = ST as u8;
    window.iter().enumerate().find_map(|(index, &byte)| {
        if byte == bel {
            Some((index, 1))
        } else if byte == esc && window.get(index + 1) == Some(&st) {
            Some((index, 2))
        } else {
            None
        }
    })
}
