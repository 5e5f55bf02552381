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

use crate::consts::VT100_COMMANDS;
use crate::{AnsiParser, AnsiToken, AttributeState, AttributedSegment, CsiSequence, InterpreterConfig};
use tracing::{debug, trace, warn};

/// What the renderer is asked to do, in order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TerminalOutput {
    /// Append text.
    Segment(AttributedSegment),
    /// Drop everything rendered so far.
    Clear,
    /// Trim the most recently rendered output back to its last line break.
    EraseRenderedLine,
    /// A one time capability notice for the user or the debug log.
    Notice(String),
}

/// Turns decoded terminal output into attributed segments.
///
/// The interpreter has no cursor. It models graphic rendition, a handful of
/// cursor commands approximated with spaces and newlines, and the
/// home-then-erase clear screen idiom. Text ending in an unfinished escape
/// sequence is held until the next call.
///
/// ```
/// use decafmud_ansicodec::{TerminalInterpreter, TerminalOutput};
///
/// let mut term = TerminalInterpreter::default();
/// let out = term.process("\x1b[1;31mDanger\x1b[0m!");
/// let TerminalOutput::Segment(first) = &out[0] else { panic!() };
/// assert_eq!(first.text, "Danger");
/// assert_eq!(first.attributes.effective_fg(), 9);
/// assert_eq!(out.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TerminalInterpreter {
    config: InterpreterConfig,
    attributes: AttributeState,
    pending: String,
    ready_for_clear: bool,
    vt100_warned: bool,
    erase_to_start_warned: bool,
}

impl TerminalInterpreter {
    /// Creates an interpreter in the default state.
    pub fn new(config: InterpreterConfig) -> Self {
        TerminalInterpreter {
            config,
            ..TerminalInterpreter::default()
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Attributes applied to the next text.
    pub fn attributes(&self) -> &AttributeState {
        &self.attributes
    }

    /// Held text that starts with an unfinished escape sequence.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Whether a bare `ESC [H` armed the clear screen idiom.
    pub fn is_ready_for_clear(&self) -> bool {
        self.ready_for_clear
    }

    /// Forgets held input. Attributes survive.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    /// Back to the default attributes with nothing held.
    pub fn clear(&mut self) {
        self.attributes.reset();
        self.pending.clear();
        self.ready_for_clear = false;
    }

    /// Interprets `text`, prefixed by whatever was held from the last call.
    pub fn process(&mut self, text: &str) -> Vec<TerminalOutput> {
        let mut data = std::mem::take(&mut self.pending);
        data.push_str(text);

        let mut out = Vec::new();
        let mut parser = AnsiParser::new(&data);
        loop {
            match parser.next() {
                Ok(Some(AnsiToken::Text(text))) => {
                    self.ready_for_clear = false;
                    self.push_text(&mut out, text);
                }
                Ok(Some(AnsiToken::Csi(seq))) => self.csi(&mut out, seq),
                Ok(Some(AnsiToken::Osc(command))) => trace!("Ignoring OSC {:?}", command),
                Ok(Some(AnsiToken::Escape)) => trace!("Dropping malformed escape"),
                Ok(None) => break,
                Err(err) => warn!("{}", err),
            }
        }
        self.pending = parser.remainder().to_string();
        out
    }

    fn csi(&mut self, out: &mut Vec<TerminalOutput>, seq: CsiSequence<'_>) {
        match seq.command() {
            'm' => {
                self.attributes.apply_sgr(seq.numbers());
                self.ready_for_clear = false;
            }
            '@' | 'C' => {
                let count = Self::count(&seq, 1);
                self.push_text(out, &" ".repeat(count));
                self.ready_for_clear = false;
            }
            'E' => {
                let count = Self::count(&seq, 1);
                self.push_text(out, &"\n".repeat(count));
                self.ready_for_clear = false;
            }
            'H' => {
                if seq.params().is_empty() {
                    self.ready_for_clear = true;
                }
            }
            'J' => {
                let mode = Self::count(&seq, 0);
                if mode == 2 || (mode == 0 && self.ready_for_clear) {
                    self.clear_screen(out);
                }
                self.ready_for_clear = false;
            }
            'K' => match Self::count(&seq, 0) {
                2 => Self::erase_line(out),
                1 => {
                    if !self.erase_to_start_warned {
                        self.erase_to_start_warned = true;
                        warn!("{}", self.config.erase_to_start_warning);
                        out.push(TerminalOutput::Notice(self.config.erase_to_start_warning.clone()));
                    }
                }
                _ => {}
            },
            command if VT100_COMMANDS.contains(command) => {
                if !self.vt100_warned {
                    self.vt100_warned = true;
                    warn!("{}", self.config.vt100_warning);
                    out.push(TerminalOutput::Notice(self.config.vt100_warning.clone()));
                }
            }
            _ => debug!("Unhandled ANSI Sequence: {}", seq),
        }
    }

    fn count(seq: &CsiSequence<'_>, default: u16) -> usize {
        match seq.count(default) {
            Ok(count) => usize::from(count),
            Err(err) => {
                debug!("{}", err);
                usize::from(default)
            }
        }
    }

    /// Appends to the last segment while the drawn style is unchanged.
    fn push_text(&self, out: &mut Vec<TerminalOutput>, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(TerminalOutput::Segment(last)) = out.last_mut() {
            if last.attributes.effective() == self.attributes.effective() {
                last.text.push_str(text);
                return;
            }
        }
        out.push(TerminalOutput::Segment(AttributedSegment::new(text, self.attributes)));
    }

    fn clear_screen(&mut self, out: &mut Vec<TerminalOutput>) {
        out.retain(|item| matches!(item, TerminalOutput::Notice(_)));
        out.push(TerminalOutput::Clear);
        self.attributes.reset();
    }

    /// Trims unrendered segments back to their last line break, or asks the
    /// renderer to do it when none of them holds one.
    fn erase_line(out: &mut Vec<TerminalOutput>) {
        let mut index = out.len();
        while index > 0 {
            index -= 1;
            let boundary = match &out[index] {
                TerminalOutput::Segment(segment) => segment.text.rfind('\n'),
                TerminalOutput::Notice(_) => continue,
                TerminalOutput::Clear | TerminalOutput::EraseRenderedLine => break,
            };
            match boundary {
                Some(at) => {
                    if let TerminalOutput::Segment(segment) = &mut out[index] {
                        segment.text.truncate(at + 1);
                    }
                    return;
                }
                None => {
                    out.remove(index);
                }
            }
        }
        out.push(TerminalOutput::EraseRenderedLine);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AttributeFlags;
    use tracing_test::traced_test;

    fn texts(out: &[TerminalOutput]) -> Vec<&str> {
        out.iter()
            .filter_map(|item| match item {
                TerminalOutput::Segment(segment) => Some(segment.text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn plain_text_is_one_segment() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("You see a door.\r\n");
        assert_eq!(
            out,
            vec![TerminalOutput::Segment(AttributedSegment::new(
                "You see a door.\r\n",
                AttributeState::default()
            ))]
        );
    }

    #[test]
    fn style_changes_split_segments() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("a\x1b[32mb\x1b[0mc");
        assert_eq!(texts(&out), ["a", "b", "c"]);
        let TerminalOutput::Segment(green) = &out[1] else {
            panic!("expected segment");
        };
        assert_eq!(green.attributes.fg, 2);
    }

    #[test]
    fn no_op_sgr_does_not_split() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("a\x1b[37mb\x1b[31m\x1b[39mc");
        assert_eq!(texts(&out), ["abc"]);
    }

    #[test]
    fn attributes_persist_across_calls() {
        let mut term = TerminalInterpreter::default();
        term.process("\x1b[1;34m");
        let out = term.process("blue");
        let TerminalOutput::Segment(segment) = &out[0] else {
            panic!("expected segment");
        };
        assert_eq!(segment.attributes.flags, AttributeFlags::BRIGHT);
        assert_eq!(segment.attributes.effective_fg(), 12);
    }

    #[test]
    fn split_sequence_waits() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("hp\x1b[3");
        assert_eq!(texts(&out), ["hp"]);
        assert_eq!(term.pending(), "\x1b[3");
        let out = term.process("1m!");
        assert_eq!(texts(&out), ["!"]);
        assert_eq!(term.attributes().fg, 1);
        assert!(term.pending().is_empty());
    }

    #[test]
    fn cursor_forward_and_next_line() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("a\x1b[3Cb\x1b[@c\x1b[2Ed");
        assert_eq!(texts(&out), ["a   b c\n\nd"]);
    }

    #[test]
    fn zero_count_moves_emit_nothing() {
        let mut term = TerminalInterpreter::default();
        assert!(term.process("\x1b[0C\x1b[0E").is_empty());
        let out = term.process("a\x1b[0Cb\x1b[0Ec");
        assert_eq!(texts(&out), ["abc"]);
    }

    #[test]
    fn home_then_erase_clears() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("old\x1b[1m\x1b[H\x1b[Jnew");
        assert_eq!(out[0], TerminalOutput::Clear);
        assert_eq!(texts(&out), ["new"]);
        assert!(term.attributes().is_default());
    }

    #[test]
    fn text_between_home_and_erase_disarms() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("\x1b[Hx\x1b[J");
        assert!(!out.contains(&TerminalOutput::Clear));
        assert!(!term.is_ready_for_clear());
    }

    #[test]
    fn erase_display_two_always_clears() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("old\x1b[2J");
        assert_eq!(out, vec![TerminalOutput::Clear]);
    }

    #[test]
    fn erase_line_trims_pending_output() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("hello\nworld\x1b[2K");
        assert_eq!(texts(&out), ["hello\n"]);
    }

    #[test]
    fn erase_line_walks_back_over_segments() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("one\ntw\x1b[1mo\x1b[2K");
        assert_eq!(texts(&out), ["one\n"]);
    }

    #[test]
    fn erase_line_without_boundary_falls_back() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("prompt> \x1b[2K");
        assert_eq!(out, vec![TerminalOutput::EraseRenderedLine]);
    }

    #[test]
    #[traced_test]
    fn vt100_notice_is_given_once() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("\x1b[2A\x1b[5;5f");
        assert_eq!(out, vec![TerminalOutput::Notice(term.config().vt100_warning.clone())]);
        assert!(term.process("\x1b[s").is_empty());
        assert!(logs_contain("only provides a subset of VT100"));
    }

    #[test]
    #[traced_test]
    fn erase_to_start_is_noted_once() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("x\x1b[1K\x1b[1K");
        assert_eq!(texts(&out), ["x"]);
        assert_eq!(out.len(), 2);
        assert!(logs_contain("ESC [1K"));
    }

    #[test]
    #[traced_test]
    fn unknown_commands_are_logged() {
        let mut term = TerminalInterpreter::default();
        assert!(term.process("\x1b[?25z").is_empty());
        assert!(logs_contain("Unhandled ANSI Sequence: ESC [?25z"));
    }

    #[test]
    fn osc_and_stray_escapes_vanish() {
        let mut term = TerminalInterpreter::default();
        let out = term.process("a\x1b]0;Title\x07b\x1b(c");
        assert_eq!(texts(&out), ["ab(c"]);
    }

    #[test]
    fn clear_forgets_state() {
        let mut term = TerminalInterpreter::default();
        term.process("\x1b[31m\x1b[4");
        term.clear();
        assert!(term.attributes().is_default());
        assert!(term.pending().is_empty());
    }
}
