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

//! Integration tests for the terminal interpreter

use decafmud_ansicodec::{
    AttributeFlags, AttributeState, EffectiveStyle, MxpTagTable, TerminalInterpreter, TerminalOutput,
};
use proptest::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// Minimal renderer: a list of styled runs with equal neighbours merged.
#[derive(Debug, Default, PartialEq)]
struct Screen {
    runs: Vec<(EffectiveStyle, String)>,
    notices: Vec<String>,
}

impl Screen {
    fn apply(&mut self, output: Vec<TerminalOutput>) {
        for item in output {
            match item {
                TerminalOutput::Segment(segment) => {
                    let style = segment.attributes.effective();
                    match self.runs.last_mut() {
                        Some((last, text)) if *last == style => text.push_str(&segment.text),
                        _ => self.runs.push((style, segment.text)),
                    }
                }
                TerminalOutput::Clear => self.runs.clear(),
                TerminalOutput::EraseRenderedLine => {
                    while let Some((_, text)) = self.runs.last_mut() {
                        match text.rfind('\n') {
                            Some(at) => {
                                text.truncate(at + 1);
                                break;
                            }
                            None => {
                                self.runs.pop();
                            }
                        }
                    }
                }
                TerminalOutput::Notice(notice) => self.notices.push(notice),
            }
        }
    }

    fn text(&self) -> String {
        self.runs.iter().map(|(_, text)| text.as_str()).collect()
    }
}

fn render(chunks: &[&str]) -> Screen {
    let mut term = TerminalInterpreter::default();
    let mut screen = Screen::default();
    for chunk in chunks {
        screen.apply(term.process(chunk));
    }
    screen
}

// ============================================================================
// Rendering Scenarios
// ============================================================================

#[test]
fn sgr_bright_red_then_reset() {
    let mut term = TerminalInterpreter::default();
    term.process("\x1b[1;31m");
    let state = *term.attributes();
    assert!(state.flags.contains(AttributeFlags::BRIGHT));
    assert_eq!(state.fg, 1);
    assert_eq!(state.effective_fg(), 9);

    term.process("\x1b[0m");
    assert_eq!(*term.attributes(), AttributeState::default());
    assert_eq!((term.attributes().fg, term.attributes().bg), (7, 0));
}

#[test]
fn erase_line_across_deliveries() {
    let screen = render(&["You say: hi\n", "Loading 10%\x1b[2K", "Loading 100%\n"]);
    assert_eq!(screen.text(), "You say: hi\nLoading 100%\n");
}

#[test]
fn clear_screen_idiom_resets_style() {
    let screen = render(&["\x1b[31mold\n\x1b[", "H\x1b[", "Jfresh"]);
    assert_eq!(screen.text(), "fresh");
    assert_eq!(screen.runs[0].0, AttributeState::default().effective());
}

#[test]
fn room_description() {
    let screen = render(&[
        "\x1b[1;36mThe Market Square\x1b[0m\r\n",
        "A fountain gurgles here.\r\n\x1b[33mExits: north south\x1b[0m\r\n",
    ]);
    assert_eq!(screen.runs.len(), 4);
    assert_eq!(screen.runs[0].0.fg, 14);
    assert_eq!(screen.runs[2].0.fg, 3);
    assert_eq!(
        screen.text(),
        "The Market Square\r\nA fountain gurgles here.\r\nExits: north south\r\n"
    );
}

#[test]
fn notices_reach_the_screen_once() {
    let screen = render(&["\x1b[2J\x1b[10;1H", "\x1b[A", "\x1b[1K\x1b[1K"]);
    assert_eq!(screen.notices.len(), 2);
}

#[test]
fn mxp_table_is_independent_per_value() {
    let mut mine = MxpTagTable::default();
    let theirs = MxpTagTable::default();
    mine.remove("B");
    assert!(mine.get("BOLD").is_none());
    assert!(theirs.get("BOLD").is_some());
}

// ============================================================================
// Property Tests
// ============================================================================

fn output_piece() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{1,8}",
        Just("\r\n".to_string()),
        (0u8..110).prop_map(|code| format!("\x1b[{code}m")),
        (0u8..110, 0u8..110).prop_map(|(a, b)| format!("\x1b[{a};{b}m")),
        (0u8..=255).prop_map(|index| format!("\x1b[38;5;{index}m")),
        Just("\x1b[m".to_string()),
        Just("\x1b[3C".to_string()),
        Just("\x1b[E".to_string()),
        Just("\x1b[H\x1b[J".to_string()),
        Just("\x1b[2J".to_string()),
        Just("\x1b[5A".to_string()),
        Just("\x1b]0;title\x07".to_string()),
        Just("\x1b(B".to_string()),
    ]
}

proptest! {
    #[test]
    fn chunking_does_not_change_the_screen(
        pieces in proptest::collection::vec(output_piece(), 0..24),
        cuts in proptest::collection::vec(any::<usize>(), 0..6),
    ) {
        let text = pieces.concat();
        let mut points: Vec<usize> = cuts
            .into_iter()
            .map(|cut| cut % (text.len() + 1))
            .collect();
        points.sort_unstable();
        let mut chunks = Vec::new();
        let mut start = 0;
        for point in points {
            chunks.push(&text[start..point]);
            start = point;
        }
        chunks.push(&text[start..]);

        prop_assert_eq!(render(&chunks), render(&[&text]));
    }
}
