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

use crate::AttributeState;

/// A run of text drawn with one set of attributes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributedSegment {
    /// Decoded text, control characters included
    pub text: String,
    /// Attributes in effect when the text arrived
    pub attributes: AttributeState,
}

impl AttributedSegment {
    /// Creates a segment.
    pub fn new<S: Into<String>>(text: S, attributes: AttributeState) -> Self {
        AttributedSegment {
            text: text.into(),
            attributes,
        }
    }

    /// Whether the segment carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The text shaped for a markup renderer.
    ///
    /// ```
    /// use decafmud_ansicodec::{AttributeState, AttributedSegment};
    ///
    /// let segment = AttributedSegment::new("a<b  c\r\n", AttributeState::default());
    /// assert_eq!(segment.to_markup(), "a&lt;b &nbsp;c\r<br>");
    /// ```
    pub fn to_markup(&self) -> String {
        shape_markup(&self.text)
    }
}

/// Escapes `<`, turns `\n\r?` into `<br>`, and keeps runs of spaces from
/// collapsing: a run of `n >= 2` becomes a space, `n - 2` `&nbsp;` and a
/// space (two spaces become `" &nbsp;"`). A space right after `>` becomes
/// `&nbsp;` so a line can start with one.
pub fn shape_markup(text: &str) -> String {
    let escaped = text.replace('<', "&lt;");

    let mut broken = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' {
            broken.push_str("<br>");
            chars.next_if_eq(&'\r');
        } else {
            broken.push(c);
        }
    }
    let broken = broken.replace("> ", ">&nbsp;");

    let mut out = String::with_capacity(broken.len());
    let mut run = 0usize;
    for c in broken.chars() {
        if c == ' ' {
            run += 1;
            continue;
        }
        push_spaces(&mut out, run);
        run = 0;
        out.push(c);
    }
    push_spaces(&mut out, run);
    out
}

fn push_spaces(out: &mut String, run: usize) {
    match run {
        0 => {}
        1 => out.push(' '),
        2 => out.push_str(" &nbsp;"),
        n => {
            out.push(' ');
            for _ in 0..n - 2 {
                out.push_str("&nbsp;");
            }
            out.push(' ');
        }
    }
}
