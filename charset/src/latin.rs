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

use crate::Codec;

/// ISO-8859-1. Every byte is the code point of the same value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Iso88591;

impl Codec for Iso88591 {
    fn name(&self) -> &'static str {
        "iso88591"
    }

    fn proper_name(&self) -> &'static str {
        "ISO-8859-1"
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> (String, &'a [u8]) {
        (bytes.iter().copied().map(char::from).collect(), &[])
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        text.chars().map(latin1_byte).collect()
    }
}

/// ISO-8859-15 byte positions that differ from ISO-8859-1.
const ISO885915_SUBSTITUTIONS: [(u8, char); 8] = [
    (0xA4, '\u{20AC}'),
    (0xA6, '\u{0160}'),
    (0xA8, '\u{0161}'),
    (0xB4, '\u{017D}'),
    (0xB8, '\u{017E}'),
    (0xBC, '\u{0152}'),
    (0xBD, '\u{0153}'),
    (0xBE, '\u{0178}'),
];

/// ISO-8859-15 (Latin-9), expressed as eight substitutions over ISO-8859-1.
#[derive(Clone, Copy, Debug, Default)]
pub struct Iso885915;

impl Codec for Iso885915 {
    fn name(&self) -> &'static str {
        "iso885915"
    }

    fn proper_name(&self) -> &'static str {
        "ISO-8859-15"
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> (String, &'a [u8]) {
        let text = bytes
            .iter()
            .map(|&byte| {
                ISO885915_SUBSTITUTIONS
                    .iter()
                    .find(|(code, _)| *code == byte)
                    .map_or(char::from(byte), |(_, ch)| *ch)
            })
            .collect();
        (text, &[])
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|ch| {
                ISO885915_SUBSTITUTIONS
                    .iter()
                    .find(|(_, sub)| *sub == ch)
                    .map(|(code, _)| *code)
                    .unwrap_or_else(|| {
                        // Latin-1 glyphs whose byte now carries a substitution
                        let displaced = ISO885915_SUBSTITUTIONS
                            .iter()
                            .any(|(code, _)| char::from(*code) == ch);
                        if displaced { b'?' } else { latin1_byte(ch) }
                    })
            })
            .collect()
    }
}

fn latin1_byte(ch: char) -> u8 {
    u8::try_from(u32::from(ch)).unwrap_or(b'?')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso88591_is_identity() {
        let bytes: Vec<u8> = (0..=255).collect();
        let (text, tail) = Iso88591.decode(&bytes);
        assert!(tail.is_empty());
        assert_eq!(text.chars().count(), 256);
        assert_eq!(Iso88591.encode(&text), bytes);
    }

    #[test]
    fn iso88591_replaces_unrepresentable() {
        assert_eq!(Iso88591.encode("a\u{2593}b"), b"a?b");
    }

    #[test]
    fn iso885915_decodes_euro() {
        let (text, tail) = Iso885915.decode(b"5\xA4");
        assert_eq!(text, "5\u{20AC}");
        assert!(tail.is_empty());
    }

    #[test]
    fn iso885915_substitutions_are_reversible() {
        for (code, ch) in ISO885915_SUBSTITUTIONS {
            assert_eq!(Iso885915.encode(&ch.to_string()), vec![code]);
            assert_eq!(Iso885915.decode(&[code]).0, ch.to_string());
        }
    }

    #[test]
    fn iso885915_replaces_displaced_latin1() {
        assert_eq!(Iso885915.encode("\u{A4}\u{A6}\u{A8}\u{B4}\u{B8}\u{BC}\u{BD}\u{BE}"), b"????????");
        assert_eq!(Iso885915.encode("1\u{BD} \u{20AC}"), b"1? \xA4");
    }

    #[test]
    fn iso885915_passes_plain_latin1() {
        assert_eq!(Iso885915.decode(b"\xE9t\xE9").0, "\u{E9}t\u{E9}");
        assert_eq!(Iso885915.encode("\u{E9}"), vec![0xE9]);
    }
}
