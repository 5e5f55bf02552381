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

/// Glyphs for 0x00-0x1F. BEL through CR and ESC keep their control meaning.
const LOW: [char; 32] = [
    '\u{2007}', '\u{263A}', '\u{263B}', '\u{2665}', '\u{2666}', '\u{2663}', '\u{2660}', '\x07',
    '\x08', '\x09', '\x0A', '\x0B', '\x0C', '\x0D', '\u{266B}', '\u{263C}', '\u{25BA}', '\u{25C4}',
    '\u{2195}', '\u{203C}', '\u{00B6}', '\u{00A7}', '\u{25AC}', '\u{21A8}', '\u{2191}', '\u{2193}',
    '\u{2192}', '\x1B', '\u{221F}', '\u{2194}', '\u{25B2}', '\u{25BC}',
];

/// Glyphs for 0x80-0xFF, index 0 is 0x80.
const HIGH: [char; 128] = [
    '\u{00C7}', '\u{00FC}', '\u{00E9}', '\u{00E2}', '\u{00E4}', '\u{00E0}', '\u{00E5}', '\u{00E7}',
    '\u{00EA}', '\u{00EB}', '\u{00E8}', '\u{00EF}', '\u{00EE}', '\u{00EC}', '\u{00C4}', '\u{00C5}',
    '\u{00C9}', '\u{00E6}', '\u{00C6}', '\u{00F4}', '\u{00F6}', '\u{00F2}', '\u{00FB}', '\u{00F9}',
    '\u{00FF}', '\u{00D6}', '\u{00DC}', '\u{00A2}', '\u{00A3}', '\u{00A5}', '\u{20A7}', '\u{0192}',
    '\u{00E1}', '\u{00ED}', '\u{00F3}', '\u{00FA}', '\u{00F1}', '\u{00D1}', '\u{00AA}', '\u{00BA}',
    '\u{00BF}', '\u{2310}', '\u{00AC}', '\u{00BD}', '\u{00BC}', '\u{00A1}', '\u{00AB}', '\u{00BB}',
    '\u{2591}', '\u{2592}', '\u{2593}', '\u{2502}', '\u{2524}', '\u{2561}', '\u{2562}', '\u{2556}',
    '\u{2555}', '\u{2563}', '\u{2551}', '\u{2557}', '\u{255D}', '\u{255C}', '\u{255B}', '\u{2510}',
    '\u{2514}', '\u{2534}', '\u{252C}', '\u{251C}', '\u{2500}', '\u{253C}', '\u{255E}', '\u{255F}',
    '\u{255A}', '\u{2554}', '\u{2569}', '\u{2566}', '\u{2560}', '\u{2550}', '\u{256C}', '\u{2567}',
    '\u{2568}', '\u{2564}', '\u{2565}', '\u{2559}', '\u{2558}', '\u{2552}', '\u{2553}', '\u{256B}',
    '\u{256A}', '\u{2518}', '\u{250C}', '\u{2588}', '\u{2584}', '\u{258C}', '\u{2590}', '\u{2580}',
    '\u{03B1}', '\u{00DF}', '\u{0393}', '\u{03C0}', '\u{03A3}', '\u{03C3}', '\u{00B5}', '\u{03C4}',
    '\u{03A6}', '\u{0398}', '\u{03A9}', '\u{03B4}', '\u{221E}', '\u{03C6}', '\u{03B5}', '\u{2229}',
    '\u{2261}', '\u{00B1}', '\u{2265}', '\u{2264}', '\u{2320}', '\u{2321}', '\u{00F7}', '\u{2248}',
    '\u{00B0}', '\u{2219}', '\u{00B7}', '\u{221A}', '\u{207F}', '\u{00B2}', '\u{25A0}', '\u{00A0}',
];

/// Code page 437, the IBM PC character set.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cp437;

impl Codec for Cp437 {
    fn name(&self) -> &'static str {
        "cp437"
    }

    fn proper_name(&self) -> &'static str {
        "CP437"
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> (String, &'a [u8]) {
        let text = bytes
            .iter()
            .map(|&byte| match byte {
                0x00..=0x1F => LOW[usize::from(byte)],
                0x80..=0xFF => HIGH[usize::from(byte - 0x80)],
                _ => char::from(byte),
            })
            .collect();
        (text, &[])
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        text.chars().map(encode_char).collect()
    }
}

fn encode_char(ch: char) -> u8 {
    if ch.is_ascii() {
        return ch as u8;
    }
    if let Some(index) = HIGH.iter().position(|glyph| *glyph == ch) {
        return 0x80 + index as u8;
    }
    if let Some(index) = LOW.iter().position(|glyph| *glyph == ch) {
        return index as u8;
    }
    b'?'
}
