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

//! Graphic rendition state driven by SGR sequences.

use crate::InterpreterConfig;
use crate::consts::{DEFAULT_BG, DEFAULT_FG};
use bitflags::bitflags;

bitflags! {
    /// Boolean text attributes.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct AttributeFlags: u8 {
        /// Bold or increased intensity (SGR 1)
        const BRIGHT           = 0b0000_0001;
        /// Foreground and background swapped (SGR 7)
        const NEGATIVE         = 0b0000_0010;
        /// Italic (SGR 3)
        const ITALIC           = 0b0000_0100;
        /// Blinking (SGR 5, 6)
        const BLINK            = 0b0000_1000;
        /// Single underline (SGR 4)
        const UNDERLINE        = 0b0001_0000;
        /// Decreased intensity (SGR 2)
        const FAINT            = 0b0010_0000;
        /// Crossed out (SGR 9)
        const STRIKE           = 0b0100_0000;
        /// Double underline (SGR 21)
        const DOUBLE_UNDERLINE = 0b1000_0000;
    }
}

/// Current graphic rendition of a terminal session.
///
/// Colors are palette indexes: `0..=15` for the ANSI colors, anything up to
/// 255 when set through the xterm 256 color extension.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AttributeState {
    /// Boolean attributes
    pub flags: AttributeFlags,
    /// Foreground color index
    pub fg: u8,
    /// Background color index
    pub bg: u8,
    /// Alternate font, `0..=9`
    pub font: u8,
}

impl Default for AttributeState {
    fn default() -> Self {
        AttributeState {
            flags: AttributeFlags::empty(),
            fg: DEFAULT_FG,
            bg: DEFAULT_BG,
            font: 0,
        }
    }
}

/// The attributes a renderer actually draws: colors after the bright offset
/// and the negative swap.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EffectiveStyle {
    /// Boolean attributes
    pub flags: AttributeFlags,
    /// Drawn foreground color
    pub fg: u8,
    /// Drawn background color
    pub bg: u8,
    /// Alternate font
    pub font: u8,
}

impl AttributeState {
    /// Back to `{fg: 7, bg: 0, font: 0, flags: none}`.
    pub fn reset(&mut self) {
        *self = AttributeState::default();
    }

    /// Whether nothing differs from the default state.
    pub fn is_default(&self) -> bool {
        *self == AttributeState::default()
    }

    /// Foreground as drawn. Bright lifts colors below 8 into the bright half
    /// of the palette; negative then swaps in the background.
    ///
    /// ```
    /// use decafmud_ansicodec::{AttributeFlags, AttributeState};
    ///
    /// let mut state = AttributeState::default();
    /// state.apply_sgr([Some(1), Some(31)]);
    /// assert_eq!(state.fg, 1);
    /// assert_eq!(state.effective_fg(), 9);
    /// state.apply_sgr([Some(7)]);
    /// assert_eq!((state.effective_fg(), state.effective_bg()), (0, 9));
    /// ```
    pub fn effective_fg(&self) -> u8 {
        if self.flags.contains(AttributeFlags::NEGATIVE) {
            self.bg
        } else {
            self.bright_fg()
        }
    }

    /// Background as drawn.
    pub fn effective_bg(&self) -> u8 {
        if self.flags.contains(AttributeFlags::NEGATIVE) {
            self.bright_fg()
        } else {
            self.bg
        }
    }

    /// Snapshot of what a renderer would draw.
    pub fn effective(&self) -> EffectiveStyle {
        EffectiveStyle {
            flags: self.flags,
            fg: self.effective_fg(),
            bg: self.effective_bg(),
            font: self.font,
        }
    }

    fn bright_fg(&self) -> u8 {
        if self.flags.contains(AttributeFlags::BRIGHT) && self.fg < 8 {
            self.fg + 8
        } else {
            self.fg
        }
    }

    /// Applies SGR parameters in order. `None` entries and codes without a
    /// modeled effect are skipped. An empty parameter list means `0`.
    ///
    /// # Returns
    ///
    /// `true` if the effective style changed.
    pub fn apply_sgr<I>(&mut self, params: I) -> bool
    where
        I: IntoIterator<Item = Option<u16>>,
    {
        let before = self.effective();
        let codes: Vec<Option<u16>> = params.into_iter().collect();
        if codes.is_empty() {
            self.reset();
        }

        let mut iter = codes.into_iter();
        while let Some(code) = iter.next() {
            let Some(code) = code else {
                continue;
            };
            match code {
                38 | 48 => {
                    let Some(color) = extended_color(&mut iter) else {
                        break;
                    };
                    if let Some(index) = color {
                        if code == 38 {
                            self.fg = index;
                        } else {
                            self.bg = index;
                        }
                    }
                }
                code => self.apply_code(code),
            }
        }

        self.effective() != before
    }

    fn apply_code(&mut self, code: u16) {
        use AttributeFlags as F;
        // Every arm is bounded by its range, so the narrowing casts are exact.
        match code {
            0 => self.reset(),
            1 => {
                self.flags.insert(F::BRIGHT);
                self.flags.remove(F::FAINT);
            }
            2 => {
                self.flags.remove(F::BRIGHT);
                self.flags.insert(F::FAINT);
            }
            3 => self.flags.insert(F::ITALIC),
            4 => {
                self.flags.insert(F::UNDERLINE);
                self.flags.remove(F::DOUBLE_UNDERLINE);
            }
            5 | 6 => self.flags.insert(F::BLINK),
            7 => self.flags.insert(F::NEGATIVE),
            9 => self.flags.insert(F::STRIKE),
            10..=19 => self.font = (code - 10) as u8,
            21 => {
                self.flags.insert(F::DOUBLE_UNDERLINE);
                self.flags.remove(F::UNDERLINE);
            }
            22 => self.flags.remove(F::BRIGHT | F::FAINT),
            23 => self.flags.remove(F::ITALIC),
            24 => self.flags.remove(F::UNDERLINE | F::DOUBLE_UNDERLINE),
            25 => self.flags.remove(F::BLINK),
            27 => self.flags.remove(F::NEGATIVE),
            29 => self.flags.remove(F::STRIKE),
            30..=37 => self.fg = (code - 30) as u8,
            39 => self.fg = DEFAULT_FG,
            40..=47 => self.bg = (code - 40) as u8,
            49 => self.bg = DEFAULT_BG,
            90..=97 => {
                self.flags.insert(F::BRIGHT);
                self.flags.remove(F::FAINT);
                self.fg = (code - 90) as u8;
            }
            100..=107 => self.bg = (code - 92) as u8,
            // 8 (conceal) and everything else
            _ => {}
        }
    }

    /// Class list a markup renderer attaches to a span, e.g.
    /// `"italic underline c9 b4"`. Default colors and font add nothing.
    pub fn css_classes(&self, config: &InterpreterConfig) -> String {
        let style = self.effective();
        let names = [
            (AttributeFlags::ITALIC, "italic"),
            (AttributeFlags::BLINK, "blink"),
            (AttributeFlags::UNDERLINE, "underline"),
            (AttributeFlags::DOUBLE_UNDERLINE, "doubleunderline"),
            (AttributeFlags::FAINT, "faint"),
            (AttributeFlags::STRIKE, "strike"),
        ];
        let mut classes: Vec<String> = names
            .iter()
            .filter(|(flag, _)| style.flags.contains(*flag))
            .map(|(_, name)| (*name).to_string())
            .collect();
        if style.font != 0 {
            classes.push(format!("{}{}", config.font_class, style.font));
        }
        if style.fg != DEFAULT_FG {
            classes.push(format!("{}{}", config.fg_class, style.fg));
        }
        if style.bg != DEFAULT_BG {
            classes.push(format!("{}{}", config.bg_class, style.bg));
        }
        classes.join(" ")
    }
}

/// Reads the selector and color after a 38 or 48.
///
/// `None` means the parameters ran out. `Some(None)` means a color form
/// that is consumed but not modeled (24 bit `2;r;g;b`, or an index above
/// 255).
fn extended_color<I>(iter: &mut I) -> Option<Option<u8>>
where
    I: Iterator<Item = Option<u16>>,
{
    match iter.next()? {
        Some(5) => Some(iter.next()?.and_then(|index| u8::try_from(index).ok())),
        Some(2) => {
            for _ in 0..3 {
                iter.next()?;
            }
            Some(None)
        }
        _ => Some(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sgr(state: &mut AttributeState, params: &[u16]) -> bool {
        state.apply_sgr(params.iter().copied().map(Some))
    }

    #[test]
    fn bright_red_then_reset() {
        let mut state = AttributeState::default();
        assert!(sgr(&mut state, &[1, 31]));
        assert_eq!(state.flags, AttributeFlags::BRIGHT);
        assert_eq!(state.fg, 1);
        assert_eq!(state.effective_fg(), 9);

        assert!(sgr(&mut state, &[0]));
        assert!(state.is_default());
    }

    #[test]
    fn empty_parameter_list_resets() {
        let mut state = AttributeState::default();
        sgr(&mut state, &[4, 44]);
        assert!(state.apply_sgr(std::iter::empty()));
        assert!(state.is_default());
    }

    #[test]
    fn bright_and_faint_exclude_each_other() {
        let mut state = AttributeState::default();
        sgr(&mut state, &[1, 2]);
        assert_eq!(state.flags, AttributeFlags::FAINT);
        sgr(&mut state, &[1]);
        assert_eq!(state.flags, AttributeFlags::BRIGHT);
        sgr(&mut state, &[22]);
        assert!(state.flags.is_empty());
    }

    #[test]
    fn underline_kinds_exclude_each_other() {
        let mut state = AttributeState::default();
        sgr(&mut state, &[4, 21]);
        assert_eq!(state.flags, AttributeFlags::DOUBLE_UNDERLINE);
        sgr(&mut state, &[4]);
        assert_eq!(state.flags, AttributeFlags::UNDERLINE);
        sgr(&mut state, &[24]);
        assert!(state.flags.is_empty());
    }

    #[test]
    fn flags_on_and_off() {
        let mut state = AttributeState::default();
        sgr(&mut state, &[3, 5, 7, 9]);
        assert_eq!(
            state.flags,
            AttributeFlags::ITALIC | AttributeFlags::BLINK | AttributeFlags::NEGATIVE | AttributeFlags::STRIKE
        );
        sgr(&mut state, &[23, 25, 27, 29]);
        assert!(state.flags.is_empty());
    }

    #[test]
    fn colors_fonts_and_defaults() {
        let mut state = AttributeState::default();
        sgr(&mut state, &[33, 45, 12]);
        assert_eq!((state.fg, state.bg, state.font), (3, 5, 2));
        sgr(&mut state, &[39, 49]);
        assert_eq!((state.fg, state.bg), (7, 0));
    }

    #[test]
    fn aixterm_bright_colors() {
        let mut state = AttributeState::default();
        sgr(&mut state, &[2, 94, 103]);
        assert_eq!(state.flags, AttributeFlags::BRIGHT);
        assert_eq!((state.fg, state.bg), (4, 11));
        assert_eq!(state.effective_fg(), 12);
    }

    #[test]
    fn xterm_256_colors() {
        let mut state = AttributeState::default();
        sgr(&mut state, &[38, 5, 208, 48, 5, 17]);
        assert_eq!((state.fg, state.bg), (208, 17));

        sgr(&mut state, &[1]);
        assert_eq!(state.effective_fg(), 208, "bright only lifts the low eight");
    }

    #[test]
    fn truecolor_is_consumed_and_ignored() {
        let mut state = AttributeState::default();
        sgr(&mut state, &[38, 2, 255, 0, 0, 4]);
        assert_eq!(state.fg, 7);
        assert_eq!(state.flags, AttributeFlags::UNDERLINE);
    }

    #[test]
    fn truncated_extended_color_stops() {
        let mut state = AttributeState::default();
        sgr(&mut state, &[4, 38, 5]);
        assert_eq!(state.fg, 7);
        assert_eq!(state.flags, AttributeFlags::UNDERLINE);
    }

    #[test]
    fn unknown_codes_change_nothing() {
        let mut state = AttributeState::default();
        assert!(!sgr(&mut state, &[8, 26, 53, 60]));
        assert!(!state.apply_sgr([None]));
        assert!(state.is_default());
    }

    #[test]
    fn negative_swaps_after_bright() {
        let mut state = AttributeState::default();
        sgr(&mut state, &[1, 32, 44, 7]);
        assert_eq!(state.effective_fg(), 4);
        assert_eq!(state.effective_bg(), 10);
    }

    #[test]
    fn long_parameter_lists_apply_every_code() {
        let mut state = AttributeState::default();
        let mut params = vec![22; 16];
        params.push(31);
        assert!(sgr(&mut state, &params));
        assert_eq!(state.fg, 1);
    }

    #[test]
    fn change_reports_effective_difference_only() {
        let mut state = AttributeState::default();
        assert!(!sgr(&mut state, &[37]), "37 is the default foreground");
        assert!(!sgr(&mut state, &[31, 37]));
    }

    #[test]
    fn css_classes_follow_prefixes() {
        let config = InterpreterConfig::default();
        let mut state = AttributeState::default();
        assert_eq!(state.css_classes(&config), "");
        sgr(&mut state, &[1, 3, 31, 44, 11]);
        assert_eq!(state.css_classes(&config), "italic fnt1 c9 b4");
    }
}
