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

/// Default notice shown the first time an unemulated VT100 command arrives.
pub const VT100_WARNING: &str =
    "Notice: This display handler only provides a subset of VT100, and doesn't handle cursor movement commands.";

///
/// Terminal Interpreter Configuration
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterpreterConfig {
    /// Notice emitted once per session for recognized but unemulated VT100
    /// commands
    pub vt100_warning: String,
    /// Notice emitted once per session for `ESC [1K`
    pub erase_to_start_warning: String,
    /// Class prefix for foreground colors
    pub fg_class: String,
    /// Class prefix for background colors
    pub bg_class: String,
    /// Class prefix for alternate fonts
    pub font_class: String,
}

impl InterpreterConfig {
    /// Replaces the VT100 capability notice.
    pub fn with_vt100_warning<S: Into<String>>(mut self, warning: S) -> Self {
        self.vt100_warning = warning.into();
        self
    }

    /// Replaces the erase to start of line notice.
    pub fn with_erase_to_start_warning<S: Into<String>>(mut self, warning: S) -> Self {
        self.erase_to_start_warning = warning.into();
        self
    }

    /// Sets the foreground, background and font class prefixes.
    pub fn with_class_prefixes<S: Into<String>>(mut self, fg: S, bg: S, font: S) -> Self {
        self.fg_class = fg.into();
        self.bg_class = bg.into();
        self.font_class = font.into();
        self
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            vt100_warning: VT100_WARNING.to_string(),
            erase_to_start_warning: "Notice: Erasing to the start of a line (ESC [1K) is not supported.".to_string(),
            fg_class: "c".to_string(),
            bg_class: "b".to_string(),
            font_class: "fnt".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = InterpreterConfig::default();
        assert_eq!(config.vt100_warning, VT100_WARNING);
        assert_eq!((config.fg_class.as_str(), config.bg_class.as_str()), ("c", "b"));
        assert_eq!(config.font_class, "fnt");
    }

    #[test]
    fn builders() {
        let config = InterpreterConfig::default()
            .with_vt100_warning("no cursor")
            .with_class_prefixes("fg-", "bg-", "font-");
        assert_eq!(config.vt100_warning, "no cursor");
        assert_eq!(config.fg_class, "fg-");
        assert_eq!(config.font_class, "font-");
    }
}
