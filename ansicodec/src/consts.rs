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

//! Control characters and limits used while scanning terminal output.

/// Escape, the first character of every sequence.
pub const ESC: char = '\x1B';

/// Bell, one of the two OSC terminators.
pub const BEL: char = '\x07';

/// Second character of a Control Sequence Introducer (`ESC [`).
pub const CSI: char = '[';

/// Second character of an Operating System Command (`ESC ]`).
pub const OSC: char = ']';

/// Second character of the String Terminator (`ESC \`).
pub const ST: char = '\\';

/// Maximum length of an escape sequence in bytes, introducer included.
///
/// A sequence whose terminator has not shown up within this many bytes is
/// treated as malformed and its `ESC` dropped, so a stray introducer cannot
/// hold back the rest of the output forever.
pub const MAX_SEQUENCE_LENGTH: usize = 256;

/// Maximum length of an OSC sequence in bytes, introducer included.
///
/// Window titles and hyperlinks routinely exceed [`MAX_SEQUENCE_LENGTH`].
pub const MAX_OSC_LENGTH: usize = 4096;

/// CSI final bytes of VT100 commands that are recognized but not emulated.
pub const VT100_COMMANDS: &str = "ABCDEFGHJKSTfnsulh";

/// Default foreground color index.
pub const DEFAULT_FG: u8 = 7;

/// Default background color index.
pub const DEFAULT_BG: u8 = 0;
