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

//! # DecafMUD ANSI Codec
//!
//! Interprets the terminal escape sequences in decoded MUD output. The
//! input is text that already went through telnet stripping and character
//! decoding; the output is a list of [`TerminalOutput`] items, mostly
//! [`AttributedSegment`]s, for a renderer to draw.
//!
//! Supported:
//!
//! - SGR attributes: intensity, italic, underline (single and double),
//!   blink, negative, strike, alternate fonts, the 16 ANSI colors, aixterm
//!   bright colors and xterm 256 color indexes
//! - `ESC [ n @` and `ESC [ n C` as runs of spaces, `ESC [ n E` as newlines
//! - `ESC [H` followed by `ESC [J`, and `ESC [2J`, as a full clear
//! - `ESC [2K` as erase line
//!
//! Other VT100 cursor commands are recognized and ignored after a one time
//! notice. OSC sequences are consumed and dropped.
//!
//! The crate also carries the MXP tag table ([`MxpTagTable`]); MXP itself is
//! not rendered.

pub mod consts;
mod config;
mod interpreter;
mod mxp;
mod parser;
mod result;
mod segment;
mod style;

pub use self::config::{InterpreterConfig, VT100_WARNING};
pub use self::interpreter::{TerminalInterpreter, TerminalOutput};
pub use self::mxp::{MxpArgument, MxpEntry, MxpTag, MxpTagTable};
pub use self::parser::{AnsiParser, AnsiToken, CsiSequence};
pub use self::result::{AnsiError, AnsiResult};
pub use self::segment::{AttributedSegment, shape_markup};
pub use self::style::{AttributeFlags, AttributeState, EffectiveStyle};
