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

//! Human readable rendering of raw telnet sequences for trace output.

use crate::{TelnetOption, consts};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Vocabulary {
    Command,
    Option,
    TerminalType,
    Mssp,
    Msdp,
    WindowSize,
    Charset,
    Zmp,
}

#[derive(Default)]
struct Words {
    out: String,
    quoted: bool,
}

impl Words {
    fn word(&mut self, word: &str) {
        self.close_quote();
        self.out.push_str(word);
        self.out.push(' ');
    }

    fn quoted(&mut self, byte: u8) {
        if !self.quoted {
            self.quoted = true;
            self.out.push('"');
        }
        self.out.push(char::from(byte));
    }

    fn close_quote(&mut self) {
        if self.quoted {
            self.quoted = false;
            self.out.push_str("\" ");
        }
    }

    fn finish(mut self) -> String {
        if self.out.ends_with(' ') {
            self.out.pop();
        }
        self.out
    }
}

/// Name of a telnet command byte, or `None` if `byte` is not one.
pub fn command_name(byte: u8) -> Option<&'static str> {
    match byte {
        consts::IAC => Some("IAC"),
        consts::DONT => Some("DONT"),
        consts::DO => Some("DO"),
        consts::WONT => Some("WONT"),
        consts::WILL => Some("WILL"),
        consts::SB => Some("SB"),
        consts::SE => Some("SE"),
        _ => None,
    }
}

fn word_for(byte: u8) -> String {
    command_name(byte)
        .or_else(|| TelnetOption::from_u8(byte).trace_name())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{:02x}", byte))
}

/// Renders a raw telnet sequence as words.
///
/// Command bytes and option codes become their names, unknown bytes become two
/// digit hex. Inside a subnegotiation the payload is rendered in the option's
/// own vocabulary: terminal type `SEND`/`IS`, MSSP and MSDP structure markers,
/// window sizes as decimal numbers, CHARSET verbs and ZMP `NUL` separators.
/// Runs of printable payload are wrapped in double quotes.
///
/// ```
/// use decafmud_telnetcodec::debug_iac;
///
/// assert_eq!(debug_iac(b"\xFF\xFD\x18"), "IAC DO TERMINAL-TYPE");
/// assert_eq!(
///     debug_iac(b"\xFF\xFA\x18\x00xterm\xFF\xF0"),
///     "IAC SB TERMINAL-TYPE IS \"xterm\" IAC SE"
/// );
/// ```
pub fn debug_iac(seq: &[u8]) -> String {
    let mut words = Words::default();
    let mut vocabulary = Vocabulary::Command;
    let mut high: Option<u32> = None;

    for &byte in seq {
        match vocabulary {
            Vocabulary::TerminalType => match byte {
                consts::SEND => words.word("SEND"),
                consts::IS => words.word("IS"),
                consts::IAC => {
                    words.word("IAC");
                    vocabulary = Vocabulary::Command;
                }
                _ => words.quoted(byte),
            },
            Vocabulary::Mssp | Vocabulary::Msdp => match byte {
                consts::IAC => {
                    words.word("IAC");
                    vocabulary = Vocabulary::Command;
                }
                consts::msdp::TABLE_OPEN => words.word("MSDP_OPEN"),
                consts::msdp::TABLE_CLOSE => words.word("MSDP_CLOSE"),
                consts::msdp::VAR | consts::msdp::VAL => {
                    let prefix = if vocabulary == Vocabulary::Mssp { "MSSP" } else { "MSDP" };
                    let suffix = if byte == consts::msdp::VAR { "VAR" } else { "VAL" };
                    words.word(&format!("{prefix}_{suffix}"));
                }
                _ => words.quoted(byte),
            },
            Vocabulary::WindowSize => {
                if byte == consts::IAC {
                    high = None;
                    words.word("IAC");
                    vocabulary = Vocabulary::Command;
                } else if let Some(value) = high.take() {
                    words.word(&(value + u32::from(byte)).to_string());
                } else {
                    high = Some(u32::from(byte) * 255);
                }
            }
            Vocabulary::Charset => match byte {
                consts::IAC => {
                    words.word("IAC");
                    vocabulary = Vocabulary::Command;
                }
                1 => words.word("REQUEST"),
                2 => words.word("ACCEPTED"),
                3 => words.word("REJECTED"),
                4 => words.word("TTABLE-IS"),
                5 => words.word("TTABLE-REJECTED"),
                6 => words.word("TTABLE-ACK"),
                7 => words.word("TTABLE-NAK"),
                _ => words.quoted(byte),
            },
            Vocabulary::Zmp => match byte {
                consts::IAC => {
                    words.word("IAC");
                    vocabulary = Vocabulary::Command;
                }
                0 => words.word("NUL"),
                _ => words.quoted(byte),
            },
            Vocabulary::Command => {
                words.word(&word_for(byte));
                if byte == consts::SB {
                    vocabulary = Vocabulary::Option;
                }
            }
            Vocabulary::Option => {
                words.word(&word_for(byte));
                vocabulary = match byte {
                    consts::option::TTYPE | consts::option::TSPEED => Vocabulary::TerminalType,
                    consts::option::MSSP => Vocabulary::Mssp,
                    consts::option::MSDP => Vocabulary::Msdp,
                    consts::option::NAWS => Vocabulary::WindowSize,
                    consts::option::CHARSET | consts::option::SNDLOC | consts::option::GMCP => {
                        Vocabulary::Charset
                    }
                    consts::option::ZMP => Vocabulary::Zmp,
                    _ => Vocabulary::Command,
                };
            }
        }
    }

    words.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negotiation_words() {
        assert_eq!(debug_iac(b"\xFF\xFB\x01"), "IAC WILL ECHO");
        assert_eq!(debug_iac(b"\xFF\xFE\x02"), "IAC DONT 02");
        assert_eq!(debug_iac(b"\xFF\xFD\xC9"), "IAC DO GMCP");
    }

    #[test]
    fn terminal_type_send() {
        assert_eq!(
            debug_iac(b"\xFF\xFA\x18\x01\xFF\xF0"),
            "IAC SB TERMINAL-TYPE SEND IAC SE"
        );
    }

    #[test]
    fn window_size_uses_base_255() {
        assert_eq!(
            debug_iac(b"\xFF\xFA\x1F\x00\x50\x00\x18\xFF\xF0"),
            "IAC SB NEGOTIATE-ABOUT-WINDOW-SIZE 80 24 IAC SE"
        );
        assert_eq!(
            debug_iac(b"\xFF\xFA\x1F\x01\x05\x00\x18\xFF\xF0"),
            "IAC SB NEGOTIATE-ABOUT-WINDOW-SIZE 260 24 IAC SE"
        );
    }

    #[test]
    fn msdp_markers() {
        assert_eq!(
            debug_iac(b"\xFF\xFAE\x01LIST\x02COMMANDS\xFF\xF0"),
            "IAC SB MSDP MSDP_VAR \"LIST\" MSDP_VAL \"COMMANDS\" IAC SE"
        );
        assert_eq!(
            debug_iac(b"\xFF\xFAF\x01NAME\x02Mud\xFF\xF0"),
            "IAC SB MSSP MSSP_VAR \"NAME\" MSSP_VAL \"Mud\" IAC SE"
        );
        assert_eq!(
            debug_iac(b"\xFF\xFAE\x01ROOM\x02\x03\x01VNUM\x026008\x04\xFF\xF0"),
            "IAC SB MSDP MSDP_VAR \"ROOM\" MSDP_VAL MSDP_OPEN MSDP_VAR \"VNUM\" MSDP_VAL \"6008\" MSDP_CLOSE IAC SE"
        );
    }

    #[test]
    fn charset_request() {
        assert_eq!(
            debug_iac(b"\xFF\xFA\x2A\x01 UTF-8 ISO-8859-1\xFF\xF0"),
            "IAC SB CHARSET REQUEST \" UTF-8 ISO-8859-1\" IAC SE"
        );
        assert_eq!(
            debug_iac(b"\xFF\xFA\x2A\x02UTF-8\xFF\xF0"),
            "IAC SB CHARSET ACCEPTED \"UTF-8\" IAC SE"
        );
    }

    #[test]
    fn zmp_fields() {
        assert_eq!(
            debug_iac(b"\xFF\xFA]zmp.ping\x00\xFF\xF0"),
            "IAC SB ZMP \"zmp.ping\" NUL IAC SE"
        );
    }

    #[test]
    fn unterminated_text_keeps_last_character() {
        assert_eq!(debug_iac(b"\xFF\xFA\x18\x00xterm"), "IAC SB TERMINAL-TYPE IS \"xterm");
        assert_eq!(debug_iac(b""), "");
    }
}
