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

//! Telnet command bytes and option codes used on the wire.

/// Interpret As Command
pub const IAC: u8 = 255;
/// Refuse or stop an option on the peer side
pub const DONT: u8 = 254;
/// Request an option on the peer side
pub const DO: u8 = 253;
/// Refuse or stop an option on our side
pub const WONT: u8 = 252;
/// Offer an option on our side
pub const WILL: u8 = 251;
/// Subnegotiation Begin
pub const SB: u8 = 250;
/// Go Ahead
pub const GA: u8 = 249;
/// Erase Line
pub const EL: u8 = 248;
/// Erase Character
pub const EC: u8 = 247;
/// Are You There
pub const AYT: u8 = 246;
/// Abort Output
pub const AO: u8 = 245;
/// Interrupt Process
pub const IP: u8 = 244;
/// Break
pub const BRK: u8 = 243;
/// Data Mark
pub const DM: u8 = 242;
/// No Operation
pub const NOP: u8 = 241;
/// Subnegotiation End
pub const SE: u8 = 240;
/// End of Record
pub const EOR: u8 = 239;

/// Subnegotiation `IS` qualifier
pub const IS: u8 = 0;
/// Subnegotiation `SEND` qualifier
pub const SEND: u8 = 1;

/// Carriage Return
pub const CR: u8 = b'\r';
/// Line Feed
pub const LF: u8 = b'\n';

/// Option codes
pub mod option {
    /// Binary Transmission
    pub const BINARY: u8 = 0;
    /// Echo
    pub const ECHO: u8 = 1;
    /// Suppress Go Ahead
    pub const SGA: u8 = 3;
    /// Status
    pub const STATUS: u8 = 5;
    /// Timing Mark
    pub const TM: u8 = 6;
    /// Send Location
    pub const SNDLOC: u8 = 23;
    /// Terminal Type
    pub const TTYPE: u8 = 24;
    /// End of Record
    pub const EOR: u8 = 25;
    /// Negotiate About Window Size
    pub const NAWS: u8 = 31;
    /// Terminal Speed
    pub const TSPEED: u8 = 32;
    /// Remote Flow Control
    pub const LFLOW: u8 = 33;
    /// Linemode
    pub const LINEMODE: u8 = 34;
    /// Authentication
    pub const AUTH: u8 = 37;
    /// New Environment
    pub const NEWENV: u8 = 39;
    /// Charset
    pub const CHARSET: u8 = 42;
    /// MUD Server Data Protocol
    pub const MSDP: u8 = 69;
    /// MUD Server Status Protocol
    pub const MSSP: u8 = 70;
    /// MUD Client Compression v1
    pub const COMPRESS: u8 = 85;
    /// MUD Client Compression v2
    pub const COMPRESS2: u8 = 86;
    /// MUD Sound Protocol
    pub const MSP: u8 = 90;
    /// MUD eXtension Protocol
    pub const MXP: u8 = 91;
    /// Zenith MUD Protocol
    pub const ZMP: u8 = 93;
    /// Conquest extension
    pub const CONQUEST: u8 = 94;
    /// Achaea Telnet Client Protocol
    pub const ATCP: u8 = 200;
    /// Generic MUD Communication Protocol
    pub const GMCP: u8 = 201;
}

/// CHARSET subnegotiation verbs
pub mod charset {
    /// Offer a list of character sets
    pub const REQUEST: u8 = 1;
    /// Accept one offered character set
    pub const ACCEPTED: u8 = 2;
    /// Refuse every offered character set
    pub const REJECTED: u8 = 3;
    /// Translation table marker inside a request
    pub const TTABLE: &[u8] = b"TTABLE ";
}

/// MSDP and MSSP structure bytes
pub mod msdp {
    /// Variable name follows
    pub const VAR: u8 = 1;
    /// Variable value follows
    pub const VAL: u8 = 2;
    /// Opens a nested table
    pub const TABLE_OPEN: u8 = 3;
    /// Closes a nested table
    pub const TABLE_CLOSE: u8 = 4;
    /// Opens an array (decoded as repeated values)
    pub const ARRAY_OPEN: u8 = 5;
    /// Closes an array
    pub const ARRAY_CLOSE: u8 = 6;
}
