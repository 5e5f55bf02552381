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

//! # DecafMUD Telnet Codec
//!
//! Telnet framing and option negotiation for a MUD client, tolerant of data
//! arriving in arbitrary chunks over a long lived connection.
//!
//! ## Layers
//!
//! ### [`TelnetCodec`]
//!
//! A `tokio_util` [`Decoder`](tokio_util::codec::Decoder) and
//! [`Encoder`](tokio_util::codec::Encoder) that splits the raw stream into
//! [`TelnetFrame`]s. It keeps no state of its own: an incomplete command
//! stays in the caller's `BytesMut` until the rest arrives, so it can run
//! under `FramedRead` or be fed by hand.
//!
//! ### [`TelnetEngine`]
//!
//! Owns one connection's receive buffer, [`OptionStates`], codec registry
//! and option handlers. [`TelnetEngine::receive`] turns incoming bytes into
//! decoded text and answers negotiations through a [`TelnetHost`].
//! Unregistered options are always refused: `DO` gets `WONT` and `WILL`
//! gets `DONT`.
//!
//! ### [`OptionHandler`]
//!
//! Per option logic. Built in:
//!
//! | Option            | Handler                          |
//! |-------------------|----------------------------------|
//! | TRANSMIT-BINARY   | [`FlagHandler`]                  |
//! | ECHO              | [`EchoHandler`]                  |
//! | TERMINAL-TYPE     | [`TerminalTypeHandler`]          |
//! | NAWS              | [`NawsHandler`]                  |
//! | CHARSET           | [`CharsetHandler`]               |
//! | MSDP              | [`MsdpHandler`]                  |
//! | GMCP              | [`GmcpHandler`]                  |
//! | ZMP               | [`ZmpHandler`]                   |
//! | MSSP (debug only) | [`MsspHandler`]                  |
//!
//! Handlers never answer a negotiation from inside the dispatch that
//! triggered it. They queue a task, and [`TelnetEngine::run_deferred`] runs
//! it afterwards.
//!
//! ## Example
//!
//! ```
//! use decafmud_telnetcodec::{TelnetConfig, TelnetEngine, TelnetHost};
//! use std::time::Instant;
//!
//! struct Wire(Vec<u8>);
//!
//! impl TelnetHost for Wire {
//!     fn send(&mut self, bytes: &[u8]) {
//!         self.0.extend_from_slice(bytes);
//!     }
//! }
//!
//! let mut engine = TelnetEngine::with_default_handlers(TelnetConfig::default());
//! let mut wire = Wire(Vec::new());
//! let now = Instant::now();
//!
//! // The server asks for our terminal type, split over two reads.
//! assert_eq!(engine.receive(now, b"Hello\xFF\xFD", &mut wire), "Hello");
//! assert_eq!(engine.receive(now, b"\x18", &mut wire), "");
//! assert_eq!(wire.0, b"\xFF\xFB\x18");
//! ```
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 1073: Negotiate About Window Size
//! - RFC 1091: Terminal Type Option
//! - RFC 2066: Charset Option

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation
)]

mod args;
mod codec;
pub mod consts;
mod config;
mod debug;
mod deferred;
mod engine;
mod frame;
mod handler;
mod handlers;
mod options;
mod result;
mod trace;

pub use self::args::{charset, gmcp, msdp, naws, zmp};
pub use self::codec::TelnetCodec;
pub use self::config::TelnetConfig;
pub use self::debug::{command_name, debug_iac};
pub use self::deferred::{DeferredQueue, DeferredTask};
pub use self::engine::TelnetEngine;
pub use self::frame::TelnetFrame;
pub use self::handler::{
    HandlerContext, HandlerRegistry, HandlerResponse, OptionHandler, TelnetHost,
};
pub use self::handlers::{
    CharsetHandler, CommandTree, EchoHandler, FlagHandler, GmcpCommand, GmcpHandler,
    MsdpHandler, MsspHandler, NawsHandler, TerminalTypeHandler, ZmpCommand, ZmpHandler,
};
pub use self::options::{OptionState, OptionStates, TelnetOption};
pub use self::result::{CodecError, CodecResult, SubnegotiationErrorKind};
pub use self::trace::{CollectingSink, TraceLevel, TraceSink, TracingSink};
