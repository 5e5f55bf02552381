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

//! # DecafMUD Client Session
//!
//! Glue between the protocol crates and the outside world. A [`Session`]
//! owns a [`TelnetEngine`](decafmud_telnetcodec::TelnetEngine) and a
//! [`TerminalInterpreter`](decafmud_ansicodec::TerminalInterpreter) for one
//! server and talks to three collaborators:
//!
//! - a [`Transport`] that moves bytes,
//! - a [`Renderer`] that shows [`TerminalOutput`] and knows the window size,
//! - a [`TraceSink`] for negotiation and connection diagnostics.
//!
//! ## Features
//!
//! - **Negotiation** - TTYPE, NAWS, ECHO, CHARSET, MSDP, GMCP and ZMP out of the box
//! - **Reconnection** - connect timeout and reconnect delay with a bounded number of tries
//! - **Chunk Tolerant** - telnet commands, multi-byte characters and escape
//!   sequences may be split across deliveries
//! - **Runtime Agnostic** - nothing blocks; timers are reported through
//!   [`Session::next_deadline`] and run by [`Session::poll`]
//!
//! ## Quick Start
//!
//! ```
//! use decafmud_client::{ClientConfig, Renderer, Session, TerminalOutput, Transport};
//! use std::io;
//! use std::time::Instant;
//!
//! #[derive(Default)]
//! struct Socket(Vec<u8>);
//!
//! impl Transport for Socket {
//!     fn connect(&mut self, _host: &str, _port: u16) -> io::Result<()> {
//!         Ok(())
//!     }
//!     fn close(&mut self) {}
//!     fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
//!         self.0.extend_from_slice(bytes);
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Screen(Vec<TerminalOutput>);
//!
//! impl Renderer for Screen {
//!     fn display(&mut self, output: &[TerminalOutput]) {
//!         self.0.extend_from_slice(output);
//!     }
//! }
//!
//! let config = ClientConfig::new("mud.example.org", 4000).with_autoreconnect(false);
//! let mut session = Session::new(config, Socket::default(), Screen::default());
//! let now = Instant::now();
//!
//! session.on_ready(now)?;
//! session.on_connected(now);
//! session.handle_incoming(now, b"\x1b[1;32mWelcome!\x1b[0m\r\n");
//! session.send_input("look")?;
//!
//! assert_eq!(session.renderer().0.len(), 2);
//! assert_eq!(session.transport().0, b"look\r\n");
//! # Ok::<(), decafmud_client::ClientError>(())
//! ```

mod config;
mod error;
mod handler;
mod session;

pub use config::ClientConfig;
pub use decafmud_ansicodec::{AttributedSegment, InterpreterConfig, TerminalOutput};
pub use decafmud_telnetcodec::naws::WindowSize;
pub use decafmud_telnetcodec::{TelnetConfig, TraceLevel, TraceSink, TracingSink};
pub use error::{ClientError, ClientResult};
pub use handler::{Renderer, Transport};
pub use session::Session;
