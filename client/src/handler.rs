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

//! Collaborator traits
//!
//! A [`Session`](crate::Session) never touches a socket or a screen itself.
//! It drives a [`Transport`] for bytes and a [`Renderer`] for output, and
//! expects the embedding application to feed transport events back through
//! the session's `on_*` callbacks.

use decafmud_ansicodec::TerminalOutput;
use decafmud_telnetcodec::naws::WindowSize;
use std::io;

/// The byte pipe to the server.
///
/// Implementations start work and return; completion is reported back by
/// calling [`Session::on_connected`](crate::Session::on_connected),
/// [`Session::on_closed`](crate::Session::on_closed),
/// [`Session::handle_incoming`](crate::Session::handle_incoming) or
/// [`Session::on_error`](crate::Session::on_error).
///
/// # Example
///
/// ```
/// use decafmud_client::Transport;
/// use std::io;
///
/// #[derive(Default)]
/// struct Loopback {
///     open: bool,
///     written: Vec<u8>,
/// }
///
/// impl Transport for Loopback {
///     fn connect(&mut self, _host: &str, _port: u16) -> io::Result<()> {
///         self.open = true;
///         Ok(())
///     }
///
///     fn close(&mut self) {
///         self.open = false;
///     }
///
///     fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
///         self.written.extend_from_slice(bytes);
///         Ok(())
///     }
/// }
/// ```
pub trait Transport {
    /// Starts connecting to `host:port`.
    fn connect(&mut self, host: &str, port: u16) -> io::Result<()>;

    /// Drops the connection, if any.
    fn close(&mut self);

    /// Writes wire-ready bytes.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// Where interpreted output goes.
pub trait Renderer {
    /// Shows interpreted output, in order.
    fn display(&mut self, output: &[TerminalOutput]);

    /// Current size of the output area in character cells, if it has been
    /// measured.
    fn terminal_size(&self) -> Option<WindowSize> {
        None
    }

    /// Turns local echo of typed input on or off.
    fn set_local_echo(&mut self, _enabled: bool) {}
}
