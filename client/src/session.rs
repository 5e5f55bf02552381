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

//! One connection's worth of protocol state.

use crate::{ClientConfig, ClientError, ClientResult, Renderer, Transport};
use decafmud_ansicodec::TerminalInterpreter;
use decafmud_telnetcodec::naws::WindowSize;
use decafmud_telnetcodec::{TelnetEngine, TelnetHost, TraceLevel, TraceSink, TracingSink};
use std::time::Instant;
use tracing::debug;

/// The collaborators as the telnet engine sees them.
#[derive(Debug)]
struct Collaborators<T, R, S> {
    transport: T,
    renderer: R,
    sink: S,
}

impl<T: Transport, R: Renderer, S: TraceSink> TelnetHost for Collaborators<T, R, S> {
    fn send(&mut self, bytes: &[u8]) {
        if let Err(err) = self.transport.write(bytes) {
            self.sink
                .trace(TraceLevel::Error, &format!("Unable to write to the socket: {err}"));
        }
    }

    fn window_size(&self) -> Option<WindowSize> {
        self.renderer.terminal_size()
    }

    fn set_local_echo(&mut self, enabled: bool) {
        self.renderer.set_local_echo(enabled);
    }

    fn trace(&mut self, level: TraceLevel, message: &str) {
        self.sink.trace(level, message);
    }
}

/// Ties a [`TelnetEngine`] and a [`TerminalInterpreter`] to a [`Transport`],
/// a [`Renderer`] and a [`TraceSink`].
///
/// The session is driven entirely from outside. The application forwards
/// transport events to the `on_*` callbacks and [`Session::handle_incoming`],
/// and calls [`Session::poll`] whenever [`Session::next_deadline`] passes.
/// Every call runs to completion before returning.
#[derive(Debug)]
pub struct Session<T, R, S = TracingSink> {
    config: ClientConfig,
    engine: TelnetEngine,
    interpreter: TerminalInterpreter,
    io: Collaborators<T, R, S>,
    socket_ready: bool,
    connecting: bool,
    connected: bool,
    connect_try: u32,
    connect_deadline: Option<Instant>,
    reconnect_at: Option<Instant>,
}

impl<T: Transport, R: Renderer> Session<T, R, TracingSink> {
    /// Creates a session that traces through `tracing`.
    pub fn new(config: ClientConfig, transport: T, renderer: R) -> Self {
        Session::with_sink(config, transport, renderer, TracingSink)
    }
}

impl<T: Transport, R: Renderer, S: TraceSink> Session<T, R, S> {
    /// Creates a session reporting diagnostics to `sink`.
    pub fn with_sink(config: ClientConfig, transport: T, renderer: R, sink: S) -> Self {
        let engine = TelnetEngine::with_default_handlers(config.telnet.clone());
        let interpreter = TerminalInterpreter::new(config.interpreter.clone());
        Session {
            config,
            engine,
            interpreter,
            io: Collaborators {
                transport,
                renderer,
                sink,
            },
            socket_ready: false,
            connecting: false,
            connected: false,
            connect_try: 0,
            connect_deadline: None,
            reconnect_at: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn engine(&self) -> &TelnetEngine {
        &self.engine
    }

    /// Mutable access for registering extra option handlers.
    pub fn engine_mut(&mut self) -> &mut TelnetEngine {
        &mut self.engine
    }

    pub fn interpreter(&self) -> &TerminalInterpreter {
        &self.interpreter
    }

    pub fn transport(&self) -> &T {
        &self.io.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.io.transport
    }

    pub fn renderer(&self) -> &R {
        &self.io.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.io.renderer
    }

    pub fn sink(&self) -> &S {
        &self.io.sink
    }

    pub fn is_socket_ready(&self) -> bool {
        self.socket_ready
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Failed attempts since the last successful connection.
    pub fn connect_try(&self) -> u32 {
        self.connect_try
    }

    /// The transport can now be used. Connects straight away when
    /// `autoconnect` is set.
    pub fn on_ready(&mut self, now: Instant) -> ClientResult<()> {
        self.trace(TraceLevel::Debug, "The socket is ready.");
        self.socket_ready = true;
        if self.config.autoconnect {
            self.connect(now)?;
        }
        Ok(())
    }

    /// Starts connecting unless a connection is already up or underway.
    ///
    /// # Errors
    ///
    /// [`ClientError::TransportNotReady`] before [`Session::on_ready`], or the
    /// transport's own error if it refuses to start.
    pub fn connect(&mut self, now: Instant) -> ClientResult<()> {
        if self.connecting || self.connected {
            return Ok(());
        }
        if !self.socket_ready {
            return Err(ClientError::TransportNotReady);
        }

        self.connecting = true;
        self.connect_try = 0;
        self.trace(TraceLevel::Info, "Attempting to connect...");
        self.connect_deadline = Some(now + self.config.connect_timeout);
        if let Err(err) = self.io.transport.connect(&self.config.host, self.config.port) {
            self.connecting = false;
            self.connect_deadline = None;
            return Err(err.into());
        }
        Ok(())
    }

    /// The transport finished connecting.
    pub fn on_connected(&mut self, now: Instant) {
        self.connect_deadline = None;
        self.reconnect_at = None;
        self.connecting = false;
        self.connected = true;
        self.connect_try = 0;

        let message = format!(
            "The socket has connected successfully to {}.",
            self.config.address()
        );
        self.trace(TraceLevel::Info, &message);

        self.engine.connect(now, &mut self.io);
        self.engine.run_deferred(now, &mut self.io);
    }

    /// The transport lost its connection, or never made one.
    ///
    /// Every per-connection buffer is dropped so a reconnect starts clean.
    pub fn on_closed(&mut self, now: Instant) {
        self.connect_deadline = None;
        self.connecting = false;
        self.connected = false;
        self.trace(TraceLevel::Info, "The socket has disconnected.");

        self.engine.disconnect(now, &mut self.io);
        self.interpreter.discard_pending();

        if self.config.autoreconnect {
            self.connect_try += 1;
            if self.connect_try < self.config.reconnect_tries {
                self.reconnect_at = Some(now + self.config.reconnect_delay);
                let message = format!(
                    "Reconnecting in {:?} (attempt {})...",
                    self.config.reconnect_delay, self.connect_try
                );
                self.trace(TraceLevel::Info, &message);
            } else {
                let err = ClientError::ReconnectionFailed(self.connect_try);
                self.trace(TraceLevel::Warn, &err.to_string());
            }
        }
    }

    /// The transport reported a failure.
    pub fn on_error(&mut self, info: &str) {
        self.trace(TraceLevel::Error, info);
    }

    /// Feeds bytes from the transport through the telnet engine and the
    /// terminal interpreter, and hands the result to the renderer.
    ///
    /// Replies queued while the bytes were being negotiated run once the
    /// whole delivery has been processed.
    pub fn handle_incoming(&mut self, now: Instant, data: &[u8]) {
        let text = self.engine.receive(now, data, &mut self.io);
        if !text.is_empty() {
            let output = self.interpreter.process(&text);
            if !output.is_empty() {
                self.io.renderer.display(&output);
            }
        }
        self.engine.run_deferred(now, &mut self.io);
    }

    /// Sends a line of typed input.
    ///
    /// # Errors
    ///
    /// [`ClientError::TransportNotReady`] while not connected. Nothing is
    /// queued for later.
    pub fn send_input(&mut self, text: &str) -> ClientResult<()> {
        if !self.connected {
            return Err(ClientError::TransportNotReady);
        }
        let line = self.engine.encode_input(text);
        debug!("Sending {} bytes of input", line.len());
        self.io.transport.write(&line)?;
        Ok(())
    }

    /// Switches the character encoding for both directions.
    pub fn set_encoding(&mut self, name: &str) -> ClientResult<()> {
        self.engine.set_encoding(name)?;
        Ok(())
    }

    /// The renderer's size changed; reports it over NAWS when negotiated.
    pub fn window_resized(&mut self, now: Instant) {
        self.engine.window_resized(now);
        self.engine.run_deferred(now, &mut self.io);
    }

    /// Runs whatever is due at `now`: queued option work, the connect
    /// timeout and a pending reconnect.
    pub fn poll(&mut self, now: Instant) {
        self.engine.run_deferred(now, &mut self.io);

        if self.connect_deadline.is_some_and(|deadline| deadline <= now) {
            self.connect_timed_out(now);
        }
        if self.reconnect_at.is_some_and(|at| at <= now) {
            self.reconnect();
        }
    }

    /// The earliest instant [`Session::poll`] has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.engine.next_deadline(),
            self.connect_deadline,
            self.reconnect_at,
        ]
        .into_iter()
        .flatten()
        .min()
    }

    fn connect_timed_out(&mut self, now: Instant) {
        self.connect_deadline = None;
        self.connect_try += 1;
        // The final attempt is left to finish or fail on its own.
        if self.connect_try > self.config.reconnect_tries {
            let err = ClientError::ReconnectionFailed(self.connect_try);
            self.trace(TraceLevel::Warn, &err.to_string());
            return;
        }

        self.io.transport.close();
        if let Err(err) = self.io.transport.connect(&self.config.host, self.config.port) {
            self.on_error(&err.to_string());
        }
        self.connect_deadline = Some(now + self.config.connect_timeout);
    }

    fn reconnect(&mut self) {
        self.reconnect_at = None;
        if self.connecting || self.connected {
            return;
        }
        self.connecting = true;
        self.trace(TraceLevel::Info, "Attempting to connect...");
        if let Err(err) = self.io.transport.connect(&self.config.host, self.config.port) {
            self.connecting = false;
            self.on_error(&err.to_string());
        }
    }

    fn trace(&mut self, level: TraceLevel, message: &str) {
        self.io.sink.trace(level, message);
    }
}
