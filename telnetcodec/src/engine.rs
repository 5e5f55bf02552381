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

//! The telnet engine.
//!
//! [`TelnetEngine`] owns the raw receive buffer, the option table, the
//! handler registry, the codec registry and the deferred task queue of one
//! connection. Every call runs to completion; handlers that want to answer
//! with a negotiation of their own queue a task and the answer goes out on
//! the next [`TelnetEngine::run_deferred`].

use crate::codec::{escape_into, write_frame};
use crate::deferred::DeferredQueue;
use crate::handlers::{
    CharsetHandler, EchoHandler, FlagHandler, GmcpHandler, MsdpHandler, NawsHandler,
    TerminalTypeHandler, ZmpHandler,
};
use crate::{
    CodecResult, HandlerContext, HandlerRegistry, HandlerResponse, OptionHandler, OptionState,
    OptionStates, TelnetCodec, TelnetConfig, TelnetFrame, TelnetHost, TelnetOption, TraceLevel,
    debug_iac,
};
use bytes::{Bytes, BytesMut};
use decafmud_charset::CodecRegistry;
use std::time::{Duration, Instant};
use tokio_util::codec::Decoder;
use tracing::{debug, trace};

/// State handlers may borrow while the engine holds on to the handler itself.
#[derive(Debug)]
struct EngineCore {
    config: TelnetConfig,
    codecs: CodecRegistry,
    deferred: DeferredQueue,
}

impl EngineCore {
    fn context<'a>(
        &'a mut self,
        option: TelnetOption,
        now: Instant,
        host: &'a mut dyn TelnetHost,
    ) -> HandlerContext<'a> {
        HandlerContext::new(
            option,
            now,
            &self.config,
            &mut self.codecs,
            &mut self.deferred,
            host,
        )
    }
}

/// Telnet protocol engine for one connection.
///
/// # Example
///
/// ```
/// use decafmud_telnetcodec::{TelnetConfig, TelnetEngine, TelnetHost};
/// use std::time::Instant;
///
/// #[derive(Default)]
/// struct Wire(Vec<u8>);
///
/// impl TelnetHost for Wire {
///     fn send(&mut self, bytes: &[u8]) {
///         self.0.extend_from_slice(bytes);
///     }
/// }
///
/// let mut engine = TelnetEngine::with_default_handlers(TelnetConfig::default());
/// let mut wire = Wire::default();
/// let text = engine.receive(Instant::now(), b"Welcome!\r\n\xFF\xFD\x63", &mut wire);
/// assert_eq!(text, "Welcome!\r\n");
/// // Option 99 is unknown, so it is refused.
/// assert_eq!(wire.0, b"\xFF\xFC\x63");
/// ```
#[derive(Debug)]
pub struct TelnetEngine {
    framer: TelnetCodec,
    raw: BytesMut,
    tail: Vec<u8>,
    options: OptionStates,
    handlers: HandlerRegistry,
    core: EngineCore,
}

impl TelnetEngine {
    /// Creates an engine with no handlers; every option is refused.
    pub fn new(config: TelnetConfig) -> TelnetEngine {
        let mut codecs = CodecRegistry::default();
        if let Err(err) = codecs.set_active(&config.default_encoding) {
            debug!("Keeping {}: {}", codecs.active().name(), err);
        }
        TelnetEngine {
            framer: TelnetCodec::new(),
            raw: BytesMut::new(),
            tail: Vec::new(),
            options: OptionStates::new(),
            handlers: HandlerRegistry::new(),
            core: EngineCore {
                config,
                codecs,
                deferred: DeferredQueue::new(),
            },
        }
    }

    /// Creates an engine with the built-in handlers for BINARY, ECHO, TTYPE,
    /// NAWS, CHARSET, MSDP, ZMP and GMCP. Debug builds also accept MSSP.
    pub fn with_default_handlers(config: TelnetConfig) -> TelnetEngine {
        let mut engine = TelnetEngine::new(config);
        engine.register(TelnetOption::TransmitBinary, FlagHandler);
        engine.register(TelnetOption::Echo, EchoHandler);
        engine.register(TelnetOption::TTYPE, TerminalTypeHandler::new());
        engine.register(TelnetOption::NAWS, NawsHandler::new());
        engine.register(TelnetOption::Charset, CharsetHandler);
        engine.register(TelnetOption::MSDP, MsdpHandler::new());
        engine.register(TelnetOption::ZMP, ZmpHandler::new());
        engine.register(TelnetOption::GMCP, GmcpHandler::new());
        #[cfg(debug_assertions)]
        engine.register(TelnetOption::MSSP, crate::handlers::MsspHandler);
        engine
    }

    /// Installs `handler` for `option`, replacing any previous one.
    pub fn register<H: OptionHandler>(&mut self, option: TelnetOption, handler: H) {
        self.handlers.register(option, Box::new(handler));
    }

    /// Removes the handler for `option`; it is refused from then on.
    pub fn unregister(&mut self, option: TelnetOption) {
        self.handlers.unregister(option);
    }

    /// The handler for `option` as its concrete type.
    pub fn handler<T: OptionHandler>(&self, option: TelnetOption) -> Option<&T> {
        self.handlers.get(option)
    }

    /// Mutable form of [`TelnetEngine::handler`].
    pub fn handler_mut<T: OptionHandler>(&mut self, option: TelnetOption) -> Option<&mut T> {
        self.handlers.get_mut(option)
    }

    /// Engine configuration.
    pub fn config(&self) -> &TelnetConfig {
        &self.core.config
    }

    /// Registered codecs.
    pub fn codecs(&self) -> &CodecRegistry {
        &self.core.codecs
    }

    /// Registered codecs, for adding new ones.
    pub fn codecs_mut(&mut self) -> &mut CodecRegistry {
        &mut self.core.codecs
    }

    /// Switches the active codec by name.
    pub fn set_encoding(&mut self, name: &str) -> CodecResult<()> {
        self.core.codecs.set_active(name)?;
        Ok(())
    }

    /// Negotiated state of `option`.
    pub fn option_state(&self, option: TelnetOption) -> OptionState {
        self.options.get(option).unwrap_or_default()
    }

    /// Every option seen on this connection.
    pub fn options(&self) -> &OptionStates {
        &self.options
    }

    /// Bytes received but not yet framed, i.e. an incomplete command.
    pub fn buffered(&self) -> &[u8] {
        &self.raw
    }

    /// Decoded bytes waiting for the rest of a multi-byte character.
    pub fn undecoded(&self) -> &[u8] {
        &self.tail
    }

    /// Feeds bytes from the connection and returns the text they carried.
    ///
    /// Negotiations are answered through `host` while the data is scanned.
    /// Text before a negotiation is decoded before the negotiation is acted
    /// on, so a CHARSET switch applies to what follows it only.
    pub fn receive(&mut self, now: Instant, data: &[u8], host: &mut dyn TelnetHost) -> String {
        self.raw.extend_from_slice(data);
        let mut text = String::new();
        loop {
            match self.framer.decode(&mut self.raw) {
                Ok(Some(TelnetFrame::Data(bytes))) => self.tail.extend_from_slice(&bytes),
                Ok(Some(frame)) => {
                    self.decode_tail(&mut text);
                    self.dispatch(now, frame, host);
                }
                Ok(None) => break,
                Err(err) => {
                    host.trace(TraceLevel::Error, &err.to_string());
                    self.raw.clear();
                    break;
                }
            }
        }
        self.decode_tail(&mut text);
        text
    }

    /// Runs every deferred task due at `now`. Tasks queued while this runs
    /// wait for the next call.
    pub fn run_deferred(&mut self, now: Instant, host: &mut dyn TelnetHost) {
        for task in self.core.deferred.take_due(now) {
            if let Some(handler) = self.handlers.lookup(task.option) {
                let mut ctx = self.core.context(task.option, now, host);
                handler.on_deferred(task.task, &mut ctx);
            }
        }
    }

    /// When [`TelnetEngine::run_deferred`] next has work.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.core.deferred.next_deadline()
    }

    /// Queues `task` for the handler of `option`.
    pub fn schedule(&mut self, now: Instant, option: TelnetOption, task: u32, delay: Duration) {
        self.core.deferred.schedule(option, task, now, delay);
    }

    /// Queues a NAWS report of the current window size.
    pub fn window_resized(&mut self, now: Instant) {
        if self.handlers.contains(TelnetOption::NAWS) {
            self.schedule(now, TelnetOption::NAWS, NawsHandler::SEND_SIZE, Duration::ZERO);
        }
    }

    /// Tells every handler the connection is up.
    pub fn connect(&mut self, now: Instant, host: &mut dyn TelnetHost) {
        for (option, handler) in self.handlers.iter_mut() {
            let mut ctx = self.core.context(option, now, host);
            handler.on_connect(&mut ctx);
        }
    }

    /// Tells every handler the connection is gone, then drops queued tasks,
    /// option state and every buffered byte.
    pub fn disconnect(&mut self, now: Instant, host: &mut dyn TelnetHost) {
        for (option, handler) in self.handlers.iter_mut() {
            let mut ctx = self.core.context(option, now, host);
            handler.on_disconnect(&mut ctx);
        }
        self.core.deferred.clear();
        self.options.reset();
        self.raw.clear();
        self.tail.clear();
    }

    /// Turns typed input into wire bytes: appends `\r\n`, encodes with the
    /// active codec and doubles every `0xFF`.
    pub fn encode_input(&self, text: &str) -> Bytes {
        let mut line = String::with_capacity(text.len() + 2);
        line.push_str(text);
        line.push_str("\r\n");
        let encoded = self.core.codecs.active().encode(&line);
        let mut out = BytesMut::with_capacity(encoded.len());
        escape_into(&encoded, &mut out);
        out.freeze()
    }

    fn decode_tail(&mut self, text: &mut String) {
        if self.tail.is_empty() {
            return;
        }
        let (decoded, rest) = self.core.codecs.active().decode(&self.tail);
        text.push_str(&decoded);
        let consumed = self.tail.len() - rest.len();
        self.tail.drain(..consumed);
    }

    fn dispatch(&mut self, now: Instant, frame: TelnetFrame, host: &mut dyn TelnetHost) {
        let mut wire = BytesMut::new();
        write_frame(&frame, &mut wire);

        match frame {
            TelnetFrame::Subnegotiate(option, payload) => {
                let response = match self.handlers.lookup(option) {
                    Some(handler) => {
                        let mut ctx = self.core.context(option, now, host);
                        handler.on_subnegotiation(&payload, &mut ctx)
                    }
                    None => {
                        trace!("Subnegotiation for unhandled option {}", option);
                        HandlerResponse::Default
                    }
                };
                if response == HandlerResponse::Default {
                    host.trace(TraceLevel::Debug, &format!("RCVD {}", debug_iac(&wire)));
                }
            }
            frame => {
                host.trace(TraceLevel::Debug, &format!("RCVD {}", debug_iac(&wire)));
                self.negotiate(now, &frame, host);
            }
        }
    }

    fn negotiate(&mut self, now: Instant, frame: &TelnetFrame, host: &mut dyn TelnetHost) {
        let Some(option) = frame.option() else {
            return;
        };
        let Some(handler) = self.handlers.lookup(option) else {
            match frame {
                TelnetFrame::Do(_) => {
                    self.options.entry(option).locally_enabled = false;
                    Self::reply(host, &TelnetFrame::Wont(option));
                }
                TelnetFrame::Will(_) => {
                    self.options.entry(option).remotely_enabled = false;
                    Self::reply(host, &TelnetFrame::Dont(option));
                }
                TelnetFrame::Dont(_) => self.options.entry(option).locally_enabled = false,
                TelnetFrame::Wont(_) => self.options.entry(option).remotely_enabled = false,
                _ => {}
            }
            return;
        };

        let mut ctx = self.core.context(option, now, host);
        let (response, ack) = match frame {
            TelnetFrame::Do(_) => (handler.on_do(&mut ctx), TelnetFrame::Will(option)),
            TelnetFrame::Dont(_) => (handler.on_dont(&mut ctx), TelnetFrame::Wont(option)),
            TelnetFrame::Will(_) => (handler.on_will(&mut ctx), TelnetFrame::Do(option)),
            TelnetFrame::Wont(_) => (handler.on_wont(&mut ctx), TelnetFrame::Dont(option)),
            _ => return,
        };

        let state = self.options.entry(option);
        match frame {
            TelnetFrame::Dont(_) => state.locally_enabled = false,
            TelnetFrame::Wont(_) => state.remotely_enabled = false,
            _ => {}
        }
        if response == HandlerResponse::Default {
            match frame {
                TelnetFrame::Do(_) => state.locally_enabled = true,
                TelnetFrame::Will(_) => state.remotely_enabled = true,
                _ => {}
            }
            Self::reply(host, &ack);
        }
    }

    fn reply(host: &mut dyn TelnetHost, frame: &TelnetFrame) {
        let mut out = BytesMut::new();
        write_frame(frame, &mut out);
        host.trace(TraceLevel::Debug, &format!("SENT {}", debug_iac(&out)));
        host.send(&out);
    }
}
