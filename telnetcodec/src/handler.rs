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

//! Option handler protocol
//!
//! Every telnet option the engine understands is backed by one
//! [`OptionHandler`]. Handlers override only the callbacks they care about;
//! the defaults return [`HandlerResponse::Default`], which lets the engine
//! answer the negotiation on their behalf.

use crate::codec::write_frame;
use crate::deferred::DeferredQueue;
use crate::naws::WindowSize;
use crate::{
    CodecResult, TelnetConfig, TelnetFrame, TelnetOption, TraceLevel, TraceSink, TracingSink,
    debug_iac,
};
use bytes::{Bytes, BytesMut};
use decafmud_charset::CodecRegistry;
use std::any::Any;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// What the engine should do after a handler callback returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Send the standard acknowledgement, or for subnegotiations write the
    /// generic `RCVD` trace line.
    #[default]
    Default,
    /// The handler took care of the reply (or the trace) itself.
    Suppress,
}

/// The outside world as seen by the engine and its handlers.
///
/// Only [`TelnetHost::send`] is required. A host with no terminal reports no
/// window size and ignores echo changes.
pub trait TelnetHost {
    /// Writes already escaped bytes to the connection.
    fn send(&mut self, bytes: &[u8]);

    /// Current terminal size in character cells.
    fn window_size(&self) -> Option<WindowSize> {
        None
    }

    /// Turns local echo of typed input on or off.
    fn set_local_echo(&mut self, _enabled: bool) {}

    /// Receives diagnostic output.
    fn trace(&mut self, level: TraceLevel, message: &str) {
        TracingSink.trace(level, message);
    }
}

/// Per-option negotiation logic.
///
/// Handlers are `'static` so the engine can hand them back by concrete type
/// through [`TelnetEngine::handler`](crate::TelnetEngine::handler).
pub trait OptionHandler: Any + Send {
    /// Peer sent `DO`.
    fn on_do(&mut self, _ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        HandlerResponse::Default
    }

    /// Peer sent `DONT`.
    fn on_dont(&mut self, _ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        HandlerResponse::Default
    }

    /// Peer sent `WILL`.
    fn on_will(&mut self, _ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        HandlerResponse::Default
    }

    /// Peer sent `WONT`.
    fn on_wont(&mut self, _ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        HandlerResponse::Default
    }

    /// Peer sent `SB <option> payload SE`. The payload is already unescaped.
    fn on_subnegotiation(&mut self, _payload: &[u8], _ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        HandlerResponse::Default
    }

    /// The connection came up.
    fn on_connect(&mut self, _ctx: &mut HandlerContext<'_>) {}

    /// The connection went away. Queued tasks are dropped right after.
    fn on_disconnect(&mut self, _ctx: &mut HandlerContext<'_>) {}

    /// A task queued through [`HandlerContext::defer`] or
    /// [`HandlerContext::schedule`] is due.
    fn on_deferred(&mut self, _task: u32, _ctx: &mut HandlerContext<'_>) {}
}

impl std::fmt::Debug for dyn OptionHandler + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OptionHandler")
    }
}

/// Everything a handler may touch while it runs.
pub struct HandlerContext<'a> {
    option: TelnetOption,
    now: Instant,
    config: &'a TelnetConfig,
    codecs: &'a mut CodecRegistry,
    deferred: &'a mut DeferredQueue,
    host: &'a mut dyn TelnetHost,
}

impl<'a> HandlerContext<'a> {
    pub(crate) fn new(
        option: TelnetOption,
        now: Instant,
        config: &'a TelnetConfig,
        codecs: &'a mut CodecRegistry,
        deferred: &'a mut DeferredQueue,
        host: &'a mut dyn TelnetHost,
    ) -> HandlerContext<'a> {
        HandlerContext {
            option,
            now,
            config,
            codecs,
            deferred,
            host,
        }
    }

    /// Option the running handler is registered for.
    pub fn option(&self) -> TelnetOption {
        self.option
    }

    /// Time the current event is processed at.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Engine configuration.
    pub fn config(&self) -> &TelnetConfig {
        self.config
    }

    /// Registered character codecs.
    pub fn codecs(&self) -> &CodecRegistry {
        self.codecs
    }

    /// Switches the active codec.
    pub fn set_encoding(&mut self, name: &str) -> CodecResult<()> {
        self.codecs.set_active(name)?;
        Ok(())
    }

    /// Writes `frame` to the connection and traces it as `SENT`.
    pub fn send(&mut self, frame: &TelnetFrame) {
        let mut out = BytesMut::new();
        write_frame(frame, &mut out);
        if !matches!(frame, TelnetFrame::Data(_)) {
            self.host
                .trace(TraceLevel::Debug, &format!("SENT {}", debug_iac(&out)));
        }
        self.host.send(&out);
    }

    /// Sends `IAC SB <option> payload IAC SE` for this handler's option.
    pub fn send_subnegotiation(&mut self, payload: &[u8]) {
        self.send(&TelnetFrame::Subnegotiate(
            self.option,
            Bytes::copy_from_slice(payload),
        ));
    }

    /// Runs `task` on the next pass over the deferred queue.
    pub fn defer(&mut self, task: u32) {
        self.schedule(Duration::ZERO, task);
    }

    /// Runs `task` once `delay` has passed.
    pub fn schedule(&mut self, delay: Duration, task: u32) {
        self.deferred.schedule(self.option, task, self.now, delay);
    }

    /// Drops a queued `task` of this handler.
    pub fn cancel(&mut self, task: u32) {
        self.deferred.cancel(self.option, task);
    }

    /// Drops every queued task of this handler.
    pub fn cancel_all(&mut self) {
        self.deferred.cancel_option(self.option);
    }

    /// Whether `task` is still queued.
    pub fn is_scheduled(&self, task: u32) -> bool {
        self.deferred.contains(self.option, task)
    }

    /// Asks the host to turn local echo on or off.
    pub fn set_local_echo(&mut self, enabled: bool) {
        self.host.set_local_echo(enabled);
    }

    /// Current terminal size, if the host knows it.
    pub fn window_size(&self) -> Option<WindowSize> {
        self.host.window_size()
    }

    /// Traces `IAC SB <option> payload IAC SE` as received.
    pub fn trace_received(&mut self, payload: &[u8]) {
        let mut seq = BytesMut::new();
        write_frame(
            &TelnetFrame::Subnegotiate(self.option, Bytes::copy_from_slice(payload)),
            &mut seq,
        );
        self.host
            .trace(TraceLevel::Debug, &format!("RCVD {}", debug_iac(&seq)));
    }

    /// Writes a diagnostic line.
    pub fn trace(&mut self, level: TraceLevel, message: &str) {
        self.host.trace(level, message);
    }
}

/// The handlers owned by one engine, at most one per option code.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<u8, Box<dyn OptionHandler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> HandlerRegistry {
        HandlerRegistry::default()
    }

    /// Installs `handler` for `option`, returning the one it replaces.
    pub fn register(
        &mut self,
        option: TelnetOption,
        handler: Box<dyn OptionHandler>,
    ) -> Option<Box<dyn OptionHandler>> {
        self.handlers.insert(option.to_u8(), handler)
    }

    /// Removes the handler for `option`.
    pub fn unregister(&mut self, option: TelnetOption) -> Option<Box<dyn OptionHandler>> {
        self.handlers.remove(&option.to_u8())
    }

    /// Whether `option` has a handler.
    pub fn contains(&self, option: TelnetOption) -> bool {
        self.handlers.contains_key(&option.to_u8())
    }

    /// The handler for `option`, downcast to `T`.
    pub fn get<T: OptionHandler>(&self, option: TelnetOption) -> Option<&T> {
        let handler: &dyn Any = &**self.handlers.get(&option.to_u8())?;
        handler.downcast_ref()
    }

    /// Mutable form of [`HandlerRegistry::get`].
    pub fn get_mut<T: OptionHandler>(&mut self, option: TelnetOption) -> Option<&mut T> {
        let handler: &mut dyn Any = &mut **self.handlers.get_mut(&option.to_u8())?;
        handler.downcast_mut()
    }

    pub(crate) fn lookup(&mut self, option: TelnetOption) -> Option<&mut Box<dyn OptionHandler>> {
        self.handlers.get_mut(&option.to_u8())
    }

    /// Registered options in ascending code order.
    pub fn options(&self) -> impl Iterator<Item = TelnetOption> + '_ {
        self.handlers.keys().map(|code| TelnetOption::from_u8(*code))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (TelnetOption, &mut Box<dyn OptionHandler>)> {
        self.handlers
            .iter_mut()
            .map(|(code, handler)| (TelnetOption::from_u8(*code), handler))
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::CollectingSink;

    /// Host that records everything for assertions.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHost {
        pub(crate) sent: Vec<u8>,
        pub(crate) size: Option<WindowSize>,
        pub(crate) echo: Option<bool>,
        pub(crate) sink: CollectingSink,
    }

    impl RecordingHost {
        pub(crate) fn take_sent(&mut self) -> Vec<u8> {
            std::mem::take(&mut self.sent)
        }
    }

    /// Owns everything a [`HandlerContext`] borrows.
    #[derive(Debug, Default)]
    pub(crate) struct Harness {
        pub(crate) config: TelnetConfig,
        pub(crate) codecs: CodecRegistry,
        pub(crate) deferred: DeferredQueue,
        pub(crate) host: RecordingHost,
        pub(crate) now: Option<Instant>,
    }

    impl Harness {
        pub(crate) fn ctx(&mut self, option: TelnetOption) -> HandlerContext<'_> {
            let now = *self.now.get_or_insert_with(Instant::now);
            HandlerContext::new(
                option,
                now,
                &self.config,
                &mut self.codecs,
                &mut self.deferred,
                &mut self.host,
            )
        }

        /// Runs every due task of `option` through `handler`.
        pub(crate) fn run_due<H: OptionHandler>(&mut self, option: TelnetOption, handler: &mut H) {
            let now = *self.now.get_or_insert_with(Instant::now);
            for task in self.deferred.take_due(now) {
                if task.option == option {
                    let mut ctx = self.ctx(option);
                    handler.on_deferred(task.task, &mut ctx);
                }
            }
        }
    }

    impl TelnetHost for RecordingHost {
        fn send(&mut self, bytes: &[u8]) {
            self.sent.extend_from_slice(bytes);
        }

        fn window_size(&self) -> Option<WindowSize> {
            self.size
        }

        fn set_local_echo(&mut self, enabled: bool) {
            self.echo = Some(enabled);
        }

        fn trace(&mut self, level: TraceLevel, message: &str) {
            self.sink.trace(level, message);
        }
    }
}
