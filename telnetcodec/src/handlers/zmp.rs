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

use super::CommandTree;
use crate::zmp::ZmpMessage;
use crate::{HandlerContext, HandlerResponse, OptionHandler};

/// Callback run for an incoming ZMP command.
pub type ZmpCommand = fn(&mut ZmpHandler, &ZmpMessage, &mut HandlerContext<'_>);

/// Zenith MUD Protocol: identifies the client and answers the core
/// `zmp.check` and `zmp.ping` commands.
#[derive(Clone)]
pub struct ZmpHandler {
    commands: CommandTree<ZmpCommand>,
}

impl ZmpHandler {
    /// Deferred task that sends `zmp.ident`.
    pub const SEND_IDENT: u32 = 1;

    /// Creates a handler with `zmp.check` and `zmp.ping` installed.
    pub fn new() -> ZmpHandler {
        let mut commands = CommandTree::new();
        commands.insert("zmp.check", Self::check as ZmpCommand);
        commands.insert("zmp.ping", Self::ping as ZmpCommand);
        ZmpHandler { commands }
    }

    /// Adds a command at a dotted path. Its package prefixes start
    /// answering `zmp.check` as supported.
    pub fn register_command(&mut self, path: &str, command: ZmpCommand) {
        self.commands.insert(path, command);
    }

    /// Whether `zmp.check` would report `name` as supported. A trailing
    /// `.` asks about a package.
    pub fn supports(&self, name: &str) -> bool {
        let path = name.strip_suffix('.').unwrap_or(name);
        self.commands.contains(path, true)
    }

    /// Sends `message` as one ZMP subnegotiation.
    pub fn send(ctx: &mut HandlerContext<'_>, message: &ZmpMessage) {
        let mut payload = Vec::new();
        message.encode(&mut payload);
        ctx.send_subnegotiation(&payload);
    }

    fn check(&mut self, message: &ZmpMessage, ctx: &mut HandlerContext<'_>) {
        for name in message.args.iter().filter(|name| !name.is_empty()) {
            let reply = if self.supports(name) { "zmp.support" } else { "zmp.no-support" };
            Self::send(ctx, &ZmpMessage::new(reply, vec![name.clone()]));
        }
    }

    fn ping(&mut self, _message: &ZmpMessage, ctx: &mut HandlerContext<'_>) {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self::send(ctx, &ZmpMessage::new("zmp.time", vec![now]));
    }
}

impl Default for ZmpHandler {
    fn default() -> Self {
        ZmpHandler::new()
    }
}

impl std::fmt::Debug for ZmpHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZmpHandler").finish_non_exhaustive()
    }
}

impl OptionHandler for ZmpHandler {
    fn on_will(&mut self, ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        ctx.defer(Self::SEND_IDENT);
        HandlerResponse::Default
    }

    fn on_subnegotiation(&mut self, payload: &[u8], ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        let Ok(message) = ZmpMessage::parse(payload) else {
            return HandlerResponse::Default;
        };
        ctx.trace_received(payload);
        if let Some(command) = self.commands.lookup(&message.command) {
            command(self, &message, ctx);
        }
        HandlerResponse::Suppress
    }

    fn on_deferred(&mut self, task: u32, ctx: &mut HandlerContext<'_>) {
        if task == Self::SEND_IDENT {
            let config = ctx.config();
            let ident = ZmpMessage::new(
                "zmp.ident",
                vec![
                    config.client_name.clone(),
                    config.client_version.clone(),
                    config.client_description.clone(),
                ],
            );
            Self::send(ctx, &ident);
        }
    }
}
