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

use crate::msdp::{MsdpTable, MsdpValue};
use crate::{HandlerContext, HandlerResponse, OptionHandler, TraceLevel};
use bytes::BytesMut;

const LISTS: [&str; 4] = [
    "COMMANDS",
    "VARIABLES",
    "CONFIGURABLE_VARIABLES",
    "REPORTABLE_VARIABLES",
];

/// Learns what the server offers over MSDP and answers configurable
/// variable requests from [`TelnetConfig::msdp_variables`].
///
/// [`TelnetConfig::msdp_variables`]: crate::TelnetConfig::msdp_variables
#[derive(Clone, Debug)]
pub struct MsdpHandler {
    commands: Vec<String>,
    variables: Vec<String>,
    reportable: Vec<String>,
}

impl MsdpHandler {
    /// Deferred task that sends the four `LIST` queries.
    pub const SEND_LISTS: u32 = 1;

    /// Creates a handler knowing only the `LIST` command.
    pub fn new() -> MsdpHandler {
        MsdpHandler {
            commands: vec!["LIST".to_string()],
            variables: Vec::new(),
            reportable: Vec::new(),
        }
    }

    /// Commands the server listed, after the built-in `LIST`.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Variables the server listed.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Reportable variables the server listed.
    pub fn reportable(&self) -> &[String] {
        &self.reportable
    }

    fn send(ctx: &mut HandlerContext<'_>, table: &MsdpTable) {
        let mut payload = BytesMut::new();
        table.encode(&mut payload);
        ctx.send_subnegotiation(&payload);
    }

    fn extend(list: &mut Vec<String>, value: Option<&MsdpValue>) {
        if let Some(value) = value {
            list.extend(value.strings().into_iter().map(str::to_string));
        }
    }
}

impl Default for MsdpHandler {
    fn default() -> Self {
        MsdpHandler::new()
    }
}

impl OptionHandler for MsdpHandler {
    fn on_will(&mut self, ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        ctx.defer(Self::SEND_LISTS);
        HandlerResponse::Default
    }

    fn on_subnegotiation(&mut self, payload: &[u8], ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        let table = MsdpTable::decode(payload);
        ctx.trace(TraceLevel::Debug, &format!("RCVD IAC SB MSDP {table} IAC SE"));

        Self::extend(&mut self.commands, table.get("COMMANDS"));
        Self::extend(&mut self.variables, table.get("VARIABLES"));
        Self::extend(&mut self.reportable, table.get("REPORTABLE_VARIABLES"));

        if let Some(wanted) = table.get("CONFIGURABLE_VARIABLES") {
            let known = &ctx.config().msdp_variables;
            let reply: MsdpTable = wanted
                .strings()
                .into_iter()
                .filter_map(|name| known.get(name).map(|value| (name, value.clone())))
                .collect();
            Self::send(ctx, &reply);
        }
        HandlerResponse::Suppress
    }

    fn on_connect(&mut self, _ctx: &mut HandlerContext<'_>) {
        *self = MsdpHandler::new();
    }

    fn on_deferred(&mut self, task: u32, ctx: &mut HandlerContext<'_>) {
        if task == Self::SEND_LISTS {
            for list in LISTS {
                let mut query = MsdpTable::new();
                query.set("LIST", MsdpValue::string(list));
                Self::send(ctx, &query);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TelnetOption;
    use crate::handler::testing::Harness;

    #[test]
    fn will_queues_four_list_queries() {
        let mut harness = Harness::default();
        let mut handler = MsdpHandler::new();
        handler.on_will(&mut harness.ctx(TelnetOption::MSDP));
        assert!(harness.host.sent.is_empty());
        harness.run_due(TelnetOption::MSDP, &mut handler);
        assert_eq!(
            harness.host.take_sent(),
            [
                &b"\xFF\xFAE\x01LIST\x02COMMANDS\xFF\xF0"[..],
                b"\xFF\xFAE\x01LIST\x02VARIABLES\xFF\xF0",
                b"\xFF\xFAE\x01LIST\x02CONFIGURABLE_VARIABLES\xFF\xF0",
                b"\xFF\xFAE\x01LIST\x02REPORTABLE_VARIABLES\xFF\xF0",
            ]
            .concat()
        );
    }

    #[test]
    fn listed_names_accumulate() {
        let mut harness = Harness::default();
        let mut handler = MsdpHandler::new();
        let response = handler.on_subnegotiation(
            b"\x01COMMANDS\x02LIST\x02REPORT\x02SEND",
            &mut harness.ctx(TelnetOption::MSDP),
        );
        assert_eq!(response, HandlerResponse::Suppress);
        handler.on_subnegotiation(b"\x01VARIABLES\x02HEALTH", &mut harness.ctx(TelnetOption::MSDP));
        assert_eq!(handler.commands(), ["LIST", "LIST", "REPORT", "SEND"]);
        assert_eq!(handler.variables(), ["HEALTH"]);
        assert!(harness.host.sink.contains("RCVD IAC SB MSDP {VARIABLES: \"HEALTH\"} IAC SE"));
    }

    #[test]
    fn configurable_variables_get_answered() {
        let mut harness = Harness::default();
        let mut handler = MsdpHandler::new();
        handler.on_subnegotiation(
            b"\x01CONFIGURABLE_VARIABLES\x02CLIENT_NAME\x02SOUND\x02UTF_8",
            &mut harness.ctx(TelnetOption::MSDP),
        );
        assert_eq!(
            harness.host.take_sent(),
            b"\xFF\xFAE\x01CLIENT_NAME\x02decafmud\x01UTF_8\x021\xFF\xF0"
        );
    }

    #[test]
    fn connect_forgets_everything() {
        let mut harness = Harness::default();
        let mut handler = MsdpHandler::new();
        handler.on_subnegotiation(b"\x01VARIABLES\x02HEALTH", &mut harness.ctx(TelnetOption::MSDP));
        handler.on_connect(&mut harness.ctx(TelnetOption::MSDP));
        assert_eq!(handler.commands(), ["LIST"]);
        assert!(handler.variables().is_empty());
    }
}
