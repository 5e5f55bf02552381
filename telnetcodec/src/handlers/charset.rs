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

use crate::charset::CharsetMessage;
use crate::{HandlerContext, HandlerResponse, OptionHandler, TraceLevel};
use bytes::BytesMut;

/// Negotiates the character encoding of the connection.
///
/// When the server offers CHARSET we send a `REQUEST` listing our codecs:
/// the active one first unless it is the default, then the configured
/// preference order, then everything else registered. When the server sends
/// its own `REQUEST` we pick the first name we prefer that it offered,
/// falling back to the first offered name we know.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharsetHandler;

impl CharsetHandler {
    /// Deferred task that sends our `REQUEST`.
    pub const SEND_REQUEST: u32 = 1;

    /// Proper names to offer, most wanted first.
    pub fn candidates(ctx: &HandlerContext<'_>) -> Vec<String> {
        let codecs = ctx.codecs();
        let mut done: Vec<&'static str> = Vec::new();
        let mut names = Vec::new();

        if !codecs.is_default_active() {
            let active = codecs.active();
            names.push(active.proper_name().to_string());
            done.push(active.name());
        }
        let preferred = ctx
            .config()
            .encoding_order
            .iter()
            .filter_map(|wanted| codecs.get(wanted));
        for codec in preferred.chain(codecs.iter()) {
            if !done.contains(&codec.name()) {
                names.push(codec.proper_name().to_string());
                done.push(codec.name());
            }
        }
        names
    }

    /// Picks an encoding from a peer offer, returning the offered spelling
    /// and our codec name.
    pub fn choose<'n>(ctx: &HandlerContext<'_>, offered: &'n [String]) -> Option<(&'n str, &'static str)> {
        let codecs = ctx.codecs();
        for wanted in &ctx.config().encoding_order {
            let Some(codec) = codecs.get(wanted) else {
                continue;
            };
            if let Some(name) = offered
                .iter()
                .find(|name| **name == codec.name() || **name == codec.proper_name())
            {
                return Some((name.as_str(), codec.name()));
            }
        }
        offered.iter().find_map(|name| {
            codecs
                .find_offered(name)
                .map(|codec| (name.as_str(), codec.name()))
        })
    }

    fn reply(ctx: &mut HandlerContext<'_>, message: &CharsetMessage) {
        let mut payload = BytesMut::new();
        message.encode(&mut payload);
        ctx.send_subnegotiation(&payload);
    }

    fn switch(ctx: &mut HandlerContext<'_>, name: &str) {
        if let Err(err) = ctx.set_encoding(name) {
            ctx.trace(TraceLevel::Error, &err.to_string());
        }
    }
}

impl OptionHandler for CharsetHandler {
    fn on_dont(&mut self, _ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        HandlerResponse::Suppress
    }

    fn on_will(&mut self, ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        ctx.defer(Self::SEND_REQUEST);
        HandlerResponse::Default
    }

    fn on_subnegotiation(&mut self, payload: &[u8], ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        ctx.trace_received(payload);
        match CharsetMessage::parse(payload) {
            Ok(CharsetMessage::Request { separator, names }) => match Self::choose(ctx, &names) {
                Some((offered, codec)) => {
                    let accepted = CharsetMessage::Accepted(offered.to_string());
                    Self::switch(ctx, codec);
                    Self::reply(ctx, &accepted);
                }
                None => {
                    let joined = names.join(&char::from(separator).to_string());
                    ctx.trace(TraceLevel::Info, &format!("No encoder for: {joined}"));
                    Self::reply(ctx, &CharsetMessage::Rejected);
                }
            },
            Ok(CharsetMessage::Accepted(name)) => {
                let codec = ctx
                    .codecs()
                    .find_proper(&name)
                    .or_else(|| ctx.codecs().find_offered(&name))
                    .map(|codec| codec.name());
                match codec {
                    Some(codec) => Self::switch(ctx, codec),
                    None => ctx.trace(TraceLevel::Warn, &format!("Server accepted unknown encoding: {name}")),
                }
            }
            Ok(_) => {}
            Err(err) => ctx.trace(TraceLevel::Debug, &err.to_string()),
        }
        HandlerResponse::Suppress
    }

    fn on_deferred(&mut self, task: u32, ctx: &mut HandlerContext<'_>) {
        if task == Self::SEND_REQUEST {
            let names = Self::candidates(ctx);
            let request = CharsetMessage::Request {
                separator: ctx.config().charset_separator,
                names,
            };
            Self::reply(ctx, &request);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TelnetOption;
    use crate::handler::testing::Harness;

    fn request(names: &[&str]) -> Vec<u8> {
        let mut payload = vec![1, b';'];
        payload.extend_from_slice(names.join(";").as_bytes());
        payload
    }

    #[test]
    fn will_defers_request_in_preference_order() {
        let mut harness = Harness::default();
        let mut handler = CharsetHandler;
        assert_eq!(handler.on_will(&mut harness.ctx(TelnetOption::Charset)), HandlerResponse::Default);
        assert!(harness.host.sent.is_empty());

        harness.run_due(TelnetOption::Charset, &mut handler);
        assert_eq!(
            harness.host.take_sent(),
            b"\xFF\xFA\x2A\x01 UTF-8 ISO-8859-1 CP437 ISO-8859-15\xFF\xF0"
        );
    }

    #[test]
    fn active_codec_is_offered_first() {
        let mut harness = Harness::default();
        harness.codecs.set_active("cp437").expect("cp437");
        let ctx = harness.ctx(TelnetOption::Charset);
        assert_eq!(
            CharsetHandler::candidates(&ctx),
            ["CP437", "UTF-8", "ISO-8859-1", "ISO-8859-15"]
        );
    }

    #[test]
    fn local_preference_wins_over_offer_order() {
        let mut harness = Harness::default();
        let mut handler = CharsetHandler;
        let response =
            handler.on_subnegotiation(&request(&["ISO-8859-1", "UTF-8"]), &mut harness.ctx(TelnetOption::Charset));
        assert_eq!(response, HandlerResponse::Suppress);
        assert_eq!(harness.codecs.active().name(), "utf8");
        assert_eq!(harness.host.take_sent(), b"\xFF\xFA\x2A\x02UTF-8\xFF\xF0");
    }

    #[test]
    fn first_known_offer_is_taken_without_preference() {
        let mut harness = Harness::default();
        harness.config.encoding_order.clear();
        let mut handler = CharsetHandler;
        handler.on_subnegotiation(&request(&["KOI8-R", "cp437", "UTF-8"]), &mut harness.ctx(TelnetOption::Charset));
        assert_eq!(harness.codecs.active().name(), "cp437");
        assert_eq!(harness.host.take_sent(), b"\xFF\xFA\x2A\x02cp437\xFF\xF0");
    }

    #[test]
    fn unknown_offer_is_rejected() {
        let mut harness = Harness::default();
        let mut handler = CharsetHandler;
        handler.on_subnegotiation(&request(&["KOI8-R", "EUC-JP"]), &mut harness.ctx(TelnetOption::Charset));
        assert_eq!(harness.codecs.active().name(), "iso88591");
        assert_eq!(harness.host.take_sent(), b"\xFF\xFA\x2A\x03\xFF\xF0");
        assert!(harness.host.sink.contains("No encoder for: KOI8-R;EUC-JP"));
    }

    #[test]
    fn ttable_marker_is_skipped() {
        let mut harness = Harness::default();
        let mut handler = CharsetHandler;
        handler.on_subnegotiation(b"\x01TTABLE \x01 UTF-8", &mut harness.ctx(TelnetOption::Charset));
        assert_eq!(harness.codecs.active().name(), "utf8");
    }

    #[test]
    fn accepted_switches_codec() {
        let mut harness = Harness::default();
        let mut handler = CharsetHandler;
        handler.on_subnegotiation(b"\x02ISO-8859-15", &mut harness.ctx(TelnetOption::Charset));
        assert_eq!(harness.codecs.active().name(), "iso885915");
        assert!(harness.host.sent.is_empty());
        assert!(harness.host.sink.contains("RCVD IAC SB CHARSET ACCEPTED"));
    }

    #[test]
    fn dont_is_not_answered() {
        let mut harness = Harness::default();
        let mut handler = CharsetHandler;
        assert_eq!(handler.on_dont(&mut harness.ctx(TelnetOption::Charset)), HandlerResponse::Suppress);
    }
}
