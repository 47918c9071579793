use actix_web_actors::ws;
use serde_json::Value;
use actix::ActorContext;

use crate::server::ws_error::ws_error_message;
use crate::server::anti_spam::{AntiSpamState, ErrorVerdict};

/// What a socket writes for one outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text(String),
    Suppressed,
    Ban,
}

/// Helpers shared by the WebSocket actors (player and spectator).
pub trait WsActorUtils {
    fn anti_spam(&mut self) -> &mut AntiSpamState;
    fn session_id(&self) -> String;

    /// Send a ban notice, then close the socket and stop the actor.
    fn send_ban_and_close<A>(&mut self, ctx: &mut ws::WebsocketContext<A>)
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        let context = serde_json::json!({
            "session": self.session_id(),
            "ban_remaining_secs": self.anti_spam().ban_remaining_secs(),
        });
        ctx.text(ws_error_message(
            "BANNED",
            "You have been banned for spamming. Please try again later.",
            Some(context),
        ));
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Policy,
            description: Some("Banned for spam".into()),
        }));
        ctx.stop();
    }

    /// Run an error reply through de-duplication and the reply budget.
    fn screen_error(&mut self, code: &str, message: &str, context: Option<Value>) -> Outbound {
        let session_id = self.session_id();
        match self.anti_spam().judge_error(code, &session_id) {
            ErrorVerdict::Send => Outbound::Text(ws_error_message(code, message, context)),
            ErrorVerdict::Suppress => Outbound::Suppressed,
            ErrorVerdict::Ban => Outbound::Ban,
        }
    }

    fn deliver<A>(&mut self, ctx: &mut ws::WebsocketContext<A>, outbound: Outbound)
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        match outbound {
            Outbound::Text(text) => ctx.text(text),
            Outbound::Suppressed => {}
            Outbound::Ban => self.send_ban_and_close(ctx),
        }
    }

    fn send_error_and_maybe_ban<A>(
        &mut self,
        ctx: &mut ws::WebsocketContext<A>,
        code: &str,
        message: &str,
        context: Option<Value>,
    )
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        let outbound = self.screen_error(code, message, context);
        self.deliver(ctx, outbound);
    }

    /// Count an incoming frame; ban and close when the frame rate is exceeded.
    /// Returns false when the frame must be dropped.
    fn accept_request<A>(&mut self, ctx: &mut ws::WebsocketContext<A>) -> bool
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        let session_id = self.session_id();
        if self.anti_spam().record_frame(&session_id) {
            self.send_ban_and_close(ctx);
            return false;
        }
        true
    }
}
