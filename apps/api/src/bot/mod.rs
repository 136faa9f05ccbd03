//! Conversational front-end: a stateless keyword responder that points users at `/upload`.

pub mod activity;
pub mod connector;
pub mod handlers;

use tracing::{error, info};

use crate::bot::activity::{Activity, ActivityType};
use crate::bot::connector::{ActivitySender, BotError};

pub const WELCOME_MESSAGE: &str =
    "Welcome! Type \"match cv with jd\" to start the matching process.";
pub const UPLOAD_INSTRUCTIONS: &str =
    "Please upload your CV and JD files using the API endpoint `/upload`.";
pub const USAGE_HINT: &str = "Type \"match cv with jd\" to start the matching process.";
pub const TURN_ERROR_MESSAGE: &str = "The bot encountered an error. Please try again later.";

/// Replies the bot emits for one inbound activity, in send order.
pub fn replies_for(activity: &Activity) -> Vec<&'static str> {
    match activity.activity_type {
        ActivityType::ConversationUpdate => {
            let bot_id = activity.recipient.as_ref().map(|r| r.id.as_str());
            activity
                .members_added
                .iter()
                .filter(|member| Some(member.id.as_str()) != bot_id)
                .map(|_| WELCOME_MESSAGE)
                .collect()
        }
        ActivityType::Message => {
            let text = activity.text.as_deref().unwrap_or("").to_lowercase();
            if text.contains("match") && (text.contains("cv") || text.contains("jd")) {
                vec![UPLOAD_INSTRUCTIONS]
            } else {
                vec![USAGE_HINT]
            }
        }
        ActivityType::Other => Vec::new(),
    }
}

/// Runs one turn: computes the replies and sends them through `sender`.
///
/// A failed send aborts the turn and triggers one apology message; only when that
/// also fails does the error reach the caller.
pub async fn process_turn(sender: &dyn ActivitySender, activity: &Activity) -> Result<(), BotError> {
    info!("Processing activity: {:?}", activity.activity_type);

    for reply in replies_for(activity) {
        if let Err(e) = sender.send_reply(activity, reply).await {
            error!("[onTurnError] Unhandled error: {e}");
            return sender.send_reply(activity, TURN_ERROR_MESSAGE).await;
        }
    }
    Ok(())
}
