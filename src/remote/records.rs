use crate::consts;
use crate::game::Round;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// The result of a finished round, as submitted to the high-score server.
///
/// Field order is significant: the signature is computed over the JSON
/// serialization of this struct.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct HighScoreRecord {
    pub(crate) player_name: String,
    pub(crate) score: u32,
    pub(crate) eli_mode: bool,
    pub(crate) board_width: i32,
    pub(crate) board_height: i32,
    pub(crate) fruits: u32,
    pub(crate) special_fruits: u32,
    pub(crate) ticker_delay: i64,
    pub(crate) start_timestamp: i64,
    pub(crate) end_timestamp: i64,
    pub(crate) app_version: String,
    pub(crate) goos: String,
}

impl HighScoreRecord {
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn from_round<R>(player_name: &str, round: &Round<R>) -> HighScoreRecord {
        let board = round.board();
        HighScoreRecord {
            player_name: player_name.to_owned(),
            score: round.score(),
            eli_mode: round.wrap(),
            board_width: board.width,
            board_height: board.height,
            fruits: round.fruits(),
            special_fruits: round.special_fruits(),
            ticker_delay: round.tick_millis().trunc() as i64,
            start_timestamp: round.started_at(),
            end_timestamp: round.ended_at(),
            app_version: String::from(consts::APP_VERSION),
            goos: String::from(consts::APP_PLATFORM),
        }
    }
}

/// Request body for posting a high score
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct SignedHighScore<'a> {
    pub(crate) signature: String,
    pub(crate) data: &'a HighScoreRecord,
}

/// An entry in the online high-score table
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct OnlineHighScore {
    pub(crate) player_name: String,
    pub(crate) score: u32,
    pub(crate) eli_mode: bool,
    pub(crate) board_width: i32,
    pub(crate) board_height: i32,
    pub(crate) fruits: u32,
    pub(crate) special_fruits: u32,
    pub(crate) duration: i64,
    pub(crate) created_at: String,
}

impl OnlineHighScore {
    pub(crate) fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created_at).ok()
    }
}

/// A news message published by the server
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct OnlineMessage {
    pub(crate) content: String,
    pub(crate) created_at: String,
}

impl OnlineMessage {
    pub(crate) fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created_at).ok()
    }
}
