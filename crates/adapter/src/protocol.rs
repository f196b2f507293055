//! Protocol module - JSON message types for the adapter
//!
//! Line-delimited JSON. Every message carries `type` and `seq`; `seq` must strictly
//! increase per connection.

use serde::{Deserialize, Serialize};

use crate::core::{Effect, Grid};
use crate::types::{Gem, Position};

/// Protocol version announced in `welcome`
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Largest width/height a client may request
pub const MAX_BOARD_DIM: usize = 32;

// ============== Shared wire types ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WirePosition {
    pub row: i32,
    pub col: i32,
}

impl From<Position> for WirePosition {
    fn from(p: Position) -> Self {
        Self {
            row: p.row,
            col: p.col,
        }
    }
}

impl From<WirePosition> for Position {
    fn from(p: WirePosition) -> Self {
        Position::new(p.row, p.col)
    }
}

/// Gem encoded as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireGem(pub Gem);

impl Serialize for WireGem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for WireGem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Gem::from_str(&s)
            .map(WireGem)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown gem: {}", s)))
    }
}

pub type WireBoard = Vec<Vec<WireGem>>;

pub fn wire_board(grid: &Grid<Gem>) -> WireBoard {
    grid.rows()
        .map(|row| row.iter().copied().map(WireGem).collect())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WireEffect {
    Match {
        matched: WireGem,
        positions: Vec<WirePosition>,
    },
    Refill {
        board: WireBoard,
    },
}

impl From<&Effect<Gem>> for WireEffect {
    fn from(effect: &Effect<Gem>) -> Self {
        match effect {
            Effect::MatchFound(found) => WireEffect::Match {
                matched: WireGem(found.matched),
                positions: found.positions.iter().copied().map(Into::into).collect(),
            },
            Effect::Refilled(grid) => WireEffect::Refill {
                board: wire_board(grid),
            },
        }
    }
}

// ============== Client -> Server Messages ==============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Hello(HelloMessage),
    Move(MoveMessage),
    Check(MoveMessage),
    Hint(HintMessage),
}

impl ClientMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ClientMessage::Hello(m) => m.seq,
            ClientMessage::Move(m) | ClientMessage::Check(m) => m.seq,
            ClientMessage::Hint(m) => m.seq,
        }
    }
}

/// First message of a connection; (re)creates the session board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    pub seq: u64,
    pub client: ClientInfo,
    #[serde(default)]
    pub board: BoardRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

/// Board parameters; anything missing falls back to the server defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kinds: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// Restrict swaps to orthogonal neighbours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjacent_only: Option<bool>,
}

/// Used by both `move` and `check`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveMessage {
    pub seq: u64,
    pub from: WirePosition,
    pub to: WirePosition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintMessage {
    pub seq: u64,
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome(WelcomeMessage),
    #[serde(rename = "result")]
    Outcome(OutcomeMessage),
    Check(CheckMessage),
    Hint(HintReply),
    Error(ErrorMessage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeMessage {
    pub seq: u64,
    pub protocol_version: String,
    pub width: usize,
    pub height: usize,
    pub adjacent_only: bool,
    pub board: WireBoard,
}

/// Reply to `move`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeMessage {
    pub seq: u64,
    pub accepted: bool,
    pub moves: u32,
    pub effects: Vec<WireEffect>,
    pub board: WireBoard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckMessage {
    pub seq: u64,
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintReply {
    pub seq: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<WirePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<WirePosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    HandshakeRequired,
    SeqOutOfOrder,
    InvalidBoard,
    LineTooLong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
    pub code: ErrorCode,
    pub message: String,
}

pub fn create_error(
    seq: Option<u64>,
    code: ErrorCode,
    message: impl Into<String>,
) -> ServerMessage {
    ServerMessage::Error(ErrorMessage {
        seq,
        code,
        message: message.into(),
    })
}

pub fn create_hello(seq: u64, client_name: &str, client_version: &str) -> ClientMessage {
    ClientMessage::Hello(HelloMessage {
        seq,
        client: ClientInfo {
            name: client_name.to_string(),
            version: client_version.to_string(),
        },
        board: BoardRequest::default(),
    })
}

pub fn create_move(seq: u64, from: Position, to: Position) -> ClientMessage {
    ClientMessage::Move(MoveMessage {
        seq,
        from: from.into(),
        to: to.into(),
    })
}

/// Pull `"seq": <digits>` out of a line that failed to parse, so the error reply can
/// still be correlated.
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let rest = s[start + 5..].trim_start().strip_prefix(':')?.trim_start();
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    rest[..digits].parse().ok()
}
