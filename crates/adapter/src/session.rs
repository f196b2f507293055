//! Per-connection session: turns one inbound line into one reply.
//!
//! Sessions share nothing, so each connection plays its own board. Everything here
//! is synchronous; the server only moves lines in and out.

use tracing::{debug, info, warn};

use crate::core::{GemGame, MoveRule};
use crate::protocol::*;
use crate::types::{
    Gem, Position, DEFAULT_GEM_KINDS, DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_GEM_KINDS,
};

/// Board used when `hello` leaves a field out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardDefaults {
    pub width: usize,
    pub height: usize,
    pub kinds: usize,
    pub seed: u32,
    pub adjacent_only: bool,
}

impl Default for BoardDefaults {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            kinds: DEFAULT_GEM_KINDS,
            seed: 1,
            adjacent_only: false,
        }
    }
}

pub struct Session {
    defaults: BoardDefaults,
    game: Option<GemGame>,
    last_seq: Option<u64>,
}

impl Session {
    pub fn new(defaults: BoardDefaults) -> Self {
        Self {
            defaults,
            game: None,
            last_seq: None,
        }
    }

    pub fn game(&self) -> Option<&GemGame> {
        self.game.as_ref()
    }

    /// Handle one protocol line and produce the reply.
    pub fn handle_line(&mut self, line: &str) -> ServerMessage {
        let msg: ClientMessage = match serde_json::from_str(line) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(error = %e, "invalid message");
                return create_error(
                    extract_seq_best_effort(line),
                    ErrorCode::InvalidJson,
                    format!("invalid message: {}", e),
                );
            }
        };

        let seq = msg.seq();
        if self.last_seq.is_some_and(|prev| seq <= prev) {
            return create_error(
                Some(seq),
                ErrorCode::SeqOutOfOrder,
                format!("seq {} does not follow {}", seq, self.last_seq.unwrap_or_default()),
            );
        }
        self.last_seq = Some(seq);

        match msg {
            ClientMessage::Hello(hello) => self.on_hello(hello),
            ClientMessage::Move(mv) => self.on_move(mv),
            ClientMessage::Check(mv) => {
                let Some(game) = &self.game else {
                    return handshake_required(seq);
                };
                ServerMessage::Check(CheckMessage {
                    seq,
                    valid: game.can_move(mv.from.into(), mv.to.into()),
                })
            }
            ClientMessage::Hint(_) => {
                let Some(game) = &self.game else {
                    return handshake_required(seq);
                };
                let hint = game.hint();
                ServerMessage::Hint(HintReply {
                    seq,
                    from: hint.map(|(a, _)| a.into()),
                    to: hint.map(|(_, b)| b.into()),
                })
            }
        }
    }

    fn on_hello(&mut self, hello: HelloMessage) -> ServerMessage {
        let req = &hello.board;
        let width = req.width.unwrap_or(self.defaults.width);
        let height = req.height.unwrap_or(self.defaults.height);
        if !(1..=MAX_BOARD_DIM).contains(&width) || !(1..=MAX_BOARD_DIM).contains(&height) {
            return create_error(
                Some(hello.seq),
                ErrorCode::InvalidBoard,
                format!("board must be between 1x1 and {0}x{0}", MAX_BOARD_DIM),
            );
        }
        let kinds = req.kinds.unwrap_or(self.defaults.kinds);
        if !(MIN_GEM_KINDS..=Gem::ALL.len()).contains(&kinds) {
            return create_error(
                Some(hello.seq),
                ErrorCode::InvalidBoard,
                format!(
                    "kinds must be between {} and {}",
                    MIN_GEM_KINDS,
                    Gem::ALL.len()
                ),
            );
        }
        let seed = req.seed.unwrap_or(self.defaults.seed);
        let adjacent_only = req.adjacent_only.unwrap_or(self.defaults.adjacent_only);
        let rule = if adjacent_only {
            MoveRule::Adjacent
        } else {
            MoveRule::Colinear
        };

        let game = GemGame::seeded(width, height, kinds, seed).with_rule(rule);
        info!(
            client = %hello.client.name,
            version = %hello.client.version,
            width,
            height,
            kinds,
            seed,
            "session started"
        );

        let welcome = WelcomeMessage {
            seq: hello.seq,
            protocol_version: PROTOCOL_VERSION.to_string(),
            width,
            height,
            adjacent_only,
            board: wire_board(game.grid()),
        };
        self.game = Some(game);
        ServerMessage::Welcome(welcome)
    }

    fn on_move(&mut self, mv: MoveMessage) -> ServerMessage {
        let Some(game) = &mut self.game else {
            return handshake_required(mv.seq);
        };
        let (from, to): (Position, Position) = (mv.from.into(), mv.to.into());
        let effects = game.play(from, to);
        if effects.is_empty() {
            debug!(%from, %to, "move rejected");
        } else {
            info!(%from, %to, effects = effects.len(), moves = game.moves(), "move accepted");
        }

        ServerMessage::Outcome(OutcomeMessage {
            seq: mv.seq,
            accepted: !effects.is_empty(),
            moves: game.moves(),
            effects: effects.iter().map(WireEffect::from).collect(),
            board: wire_board(game.grid()),
        })
    }
}

fn handshake_required(seq: u64) -> ServerMessage {
    create_error(Some(seq), ErrorCode::HandshakeRequired, "send hello first")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_line(seq: u64, extra: &str) -> String {
        format!(
            r#"{{"type":"hello","seq":{},"client":{{"name":"t","version":"0"}}{}}}"#,
            seq, extra
        )
    }

    fn error_code(msg: &ServerMessage) -> Option<ErrorCode> {
        match msg {
            ServerMessage::Error(e) => Some(e.code),
            _ => None,
        }
    }

    #[test]
    fn test_move_before_hello() {
        let mut session = Session::new(BoardDefaults::default());
        let reply = session.handle_line(
            r#"{"type":"move","seq":1,"from":{"row":0,"col":0},"to":{"row":0,"col":1}}"#,
        );
        assert_eq!(error_code(&reply), Some(ErrorCode::HandshakeRequired));
    }

    #[test]
    fn test_hello_uses_requested_board() {
        let mut session = Session::new(BoardDefaults::default());
        let board = r#","board":{"width":5,"height":4,"seed":9}"#;
        let reply = session.handle_line(&hello_line(1, board));
        let ServerMessage::Welcome(welcome) = reply else {
            panic!("expected welcome");
        };
        assert_eq!((welcome.width, welcome.height), (5, 4));
        assert_eq!(welcome.board.len(), 4);
        assert!(welcome.board.iter().all(|row| row.len() == 5));
    }

    #[test]
    fn test_hello_rejects_oversized_board() {
        let mut session = Session::new(BoardDefaults::default());
        let reply = session.handle_line(&hello_line(1, r#","board":{"width":500}"#));
        assert_eq!(error_code(&reply), Some(ErrorCode::InvalidBoard));
        assert!(session.game().is_none());
    }

    #[test]
    fn test_hello_rejects_single_kind_palette() {
        let mut session = Session::new(BoardDefaults::default());
        let reply = session.handle_line(&hello_line(1, r#","board":{"kinds":1}"#));
        assert_eq!(error_code(&reply), Some(ErrorCode::InvalidBoard));
        let reply = session.handle_line(&hello_line(2, r#","board":{"kinds":0}"#));
        assert_eq!(error_code(&reply), Some(ErrorCode::InvalidBoard));
        assert!(session.game().is_none());

        let reply = session.handle_line(&hello_line(3, r#","board":{"kinds":2,"seed":4}"#));
        assert!(matches!(reply, ServerMessage::Welcome(_)));
    }

    #[test]
    fn test_seq_must_increase() {
        let mut session = Session::new(BoardDefaults::default());
        session.handle_line(&hello_line(5, ""));
        let reply = session.handle_line(r#"{"type":"hint","seq":5}"#);
        assert_eq!(error_code(&reply), Some(ErrorCode::SeqOutOfOrder));
    }

    #[test]
    fn test_invalid_json_keeps_seq() {
        let mut session = Session::new(BoardDefaults::default());
        let reply = session.handle_line(r#"{"type":"teleport","seq":8}"#);
        let ServerMessage::Error(err) = reply else {
            panic!("expected error");
        };
        assert_eq!(err.code, ErrorCode::InvalidJson);
        assert_eq!(err.seq, Some(8));
    }

    #[test]
    fn test_hint_then_move_is_accepted() {
        let mut session = Session::new(BoardDefaults::default());
        session.handle_line(&hello_line(1, ""));
        let ServerMessage::Hint(hint) = session.handle_line(r#"{"type":"hint","seq":2}"#) else {
            panic!("expected hint");
        };
        let (Some(from), Some(to)) = (hint.from, hint.to) else {
            // A dead board is possible in principle; nothing to play then.
            return;
        };
        let msg = ClientMessage::Move(MoveMessage { seq: 3, from, to });
        let line = serde_json::to_string(&msg).unwrap();
        let ServerMessage::Outcome(outcome) = session.handle_line(&line) else {
            panic!("expected result");
        };
        assert!(outcome.accepted);
        assert_eq!(outcome.moves, 1);
        assert!(matches!(outcome.effects.last(), Some(WireEffect::Refill { .. })));
    }
}
