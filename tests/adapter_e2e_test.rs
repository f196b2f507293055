use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_test::assert_ok;

use match3::adapter::{
    create_hello, create_move, run_server, BoardDefaults, BoardRequest, ClientMessage, ErrorCode,
    HelloMessage, HintMessage, ServerConfig, ServerMessage, WireEffect,
};
use match3::core::{is_stable, Grid};
use match3::types::Position;

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    write_half: OwnedWriteHalf,
}

impl Client {
    async fn connect(max_line_bytes: usize) -> Client {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_line_bytes,
            board: BoardDefaults::default(),
        };
        let (ready_tx, ready_rx) = oneshot::channel();
        tokio::spawn(async move {
            let _ = run_server(config, Some(ready_tx)).await;
        });

        let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
            .await
            .expect("server did not signal ready")
            .expect("ready channel dropped");
        let stream = assert_ok!(TcpStream::connect(addr).await);
        let (read_half, write_half) = stream.into_split();
        Client {
            lines: BufReader::new(read_half).lines(),
            write_half,
        }
    }

    async fn send_raw(&mut self, line: &str) {
        assert_ok!(self.write_half.write_all(line.as_bytes()).await);
        assert_ok!(self.write_half.write_all(b"\n").await);
        assert_ok!(self.write_half.flush().await);
    }

    async fn send(&mut self, msg: &ClientMessage) {
        let line = serde_json::to_string(msg).unwrap();
        self.send_raw(&line).await;
    }

    async fn recv(&mut self) -> ServerMessage {
        let line = tokio::time::timeout(Duration::from_secs(2), self.lines.next_line())
            .await
            .expect("timed out waiting for reply");
        let line = assert_ok!(line).expect("connection closed");
        serde_json::from_str(&line).unwrap()
    }
}

fn error_code(msg: &ServerMessage) -> Option<ErrorCode> {
    match msg {
        ServerMessage::Error(e) => Some(e.code),
        _ => None,
    }
}

fn to_grid(board: &[Vec<match3::adapter::WireGem>]) -> Grid<match3::types::Gem> {
    Grid::from_rows(board.iter().map(|row| row.iter().map(|g| g.0).collect()).collect()).unwrap()
}

#[tokio::test]
async fn adapter_hello_hint_move_result() {
    let mut client = Client::connect(64 * 1024).await;

    let ClientMessage::Hello(mut hello) = create_hello(1, "e2e-test", "1.0.0") else {
        unreachable!();
    };
    hello.board = BoardRequest {
        width: Some(6),
        height: Some(5),
        seed: Some(7),
        ..BoardRequest::default()
    };
    client.send(&ClientMessage::Hello(hello)).await;

    let ServerMessage::Welcome(welcome) = client.recv().await else {
        panic!("expected welcome");
    };
    assert_eq!(welcome.seq, 1);
    assert_eq!(welcome.protocol_version, "1.0.0");
    assert_eq!((welcome.width, welcome.height), (6, 5));
    assert!(!welcome.adjacent_only);
    assert!(is_stable(&to_grid(&welcome.board)));

    client.send(&ClientMessage::Hint(HintMessage { seq: 2 })).await;
    let ServerMessage::Hint(hint) = client.recv().await else {
        panic!("expected hint");
    };
    assert_eq!(hint.seq, 2);
    let (Some(from), Some(to)) = (hint.from, hint.to) else {
        // A dead board has nothing to play.
        return;
    };

    client
        .send(&create_move(3, Position::from(from), Position::from(to)))
        .await;
    let ServerMessage::Outcome(outcome) = client.recv().await else {
        panic!("expected result");
    };
    assert_eq!(outcome.seq, 3);
    assert!(outcome.accepted);
    assert_eq!(outcome.moves, 1);
    assert!(matches!(outcome.effects.first(), Some(WireEffect::Match { .. })));
    let Some(WireEffect::Refill { board }) = outcome.effects.last() else {
        panic!("effect log must end with a refill");
    };
    assert_eq!(board, &outcome.board);
    assert!(is_stable(&to_grid(&outcome.board)));
}

#[tokio::test]
async fn adapter_rejected_move_keeps_board() {
    let mut client = Client::connect(64 * 1024).await;
    client.send(&create_hello(1, "e2e-test", "1.0.0")).await;
    let ServerMessage::Welcome(welcome) = client.recv().await else {
        panic!("expected welcome");
    };

    // Diagonal swaps are never legal.
    client
        .send(&create_move(2, Position::new(0, 0), Position::new(1, 1)))
        .await;
    let ServerMessage::Outcome(outcome) = client.recv().await else {
        panic!("expected result");
    };
    assert!(!outcome.accepted);
    assert!(outcome.effects.is_empty());
    assert_eq!(outcome.moves, 0);
    assert_eq!(outcome.board, welcome.board);
}

#[tokio::test]
async fn adapter_errors_keep_connection_open() {
    let mut client = Client::connect(256).await;

    client
        .send(&create_move(1, Position::new(0, 0), Position::new(0, 1)))
        .await;
    assert_eq!(error_code(&client.recv().await), Some(ErrorCode::HandshakeRequired));

    client.send_raw("{not json").await;
    assert_eq!(error_code(&client.recv().await), Some(ErrorCode::InvalidJson));

    client.send_raw(&"x".repeat(1024)).await;
    assert_eq!(error_code(&client.recv().await), Some(ErrorCode::LineTooLong));

    // A line far past the limit arrives in pieces before its newline.
    let chunk = vec![b'y'; 64 * 1024];
    for _ in 0..4 {
        assert_ok!(client.write_half.write_all(&chunk).await);
    }
    client.send_raw("").await;
    assert_eq!(error_code(&client.recv().await), Some(ErrorCode::LineTooLong));

    client.send(&create_hello(5, "e2e-test", "1.0.0")).await;
    assert!(matches!(client.recv().await, ServerMessage::Welcome(_)));

    client.send(&ClientMessage::Hint(HintMessage { seq: 5 })).await;
    assert_eq!(error_code(&client.recv().await), Some(ErrorCode::SeqOutOfOrder));

    let hello = HelloMessage {
        seq: 6,
        client: match3::adapter::ClientInfo {
            name: "e2e-test".to_string(),
            version: "1.0.0".to_string(),
        },
        board: BoardRequest {
            width: Some(99),
            ..BoardRequest::default()
        },
    };
    client.send(&ClientMessage::Hello(hello)).await;
    assert_eq!(error_code(&client.recv().await), Some(ErrorCode::InvalidBoard));
}
