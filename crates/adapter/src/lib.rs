//! Adapter module - drive the board over TCP with a JSON line protocol
//!
//! Lets an external frontend or bot play without linking the engine: it sends move
//! requests and receives the effect log to animate.
//!
//! # Protocol Overview
//!
//! 1. **Connection**: client connects (default: 127.0.0.1:7878)
//! 2. **Handshake**: client sends `hello`, server answers `welcome` with the board
//! 3. **Play**: `move` is answered with `result` (accepted flag, effects, board);
//!    `check` asks whether a move is legal; `hint` asks for any legal move
//!
//! Each connection owns an independent board. Errors are reported as `error`
//! messages with a stable `code`; the connection stays open.
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"client":{"name":"bot","version":"1.0"},
//!                    "board":{"width":6,"seed":7}}
//! Server -> Client: {"type":"welcome","seq":1,"protocol_version":"1.0.0","width":6,"height":8,...}
//! Client -> Server: {"type":"move","seq":2,"from":{"row":0,"col":1},"to":{"row":1,"col":1}}
//! Server -> Client: {"type":"result","seq":2,"accepted":true,"moves":1,
//!                    "effects":[{"kind":"match",...},{"kind":"refill",...}],"board":[...]}
//! ```
//!
//! # Environment Variables
//!
//! - `MATCH3_ADAPTER_HOST`: bind address (default: "127.0.0.1")
//! - `MATCH3_ADAPTER_PORT`: port number (default: 7878)
//! - `MATCH3_ADAPTER_MAX_LINE`: longest accepted line in bytes (default: 65536)
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"hello","seq":1,"client":{"name":"nc","version":"0"}}
//! ```

pub mod protocol;
pub mod server;
pub mod session;

pub use match3_core as core;
pub use match3_types as types;

pub use protocol::*;
pub use server::{run_server, ServerConfig};
pub use session::{BoardDefaults, Session};
