//! TCP server for the adapter
//!
//! Accepts connections and runs one [`Session`] per client on its own task.

use std::io;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::protocol::{create_error, ErrorCode, ServerMessage};
use crate::session::{BoardDefaults, Session};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Longer inbound lines are answered with `line_too_long`
    pub max_line_bytes: usize,
    pub board: BoardDefaults,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            max_line_bytes: 64 * 1024,
            board: BoardDefaults::default(),
        }
    }
}

impl ServerConfig {
    /// Create from environment variables, falling back to the defaults
    ///
    /// - `MATCH3_ADAPTER_HOST`
    /// - `MATCH3_ADAPTER_PORT`
    /// - `MATCH3_ADAPTER_MAX_LINE`
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("MATCH3_ADAPTER_HOST").unwrap_or(defaults.host);
        let port = env::var("MATCH3_ADAPTER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let max_line_bytes = env::var("MATCH3_ADAPTER_MAX_LINE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_line_bytes);

        Self {
            host,
            port,
            max_line_bytes,
            board: defaults.board,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid socket address {}:{}", self.host, self.port))
    }
}

/// Start the TCP server and serve until the task is dropped.
///
/// `ready_tx` receives the bound address (useful with port 0).
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> Result<()> {
    let listener = TcpListener::bind(config.socket_addr()?)
        .await
        .context("failed to bind adapter socket")?;
    let local = listener.local_addr()?;
    info!(addr = %local, "adapter listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(local);
    }

    loop {
        let (stream, addr) = listener.accept().await?;
        let config = config.clone();
        tokio::spawn(async move {
            info!(%addr, "client connected");
            if let Err(e) = handle_client(stream, &config).await {
                warn!(%addr, error = %e, "client error");
            }
            info!(%addr, "client disconnected");
        });
    }
}

async fn handle_client(stream: TcpStream, config: &ServerConfig) -> Result<()> {
    stream.set_nodelay(true)?;
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut session = Session::new(config.board);
    let mut line = Vec::with_capacity(1024);
    let mut out = Vec::with_capacity(4096);

    loop {
        let reply: ServerMessage =
            match next_line(&mut reader, config.max_line_bytes, &mut line).await? {
                Inbound::Eof => break,
                Inbound::Line(text) if text.is_empty() => continue,
                Inbound::Line(text) => session.handle_line(&text),
                Inbound::TooLong => create_error(
                    None,
                    ErrorCode::LineTooLong,
                    format!("line exceeds {} bytes", config.max_line_bytes),
                ),
            };

        out.clear();
        serde_json::to_writer(&mut out, &reply)?;
        out.push(b'\n');
        write_half.write_all(&out).await?;
        write_half.flush().await?;
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Inbound {
    Line(String),
    TooLong,
    Eof,
}

/// Read one line, holding at most `max + 2` bytes of it (room for `\r\n`).
///
/// The rest of an oversized line is skipped without being buffered.
async fn next_line<R>(reader: &mut R, max: usize, buf: &mut Vec<u8>) -> io::Result<Inbound>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let limit = max.saturating_add(2);
    let n = (&mut *reader)
        .take(limit as u64)
        .read_until(b'\n', buf)
        .await?;
    if n == 0 {
        return Ok(Inbound::Eof);
    }
    if n == limit && buf.last() != Some(&b'\n') {
        discard_line(reader).await?;
        return Ok(Inbound::TooLong);
    }

    let text = String::from_utf8_lossy(&buf[..]);
    let text = text.trim();
    if text.len() > max {
        return Ok(Inbound::TooLong);
    }
    Ok(Inbound::Line(text.to_string()))
}

/// Skip input up to and including the next newline.
async fn discard_line<R>(reader: &mut R) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let (used, done) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (available.len(), false),
            }
        };
        reader.consume(used);
        if done {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_socket_addr() {
        let addr = ServerConfig::default().socket_addr().unwrap();
        assert_eq!(addr.port(), 7878);
    }

    #[test]
    fn test_bad_host_is_an_error() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    async fn read_all(mut input: &[u8], max: usize) -> Vec<Inbound> {
        let mut buf = Vec::new();
        let mut seen = Vec::new();
        loop {
            let next = next_line(&mut input, max, &mut buf).await.unwrap();
            if next == Inbound::Eof {
                return seen;
            }
            seen.push(next);
        }
    }

    #[tokio::test]
    async fn test_oversized_line_is_skipped() {
        let seen = read_all(b"ab\nxxxxxxxxxxxx\ncd", 4).await;
        assert_eq!(
            seen,
            vec![
                Inbound::Line("ab".to_string()),
                Inbound::TooLong,
                Inbound::Line("cd".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_line_at_the_limit_is_kept() {
        let seen = read_all(b"abcd\r\nabcde\n\n", 4).await;
        assert_eq!(
            seen,
            vec![
                Inbound::Line("abcd".to_string()),
                Inbound::TooLong,
                Inbound::Line(String::new()),
            ]
        );
    }

    #[tokio::test]
    async fn test_oversized_line_without_newline() {
        let seen = read_all(&[b'x'; 100], 8).await;
        assert_eq!(seen, vec![Inbound::TooLong]);
    }

    #[tokio::test]
    async fn test_long_line_is_not_buffered() {
        let big = vec![b'y'; 1 << 20];
        let mut input = &big[..];
        let mut buf = Vec::new();
        let next = next_line(&mut input, 16, &mut buf).await.unwrap();
        assert_eq!(next, Inbound::TooLong);
        assert!(buf.len() <= 18);
        assert!(input.is_empty());
    }
}
