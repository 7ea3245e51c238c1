//! TCP debug server

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use crate::protocol::{DebugCommand, DebugResponse};

/// Trait that the application implements to handle debug commands
pub trait DebugHandler: Send + Sync + 'static {
    fn handle_command(&mut self, cmd: DebugCommand) -> DebugResponse;
}

/// Debug server handle - keep this alive to keep the server running
pub struct DebugServer {
    local_addr: Option<SocketAddr>,
    _handle: tokio::task::JoinHandle<()>,
}

impl DebugServer {
    /// Start the debug server on `127.0.0.1:port` in the background.
    /// Bind failures are logged, not returned.
    pub fn start(handler: Arc<Mutex<dyn DebugHandler>>, port: u16) -> Self {
        let handle = tokio::spawn(async move {
            let addr = format!("127.0.0.1:{}", port);
            match TcpListener::bind(&addr).await {
                Ok(listener) => {
                    log::info!("Debug server listening on {}", addr);
                    accept_loop(listener, handler).await;
                }
                Err(e) => log::error!("Failed to bind debug server on {}: {}", addr, e),
            }
        });
        Self { local_addr: None, _handle: handle }
    }

    /// Bind first, then serve in the background. Port 0 picks a free port.
    pub async fn bind(handler: Arc<Mutex<dyn DebugHandler>>, addr: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        log::info!("Debug server listening on {}", local_addr);
        let handle = tokio::spawn(accept_loop(listener, handler));
        Ok(Self { local_addr: Some(local_addr), _handle: handle })
    }

    /// Bound address, known only for servers created with [`DebugServer::bind`].
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}

async fn accept_loop(listener: TcpListener, handler: Arc<Mutex<dyn DebugHandler>>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                log::info!("Debug client connected from {}", peer);
                let handler = handler.clone();
                tokio::spawn(async move {
                    handle_connection(stream, handler).await;
                    log::info!("Debug client disconnected: {}", peer);
                });
            }
            Err(e) => log::error!("Debug server accept error: {}", e),
        }
    }
}

/// Answer one request line. Always yields a single JSON line.
async fn respond(line: &str, handler: &Arc<Mutex<dyn DebugHandler>>) -> String {
    let response = match serde_json::from_str::<DebugCommand>(line) {
        Ok(cmd) => {
            log::debug!("Debug command: {:?}", cmd);
            handler.lock().await.handle_command(cmd)
        }
        Err(e) => DebugResponse::error(format!("Invalid command JSON: {}", e)),
    };
    let mut json = serde_json::to_string(&response).unwrap_or_else(|e| {
        format!("{{\"status\":\"error\",\"message\":\"Serialize error: {}\"}}", e)
    });
    json.push('\n');
    json
}

async fn handle_connection(stream: TcpStream, handler: Arc<Mutex<dyn DebugHandler>>) {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::error!("Debug server read error: {}", e);
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let reply = respond(trimmed, &handler).await;
        if let Err(e) = writer.write_all(reply.as_bytes()).await {
            log::error!("Debug server write error: {}", e);
            break;
        }
        if let Err(e) = writer.flush().await {
            log::error!("Debug server flush error: {}", e);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ResponseData;

    struct Echo {
        seen: Vec<DebugCommand>,
    }

    impl DebugHandler for Echo {
        fn handle_command(&mut self, cmd: DebugCommand) -> DebugResponse {
            self.seen.push(cmd.clone());
            match cmd {
                DebugCommand::Ping => DebugResponse::pong(),
                DebugCommand::GetLayout => DebugResponse::ok(ResponseData::Layout {
                    main: "earth".into(),
                    secondary_top: "orbit".into(),
                    secondary_bottom: "raysGround".into(),
                }),
                _ => DebugResponse::error("unsupported"),
            }
        }
    }

    fn handler() -> Arc<Mutex<dyn DebugHandler>> {
        Arc::new(Mutex::new(Echo { seen: Vec::new() }))
    }

    #[tokio::test]
    async fn test_respond_to_garbage() {
        let reply = respond("{not json", &handler()).await;
        let response: DebugResponse = serde_json::from_str(reply.trim_end()).unwrap();
        assert!(matches!(response, DebugResponse::Error { message } if message.starts_with("Invalid command JSON")));
        assert!(reply.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_round_trip_over_tcp() {
        let server = DebugServer::bind(handler(), "127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();

        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        writer.write_all(b"{\"cmd\":\"Ping\"}\n\n{\"cmd\":\"GetLayout\"}\n").await.unwrap();

        let first: DebugResponse = serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
        assert_eq!(first, DebugResponse::pong());

        let second: DebugResponse = serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
        match second {
            DebugResponse::Ok { data: ResponseData::Layout { main, .. } } => assert_eq!(main, "earth"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
