// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use serde_json::{json, Value};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};
use url::Url;

/// `SN_SEPOLIA` as a felt.
pub const CHAIN_ID: &str = "0x534e5f5345504f4c4941";

/// Serves a single canned HTTP response on a random local port.
pub async fn serve_once(status: &'static str, body: String) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

/// Serves a minimal devnet until the test ends: `GET /predeployed_accounts` returns `accounts`
/// and every JSON-RPC call is answered with [`CHAIN_ID`].
pub async fn serve_devnet(accounts: String) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            let accounts = accounts.clone();
            tokio::spawn(answer_devnet(socket, accounts));
        }
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

async fn answer_devnet(mut socket: TcpStream, accounts: String) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    let header_end = loop {
        if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            return;
        }
        request.extend_from_slice(&buf[..n]);
    };
    let head = String::from_utf8_lossy(&request[..header_end]).into_owned();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while request.len() < header_end + content_length {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buf[..n]);
    }

    let (status, body) = if head.starts_with("GET /predeployed_accounts") {
        ("200 OK", accounts)
    } else if head.starts_with("POST") {
        let call: Value = serde_json::from_slice(&request[header_end..]).unwrap_or_default();
        let id = call.get("id").cloned().unwrap_or(json!(1));
        let reply = json!({ "jsonrpc": "2.0", "id": id, "result": CHAIN_ID });
        ("200 OK", reply.to_string())
    } else {
        ("404 Not Found", String::new())
    };
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    socket.write_all(response.as_bytes()).await.unwrap();
    socket.shutdown().await.ok();
}
