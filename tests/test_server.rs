//! End-to-end tests over a real TCP socket

use std::sync::Arc;
use std::time::Duration;

use httpfromtcp::handler::DemoHandler;
use httpfromtcp::http::connection::ReadOptions;
use httpfromtcp::server::listener::serve;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn start_server() -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(DemoHandler::new(Duration::ZERO));

    tokio::spawn(serve(listener, ReadOptions::default(), handler));
    addr
}

async fn exchange(addr: std::net::SocketAddr, request: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut stream = TcpStream::connect(addr).await?;
    stream.write_all(request).await?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await?;
    Ok(response)
}

#[tokio::test]
async fn test_serves_fixed_response() {
    let addr = start_server().await;

    let response = exchange(addr, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    let text = String::from_utf8(response).unwrap();

    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("Connection: close\r\n"));
    assert!(text.ends_with("</html>"));
}

#[tokio::test]
async fn test_serves_request_with_body() {
    let addr = start_server().await;

    let response = exchange(
        addr,
        b"POST /yourproblem HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello",
    )
    .await
    .unwrap();

    assert!(response.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));
}

#[tokio::test]
async fn test_serves_concurrent_connections() {
    let addr = start_server().await;

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            tokio::spawn(async move {
                exchange(addr, b"GET /myproblem HTTP/1.1\r\n\r\n").await
            })
        })
        .collect();

    for task in tasks {
        let response = task.await.unwrap().unwrap();
        assert!(response.starts_with(b"HTTP/1.1 500 Internal Server Error\r\n"));
    }
}

#[tokio::test]
async fn test_malformed_request_gets_no_response() {
    let addr = start_server().await;

    match exchange(addr, b"GET / HTTP/1.0\r\n\r\n").await {
        Ok(response) => assert!(response.is_empty()),
        Err(e) => assert_eq!(e.kind(), std::io::ErrorKind::ConnectionReset),
    }
}

#[tokio::test]
async fn test_stalled_request_is_dropped() {
    let addr = start_server().await;
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET / HTTP/1.1\r\n").await.unwrap();

    let mut response = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("server should close the stalled connection");

    match read {
        Ok(_) => assert!(response.is_empty()),
        Err(e) => assert_eq!(e.kind(), std::io::ErrorKind::ConnectionReset),
    }
}
