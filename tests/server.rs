//! End-to-end tests for the accept/respond cycle.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use minihttpd::config::ServerConfig;
use minihttpd::http::{HttpServer, HOME_PAGE};

mod common;

const GET_REQUEST: &[u8] = b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n";

#[tokio::test]
async fn serves_the_fixed_page() {
    let (addr, _) = common::spawn_server().await;

    let response = common::roundtrip(addr, GET_REQUEST).await;
    let text = String::from_utf8(response).unwrap();

    let (head, body) = text.split_once("\n\n").unwrap();
    let mut lines = head.lines();
    assert_eq!(lines.next(), Some("HTTP/1.1 200 OK"));
    assert_eq!(lines.next(), Some("Content-Type: text/html"));
    assert_eq!(
        lines.next(),
        Some(format!("Content-Length: {}", HOME_PAGE.len()).as_str())
    );
    assert_eq!(body, HOME_PAGE);
}

#[tokio::test]
async fn request_content_does_not_influence_the_response() {
    let (addr, _) = common::spawn_server().await;

    let from_get = common::roundtrip(addr, GET_REQUEST).await;
    let from_garbage = common::roundtrip(addr, &[0xDE; 1024]).await;

    assert_eq!(from_get, from_garbage);
    assert!(from_get.ends_with(HOME_PAGE.as_bytes()));
}

#[tokio::test]
async fn responses_are_identical_across_connections() {
    let (addr, _) = common::spawn_server().await;

    let first = common::roundtrip(addr, GET_REQUEST).await;
    let second = common::roundtrip(addr, GET_REQUEST).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn eof_before_any_bytes_still_gets_the_page() {
    let (addr, _) = common::spawn_server().await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    // Half-close immediately; the server sees a zero-byte read.
    stream.shutdown().await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    assert!(response.ends_with(HOME_PAGE.as_bytes()));
}

#[tokio::test]
async fn concurrent_clients_all_get_responses() {
    let (addr, _) = common::spawn_server().await;

    let mut clients = Vec::new();
    for i in 0..50 {
        clients.push(tokio::spawn(async move {
            // Every tenth client disconnects without sending anything.
            if i % 10 == 0 {
                let stream = TcpStream::connect(addr).await.unwrap();
                drop(stream);
                return None;
            }
            Some(common::roundtrip(addr, GET_REQUEST).await)
        }));
    }

    let mut served = 0;
    for client in clients {
        if let Some(response) = client.await.unwrap() {
            assert!(response.ends_with(HOME_PAGE.as_bytes()));
            served += 1;
        }
    }
    assert_eq!(served, 45);
}

#[tokio::test]
async fn finished_handlers_are_reclaimed() {
    let (addr, stats) = common::spawn_server().await;

    for _ in 0..200 {
        let _ = common::roundtrip(addr, GET_REQUEST).await;
    }

    // Reclamation is asynchronous; wait for the counters to converge.
    for _ in 0..200 {
        if stats.spawned() >= 200 && stats.in_flight() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert!(stats.spawned() >= 200);
    assert_eq!(stats.in_flight(), 0);
    assert_eq!(stats.reaped(), stats.spawned());
}

#[tokio::test]
async fn second_bind_to_the_same_port_fails_and_leaves_the_first_serving() {
    let (addr, _) = common::spawn_server().await;

    let mut config = ServerConfig::default();
    config.listener.port = addr.port().to_string();
    assert!(HttpServer::bind(&config).await.is_err());

    // The losing bind must not have disturbed the first listener.
    let response = common::roundtrip(addr, GET_REQUEST).await;
    assert!(response.ends_with(HOME_PAGE.as_bytes()));
}
