//! Integration tests for registration over real sockets.

mod common;

use std::time::Duration;

use tokio::io::AsyncBufReadExt;

use common::server::{CLIENT_HOST, SERVER_NAME};
use common::{TestClient, TestServer};

#[tokio::test]
async fn greeting_and_welcome() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut client = TestClient::connect(server.addr(), "sam")
        .await
        .expect("Failed to connect");

    let welcome = client.register().await.expect("Registration failed");
    assert_eq!(
        welcome.to_string(),
        format!(
            ":{SERVER_NAME} 001 sam :Welcome to the Internet Relay Network sam!~sam@{CLIENT_HOST}"
        )
    );
}

#[tokio::test]
async fn hostname_notices_come_first() {
    let server = TestServer::spawn().await.unwrap();
    let stream = tokio::net::TcpStream::connect(server.addr()).await.unwrap();
    let mut lines = tokio::io::BufReader::new(stream);

    let mut first = String::new();
    let mut second = String::new();
    lines.read_line(&mut first).await.unwrap();
    lines.read_line(&mut second).await.unwrap();

    assert_eq!(
        first,
        format!(":{SERVER_NAME} NOTICE * :*** Looking up your hostname...\r\n")
    );
    assert_eq!(
        second,
        format!(":{SERVER_NAME} NOTICE * :*** Found your hostname\r\n")
    );
}

#[tokio::test]
async fn concurrent_claims_have_one_winner() {
    let server = TestServer::spawn().await.unwrap();
    let mut a = TestClient::connect(server.addr(), "bob").await.unwrap();
    let mut b = TestClient::connect(server.addr(), "bob").await.unwrap();

    a.send_raw("USER alice 0 * :Alice").await.unwrap();
    b.send_raw("USER brian 0 * :Brian").await.unwrap();
    let (ra, rb) = tokio::join!(a.send_raw("NICK bob"), b.send_raw("NICK bob"));
    ra.unwrap();
    rb.unwrap();

    let replies = [a.recv().await.unwrap(), b.recv().await.unwrap()];
    let mut codes: Vec<&str> = replies.iter().map(|m| m.command.as_str()).collect();
    codes.sort_unstable();
    assert_eq!(codes, ["001", "433"]);

    let loser = replies.iter().find(|m| m.command == "433").unwrap();
    assert_eq!(
        loser.to_string(),
        format!(":{SERVER_NAME} 433 * bob :Nickname is already in use")
    );
}

#[tokio::test]
async fn names_collide_case_insensitively() {
    let server = TestServer::spawn().await.unwrap();
    let mut first = TestClient::connect(server.addr(), "Bob[1]").await.unwrap();
    first.register().await.unwrap();

    let mut second = TestClient::connect(server.addr(), "bob").await.unwrap();
    second.send_raw("USER bob 0 * :Bob").await.unwrap();
    second.send_raw("NICK bob{1}").await.unwrap();
    let reply = second.recv().await.unwrap();
    assert_eq!(reply.command, "433");
    assert_eq!(reply.arg(1), Some("bob{1}"));

    second.send_raw("NICK bob2").await.unwrap();
    assert_eq!(second.recv().await.unwrap().command, "001");
}

#[tokio::test]
async fn rename_frees_the_old_name() {
    let server = TestServer::spawn().await.unwrap();
    let mut sam = TestClient::connect(server.addr(), "sam").await.unwrap();
    sam.register().await.unwrap();

    sam.send_raw("NICK sammy").await.unwrap();
    assert_eq!(
        sam.recv().await.unwrap().to_string(),
        format!(":sam!~sam@{CLIENT_HOST} NICK sammy")
    );

    let mut other = TestClient::connect(server.addr(), "sam").await.unwrap();
    other.register().await.expect("old name should be free");

    other.send_raw("NICK SAMMY").await.unwrap();
    let reply = other.recv().await.unwrap();
    assert_eq!(
        reply.to_string(),
        format!(":{SERVER_NAME} 433 sam SAMMY :Nickname is already in use")
    );
}

#[tokio::test]
async fn commands_before_registration() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = TestClient::connect(server.addr(), "sam").await.unwrap();

    client.send_raw("FROB x").await.unwrap();
    assert_eq!(
        client.recv().await.unwrap().to_string(),
        format!(":{SERVER_NAME} 421 * FROB :Unknown command")
    );

    client.send_raw("USER sam 0 *").await.unwrap();
    assert_eq!(
        client.recv().await.unwrap().to_string(),
        format!(":{SERVER_NAME} 461 * USER :Not enough parameters")
    );

    client.send_raw("NICK 9lives").await.unwrap();
    assert_eq!(
        client.recv().await.unwrap().to_string(),
        format!(":{SERVER_NAME} 432 * 9lives :Erroneous nickname")
    );

    client.register().await.unwrap();
    client.send_raw("USER sam 0 * :again").await.unwrap();
    assert_eq!(
        client.recv().await.unwrap().to_string(),
        format!(":{SERVER_NAME} 462 sam :Unauthorized command (already registered)")
    );
}

#[tokio::test]
async fn unknown_verbs_of_any_shape_get_421() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = TestClient::connect(server.addr(), "sam").await.unwrap();

    for verb in ["FOO1", "X-CMD", "1234"] {
        client.send_raw(&format!("{verb} x")).await.unwrap();
        assert_eq!(
            client.recv().await.unwrap().to_string(),
            format!(":{SERVER_NAME} 421 * {verb} :Unknown command")
        );
    }
}

#[tokio::test]
async fn malformed_lines_are_dropped() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = TestClient::connect(server.addr(), "sam").await.unwrap();

    client.send_raw("").await.unwrap();
    client.send_raw(":lonely.prefix").await.unwrap();
    client.send_raw("PING :still-here").await.unwrap();

    assert_eq!(
        client.recv().await.unwrap().to_string(),
        format!(":{SERVER_NAME} PONG {SERVER_NAME} still-here")
    );
    assert!(
        client
            .recv_timeout(Duration::from_millis(100))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn password_is_checked() {
    let server = TestServer::spawn_toml("[server]\npassword = \"sekrit\"\n")
        .await
        .unwrap();

    let mut wrong = TestClient::connect(server.addr(), "sam").await.unwrap();
    wrong.send_raw("PASS guess").await.unwrap();
    wrong.send_raw("NICK sam").await.unwrap();
    wrong.send_raw("USER sam 0 * :Sam").await.unwrap();
    assert_eq!(
        wrong.recv().await.unwrap().to_string(),
        format!(":{SERVER_NAME} 464 sam :Password incorrect")
    );
    assert_eq!(
        wrong.recv().await.unwrap().to_string(),
        "ERROR :Closing link sam: Bad password"
    );
    wrong.expect_eof().await.unwrap();

    let mut right = TestClient::connect(server.addr(), "sam").await.unwrap();
    right.send_raw("PASS sekrit").await.unwrap();
    right.register().await.unwrap();
}
