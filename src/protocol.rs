// SPDX-License-Identifier: MIT

use log::*;
use thiserror::Error;

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Replies larger than this are truncated; the leader's replies are one short
/// status line.
const REPLY_BUF_SIZE: usize = 4096;

/// A transport-level fault. All of these are reported to the operator and the
/// session continues; none are retried.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection refused: the leader server may not be running")]
    ConnectionRefused,

    #[error("timed out talking to the leader server")]
    Timeout,

    #[error("cannot resolve leader address {0}")]
    BadAddress(String),

    #[error("network failure: {0}")]
    Network(#[from] io::Error),
}

/// Speaks the leader's line protocol: one command per TCP connection, UTF-8
/// text terminated by a newline, one reply read back, connection closed.
pub struct ProtocolClient {
    host: String,
    port: u16,
    timeout: Duration,
}

impl ProtocolClient {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.to_string(),
            port,
            timeout,
        }
    }

    /// Sends one command line and returns the leader's reply, trimmed of
    /// surrounding whitespace.
    ///
    /// The connect and both I/O directions carry the configured timeout, so
    /// an unresponsive leader surfaces as `Timeout` instead of hanging the
    /// session.
    pub fn send(&self, line: &str) -> Result<String, ProtocolError> {
        let addr = self.resolve()?;

        let mut stream = TcpStream::connect_timeout(&addr, self.timeout).map_err(classify)?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;

        let framed = format!("{}\n", line.trim());
        debug!("-> {addr}: {}", line.trim());
        stream.write_all(framed.as_bytes()).map_err(classify)?;

        let mut buf = vec![0; REPLY_BUF_SIZE];
        let n = stream.read(&mut buf).map_err(classify)?;
        let reply = String::from_utf8_lossy(&buf[..n]).trim().to_string();
        debug!("<- {addr}: {reply}");
        Ok(reply)
    }

    fn resolve(&self) -> Result<SocketAddr, ProtocolError> {
        let target = format!("{}:{}", self.host, self.port);
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or(ProtocolError::BadAddress(target))
    }
}

fn classify(err: io::Error) -> ProtocolError {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => ProtocolError::ConnectionRefused,
        // Read timeouts surface as WouldBlock on some platforms.
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => ProtocolError::Timeout,
        _ => ProtocolError::Network(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::TcpListener;
    use std::thread;

    fn one_shot_server(reply: &'static [u8]) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        thread::spawn(move || {
            let (mut sock, _) = listener.accept().unwrap();
            let mut buf = vec![0; 256];
            let _ = sock.read(&mut buf).unwrap();
            sock.write_all(reply).unwrap();
        });
        port
    }

    #[test]
    fn reply_is_trimmed() {
        let port = one_shot_server(b"OK\n");
        let client = ProtocolClient::new("127.0.0.1", port, Duration::from_secs(5));
        assert_eq!(client.send("SET 1 hello").unwrap(), "OK");
    }

    #[test]
    fn unresponsive_server_surfaces_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        thread::spawn(move || {
            let (mut sock, _) = listener.accept().unwrap();
            let mut buf = vec![0; 256];
            let _ = sock.read(&mut buf);
            // Hold the connection open past the client's deadline without
            // ever replying; dropping it early would read as a clean EOF.
            thread::sleep(Duration::from_secs(2));
        });

        let client = ProtocolClient::new("127.0.0.1", port, Duration::from_millis(100));
        assert!(matches!(
            client.send("GET 1"),
            Err(ProtocolError::Timeout)
        ));
    }

    #[test]
    fn refused_connection_is_classified() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = ProtocolClient::new("127.0.0.1", port, Duration::from_secs(5));
        assert!(matches!(
            client.send("GET 1"),
            Err(ProtocolError::ConnectionRefused)
        ));
    }
}
