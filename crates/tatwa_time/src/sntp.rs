//! Minimal SNTP (RFC 4330) client.
//!
//! One request, one reply, transmit timestamp only. No clock filtering
//! and no round-trip correction; the result is accurate to network latency.

use std::io::ErrorKind;
use std::net::UdpSocket;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::TimeError;
use crate::source::TimeSource;

/// Default public pool server.
pub const DEFAULT_NTP_SERVER: &str = "europe.pool.ntp.org";

const NTP_PORT: u16 = 123;
const PACKET_LEN: usize = 48;

/// Seconds from 1900-01-01 (NTP era 0) to 1970-01-01.
const NTP_UNIX_OFFSET_S: i64 = 2_208_988_800;

/// LI = 0, VN = 3, Mode = 3 (client).
const CLIENT_HEADER: u8 = 0x1B;

/// Time source backed by an NTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SntpClock {
    server: String,
    timeout: Duration,
}

impl SntpClock {
    pub fn new(server: impl Into<String>, timeout: Duration) -> Self {
        Self {
            server: server.into(),
            timeout,
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for SntpClock {
    fn default() -> Self {
        Self::new(DEFAULT_NTP_SERVER, Duration::from_secs(5))
    }
}

impl TimeSource for SntpClock {
    fn now(&self) -> Result<DateTime<Utc>, TimeError> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        socket.set_read_timeout(Some(self.timeout))?;
        socket.set_write_timeout(Some(self.timeout))?;
        socket.connect((self.server.as_str(), NTP_PORT))?;

        let mut request = [0u8; PACKET_LEN];
        request[0] = CLIENT_HEADER;
        socket.send(&request)?;

        let mut reply = [0u8; PACKET_LEN];
        let n = socket.recv(&mut reply).map_err(|e| match e.kind() {
            ErrorKind::WouldBlock | ErrorKind::TimedOut => TimeError::Timeout(self.timeout_ms()),
            _ => TimeError::from(e),
        })?;

        let instant = decode_reply(&reply[..n])?;
        debug!(server = %self.server, %instant, "sntp reply");
        Ok(instant)
    }
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Decode the transmit timestamp of a server reply.
pub fn decode_reply(bytes: &[u8]) -> Result<DateTime<Utc>, TimeError> {
    if bytes.len() < PACKET_LEN {
        return Err(TimeError::InvalidPacket(format!(
            "{} bytes, expected {PACKET_LEN}",
            bytes.len()
        )));
    }
    let mode = bytes[0] & 0x07;
    if mode != 4 && mode != 5 {
        return Err(TimeError::InvalidPacket(format!("mode {mode} is not a server reply")));
    }
    if bytes[1] == 0 {
        return Err(TimeError::InvalidPacket("kiss-of-death (stratum 0)".into()));
    }

    let seconds = read_u32(bytes, 40);
    let fraction = read_u32(bytes, 44);
    if seconds == 0 {
        return Err(TimeError::InvalidPacket("empty transmit timestamp".into()));
    }

    let unix_s = i64::from(seconds) - NTP_UNIX_OFFSET_S;
    // 32-bit binary fraction of a second -> nanoseconds
    let nanos = ((u64::from(fraction) * 1_000_000_000) >> 32) as u32;
    DateTime::from_timestamp(unix_s, nanos)
        .ok_or_else(|| TimeError::OutOfRange(format!("unix seconds {unix_s}")))
}
