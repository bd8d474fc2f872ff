//! Line-oriented TCP stream source.
//!
//! Connects once at open time; each `read_batch` pulls whatever complete
//! lines the socket delivers within the read timeout. A closed peer ends the
//! stream with an error so the reader thread can report and stop.

use std::io::{BufRead, BufReader};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::{BenchError, BenchResult};
use crate::sink::Sample;

use super::line::{parse_line, ParsedLine};
use super::DataSource;

pub struct TcpSource {
    addr: String,
    reader: BufReader<TcpStream>,
    parse_errors: u64,
}

impl TcpSource {
    pub fn connect(addr: &str) -> BenchResult<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_read_timeout(Some(Duration::from_millis(100)))?;
        Ok(Self {
            addr: addr.to_string(),
            reader: BufReader::new(stream),
            parse_errors: 0,
        })
    }

    pub fn parse_errors(&self) -> u64 {
        self.parse_errors
    }
}

impl DataSource for TcpSource {
    fn name(&self) -> String {
        format!("tcp:{}", self.addr)
    }

    fn read_batch(&mut self) -> BenchResult<Vec<Sample>> {
        let mut out = Vec::new();
        let now = chrono::Utc::now().timestamp_micros();
        // Drain lines until the read timeout hits or a batch is big enough.
        loop {
            let mut raw = String::new();
            match self.reader.read_line(&mut raw) {
                Ok(0) => {
                    if out.is_empty() {
                        return Err(BenchError::Io(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            format!("peer {} closed the stream", self.addr),
                        )));
                    }
                    return Ok(out);
                }
                Ok(_) => match parse_line(&raw, "tcp", now) {
                    ParsedLine::Sample(s) => {
                        out.push(s);
                        if out.len() >= 1024 {
                            return Ok(out);
                        }
                    }
                    ParsedLine::Skip => {}
                    ParsedLine::Error(l) => {
                        self.parse_errors += 1;
                        tracing::warn!(addr = %self.addr, line = %l, "unparseable sample line");
                    }
                },
                Err(e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    return Ok(out);
                }
                Err(e) => return Err(BenchError::Io(e)),
            }
        }
    }
}
