//! A minimal STOMP 1.2 frame codec, covering the subset a Spring
//! WebSocket broker exchanges with a chat client: CONNECT/CONNECTED,
//! SUBSCRIBE, SEND, MESSAGE, ERROR and DISCONNECT.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Connect,
    Connected,
    Subscribe,
    Send,
    Message,
    Error,
    Receipt,
    Disconnect,
}

impl Command {
    fn as_str(&self) -> &'static str {
        match self {
            Command::Connect => "CONNECT",
            Command::Connected => "CONNECTED",
            Command::Subscribe => "SUBSCRIBE",
            Command::Send => "SEND",
            Command::Message => "MESSAGE",
            Command::Error => "ERROR",
            Command::Receipt => "RECEIPT",
            Command::Disconnect => "DISCONNECT",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "CONNECT" => Some(Command::Connect),
            "CONNECTED" => Some(Command::Connected),
            "SUBSCRIBE" => Some(Command::Subscribe),
            "SEND" => Some(Command::Send),
            "MESSAGE" => Some(Command::Message),
            "ERROR" => Some(Command::Error),
            "RECEIPT" => Some(Command::Receipt),
            "DISCONNECT" => Some(Command::Disconnect),
            _ => None,
        }
    }

    /// CONNECT and CONNECTED frames never escape header values, every
    /// other frame does.
    fn escapes_headers(&self) -> bool {
        !matches!(self, Command::Connect | Command::Connected)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameParseError {
    #[error("frame has no command line")]
    MissingCommand,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("malformed header line: {0}")]
    MalformedHeader(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: Command,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Frame {
    pub fn connect(host: &str) -> Self {
        Self {
            command: Command::Connect,
            headers: vec![
                ("accept-version".to_owned(), "1.2".to_owned()),
                ("host".to_owned(), host.to_owned()),
                ("heart-beat".to_owned(), "0,0".to_owned()),
            ],
            body: String::new(),
        }
    }

    pub fn subscribe(id: &str, destination: &str) -> Self {
        Self {
            command: Command::Subscribe,
            headers: vec![
                ("id".to_owned(), id.to_owned()),
                ("destination".to_owned(), destination.to_owned()),
            ],
            body: String::new(),
        }
    }

    pub fn send_json(destination: &str, body: String) -> Self {
        Self {
            command: Command::Send,
            headers: vec![
                ("destination".to_owned(), destination.to_owned()),
                ("content-type".to_owned(), "application/json".to_owned()),
                ("content-length".to_owned(), body.len().to_string()),
            ],
            body,
        }
    }

    pub fn disconnect() -> Self {
        Self {
            command: Command::Disconnect,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// The first header with the given name, per the STOMP repeated
    /// header rule.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn encode(&self) -> String {
        let mut out = String::new();
        out.push_str(self.command.as_str());
        out.push('\n');

        for (name, value) in &self.headers {
            if self.command.escapes_headers() {
                out.push_str(&escape_header(name));
                out.push(':');
                out.push_str(&escape_header(value));
            } else {
                out.push_str(name);
                out.push(':');
                out.push_str(value);
            }
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }

    /// Parses one frame from a WebSocket text payload. Returns `None`
    /// for heartbeats, which are bare end-of-line sequences.
    pub fn parse(raw: &str) -> Result<Option<Self>, FrameParseError> {
        let raw = raw.trim_start_matches(['\r', '\n']);
        if raw.is_empty() {
            return Ok(None);
        }

        let (head, tail) = raw
            .split_once("\n\n")
            .or_else(|| raw.split_once("\r\n\r\n"))
            .ok_or(FrameParseError::MissingCommand)?;
        let body = tail.split('\0').next().unwrap_or_default().to_owned();

        let mut lines = head.lines().map(|line| line.trim_end_matches('\r'));
        let command_line = lines.next().ok_or(FrameParseError::MissingCommand)?;
        let command = Command::parse(command_line)
            .ok_or_else(|| FrameParseError::UnknownCommand(command_line.to_owned()))?;

        let mut headers = Vec::new();
        for line in lines {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| FrameParseError::MalformedHeader(line.to_owned()))?;

            if command.escapes_headers() {
                headers.push((unescape_header(name), unescape_header(value)));
            } else {
                headers.push((name.to_owned(), value.to_owned()));
            }
        }

        Ok(Some(Self {
            command,
            headers,
            body,
        }))
    }
}

fn escape_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            ':' => out.push_str("\\c"),
            other => out.push(other),
        }
    }
    out
}

fn unescape_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('c') => out.push(':'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
