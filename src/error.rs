use std::{error::Error as StdError, fmt};

use http::StatusCode;

/// Library result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for account decoding, signing, transport, and response parsing.
#[non_exhaustive]
pub enum Error {
    /// Invalid configuration or parameters.
    InvalidConfig { message: String },

    /// Request signing failed.
    Signing { message: String },

    /// Transport-level failure (HTTP client, IO, TLS) with no payload to recover.
    Transport {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    },

    /// Service answered with a non-2xx status.
    Api {
        status: StatusCode,
        code: Option<String>,
        message: Option<String>,
        request_id: Option<String>,
        host_id: Option<String>,
        body_snippet: Option<String>,
    },

    /// Response body is not well-formed XML.
    MalformedXml {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    },

    /// Response XML is well-formed but does not match the expected schema.
    Parse {
        path: Option<String>,
        message: String,
    },

    /// Account JSON does not match the expected schema.
    Decode {
        path: Option<String>,
        message: String,
    },
}

/// The stage of a call that produced an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Building the request or its configuration.
    Config,
    /// Signing the request.
    Signing,
    /// Network exchange, including non-2xx answers.
    Transport,
    /// Checking the response body is XML.
    Xml,
    /// Mapping the response body onto typed results.
    Parse,
    /// Decoding account JSON.
    Decode,
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { message } => f
                .debug_struct("InvalidConfig")
                .field("message", message)
                .finish(),
            Self::Signing { message } => {
                f.debug_struct("Signing").field("message", message).finish()
            }
            Self::Transport { message, source } => f
                .debug_struct("Transport")
                .field("message", message)
                .field("source", source)
                .finish(),
            Self::Api {
                status,
                code,
                message,
                request_id,
                host_id,
                body_snippet,
            } => f
                .debug_struct("Api")
                .field("status", status)
                .field("code", code)
                .field("message", message)
                .field("request_id", request_id)
                .field("host_id", host_id)
                .field("body_snippet", body_snippet)
                .finish(),
            Self::MalformedXml { message, source } => f
                .debug_struct("MalformedXml")
                .field("message", message)
                .field("source", source)
                .finish(),
            Self::Parse { path, message } => f
                .debug_struct("Parse")
                .field("path", path)
                .field("message", message)
                .finish(),
            Self::Decode { path, message } => f
                .debug_struct("Decode")
                .field("path", path)
                .field("message", message)
                .finish(),
        }
    }
}

impl Error {
    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a signing error.
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Creates a transport error with optional source.
    pub fn transport(
        message: impl Into<String>,
        source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source,
        }
    }

    /// Creates a malformed XML error with optional source.
    pub fn malformed_xml(
        message: impl Into<String>,
        source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self::MalformedXml {
            message: message.into(),
            source,
        }
    }

    /// Creates a response parse error located at `path`.
    pub fn parse(path: Option<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: non_empty(path),
            message: message.into(),
        }
    }

    /// Creates an account decode error located at `path`.
    pub fn decode(path: Option<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: non_empty(path),
            message: message.into(),
        }
    }

    /// Returns the stage that failed.
    pub fn phase(&self) -> Phase {
        match self {
            Self::InvalidConfig { .. } => Phase::Config,
            Self::Signing { .. } => Phase::Signing,
            Self::Transport { .. } | Self::Api { .. } => Phase::Transport,
            Self::MalformedXml { .. } => Phase::Xml,
            Self::Parse { .. } => Phase::Parse,
            Self::Decode { .. } => Phase::Decode,
        }
    }

    /// Returns an HTTP status when available.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::InvalidConfig { .. }
            | Self::Signing { .. }
            | Self::Transport { .. }
            | Self::MalformedXml { .. }
            | Self::Parse { .. }
            | Self::Decode { .. } => None,
        }
    }

    /// Returns the request id if reported by the service.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Returns the document path of a parse or decode failure.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Parse { path, .. } | Self::Decode { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}

fn non_empty(path: Option<String>) -> Option<String> {
    path.filter(|p| !p.is_empty() && p != ".")
}

fn format_optional_field(label: &str, value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => format!(" {label}={v}"),
        _ => String::new(),
    }
}

fn format_optional_message(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => format!(" ({v})"),
        _ => String::new(),
    }
}

fn format_path(path: &Option<String>) -> String {
    match path.as_deref() {
        Some(p) => format!(" at {p}"),
        None => String::new(),
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { message } => write!(f, "invalid config: {message}"),
            Self::Signing { message } => write!(f, "signing error: {message}"),
            Self::Transport { message, .. } => write!(f, "transport error: {message}"),
            Self::Api {
                status,
                code,
                message,
                request_id,
                ..
            } => {
                let code = format_optional_field("code", code);
                let request_id = format_optional_field("request_id", request_id);
                let msg = format_optional_message(message);
                write!(f, "api error: {status}{code}{request_id}{msg}")
            }
            Self::MalformedXml { message, .. } => write!(f, "malformed xml: {message}"),
            Self::Parse { path, message } => {
                write!(f, "parse error{}: {message}", format_path(path))
            }
            Self::Decode { path, message } => {
                write!(f, "decode error{}: {message}", format_path(path))
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Transport { source, .. } | Self::MalformedXml { source, .. } => {
                source.as_deref().map(|e| e as &(dyn StdError + 'static))
            }
            Self::InvalidConfig { .. }
            | Self::Signing { .. }
            | Self::Api { .. }
            | Self::Parse { .. }
            | Self::Decode { .. } => None,
        }
    }
}
