use apiwatch_core_types::RunId;
use thiserror::Error;

/// Result type alias using the canonical structured error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code used in log events (`err.code`) and in
/// tests. The first three kinds are the run-level failure classes: a fetch or
/// document failure aborts the run before the snapshot is touched, a notify
/// failure is logged and the run carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// The document source could not be reached or answered non-2xx
    Fetch,
    /// The fetched bytes are not a usable JSON document
    InvalidDocument,
    /// The webhook could not be reached or rejected the payload
    Notify,

    // Local storage
    Io,
    Serialization,
    Persistence,

    /// Required configuration is missing or malformed
    Config,

    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Fetch => "ERR_FETCH",
            ExErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            ExErrorKind::Notify => "ERR_NOTIFY",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether an error of this kind must abort the run
    ///
    /// Notify failures are the only non-fatal kind: the change was detected
    /// correctly, so the new baseline is still written.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ExErrorKind::Notify)
    }
}

/// Canonical structured error type
///
/// Built fluently: `ExError::new(kind).with_op("fetch").with_message(..)`.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    url: Option<String>,
    status: Option<u16>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            url: None,
            status: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the remote URL involved. Never pass a webhook URL here.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Add the HTTP status returned by the remote side
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add run correlation context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the remote URL context, if any
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Get the HTTP status context, if any
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Get the run id context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(url) = &self.url {
            write!(f, " (url: {})", url)?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }
        if let Some(run_id) = &self.run_id {
            write!(f, " (run_id: {})", run_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy raised at the I/O boundaries
///
/// Collaborators construct these and convert into [`ExError`] with `into()`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WatchError {
    /// Transport-level failure reaching the document source
    #[error("Failed to fetch API document from {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// The document source answered with a non-success status
    #[error("API document request to {url} returned HTTP {status}")]
    FetchStatus { url: String, status: u16 },

    /// Fetched bytes are not valid UTF-8
    #[error("API document is not valid UTF-8: {reason}")]
    InvalidEncoding { reason: String },

    /// Fetched bytes are not valid JSON
    #[error("API document is not valid JSON: {reason}")]
    InvalidJson { reason: String },

    /// JSON root is not an object
    #[error("API document root must be a JSON object")]
    NotAnObject,

    /// A known section is present with the wrong JSON type
    #[error("API document has a malformed section: {reason}")]
    MalformedSection { reason: String },

    /// Webhook transport failure
    #[error("Failed to deliver notification: {reason}")]
    NotifyFailed { reason: String },

    /// Webhook answered with a non-success status
    #[error("Webhook returned HTTP {status}")]
    NotifyStatus { status: u16 },

    /// Required setting absent
    #[error("Missing required setting: {name}")]
    MissingSetting { name: String },

    /// Serialization failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<WatchError> for ExError {
    fn from(err: WatchError) -> Self {
        let message = err.to_string();
        match err {
            WatchError::FetchFailed { url, .. } => ExError::new(ExErrorKind::Fetch)
                .with_op("fetch_document")
                .with_url(url)
                .with_message(message),

            WatchError::FetchStatus { url, status } => ExError::new(ExErrorKind::Fetch)
                .with_op("fetch_document")
                .with_url(url)
                .with_status(status)
                .with_message(message),

            WatchError::InvalidEncoding { .. }
            | WatchError::InvalidJson { .. }
            | WatchError::NotAnObject
            | WatchError::MalformedSection { .. } => {
                ExError::new(ExErrorKind::InvalidDocument)
                    .with_op("parse_document")
                    .with_message(message)
            }

            WatchError::NotifyFailed { .. } => ExError::new(ExErrorKind::Notify)
                .with_op("notify")
                .with_message(message),

            WatchError::NotifyStatus { status } => ExError::new(ExErrorKind::Notify)
                .with_op("notify")
                .with_status(status)
                .with_message(message),

            WatchError::MissingSetting { .. } => ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(message),

            WatchError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for WatchError {
    fn from(err: serde_json::Error) -> Self {
        WatchError::Serialization {
            message: err.to_string(),
        }
    }
}
