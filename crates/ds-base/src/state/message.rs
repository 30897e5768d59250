#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
    System,
}

/// Web page a grounded reply was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Display ID (e.g., U1, A1), unique within a session
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub sources: Option<Vec<Source>>,
    /// Local fallback text standing in for a failed reply
    pub is_error: bool,
    /// Timestamp when this message was created (ms since UNIX epoch)
    pub timestamp_ms: u64,
}

impl Message {
    pub fn new_user(id: String, content: String) -> Self {
        Self { id, role: ChatRole::User, content, sources: None, is_error: false, timestamp_ms: now_ms() }
    }

    /// Create an empty model message ready for the reveal.
    pub fn new_model(id: String, sources: Option<Vec<Source>>) -> Self {
        Self { id, role: ChatRole::Model, content: String::new(), sources, is_error: false, timestamp_ms: now_ms() }
    }

    /// Create a committed model message carrying a local error text.
    pub fn new_error(id: String, content: String) -> Self {
        Self { id, role: ChatRole::Model, content, sources: None, is_error: true, timestamp_ms: now_ms() }
    }

    pub fn has_sources(&self) -> bool {
        self.sources.as_ref().is_some_and(|s| !s.is_empty())
    }
}

pub fn now_ms() -> u64 {
    std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}
