// ABOUTME: Scoped character buffer for the leaf element currently being read.
// ABOUTME: Only one buffer exists at a time; text arriving while it is closed is dropped.

/// Collects raw character data between a leaf element's start and end tags.
#[derive(Debug, Default)]
pub struct TextAccumulator {
    buf: Option<String>,
}

impl TextAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh buffer, discarding any previous one.
    pub fn open(&mut self) {
        self.buf = Some(String::new());
    }

    pub fn is_open(&self) -> bool {
        self.buf.is_some()
    }

    pub fn append(&mut self, text: &str) {
        if let Some(buf) = self.buf.as_mut() {
            buf.push_str(text);
        }
    }

    /// Trimmed contents, or `None` when no buffer is open.
    pub fn resolve(&self) -> Option<String> {
        self.buf.as_deref().map(|text| text.trim().to_string())
    }

    pub fn close(&mut self) {
        self.buf = None;
    }
}
