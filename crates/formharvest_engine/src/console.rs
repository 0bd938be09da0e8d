use encoding_rs::{Encoding, UTF_8};

/// Text encoding of the terminal that progress lines are printed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleEncoding(&'static Encoding);

impl ConsoleEncoding {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self(encoding)
    }

    pub fn utf8() -> Self {
        Self(UTF_8)
    }

    /// Resolve a WHATWG label such as `utf-8`, `latin1` or `cp1252`.
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(Self)
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub fn can_render(&self, text: &str) -> bool {
        let (_, _, unmappable) = self.0.encode(text);
        !unmappable
    }

    /// `text` as this encoding shows it, unmappable characters as `&#NNNN;`.
    pub fn render_lossy(&self, text: &str) -> String {
        let (bytes, used, _) = self.0.encode(text);
        let (decoded, _, _) = used.decode(&bytes);
        decoded.into_owned()
    }
}

impl Default for ConsoleEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}
