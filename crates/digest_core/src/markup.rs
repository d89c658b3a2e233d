//! HTML construction with an explicit trust boundary.
//!
//! Plain text always goes through [`escape_html`], both in text nodes and in
//! attribute values. [`TrustedHtml`] is the only way to put raw markup into an
//! [`Html`] buffer, and it has to be constructed on purpose.

/// Escapes text so it is never interpreted as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Pre-rendered markup that is inserted without escaping.
///
/// Only the digest body produced by the API is trusted this way.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub fn from_trusted_source(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Append-only HTML buffer.
///
/// Tag and attribute names are static; everything dynamic is escaped unless it
/// arrives as [`TrustedHtml`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Html {
    buf: String,
}

impl Html {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape_html(value));
            self.buf.push('"');
        }
        self.buf.push('>');
        self
    }

    pub fn close(&mut self, tag: &'static str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// Writes `<tag attrs>text</tag>` with the text escaped.
    pub fn element(
        &mut self,
        tag: &'static str,
        attrs: &[(&'static str, &str)],
        text: &str,
    ) -> &mut Self {
        self.open(tag, attrs).text(text).close(tag)
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(&escape_html(text));
        self
    }

    pub fn trusted(&mut self, markup: &TrustedHtml) -> &mut Self {
        self.buf.push_str(markup.as_str());
        self
    }

    /// Inserts markup written into the program itself, such as styles and
    /// scripts of the page shell.
    pub fn raw_static(&mut self, markup: &'static str) -> &mut Self {
        self.buf.push_str(markup);
        self
    }

    pub fn append(&mut self, other: Html) -> &mut Self {
        self.buf.push_str(&other.buf);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
