//! Rich message content.
//!
//! A [`Literal`] is an ordered list of fragments. Plain text is the common case,
//! but responses can carry code the model wrote, the output of running it, or
//! markers for content that cannot be inlined (binary blobs, remote files, tool
//! traffic). Legacy paths that only understand strings use
//! [`Literal::plain_text`].

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

/// Ordered sequence of content fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Literal {
    fragments: Vec<Fragment>,
}

impl Literal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal consisting of a single text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            fragments: vec![Fragment::Text(text.into())],
        }
    }

    /// Appends a fragment, keeping insertion order.
    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Plain-text projection: every fragment rendered and concatenated in order.
    pub fn plain_text(&self) -> String {
        self.to_string()
    }
}

/// Code fragments always start on a line of their own.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut line_start = true;

        for fragment in &self.fragments {
            if fragment.is_block() && !line_start {
                f.write_char('\n')?;
            }

            write!(f, "{fragment}")?;

            line_start = match fragment {
                Fragment::Text(text) if text.is_empty() => line_start,
                Fragment::Text(text) => text.ends_with('\n'),
                Fragment::Placeholder(_) => false,
                Fragment::Code(_) | Fragment::LabeledCode { .. } => true,
            };
        }

        Ok(())
    }
}

impl From<&str> for Literal {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Literal {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl FromIterator<Fragment> for Literal {
    fn from_iter<T: IntoIterator<Item = Fragment>>(iter: T) -> Self {
        Self {
            fragments: iter.into_iter().collect(),
        }
    }
}

/// One piece of a [`Literal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Fragment {
    /// Text, rendered verbatim.
    Text(String),

    /// Stand-in for content that is not inlined. Rendered as `[<label>]`.
    Placeholder(String),

    /// Fenced code block.
    Code(CodeBlock),

    /// Code block preceded by a `<label>:` line.
    LabeledCode { label: String, block: CodeBlock },
}

impl Fragment {
    fn is_block(&self) -> bool {
        matches!(self, Fragment::Code(_) | Fragment::LabeledCode { .. })
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Text(text) => f.write_str(text),
            Fragment::Placeholder(label) => write!(f, "[{label}]"),
            Fragment::Code(block) => write!(f, "{block}"),
            Fragment::LabeledCode { label, block } => write!(f, "{label}:\n{block}"),
        }
    }
}

/// Source or program output wrapped in a markdown fence, ending with a newline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Info string placed after the opening fence, if any.
    pub language: Option<String>,
    pub code: String,
}

impl fmt::Display for CodeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("```")?;

        if let Some(language) = &self.language {
            f.write_str(language)?;
        }

        f.write_char('\n')?;
        f.write_str(&self.code)?;

        if !self.code.ends_with('\n') {
            f.write_char('\n')?;
        }

        f.write_str("```\n")
    }
}
