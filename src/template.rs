//! Template assembly.
//!
//! Each assembler is a flat sequencer: a fixed member skeleton around one
//! fragment per field, in caller order. Assemblers return immutable
//! [`Line`] sequences; turning them into text is [`render`]'s job alone.
pub mod map;
pub mod apply;
pub mod to_string;

use serde::Serialize;

const INDENT: &str = "  ";

/// Semantic kind the host uses to find and replace previously generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TemplateKind {
    MapTemplate,
    ApplyMethod,
    ToString,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::MapTemplate,
        TemplateKind::ApplyMethod,
        TemplateKind::ToString,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub depth: usize,
    pub text: String, // empty → blank line
}

/// One generated class member (`toMap`, `fromMap`, `apply`, `toString`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    pub lines: Vec<Line>,
}

impl Member {
    pub fn render(&self) -> String {
        render(&self.lines)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub kind: TemplateKind,
    pub members: Vec<Member>,
    /// Existing members of the class this template replaces; the host deletes
    /// them before inserting.
    pub delete: Vec<String>,
}

impl Template {
    pub fn new(kind: TemplateKind, members: Vec<Member>) -> Self {
        Self { kind, members, delete: Vec::new() }
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    /// Mark every member this template defines that already exists on the class.
    pub fn replacing<S: AsRef<str>>(mut self, existing: &[S]) -> Self {
        self.delete = self
            .member_names()
            .filter(|name| existing.iter().any(|e| e.as_ref() == *name))
            .map(str::to_string)
            .collect();
        self
    }

    pub fn render(&self) -> String {
        self.members
            .iter()
            .map(Member::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

pub fn render(lines: &[Line]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if !line.text.is_empty() {
            for _ in 0..line.depth {
                out.push_str(INDENT);
            }
            out.push_str(&line.text);
        }
    }
    out
}

// Local accumulator used inside a single assembler call.
#[derive(Default)]
pub(crate) struct Block {
    lines: Vec<Line>,
    depth: usize,
}

impl Block {
    pub(crate) fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line { depth: self.depth, text: text.into() });
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.lines.push(Line { depth: 0, text: String::new() });
        self
    }

    /// Emit `text` and indent what follows.
    pub(crate) fn open(&mut self, text: impl Into<String>) -> &mut Self {
        self.line(text);
        self.depth += 1;
        self
    }

    /// Dedent and emit `text`.
    pub(crate) fn close(&mut self, text: impl Into<String>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(text)
    }

    /// Dedent, emit `text`, indent again: `}) {` after a parameter list.
    pub(crate) fn reopen(&mut self, text: impl Into<String>) -> &mut Self {
        self.close(text);
        self.depth += 1;
        self
    }

    pub(crate) fn finish(self) -> Vec<Line> {
        self.lines
    }
}
