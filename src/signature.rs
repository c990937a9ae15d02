//! Type-signature classifier.
//!
//! `classify` peels exactly one level off a raw Dart signature and hands the
//! nested generic arguments back as un-parsed substrings; `parse` drives it
//! recursively into an immutable [`TypeSig`] tree.
//!
//! Matching order (first match wins, no backtracking):
//! 1. exact scalar name (`int`, `String`, `DateTime`, ...)
//! 2. head identifier `List` → one element argument
//! 3. head identifier `Map`  → key and value arguments
//! 4. anything else → user model (`Object`)
//!
//! Generic arguments are split at the top level with explicit bracket
//! balancing, so `List<Map<String, X>>` yields the element `Map<String, X>`.
//! Malformed input never errors: missing arguments default to `dynamic`,
//! an unclosed `<` runs to the end of the signature, trailing noise after the
//! closing `>` is ignored.
use crate::ir::{Scalar, Ty, TypeSig};

const DYNAMIC: &str = "dynamic";
const STRING: &str = "String";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'a> {
    Scalar(Scalar),
    List { element: &'a str },
    Map { key: &'a str, value: &'a str },
    Object(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    pub shape: Shape<'a>,
    pub nullable: bool,
}

/// Strip one trailing `?`. Returns the trimmed base and whether it was there.
pub fn strip_nullable(signature: &str) -> (&str, bool) {
    let signature = signature.trim();
    match signature.strip_suffix('?') {
        Some(base) => (base.trim_end(), true),
        None => (signature, false),
    }
}

pub fn classify(signature: &str) -> Classified<'_> {
    let (base, nullable) = strip_nullable(signature);

    if let Some(name) = Scalar::from_name(base) {
        return Classified { shape: Shape::Scalar(name), nullable };
    }

    let (head, args) = split_generic(base);
    let shape = match head {
        "List" => Shape::List { element: args.first().copied().unwrap_or(DYNAMIC) },
        "Map" => match args.as_slice() {
            &[key, value, ..] => Shape::Map { key, value },
            &[value] => Shape::Map { key: STRING, value },
            [] => Shape::Map { key: STRING, value: DYNAMIC },
        },
        _ => Shape::Object(base),
    };
    Classified { shape, nullable }
}

/// Recursive descent over [`classify`].
pub fn parse(signature: &str) -> TypeSig {
    let Classified { shape, nullable } = classify(signature);
    let ty = match shape {
        Shape::Scalar(name) => Ty::Scalar { name },
        Shape::List { element } => Ty::List { element: Box::new(parse(element)) },
        Shape::Map { key, value } => Ty::Map {
            key: Box::new(parse(key)),
            value: Box::new(parse(value)),
        },
        Shape::Object(name) => Ty::Object { name: name.to_string() },
    };
    TypeSig { ty, nullable }
}

// Split `Head<A, B<C, D>>` into ("Head", ["A", "B<C, D>"]).
fn split_generic(base: &str) -> (&str, Vec<&str>) {
    let Some(open) = base.find('<') else {
        return (base, Vec::new());
    };
    let head = base[..open].trim();
    let inner = &base[open + 1..];

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut end = inner.len(); // unclosed: take everything
    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' if depth == 0 => {
                end = i;
                break;
            }
            '>' => depth -= 1,
            ',' if depth == 0 => {
                args.push(argument(&inner[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(argument(&inner[start..end]));
    (head, args)
}

// Empty slots keep their position: `Map<String,>` has a `dynamic` value.
fn argument(raw: &str) -> &str {
    match raw.trim() {
        "" => DYNAMIC,
        arg => arg,
    }
}

// ------------------------------- Tests ------------------------------------ //
