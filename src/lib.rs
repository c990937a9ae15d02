//! Boilerplate generation for Dart data-model classes.
//!
//! Field signatures are classified into a shape tree ([`signature`], [`ir`]),
//! turned into serialize/deserialize expressions ([`emit`]) and wrapped in the
//! `toMap`/`fromMap`, `apply` and `toString` members ([`template`]).
pub mod error;
pub mod ir;
pub mod signature;
pub mod field;
pub mod options;
pub mod emit;
pub mod template;
pub mod generator;
pub mod path_de;

pub use error::GenError;
pub use emit::{Emitter, Position};
pub use field::{FieldDescriptor, FieldSpec};
pub use generator::{generate, GenerationRequest, Generator};
pub use ir::{Scalar, Ty, TypeSig};
pub use options::{GenerationOptions, GeneratorConfig, MemberNames};
pub use signature::{classify, parse, Classified, Shape};
pub use template::{Template, TemplateKind};
