//! Request-level entry point: validate everything, then assemble.
//!
//! A request either produces every template it asked for or fails as a
//! whole; no template is built until every field has been resolved.
use std::fmt;
use indexmap::{IndexMap, IndexSet};
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::error::Result;
use crate::field::{self, FieldDescriptor, FieldSpec};
use crate::options::GeneratorConfig;
use crate::template::{self, Template, TemplateKind};

/// A class and its selected fields, as handed over by the host.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub class_name: String,
    #[serde(default)]
    pub fields: FieldList,
    /// Member names already declared on the class.
    #[serde(default)]
    pub existing_members: Vec<String>,
}

/// Either full descriptors or an ordered `name → signature` shorthand.
/// A `null` signature in the shorthand marks an unresolved type.
#[derive(Debug, Clone)]
pub enum FieldList {
    Detailed(Vec<FieldSpec>),
    Shorthand(IndexMap<String, Option<String>>),
}

impl Default for FieldList {
    fn default() -> Self {
        FieldList::Detailed(Vec::new())
    }
}

// Dispatch on the JSON token (array → detailed, object → shorthand) and hand
// the rest to the inner type, so errors keep their full JSON path.
impl<'de> Deserialize<'de> for FieldList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldListVisitor;

        impl<'de> Visitor<'de> for FieldListVisitor {
            type Value = FieldList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array of fields or an object mapping field names to signatures")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<FieldList, A::Error> {
                Vec::<FieldSpec>::deserialize(SeqAccessDeserializer::new(seq)).map(FieldList::Detailed)
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<FieldList, A::Error> {
                IndexMap::<String, Option<String>>::deserialize(MapAccessDeserializer::new(map)).map(FieldList::Shorthand)
            }
        }

        deserializer.deserialize_any(FieldListVisitor)
    }
}

impl FieldList {
    pub fn specs(&self) -> Vec<FieldSpec> {
        match self {
            FieldList::Detailed(specs) => specs.clone(),
            FieldList::Shorthand(map) => map
                .iter()
                .map(|(name, sig)| FieldSpec {
                    variable_name: name.clone(),
                    type_signature: sig.clone(),
                    ..FieldSpec::default()
                })
                .collect(),
        }
    }
}

impl GenerationRequest {
    pub fn descriptors(&self) -> Result<Vec<FieldDescriptor>> {
        self.fields
            .specs()
            .into_iter()
            .map(FieldDescriptor::try_from)
            .collect()
    }
}

pub struct Generator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn template(&self, kind: TemplateKind, class_name: &str, fields: &[FieldDescriptor]) -> Template {
        match kind {
            TemplateKind::MapTemplate => template::map::assemble(class_name, fields, self.config),
            TemplateKind::ApplyMethod => template::apply::assemble(class_name, fields, self.config),
            TemplateKind::ToString => template::to_string::assemble(class_name, fields, self.config),
        }
    }

    /// Templates in the order first requested; repeated kinds are generated once.
    pub fn generate(
        &self,
        class_name: &str,
        fields: &[FieldDescriptor],
        kinds: &[TemplateKind],
    ) -> Result<Vec<Template>> {
        field::check_identifier("class", class_name)?;
        debug!(class = class_name, fields = fields.len(), "generating templates");

        let kinds: IndexSet<TemplateKind> = kinds.iter().copied().collect();
        Ok(kinds
            .into_iter()
            .map(|kind| {
                trace!(?kind, "assembling");
                self.template(kind, class_name, fields)
            })
            .collect())
    }
}

pub fn generate(
    request: &GenerationRequest,
    config: &GeneratorConfig,
    kinds: &[TemplateKind],
) -> Result<Vec<Template>> {
    let fields = request.descriptors()?;
    for f in &fields {
        trace!(field = f.variable_name(), signature = f.type_signature(), "resolved field");
    }
    let templates = Generator::new(config).generate(&request.class_name, &fields, kinds)?;
    Ok(templates
        .into_iter()
        .map(|t| t.replacing(&request.existing_members))
        .collect())
}
