//! Field descriptors: one already-resolved field of the target class.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{GenError, Result};
use crate::ir::TypeSig;
use crate::signature;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

pub(crate) fn check_identifier(kind: &'static str, name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(GenError::InvalidIdentifier { kind, name: name.to_string() })
    }
}

/// Wire form of a field as the host hands it over. Everything but the
/// storage name is optional; [`FieldDescriptor`] fills in and checks the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub variable_name: String,
    #[serde(default)]
    pub public_alias_name: Option<String>,
    #[serde(default)]
    pub map_key: Option<String>,
    /// `None` when the host could not determine a static type.
    #[serde(default)]
    pub type_signature: Option<String>,
    #[serde(default)]
    pub is_nullable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "FieldSpec")]
pub struct FieldDescriptor {
    variable_name: String,
    public_alias_name: String,
    map_key: String,
    type_signature: String,
    sig: TypeSig,
}

impl FieldDescriptor {
    pub fn new(
        variable_name: impl Into<String>,
        public_alias_name: impl Into<String>,
        type_signature: impl Into<String>,
    ) -> Result<Self> {
        FieldSpec {
            variable_name: variable_name.into(),
            public_alias_name: Some(public_alias_name.into()),
            type_signature: Some(type_signature.into()),
            ..FieldSpec::default()
        }
        .try_into()
    }

    /// Field whose alias is its own storage name.
    pub fn plain(variable_name: impl Into<String>, type_signature: impl Into<String>) -> Result<Self> {
        let variable_name = variable_name.into();
        Self::new(variable_name.clone(), variable_name, type_signature)
    }

    pub fn variable_name(&self) -> &str { &self.variable_name }
    pub fn public_alias_name(&self) -> &str { &self.public_alias_name }
    pub fn map_key(&self) -> &str { &self.map_key }
    pub fn type_signature(&self) -> &str { &self.type_signature }
    pub fn is_nullable(&self) -> bool { self.sig.nullable }
    pub fn sig(&self) -> &TypeSig { &self.sig }
}

impl TryFrom<FieldSpec> for FieldDescriptor {
    type Error = GenError;

    fn try_from(spec: FieldSpec) -> Result<Self> {
        check_identifier("field", &spec.variable_name)?;

        let public_alias_name = spec.public_alias_name.unwrap_or_else(|| spec.variable_name.clone());
        check_identifier("alias", &public_alias_name)?;

        let type_signature = match spec.type_signature {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => return Err(GenError::UnresolvedType { field: spec.variable_name }),
        };

        let sig = signature::parse(&type_signature);
        if let Some(declared) = spec.is_nullable {
            if declared != sig.nullable {
                return Err(GenError::NullabilityMismatch {
                    field: spec.variable_name,
                    signature: type_signature,
                    declared,
                });
            }
        }

        let map_key = spec.map_key.unwrap_or_else(|| public_alias_name.clone());

        Ok(Self {
            variable_name: spec.variable_name,
            public_alias_name,
            map_key,
            type_signature,
            sig,
        })
    }
}
