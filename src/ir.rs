// Strongly-typed shape tree for codegen. No raw signature slicing past this point.
use std::fmt;
use serde::Serialize;

/// Fixed, self-serializing Dart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scalar {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "num")]
    Num,
    #[serde(rename = "String")]
    String,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "dynamic")]
    Dynamic,
    #[serde(rename = "DateTime")]
    DateTime,            // fixed-format date/time, passed through as-is
}

impl Scalar {
    pub const ALL: [Scalar; 7] = [
        Scalar::Int,
        Scalar::Double,
        Scalar::Num,
        Scalar::String,
        Scalar::Bool,
        Scalar::Dynamic,
        Scalar::DateTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Scalar::Int => "int",
            Scalar::Double => "double",
            Scalar::Num => "num",
            Scalar::String => "String",
            Scalar::Bool => "bool",
            Scalar::Dynamic => "dynamic",
            Scalar::DateTime => "DateTime",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Ty {
    Scalar { name: Scalar },
    List { element: Box<TypeSig> },
    Map {
        key: Box<TypeSig>,   // always `String` in practice
        value: Box<TypeSig>,
    },
    Object { name: String }, // user model exposing its own toMap/fromMap
}

/// A shape plus the nullability of *this* level. Nested levels carry their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSig {
    #[serde(flatten)]
    pub ty: Ty,
    pub nullable: bool,
}

impl TypeSig {
    pub fn scalar(name: Scalar, nullable: bool) -> Self {
        Self { ty: Ty::Scalar { name }, nullable }
    }

    /// Same shape with nullability forced on; used for `apply` parameters.
    pub fn to_nullable(&self) -> Self {
        Self { ty: self.ty.clone(), nullable: true }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Scalar { name } => f.write_str(name.as_str()),
            Ty::List { element } => write!(f, "List<{element}>"),
            Ty::Map { key, value } => write!(f, "Map<{key}, {value}>"),
            Ty::Object { name } => f.write_str(name),
        }
    }
}

impl fmt::Display for TypeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}
