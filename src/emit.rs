//! Expression emitter: one serialize and one deserialize rule per shape.
//!
//! Both directions are a structural recursion over [`TypeSig`]. Each level
//! gates its own null-safe access on its own nullability, so a nullable list
//! of non-null models and a non-null list of nullable models come out
//! differently. Closure parameters carry the nesting depth (`e`, `e1`, ...)
//! so inner lambdas never shadow outer ones.
use crate::field::FieldDescriptor;
use crate::ir::{Scalar, Ty, TypeSig};
use crate::options::{GenerationOptions, GeneratorConfig, MemberNames};

/// Where a value sits: directly under a constructor argument, or inside a
/// collection lambda. Scalars inside collections are always cast so the
/// resulting `List`/`Map` carries the element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Field,
    Element,
}

const DECODED_LIST: &str = "List<dynamic>";
const DECODED_MAP: &str = "Map<String, dynamic>";

#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    options: GenerationOptions,
    names: &'a MemberNames,
}

impl<'a> Emitter<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { options: config.options, names: &config.names }
    }

    /// `'age'`, or `keyMapper('age')` when a key mapper is threaded through.
    pub fn key_literal(&self, key: &str) -> String {
        let literal = dart_string(key);
        if self.options.add_key_mapper {
            format!("{}({literal})", self.names.key_mapper)
        } else {
            literal
        }
    }

    /// `map['age']`
    pub fn map_access(&self, field: &FieldDescriptor) -> String {
        format!("{}[{}]", self.names.map_variable, self.key_literal(field.map_key()))
    }

    /// One `toMap` entry: `'age': age,`
    pub fn serialize_field(&self, field: &FieldDescriptor) -> String {
        format!(
            "{}: {},",
            self.key_literal(field.map_key()),
            self.serialize_value(field.variable_name(), field.sig(), 0),
        )
    }

    /// One `fromMap` constructor argument: `age: map['age'] as int,`
    pub fn deserialize_field(&self, field: &FieldDescriptor) -> String {
        format!(
            "{}: {},",
            field.public_alias_name(),
            self.deserialize_value(&self.map_access(field), field.sig(), 0, Position::Field),
        )
    }

    pub fn serialize_value(&self, accessor: &str, sig: &TypeSig, depth: usize) -> String {
        let access = if sig.nullable { "?." } else { "." };
        match &sig.ty {
            Ty::Scalar { .. } => accessor.to_string(),
            Ty::List { element } => {
                let e = param("e", depth);
                let inner = self.serialize_value(&e, element, depth + 1);
                format!("{accessor}{access}map(({e}) => {inner}).toList()")
            }
            Ty::Map { value, .. } => {
                let (k, v) = (param("key", depth), param("value", depth));
                let inner = self.serialize_value(&v, value, depth + 1);
                format!("{accessor}{access}map(({k}, {v}) => MapEntry({k}, {inner}))")
            }
            Ty::Object { .. } => {
                let args = self.forwarded_key_mapper().unwrap_or_default();
                format!("{accessor}{access}{}({args})", self.names.to_map)
            }
        }
    }

    pub fn deserialize_value(
        &self,
        source: &str,
        sig: &TypeSig,
        depth: usize,
        position: Position,
    ) -> String {
        let q = if sig.nullable { "?" } else { "" };
        match &sig.ty {
            Ty::Scalar { name } => {
                let cast = match position {
                    Position::Field => self.options.no_implicit_casts,
                    Position::Element => true,
                };
                if cast && *name != Scalar::Dynamic {
                    format!("{source} as {sig}")
                } else {
                    source.to_string()
                }
            }
            Ty::List { element } => {
                let e = param("e", depth);
                let inner = self.deserialize_value(&e, element, depth + 1, Position::Element);
                format!("({source} as {DECODED_LIST}{q}){q}.map(({e}) => {inner}).toList()")
            }
            Ty::Map { value, .. } => {
                let (k, v) = (param("key", depth), param("value", depth));
                let inner = self.deserialize_value(&v, value, depth + 1, Position::Element);
                format!("({source} as {DECODED_MAP}{q}){q}.map(({k}, {v}) => MapEntry({k}, {inner}))")
            }
            Ty::Object { name } => {
                let extra = self
                    .forwarded_key_mapper()
                    .map(|arg| format!(", {arg}"))
                    .unwrap_or_default();
                let call = format!("{name}.{}({source} as {DECODED_MAP}{extra})", self.names.from_map);
                if sig.nullable {
                    format!("{source} == null ? null : {call}")
                } else {
                    call
                }
            }
        }
    }

    // Nested models receive the same mapper so their keys are renamed too.
    fn forwarded_key_mapper(&self) -> Option<String> {
        self.options
            .add_key_mapper
            .then(|| format!("{0}: {0}", self.names.key_mapper))
    }
}

fn param(base: &str, depth: usize) -> String {
    if depth == 0 { base.to_string() } else { format!("{base}{depth}") }
}

/// Single-quoted Dart string literal.
pub fn dart_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' | '\'' | '$' => { out.push('\\'); out.push(c); }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn config(add_key_mapper: bool, no_implicit_casts: bool) -> GeneratorConfig {
        GeneratorConfig::new(GenerationOptions {
            use_new_keyword: false,
            add_key_mapper,
            no_implicit_casts,
        })
    }

    fn field(name: &str, sig: &str) -> FieldDescriptor {
        FieldDescriptor::plain(name, sig).unwrap()
    }

    #[test]
    fn scalar_cast_follows_option() {
        let age = field("age", "int");
        let cfg = config(false, true);
        assert_eq!(Emitter::new(&cfg).deserialize_field(&age), "age: map['age'] as int,");
        let cfg = config(false, false);
        assert_eq!(Emitter::new(&cfg).deserialize_field(&age), "age: map['age'],");
    }

    #[test]
    fn nullable_scalar_cast_keeps_question_mark() {
        let cfg = config(false, true);
        let f = field("nick", "String?");
        assert_eq!(Emitter::new(&cfg).deserialize_field(&f), "nick: map['nick'] as String?,");
    }

    #[test]
    fn nullable_list_of_scalars() {
        let cfg = config(false, false);
        let tags = field("tags", "List<String>?");
        let em = Emitter::new(&cfg);
        assert_eq!(
            em.deserialize_field(&tags),
            "tags: (map['tags'] as List<dynamic>?)?.map((e) => e as String).toList(),"
        );
        assert_eq!(em.serialize_field(&tags), "'tags': tags?.map((e) => e).toList(),");
    }

    #[test]
    fn non_null_object_has_no_guard() {
        let cfg = config(false, false);
        let address = field("address", "Address");
        let em = Emitter::new(&cfg);
        assert_eq!(
            em.deserialize_field(&address),
            "address: Address.fromMap(map['address'] as Map<String, dynamic>),"
        );
        assert_eq!(em.serialize_field(&address), "'address': address.toMap(),");
    }

    #[test]
    fn nullable_object_is_guarded() {
        let cfg = config(false, false);
        let em = Emitter::new(&cfg);
        let address = field("address", "Address?");
        assert_eq!(
            em.deserialize_field(&address),
            "address: map['address'] == null ? null : Address.fromMap(map['address'] as Map<String, dynamic>),"
        );
        assert_eq!(em.serialize_field(&address), "'address': address?.toMap(),");
    }

    #[test]
    fn nullable_map_of_scalars() {
        let cfg = config(false, false);
        let meta = field("meta", "Map<String, int>?");
        let em = Emitter::new(&cfg);
        assert_eq!(em.serialize_field(&meta), "'meta': meta?.map((key, value) => MapEntry(key, value)),");
        assert_eq!(
            em.deserialize_field(&meta),
            "meta: (map['meta'] as Map<String, dynamic>?)?.map((key, value) => MapEntry(key, value as int)),"
        );
    }

    #[test]
    fn element_nullability_is_independent_of_field() {
        let cfg = config(false, false);
        let em = Emitter::new(&cfg);
        let f = field("items", "List<Item?>");
        assert_eq!(
            em.deserialize_field(&f),
            "items: (map['items'] as List<dynamic>).map((e) => e == null ? null : Item.fromMap(e as Map<String, dynamic>)).toList(),"
        );
        assert_eq!(em.serialize_field(&f), "'items': items.map((e) => e?.toMap()).toList(),");
    }

    #[test]
    fn deep_nesting_uses_depth_suffixed_params() {
        let cfg = config(false, false);
        let em = Emitter::new(&cfg);
        let f = field("grid", "List<List<Map<String, Model>>>");
        let de = em.deserialize_field(&f);
        assert_eq!(
            de,
            "grid: (map['grid'] as List<dynamic>).map((e) => (e as List<dynamic>).map((e1) => \
             (e1 as Map<String, dynamic>).map((key2, value2) => MapEntry(key2, \
             Model.fromMap(value2 as Map<String, dynamic>)))).toList()).toList(),"
        );
        assert_eq!(de.matches(".map(").count(), 3);
        assert_eq!(de.matches("Model.fromMap(").count(), 1);

        let ser = em.serialize_field(&f);
        assert_eq!(
            ser,
            "'grid': grid.map((e) => e.map((e1) => e1.map((key2, value2) => \
             MapEntry(key2, value2.toMap()))).toList()).toList(),"
        );
    }

    #[test]
    fn map_of_lists_recurses_into_value() {
        let cfg = config(false, false);
        let em = Emitter::new(&cfg);
        let f = field("groups", "Map<String, List<int>?>");
        assert_eq!(
            em.deserialize_field(&f),
            "groups: (map['groups'] as Map<String, dynamic>).map((key, value) => \
             MapEntry(key, (value as List<dynamic>?)?.map((e1) => e1 as int).toList())),"
        );
    }

    #[test]
    fn dynamic_is_never_cast() {
        let cfg = config(false, true);
        let em = Emitter::new(&cfg);
        assert_eq!(em.deserialize_field(&field("raw", "dynamic")), "raw: map['raw'],");
        assert_eq!(
            em.deserialize_field(&field("raw", "List<dynamic>")),
            "raw: (map['raw'] as List<dynamic>).map((e) => e).toList(),"
        );
    }

    #[test]
    fn key_mapper_wraps_every_key_and_is_forwarded() {
        let cfg = config(true, true);
        let em = Emitter::new(&cfg);
        let f = field("owner", "Person?");
        assert_eq!(
            em.deserialize_field(&f),
            "owner: map[keyMapper('owner')] == null ? null : \
             Person.fromMap(map[keyMapper('owner')] as Map<String, dynamic>, keyMapper: keyMapper),"
        );
        assert_eq!(em.serialize_field(&f), "keyMapper('owner'): owner?.toMap(keyMapper: keyMapper),");
    }

    #[test]
    fn private_field_uses_alias_and_storage_name() {
        let cfg = config(false, false);
        let em = Emitter::new(&cfg);
        let f = FieldDescriptor::new("_count", "count", "int").unwrap();
        assert_eq!(em.serialize_field(&f), "'count': _count,");
        assert_eq!(em.deserialize_field(&f), "count: map['count'],");
    }

    #[test]
    fn scalar_round_trip_is_identity_up_to_casts() {
        for no_implicit_casts in [false, true] {
            let cfg = config(false, no_implicit_casts);
            let em = Emitter::new(&cfg);
            for sig in ["int", "double", "num", "String?", "bool", "DateTime?"] {
                let f = field("v", sig);
                // serializing a scalar writes the value itself under its key
                assert_eq!(em.serialize_value("v", f.sig(), 0), "v");
                // reading it back yields the same slot, optionally cast
                let read = em.deserialize_value("map['v']", f.sig(), 0, Position::Field);
                let stripped = read.strip_suffix(&format!(" as {sig}")).unwrap_or(&read);
                assert_eq!(stripped, "map['v']");
                assert_eq!(read != stripped, no_implicit_casts);
            }
        }
    }

    #[test]
    fn key_literals_are_escaped() {
        assert_eq!(dart_string("it's"), r"'it\'s'");
        assert_eq!(dart_string("$price"), r"'\$price'");
    }
}
