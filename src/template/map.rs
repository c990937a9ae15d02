use super::{Block, Member, Template, TemplateKind};
use crate::emit::Emitter;
use crate::field::FieldDescriptor;
use crate::options::GeneratorConfig;

/// `toMap` and `fromMap` always travel together.
pub fn assemble(class_name: &str, fields: &[FieldDescriptor], config: &GeneratorConfig) -> Template {
    Template::new(
        TemplateKind::MapTemplate,
        vec![to_map(fields, config), from_map(class_name, fields, config)],
    )
}

pub fn to_map(fields: &[FieldDescriptor], config: &GeneratorConfig) -> Member {
    let names = &config.names;
    let emitter = Emitter::new(config);
    let mut b = Block::default();

    if config.options.add_key_mapper {
        b.open(format!("Map<String, dynamic> {}({{", names.to_map));
        b.line(key_mapper_param(config));
        b.reopen("}) {");
        b.line(key_mapper_default(config)).blank();
    } else {
        b.open(format!("Map<String, dynamic> {}() {{", names.to_map));
    }

    if fields.is_empty() {
        b.line("return {};");
    } else {
        b.open("return {");
        for field in fields {
            b.line(emitter.serialize_field(field));
        }
        b.close("};");
    }
    b.close("}");

    Member { name: names.to_map.clone(), lines: b.finish() }
}

pub fn from_map(class_name: &str, fields: &[FieldDescriptor], config: &GeneratorConfig) -> Member {
    let names = &config.names;
    let emitter = Emitter::new(config);
    let mut b = Block::default();

    if config.options.add_key_mapper {
        b.open(format!("factory {class_name}.{}(", names.from_map));
        b.line(format!("Map<String, dynamic> {}, {{", names.map_variable));
        b.line(key_mapper_param(config));
        b.reopen("}) {");
        b.line(key_mapper_default(config)).blank();
    } else {
        b.open(format!(
            "factory {class_name}.{}(Map<String, dynamic> {}) {{",
            names.from_map, names.map_variable
        ));
    }

    let constructor = if config.options.use_new_keyword {
        format!("new {class_name}")
    } else {
        class_name.to_string()
    };
    if fields.is_empty() {
        b.line(format!("return {constructor}();"));
    } else {
        b.open(format!("return {constructor}("));
        for field in fields {
            b.line(emitter.deserialize_field(field));
        }
        b.close(");");
    }
    b.close("}");

    Member { name: names.from_map.clone(), lines: b.finish() }
}

fn key_mapper_param(config: &GeneratorConfig) -> String {
    let names = &config.names;
    format!("String Function(String {})? {},", names.key_variable, names.key_mapper)
}

fn key_mapper_default(config: &GeneratorConfig) -> String {
    let names = &config.names;
    format!("{0} ??= ({1}) => {1};", names.key_mapper, names.key_variable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GenerationOptions;

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::plain("age", "int").unwrap(),
            FieldDescriptor::plain("tags", "List<String>?").unwrap(),
        ]
    }

    #[test]
    fn to_map_without_key_mapper() {
        let cfg = GeneratorConfig::default();
        assert_eq!(
            to_map(&fields(), &cfg).render(),
            "Map<String, dynamic> toMap() {\n  return {\n    'age': age,\n    'tags': tags?.map((e) => e).toList(),\n  };\n}"
        );
    }

    #[test]
    fn from_map_with_key_mapper_and_casts() {
        let cfg = GeneratorConfig::new(GenerationOptions {
            use_new_keyword: false,
            add_key_mapper: true,
            no_implicit_casts: true,
        });
        let expected = "\
factory User.fromMap(
  Map<String, dynamic> map, {
  String Function(String key)? keyMapper,
}) {
  keyMapper ??= (key) => key;

  return User(
    age: map[keyMapper('age')] as int,
    tags: (map[keyMapper('tags')] as List<dynamic>?)?.map((e) => e as String).toList(),
  );
}";
        assert_eq!(from_map("User", &fields(), &cfg).render(), expected);
    }

    #[test]
    fn to_map_with_key_mapper() {
        let cfg = GeneratorConfig::new(GenerationOptions { add_key_mapper: true, ..Default::default() });
        let expected = "\
Map<String, dynamic> toMap({
  String Function(String key)? keyMapper,
}) {
  keyMapper ??= (key) => key;

  return {
    keyMapper('age'): age,
  };
}";
        let one = [FieldDescriptor::plain("age", "int").unwrap()];
        assert_eq!(to_map(&one, &cfg).render(), expected);
    }

    #[test]
    fn empty_selection_yields_empty_bodies() {
        let cfg = GeneratorConfig::default();
        let t = assemble("Empty", &[], &cfg);
        assert_eq!(
            t.render(),
            "Map<String, dynamic> toMap() {\n  return {};\n}\n\nfactory Empty.fromMap(Map<String, dynamic> map) {\n  return Empty();\n}"
        );

        let cfg = GeneratorConfig::new(GenerationOptions { use_new_keyword: true, ..Default::default() });
        assert!(from_map("Empty", &[], &cfg).render().contains("return new Empty();"));
    }

    #[test]
    fn renamed_members_flow_into_signatures() {
        let mut cfg = GeneratorConfig::default();
        cfg.names.to_map = "toJson".into();
        cfg.names.from_map = "fromJson".into();
        cfg.names.map_variable = "json".into();
        let f = [FieldDescriptor::plain("home", "Address").unwrap()];
        let t = assemble("User", &f, &cfg);
        assert_eq!(t.member_names().collect::<Vec<_>>(), ["toJson", "fromJson"]);
        let src = t.render();
        assert!(src.contains("'home': home.toJson(),"));
        assert!(src.contains("factory User.fromJson(Map<String, dynamic> json) {"));
        assert!(src.contains("home: Address.fromJson(json['home'] as Map<String, dynamic>),"));
    }
}
