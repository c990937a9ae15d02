use super::{Block, Member, Template, TemplateKind};
use crate::field::FieldDescriptor;
use crate::options::GeneratorConfig;

pub fn assemble(class_name: &str, fields: &[FieldDescriptor], config: &GeneratorConfig) -> Template {
    Template::new(TemplateKind::ToString, vec![to_string(class_name, fields, config)])
}

pub fn to_string(class_name: &str, fields: &[FieldDescriptor], config: &GeneratorConfig) -> Member {
    let name = &config.names.to_string;
    let body = fields
        .iter()
        .map(|f| format!("{}: {}", literal(f.variable_name()), interpolate(f.variable_name())))
        .collect::<Vec<_>>()
        .join(", ");
    let class_name = literal(class_name);

    let mut b = Block::default();
    b.line("@override");
    b.open(format!("String {name}() {{"));
    b.line(format!("return \"{class_name}{{{body}}}\";"));
    b.close("}");

    Member { name: name.clone(), lines: b.finish() }
}

// `$` is legal in identifiers but starts an interpolation inside the string.
fn literal(name: &str) -> String {
    name.replace('$', "\\$")
}

// The short `$name` form ends at the next `$`.
fn interpolate(name: &str) -> String {
    if name.contains('$') {
        format!("${{{name}}}")
    } else {
        format!("${name}")
    }
}
