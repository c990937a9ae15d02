use super::{Block, Member, Template, TemplateKind};
use crate::field::FieldDescriptor;
use crate::ir::{Scalar, Ty};
use crate::options::GeneratorConfig;

pub fn assemble(class_name: &str, fields: &[FieldDescriptor], config: &GeneratorConfig) -> Template {
    Template::new(TemplateKind::ApplyMethod, vec![apply(class_name, fields, config)])
}

/// Partial update: every argument is optional, non-null arguments overwrite.
pub fn apply(class_name: &str, fields: &[FieldDescriptor], config: &GeneratorConfig) -> Member {
    let name = &config.names.apply;
    let mut b = Block::default();

    if fields.is_empty() {
        b.open(format!("{class_name} {name}() {{"));
    } else {
        b.open(format!("{class_name} {name}({{"));
        for field in fields {
            b.line(format!("{} {},", parameter_type(field), field.public_alias_name()));
        }
        b.reopen("}) {");
        for field in fields {
            let alias = field.public_alias_name();
            b.line(format!("if ({alias} != null) this.{} = {alias};", field.variable_name()));
        }
    }
    b.line("return this;");
    b.close("}");

    Member { name: name.clone(), lines: b.finish() }
}

// `int` → `int?`, `List<String>?` stays; `dynamic` already admits null.
fn parameter_type(field: &FieldDescriptor) -> String {
    match field.sig().ty {
        Ty::Scalar { name: Scalar::Dynamic } => Scalar::Dynamic.as_str().to_string(),
        _ => field.sig().to_nullable().to_string(),
    }
}
