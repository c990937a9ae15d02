//! Host driver: request documents → (map | apply | toString) members
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::debug;

use dart_data_gen::{GenerationRequest, GeneratorConfig, Template, TemplateKind};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate toMap/fromMap, apply and toString members for Dart model classes
#[derive(Parser, Debug)]
#[command(name = "dart-data-gen", version)]
pub struct CommandLineInterface {
    /// debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate members from one or more request documents
    Generate(GenerateOut),
    /// print the parsed shape of type signatures (debug view)
    Classify(ClassifyOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more request documents. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone, Copy)]
struct OptionFlags {
    /// `return new T(...)` in fromMap
    #[arg(long)]
    use_new_keyword: bool,

    /// thread an optional keyMapper through toMap/fromMap
    #[arg(long)]
    add_key_mapper: bool,

    /// cast every scalar read in fromMap explicitly
    #[arg(long)]
    no_implicit_casts: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum TemplateArg {
    Map,
    Apply,
    ToString,
    All,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// templates to emit (repeatable)
    #[arg(long = "template", short = 't', value_enum, default_values_t = [TemplateArg::All])]
    templates: Vec<TemplateArg>,

    #[command(flatten)]
    options: OptionFlags,

    /// JSON generator config (options + member names); flags are applied on top
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ClassifyOut {
    /// type signatures, e.g. 'List<Map<String, Model?>>?'
    #[arg(required = true)]
    signatures: Vec<String>,
}

/// A document holds one request or a list of them.
enum RequestDocument {
    One(GenerationRequest),
    Many(Vec<GenerationRequest>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderedClass<'a> {
    class_name: &'a str,
    templates: Vec<RenderedTemplate<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderedTemplate<'a> {
    kind: TemplateKind,
    members: Vec<&'a str>,
    delete: &'a [String],
    code: String,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl<'de> Deserialize<'de> for RequestDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = RequestDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a generation request or an array of them")
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> std::result::Result<RequestDocument, A::Error> {
                GenerationRequest::deserialize(MapAccessDeserializer::new(map)).map(RequestDocument::One)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> std::result::Result<RequestDocument, A::Error> {
                Vec::<GenerationRequest>::deserialize(SeqAccessDeserializer::new(seq)).map(RequestDocument::Many)
            }
        }

        deserializer.deserialize_any(DocumentVisitor)
    }
}

impl InputSettings {
    fn load_requests(&self) -> Result<Vec<GenerationRequest>> {
        let mut requests = Vec::new();
        for input in &self.input {
            if input == "-" {
                let mut source = String::new();
                std::io::stdin()
                    .read_to_string(&mut source)
                    .context("Failed to read stdin")?;
                requests.extend(parse_document(&source, "<stdin>")?);
                continue;
            }
            for source_path in resolve_file_path_patterns([input])? {
                let source_path_str = source_path.to_string_lossy().to_string();
                let source = std::fs::read_to_string(&source_path)
                    .with_context(|| format!("Failed to read source file ({source_path_str})"))?;
                requests.extend(parse_document(&source, &source_path_str)?);
            }
        }
        Ok(requests)
    }
}

impl OptionFlags {
    fn apply_to(self, config: &mut GeneratorConfig) {
        let options = &mut config.options;
        options.use_new_keyword |= self.use_new_keyword;
        options.add_key_mapper |= self.add_key_mapper;
        options.no_implicit_casts |= self.no_implicit_casts;
    }
}

impl GenerateOut {
    fn kinds(&self) -> Vec<TemplateKind> {
        let mut kinds = Vec::new();
        for t in &self.templates {
            match t {
                TemplateArg::Map => kinds.push(TemplateKind::MapTemplate),
                TemplateArg::Apply => kinds.push(TemplateKind::ApplyMethod),
                TemplateArg::ToString => kinds.push(TemplateKind::ToString),
                TemplateArg::All => kinds.extend(TemplateKind::ALL),
            }
        }
        kinds
    }

    fn config(&self) -> Result<GeneratorConfig> {
        let mut config = match self.config.as_ref() {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        self.options.apply_to(&mut config);
        Ok(config)
    }

    fn run(&self) -> Result<()> {
        let config = self.config()?;
        let kinds = self.kinds();
        let requests = self.input_settings.load_requests()?;
        debug!(requests = requests.len(), ?kinds, "loaded requests");

        let mut generated = Vec::with_capacity(requests.len());
        for request in &requests {
            let templates = dart_data_gen::generate(request, &config, &kinds)
                .with_context(|| format!("Failed to generate members for `{}`", request.class_name))?;
            for template in &templates {
                if !template.delete.is_empty() {
                    eprintln!(
                        "{} {}: replaces existing {}",
                        "note:".yellow().bold(),
                        request.class_name,
                        template.delete.join(", "),
                    );
                }
            }
            generated.push((request.class_name.as_str(), templates));
        }

        let output = match self.format {
            Format::Text => render_text(&generated),
            Format::Json => render_json(&generated)?,
        };

        if let Some(out) = self.out.as_ref() {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, &output)
                .with_context(|| format!("Failed to write {}", out.display()))?;
        } else {
            println!("{output}");
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn verbose(&self) -> bool {
        self.verbose
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                target.run()
            }
            Command::Classify(target) => {
                let shapes: Vec<_> = target
                    .signatures
                    .iter()
                    .map(|s| dart_data_gen::parse(s))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&shapes)?);
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn parse_document(source: &str, origin: &str) -> Result<Vec<GenerationRequest>> {
    let document = dart_data_gen::path_de::from_str_with_path::<RequestDocument>(source, origin)
        .context("Failed to parse request document")?;
    Ok(match document {
        RequestDocument::One(request) => vec![request],
        RequestDocument::Many(requests) => requests,
    })
}

fn render_text(generated: &[(&str, Vec<Template>)]) -> String {
    generated
        .iter()
        .flat_map(|(_, templates)| templates.iter().map(Template::render))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_json(generated: &[(&str, Vec<Template>)]) -> Result<String> {
    let classes: Vec<RenderedClass<'_>> = generated
        .iter()
        .map(|(class_name, templates)| RenderedClass {
            class_name,
            templates: templates
                .iter()
                .map(|t| RenderedTemplate {
                    kind: t.kind,
                    members: t.member_names().collect(),
                    delete: &t.delete,
                    code: t.render(),
                })
                .collect(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&classes)?)
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
