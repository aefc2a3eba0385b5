//! `textlab`: roteiro didático de linha de comando
//!
//! `tour` percorre o tutorial inteiro sobre um texto: tokens, classes
//! gramaticais, lemas, sentenças, noun chunks, dependências, matcher e
//! entidades. Os demais subcomandos expõem cada passo isoladamente.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use textlab_core::corpus::TOUR_TEXT;
use textlab_core::inspect::{
    count_by_attribute, list_dependencies, list_entities, list_lemmas, list_noun_chunks,
    list_sentences, list_tokens, token_table,
};
use textlab_core::matcher::{parse_patterns, parse_rules};
use textlab_core::{
    explain, load, render, AttributeKind, Document, Matcher, OverlapPolicy, Pipeline,
    RenderOptions, RenderTarget, DEFAULT_MODEL,
};

#[derive(Parser)]
#[command(name = "textlab")]
#[command(version)]
#[command(about = "Tour de NLP: tokens, POS, lemas, dependências, matcher e entidades", long_about = None)]
struct Cli {
    /// Modelo a carregar
    #[arg(short, long, global = true, env = "TEXTLAB_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    #[command(subcommand)]
    command: Commands,
}

/// Texto de entrada: argumento, arquivo ou o texto padrão do tour
#[derive(clap::Args)]
struct Input {
    /// Texto a analisar
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    text: Option<String>,

    /// Lê o texto de um arquivo UTF-8
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Percorre todos os passos do tutorial
    Tour {
        #[command(flatten)]
        input: Input,
    },

    /// Tabela de tokens e entidades
    Analyze {
        #[command(flatten)]
        input: Input,

        /// Saída em JSON
        #[arg(long)]
        json: bool,
    },

    /// Executa regras de um arquivo JSON
    Match {
        #[command(flatten)]
        input: Input,

        /// Arquivo de regras: `[{"name": ..., "patterns": [[...]]}]` ou `{"NOME": [[...]]}`
        #[arg(short, long, value_name = "FILE")]
        patterns: PathBuf,

        /// Resolução de sobreposições
        #[arg(long, value_enum, default_value = "longest")]
        policy: Policy,
    },

    /// Gera SVG (dep) ou HTML (ent)
    Render {
        #[command(flatten)]
        input: Input,

        /// Estilo de visualização: "dep" ou "ent"
        #[arg(short, long, default_value = "dep")]
        style: String,

        /// Arquivo de saída (stdout se omitido)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Arcos retos e espaçamento menor
        #[arg(long)]
        compact: bool,
    },

    /// Explica um rótulo (POS, tag, dependência ou entidade)
    Explain {
        label: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    Longest,
    All,
}

impl From<Policy> for OverlapPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Longest => OverlapPolicy::LeftmostLongest,
            Policy::All => OverlapPolicy::All,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let load_model = || {
        load(&cli.model).with_context(|| format!("carregando o modelo '{}'", cli.model))
    };

    match cli.command {
        Commands::Explain { label } => explain_label(&label, &mut out),
        Commands::Tour { input } => {
            let nlp = load_model()?;
            let doc = process_input(nlp.as_ref(), &input)?;
            tour(nlp.as_ref(), &doc, &mut out)
        }
        Commands::Analyze { input, json } => {
            let nlp = load_model()?;
            let doc = process_input(nlp.as_ref(), &input)?;
            analyze(&doc, json, &mut out)
        }
        Commands::Match {
            input,
            patterns,
            policy,
        } => {
            let rules = fs::read_to_string(&patterns)
                .with_context(|| format!("lendo regras de {}", patterns.display()))?;
            let matcher = build_matcher(&rules, policy.into())?;
            let nlp = load_model()?;
            let doc = process_input(nlp.as_ref(), &input)?;
            print_matches(&matcher, &doc, &mut out)
        }
        Commands::Render {
            input,
            style,
            out: path,
            compact,
        } => {
            let nlp = load_model()?;
            let doc = process_input(nlp.as_ref(), &input)?;
            let options = RenderOptions::default().with_compact(compact);
            let markup = render(RenderTarget::Doc(&doc), &style, &options)?;
            match path {
                Some(path) => {
                    fs::write(&path, &markup)
                        .with_context(|| format!("gravando {}", path.display()))?;
                    info!("{} gravado ({} bytes)", path.display(), markup.len());
                    Ok(())
                }
                None => writeln!(out, "{markup}").map_err(Into::into),
            }
        }
    }
}

fn process_input(nlp: &dyn Pipeline, input: &Input) -> Result<Document> {
    match (&input.text, &input.file) {
        (Some(text), _) => Ok(nlp.process(text)?),
        (None, Some(path)) => read_document(nlp, path),
        (None, None) => Ok(nlp.process(TOUR_TEXT)?),
    }
}

fn read_document(nlp: &dyn Pipeline, path: &Path) -> Result<Document> {
    nlp.process_file(path)
        .with_context(|| format!("processando {}", path.display()))
}

fn explain_label(label: &str, out: &mut impl Write) -> Result<()> {
    match explain(label) {
        Some(description) => {
            writeln!(out, "{label}: {description}")?;
            Ok(())
        }
        None => bail!("rótulo desconhecido: '{label}'"),
    }
}

fn build_matcher(rules_json: &str, policy: OverlapPolicy) -> Result<Matcher> {
    let mut matcher = Matcher::with_policy(policy);
    for (name, patterns) in parse_rules(rules_json)? {
        matcher.define_rule(&name, patterns)?;
    }
    Ok(matcher)
}

fn print_matches(matcher: &Matcher, doc: &Document, out: &mut impl Write) -> Result<()> {
    for m in matcher.run(doc) {
        let label = matcher.resolve_rule_label(m.rule).unwrap_or_default();
        writeln!(out, "{:<12} {:>3}..{:<3} {}", label, m.start, m.end, m.text(doc))?;
    }
    Ok(())
}

fn analyze(doc: &Document, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "tokens": token_table(doc),
            "entities": list_entities(doc),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<14} {:<14} {:<6} {:<5} {:<10} {:<8} {:<5} {}",
        "TEXT", "LEMMA", "POS", "TAG", "DEP", "SHAPE", "ALPHA", "STOP"
    )?;
    for row in token_table(doc) {
        writeln!(
            out,
            "{:<14} {:<14} {:<6} {:<5} {:<10} {:<8} {:<5} {}",
            row.text, row.lemma, row.pos, row.tag, row.dep, row.shape, row.is_alpha, row.is_stop
        )?;
    }
    writeln!(out)?;
    for ent in list_entities(doc) {
        writeln!(out, "{} [{}..{}] {}", ent.text, ent.start_char, ent.end_char, ent.label)?;
    }
    Ok(())
}

/// Regras de exemplo do passo de matching
const TOUR_RULES: &[(&str, &str)] = &[
    (
        "ADJ_NOUN",
        r#"[{"POS": "ADJ", "OP": "?"}, {"POS": "ADJ"}, {"POS": "NOUN"}]"#,
    ),
    ("ANIMAL", r#"[{"LOWER": {"IN": ["fox", "dog", "cat"]}}]"#),
    ("LONG_WORD", r#"[{"IS_ALPHA": true, "LENGTH": {">=": 7}}]"#),
];

fn section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "== {title} ==")
}

fn tour(nlp: &dyn Pipeline, doc: &Document, out: &mut impl Write) -> Result<()> {
    let meta = nlp.meta();
    writeln!(out, "Modelo: {} {} ({})", meta.name, meta.version, meta.lang)?;
    writeln!(out, "Componentes: {}", nlp.pipe_names().join(", "))?;
    writeln!(out, "Texto: {}", doc.text())?;

    section(out, "1. Tokens")?;
    for row in list_tokens(doc) {
        writeln!(out, "{:<14} {:<6} {}", row.text, row.pos, row.tag)?;
    }

    section(out, "2. Contagem por classe gramatical")?;
    let mut counts: Vec<(String, usize)> = count_by_attribute(doc, AttributeKind::Pos)
        .into_iter()
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (pos, count) in counts {
        writeln!(out, "{pos:<6} {count:>3}  {}", explain(&pos).unwrap_or(""))?;
    }

    section(out, "3. Lemas")?;
    for row in list_lemmas(doc).filter(|r| r.text != r.lemma) {
        writeln!(out, "{} → {}", row.text, row.lemma)?;
    }

    section(out, "4. Sentenças")?;
    for (i, sent) in list_sentences(doc).iter().enumerate() {
        writeln!(out, "[{i}] {}", sent.text(doc))?;
    }

    section(out, "5. Noun chunks")?;
    match list_noun_chunks(doc) {
        Ok(chunks) => {
            for chunk in chunks {
                writeln!(
                    out,
                    "{:<24} {:<10} {:<8} {}",
                    chunk.text, chunk.root_text, chunk.root_dep, chunk.root_head_text
                )?;
            }
        }
        Err(err) => writeln!(out, "(indisponível: {err})")?,
    }

    section(out, "6. Dependências")?;
    for row in list_dependencies(doc) {
        writeln!(
            out,
            "{:<14} {:<10} {:<14} {:<6} [{}]",
            row.text,
            row.dep,
            row.head_text,
            row.head_pos,
            row.children.join(", ")
        )?;
    }

    section(out, "7. Matcher")?;
    let mut matcher = Matcher::new();
    for (name, json) in TOUR_RULES {
        matcher.define_rule(name, parse_patterns(json)?)?;
    }
    print_matches(&matcher, doc, out)?;

    section(out, "8. Entidades")?;
    for ent in list_entities(doc) {
        writeln!(
            out,
            "{:<16} {:>4} {:>4} {:<10} {}",
            ent.text,
            ent.start_char,
            ent.end_char,
            ent.label,
            explain(&ent.label).unwrap_or("")
        )?;
    }

    section(out, "9. Visualização")?;
    let options = RenderOptions::default();
    for style in ["dep", "ent"] {
        let markup = render(RenderTarget::Doc(doc), style, &options)?;
        writeln!(out, "{style}: {} bytes (use `textlab render --style {style}`)", markup.len())?;
    }
    Ok(())
}
