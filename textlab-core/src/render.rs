//! # Visualização: árvore de dependências (SVG) e entidades (HTML)
//!
//! [`render`] valida o estilo e produz a marcação; quem chama decide se
//! grava num arquivo, devolve por HTTP ou imprime.
//!
//! - `"dep"`: SVG com as palavras, suas classes gramaticais e arcos rotulados
//!   com a relação de dependência. Os arcos são empilhados em níveis pelo
//!   comprimento, como no displaCy.
//! - `"ent"`: HTML com cada entidade dentro de um `<mark>` colorido e o
//!   rótulo ao lado.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::doc::{Document, Span};
use crate::entity::EntityLabel;
use crate::error::{Error, Result};

/// O que renderizar: o documento inteiro ou um trecho dele
#[derive(Debug, Clone, Copy)]
pub enum RenderTarget<'d> {
    Doc(&'d Document),
    Span(&'d Document, &'d Span),
}

impl<'d> RenderTarget<'d> {
    fn document(&self) -> &'d Document {
        match self {
            RenderTarget::Doc(doc) | RenderTarget::Span(doc, _) => doc,
        }
    }

    /// Faixa de tokens `[start, end)` coberta
    fn token_range(&self) -> (usize, usize) {
        match self {
            RenderTarget::Doc(doc) => (0, doc.len()),
            RenderTarget::Span(doc, span) => (span.start.min(doc.len()), span.end.min(doc.len())),
        }
    }
}

impl<'d> From<&'d Document> for RenderTarget<'d> {
    fn from(doc: &'d Document) -> Self {
        RenderTarget::Doc(doc)
    }
}

/// Opções de renderização.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Arcos retos e espaçamento menor
    pub compact: bool,
    /// Distância horizontal entre palavras (dep)
    pub distance: u32,
    pub font: String,
    /// Cor de fundo
    pub bg: String,
    /// Cor do texto e dos arcos (dep)
    pub color: String,
    /// Junta a pontuação à palavra anterior (dep)
    pub collapse_punct: bool,
    /// Cor por rótulo de entidade, sobrepondo a padrão (ent)
    pub colors: HashMap<String, String>,
    /// Só estes rótulos são destacados (ent); `None` destaca todos
    pub ents: Option<Vec<String>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            compact: false,
            distance: 175,
            font: "Arial".to_string(),
            bg: "#ffffff".to_string(),
            color: "#000000".to_string(),
            collapse_punct: true,
            colors: HashMap::new(),
            ents: None,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn with_distance(mut self, distance: u32) -> Self {
        self.distance = distance.clamp(1, MAX_DISTANCE);
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn with_background(mut self, bg: impl Into<String>) -> Self {
        self.bg = bg.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_collapse_punct(mut self, collapse: bool) -> Self {
        self.collapse_punct = collapse;
        self
    }

    /// Cor para um rótulo de entidade
    pub fn with_entity_color(mut self, label: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(label.into(), color.into());
        self
    }

    /// Restringe os rótulos destacados
    pub fn with_ents<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ents = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    fn entity_color(&self, label: EntityLabel) -> &str {
        self.colors
            .get(label.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| label.color())
    }
}

/// Renderiza o alvo no estilo pedido (`"dep"` ou `"ent"`).
pub fn render(target: RenderTarget<'_>, style: &str, options: &RenderOptions) -> Result<String> {
    match style {
        "dep" => Ok(render_dep(target, options)),
        "ent" => Ok(render_ent(target, options)),
        other => {
            warn!("estilo de visualização desconhecido: '{other}'");
            Err(Error::InvalidStyle(other.to_string()))
        }
    }
}

/// Uma palavra exibida: texto e classe gramatical
struct Word {
    text: String,
    tag: String,
}

/// Arco entre palavras exibidas; `start < end`
#[derive(Debug, Clone, PartialEq, Eq)]
struct DepArc {
    start: usize,
    end: usize,
    label: String,
    /// `true` quando a seta aponta para a esquerda (dependente antes da cabeça)
    points_left: bool,
}

const OFFSET_X: u32 = 50;
const WORD_SPACING: u32 = 45;
const ARROW_STROKE: u32 = 2;
/// Maior distância aceita entre palavras
const MAX_DISTANCE: u32 = 1000;

fn render_dep(target: RenderTarget<'_>, options: &RenderOptions) -> String {
    let doc = target.document();
    let tokens = doc.tokens();
    let (start, end) = target.token_range();

    // Token → palavra exibida; pontuação pode ser absorvida pela anterior
    let mut words: Vec<Word> = Vec::new();
    let mut word_of: Vec<Option<usize>> = vec![None; tokens.len()];
    for i in start..end {
        let token = &tokens[i];
        let absorb = options.collapse_punct && token.is_punct() && !words.is_empty();
        if absorb {
            if let Some(last) = words.last_mut() {
                if tokens[i - 1].whitespace {
                    last.text.push(' ');
                }
                last.text.push_str(&token.text);
            }
            continue;
        }
        word_of[i] = Some(words.len());
        words.push(Word {
            text: token.text.clone(),
            tag: token.pos.as_str().to_string(),
        });
    }

    let mut arcs: Vec<DepArc> = Vec::new();
    for i in start..end {
        let head = tokens[i].head;
        if head == i || head < start || head >= end {
            continue;
        }
        let (Some(dependent), Some(governor)) = (word_of[i], word_of[head]) else {
            continue;
        };
        arcs.push(DepArc {
            start: dependent.min(governor),
            end: dependent.max(governor),
            label: tokens[i].dep.as_str().to_string(),
            points_left: dependent < governor,
        });
    }

    let levels = arc_levels(&arcs);
    let highest = levels.iter().copied().max().unwrap_or(0).max(1);
    let distance = options.distance.clamp(1, MAX_DISTANCE);
    let distance = if options.compact { distance.min(150) } else { distance };
    let arrow_spacing = if options.compact { 10 } else { 20 };
    let arrow_width = if options.compact { 8 } else { 10 };
    let curve_divisor = if options.compact { 6 } else { 2 };

    let offset_y = (distance / curve_divisor)
        .saturating_mul(highest)
        .saturating_add(ARROW_STROKE);
    let x_of = |word: usize| OFFSET_X.saturating_add((word as u32).saturating_mul(distance));
    let width = x_of(words.len());
    let height = offset_y.saturating_add(3 * WORD_SPACING);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" class="textlab-dep" width="{width}" height="{height}" direction="ltr" style="max-width: none; height: {height}px; color: {color}; background: {bg}; font-family: {font}; direction: ltr">"#,
        color = escape_html(&options.color),
        bg = escape_html(&options.bg),
        font = escape_html(&options.font),
    );

    for (i, word) in words.iter().enumerate() {
        let x = x_of(i);
        let y = offset_y.saturating_add(WORD_SPACING);
        let _ = write!(
            svg,
            r#"<text class="textlab-token" fill="currentColor" text-anchor="middle" y="{y}"><tspan class="textlab-word" fill="currentColor" x="{x}">{text}</tspan><tspan class="textlab-tag" dy="2em" fill="currentColor" x="{x}">{tag}</tspan></text>"#,
            text = escape_html(&word.text),
            tag = escape_html(&word.tag),
        );
    }

    for (k, (arc, level)) in arcs.iter().zip(&levels).enumerate() {
        let lift = highest - level;
        let x_start = x_of(arc.start).saturating_add(arrow_spacing * lift / 4);
        let x_end = x_of(arc.end).saturating_sub(arrow_spacing * lift / 2);
        let y_curve = offset_y.saturating_sub(level.saturating_mul(distance / curve_divisor));
        let path = if options.compact {
            format!("M{x_start},{offset_y} {x_start},{y_curve} {x_end},{y_curve} {x_end},{offset_y}")
        } else {
            format!("M{x_start},{offset_y} C{x_start},{y_curve} {x_end},{y_curve} {x_end},{offset_y}")
        };
        let tip = if arc.points_left { x_start } else { x_end };
        let (left, right) = (tip.saturating_sub(arrow_width), tip.saturating_add(arrow_width));
        let head_y = offset_y.saturating_sub(arrow_width);
        let arrow_head = format!(
            "M{tip},{} L{left},{head_y} {right},{head_y}",
            offset_y.saturating_add(2)
        );
        let _ = write!(
            svg,
            r##"<g class="textlab-arrow"><path class="textlab-arc" id="arrow-{k}" stroke-width="{ARROW_STROKE}px" d="{path}" fill="none" stroke="currentColor"/><text dy="1.25em" style="font-size: 0.8em; letter-spacing: 1px"><textPath xlink:href="#arrow-{k}" class="textlab-label" startOffset="50%" side="left" fill="currentColor" text-anchor="middle">{label}</textPath></text><path class="textlab-arrowhead" d="{arrow_head}" fill="currentColor"/></g>"##,
            label = escape_html(&arc.label),
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Nível de cada arco: arcos mais longos ficam mais altos
fn arc_levels(arcs: &[DepArc]) -> Vec<u32> {
    let lengths: BTreeSet<usize> = arcs.iter().map(|a| a.end - a.start).collect();
    let rank: HashMap<usize, u32> = lengths
        .into_iter()
        .enumerate()
        .map(|(i, len)| (len, i as u32 + 1))
        .collect();
    arcs.iter()
        .map(|a| rank.get(&(a.end - a.start)).copied().unwrap_or(1))
        .collect()
}

fn render_ent(target: RenderTarget<'_>, options: &RenderOptions) -> String {
    let doc = target.document();
    let (start, end) = target.token_range();
    let text = doc.text();
    let (byte_start, byte_end) = match target {
        RenderTarget::Doc(_) => (0, text.len()),
        RenderTarget::Span(..) if start < end => {
            (doc.tokens()[start].start, doc.tokens()[end - 1].end)
        }
        RenderTarget::Span(..) => (0, 0),
    };

    let visible = |label: EntityLabel| {
        options
            .ents
            .as_ref()
            .map(|allowed| allowed.iter().any(|l| l.eq_ignore_ascii_case(label.as_str())))
            .unwrap_or(true)
    };

    let mut html = format!(
        r#"<div class="entities" style="line-height: 2.5; direction: ltr; font-family: {}; background: {}">"#,
        escape_html(&options.font),
        escape_html(&options.bg),
    );
    let mut cursor = byte_start;
    for ent in doc.ents() {
        if ent.start < start || ent.end > end || !visible(ent.label) {
            continue;
        }
        let ent_start = doc.tokens()[ent.start].start;
        let ent_end = doc.tokens()[ent.end - 1].end;
        html.push_str(&escape_text(&text[cursor..ent_start]));
        let _ = write!(
            html,
            r#"<mark class="entity" style="background: {color}; padding: 0.45em 0.6em; margin: 0 0.25em; line-height: 1; border-radius: 0.35em;">{body}<span style="font-size: 0.8em; font-weight: bold; line-height: 1; border-radius: 0.35em; vertical-align: middle; margin-left: 0.5rem">{label}</span></mark>"#,
            color = escape_html(options.entity_color(ent.label)),
            body = escape_text(&text[ent_start..ent_end]),
            label = ent.label,
        );
        cursor = ent_end;
    }
    html.push_str(&escape_text(&text[cursor..byte_end.max(cursor)]));
    html.push_str("</div>");
    html
}

/// Escapa texto para HTML/XML
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapa e converte quebras de linha em `<br>`
fn escape_text(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}
