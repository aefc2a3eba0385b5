//! # Pipeline: Orquestrador com Eventos Observáveis
//!
//! O [`Pipeline`] transforma um texto num [`Document`] imutável. O pipeline
//! embutido ([`EnglishPipeline`]) roda os estágios em ordem:
//!
//! 1. **Tokenização** ([`crate::tokenizer`]) e **segmentação de sentenças**
//!    ([`crate::sentencizer`]), sempre ativas;
//! 2. **Tagger** ([`crate::tagger`]): tag fina Penn Treebank + classe grossa UD;
//! 3. **Lematizador** ([`crate::lemmatizer`]);
//! 4. **Parser** ([`crate::parser`]): cabeças e rótulos de dependência;
//! 5. **NER** ([`crate::ner`]): regras + CRF/Viterbi sobre tags BIO.
//!
//! A variante de streaming envia um [`PipelineEvent`] por estágio através de
//! um canal `mpsc`, o que permite ao servidor WebSocket mostrar o progresso
//! em tempo real.

use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::doc::{Component, Document, EntIob, Entity, Span, Token};
use crate::error::{Error, Result};
use crate::lemmatizer::Lemmatizer;
use crate::lexicon::Lexicon;
use crate::model::{build_ner_model, build_rule_engine, build_tagger_model, ModelMeta};
use crate::ner::EntityRecognizer;
use crate::parser::{Attachment, DependencyParser};
use crate::sentencizer::sentence_starts;
use crate::tagger::{PosTagger, TaggedToken};
use crate::tokenizer::{tokenize, RawToken};

/// Um pipeline carregado. Somente leitura depois de criado, por isso pode ser
/// compartilhado entre threads via `Arc<dyn Pipeline>`.
pub trait Pipeline: Send + Sync {
    /// Metadados do modelo que originou o pipeline
    fn meta(&self) -> &ModelMeta;

    /// Processa um texto e devolve o documento anotado.
    fn process(&self, text: &str) -> Result<Document>;

    /// Processa o texto emitindo um evento por estágio; o último evento é
    /// sempre `Done` ou `Error`.
    fn process_streaming(&self, text: &str, tx: mpsc::Sender<PipelineEvent>) {
        let start = Instant::now();
        let event = match self.process(text) {
            Ok(document) => PipelineEvent::Done {
                document,
                processing_ms: start.elapsed().as_millis() as u64,
            },
            Err(err) => PipelineEvent::Error {
                message: err.to_string(),
            },
        };
        let _ = tx.send(event);
    }

    /// Lê um arquivo UTF-8 inteiro e o processa.
    fn process_file(&self, path: &Path) -> Result<Document> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            warn!("arquivo {} não é UTF-8 válido", path.display());
            Error::InvalidInput(format!("{} não é UTF-8 válido: {e}", path.display()))
        })?;
        self.process(&text)
    }

    /// Nomes dos componentes ativos, na ordem de execução
    fn pipe_names(&self) -> Vec<&'static str> {
        self.meta().pipeline.iter().map(|c| c.name()).collect()
    }
}

/// Eventos emitidos pelo pipeline durante o processamento.
///
/// Permitem que a interface visualize cada estágio assim que ele termina.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: tokens e fronteiras de sentença prontos.
    TokenizationDone {
        tokens: Vec<RawToken>,
        sentences: usize,
    },
    /// **Passo 2**: tags fina e grossa de cada token.
    TaggingDone {
        tags: Vec<TaggedToken>,
    },
    /// **Passo 3**: lemas, na ordem dos tokens.
    LemmatizationDone {
        lemmas: Vec<String>,
    },
    /// **Passo 4**: cabeça e rótulo de dependência de cada token.
    ParsingDone {
        arcs: Vec<Attachment>,
    },
    /// Uma regra do reconhecedor de entidades disparou.
    RuleApplied {
        start: usize,
        end: usize,
        text: String,
        label: String,
        rule_name: String,
        confidence: f64,
    },
    /// **Passo 5**: entidades decodificadas.
    EntitiesDone {
        entities: Vec<Entity>,
    },
    /// **Conclusão**: documento completo e tempo total.
    Done {
        document: Document,
        processing_ms: u64,
    },
    /// **Falha**: erro irrecuperável.
    Error {
        message: String,
    },
}

/// O pipeline de inglês embutido.
pub struct EnglishPipeline {
    meta: ModelMeta,
    lexicon: Arc<Lexicon>,
    tagger: PosTagger,
    lemmatizer: Lemmatizer,
    parser: DependencyParser,
    recognizer: EntityRecognizer,
}

impl EnglishPipeline {
    /// Monta todos os componentes; `meta.pipeline` decide quais rodam.
    pub fn new(meta: ModelMeta) -> Self {
        let lexicon = Arc::new(Lexicon::english());
        Self {
            tagger: PosTagger::new(lexicon.clone(), build_tagger_model()),
            lemmatizer: Lemmatizer::new(lexicon.clone()),
            parser: DependencyParser::new(),
            recognizer: EntityRecognizer::new(build_ner_model(), build_rule_engine()),
            lexicon,
            meta,
        }
    }

    fn enabled(&self, component: Component) -> bool {
        self.meta.pipeline.contains(&component)
    }

    /// Executa os estágios; com `tx`, emite um evento ao fim de cada um.
    fn run(&self, text: &str, tx: Option<&mpsc::Sender<PipelineEvent>>) -> Result<Document> {
        let emit = |event: &dyn Fn() -> PipelineEvent| {
            if let Some(tx) = tx {
                let _ = tx.send(event());
            }
        };

        // === Passo 1: Tokenização + sentenças ===
        let started = Instant::now();
        let raw = tokenize(text);
        let starts = sentence_starts(text, &raw);
        let mut tokens: Vec<Token> = raw
            .iter()
            .map(|r| {
                let mut token = Token::bare(&r.text, r.start, r.whitespace, r.index);
                token.is_sent_start = starts.get(r.index).copied().unwrap_or(r.index == 0);
                token.is_stop = self.lexicon.is_stop(&token.lower);
                token
            })
            .collect();
        let sentences = sentence_spans(&starts);
        debug!(
            "tokenização: {} tokens, {} sentenças em {:?}",
            tokens.len(),
            sentences.len(),
            started.elapsed()
        );
        emit(&|| PipelineEvent::TokenizationDone {
            tokens: raw.clone(),
            sentences: sentences.len(),
        });

        // === Passo 2: Tagger ===
        if self.enabled(Component::Tagger) {
            let started = Instant::now();
            let tags = self.tagger.tag(&raw, &starts);
            if tags.len() != tokens.len() {
                return Err(Error::UpstreamProcessing(format!(
                    "tagger devolveu {} tags para {} tokens",
                    tags.len(),
                    tokens.len()
                )));
            }
            for (token, tagged) in tokens.iter_mut().zip(&tags) {
                token.tag = tagged.tag;
                token.pos = tagged.pos;
            }
            debug!("tagger: {:?}", started.elapsed());
            emit(&|| PipelineEvent::TaggingDone { tags: tags.clone() });
        }

        // === Passo 3: Lematizador ===
        if self.enabled(Component::Lemmatizer) {
            let started = Instant::now();
            for token in &mut tokens {
                token.lemma = self.lemmatizer.lemmatize(&token.text, token.tag, token.pos);
            }
            debug!("lematizador: {:?}", started.elapsed());
            emit(&|| PipelineEvent::LemmatizationDone {
                lemmas: tokens.iter().map(|t| t.lemma.clone()).collect(),
            });
        }

        // === Passo 4: Parser ===
        if self.enabled(Component::Parser) {
            let started = Instant::now();
            let arcs = self.parser.parse(&tokens, &sentences);
            for (token, arc) in tokens.iter_mut().zip(&arcs) {
                token.head = arc.head;
                token.dep = arc.dep;
            }
            debug!("parser: {:?}", started.elapsed());
            emit(&|| PipelineEvent::ParsingDone { arcs: arcs.clone() });
        }

        // === Passo 5: Entidades ===
        let mut entities = Vec::new();
        if self.enabled(Component::Ner) {
            let started = Instant::now();
            for sent in &sentences {
                let result = self.recognizer.recognize_sentence(&tokens, sent);
                for m in &result.rule_matches {
                    emit(&|| PipelineEvent::RuleApplied {
                        start: m.start,
                        end: m.end,
                        text: span_text(text, &tokens, m.start, m.end).to_string(),
                        label: m.label.to_string(),
                        rule_name: m.rule_name.clone(),
                        confidence: m.confidence,
                    });
                }
                entities.extend(result.entities);
            }
            for token in &mut tokens {
                token.ent_iob = EntIob::Outside;
            }
            for ent in &entities {
                for (k, token) in tokens[ent.start..ent.end].iter_mut().enumerate() {
                    token.ent_iob = if k == 0 { EntIob::Begin } else { EntIob::Inside };
                    token.ent_type = Some(ent.label);
                }
            }
            debug!("ner: {} entidades em {:?}", entities.len(), started.elapsed());
            emit(&|| PipelineEvent::EntitiesDone {
                entities: entities.clone(),
            });
        }

        Document::from_parts(text, tokens, entities, self.meta.pipeline.clone())
            .map_err(|e| Error::UpstreamProcessing(e.to_string()))
    }
}

impl Pipeline for EnglishPipeline {
    fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    fn process(&self, text: &str) -> Result<Document> {
        self.run(text, None)
    }

    fn process_streaming(&self, text: &str, tx: mpsc::Sender<PipelineEvent>) {
        let start = Instant::now();
        let event = match self.run(text, Some(&tx)) {
            Ok(document) => PipelineEvent::Done {
                document,
                processing_ms: start.elapsed().as_millis() as u64,
            },
            Err(err) => {
                warn!("pipeline falhou: {err}");
                PipelineEvent::Error {
                    message: err.to_string(),
                }
            }
        };
        let _ = tx.send(event);
    }
}

/// Spans de sentença a partir das marcas de início
fn sentence_spans(starts: &[bool]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut begin = 0;
    for (i, &is_start) in starts.iter().enumerate().skip(1) {
        if is_start {
            spans.push(Span::new(begin, i));
            begin = i;
        }
    }
    if !starts.is_empty() {
        spans.push(Span::new(begin, starts.len()));
    }
    spans
}

fn span_text<'t>(text: &'t str, tokens: &[Token], start: usize, end: usize) -> &'t str {
    match (tokens.get(start), end.checked_sub(1).and_then(|e| tokens.get(e))) {
        (Some(first), Some(last)) if start < end => &text[first.start..last.end],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityLabel;
    use crate::model::{load, load_with, LoadOptions};
    use crate::parser::DepLabel;
    use crate::tagger::Pos;

    fn english() -> Box<dyn Pipeline> {
        load("en_core_lite").unwrap()
    }

    #[test]
    fn test_process_annotates_every_stage() {
        let doc = english().process("Tom met Sam.").unwrap();
        let texts: Vec<&str> = doc.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Tom", "met", "Sam", "."]);

        let t = doc.tokens();
        assert_eq!(t[0].pos, Pos::Propn);
        assert_eq!(t[1].lemma, "meet");
        assert_eq!(t[1].dep, DepLabel::Root);
        assert_eq!(t[0].head, 1);
        assert_eq!(t[0].ent_iob, EntIob::Begin);
        assert_eq!(t[1].ent_iob, EntIob::Outside);
        assert_eq!(
            doc.ents(),
            &[
                Entity { start: 0, end: 1, label: EntityLabel::Person },
                Entity { start: 2, end: 3, label: EntityLabel::Person },
            ]
        );
    }

    #[test]
    fn test_empty_text() {
        let doc = english().process("").unwrap();
        assert!(doc.is_empty());
        assert!(doc.sents().is_empty());
        assert!(doc.ents().is_empty());
    }

    #[test]
    fn test_disabled_components_leave_defaults() {
        let nlp = load_with("en", LoadOptions::default().disable(Component::Ner)).unwrap();
        let doc = nlp.process("Tom met Sam.").unwrap();
        assert!(doc.ents().is_empty());
        assert!(doc.tokens().iter().all(|t| t.ent_iob == EntIob::Missing));
        assert!(!doc.has_component(Component::Ner));

        let nlp = load_with("en", LoadOptions::default().disable(Component::Tagger)).unwrap();
        let doc = nlp.process("Tom met Sam.").unwrap();
        assert!(doc.tokens().iter().all(|t| t.pos == Pos::Unset && t.lemma.is_empty()));
        assert!(doc.tokens().iter().enumerate().all(|(i, t)| t.head == i));
    }

    #[test]
    fn test_streaming_emits_stages_then_done() {
        let (tx, rx) = mpsc::channel();
        english().process_streaming("Tom met Sam.", tx);
        let events: Vec<PipelineEvent> = rx.iter().collect();

        assert!(matches!(events.first(), Some(PipelineEvent::TokenizationDone { sentences: 1, .. })));
        assert!(events.iter().any(|e| matches!(e, PipelineEvent::TaggingDone { .. })));
        assert!(events.iter().any(|e| matches!(e, PipelineEvent::ParsingDone { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, PipelineEvent::RuleApplied { rule_name, .. } if rule_name == "first_name_gazetteer")));
        match events.last() {
            Some(PipelineEvent::Done { document, .. }) => assert_eq!(document.ents().len(), 2),
            other => panic!("último evento inesperado: {other:?}"),
        }
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = PipelineEvent::Error {
            message: "boom".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Error");
        assert_eq!(json["data"]["message"], "boom");
    }

    #[test]
    fn test_process_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "The dog barked.").unwrap();
        let doc = english().process_file(&path).unwrap();
        assert_eq!(doc.len(), 4);

        let bad = dir.path().join("latin1.txt");
        std::fs::write(&bad, [0x66, 0x6f, 0xff, 0xfe]).unwrap();
        assert!(matches!(english().process_file(&bad), Err(Error::InvalidInput(_))));

        let missing = dir.path().join("missing.txt");
        assert!(matches!(english().process_file(&missing), Err(Error::Io(_))));
    }

    #[test]
    fn test_sentence_spans() {
        assert_eq!(
            sentence_spans(&[true, false, true, false, false]),
            vec![Span::new(0, 2), Span::new(2, 5)]
        );
        assert!(sentence_spans(&[]).is_empty());
    }
}
