//! # textlab-core: Pipeline de NLP para Inglês com Fachada de Inspeção
//!
//! Este crate implementa um pipeline didático de Processamento de Linguagem
//! Natural e as ferramentas para inspecionar o que ele produz, no estilo de
//! um tutorial de spaCy: tokens, classes gramaticais, lemas, sentenças, noun
//! chunks, árvore de dependências e entidades nomeadas.
//!
//! ## Arquitetura do Sistema
//!
//! O texto flui por uma sequência de estágios, cada um acrescentando
//! anotações aos tokens:
//!
//! 1.  **Tokenização** ([`tokenizer`]) e **sentenças** ([`sentencizer`]).
//! 2.  **POS tagging** ([`tagger`]): léxico ([`lexicon`]) + CRF ([`crf`]) decodificado com [`viterbi`].
//! 3.  **Lematização** ([`lemmatizer`]).
//! 4.  **Dependências** ([`parser`]): regras de ligação núcleo → dependente.
//! 5.  **Entidades** ([`ner`]): regras e gazetteers ([`rule_based`]) + CRF sobre tags BIO ([`entity`]).
//! 6.  **Saída**: um [`Document`] imutável ([`doc`]).
//!
//! Em volta do pipeline ficam a fachada de inspeção ([`inspect`]), o matcher
//! de padrões ([`matcher`]) e a visualização ([`render`]).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use textlab_core::inspect::list_entities;
//! use textlab_core::load;
//!
//! // 1. Carrega o modelo embutido
//! let nlp = load("en_core_lite").unwrap();
//!
//! // 2. Processa o texto
//! let doc = nlp.process("Tom met Sam.").unwrap();
//!
//! // 3. Lista as entidades com offsets de caractere
//! for ent in list_entities(&doc) {
//!     println!("{} {}..{} {}", ent.text, ent.start_char, ent.end_char, ent.label);
//! }
//! ```

pub mod corpus;
pub mod crf;
pub mod doc;
pub mod entity;
pub mod error;
pub mod features;
pub mod glossary;
pub mod inspect;
pub mod lemmatizer;
pub mod lexicon;
pub mod matcher;
pub mod model;
pub mod ner;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod rule_based;
pub mod sentencizer;
pub mod tagger;
pub mod tokenizer;
pub mod viterbi;

pub use doc::{Component, Document, EntIob, Entity, Span, Token};
pub use entity::EntityLabel;
pub use error::{Error, Result};
pub use glossary::explain;
pub use inspect::AttributeKind;
pub use matcher::{Matcher, MatchResult, OverlapPolicy, Pattern, RuleId, TokenSpec};
pub use model::{load, load_with, LoadOptions, ModelMeta, DEFAULT_MODEL};
pub use parser::DepLabel;
pub use pipeline::{EnglishPipeline, Pipeline, PipelineEvent};
pub use render::{render, RenderOptions, RenderTarget};
pub use tagger::{FineTag, Pos};
