//! # Fachada de Inspeção
//!
//! Projeções somente leitura de um [`Document`]: as tabelas que um tutorial
//! de NLP imprime passo a passo (tokens, lemas, sentenças, noun chunks,
//! entidades, árvore de dependências).
//!
//! Nenhuma função altera o documento e todas são idempotentes: chamar duas
//! vezes devolve o mesmo resultado. As funções que devolvem iteradores são
//! preguiçosas; para percorrer de novo, basta chamar outra vez.
//!
//! ```rust
//! use textlab_core::inspect::{count_by_attribute, list_tokens, AttributeKind};
//! use textlab_core::load;
//!
//! let nlp = load("en_core_lite").unwrap();
//! let doc = nlp.process("The quick brown fox jumps over the lazy dog.").unwrap();
//!
//! let total: usize = count_by_attribute(&doc, AttributeKind::Pos).values().sum();
//! assert_eq!(total, list_tokens(&doc).count());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::doc::{Document, Span, Token};
use crate::error::{Error, Result};

pub use crate::glossary::explain;

/// Linha da tabela de tokens: texto, classe grossa e tag fina
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRow {
    pub text: String,
    pub pos: String,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaRow {
    pub text: String,
    pub lemma: String,
}

/// Noun chunk com o núcleo e a relação do núcleo com a cabeça
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounChunkRow {
    pub text: String,
    pub root_text: String,
    pub root_dep: String,
    pub root_head_text: String,
}

/// Entidade com offsets em **caracteres** (não bytes) do texto original
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRow {
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRow {
    pub text: String,
    pub dep: String,
    pub head_text: String,
    pub head_pos: String,
    pub children: Vec<String>,
}

/// Linha da tabela completa de atributos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTableRow {
    pub text: String,
    pub lemma: String,
    pub pos: String,
    pub tag: String,
    pub dep: String,
    pub shape: String,
    pub is_alpha: bool,
    pub is_stop: bool,
}

/// Atributo de token usado como chave de contagem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Pos,
    Tag,
    Dep,
    Lemma,
    Lower,
    Shape,
    EntType,
    IsStop,
    IsPunct,
    IsAlpha,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 10] = [
        AttributeKind::Pos,
        AttributeKind::Tag,
        AttributeKind::Dep,
        AttributeKind::Lemma,
        AttributeKind::Lower,
        AttributeKind::Shape,
        AttributeKind::EntType,
        AttributeKind::IsStop,
        AttributeKind::IsPunct,
        AttributeKind::IsAlpha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Pos => "pos",
            AttributeKind::Tag => "tag",
            AttributeKind::Dep => "dep",
            AttributeKind::Lemma => "lemma",
            AttributeKind::Lower => "lower",
            AttributeKind::Shape => "shape",
            AttributeKind::EntType => "ent_type",
            AttributeKind::IsStop => "is_stop",
            AttributeKind::IsPunct => "is_punct",
            AttributeKind::IsAlpha => "is_alpha",
        }
    }

    /// Valor do atributo para um token, como string
    pub fn value_of(&self, token: &Token) -> String {
        match self {
            AttributeKind::Pos => token.pos.as_str().to_string(),
            AttributeKind::Tag => token.tag.as_str().to_string(),
            AttributeKind::Dep => token.dep.as_str().to_string(),
            AttributeKind::Lemma => token.lemma.clone(),
            AttributeKind::Lower => token.lower.clone(),
            AttributeKind::Shape => token.shape.clone(),
            AttributeKind::EntType => token
                .ent_type
                .map(|l| l.as_str().to_string())
                .unwrap_or_default(),
            AttributeKind::IsStop => token.is_stop.to_string(),
            AttributeKind::IsPunct => token.is_punct().to_string(),
            AttributeKind::IsAlpha => token.is_alpha().to_string(),
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aceita o nome em minúsculas ou maiúsculas ("pos", "ENT_TYPE")
impl FromStr for AttributeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| Error::InvalidInput(format!("atributo desconhecido: '{s}'")))
    }
}

/// `(texto, pos, tag)` de cada token, em ordem.
pub fn list_tokens(doc: &Document) -> impl Iterator<Item = TokenRow> + '_ {
    doc.tokens().iter().map(|t| TokenRow {
        text: t.text.clone(),
        pos: t.pos.as_str().to_string(),
        tag: t.tag.as_str().to_string(),
    })
}

/// Frequência de cada valor do atributo; a soma é o número de tokens.
pub fn count_by_attribute(doc: &Document, kind: AttributeKind) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in doc.tokens() {
        *counts.entry(kind.value_of(token)).or_insert(0) += 1;
    }
    counts
}

/// `(texto, lema)` de cada token, em ordem.
pub fn list_lemmas(doc: &Document) -> impl Iterator<Item = LemmaRow> + '_ {
    doc.tokens().iter().map(|t| LemmaRow {
        text: t.text.clone(),
        lemma: t.lemma.clone(),
    })
}

/// Sentenças em ordem; juntas particionam os tokens.
pub fn list_sentences(doc: &Document) -> Vec<Span> {
    doc.sents()
}

/// Noun chunks com núcleo, relação e cabeça do núcleo.
///
/// Falha com [`Error::InvalidInput`] se o documento não passou pelo parser.
pub fn list_noun_chunks(doc: &Document) -> Result<Vec<NounChunkRow>> {
    let tokens = doc.tokens();
    Ok(doc
        .noun_chunks()?
        .iter()
        .map(|chunk| {
            let root = &tokens[chunk.root(doc)];
            NounChunkRow {
                text: chunk.text(doc).to_string(),
                root_text: root.text.clone(),
                root_dep: root.dep.as_str().to_string(),
                root_head_text: tokens[root.head].text.clone(),
            }
        })
        .collect())
}

/// Entidades em ordem de início, com offsets de caractere.
pub fn list_entities(doc: &Document) -> Vec<EntityRow> {
    doc.ents()
        .iter()
        .map(|ent| {
            let span = ent.as_span();
            EntityRow {
                text: span.text(doc).to_string(),
                start_char: span.start_char(doc),
                end_char: span.end_char(doc),
                label: ent.label.as_str().to_string(),
            }
        })
        .collect()
}

/// Uma linha por token: relação, cabeça e filhos.
pub fn list_dependencies(doc: &Document) -> Vec<DependencyRow> {
    let tokens = doc.tokens();
    tokens
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let head = &tokens[t.head];
            DependencyRow {
                text: t.text.clone(),
                dep: t.dep.as_str().to_string(),
                head_text: head.text.clone(),
                head_pos: head.pos.as_str().to_string(),
                children: doc.children(i).map(|c| tokens[c].text.clone()).collect(),
            }
        })
        .collect()
}

pub fn token_table(doc: &Document) -> Vec<TokenTableRow> {
    doc.tokens()
        .iter()
        .map(|t| TokenTableRow {
            text: t.text.clone(),
            lemma: t.lemma.clone(),
            pos: t.pos.as_str().to_string(),
            tag: t.tag.as_str().to_string(),
            dep: t.dep.as_str().to_string(),
            shape: t.shape.clone(),
            is_alpha: t.is_alpha(),
            is_stop: t.is_stop,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Component;
    use crate::model::{load, load_with, LoadOptions};

    fn process(text: &str) -> Document {
        load("en_core_lite").unwrap().process(text).unwrap()
    }

    #[test]
    fn test_list_tokens() {
        let doc = process("a red big dog barked");
        let rows: Vec<TokenRow> = list_tokens(&doc).collect();
        let pos: Vec<&str> = rows.iter().map(|r| r.pos.as_str()).collect();
        let tags: Vec<&str> = rows.iter().map(|r| r.tag.as_str()).collect();
        assert_eq!(pos, ["DET", "ADJ", "ADJ", "NOUN", "VERB"]);
        assert_eq!(tags, ["DT", "JJ", "JJ", "NN", "VBD"]);
        assert_eq!(list_tokens(&doc).collect::<Vec<_>>(), rows);
    }

    #[test]
    fn test_count_by_attribute_sums_to_token_count() {
        let doc = process("The dogs barked. The cat slept!");
        for kind in AttributeKind::ALL {
            let total: usize = count_by_attribute(&doc, kind).values().sum();
            assert_eq!(total, doc.len(), "{kind}");
        }
        let pos = count_by_attribute(&doc, AttributeKind::Pos);
        assert_eq!(pos.get("PUNCT"), Some(&2));
        assert_eq!(pos.get("DET"), Some(&2));
        let punct = count_by_attribute(&doc, AttributeKind::IsPunct);
        assert_eq!(punct.get("true"), Some(&2));
    }

    #[test]
    fn test_list_lemmas() {
        let doc = process("Tom met Sam.");
        let lemmas: Vec<(String, String)> = list_lemmas(&doc).map(|r| (r.text, r.lemma)).collect();
        assert_eq!(lemmas[1], ("met".to_string(), "meet".to_string()));
        assert_eq!(lemmas[0].1, "Tom");
    }

    #[test]
    fn test_sentences_partition_tokens() {
        let doc = process("It rained. We stayed home! Did you?");
        let sents = list_sentences(&doc);
        assert_eq!(sents.len(), 3);
        assert_eq!(sents[0].start, 0);
        assert_eq!(sents.last().map(|s| s.end), Some(doc.len()));
        for pair in sents.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(sents[1].text(&doc), "We stayed home!");
    }

    #[test]
    fn test_noun_chunks() {
        let doc = process("a red big dog barked");
        let chunks = list_noun_chunks(&doc).unwrap();
        assert_eq!(
            chunks,
            vec![NounChunkRow {
                text: "a red big dog".into(),
                root_text: "dog".into(),
                root_dep: "nsubj".into(),
                root_head_text: "barked".into(),
            }]
        );

        let nlp = load_with("en", LoadOptions::default().disable(Component::Parser)).unwrap();
        let doc = nlp.process("a red big dog barked").unwrap();
        assert!(matches!(list_noun_chunks(&doc), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_entities_use_char_offsets() {
        let doc = process("Tom met Sam.");
        assert_eq!(
            list_entities(&doc),
            vec![
                EntityRow { text: "Tom".into(), start_char: 0, end_char: 3, label: "PERSON".into() },
                EntityRow { text: "Sam".into(), start_char: 8, end_char: 11, label: "PERSON".into() },
            ]
        );
    }

    #[test]
    fn test_dependencies() {
        let doc = process("Tom met Sam.");
        let rows = list_dependencies(&doc);
        assert_eq!(rows[1].dep, "ROOT");
        assert_eq!(rows[1].head_text, "met");
        assert_eq!(rows[1].children, ["Tom", "Sam", "."]);
        assert_eq!(rows[0].dep, "nsubj");
        assert_eq!(rows[0].head_pos, "VERB");
    }

    #[test]
    fn test_token_table_and_idempotence() {
        let doc = process("The dog barked.");
        let table = token_table(&doc);
        assert_eq!(table[0].shape, "Xxx");
        assert!(table[0].is_stop);
        assert!(!table[3].is_alpha);
        assert_eq!(token_table(&doc), table);
        assert_eq!(list_entities(&doc), list_entities(&doc));
        assert_eq!(list_sentences(&doc), list_sentences(&doc));
    }

    #[test]
    fn test_attribute_kind_from_str() {
        assert_eq!("ENT_TYPE".parse::<AttributeKind>().unwrap(), AttributeKind::EntType);
        assert_eq!(" pos ".parse::<AttributeKind>().unwrap(), AttributeKind::Pos);
        assert!(matches!("color".parse::<AttributeKind>(), Err(Error::InvalidInput(_))));
    }
}
