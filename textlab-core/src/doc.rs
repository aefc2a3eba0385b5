//! # Modelo de Documento
//!
//! Um [`Document`] é a saída imutável do pipeline: o texto original, a
//! sequência ordenada de [`Token`]s anotados e as entidades. Sentenças e
//! noun chunks são **derivados** das anotações dos tokens sob demanda.
//!
//! ## Invariantes
//!
//! - tokens ordenados e sem sobreposição: `tokens[i].end <= tokens[i+1].start`;
//! - `token.text == text[token.start..token.end]` (offsets em bytes);
//! - toda cabeça (`head`) aponta para um token do documento e toda cadeia de
//!   cabeças termina numa raiz (token que aponta para si mesmo);
//! - entidades ordenadas por início, não vazias e sem sobreposição.
//!
//! [`Document::from_parts`] verifica tudo isso; a desserialização passa por
//! ele, então um JSON malformado vira [`Error::InvalidInput`].

use serde::{Deserialize, Serialize};

use crate::entity::EntityLabel;
use crate::error::{Error, Result};
use crate::parser::{noun_chunk_spans, DepLabel};
use crate::tagger::{FineTag, Pos};

/// Componentes opcionais do pipeline. O tokenizador e o segmentador de
/// sentenças sempre rodam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Tagger,
    Lemmatizer,
    Parser,
    Ner,
}

impl Component {
    pub const ALL: [Component; 4] = [
        Component::Tagger,
        Component::Lemmatizer,
        Component::Parser,
        Component::Ner,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Component::Tagger => "tagger",
            Component::Lemmatizer => "lemmatizer",
            Component::Parser => "parser",
            Component::Ner => "ner",
        }
    }
}

/// Marcador IOB de entidade por token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntIob {
    #[serde(rename = "B")]
    Begin,
    #[serde(rename = "I")]
    Inside,
    #[serde(rename = "O")]
    Outside,
    /// O reconhecedor de entidades não rodou
    #[serde(rename = "")]
    Missing,
}

impl EntIob {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntIob::Begin => "B",
            EntIob::Inside => "I",
            EntIob::Outside => "O",
            EntIob::Missing => "",
        }
    }
}

/// Um token anotado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Texto exato do token
    pub text: String,
    /// Índice de byte inicial no texto do documento (inclusive)
    pub start: usize,
    /// Índice de byte final (exclusivo)
    pub end: usize,
    /// Se há espaço em branco logo depois do token
    pub whitespace: bool,
    pub lower: String,
    /// Forma ortográfica: "Xxxx", "dd", "xx'x"
    pub shape: String,
    pub lemma: String,
    pub pos: Pos,
    pub tag: FineTag,
    pub dep: DepLabel,
    /// Índice do token cabeça; a raiz aponta para si mesma
    pub head: usize,
    pub is_sent_start: bool,
    pub is_stop: bool,
    pub ent_iob: EntIob,
    pub ent_type: Option<EntityLabel>,
}

impl Token {
    /// Token sem anotações linguísticas, com os atributos lexicais derivados do texto
    pub fn bare(text: &str, start: usize, whitespace: bool, index: usize) -> Self {
        Self {
            text: text.to_string(),
            start,
            end: start + text.len(),
            whitespace,
            lower: text.to_lowercase(),
            shape: word_shape(text),
            lemma: String::new(),
            pos: Pos::Unset,
            tag: FineTag::Unset,
            dep: DepLabel::Unset,
            head: index,
            is_sent_start: index == 0,
            is_stop: false,
            ent_iob: EntIob::Missing,
            ent_type: None,
        }
    }

    pub fn is_alpha(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }

    pub fn is_digit(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| c.is_ascii_digit())
    }

    pub fn is_punct(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(is_punct_char)
    }

    /// Parece número: "42", "3.14", "1,000", "1/2", "ten", "million"
    pub fn like_num(&self) -> bool {
        let text = self.text.trim_start_matches(['+', '-', '±', '~']);
        let stripped: String = text.chars().filter(|c| !matches!(c, ',' | '.')).collect();
        if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
            return true;
        }
        if let Some((num, den)) = text.split_once('/') {
            let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
            if digits(num) && digits(den) {
                return true;
            }
        }
        NUMBER_WORDS.contains(&self.lower.as_str())
    }

    /// Primeira letra maiúscula e as demais minúsculas ("Title")
    pub fn is_title(&self) -> bool {
        let mut cased = self.text.chars().filter(|c| c.is_alphabetic());
        match cased.next() {
            Some(first) => first.is_uppercase() && cased.all(char::is_lowercase),
            None => false,
        }
    }

    pub fn is_lower(&self) -> bool {
        self.text.chars().any(char::is_lowercase) && !self.text.chars().any(char::is_uppercase)
    }

    pub fn is_upper(&self) -> bool {
        self.text.chars().any(char::is_uppercase) && !self.text.chars().any(char::is_lowercase)
    }

    /// Comprimento em caracteres
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }
}

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion", "dozen",
];

fn is_punct_char(c: char) -> bool {
    (c.is_ascii_punctuation() && !matches!(c, '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~'))
        || matches!(
            c,
            '…' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '\u{2013}' | '\u{2014}' | '¡' | '¿'
        )
}

/// Forma ortográfica: maiúscula → `X`, minúscula → `x`, dígito → `d`, o resto
/// é mantido; sequências de mais de 4 caracteres iguais são truncadas.
///
/// "Apple" → "Xxxxx", "U.K." → "X.X.", "1990" → "dddd", "billion" → "xxxx"
pub fn word_shape(text: &str) -> String {
    let mut shape = String::new();
    let mut last: Option<char> = None;
    let mut run = 0;
    for c in text.chars() {
        let s = if c.is_uppercase() {
            'X'
        } else if c.is_lowercase() {
            'x'
        } else if c.is_ascii_digit() {
            'd'
        } else {
            c
        };
        if Some(s) == last {
            run += 1;
        } else {
            run = 0;
            last = Some(s);
        }
        if run < 4 {
            shape.push(s);
        }
    }
    shape
}

/// Faixa contígua `[start, end)` de tokens, com rótulo opcional.
///
/// Sentenças, noun chunks e resultados do matcher são spans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            label: None,
        }
    }

    pub fn with_label(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: Some(label.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Texto do span no documento (fatia contígua do texto original)
    pub fn text<'d>(&self, doc: &'d Document) -> &'d str {
        doc.span_text(self.start, self.end)
    }

    /// Offset de caractere (não byte) do início do span
    pub fn start_char(&self, doc: &Document) -> usize {
        doc.tokens
            .get(self.start)
            .map(|t| doc.char_offset(t.start))
            .unwrap_or_else(|| doc.char_offset(doc.text.len()))
    }

    /// Offset de caractere do fim do span (exclusivo)
    pub fn end_char(&self, doc: &Document) -> usize {
        if self.is_empty() {
            return self.start_char(doc);
        }
        doc.tokens
            .get(self.end - 1)
            .map(|t| doc.char_offset(t.end))
            .unwrap_or_else(|| doc.char_offset(doc.text.len()))
    }

    /// Token raiz do span: o primeiro cuja cabeça está fora do span (ou é ele mesmo)
    pub fn root(&self, doc: &Document) -> usize {
        (self.start..self.end.min(doc.tokens.len()))
            .find(|&i| {
                let head = doc.tokens[i].head;
                head == i || head < self.start || head >= self.end
            })
            .unwrap_or(self.start)
    }
}

/// Uma entidade nomeada: span de tokens com rótulo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
}

impl Entity {
    pub fn as_span(&self) -> Span {
        Span::with_label(self.start, self.end, self.label.as_str())
    }
}

/// Documento analisado, imutável depois de criado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocumentData")]
pub struct Document {
    text: String,
    tokens: Vec<Token>,
    ents: Vec<Entity>,
    components: Vec<Component>,
    /// Índice da árvore, derivado das cabeças em `from_parts`
    #[serde(skip)]
    tree: TreeIndex,
}

/// Filhos e bordas de subárvore de cada token
#[derive(Debug, Clone, Default, PartialEq)]
struct TreeIndex {
    children: Vec<Vec<usize>>,
    left_edges: Vec<usize>,
    right_edges: Vec<usize>,
}

impl TreeIndex {
    /// Exige cabeças em faixa e sem ciclos, já verificado por `from_parts`
    fn build(tokens: &[Token]) -> Self {
        let n = tokens.len();
        let mut children = vec![Vec::new(); n];
        for (j, token) in tokens.iter().enumerate() {
            if token.head != j {
                children[token.head].push(j);
            }
        }

        // Profundidade de cada token, memoizada ao subir pelas cabeças
        let mut depth: Vec<Option<usize>> = vec![None; n];
        for i in 0..n {
            let mut path = Vec::new();
            let mut current = i;
            let base = loop {
                if let Some(d) = depth[current] {
                    break d;
                }
                if tokens[current].head == current {
                    depth[current] = Some(0);
                    break 0;
                }
                path.push(current);
                current = tokens[current].head;
            };
            for (k, &node) in path.iter().rev().enumerate() {
                depth[node] = Some(base + k + 1);
            }
        }

        // Do mais profundo para a raiz: cada token repassa as bordas à cabeça
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(depth[i].unwrap_or(0)));
        let mut left_edges: Vec<usize> = (0..n).collect();
        let mut right_edges: Vec<usize> = (0..n).collect();
        for i in order {
            let head = tokens[i].head;
            if head != i {
                left_edges[head] = left_edges[head].min(left_edges[i]);
                right_edges[head] = right_edges[head].max(right_edges[i]);
            }
        }

        Self {
            children,
            left_edges,
            right_edges,
        }
    }
}

/// Forma serializada de [`Document`], validada na conversão
#[derive(Deserialize)]
struct DocumentData {
    text: String,
    tokens: Vec<Token>,
    #[serde(default)]
    ents: Vec<Entity>,
    #[serde(default)]
    components: Vec<Component>,
}

impl TryFrom<DocumentData> for Document {
    type Error = Error;

    fn try_from(data: DocumentData) -> Result<Self> {
        Document::from_parts(data.text, data.tokens, data.ents, data.components)
    }
}

impl Document {
    /// Monta um documento a partir das partes, verificando as invariantes.
    ///
    /// `components` lista os componentes que produziram as anotações.
    pub fn from_parts(
        text: impl Into<String>,
        tokens: Vec<Token>,
        ents: Vec<Entity>,
        components: Vec<Component>,
    ) -> Result<Self> {
        let text = text.into();

        let mut prev_end = 0;
        for (i, token) in tokens.iter().enumerate() {
            if token.text.is_empty() {
                return Err(invalid(format!("token {i} está vazio")));
            }
            if token.start < prev_end || token.start > token.end || token.end > text.len() {
                return Err(invalid(format!(
                    "token {i} ({}..{}) fora de ordem ou fora do texto",
                    token.start, token.end
                )));
            }
            if text.get(token.start..token.end) != Some(token.text.as_str()) {
                return Err(invalid(format!(
                    "token {i} '{}' não corresponde ao texto em {}..{}",
                    token.text, token.start, token.end
                )));
            }
            if token.head >= tokens.len() {
                return Err(invalid(format!(
                    "token {i} aponta para a cabeça {} inexistente",
                    token.head
                )));
            }
            prev_end = token.end;
        }

        // Toda cadeia de cabeças precisa chegar a uma raiz
        for i in 0..tokens.len() {
            let mut current = i;
            let mut steps = 0;
            while tokens[current].head != current {
                current = tokens[current].head;
                steps += 1;
                if steps > tokens.len() {
                    return Err(invalid(format!("ciclo de dependências a partir do token {i}")));
                }
            }
        }

        let mut prev_ent_end = 0;
        for ent in &ents {
            if ent.start >= ent.end || ent.end > tokens.len() {
                return Err(invalid(format!(
                    "entidade {}..{} vazia ou fora do documento",
                    ent.start, ent.end
                )));
            }
            if ent.start < prev_ent_end {
                return Err(invalid(format!(
                    "entidade {}..{} fora de ordem ou sobreposta",
                    ent.start, ent.end
                )));
            }
            prev_ent_end = ent.end;
        }

        let tree = TreeIndex::build(&tokens);
        Ok(Self {
            text,
            tokens,
            ents,
            components,
            tree,
        })
    }

    /// Texto original
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Entidades em ordem de início
    pub fn ents(&self) -> &[Entity] {
        &self.ents
    }

    /// Componentes que anotaram este documento
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn has_component(&self, component: Component) -> bool {
        self.components.contains(&component)
    }

    /// Sentenças, em ordem; particionam a sequência de tokens.
    pub fn sents(&self) -> Vec<Span> {
        let mut sents = Vec::new();
        let mut start = 0;
        for (i, token) in self.tokens.iter().enumerate().skip(1) {
            if token.is_sent_start {
                sents.push(Span::new(start, i));
                start = i;
            }
        }
        if !self.tokens.is_empty() {
            sents.push(Span::new(start, self.tokens.len()));
        }
        sents
    }

    /// Noun chunks (sintagmas nominais de base). Exigem a análise de dependências.
    pub fn noun_chunks(&self) -> Result<Vec<Span>> {
        if !self.has_component(Component::Parser) {
            return Err(invalid(
                "noun chunks exigem a análise de dependências (componente 'parser')".to_string(),
            ));
        }
        Ok(noun_chunk_spans(self))
    }

    /// Filhos sintáticos do token `i`, em ordem
    pub fn children(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.tree
            .children
            .get(i)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// Token mais à esquerda da subárvore de `i`
    pub fn left_edge(&self, i: usize) -> usize {
        self.tree.left_edges.get(i).copied().unwrap_or(i)
    }

    /// Token mais à direita da subárvore de `i`
    pub fn right_edge(&self, i: usize) -> usize {
        self.tree.right_edges.get(i).copied().unwrap_or(i)
    }

    /// Texto da faixa de tokens `[start, end)`
    pub fn span_text(&self, start: usize, end: usize) -> &str {
        if start >= end || end > self.tokens.len() {
            return "";
        }
        &self.text[self.tokens[start].start..self.tokens[end - 1].end]
    }

    /// Converte um offset de byte em offset de caractere
    pub fn char_offset(&self, byte: usize) -> usize {
        self.text
            .get(..byte)
            .map(|prefix| prefix.chars().count())
            .unwrap_or_else(|| self.text.chars().count())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidInput(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_doc(text: &str) -> Document {
        let tokens = crate::tokenizer::tokenize(text)
            .into_iter()
            .map(|t| Token::bare(&t.text, t.start, t.whitespace, t.index))
            .collect();
        Document::from_parts(text, tokens, vec![], vec![]).unwrap()
    }

    #[test]
    fn test_word_shape() {
        assert_eq!(word_shape("Apple"), "Xxxxx");
        assert_eq!(word_shape("U.K."), "X.X.");
        assert_eq!(word_shape("1990"), "dddd");
        assert_eq!(word_shape("billion"), "xxxx");
        assert_eq!(word_shape("n't"), "x'x");
    }

    #[test]
    fn test_lexical_flags() {
        let doc = bare_doc("Hello WORLD , 3.5 ten 1/2 Title");
        let t = doc.tokens();
        assert!(t[0].is_title() && t[0].is_alpha());
        assert!(t[1].is_upper() && !t[1].is_lower());
        assert!(t[2].is_punct());
        assert!(t[3].like_num() && !t[3].is_digit());
        assert!(t[4].like_num());
        assert!(t[5].like_num());
        assert!(t[6].is_title());
    }

    #[test]
    fn test_sents_partition_tokens() {
        let mut doc = bare_doc("One two. Three four.");
        doc.tokens[3].is_sent_start = true;
        let sents = doc.sents();
        assert_eq!(sents, vec![Span::new(0, 3), Span::new(3, 6)]);
        assert_eq!(sents[1].text(&doc), "Three four.");
    }

    #[test]
    fn test_char_offsets_with_multibyte_text() {
        let doc = bare_doc("Café com Zoë");
        let span = Span::new(2, 3);
        assert_eq!(span.text(&doc), "Zoë");
        assert_eq!(span.start_char(&doc), 9);
        assert_eq!(span.end_char(&doc), 12);
    }

    #[test]
    fn test_from_parts_rejects_mismatched_token() {
        let mut token = Token::bare("dog", 0, false, 0);
        token.text = "cat".to_string();
        let err = Document::from_parts("dog", vec![token], vec![], vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_parts_rejects_overlapping_entities() {
        let doc = bare_doc("New York City");
        let ents = vec![
            Entity { start: 0, end: 2, label: EntityLabel::Gpe },
            Entity { start: 1, end: 3, label: EntityLabel::Gpe },
        ];
        let err = Document::from_parts(doc.text(), doc.tokens().to_vec(), ents, vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_parts_rejects_head_cycles() {
        let mut a = Token::bare("a", 0, true, 0);
        let mut b = Token::bare("b", 2, false, 1);
        a.head = 1;
        b.head = 0;
        let err = Document::from_parts("a b", vec![a, b], vec![], vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"text":"hi","tokens":[{"text":"hey","start":0,"end":2,"whitespace":false,
            "lower":"hey","shape":"xxx","lemma":"","pos":"","tag":"","dep":"","head":0,
            "is_sent_start":true,"is_stop":false,"ent_iob":"","ent_type":null}]}"#;
        assert!(serde_json::from_str::<Document>(json).is_err());
    }

    #[test]
    fn test_serde_roundtrip_keeps_document() {
        let doc = bare_doc("Tom met Sam.");
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    fn doc_with_heads(text: &str, heads: &[usize]) -> Document {
        let base = bare_doc(text);
        let tokens = base
            .tokens()
            .iter()
            .zip(heads)
            .map(|(t, &head)| Token { head, ..t.clone() })
            .collect();
        Document::from_parts(text, tokens, vec![], vec![]).unwrap()
    }

    #[test]
    fn test_children_and_subtree_edges() {
        // the → dog, big → dog, dog → barked, barked é a raiz
        let doc = doc_with_heads("the big dog barked", &[2, 2, 3, 3]);
        assert_eq!(doc.children(3).collect::<Vec<_>>(), vec![2]);
        assert_eq!(doc.children(2).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(doc.children(0).count(), 0);
        assert_eq!(doc.left_edge(3), 0);
        assert_eq!(doc.left_edge(1), 1);
        assert_eq!(doc.right_edge(2), 2);
        assert_eq!(doc.right_edge(3), 3);
    }

    #[test]
    fn test_subtree_edges_on_long_chain() {
        let n = 3000;
        let text = vec!["a"; n].join(" ");
        let heads: Vec<usize> = (0..n).map(|i| (i + 1).min(n - 1)).collect();
        let doc = doc_with_heads(&text, &heads);
        assert_eq!(doc.left_edge(n - 1), 0);
        assert_eq!(doc.right_edge(0), 0);
        assert_eq!(doc.children(n - 1).collect::<Vec<_>>(), vec![n - 2]);
    }

    #[test]
    fn test_span_methods_tolerate_out_of_range() {
        let doc = bare_doc("Tom met Sam.");
        let span = Span::new(2, 10);
        assert_eq!(span.text(&doc), "");
        assert_eq!(span.start_char(&doc), 8);
        assert_eq!(span.end_char(&doc), 12);
        assert_eq!(span.root(&doc), 2);

        let beyond = Span::new(7, 9);
        assert_eq!(beyond.start_char(&doc), 12);
        assert_eq!(beyond.end_char(&doc), 12);
        assert_eq!(beyond.root(&doc), 7);
    }

    #[test]
    fn test_noun_chunks_require_parser() {
        let doc = bare_doc("a dog");
        assert!(matches!(doc.noun_chunks(), Err(Error::InvalidInput(_))));
    }
}
