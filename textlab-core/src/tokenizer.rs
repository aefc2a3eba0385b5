//! # Tokenizador para Inglês
//!
//! Divide o texto bruto em tokens (palavras, números, pontuações) preservando
//! o offset de cada um no texto original, para que spans, entidades e a
//! renderização consigam apontar exatamente para o trecho de origem.
//!
//! ## Esquema de Tokenização
//!
//! 1. O texto é quebrado em blocos separados por espaço em branco.
//! 2. De cada bloco são removidos **prefixos** (`(`, `"`, `$`, ...) e
//!    **sufixos** (`,`, `.`, `!`, `)`, `%`, ...) um caractere por vez.
//! 3. Contrações viram tokens próprios: `don't` → `do` + `n't`,
//!    `it's` → `it` + `'s`.
//! 4. O ponto final é preservado em abreviações (`Mr.`, `U.S.`, `e.g.`)
//!    e em números decimais (`3.14`).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use textlab_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("Mr. Smith doesn't live in the U.S. anymore.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(
//!     texts,
//!     ["Mr.", "Smith", "does", "n't", "live", "in", "the", "U.S.", "anymore", "."]
//! );
//! ```

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Um token extraído do texto original, ainda sem anotações linguísticas.
///
/// É a unidade produzida pelo tokenizador e consumida pelo pipeline, que a
/// transforma em [`crate::doc::Token`] ao acrescentar tags, lema e dependência.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawToken {
    /// O texto do token (ex: "Apple", ",", "n't").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
    /// Se o token é seguido por espaço em branco no texto original.
    pub whitespace: bool,
}

/// Abreviações comuns em inglês cujo ponto não encerra sentença (lowercase, com ponto).
const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "mt.", "gen.", "gov.",
    "sen.", "rep.", "lt.", "col.", "capt.", "sgt.", "rev.", "inc.", "corp.", "ltd.",
    "co.", "bros.", "vs.", "etc.", "e.g.", "i.e.", "approx.", "dept.", "est.", "no.",
    "jan.", "feb.", "mar.", "apr.", "jun.", "jul.", "aug.", "sep.", "sept.", "oct.",
    "nov.", "dec.", "a.m.", "p.m.", "u.s.", "u.k.", "u.n.", "d.c.",
];

/// Caracteres destacados do início de um bloco.
const PREFIX_CHARS: &[char] = &[
    '(', '[', '{', '"', '\'', '`', '$', '£', '€', '¥', '#', '\u{201C}', '\u{2018}', '<', '*',
];

/// Caracteres destacados do fim de um bloco (o ponto tem tratamento próprio).
const SUFFIX_CHARS: &[char] = &[
    ')', ']', '}', '"', '\'', ',', '!', '?', ';', ':', '%', '\u{201D}', '\u{2019}', '>', '*',
    '…',
];

/// Contrações separadas como sufixo (comparadas em lowercase).
const CONTRACTIONS: &[&str] = &[
    "n't", "'s", "'re", "'ve", "'ll", "'d", "'m", "n\u{2019}t", "\u{2019}s", "\u{2019}re",
    "\u{2019}ve", "\u{2019}ll", "\u{2019}d", "\u{2019}m",
];

/// Tokeniza um texto em inglês.
pub fn tokenize(text: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();

    for (chunk_start, chunk) in whitespace_chunks(text) {
        split_chunk(chunk, chunk_start, &mut tokens);
    }

    // Re-indexa os tokens e marca espaço em branco à direita
    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
        token.whitespace = text[token.end..]
            .chars()
            .next()
            .map(char::is_whitespace)
            .unwrap_or(false);
    }
    tokens
}

/// Divide o texto em blocos sem espaço em branco: (offset de byte, bloco).
fn whitespace_chunks(text: &str) -> Vec<(usize, &str)> {
    let mut chunks = Vec::new();
    let mut current_start: Option<usize> = None;

    for (byte_pos, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(start) = current_start.take() {
                chunks.push((start, &text[start..byte_pos]));
            }
        } else if current_start.is_none() {
            current_start = Some(byte_pos);
        }
    }
    if let Some(start) = current_start {
        chunks.push((start, &text[start..]));
    }
    chunks
}

/// Quebra um bloco em prefixos, núcleo e sufixos.
fn split_chunk(chunk: &str, base: usize, tokens: &mut Vec<RawToken>) {
    let mut s = 0;
    let mut e = chunk.len();
    let mut suffixes: Vec<(usize, usize)> = Vec::new();

    // Prefixos: um grafema por vez
    while let Some(g) = chunk[s..e].graphemes(true).next() {
        if e - s > g.len() && starts_with_any(g, PREFIX_CHARS) {
            push_token(tokens, g, base + s);
            s += g.len();
        } else {
            break;
        }
    }

    // Sufixos: pontuação, ponto final e contrações
    loop {
        let rest = &chunk[s..e];
        let Some(last) = rest.graphemes(true).next_back() else { break };
        if last.len() == rest.len() {
            break;
        }

        if starts_with_any(last, SUFFIX_CHARS) {
            suffixes.push((e - last.len(), e));
            e -= last.len();
        } else if last == "." {
            if is_abbreviation(rest) {
                break;
            }
            suffixes.push((e - 1, e));
            e -= 1;
        } else if let Some(len) = contraction_len(rest) {
            suffixes.push((e - len, e));
            e -= len;
        } else {
            break;
        }
    }

    if e > s {
        push_token(tokens, &chunk[s..e], base + s);
    }
    for (start, end) in suffixes.into_iter().rev() {
        push_token(tokens, &chunk[start..end], base + start);
    }
}

/// Grafema de um único caractere pertencente ao conjunto.
fn starts_with_any(grapheme: &str, set: &[char]) -> bool {
    let mut chars = grapheme.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if set.contains(&c))
}

/// Tamanho em bytes da contração no fim do bloco, se houver.
fn contraction_len(rest: &str) -> Option<usize> {
    CONTRACTIONS
        .iter()
        .find(|c| {
            let cut = rest.len().saturating_sub(c.len());
            cut > 0 && rest.is_char_boundary(cut) && rest[cut..].to_lowercase() == **c
        })
        .map(|c| c.len())
}

/// Verifica se o bloco (terminado em ponto) é uma abreviação ou sigla pontuada.
fn is_abbreviation(word: &str) -> bool {
    let lower = word.to_lowercase();
    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }
    // Siglas do tipo "U.S.A." ou iniciais "J.": letra + ponto repetidos
    let mut chars = word.chars();
    let mut pairs = 0;
    while let Some(c) = chars.next() {
        if !c.is_alphabetic() || chars.next() != Some('.') {
            return false;
        }
        pairs += 1;
    }
    pairs >= 1 && word.chars().next().map(char::is_uppercase).unwrap_or(false)
}

/// Adiciona um token com offsets absolutos
fn push_token(tokens: &mut Vec<RawToken>, text: &str, start: usize) {
    tokens.push(RawToken {
        text: text.to_string(),
        start,
        end: start + text.len(),
        index: 0, // será atribuído depois
        whitespace: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_tokenize_basic_sentence() {
        assert_eq!(texts("Tom met Sam."), ["Tom", "met", "Sam", "."]);
    }

    #[test]
    fn test_offsets_point_into_source() {
        let text = "Apple is looking at buying U.K. startup for $1 billion";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_contractions_are_split() {
        assert_eq!(texts("I don't know"), ["I", "do", "n't", "know"]);
        assert_eq!(texts("it's here"), ["it", "'s", "here"]);
        assert_eq!(texts("We'll see"), ["We", "'ll", "see"]);
    }

    #[test]
    fn test_prefix_and_suffix_punctuation() {
        assert_eq!(texts("(hello, world!)"), ["(", "hello", ",", "world", "!", ")"]);
        assert_eq!(texts("\"Quoted\""), ["\"", "Quoted", "\""]);
        assert_eq!(texts("$100"), ["$", "100"]);
        assert_eq!(texts("50%"), ["50", "%"]);
    }

    #[test]
    fn test_abbreviations_keep_period() {
        assert_eq!(texts("Dr. Who"), ["Dr.", "Who"]);
        assert_eq!(texts("the U.S. economy"), ["the", "U.S.", "economy"]);
        assert_eq!(texts("the end."), ["the", "end", "."]);
    }

    #[test]
    fn test_decimal_numbers_stay_whole() {
        assert_eq!(texts("pi is 3.14."), ["pi", "is", "3.14", "."]);
    }

    #[test]
    fn test_whitespace_flags() {
        let tokens = tokenize("Hi there.");
        assert!(tokens[0].whitespace);
        assert!(!tokens[1].whitespace);
        assert!(!tokens[2].whitespace);
        assert_eq!(tokens[2].index, 2);
    }

    #[test]
    fn test_empty_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }
}
