//! # Engenharia de Features
//!
//! Para cada token, extrai um vetor esparso de features binárias que os
//! modelos CRF usam para pontuar rótulos. Há dois extratores:
//!
//! - [`extract_tagger_features`]: contexto lexical para o POS tagger, que
//!   roda antes de existir qualquer tag;
//! - [`extract_ner_features`]: ortografia + tags já atribuídas, para o
//!   reconhecedor de entidades.
//!
//! ## Features do tagger
//! - `bias`, `word=`, `suffix3=`, `BOS`/`EOS`
//! - `prev_have`: o verbo anterior (pulando advérbios) é uma forma de *have*
//! - `prev_be`: idem para *be*
//!
//! ## Features do NER
//! - `bias`, `is_title`, `is_lower`, `is_all_caps`, `is_punct`, `is_digit`
//! - `pos=`, `prev_pos=`, `next_pos=`
//! - `sent_start`

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::doc::Token;
use crate::tokenizer::RawToken;

/// Vetor esparso de features de um token.
///
/// Um mapa `HashMap<String, f64>` porque o espaço de features é aberto
/// (ex: "word=bark", "suffix3=ked") mas cada token ativa poucas delas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Features ativas. Ex: `{"bias": 1.0, "pos=PROPN": 1.0}`.
    pub features: HashMap<String, f64>,
    /// Índice do token na sequência.
    pub token_index: usize,
}

impl FeatureVector {
    pub fn new(token_index: usize) -> Self {
        Self {
            features: HashMap::new(),
            token_index,
        }
    }

    /// Adiciona uma feature com valor 1.0 (binária) ou customizado.
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.features.insert(key.into(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.features.contains_key(key)
    }
}

const HAVE_FORMS: &[&str] = &["have", "has", "had", "having", "'ve", "\u{2019}ve"];

const BE_FORMS: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "'re", "'m", "\u{2019}re",
    "\u{2019}m",
];

/// Advérbios que podem ficar entre o auxiliar e o verbo principal
const INTERVENING_ADVERBS: &[&str] = &[
    "not", "n't", "never", "already", "just", "also", "always", "still", "ever", "really",
    "recently", "often", "probably", "finally",
];

/// Features de contexto para o POS tagger.
pub fn extract_tagger_features(tokens: &[RawToken], i: usize) -> FeatureVector {
    let mut fv = FeatureVector::new(i);
    let lower = tokens[i].text.to_lowercase();

    fv.insert("bias", 1.0);
    fv.insert(format!("word={lower}"), 1.0);
    let chars: Vec<char> = lower.chars().collect();
    if chars.len() > 3 {
        let suffix: String = chars[chars.len() - 3..].iter().collect();
        fv.insert(format!("suffix3={suffix}"), 1.0);
    }

    if i == 0 {
        fv.insert("BOS", 1.0);
    }
    if i + 1 == tokens.len() {
        fv.insert("EOS", 1.0);
    }

    // Palavra anterior relevante, pulando advérbios intermediários
    let prev = tokens[..i]
        .iter()
        .rev()
        .map(|t| t.text.to_lowercase())
        .find(|w| !INTERVENING_ADVERBS.contains(&w.as_str()));
    if let Some(prev) = prev {
        if HAVE_FORMS.contains(&prev.as_str()) {
            fv.insert("prev_have", 1.0);
        }
        if BE_FORMS.contains(&prev.as_str()) {
            fv.insert("prev_be", 1.0);
        }
    }

    fv
}

/// Features do reconhecedor de entidades: ortografia e tags já atribuídas.
pub fn extract_ner_features(tokens: &[Token], i: usize) -> FeatureVector {
    let mut fv = FeatureVector::new(i);
    let token = &tokens[i];
    let word = token.text.as_str();

    fv.insert("bias", 1.0);

    let first_upper = word.chars().next().map(char::is_uppercase).unwrap_or(false);
    let first_lower = word.chars().next().map(char::is_lowercase).unwrap_or(false);
    if first_upper {
        fv.insert("is_title", 1.0);
    }
    if first_lower {
        fv.insert("is_lower", 1.0);
    }
    if word.chars().filter(|c| c.is_alphabetic()).count() > 1
        && word.chars().all(|c| !c.is_lowercase())
    {
        fv.insert("is_all_caps", 1.0);
    }
    if token.is_punct() {
        fv.insert("is_punct", 1.0);
    }
    if token.is_digit() {
        fv.insert("is_digit", 1.0);
    }
    if token.is_sent_start {
        fv.insert("sent_start", 1.0);
    }

    fv.insert(format!("pos={}", token.pos), 1.0);
    if i > 0 {
        fv.insert(format!("prev_pos={}", tokens[i - 1].pos), 1.0);
    }
    if i + 1 < tokens.len() {
        fv.insert(format!("next_pos={}", tokens[i + 1].pos), 1.0);
    }

    fv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_prev_have_skips_adverbs() {
        let tokens = tokenize("they have already walked");
        let fv = extract_tagger_features(&tokens, 3);
        assert!(fv.contains("prev_have"));
        assert!(!fv.contains("prev_be"));
    }

    #[test]
    fn test_prev_be() {
        let tokens = tokenize("it was chased");
        let fv = extract_tagger_features(&tokens, 2);
        assert!(fv.contains("prev_be"));
    }

    #[test]
    fn test_word_and_boundary_features() {
        let tokens = tokenize("Dogs bark");
        let first = extract_tagger_features(&tokens, 0);
        assert!(first.contains("word=dogs"));
        assert!(first.contains("suffix3=ogs"));
        assert!(first.contains("BOS"));
        assert!(extract_tagger_features(&tokens, 1).contains("EOS"));
    }
}
