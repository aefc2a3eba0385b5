//! # Lematizador
//!
//! Reduz cada token à forma de dicionário usando a tag fina já atribuída:
//!
//! 1. **exceções do léxico**: "met"/VBD → "meet", "better"/JJR → "good";
//! 2. **regras de sufixo** por classe ("-ies" → "-y", "-ed" → "", "-ing" → "e"),
//!    aceitando o primeiro candidato que é um lema conhecido;
//! 3. **heurística** para palavras desconhecidas: remove o sufixo e desfaz a
//!    consoante dobrada ("zipped" → "zip") ou devolve o "e" final
//!    ("organized" → "organize").
//!
//! Nomes próprios mantêm o texto original; o resto sai em minúsculas, com
//! exceção do pronome "I".

use std::sync::Arc;

use crate::lexicon::Lexicon;
use crate::tagger::{FineTag, Pos};

/// Regras de sufixo (sufixo, substituição) verificadas contra o léxico
const NOUN_RULES: &[(&str, &str)] = &[
    ("ies", "y"), ("ves", "f"), ("ves", "fe"), ("ches", "ch"), ("shes", "sh"),
    ("xes", "x"), ("zes", "z"), ("sses", "ss"), ("oes", "o"), ("s", ""),
];
const VBZ_RULES: &[(&str, &str)] = &[("ies", "y"), ("es", "e"), ("es", ""), ("s", "")];
const PAST_RULES: &[(&str, &str)] = &[("ied", "y"), ("ed", "e"), ("ed", ""), ("d", "")];
const GERUND_RULES: &[(&str, &str)] = &[("ying", "ie"), ("ing", "e"), ("ing", "")];
const COMPARATIVE_RULES: &[(&str, &str)] = &[("ier", "y"), ("er", "e"), ("er", "")];
const SUPERLATIVE_RULES: &[(&str, &str)] = &[("iest", "y"), ("est", "e"), ("est", "")];

/// Regras usadas quando nenhum candidato é conhecido, na ordem de aplicação
const NOUN_FALLBACK: &[(&str, &str)] = &[
    ("ies", "y"), ("sses", "ss"), ("ches", "ch"), ("shes", "sh"), ("xes", "x"), ("s", ""),
];
const VBZ_FALLBACK: &[(&str, &str)] = &[
    ("ies", "y"), ("sses", "ss"), ("ches", "ch"), ("shes", "sh"), ("xes", "x"), ("zes", "z"),
    ("oes", "o"), ("s", ""),
];

/// Finais de radical que costumam perder um "e" mudo: "creat(e)d", "solv(e)d"
const SILENT_E_ENDINGS: &[&str] = &["v", "u", "c", "iz", "is", "at", "dg", "rg", "ur"];

/// Lematizador baseado em léxico + regras.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    lexicon: Arc<Lexicon>,
}

impl Lemmatizer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Lema de `text` dado o par de tags do token.
    pub fn lemmatize(&self, text: &str, tag: FineTag, pos: Pos) -> String {
        if pos == Pos::Propn {
            return text.to_string();
        }
        let lower = text.to_lowercase();
        if lower == "i" {
            return "I".to_string();
        }
        if let Some(lemma) = self.lexicon.lemma_for(&lower, tag) {
            return lemma.to_string();
        }

        let (rules, fallback, class): (&[(&str, &str)], &[(&str, &str)], Pos) = match tag {
            FineTag::Nns => (NOUN_RULES, NOUN_FALLBACK, Pos::Noun),
            FineTag::Vbz => (VBZ_RULES, VBZ_FALLBACK, Pos::Verb),
            FineTag::Vbd | FineTag::Vbn => (PAST_RULES, &[], Pos::Verb),
            FineTag::Vbg => (GERUND_RULES, &[], Pos::Verb),
            FineTag::Jjr => (COMPARATIVE_RULES, &[], Pos::Adj),
            FineTag::Jjs => (SUPERLATIVE_RULES, &[], Pos::Adj),
            FineTag::Rbr => (COMPARATIVE_RULES, &[], Pos::Adv),
            FineTag::Rbs => (SUPERLATIVE_RULES, &[], Pos::Adv),
            _ => return lower,
        };

        if let Some(lemma) = self.known_candidate(&lower, rules, class) {
            return lemma;
        }

        match tag {
            FineTag::Nns | FineTag::Vbz => apply_first(&lower, fallback),
            FineTag::Vbd | FineTag::Vbn => {
                if let Some(stem) = lower.strip_suffix("ied").filter(|s| s.len() > 1) {
                    format!("{stem}y")
                } else {
                    strip_inflection(&lower, "ed")
                }
            }
            FineTag::Vbg => strip_inflection(&lower, "ing"),
            FineTag::Jjr | FineTag::Rbr => strip_inflection(&lower, "er"),
            FineTag::Jjs | FineTag::Rbs => strip_inflection(&lower, "est"),
            _ => lower,
        }
    }

    /// Primeiro candidato gerado pelas regras que o léxico conhece
    fn known_candidate(&self, lower: &str, rules: &[(&str, &str)], class: Pos) -> Option<String> {
        for &(suffix, replacement) in rules {
            let Some(stem) = lower.strip_suffix(suffix) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            let candidate = format!("{stem}{replacement}");
            if self.lexicon.is_known_lemma(class, &candidate) {
                return Some(candidate);
            }
            if replacement.is_empty() {
                if let Some(undoubled) = undouble(stem) {
                    if self.lexicon.is_known_lemma(class, &undoubled) {
                        return Some(undoubled);
                    }
                }
            }
        }
        None
    }
}

fn apply_first(lower: &str, rules: &[(&str, &str)]) -> String {
    rules
        .iter()
        .find_map(|&(suffix, replacement)| {
            lower
                .strip_suffix(suffix)
                .filter(|stem| stem.len() > 1)
                .map(|stem| format!("{stem}{replacement}"))
        })
        .unwrap_or_else(|| lower.to_string())
}

/// Remove o sufixo flexional de uma palavra desconhecida
fn strip_inflection(lower: &str, suffix: &str) -> String {
    let Some(stem) = lower.strip_suffix(suffix).filter(|s| s.len() > 1) else {
        return lower.to_string();
    };
    if let Some(undoubled) = undouble(stem) {
        return undoubled;
    }
    if SILENT_E_ENDINGS.iter().any(|e| stem.ends_with(e)) {
        return format!("{stem}e");
    }
    stem.to_string()
}

/// "stopp" → "stop"; consoantes que dobram naturalmente (ll, ss, ff, zz) ficam
fn undouble(stem: &str) -> Option<String> {
    let mut rev = stem.chars().rev();
    match (rev.next(), rev.next()) {
        (Some(a), Some(b))
            if a == b && a.is_ascii_alphabetic() && !matches!(a, 'a' | 'e' | 'i' | 'o' | 'u' | 'l' | 's' | 'f' | 'z') =>
        {
            Some(stem[..stem.len() - a.len_utf8()].to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmatizer() -> Lemmatizer {
        Lemmatizer::new(Arc::new(Lexicon::english()))
    }

    #[test]
    fn test_lexicon_exceptions() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("met", FineTag::Vbd, Pos::Verb), "meet");
        assert_eq!(l.lemmatize("was", FineTag::Vbd, Pos::Aux), "be");
        assert_eq!(l.lemmatize("better", FineTag::Jjr, Pos::Adj), "good");
        assert_eq!(l.lemmatize("children", FineTag::Nns, Pos::Noun), "child");
        assert_eq!(l.lemmatize("n't", FineTag::Rb, Pos::Part), "not");
    }

    #[test]
    fn test_regular_inflections() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("dogs", FineTag::Nns, Pos::Noun), "dog");
        assert_eq!(l.lemmatize("barked", FineTag::Vbd, Pos::Verb), "bark");
        assert_eq!(l.lemmatize("cities", FineTag::Nns, Pos::Noun), "city");
        assert_eq!(l.lemmatize("running", FineTag::Vbg, Pos::Verb), "run");
        assert_eq!(l.lemmatize("bigger", FineTag::Jjr, Pos::Adj), "big");
    }

    #[test]
    fn test_unknown_words_use_heuristics() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("glimmered", FineTag::Vbd, Pos::Verb), "glimmer");
        assert_eq!(l.lemmatize("zipped", FineTag::Vbd, Pos::Verb), "zip");
        assert_eq!(l.lemmatize("organized", FineTag::Vbd, Pos::Verb), "organize");
        assert_eq!(l.lemmatize("gadgets", FineTag::Nns, Pos::Noun), "gadget");
        assert_eq!(l.lemmatize("buzzing", FineTag::Vbg, Pos::Verb), "buzz");
    }

    #[test]
    fn test_case_handling() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("Tom", FineTag::Nnp, Pos::Propn), "Tom");
        assert_eq!(l.lemmatize("The", FineTag::Dt, Pos::Det), "the");
        assert_eq!(l.lemmatize("I", FineTag::Prp, Pos::Pron), "I");
        assert_eq!(l.lemmatize("me", FineTag::Prp, Pos::Pron), "I");
    }
}
