//! Glossário de rótulos: descrições curtas para classes gramaticais, tags
//! finas, rótulos de dependência e tipos de entidade.

use crate::entity::EntityLabel;
use crate::parser::DepLabel;
use crate::tagger::{FineTag, Pos};

/// Rótulos de sintagma usados nos noun chunks e nas árvores de constituintes
const PHRASES: &[(&str, &str)] = &[
    ("NP", "noun phrase"),
    ("PP", "prepositional phrase"),
    ("VP", "verb phrase"),
    ("ADVP", "adverb phrase"),
    ("ADJP", "adjective phrase"),
    ("SBAR", "subordinating conjunction"),
    ("PRT", "particle"),
    ("PNP", "prepositional noun phrase"),
];

/// Descrição de um rótulo qualquer.
///
/// A correspondência exata tem prioridade, na ordem classe grossa, tag fina,
/// entidade, dependência; depois vale a forma sem distinção de caixa
/// (`"propn"`, `"person"`). Assim `"PUNCT"` é a classe grossa e `"punct"` o
/// rótulo de dependência.
///
/// ```rust
/// use textlab_core::glossary::explain;
///
/// assert_eq!(explain("GPE"), Some("Countries, cities, states"));
/// assert_eq!(explain("nsubj"), Some("nominal subject"));
/// assert_eq!(explain("ZZZ"), None);
/// ```
pub fn explain(label: &str) -> Option<&'static str> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    if let Some(pos) = Pos::ALL.iter().find(|p| p.as_str() == label) {
        return Some(pos.description());
    }
    if let Some(tag) = FineTag::from_label(label) {
        return Some(tag.description());
    }
    if let Some(ent) = EntityLabel::from_label(label) {
        return Some(ent.description());
    }
    if let Some(dep) = DepLabel::from_label(label) {
        return Some(dep.description());
    }
    if let Some((_, text)) = PHRASES.iter().find(|(name, _)| *name == label) {
        return Some(text);
    }

    let upper = label.to_uppercase();
    Pos::from_label(&upper)
        .map(|p| p.description())
        .or_else(|| FineTag::from_label(&upper).map(|t| t.description()))
        .or_else(|| EntityLabel::from_label(&upper).map(|e| e.description()))
        .or_else(|| {
            PHRASES
                .iter()
                .find(|(name, _)| *name == upper)
                .map(|(_, text)| *text)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_each_label_family() {
        assert_eq!(explain("PROPN"), Some("proper noun"));
        assert_eq!(explain("VBD"), Some("verb, past tense"));
        assert_eq!(explain("ORG"), Some("Companies, agencies, institutions, etc."));
        assert_eq!(explain("dobj"), Some("direct object"));
        assert_eq!(explain("NP"), Some("noun phrase"));
    }

    #[test]
    fn test_case_sensitivity_prefers_exact_family() {
        assert_eq!(explain("PUNCT"), Some("punctuation"));
        assert_eq!(explain("propn"), Some("proper noun"));
        assert_eq!(explain("person"), Some("People, including fictional"));
        assert_eq!(explain("ROOT"), explain("root"));
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(explain(""), None);
        assert_eq!(explain("   "), None);
        assert_eq!(explain("NOT_A_LABEL"), None);
    }
}
