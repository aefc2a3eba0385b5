//! # Reconhecedor de Entidades (modo híbrido)
//!
//! Combina o [`RuleEngine`] com um CRF sobre tags BIO:
//!
//! 1. as regras rodam primeiro e **travam** os tokens que reconhecem: a tag
//!    da regra ganha um bônus grande e todas as outras uma penalidade igual;
//! 2. os demais tokens são pontuados pelo CRF (ortografia + POS);
//! 3. o Viterbi decodifica a sequência, respeitando a gramática BIO;
//! 4. as tags viram spans de entidade.
//!
//! Cada sentença é decodificada separadamente, então nenhuma entidade cruza
//! uma fronteira de sentença.

use crate::crf::{compute_emission_scores, CrfModel, Label};
use crate::doc::{Entity, Span, Token};
use crate::entity::{bio_to_spans, BioTag};
use crate::features::extract_ner_features;
use crate::rule_based::{RuleEngine, RuleMatch};
use crate::viterbi::viterbi_decode;

/// Peso que fixa a tag escolhida por uma regra
const RULE_LOCK: f64 = 50.0;

/// Resultado do reconhecimento de uma sentença
#[derive(Debug, Clone)]
pub struct SentenceEntities {
    pub entities: Vec<Entity>,
    /// Correspondências de regra, com índices globais
    pub rule_matches: Vec<RuleMatch>,
    pub tags: Vec<BioTag>,
}

/// Reconhecedor híbrido regras + CRF
#[derive(Debug, Clone)]
pub struct EntityRecognizer {
    model: CrfModel<BioTag>,
    rules: RuleEngine,
}

impl EntityRecognizer {
    pub fn new(model: CrfModel<BioTag>, rules: RuleEngine) -> Self {
        Self { model, rules }
    }

    /// Entidades do documento inteiro, em ordem
    pub fn recognize(&self, tokens: &[Token], sentences: &[Span]) -> Vec<Entity> {
        sentences
            .iter()
            .flat_map(|sent| self.recognize_sentence(tokens, sent).entities)
            .collect()
    }

    /// Decodifica uma sentença; índices do resultado são globais
    pub fn recognize_sentence(&self, tokens: &[Token], sent: &Span) -> SentenceEntities {
        let toks = &tokens[sent.start..sent.end.min(tokens.len())];
        if toks.is_empty() {
            return SentenceEntities {
                entities: vec![],
                rule_matches: vec![],
                tags: vec![],
            };
        }

        let rule_matches = self.rules.apply(toks);
        let mut locked: Vec<Option<BioTag>> = vec![None; toks.len()];
        for m in &rule_matches {
            locked[m.start] = Some(BioTag::Begin(m.label));
            for slot in &mut locked[m.start + 1..m.end] {
                *slot = Some(BioTag::Inside(m.label));
            }
        }

        let features: Vec<_> = (0..toks.len())
            .map(|i| extract_ner_features(toks, i))
            .collect();
        let mut emission = compute_emission_scores(&self.model, &features);
        let labels = BioTag::all();
        for (i, row) in emission.iter_mut().enumerate() {
            for (score, tag) in row.iter_mut().zip(&labels) {
                if let Some(lock) = locked[i] {
                    *score += if *tag == lock { RULE_LOCK } else { -RULE_LOCK };
                }
                // Uma sentença não começa no meio de uma entidade
                if i == 0 && matches!(tag, BioTag::Inside(_)) {
                    *score -= RULE_LOCK;
                }
            }
        }

        let decoded = viterbi_decode(&self.model, &emission);
        let entities = bio_to_spans(&decoded.best_sequence)
            .into_iter()
            .map(|(start, end, label)| Entity {
                start: sent.start + start,
                end: sent.start + end,
                label,
            })
            .collect();

        SentenceEntities {
            entities,
            rule_matches: rule_matches
                .into_iter()
                .map(|m| RuleMatch {
                    start: sent.start + m.start,
                    end: sent.start + m.end,
                    ..m
                })
                .collect(),
            tags: decoded.best_sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityLabel;
    use crate::model::{build_ner_model, build_rule_engine};
    use crate::tagger::{FineTag, Pos};

    fn token(text: &str, start: usize, i: usize, tag: FineTag, pos: Pos) -> Token {
        let mut t = Token::bare(text, start, true, i);
        t.tag = tag;
        t.pos = pos;
        t
    }

    fn recognizer() -> EntityRecognizer {
        EntityRecognizer::new(build_ner_model(), build_rule_engine())
    }

    #[test]
    fn test_rule_locked_names() {
        let tokens = vec![
            token("Tom", 0, 0, FineTag::Nnp, Pos::Propn),
            token("met", 4, 1, FineTag::Vbd, Pos::Verb),
            token("Sam", 8, 2, FineTag::Nnp, Pos::Propn),
            token(".", 11, 3, FineTag::Period, Pos::Punct),
        ];
        let ents = recognizer().recognize(&tokens, &[Span::new(0, 4)]);
        assert_eq!(
            ents,
            vec![
                Entity { start: 0, end: 1, label: EntityLabel::Person },
                Entity { start: 2, end: 3, label: EntityLabel::Person },
            ]
        );
    }

    #[test]
    fn test_unknown_proper_noun_falls_back_to_crf() {
        let tokens = vec![
            token("the", 0, 0, FineTag::Dt, Pos::Det),
            token("Zyphor", 4, 1, FineTag::Nnp, Pos::Propn),
            token("Labs", 11, 2, FineTag::Nnps, Pos::Propn),
            token("team", 16, 3, FineTag::Nn, Pos::Noun),
        ];
        let result = recognizer().recognize_sentence(&tokens, &Span::new(0, 4));
        // "Labs" é sufixo corporativo
        assert_eq!(
            result.entities,
            vec![Entity { start: 1, end: 3, label: EntityLabel::Org }]
        );
        assert_eq!(result.tags[0], BioTag::Outside);
        assert_eq!(result.tags[3], BioTag::Outside);

        let plain = vec![
            token("we", 0, 0, FineTag::Prp, Pos::Pron),
            token("visited", 3, 1, FineTag::Vbd, Pos::Verb),
            token("Quorvia", 11, 2, FineTag::Nnp, Pos::Propn),
        ];
        let ents = recognizer().recognize(&plain, &[Span::new(0, 3)]);
        assert_eq!(ents.len(), 1);
        assert_eq!((ents[0].start, ents[0].end), (2, 3));
    }

    #[test]
    fn test_entities_stay_inside_sentences() {
        let tokens = vec![
            token("Paris", 0, 0, FineTag::Nnp, Pos::Propn),
            token("London", 6, 1, FineTag::Nnp, Pos::Propn),
        ];
        let ents = recognizer().recognize(&tokens, &[Span::new(0, 1), Span::new(1, 2)]);
        assert_eq!(ents.len(), 2);
        assert_eq!((ents[0].start, ents[0].end), (0, 1));
        assert_eq!((ents[1].start, ents[1].end), (1, 2));
        assert!(ents.iter().all(|e| e.label == EntityLabel::Gpe));
    }
}
