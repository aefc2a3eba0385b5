//! # Tipos de Entidade e Esquema BIO
//!
//! Define os rótulos de entidade (conjunto OntoNotes 5, o mesmo usado pelos
//! modelos de inglês mais difundidos) e o esquema de anotação **BIO**
//! (Beginning-Inside-Outside) usado pelo reconhecedor de entidades.
//!
//! ## Rótulos
//!
//! | Rótulo      | Significado                         | Exemplos                      |
//! |-------------|-------------------------------------|-------------------------------|
//! | PERSON      | Pessoas, inclusive fictícias        | Tom, Ada Lovelace             |
//! | NORP        | Nacionalidades, grupos religiosos   | American, Buddhist            |
//! | FAC         | Construções, aeroportos, pontes     | Golden Gate Bridge            |
//! | ORG         | Empresas, agências, instituições    | Apple, NASA                   |
//! | GPE         | Países, cidades, estados            | London, U.K.                  |
//! | LOC         | Locais não-GPE                      | Mount Everest, Europe         |
//! | PRODUCT     | Objetos, veículos, alimentos        | iPhone                        |
//! | EVENT       | Furacões, batalhas, eventos         | World War II                  |
//! | WORK_OF_ART | Livros, canções                     | Hamlet                        |
//! | LAW         | Documentos transformados em lei     | First Amendment               |
//! | LANGUAGE    | Idiomas                             | English                       |
//! | DATE        | Datas absolutas ou relativas        | June 2024, yesterday          |
//! | TIME        | Horários                            | 10:30, 5 pm                   |
//! | PERCENT     | Porcentagens                        | 25%                           |
//! | MONEY       | Valores monetários                  | $1 billion                    |
//! | QUANTITY    | Medidas de peso ou distância        | 5 km                          |
//! | ORDINAL     | "first", "second"...                | third                         |
//! | CARDINAL    | Numerais que não cabem acima        | three, 42                     |
//!
//! ## Esquema BIO
//!
//! - `B-X`: primeiro token de uma entidade do tipo X
//! - `I-X`: tokens seguintes da mesma entidade
//! - `O`: fora de qualquer entidade

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crf::Label;

/// Rótulos de entidade reconhecidos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    Norp,
    Fac,
    Org,
    Gpe,
    Loc,
    Product,
    Event,
    WorkOfArt,
    Law,
    Language,
    Date,
    Time,
    Percent,
    Money,
    Quantity,
    Ordinal,
    Cardinal,
}

impl EntityLabel {
    /// Todos os rótulos, na ordem dos índices BIO
    pub const ALL: [EntityLabel; 18] = [
        EntityLabel::Person,
        EntityLabel::Norp,
        EntityLabel::Fac,
        EntityLabel::Org,
        EntityLabel::Gpe,
        EntityLabel::Loc,
        EntityLabel::Product,
        EntityLabel::Event,
        EntityLabel::WorkOfArt,
        EntityLabel::Law,
        EntityLabel::Language,
        EntityLabel::Date,
        EntityLabel::Time,
        EntityLabel::Percent,
        EntityLabel::Money,
        EntityLabel::Quantity,
        EntityLabel::Ordinal,
        EntityLabel::Cardinal,
    ];

    /// Nome do rótulo (ex: "PERSON", "WORK_OF_ART")
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Norp => "NORP",
            EntityLabel::Fac => "FAC",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Loc => "LOC",
            EntityLabel::Product => "PRODUCT",
            EntityLabel::Event => "EVENT",
            EntityLabel::WorkOfArt => "WORK_OF_ART",
            EntityLabel::Law => "LAW",
            EntityLabel::Language => "LANGUAGE",
            EntityLabel::Date => "DATE",
            EntityLabel::Time => "TIME",
            EntityLabel::Percent => "PERCENT",
            EntityLabel::Money => "MONEY",
            EntityLabel::Quantity => "QUANTITY",
            EntityLabel::Ordinal => "ORDINAL",
            EntityLabel::Cardinal => "CARDINAL",
        }
    }

    /// Tenta parsear a partir do nome (ex: "GPE" → Some(Gpe))
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.as_str() == s)
    }

    /// Descrição em inglês, no estilo dos glossários de anotação
    pub fn description(&self) -> &'static str {
        match self {
            EntityLabel::Person => "People, including fictional",
            EntityLabel::Norp => "Nationalities or religious or political groups",
            EntityLabel::Fac => "Buildings, airports, highways, bridges, etc.",
            EntityLabel::Org => "Companies, agencies, institutions, etc.",
            EntityLabel::Gpe => "Countries, cities, states",
            EntityLabel::Loc => "Non-GPE locations, mountain ranges, bodies of water",
            EntityLabel::Product => "Objects, vehicles, foods, etc. (not services)",
            EntityLabel::Event => "Named hurricanes, battles, wars, sports events, etc.",
            EntityLabel::WorkOfArt => "Titles of books, songs, etc.",
            EntityLabel::Law => "Named documents made into laws.",
            EntityLabel::Language => "Any named language",
            EntityLabel::Date => "Absolute or relative dates or periods",
            EntityLabel::Time => "Times smaller than a day",
            EntityLabel::Percent => "Percentage, including \"%\"",
            EntityLabel::Money => "Monetary values, including unit",
            EntityLabel::Quantity => "Measurements, as of weight or distance",
            EntityLabel::Ordinal => "\"first\", \"second\", etc.",
            EntityLabel::Cardinal => "Numerals that do not fall under another type",
        }
    }

    /// Cor CSS padrão para highlight na visualização de entidades
    pub fn color(&self) -> &'static str {
        match self {
            EntityLabel::Person => "#aa9cfc",
            EntityLabel::Norp => "#c887fb",
            EntityLabel::Fac => "#9cc9cc",
            EntityLabel::Org => "#7aecec",
            EntityLabel::Gpe => "#feca74",
            EntityLabel::Loc => "#ff9561",
            EntityLabel::Product => "#bfeeb7",
            EntityLabel::Event => "#ffeb80",
            EntityLabel::WorkOfArt => "#f0d0ff",
            EntityLabel::Law => "#ff8197",
            EntityLabel::Language => "#ff8197",
            EntityLabel::Date
            | EntityLabel::Time
            | EntityLabel::Percent
            | EntityLabel::Money
            | EntityLabel::Quantity
            | EntityLabel::Ordinal
            | EntityLabel::Cardinal => "#bfe1d9",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag BIO aplicada a um token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BioTag {
    /// **Begin**: início de uma entidade. Ex: **New** (B-GPE) York.
    Begin(EntityLabel),
    /// **Inside**: continuação da entidade. Ex: New **York** (I-GPE).
    Inside(EntityLabel),
    /// **Outside**: o token não faz parte de nenhuma entidade.
    Outside,
}

impl BioTag {
    /// Representação textual da tag (ex: "B-PERSON", "I-ORG", "O")
    pub fn label(&self) -> String {
        match self {
            BioTag::Begin(l) => format!("B-{l}"),
            BioTag::Inside(l) => format!("I-{l}"),
            BioTag::Outside => "O".to_string(),
        }
    }

    /// Rótulo da entidade (se for B- ou I-)
    pub fn entity(&self) -> Option<EntityLabel> {
        match self {
            BioTag::Begin(l) | BioTag::Inside(l) => Some(*l),
            BioTag::Outside => None,
        }
    }

    /// Parseia uma tag a partir de string (ex: "B-GPE" → Begin(Gpe))
    pub fn from_label(s: &str) -> Option<Self> {
        if s == "O" {
            return Some(BioTag::Outside);
        }
        let (prefix, name) = s.split_once('-')?;
        let label = EntityLabel::from_label(name)?;
        match prefix {
            "B" => Some(BioTag::Begin(label)),
            "I" => Some(BioTag::Inside(label)),
            _ => None,
        }
    }
}

impl Label for BioTag {
    const COUNT: usize = 1 + 2 * EntityLabel::ALL.len();

    /// `O` = 0, `B-X` = 1 + 2k, `I-X` = 2 + 2k (k = posição de X em [`EntityLabel::ALL`])
    fn index(&self) -> usize {
        match self {
            BioTag::Outside => 0,
            BioTag::Begin(l) => 1 + 2 * (*l as usize),
            BioTag::Inside(l) => 2 + 2 * (*l as usize),
        }
    }

    fn all() -> Vec<Self> {
        let mut tags = vec![BioTag::Outside];
        for label in EntityLabel::ALL {
            tags.push(BioTag::Begin(label));
            tags.push(BioTag::Inside(label));
        }
        tags
    }

    fn name(&self) -> String {
        self.label()
    }

    /// `I-X` só pode seguir `B-X` ou `I-X` (mesmo rótulo)
    fn is_valid_transition(prev: &Self, next: &Self) -> bool {
        match next {
            BioTag::Inside(label) => match prev {
                BioTag::Begin(p) | BioTag::Inside(p) => p == label,
                BioTag::Outside => false,
            },
            _ => true,
        }
    }
}

impl fmt::Display for BioTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Converte uma sequência de tags BIO em spans `(start, end, label)` de tokens,
/// com `end` exclusivo.
///
/// Um `I-X` órfão (sem `B-X` antes) abre uma nova entidade, como faria um
/// anotador tolerante.
///
/// # Exemplo
/// `[B-PERSON, I-PERSON, O, B-GPE]` → `[(0, 2, PERSON), (3, 4, GPE)]`
pub fn bio_to_spans(tags: &[BioTag]) -> Vec<(usize, usize, EntityLabel)> {
    let mut spans = Vec::new();
    let mut current: Option<(usize, EntityLabel)> = None;

    for (i, tag) in tags.iter().enumerate() {
        match (tag, current) {
            (BioTag::Inside(l), Some((_, open))) if *l == open => {}
            (BioTag::Begin(l) | BioTag::Inside(l), _) => {
                if let Some((start, open)) = current.take() {
                    spans.push((start, i, open));
                }
                current = Some((i, *l));
            }
            (BioTag::Outside, _) => {
                if let Some((start, open)) = current.take() {
                    spans.push((start, i, open));
                }
            }
        }
    }
    if let Some((start, open)) = current {
        spans.push((start, tags.len(), open));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_labels() {
        assert_eq!(BioTag::Outside.label(), "O");
        assert_eq!(BioTag::Begin(EntityLabel::Person).label(), "B-PERSON");
        assert_eq!(BioTag::Inside(EntityLabel::WorkOfArt).label(), "I-WORK_OF_ART");
    }

    #[test]
    fn test_valid_transitions() {
        let b_per = BioTag::Begin(EntityLabel::Person);
        let i_per = BioTag::Inside(EntityLabel::Person);
        let i_org = BioTag::Inside(EntityLabel::Org);
        assert!(BioTag::is_valid_transition(&b_per, &i_per));
        assert!(!BioTag::is_valid_transition(&BioTag::Outside, &i_per));
        assert!(!BioTag::is_valid_transition(&b_per, &i_org));
    }

    #[test]
    fn test_tag_from_label() {
        assert_eq!(BioTag::from_label("O"), Some(BioTag::Outside));
        assert_eq!(BioTag::from_label("B-GPE"), Some(BioTag::Begin(EntityLabel::Gpe)));
        assert_eq!(BioTag::from_label("X-GPE"), None);
        assert_eq!(BioTag::from_label("B-NOPE"), None);
    }

    #[test]
    fn test_all_tags_have_unique_indices() {
        let all = BioTag::all();
        assert_eq!(all.len(), BioTag::COUNT);
        for (i, tag) in all.iter().enumerate() {
            assert_eq!(tag.index(), i);
        }
    }

    #[test]
    fn test_entity_label_serde_names() {
        let json = serde_json::to_string(&EntityLabel::WorkOfArt).unwrap();
        assert_eq!(json, "\"WORK_OF_ART\"");
        for label in EntityLabel::ALL {
            assert_eq!(EntityLabel::from_label(label.as_str()), Some(label));
        }
    }

    #[test]
    fn test_bio_to_spans() {
        let tags = [
            BioTag::Begin(EntityLabel::Person),
            BioTag::Inside(EntityLabel::Person),
            BioTag::Outside,
            BioTag::Begin(EntityLabel::Gpe),
        ];
        assert_eq!(
            bio_to_spans(&tags),
            vec![(0, 2, EntityLabel::Person), (3, 4, EntityLabel::Gpe)]
        );
    }

    #[test]
    fn test_bio_to_spans_orphan_inside() {
        let tags = [
            BioTag::Outside,
            BioTag::Inside(EntityLabel::Org),
            BioTag::Begin(EntityLabel::Org),
        ];
        assert_eq!(
            bio_to_spans(&tags),
            vec![(1, 2, EntityLabel::Org), (2, 3, EntityLabel::Org)]
        );
    }
}
