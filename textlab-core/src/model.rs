//! # Modelos Embutidos e Carregamento
//!
//! O único modelo instalado é o `en_core_lite` (alias `en`): um pipeline de
//! inglês cujos pesos foram definidos à mão a partir de intuições
//! linguísticas, no lugar de um treino por máxima verossimilhança.
//!
//! - **Tagger**: CRF sobre as 50 tags Penn Treebank. As emissões vêm do
//!   léxico (ordem das leituras) e de duas features de contexto; as
//!   transições codificam a sintaxe local ("DT → NN", "MD → VB", "TO → VB").
//! - **NER**: CRF sobre tags BIO com os 18 rótulos OntoNotes, mais o motor de
//!   regras com gazetteers de inglês.
//!
//! Qualquer outro identificador falha com [`Error::ModelNotFound`].

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::crf::CrfModel;
use crate::doc::Component;
use crate::entity::{BioTag, EntityLabel};
use crate::error::{Error, Result};
use crate::pipeline::{EnglishPipeline, Pipeline};
use crate::rule_based::RuleEngine;
use crate::tagger::FineTag;

/// Identificador do modelo padrão
pub const DEFAULT_MODEL: &str = "en_core_lite";

/// Identificadores aceitos → nome canônico
const INSTALLED: &[(&str, &str)] = &[("en_core_lite", "en_core_lite"), ("en", "en_core_lite")];

/// Metadados de um modelo carregado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    pub name: String,
    pub lang: String,
    pub version: String,
    pub description: String,
    /// Componentes ativos, na ordem de execução
    pub pipeline: Vec<Component>,
}

/// Opções de carregamento: componentes desligados.
///
/// Desligar um componente desliga também os que dependem dele
/// (lematizador, parser e NER dependem do tagger).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadOptions {
    pub disable: Vec<Component>,
}

impl LoadOptions {
    pub fn disable(mut self, component: Component) -> Self {
        if !self.disable.contains(&component) {
            self.disable.push(component);
        }
        self
    }

    /// Componentes que efetivamente rodam
    pub fn active_components(&self) -> Vec<Component> {
        let tagger = !self.disable.contains(&Component::Tagger);
        Component::ALL
            .iter()
            .copied()
            .filter(|c| !self.disable.contains(c))
            .filter(|c| *c == Component::Tagger || tagger)
            .collect()
    }
}

/// Modelos instalados (nomes canônicos)
pub fn installed_models() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = INSTALLED.iter().map(|(_, name)| *name).collect();
    names.dedup();
    names
}

/// Nome canônico de um identificador, se estiver instalado
pub fn resolve_model_id(model_id: &str) -> Option<&'static str> {
    INSTALLED
        .iter()
        .find(|(id, _)| *id == model_id)
        .map(|(_, name)| *name)
}

/// Carrega um pipeline completo pelo identificador
pub fn load(model_id: &str) -> Result<Box<dyn Pipeline>> {
    load_with(model_id, LoadOptions::default())
}

/// Carrega um pipeline com componentes desligados
pub fn load_with(model_id: &str, options: LoadOptions) -> Result<Box<dyn Pipeline>> {
    let Some(name) = resolve_model_id(model_id) else {
        warn!("modelo '{model_id}' não instalado");
        return Err(Error::ModelNotFound(model_id.to_string()));
    };

    let active = options.active_components();
    let dropped: Vec<&str> = Component::ALL
        .iter()
        .filter(|c| !active.contains(c) && !options.disable.contains(c))
        .map(|c| c.name())
        .collect();
    if !dropped.is_empty() {
        warn!("componentes desligados por dependerem do tagger: {}", dropped.join(", "));
    }

    let meta = ModelMeta {
        name: name.to_string(),
        lang: "en".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "English pipeline with lexicon + CRF tagger, rule-based lemmatizer, \
                      rule-based dependency parser and hybrid NER"
            .to_string(),
        pipeline: active,
    };
    info!(
        "modelo '{}' carregado (componentes: {})",
        meta.name,
        meta.pipeline.iter().map(|c| c.name()).collect::<Vec<_>>().join(", ")
    );
    Ok(Box::new(EnglishPipeline::new(meta)))
}

const NOMINALS: [FineTag; 4] = [FineTag::Nn, FineTag::Nns, FineTag::Nnp, FineTag::Nnps];

const VERBS: [FineTag; 6] = [
    FineTag::Vb,
    FineTag::Vbd,
    FineTag::Vbg,
    FineTag::Vbn,
    FineTag::Vbp,
    FineTag::Vbz,
];

/// Verbos finitos e modal: o que pode seguir um sujeito
const FINITE: [FineTag; 4] = [FineTag::Vbz, FineTag::Vbd, FineTag::Vbp, FineTag::Md];

fn set_all(model: &mut CrfModel<FineTag>, from: &[FineTag], to: &[FineTag], weight: f64) {
    for prev in from {
        for next in to {
            model.set_transition(prev, next, weight);
        }
    }
}

/// CRF do POS tagger.
///
/// As emissões principais vêm dos priors do léxico (no tagger); aqui ficam
/// as transições e as features de contexto verbal.
pub fn build_tagger_model() -> CrfModel<FineTag> {
    use FineTag::*;

    let mut model = CrfModel::new();

    // Determinantes abrem sintagmas nominais
    let nominal_modifiers = [Nn, Nns, Nnp, Nnps, Jj, Jjr, Jjs, Cd];
    set_all(&mut model, &[Dt, PrpS, Pdt], &nominal_modifiers, 2.0);
    set_all(&mut model, &[Dt], &VERBS, -3.0);
    set_all(&mut model, &[Dt], &[Md], -3.0);
    model.set_transition(&Dt, &Prp, -2.0);

    // Adjetivos
    set_all(&mut model, &[Jj], &NOMINALS, 1.5);
    model.set_transition(&Jj, &Jj, 0.5);
    set_all(&mut model, &[Jj], &[Vb, Vbp], -1.0);

    // Pronomes sujeito
    set_all(&mut model, &[Prp, Ex], &FINITE, 2.0);
    model.set_transition(&Prp, &Vb, -1.0);
    set_all(&mut model, &[Prp], &[Nn, Nns], -1.0);

    // Infinitivo e modais
    model.set_transition(&To, &Vb, 3.0);
    set_all(&mut model, &[To], &[Vbz, Vbd, Vbp, Vbn], -2.0);
    model.set_transition(&Md, &Vb, 3.0);
    set_all(&mut model, &[Md], &[Vbz, Vbd, Vbp, Vbn, Vbg], -3.0);

    // Sujeito nominal → verbo finito, com concordância
    set_all(&mut model, &NOMINALS, &FINITE, 1.0);
    model.add_transition(&Nns, &Vbz, -0.5);
    model.add_transition(&Nn, &Vbp, -0.5);
    model.add_transition(&Nnp, &Vbp, -0.5);
    model.set_transition(&Nn, &Nns, -0.5);

    // Preposições pedem sintagma nominal
    set_all(&mut model, &[In], &[Nn, Nns, Nnp, Nnps, Dt, Prp, PrpS, Jj, Cd], 1.0);
    set_all(&mut model, &[In], &VERBS, -1.5);

    // Relativos
    set_all(&mut model, &[Wdt, Wp], &FINITE, 1.5);

    // Complementos do verbo
    set_all(&mut model, &VERBS, &[Dt, Nn, Nns, Nnp, Prp, PrpS, Jj, In, Rb], 0.5);
    let verbs_and_adjective = [Vb, Vbd, Vbg, Vbn, Vbp, Vbz, Jj];
    set_all(&mut model, &[Rb], &verbs_and_adjective, 0.5);

    // Possessivo
    set_all(&mut model, &NOMINALS, &[Possessive], 1.0);
    model.set_transition(&Prp, &Possessive, -2.0);
    set_all(&mut model, &NOMINALS, &[Wdt], 1.0);

    // Particípio depois de "have", gerúndio/particípio depois de "be"
    model.set_emission("prev_have", &Vbn, 3.0);
    model.set_emission("prev_have", &Vbd, -1.0);
    model.set_emission("prev_be", &Vbn, 1.5);
    model.set_emission("prev_be", &Vbg, 1.0);

    model
}

/// CRF do reconhecedor de entidades (tags BIO).
pub fn build_ner_model() -> CrfModel<BioTag> {
    let mut model = CrfModel::new();
    let outside = BioTag::Outside;

    model.set_emission("bias", &outside, 2.0);
    model.set_emission("is_lower", &outside, 3.0);
    model.set_emission("is_punct", &outside, 6.0);

    // Nome próprio sem regra: ORG > PERSON > GPE
    model.set_emission("pos=PROPN", &outside, -2.0);
    let propn_weights = [
        (EntityLabel::Org, 2.0, 1.5),
        (EntityLabel::Person, 1.6, 1.5),
        (EntityLabel::Gpe, 1.4, 1.2),
    ];
    for (label, begin, inside) in propn_weights {
        model.set_emission("pos=PROPN", &BioTag::Begin(label), begin);
        model.set_emission("pos=PROPN", &BioTag::Inside(label), inside);
    }

    model.set_transition(&outside, &outside, 1.0);
    for label in EntityLabel::ALL {
        let begin = BioTag::Begin(label);
        let inside = BioTag::Inside(label);
        model.set_transition(&begin, &inside, 3.0);
        model.set_transition(&inside, &inside, 2.5);
        model.set_transition(&begin, &outside, 0.5);
        model.set_transition(&inside, &outside, 0.5);
    }

    model
}

const GPE: &[&str] = &[
    "U.S.", "U.K.", "US", "USA", "UK", "United States", "United States of America",
    "United Kingdom", "America", "England", "Britain", "Great Britain", "Scotland", "Wales",
    "Ireland", "France", "Germany", "Italy", "Spain", "Portugal", "Netherlands", "Belgium",
    "Switzerland", "Austria", "Sweden", "Norway", "Denmark", "Finland", "Poland", "Greece",
    "Ukraine", "Russia", "China", "Japan", "India", "Korea", "South Korea", "North Korea",
    "Canada", "Mexico", "Brazil", "Argentina", "Chile", "Peru", "Colombia", "Australia",
    "New Zealand", "Egypt", "Nigeria", "Kenya", "South Africa", "Israel", "Iran", "Iraq",
    "Saudi Arabia", "Pakistan", "Indonesia", "Vietnam", "Thailand", "Singapore", "London",
    "Paris", "Berlin", "Madrid", "Rome", "Lisbon", "Amsterdam", "Vienna", "Moscow", "Kyiv",
    "Beijing", "Shanghai", "Tokyo", "Seoul", "Mumbai", "Delhi", "New Delhi", "Sydney",
    "Toronto", "Vancouver", "Montreal", "New York", "New York City", "Los Angeles",
    "San Francisco", "Chicago", "Boston", "Seattle", "Miami", "Houston", "Dallas", "Austin",
    "Atlanta", "Washington", "Washington D.C.", "Hong Kong", "Dubai", "Cairo", "Lagos",
    "Nairobi", "California", "Texas", "Florida", "Ohio", "Oregon", "Nevada", "Cupertino",
];

const ORG: &[&str] = &[
    "Apple", "Google", "Alphabet", "Microsoft", "Amazon", "Facebook", "Meta", "Netflix",
    "Tesla", "SpaceX", "IBM", "Intel", "Nvidia", "Samsung", "Sony", "Toyota", "Volkswagen",
    "Boeing", "Airbus", "Uber", "Airbnb", "Twitter", "OpenAI", "Anthropic", "NASA", "FBI",
    "CIA", "NATO", "UN", "United Nations", "European Union", "EU", "World Bank",
    "World Health Organization", "Red Cross", "Harvard", "Harvard University", "MIT", "Stanford",
    "Oxford", "Cambridge", "BBC", "CNN", "Reuters", "New York Times", "Wall Street Journal",
    "Congress", "Senate", "Parliament", "Supreme Court", "Federal Reserve", "Walmart",
    "Coca-Cola", "Pepsi", "McDonald's", "Starbucks", "Goldman Sachs", "JPMorgan",
];

const NORP: &[&str] = &[
    "American", "Americans", "British", "English", "French", "German", "Germans", "Italian",
    "Spanish", "Portuguese", "Dutch", "Swedish", "Russian", "Russians", "Chinese", "Japanese",
    "Korean", "Indian", "Canadian", "Mexican", "Brazilian", "Australian", "European",
    "Europeans", "African", "Asian", "Christian", "Christians", "Muslim", "Muslims", "Jewish",
    "Buddhist", "Hindu", "Catholic", "Protestant", "Democrat", "Democrats", "Republican",
    "Republicans", "Democratic", "Republican Party",
];

const LOC: &[&str] = &[
    "Europe", "Asia", "Africa", "Antarctica", "North America", "South America",
    "Latin America", "Middle East", "Mount Everest", "Everest", "Alps", "Himalayas",
    "Sahara", "Pacific", "Pacific Ocean", "Atlantic", "Atlantic Ocean", "Indian Ocean",
    "Mediterranean", "Amazon River", "Nile", "Thames", "Silicon Valley", "Mars", "Moon",
];

const FAC: &[&str] = &[
    "Golden Gate Bridge", "Eiffel Tower", "Empire State Building", "Statue of Liberty",
    "White House", "Heathrow Airport", "JFK Airport", "Big Ben", "Colosseum", "Louvre",
];

const EVENT: &[&str] = &[
    "World War I", "World War II", "World Cup", "Olympics", "Olympic Games", "Super Bowl",
    "Hurricane Katrina", "Cold War", "Brexit", "Renaissance",
];

const PRODUCT: &[&str] = &[
    "iPhone", "iPad", "MacBook", "Windows", "Android", "Kindle", "PlayStation", "Xbox",
    "ChatGPT", "Model S", "Model 3", "Boeing 747",
];

const WORK_OF_ART: &[&str] = &[
    "Hamlet", "Macbeth", "Mona Lisa", "Star Wars", "The Great Gatsby", "Moby Dick",
    "Pride and Prejudice", "War and Peace", "The Beatles",
];

const LAW: &[&str] = &[
    "First Amendment", "Second Amendment", "Constitution", "Bill of Rights",
    "Civil Rights Act", "GDPR", "Magna Carta",
];

const LANGUAGE: &[&str] = &[
    "Mandarin", "Latin", "Esperanto", "Swahili", "Hindi", "Arabic", "Bengali", "Tagalog",
];

const FIRST_NAMES: &[&str] = &[
    "Tom", "Sam", "John", "Mary", "James", "Michael", "David", "Robert", "William", "Richard",
    "Joseph", "Thomas", "Charles", "Daniel", "Matthew", "Anthony", "Mark", "Paul", "Peter",
    "George", "Kevin", "Brian", "Jeff", "Tim", "Steve", "Bill", "Elon", "Barack", "Donald",
    "Joe", "Kamala", "Hillary", "Angela", "Emmanuel", "Boris", "Vladimir", "Alan", "Ada",
    "Grace", "Marie", "Albert", "Isaac", "Charlie", "Jennifer", "Linda", "Elizabeth",
    "Susan", "Jessica", "Sarah", "Karen", "Nancy", "Lisa", "Emma", "Olivia", "Sophia",
    "Alice", "Bob", "Carol", "Dave", "Eve", "Frank", "Henry", "Jack", "Kate", "Laura",
    "Lucy", "Max", "Nick", "Oliver", "Rachel", "Anna", "Jane", "Emily", "Chris", "Ben",
    "Tony", "Harry", "Hermione", "Ron", "Sherlock", "Taylor", "Serena", "Lionel",
    "Cristiano", "Sundar", "Satya", "Mark", "Jeffrey", "Warren", "Oprah",
];

/// Motor de regras com os gazetteers de inglês
pub fn build_rule_engine() -> RuleEngine {
    let mut engine = RuleEngine::new();
    let lists: [(&[&str], EntityLabel); 10] = [
        (GPE, EntityLabel::Gpe),
        (ORG, EntityLabel::Org),
        (NORP, EntityLabel::Norp),
        (LOC, EntityLabel::Loc),
        (FAC, EntityLabel::Fac),
        (EVENT, EntityLabel::Event),
        (PRODUCT, EntityLabel::Product),
        (WORK_OF_ART, EntityLabel::WorkOfArt),
        (LAW, EntityLabel::Law),
        (LANGUAGE, EntityLabel::Language),
    ];
    for (names, label) in lists {
        for name in names {
            engine.add_phrase(name, label);
        }
    }
    for name in FIRST_NAMES {
        engine.add_first_name(name);
    }
    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crf::Label;

    #[test]
    fn test_load_known_model() {
        let nlp = load("en_core_lite").unwrap();
        assert_eq!(nlp.meta().name, "en_core_lite");
        assert_eq!(nlp.meta().lang, "en");
        assert_eq!(nlp.pipe_names(), vec!["tagger", "lemmatizer", "parser", "ner"]);

        let alias = load("en").unwrap();
        assert_eq!(alias.meta().name, "en_core_lite");
    }

    #[test]
    fn test_load_unknown_model() {
        let err = load("en_core_web_sm").err().unwrap();
        assert!(matches!(err, Error::ModelNotFound(ref id) if id == "en_core_web_sm"));
        assert!(matches!(load(""), Err(Error::ModelNotFound(_))));
    }

    #[test]
    fn test_disabling_tagger_drops_dependents() {
        let options = LoadOptions::default().disable(Component::Tagger);
        assert!(options.active_components().is_empty());

        let options = LoadOptions::default().disable(Component::Ner);
        assert_eq!(
            options.active_components(),
            vec![Component::Tagger, Component::Lemmatizer, Component::Parser]
        );
        let nlp = load_with("en", options).unwrap();
        assert_eq!(nlp.pipe_names(), vec!["tagger", "lemmatizer", "parser"]);
    }

    #[test]
    fn test_installed_models() {
        assert_eq!(installed_models(), vec!["en_core_lite"]);
        assert_eq!(resolve_model_id("en"), Some("en_core_lite"));
        assert_eq!(resolve_model_id("pt_core"), None);
    }

    #[test]
    fn test_tagger_transitions() {
        let model = build_tagger_model();
        assert_eq!(model.transition_score(&FineTag::Dt, &FineTag::Nn), 2.0);
        assert_eq!(model.transition_score(&FineTag::Md, &FineTag::Vb), 3.0);
        assert_eq!(model.transition_score(&FineTag::Nns, &FineTag::Vbz), 0.5);
        assert!(model.transition_score(&FineTag::Dt, &FineTag::Vbd) < 0.0);
    }

    #[test]
    fn test_ner_model_prefers_continuing_entities() {
        let model = build_ner_model();
        let b = BioTag::Begin(EntityLabel::Person);
        let i = BioTag::Inside(EntityLabel::Person);
        assert!(model.transition_score(&b, &i) > model.transition_score(&b, &BioTag::Outside));
        assert_eq!(BioTag::all().len(), <BioTag as Label>::COUNT);
    }

    #[test]
    fn test_rule_engine_has_gazetteers() {
        let engine = build_rule_engine();
        assert!(engine.phrase_count() > 200);
    }
}
