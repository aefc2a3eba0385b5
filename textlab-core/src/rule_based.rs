//! # Motor de Regras: Gazetteers e Padrões
//!
//! Complementa o CRF de entidades com conhecimento explícito: listas de
//! entidades conhecidas (gazetteers), padrões de superfície para valores
//! (dinheiro, porcentagens, horários, datas, números) e gatilhos de contexto
//! ("Mr. X", "X Inc.").
//!
//! As regras rodam em ordem de prioridade e nunca se sobrepõem: um token já
//! reivindicado por uma regra anterior não pode entrar em outra.
//!
//! | Prioridade | Regra              | Rótulo                     |
//! |------------|--------------------|----------------------------|
//! | 1          | valores            | MONEY, PERCENT, QUANTITY   |
//! | 2          | tempo              | TIME, DATE                 |
//! | 3          | gazetteer          | ORG, GPE, NORP, LOC, ...   |
//! | 4          | sufixo corporativo | ORG                        |
//! | 5          | título + nome      | PERSON                     |
//! | 6          | prenome conhecido  | PERSON                     |
//! | 7          | numerais           | ORDINAL, CARDINAL          |

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::doc::Token;
use crate::entity::EntityLabel;
use crate::tagger::FineTag;

/// Uma entidade reconhecida por regra: tokens `[start, end)` da sentença
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleMatch {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
    pub rule_name: String,
    pub confidence: f64,
}

/// Padrões de um único token
const TOKEN_PATTERNS: &[(&str, EntityLabel, &str)] = &[
    (r"(?i)^\d{1,2}:\d{2}(:\d{2})?([ap]\.?m\.?)?$", EntityLabel::Time, "time_pattern"),
    (r"(?i)^\d{1,2}([ap]\.?m\.?)$", EntityLabel::Time, "time_pattern"),
    (r"^\d{4}-\d{2}-\d{2}$", EntityLabel::Date, "iso_date_pattern"),
    (r"^\d{1,2}/\d{1,2}/\d{2,4}$", EntityLabel::Date, "numeric_date_pattern"),
    (r"^(1[0-9]|20)\d0s$", EntityLabel::Date, "decade_pattern"),
    (r"(?i)^\d+(st|nd|rd|th)$", EntityLabel::Ordinal, "ordinal_pattern"),
];

const CURRENCY_SYMBOLS: &[&str] = &["$", "£", "€", "¥", "us$"];

const CURRENCY_WORDS: &[&str] = &[
    "dollar", "dollars", "euro", "euros", "cents", "cent", "yen", "usd", "eur", "gbp",
    "bucks",
];

const SCALE_WORDS: &[&str] = &["hundred", "thousand", "million", "billion", "trillion"];

const PERCENT_WORDS: &[&str] = &["%", "percent", "per cent"];

const UNITS: &[&str] = &[
    "km", "kilometers", "kilometres", "kilometer", "miles", "mile", "kg", "kilograms",
    "kilogram", "grams", "meters", "metres", "meter", "feet", "foot", "inches", "inch",
    "tons", "tonnes", "liters", "litres", "gallons", "acres", "degrees", "mph", "lbs",
    "pounds",
];

const CLOCK_WORDS: &[&str] = &["am", "pm", "a.m.", "p.m.", "o'clock"];

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan.", "feb.", "mar.", "apr.", "jun.", "jul.",
    "aug.", "sep.", "sept.", "oct.", "nov.", "dec.",
];

const WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

const RELATIVE_DAYS: &[&str] = &["yesterday", "today", "tomorrow"];

const PERIOD_WORDS: &[&str] = &[
    "week", "month", "year", "weekend", "decade", "century", "spring", "summer", "autumn",
    "fall", "winter",
];

const ORDINAL_WORDS: &[&str] = &[
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
    "tenth", "eleventh", "twelfth", "twentieth", "hundredth",
];

/// Motor de regras com gazetteers e padrões
#[derive(Debug, Clone)]
pub struct RuleEngine {
    /// Frases conhecidas em lowercase, ordenadas da mais longa para a mais curta
    phrases: Vec<(Vec<String>, EntityLabel)>,
    /// Prenomes (lowercase)
    first_names: HashSet<String>,
    /// Títulos que precedem nomes de pessoas
    person_titles: HashSet<String>,
    /// Palavras que fecham nomes de organização: "Apple Inc."
    org_suffixes: HashSet<String>,
    token_patterns: Vec<(Regex, EntityLabel, &'static str)>,
}

impl RuleEngine {
    pub fn new() -> Self {
        let token_patterns = TOKEN_PATTERNS
            .iter()
            .filter_map(|&(pattern, label, name)| match Regex::new(pattern) {
                Ok(re) => Some((re, label, name)),
                Err(e) => {
                    warn!("padrão '{name}' ignorado: {e}");
                    None
                }
            })
            .collect();

        Self {
            phrases: vec![],
            first_names: HashSet::new(),
            person_titles: [
                "mr.", "mrs.", "ms.", "dr.", "prof.", "mr", "mrs", "ms", "dr", "sir", "dame",
                "lady", "lord", "president", "senator", "sen.", "governor", "gov.", "judge",
                "king", "queen", "prince", "princess", "pope", "general", "gen.", "captain",
                "capt.", "ceo", "chancellor", "minister", "professor", "rep.", "st.",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            org_suffixes: [
                "inc.", "inc", "corp.", "corp", "ltd.", "ltd", "llc", "co.", "plc", "corporation",
                "company", "group", "bank", "university", "institute", "foundation",
                "association", "airlines", "motors", "technologies", "labs",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            token_patterns,
        }
    }

    /// Registra uma entidade conhecida (pode ter várias palavras)
    pub fn add_phrase(&mut self, name: &str, label: EntityLabel) {
        let parts: Vec<String> = name.split_whitespace().map(str::to_lowercase).collect();
        if parts.is_empty() {
            return;
        }
        self.phrases.push((parts, label));
        self.phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    pub fn add_first_name(&mut self, name: &str) {
        self.first_names.insert(name.to_lowercase());
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Aplica todas as regras a uma sentença já etiquetada.
    ///
    /// Devolve as correspondências em ordem de início, sem sobreposição.
    pub fn apply(&self, tokens: &[Token]) -> Vec<RuleMatch> {
        let mut claims = Claims::new(tokens.len());

        self.apply_values(tokens, &mut claims);
        self.apply_temporal(tokens, &mut claims);
        self.apply_gazetteer(tokens, &mut claims);
        self.apply_org_suffixes(tokens, &mut claims);
        self.apply_titles(tokens, &mut claims);
        self.apply_first_names(tokens, &mut claims);
        self.apply_numerals(tokens, &mut claims);

        let mut matches = claims.matches;
        matches.sort_by_key(|m| m.start);
        matches
    }

    /// MONEY, PERCENT e QUANTITY: "$ 5 million", "25 %", "3 km"
    fn apply_values(&self, tokens: &[Token], claims: &mut Claims) {
        let n = tokens.len();
        for i in 0..n {
            let lower = tokens[i].lower.as_str();
            if CURRENCY_SYMBOLS.contains(&lower) && i + 1 < n && tokens[i + 1].like_num() {
                let end = extend_scale(tokens, i + 2);
                claims.claim(i, end, EntityLabel::Money, "money_pattern", 0.95);
                continue;
            }
            if !tokens[i].like_num() {
                continue;
            }
            let end = extend_scale(tokens, i + 1);
            let Some(next) = tokens.get(end) else {
                continue;
            };
            let next_lower = next.lower.as_str();
            if CURRENCY_WORDS.contains(&next_lower) {
                claims.claim(i, end + 1, EntityLabel::Money, "money_pattern", 0.9);
            } else if PERCENT_WORDS.contains(&next_lower) {
                claims.claim(i, end + 1, EntityLabel::Percent, "percent_pattern", 0.95);
            } else if UNITS.contains(&next_lower) {
                claims.claim(i, end + 1, EntityLabel::Quantity, "quantity_pattern", 0.85);
            }
        }
    }

    /// TIME e DATE: padrões de token, "5 pm", "June 5, 2024", "last week"
    fn apply_temporal(&self, tokens: &[Token], claims: &mut Claims) {
        let n = tokens.len();
        for i in 0..n {
            let token = &tokens[i];
            let lower = token.lower.as_str();

            if let Some((_, label, name)) = self
                .token_patterns
                .iter()
                .find(|(re, _, _)| re.is_match(&token.text))
            {
                claims.claim(i, i + 1, *label, name, 0.9);
                continue;
            }

            if token.like_num() && i + 1 < n && CLOCK_WORDS.contains(&tokens[i + 1].lower.as_str())
            {
                claims.claim(i, i + 2, EntityLabel::Time, "time_pattern", 0.9);
                continue;
            }

            if capitalized(token) && MONTHS.contains(&lower) {
                if let Some((start, end)) = month_date(tokens, i) {
                    claims.claim(start, end, EntityLabel::Date, "month_date_pattern", 0.9);
                }
                continue;
            }

            if capitalized(token) && WEEKDAYS.contains(&lower) {
                claims.claim(i, i + 1, EntityLabel::Date, "weekday_pattern", 0.85);
                continue;
            }

            if RELATIVE_DAYS.contains(&lower) {
                claims.claim(i, i + 1, EntityLabel::Date, "relative_date_pattern", 0.8);
                continue;
            }

            if matches!(lower, "last" | "next" | "this")
                && i + 1 < n
                && (PERIOD_WORDS.contains(&tokens[i + 1].lower.as_str())
                    || WEEKDAYS.contains(&tokens[i + 1].lower.as_str()))
            {
                claims.claim(i, i + 2, EntityLabel::Date, "relative_date_pattern", 0.8);
                continue;
            }

            // Ano solto: "in 2024", mas não "2000 people"
            let followed_by_noun = tokens
                .get(i + 1)
                .map(|t| matches!(t.tag, FineTag::Nn | FineTag::Nns))
                .unwrap_or(false);
            if is_year(&token.text) && !followed_by_noun {
                claims.claim(i, i + 1, EntityLabel::Date, "year_pattern", 0.75);
            }
        }
    }

    /// Frases conhecidas, a mais longa primeiro
    fn apply_gazetteer(&self, tokens: &[Token], claims: &mut Claims) {
        let mut i = 0;
        while i < tokens.len() {
            let found = self.phrases.iter().find(|(parts, _)| {
                i + parts.len() <= tokens.len()
                    && !tokens[i].is_lower()
                    && parts
                        .iter()
                        .zip(&tokens[i..])
                        .all(|(part, token)| *part == token.lower)
            });
            match found {
                Some((parts, label)) if claims.claim(i, i + parts.len(), *label, "gazetteer", 0.93) => {
                    i += parts.len();
                }
                _ => i += 1,
            }
        }
    }

    /// "Acme Corp.", "Stark Industries Group": nome próprio + sufixo
    fn apply_org_suffixes(&self, tokens: &[Token], claims: &mut Claims) {
        for i in 1..tokens.len() {
            if !capitalized(&tokens[i]) || !self.org_suffixes.contains(&tokens[i].lower) {
                continue;
            }
            let mut start = i;
            while start > 0 && is_proper(&tokens[start - 1]) && claims.is_free(start - 1) {
                start -= 1;
            }
            if start < i {
                claims.claim(start, i + 1, EntityLabel::Org, "org_suffix_pattern", 0.85);
            }
        }
    }

    /// "Mr. Smith", "President Lincoln": o título fica fora da entidade
    fn apply_titles(&self, tokens: &[Token], claims: &mut Claims) {
        for i in 0..tokens.len().saturating_sub(1) {
            if !self.person_titles.contains(&tokens[i].lower) {
                continue;
            }
            let end = proper_run(tokens, i + 1, claims);
            if end > i + 1 {
                claims.claim(i + 1, end, EntityLabel::Person, "title_pattern", 0.85);
            }
        }
    }

    /// Prenome conhecido, com os sobrenomes capitalizados que o seguem
    fn apply_first_names(&self, tokens: &[Token], claims: &mut Claims) {
        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];
            if capitalized(token) && self.first_names.contains(&token.lower) && claims.is_free(i) {
                let end = proper_run(tokens, i + 1, claims);
                claims.claim(i, end, EntityLabel::Person, "first_name_gazetteer", 0.9);
                i = end;
            } else {
                i += 1;
            }
        }
    }

    /// ORDINAL ("first", "3rd") e CARDINAL (numerais restantes)
    fn apply_numerals(&self, tokens: &[Token], claims: &mut Claims) {
        let mut i = 0;
        while i < tokens.len() {
            if !claims.is_free(i) {
                i += 1;
                continue;
            }
            // "a second" (unidade de tempo) não é ordinal
            let time_unit = tokens[i].lower == "second" && tokens[i].tag == FineTag::Nn;
            if ORDINAL_WORDS.contains(&tokens[i].lower.as_str()) && !time_unit {
                claims.claim(i, i + 1, EntityLabel::Ordinal, "ordinal_pattern", 0.8);
                i += 1;
                continue;
            }
            if tokens[i].tag == FineTag::Cd || tokens[i].like_num() {
                let mut end = i + 1;
                while end < tokens.len()
                    && claims.is_free(end)
                    && (tokens[end].tag == FineTag::Cd || tokens[end].like_num())
                {
                    end += 1;
                }
                claims.claim(i, end, EntityLabel::Cardinal, "cardinal_pattern", 0.8);
                i = end;
                continue;
            }
            i += 1;
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokens já reivindicados e as correspondências aceitas
struct Claims {
    taken: Vec<bool>,
    matches: Vec<RuleMatch>,
}

impl Claims {
    fn new(n: usize) -> Self {
        Self {
            taken: vec![false; n],
            matches: Vec::new(),
        }
    }

    fn is_free(&self, i: usize) -> bool {
        !self.taken.get(i).copied().unwrap_or(true)
    }

    /// Aceita a faixa só se nenhum token dela já tiver dono
    fn claim(&mut self, start: usize, end: usize, label: EntityLabel, rule: &str, confidence: f64) -> bool {
        if start >= end || end > self.taken.len() || !(start..end).all(|k| self.is_free(k)) {
            return false;
        }
        for flag in &mut self.taken[start..end] {
            *flag = true;
        }
        self.matches.push(RuleMatch {
            start,
            end,
            label,
            rule_name: rule.to_string(),
            confidence,
        });
        true
    }
}

fn capitalized(token: &Token) -> bool {
    token
        .text
        .chars()
        .next()
        .map(char::is_uppercase)
        .unwrap_or(false)
}

fn is_proper(token: &Token) -> bool {
    capitalized(token) && matches!(token.tag, FineTag::Nnp | FineTag::Nnps)
}

/// Fim da sequência de nomes próprios livres a partir de `start`
fn proper_run(tokens: &[Token], start: usize, claims: &Claims) -> usize {
    let mut end = start;
    while end < tokens.len() && is_proper(&tokens[end]) && claims.is_free(end) {
        end += 1;
    }
    end
}

/// Avança sobre numerais e palavras de escala: "5 million", "1.2 billion"
fn extend_scale(tokens: &[Token], mut end: usize) -> usize {
    while end < tokens.len()
        && (SCALE_WORDS.contains(&tokens[end].lower.as_str()) || tokens[end].like_num())
    {
        end += 1;
    }
    end
}

/// Data em torno de um mês: "5 June", "June 5", "June 5, 2024", "June 2024"
fn month_date(tokens: &[Token], i: usize) -> Option<(usize, usize)> {
    let is_day = |t: &Token| {
        let digits = t.text.trim_end_matches(|c: char| c.is_ascii_alphabetic());
        !digits.is_empty()
            && digits.len() <= 2
            && digits.chars().all(|c| c.is_ascii_digit())
            && digits.parse::<u32>().map(|d| (1..=31).contains(&d)).unwrap_or(false)
    };

    let start = if i > 0 && is_day(&tokens[i - 1]) { i - 1 } else { i };
    let mut end = i + 1;
    if start == i && tokens.get(end).map(|t| is_day(t)).unwrap_or(false) {
        end += 1;
    }
    if tokens.get(end).map(|t| t.text == ",").unwrap_or(false)
        && tokens.get(end + 1).map(|t| is_year(&t.text)).unwrap_or(false)
    {
        end += 2;
    } else if tokens.get(end).map(|t| is_year(&t.text)).unwrap_or(false) {
        end += 1;
    }

    // "May" sozinho é quase sempre o modal
    if tokens[i].lower == "may" && end - start == 1 {
        return None;
    }
    Some((start, end))
}

/// Ano de quatro dígitos entre 1000 e 2099
fn is_year(text: &str) -> bool {
    text.len() == 4
        && text.chars().all(|c| c.is_ascii_digit())
        && text
            .parse::<u32>()
            .map(|y| (1000..=2099).contains(&y))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    /// Tokens com tag simplificada: Cd para números, Nnp para capitalizadas
    fn tokens(text: &str) -> Vec<Token> {
        tokenize(text)
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                let mut token = Token::bare(&raw.text, raw.start, raw.whitespace, i);
                token.tag = if token.like_num() {
                    FineTag::Cd
                } else if capitalized(&token) && raw.text.chars().any(char::is_alphabetic) {
                    FineTag::Nnp
                } else {
                    FineTag::Nn
                };
                token
            })
            .collect()
    }

    fn labels(engine: &RuleEngine, text: &str) -> Vec<(String, EntityLabel)> {
        let toks = tokens(text);
        engine
            .apply(&toks)
            .into_iter()
            .map(|m| {
                let words: Vec<&str> = toks[m.start..m.end].iter().map(|t| t.text.as_str()).collect();
                (words.join(" "), m.label)
            })
            .collect()
    }

    #[test]
    fn test_first_name_gazetteer() {
        let mut engine = RuleEngine::new();
        engine.add_first_name("Tom");
        engine.add_first_name("Sam");

        assert_eq!(
            labels(&engine, "Tom met Sam Walton."),
            vec![
                ("Tom".to_string(), EntityLabel::Person),
                ("Sam Walton".to_string(), EntityLabel::Person),
            ]
        );
    }

    #[test]
    fn test_title_pattern_excludes_title() {
        let engine = RuleEngine::new();
        let toks = tokens("yesterday Mr. Darcy arrived");
        let matches = engine.apply(&toks);
        let person = matches
            .iter()
            .find(|m| m.label == EntityLabel::Person)
            .unwrap();
        assert_eq!((person.start, person.end), (2, 3));
        assert_eq!(person.rule_name, "title_pattern");
    }

    #[test]
    fn test_multiword_gazetteer_prefers_longest() {
        let mut engine = RuleEngine::new();
        engine.add_phrase("New York", EntityLabel::Gpe);
        engine.add_phrase("New York Times", EntityLabel::Org);

        assert_eq!(
            labels(&engine, "she reads the New York Times in New York"),
            vec![
                ("New York Times".to_string(), EntityLabel::Org),
                ("New York".to_string(), EntityLabel::Gpe),
            ]
        );
    }

    #[test]
    fn test_gazetteer_requires_capitalization() {
        let mut engine = RuleEngine::new();
        engine.add_phrase("Apple", EntityLabel::Org);
        assert!(labels(&engine, "an apple a day").is_empty());
    }

    #[test]
    fn test_values() {
        let engine = RuleEngine::new();
        assert_eq!(
            labels(&engine, "it cost $5 million, up 20% over 3 km"),
            vec![
                ("$ 5 million".to_string(), EntityLabel::Money),
                ("20 %".to_string(), EntityLabel::Percent),
                ("3 km".to_string(), EntityLabel::Quantity),
            ]
        );
    }

    #[test]
    fn test_dates_and_times() {
        let engine = RuleEngine::new();
        assert_eq!(
            labels(&engine, "on June 5, 2024 at 10:30 we met"),
            vec![
                ("June 5 , 2024".to_string(), EntityLabel::Date),
                ("10:30".to_string(), EntityLabel::Time),
            ]
        );
        assert_eq!(
            labels(&engine, "see you next week"),
            vec![("next week".to_string(), EntityLabel::Date)]
        );
    }

    #[test]
    fn test_modal_may_is_not_a_date() {
        let engine = RuleEngine::new();
        assert!(labels(&engine, "May I help").is_empty());
    }

    #[test]
    fn test_org_suffix() {
        let engine = RuleEngine::new();
        assert_eq!(
            labels(&engine, "he joined Acme Corp. last year"),
            vec![
                ("Acme Corp.".to_string(), EntityLabel::Org),
                ("last year".to_string(), EntityLabel::Date),
            ]
        );
    }

    #[test]
    fn test_numerals() {
        let engine = RuleEngine::new();
        assert_eq!(
            labels(&engine, "the first 3 runners"),
            vec![
                ("first".to_string(), EntityLabel::Ordinal),
                ("3".to_string(), EntityLabel::Cardinal),
            ]
        );
    }
}
