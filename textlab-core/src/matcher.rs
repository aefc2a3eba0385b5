//! # Matcher de Padrões por Token
//!
//! Encontra sequências de tokens descritas por padrões no formato JSON do
//! spaCy:
//!
//! ```json
//! [{"POS": "ADJ", "OP": "?"}, {"POS": "ADJ"}, {"POS": "NOUN"}]
//! ```
//!
//! Cada elemento é um [`TokenSpec`]: um conjunto de predicados sobre um token
//! (todos precisam valer) e um quantificador ([`Quantifier`]). Uma regra tem
//! um nome e um ou mais padrões alternativos.
//!
//! ## Predicados
//!
//! | Chave                                     | Valor                                        |
//! |-------------------------------------------|----------------------------------------------|
//! | `ORTH`/`TEXT`, `LOWER`, `LEMMA`, `POS`, `TAG`, `DEP`, `SHAPE`, `ENT_TYPE` | string exata, ou `{"IN": [...]}`, `{"NOT_IN": [...]}`, `{"REGEX": "..."}` |
//! | `LENGTH`                                  | inteiro, ou `{">=": n}` (`==`, `!=`, `>=`, `<=`, `>`, `<`, `IN`, `NOT_IN`) |
//! | `IS_ALPHA`, `IS_DIGIT`, `IS_PUNCT`, `IS_STOP`, `LIKE_NUM`, `IS_TITLE`, `IS_LOWER`, `IS_UPPER`, `IS_SENT_START` | booleano |
//! | `OP`                                      | `!`, `?`, `1`, `+`, `*`                      |
//!
//! Um `{}` vazio aceita qualquer token.
//!
//! ## Sobreposição
//!
//! Com [`OverlapPolicy::LeftmostLongest`] (padrão), cada regra devolve
//! correspondências sem sobreposição: da esquerda para a direita, a mais longa
//! que começa em cada posição livre, considerando todos os padrões da regra.
//! As regras rodam em ordem de registro e não competem entre si.

use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::doc::{Document, Span, Token};
use crate::error::{Error, Result};

/// Quantificador de um elemento do padrão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Quantifier {
    /// `!`: exatamente um token que **não** satisfaz os predicados
    #[serde(rename = "!")]
    Negate,
    /// `?`: zero ou um
    #[serde(rename = "?")]
    Optional,
    /// `1`: exatamente um
    #[default]
    #[serde(rename = "1")]
    One,
    /// `+`: um ou mais
    #[serde(rename = "+")]
    OneOrMore,
    /// `*`: zero ou mais
    #[serde(rename = "*")]
    ZeroOrMore,
}

impl Quantifier {
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "!" => Some(Quantifier::Negate),
            "?" => Some(Quantifier::Optional),
            "1" => Some(Quantifier::One),
            "+" => Some(Quantifier::OneOrMore),
            "*" => Some(Quantifier::ZeroOrMore),
            _ => None,
        }
    }
}

/// Atributo textual de um token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAttr {
    Orth,
    Lower,
    Lemma,
    Pos,
    Tag,
    Dep,
    Shape,
    EntType,
}

impl TextAttr {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "ORTH" | "TEXT" => Some(TextAttr::Orth),
            "LOWER" => Some(TextAttr::Lower),
            "LEMMA" => Some(TextAttr::Lemma),
            "POS" => Some(TextAttr::Pos),
            "TAG" => Some(TextAttr::Tag),
            "DEP" => Some(TextAttr::Dep),
            "SHAPE" => Some(TextAttr::Shape),
            "ENT_TYPE" => Some(TextAttr::EntType),
            _ => None,
        }
    }

    fn value<'t>(&self, token: &'t Token) -> &'t str {
        match self {
            TextAttr::Orth => &token.text,
            TextAttr::Lower => &token.lower,
            TextAttr::Lemma => &token.lemma,
            TextAttr::Pos => token.pos.as_str(),
            TextAttr::Tag => token.tag.as_str(),
            TextAttr::Dep => token.dep.as_str(),
            TextAttr::Shape => &token.shape,
            TextAttr::EntType => token.ent_type.map(|l| l.as_str()).unwrap_or(""),
        }
    }
}

/// Predicado sobre o valor de um atributo textual
#[derive(Debug, Clone)]
pub enum TextPredicate {
    Exact(String),
    In(Vec<String>),
    NotIn(Vec<String>),
    /// Busca (não ancorada) no valor do atributo
    Regex(Regex),
}

impl TextPredicate {
    fn matches(&self, value: &str) -> bool {
        match self {
            TextPredicate::Exact(expected) => value == expected,
            TextPredicate::In(set) => set.iter().any(|s| s == value),
            TextPredicate::NotIn(set) => !set.iter().any(|s| s == value),
            TextPredicate::Regex(re) => re.is_match(value),
        }
    }
}

/// Predicado sobre o comprimento (em caracteres) do token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthPredicate {
    Eq(usize),
    Ne(usize),
    Ge(usize),
    Le(usize),
    Gt(usize),
    Lt(usize),
    In(Vec<usize>),
    NotIn(Vec<usize>),
}

impl LengthPredicate {
    fn matches(&self, len: usize) -> bool {
        match self {
            LengthPredicate::Eq(n) => len == *n,
            LengthPredicate::Ne(n) => len != *n,
            LengthPredicate::Ge(n) => len >= *n,
            LengthPredicate::Le(n) => len <= *n,
            LengthPredicate::Gt(n) => len > *n,
            LengthPredicate::Lt(n) => len < *n,
            LengthPredicate::In(set) => set.contains(&len),
            LengthPredicate::NotIn(set) => !set.contains(&len),
        }
    }
}

/// Atributo booleano de um token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    IsAlpha,
    IsDigit,
    IsPunct,
    IsStop,
    LikeNum,
    IsTitle,
    IsLower,
    IsUpper,
    IsSentStart,
}

impl Flag {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "IS_ALPHA" => Some(Flag::IsAlpha),
            "IS_DIGIT" => Some(Flag::IsDigit),
            "IS_PUNCT" => Some(Flag::IsPunct),
            "IS_STOP" => Some(Flag::IsStop),
            "LIKE_NUM" => Some(Flag::LikeNum),
            "IS_TITLE" => Some(Flag::IsTitle),
            "IS_LOWER" => Some(Flag::IsLower),
            "IS_UPPER" => Some(Flag::IsUpper),
            "IS_SENT_START" => Some(Flag::IsSentStart),
            _ => None,
        }
    }

    fn value(&self, token: &Token) -> bool {
        match self {
            Flag::IsAlpha => token.is_alpha(),
            Flag::IsDigit => token.is_digit(),
            Flag::IsPunct => token.is_punct(),
            Flag::IsStop => token.is_stop,
            Flag::LikeNum => token.like_num(),
            Flag::IsTitle => token.is_title(),
            Flag::IsLower => token.is_lower(),
            Flag::IsUpper => token.is_upper(),
            Flag::IsSentStart => token.is_sent_start,
        }
    }
}

/// Um elemento de padrão: predicados sobre um token + quantificador.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct TokenSpec {
    text: Vec<(TextAttr, TextPredicate)>,
    length: Vec<LengthPredicate>,
    flags: Vec<(Flag, bool)>,
    op: Quantifier,
}

impl TokenSpec {
    /// Spec vazio: aceita qualquer token
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_op(mut self, op: Quantifier) -> Self {
        self.op = op;
        self
    }

    pub fn orth(self, text: &str) -> Self {
        self.attr(TextAttr::Orth, TextPredicate::Exact(text.to_string()))
    }

    pub fn lower(self, text: &str) -> Self {
        self.attr(TextAttr::Lower, TextPredicate::Exact(text.to_string()))
    }

    pub fn pos(self, pos: &str) -> Self {
        self.attr(TextAttr::Pos, TextPredicate::Exact(pos.to_string()))
    }

    pub fn attr(mut self, attr: TextAttr, predicate: TextPredicate) -> Self {
        self.text.push((attr, predicate));
        self
    }

    pub fn length(mut self, predicate: LengthPredicate) -> Self {
        self.length.push(predicate);
        self
    }

    pub fn flag(mut self, flag: Flag, value: bool) -> Self {
        self.flags.push((flag, value));
        self
    }

    pub fn op(&self) -> Quantifier {
        self.op
    }

    /// Todos os predicados valem para o token (ignora o quantificador)
    pub fn matches(&self, token: &Token) -> bool {
        self.text.iter().all(|(attr, p)| p.matches(attr.value(token)))
            && self.length.iter().all(|p| p.matches(token.len_chars()))
            && self.flags.iter().all(|(flag, v)| flag.value(token) == *v)
    }

    /// Converte um objeto JSON no formato spaCy.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::try_from(map.clone()),
            other => Err(invalid(format!("elemento de padrão deve ser um objeto, veio {other}"))),
        }
    }
}

impl TryFrom<Map<String, Value>> for TokenSpec {
    type Error = Error;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        let mut spec = TokenSpec::default();
        for (raw_key, value) in map {
            let key = raw_key.to_uppercase();
            if key == "OP" {
                let symbol = value
                    .as_str()
                    .ok_or_else(|| invalid(format!("OP deve ser string, veio {value}")))?;
                spec.op = Quantifier::from_symbol(symbol)
                    .ok_or_else(|| invalid(format!("quantificador desconhecido: '{symbol}'")))?;
            } else if key == "LENGTH" {
                spec.length.extend(length_predicates(&value)?);
            } else if let Some(attr) = TextAttr::from_key(&key) {
                for predicate in text_predicates(&key, &value)? {
                    spec.text.push((attr, predicate));
                }
            } else if let Some(flag) = Flag::from_key(&key) {
                let v = value
                    .as_bool()
                    .ok_or_else(|| invalid(format!("{key} deve ser booleano, veio {value}")))?;
                spec.flags.push((flag, v));
            } else {
                return Err(invalid(format!("atributo de padrão desconhecido: '{raw_key}'")));
            }
        }
        Ok(spec)
    }
}

fn text_predicates(key: &str, value: &Value) -> Result<Vec<TextPredicate>> {
    match value {
        Value::String(s) => Ok(vec![TextPredicate::Exact(s.clone())]),
        Value::Object(ops) => ops
            .iter()
            .map(|(op, arg)| match op.as_str() {
                "IN" => Ok(TextPredicate::In(string_list(key, arg)?)),
                "NOT_IN" => Ok(TextPredicate::NotIn(string_list(key, arg)?)),
                "REGEX" => {
                    let pattern = arg
                        .as_str()
                        .ok_or_else(|| invalid(format!("{key}.REGEX deve ser string")))?;
                    Regex::new(pattern)
                        .map(TextPredicate::Regex)
                        .map_err(|e| invalid(format!("regex inválida em {key}: {e}")))
                }
                other => Err(invalid(format!("operador '{other}' não suportado em {key}"))),
            })
            .collect(),
        other => Err(invalid(format!("{key} deve ser string ou objeto, veio {other}"))),
    }
}

fn string_list(key: &str, value: &Value) -> Result<Vec<String>> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| invalid(format!("{key}: lista deve conter strings")))
                })
                .collect::<Result<Vec<String>>>()
        })
        .unwrap_or_else(|| Err(invalid(format!("{key}: IN/NOT_IN esperam uma lista"))))
}

fn length_predicates(value: &Value) -> Result<Vec<LengthPredicate>> {
    let number = |v: &Value| {
        v.as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| invalid(format!("LENGTH espera inteiro não negativo, veio {v}")))
    };
    match value {
        Value::Number(_) => Ok(vec![LengthPredicate::Eq(number(value)?)]),
        Value::Object(ops) => ops
            .iter()
            .map(|(op, arg)| {
                Ok(match op.as_str() {
                    "==" => LengthPredicate::Eq(number(arg)?),
                    "!=" => LengthPredicate::Ne(number(arg)?),
                    ">=" => LengthPredicate::Ge(number(arg)?),
                    "<=" => LengthPredicate::Le(number(arg)?),
                    ">" => LengthPredicate::Gt(number(arg)?),
                    "<" => LengthPredicate::Lt(number(arg)?),
                    "IN" | "NOT_IN" => {
                        let items = arg
                            .as_array()
                            .ok_or_else(|| invalid("LENGTH: IN/NOT_IN esperam uma lista".to_string()))?
                            .iter()
                            .map(number)
                            .collect::<Result<Vec<_>>>()?;
                        if op == "IN" {
                            LengthPredicate::In(items)
                        } else {
                            LengthPredicate::NotIn(items)
                        }
                    }
                    other => return Err(invalid(format!("operador '{other}' não suportado em LENGTH"))),
                })
            })
            .collect(),
        other => Err(invalid(format!("LENGTH deve ser inteiro ou objeto, veio {other}"))),
    }
}

/// Sequência ordenada de elementos
pub type Pattern = Vec<TokenSpec>;

/// Lê padrões de um JSON: um padrão (`[{...}, ...]`) ou uma lista de
/// padrões alternativos (`[[{...}], [{...}]]`).
pub fn parse_patterns(json: &str) -> Result<Vec<Pattern>> {
    let value: Value = serde_json::from_str(json)?;
    patterns_from_value(&value)
}

pub fn patterns_from_value(value: &Value) -> Result<Vec<Pattern>> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid("padrões devem ser uma lista JSON".to_string()))?;
    if !items.is_empty() && items.iter().all(Value::is_array) {
        items.iter().map(pattern_from_value).collect()
    } else {
        Ok(vec![pattern_from_value(value)?])
    }
}

fn pattern_from_value(value: &Value) -> Result<Pattern> {
    value
        .as_array()
        .ok_or_else(|| invalid("padrão deve ser uma lista de objetos".to_string()))?
        .iter()
        .map(TokenSpec::from_json)
        .collect()
}

/// Lê um arquivo de regras: lista de `{"name": ..., "patterns": [[...]]}`
/// (ordem preservada; também aceita `label`/`pattern` como no EntityRuler do
/// spaCy) ou objeto `{"NOME": [[...]], ...}`.
pub fn parse_rules(json: &str) -> Result<Vec<(String, Vec<Pattern>)>> {
    let value: Value = serde_json::from_str(json)?;
    rules_from_value(&value)
}

pub fn rules_from_value(value: &Value) -> Result<Vec<(String, Vec<Pattern>)>> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(name, patterns)| Ok((name.clone(), patterns_from_value(patterns)?)))
            .collect(),
        Value::Array(entries) => entries
            .iter()
            .map(|entry| {
                let name = entry
                    .get("name")
                    .or_else(|| entry.get("label"))
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid("regra sem 'name'".to_string()))?;
                let patterns = entry
                    .get("patterns")
                    .or_else(|| entry.get("pattern"))
                    .ok_or_else(|| invalid(format!("regra '{name}' sem 'patterns'")))?;
                Ok((name.to_string(), patterns_from_value(patterns)?))
            })
            .collect(),
        _ => Err(invalid("arquivo de regras deve ser lista ou objeto".to_string())),
    }
}

/// Identificador de regra devolvido por [`Matcher::define_rule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleId(pub u32);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Uma correspondência: regra + tokens `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult {
    pub rule: RuleId,
    pub start: usize,
    pub end: usize,
}

impl MatchResult {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    pub fn text<'d>(&self, doc: &'d Document) -> &'d str {
        doc.span_text(self.start, self.end)
    }
}

/// Como resolver correspondências sobrepostas de uma mesma regra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    #[default]
    LeftmostLongest,
    /// Todo par `(start, end)` aceito por algum padrão, sem duplicatas
    All,
}

#[derive(Debug, Clone)]
struct Rule {
    id: RuleId,
    name: String,
    patterns: Vec<Pattern>,
}

/// Registro de regras nomeadas.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    rules: Vec<Rule>,
    next_id: u32,
    policy: OverlapPolicy,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: OverlapPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Registra uma regra com padrões alternativos.
    ///
    /// Falha com [`Error::DuplicateRuleName`] se o nome já existe e com
    /// [`Error::InvalidInput`] se não há padrões ou algum padrão é vazio.
    pub fn define_rule(&mut self, name: &str, patterns: Vec<Pattern>) -> Result<RuleId> {
        if name.is_empty() {
            return Err(invalid("nome de regra vazio".to_string()));
        }
        if self.contains(name) {
            warn!("regra '{name}' já registrada");
            return Err(Error::DuplicateRuleName(name.to_string()));
        }
        if patterns.is_empty() {
            return Err(invalid(format!("regra '{name}' sem padrões")));
        }
        if let Some(k) = patterns.iter().position(|p| p.is_empty()) {
            return Err(invalid(format!("regra '{name}': padrão {k} está vazio")));
        }

        let id = RuleId(self.next_id);
        self.next_id += 1;
        debug!("regra '{name}' registrada como {id} ({} padrões)", patterns.len());
        self.rules.push(Rule {
            id,
            name: name.to_string(),
            patterns,
        });
        Ok(id)
    }

    /// Nome da regra com este identificador
    pub fn resolve_rule_label(&self, id: RuleId) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.as_str())
    }

    /// Remove a regra; devolve `false` se ela não existia
    pub fn remove_rule(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.name != name);
        self.rules.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Aplica as regras em ordem de registro.
    pub fn run(&self, doc: &Document) -> Vec<MatchResult> {
        let tokens = doc.tokens();
        let mut results = Vec::new();
        for rule in &self.rules {
            let mut candidates: BTreeSet<(usize, usize)> = BTreeSet::new();
            for start in 0..tokens.len() {
                for pattern in &rule.patterns {
                    for end in match_ends(pattern, tokens, start) {
                        if end > start {
                            candidates.insert((start, end));
                        }
                    }
                }
            }

            let spans: Vec<(usize, usize)> = match self.policy {
                OverlapPolicy::All => candidates.into_iter().collect(),
                OverlapPolicy::LeftmostLongest => leftmost_longest(candidates),
            };
            debug!("regra '{}': {} correspondências", rule.name, spans.len());
            results.extend(spans.into_iter().map(|(start, end)| MatchResult {
                rule: rule.id,
                start,
                end,
            }));
        }
        results
    }
}

/// Posições finais alcançáveis casando `pattern` a partir de `start`
fn match_ends(pattern: &[TokenSpec], tokens: &[Token], start: usize) -> BTreeSet<usize> {
    let n = tokens.len();
    let mut current = BTreeSet::from([start]);
    for spec in pattern {
        let mut next = BTreeSet::new();
        for &pos in &current {
            let accepts = |p: usize| p < n && spec.matches(&tokens[p]);
            match spec.op {
                Quantifier::One => {
                    if accepts(pos) {
                        next.insert(pos + 1);
                    }
                }
                Quantifier::Negate => {
                    if pos < n && !spec.matches(&tokens[pos]) {
                        next.insert(pos + 1);
                    }
                }
                Quantifier::Optional => {
                    next.insert(pos);
                    if accepts(pos) {
                        next.insert(pos + 1);
                    }
                }
                Quantifier::OneOrMore | Quantifier::ZeroOrMore => {
                    if spec.op == Quantifier::ZeroOrMore {
                        next.insert(pos);
                    }
                    let mut p = pos;
                    while accepts(p) {
                        p += 1;
                        next.insert(p);
                    }
                }
            }
        }
        if next.is_empty() {
            return next;
        }
        current = next;
    }
    current
}

/// Candidatos ordenados por `(start, end)`: fica o mais longo de cada início
/// livre, sem sobreposição
fn leftmost_longest(candidates: BTreeSet<(usize, usize)>) -> Vec<(usize, usize)> {
    let mut best: Vec<(usize, usize)> = Vec::new();
    for (start, end) in candidates {
        match best.last_mut() {
            Some(last) if last.0 == start => last.1 = last.1.max(end),
            _ => best.push((start, end)),
        }
    }
    let mut accepted = Vec::new();
    let mut cursor = 0;
    for (start, end) in best {
        if start >= cursor {
            accepted.push((start, end));
            cursor = end;
        }
    }
    accepted
}

fn invalid(message: String) -> Error {
    Error::InvalidInput(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::load;

    fn process(text: &str) -> Document {
        load("en_core_lite").unwrap().process(text).unwrap()
    }

    fn texts<'d>(doc: &'d Document, matches: &[MatchResult]) -> Vec<&'d str> {
        matches.iter().map(|m| m.text(doc)).collect()
    }

    #[test]
    fn test_optional_adjective_is_leftmost_longest() {
        let doc = process("a red big dog barked");
        let mut matcher = Matcher::new();
        let patterns = parse_patterns(r#"[{"POS": "ADJ", "OP": "?"}, {"POS": "ADJ"}, {"POS": "NOUN"}]"#)
            .unwrap();
        let id = matcher.define_rule("ADJ_NOUN", patterns).unwrap();

        let matches = matcher.run(&doc);
        assert_eq!(matches, vec![MatchResult { rule: id, start: 1, end: 4 }]);
        assert_eq!(texts(&doc, &matches), ["red big dog"]);
        assert_eq!(matcher.resolve_rule_label(id), Some("ADJ_NOUN"));
    }

    #[test]
    fn test_longest_alternative_wins_within_rule() {
        let doc = process("the big red dog ran");
        let mut matcher = Matcher::new();
        let patterns = parse_patterns(
            r#"[
                [{"LOWER": "big"}],
                [{"LOWER": "big"}, {"LOWER": "red"}, {"LOWER": "dog"}],
                [{"LOWER": "red"}, {"LOWER": "dog"}]
            ]"#,
        )
        .unwrap();
        assert_eq!(patterns.len(), 3);
        let id = matcher.define_rule("BIG_RED_DOG", patterns).unwrap();

        let matches = matcher.run(&doc);
        assert_eq!(matches, vec![MatchResult { rule: id, start: 1, end: 4 }]);
        assert_eq!(texts(&doc, &matches), ["big red dog"]);

        let mut all = Matcher::with_policy(OverlapPolicy::All);
        all.define_rule("BIG_RED_DOG", matcher.rules[0].patterns.clone()).unwrap();
        assert_eq!(texts(&doc, &all.run(&doc)), ["big", "big red dog", "red dog"]);
    }

    #[test]
    fn test_all_policy_keeps_overlaps() {
        let doc = process("a red big dog barked");
        let mut matcher = Matcher::with_policy(OverlapPolicy::All);
        let patterns = parse_patterns(r#"[{"POS": "ADJ", "OP": "?"}, {"POS": "ADJ"}, {"POS": "NOUN"}]"#)
            .unwrap();
        matcher.define_rule("ADJ_NOUN", patterns).unwrap();
        assert_eq!(texts(&doc, &matcher.run(&doc)), ["red big dog", "big dog"]);
    }

    #[test]
    fn test_duplicate_and_empty_rules() {
        let mut matcher = Matcher::new();
        let pattern = vec![TokenSpec::any().lower("hello")];
        matcher.define_rule("HELLO", vec![pattern.clone()]).unwrap();

        let err = matcher.define_rule("HELLO", vec![pattern]).unwrap_err();
        assert!(matches!(err, Error::DuplicateRuleName(ref name) if name == "HELLO"));
        assert!(matches!(matcher.define_rule("EMPTY", vec![]), Err(Error::InvalidInput(_))));
        assert!(matches!(matcher.define_rule("HOLE", vec![vec![]]), Err(Error::InvalidInput(_))));
        assert_eq!(matcher.len(), 1);
    }

    #[test]
    fn test_remove_rule() {
        let mut matcher = Matcher::new();
        let first = matcher.define_rule("A", vec![vec![TokenSpec::any()]]).unwrap();
        assert!(matcher.contains("A"));
        assert!(matcher.remove_rule("A"));
        assert!(!matcher.remove_rule("A"));
        assert!(matcher.is_empty());
        assert_eq!(matcher.resolve_rule_label(first), None);

        let second = matcher.define_rule("A", vec![vec![TokenSpec::any()]]).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_rules_run_in_registration_order() {
        let doc = process("Hello, world! Hello world!");
        let mut matcher = Matcher::new();
        let world = matcher
            .define_rule("WORLD", vec![vec![TokenSpec::any().lower("world")]])
            .unwrap();
        let greeting = matcher
            .define_rule(
                "HELLO_WORLD",
                parse_patterns(
                    r#"[[{"LOWER": "hello"}, {"IS_PUNCT": true, "OP": "?"}, {"LOWER": "world"}]]"#,
                )
                .unwrap(),
            )
            .unwrap();

        let matches = matcher.run(&doc);
        let rules: Vec<RuleId> = matches.iter().map(|m| m.rule).collect();
        assert_eq!(rules, [world, world, greeting, greeting]);
        assert_eq!(texts(&doc, &matches[2..]), ["Hello, world", "Hello world"]);
    }

    #[test]
    fn test_operators() {
        let doc = process("the cat sat on the mat");
        let mut matcher = Matcher::new();
        // "the" seguido de um token que não é "cat"
        let id = matcher
            .define_rule(
                "NOT_CAT",
                vec![vec![
                    TokenSpec::any().lower("the"),
                    TokenSpec::any().lower("cat").with_op(Quantifier::Negate),
                ]],
            )
            .unwrap();
        let matches = matcher.run(&doc);
        assert_eq!(texts(&doc, &matches), ["the mat"]);
        assert!(matches.iter().all(|m| m.rule == id));

        let mut star = Matcher::new();
        star.define_rule(
            "SAT_TO_MAT",
            vec![vec![
                TokenSpec::any().lower("sat"),
                TokenSpec::any().with_op(Quantifier::ZeroOrMore),
                TokenSpec::any().lower("mat"),
            ]],
        )
        .unwrap();
        assert_eq!(texts(&doc, &star.run(&doc)), ["sat on the mat"]);

        let mut plus = Matcher::new();
        plus.define_rule(
            "ALPHA_RUN",
            vec![vec![TokenSpec::any().flag(Flag::IsAlpha, true).with_op(Quantifier::OneOrMore)]],
        )
        .unwrap();
        assert_eq!(texts(&doc, &plus.run(&doc)), ["the cat sat on the mat"]);
    }

    #[test]
    fn test_set_regex_and_length_predicates() {
        let doc = process("I bought apples, pears and extraordinarily long bananas.");
        let mut matcher = Matcher::new();
        matcher
            .define_rule(
                "FRUIT",
                parse_patterns(r#"[{"LOWER": {"IN": ["apples", "pears"]}}]"#).unwrap(),
            )
            .unwrap();
        matcher
            .define_rule("LONG", parse_patterns(r#"[{"LENGTH": {">=": 15}}]"#).unwrap())
            .unwrap();
        matcher
            .define_rule("ANA", parse_patterns(r#"[{"TEXT": {"REGEX": "ana"}}]"#).unwrap())
            .unwrap();
        matcher
            .define_rule(
                "NOT_STOP_NOUN",
                parse_patterns(r#"[{"LOWER": {"NOT_IN": ["apples", "pears"]}, "LENGTH": 7}]"#)
                    .unwrap(),
            )
            .unwrap();

        assert_eq!(
            texts(&doc, &matcher.run(&doc)),
            ["apples", "pears", "extraordinarily", "bananas", "bananas"]
        );
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(parse_patterns(r#"[{"COLOR": "red"}]"#), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_patterns(r#"[{"OP": "++"}]"#), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_patterns(r#"[{"TEXT": {"REGEX": "("}}]"#), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_patterns(r#"[{"IS_ALPHA": "yes"}]"#), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_patterns("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_serde_token_spec() {
        let spec: TokenSpec = serde_json::from_str(r#"{"lower": "dog", "OP": "+"}"#).unwrap();
        assert_eq!(spec.op(), Quantifier::OneOrMore);
        let bad = serde_json::from_str::<TokenSpec>(r#"{"NOPE": 1}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_parse_rules_file() {
        let rules = parse_rules(
            r#"[{"name": "GREETING", "patterns": [[{"LOWER": "hi"}], [{"LOWER": "hello"}]]},
                {"label": "TECH", "pattern": [{"LOWER": "rust"}]}]"#,
        )
        .unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].0, "GREETING");
        assert_eq!(rules[0].1.len(), 2);
        assert_eq!(rules[1].0, "TECH");
        assert_eq!(rules[1].1.len(), 1);
    }
}
