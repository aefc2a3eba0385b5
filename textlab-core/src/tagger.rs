//! # Tags Morfossintáticas e POS Tagger
//!
//! Define os dois níveis de tag de um token:
//!
//! - [`Pos`]: classe gramatical **grossa**, do conjunto Universal Dependencies
//!   (`NOUN`, `VERB`, `ADJ`...);
//! - [`FineTag`]: tag **fina** do Penn Treebank (`NN`, `VBD`, `JJR`...), que
//!   carrega tempo verbal, número e grau.
//!
//! E o [`PosTagger`], que escolhe uma `FineTag` por token com Viterbi sobre:
//!
//! ```text
//! emission(t, i) = prior_léxico(t, palavra_i) + Σ_k w_{k,t} · f_k(contexto_i)
//! transition(t', t) = compatibilidade entre tags vizinhas (DT → NN, MD → VB...)
//! ```
//!
//! Palavras fora do léxico recebem candidatos por sufixo e capitalização
//! (`-ly` → RB, `-ing` → VBG, capitalizada no meio da frase → NNP).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::crf::{CrfModel, Label};
use crate::features::extract_tagger_features;
use crate::lexicon::Lexicon;
use crate::tokenizer::RawToken;
use crate::viterbi::viterbi_decode;

/// Classe gramatical grossa (Universal Dependencies).
///
/// `Unset` marca tokens de um documento processado sem o tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
    Space,
    #[serde(rename = "")]
    Unset,
}

impl Pos {
    pub const ALL: [Pos; 18] = [
        Pos::Adj,
        Pos::Adp,
        Pos::Adv,
        Pos::Aux,
        Pos::Cconj,
        Pos::Det,
        Pos::Intj,
        Pos::Noun,
        Pos::Num,
        Pos::Part,
        Pos::Pron,
        Pos::Propn,
        Pos::Punct,
        Pos::Sconj,
        Pos::Sym,
        Pos::Verb,
        Pos::X,
        Pos::Space,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pos::Adj => "ADJ",
            Pos::Adp => "ADP",
            Pos::Adv => "ADV",
            Pos::Aux => "AUX",
            Pos::Cconj => "CCONJ",
            Pos::Det => "DET",
            Pos::Intj => "INTJ",
            Pos::Noun => "NOUN",
            Pos::Num => "NUM",
            Pos::Part => "PART",
            Pos::Pron => "PRON",
            Pos::Propn => "PROPN",
            Pos::Punct => "PUNCT",
            Pos::Sconj => "SCONJ",
            Pos::Sym => "SYM",
            Pos::Verb => "VERB",
            Pos::X => "X",
            Pos::Space => "SPACE",
            Pos::Unset => "",
        }
    }

    /// Parseia o nome UD (ex: "PROPN" → Some(Propn)); aceita minúsculas
    pub fn from_label(s: &str) -> Option<Self> {
        let upper = s.to_uppercase();
        Self::ALL.iter().copied().find(|p| p.as_str() == upper)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Pos::Adj => "adjective",
            Pos::Adp => "adposition",
            Pos::Adv => "adverb",
            Pos::Aux => "auxiliary",
            Pos::Cconj => "coordinating conjunction",
            Pos::Det => "determiner",
            Pos::Intj => "interjection",
            Pos::Noun => "noun",
            Pos::Num => "numeral",
            Pos::Part => "particle",
            Pos::Pron => "pronoun",
            Pos::Propn => "proper noun",
            Pos::Punct => "punctuation",
            Pos::Sconj => "subordinating conjunction",
            Pos::Sym => "symbol",
            Pos::Verb => "verb",
            Pos::X => "other",
            Pos::Space => "space",
            Pos::Unset => "",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag fina do Penn Treebank (mais as extensões `HYPH`, `NFP`, `ADD`, `XX`, `_SP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FineTag {
    #[serde(rename = "CC")]
    Cc,
    #[serde(rename = "CD")]
    Cd,
    #[serde(rename = "DT")]
    Dt,
    #[serde(rename = "EX")]
    Ex,
    #[serde(rename = "FW")]
    Fw,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "JJ")]
    Jj,
    #[serde(rename = "JJR")]
    Jjr,
    #[serde(rename = "JJS")]
    Jjs,
    #[serde(rename = "LS")]
    Ls,
    #[serde(rename = "MD")]
    Md,
    #[serde(rename = "NN")]
    Nn,
    #[serde(rename = "NNS")]
    Nns,
    #[serde(rename = "NNP")]
    Nnp,
    #[serde(rename = "NNPS")]
    Nnps,
    #[serde(rename = "PDT")]
    Pdt,
    #[serde(rename = "POS")]
    Possessive,
    #[serde(rename = "PRP")]
    Prp,
    #[serde(rename = "PRP$")]
    PrpS,
    #[serde(rename = "RB")]
    Rb,
    #[serde(rename = "RBR")]
    Rbr,
    #[serde(rename = "RBS")]
    Rbs,
    #[serde(rename = "RP")]
    Rp,
    #[serde(rename = "SYM")]
    Sym,
    #[serde(rename = "TO")]
    To,
    #[serde(rename = "UH")]
    Uh,
    #[serde(rename = "VB")]
    Vb,
    #[serde(rename = "VBD")]
    Vbd,
    #[serde(rename = "VBG")]
    Vbg,
    #[serde(rename = "VBN")]
    Vbn,
    #[serde(rename = "VBP")]
    Vbp,
    #[serde(rename = "VBZ")]
    Vbz,
    #[serde(rename = "WDT")]
    Wdt,
    #[serde(rename = "WP")]
    Wp,
    #[serde(rename = "WP$")]
    WpS,
    #[serde(rename = "WRB")]
    Wrb,
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = ".")]
    Period,
    #[serde(rename = ":")]
    Colon,
    #[serde(rename = "``")]
    OpenQuote,
    #[serde(rename = "''")]
    CloseQuote,
    #[serde(rename = "-LRB-")]
    Lrb,
    #[serde(rename = "-RRB-")]
    Rrb,
    #[serde(rename = "$")]
    Dollar,
    #[serde(rename = "#")]
    Hash,
    #[serde(rename = "HYPH")]
    Hyph,
    #[serde(rename = "NFP")]
    Nfp,
    #[serde(rename = "ADD")]
    Add,
    #[serde(rename = "XX")]
    Xx,
    #[serde(rename = "_SP")]
    Sp,
    /// Documento processado sem o tagger
    #[serde(rename = "")]
    Unset,
}

impl FineTag {
    /// Todas as tags decodificáveis, na ordem dos índices (sem `Unset`)
    pub const ALL: [FineTag; 50] = [
        FineTag::Cc,
        FineTag::Cd,
        FineTag::Dt,
        FineTag::Ex,
        FineTag::Fw,
        FineTag::In,
        FineTag::Jj,
        FineTag::Jjr,
        FineTag::Jjs,
        FineTag::Ls,
        FineTag::Md,
        FineTag::Nn,
        FineTag::Nns,
        FineTag::Nnp,
        FineTag::Nnps,
        FineTag::Pdt,
        FineTag::Possessive,
        FineTag::Prp,
        FineTag::PrpS,
        FineTag::Rb,
        FineTag::Rbr,
        FineTag::Rbs,
        FineTag::Rp,
        FineTag::Sym,
        FineTag::To,
        FineTag::Uh,
        FineTag::Vb,
        FineTag::Vbd,
        FineTag::Vbg,
        FineTag::Vbn,
        FineTag::Vbp,
        FineTag::Vbz,
        FineTag::Wdt,
        FineTag::Wp,
        FineTag::WpS,
        FineTag::Wrb,
        FineTag::Comma,
        FineTag::Period,
        FineTag::Colon,
        FineTag::OpenQuote,
        FineTag::CloseQuote,
        FineTag::Lrb,
        FineTag::Rrb,
        FineTag::Dollar,
        FineTag::Hash,
        FineTag::Hyph,
        FineTag::Nfp,
        FineTag::Add,
        FineTag::Xx,
        FineTag::Sp,
    ];

    /// Nome Penn da tag (ex: "NNS", "PRP$", "-LRB-")
    pub fn as_str(&self) -> &'static str {
        match self {
            FineTag::Cc => "CC",
            FineTag::Cd => "CD",
            FineTag::Dt => "DT",
            FineTag::Ex => "EX",
            FineTag::Fw => "FW",
            FineTag::In => "IN",
            FineTag::Jj => "JJ",
            FineTag::Jjr => "JJR",
            FineTag::Jjs => "JJS",
            FineTag::Ls => "LS",
            FineTag::Md => "MD",
            FineTag::Nn => "NN",
            FineTag::Nns => "NNS",
            FineTag::Nnp => "NNP",
            FineTag::Nnps => "NNPS",
            FineTag::Pdt => "PDT",
            FineTag::Possessive => "POS",
            FineTag::Prp => "PRP",
            FineTag::PrpS => "PRP$",
            FineTag::Rb => "RB",
            FineTag::Rbr => "RBR",
            FineTag::Rbs => "RBS",
            FineTag::Rp => "RP",
            FineTag::Sym => "SYM",
            FineTag::To => "TO",
            FineTag::Uh => "UH",
            FineTag::Vb => "VB",
            FineTag::Vbd => "VBD",
            FineTag::Vbg => "VBG",
            FineTag::Vbn => "VBN",
            FineTag::Vbp => "VBP",
            FineTag::Vbz => "VBZ",
            FineTag::Wdt => "WDT",
            FineTag::Wp => "WP",
            FineTag::WpS => "WP$",
            FineTag::Wrb => "WRB",
            FineTag::Comma => ",",
            FineTag::Period => ".",
            FineTag::Colon => ":",
            FineTag::OpenQuote => "``",
            FineTag::CloseQuote => "''",
            FineTag::Lrb => "-LRB-",
            FineTag::Rrb => "-RRB-",
            FineTag::Dollar => "$",
            FineTag::Hash => "#",
            FineTag::Hyph => "HYPH",
            FineTag::Nfp => "NFP",
            FineTag::Add => "ADD",
            FineTag::Xx => "XX",
            FineTag::Sp => "_SP",
            FineTag::Unset => "",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }

    /// Classe grossa padrão da tag (antes dos ajustes de contexto do tagger)
    pub fn pos(&self) -> Pos {
        match self {
            FineTag::Cc => Pos::Cconj,
            FineTag::Cd => Pos::Num,
            FineTag::Dt | FineTag::Pdt => Pos::Det,
            FineTag::Ex | FineTag::Prp | FineTag::PrpS | FineTag::Wdt | FineTag::Wp | FineTag::WpS => {
                Pos::Pron
            }
            FineTag::Fw | FineTag::Ls | FineTag::Add | FineTag::Xx => Pos::X,
            FineTag::In | FineTag::Rp => Pos::Adp,
            FineTag::Jj | FineTag::Jjr | FineTag::Jjs => Pos::Adj,
            FineTag::Md => Pos::Aux,
            FineTag::Nn | FineTag::Nns => Pos::Noun,
            FineTag::Nnp | FineTag::Nnps => Pos::Propn,
            FineTag::Possessive | FineTag::To => Pos::Part,
            FineTag::Rb | FineTag::Rbr | FineTag::Rbs | FineTag::Wrb => Pos::Adv,
            FineTag::Sym | FineTag::Dollar | FineTag::Hash => Pos::Sym,
            FineTag::Uh => Pos::Intj,
            FineTag::Vb | FineTag::Vbd | FineTag::Vbg | FineTag::Vbn | FineTag::Vbp | FineTag::Vbz => {
                Pos::Verb
            }
            FineTag::Comma
            | FineTag::Period
            | FineTag::Colon
            | FineTag::OpenQuote
            | FineTag::CloseQuote
            | FineTag::Lrb
            | FineTag::Rrb
            | FineTag::Hyph
            | FineTag::Nfp => Pos::Punct,
            FineTag::Sp => Pos::Space,
            FineTag::Unset => Pos::Unset,
        }
    }

    /// Descrição em inglês, no estilo dos glossários do Penn Treebank
    pub fn description(&self) -> &'static str {
        match self {
            FineTag::Cc => "conjunction, coordinating",
            FineTag::Cd => "cardinal number",
            FineTag::Dt => "determiner",
            FineTag::Ex => "existential there",
            FineTag::Fw => "foreign word",
            FineTag::In => "conjunction, subordinating or preposition",
            FineTag::Jj => "adjective",
            FineTag::Jjr => "adjective, comparative",
            FineTag::Jjs => "adjective, superlative",
            FineTag::Ls => "list item marker",
            FineTag::Md => "verb, modal auxiliary",
            FineTag::Nn => "noun, singular or mass",
            FineTag::Nns => "noun, plural",
            FineTag::Nnp => "noun, proper singular",
            FineTag::Nnps => "noun, proper plural",
            FineTag::Pdt => "predeterminer",
            FineTag::Possessive => "possessive ending",
            FineTag::Prp => "pronoun, personal",
            FineTag::PrpS => "pronoun, possessive",
            FineTag::Rb => "adverb",
            FineTag::Rbr => "adverb, comparative",
            FineTag::Rbs => "adverb, superlative",
            FineTag::Rp => "adverb, particle",
            FineTag::Sym => "symbol",
            FineTag::To => "infinitival \"to\"",
            FineTag::Uh => "interjection",
            FineTag::Vb => "verb, base form",
            FineTag::Vbd => "verb, past tense",
            FineTag::Vbg => "verb, gerund or present participle",
            FineTag::Vbn => "verb, past participle",
            FineTag::Vbp => "verb, non-3rd person singular present",
            FineTag::Vbz => "verb, 3rd person singular present",
            FineTag::Wdt => "wh-determiner",
            FineTag::Wp => "wh-pronoun, personal",
            FineTag::WpS => "wh-pronoun, possessive",
            FineTag::Wrb => "wh-adverb",
            FineTag::Comma => "punctuation mark, comma",
            FineTag::Period => "punctuation mark, sentence closer",
            FineTag::Colon => "punctuation mark, colon or ellipsis",
            FineTag::OpenQuote => "opening quotation mark",
            FineTag::CloseQuote => "closing quotation mark",
            FineTag::Lrb => "left round bracket",
            FineTag::Rrb => "right round bracket",
            FineTag::Dollar => "symbol, currency",
            FineTag::Hash => "symbol, number sign",
            FineTag::Hyph => "punctuation mark, hyphen",
            FineTag::Nfp => "superfluous punctuation",
            FineTag::Add => "email or web address",
            FineTag::Xx => "unknown",
            FineTag::Sp => "whitespace",
            FineTag::Unset => "",
        }
    }

    pub fn is_verb(&self) -> bool {
        matches!(
            self,
            FineTag::Vb | FineTag::Vbd | FineTag::Vbg | FineTag::Vbn | FineTag::Vbp | FineTag::Vbz
        )
    }

    /// Substantivos comuns e próprios
    pub fn is_noun(&self) -> bool {
        matches!(self, FineTag::Nn | FineTag::Nns | FineTag::Nnp | FineTag::Nnps)
    }

    pub fn is_adjective(&self) -> bool {
        matches!(self, FineTag::Jj | FineTag::Jjr | FineTag::Jjs)
    }

    pub fn is_adverb(&self) -> bool {
        matches!(self, FineTag::Rb | FineTag::Rbr | FineTag::Rbs)
    }

    pub fn is_punct(&self) -> bool {
        self.pos() == Pos::Punct
    }

    /// Classes abertas: a forma capitalizada no meio da frase pode ser nome próprio
    fn is_open_class(&self) -> bool {
        self.is_noun() || self.is_verb() || self.is_adjective() || self.is_adverb()
    }
}

impl fmt::Display for FineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Label for FineTag {
    const COUNT: usize = FineTag::ALL.len();

    fn index(&self) -> usize {
        *self as usize
    }

    fn all() -> Vec<Self> {
        FineTag::ALL.to_vec()
    }

    fn name(&self) -> String {
        self.as_str().to_string()
    }
}

/// Resultado do tagger para um token
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub tag: FineTag,
    pub pos: Pos,
    /// Probabilidade/confiança da tag (0.0 a 1.0)
    pub confidence: f64,
}

/// Prior de emissão por posição do candidato na lista de leituras
const CANDIDATE_PRIORS: [f64; 3] = [2.0, 1.0, 0.5];
/// Score de emissão das tags que não são candidatas
const NON_CANDIDATE_SCORE: f64 = -12.0;

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "unless", "whether", "if", "while", "whereas", "that",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ish", "ary", "ian",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ism", "ist", "er", "or", "ship", "ance", "ence",
    "age", "ure", "dom", "hood",
];

/// POS tagger: léxico + CRF de primeira ordem decodificado com Viterbi.
#[derive(Debug, Clone)]
pub struct PosTagger {
    lexicon: Arc<Lexicon>,
    model: CrfModel<FineTag>,
}

impl PosTagger {
    pub fn new(lexicon: Arc<Lexicon>, model: CrfModel<FineTag>) -> Self {
        Self { lexicon, model }
    }

    /// Marca todos os tokens, sentença por sentença.
    ///
    /// `sent_starts[i]` indica se o token `i` abre uma sentença.
    pub fn tag(&self, tokens: &[RawToken], sent_starts: &[bool]) -> Vec<TaggedToken> {
        let mut result = Vec::with_capacity(tokens.len());
        let mut start = 0;
        while start < tokens.len() {
            let mut end = start + 1;
            while end < tokens.len() && !sent_starts.get(end).copied().unwrap_or(false) {
                end += 1;
            }
            result.extend(self.tag_sentence(&tokens[start..end]));
            start = end;
        }
        result
    }

    fn tag_sentence(&self, tokens: &[RawToken]) -> Vec<TaggedToken> {
        let emission: Vec<Vec<f64>> = (0..tokens.len())
            .map(|i| {
                let candidates = self.candidates(tokens, i);
                let features = extract_tagger_features(tokens, i);
                FineTag::ALL
                    .iter()
                    .map(|tag| {
                        let prior = candidates
                            .iter()
                            .position(|c| c == tag)
                            .map(|p| CANDIDATE_PRIORS[p.min(CANDIDATE_PRIORS.len() - 1)])
                            .unwrap_or(NON_CANDIDATE_SCORE);
                        prior + self.model.emission_score(&features, tag)
                    })
                    .collect()
            })
            .collect();

        let decoded = viterbi_decode(&self.model, &emission);

        (0..tokens.len())
            .map(|i| {
                let tag = decoded.best_sequence[i];
                TaggedToken {
                    tag,
                    pos: self.coarse_pos(tokens, &decoded.best_sequence, i),
                    confidence: decoded.confidences[i],
                }
            })
            .collect()
    }

    /// Tags candidatas para o token `i`, em ordem de preferência
    fn candidates(&self, tokens: &[RawToken], i: usize) -> Vec<FineTag> {
        let text = tokens[i].text.as_str();
        let lower = text.to_lowercase();
        let sentence_initial = i == 0;
        let capitalized = text.chars().next().map(char::is_uppercase).unwrap_or(false);
        let all_caps = text.chars().filter(|c| c.is_alphabetic()).count() > 1
            && text.chars().all(|c| !c.is_lowercase());

        if let Some(tag) = punct_tag(tokens, i) {
            return vec![tag];
        }
        if is_number(text) {
            return vec![FineTag::Cd];
        }
        if is_address(text) {
            return vec![FineTag::Add];
        }
        if capitalized && MONTHS.contains(&lower.as_str()) {
            return vec![FineTag::Nnp];
        }

        let entries = self.lexicon.lookup(&lower);
        if !entries.is_empty() {
            let mut tags: Vec<FineTag> = Vec::new();
            for entry in entries {
                if !tags.contains(&entry.tag) {
                    tags.push(entry.tag);
                }
            }
            let open_only = tags.iter().all(FineTag::is_open_class);
            if capitalized && !sentence_initial && lower != "i" && (open_only || all_caps) {
                tags.insert(0, FineTag::Nnp);
            } else if capitalized && sentence_initial && open_only {
                tags.push(FineTag::Nnp);
            }
            return tags;
        }

        guess_unknown(&lower, capitalized, sentence_initial)
    }

    /// Classe grossa com os ajustes de contexto: auxiliares, partículas e
    /// subordinadores.
    fn coarse_pos(&self, tokens: &[RawToken], tags: &[FineTag], i: usize) -> Pos {
        let tag = tags[i];
        let lower = tokens[i].text.to_lowercase();

        if tag.is_verb() {
            match self.lexicon.lemma_for(&lower, tag) {
                Some("be") => return Pos::Aux,
                Some("have") | Some("do") => {
                    // Auxiliar quando outro verbo vem logo depois (pulando advérbios)
                    let next_verb = tags[i + 1..]
                        .iter()
                        .find(|t| !t.is_adverb())
                        .map(FineTag::is_verb)
                        .unwrap_or(false);
                    return if next_verb { Pos::Aux } else { Pos::Verb };
                }
                _ => {}
            }
        }
        if tag == FineTag::Rb && (lower == "not" || lower == "n't" || lower == "n\u{2019}t") {
            return Pos::Part;
        }
        if tag == FineTag::In && SUBORDINATORS.contains(&lower.as_str()) {
            return Pos::Sconj;
        }
        tag.pos()
    }
}

/// Candidatos para palavras fora do léxico, por capitalização e sufixo
fn guess_unknown(lower: &str, capitalized: bool, sentence_initial: bool) -> Vec<FineTag> {
    use FineTag::*;

    if capitalized {
        return if sentence_initial {
            vec![Nnp, Nn, Jj]
        } else {
            vec![Nnp]
        };
    }
    if lower.contains('-') && lower.chars().any(char::is_alphabetic) {
        return vec![Jj, Nn];
    }
    if lower.ends_with("ly") {
        return vec![Rb, Jj];
    }
    if lower.ends_with("ing") && lower.len() > 4 {
        return vec![Vbg, Nn, Jj];
    }
    if lower.ends_with("ed") && lower.len() > 3 {
        return vec![Vbd, Vbn, Jj];
    }
    if lower.ends_with('s') && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s)) {
        return vec![Nns, Vbz];
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return vec![Jj, Nn];
    }
    if NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return vec![Nn];
    }
    vec![Nn, Jj, Vb]
}

/// Tag de pontuação ou símbolo, se o token for um
fn punct_tag(tokens: &[RawToken], i: usize) -> Option<FineTag> {
    let text = tokens[i].text.as_str();
    if text.chars().any(char::is_alphanumeric) {
        return None;
    }
    // Aspas retas: abertura se vierem no início ou depois de espaço
    let opening = i == 0 || tokens[i - 1].whitespace;

    let tag = match text {
        "," => FineTag::Comma,
        ":" | ";" | "..." | "…" | "--" | "\u{2013}" | "\u{2014}" => FineTag::Colon,
        "-" => FineTag::Hyph,
        "(" | "[" | "{" => FineTag::Lrb,
        ")" | "]" | "}" => FineTag::Rrb,
        "``" | "\u{201C}" | "\u{2018}" => FineTag::OpenQuote,
        "''" | "\u{201D}" | "\u{2019}" => FineTag::CloseQuote,
        "\"" | "'" | "`" => {
            if opening {
                FineTag::OpenQuote
            } else {
                FineTag::CloseQuote
            }
        }
        "$" | "£" | "€" | "¥" => FineTag::Dollar,
        "#" => FineTag::Hash,
        "%" => FineTag::Nn,
        "&" => FineTag::Cc,
        _ if text.chars().all(|c| matches!(c, '.' | '!' | '?')) => FineTag::Period,
        _ if text.chars().all(|c| c.is_ascii_punctuation() || c == '…') => FineTag::Nfp,
        _ => FineTag::Sym,
    };
    Some(tag)
}

/// Números com separadores: "42", "3.14", "1,000", "10:30", "1990s"
fn is_number(text: &str) -> bool {
    let mut chars = text.chars();
    let starts_with_digit = chars.next().map(|c| c.is_ascii_digit()).unwrap_or(false);
    starts_with_digit
        && text
            .trim_end_matches('s')
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | ':' | '/' | '-'))
}

/// Endereços de e-mail e URLs
fn is_address(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("www.")
        || (text.contains('@') && text.contains('.') && !text.starts_with('@'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_tagger_model;
    use crate::sentencizer::sentence_starts;
    use crate::tokenizer::tokenize;

    fn tag_text(text: &str) -> Vec<(String, FineTag, Pos)> {
        let tagger = PosTagger::new(Arc::new(Lexicon::english()), build_tagger_model());
        let tokens = tokenize(text);
        let starts = sentence_starts(text, &tokens);
        tagger
            .tag(&tokens, &starts)
            .into_iter()
            .zip(tokens)
            .map(|(t, tok)| (tok.text, t.tag, t.pos))
            .collect()
    }

    fn tags(text: &str) -> Vec<FineTag> {
        tag_text(text).into_iter().map(|(_, t, _)| t).collect()
    }

    #[test]
    fn test_fine_tag_labels_roundtrip_through_serde() {
        let json = serde_json::to_string(&FineTag::PrpS).unwrap();
        assert_eq!(json, "\"PRP$\"");
        let back: FineTag = serde_json::from_str("\"-LRB-\"").unwrap();
        assert_eq!(back, FineTag::Lrb);
    }

    #[test]
    fn test_label_indices_are_dense() {
        for (i, tag) in FineTag::ALL.iter().enumerate() {
            assert_eq!(tag.index(), i);
        }
        assert_eq!(<FineTag as Label>::COUNT, 50);
    }

    #[test]
    fn test_pos_from_label() {
        assert_eq!(Pos::from_label("ADJ"), Some(Pos::Adj));
        assert_eq!(Pos::from_label("propn"), Some(Pos::Propn));
        assert_eq!(Pos::from_label("NOPE"), None);
    }

    #[test]
    fn test_tag_adjectives_before_noun() {
        use FineTag::*;
        assert_eq!(tags("a red big dog barked"), vec![Dt, Jj, Jj, Nn, Vbd]);
    }

    #[test]
    fn test_tag_names_as_proper_nouns() {
        let tagged = tag_text("Tom met Sam.");
        let pos: Vec<Pos> = tagged.iter().map(|(_, _, p)| *p).collect();
        assert_eq!(pos, vec![Pos::Propn, Pos::Verb, Pos::Propn, Pos::Punct]);
        assert_eq!(tagged[1].1, FineTag::Vbd);
    }

    #[test]
    fn test_determiner_disambiguates_noun() {
        use FineTag::*;
        assert_eq!(tags("I love the work"), vec![Prp, Vbp, Dt, Nn]);
    }

    #[test]
    fn test_modal_and_infinitive() {
        use FineTag::*;
        assert_eq!(tags("She can swim"), vec![Prp, Md, Vb]);
        assert_eq!(tags("They want to play"), vec![Prp, Vbp, To, Vb]);
    }

    #[test]
    fn test_auxiliaries_and_negation() {
        let tagged = tag_text("He does n't know");
        assert_eq!(tagged[1].2, Pos::Aux);
        assert_eq!(tagged[2].2, Pos::Part);
        let tagged = tag_text("The dog is happy");
        assert_eq!(tagged[2].2, Pos::Aux);
    }

    #[test]
    fn test_perfect_takes_participle() {
        use FineTag::*;
        assert_eq!(tags("They have walked"), vec![Prp, Vbp, Vbn]);
    }

    #[test]
    fn test_unknown_words_by_suffix() {
        let tagged = tag_text("It glimmered brightly");
        assert_eq!(tagged[1].1, FineTag::Vbd);
        assert_eq!(tagged[2].1, FineTag::Rb);
    }

    #[test]
    fn test_numbers_and_symbols() {
        use FineTag::*;
        assert_eq!(tags("$ 100 ( 5 % )"), vec![Dollar, Cd, Lrb, Cd, Nn, Rrb]);
    }

    #[test]
    fn test_capitalized_mid_sentence_is_proper() {
        let tagged = tag_text("I visited Apple and NASA");
        assert_eq!(tagged[2].1, FineTag::Nnp);
        assert_eq!(tagged[4].1, FineTag::Nnp);
    }
}
