//! # Análise de Dependências por Regras
//!
//! Atribui a cada token uma cabeça e um rótulo de dependência (esquema
//! ClearNLP usado pelos modelos ingleses do spaCy). A análise é feita por
//! sentença, em fases:
//!
//! 1. **chunking**: sintagmas nominais de base (`det`, `amod`, `compound`,
//!    `nummod`, `poss`);
//! 2. **grupos verbais**: auxiliares, modais, negação e o verbo principal
//!    (`aux`, `auxpass`, `neg`);
//! 3. **orações**: cada grupo verbal vira oração principal, infinitiva
//!    (`xcomp`), relativa (`relcl`), coordenada (`conj`), adverbial (`advcl`),
//!    completiva (`ccomp`), reduzida (`acl`) ou complemento de preposição
//!    (`pcomp`); a primeira oração principal é a raiz;
//! 4. **argumentos**: coordenação nominal, preposições (`prep`/`pobj`/`agent`),
//!    sujeitos (`nsubj`, `nsubjpass`, `expl`) e objetos (`dobj`, `dative`,
//!    `attr`);
//! 5. **sobras**: pontuação, advérbios, adjetivos predicativos, partículas.
//!
//! No fim, qualquer ciclo residual é quebrado religando o token à raiz, de
//! modo que toda cadeia de cabeças termina na raiz da sentença.
//!
//! O módulo também expõe o iterador de noun chunks sobre um [`Document`]
//! já analisado.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::doc::{Document, Span, Token};
use crate::tagger::{FineTag, Pos};

/// Rótulo de dependência sintática.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepLabel {
    Acl,
    Acomp,
    Advcl,
    Advmod,
    Agent,
    Amod,
    Appos,
    Attr,
    Aux,
    Auxpass,
    Case,
    Cc,
    Ccomp,
    Compound,
    Conj,
    Csubj,
    Csubjpass,
    Dative,
    Dep,
    Det,
    Dobj,
    Expl,
    Intj,
    Mark,
    Meta,
    Neg,
    Nmod,
    Npadvmod,
    Nsubj,
    Nsubjpass,
    Nummod,
    Oprd,
    Parataxis,
    Pcomp,
    Pobj,
    Poss,
    Preconj,
    Predet,
    Prep,
    Prt,
    Punct,
    Quantmod,
    Relcl,
    Xcomp,
    #[serde(rename = "ROOT")]
    Root,
    /// Documento processado sem o parser
    #[serde(rename = "")]
    Unset,
}

impl DepLabel {
    pub const ALL: [DepLabel; 45] = [
        DepLabel::Acl,
        DepLabel::Acomp,
        DepLabel::Advcl,
        DepLabel::Advmod,
        DepLabel::Agent,
        DepLabel::Amod,
        DepLabel::Appos,
        DepLabel::Attr,
        DepLabel::Aux,
        DepLabel::Auxpass,
        DepLabel::Case,
        DepLabel::Cc,
        DepLabel::Ccomp,
        DepLabel::Compound,
        DepLabel::Conj,
        DepLabel::Csubj,
        DepLabel::Csubjpass,
        DepLabel::Dative,
        DepLabel::Dep,
        DepLabel::Det,
        DepLabel::Dobj,
        DepLabel::Expl,
        DepLabel::Intj,
        DepLabel::Mark,
        DepLabel::Meta,
        DepLabel::Neg,
        DepLabel::Nmod,
        DepLabel::Npadvmod,
        DepLabel::Nsubj,
        DepLabel::Nsubjpass,
        DepLabel::Nummod,
        DepLabel::Oprd,
        DepLabel::Parataxis,
        DepLabel::Pcomp,
        DepLabel::Pobj,
        DepLabel::Poss,
        DepLabel::Preconj,
        DepLabel::Predet,
        DepLabel::Prep,
        DepLabel::Prt,
        DepLabel::Punct,
        DepLabel::Quantmod,
        DepLabel::Relcl,
        DepLabel::Xcomp,
        DepLabel::Root,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DepLabel::Acl => "acl",
            DepLabel::Acomp => "acomp",
            DepLabel::Advcl => "advcl",
            DepLabel::Advmod => "advmod",
            DepLabel::Agent => "agent",
            DepLabel::Amod => "amod",
            DepLabel::Appos => "appos",
            DepLabel::Attr => "attr",
            DepLabel::Aux => "aux",
            DepLabel::Auxpass => "auxpass",
            DepLabel::Case => "case",
            DepLabel::Cc => "cc",
            DepLabel::Ccomp => "ccomp",
            DepLabel::Compound => "compound",
            DepLabel::Conj => "conj",
            DepLabel::Csubj => "csubj",
            DepLabel::Csubjpass => "csubjpass",
            DepLabel::Dative => "dative",
            DepLabel::Dep => "dep",
            DepLabel::Det => "det",
            DepLabel::Dobj => "dobj",
            DepLabel::Expl => "expl",
            DepLabel::Intj => "intj",
            DepLabel::Mark => "mark",
            DepLabel::Meta => "meta",
            DepLabel::Neg => "neg",
            DepLabel::Nmod => "nmod",
            DepLabel::Npadvmod => "npadvmod",
            DepLabel::Nsubj => "nsubj",
            DepLabel::Nsubjpass => "nsubjpass",
            DepLabel::Nummod => "nummod",
            DepLabel::Oprd => "oprd",
            DepLabel::Parataxis => "parataxis",
            DepLabel::Pcomp => "pcomp",
            DepLabel::Pobj => "pobj",
            DepLabel::Poss => "poss",
            DepLabel::Preconj => "preconj",
            DepLabel::Predet => "predet",
            DepLabel::Prep => "prep",
            DepLabel::Prt => "prt",
            DepLabel::Punct => "punct",
            DepLabel::Quantmod => "quantmod",
            DepLabel::Relcl => "relcl",
            DepLabel::Xcomp => "xcomp",
            DepLabel::Root => "ROOT",
            DepLabel::Unset => "",
        }
    }

    /// Aceita qualquer capitalização ("ROOT", "root", "NSUBJ")
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
    }

    pub fn description(&self) -> &'static str {
        match self {
            DepLabel::Acl => "clausal modifier of noun (adjectival clause)",
            DepLabel::Acomp => "adjectival complement",
            DepLabel::Advcl => "adverbial clause modifier",
            DepLabel::Advmod => "adverbial modifier",
            DepLabel::Agent => "agent",
            DepLabel::Amod => "adjectival modifier",
            DepLabel::Appos => "appositional modifier",
            DepLabel::Attr => "attribute",
            DepLabel::Aux => "auxiliary",
            DepLabel::Auxpass => "auxiliary (passive)",
            DepLabel::Case => "case marking",
            DepLabel::Cc => "coordinating conjunction",
            DepLabel::Ccomp => "clausal complement",
            DepLabel::Compound => "compound",
            DepLabel::Conj => "conjunct",
            DepLabel::Csubj => "clausal subject",
            DepLabel::Csubjpass => "clausal subject (passive)",
            DepLabel::Dative => "dative",
            DepLabel::Dep => "unclassified dependent",
            DepLabel::Det => "determiner",
            DepLabel::Dobj => "direct object",
            DepLabel::Expl => "expletive",
            DepLabel::Intj => "interjection",
            DepLabel::Mark => "marker",
            DepLabel::Meta => "meta modifier",
            DepLabel::Neg => "negation modifier",
            DepLabel::Nmod => "modifier of nominal",
            DepLabel::Npadvmod => "noun phrase as adverbial modifier",
            DepLabel::Nsubj => "nominal subject",
            DepLabel::Nsubjpass => "nominal subject (passive)",
            DepLabel::Nummod => "numeric modifier",
            DepLabel::Oprd => "object predicate",
            DepLabel::Parataxis => "parataxis",
            DepLabel::Pcomp => "complement of preposition",
            DepLabel::Pobj => "object of preposition",
            DepLabel::Poss => "possession modifier",
            DepLabel::Preconj => "pre-correlative conjunction",
            DepLabel::Predet => "pre-determiner",
            DepLabel::Prep => "prepositional modifier",
            DepLabel::Prt => "particle",
            DepLabel::Punct => "punctuation",
            DepLabel::Quantmod => "modifier of quantifier",
            DepLabel::Relcl => "relative clause modifier",
            DepLabel::Xcomp => "open clausal complement",
            DepLabel::Root => "root",
            DepLabel::Unset => "",
        }
    }
}

impl fmt::Display for DepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cabeça e rótulo atribuídos a um token (índices globais do documento)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub head: usize,
    pub dep: DepLabel,
}

/// Verbos que tomam oração completiva ("I think he left")
const COMPLEMENT_VERBS: &[&str] = &[
    "say", "think", "know", "believe", "hope", "tell", "claim", "report", "announce",
    "expect", "suggest", "wonder", "guess", "feel", "find", "see", "hear", "mean", "admit",
    "deny", "decide", "remember", "forget", "explain", "understand", "notice", "realize",
    "show", "ask",
];

const BE_FORMS: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "'s", "'re", "'m",
];

/// Parser de dependências por regras.
#[derive(Debug, Clone, Default)]
pub struct DependencyParser;

impl DependencyParser {
    pub fn new() -> Self {
        Self
    }

    /// Analisa cada sentença separadamente.
    ///
    /// `tokens` precisa estar com as tags preenchidas; `sentences` deve
    /// particionar os tokens. O resultado tem um [`Attachment`] por token e
    /// cada sentença tem exatamente uma raiz.
    pub fn parse(&self, tokens: &[Token], sentences: &[Span]) -> Vec<Attachment> {
        let mut result: Vec<Attachment> = (0..tokens.len())
            .map(|i| Attachment {
                head: i,
                dep: DepLabel::Root,
            })
            .collect();

        for sent in sentences {
            if sent.is_empty() || sent.end > tokens.len() {
                continue;
            }
            let local = SentenceParse::new(&tokens[sent.start..sent.end]).run();
            for (offset, attachment) in local.into_iter().enumerate() {
                result[sent.start + offset] = Attachment {
                    head: sent.start + attachment.head,
                    dep: attachment.dep,
                };
            }
        }
        result
    }
}

/// Sintagma nominal de base `[start, end)` com seu núcleo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Chunk {
    start: usize,
    end: usize,
    head: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClauseKind {
    Main,
    Xcomp,
    Relcl { relativizer: usize },
    Conj { cc: usize },
    Advcl { marker: usize },
    Ccomp { marker: Option<usize> },
    Acl { noun: usize },
    Pcomp { prep: usize },
}

#[derive(Debug, Clone, Copy)]
struct VerbGroup {
    start: usize,
    end: usize,
    head: usize,
    passive: bool,
    kind: ClauseKind,
}

/// Estado da análise de uma sentença (índices locais)
struct SentenceParse<'a> {
    toks: &'a [Token],
    heads: Vec<Option<usize>>,
    deps: Vec<DepLabel>,
    chunks: Vec<Chunk>,
    groups: Vec<VerbGroup>,
    root: usize,
}

impl<'a> SentenceParse<'a> {
    fn new(toks: &'a [Token]) -> Self {
        Self {
            toks,
            heads: vec![None; toks.len()],
            deps: vec![DepLabel::Dep; toks.len()],
            chunks: Vec::new(),
            groups: Vec::new(),
            root: 0,
        }
    }

    fn run(mut self) -> Vec<Attachment> {
        self.find_chunks();
        self.find_verb_groups();
        self.classify_clauses();
        self.choose_root();
        self.coordinate_noun_phrases();
        self.attach_prepositions();
        for gi in 0..self.groups.len() {
            self.attach_subject(gi);
            self.attach_objects(gi);
        }
        self.attach_clauses();
        self.attach_leftovers();
        self.finish()
    }

    // ---------------------------------------------------------------
    // Acesso
    // ---------------------------------------------------------------

    fn len(&self) -> usize {
        self.toks.len()
    }

    fn tag(&self, i: usize) -> FineTag {
        self.toks[i].tag
    }

    fn pos(&self, i: usize) -> Pos {
        self.toks[i].pos
    }

    fn lower(&self, i: usize) -> &str {
        &self.toks[i].lower
    }

    fn lemma(&self, i: usize) -> &str {
        let lemma = self.toks[i].lemma.as_str();
        if lemma.is_empty() {
            self.lower(i)
        } else {
            lemma
        }
    }

    fn is_be(&self, i: usize) -> bool {
        self.lemma(i) == "be" || BE_FORMS.contains(&self.lower(i))
    }

    fn is_free(&self, i: usize) -> bool {
        self.heads[i].is_none()
    }

    fn attach(&mut self, child: usize, head: usize, dep: DepLabel) {
        if child != head && self.heads[child].is_none() {
            self.heads[child] = Some(head);
            self.deps[child] = dep;
        }
    }

    fn chunk_ending_at(&self, end: usize) -> Option<Chunk> {
        self.chunks.iter().copied().find(|c| c.end == end)
    }

    fn chunk_starting_at(&self, start: usize) -> Option<Chunk> {
        self.chunks.iter().copied().find(|c| c.start == start)
    }

    fn chunk_with_head(&self, head: usize) -> Option<Chunk> {
        self.chunks.iter().copied().find(|c| c.head == head)
    }

    /// Depois de `k` (pulando advérbios) vem um verbo ou modal
    fn verb_follows(&self, k: usize) -> bool {
        (k..self.len())
            .find(|&m| !self.tag(m).is_adverb())
            .map(|m| self.tag(m).is_verb() || self.tag(m) == FineTag::Md)
            .unwrap_or(false)
    }

    // ---------------------------------------------------------------
    // Fase 1: sintagmas nominais
    // ---------------------------------------------------------------

    fn find_chunks(&mut self) {
        let mut i = 0;
        while i < self.len() {
            match self.chunk_at(i) {
                Some(chunk) => {
                    self.chunks.push(chunk);
                    i = chunk.end;
                }
                None => i += 1,
            }
        }
        for chunk in self.chunks.clone() {
            self.attach_chunk_internals(chunk);
        }
    }

    fn chunk_at(&self, i: usize) -> Option<Chunk> {
        use FineTag::*;

        let n = self.len();
        let tag = self.tag(i);
        let single = Some(Chunk {
            start: i,
            end: i + 1,
            head: i,
        });

        match tag {
            Prp | Ex | Wp => return single,
            Dt | Wdt => {
                // "This is great": determinante usado como pronome
                let next = (i + 1 < n).then(|| self.tag(i + 1));
                let stands_alone = next
                    .map(|t| t.is_verb() || t == Md || t == In || t.is_punct())
                    .unwrap_or(true);
                if stands_alone {
                    return single;
                }
            }
            Pdt | PrpS | WpS | Jj | Jjr | Jjs | Cd | Nn | Nns | Nnp | Nnps | Dollar | Add => {}
            Rb | Rbr | Rbs if i + 1 < n && self.tag(i + 1).is_adjective() => {}
            _ => return None,
        }

        let mut j = i + 1;
        while j < n {
            let t = self.tag(j);
            let prev = self.tag(j - 1);
            let continues = match t {
                Jj | Jjr | Jjs | Cd | Nn | Nns | Nnp | Nnps | Dollar => true,
                Possessive => is_nominal(prev),
                Hyph => {
                    j + 1 < n && {
                        let next = self.tag(j + 1);
                        next.is_adjective() || next.is_noun() || next == Cd
                    }
                }
                Dt => prev == Pdt,
                Rb | Rbr | Rbs => j + 1 < n && self.tag(j + 1).is_adjective(),
                _ => false,
            };
            if !continues {
                break;
            }
            j += 1;
        }

        // O sintagma termina no último nominal
        let mut end = j;
        while end > i && !is_nominal(self.tag(end - 1)) {
            end -= 1;
        }
        if end == i {
            return None;
        }
        Some(Chunk {
            start: i,
            end,
            head: self.chunk_head(i, end),
        })
    }

    /// Núcleo: último nominal (não numeral) depois do último possessivo
    fn chunk_head(&self, start: usize, end: usize) -> usize {
        let segment = (start..end)
            .rev()
            .find(|&k| self.tag(k) == FineTag::Possessive)
            .map(|k| k + 1)
            .unwrap_or(start);
        (segment..end)
            .rev()
            .find(|&k| is_nominal(self.tag(k)) && self.tag(k) != FineTag::Cd)
            .unwrap_or(end - 1)
    }

    fn attach_chunk_internals(&mut self, chunk: Chunk) {
        let mut segment = chunk.start;
        for k in chunk.start..chunk.end {
            if self.tag(k) != FineTag::Possessive {
                continue;
            }
            // "John 's dog": John --poss--> dog, 's --case--> John
            let owner = (segment..k)
                .rev()
                .find(|&m| is_nominal(self.tag(m)) && self.tag(m) != FineTag::Cd)
                .unwrap_or(k - 1);
            self.attach_modifiers(segment, k, owner);
            self.attach(k, owner, DepLabel::Case);
            self.attach(owner, chunk.head, DepLabel::Poss);
            segment = k + 1;
        }
        self.attach_modifiers(segment, chunk.end, chunk.head);
    }

    fn attach_modifiers(&mut self, start: usize, end: usize, head: usize) {
        use FineTag::*;

        for k in start..end {
            if k == head {
                continue;
            }
            let (target, dep) = match self.tag(k) {
                Dt | Wdt => (head, DepLabel::Det),
                Pdt => (head, DepLabel::Predet),
                PrpS | WpS => (head, DepLabel::Poss),
                Jj | Jjr | Jjs => (head, DepLabel::Amod),
                Cd if k + 1 < end && self.tag(k + 1) == Cd => (k + 1, DepLabel::Compound),
                Cd => (head, DepLabel::Nummod),
                Rb | Rbr | Rbs if k + 1 < end => (k + 1, DepLabel::Advmod),
                Hyph => (head, DepLabel::Punct),
                _ => (head, DepLabel::Compound),
            };
            self.attach(k, target, dep);
        }
    }

    // ---------------------------------------------------------------
    // Fase 2: grupos verbais
    // ---------------------------------------------------------------

    fn find_verb_groups(&mut self) {
        let n = self.len();
        let mut in_chunk = vec![false; n];
        for chunk in &self.chunks {
            for flag in &mut in_chunk[chunk.start..chunk.end] {
                *flag = true;
            }
        }

        let mut i = 0;
        while i < n {
            let tag = self.tag(i);
            let starts = tag == FineTag::Md
                || tag.is_verb()
                || (tag == FineTag::To && self.verb_follows(i + 1));
            if in_chunk[i] || !starts {
                i += 1;
                continue;
            }

            let start = i;
            let mut head = None;
            let mut j = i;
            while j < n && !in_chunk[j] {
                let t = self.tag(j);
                if t == FineTag::Md || (t == FineTag::To && j == start) {
                    j += 1;
                } else if t.is_verb() {
                    if self.pos(j) == Pos::Aux && self.verb_follows(j + 1) {
                        j += 1;
                    } else {
                        head = Some(j);
                        break;
                    }
                } else if t.is_adverb() && self.verb_follows(j) {
                    j += 1;
                } else {
                    break;
                }
            }
            let head = head
                .or_else(|| {
                    (start..j)
                        .rev()
                        .find(|&k| self.tag(k) == FineTag::Md || self.tag(k).is_verb())
                })
                .unwrap_or(start);

            let mut group = VerbGroup {
                start,
                end: head + 1,
                head,
                passive: false,
                kind: ClauseKind::Main,
            };
            for k in start..head {
                let dep = match self.tag(k) {
                    FineTag::Md | FineTag::To => DepLabel::Aux,
                    t if t.is_verb() => {
                        let last_aux = (k + 1..head).all(|m| !self.tag(m).is_verb());
                        if self.is_be(k) && self.tag(head) == FineTag::Vbn && last_aux {
                            group.passive = true;
                            DepLabel::Auxpass
                        } else {
                            DepLabel::Aux
                        }
                    }
                    _ if is_negation(self.lower(k)) => DepLabel::Neg,
                    _ => DepLabel::Advmod,
                };
                self.attach(k, head, dep);
            }
            self.groups.push(group);
            i = head + 1;
        }
    }

    // ---------------------------------------------------------------
    // Fase 3: orações
    // ---------------------------------------------------------------

    fn classify_clauses(&mut self) {
        let mut has_main = false;
        for gi in 0..self.groups.len() {
            let group = self.groups[gi];
            let lower_bound = if gi == 0 { 0 } else { self.groups[gi - 1].end };
            let prev_head = (gi > 0).then(|| self.groups[gi - 1].head);
            let later_groups = gi + 1 < self.groups.len();

            let preceding_prep = (group.start > 0
                && group.start == group.head
                && self.tag(group.head) == FineTag::Vbg
                && self.is_preposition(group.start - 1))
            .then(|| group.start - 1);

            let kind = if self.tag(group.start) == FineTag::To {
                ClauseKind::Xcomp
            } else if let Some(prep) = preceding_prep {
                ClauseKind::Pcomp { prep }
            } else if let Some(kind) = self.clause_marker(lower_bound, group.start, prev_head) {
                kind
            } else if let Some(noun) = self
                .reduced_relative(&group)
                .filter(|_| has_main || later_groups)
            {
                ClauseKind::Acl { noun }
            } else if !has_main {
                has_main = true;
                ClauseKind::Main
            } else {
                ClauseKind::Ccomp { marker: None }
            };
            self.groups[gi].kind = kind;
        }
    }

    /// Procura, da direita para a esquerda, o elemento que introduz a oração
    fn clause_marker(&self, lo: usize, hi: usize, prev_head: Option<usize>) -> Option<ClauseKind> {
        for k in (lo..hi).rev() {
            match self.tag(k) {
                FineTag::Wdt | FineTag::Wp => {
                    let standalone = self
                        .chunks
                        .iter()
                        .any(|c| c.start == k && c.end == k + 1);
                    let after_noun = self.chunk_ending_at(k).is_some()
                        || (k >= 1
                            && self.tag(k - 1) == FineTag::Comma
                            && self.chunk_ending_at(k - 1).is_some());
                    if standalone && after_noun {
                        return Some(ClauseKind::Relcl { relativizer: k });
                    }
                }
                FineTag::In if self.pos(k) == Pos::Sconj => {
                    return Some(self.subordinate(k, prev_head));
                }
                FineTag::Wrb => return Some(self.subordinate(k, prev_head)),
                FineTag::Cc if prev_head.is_some() => {
                    return Some(ClauseKind::Conj { cc: k });
                }
                _ => {}
            }
        }
        None
    }

    fn subordinate(&self, marker: usize, prev_head: Option<usize>) -> ClauseKind {
        let after_complement_verb = prev_head
            .map(|h| COMPLEMENT_VERBS.contains(&self.lemma(h)))
            .unwrap_or(false);
        let lower = self.lower(marker);
        let completive = lower == "that"
            || (after_complement_verb
                && (matches!(lower, "whether" | "if") || self.tag(marker) == FineTag::Wrb));
        if completive {
            ClauseKind::Ccomp {
                marker: Some(marker),
            }
        } else {
            ClauseKind::Advcl { marker }
        }
    }

    /// "the man sitting there": particípio sem auxiliar logo depois de um nome
    fn reduced_relative(&self, group: &VerbGroup) -> Option<usize> {
        let participle = matches!(self.tag(group.head), FineTag::Vbg | FineTag::Vbn);
        if group.start != group.head || !participle {
            return None;
        }
        self.chunk_ending_at(group.start).map(|c| c.head)
    }

    fn is_preposition(&self, k: usize) -> bool {
        let tag = self.tag(k);
        (tag == FineTag::In && self.pos(k) == Pos::Adp)
            || (tag == FineTag::To && !self.groups.iter().any(|g| g.start == k))
    }

    fn choose_root(&mut self) {
        let main = self
            .groups
            .iter()
            .find(|g| g.kind == ClauseKind::Main)
            .or_else(|| {
                self.groups
                    .iter()
                    .find(|g| !matches!(g.kind, ClauseKind::Pcomp { .. }))
            })
            .or_else(|| self.groups.first())
            .map(|g| g.head);
        let root = main
            .or_else(|| self.chunks.first().map(|c| c.head))
            .or_else(|| (0..self.len()).find(|&k| !self.tag(k).is_punct()))
            .unwrap_or(0);

        self.root = root;
        self.heads[root] = Some(root);
        self.deps[root] = DepLabel::Root;
    }

    // ---------------------------------------------------------------
    // Fase 4: argumentos
    // ---------------------------------------------------------------

    fn is_clause_cc(&self, k: usize) -> bool {
        self.groups
            .iter()
            .any(|g| g.kind == ClauseKind::Conj { cc: k })
    }

    /// "Tom, Sam and Ann": cada conjunto vira `conj` do primeiro
    fn coordinate_noun_phrases(&mut self) {
        let mut k = 0;
        while k < self.chunks.len() {
            let mut members = vec![k];
            let mut separators = Vec::new();
            let mut cc = None;
            let mut m = k;
            while m + 1 < self.chunks.len() && cc.is_none() {
                let (a, b) = (self.chunks[m], self.chunks[m + 1]);
                let between: Vec<usize> = (a.end..b.start).collect();
                let coordinator = |s: usize| self.tag(s) == FineTag::Cc && !self.is_clause_cc(s);
                let separated = match between.as_slice() {
                    [s] if self.tag(*s) == FineTag::Comma => true,
                    [s] if coordinator(*s) => {
                        cc = Some(*s);
                        true
                    }
                    [s, t] if self.tag(*s) == FineTag::Comma && coordinator(*t) => {
                        cc = Some(*t);
                        true
                    }
                    _ => false,
                };
                if !separated {
                    break;
                }
                members.push(m + 1);
                separators.extend(between);
                m += 1;
            }

            match cc {
                Some(cc) => {
                    let head = self.chunks[k].head;
                    for &member in &members[1..] {
                        let conjunct = self.chunks[member].head;
                        self.attach(conjunct, head, DepLabel::Conj);
                    }
                    for s in separators {
                        let dep = if s == cc { DepLabel::Cc } else { DepLabel::Punct };
                        self.attach(s, head, dep);
                    }
                    k = m + 1;
                }
                None => k += 1,
            }
        }
    }

    fn attach_prepositions(&mut self) {
        for p in 0..self.len() {
            if !self.is_free(p) || !self.is_preposition(p) {
                continue;
            }
            if let Some(object) = self.chunk_starting_at(p + 1) {
                self.attach(object.head, p, DepLabel::Pobj);
            } else if let Some(group) = self
                .groups
                .iter()
                .copied()
                .find(|g| g.kind == ClauseKind::Pcomp { prep: p })
            {
                self.attach(group.head, p, DepLabel::Pcomp);
            }
            let (head, dep) = self.preposition_head(p);
            self.attach(p, head, dep);
        }
    }

    /// "of" liga ao nome anterior; as demais ao verbo mais próximo à esquerda
    fn preposition_head(&self, p: usize) -> (usize, DepLabel) {
        let previous_chunk = self.chunk_ending_at(p);
        if self.lower(p) == "of" {
            if let Some(chunk) = previous_chunk {
                return (chunk.head, DepLabel::Prep);
            }
        }
        if let Some(group) = self.groups.iter().rev().find(|g| g.end <= p) {
            let dep = if self.lower(p) == "by" && group.passive {
                DepLabel::Agent
            } else {
                DepLabel::Prep
            };
            return (group.head, dep);
        }
        if let Some(chunk) = previous_chunk {
            return (chunk.head, DepLabel::Prep);
        }
        let following = self
            .groups
            .iter()
            .find(|g| g.start > p && g.kind != ClauseKind::Pcomp { prep: p })
            .map(|g| g.head);
        (following.unwrap_or(self.root), DepLabel::Prep)
    }

    /// Limite esquerdo da região de sujeito de uma oração sem marcador
    fn unmarked_lower_bound(&self, gi: usize) -> usize {
        self.groups[..gi]
            .iter()
            .rev()
            .find(|g| {
                !matches!(
                    g.kind,
                    ClauseKind::Relcl { .. } | ClauseKind::Acl { .. } | ClauseKind::Pcomp { .. }
                )
            })
            .map(|g| g.end)
            .unwrap_or(0)
    }

    fn attach_subject(&mut self, gi: usize) {
        let group = self.groups[gi];
        let region = match group.kind {
            ClauseKind::Relcl { relativizer } => {
                let object_relative = self
                    .chunks
                    .iter()
                    .any(|c| c.start > relativizer && c.end <= group.start && self.is_free(c.head));
                let dep = if object_relative {
                    DepLabel::Dobj
                } else if group.passive {
                    DepLabel::Nsubjpass
                } else {
                    DepLabel::Nsubj
                };
                self.attach(relativizer, group.head, dep);
                object_relative.then_some(relativizer + 1)
            }
            ClauseKind::Advcl { marker }
            | ClauseKind::Ccomp {
                marker: Some(marker),
            } => {
                let dep = if self.tag(marker) == FineTag::Wrb {
                    DepLabel::Advmod
                } else {
                    DepLabel::Mark
                };
                self.attach(marker, group.head, dep);
                Some(marker + 1)
            }
            ClauseKind::Conj { cc } => {
                if let Some(prev) = self.previous_group_head(gi) {
                    self.attach(cc, prev, DepLabel::Cc);
                }
                Some(cc + 1)
            }
            ClauseKind::Main | ClauseKind::Ccomp { marker: None } => {
                Some(self.unmarked_lower_bound(gi))
            }
            ClauseKind::Xcomp | ClauseKind::Acl { .. } | ClauseKind::Pcomp { .. } => None,
        };

        let Some(lo) = region else {
            return;
        };
        let subject = self
            .chunks
            .iter()
            .rev()
            .copied()
            .find(|c| c.start >= lo && c.end <= group.start && self.is_free(c.head));
        if let Some(chunk) = subject {
            let dep = if self.tag(chunk.head) == FineTag::Ex {
                DepLabel::Expl
            } else if group.passive {
                DepLabel::Nsubjpass
            } else {
                DepLabel::Nsubj
            };
            self.attach(chunk.head, group.head, dep);
        }
    }

    fn attach_objects(&mut self, gi: usize) {
        let group = self.groups[gi];
        let next = self.groups.get(gi + 1).copied();
        let hi = match next.map(|g| g.kind) {
            Some(ClauseKind::Conj { cc }) => cc,
            Some(ClauseKind::Advcl { marker }) => marker,
            Some(ClauseKind::Ccomp {
                marker: Some(marker),
            }) => marker,
            Some(ClauseKind::Relcl { relativizer }) => relativizer,
            Some(ClauseKind::Pcomp { prep }) => prep,
            Some(_) => next.map(|g| g.start).unwrap_or(self.len()),
            None => self.len(),
        };
        // O sintagma colado a uma oração sem marcador é o sujeito dela
        let reserved = next
            .filter(|g| matches!(g.kind, ClauseKind::Main | ClauseKind::Ccomp { marker: None }))
            .map(|g| g.start);

        let mut objects = Vec::new();
        for chunk in self.chunks.iter().copied() {
            if chunk.start < group.end || chunk.end > hi || !self.is_free(chunk.head) {
                continue;
            }
            if Some(chunk.end) == reserved {
                continue;
            }
            if self.tag(chunk.start - 1).is_punct() {
                break;
            }
            objects.push(chunk);
        }

        if self.pos(group.head) == Pos::Aux {
            if let Some(first) = objects.first() {
                self.attach(first.head, group.head, DepLabel::Attr);
            }
            return;
        }
        match objects.as_slice() {
            [first, second, ..] if first.end == second.start => {
                self.attach(first.head, group.head, DepLabel::Dative);
                self.attach(second.head, group.head, DepLabel::Dobj);
            }
            [first, ..] => self.attach(first.head, group.head, DepLabel::Dobj),
            [] => {}
        }
    }

    fn previous_group_head(&self, gi: usize) -> Option<usize> {
        self.groups[..gi]
            .iter()
            .rev()
            .find(|g| !matches!(g.kind, ClauseKind::Pcomp { .. }))
            .map(|g| g.head)
    }

    fn attach_clauses(&mut self) {
        for gi in 0..self.groups.len() {
            let group = self.groups[gi];
            if !self.is_free(group.head) {
                continue;
            }
            let prev = self.previous_group_head(gi);
            let (head, dep) = match group.kind {
                ClauseKind::Main => continue,
                ClauseKind::Xcomp => match prev {
                    Some(p) => (p, DepLabel::Xcomp),
                    None => (self.root, DepLabel::Advcl),
                },
                ClauseKind::Conj { .. } => (prev.unwrap_or(self.root), DepLabel::Conj),
                ClauseKind::Ccomp { .. } => (prev.unwrap_or(self.root), DepLabel::Ccomp),
                ClauseKind::Advcl { .. } => {
                    if group.start < self.root {
                        (self.root, DepLabel::Advcl)
                    } else {
                        (prev.unwrap_or(self.root), DepLabel::Advcl)
                    }
                }
                ClauseKind::Relcl { relativizer } => {
                    let antecedent = self.chunk_ending_at(relativizer).or_else(|| {
                        relativizer
                            .checked_sub(1)
                            .and_then(|k| self.chunk_ending_at(k))
                    });
                    match antecedent {
                        Some(chunk) => (chunk.head, DepLabel::Relcl),
                        None => (prev.unwrap_or(self.root), DepLabel::Ccomp),
                    }
                }
                ClauseKind::Acl { noun } => (noun, DepLabel::Acl),
                ClauseKind::Pcomp { prep } => (prep, DepLabel::Pcomp),
            };
            self.attach(group.head, head, dep);
        }
    }

    // ---------------------------------------------------------------
    // Fase 5: sobras
    // ---------------------------------------------------------------

    fn nearest_verb(&self, k: usize) -> Option<usize> {
        self.groups
            .iter()
            .map(|g| g.head)
            .min_by_key(|&h| (h.abs_diff(k), h > k))
    }

    fn left_verb(&self, k: usize) -> Option<usize> {
        self.groups.iter().rev().map(|g| g.head).find(|&h| h < k)
    }

    fn attach_leftovers(&mut self) {
        use FineTag::*;

        for k in 0..self.len() {
            if !self.is_free(k) {
                continue;
            }
            let tag = self.tag(k);
            let next_tag = (k + 1 < self.len()).then(|| self.tag(k + 1));
            let (head, dep) = if tag.is_punct() || self.pos(k) == Pos::Punct {
                (self.root, DepLabel::Punct)
            } else {
                match tag {
                    Possessive if k > 0 => (k - 1, DepLabel::Case),
                    Jj | Jjr | Jjs => {
                        if let Some(verb) = self.left_verb(k) {
                            (verb, DepLabel::Acomp)
                        } else if let Some(chunk) = self.chunks.iter().find(|c| c.start > k) {
                            (chunk.head, DepLabel::Amod)
                        } else {
                            (self.root, DepLabel::Dep)
                        }
                    }
                    Rb | Rbr | Rbs | Wrb => {
                        let dep = if is_negation(self.lower(k)) {
                            DepLabel::Neg
                        } else {
                            DepLabel::Advmod
                        };
                        let modifies_next = next_tag
                            .map(|t| t.is_adjective() || t.is_adverb())
                            .unwrap_or(false);
                        if modifies_next && dep == DepLabel::Advmod {
                            (k + 1, dep)
                        } else {
                            (self.nearest_verb(k).unwrap_or(self.root), dep)
                        }
                    }
                    Rp => (self.left_verb(k).unwrap_or(self.root), DepLabel::Prt),
                    Cc => (self.root, DepLabel::Cc),
                    Uh => (self.root, DepLabel::Intj),
                    Ex => (self.nearest_verb(k).unwrap_or(self.root), DepLabel::Expl),
                    _ => match self.chunk_with_head(k) {
                        Some(chunk) => self.loose_noun_phrase(chunk),
                        None => (self.root, DepLabel::Dep),
                    },
                }
            };
            self.attach(k, head, dep);
        }
    }

    /// Sintagma nominal sem papel: aposto depois de vírgula ou adjunto adverbial
    fn loose_noun_phrase(&self, chunk: Chunk) -> (usize, DepLabel) {
        if chunk.start >= 2 && self.tag(chunk.start - 1) == FineTag::Comma {
            if let Some(previous) = self.chunk_ending_at(chunk.start - 1) {
                return (previous.head, DepLabel::Appos);
            }
        }
        match self.nearest_verb(chunk.head) {
            Some(verb) => (verb, DepLabel::Npadvmod),
            None => (self.root, DepLabel::Dep),
        }
    }

    /// Fecha tokens soltos na raiz e quebra ciclos
    fn finish(self) -> Vec<Attachment> {
        let n = self.len();
        let root = self.root;
        let mut heads: Vec<usize> = self.heads.iter().map(|h| h.unwrap_or(root)).collect();
        let mut deps = self.deps;
        for i in 0..n {
            if self.heads[i].is_none() {
                deps[i] = DepLabel::Dep;
            }
        }
        heads[root] = root;
        deps[root] = DepLabel::Root;

        for i in 0..n {
            let mut current = i;
            let mut steps = 0;
            while heads[current] != current {
                current = heads[current];
                steps += 1;
                if steps > n {
                    heads[i] = root;
                    deps[i] = DepLabel::Dep;
                    break;
                }
            }
        }

        heads
            .into_iter()
            .zip(deps)
            .map(|(head, dep)| Attachment { head, dep })
            .collect()
    }
}

fn is_nominal(tag: FineTag) -> bool {
    use FineTag::*;
    matches!(tag, Nn | Nns | Nnp | Nnps | Dollar | Cd | Prp | Ex | Wp | Add)
}

fn is_negation(lower: &str) -> bool {
    matches!(lower, "not" | "n't" | "n\u{2019}t" | "never")
}

/// Rótulos cujo núcleo nominal forma um noun chunk
const NP_DEPS: [DepLabel; 10] = [
    DepLabel::Oprd,
    DepLabel::Nsubj,
    DepLabel::Dobj,
    DepLabel::Nsubjpass,
    DepLabel::Pcomp,
    DepLabel::Pobj,
    DepLabel::Dative,
    DepLabel::Appos,
    DepLabel::Attr,
    DepLabel::Root,
];

/// Noun chunks de um documento analisado: do `left_edge` até o núcleo,
/// sem aninhamento.
pub(crate) fn noun_chunk_spans(doc: &Document) -> Vec<Span> {
    let tokens = doc.tokens();
    let mut chunks = Vec::new();
    let mut prev_end: Option<usize> = None;

    for (i, word) in tokens.iter().enumerate() {
        if !matches!(word.pos, Pos::Noun | Pos::Propn | Pos::Pron) {
            continue;
        }
        let left = doc.left_edge(i);
        if prev_end.map(|end| left <= end).unwrap_or(false) {
            continue;
        }
        let qualifies = if NP_DEPS.contains(&word.dep) {
            true
        } else if word.dep == DepLabel::Conj {
            // Sobe pela cadeia de conjuntos até o primeiro
            let mut head = word.head;
            while tokens[head].dep == DepLabel::Conj && tokens[head].head < head {
                head = tokens[head].head;
            }
            NP_DEPS.contains(&tokens[head].dep)
        } else {
            false
        };
        if qualifies {
            prev_end = Some(i);
            chunks.push(Span::with_label(left, i + 1, "NP"));
        }
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Component;
    use FineTag::*;

    /// Monta tokens separados por espaço com tags e lemas dados
    fn annotated(words: &[(&str, FineTag, Pos, &str)]) -> (String, Vec<Token>) {
        let mut text = String::new();
        let mut tokens = Vec::new();
        for (i, &(word, tag, pos, lemma)) in words.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            let mut token = Token::bare(word, text.len(), i + 1 < words.len(), i);
            token.tag = tag;
            token.pos = pos;
            token.lemma = lemma.to_string();
            text.push_str(word);
            tokens.push(token);
        }
        (text, tokens)
    }

    fn parse(words: &[(&str, FineTag, Pos, &str)]) -> Document {
        let (text, mut tokens) = annotated(words);
        let sentences = [Span::new(0, tokens.len())];
        let attachments = DependencyParser::new().parse(&tokens, &sentences);
        for (token, attachment) in tokens.iter_mut().zip(attachments) {
            token.head = attachment.head;
            token.dep = attachment.dep;
        }
        Document::from_parts(
            text,
            tokens,
            vec![],
            vec![Component::Tagger, Component::Parser],
        )
        .unwrap()
    }

    fn arcs(doc: &Document) -> Vec<(&str, DepLabel, &str)> {
        doc.tokens()
            .iter()
            .map(|t| {
                (
                    t.text.as_str(),
                    t.dep,
                    doc.tokens()[t.head].text.as_str(),
                )
            })
            .collect()
    }

    #[test]
    fn test_label_strings() {
        assert_eq!(DepLabel::Root.as_str(), "ROOT");
        assert_eq!(DepLabel::from_label("root"), Some(DepLabel::Root));
        assert_eq!(DepLabel::from_label("NSUBJ"), Some(DepLabel::Nsubj));
        assert_eq!(DepLabel::from_label("xyz"), None);
        assert_eq!(serde_json::to_string(&DepLabel::Root).unwrap(), "\"ROOT\"");
        assert_eq!(serde_json::to_string(&DepLabel::Dobj).unwrap(), "\"dobj\"");
    }

    #[test]
    fn test_simple_transitive() {
        let doc = parse(&[
            ("Tom", Nnp, Pos::Propn, "Tom"),
            ("met", Vbd, Pos::Verb, "meet"),
            ("Sam", Nnp, Pos::Propn, "Sam"),
            (".", Period, Pos::Punct, "."),
        ]);
        assert_eq!(
            arcs(&doc),
            vec![
                ("Tom", DepLabel::Nsubj, "met"),
                ("met", DepLabel::Root, "met"),
                ("Sam", DepLabel::Dobj, "met"),
                (".", DepLabel::Punct, "met"),
            ]
        );
    }

    #[test]
    fn test_noun_phrase_modifiers() {
        let doc = parse(&[
            ("a", Dt, Pos::Det, "a"),
            ("red", Jj, Pos::Adj, "red"),
            ("big", Jj, Pos::Adj, "big"),
            ("dog", Nn, Pos::Noun, "dog"),
            ("barked", Vbd, Pos::Verb, "bark"),
        ]);
        assert_eq!(
            arcs(&doc),
            vec![
                ("a", DepLabel::Det, "dog"),
                ("red", DepLabel::Amod, "dog"),
                ("big", DepLabel::Amod, "dog"),
                ("dog", DepLabel::Nsubj, "barked"),
                ("barked", DepLabel::Root, "barked"),
            ]
        );
        let chunks = doc.noun_chunks().unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text(&doc), "a red big dog");
    }

    #[test]
    fn test_copula_with_adjective() {
        let doc = parse(&[
            ("The", Dt, Pos::Det, "the"),
            ("dog", Nn, Pos::Noun, "dog"),
            ("is", Vbz, Pos::Aux, "be"),
            ("happy", Jj, Pos::Adj, "happy"),
        ]);
        let arcs = arcs(&doc);
        assert_eq!(arcs[1], ("dog", DepLabel::Nsubj, "is"));
        assert_eq!(arcs[2], ("is", DepLabel::Root, "is"));
        assert_eq!(arcs[3], ("happy", DepLabel::Acomp, "is"));
    }

    #[test]
    fn test_auxiliary_negation_and_infinitive() {
        let doc = parse(&[
            ("He", Prp, Pos::Pron, "he"),
            ("does", Vbz, Pos::Aux, "do"),
            ("n't", Rb, Pos::Part, "not"),
            ("want", Vb, Pos::Verb, "want"),
            ("to", To, Pos::Part, "to"),
            ("play", Vb, Pos::Verb, "play"),
        ]);
        assert_eq!(
            arcs(&doc),
            vec![
                ("He", DepLabel::Nsubj, "want"),
                ("does", DepLabel::Aux, "want"),
                ("n't", DepLabel::Neg, "want"),
                ("want", DepLabel::Root, "want"),
                ("to", DepLabel::Aux, "play"),
                ("play", DepLabel::Xcomp, "want"),
            ]
        );
    }

    #[test]
    fn test_fronted_adverbial_clause() {
        let doc = parse(&[
            ("Because", In, Pos::Sconj, "because"),
            ("it", Prp, Pos::Pron, "it"),
            ("rained", Vbd, Pos::Verb, "rain"),
            (",", Comma, Pos::Punct, ","),
            ("we", Prp, Pos::Pron, "we"),
            ("stayed", Vbd, Pos::Verb, "stay"),
            ("home", Nn, Pos::Noun, "home"),
            (".", Period, Pos::Punct, "."),
        ]);
        let arcs = arcs(&doc);
        assert_eq!(arcs[0], ("Because", DepLabel::Mark, "rained"));
        assert_eq!(arcs[1], ("it", DepLabel::Nsubj, "rained"));
        assert_eq!(arcs[2], ("rained", DepLabel::Advcl, "stayed"));
        assert_eq!(arcs[4], ("we", DepLabel::Nsubj, "stayed"));
        assert_eq!(arcs[5], ("stayed", DepLabel::Root, "stayed"));
        assert_eq!(arcs[6], ("home", DepLabel::Dobj, "stayed"));
    }

    #[test]
    fn test_passive_relative_clause_with_agent() {
        let doc = parse(&[
            ("The", Dt, Pos::Det, "the"),
            ("man", Nn, Pos::Noun, "man"),
            ("who", Wp, Pos::Pron, "who"),
            ("was", Vbd, Pos::Aux, "be"),
            ("bitten", Vbn, Pos::Verb, "bite"),
            ("by", In, Pos::Adp, "by"),
            ("the", Dt, Pos::Det, "the"),
            ("dog", Nn, Pos::Noun, "dog"),
            ("left", Vbd, Pos::Verb, "leave"),
            (".", Period, Pos::Punct, "."),
        ]);
        let arcs = arcs(&doc);
        assert_eq!(arcs[1], ("man", DepLabel::Nsubj, "left"));
        assert_eq!(arcs[2], ("who", DepLabel::Nsubjpass, "bitten"));
        assert_eq!(arcs[3], ("was", DepLabel::Auxpass, "bitten"));
        assert_eq!(arcs[4], ("bitten", DepLabel::Relcl, "man"));
        assert_eq!(arcs[5], ("by", DepLabel::Agent, "bitten"));
        assert_eq!(arcs[7], ("dog", DepLabel::Pobj, "by"));
        assert_eq!(arcs[8], ("left", DepLabel::Root, "left"));

        let chunks: Vec<&str> = doc
            .noun_chunks()
            .unwrap()
            .iter()
            .map(|c| c.text(&doc))
            .collect();
        assert_eq!(chunks, vec!["The man", "who", "the dog"]);
    }

    #[test]
    fn test_clausal_complement() {
        let doc = parse(&[
            ("I", Prp, Pos::Pron, "I"),
            ("think", Vbp, Pos::Verb, "think"),
            ("he", Prp, Pos::Pron, "he"),
            ("left", Vbd, Pos::Verb, "leave"),
        ]);
        assert_eq!(
            arcs(&doc),
            vec![
                ("I", DepLabel::Nsubj, "think"),
                ("think", DepLabel::Root, "think"),
                ("he", DepLabel::Nsubj, "left"),
                ("left", DepLabel::Ccomp, "think"),
            ]
        );
    }

    #[test]
    fn test_coordinated_objects_and_possessive() {
        let doc = parse(&[
            ("John", Nnp, Pos::Propn, "John"),
            ("'s", Possessive, Pos::Part, "'s"),
            ("dog", Nn, Pos::Noun, "dog"),
            ("chased", Vbd, Pos::Verb, "chase"),
            ("cats", Nns, Pos::Noun, "cat"),
            ("and", Cc, Pos::Cconj, "and"),
            ("birds", Nns, Pos::Noun, "bird"),
        ]);
        let arcs = arcs(&doc);
        assert_eq!(arcs[0], ("John", DepLabel::Poss, "dog"));
        assert_eq!(arcs[1], ("'s", DepLabel::Case, "John"));
        assert_eq!(arcs[2], ("dog", DepLabel::Nsubj, "chased"));
        assert_eq!(arcs[4], ("cats", DepLabel::Dobj, "chased"));
        assert_eq!(arcs[5], ("and", DepLabel::Cc, "cats"));
        assert_eq!(arcs[6], ("birds", DepLabel::Conj, "cats"));

        let chunks: Vec<&str> = doc
            .noun_chunks()
            .unwrap()
            .iter()
            .map(|c| c.text(&doc))
            .collect();
        assert_eq!(chunks, vec!["John 's dog", "cats", "birds"]);
    }

    #[test]
    fn test_prepositional_attachment() {
        let doc = parse(&[
            ("She", Prp, Pos::Pron, "she"),
            ("ate", Vbd, Pos::Verb, "eat"),
            ("a", Dt, Pos::Det, "a"),
            ("slice", Nn, Pos::Noun, "slice"),
            ("of", In, Pos::Adp, "of"),
            ("cake", Nn, Pos::Noun, "cake"),
            ("in", In, Pos::Adp, "in"),
            ("Paris", Nnp, Pos::Propn, "Paris"),
        ]);
        let arcs = arcs(&doc);
        assert_eq!(arcs[3], ("slice", DepLabel::Dobj, "ate"));
        assert_eq!(arcs[4], ("of", DepLabel::Prep, "slice"));
        assert_eq!(arcs[5], ("cake", DepLabel::Pobj, "of"));
        assert_eq!(arcs[6], ("in", DepLabel::Prep, "ate"));
        assert_eq!(arcs[7], ("Paris", DepLabel::Pobj, "in"));
    }

    #[test]
    fn test_every_sentence_has_one_root() {
        let (_, tokens) = annotated(&[
            ("Hello", Uh, Pos::Intj, "hello"),
            ("!", Period, Pos::Punct, "!"),
            ("Dogs", Nns, Pos::Noun, "dog"),
            ("bark", Vbp, Pos::Verb, "bark"),
            (".", Period, Pos::Punct, "."),
        ]);
        let sentences = [Span::new(0, 2), Span::new(2, 5)];
        let attachments = DependencyParser::new().parse(&tokens, &sentences);
        let roots: Vec<usize> = attachments
            .iter()
            .enumerate()
            .filter(|(i, a)| a.head == *i)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(roots, vec![0, 3]);
        assert!(attachments[..2].iter().all(|a| a.head < 2));
        assert!(attachments[2..].iter().all(|a| (2..5).contains(&a.head)));
    }
}
