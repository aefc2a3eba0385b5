//! # Léxico do Inglês
//!
//! Dicionário forma → (tag Penn, lema) usado pelo POS tagger como **prior**
//! e pelo lematizador como tabela de exceções. As entradas de cada forma ficam
//! na ordem de preferência em que foram inseridas: a primeira é a leitura mais
//! comum daquela palavra fora de contexto.
//!
//! O léxico é montado a partir de listas compactas:
//!
//! - **classes fechadas** (determinantes, pronomes, preposições, auxiliares),
//!   com tag e lema explícitos;
//! - **verbos irregulares** (base, passado, particípio);
//! - **verbos, substantivos, adjetivos e advérbios regulares**, cujas formas
//!   flexionadas são geradas pelas regras de morfologia deste módulo.
//!
//! Também guarda a lista de *stop words*.

use std::collections::{HashMap, HashSet};

use crate::tagger::{FineTag, Pos};

/// Uma leitura possível de uma forma: tag fina + lema.
#[derive(Debug, Clone, PartialEq)]
pub struct LexEntry {
    pub tag: FineTag,
    pub lemma: String,
}

/// Léxico forma (lowercase) → leituras.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<LexEntry>>,
    /// Índice de lemas conhecidos por classe aberta (NOUN, VERB, ADJ, ADV)
    lemmas: HashMap<Pos, HashSet<String>>,
    stop_words: HashSet<String>,
}

impl Lexicon {
    /// Léxico vazio
    pub fn new() -> Self {
        Self::default()
    }

    /// Léxico de inglês embutido no modelo `en_core_lite`
    pub fn english() -> Self {
        let mut lex = Self::new();

        for &(form, tag, lemma) in CLOSED_CLASS {
            lex.add(form, tag, lemma);
        }
        for &(form, tag, lemma) in ORDINALS {
            lex.add(form, tag, lemma);
        }
        for &(base, past, participle) in IRREGULAR_VERBS {
            lex.add_verb(base, past, participle);
        }
        for &verb in REGULAR_VERBS {
            let past = past_tense(verb);
            lex.add_verb(verb, &past, &past);
        }
        for &noun in NOUNS {
            lex.add(noun, FineTag::Nn, noun);
            lex.add(&plural(noun), FineTag::Nns, noun);
        }
        for &(singular, plural) in IRREGULAR_NOUNS {
            lex.add(singular, FineTag::Nn, singular);
            lex.add(plural, FineTag::Nns, singular);
        }
        for &noun in MASS_NOUNS {
            lex.add(noun, FineTag::Nn, noun);
        }
        for &adj in SHORT_ADJECTIVES {
            lex.add(adj, FineTag::Jj, adj);
            lex.add(&comparative(adj), FineTag::Jjr, adj);
            lex.add(&superlative(adj), FineTag::Jjs, adj);
        }
        for &(base, comp, sup) in IRREGULAR_ADJECTIVES {
            lex.add(base, FineTag::Jj, base);
            lex.add(comp, FineTag::Jjr, base);
            lex.add(sup, FineTag::Jjs, base);
        }
        for &adj in LONG_ADJECTIVES {
            lex.add(adj, FineTag::Jj, adj);
        }
        for &adv in ADVERBS {
            lex.add(adv, FineTag::Rb, adv);
        }

        lex.stop_words = STOP_WORDS.iter().map(|s| s.to_string()).collect();
        lex
    }

    /// Adiciona uma leitura (ignora duplicatas exatas)
    pub fn add(&mut self, form: &str, tag: FineTag, lemma: &str) {
        let entry = LexEntry {
            tag,
            lemma: lemma.to_string(),
        };
        let readings = self.entries.entry(form.to_lowercase()).or_default();
        if !readings.contains(&entry) {
            readings.push(entry);
        }
        if let Some(class) = lemma_class(tag) {
            self.lemmas
                .entry(class)
                .or_default()
                .insert(lemma.to_string());
        }
    }

    /// Adiciona as seis formas de um verbo
    fn add_verb(&mut self, base: &str, past: &str, participle: &str) {
        self.add(base, FineTag::Vb, base);
        self.add(base, FineTag::Vbp, base);
        self.add(&third_person(base), FineTag::Vbz, base);
        self.add(past, FineTag::Vbd, base);
        self.add(participle, FineTag::Vbn, base);
        self.add(&gerund(base), FineTag::Vbg, base);
    }

    /// Todas as leituras de uma forma (lowercase), em ordem de preferência
    pub fn lookup(&self, lower: &str) -> &[LexEntry] {
        self.entries.get(lower).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, lower: &str) -> bool {
        self.entries.contains_key(lower)
    }

    /// Lema registrado para a forma com essa tag exata
    pub fn lemma_for(&self, lower: &str, tag: FineTag) -> Option<&str> {
        self.lookup(lower)
            .iter()
            .find(|e| e.tag == tag)
            .map(|e| e.lemma.as_str())
    }

    /// Verifica se `lemma` é um lema conhecido para a classe aberta `pos`
    pub fn is_known_lemma(&self, pos: Pos, lemma: &str) -> bool {
        self.lemmas
            .get(&pos)
            .map(|set| set.contains(lemma))
            .unwrap_or(false)
    }

    pub fn is_stop(&self, lower: &str) -> bool {
        self.stop_words.contains(lower)
    }

    /// Número de formas distintas
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classe aberta usada no índice de lemas
fn lemma_class(tag: FineTag) -> Option<Pos> {
    match tag {
        FineTag::Nn | FineTag::Nns => Some(Pos::Noun),
        FineTag::Vb | FineTag::Vbd | FineTag::Vbg | FineTag::Vbn | FineTag::Vbp | FineTag::Vbz => {
            Some(Pos::Verb)
        }
        FineTag::Jj | FineTag::Jjr | FineTag::Jjs => Some(Pos::Adj),
        FineTag::Rb | FineTag::Rbr | FineTag::Rbs => Some(Pos::Adv),
        _ => None,
    }
}

// ============================================================
// Morfologia
// ============================================================

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Termina em consoante + "y" (ex: "study", "city")
fn ends_with_consonant_y(word: &str) -> bool {
    let mut rev = word.chars().rev();
    matches!((rev.next(), rev.next()), (Some('y'), Some(c)) if !is_vowel(c))
}

/// Plural regular: "box" → "boxes", "city" → "cities", "dog" → "dogs"
pub fn plural(noun: &str) -> String {
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| noun.ends_with(s)) {
        format!("{noun}es")
    } else if ends_with_consonant_y(noun) {
        format!("{}ies", &noun[..noun.len() - 1])
    } else {
        format!("{noun}s")
    }
}

/// Terceira pessoa do singular: como o plural, mais "go" → "goes"
pub fn third_person(verb: &str) -> String {
    if verb.ends_with('o') && !verb.ends_with("oo") {
        format!("{verb}es")
    } else {
        plural(verb)
    }
}

/// Passado regular: "bark" → "barked", "like" → "liked", "stop" → "stopped"
pub fn past_tense(verb: &str) -> String {
    if verb.ends_with('e') {
        format!("{verb}d")
    } else if ends_with_consonant_y(verb) {
        format!("{}ied", &verb[..verb.len() - 1])
    } else if DOUBLING_VERBS.contains(&verb) {
        format!("{verb}{}ed", last_char(verb))
    } else {
        format!("{verb}ed")
    }
}

/// Gerúndio: "make" → "making", "lie" → "lying", "run" → "running"
pub fn gerund(verb: &str) -> String {
    if let Some(stem) = verb.strip_suffix("ie") {
        format!("{stem}ying")
    } else if verb.ends_with('e') && !["ee", "ye", "oe"].iter().any(|s| verb.ends_with(s)) && verb != "be" {
        format!("{}ing", &verb[..verb.len() - 1])
    } else if DOUBLING_VERBS.contains(&verb) || DOUBLING_GERUNDS.contains(&verb) {
        format!("{verb}{}ing", last_char(verb))
    } else {
        format!("{verb}ing")
    }
}

/// Comparativo: "big" → "bigger", "nice" → "nicer", "happy" → "happier"
pub fn comparative(adj: &str) -> String {
    inflect_adjective(adj, "er")
}

/// Superlativo: "big" → "biggest", "nice" → "nicest"
pub fn superlative(adj: &str) -> String {
    inflect_adjective(adj, "est")
}

fn inflect_adjective(adj: &str, suffix: &str) -> String {
    if adj.ends_with('e') {
        format!("{adj}{}", &suffix[1..])
    } else if ends_with_consonant_y(adj) {
        format!("{}i{suffix}", &adj[..adj.len() - 1])
    } else if DOUBLING_ADJECTIVES.contains(&adj) {
        format!("{adj}{}{suffix}", last_char(adj))
    } else {
        format!("{adj}{suffix}")
    }
}

fn last_char(word: &str) -> char {
    word.chars().last().unwrap_or_default()
}

// ============================================================
// Listas
// ============================================================

use FineTag::*;

/// Palavras de classe fechada: (forma, tag, lema), em ordem de preferência.
const CLOSED_CLASS: &[(&str, FineTag, &str)] = &[
    // Determinantes
    ("the", Dt, "the"), ("a", Dt, "a"), ("an", Dt, "an"),
    ("this", Dt, "this"), ("that", Dt, "that"), ("that", Wdt, "that"), ("that", In, "that"),
    ("these", Dt, "these"), ("those", Dt, "those"),
    ("every", Dt, "every"), ("each", Dt, "each"), ("some", Dt, "some"), ("any", Dt, "any"),
    ("no", Dt, "no"), ("no", Uh, "no"), ("another", Dt, "another"),
    ("either", Dt, "either"), ("either", Cc, "either"), ("neither", Dt, "neither"),
    ("all", Dt, "all"), ("all", Pdt, "all"), ("both", Dt, "both"), ("both", Cc, "both"),
    ("half", Pdt, "half"), ("half", Nn, "half"), ("such", Jj, "such"), ("such", Pdt, "such"),
    // Pronomes pessoais
    ("i", Prp, "I"), ("me", Prp, "I"), ("you", Prp, "you"), ("he", Prp, "he"), ("him", Prp, "he"),
    ("she", Prp, "she"), ("it", Prp, "it"), ("we", Prp, "we"), ("us", Prp, "we"),
    ("they", Prp, "they"), ("them", Prp, "they"),
    ("myself", Prp, "myself"), ("yourself", Prp, "yourself"), ("himself", Prp, "himself"),
    ("herself", Prp, "herself"), ("itself", Prp, "itself"), ("ourselves", Prp, "ourselves"),
    ("yourselves", Prp, "yourselves"), ("themselves", Prp, "themselves"),
    ("mine", Prp, "mine"), ("yours", Prp, "yours"), ("hers", Prp, "hers"),
    ("ours", Prp, "ours"), ("theirs", Prp, "theirs"),
    // Possessivos
    ("my", PrpS, "my"), ("your", PrpS, "your"), ("his", PrpS, "his"), ("his", Prp, "his"),
    ("her", PrpS, "her"), ("her", Prp, "she"), ("its", PrpS, "its"), ("our", PrpS, "our"),
    ("their", PrpS, "their"),
    // Wh-
    ("what", Wp, "what"), ("what", Wdt, "what"), ("who", Wp, "who"), ("whom", Wp, "whom"),
    ("which", Wdt, "which"), ("whatever", Wdt, "whatever"), ("whose", WpS, "whose"),
    ("when", Wrb, "when"), ("where", Wrb, "where"), ("why", Wrb, "why"), ("how", Wrb, "how"),
    ("whenever", Wrb, "whenever"), ("wherever", Wrb, "wherever"),
    // Existencial
    ("there", Ex, "there"), ("there", Rb, "there"),
    // Preposições e subordinadores
    ("of", In, "of"), ("in", In, "in"), ("in", Rp, "in"), ("on", In, "on"), ("on", Rp, "on"),
    ("at", In, "at"), ("by", In, "by"), ("for", In, "for"), ("with", In, "with"),
    ("about", In, "about"), ("about", Rb, "about"), ("against", In, "against"),
    ("between", In, "between"), ("into", In, "into"), ("through", In, "through"),
    ("during", In, "during"), ("before", In, "before"), ("before", Rb, "before"),
    ("after", In, "after"), ("above", In, "above"), ("below", In, "below"),
    ("from", In, "from"), ("under", In, "under"), ("until", In, "until"), ("upon", In, "upon"),
    ("within", In, "within"), ("without", In, "without"), ("toward", In, "toward"),
    ("towards", In, "towards"), ("across", In, "across"), ("along", In, "along"),
    ("around", In, "around"), ("around", Rb, "around"), ("behind", In, "behind"),
    ("beside", In, "beside"), ("beyond", In, "beyond"), ("despite", In, "despite"),
    ("except", In, "except"), ("inside", In, "inside"), ("outside", In, "outside"),
    ("near", In, "near"), ("onto", In, "onto"), ("throughout", In, "throughout"),
    ("among", In, "among"), ("unlike", In, "unlike"), ("via", In, "via"), ("per", In, "per"),
    ("than", In, "than"), ("as", In, "as"), ("as", Rb, "as"), ("since", In, "since"),
    ("because", In, "because"), ("although", In, "although"), ("though", In, "though"),
    ("unless", In, "unless"), ("whether", In, "whether"), ("if", In, "if"),
    ("while", In, "while"), ("whereas", In, "whereas"),
    ("over", In, "over"), ("over", Rp, "over"),
    ("up", Rp, "up"), ("up", In, "up"), ("up", Rb, "up"), ("out", Rp, "out"), ("out", In, "out"),
    ("off", Rp, "off"), ("off", In, "off"), ("down", Rp, "down"), ("down", In, "down"),
    ("away", Rb, "away"), ("back", Rb, "back"), ("back", Nn, "back"),
    ("to", To, "to"), ("to", In, "to"),
    // Conjunções
    ("and", Cc, "and"), ("or", Cc, "or"), ("but", Cc, "but"), ("nor", Cc, "nor"),
    ("yet", Rb, "yet"), ("yet", Cc, "yet"), ("so", Rb, "so"), ("so", Cc, "so"),
    ("plus", Cc, "plus"), ("&", Cc, "&"),
    // Modais
    ("can", Md, "can"), ("could", Md, "could"), ("will", Md, "will"), ("would", Md, "would"),
    ("shall", Md, "shall"), ("should", Md, "should"), ("may", Md, "may"),
    ("might", Md, "might"), ("must", Md, "must"),
    // be / have / do
    ("be", Vb, "be"), ("am", Vbp, "be"), ("are", Vbp, "be"), ("is", Vbz, "be"),
    ("was", Vbd, "be"), ("were", Vbd, "be"), ("been", Vbn, "be"), ("being", Vbg, "be"),
    ("have", Vbp, "have"), ("have", Vb, "have"), ("has", Vbz, "have"), ("had", Vbd, "have"),
    ("had", Vbn, "have"), ("having", Vbg, "have"),
    ("do", Vbp, "do"), ("do", Vb, "do"), ("does", Vbz, "do"), ("did", Vbd, "do"),
    ("done", Vbn, "do"), ("doing", Vbg, "do"),
    // Contrações
    ("n't", Rb, "not"), ("n\u{2019}t", Rb, "not"), ("not", Rb, "not"),
    ("'s", Possessive, "'s"), ("'s", Vbz, "be"), ("\u{2019}s", Possessive, "'s"),
    ("\u{2019}s", Vbz, "be"), ("'re", Vbp, "be"), ("\u{2019}re", Vbp, "be"),
    ("'m", Vbp, "be"), ("\u{2019}m", Vbp, "be"), ("'ve", Vbp, "have"),
    ("\u{2019}ve", Vbp, "have"), ("'ll", Md, "will"), ("\u{2019}ll", Md, "will"),
    ("'d", Md, "would"), ("\u{2019}d", Md, "would"), ("ca", Md, "can"), ("wo", Md, "will"),
    // Quantificadores e graus
    ("more", Jjr, "more"), ("more", Rbr, "more"), ("most", Jjs, "most"), ("most", Rbs, "most"),
    ("less", Jjr, "less"), ("less", Rbr, "less"), ("least", Jjs, "least"),
    ("much", Jj, "much"), ("much", Rb, "much"), ("many", Jj, "many"), ("few", Jj, "few"),
    ("several", Jj, "several"), ("enough", Jj, "enough"), ("enough", Rb, "enough"),
    ("other", Jj, "other"), ("same", Jj, "same"), ("own", Jj, "own"),
    // Advérbios de classe fechada
    ("very", Rb, "very"), ("also", Rb, "also"), ("too", Rb, "too"), ("just", Rb, "just"),
    ("only", Rb, "only"), ("only", Jj, "only"), ("even", Rb, "even"), ("still", Rb, "still"),
    ("already", Rb, "already"), ("always", Rb, "always"), ("never", Rb, "never"),
    ("often", Rb, "often"), ("sometimes", Rb, "sometimes"), ("here", Rb, "here"),
    ("now", Rb, "now"), ("then", Rb, "then"), ("soon", Rb, "soon"), ("again", Rb, "again"),
    ("ever", Rb, "ever"), ("quite", Rb, "quite"), ("rather", Rb, "rather"),
    ("almost", Rb, "almost"), ("perhaps", Rb, "perhaps"), ("maybe", Rb, "maybe"),
    ("however", Rb, "however"), ("else", Rb, "else"), ("together", Rb, "together"),
    ("ago", Rb, "ago"), ("instead", Rb, "instead"), ("anymore", Rb, "anymore"),
    ("once", Rb, "once"), ("twice", Rb, "twice"), ("thus", Rb, "thus"),
    ("therefore", Rb, "therefore"), ("indeed", Rb, "indeed"), ("well", Rb, "well"),
    ("well", Uh, "well"), ("well", Jj, "well"),
    // Interjeições
    ("yes", Uh, "yes"), ("oh", Uh, "oh"), ("hello", Uh, "hello"), ("hi", Uh, "hi"),
    ("please", Uh, "please"), ("wow", Uh, "wow"), ("ok", Uh, "ok"), ("okay", Uh, "okay"),
    ("hey", Uh, "hey"), ("thanks", Uh, "thanks"), ("oops", Uh, "oops"), ("bye", Uh, "bye"),
    // Numerais
    ("zero", Cd, "zero"), ("one", Cd, "one"), ("two", Cd, "two"), ("three", Cd, "three"),
    ("four", Cd, "four"), ("five", Cd, "five"), ("six", Cd, "six"), ("seven", Cd, "seven"),
    ("eight", Cd, "eight"), ("nine", Cd, "nine"), ("ten", Cd, "ten"),
    ("eleven", Cd, "eleven"), ("twelve", Cd, "twelve"), ("thirteen", Cd, "thirteen"),
    ("fourteen", Cd, "fourteen"), ("fifteen", Cd, "fifteen"), ("sixteen", Cd, "sixteen"),
    ("seventeen", Cd, "seventeen"), ("eighteen", Cd, "eighteen"),
    ("nineteen", Cd, "nineteen"), ("twenty", Cd, "twenty"), ("thirty", Cd, "thirty"),
    ("forty", Cd, "forty"), ("fifty", Cd, "fifty"), ("sixty", Cd, "sixty"),
    ("seventy", Cd, "seventy"), ("eighty", Cd, "eighty"), ("ninety", Cd, "ninety"),
    ("hundred", Cd, "hundred"), ("thousand", Cd, "thousand"), ("million", Cd, "million"),
    ("billion", Cd, "billion"), ("trillion", Cd, "trillion"),
];

/// Ordinais e palavras de posição
const ORDINALS: &[(&str, FineTag, &str)] = &[
    ("first", Jj, "first"), ("first", Rb, "first"), ("second", Jj, "second"),
    ("second", Nn, "second"), ("third", Jj, "third"), ("fourth", Jj, "fourth"),
    ("fifth", Jj, "fifth"), ("sixth", Jj, "sixth"), ("seventh", Jj, "seventh"),
    ("eighth", Jj, "eighth"), ("ninth", Jj, "ninth"), ("tenth", Jj, "tenth"),
    ("last", Jj, "last"), ("next", Jj, "next"),
];

/// Verbos irregulares: (base, passado, particípio)
const IRREGULAR_VERBS: &[(&str, &str, &str)] = &[
    ("go", "went", "gone"), ("come", "came", "come"), ("get", "got", "gotten"),
    ("make", "made", "made"), ("take", "took", "taken"), ("see", "saw", "seen"),
    ("know", "knew", "known"), ("think", "thought", "thought"), ("give", "gave", "given"),
    ("find", "found", "found"), ("tell", "told", "told"), ("become", "became", "become"),
    ("leave", "left", "left"), ("feel", "felt", "felt"), ("bring", "brought", "brought"),
    ("begin", "began", "begun"), ("keep", "kept", "kept"), ("hold", "held", "held"),
    ("write", "wrote", "written"), ("stand", "stood", "stood"), ("hear", "heard", "heard"),
    ("let", "let", "let"), ("mean", "meant", "meant"), ("set", "set", "set"),
    ("meet", "met", "met"), ("run", "ran", "run"), ("pay", "paid", "paid"),
    ("sit", "sat", "sat"), ("speak", "spoke", "spoken"), ("lead", "led", "led"),
    ("read", "read", "read"), ("grow", "grew", "grown"), ("lose", "lost", "lost"),
    ("fall", "fell", "fallen"), ("send", "sent", "sent"), ("build", "built", "built"),
    ("understand", "understood", "understood"), ("draw", "drew", "drawn"),
    ("break", "broke", "broken"), ("spend", "spent", "spent"), ("cut", "cut", "cut"),
    ("rise", "rose", "risen"), ("drive", "drove", "driven"), ("buy", "bought", "bought"),
    ("wear", "wore", "worn"), ("choose", "chose", "chosen"), ("eat", "ate", "eaten"),
    ("sell", "sold", "sold"), ("win", "won", "won"), ("teach", "taught", "taught"),
    ("catch", "caught", "caught"), ("fly", "flew", "flown"), ("throw", "threw", "thrown"),
    ("sing", "sang", "sung"), ("swim", "swam", "swum"), ("sleep", "slept", "slept"),
    ("drink", "drank", "drunk"), ("forget", "forgot", "forgotten"), ("put", "put", "put"),
    ("say", "said", "said"), ("hit", "hit", "hit"), ("hurt", "hurt", "hurt"),
    ("shut", "shut", "shut"), ("seek", "sought", "sought"), ("fight", "fought", "fought"),
    ("feed", "fed", "fed"), ("steal", "stole", "stolen"), ("shake", "shook", "shaken"),
    ("ride", "rode", "ridden"), ("hide", "hid", "hidden"), ("bite", "bit", "bitten"),
    ("freeze", "froze", "frozen"), ("lend", "lent", "lent"), ("shoot", "shot", "shot"),
    ("strike", "struck", "struck"), ("hang", "hung", "hung"), ("ring", "rang", "rung"),
    ("wake", "woke", "woken"), ("tear", "tore", "torn"), ("beat", "beat", "beaten"),
    ("cost", "cost", "cost"), ("spread", "spread", "spread"), ("deal", "dealt", "dealt"),
    ("forgive", "forgave", "forgiven"), ("sink", "sank", "sunk"), ("dig", "dug", "dug"),
    ("stick", "stuck", "stuck"), ("bend", "bent", "bent"), ("bind", "bound", "bound"),
    ("light", "lit", "lit"), ("slide", "slid", "slid"), ("swing", "swung", "swung"),
];

/// Verbos regulares (formas flexionadas geradas por regra)
const REGULAR_VERBS: &[&str] = &[
    "bark", "walk", "talk", "look", "want", "need", "use", "work", "call", "try", "ask",
    "seem", "turn", "start", "show", "play", "move", "live", "believe", "happen",
    "include", "continue", "change", "help", "like", "love", "hate", "open", "close",
    "watch", "follow", "stop", "create", "add", "allow", "learn", "offer", "remember",
    "consider", "appear", "serve", "die", "expect", "stay", "reach", "kill", "raise",
    "pass", "report", "decide", "pull", "push", "carry", "jump", "visit", "wait", "plan",
    "cook", "clean", "study", "enjoy", "arrive", "return", "agree", "support", "hope",
    "produce", "explain", "develop", "receive", "join", "travel", "dance", "laugh", "cry",
    "smile", "kick", "chase", "attack", "launch", "announce", "acquire", "purchase",
    "invest", "release", "design", "process", "analyze", "match", "parse", "tag", "label",
    "count", "list", "load", "share", "sound", "stare", "rain", "snow", "fix", "finish",
    "belong", "listen", "answer", "order", "own", "paint", "climb", "drop", "shop", "chat",
    "hug", "grab", "nod", "skip", "step", "admit", "prefer", "occur", "refer", "control",
    "describe", "provide", "require", "suggest", "remain", "increase", "reduce", "improve",
    "discuss", "mention", "publish", "sign", "apply", "reply", "worry", "marry",
    "hurry", "copy", "deny", "rely", "claim", "warn", "wish", "wonder", "imagine",
    "notice", "pick", "touch", "fill", "kiss", "miss", "guess", "fail", "print", "test",
    "train", "compute", "store", "search", "score", "rank", "sort", "tokenize", "render",
    "recognize", "detect", "predict", "annotate", "deploy", "install", "download",
    "upload", "click", "type", "post", "email", "phone", "text", "park", "land", "hire",
    "fire", "found", "merge", "borrow", "earn", "save",
];

/// Verbos que dobram a consoante final em "-ed" e "-ing"
const DOUBLING_VERBS: &[&str] = &[
    "stop", "plan", "drop", "shop", "chat", "hug", "grab", "nod", "skip", "step", "admit",
    "prefer", "occur", "refer", "control", "tag", "jog", "beg", "rob", "rub", "slip", "tap",
    "trip", "ship", "fit", "commit", "ban", "scan", "plot", "spot", "chop", "clap", "drag",
    "hop", "map", "pin", "rip", "sip", "slam", "snap", "swap", "trim", "wrap", "zip",
];

/// Irregulares que também dobram no gerúndio ("run" → "running")
const DOUBLING_GERUNDS: &[&str] = &[
    "run", "get", "sit", "set", "put", "cut", "let", "hit", "win", "begin", "forget", "swim",
    "shut", "dig", "beat", "bet",
];

/// Substantivos contáveis regulares
const NOUNS: &[&str] = &[
    "dog", "cat", "house", "car", "city", "country", "company", "world", "year", "day",
    "time", "week", "month", "way", "thing", "hand", "part", "place", "case", "point",
    "government", "number", "group", "problem", "fact", "eye", "friend", "family", "school",
    "student", "teacher", "book", "story", "word", "name", "question", "market", "business",
    "startup", "price", "park", "tree", "fox", "box", "bus", "church", "dish", "baby",
    "party", "lady", "game", "team", "player", "song", "movie", "film", "phone", "computer",
    "text", "sentence", "token", "model", "language", "office", "room", "door", "window",
    "table", "chair", "night", "morning", "evening", "afternoon", "street", "road", "shop",
    "store", "dollar", "euro", "sale", "deal", "share", "stock", "idea", "reason", "result",
    "system", "program", "service", "product", "customer", "user", "client", "employee",
    "worker", "boss", "manager", "president", "minister", "leader", "member", "officer",
    "doctor", "lawyer", "mother", "father", "brother", "sister", "son", "daughter", "girl",
    "boy", "kid", "guy", "ball", "letter", "paper", "report", "apple", "bird", "horse", "cow",
    "animal", "fence", "garden", "river", "mountain", "sea", "island", "lake", "sky", "sun",
    "moon", "star", "hour", "minute", "plan", "work", "help", "love", "change", "show",
    "play", "start", "use", "need", "call", "turn", "look", "walk", "talk", "stop", "visit",
    "answer", "order", "support", "return", "release", "design", "process", "match", "list",
    "count", "label", "load", "sound", "paint", "cook", "study", "dance", "smile", "laugh",
    "kick", "attack", "launch", "purchase", "offer", "watch", "trip", "train", "plane",
    "ship", "airport", "station", "hospital", "university", "college", "court", "law",
    "war", "army", "election", "vote", "campaign", "policy", "economy", "industry",
    "technology", "science", "art", "home", "head", "face", "side", "end", "kind", "lot",
    "area", "state", "body", "level", "age", "community", "issue", "job", "rate", "night",
    "bank", "deal", "team", "pipeline", "parser", "tagger", "entity", "chunk", "pattern",
    "rule", "document", "span", "lemma", "noun", "verb", "adjective", "tutorial", "example",
    "file", "page", "line", "step", "test", "score", "search", "post", "email", "land",
    "car", "driver", "road", "engine", "machine", "robot", "company", "firm", "brand",
    "factory", "plant", "farm", "village", "town", "capital", "border", "coast", "planet",
    "rocket", "satellite", "mission", "space", "battle", "treaty", "law", "act", "bill",
    "vaccine", "virus", "disease", "patient", "nurse", "drug", "medicine",
];

/// Substantivos com plural irregular
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("man", "men"), ("woman", "women"), ("child", "children"), ("person", "people"),
    ("foot", "feet"), ("tooth", "teeth"), ("mouse", "mice"), ("goose", "geese"),
    ("leaf", "leaves"), ("knife", "knives"), ("wolf", "wolves"), ("life", "lives"),
    ("wife", "wives"), ("half", "halves"), ("shelf", "shelves"), ("fish", "fish"),
    ("sheep", "sheep"), ("deer", "deer"), ("analysis", "analyses"), ("crisis", "crises"),
    ("criterion", "criteria"), ("phenomenon", "phenomena"), ("datum", "data"),
];

/// Substantivos não-contáveis
const MASS_NOUNS: &[&str] = &[
    "information", "news", "money", "water", "music", "software", "advice", "furniture",
    "weather", "health", "energy", "oil", "gas", "power", "growth", "peace", "history",
    "research", "evidence", "knowledge", "traffic", "food", "rain", "snow", "time", "art",
];

/// Adjetivos curtos com comparativo e superlativo por sufixo
const SHORT_ADJECTIVES: &[&str] = &[
    "red", "big", "small", "large", "new", "old", "young", "long", "short", "high", "low",
    "great", "quick", "brown", "lazy", "happy", "sad", "fast", "slow", "hot", "cold",
    "warm", "nice", "easy", "hard", "strong", "weak", "rich", "poor", "full", "clear",
    "sure", "black", "white", "green", "blue", "dark", "light", "heavy", "true", "simple",
    "tall", "huge", "tiny", "early", "late", "cheap", "deep", "wide", "fine", "safe",
    "wet", "thin", "fat", "busy", "funny", "pretty", "smart", "bright", "calm", "clean",
    "cool", "fresh", "kind", "loud", "quiet", "rare", "rough", "sharp", "soft", "sweet",
    "wild", "wise", "close",
];

/// Adjetivos irregulares: (base, comparativo, superlativo)
const IRREGULAR_ADJECTIVES: &[(&str, &str, &str)] = &[
    ("good", "better", "best"),
    ("bad", "worse", "worst"),
    ("far", "farther", "farthest"),
];

/// Adjetivos sem flexão por sufixo
const LONG_ADJECTIVES: &[&str] = &[
    "beautiful", "important", "different", "free", "real", "able", "yellow", "false",
    "local", "public", "private", "national", "international", "political", "economic",
    "social", "major", "main", "certain", "whole", "recent", "final", "possible",
    "available", "popular", "special", "difficult", "natural", "personal", "serious",
    "common", "current", "similar", "famous", "modern", "digital", "financial", "legal",
    "medical", "foreign", "global", "human", "total", "annual", "previous", "various",
    "wonderful", "terrible", "interesting", "excellent", "expensive", "successful",
    "significant", "large-scale", "open", "empty",
];

const DOUBLING_ADJECTIVES: &[&str] = &["red", "big", "sad", "hot", "wet", "thin", "fat"];

/// Advérbios de classe aberta presentes no léxico
const ADVERBS: &[&str] = &[
    "quickly", "slowly", "happily", "really", "carefully", "easily", "loudly", "quietly",
    "suddenly", "clearly", "badly", "nearly", "probably", "certainly", "actually", "finally",
    "recently", "currently", "especially", "simply", "exactly", "fairly", "usually",
    "later", "fast", "hard", "early", "late", "today", "tomorrow", "yesterday", "tonight",
];

/// Stop words do inglês
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "alone", "along",
    "already", "also", "although", "always", "am", "among", "an", "and", "another", "any",
    "anyhow", "anyone", "anything", "anyway", "anywhere", "are", "around", "as", "at",
    "back", "be", "became", "because", "become", "becomes", "been", "before", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "both", "but", "by", "ca",
    "call", "can", "cannot", "could", "did", "do", "does", "doing", "done", "down", "due",
    "during", "each", "either", "else", "elsewhere", "empty", "enough", "even", "ever",
    "every", "everyone", "everything", "everywhere", "except", "few", "first", "for",
    "former", "from", "front", "full", "further", "get", "give", "go", "had", "has", "have",
    "he", "hence", "her", "here", "hers", "herself", "him", "himself", "his", "how",
    "however", "i", "if", "in", "indeed", "into", "is", "it", "its", "itself", "just",
    "keep", "last", "least", "less", "made", "make", "many", "may", "me", "meanwhile",
    "might", "mine", "more", "moreover", "most", "mostly", "move", "much", "must", "my",
    "myself", "n't", "name", "namely", "neither", "never", "nevertheless", "next", "no",
    "nobody", "none", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on",
    "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put", "quite",
    "rather", "re", "really", "regarding", "same", "say", "see", "seem", "seemed", "seeming",
    "seems", "several", "she", "should", "show", "side", "since", "so", "some", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such", "take", "than",
    "that", "the", "their", "them", "themselves", "then", "there", "therefore", "these",
    "they", "third", "this", "those", "though", "three", "through", "throughout", "thus",
    "to", "together", "too", "top", "toward", "towards", "two", "under", "until", "up",
    "upon", "us", "used", "using", "various", "very", "via", "was", "we", "well", "were",
    "what", "whatever", "when", "whenever", "where", "whereas", "wherever", "whether",
    "which", "while", "who", "whoever", "whole", "whom", "whose", "why", "will", "with",
    "within", "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
    "'d", "'ll", "'m", "'re", "'s", "'ve", "\u{2019}d", "\u{2019}ll", "\u{2019}m",
    "\u{2019}re", "\u{2019}s", "\u{2019}ve", "n\u{2019}t",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::FineTag::*;

    #[test]
    fn test_regular_morphology() {
        assert_eq!(plural("dog"), "dogs");
        assert_eq!(plural("box"), "boxes");
        assert_eq!(plural("city"), "cities");
        assert_eq!(third_person("go"), "goes");
        assert_eq!(past_tense("bark"), "barked");
        assert_eq!(past_tense("like"), "liked");
        assert_eq!(past_tense("study"), "studied");
        assert_eq!(past_tense("stop"), "stopped");
        assert_eq!(gerund("make"), "making");
        assert_eq!(gerund("die"), "dying");
        assert_eq!(gerund("see"), "seeing");
        assert_eq!(gerund("run"), "running");
        assert_eq!(comparative("big"), "bigger");
        assert_eq!(superlative("nice"), "nicest");
        assert_eq!(comparative("happy"), "happier");
    }

    #[test]
    fn test_lookup_preference_order() {
        let lex = Lexicon::english();
        let that: Vec<FineTag> = lex.lookup("that").iter().map(|e| e.tag).collect();
        assert_eq!(that, vec![Dt, Wdt, In]);
        let work: Vec<FineTag> = lex.lookup("work").iter().map(|e| e.tag).collect();
        assert_eq!(work, vec![Vb, Vbp, Nn]);
    }

    #[test]
    fn test_lemma_for_inflected_forms() {
        let lex = Lexicon::english();
        assert_eq!(lex.lemma_for("barked", Vbd), Some("bark"));
        assert_eq!(lex.lemma_for("met", Vbd), Some("meet"));
        assert_eq!(lex.lemma_for("children", Nns), Some("child"));
        assert_eq!(lex.lemma_for("bigger", Jjr), Some("big"));
        assert_eq!(lex.lemma_for("is", Vbz), Some("be"));
        assert_eq!(lex.lemma_for("me", Prp), Some("I"));
        assert_eq!(lex.lemma_for("barked", Nn), None);
    }

    #[test]
    fn test_known_lemma_index() {
        let lex = Lexicon::english();
        assert!(lex.is_known_lemma(Pos::Verb, "bark"));
        assert!(lex.is_known_lemma(Pos::Noun, "dog"));
        assert!(!lex.is_known_lemma(Pos::Noun, "bark"));
    }

    #[test]
    fn test_names_are_not_in_lexicon() {
        let lex = Lexicon::english();
        assert!(!lex.contains("tom"));
        assert!(!lex.contains("sam"));
    }

    #[test]
    fn test_stop_words() {
        let lex = Lexicon::english();
        assert!(lex.is_stop("the"));
        assert!(lex.is_stop("n't"));
        assert!(!lex.is_stop("dog"));
    }
}
