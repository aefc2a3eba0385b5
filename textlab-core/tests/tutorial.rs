//! Passo a passo do tutorial, de ponta a ponta: carregar o modelo, processar
//! textos e conferir as propriedades das projeções.

use textlab_core::corpus::{demo_texts, TOUR_TEXT};
use textlab_core::inspect::{
    count_by_attribute, list_dependencies, list_entities, list_lemmas, list_noun_chunks,
    list_sentences, list_tokens, token_table, AttributeKind,
};
use textlab_core::matcher::parse_patterns;
use textlab_core::{
    explain, load, render, Document, Error, Matcher, Pipeline, RenderOptions, RenderTarget,
};

fn nlp() -> Box<dyn Pipeline> {
    load("en_core_lite").expect("modelo embutido")
}

fn sample_docs(nlp: &dyn Pipeline) -> Vec<Document> {
    let mut texts: Vec<&str> = demo_texts().iter().map(|d| d.text).collect();
    texts.push(TOUR_TEXT);
    texts.push("Tom met Sam.");
    texts.push("");
    texts.push("   ");
    texts.into_iter().map(|t| nlp.process(t).unwrap()).collect()
}

#[test]
fn test_unknown_model_is_rejected() {
    let result = load("xx_missing_model");
    assert!(matches!(result, Err(Error::ModelNotFound(ref id)) if id == "xx_missing_model"));
}

#[test]
fn test_counts_sum_to_token_count() {
    let nlp = nlp();
    for doc in sample_docs(nlp.as_ref()) {
        let tokens = list_tokens(&doc).count();
        for kind in AttributeKind::ALL {
            let total: usize = count_by_attribute(&doc, kind).values().sum();
            assert_eq!(total, tokens, "{kind} em {:?}", doc.text());
        }
    }
}

#[test]
fn test_sentences_partition_tokens() {
    let nlp = nlp();
    for doc in sample_docs(nlp.as_ref()) {
        let sents = list_sentences(&doc);
        let mut next = 0;
        for sent in &sents {
            assert_eq!(sent.start, next, "{:?}", doc.text());
            assert!(sent.end > sent.start);
            // O texto da sentença é uma fatia contígua do original
            assert!(doc.text().contains(sent.text(&doc)));
            next = sent.end;
        }
        assert_eq!(next, doc.len());
    }
}

#[test]
fn test_entities_are_ordered_char_ranges() {
    let nlp = nlp();
    for doc in sample_docs(nlp.as_ref()) {
        let rows = list_entities(&doc);
        let chars: Vec<char> = doc.text().chars().collect();
        for row in &rows {
            assert!(row.start_char <= row.end_char);
            let slice: String = chars[row.start_char..row.end_char].iter().collect();
            assert_eq!(slice, row.text);
        }
        for pair in rows.windows(2) {
            assert!(pair[0].start_char <= pair[1].start_char);
            assert!(pair[0].end_char <= pair[1].start_char);
        }
    }
}

#[test]
fn test_inspection_is_idempotent() {
    let nlp = nlp();
    let doc = nlp.process(TOUR_TEXT).unwrap();
    assert_eq!(list_tokens(&doc).collect::<Vec<_>>(), list_tokens(&doc).collect::<Vec<_>>());
    assert_eq!(list_lemmas(&doc).collect::<Vec<_>>(), list_lemmas(&doc).collect::<Vec<_>>());
    assert_eq!(list_sentences(&doc), list_sentences(&doc));
    assert_eq!(list_noun_chunks(&doc).unwrap(), list_noun_chunks(&doc).unwrap());
    assert_eq!(list_entities(&doc), list_entities(&doc));
    assert_eq!(list_dependencies(&doc), list_dependencies(&doc));
    assert_eq!(token_table(&doc), token_table(&doc));
    assert_eq!(
        count_by_attribute(&doc, AttributeKind::Lemma),
        count_by_attribute(&doc, AttributeKind::Lemma)
    );
}

#[test]
fn test_person_entities_with_char_offsets() {
    let doc = nlp().process("Tom met Sam.").unwrap();
    let ents: Vec<(String, usize, usize, String)> = list_entities(&doc)
        .into_iter()
        .map(|r| (r.text, r.start_char, r.end_char, r.label))
        .collect();
    assert_eq!(
        ents,
        vec![
            ("Tom".to_string(), 0, 3, "PERSON".to_string()),
            ("Sam".to_string(), 8, 11, "PERSON".to_string()),
        ]
    );
}

#[test]
fn test_classic_business_sentence() {
    let doc = nlp()
        .process("Apple is looking at buying U.K. startup for $1 billion")
        .unwrap();
    let ents: Vec<(String, String)> = list_entities(&doc)
        .into_iter()
        .map(|r| (r.text, r.label))
        .collect();
    assert_eq!(
        ents,
        vec![
            ("Apple".to_string(), "ORG".to_string()),
            ("U.K.".to_string(), "GPE".to_string()),
            ("$1 billion".to_string(), "MONEY".to_string()),
        ]
    );
}

#[test]
fn test_matcher_prefers_longest_match() {
    let doc = nlp().process("a red big dog barked").unwrap();
    let mut matcher = Matcher::new();
    let patterns =
        parse_patterns(r#"[{"POS": "ADJ", "OP": "?"}, {"POS": "ADJ"}, {"POS": "NOUN"}]"#).unwrap();
    let id = matcher.define_rule("ADJ_NOUN", patterns.clone()).unwrap();

    let found: Vec<&str> = matcher.run(&doc).iter().map(|m| m.text(&doc)).collect();
    assert_eq!(found, ["red big dog"]);
    assert_eq!(matcher.resolve_rule_label(id), Some("ADJ_NOUN"));

    assert!(matches!(
        matcher.define_rule("ADJ_NOUN", patterns),
        Err(Error::DuplicateRuleName(_))
    ));
}

#[test]
fn test_render_styles() {
    let doc = nlp().process("Tom met Sam.").unwrap();
    let options = RenderOptions::default();
    assert!(render(RenderTarget::Doc(&doc), "dep", &options)
        .unwrap()
        .starts_with("<svg"));
    assert!(render(RenderTarget::Doc(&doc), "ent", &options)
        .unwrap()
        .contains("<mark"));
    assert!(matches!(
        render(RenderTarget::Doc(&doc), "svg", &options),
        Err(Error::InvalidStyle(_))
    ));
}

#[test]
fn test_explain_labels_seen_in_documents() {
    let nlp = nlp();
    let doc = nlp.process(TOUR_TEXT).unwrap();
    for row in token_table(&doc) {
        assert!(explain(&row.pos).is_some(), "pos {}", row.pos);
        assert!(explain(&row.tag).is_some(), "tag {}", row.tag);
        assert!(explain(&row.dep).is_some(), "dep {}", row.dep);
    }
    for row in list_entities(&doc) {
        assert!(explain(&row.label).is_some());
    }
}
