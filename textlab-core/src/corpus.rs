//! # Textos de Demonstração
//!
//! Textos em inglês usados pelo tour da CLI e pela interface web. Cada um
//! exercita uma parte diferente do pipeline: entidades de valor, orações
//! subordinadas, coordenação, abreviações.

use serde::Serialize;

/// Um texto de demonstração com título
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemoText {
    pub title: &'static str,
    pub text: &'static str,
}

/// Texto padrão do tour
pub const TOUR_TEXT: &str = "Apple is looking at buying U.K. startup for $1 billion. \
Tim Cook met Sam in London last week, and they talked about the first iPhone. \
The quick brown fox jumps over the lazy dog.";

/// Textos de demonstração para a interface web e a CLI
pub fn demo_texts() -> Vec<DemoText> {
    vec![
        DemoText {
            title: "Business",
            text: "Apple is looking at buying U.K. startup for $1 billion. Microsoft and Google \
                   reported that their cloud revenue grew 20% in 2023, while Amazon spent $4 \
                   billion on new data centers in Ohio.",
        },
        DemoText {
            title: "People",
            text: "Tom met Sam. Mr. Smith, who lives in Paris, said that Mary would visit \
                   Berlin on Monday. Barack Obama was born in Hawaii in 1961.",
        },
        DemoText {
            title: "Grammar",
            text: "The quick brown fox jumps over the lazy dog. A red big dog barked at the \
                   children because they were running in the garden. She doesn't want to play \
                   chess with him.",
        },
        DemoText {
            title: "Science",
            text: "NASA launched the rocket from Florida at 10:30 am. The mission will travel \
                   225 million km to Mars and return in the third decade of the century. \
                   Researchers at MIT and Harvard University analysed the first samples.",
        },
        DemoText {
            title: "History",
            text: "World War II ended in 1945. The United Nations was founded in San Francisco \
                   that year, and the Universal Declaration of Human Rights followed three years \
                   later. The Cold War shaped politics in Europe and Asia for decades.",
        },
        DemoText {
            title: "Tokenization",
            text: "Dr. Jones (born 03/15/1980) didn't pay $5,000.50 for the U.S. shares! \
                   She e-mailed ana@example.com at 2:30 p.m. and said it's \"too risky\"... \
                   Are you sure?",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::load;

    #[test]
    fn test_demo_texts_are_unique_and_process() {
        let nlp = load("en").unwrap();
        let texts = demo_texts();
        let mut titles: Vec<&str> = texts.iter().map(|d| d.title).collect();
        titles.dedup();
        assert_eq!(titles.len(), texts.len());

        for demo in texts.iter().chain(std::iter::once(&DemoText { title: "Tour", text: TOUR_TEXT })) {
            let doc = nlp.process(demo.text).unwrap();
            assert!(doc.len() > 10, "{}", demo.title);
            assert!(doc.sents().len() >= 2, "{}", demo.title);
        }
    }
}
