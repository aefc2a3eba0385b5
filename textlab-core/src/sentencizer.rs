//! Segmentação de sentenças por regras.
//!
//! Uma sentença começa no primeiro token, depois de uma pontuação terminal
//! (`.`, `!`, `?`, `…`) seguida de eventuais aspas ou parênteses de
//! fechamento, ou depois de uma linha em branco.

use crate::tokenizer::RawToken;

const TERMINALS: &[&str] = &[".", "!", "?", "…", "...", "?!", "!?"];

const CLOSERS: &[&str] = &["\"", "'", "\u{201D}", "\u{2019}", ")", "]", "}", "''"];

/// Marca quais tokens iniciam sentença.
///
/// O resultado tem o mesmo tamanho de `tokens`; `tokens[0]` sempre inicia.
pub fn sentence_starts(text: &str, tokens: &[RawToken]) -> Vec<bool> {
    let mut starts = vec![false; tokens.len()];
    let mut after_terminal = false;

    for (i, token) in tokens.iter().enumerate() {
        if i == 0 {
            starts[i] = true;
        } else {
            let gap = &text[tokens[i - 1].end..token.start];
            let is_terminal = is_terminal(&token.text);
            let is_closer = CLOSERS.contains(&token.text.as_str());

            if after_terminal && !is_terminal && !is_closer {
                starts[i] = true;
            } else if gap.matches('\n').count() >= 2 {
                starts[i] = true;
            }
        }

        if is_terminal(&token.text) {
            after_terminal = true;
        } else if !CLOSERS.contains(&token.text.as_str()) {
            after_terminal = false;
        }
    }

    starts
}

fn is_terminal(text: &str) -> bool {
    TERMINALS.contains(&text) || (text.len() > 1 && text.chars().all(|c| matches!(c, '.' | '!' | '?')))
}
