//! # Algoritmo de Viterbi - Decodificação de Sequências CRF
//!
//! O algoritmo de Viterbi é um método de **programação dinâmica** que encontra
//! a sequência de rótulos mais provável de forma eficiente.
//!
//! ## Intuição
//!
//! Para cada token existem `T` rótulos possíveis (50 tags Penn no tagger,
//! 37 tags BIO no NER). Uma busca exaustiva teria complexidade `O(T^N)`; o
//! Viterbi explora que a **melhor sequência até o token i com rótulo t**
//! depende apenas da **melhor sequência até o token i-1** → `O(N × T²)`.
//!
//! ## Algoritmo
//!
//! ```text
//! Inicialização: viterbi[0][t] = emission[0][t]
//!
//! Recursão: viterbi[i][t] = max_{t'} [viterbi[i-1][t'] + transition(t', t)] + emission[i][t]
//!
//! Backtracking: reconstrói o caminho ótimo de trás pra frente
//! ```

use crate::crf::{CrfModel, Label};

/// Penalidade somada a transições estruturalmente inválidas (ex: `O → I-ORG`).
const INVALID_TRANSITION_PENALTY: f64 = 10.0;

/// Resultado do Viterbi
#[derive(Debug, Clone)]
pub struct ViterbiResult<L: Label> {
    /// Sequência de rótulos mais provável (um por token)
    pub best_sequence: Vec<L>,
    /// Score (não-normalizado) da melhor sequência
    pub best_score: f64,
    /// Confiança de cada rótulo escolhido: softmax dos scores acumulados no passo
    pub confidences: Vec<f64>,
}

/// Executa o algoritmo de Viterbi sobre uma matriz de emissão já calculada
///
/// # Parâmetros
/// - `model`: modelo CRF (usado para as transições)
/// - `emission`: `emission[i][t]`, score do rótulo `t` no token `i`
pub fn viterbi_decode<L: Label>(model: &CrfModel<L>, emission: &[Vec<f64>]) -> ViterbiResult<L> {
    if emission.is_empty() {
        return ViterbiResult {
            best_sequence: vec![],
            best_score: 0.0,
            confidences: vec![],
        };
    }

    let n_tokens = emission.len();
    let labels = L::all();
    let n_labels = labels.len();

    // Transições efetivas, já penalizando as inválidas
    let transitions: Vec<Vec<f64>> = labels
        .iter()
        .map(|prev| {
            labels
                .iter()
                .map(|next| {
                    let score = model.transition_score(prev, next);
                    if L::is_valid_transition(prev, next) {
                        score
                    } else {
                        score - INVALID_TRANSITION_PENALTY
                    }
                })
                .collect()
        })
        .collect();

    let mut viterbi: Vec<f64> = emission[0].clone();
    let mut backptr: Vec<Vec<usize>> = vec![vec![0usize; n_labels]; n_tokens];
    let mut step_probs: Vec<Vec<f64>> = Vec::with_capacity(n_tokens);
    step_probs.push(scores_to_probs(&viterbi));

    for i in 1..n_tokens {
        let mut next = vec![f64::NEG_INFINITY; n_labels];

        for t in 0..n_labels {
            let mut best_prev_score = f64::NEG_INFINITY;
            let mut best_prev = 0;
            for prev in 0..n_labels {
                let score = viterbi[prev] + transitions[prev][t];
                if score > best_prev_score {
                    best_prev_score = score;
                    best_prev = prev;
                }
            }
            next[t] = best_prev_score + emission[i][t];
            backptr[i][t] = best_prev;
        }

        viterbi = next;
        step_probs.push(scores_to_probs(&viterbi));
    }

    // === Backtracking ===
    let (mut best_last, best_score) = best_in_slice(&viterbi);
    let mut path = vec![0usize; n_tokens];
    path[n_tokens - 1] = best_last;
    for i in (0..n_tokens - 1).rev() {
        best_last = backptr[i + 1][best_last];
        path[i] = best_last;
    }

    ViterbiResult {
        best_sequence: path.iter().map(|&t| labels[t]).collect(),
        best_score,
        confidences: path
            .iter()
            .zip(&step_probs)
            .map(|(&t, probs)| probs[t])
            .collect(),
    }
}

/// Retorna (índice, valor) do máximo em um slice; empates ficam com o menor índice
fn best_in_slice(scores: &[f64]) -> (usize, f64) {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, &v) in scores.iter().enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best
}

/// Converte scores em probabilidades softmax (para confiança)
pub fn scores_to_probs(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return vec![];
    }
    let max_score = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|&s| (s - max_score).exp()).collect();
    let sum: f64 = exps.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return vec![1.0 / scores.len() as f64; scores.len()];
    }
    exps.iter().map(|e| e / sum).collect()
}
