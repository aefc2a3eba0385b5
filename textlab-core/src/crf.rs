//! # CRF - Conditional Random Field Linear-Chain
//!
//! Modelo de marcação de sequências usado por dois componentes do pipeline:
//! o **POS tagger** (rótulos [`FineTag`](crate::tagger::FineTag)) e o
//! **reconhecedor de entidades** (rótulos [`BioTag`](crate::entity::BioTag)).
//! O modelo é genérico sobre o conjunto de rótulos através do trait [`Label`].
//!
//! ## Estrutura do Modelo
//!
//! Score total de uma sequência de rótulos:
//!
//! ```text
//! score(y, x) = Σ_i [emission_score(y_i, x, i) + transition_score(y_{i-1}, y_i)]
//! ```
//!
//! Os pesos são definidos à mão em [`crate::model`]; não há treinamento.

use std::collections::HashMap;
use std::fmt::Debug;

use crate::features::FeatureVector;

/// Um conjunto fechado de rótulos que pode ser decodificado pelo CRF.
pub trait Label: Copy + Eq + Debug {
    /// Número total de rótulos
    const COUNT: usize;

    /// Índice numérico do rótulo (0..COUNT) para as matrizes
    fn index(&self) -> usize;

    /// Todos os rótulos, ordenados pelo índice
    fn all() -> Vec<Self>;

    /// Representação textual (ex: "NN", "B-PERSON")
    fn name(&self) -> String;

    /// Restrições estruturais entre rótulos vizinhos (ex: esquema BIO).
    fn is_valid_transition(_prev: &Self, _next: &Self) -> bool {
        true
    }
}

/// Modelo CRF com pesos definidos
///
/// - `emission_weights`: feature → peso por rótulo (indexado por [`Label::index`])
/// - `transition_weights`: matriz rótulo_anterior × rótulo_seguinte → peso
#[derive(Debug, Clone)]
pub struct CrfModel<L: Label> {
    pub emission_weights: HashMap<String, Vec<f64>>,
    pub transition_weights: Vec<Vec<f64>>,
    _labels: std::marker::PhantomData<L>,
}

impl<L: Label> CrfModel<L> {
    /// Cria um modelo CRF com pesos zerados
    pub fn new() -> Self {
        let n = L::COUNT;
        Self {
            emission_weights: HashMap::new(),
            transition_weights: vec![vec![0.0f64; n]; n],
            _labels: std::marker::PhantomData,
        }
    }

    /// Calcula o score de emissão para um rótulo num token com features dadas
    ///
    /// `score = Σ_k w_{k, label} * f_k(x, i)`
    pub fn emission_score(&self, features: &FeatureVector, label: &L) -> f64 {
        features
            .features
            .iter()
            .filter_map(|(name, value)| {
                self.emission_weights
                    .get(name)
                    .map(|weights| value * weights[label.index()])
            })
            .sum()
    }

    /// Calcula o score de transição de um rótulo para outro
    pub fn transition_score(&self, prev: &L, next: &L) -> f64 {
        self.transition_weights[prev.index()][next.index()]
    }

    /// Configura um peso de emissão
    pub fn set_emission(&mut self, feature: &str, label: &L, weight: f64) {
        let weights = self
            .emission_weights
            .entry(feature.to_string())
            .or_insert_with(|| vec![0.0; L::COUNT]);
        weights[label.index()] = weight;
    }

    /// Configura um peso de transição
    pub fn set_transition(&mut self, from: &L, to: &L, weight: f64) {
        self.transition_weights[from.index()][to.index()] = weight;
    }

    /// Soma um valor ao peso de transição já existente
    pub fn add_transition(&mut self, from: &L, to: &L, delta: f64) {
        self.transition_weights[from.index()][to.index()] += delta;
    }
}

impl<L: Label> Default for CrfModel<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Calcula os scores de emissão para todos os tokens e rótulos: `emission[i][t]`
pub fn compute_emission_scores<L: Label>(
    model: &CrfModel<L>,
    feature_vectors: &[FeatureVector],
) -> Vec<Vec<f64>> {
    let labels = L::all();
    feature_vectors
        .iter()
        .map(|fv| labels.iter().map(|l| model.emission_score(fv, l)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{BioTag, EntityLabel};
    use crate::tagger::FineTag;

    #[test]
    fn test_emission_score_positive() {
        let mut model: CrfModel<BioTag> = CrfModel::new();
        let tag = BioTag::Begin(EntityLabel::Person);
        model.set_emission("is_title", &tag, 2.5);

        let mut fv = FeatureVector::new(0);
        fv.insert("is_title", 1.0);

        assert!((model.emission_score(&fv, &tag) - 2.5).abs() < 1e-9);
        assert!(model.emission_score(&fv, &BioTag::Outside).abs() < 1e-9);
    }

    #[test]
    fn test_transition_score() {
        let mut model: CrfModel<FineTag> = CrfModel::new();
        model.set_transition(&FineTag::Dt, &FineTag::Nn, 2.0);
        model.add_transition(&FineTag::Dt, &FineTag::Nn, 0.5);

        assert!((model.transition_score(&FineTag::Dt, &FineTag::Nn) - 2.5).abs() < 1e-9);
        // Transição default é 0
        assert!(model.transition_score(&FineTag::Nn, &FineTag::Dt).abs() < 1e-9);
    }

    #[test]
    fn test_compute_emission_scores_shape() {
        let model: CrfModel<BioTag> = CrfModel::new();
        let fvs = vec![FeatureVector::new(0), FeatureVector::new(1)];
        let scores = compute_emission_scores(&model, &fvs);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].len(), BioTag::COUNT);
    }
}
