//! Tipos de erro do textlab.
//!
//! A fachada valida apenas as próprias pré-condições; qualquer falha dentro
//! do pipeline é propagada sem recuperação como [`Error::UpstreamProcessing`].

use std::io;
use thiserror::Error;

/// Alias de resultado usado em todo o crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Erros que podem ocorrer ao carregar modelos, processar textos,
/// registrar regras ou renderizar visualizações.
#[derive(Error, Debug)]
pub enum Error {
    /// O identificador de modelo pedido não está instalado localmente.
    #[error("modelo não encontrado: '{0}' não está instalado")]
    ModelNotFound(String),

    /// Entrada ausente ou malformada para a fachada (documento inválido,
    /// padrão vazio, arquivo que não é UTF-8).
    #[error("entrada inválida: {0}")]
    InvalidInput(String),

    /// Falha levantada dentro do pipeline, do matcher ou do renderizador.
    #[error("falha no processamento: {0}")]
    UpstreamProcessing(String),

    /// Estilo de visualização desconhecido (aceitos: "dep" e "ent").
    #[error("estilo inválido: '{0}' (use \"dep\" ou \"ent\")")]
    InvalidStyle(String),

    /// Já existe uma regra com este nome no matcher.
    #[error("regra duplicada: '{0}' já está registrada")]
    DuplicateRuleName(String),

    /// Erro de E/S ao ler arquivos de entrada.
    #[error("erro de E/S: {0}")]
    Io(#[from] io::Error),

    /// Erro de (de)serialização JSON.
    #[error("erro de JSON: {0}")]
    Json(#[from] serde_json::Error),
}
