use thiserror::Error;

/// Ligne du CSV rejetée. `row` est numéroté à partir de 1 (hors en-tête).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("ligne {row} : {kind}")]
pub struct ParseError {
    pub row: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("{0} colonne(s) trouvée(s), 3 attendues (date, numéros, multiplicateur)")]
    MissingColumns(usize),

    #[error("date invalide : '{0}'")]
    Date(String),

    #[error("attendu 6 numéros (5 boules + Powerball), reçu {0}")]
    NumberCount(usize),

    #[error("numéro invalide : '{0}'")]
    Number(String),

    #[error("boule {0} hors limites (1-69)")]
    MainOutOfRange(u8),

    #[error("Powerball {0} hors limites (1-26)")]
    PowerballOutOfRange(u8),

    #[error("boule en double : {0}")]
    DuplicateMain(u8),

    #[error("multiplicateur invalide : '{0}'")]
    Multiplier(String),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("erreur de lecture CSV : {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("aucun tirage ne correspond aux filtres")]
    EmptyDataset,

    #[error("{available} candidat(s) ≤ {max_value} disponible(s), {requested} demandé(s)")]
    InsufficientCandidates {
        requested: usize,
        available: usize,
        max_value: u8,
    },

    #[error("position {0} invalide (1-5)")]
    InvalidSlot(usize),
}
