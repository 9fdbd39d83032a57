#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),
    #[error("failed to read bundle file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write output file: {0}")]
    FileWrite(std::io::Error),
    #[error("FHIR boundary error: {0}")]
    Fhir(#[from] fhir::FhirError),
}

pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;
