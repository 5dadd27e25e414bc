use target_lexicon::{Architecture, OperatingSystem};

pub mod codegen;
pub mod linker;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendError {
    #[error("unsupported architecture: {0}")]
    UnsupportedArch(Architecture),

    #[error("unsupported operating system: {0}")]
    UnsupportedOs(OperatingSystem),
}

pub type BackendResult<T> = Result<T, BackendError>;
