pub mod cli;
pub mod compilation;

use std::path::PathBuf;

use plusc_backend::linker::LinkerError;
use plusc_backend::BackendError;
use target_lexicon::Triple;

#[derive(thiserror::Error, Debug)]
pub enum CompilerError {
    #[error("couldn't read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codegen(#[from] BackendError),

    #[error("no linker available for target {0}")]
    NoLinker(Triple),

    #[error(transparent)]
    Link(#[from] LinkerError),

    #[error("couldn't set up logging: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("source not in session")]
    MissingSource,

    #[error("errors while compiling")]
    HadErrors,
}

pub type CompilerResult<T> = Result<T, CompilerError>;
