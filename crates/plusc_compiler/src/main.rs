use std::fs;
use std::process::ExitCode;

use clap::Parser as _;
use log::{debug, info, LevelFilter};
use plusc_backend::linker::Linker;
use plusc_compiler::cli::{Cli, Emit};
use plusc_compiler::compilation::{compile_source, Options};
use plusc_compiler::{CompilerError, CompilerResult};
use plusc_session::diagnostics::PrettyDiagnosticEmitter;
use plusc_session::sourcemap::Source;
use plusc_session::Session;
use simple_logger::SimpleLogger;
use target_lexicon::Triple;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,

        // already reported as diagnostics
        Err(CompilerError::HadErrors) => ExitCode::FAILURE,

        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CompilerResult<()> {
    init_logger(cli.verbose)?;

    let target = cli.target.unwrap_or_else(Triple::host);
    let name = cli.input.display().to_string();

    info!("building {name} for {target}");

    let source = fs::read_to_string(&cli.input).map_err(|source| CompilerError::Read {
        path: cli.input.clone(),
        source,
    })?;

    let mut session = Session::new(target, PrettyDiagnosticEmitter::default());
    let source_id = session.sources.insert(Source::new(name, source));

    let options = Options {
        syntax: cli.syntax.into(),
        emit: cli.emit,
        fold: !cli.no_fold,
    };

    let output = compile_source(&mut session, source_id, &options)?;

    if cli.emit != Emit::Asm {
        print!("{output}");
        return Ok(());
    }

    fs::write(&cli.output, output)?;
    debug!("wrote listing to {}", cli.output.display());

    if let Some(exe) = &cli.link {
        let linker = match cli.linker {
            Some(program) => Linker::Custom(program),
            None => Linker::detect(&session.target)
                .ok_or_else(|| CompilerError::NoLinker(session.target.clone()))?,
        };

        linker.link(&cli.output, exe)?;
        info!("linked {}", exe.display());
    }

    Ok(())
}

fn init_logger(verbosity: u8) -> CompilerResult<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    SimpleLogger::new()
        .with_level(level)
        .without_timestamps()
        .init()?;

    Ok(())
}
