use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use plusc_backend::codegen::Syntax;
use target_lexicon::Triple;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The source file.
    pub input: PathBuf,

    /// Where to write the assembly listing.
    #[arg(short, long, default_value = "out.asm")]
    pub output: PathBuf,

    /// Target triple. Defaults to the host.
    #[arg(long, value_parser = parse_triple)]
    pub target: Option<Triple>,

    /// Assembler dialect of the listing.
    #[arg(long, value_enum, default_value_t = SyntaxArg::Intel)]
    pub syntax: SyntaxArg,

    /// What to produce. Tokens and trees are printed to stdout.
    #[arg(long, value_enum, default_value_t = Emit::Asm)]
    pub emit: Emit,

    /// Skip constant folding.
    #[arg(long)]
    pub no_fold: bool,

    /// Also assemble and link the listing into this executable.
    #[arg(long, value_name = "EXE")]
    pub link: Option<PathBuf>,

    /// Program used for linking instead of the target's default.
    #[arg(long, value_name = "PROGRAM", requires = "link")]
    pub linker: Option<String>,

    /// More logging. Can be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_triple(s: &str) -> Result<Triple, String> {
    s.parse().map_err(|err: target_lexicon::ParseError| err.to_string())
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxArg {
    Intel,
    Att,
}

impl From<SyntaxArg> for Syntax {
    fn from(syntax: SyntaxArg) -> Self {
        match syntax {
            SyntaxArg::Intel => Syntax::Intel,
            SyntaxArg::Att => Syntax::Att,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    Tokens,
    Ast,
    Asm,
}
