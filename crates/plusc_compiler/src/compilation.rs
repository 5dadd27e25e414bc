use log::debug;
use plusc_backend::codegen::{Codegen, Syntax};
use plusc_backend::BackendError;
use plusc_frontend::token::Token;
use plusc_frontend::ParseError;
use plusc_middle::fold::fold_stmt;
use plusc_session::diagnostics::DiagnosticEmitter;
use plusc_session::sourcemap::SourceId;
use plusc_session::Session;
use target_lexicon::Triple;

use crate::cli::Emit;
use crate::{CompilerError, CompilerResult};

#[derive(thiserror::Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Codegen(#[from] BackendError),
}

/// Parse, fold and emit a single statement.
pub fn compile_tokens(tokens: &[Token], codegen: &Codegen) -> Result<String, CompileError> {
    let stmt = plusc_frontend::parse(tokens)?;
    let stmt = fold_stmt(stmt);

    Ok(codegen.emit(&stmt))
}

/// Lex, then [`compile_tokens`] for `target`.
pub fn compile(source: &str, target: &Triple, syntax: Syntax) -> Result<String, CompileError> {
    let codegen = Codegen::new(target, syntax)?;
    compile_tokens(&plusc_frontend::lex(source), &codegen)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub syntax: Syntax,
    pub emit: Emit,
    pub fold: bool,
}

/// Runs the pipeline over one source in the session. Parse errors are
/// reported to the session's emitter.
pub fn compile_source<D: DiagnosticEmitter>(
    session: &mut Session<D>,
    source_id: SourceId,
    options: &Options,
) -> CompilerResult<String> {
    let source = session
        .sources
        .get(source_id)
        .map(|source| source.source.clone())
        .ok_or(CompilerError::MissingSource)?;

    let tokens = plusc_frontend::lex(&source);
    debug!("lexed {} tokens", tokens.len());

    let output = match options.emit {
        Emit::Tokens => tokens.iter().map(|token| format!("{token}\n")).collect(),

        Emit::Ast => {
            let stmt = parse_and_fold(session, source_id, &tokens, options)?;
            format!("{stmt}\n")
        }

        Emit::Asm => {
            let codegen = Codegen::new(&session.target, options.syntax)?;

            let stmt = parse_and_fold(session, source_id, &tokens, options)?;
            codegen.emit(&stmt)
        }
    };

    Ok(output)
}

fn parse_and_fold<D: DiagnosticEmitter>(
    session: &mut Session<D>,
    source_id: SourceId,
    tokens: &[Token],
    options: &Options,
) -> CompilerResult<plusc_ir::tree::Stmt> {
    let (stmt, trailing) = match plusc_frontend::parse_with_trailing(tokens) {
        Ok(parsed) => parsed,
        Err(err) => {
            let _ = session.report(err, &source_id);
            return Err(CompilerError::HadErrors);
        }
    };
    debug!("parsed: {stmt}");

    if let Some(trailing) = trailing {
        session
            .report(trailing, &source_id)
            .map_err(|_| CompilerError::HadErrors)?;
    }

    if !options.fold {
        return Ok(stmt);
    }

    let stmt = fold_stmt(stmt);
    debug!("folded: {stmt}");

    Ok(stmt)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use plusc_backend::codegen::{Codegen, Syntax};
    use plusc_backend::BackendError;
    use plusc_frontend::ParseErrorKind;
    use plusc_session::diagnostics::{Diagnostic, Severity};
    use plusc_session::sourcemap::Source;
    use plusc_session::Session;
    use target_lexicon::Triple;

    use super::{compile, compile_source, compile_tokens, CompileError, Options};
    use crate::cli::Emit;
    use crate::CompilerError;

    fn linux() -> Triple {
        Triple::from_str("x86_64-unknown-linux-gnu").unwrap()
    }

    fn compile_linux(source: &str) -> Result<String, CompileError> {
        let codegen = Codegen::new(&linux(), Syntax::Intel).unwrap();
        compile_tokens(&plusc_frontend::lex(source), &codegen)
    }

    fn session_compile(
        source: &str,
        target: Triple,
        options: Options,
    ) -> (Result<String, CompilerError>, Vec<Diagnostic>) {
        let mut session = Session::new(target, vec![]);
        let source_id = session.sources.insert(Source::new("main.plus", source));

        let result = compile_source(&mut session, source_id, &options);
        (result, session.diagnostics)
    }

    const ASM: Options = Options {
        syntax: Syntax::Intel,
        emit: Emit::Asm,
        fold: true,
    };

    #[test]
    fn two_plus_three() {
        insta::assert_snapshot!(compile_linux("return 2+3;").unwrap(), @r"
        .intel_syntax noprefix
        .global _start
        _start:
            mov rax, 5
            mov rdi, rax
            mov rax, 60
            syscall
        ");
    }

    #[test]
    fn missing_semicolon() {
        let err = compile_linux("return 4").unwrap_err();

        let CompileError::Parse(err) = err else {
            panic!("expected a parse error");
        };
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedEof { .. }));
    }

    #[test]
    fn empty_input() {
        let err = compile_linux("").unwrap_err();
        assert!(err.to_string().starts_with("unexpected end of input"));
    }

    #[test]
    fn variable() {
        let err = compile_linux("return x;").unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
    }

    #[test]
    fn overflowing_literal() {
        let err = compile_linux("return 99999999999999999999;").unwrap_err();

        let CompileError::Parse(err) = err else {
            panic!("expected a parse error");
        };
        assert!(matches!(err.kind, ParseErrorKind::InvalidInteger { .. }));
    }

    #[test]
    fn att_for_linux() {
        let asm = compile("return 7;", &linux(), Syntax::Att).unwrap();
        assert!(asm.starts_with(".global _start\n_start:\n    movq $7, %rax\n"));
    }

    #[test]
    fn codegen_error_for_other_targets() {
        let target = Triple::from_str("x86_64-apple-darwin").unwrap();
        let err = compile("return 7;", &target, Syntax::Intel).unwrap_err();

        assert!(matches!(err, CompileError::Codegen(BackendError::UnsupportedOs(_))));
        assert_eq!(err.to_string(), "unsupported operating system: darwin");
    }

    #[test]
    fn session_pipeline_reports_parse_errors() {
        let (result, diagnostics) = session_compile("return x;", linux(), ASM);

        assert!(matches!(result, Err(CompilerError::HadErrors)));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message.as_deref(),
            Some("expected an integer, found identifier `x`")
        );
    }

    #[test]
    fn session_pipeline_warns_about_trailing_tokens() {
        let (result, diagnostics) = session_compile("return 1; return 2;", linux(), ASM);

        assert!(result.is_ok());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(
            diagnostics[0].message.as_deref(),
            Some("tokens after the statement are ignored")
        );
    }

    #[test]
    fn session_pipeline_without_folding() {
        let options = Options {
            emit: Emit::Ast,
            fold: false,
            ..ASM
        };
        let (result, diagnostics) = session_compile("return 1+2+3;", linux(), options);

        assert_eq!(result.unwrap(), "return ((1 + 2) + 3);\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn session_pipeline_folds() {
        let options = Options {
            emit: Emit::Ast,
            ..ASM
        };
        let (result, _) = session_compile("return 1+2+3;", linux(), options);

        assert_eq!(result.unwrap(), "return 6;\n");
    }

    #[test]
    fn token_dump() {
        let options = Options {
            emit: Emit::Tokens,
            ..ASM
        };
        let (result, _) = session_compile("return 2+3;", linux(), options);

        insta::assert_snapshot!(result.unwrap(), @r#"
        (Keyword, "return")
        (Integer, "2")
        (Symbol, "+")
        (Integer, "3")
        (Symbol, ";")
        "#);
    }

    #[test]
    fn token_dump_never_fails() {
        let options = Options {
            emit: Emit::Tokens,
            ..ASM
        };
        let (result, diagnostics) = session_compile("return x", linux(), options);

        assert_eq!(result.unwrap(), "(Keyword, \"return\")\n(Identifier, \"x\")\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unsupported_target() {
        let target = Triple::from_str("aarch64-apple-darwin").unwrap();
        let (result, _) = session_compile("return 1;", target, ASM);

        assert!(matches!(
            result,
            Err(CompilerError::Codegen(BackendError::UnsupportedArch(_)))
        ));
    }
}
