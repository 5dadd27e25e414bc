use plusc_diagnostic::termcolor::{ColorChoice, StandardStream};
pub use plusc_diagnostic::*;

use crate::sourcemap::SourceMap;

pub mod prelude {
    pub use plusc_diagnostic::span::Span;
    pub use plusc_diagnostic::{Severity, SnippetKind};

    pub use super::{Diagnostic, IntoDiagnostic, Snippet};
    pub use crate::sourcemap::SourceId;
}

pub type Diagnostic = plusc_diagnostic::Diagnostic<SourceMap>;
pub type Snippet = plusc_diagnostic::Snippet<SourceMap>;

pub trait DiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap);
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, _sources: &SourceMap) {
        self.push(diagnostic);
    }
}

#[derive(Debug)]
pub struct PrettyDiagnosticEmitter {
    pub stream: StandardStream,
    pub config: Config,
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        Self {
            stream: StandardStream::stderr(ColorChoice::Auto),
            config: Config::default(),
        }
    }
}

impl DiagnosticEmitter for PrettyDiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap) {
        // nothing sensible to do if stderr is gone
        let _ = diagnostic.write_to_stream(sources, &self.config, &mut self.stream);
    }
}

pub trait IntoDiagnostic<Context: ?Sized> {
    fn into_diagnostic(self, cx: &Context) -> Diagnostic;
}

impl IntoDiagnostic<()> for Diagnostic {
    fn into_diagnostic(self, _cx: &()) -> Diagnostic {
        self
    }
}
