pub mod diagnostics;
pub mod sourcemap;

use diagnostics::{DiagnosticEmitter, IntoDiagnostic, Severity};
use sourcemap::SourceMap;
use target_lexicon::Triple;

/// Marker returned once at least one error has been emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorsEmitted;

/// State shared by every stage of one compilation.
pub struct Session<D: DiagnosticEmitter> {
    pub target: Triple,
    pub sources: SourceMap,
    pub diagnostics: D,
}

impl<D: DiagnosticEmitter> Session<D> {
    pub fn new(target: Triple, diagnostics: D) -> Self {
        Self {
            target,
            sources: SourceMap::default(),
            diagnostics,
        }
    }

    pub fn report<Context: ?Sized>(
        &mut self,
        diagnostic: impl IntoDiagnostic<Context>,
        cx: &Context,
    ) -> Result<(), ErrorsEmitted> {
        let diagnostic = diagnostic.into_diagnostic(cx);
        let severity = diagnostic.severity;

        self.diagnostics.emit_diagnostic(diagnostic, &self.sources);

        if severity < Severity::Error {
            Ok(())
        } else {
            Err(ErrorsEmitted)
        }
    }
}

#[cfg(test)]
mod tests {
    use target_lexicon::Triple;

    use super::diagnostics::{Diagnostic, Snippet};
    use super::sourcemap::Source;
    use super::{ErrorsEmitted, Session};

    #[test]
    fn report_collects_diagnostics() {
        let mut session = Session::new(Triple::host(), vec![]);
        let source_id = session.sources.insert(Source::new("main.plus", "return;"));

        let warning = Diagnostic::warning().with_message("unused");
        assert_eq!(session.report(warning, &()), Ok(()));

        let error = Diagnostic::error()
            .with_message("expected an integer")
            .with_snippet(Snippet::primary("here", source_id, 6..7));
        assert_eq!(session.report(error, &()), Err(ErrorsEmitted));

        assert_eq!(session.diagnostics.len(), 2);
    }
}
