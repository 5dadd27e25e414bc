use std::collections::BTreeMap;
use std::io;

use termcolor::{ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use super::sources::{Cached, Source, Sources};
use super::{Config, Diagnostic, Severity, SnippetKind};
use crate::span::Span;

const TAB: &str = "    ";

impl<S: Sources> Diagnostic<S> {
    pub fn write_to_stream(
        &self,
        sources: &S,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            sources,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor, S: Sources> {
    diagnostic: &'a Diagnostic<S>,
    sources: &'a S,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor, S: Sources> DiagnosticWriter<'_, 'a, W, S> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        for (source, snippets) in self.snippets_by_source().into_values() {
            for (snippets, mut lines) in get_overlapping_groups(snippets, |s| s.lines) {
                lines.start = lines.start.saturating_sub(self.config.context_size);
                lines.end = (lines.end + self.config.context_size).min(source.num_lines());

                self.draw_group(source, &snippets, lines)?;
            }
        }

        for note in &self.diagnostic.notes {
            self.stream.set_color(&self.config.emphasis)?;
            write!(self.stream, "  = note:")?;
            self.stream.reset()?;
            writeln!(self.stream, " {note}")?;
        }

        writeln!(self.stream)?;

        Ok(())
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(self.primary_color())?;

        write!(self.stream, "{}:", self.diagnostic.severity.as_str())?;

        self.stream.reset()?;

        if let Some(message) = &self.diagnostic.message {
            write!(self.stream, " {message}")?;
        }

        writeln!(self.stream)
    }

    fn draw_group(
        &mut self,
        source: &Cached<S::Source>,
        snippets: &[SnippetData],
        lines: Span,
    ) -> io::Result<()> {
        // the last line drawn is `lines.end` once made one-based
        let line_num_width = 1 + lines.end.max(1).ilog10() as usize;

        // groups are never empty
        let (line_num, col_num) = source
            .byte_to_line_col(snippets[0].bytes.start)
            .expect("position out of bounds");

        self.stream.set_color(&self.config.subtle)?;
        write!(self.stream, "In {}:{line_num}:{col_num}", source.name_str())?;

        if let Some(path) = source.path() {
            write!(self.stream, " ({}:{line_num}:{col_num})", path.display())?;
        }

        writeln!(self.stream)?;
        self.stream.reset()?;

        for line in lines.start..lines.end {
            self.draw_gutter(Some(line + 1), line_num_width)?;

            let line_str = source.line_str(line).expect("line out of bounds");
            writeln!(self.stream, "{}", line_str.replace('\t', TAB))?;

            let line_start = source.line_to_byte(line).expect("line out of bounds");
            let line_end = line_start + line_str.len();

            for snippet in snippets.iter().filter(|s| s.lines.start == line) {
                self.draw_gutter(None, line_num_width)?;

                let before_snippet = &source.source_str()[line_start..snippet.bytes.start];
                let offset = str_width(before_snippet);

                // only the first line of a snippet is underlined
                let underline_len = snippet
                    .bytes
                    .end
                    .min(line_end)
                    .saturating_sub(snippet.bytes.start);

                self.stream.set_color(self.snippet_color(snippet.kind))?;

                write!(self.stream, "{:<offset$}", "")?;

                for _ in 0..underline_len.max(1) {
                    write!(self.stream, "{}", self.config.underline)?;
                }

                writeln!(
                    self.stream,
                    "{}{}",
                    self.config.underline_after, snippet.label
                )?;

                self.stream.reset()?;
            }
        }

        Ok(())
    }

    fn draw_gutter(&mut self, line_num: Option<usize>, width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;

        match line_num {
            Some(line_num) => write!(self.stream, "{line_num:>width$}")?,
            None => write!(self.stream, "{:>width$}", "")?,
        }

        write!(self.stream, " {} ", self.config.gutter)?;

        self.stream.reset()
    }

    fn snippets_by_source(
        &self,
    ) -> BTreeMap<S::SourceId, (&'a Cached<S::Source>, Vec<SnippetData<'a>>)> {
        let mut by_source = BTreeMap::new();

        for snippet in &self.diagnostic.snippets {
            let (source, snippets) = by_source.entry(snippet.source_id).or_insert_with(|| {
                let source = self
                    .sources
                    .get_source(snippet.source_id)
                    .expect("source missing");
                (source, vec![])
            });

            let start_line = source
                .byte_to_line_index(snippet.span.start)
                .expect("span start out of bounds");
            let end_line = source
                .byte_to_line_index(snippet.span.end)
                .expect("span end out of bounds");

            snippets.push(SnippetData {
                label: &snippet.label,
                kind: snippet.kind,

                bytes: snippet.span,
                lines: Span::new(start_line, end_line + 1),
            });
        }

        by_source
    }

    fn primary_color(&self) -> &'a ColorSpec {
        match self.diagnostic.severity {
            Severity::Warning => &self.config.warning_color,
            Severity::Error => &self.config.error_color,
        }
    }

    fn snippet_color(&self, kind: SnippetKind) -> &'a ColorSpec {
        match kind {
            SnippetKind::Primary => self.primary_color(),
            SnippetKind::Secondary => &self.config.emphasis,
        }
    }
}

#[derive(Clone)]
struct SnippetData<'a> {
    label: &'a str,
    kind: SnippetKind,

    bytes: Span,
    lines: Span,
}

/// Sorts `items` by range start and merges items whose ranges overlap into
/// groups, each returned with the range it covers.
fn get_overlapping_groups<T, F>(mut items: Vec<T>, get_range: F) -> Vec<(Vec<T>, Span)>
where
    F: Fn(&T) -> Span,
{
    items.sort_by_key(|item| get_range(item).start);

    let mut groups = vec![];

    let mut group = vec![];
    let mut group_range = Span::empty(0);

    for item in items {
        let range = get_range(&item);

        if range.start > group_range.end {
            if !group.is_empty() {
                groups.push((std::mem::take(&mut group), group_range));
            }

            group_range = Span::empty(range.start);
        }

        group_range.end = group_range.end.max(range.end);
        group.push(item);
    }

    if !group.is_empty() {
        groups.push((group, group_range));
    }

    groups
}

fn str_width(s: &str) -> usize {
    let num_tabs = s.chars().filter(|&ch| ch == '\t').count();
    s.width() + num_tabs * TAB.len()
}
