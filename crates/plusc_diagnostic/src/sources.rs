use std::path::{Path, PathBuf};

/// A collection of sources that diagnostics can point into.
pub trait Sources {
    type SourceId: Copy + Eq + std::hash::Hash + Ord;
    type Source: Source;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>>;
}

pub trait Source {
    fn name_str(&self) -> &str;
    fn path(&self) -> Option<&Path>;

    fn source_str(&self) -> &str;
}

impl<S: Source> Sources for Vec<Cached<S>> {
    type SourceId = usize;
    type Source = S;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>> {
        self.get(id)
    }
}

impl Source for (String, String) {
    fn name_str(&self) -> &str {
        &self.0
    }

    fn path(&self) -> Option<&Path> {
        None
    }

    fn source_str(&self) -> &str {
        &self.1
    }
}

impl Source for (String, PathBuf, String) {
    fn name_str(&self) -> &str {
        &self.0
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.1)
    }

    fn source_str(&self) -> &str {
        &self.2
    }
}

/// A source with its line breaks precomputed.
#[derive(Debug, Clone)]
pub struct Cached<S: Source> {
    source: S,
    line_breaks: Vec<usize>,
}

impl<S: Source> Cached<S> {
    pub fn new(source: S) -> Self {
        let line_breaks = source
            .source_str()
            .char_indices()
            .filter_map(|(i, ch)| (ch == '\n').then_some(i))
            .collect();

        Self {
            source,
            line_breaks,
        }
    }

    pub fn as_source(&self) -> &S {
        &self.source
    }

    /// One-based line and column of a byte offset.
    pub fn byte_to_line_col(&self, byte: usize) -> Option<(usize, usize)> {
        let line = self.byte_to_line_index(byte)?;
        let col = byte - self.line_to_byte(line)?;

        Some((line + 1, col + 1))
    }

    /// Zero-based line containing a byte offset. The offset one past the end
    /// of the source belongs to the last line.
    pub fn byte_to_line_index(&self, byte: usize) -> Option<usize> {
        if byte > self.source_str().len() {
            return None;
        }

        match self.line_breaks.binary_search(&byte) {
            Ok(line) | Err(line) => Some(line),
        }
    }

    pub fn line_to_byte(&self, line: usize) -> Option<usize> {
        match line {
            0 => Some(0),
            _ => self.line_breaks.get(line - 1).map(|&byte| byte + 1),
        }
    }

    /// Line contents without the trailing line break.
    pub fn line_str(&self, index: usize) -> Option<&str> {
        let start = self.line_to_byte(index)?;
        let end = self
            .line_to_byte(index + 1)
            .unwrap_or(self.source_str().len());

        let s = &self.source_str()[start..end];
        let s = s.strip_suffix('\n').unwrap_or(s);
        let s = s.strip_suffix('\r').unwrap_or(s);

        Some(s)
    }

    pub fn num_lines(&self) -> usize {
        1 + self.line_breaks.len()
    }
}

impl<S: Source> Source for Cached<S> {
    fn name_str(&self) -> &str {
        self.source.name_str()
    }

    fn path(&self) -> Option<&Path> {
        self.source.path()
    }

    fn source_str(&self) -> &str {
        self.source.source_str()
    }
}

#[cfg(test)]
mod tests {
    use super::Cached;

    fn cached(s: &str) -> Cached<(String, String)> {
        Cached::new(("sample".to_owned(), s.to_owned()))
    }

    #[test]
    fn line_index_includes_end_of_source() {
        let source = cached("return 1;\nreturn 2;");

        assert_eq!(source.byte_to_line_index(0), Some(0));
        assert_eq!(source.byte_to_line_index(9), Some(0));
        assert_eq!(source.byte_to_line_index(10), Some(1));
        assert_eq!(source.byte_to_line_index(19), Some(1));
        assert_eq!(source.byte_to_line_index(20), None);
    }

    #[test]
    fn line_col_is_one_based() {
        let source = cached("return\n  4");

        assert_eq!(source.byte_to_line_col(0), Some((1, 1)));
        assert_eq!(source.byte_to_line_col(9), Some((2, 3)));
        assert_eq!(source.byte_to_line_col(10), Some((2, 4)));

        assert_eq!(cached("").byte_to_line_col(0), Some((1, 1)));
    }

    #[test]
    fn line_strs_strip_breaks() {
        let source = cached("return 1\r\n+ 2;\n");

        assert_eq!(source.num_lines(), 3);
        assert_eq!(source.line_str(0), Some("return 1"));
        assert_eq!(source.line_str(1), Some("+ 2;"));
        assert_eq!(source.line_str(2), Some(""));
        assert_eq!(source.line_str(3), None);
    }
}
