// Copyright (C) 2019-2025 Aleo Systems Inc.
// This file is part of the Radian library.

// The Radian library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Radian library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Radian library. If not, see <https://www.gnu.org/licenses/>.

use crate::span::{BytePos, Pos, Span};

use std::{
    cell::RefCell,
    fmt, fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};

/// The source map containing all recorded sources,
/// methods to register new ones,
/// and methods to query about spans in relation to recorded sources.
#[derive(Default)]
pub struct SourceMap {
    /// The actual source map data.
    inner: RefCell<SourceMapInner>,
}

/// Actual data of the source map.
/// We use this setup for purposes of interior mutability.
#[derive(Default)]
struct SourceMapInner {
    /// The address space below this value is currently used by the files in the source map.
    used_address_space: u32,
    /// All the source files recorded thus far.
    source_files: Vec<Rc<SourceFile>>,
}

impl SourceMap {
    /// Loads the given `path` and returns a `SourceFile` for it.
    pub fn load_file(&self, path: &Path) -> io::Result<Rc<SourceFile>> {
        Ok(self.new_source(&fs::read_to_string(path)?, FileName::Real(path.to_owned())))
    }

    /// Registers `source` under the given file `name`, returning a `SourceFile` back.
    pub fn new_source(&self, source: &str, name: FileName) -> Rc<SourceFile> {
        let len = u32::try_from(source.len()).unwrap();
        let mut inner = self.inner.borrow_mut();
        let start_pos = inner.try_allocate_address_space(len).unwrap();
        let source_file = Rc::new(SourceFile::new(name, source.to_owned(), start_pos));
        inner.source_files.push(source_file.clone());
        source_file
    }

    /// Find the index for the source file containing `pos`.
    fn find_source_file_index(&self, pos: BytePos) -> Option<usize> {
        self.inner
            .borrow()
            .source_files
            .binary_search_by_key(&pos, |file| file.start_pos)
            .map_or_else(|p| p.checked_sub(1), Some)
    }

    /// Find the source file containing `pos`.
    fn find_source_file(&self, pos: BytePos) -> Option<Rc<SourceFile>> {
        Some(self.inner.borrow().source_files[self.find_source_file_index(pos)?].clone())
    }

    /// Finds line column info about a given `pos`.
    fn find_line_col(&self, pos: BytePos) -> Option<LineCol> {
        let source_file = self.find_source_file(pos)?;
        let (line, col) = source_file.lookup_file_pos(pos);
        Some(LineCol { source_file, line, col })
    }

    /// Retrieves the location (source file, line, col) on the given span.
    pub fn span_to_location(&self, sp: Span) -> Option<SpanLocation> {
        let lo = self.find_line_col(sp.lo)?;
        let hi = self.find_line_col(sp.hi)?;
        Some(SpanLocation {
            source_file: lo.source_file,
            line_start: lo.line,
            line_stop: hi.line,
            col_start: lo.col,
            col_stop: hi.col,
        })
    }

    /// Returns the source contents that is spanned by `span`.
    pub fn contents_of_span(&self, span: Span) -> Option<String> {
        let begin = self.find_source_file(span.lo)?;
        let end = self.find_source_file(span.hi)?;
        assert_eq!(begin.start_pos, end.start_pos);
        Some(begin.contents_of_span(span))
    }
}

impl SourceMapInner {
    /// Attempt reserving address space for `size` number of bytes.
    fn try_allocate_address_space(&mut self, size: u32) -> Option<BytePos> {
        let current = self.used_address_space;
        // By adding one, we can distinguish files, even when they are empty.
        self.used_address_space = current.checked_add(size)?.checked_add(1)?;
        Some(BytePos(current))
    }
}

/// A file name.
///
/// For now it's simply a wrapper around `PathBuf`,
/// but may become more complicated in the future.
#[derive(Clone, Debug)]
pub enum FileName {
    /// A real file.
    Real(PathBuf),
    /// Any sort of description for a source.
    Custom(String),
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Real(x) => x.display().fmt(f),
            Self::Custom(x) => f.write_str(x),
        }
    }
}

/// A single source in the [`SourceMap`].
pub struct SourceFile {
    /// The name of the file that the source came from.
    pub name: FileName,
    /// The complete source code.
    pub src: String,
    /// The start position of this source in the `SourceMap`.
    pub start_pos: BytePos,
    /// The end position of this source in the `SourceMap`.
    pub end_pos: BytePos,
    /// Locations of line beginnings in the source code.
    lines: Vec<BytePos>,
}

impl SourceFile {
    /// Creates a new `SourceFile` for the given `name` and `src`.
    fn new(name: FileName, mut src: String, start_pos: BytePos) -> Self {
        normalize_src(&mut src);
        let end_pos = start_pos + BytePos::from_usize(src.len());
        let lines = line_begins(&src, start_pos);
        Self { name, src, start_pos, end_pos, lines }
    }

    /// Converts an absolute `BytePos` to a `CharPos` relative to the `SourceFile`.
    fn relative_position(&self, pos: BytePos) -> BytePos {
        BytePos(pos.0 - self.start_pos.0)
    }

    /// Finds the line containing the given position.
    /// The return value is the index into the `lines` array of this
    /// `SourceFile`, not the 1-based line number.
    fn lookup_line(&self, pos: BytePos) -> Option<usize> {
        match self.lines.binary_search(&pos) {
            Ok(index) => Some(index),
            Err(0) => None,
            Err(index) => Some(index - 1),
        }
    }

    /// Looks up the file's 1-based line number and 1-based column offset, for a given `BytePos`.
    fn lookup_file_pos(&self, pos: BytePos) -> (usize, usize) {
        match self.lookup_line(pos) {
            None => (1, 1),
            Some(line) => {
                let line_start = self.lines[line];
                let col = pos.0 - line_start.0;
                (line + 1, col as usize + 1)
            }
        }
    }

    /// Returns the contents of the span within this source file.
    fn contents_of_span(&self, span: Span) -> String {
        let begin_pos = self.relative_position(span.lo).to_usize();
        let end_pos = self.relative_position(span.hi).to_usize();
        String::from_utf8_lossy(&self.src.as_bytes()[begin_pos..end_pos]).into_owned()
    }
}

/// The location of a span within a source file, in line/column terms.
pub struct SpanLocation {
    pub source_file: Rc<SourceFile>,
    pub line_start: usize,
    pub line_stop: usize,
    pub col_start: usize,
    pub col_stop: usize,
}

impl SpanLocation {
    /// A dummy location pointing at the start of a nameless file.
    pub fn dummy() -> Self {
        let dummy = "<dummy>".to_owned();
        let span = Span::default();
        Self {
            source_file: Rc::new(SourceFile::new(FileName::Custom(dummy), String::new(), span.lo)),
            line_start: 0,
            line_stop: 0,
            col_start: 0,
            col_stop: 0,
        }
    }
}

impl fmt::Display for SpanLocation {
    /// Renders the location the way Radian diagnostics expect it:
    /// `<path>, line L(C1-C2)` within a single line,
    /// or `<path>, lines L1-L2` when the span covers several.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.line_start == self.line_stop {
            write!(f, "{}, line {}({}-{})", self.source_file.name, self.line_start, self.col_start, self.col_stop)
        } else {
            write!(f, "{}, lines {}-{}", self.source_file.name, self.line_start, self.line_stop)
        }
    }
}

/// Detailed position metadata along with a `SourceFile` handle.
struct LineCol {
    /// Information on the original source.
    source_file: Rc<SourceFile>,
    /// The 1-based line number.
    line: usize,
    /// The 1-based column offset into the line.
    col: usize,
}

/// Returns the set of positions at which lines begin in `src`.
fn line_begins(src: &str, start_pos: BytePos) -> Vec<BytePos> {
    std::iter::once(start_pos)
        .chain(src.match_indices('\n').map(|(p, _)| start_pos + BytePos::from_usize(p + 1)))
        .collect()
}

/// Normalizes the source code and records the normalizations.
fn normalize_src(src: &mut String) {
    remove_bom(src);
}

/// Removes UTF-8 BOM, if any.
fn remove_bom(src: &mut String) {
    if src.starts_with('\u{feff}') {
        src.drain(..3);
    }
}
