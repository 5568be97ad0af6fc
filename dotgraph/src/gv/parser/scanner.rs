//! A character cursor over the input text. The scanner keeps track of the
//! current character, the position in the input and the line/column of the
//! current character, and knows how to print the location of an error.

/// A saved scanner state. Restoring a mark "unreads" everything that was
/// consumed after the mark was taken.
#[derive(Debug, Clone, Copy)]
pub struct ScannerMark {
    pos: usize,
    ch: char,
    line: usize,
    column: usize,
}

#[derive(Debug, Clone)]
pub struct Scanner {
    input: Vec<char>,
    // Points one char after the current char.
    pos: usize,
    ch: char,
    line: usize,
    column: usize,
}

impl Scanner {
    pub fn from_string(input: &str) -> Self {
        Scanner::new(input.chars().collect())
    }

    pub fn new(input: Vec<char>) -> Self {
        let mut s = Self {
            input,
            pos: 0,
            ch: '\0',
            line: 1,
            column: 0,
        };
        s.read_char();
        s
    }

    /// Returns the current character, or '\0' at the end of the input.
    pub fn ch(&self) -> char {
        self.ch
    }

    /// Returns the offset of the current character.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.input.len()
    }

    /// Returns true if the cursor went past the last character.
    pub fn at_end(&self) -> bool {
        self.ch == '\0' && !self.has_next()
    }

    /// Returns the character after the current one, without consuming it.
    pub fn peek_char(&self) -> char {
        if self.has_next() {
            self.input[self.pos]
        } else {
            '\0'
        }
    }

    pub fn read_char(&mut self) {
        if self.ch == '\n' {
            self.line += 1;
            self.column = 0;
        }
        if !self.has_next() {
            // Move past the end so that 'at_end' is stable.
            if self.ch != '\0' {
                self.column += 1;
            }
            self.ch = '\0';
        } else {
            self.ch = self.input[self.pos];
            self.pos += 1;
            self.column += 1;
        }
    }

    pub fn mark(&self) -> ScannerMark {
        ScannerMark {
            pos: self.pos,
            ch: self.ch,
            line: self.line,
            column: self.column,
        }
    }

    pub fn reset(&mut self, mark: ScannerMark) {
        self.pos = mark.pos;
        self.ch = mark.ch;
        self.line = mark.line;
        self.column = mark.column;
    }

    pub fn skip_whitespace(&mut self) -> bool {
        let mut changed = false;
        while self.ch.is_whitespace() {
            self.read_char();
            changed = true;
        }
        changed
    }

    /// Consumes everything up to and including the end of the line.
    pub fn skip_line(&mut self) {
        while !self.at_end() && self.ch != '\n' {
            self.read_char();
        }
        if self.ch == '\n' {
            self.read_char();
        }
    }

    /// Renders the line that contains the char offset \p pos, followed by a
    /// line with a '^' marker under the offending character.
    pub fn location_report(&self, pos: usize) -> String {
        let pos = pos.min(self.input.len());
        // 'pos' points one char after the error.
        let err_idx = pos.saturating_sub(1);
        let mut start = err_idx.min(self.input.len());
        while start > 0 && self.input[start - 1] != '\n' {
            start -= 1;
        }
        let mut end = start;
        while end < self.input.len() && self.input[end] != '\n' {
            end += 1;
        }
        let line: String = self.input[start..end].iter().collect();
        let mut result = line;
        result.push('\n');
        result.push_str(&" ".repeat(err_idx - start));
        result.push('^');
        result
    }

    pub fn print_error(&self, pos: usize) {
        eprintln!("{}", self.location_report(pos));
    }
}

#[test]
fn test_scanner_lines() {
    let mut s = Scanner::from_string("ab\ncd");
    assert_eq!(s.ch(), 'a');
    assert_eq!((s.line(), s.column()), (1, 1));
    s.read_char();
    s.read_char();
    assert_eq!(s.ch(), '\n');
    s.read_char();
    assert_eq!(s.ch(), 'c');
    assert_eq!((s.line(), s.column()), (2, 1));
    assert_eq!(s.peek_char(), 'd');

    let mark = s.mark();
    s.read_char();
    s.read_char();
    assert!(s.at_end());
    s.reset(mark);
    assert_eq!(s.ch(), 'c');
    assert_eq!((s.line(), s.column()), (2, 1));
}

#[test]
fn test_location_report() {
    let mut s = Scanner::from_string("graph {\n  a = ;\n}");
    while s.ch() != ';' {
        s.read_char();
    }
    let report = s.location_report(s.pos());
    assert_eq!(report, "  a = ;\n      ^");
}
