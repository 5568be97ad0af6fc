//! The Lexer implementation for the GraphViz file format.

use super::scanner::Scanner;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    EOF,
    Identifier(String),
    HtmlString(String),
    GraphKW,
    NodeKW,
    EdgeKW,
    DigraphKW,
    StrictKW,
    SubgraphKW,
    Equal,
    Colon,
    Comma,
    Semicolon,
    ArrowRight,
    ArrowLine,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Error(String),
}

impl Token {
    /// Returns the spelling of the token, for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::EOF => "end of file".to_string(),
            Token::Identifier(name) => format!("identifier \"{}\"", name),
            Token::HtmlString(_) => "html string".to_string(),
            Token::GraphKW => "'graph'".to_string(),
            Token::NodeKW => "'node'".to_string(),
            Token::EdgeKW => "'edge'".to_string(),
            Token::DigraphKW => "'digraph'".to_string(),
            Token::StrictKW => "'strict'".to_string(),
            Token::SubgraphKW => "'subgraph'".to_string(),
            Token::Equal => "'='".to_string(),
            Token::Colon => "':'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Semicolon => "';'".to_string(),
            Token::ArrowRight => "'->'".to_string(),
            Token::ArrowLine => "'--'".to_string(),
            Token::OpenBracket => "'['".to_string(),
            Token::CloseBracket => "']'".to_string(),
            Token::OpenBrace => "'{'".to_string(),
            Token::CloseBrace => "'}'".to_string(),
            Token::Error(msg) => msg.clone(),
        }
    }
}

/// Returns the keyword token for \p name. Keywords are case-insensitive.
pub fn keyword(name: &str) -> Option<Token> {
    match name.to_ascii_lowercase().as_str() {
        "graph" => Some(Token::GraphKW),
        "node" => Some(Token::NodeKW),
        "edge" => Some(Token::EdgeKW),
        "digraph" => Some(Token::DigraphKW),
        "strict" => Some(Token::StrictKW),
        "subgraph" => Some(Token::SubgraphKW),
        _ => None,
    }
}

fn is_id_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || (!ch.is_ascii() && ch != '\0')
}

fn is_id_char(ch: char) -> bool {
    is_id_start(ch) || ch.is_ascii_digit()
}

#[derive(Debug, Clone)]
pub struct Lexer {
    scanner: Scanner,
    // Location of the first char of the last token.
    tok_line: usize,
    tok_column: usize,
    tok_pos: usize,
}

impl Lexer {
    pub fn from_string(input: &str) -> Self {
        let chars = input.chars().collect();
        Lexer::new(chars)
    }

    pub fn new(input: Vec<char>) -> Self {
        let scanner = Scanner::new(input);
        Self {
            tok_line: scanner.line(),
            tok_column: scanner.column(),
            tok_pos: scanner.pos(),
            scanner,
        }
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Returns the line and column of the last token.
    pub fn location(&self) -> (usize, usize) {
        (self.tok_line, self.tok_column)
    }

    /// Returns the char offset (one past the first char) of the last token.
    pub fn pos(&self) -> usize {
        self.tok_pos
    }

    pub fn print_error(&self) {
        self.scanner.print_error(self.tok_pos);
    }

    /// Skips one comment, if the cursor is at the start of one. A '#' only
    /// starts a comment in the first column (preprocessor output lines).
    pub fn skip_comment(&mut self) -> bool {
        let s = &mut self.scanner;
        let first_column = s.column() == 1;
        match (s.ch(), s.peek_char()) {
            ('/', '/') => {
                s.skip_line();
                true
            }
            ('#', _) if first_column => {
                s.skip_line();
                true
            }
            ('/', '*') => {
                s.read_char();
                s.read_char();
                let mut prev = '\0';
                while !s.at_end() {
                    if prev == '*' && s.ch() == '/' {
                        s.read_char();
                        return true;
                    }
                    prev = s.ch();
                    s.read_char();
                }
                true
            }
            _ => false,
        }
    }

    fn skip_trivia(&mut self) {
        while self.skip_comment() || self.scanner.skip_whitespace() {}
    }

    pub fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while is_id_char(self.scanner.ch()) {
            result.push(self.scanner.ch());
            self.scanner.read_char();
        }
        result
    }

    pub fn read_number(&mut self) -> String {
        let mut result = String::new();
        let mut period = false;
        loop {
            let ch = self.scanner.ch();
            if ch == '.' {
                // Only allow one period in each number.
                if period {
                    break;
                }
                period = true;
            } else if !ch.is_ascii_digit() {
                break;
            }
            result.push(ch);
            self.scanner.read_char();
        }
        result
    }

    /// Reads a quoted string. The surrounding quotes are removed, escape
    /// sequences are kept as they are, and escaped newlines are dropped.
    pub fn read_string(&mut self) -> Result<String, String> {
        let mut result = String::new();
        // Consume the opening quote.
        self.scanner.read_char();
        loop {
            let ch = self.scanner.ch();
            if self.scanner.at_end() {
                return Err("Unterminated string".to_string());
            }
            if ch == '"' {
                self.scanner.read_char();
                return Ok(result);
            }
            if ch == '\\' {
                self.scanner.read_char();
                match self.scanner.ch() {
                    '\n' => {
                        self.scanner.read_char();
                    }
                    '\r' if self.scanner.peek_char() == '\n' => {
                        self.scanner.read_char();
                        self.scanner.read_char();
                    }
                    '\0' if self.scanner.at_end() => {
                        return Err("Unterminated string".to_string());
                    }
                    other => {
                        result.push('\\');
                        result.push(other);
                        self.scanner.read_char();
                    }
                }
                continue;
            }
            result.push(ch);
            self.scanner.read_char();
        }
    }

    /// Reads a quoted string, and any strings that are appended to it with
    /// the '+' operator.
    fn read_concatenated_string(&mut self) -> Token {
        let mut result = match self.read_string() {
            Ok(s) => s,
            Err(msg) => return Token::Error(msg),
        };
        loop {
            let mark = self.scanner.mark();
            self.skip_trivia();
            if self.scanner.ch() != '+' {
                self.scanner.reset(mark);
                break;
            }
            self.scanner.read_char();
            self.skip_trivia();
            if self.scanner.ch() != '"' {
                self.scanner.reset(mark);
                break;
            }
            match self.read_string() {
                Ok(s) => result.push_str(&s),
                Err(msg) => return Token::Error(msg),
            }
        }
        Token::Identifier(result)
    }

    /// Reads an html string, which is delimited by balanced '<' '>'. The
    /// outermost brackets are not part of the result.
    fn read_html(&mut self) -> Token {
        let mut result = String::new();
        let mut bracket_balance = 1;
        // Consume the '<'.
        self.scanner.read_char();
        loop {
            let ch = self.scanner.ch();
            if self.scanner.at_end() {
                // Reached EOF without completing the string
                return Token::Error("Unterminated html string".to_string());
            }
            if ch == '<' {
                bracket_balance += 1;
            } else if ch == '>' {
                bracket_balance -= 1;
                if bracket_balance == 0 {
                    self.scanner.read_char();
                    return Token::HtmlString(result);
                }
            }
            result.push(ch);
            self.scanner.read_char();
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        self.tok_line = self.scanner.line();
        self.tok_column = self.scanner.column();
        self.tok_pos = self.scanner.pos();

        let tok = match self.scanner.ch() {
            '=' => Token::Equal,
            ';' => Token::Semicolon,
            ':' => Token::Colon,
            '[' => Token::OpenBracket,
            ']' => Token::CloseBracket,
            '{' => Token::OpenBrace,
            '}' => Token::CloseBrace,
            ',' => Token::Comma,
            '"' => {
                return self.read_concatenated_string();
            }
            '<' => {
                return self.read_html();
            }
            '-' => {
                self.scanner.read_char();
                match self.scanner.ch() {
                    '>' => Token::ArrowRight,
                    '-' => Token::ArrowLine,
                    ch if ch.is_ascii_digit() || ch == '.' => {
                        let mut num = String::from("-");
                        num.push_str(&self.read_number());
                        return Token::Identifier(num);
                    }
                    _ => {
                        return Token::Error("Expected '->' or '--'".to_string());
                    }
                }
            }
            '\0' if self.scanner.at_end() => {
                return Token::EOF;
            }
            ch => {
                if is_id_start(ch) {
                    let name = self.read_identifier();
                    if let Some(kw) = keyword(&name) {
                        return kw;
                    }
                    return Token::Identifier(name);
                }
                if ch.is_ascii_digit() || ch == '.' {
                    let num = self.read_number();
                    return Token::Identifier(num);
                }
                Token::Error(format!("Unexpected character '{}'", ch))
            }
        };
        self.scanner.read_char();
        tok
    }
}
