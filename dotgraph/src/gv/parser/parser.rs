use super::ast;
use super::lexer::Lexer;
use super::lexer::Token;
use crate::core::error::{ErrorKind, ParseError};
use crate::core::options::ParseOptions;

#[derive(Debug, Clone)]
pub struct DotParser {
    lexer: Lexer,
    tok: Token,
    options: ParseOptions,
    // Errors that the parser recovered from.
    diagnostics: Vec<ParseError>,
}

impl DotParser {
    pub fn new(input: &str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &str, options: ParseOptions) -> Self {
        let chars: Vec<char> = input.chars().collect();
        Self {
            lexer: Lexer::new(chars),
            tok: Token::Colon,
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Prints the location of the current token.
    pub fn print_error(&self) {
        self.lexer.print_error();
    }

    /// Renders the source line of the error \p err, with a marker.
    pub fn location_report(&self, err: &ParseError) -> String {
        self.lexer.scanner().location_report(err.pos)
    }

    /// Returns the errors that the parser recovered from.
    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn lex(&mut self) {
        self.tok = self.lexer.next_token();
    }

    /// Returns the location of the current token.
    fn location(&self) -> ast::Location {
        let (line, column) = self.lexer.location();
        ast::Location {
            line,
            column,
            pos: self.lexer.pos(),
        }
    }

    /// Creates an error at the location of the current token.
    fn error(&self, kind: ErrorKind, msg: &str) -> ParseError {
        let loc = self.location();
        ParseError::new(kind, msg, loc.line, loc.column, loc.pos)
    }

    /// Creates an error that reports the current token, when we expected
    /// something else.
    fn unexpected(&self, expected: &str) -> ParseError {
        match &self.tok {
            Token::Error(msg) => self.error(ErrorKind::Lexical, msg),
            Token::EOF => self.error(
                ErrorKind::UnexpectedEof,
                &format!("Expected {}, found end of file", expected),
            ),
            tok => self.error(
                ErrorKind::Syntax,
                &format!("Expected {}, found {}", expected, tok.describe()),
            ),
        }
    }

    fn expect(&mut self, tok: Token, expected: &str) -> Result<(), ParseError> {
        if self.tok == tok {
            self.lex();
            Result::Ok(())
        } else {
            Result::Err(self.unexpected(expected))
        }
    }

    // graph : [ strict ] (graph | digraph) [ ID ] '{' stmt_list '}'
    pub fn parse_graph(&mut self) -> Result<ast::Graph, ParseError> {
        let mut graph = ast::Graph::new("");

        // Consume the 'strict' keyword.
        if let Token::StrictKW = self.tok {
            graph.strict = true;
            self.lex();
        }

        match self.tok {
            Token::GraphKW => {
                graph.directed = false;
                self.lex();
            }
            Token::DigraphKW => {
                graph.directed = true;
                self.lex();
            }
            _ => {
                return Result::Err(self.unexpected("(graph|digraph)"));
            }
        }

        // Consume the optional graph name.
        if let Token::Identifier(name) = self.tok.clone() {
            graph.name = name;
            self.lex();
        }

        self.expect(Token::OpenBrace, "'{'")?;
        graph.list = self.parse_stmt_list()?;
        Result::Ok(graph)
    }

    // subgraph : [ subgraph [ ID ] ] '{' stmt_list '}'
    pub fn parse_subgraph(&mut self) -> Result<ast::Graph, ParseError> {
        let mut graph = ast::Graph::new("");

        if let Token::SubgraphKW = self.tok {
            self.lex();
            // Consume the optional graph name.
            if let Token::Identifier(name) = self.tok.clone() {
                graph.name = name;
                self.lex();
            }
        }

        self.expect(Token::OpenBrace, "'{'")?;
        graph.list = self.parse_stmt_list()?;
        Result::Ok(graph)
    }

    // stmt_list : [ stmt [ ';' ] stmt_list ]
    pub fn parse_stmt_list(&mut self) -> Result<ast::StmtList, ParseError> {
        let mut lst = ast::StmtList::new();

        loop {
            while let Token::Semicolon = self.tok {
                // Consume the semicolon.
                self.lex();
            }

            match self.tok {
                Token::CloseBrace => {
                    // Consume the '}' and exit.
                    self.lex();
                    return Result::Ok(lst);
                }
                Token::EOF => {
                    return Result::Err(self.unexpected("'}'"));
                }
                _ => {}
            }

            match self.parse_stmt() {
                Result::Ok(stmt) => lst.list.push(stmt),
                Result::Err(err) => {
                    if err.is_fatal() {
                        return Result::Err(err);
                    }
                    self.recover(err)?;
                }
            }
        }
    }

    /// Records the error \p err and skips the rest of the broken statement.
    fn recover(&mut self, err: ParseError) -> Result<(), ParseError> {
        #[cfg(feature = "log")]
        log::warn!("{}", err);
        self.diagnostics.push(err);

        if self.diagnostics.len() > self.options.max_errors {
            return Result::Err(self.error(
                ErrorKind::TooManyErrors,
                &format!("Giving up after {} errors", self.diagnostics.len()),
            ));
        }
        self.synchronize()
    }

    /// Skips tokens until the end of the current statement (the ';' is
    /// consumed) or until the '}' that closes the current scope (the '}' is
    /// not consumed).
    fn synchronize(&mut self) -> Result<(), ParseError> {
        let mut depth = 0;
        loop {
            match self.tok {
                Token::EOF => {
                    return Result::Err(self.unexpected("'}'"));
                }
                Token::Semicolon if depth == 0 => {
                    self.lex();
                    return Result::Ok(());
                }
                Token::OpenBrace => {
                    depth += 1;
                }
                Token::CloseBrace => {
                    if depth == 0 {
                        return Result::Ok(());
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.lex();
        }
    }

    // stmt : node_stmt | edge_stmt | attr_stmt | ID '=' ID | subgraph
    pub fn parse_stmt(&mut self) -> Result<ast::Stmt, ParseError> {
        match self.tok {
            Token::Identifier(_) => {
                let id0 = self.parse_node_id()?;
                match self.tok {
                    Token::ArrowLine | Token::ArrowRight => {
                        let from = ast::Endpoint::Node(id0);
                        let es = self.parse_edge_stmt(from)?;
                        Result::Ok(ast::Stmt::Edge(es))
                    }
                    Token::Equal => self.parse_assignment(id0),
                    Token::OpenBracket => {
                        let al = self.parse_attr_lists()?;
                        let ns = ast::NodeStmt::new(id0, al);
                        Result::Ok(ast::Stmt::Node(ns))
                    }
                    _ => {
                        // A bare node statement. Whatever follows belongs to
                        // the next statement.
                        let ns = ast::NodeStmt::new(id0, ast::AttributeList::new());
                        Result::Ok(ast::Stmt::Node(ns))
                    }
                }
            }
            Token::SubgraphKW | Token::OpenBrace => {
                let subgraph = self.parse_subgraph()?;
                if self.is_edge_token() {
                    let from = ast::Endpoint::SubGraph(subgraph);
                    let es = self.parse_edge_stmt(from)?;
                    return Result::Ok(ast::Stmt::Edge(es));
                }
                Result::Ok(ast::Stmt::SubGraph(subgraph))
            }
            //attr_stmt : (graph | node | edge) attr_list
            Token::GraphKW => {
                self.lex();
                let list = self.parse_attr_lists()?;
                let atts = ast::AttrStmt::new(ast::AttrStmtTarget::Graph, list);
                Result::Ok(ast::Stmt::Attribute(atts))
            }
            Token::NodeKW => {
                self.lex();
                let list = self.parse_attr_lists()?;
                let atts = ast::AttrStmt::new(ast::AttrStmtTarget::Node, list);
                Result::Ok(ast::Stmt::Attribute(atts))
            }
            Token::EdgeKW => {
                self.lex();
                let list = self.parse_attr_lists()?;
                let atts = ast::AttrStmt::new(ast::AttrStmtTarget::Edge, list);
                Result::Ok(ast::Stmt::Attribute(atts))
            }
            _ => Result::Err(self.unexpected("a statement")),
        }
    }

    // Parses one or more attribute lists that follow each other.
    pub fn parse_attr_lists(&mut self) -> Result<ast::AttributeList, ParseError> {
        let mut lst = self.parse_attr_list()?;
        while let Token::OpenBracket = self.tok {
            let next = self.parse_attr_list()?;
            lst.append(next);
        }
        Result::Ok(lst)
    }

    //attr_list : '[' [ a_list ] ']'
    pub fn parse_attr_list(&mut self) -> Result<ast::AttributeList, ParseError> {
        let mut lst = ast::AttributeList::new();

        self.expect(Token::OpenBracket, "'['")?;

        while !matches!(self.tok, Token::CloseBracket) {
            let prop: String;

            if let Token::Identifier(id) = self.tok.clone() {
                prop = id;
                // Consume the property name.
                self.lex();
            } else {
                return Result::Err(self.unexpected("property name"));
            }

            self.expect(Token::Equal, "'='")?;

            match self.tok.clone() {
                Token::Identifier(value) => {
                    lst.add(&prop, ast::DotString::String(value));
                }
                Token::HtmlString(value) => {
                    lst.add(&prop, ast::DotString::HtmlString(value));
                }
                _ => {
                    return Result::Err(
                        self.unexpected("value after assignment"),
                    );
                }
            }
            // Consume the value.
            self.lex();

            // Skip semicolon.
            if let Token::Semicolon = self.tok {
                self.lex()
            }
            // Skip commas.
            if let Token::Comma = self.tok {
                self.lex()
            }
        }
        // Consume the ']'.
        self.lex();
        Result::Ok(lst)
    }

    fn is_edge_token(&self) -> bool {
        matches!(self.tok, Token::ArrowLine | Token::ArrowRight)
    }

    // ID '=' ID
    pub fn parse_assignment(
        &mut self,
        id: ast::NodeId,
    ) -> Result<ast::Stmt, ParseError> {
        if id.port.is_some() {
            return Result::Err(
                self.error(ErrorKind::Syntax, "Can't assign into a port"),
            );
        }

        self.expect(Token::Equal, "'='")?;

        let value = match self.tok.clone() {
            Token::Identifier(val) => ast::DotString::String(val),
            Token::HtmlString(val) => ast::DotString::HtmlString(val),
            _ => {
                return Result::Err(self.unexpected("value after assignment"));
            }
        };
        self.lex();
        Result::Ok(ast::Stmt::Assignment(id.name, value))
    }

    //edge_stmt : (node_id | subgraph) edgeRHS [ attr_list ]
    pub fn parse_edge_stmt(
        &mut self,
        from: ast::Endpoint,
    ) -> Result<ast::EdgeStmt, ParseError> {
        let mut es = ast::EdgeStmt::new(from);

        while self.is_edge_token() {
            let ak = match self.tok {
                Token::ArrowLine => ast::ArrowKind::Line,
                _ => ast::ArrowKind::Arrow,
            };
            let loc = self.location();
            // Consume the arrow.
            self.lex();
            let to = self.parse_endpoint()?;
            es.push(ak, loc, to);
        }
        // Parse the optional attribute list.
        if let Token::OpenBracket = self.tok {
            es.list = self.parse_attr_lists()?;
        }

        Result::Ok(es)
    }

    // endpoint : node_id | subgraph
    pub fn parse_endpoint(&mut self) -> Result<ast::Endpoint, ParseError> {
        match self.tok {
            Token::Identifier(_) => {
                Result::Ok(ast::Endpoint::Node(self.parse_node_id()?))
            }
            Token::SubgraphKW | Token::OpenBrace => {
                Result::Ok(ast::Endpoint::SubGraph(self.parse_subgraph()?))
            }
            _ => Result::Err(self.unexpected("node name or subgraph")),
        }
    }

    //node_id : ID [ ':' ID [ ':' ID ] ]
    pub fn parse_node_id(&mut self) -> Result<ast::NodeId, ParseError> {
        let node_name: String;
        if let Token::Identifier(name) = self.tok.clone() {
            node_name = name;
            // Consume the value name.
            self.lex();
        } else {
            return Result::Err(self.unexpected("node name"));
        }

        if let Token::Colon = self.tok {
            // Consume the colon.
            self.lex();
            let mut port = if let Token::Identifier(port) = self.tok.clone() {
                // Consume the port name.
                self.lex();
                port
            } else {
                return Result::Err(self.unexpected("port name"));
            };

            // Handle the optional compass point.
            if let Token::Colon = self.tok {
                self.lex();
                if let Token::Identifier(compass) = self.tok.clone() {
                    self.lex();
                    port.push(':');
                    port.push_str(&compass);
                } else {
                    return Result::Err(self.unexpected("compass point"));
                }
            }
            return Result::Ok(ast::NodeId::new(&node_name, Some(port)));
        }
        Result::Ok(ast::NodeId::new(&node_name, None))
    }

    /// Parses dot files, as specified here:
    /// <https://graphviz.org/doc/info/lang.html>
    /// A file may contain more than one graph.
    pub fn process(&mut self) -> Result<Vec<ast::Graph>, ParseError> {
        self.lex();
        let mut graphs = Vec::new();
        loop {
            if let Token::EOF = self.tok {
                break;
            }
            let graph = self.parse_graph()?;
            graphs.push(graph);
        }
        if graphs.is_empty() {
            return Result::Err(self.unexpected("(graph|digraph)"));
        }
        Result::Ok(graphs)
    }
}
