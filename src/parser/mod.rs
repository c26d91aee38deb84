//! Recursive-descent parser turning markup into [`ParseNode`]s.
//!
//! Commands are resolved through the function table of a
//! [`MathContext`]; the parser itself only knows about groups, optional
//! arguments, plain characters and user macros.

use alloc::sync::Arc;

use crate::MathContext;
use crate::define_function::{FunctionContext, FunctionSpec};
use crate::lexer::Lexer;
use crate::types::{
    ErrorLocationProvider as _, Mode, ParseError, ParseErrorKind, Settings, SourceLocation, Token,
};

pub mod parse_node;
use parse_node::{ParseNode, ParseNodeMathOrd, ParseNodeOrdGroup, ParseNodeTextOrd};

/// Characters with a TeX meaning this parser does not implement.
const UNSUPPORTED_CHARS: &[&str] = &["^", "_", "&", "#", "$"];

/// The core parser, responsible for converting markup into an abstract
/// syntax tree (AST) of parse nodes.
///
/// # Parsing Strategy
///
/// - A single lookahead token is cached by [`Parser::fetch`] and dropped by
///   [`Parser::consume`].
/// - Tokens from user macro expansions are queued in front of the lexer.
/// - Mode switching between math and text changes how characters and spaces
///   are read and which commands are allowed.
pub struct Parser<'a> {
    /// Current parsing mode ([`Mode::Math`] or [`Mode::Text`])
    pub mode: Mode,
    /// Global parsing configuration
    pub settings: &'a Settings,
    /// Shared registry of functions and builders
    pub ctx: &'a MathContext,
    /// Cached lookahead token
    pub next_token: Option<Token>,
    lexer: Lexer<'a>,
    /// Expanded tokens waiting to be read, last element first
    pending: Vec<Token>,
    expansion_count: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `input`, starting in math mode.
    #[must_use]
    pub fn new(input: &str, settings: &'a Settings, ctx: &'a MathContext) -> Self {
        Self {
            mode: Mode::Math,
            settings,
            ctx,
            next_token: None,
            lexer: Lexer::new(Arc::from(input), settings),
            pending: Vec::new(),
            expansion_count: 0,
        }
    }

    /// Checks that the lookahead token is `text`, and fails otherwise.
    pub fn expect(&mut self, text: &str, consume: bool) -> Result<(), ParseError> {
        let token = self.fetch()?;
        if token.text != text {
            return Err(ParseError::with_token(
                ParseErrorKind::ExpectedToken {
                    expected: text.to_owned(),
                    found: token.text.clone(),
                },
                token,
            ));
        }
        if consume {
            self.consume();
        }
        Ok(())
    }

    /// Consumes the current lookahead token.
    pub fn consume(&mut self) {
        self.next_token = None;
    }

    /// Retrieves the current lookahead token, fetching and expanding a new one
    /// if necessary. Repeated calls without [`Parser::consume`] return the
    /// same token.
    pub fn fetch(&mut self) -> Result<&Token, ParseError> {
        match &mut self.next_token {
            Some(next_token) => Ok(next_token),
            next_token => {
                let token = Self::expand_next_token(
                    &mut self.lexer,
                    &mut self.pending,
                    &mut self.expansion_count,
                    self.settings,
                )?;
                Ok(next_token.get_or_insert(token))
            }
        }
    }

    /// Pull the next token, replacing user macros by their expansion.
    fn expand_next_token(
        lexer: &mut Lexer<'a>,
        pending: &mut Vec<Token>,
        expansion_count: &mut usize,
        settings: &Settings,
    ) -> Result<Token, ParseError> {
        loop {
            let token = match pending.pop() {
                Some(token) => token,
                None => lexer.lex()?,
            };
            let Some(replacement) = settings.macros.get(&token.text) else {
                return Ok(token);
            };

            *expansion_count += 1;
            if *expansion_count > settings.max_expand {
                return Err(ParseError::with_token(
                    ParseErrorKind::TooManyExpansions,
                    &token,
                ));
            }
            tracing::trace!(name = %token.text, "expanding macro");

            let mut tokens =
                Lexer::new(Arc::from(replacement.as_str()), settings).tokenize_detached()?;
            tokens.reverse();
            pending.extend(tokens);
        }
    }

    /// Changes the parser's current parsing mode.
    pub const fn switch_mode(&mut self, new_mode: Mode) {
        self.mode = new_mode;
    }

    /// Consumes consecutive space tokens.
    pub fn consume_spaces(&mut self) -> Result<(), ParseError> {
        while self.fetch()?.text == " " {
            self.consume();
        }
        Ok(())
    }

    /// Parses the entire input into a list of nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use texmath::parser::Parser;
    /// use texmath::{MathContext, Settings};
    ///
    /// let settings = Settings::default();
    /// let ctx = MathContext::with_builtins().unwrap();
    /// let mut parser = Parser::new(r"\xrightarrow[b]{a}", &settings, &ctx);
    /// let ast = parser.parse().unwrap();
    /// assert_eq!(ast.len(), 1);
    /// ```
    pub fn parse(&mut self) -> Result<Vec<ParseNode>, ParseError> {
        let parse = self.parse_expression(None)?;
        self.expect(Token::EOF, true)?;
        Ok(parse)
    }

    /// Parses atoms until end of input, a closing brace, or `break_on`.
    pub fn parse_expression(
        &mut self,
        break_on: Option<&str>,
    ) -> Result<Vec<ParseNode>, ParseError> {
        let mut body = Vec::new();
        loop {
            if self.mode == Mode::Math {
                self.consume_spaces()?;
            }
            let token = self.fetch()?;
            if token.is_eof() || token.text == "}" || break_on.is_some_and(|b| token.text == b) {
                break;
            }
            body.push(self.parse_atom()?);
        }
        Ok(body)
    }

    /// Parses a braced group, a function call, or a single symbol.
    fn parse_atom(&mut self) -> Result<ParseNode, ParseError> {
        let token = self.fetch()?.clone();
        if token.text == "{" {
            return self.parse_braced_group(&token);
        }
        if token.is_control_sequence() {
            return self.parse_function(&token);
        }
        self.parse_symbol(&token)
    }

    fn parse_braced_group(&mut self, open: &Token) -> Result<ParseNode, ParseError> {
        self.consume();
        let body = self.parse_expression(None)?;
        let close = self.fetch()?.clone();
        self.expect("}", true)?;
        Ok(ParseNode::OrdGroup(ParseNodeOrdGroup {
            mode: self.mode,
            loc: SourceLocation::range(open.loc(), close.loc()),
            body,
        }))
    }

    fn parse_symbol(&mut self, token: &Token) -> Result<ParseNode, ParseError> {
        let text = token.text.as_str();
        if text == "}" || UNSUPPORTED_CHARS.contains(&text) {
            return Err(ParseError::with_token(
                ParseErrorKind::UnexpectedToken {
                    found: text.to_owned(),
                },
                token,
            ));
        }
        self.consume();

        let loc = token.loc.clone();
        let is_letter = text.chars().next().is_some_and(char::is_alphabetic);
        Ok(if self.mode == Mode::Math && is_letter {
            ParseNode::MathOrd(ParseNodeMathOrd {
                mode: self.mode,
                loc,
                text: text.to_owned(),
            })
        } else {
            ParseNode::TextOrd(ParseNodeTextOrd {
                mode: self.mode,
                loc,
                text: text.to_owned(),
            })
        })
    }

    /// Parses a registered function and its arguments.
    pub fn parse_function(&mut self, token: &Token) -> Result<ParseNode, ParseError> {
        let ctx = self.ctx;
        let func = token.text.as_str();
        let Some(func_data) = ctx.functions.get(func) else {
            return Err(ParseError::with_token(
                ParseErrorKind::UndefinedControlSequence {
                    name: func.to_owned(),
                },
                token,
            ));
        };
        self.consume();

        if (self.mode == Mode::Text && !func_data.allowed_in_text)
            || (self.mode == Mode::Math && !func_data.allowed_in_math)
        {
            return Err(ParseError::with_token(
                ParseErrorKind::FunctionDisallowedInMode {
                    func: func.to_owned(),
                    mode: self.mode,
                },
                token,
            ));
        }

        let (args, opt_args) = self.parse_arguments(func, func_data)?;
        self.call_function(func, args, opt_args, Some(token))
    }

    /// Call a function handler with a suitable context and arguments.
    pub fn call_function(
        &mut self,
        name: &str,
        args: Vec<ParseNode>,
        opt_args: Vec<Option<ParseNode>>,
        token: Option<&Token>,
    ) -> Result<ParseNode, ParseError> {
        let handler = self.ctx.functions.get(name).and_then(|func| func.handler);
        let Some(handler) = handler else {
            return Err(ParseError::new(ParseErrorKind::NoFunctionHandler {
                name: name.to_owned(),
            }));
        };
        let context = FunctionContext {
            func_name: name.to_owned(),
            parser: self,
            token,
        };
        handler(context, args, opt_args)
    }

    /// Parses the optional arguments, then the required arguments, of a
    /// function.
    pub fn parse_arguments(
        &mut self,
        func: &str,
        func_data: &FunctionSpec,
    ) -> Result<(Vec<ParseNode>, Vec<Option<ParseNode>>), ParseError> {
        let mut args = Vec::with_capacity(func_data.num_args);
        let mut opt_args = Vec::with_capacity(func_data.num_optional_args);

        for i in 0..func_data.num_optional_args + func_data.num_args {
            let outer_mode = self.mode;
            self.switch_mode(func_data.arg_type(i).mode(outer_mode));
            let result = if i < func_data.num_optional_args {
                self.parse_optional_group().map(|arg| opt_args.push(arg))
            } else {
                self.parse_argument_group(func).map(|arg| args.push(arg))
            };
            self.switch_mode(outer_mode);
            result?;
        }

        Ok((args, opt_args))
    }

    /// A bracketed argument, or `None` if the next token is not `[`.
    fn parse_optional_group(&mut self) -> Result<Option<ParseNode>, ParseError> {
        self.consume_spaces()?;
        let open = self.fetch()?.clone();
        if open.text != "[" {
            return Ok(None);
        }
        self.consume();
        let body = self.parse_expression(Some("]"))?;
        let close = self.fetch()?.clone();
        self.expect("]", true)?;
        Ok(Some(ParseNode::OrdGroup(ParseNodeOrdGroup {
            mode: self.mode,
            loc: SourceLocation::range(open.loc(), close.loc()),
            body,
        })))
    }

    /// A required argument: a braced group, or a single token wrapped in an
    /// ordgroup.
    fn parse_argument_group(&mut self, func: &str) -> Result<ParseNode, ParseError> {
        self.consume_spaces()?;
        let token = self.fetch()?.clone();
        if token.is_eof() || token.text == "}" || token.text == "]" {
            return Err(ParseError::with_token(
                ParseErrorKind::MissingArgument {
                    func: func.to_owned(),
                },
                &token,
            ));
        }
        if token.text == "{" {
            return self.parse_braced_group(&token);
        }
        let atom = self.parse_atom()?;
        Ok(ParseNode::OrdGroup(ParseNodeOrdGroup {
            mode: self.mode,
            loc: token.loc,
            body: vec![atom],
        }))
    }
}
