// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for SOL25.
//!
//! The AST represents the structure of a SOL25 program after parsing.
//! Every node carries a [`Span`] for error reporting. Parents own their
//! children outright; nothing in the tree refers back up.
//!
//! # Message Sending
//!
//! An expression is a primary followed by at most one message:
//!
//! - **Unary**: `object message`
//! - **Keyword**: `array at: 1 put: x` (one primary argument per part)
//!
//! # Example
//!
//! ```ignore
//! // Source: x := Foo new: 1.
//! Statement {
//!     target: Identifier { name: "x", .. },
//!     value: Expression {
//!         receiver: Primary::Literal(Literal::ClassReference("Foo".into()), ..),
//!         message: Some(Message::Keyword(vec![
//!             KeywordArgument { keyword: KeywordPart { name: "new", .. },
//!                               argument: Primary::Literal(Literal::Integer("1".into()), ..) },
//!         ])),
//!         ..
//!     },
//!     ..
//! }
//! ```

use ecow::EcoString;

use crate::source_analysis::Span;

/// Name of the class that holds the program entry point.
pub const ENTRY_CLASS: &str = "Main";

/// Selector of the entry-point method.
pub const ENTRY_SELECTOR: &str = "run";

/// A whole SOL25 program: one or more class declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Classes in declaration order.
    pub classes: Vec<ClassDeclaration>,
    /// Source location spanning the whole program.
    pub span: Span,
}

impl Program {
    /// Creates a new program.
    #[must_use]
    pub fn new(classes: Vec<ClassDeclaration>, span: Span) -> Self {
        Self { classes, span }
    }

    /// Returns `true` if some class named `Main` defines the unary `run` method.
    #[must_use]
    pub fn has_entry_point(&self) -> bool {
        self.classes
            .iter()
            .filter(|class| class.name.name == ENTRY_CLASS)
            .flat_map(|class| &class.methods)
            .any(|method| method.selector.is_unary(ENTRY_SELECTOR))
    }
}

/// A class declaration: `class Name : Parent { methods }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    /// The class name.
    pub name: Identifier,
    /// The superclass name.
    pub superclass: Identifier,
    /// Methods in declaration order.
    pub methods: Vec<Method>,
    /// Source location from `class` to the closing brace.
    pub span: Span,
}

/// A method: a selector paired with its body block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// The selector the method answers to.
    pub selector: MethodSelector,
    /// The method body.
    pub body: Block,
    /// Source location of the whole method.
    pub span: Span,
}

/// A method selector as written in a method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodSelector {
    /// A unary selector: `run`
    Unary(Identifier),
    /// A keyword selector: `at:put:`
    Keyword(Vec<KeywordPart>),
}

impl MethodSelector {
    /// Returns the full selector name (`run`, `at:put:`).
    #[must_use]
    pub fn name(&self) -> EcoString {
        match self {
            Self::Unary(id) => id.name.clone(),
            Self::Keyword(parts) => keyword_selector(parts),
        }
    }

    /// Returns the number of arguments the selector takes.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Unary(_) => 0,
            Self::Keyword(parts) => parts.len(),
        }
    }

    /// Returns `true` if this is the unary selector `name`.
    #[must_use]
    pub fn is_unary(&self, name: &str) -> bool {
        matches!(self, Self::Unary(id) if id.name == name)
    }

    /// Returns the source location of the selector.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Unary(id) => id.span,
            Self::Keyword(parts) => spanning(parts.iter().map(|part| part.span)),
        }
    }
}

/// One keyword part of a selector (`at` in `at:put:`), without its colon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeywordPart {
    /// The part name.
    pub name: EcoString,
    /// Source location including the colon.
    pub span: Span,
}

impl KeywordPart {
    /// Creates a new keyword part.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A block: `[:a :b | statements ]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Parameter names in declaration order.
    pub parameters: Vec<Identifier>,
    /// Statements in source order.
    pub body: Vec<Statement>,
    /// Source location including brackets.
    pub span: Span,
}

impl Block {
    /// Returns the number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Returns `true` if `name` is one of this block's own parameters.
    #[must_use]
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.iter().any(|param| param.name == name)
    }
}

/// An assignment statement: `target := value.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// The variable being assigned to.
    pub target: Identifier,
    /// The value being assigned.
    pub value: Expression,
    /// Source location including the terminating period.
    pub span: Span,
}

/// An expression: a receiver primary and an optional message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    /// The primary the message (if any) is sent to.
    pub receiver: Primary,
    /// The message sent to the receiver.
    pub message: Option<Message>,
    /// Source location of the whole expression.
    pub span: Span,
}

/// The message part of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A unary message: `receiver name`
    Unary(Identifier),
    /// A keyword message: `receiver at: a put: b`
    Keyword(Vec<KeywordArgument>),
}

impl Message {
    /// Returns the full selector name (`size`, `new:with:`).
    #[must_use]
    pub fn selector(&self) -> EcoString {
        match self {
            Self::Unary(id) => id.name.clone(),
            Self::Keyword(args) => keyword_selector(args.iter().map(|arg| &arg.keyword)),
        }
    }

    /// Returns the message arguments in source order.
    #[must_use]
    pub fn arguments(&self) -> Vec<&Primary> {
        match self {
            Self::Unary(_) => Vec::new(),
            Self::Keyword(args) => args.iter().map(|arg| &arg.argument).collect(),
        }
    }
}

/// A keyword part together with its argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordArgument {
    /// The keyword part.
    pub keyword: KeywordPart,
    /// The argument.
    pub argument: Primary,
}

/// A primary: the operand of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// A literal value.
    Literal(Literal, Span),
    /// A variable reference (including `self`, `super`, `nil`, `true`, `false`).
    Variable(Identifier),
    /// A parenthesised expression.
    Parenthesized(Box<Expression>, Span),
}

impl Primary {
    /// Returns the span of this primary.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(_, span) | Self::Parenthesized(_, span) => *span,
            Self::Variable(id) => id.span,
        }
    }
}

/// A literal value. Text is kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// An integer: `42`, `-7`
    Integer(EcoString),
    /// A string, including its quotes: `'hello'`
    String(EcoString),
    /// A bare class reference: `Object`, `Foo`
    ClassReference(EcoString),
    /// A block literal.
    Block(Block),
}

/// A name (variable, parameter, class or selector) with its location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// The name.
    pub name: EcoString,
    /// Source location.
    pub span: Span,
}

impl Identifier {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Joins keyword parts into a selector, each part followed by `:`.
fn keyword_selector<'a>(parts: impl IntoIterator<Item = &'a KeywordPart>) -> EcoString {
    let mut selector = EcoString::new();
    for part in parts {
        selector.push_str(&part.name);
        selector.push(':');
    }
    selector
}

fn spanning(spans: impl Iterator<Item = Span>) -> Span {
    spans.reduce(Span::merge).unwrap_or_default()
}
