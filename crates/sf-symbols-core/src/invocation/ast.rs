use std::ops::Range;

use log::debug;
use proc_macro2::{Delimiter, Group, LexError, TokenStream, TokenTree};
use syn::ext::IdentExt;
use syn::parse::{self, Parse, ParseStream};
use syn::{Attribute, Ident, LitStr, Token, parenthesized, token};

use super::scan::{Layout, Occurrence};
use crate::MACRO_NAME;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Span};
use crate::request::{AccessArgument, GenerateRequest, SymbolEntry};

const ACCESS_LABEL: &str = "accessLevel";

/// Parses one invocation found by the scanner into a [`GenerateRequest`].
///
/// The invocation text is tokenized with `proc_macro2`, after padding it with
/// the newlines and spaces that precede it in the file, so every token span is
/// also a file position.
///
/// # Errors
///
/// Returns a diagnostic if the invocation cannot be read: a string literal
/// that is not plain text, an argument of the wrong shape, or a syntax error.
/// Text the tokenizer rejects is blamed on the argument that holds it.
pub fn parse(occurrence: &Occurrence<'_>) -> Result<GenerateRequest, Diagnostic> {
    let site = occurrence.span();
    let padded = format!(
        "{}{}{}",
        "\n".repeat(occurrence.line.saturating_sub(1)),
        " ".repeat(occurrence.column),
        occurrence.text
    );

    let tokens: TokenStream = padded
        .parse()
        .map_err(|err: LexError| unreadable(occurrence, located(err.span(), site)))?;
    let invocation: Invocation = syn::parse2(tokens).map_err(|err| {
        Diagnostic::malformed(err.to_string(), Some(located(err.span(), site)))
    })?;

    invocation.lower(site)
}

/// Spans at the end of input resolve to the start of the padded text; fall
/// back to the invocation.
fn located(span: proc_macro2::Span, site: Span) -> Span {
    let span = Span::from(span);
    if (span.line, span.column) < (site.line, site.column) {
        site
    } else {
        span
    }
}

/// Diagnoses text the tokenizer rejected at `at`, such as an interpolated
/// string or a backtick-escaped identifier.
fn unreadable(occurrence: &Occurrence<'_>, at: Span) -> Diagnostic {
    let layout = occurrence.layout();
    let access = access_range(occurrence.text, &layout).filter(|range| {
        occurrence
            .offset(at.line, at.column)
            .is_some_and(|offset| range.contains(&offset))
    });

    match access {
        Some(range) => {
            let (_, value) = split_label(&occurrence.text[range.clone()]);
            Diagnostic::new(
                DiagnosticKind::UnparseableAccessLevel {
                    found: value.to_string(),
                },
                Some(occurrence.span_of(range)),
            )
        }
        None => Diagnostic::new(DiagnosticKind::UnparseableNames, Some(at)),
    }
}

/// The argument holding the access level, chosen by the same shapes as
/// [`Invocation::lower`].
fn access_range(text: &str, layout: &Layout) -> Option<Range<usize>> {
    match (layout.arguments.as_slice(), layout.trailing.is_some()) {
        ([only], true) => Some(only.clone()),
        ([only], false) if split_label(&text[only.clone()]).0 == Some(ACCESS_LABEL) => {
            Some(only.clone())
        }
        ([access, _], false) => Some(access.clone()),
        _ => None,
    }
}

/// Splits the text of an argument into its label, if any, and its value.
fn split_label(argument: &str) -> (Option<&str>, &str) {
    let argument = argument.trim();
    argument
        .split_once(':')
        .filter(|(label, value)| {
            let label = label.trim();
            !label.is_empty()
                && label.chars().all(|ch| ch.is_alphanumeric() || ch == '_')
                && !value.starts_with(':')
        })
        .map_or((None, argument), |(label, value)| {
            (Some(label.trim()), value.trim())
        })
}

/// Abstract syntax tree for the surface syntax of an `#SFSymbol` invocation.
///
/// The surface syntax takes the form:
///
/// ```text,no_run
/// "#" "SFSymbol" ("(" Argument ("," Argument)* ","? ")")? Block?
/// ```
///
/// where an `Argument` is `(Ident ":")? Tokens`. Which argument holds the
/// access level and which the names is decided by `lower`, from the number of
/// arguments and whether a trailing block is present.
pub struct Invocation {
    arguments: Vec<Argument>,
    trailing: Option<Block>,
}

impl Parse for Invocation {
    fn parse(input: ParseStream) -> parse::Result<Self> {
        input.parse::<Token![#]>()?;
        let name = Ident::parse_any(input)?;
        if name != MACRO_NAME {
            return Err(syn::Error::new(
                name.span(),
                format!("expected `{MACRO_NAME}`"),
            ));
        }

        let arguments = if input.peek(token::Paren) {
            let content;
            parenthesized!(content in input);
            parse_arguments(&content)?
        } else {
            Vec::new()
        };

        let trailing = if input.peek(token::Brace) {
            match input.parse::<TokenTree>()? {
                TokenTree::Group(group) => Some(Block::new(&group)),
                other => return Err(syn::Error::new(other.span(), "expected a block")),
            }
        } else {
            None
        };

        if !input.is_empty() {
            return Err(input.error("unexpected tokens after the invocation"));
        }

        Ok(Self {
            arguments,
            trailing,
        })
    }
}

fn parse_arguments(input: ParseStream) -> parse::Result<Vec<Argument>> {
    let mut arguments = Vec::new();
    while !input.is_empty() {
        arguments.push(input.parse()?);
        if input.is_empty() {
            break;
        }
        input.parse::<Token![,]>()?;
    }
    Ok(arguments)
}

enum Names {
    Argument(Argument),
    Block(Block),
}

impl Invocation {
    /// Lowers the invocation to a request, dispatching on its shape:
    ///
    /// - no arguments: names come from the trailing block, if any
    /// - one argument and a trailing block: the argument is the access level
    /// - one argument: the argument is the names, unless it is labeled
    ///   `accessLevel`
    /// - two arguments: the access level, then the names
    fn lower(self, site: Span) -> Result<GenerateRequest, Diagnostic> {
        let mut arguments = self.arguments;
        let (access, names) = match (arguments.len(), self.trailing) {
            (0, trailing) => (None, trailing.map(Names::Block)),
            (1, Some(block)) => (arguments.pop(), Some(Names::Block(block))),
            (1, None) if arguments[0].is_labeled(ACCESS_LABEL) => (arguments.pop(), None),
            (1, None) => (None, arguments.pop().map(Names::Argument)),
            (2, None) => {
                let names = arguments.pop().map(Names::Argument);
                (arguments.pop(), names)
            }
            (2, Some(block)) => {
                return Err(Diagnostic::malformed(
                    "a trailing block cannot follow both an access level and names",
                    Some(block.span),
                ));
            }
            (count, _) => {
                return Err(Diagnostic::malformed(
                    format!("expected at most two arguments, found {count}"),
                    Some(site),
                ));
            }
        };

        let access_level = access.map(Argument::into_access).transpose()?;

        let (names, names_span) = match names {
            None => (Vec::new(), None),
            Some(Names::Block(block)) => {
                let span = block.span;
                (block.into_names()?, Some(span))
            }
            Some(Names::Argument(argument)) => {
                let span = argument.span;
                (argument.into_names()?, Some(span))
            }
        };
        debug!("Parsed #{MACRO_NAME} at {site} with {} names", names.len());

        Ok(GenerateRequest {
            names,
            access_level,
            names_span,
            site: Some(site),
        })
    }
}

/// One argument of the invocation, which takes the form:
///
/// ```text,no_run
/// (Ident ":")? TokenTree+
/// ```
struct Argument {
    label: Option<Ident>,
    value: Value,
    text: String,
    span: Span,
}

impl Parse for Argument {
    fn parse(input: ParseStream) -> parse::Result<Self> {
        // Doc comments arrive as `#[doc = ".."]` attributes.
        if input.peek(Token![#]) && input.peek2(token::Bracket) {
            input.call(Attribute::parse_outer)?;
        }

        let label = if input.peek(Ident::peek_any)
            && input.peek2(Token![:])
            && !input.peek2(Token![::])
        {
            let label = Ident::parse_any(input)?;
            input.parse::<Token![:]>()?;
            Some(label)
        } else {
            None
        };

        let mut tokens = Vec::new();
        while !input.is_empty() && !input.peek(Token![,]) {
            tokens.push(input.parse::<TokenTree>()?);
        }

        let Some(span) = tokens_span(&tokens) else {
            return Err(input.error("expected an argument"));
        };
        let text = tokens.iter().cloned().collect::<TokenStream>().to_string();

        Ok(Self {
            label,
            value: Value::classify(&tokens),
            text,
            span,
        })
    }
}

impl Argument {
    fn is_labeled(&self, expected: &str) -> bool {
        self.label.as_ref().is_some_and(|label| label == expected)
    }

    fn into_access(self) -> Result<AccessArgument, Diagnostic> {
        match self.value {
            Value::Member(tag) => Ok(AccessArgument {
                tag: tag.to_string(),
                span: Some(self.span),
            }),
            _ => Err(Diagnostic::new(
                DiagnosticKind::UnparseableAccessLevel { found: self.text },
                Some(self.span),
            )),
        }
    }

    fn into_names(self) -> Result<Vec<SymbolEntry>, Diagnostic> {
        match self.value {
            Value::Array(elements) => entries(elements),
            Value::Block(block) => block.into_names(),
            Value::Member(_) | Value::Other => Err(Diagnostic::new(
                DiagnosticKind::UnparseableNames,
                Some(self.span),
            )),
        }
    }
}

/// The value of an argument, classified by shape.
enum Value {
    /// `.tag`
    Member(Ident),
    /// `[element, ...]`
    Array(Vec<Element>),
    /// `{ statement ... }`
    Block(Block),
    Other,
}

impl Value {
    fn classify(tokens: &[TokenTree]) -> Self {
        if let Some(tag) = member(tokens) {
            return Self::Member(tag.clone());
        }

        match tokens {
            [TokenTree::Group(group)] if group.delimiter() == Delimiter::Bracket => {
                Self::Array(split_commas(group))
            }
            [TokenTree::Group(group)] if group.delimiter() == Delimiter::Brace => {
                Self::Block(Block::new(group))
            }
            _ => Self::Other,
        }
    }
}

/// The last name of a member access: `.tag`, `Type.tag` or `Module.Type.tag`.
fn member(tokens: &[TokenTree]) -> Option<&Ident> {
    let (TokenTree::Ident(tag), rest) = tokens.split_last()? else {
        return None;
    };
    let (dot, base) = rest.split_last()?;
    if !is_punct(dot, '.') {
        return None;
    }

    // `base` is empty or alternates names and dots: `Module . Type`.
    let is_path = base.len() % 2 == 1
        && base.iter().enumerate().all(|(index, tree)| {
            if index % 2 == 0 {
                matches!(tree, TokenTree::Ident(_))
            } else {
                is_punct(tree, '.')
            }
        });
    (base.is_empty() || is_path).then_some(tag)
}

fn is_punct(tree: &TokenTree, ch: char) -> bool {
    matches!(tree, TokenTree::Punct(punct) if punct.as_char() == ch)
}

/// The token trees of `stream` without its doc comments, which the tokenizer
/// turns into `#[doc = ".."]` and `#![doc = ".."]`.
fn without_doc_comments(stream: TokenStream) -> Vec<TokenTree> {
    let trees: Vec<TokenTree> = stream.into_iter().collect();
    let mut kept = Vec::with_capacity(trees.len());
    let mut index = 0;
    while index < trees.len() {
        match doc_comment_len(&trees[index..]) {
            0 => {
                kept.push(trees[index].clone());
                index += 1;
            }
            len => index += len,
        }
    }
    kept
}

fn doc_comment_len(trees: &[TokenTree]) -> usize {
    match trees {
        [hash, TokenTree::Group(group), ..] if is_punct(hash, '#') && is_doc(group) => 2,
        [hash, bang, TokenTree::Group(group), ..]
            if is_punct(hash, '#') && is_punct(bang, '!') && is_doc(group) =>
        {
            3
        }
        _ => 0,
    }
}

fn is_doc(group: &Group) -> bool {
    group.delimiter() == Delimiter::Bracket
        && matches!(
            group.stream().into_iter().next(),
            Some(TokenTree::Ident(ident)) if ident == "doc"
        )
}

/// A builder block: one name per statement, statements separated by newlines
/// or semicolons.
struct Block {
    statements: Vec<Element>,
    span: Span,
}

impl Block {
    fn new(group: &Group) -> Self {
        let mut statements = Vec::new();
        let mut current = Vec::new();
        let mut last_line = None;

        for tree in without_doc_comments(group.stream()) {
            if is_punct(&tree, ';') {
                flush(&mut statements, &mut current);
                last_line = None;
                continue;
            }

            let line = tree.span().start().line;
            if last_line.is_some_and(|last| line > last) {
                flush(&mut statements, &mut current);
            }
            last_line = Some(tree.span().end().line);
            current.push(tree);
        }
        flush(&mut statements, &mut current);

        Self {
            statements,
            span: group.span().into(),
        }
    }

    fn into_names(self) -> Result<Vec<SymbolEntry>, Diagnostic> {
        entries(self.statements)
    }
}

fn flush(elements: &mut Vec<Element>, current: &mut Vec<TokenTree>) {
    if !current.is_empty() {
        elements.push(Element {
            tokens: std::mem::take(current),
        });
    }
}

fn split_commas(group: &Group) -> Vec<Element> {
    let mut elements = Vec::new();
    let mut current = Vec::new();
    for tree in without_doc_comments(group.stream()) {
        if is_punct(&tree, ',') {
            flush(&mut elements, &mut current);
        } else {
            current.push(tree);
        }
    }
    flush(&mut elements, &mut current);
    elements
}

/// One array element or builder statement.
struct Element {
    tokens: Vec<TokenTree>,
}

impl Element {
    /// The content of the element if it is a single plain string literal,
    /// either `"star"` or the raw form `#"star"#`.
    fn literal(&self) -> Option<String> {
        let hashes = self
            .tokens
            .iter()
            .take_while(|tree| is_punct(tree, '#'))
            .count();
        let [TokenTree::Literal(literal), closing @ ..] = &self.tokens[hashes..] else {
            return None;
        };
        if closing.len() != hashes || !closing.iter().all(|tree| is_punct(tree, '#')) {
            return None;
        }

        if hashes == 0 {
            let tokens = TokenStream::from(TokenTree::Literal(literal.clone()));
            let lit: LitStr = syn::parse2(tokens).ok()?;
            lit.suffix().is_empty().then(|| lit.value())
        } else {
            raw_content(&literal.to_string(), hashes)
        }
    }
}

/// Backslashes in a raw string are literal, unless followed by the
/// delimiter's `#`s, which start an escape or an interpolation.
fn raw_content(text: &str, hashes: usize) -> Option<String> {
    let content = text.strip_prefix('"')?.strip_suffix('"')?;
    let escape = format!("\\{}", "#".repeat(hashes));
    (!content.contains(&escape)).then(|| content.to_string())
}

fn entries(elements: Vec<Element>) -> Result<Vec<SymbolEntry>, Diagnostic> {
    elements
        .into_iter()
        .map(|element| {
            let span = tokens_span(&element.tokens);
            match element.literal() {
                Some(name) => Ok(SymbolEntry { name, span }),
                None => Err(Diagnostic::new(DiagnosticKind::UnparseableNames, span)),
            }
        })
        .collect()
}

fn tokens_span(tokens: &[TokenTree]) -> Option<Span> {
    let first = Span::from(tokens.first()?.span());
    let last = Span::from(tokens.last()?.span());
    Some(first.to(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::scan::invocations;

    fn request(source: &str) -> Result<GenerateRequest, Diagnostic> {
        let occurrence = invocations(source).remove(0).unwrap();
        parse(&occurrence)
    }

    fn names(request: &GenerateRequest) -> Vec<&str> {
        request.names.iter().map(|entry| entry.name.as_str()).collect()
    }

    fn tag(request: &GenerateRequest) -> Option<&str> {
        request.access_level.as_ref().map(|access| access.tag.as_str())
    }

    #[test]
    fn labeled_arguments() {
        let request =
            request(r#"#SFSymbol(accessLevel: .public, names: ["drop.fill", "flame.fill",])"#)
                .unwrap();
        assert_eq!(names(&request), ["drop.fill", "flame.fill"]);
        assert_eq!(tag(&request), Some("public"));
    }

    #[test]
    fn names_only() {
        let request = request(r#"#SFSymbol(names: ["star", "star.fill"])"#).unwrap();
        assert_eq!(names(&request), ["star", "star.fill"]);
        assert_eq!(tag(&request), None);
    }

    #[test]
    fn positional_arguments() {
        let request = request(r#"#SFSymbol(.fileprivate, ["star"])"#).unwrap();
        assert_eq!(names(&request), ["star"]);
        assert_eq!(tag(&request), Some("fileprivate"));
    }

    #[test]
    fn builder_block() {
        let source = "#SFSymbol {\n    \"star\"\n    \"case\"\n    \"star.square.on.square\"\n}";
        let request = request(source).unwrap();
        assert_eq!(names(&request), ["star", "case", "star.square.on.square"]);
        assert_eq!(tag(&request), None);
        assert_eq!(
            request.names_span,
            Some(Span {
                line: 1,
                column: 10,
                end_line: 5,
                end_column: 1,
            })
        );
    }

    #[test]
    fn builder_block_with_semicolons() {
        let request = request(r#"#SFSymbol { "star"; "heart" }"#).unwrap();
        assert_eq!(names(&request), ["star", "heart"]);
    }

    #[test]
    fn builder_block_with_access_level() {
        let request = request("#SFSymbol(accessLevel: .private) {\n    \"star\"\n}").unwrap();
        assert_eq!(names(&request), ["star"]);
        assert_eq!(tag(&request), Some("private"));
    }

    #[test]
    fn builder_block_as_argument() {
        let request = request("#SFSymbol(namesBuilder: {\n    \"star\"\n    \"heart\"\n})").unwrap();
        assert_eq!(names(&request), ["star", "heart"]);
    }

    #[test]
    fn array_and_builder_forms_agree() {
        let array = request(r#"#SFSymbol(names: ["star", "case"])"#).unwrap();
        let builder = request("#SFSymbol {\n\"star\"\n\"case\"\n}").unwrap();
        assert_eq!(names(&array), names(&builder));
    }

    #[test]
    fn omitted_names() {
        let bare = request("#SFSymbol").unwrap();
        assert!(bare.names.is_empty());
        assert_eq!(bare.names_span, None);

        let access_only = request("#SFSymbol(accessLevel: .public)").unwrap();
        assert!(access_only.names.is_empty());
        assert_eq!(tag(&access_only), Some("public"));

        let empty_array = request("#SFSymbol(names: [])").unwrap();
        assert!(empty_array.names.is_empty());
        assert!(empty_array.names_span.is_some());
    }

    #[test]
    fn entry_spans_are_file_positions() {
        let source = "struct A {\n    #SFSymbol(names: [\"star\", \"heart\"])\n}";
        let request = request(source).unwrap();

        assert_eq!(
            request.names[0].span,
            Some(Span {
                line: 2,
                column: 22,
                end_line: 2,
                end_column: 28,
            })
        );
        assert_eq!(request.names[1].span.map(|span| span.column), Some(30));
        assert_eq!(request.site.map(|span| (span.line, span.column)), Some((2, 4)));
    }

    #[test]
    fn interpolated_names_are_unparseable() {
        let err = request(r#"#SFSymbol(names: ["star.\(style)"])"#).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnparseableNames);
        assert!(err.span.is_some());
    }

    #[test]
    fn expressions_are_unparseable() {
        let err = request(r#"#SFSymbol(names: ["star", prefix + ".fill"])"#).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnparseableNames);
        assert_eq!(err.span.map(|span| span.column), Some(26));

        let err = request("#SFSymbol(names: symbolNames)").unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnparseableNames);

        let err = request("#SFSymbol {\n    \"star\"\n    42\n}").unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnparseableNames);
        assert_eq!(err.span.map(|span| span.line), Some(3));
    }

    #[test]
    fn access_level_must_be_a_member() {
        let err = request(r#"#SFSymbol(accessLevel: "public", names: ["star"])"#).unwrap_err();
        assert_eq!(
            err.kind,
            DiagnosticKind::UnparseableAccessLevel {
                found: "\"public\"".into()
            }
        );
    }

    #[test]
    fn too_many_arguments() {
        let err = request(r#"#SFSymbol(.public, ["star"], ["heart"])"#).unwrap_err();
        assert!(matches!(
            err.kind,
            DiagnosticKind::MalformedInvocation { .. }
        ));
    }

    #[test]
    fn trailing_block_after_two_arguments() {
        let err = request(r#"#SFSymbol(.public, ["star"]) { "heart" }"#).unwrap_err();
        assert!(matches!(
            err.kind,
            DiagnosticKind::MalformedInvocation { .. }
        ));
    }

    #[test]
    fn doc_comments_between_names() {
        let builder = request("#SFSymbol {\n    /// Favourite\n    \"star\"\n    //! Also kept\n    \"heart\"\n}").unwrap();
        assert_eq!(names(&builder), ["star", "heart"]);

        let array =
            request("#SFSymbol(names: [\n    /// Favourite\n    \"star\",\n    \"heart\",\n])").unwrap();
        assert_eq!(names(&array), ["star", "heart"]);

        let labeled = request("#SFSymbol(\n    /** Visibility */\n    accessLevel: .public,\n    names: [\"star\"]\n)").unwrap();
        assert_eq!(tag(&labeled), Some("public"));
    }

    #[test]
    fn raw_string_names() {
        let array = request(r###"#SFSymbol(names: [#"star"#, "heart", ##"star.fill"##])"###).unwrap();
        assert_eq!(names(&array), ["star", "heart", "star.fill"]);
        assert_eq!(array.names[0].span.map(|span| span.column), Some(18));
        assert_eq!(array.names[0].span.map(|span| span.end_column), Some(25));

        let builder = request("#SFSymbol {\n    #\"star\"#\n}").unwrap();
        assert_eq!(names(&builder), ["star"]);
    }

    #[test]
    fn unbalanced_raw_strings_are_unparseable() {
        let err = request(r##"#SFSymbol(names: ["star"#])"##).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnparseableNames);

        let err = request(r##"#SFSymbol(names: [#"star"# #])"##).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnparseableNames);
    }

    #[test]
    fn qualified_access_levels() {
        let qualified =
            request(r#"#SFSymbol(accessLevel: AccessLevel.public, names: ["star"])"#).unwrap();
        assert_eq!(tag(&qualified), Some("public"));

        let module = request(
            r#"#SFSymbol(SFSymbolsGenerator.AccessLevel.fileprivate, ["star"])"#,
        )
        .unwrap();
        assert_eq!(tag(&module), Some("fileprivate"));

        let err = request(r#"#SFSymbol(accessLevel: AccessLevel., names: ["star"])"#).unwrap_err();
        assert!(matches!(
            err.kind,
            DiagnosticKind::UnparseableAccessLevel { .. }
        ));
    }

    #[test]
    fn unreadable_access_levels_are_blamed_on_the_access_level() {
        let err = request(r#"#SFSymbol(.`public`, ["star"])"#).unwrap_err();
        assert_eq!(
            err.kind,
            DiagnosticKind::UnparseableAccessLevel {
                found: ".`public`".into()
            }
        );
        assert_eq!(
            err.span,
            Some(Span {
                line: 1,
                column: 10,
                end_line: 1,
                end_column: 19,
            })
        );

        let err = request("#SFSymbol(accessLevel: .`private`) {\n    \"star\"\n}").unwrap_err();
        assert_eq!(
            err.kind,
            DiagnosticKind::UnparseableAccessLevel {
                found: ".`private`".into()
            }
        );
    }

    #[test]
    fn unreadable_names_are_blamed_on_the_names() {
        let err = request(r#"#SFSymbol(.public, [`star`])"#).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnparseableNames);
        assert_eq!(err.span.map(|span| span.column), Some(20));

        let err = request("#SFSymbol(.public) {\n    \"star.\\(style)\"\n}").unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnparseableNames);
        assert_eq!(err.span.map(|span| span.line), Some(2));
    }
}
