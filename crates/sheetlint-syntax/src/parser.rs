//! Whitespace-preserving stylesheet parser built on the `cssparser` tokenizer.
//!
//! Unlike a style engine parser, this one keeps every byte of inter-node
//! whitespace so that lint rules can inspect indentation. Statements are split
//! on `;` and `{}` blocks; the text between statements becomes the next node's
//! [`Raws::before`], and the text before a closing brace becomes the block's
//! [`Raws::after`].

use std::path::Path;

use cssparser::{ParseError as CssParseError, ParseErrorKind, Parser, ParserInput, Token};

use crate::tree::{NodeData, NodeId, Raws, SourceSpan, Stylesheet};
use crate::{Error, Result};

type BlockResult<'i, T> = std::result::Result<T, CssParseError<'i, Error>>;

/// How a statement ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Semicolon,
    Block,
    End,
}

/// Parse stylesheet text into a [`Stylesheet`] tree.
///
/// Parsing never rejects CSS content. Statements that are neither rules,
/// at-rules nor declarations are skipped with a warning, the same recovery
/// strategy a browser applies. `Err` is only returned if the tree itself
/// could not be built.
///
/// # Example
///
/// ```
/// let sheet = sheetlint_syntax::parse("a {\n  color: red;\n}\n").unwrap();
/// assert_eq!(sheet.len(), 2);
/// ```
pub fn parse(css: &str) -> Result<Stylesheet> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut sheet = Stylesheet::new();

    let after = parse_statements(&mut parser, &mut sheet, None).map_err(into_error)?;
    sheet.after = after;

    tracing::debug!(nodes = sheet.len(), "parsed stylesheet");
    Ok(sheet)
}

/// Read and parse a stylesheet file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Stylesheet> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse(&content)
}

fn into_error(err: CssParseError<'_, Error>) -> Error {
    match err.kind {
        ParseErrorKind::Custom(err) => err,
        ParseErrorKind::Basic(kind) => Error::parse(
            format!("{kind:?}"),
            err.location.line + 1,
            err.location.column,
        ),
    }
}

fn tree_error<'i>(parser: &Parser<'i, '_>, err: Error) -> CssParseError<'i, Error> {
    parser.new_custom_error(err)
}

/// Consume a `()`, `[]` or function block that was just opened, so that
/// positions taken afterwards lie past its closing bracket.
fn skip_block<'i>(parser: &mut Parser<'i, '_>) -> BlockResult<'i, ()> {
    parser.parse_nested_block(|block| {
        while block.next_including_whitespace_and_comments().is_ok() {}
        Ok(())
    })
}

/// Parse statements until the end of the current block.
///
/// Returns the trivia that followed the last statement.
fn parse_statements<'i>(
    parser: &mut Parser<'i, '_>,
    sheet: &mut Stylesheet,
    parent: Option<NodeId>,
) -> BlockResult<'i, String> {
    let mut before_start = parser.position();

    loop {
        let token_start = parser.position();
        let state = parser.state();
        let location = parser.current_source_location();

        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(parser.slice_from(before_start).to_owned()),
        };

        match token {
            Token::WhiteSpace(_) | Token::Semicolon => {}
            Token::CloseCurlyBracket => {
                tracing::warn!(line = location.line + 1, "Unmatched '}}' in stylesheet");
            }
            Token::Comment(text) => {
                let before = parser.slice(before_start..token_start).to_owned();
                let line = location.line as usize + 1;
                let span = SourceSpan::new(line, line + text.matches('\n').count());
                let data = NodeData::Comment {
                    text: text.to_owned(),
                };
                sheet
                    .append(parent, data, Raws::before(before), span)
                    .map_err(|e| tree_error(parser, e))?;
                before_start = parser.position();
            }
            _ => {
                parser.reset(&state);
                let before = parser.slice(before_start..token_start).to_owned();
                parse_statement(parser, sheet, parent, before)?;
                before_start = parser.position();
            }
        }
    }
}

/// Parse one rule, at-rule or declaration starting at the current position.
fn parse_statement<'i>(
    parser: &mut Parser<'i, '_>,
    sheet: &mut Stylesheet,
    parent: Option<NodeId>,
    before: String,
) -> BlockResult<'i, ()> {
    let start = parser.position();
    let start_line = parser.current_source_location().line as usize + 1;

    let mut at_keyword = None;
    let mut colon = None;
    let mut first = true;
    // Start of the whitespace and comments after the last significant token.
    let mut trailing = None;

    let (end, terminator) = loop {
        let position = parser.position();
        let state = parser.state();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => {
                let (end, state) = trailing.unwrap_or((position, state));
                parser.reset(&state);
                break (end, Terminator::End);
            }
        };

        if first {
            if let Token::AtKeyword(name) = &token {
                at_keyword = Some((name.to_string(), parser.position()));
            }
            first = false;
        }

        match &token {
            Token::Semicolon => break (position, Terminator::Semicolon),
            Token::CurlyBracketBlock => break (position, Terminator::Block),
            Token::CloseCurlyBracket => {
                // Leave the trivia and the stray brace to the statement loop.
                let (end, state) = trailing.unwrap_or((position, state));
                parser.reset(&state);
                break (end, Terminator::End);
            }
            Token::WhiteSpace(_) | Token::Comment(_) => {
                if trailing.is_none() {
                    trailing = Some((position, state));
                }
                continue;
            }
            Token::Colon if colon.is_none() => colon = Some((position, parser.position())),
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                skip_block(parser)?;
            }
            _ => {}
        }
        trailing = None;
    };

    let text = parser.slice(start..end).trim_end();
    let span = SourceSpan::new(start_line, start_line + text.matches('\n').count());

    if terminator == Terminator::Block {
        let data = match at_keyword {
            Some((name, name_end)) => NodeData::AtRule {
                name,
                params: parser.slice(name_end..end).trim().to_owned(),
                has_body: true,
            },
            None => NodeData::Rule {
                selector: text.to_owned(),
            },
        };
        let id = sheet
            .append(parent, data, Raws::before(before), span)
            .map_err(|e| tree_error(parser, e))?;

        let after = parser.parse_nested_block(|block| parse_statements(block, sheet, Some(id)))?;
        let end_line = parser.current_source_location().line as usize + 1;

        sheet
            .set_after(id, after)
            .and_then(|()| sheet.set_end_line(id, end_line))
            .map_err(|e| tree_error(parser, e))?;
        return Ok(());
    }

    let data = if let Some((name, name_end)) = at_keyword {
        NodeData::AtRule {
            name,
            params: parser.slice(name_end..end).trim().to_owned(),
            has_body: false,
        }
    } else if let Some((colon_start, colon_end)) = colon {
        NodeData::Declaration {
            property: parser.slice(start..colon_start).trim_end().to_owned(),
            value: parser.slice(colon_end..end).trim().to_owned(),
        }
    } else {
        tracing::warn!(line = start_line, statement = text, "Skipping unrecognized statement");
        return Ok(());
    };

    sheet
        .append(parent, data, Raws::before(before), span)
        .map_err(|e| tree_error(parser, e))?;
    Ok(())
}
