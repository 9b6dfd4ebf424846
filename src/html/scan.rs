//-
// Copyright (c) 2020, Jason Lingle
//
// This file is part of Mailsift.
//
// Mailsift is free software: you can  redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free
// Software Foundation, either version 3 of the License, or (at your option)
// any later version.
//
// Mailsift is distributed in the hope that it will be useful, but WITHOUT ANY
// WARRANTY; without  even the implied  warranty of MERCHANTABILITY  or FITNESS
// FOR  A PARTICULAR  PURPOSE.  See the  GNU General  Public  License for  more
// details.
//
// You should have received a copy of the GNU General Public License along with
// Mailsift. If not, see <http://www.gnu.org/licenses/>.

use std::fmt::Write as _;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};

use super::category::{is_void_element, ElementCategory};
use super::push_text;

/// An element which is currently open.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Open {
    Element(String),
    /// An `a` element, with its `href` (possibly empty).
    Link(String),
}

impl Open {
    fn name(&self) -> &str {
        match *self {
            Open::Element(ref name) => name,
            Open::Link(_) => "a",
        }
    }
}

/// Render `markup` as text from its token stream, without building a tree.
///
/// This tolerates any amount of brokenness: mismatched end tags are matched
/// against the nearest open element of the same name (or ignored), and a tag
/// cut off by the end of the input is dropped. Link targets are written in
/// parentheses after the link text.
pub fn html_to_text_tokenized(markup: &str) -> String {
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(markup));

    let mut tokenizer =
        Tokenizer::new(TextSink::default(), TokenizerOpts::default());
    // Only `Script` results stop the feed early, and the sink never asks for
    // one.
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    tokenizer.sink.out.trim().to_owned()
}

#[derive(Debug, Default)]
struct TextSink {
    out: String,
    open: Vec<Open>,
    /// Number of entries in `open` which are suppressed elements.
    suppressed: usize,
    /// Character data since the last tag or comment. The tokenizer splits
    /// runs around character references, so text is only written out once
    /// the run is complete.
    pending: String,
}

impl TextSink {
    fn flush_text(&mut self) {
        if 0 == self.suppressed {
            push_text(&mut self.out, &self.pending);
        }
        self.pending.clear();
    }

    fn start_tag(&mut self, tag: Tag) -> TokenSinkResult<()> {
        let name = tag.name.to_string();
        let category = ElementCategory::of(&name);
        if category.is_block(true) {
            self.out.push('\n');
        }

        if tag.self_closing || is_void_element(&name) {
            return TokenSinkResult::Continue;
        }

        let raw_kind = match name.as_str() {
            "script" => Some(RawKind::ScriptData),
            "style" => Some(RawKind::Rawtext),
            _ => None,
        };

        if ElementCategory::Suppressed == category {
            self.suppressed += 1;
        }

        self.open.push(if ElementCategory::Link == category {
            let href = tag
                .attrs
                .iter()
                .find(|attr| "href" == &*attr.name.local)
                .map(|attr| attr.value.to_string())
                .unwrap_or_default();
            Open::Link(href)
        } else {
            Open::Element(name)
        });

        match raw_kind {
            Some(kind) => TokenSinkResult::RawData(kind),
            None => TokenSinkResult::Continue,
        }
    }

    fn end_tag(&mut self, name: &str) {
        if let Some(ix) = self.open.iter().rposition(|o| o.name() == name) {
            for closed in self.open.drain(ix..).rev() {
                match closed {
                    Open::Link(ref href) if !href.is_empty() => {
                        let _ = write!(self.out, " ({})", href);
                    },
                    Open::Element(ref name)
                        if ElementCategory::Suppressed
                            == ElementCategory::of(name) =>
                    {
                        self.suppressed -= 1;
                    },
                    _ => (),
                }
            }
        }

        if ElementCategory::of(name).is_block(true) {
            self.out.push('\n');
        }
    }
}

impl TokenSink for TextSink {
    type Handle = ();

    fn process_token(
        &mut self,
        token: Token,
        _line_number: u64,
    ) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(text) => self.pending.push_str(&text),
            Token::TagToken(tag) => {
                self.flush_text();
                match tag.kind {
                    TagKind::StartTag => return self.start_tag(tag),
                    TagKind::EndTag => self.end_tag(&tag.name),
                }
            },
            Token::CommentToken(_)
            | Token::DoctypeToken(_)
            | Token::EOFToken => self.flush_text(),
            Token::NullCharacterToken | Token::ParseError(_) => (),
        }

        TokenSinkResult::Continue
    }
}
