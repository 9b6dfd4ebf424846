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

//! Plain-text rendering of HTML bodies.
//!
//! The rendering is deliberately crude. Text runs are trimmed and separated by
//! single spaces, block elements end with a line break, links are followed by
//! their target, and the contents of `head`, `script` and `style` are
//! dropped.

use log::debug;

mod category;
mod scan;
mod tree;

pub use self::category::ElementCategory;
pub use self::scan::html_to_text_tokenized;

use crate::support::parser_config::ParserConfig;

/// Renders HTML as plain text, walking the DOM where possible and falling
/// back to the token scanner otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HtmlExtractor {
    max_depth: usize,
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        HtmlExtractor::new(ParserConfig::default().max_html_depth)
    }
}

impl HtmlExtractor {
    /// Create an extractor whose tree walk gives up on documents nesting
    /// elements more than `max_depth` deep.
    pub fn new(max_depth: usize) -> Self {
        HtmlExtractor { max_depth }
    }

    pub fn extract(&self, markup: &str) -> String {
        match tree::extract(markup, self.max_depth) {
            Ok(text) => text,
            Err(tree::TooDeep) => {
                debug!(
                    "HTML nests deeper than {}, using token scanner",
                    self.max_depth
                );
                html_to_text_tokenized(markup)
            },
        }
    }
}

/// Render `markup` as plain text with the default depth limit.
pub fn html_to_text(markup: &str) -> String {
    HtmlExtractor::default().extract(markup)
}

fn push_text(out: &mut String, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        out.push_str(text);
        out.push(' ');
    }
}

/// Write a link whose (trimmed) content is `text`. The target is added after
/// the text unless the text already shows it.
fn push_link(out: &mut String, text: &str, href: &str) {
    let text = if text.is_empty() { href } else { text };
    out.push_str(text);
    if !href.is_empty() && text != href && !text.contains(href) {
        out.push(' ');
        out.push_str(href);
    }
    out.push(' ');
}
