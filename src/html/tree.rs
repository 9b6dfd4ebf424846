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

//! Text extraction by walking a parsed DOM.

use scraper::{ElementRef, Html};

use super::category::ElementCategory;
use super::{push_link, push_text};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct TooDeep;

/// Render `markup` as text by a depth-first walk of its DOM.
///
/// Fails if elements nest more than `max_depth` deep, in which case nothing
/// useful can be said about the partial output.
pub(super) fn extract(
    markup: &str,
    max_depth: usize,
) -> Result<String, TooDeep> {
    let document = Html::parse_document(markup);
    let mut out = String::new();
    walk(document.root_element(), 0, max_depth, &mut out)?;
    Ok(out.trim().to_owned())
}

fn walk(
    element: ElementRef<'_>,
    depth: usize,
    max_depth: usize,
    out: &mut String,
) -> Result<(), TooDeep> {
    if depth > max_depth {
        return Err(TooDeep);
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            push_text(out, text);
            continue;
        }

        let child = match ElementRef::wrap(child) {
            Some(child) => child,
            // Comments, doctypes, processing instructions
            None => continue,
        };

        match ElementCategory::of(child.value().name()) {
            ElementCategory::Suppressed => (),
            ElementCategory::Link => {
                let mut text = String::new();
                walk(child, depth + 1, max_depth, &mut text)?;
                let href = child.value().attr("href").unwrap_or("");
                push_link(out, text.trim(), href);
            },
            ElementCategory::Block => {
                walk(child, depth + 1, max_depth, out)?;
                out.push('\n');
            },
            ElementCategory::ExtendedBlock | ElementCategory::Generic => {
                walk(child, depth + 1, max_depth, out)?;
            },
        }
    }

    Ok(())
}
