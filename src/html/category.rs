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

use std::collections::HashMap;

use lazy_static::lazy_static;

/// How an element affects the text rendering of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementCategory {
    /// Neither the element nor anything inside it produces text.
    Suppressed,
    /// A hyperlink; its target is rendered next to its text.
    Link,
    /// Followed by a line break.
    Block,
    /// Followed by a line break by the token scanner only; the tree walk
    /// treats these as `Generic`.
    ExtendedBlock,
    /// Contributes its children's text and nothing else.
    Generic,
}

static CATEGORIES: &[(&str, ElementCategory)] = &[
    ("head", ElementCategory::Suppressed),
    ("script", ElementCategory::Suppressed),
    ("style", ElementCategory::Suppressed),
    ("a", ElementCategory::Link),
    ("br", ElementCategory::Block),
    ("div", ElementCategory::Block),
    ("h1", ElementCategory::Block),
    ("h2", ElementCategory::Block),
    ("h3", ElementCategory::Block),
    ("h4", ElementCategory::Block),
    ("h5", ElementCategory::Block),
    ("h6", ElementCategory::Block),
    ("p", ElementCategory::Block),
    ("blockquote", ElementCategory::ExtendedBlock),
    ("li", ElementCategory::ExtendedBlock),
    ("ol", ElementCategory::ExtendedBlock),
    ("pre", ElementCategory::ExtendedBlock),
    ("table", ElementCategory::ExtendedBlock),
    ("td", ElementCategory::ExtendedBlock),
    ("th", ElementCategory::ExtendedBlock),
    ("tr", ElementCategory::ExtendedBlock),
    ("ul", ElementCategory::ExtendedBlock),
];

// HTML void elements; they never have an end tag or content.
static VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link",
    "meta", "param", "source", "track", "wbr",
];

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, ElementCategory> =
        CATEGORIES.iter().copied().collect();
}

impl ElementCategory {
    /// Look up the category of the element with the given lower-case name.
    pub fn of(name: &str) -> Self {
        BY_NAME
            .get(name)
            .copied()
            .unwrap_or(ElementCategory::Generic)
    }

    /// Whether elements of this category end with a line break. `extended`
    /// selects the wider set used by the token scanner.
    pub fn is_block(self, extended: bool) -> bool {
        match self {
            ElementCategory::Block => true,
            ElementCategory::ExtendedBlock => extended,
            _ => false,
        }
    }
}

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}
