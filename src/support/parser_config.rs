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

use serde::{Deserialize, Serialize};

use super::error::Error;

/// Tunables for a `Parser`.
///
/// The defaults are reasonable for mail of any realistic shape; the limits
/// only exist so that adversarial input cannot make the parser do unbounded
/// work.
///
/// This can be loaded from TOML, e.g.
///
/// ```toml
/// max_depth = 20
/// filename_index = "sequential"
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserConfig {
    /// The deepest multipart nesting that will be descended into.
    ///
    /// The top-level body is depth 1. A multipart nested deeper than this is
    /// not decoded and a `DepthExceeded` error is recorded instead.
    pub max_depth: u32,

    /// The maximum number of MIME parts, at any depth, that will be looked at
    /// in one message.
    pub max_parts: u32,

    /// How the index in synthesised attachment file names is chosen.
    pub filename_index: FilenameIndex,

    /// The deepest element nesting the HTML tree walk accepts before giving up
    /// on the tree and using the token scanner.
    pub max_html_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: 50,
            max_parts: 1000,
            filename_index: FilenameIndex::Constant,
            max_html_depth: 512,
        }
    }
}

impl ParserConfig {
    /// Parse a configuration from TOML text. Missing keys take their default
    /// values.
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }
}

/// Selects the `index` passed to the filename resolver.
///
/// Historically every part got index 1, so two unnamed parts of the same type
/// under the same boundary end up with the same synthesised name. That is
/// still the default so existing consumers see the same names;
/// `Sequential` numbers the parts under each boundary 1, 2, 3, ... instead.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilenameIndex {
    Constant,
    Sequential,
}

impl FilenameIndex {
    /// The index to use for the part at `position` (zero-based) under its
    /// boundary.
    pub fn for_position(self, position: usize) -> usize {
        match self {
            FilenameIndex::Constant => 1,
            FilenameIndex::Sequential => position + 1,
        }
    }
}
