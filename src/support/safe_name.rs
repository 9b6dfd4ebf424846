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

/// Reduce a sender-supplied file name to its final path component.
///
/// Agents sometimes put whole paths (`C:\Users\...\report.pdf`) into the
/// `filename` parameter. Only the last element is interesting, and keeping the
/// rest would let a careless consumer write outside of wherever it saves
/// attachments.
///
/// Both `/` and `\` are treated as separators regardless of platform, since
/// the name came from some other machine. Returns `None` if nothing usable is
/// left, e.g. for `""`, `"/"` or `".."`.
pub fn base_name(name: &str) -> Option<&str> {
    const SEPARATORS: &[char] = &['/', '\\'];

    let trimmed = name.trim_end_matches(SEPARATORS);
    let base = trimmed.rsplit(SEPARATORS).next().unwrap_or(trimmed);

    if base.is_empty() || "." == base || ".." == base {
        None
    } else {
        Some(base)
    }
}
