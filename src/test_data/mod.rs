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

/// A two-part `multipart/alternative` message as delivered to an mbox, with
/// UNIX line endings.
pub static DEMO_ALTERNATIVE: &[u8] = include_bytes!("demo_alternative.eml");

/// RFC 2047 encoded words in `From`, `To` and a folded `Subject`, plus one
/// in `Cc` naming a charset nobody knows.
pub static ENCODED_HEADERS: &[u8] = include_bytes!("encoded_headers.eml");

/// A plain `text/plain` message with no multipart structure.
pub static SINGLE_PART: &[u8] = include_bytes!("single_part.eml");

/// A multipart body whose top-level `Content-Type` claims `text/plain` but
/// still carries a boundary.
pub static MISLABELLED_MULTIPART: &[u8] =
    include_bytes!("mislabelled_multipart.eml");

/// `multipart/mixed` containing a `multipart/alternative` and three
/// attachments in assorted transfer encodings.
pub static NESTED_WITH_ATTACHMENTS: &[u8] =
    include_bytes!("nested_with_attachments.eml");

pub static TWO_TEXT_PARTS: &[u8] = include_bytes!("two_text_parts.eml");

/// A multipart which stops partway through its second part.
pub static TRUNCATED: &[u8] = include_bytes!("truncated.eml");

/// A multipart whose only part is `text/html`.
pub static HTML_ONLY: &[u8] = include_bytes!("html_only.eml");
