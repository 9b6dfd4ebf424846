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

use super::extensions::preferred_extension;
use super::header::{parse_content_disposition, HeaderBlock};
use crate::support::safe_name::base_name;

/// Work out the file name for a leaf part.
///
/// If the part names itself through the `filename` parameter of its
/// `Content-Disposition`, that name is used (reduced to its last path
/// component). Otherwise a name of the form `{radix}-{index}{ext}` is built,
/// where `ext` is the preferred extension for `media_type` or nothing if the
/// type is not registered.
///
/// `radix` is conventionally the boundary of the multipart containing the
/// part.
pub fn resolve_filename(
    headers: &HeaderBlock<'_>,
    media_type: &str,
    radix: &str,
    index: usize,
) -> String {
    if let Some(declared) = declared_filename(headers) {
        return declared;
    }

    format!("{}-{}{}", radix, index, preferred_extension(media_type))
}

fn declared_filename(headers: &HeaderBlock<'_>) -> Option<String> {
    let disposition =
        parse_content_disposition(&headers.get("Content-Disposition")?).ok()?;
    disposition
        .parm("filename")
        .and_then(base_name)
        .map(str::to_owned)
}
