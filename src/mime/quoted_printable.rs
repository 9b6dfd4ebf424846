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

use std::borrow::Cow;

/// Decodes quoted-printable encoding leniently.
///
/// This is used for the "Q" encoding of RFC 2047 encoded words, where there
/// is no sensible way to report a failure: invalid sequences are passed
/// through untransformed, as is a trailing incomplete escape. Soft line breaks
/// (both DOS and UNIX) are discarded.
pub fn qp_decode(s: &[u8]) -> Cow<[u8]> {
    if memchr::memchr(b'=', s).is_none() {
        return Cow::Borrowed(s);
    }

    let mut transformed = Vec::with_capacity(s.len());
    let mut split = s.split(|&b| b'=' == b);
    if let Some(prefix) = split.next() {
        transformed.extend_from_slice(prefix);
    }

    for element in split {
        if element.starts_with(b"\n") {
            transformed.extend_from_slice(&element[1..]);
        } else if element.starts_with(b"\r\n") {
            transformed.extend_from_slice(&element[2..]);
        } else if let Some(ch) =
            element.get(..2).and_then(|e| hex_pair(e[0], e[1]))
        {
            transformed.push(ch);
            transformed.extend_from_slice(&element[2..]);
        } else {
            transformed.push(b'=');
            transformed.extend_from_slice(element);
        }
    }

    Cow::Owned(transformed)
}

/// Decodes a quoted-printable body, as described by RFC 2045.
///
/// Trailing whitespace on each encoded line is dropped, soft line breaks
/// (an `=` at the end of a line, or at the very end of the input) are
/// removed, and hard line endings are passed through as they appear. Lower
/// case hex digits are accepted.
///
/// An `=` which is not followed by two hex digits or a line break is an
/// error, reported with its offset in `s`. Other bytes, including 8-bit ones,
/// are passed through.
pub fn qp_decode_strict(s: &[u8]) -> Result<Vec<u8>, String> {
    let mut decoded = Vec::with_capacity(s.len());
    let mut offset = 0;

    for line in s.split_inclusive(|&b| b'\n' == b) {
        let (content, ending) = if line.ends_with(b"\r\n") {
            (&line[..line.len() - 2], &b"\r\n"[..])
        } else if line.ends_with(b"\n") {
            (&line[..line.len() - 1], &b"\n"[..])
        } else {
            (line, &b""[..])
        };

        let mut content = content;
        while let Some(&last) = content.last() {
            if b' ' == last || b'\t' == last {
                content = &content[..content.len() - 1];
            } else {
                break;
            }
        }

        let soft_break = content.ends_with(b"=");
        if soft_break {
            content = &content[..content.len() - 1];
        }

        let mut ix = 0;
        while ix < content.len() {
            if b'=' != content[ix] {
                decoded.push(content[ix]);
                ix += 1;
                continue;
            }

            match (content.get(ix + 1), content.get(ix + 2)) {
                (Some(&hi), Some(&lo)) if hex_pair(hi, lo).is_some() => {
                    decoded.extend(hex_pair(hi, lo));
                    ix += 3;
                },
                _ => {
                    return Err(format!(
                        "invalid escape sequence at offset {}",
                        offset + ix
                    ))
                },
            }
        }

        if !soft_break {
            decoded.extend_from_slice(ending);
        }
        offset += line.len();
    }

    Ok(decoded)
}

pub(super) fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}
