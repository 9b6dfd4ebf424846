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

use encoding_rs::*;
use lazy_static::lazy_static;
use regex::Regex;

use super::quoted_printable::qp_decode;

lazy_static! {
    static ref ENCODED_WORD: Regex =
        Regex::new(r"^=\?([!->@-~]*)\?([!->@-~]*)\?([!->@-~]*)\?=$").unwrap();
    // '?' and whitespace are outside the character class, so a match can
    // never run across two words.
    static ref ENCODED_WORD_ANYWHERE: Regex =
        Regex::new(r"=\?[!->@-~]*\?[!->@-~]*\?[!->@-~]*\?=").unwrap();
}

/// Test if `word` (in its entirety) is an RFC 2047 "encoded word".
///
/// If it is, decode it and return its decoded value.
///
/// Returns `None` if it is not an encoded word or if it could not be decoded.
///
/// As with Thunderbird, encoded words longer than the 75 characters RFC 2047
/// permits are accepted.
pub fn ew_decode(word: &str) -> Option<Cow<str>> {
    let captures = ENCODED_WORD.captures(word)?;

    let charset = captures.get(1)?.as_str();
    let transfer_encoding = captures.get(2)?.as_str();
    let mut content = Cow::Borrowed(captures.get(3)?.as_str().as_bytes());

    // _ in the content (before transfer decoding) stands for ASCII space
    // regardless of charset, but only in the Q encoding
    if transfer_encoding.eq_ignore_ascii_case("q") && content.contains(&b'_')
    {
        for b in content.to_mut() {
            if *b == b'_' {
                *b = b' ';
            }
        }
    }

    // Keep borrowing from `word` as long as no stage needed to allocate.
    let content = match content {
        Cow::Owned(content) => decode_xfer(transfer_encoding, &content)
            .map(Cow::into_owned)
            .map(Cow::Owned),
        Cow::Borrowed(content) => decode_xfer(transfer_encoding, content),
    }?;

    match content {
        Cow::Owned(content) => decode_charset(charset, &content)
            .map(Cow::into_owned)
            .map(Cow::Owned),
        Cow::Borrowed(content) => decode_charset(charset, content),
    }
}

/// Decode every encoded word in an unstructured header value.
///
/// Encoded words are recognised anywhere, not only when delimited by
/// whitespace, since plenty of agents glue them to quotes or angle brackets.
/// Whitespace between two adjacent encoded words is removed.
///
/// Something that looks like an encoded word but cannot be decoded (unknown
/// charset, bad base64) is left as it is; a description of the first such
/// failure is returned alongside the text.
pub fn decode_unstructured(value: &str) -> (Cow<str>, Option<String>) {
    let mut decoded = String::new();
    let mut failure = None;
    let mut last_end = 0;
    let mut previous_was_encoded = false;

    for m in ENCODED_WORD_ANYWHERE.find_iter(value) {
        let gap = &value[last_end..m.start()];
        match ew_decode(m.as_str()) {
            Some(word) => {
                if !previous_was_encoded
                    || !gap.chars().all(char::is_whitespace)
                {
                    decoded.push_str(gap);
                }
                decoded.push_str(&word);
                previous_was_encoded = true;
            },
            None => {
                decoded.push_str(gap);
                decoded.push_str(m.as_str());
                previous_was_encoded = false;
                if failure.is_none() {
                    failure =
                        Some(format!("cannot decode {:?}", m.as_str()));
                }
            },
        }
        last_end = m.end();
    }

    if 0 == last_end {
        return (Cow::Borrowed(value), None);
    }

    decoded.push_str(&value[last_end..]);
    (Cow::Owned(decoded), failure)
}

fn decode_xfer<'a>(xfer: &str, content: &'a [u8]) -> Option<Cow<'a, [u8]>> {
    match xfer {
        "q" | "Q" => Some(qp_decode(content)),
        "b" | "B" => base64::decode(content).ok().map(Cow::Owned),
        _ => None,
    }
}

fn decode_charset<'a>(
    charset: &str,
    content: &'a [u8],
) -> Option<Cow<'a, str>> {
    // RFC 2231 allows a language suffix, e.g. `US-ASCII*EN`
    let charset = charset.split('*').next().unwrap_or(charset);
    Some(
        Encoding::for_label_no_replacement(charset.as_bytes())?
            .decode_with_bom_removal(content)
            .0,
    )
}
