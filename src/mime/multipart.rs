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

//! Splitting of multipart bodies (RFC 2046 section 5.1) into their parts.

use super::header::{read_header_block, HeaderBlock};
use crate::support::error::Error;

/// One body part of a multipart, borrowed from the enclosing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part<'a> {
    pub headers: HeaderBlock<'a>,
    /// The part content, still transfer-encoded. The line ending before the
    /// next delimiter is not included.
    pub body: &'a [u8],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Preamble,
    InPart,
    Done,
}

/// Iterates the parts of one multipart body.
///
/// Delimiter lines must consist of exactly `--` and the boundary, optionally
/// followed by `--` (for the close delimiter) and trailing whitespace. Both
/// DOS and UNIX line endings are accepted. The preamble and epilogue are
/// discarded.
///
/// Once `next_part()` has returned an error or `Ok(None)`, it will keep
/// returning `Ok(None)`.
#[derive(Debug)]
pub struct PartReader<'a> {
    data: &'a [u8],
    /// `--` followed by the boundary.
    delimiter: Vec<u8>,
    /// Start of the content of the current part.
    pos: usize,
    state: State,
}

/// A delimiter line found in the data.
#[derive(Clone, Copy, Debug)]
struct Delimiter {
    /// Where the line ending preceding the delimiter line begins; this is the
    /// end of the content before it.
    content_end: usize,
    /// Where the delimiter line itself begins.
    line_start: usize,
    /// Just past the delimiter line and its line ending.
    line_end: usize,
    is_final: bool,
}

impl<'a> PartReader<'a> {
    /// Prepare to read the multipart body `data` using `boundary`.
    ///
    /// Returns `None` if `boundary` is not a valid boundary.
    pub fn new(data: &'a [u8], boundary: &str) -> Option<Self> {
        if !is_valid_boundary(boundary) {
            return None;
        }

        let mut delimiter = Vec::with_capacity(boundary.len() + 2);
        delimiter.extend_from_slice(b"--");
        delimiter.extend_from_slice(boundary.as_bytes());

        Some(PartReader {
            data,
            delimiter,
            pos: 0,
            state: State::Preamble,
        })
    }

    /// Return the next part, `Ok(None)` after the close delimiter, or an
    /// error if the multipart is truncated or a part header is malformed.
    pub fn next_part(&mut self) -> Result<Option<Part<'a>>, Error> {
        if State::Preamble == self.state {
            match self.find_delimiter(0) {
                None => {
                    self.state = State::Done;
                    return Err(Error::PartRead(format!(
                        "delimiter {:?} not found",
                        String::from_utf8_lossy(&self.delimiter)
                    )));
                },
                Some(delim) if delim.is_final => {
                    self.state = State::Done;
                    return Ok(None);
                },
                Some(delim) => {
                    self.pos = delim.line_end;
                    self.state = State::InPart;
                },
            }
        }

        if State::Done == self.state {
            return Ok(None);
        }

        let start = self.pos;
        let delim = match self.find_delimiter(start) {
            Some(delim) => delim,
            None => {
                self.state = State::Done;
                return Err(Error::PartRead(
                    "unexpected EOF before close delimiter".to_owned(),
                ));
            },
        };

        self.pos = delim.line_end;
        if delim.is_final {
            self.state = State::Done;
        }

        // The blank line ending the headers may have had its line ending
        // claimed by the delimiter, so headers are read up to the delimiter
        // line proper.
        let (headers, rest) =
            match read_header_block(&self.data[start..delim.line_start]) {
                Ok((headers, Some(rest))) => (headers, rest),
                Ok((_, None)) => {
                    self.state = State::Done;
                    return Err(Error::PartRead(
                        "unexpected EOF in part headers".to_owned(),
                    ));
                },
                Err(e) => {
                    self.state = State::Done;
                    return Err(Error::PartRead(e));
                },
            };

        let body_start = delim.line_start - rest.len();
        let body_end = delim.content_end.max(body_start);
        Ok(Some(Part {
            headers,
            body: &self.data[body_start..body_end],
        }))
    }

    /// Find the first delimiter line at or after `from`, which must be the
    /// start of a line.
    fn find_delimiter(&self, from: usize) -> Option<Delimiter> {
        let mut line_start = from;
        while line_start < self.data.len() {
            let line_end = memchr::memchr(b'\n', &self.data[line_start..])
                .map(|lf| line_start + lf + 1)
                .unwrap_or_else(|| self.data.len());

            if let Some(is_final) =
                self.match_delimiter(&self.data[line_start..line_end])
            {
                let content_end = if line_start >= from + 2
                    && b"\r\n" == &self.data[line_start - 2..line_start]
                {
                    line_start - 2
                } else if line_start > from
                    && b'\n' == self.data[line_start - 1]
                {
                    line_start - 1
                } else {
                    line_start
                };

                return Some(Delimiter {
                    content_end,
                    line_start,
                    line_end,
                    is_final,
                });
            }

            line_start = line_end;
        }

        None
    }

    /// If `line` is a delimiter line, return whether it is the close
    /// delimiter.
    fn match_delimiter(&self, line: &[u8]) -> Option<bool> {
        if !line.starts_with(&self.delimiter) {
            return None;
        }

        let mut tail = &line[self.delimiter.len()..];
        let is_final = tail.starts_with(b"--");
        if is_final {
            tail = &tail[2..];
        }

        if tail.iter().all(|&b| b.is_ascii_whitespace()) {
            Some(is_final)
        } else {
            None
        }
    }
}

/// RFC 2046 `bchars`
pub fn is_boundary_char(c: u8) -> bool {
    matches!(c,
        b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z' |
        b'\'' | b'(' | b')' | b'+' | b'_' | b',' | b'-' | b'.' |
        b'/' | b':' | b'=' | b'?' | b' '
    )
}

/// Whether `boundary` is 1 to 70 boundary characters, not ending in a space.
pub fn is_valid_boundary(boundary: &str) -> bool {
    let b = boundary.as_bytes();
    (1..=70).contains(&b.len())
        && b.iter().copied().all(is_boundary_char)
        && !boundary.ends_with(' ')
}
