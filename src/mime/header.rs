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

//! Utilities for working with RFC 5322 header blocks and the structured
//! RFC 2045 headers (`Content-Type`, `Content-Disposition`).

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::str;

use encoding_rs::Encoding;
use nom::{
    branch::alt,
    bytes::complete::{is_a, is_not, take, take_while1},
    character::complete::char,
    combinator::{map, opt},
    error::ErrorKind,
    error_position,
    multi::{many0, many0_count},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use super::quoted_printable::hex_pair;
use crate::support::error::Error;

/// A single header field, borrowed from the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header<'a> {
    /// The field name, with surrounding whitespace removed.
    pub name: &'a str,
    /// Everything after the colon, including any folded continuation lines
    /// and the final line ending.
    pub raw_value: &'a [u8],
}

impl<'a> Header<'a> {
    /// The unfolded value.
    ///
    /// Each physical line is trimmed and the pieces joined with a single
    /// space. 8-bit content is interpreted as UTF-8 (RFC 6532), with invalid
    /// sequences replaced.
    pub fn value(&self) -> String {
        String::from_utf8_lossy(self.raw_value)
            .split('\n')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The header fields of one message or MIME part, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderBlock<'a> {
    headers: Vec<Header<'a>>,
}

impl<'a> HeaderBlock<'a> {
    /// The unfolded value of the first field called `name`, compared
    /// case-insensitively.
    pub fn get(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(Header::value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header<'a>> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Split a whole message into its header block and body.
///
/// A leading mbox `From ` separator line is skipped. It is acceptable for
/// the message to end inside the header block (i.e., there is no body) as
/// long as at least one header was read. Anything that does not look like a
/// header block at all is an `Envelope` error.
pub fn split_message(raw: &[u8]) -> Result<(HeaderBlock<'_>, &[u8]), Error> {
    let mut data = raw;
    if data.starts_with(b"From ") {
        data = match memchr::memchr(b'\n', data) {
            Some(lf) => &data[lf + 1..],
            None => &[],
        };
    }

    let (headers, body) = read_header_block(data).map_err(Error::Envelope)?;
    match body {
        Some(body) => Ok((headers, body)),
        None if !headers.is_empty() => Ok((headers, &[])),
        None => Err(Error::Envelope("unexpected end of input".to_owned())),
    }
}

/// Read header fields from the start of `data` up to and including the blank
/// line that terminates them.
///
/// Returns the headers and the remaining data after the blank line, or
/// `None` for the latter if `data` ran out first.
///
/// Fails with a description if a line is neither a header, a continuation of
/// one, nor blank.
pub fn read_header_block(
    data: &[u8],
) -> Result<(HeaderBlock<'_>, Option<&[u8]>), String> {
    let mut headers = Vec::new();
    // (name, start of value) of the header currently being accumulated
    let mut current: Option<(&str, usize)> = None;
    let mut pos = 0;

    while pos < data.len() {
        let line_end = memchr::memchr(b'\n', &data[pos..])
            .map(|lf| pos + lf + 1)
            .unwrap_or_else(|| data.len());
        let line = &data[pos..line_end];

        if b"\n" == line || b"\r\n" == line {
            if let Some((name, value_start)) = current.take() {
                headers.push(Header {
                    name,
                    raw_value: &data[value_start..pos],
                });
            }
            return Ok((HeaderBlock { headers }, Some(&data[line_end..])));
        }

        if line.starts_with(b" ") || line.starts_with(b"\t") {
            if current.is_none() {
                return Err(format!(
                    "continuation before first header: {:?}",
                    String::from_utf8_lossy(line).trim_end()
                ));
            }
        } else {
            if let Some((name, value_start)) = current.take() {
                headers.push(Header {
                    name,
                    raw_value: &data[value_start..pos],
                });
            }

            let (value, name) = field_name(line)
                .ok()
                .and_then(|(value, name)| {
                    Some((value, str::from_utf8(name).ok()?))
                })
                .ok_or_else(|| {
                    format!(
                        "invalid header line: {:?}",
                        String::from_utf8_lossy(line).trim_end()
                    )
                })?;
            current = Some((name, line_end - value.len()));
        }

        pos = line_end;
    }

    if let Some((name, value_start)) = current.take() {
        headers.push(Header {
            name,
            raw_value: &data[value_start..],
        });
    }

    Ok((HeaderBlock { headers }, None))
}

// RFC 5322 2.2 "field-name", then the colon. RFC 5322 4.5.2 allows
// whitespace before the colon.
fn field_name(i: &[u8]) -> IResult<&[u8], &[u8]> {
    terminated(
        take_while1(|b: u8| b > b' ' && b < 0x7F && b':' != b),
        pair(opt(is_a(" \t")), char(':')),
    )(i)
}

// RFC 2045 5.1 "token"
fn is_token_char(b: u8) -> bool {
    b > b' '
        && b < 0x7F
        && !matches!(
            b,
            b'(' | b')'
                | b'<'
                | b'>'
                | b'@'
                | b','
                | b';'
                | b':'
                | b'\\'
                | b'"'
                | b'/'
                | b'['
                | b']'
                | b'?'
                | b'='
        )
}

// RFC 5322 3.2.1 "quoted-pair", 8-bit clean
fn quoted_pair(i: &[u8]) -> IResult<&[u8], &[u8]> {
    preceded(char('\\'), take(1usize))(i)
}

// RFC 5322 3.2.2 "Folding white space". Line endings are left in header
// values, so they count as plain whitespace here.
fn fws(i: &[u8]) -> IResult<&[u8], &[u8]> {
    map(is_a(" \t\r\n"), |_| &b" "[..])(i)
}

// RFC 5322 3.2.2 "ctext", extended to 8-bit by RFC 6532
fn ctext(i: &[u8]) -> IResult<&[u8], &[u8]> {
    is_not("()\\ \t\r\n")(i)
}

// RFC 5322 3.2.2 "comment". Comments nest; the nesting is tracked with a
// counter instead of recursing.
fn comment(i: &[u8]) -> IResult<&[u8], ()> {
    if Some(&b'(') != i.first() {
        return Err(nom::Err::Error(error_position!(i, ErrorKind::Char)));
    }

    let mut rest = &i[1..];
    let mut depth = 1usize;
    while depth > 0 {
        if let Ok((r, _)) = alt((ctext, quoted_pair, fws))(rest) {
            rest = r;
            continue;
        }

        match rest.first() {
            Some(b'(') => depth += 1,
            Some(b')') => depth -= 1,
            _ => {
                return Err(nom::Err::Error(error_position!(
                    rest,
                    ErrorKind::Char
                )))
            },
        }
        rest = &rest[1..];
    }

    Ok((rest, ()))
}

// RFC 5322 3.2.2 "CFWS", though it may also match nothing
fn cfws(i: &[u8]) -> IResult<&[u8], ()> {
    map(many0_count(alt((map(fws, |_| ()), comment))), |_| ())(i)
}

fn token(i: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(is_token_char)(i)
}

// RFC 5322 3.2.4 "qtext", extended to 8-bit by RFC 6532
fn qtext(i: &[u8]) -> IResult<&[u8], &[u8]> {
    is_not(" \t\r\n\\\"")(i)
}

fn qcontent(i: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((qtext, quoted_pair, fws))(i)
}

// RFC 5322 3.2.4 "quoted-string". A missing closing quote is tolerated.
fn quoted_string(i: &[u8]) -> IResult<&[u8], Cow<[u8]>> {
    map(
        delimited(
            pair(cfws, char('"')),
            many0(qcontent),
            pair(opt(char('"')), cfws),
        ),
        join_parts,
    )(i)
}

fn join_parts(parts: Vec<&[u8]>) -> Cow<[u8]> {
    match parts.len() {
        0 => Cow::Borrowed(&[] as &[u8]),
        1 => Cow::Borrowed(parts[0]),
        _ => Cow::Owned(parts.concat()),
    }
}

// A parameter value which should be a token, but in practice is anything up
// to the next `;` or whitespace.
fn bare_value(i: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(|b: u8| b > b' ' && 0x7F != b && b';' != b && b'"' != b)(i)
}

fn parameter_value(i: &[u8]) -> IResult<&[u8], Cow<[u8]>> {
    delimited(
        cfws,
        alt((quoted_string, map(bare_value, Cow::Borrowed))),
        cfws,
    )(i)
}

// RFC 2045 5.1 "parameter"
fn parameter(i: &[u8]) -> IResult<&[u8], (&[u8], Cow<[u8]>)> {
    map(
        tuple((cfws, token, cfws, char('='), parameter_value)),
        |(_, name, _, _, value)| (name, value),
    )(i)
}

fn parameter_separators(i: &[u8]) -> IResult<&[u8], usize> {
    many0_count(alt((map(char(';'), |_| ()), map(fws, |_| ()), comment)))(i)
}

// RFC 2045 5.1 "type "/" subtype"
fn media_type(i: &[u8]) -> IResult<&[u8], (&[u8], &[u8])> {
    map(
        tuple((cfws, token, cfws, char('/'), cfws, token, cfws)),
        |(_, typ, _, _, _, subtype, _)| (typ, subtype),
    )(i)
}

// RFC 2183 2 "disposition-type"
fn disposition_type(i: &[u8]) -> IResult<&[u8], &[u8]> {
    delimited(cfws, token, cfws)(i)
}

/// A parsed `Content-Type`.
///
/// The type and subtype are always lower case, as are parameter names.
/// Parameter values are as given (after unquoting and RFC 2231 decoding).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentType {
    pub typ: String,
    pub subtype: String,
    pub parms: Vec<(String, String)>,
}

impl ContentType {
    pub fn new(typ: &str, subtype: &str) -> Self {
        ContentType {
            typ: typ.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
            parms: vec![],
        }
    }

    /// The `type/subtype` pair, or the empty string for the empty
    /// `ContentType` used when nothing could be parsed.
    pub fn media_type(&self) -> String {
        if self.typ.is_empty() {
            String::new()
        } else {
            format!("{}/{}", self.typ, self.subtype)
        }
    }

    pub fn is_type(&self, typ: &str) -> bool {
        self.typ.eq_ignore_ascii_case(typ)
    }

    pub fn is_subtype(&self, subtype: &str) -> bool {
        self.subtype.eq_ignore_ascii_case(subtype)
    }

    pub fn parm(&self, name: &str) -> Option<&str> {
        find_parm(&self.parms, name)
    }
}

/// A parsed `Content-Disposition`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentDisposition {
    /// The disposition type, lower case (`inline`, `attachment`, ...).
    pub disposition: String,
    pub parms: Vec<(String, String)>,
}

impl ContentDisposition {
    pub fn parm(&self, name: &str) -> Option<&str> {
        find_parm(&self.parms, name)
    }
}

fn find_parm<'a>(parms: &'a [(String, String)], name: &str) -> Option<&'a str> {
    parms
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Parse a `Content-Type` header value.
///
/// The media type itself must be well-formed; parameters are parsed on a
/// best-effort basis, with unparsable ones skipped and the first of any
/// duplicates winning.
pub fn parse_content_type(value: &str) -> Result<ContentType, Error> {
    if value.trim().is_empty() {
        return Err(Error::MediaType("no media type".to_owned()));
    }

    let (rest, (typ, subtype)) = media_type(value.as_bytes())
        .ok()
        .filter(|&(rest, _)| at_parameters(rest))
        .ok_or_else(|| {
            Error::MediaType(format!("invalid media type {:?}", value.trim()))
        })?;

    let mut ct = ContentType::new(
        &String::from_utf8_lossy(typ),
        &String::from_utf8_lossy(subtype),
    );
    ct.parms = parameter_list(rest);
    Ok(ct)
}

/// Parse a `Content-Disposition` header value, with the same leniency as
/// `parse_content_type`.
pub fn parse_content_disposition(
    value: &str,
) -> Result<ContentDisposition, Error> {
    let (rest, disposition) = disposition_type(value.as_bytes())
        .ok()
        .filter(|&(rest, _)| at_parameters(rest))
        .ok_or_else(|| {
            Error::MediaType(format!("invalid disposition {:?}", value.trim()))
        })?;

    Ok(ContentDisposition {
        disposition: String::from_utf8_lossy(disposition).to_ascii_lowercase(),
        parms: parameter_list(rest),
    })
}

fn at_parameters(rest: &[u8]) -> bool {
    rest.first().map_or(true, |&b| b';' == b)
}

/// Parse `;`-separated `name=value` pairs. Names are lower-cased; values may
/// be tokens or quoted strings. Anything unparsable up to the next `;` is
/// skipped.
fn parameter_list(mut i: &[u8]) -> Vec<(String, String)> {
    let mut parms = Vec::new();

    loop {
        if let Ok((rest, _)) = parameter_separators(i) {
            i = rest;
        }
        if i.is_empty() {
            break;
        }

        if let Ok((rest, (name, value))) = parameter(i) {
            parms.push((
                String::from_utf8_lossy(name).to_ascii_lowercase(),
                String::from_utf8_lossy(&value).into_owned(),
            ));
            i = rest;
        }

        // Drop whatever is left before the next parameter
        i = match memchr::memchr(b';', i) {
            Some(semi) => &i[semi..],
            None => &[],
        };
    }

    assemble_parameters(parms)
}

/// Apply RFC 2231: `name*` values are charset/percent-encoded, and
/// `name*0`, `name*1*`, ... are continuations to be joined. An extended value
/// takes precedence over a plain parameter of the same name.
fn assemble_parameters(raw: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut plain: Vec<(String, String)> = Vec::new();
    let mut extended: BTreeMap<String, Vec<(u32, bool, String)>> =
        BTreeMap::new();

    for (name, value) in raw {
        if let Some(star) = name.find('*') {
            let (base, suffix) = (&name[..star], &name[star + 1..]);
            let (number, encoded) = if suffix.is_empty() {
                (Some(0), true)
            } else if let Some(number) = suffix.strip_suffix('*') {
                (number.parse::<u32>().ok(), true)
            } else {
                (suffix.parse::<u32>().ok(), false)
            };

            if let Some(number) = number {
                extended
                    .entry(base.to_owned())
                    .or_default()
                    .push((number, encoded, value));
            }
        } else if find_parm(&plain, &name).is_none() {
            plain.push((name, value));
        }
    }

    for (name, mut segments) in extended {
        segments.sort_by_key(|&(number, _, _)| number);

        let mut charset = None;
        let mut bytes = Vec::new();
        for (ix, (number, encoded, value)) in segments.iter().enumerate() {
            // Stop at the first gap or duplicate
            if *number as usize != ix {
                break;
            }

            if !*encoded {
                bytes.extend_from_slice(value.as_bytes());
                continue;
            }

            let mut value = value.as_str();
            if 0 == ix {
                let mut split = value.splitn(3, '\'');
                if let (Some(cs), Some(_lang), Some(rest)) =
                    (split.next(), split.next(), split.next())
                {
                    charset = Some(cs);
                    value = rest;
                }
            }
            bytes.extend(percent_decode(value.as_bytes()).iter());
        }

        let decoded = decode_charset(charset, &bytes);
        match plain.iter_mut().find(|existing| existing.0 == name) {
            Some(existing) => existing.1 = decoded,
            None => plain.push((name, decoded)),
        }
    }

    plain
}

fn percent_decode(s: &[u8]) -> Cow<[u8]> {
    if memchr::memchr(b'%', s).is_none() {
        return Cow::Borrowed(s);
    }

    let mut out = Vec::with_capacity(s.len());
    let mut ix = 0;
    while ix < s.len() {
        let decoded = if b'%' == s[ix] {
            s.get(ix + 1..ix + 3).and_then(|h| hex_pair(h[0], h[1]))
        } else {
            None
        };

        match decoded {
            Some(byte) => {
                out.push(byte);
                ix += 3;
            },
            None => {
                out.push(s[ix]);
                ix += 1;
            },
        }
    }
    Cow::Owned(out)
}

fn decode_charset(charset: Option<&str>, bytes: &[u8]) -> String {
    charset
        .filter(|cs| !cs.is_empty())
        .and_then(|cs| Encoding::for_label_no_replacement(cs.as_bytes()))
        .unwrap_or(encoding_rs::UTF_8)
        .decode_without_bom_handling(bytes)
        .0
        .into_owned()
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn split_simple_message() {
        let (headers, body) = split_message(
            b"From: foo@example.com\r\n\
              Subject: hello\r\n\
              \r\n\
              body\r\n",
        )
        .unwrap();
        assert_eq!(2, headers.len());
        assert_eq!(Some("foo@example.com".to_owned()), headers.get("from"));
        assert_eq!(Some("hello".to_owned()), headers.get("SUBJECT"));
        assert_eq!(None, headers.get("To"));
        assert_eq!(b"body\r\n", body);
    }

    #[test]
    fn split_unfolds_continuations() {
        let (headers, body) = split_message(
            b"Subject: a very\n \
              long\n\
              \tsubject   \n\
              X-Empty:\n\
              \n",
        )
        .unwrap();
        assert_eq!(
            Some("a very long subject".to_owned()),
            headers.get("Subject")
        );
        assert_eq!(Some(String::new()), headers.get("X-Empty"));
        assert!(body.is_empty());
    }

    #[test]
    fn split_skips_mbox_separator() {
        let (headers, body) = split_message(
            b"From me@company.com  Tue Nov 14 21:49:33 2023\n\
              From: me@company.com\n\
              \n\
              hi",
        )
        .unwrap();
        assert_eq!(Some("me@company.com".to_owned()), headers.get("From"));
        assert_eq!(b"hi", body);
    }

    #[test]
    fn split_first_occurrence_wins() {
        let (headers, _) =
            split_message(b"To: first\r\nTo: second\r\n\r\n").unwrap();
        assert_eq!(Some("first".to_owned()), headers.get("to"));
        assert_eq!(2, headers.iter().count());
    }

    #[test]
    fn split_headers_without_body() {
        let (headers, body) = split_message(b"Subject: x").unwrap();
        assert_eq!(Some("x".to_owned()), headers.get("subject"));
        assert!(body.is_empty());
    }

    #[test]
    fn split_rejects_non_messages() {
        assert_matches!(
            Err(Error::Envelope(..)),
            split_message(b"some string that does not represent raw email")
        );
        assert_matches!(Err(Error::Envelope(..)), split_message(b""));
        assert_matches!(
            Err(Error::Envelope(..)),
            split_message(b"  leading: continuation\r\n\r\n")
        );
        assert_matches!(
            Err(Error::Envelope(..)),
            split_message(b"Bad Name: x\r\n\r\n")
        );
        assert_matches!(
            Err(Error::Envelope(..)),
            split_message(b": no name\r\n\r\n")
        );
    }

    #[test]
    fn parse_simple_content_type() {
        let ct = parse_content_type(
            "Multipart/Alternative; boundary=\"000000000000f79b3c060a23c2fc\"",
        )
        .unwrap();
        assert_eq!("multipart", ct.typ);
        assert_eq!("alternative", ct.subtype);
        assert_eq!("multipart/alternative", ct.media_type());
        assert!(ct.is_type("MULTIPART"));
        assert_eq!(Some("000000000000f79b3c060a23c2fc"), ct.parm("Boundary"));
    }

    #[test]
    fn parse_content_type_parameters() {
        let ct = parse_content_type(
            "text/plain ; charset=UTF-8;format = flowed; \
             name=\"quoted \\\"name\\\".txt\";;",
        )
        .unwrap();
        assert_eq!("text/plain", ct.media_type());
        assert_eq!(Some("UTF-8"), ct.parm("charset"));
        assert_eq!(Some("flowed"), ct.parm("format"));
        assert_eq!(Some("quoted \"name\".txt"), ct.parm("name"));
    }

    #[test]
    fn parse_content_type_skips_bad_parameters() {
        let ct = parse_content_type(
            "multipart/mixed; garbage; boundary=abc; boundary=def",
        )
        .unwrap();
        assert_eq!(Some("abc"), ct.parm("boundary"));
        assert_eq!(1, ct.parms.len());
    }

    #[test]
    fn parse_content_type_rejects_bad_types() {
        assert_matches!(Err(Error::MediaType(..)), parse_content_type(""));
        assert_matches!(Err(Error::MediaType(..)), parse_content_type("text"));
        assert_matches!(
            Err(Error::MediaType(..)),
            parse_content_type("text/; charset=utf-8")
        );
        assert_matches!(
            Err(Error::MediaType(..)),
            parse_content_type("te xt/plain")
        );
    }

    #[test]
    fn parse_rfc2231_parameters() {
        let cd = parse_content_disposition(
            "attachment; filename=\"fallback.txt\"; \
             filename*=UTF-8''%E2%82%AC%20rates.txt",
        )
        .unwrap();
        assert_eq!("attachment", cd.disposition);
        assert_eq!(Some("€ rates.txt"), cd.parm("filename"));

        let cd = parse_content_disposition(
            "Attachment; filename*1*=%20two; \
             filename*0*=iso-8859-1'en'part%E9; filename*2=\" three\"",
        )
        .unwrap();
        assert_eq!("attachment", cd.disposition);
        assert_eq!(Some("parté two three"), cd.parm("filename"));
    }

    #[test]
    fn parse_content_type_comments() {
        let ct = parse_content_type(
            "multipart/mixed (comment); boundary=b (another (nested) one)",
        )
        .unwrap();
        assert_eq!("multipart/mixed", ct.media_type());
        assert_eq!(Some("b"), ct.parm("boundary"));

        let ct = parse_content_type(
            "(leading) text (x) / (y) plain; charset=(why) \"utf-8\"",
        )
        .unwrap();
        assert_eq!("text/plain", ct.media_type());
        assert_eq!(Some("utf-8"), ct.parm("charset"));

        let ct = parse_content_type("text/plain; (unterminated; x=y").unwrap();
        assert_eq!("text/plain", ct.media_type());
        assert_eq!(Some("y"), ct.parm("x"));

        assert_matches!(
            Err(Error::MediaType(..)),
            parse_content_type("text/plain (unterminated")
        );
    }

    #[test]
    fn parse_lenient_parameter_values() {
        let ct = parse_content_type(
            "text/plain; charset=us-ascii (Plain Text); name=\"open.txt",
        )
        .unwrap();
        assert_eq!(Some("us-ascii"), ct.parm("charset"));
        assert_eq!(Some("open.txt"), ct.parm("name"));

        let ct = parse_content_type("text/plain; name=a(1).txt").unwrap();
        assert_eq!(Some("a(1).txt"), ct.parm("name"));
    }

    #[test]
    fn percent_escapes_need_two_hex_digits() {
        assert_eq!(&b"a%+1b"[..], &*percent_decode(b"a%+1b"));
        assert_eq!(&b"%4"[..], &*percent_decode(b"%4"));
        assert_eq!(&b"x y%"[..], &*percent_decode(b"x%20y%"));

        let cd = parse_content_disposition(
            "attachment; filename*=UTF-8''100%+1%25.txt",
        )
        .unwrap();
        assert_eq!(Some("100%+1%.txt"), cd.parm("filename"));
    }

    #[test]
    fn parse_disposition_rejects_garbage() {
        assert_matches!(
            Err(Error::MediaType(..)),
            parse_content_disposition("; filename=foo")
        );
        assert_matches!(
            Err(Error::MediaType(..)),
            parse_content_disposition("attachment filename=foo")
        );
    }

    proptest! {
        #[test]
        fn parse_content_type_never_panics(
            s in r#"([()\\";=/ \t\r\n]|\PC){0,64}"#
        ) {
            let _ = parse_content_type(&s);
            let _ = parse_content_disposition(&s);
        }

        #[test]
        fn read_header_block_never_panics(
            s in prop::collection::vec(prop::num::u8::ANY, 0..200)
        ) {
            let _ = read_header_block(&s);
        }
    }
}
