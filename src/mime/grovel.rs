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

use log::debug;

use super::content_encoding::decode_transfer;
use super::filename::resolve_filename;
use super::header::{parse_content_type, ContentType, HeaderBlock};
use super::model::{Attachment, Email};
use super::multipart::{Part, PartReader};
use crate::support::error::Error;
use crate::support::parser_config::ParserConfig;

/// Walks the part tree of a multipart body, filling in the body and
/// attachment fields of an `Email`.
///
/// Each leaf part is decoded once. The first `text/plain` and first
/// `text/html` leaves become `body_text` and `body_html`; every leaf,
/// including those two, is appended to `attachments` in depth-first order.
///
/// Nothing here fails outright. Problems are recorded on the `Email` and
/// the walk carries on with whatever is left.
#[derive(Debug)]
pub struct Groveller<'c> {
    config: &'c ParserConfig,
    email: Email,
    seen_text: bool,
    seen_html: bool,
    part_count: u32,
    /// Set once `max_parts` has been hit; nothing more is looked at.
    exhausted: bool,
}

impl<'c> Groveller<'c> {
    pub fn new(config: &'c ParserConfig, email: Email) -> Self {
        Groveller {
            config,
            email,
            seen_text: false,
            seen_html: false,
            part_count: 0,
            exhausted: false,
        }
    }

    /// Decode the multipart `body` delimited by `boundary`.
    ///
    /// `depth` is 1 for the message body itself. `digest` indicates the body
    /// is `multipart/digest`, which changes the default part type.
    ///
    /// An unusable boundary makes this a silent no-op. A read error stops the
    /// walk at this level only.
    pub fn grovel(
        &mut self,
        body: &[u8],
        boundary: &str,
        depth: u32,
        digest: bool,
    ) {
        if self.exhausted {
            return;
        }

        if depth > self.config.max_depth {
            self.email.record(Error::DepthExceeded(self.config.max_depth));
            return;
        }

        let mut reader = match PartReader::new(body, boundary) {
            Some(reader) => reader,
            None => {
                debug!("Ignoring multipart with boundary {:?}", boundary);
                return;
            },
        };

        debug!("Reading multipart {:?} at depth {}", boundary, depth);
        let mut position = 0;
        loop {
            match reader.next_part() {
                Ok(Some(part)) => {
                    if self.part_count >= self.config.max_parts {
                        self.email
                            .record(Error::TooManyParts(self.config.max_parts));
                        self.exhausted = true;
                        return;
                    }

                    self.part_count += 1;
                    self.part(part, boundary, position, depth, digest);
                    position += 1;

                    if self.exhausted {
                        return;
                    }
                },
                Ok(None) => break,
                Err(e) => {
                    self.email.record(e);
                    break;
                },
            }
        }
    }

    fn part(
        &mut self,
        part: Part<'_>,
        boundary: &str,
        position: usize,
        depth: u32,
        digest: bool,
    ) {
        let ct = match part.headers.get("Content-Type") {
            None if digest => ContentType::new("message", "rfc822"),
            None => ContentType::new("text", "plain"),
            Some(value) => match parse_content_type(&value) {
                Ok(ct) => ct,
                Err(e) => {
                    self.email.record(e);
                    ContentType::default()
                },
            },
        };

        if ct.is_type("multipart") {
            self.grovel(
                part.body,
                ct.parm("boundary").unwrap_or(""),
                depth + 1,
                ct.is_subtype("digest"),
            );
        } else {
            let index = self.config.filename_index.for_position(position);
            let media_type = ct.media_type();
            self.leaf(&part.headers, part.body, &media_type, boundary, index);
        }
    }

    fn leaf(
        &mut self,
        headers: &HeaderBlock<'_>,
        body: &[u8],
        media_type: &str,
        radix: &str,
        index: usize,
    ) {
        let filename = resolve_filename(headers, media_type, radix, index);
        let cte = headers.get("Content-Transfer-Encoding");
        let data = match decode_transfer(body, cte.as_deref()) {
            Ok(data) => data.into_owned(),
            Err(e) => {
                debug!("Dropping part {:?}", filename);
                self.email.record(e);
                return;
            },
        };

        debug!(
            "Leaf part {:?} ({}, {} bytes)",
            filename,
            media_type,
            data.len()
        );

        match media_type {
            "text/plain" if !self.seen_text => {
                self.seen_text = true;
                self.email.body_text = body_string(&data);
            },
            "text/html" if !self.seen_html => {
                self.seen_html = true;
                self.email.body_html = body_string(&data);
            },
            _ => (),
        }

        self.email.attachments.push(Attachment {
            mimetype: media_type.to_owned(),
            filename,
            data,
        });
    }

    pub fn into_email(self) -> Email {
        self.email
    }
}

/// The text of a body part, without the line ending(s) that conventionally
/// close it.
fn body_string(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .trim_end_matches(&['\r', '\n'][..])
        .to_owned()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::support::parser_config::FilenameIndex;

    fn grovel_with(
        config: &ParserConfig,
        body: &[u8],
        boundary: &str,
    ) -> Email {
        crate::init_test_log();
        let mut groveller = Groveller::new(config, Email::default());
        groveller.grovel(body, boundary, 1, false);
        groveller.into_email()
    }

    fn grovel(body: &[u8], boundary: &str) -> Email {
        grovel_with(&ParserConfig::default(), body, boundary)
    }

    #[test]
    fn leaf_parts_become_attachments_in_order() {
        let email = grovel(
            b"--b\r\n\
              Content-Type: text/plain\r\n\
              \r\n\
              first\r\n\
              --b\r\n\
              Content-Type: text/plain; charset=utf-8\r\n\
              \r\n\
              second\r\n\
              --b\r\n\
              Content-Type: application/pdf\r\n\
              Content-Disposition: attachment; filename=\"doc.pdf\"\r\n\
              Content-Transfer-Encoding: base64\r\n\
              \r\n\
              JVBERi0=\r\n\
              --b--\r\n",
            "b",
        );

        assert!(email.errors.is_empty());
        assert_eq!("first", email.body_text);
        assert_eq!("", email.body_html);
        assert_eq!(3, email.attachments.len());
        assert_eq!("text/plain", email.attachments[0].mimetype);
        assert_eq!("b-1.txt", email.attachments[0].filename);
        assert_eq!(b"first", &email.attachments[0].data[..]);
        assert_eq!(b"second", &email.attachments[1].data[..]);
        assert_eq!("application/pdf", email.attachments[2].mimetype);
        assert_eq!("doc.pdf", email.attachments[2].filename);
        assert_eq!(b"%PDF-", &email.attachments[2].data[..]);
    }

    #[test]
    fn nested_multiparts_are_walked_depth_first() {
        let email = grovel(
            b"--outer\r\n\
              Content-Type: multipart/alternative; boundary=inner\r\n\
              \r\n\
              --inner\r\n\
              Content-Type: text/plain\r\n\
              \r\n\
              plain\r\n\
              --inner\r\n\
              Content-Type: text/html\r\n\
              \r\n\
              <p>html</p>\r\n\
              --inner--\r\n\
              \r\n\
              --outer\r\n\
              Content-Type: image/png\r\n\
              \r\n\
              PNG\r\n\
              --outer--\r\n",
            "outer",
        );

        assert!(email.errors.is_empty());
        assert_eq!("plain", email.body_text);
        assert_eq!("<p>html</p>", email.body_html);
        let names = email
            .attachments
            .iter()
            .map(|a| a.filename.as_str())
            .collect::<Vec<_>>();
        assert_eq!(vec!["inner-1.txt", "inner-1.htm", "outer-1.png"], names);
    }

    #[test]
    fn sequential_filename_index() {
        let config = ParserConfig {
            filename_index: FilenameIndex::Sequential,
            ..ParserConfig::default()
        };
        let email = grovel_with(
            &config,
            b"--b\r\n\
              Content-Type: application/octet-stream\r\n\
              \r\n\
              x\r\n\
              --b\r\n\
              Content-Type: application/octet-stream\r\n\
              \r\n\
              y\r\n\
              --b--\r\n",
            "b",
        );
        assert_eq!("b-1.bin", email.attachments[0].filename);
        assert_eq!("b-2.bin", email.attachments[1].filename);

        let email = grovel(
            b"--b\r\n\
              Content-Type: application/octet-stream\r\n\
              \r\n\
              x\r\n\
              --b\r\n\
              Content-Type: application/octet-stream\r\n\
              \r\n\
              y\r\n\
              --b--\r\n",
            "b",
        );
        assert_eq!("b-1.bin", email.attachments[0].filename);
        assert_eq!("b-1.bin", email.attachments[1].filename);
    }

    #[test]
    fn bad_transfer_encoding_drops_only_that_part() {
        let email = grovel(
            b"--b\r\n\
              Content-Type: image/gif\r\n\
              Content-Transfer-Encoding: base64\r\n\
              \r\n\
              !!!not base64!!!\r\n\
              --b\r\n\
              Content-Type: text/plain\r\n\
              Content-Transfer-Encoding: quoted-printable\r\n\
              \r\n\
              caf=C3=A9 au=\r\n\
              =20lait\r\n\
              --b--\r\n",
            "b",
        );

        assert_eq!(1, email.attachments.len());
        assert_eq!("café au lait", email.body_text);
        assert_matches!(
            Some(&Error::TransferDecode {
                encoding: "base64",
                ..
            }),
            email.error()
        );
    }

    #[test]
    fn missing_content_type_defaults() {
        let email = grovel(
            b"--b\r\n\
              \r\n\
              implicit text\r\n\
              --b\r\n\
              Content-Type: multipart/digest; boundary=d\r\n\
              \r\n\
              --d\r\n\
              \r\n\
              From: someone@example.com\r\n\
              \r\n\
              digest entry\r\n\
              --d--\r\n\
              --b--\r\n",
            "b",
        );

        assert!(email.errors.is_empty());
        assert_eq!("implicit text", email.body_text);
        assert_eq!(2, email.attachments.len());
        assert_eq!("message/rfc822", email.attachments[1].mimetype);
        assert_eq!("d-1.eml", email.attachments[1].filename);
    }

    #[test]
    fn malformed_part_content_type() {
        let email = grovel(
            b"--b\r\n\
              Content-Type: garbage\r\n\
              \r\n\
              data\r\n\
              --b--\r\n",
            "b",
        );

        assert_matches!(Some(&Error::MediaType(..)), email.error());
        assert_eq!(1, email.attachments.len());
        assert_eq!("", email.attachments[0].mimetype);
        assert_eq!("b-1", email.attachments[0].filename);
        assert_eq!("", email.body_text);
    }

    #[test]
    fn read_error_keeps_earlier_parts() {
        let email = grovel(
            b"--b\r\n\
              Content-Type: text/plain\r\n\
              \r\n\
              kept\r\n\
              --b\r\n\
              Content-Type: text/html\r\n\
              \r\n\
              <p>cut off",
            "b",
        );

        assert_eq!("kept", email.body_text);
        assert_eq!("", email.body_html);
        assert_eq!(1, email.attachments.len());
        assert_matches!(Some(&Error::PartRead(..)), email.error());
    }

    #[test]
    fn unusable_boundary_is_silent() {
        let email = grovel(b"--\r\n\r\nx\r\n----\r\n", "");
        assert!(email.errors.is_empty());
        assert!(email.attachments.is_empty());
    }

    #[test]
    fn depth_is_capped() {
        let mut body = Vec::new();
        for level in 0..10 {
            body.extend_from_slice(
                format!(
                    "--b{}\r\n\
                     Content-Type: multipart/mixed; boundary=b{}\r\n\r\n",
                    level,
                    level + 1
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(b"--b10\r\n\r\ndeep\r\n--b10--\r\n");
        for level in (0..10).rev() {
            body.extend_from_slice(format!("--b{}--\r\n", level).as_bytes());
        }

        let email = grovel(&body, "b0");
        assert!(email.errors.is_empty());
        assert_eq!("deep", email.body_text);

        let config = ParserConfig {
            max_depth: 5,
            ..ParserConfig::default()
        };
        let email = grovel_with(&config, &body, "b0");
        assert_eq!(vec![Error::DepthExceeded(5)], email.errors);
        assert!(email.attachments.is_empty());
    }

    #[test]
    fn part_count_is_capped() {
        let mut body = Vec::new();
        for _ in 0..10 {
            body.extend_from_slice(b"--b\r\n\r\npart\r\n");
        }
        body.extend_from_slice(b"--b--\r\n");

        let config = ParserConfig {
            max_parts: 4,
            ..ParserConfig::default()
        };
        let email = grovel_with(&config, &body, "b");
        assert_eq!(4, email.attachments.len());
        assert_eq!(vec![Error::TooManyParts(4)], email.errors);
    }
}
