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

use crate::html::HtmlExtractor;
use crate::mime::encoded_word::decode_unstructured;
use crate::mime::grovel::Groveller;
use crate::mime::header::{
    parse_content_type, split_message, ContentType, HeaderBlock,
};
use crate::mime::model::Email;
use crate::recovery;
use crate::support::error::Error;
use crate::support::parser_config::ParserConfig;

/// Turns raw messages into `Email`s.
///
/// A `Parser` holds no state between messages; every call to `parse()`
/// produces a fresh `Email`.
#[derive(Clone, Debug, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Parser { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one complete message.
    ///
    /// This always produces an `Email`. If the header block cannot be read at
    /// all, the result is empty apart from an `Envelope` error. Otherwise as
    /// much as possible is extracted and any problems are listed in
    /// `Email::errors`.
    pub fn parse(&self, raw: &[u8]) -> Email {
        let mut email = Email::default();
        let (headers, body) = match split_message(raw) {
            Ok(split) => split,
            Err(e) => {
                email.record(e);
                return email;
            },
        };

        email.from = decoded_header(&mut email, &headers, "From");
        email.to = decoded_header(&mut email, &headers, "To");
        email.cc = decoded_header(&mut email, &headers, "Cc");
        email.bcc = decoded_header(&mut email, &headers, "Bcc");
        email.subject = decoded_header(&mut email, &headers, "Subject");
        email.original_to =
            decoded_header(&mut email, &headers, "X-Forwarded-To");
        if email.original_to.is_empty() {
            email.original_to =
                decoded_header(&mut email, &headers, "X-Original-To");
        }
        email.date = headers.get("Date").unwrap_or_default();
        email.content_type = headers.get("Content-Type").unwrap_or_default();

        let ct = match parse_content_type(&email.content_type) {
            Ok(ct) => ct,
            Err(e) => {
                email.record(e);
                ContentType::default()
            },
        };

        if !ct.is_type("multipart") {
            email.record(Error::NotMultipart);
        }

        // Even a message that isn't multipart gets a go with whatever boundary
        // it declares.
        let boundary = ct.parm("boundary").unwrap_or("");
        debug!(
            "Top-level {:?} with boundary {:?}",
            ct.media_type(),
            boundary
        );

        let mut groveller = Groveller::new(&self.config, email);
        groveller.grovel(
            body,
            boundary,
            1,
            ct.is_type("multipart") && ct.is_subtype("digest"),
        );
        groveller.into_email()
    }

    /// Fill in `body_text` from the HTML body or the first HTML attachment,
    /// using this parser's HTML depth limit. See `crate::recover_body`.
    pub fn recover_body(&self, email: Email) -> (Email, Option<usize>) {
        recovery::recover_body_with(
            &HtmlExtractor::new(self.config.max_html_depth),
            email,
        )
    }
}

/// Parse one complete message with the default configuration.
pub fn parse(raw: &[u8]) -> Email {
    Parser::default().parse(raw)
}

fn decoded_header(
    email: &mut Email,
    headers: &HeaderBlock<'_>,
    name: &str,
) -> String {
    let raw = match headers.get(name) {
        Some(raw) => raw,
        None => return String::new(),
    };

    let (decoded, failure) = decode_unstructured(&raw);
    if let Some(message) = failure {
        email.record(Error::HeaderDecode {
            name: name.to_owned(),
            message,
        });
    }
    decoded.into_owned()
}
