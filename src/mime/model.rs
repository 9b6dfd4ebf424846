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

use log::warn;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::support::error::Error;

/// The decoded form of one message.
///
/// A fresh `Email` is produced by every parse. Header fields are empty if the
/// header was absent. `body_text` and `body_html` come from the first
/// `text/plain` and `text/html` leaf parts respectively; those parts are
/// also present in `attachments`.
///
/// `errors` holds everything that went wrong, in the order it happened. An
/// `Email` with errors may still carry a good deal of useful content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Email {
    pub from: String,
    /// `X-Forwarded-To`, or failing that, `X-Original-To`.
    pub original_to: String,
    pub to: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    /// The raw `Date` header.
    pub date: String,
    /// The raw top-level `Content-Type` header.
    pub content_type: String,
    pub body_text: String,
    pub body_html: String,
    pub attachments: Vec<Attachment>,
    pub errors: Vec<Error>,
}

/// One decoded leaf part.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// The parsed `type/subtype` of the part, lower case. Empty if the part
    /// had an unparsable `Content-Type`.
    pub mimetype: String,
    pub filename: String,
    /// The payload with its transfer encoding removed.
    #[serde(serialize_with = "serialize_base64")]
    pub data: Vec<u8>,
}

impl Email {
    /// The most recently recorded error, if any.
    pub fn error(&self) -> Option<&Error> {
        self.errors.last()
    }

    pub(crate) fn record(&mut self, error: Error) {
        warn!("{}", error);
        self.errors.push(error);
    }
}

impl Serialize for Email {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Email", 13)?;
        s.serialize_field("from", &self.from)?;
        s.serialize_field("origto", &self.original_to)?;
        s.serialize_field("to", &self.to)?;
        s.serialize_field("cc", &self.cc)?;
        s.serialize_field("bcc", &self.bcc)?;
        s.serialize_field("subject", &self.subject)?;
        s.serialize_field("date", &self.date)?;
        s.serialize_field("contenttype", &self.content_type)?;
        s.serialize_field("bodytext", &self.body_text)?;
        s.serialize_field("bodyhtml", &self.body_html)?;
        s.serialize_field("attachments", &self.attachments)?;
        s.serialize_field("error", &self.error().map(ToString::to_string))?;
        s.serialize_field(
            "errors",
            &self
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
        )?;
        s.end()
    }
}

fn serialize_base64<S: Serializer>(
    data: &[u8],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64::encode(data))
}
