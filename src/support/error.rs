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

use thiserror::Error;

/// Everything that can go wrong while taking a message apart.
///
/// Only `Envelope` stops a parse outright. Every other variant is recorded on
/// the `Email` being built and decoding carries on with whatever structure is
/// still recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("malformed message header: {0}")]
    Envelope(String),
    #[error("malformed Content-Type: {0}")]
    MediaType(String),
    #[error("not a multipart MIME message")]
    NotMultipart,
    #[error("multipart: {0}")]
    PartRead(String),
    #[error("bad {encoding} content: {message}")]
    TransferDecode {
        encoding: &'static str,
        message: String,
    },
    #[error("multipart nesting deeper than {0} levels")]
    DepthExceeded(u32),
    #[error("more than {0} MIME parts")]
    TooManyParts(u32),
    #[error("undecodable header {name}: {message}")]
    HeaderDecode { name: String, message: String },
    #[error("bad configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
