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

//! Best-effort decoding of raw email into its bodies and attachments.
//!
//! ```
//! let raw = b"From: me@example.com\r\n\
//!             Content-Type: multipart/mixed; boundary=b\r\n\
//!             \r\n\
//!             --b\r\n\
//!             Content-Type: text/plain\r\n\
//!             \r\n\
//!             Hello\r\n\
//!             --b--\r\n";
//!
//! let email = mailsift::parse(raw);
//! assert_eq!("me@example.com", email.from);
//! assert_eq!("Hello", email.body_text);
//! assert!(email.error().is_none());
//! ```

#[cfg(test)]
macro_rules! assert_matches {
    ($expected:pat, $actual:expr) => {
        match $actual {
            $expected => (),
            unexpected => panic!(
                "Expected {} matches {}, got {:?}",
                stringify!($expected),
                stringify!($actual),
                unexpected
            ),
        }
    };
}

pub mod html;
pub mod mime;
pub mod parser;
pub mod recovery;
pub mod support;

#[cfg(test)]
mod test_data;

pub use crate::html::{html_to_text, html_to_text_tokenized, HtmlExtractor};
pub use crate::mime::content_encoding::decode_transfer;
pub use crate::mime::filename::resolve_filename;
pub use crate::mime::model::{Attachment, Email};
pub use crate::parser::{parse, Parser};
pub use crate::recovery::recover_body;
pub use crate::support::error::Error;
pub use crate::support::parser_config::{FilenameIndex, ParserConfig};

#[cfg(test)]
static INIT_TEST_LOG: std::sync::Once = std::sync::Once::new();

#[cfg(test)]
fn init_test_log() {
    INIT_TEST_LOG.call_once(|| {
        fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{} [{}][{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message,
                ))
            })
            .level(log::LevelFilter::Debug)
            .chain(std::io::stderr())
            .apply()
            .unwrap();
    })
}
