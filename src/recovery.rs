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
use crate::mime::model::Email;

/// Derive a plain-text body from HTML.
///
/// Some agents send nothing but an HTML part, or put the body in an HTML
/// attachment. If `email` has an HTML body, `body_text` is regenerated from
/// it (replacing whatever was there) and `None` is returned. Otherwise, if
/// some attachment is exactly `text/html`, the first such becomes both
/// `body_html` and the source of `body_text`, and its index is returned so
/// the caller can discard it. Otherwise `email` is returned unchanged.
pub fn recover_body(email: Email) -> (Email, Option<usize>) {
    recover_body_with(&HtmlExtractor::default(), email)
}

pub(crate) fn recover_body_with(
    extractor: &HtmlExtractor,
    mut email: Email,
) -> (Email, Option<usize>) {
    if !email.body_html.is_empty() {
        email.body_text = extractor.extract(&email.body_html);
        return (email, None);
    }

    let found = email
        .attachments
        .iter()
        .position(|a| "text/html" == a.mimetype);
    if let Some(ix) = found {
        debug!("Recovering body from attachment {}", ix);
        let html = String::from_utf8_lossy(&email.attachments[ix].data)
            .into_owned();
        email.body_text = extractor.extract(&html);
        email.body_html = html;
    }

    (email, found)
}
