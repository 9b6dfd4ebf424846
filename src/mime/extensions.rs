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

use std::collections::HashMap;

use lazy_static::lazy_static;

// The first extension of each entry is the preferred one. Where a type has
// several, they are listed in lexical order, which is also what most
// `mime.types`-driven lookups end up producing.
static REGISTERED: &[(&str, &[&str])] = &[
    ("application/gzip", &[".gz"]),
    ("application/javascript", &[".js"]),
    ("application/json", &[".json"]),
    ("application/msword", &[".doc"]),
    ("application/octet-stream", &[".bin"]),
    ("application/pdf", &[".pdf"]),
    ("application/pgp-encrypted", &[".pgp"]),
    ("application/pgp-signature", &[".asc", ".sig"]),
    ("application/pkcs7-mime", &[".p7m"]),
    ("application/pkcs7-signature", &[".p7s"]),
    ("application/rtf", &[".rtf"]),
    ("application/vnd.ms-excel", &[".xls"]),
    ("application/vnd.ms-powerpoint", &[".ppt"]),
    (
        "application/vnd.oasis.opendocument.spreadsheet",
        &[".ods"],
    ),
    ("application/vnd.oasis.opendocument.text", &[".odt"]),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        &[".pptx"],
    ),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &[".xlsx"],
    ),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        &[".docx"],
    ),
    ("application/wasm", &[".wasm"]),
    ("application/x-7z-compressed", &[".7z"]),
    ("application/x-tar", &[".tar"]),
    ("application/xml", &[".xml"]),
    ("application/zip", &[".zip"]),
    ("audio/mpeg", &[".mp3"]),
    ("audio/ogg", &[".oga", ".ogg"]),
    ("audio/wav", &[".wav"]),
    ("image/avif", &[".avif"]),
    ("image/bmp", &[".bmp"]),
    ("image/gif", &[".gif"]),
    ("image/jpeg", &[".jpeg", ".jpg"]),
    ("image/png", &[".png"]),
    ("image/svg+xml", &[".svg"]),
    ("image/tiff", &[".tif", ".tiff"]),
    ("image/webp", &[".webp"]),
    ("image/x-icon", &[".ico"]),
    ("message/rfc822", &[".eml"]),
    ("text/calendar", &[".ics"]),
    ("text/css", &[".css"]),
    ("text/csv", &[".csv"]),
    ("text/html", &[".htm", ".html"]),
    ("text/javascript", &[".js", ".mjs"]),
    ("text/markdown", &[".md"]),
    ("text/plain", &[".txt"]),
    ("text/vcard", &[".vcf"]),
    ("text/x-vcard", &[".vcf"]),
    ("text/xml", &[".xml"]),
    ("video/mp4", &[".mp4"]),
    ("video/mpeg", &[".mpeg"]),
    ("video/webm", &[".webm"]),
];

lazy_static! {
    static ref BY_TYPE: HashMap<&'static str, &'static [&'static str]> =
        REGISTERED.iter().copied().collect();
}

/// The file extensions (including the leading `.`) registered for the given
/// lower-case `type/subtype`, preferred first.
pub fn extensions_by_type(media_type: &str) -> Option<&'static [&'static str]> {
    BY_TYPE.get(media_type).copied()
}

/// The preferred file extension for `media_type`, or `""` if it is not
/// registered.
pub fn preferred_extension(media_type: &str) -> &'static str {
    extensions_by_type(media_type)
        .and_then(|exts| exts.first())
        .copied()
        .unwrap_or("")
}
