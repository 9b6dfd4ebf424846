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

use super::quoted_printable::qp_decode_strict;
use crate::support::error::Error;

/// The `Content-Transfer-Encoding` values we do something about.
///
/// Everything other than base64 and quoted-printable (7bit, 8bit, binary, an
/// absent header, or some token nobody has heard of) is an identity transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentTransferEncoding {
    Identity,
    Base64,
    QuotedPrintable,
}

impl Default for ContentTransferEncoding {
    fn default() -> Self {
        ContentTransferEncoding::Identity
    }
}

impl ContentTransferEncoding {
    /// Interpret a raw header value. Matching is case-insensitive and ignores
    /// surrounding whitespace.
    pub fn from_header(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("base64") {
            ContentTransferEncoding::Base64
        } else if value.eq_ignore_ascii_case("quoted-printable") {
            ContentTransferEncoding::QuotedPrintable
        } else {
            ContentTransferEncoding::Identity
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ContentTransferEncoding::Identity => "identity",
            ContentTransferEncoding::Base64 => "base64",
            ContentTransferEncoding::QuotedPrintable => "quoted-printable",
        }
    }

    /// Decode `data`, which is the complete raw content of one part.
    ///
    /// Decoding is exact; nothing is done about character sets. On failure
    /// the caller is expected to drop the part.
    pub fn decode(self, data: &[u8]) -> Result<Cow<[u8]>, Error> {
        match self {
            ContentTransferEncoding::Identity => Ok(Cow::Borrowed(data)),
            ContentTransferEncoding::Base64 => {
                decode_base64(data).map(Cow::Owned).map_err(|message| {
                    Error::TransferDecode {
                        encoding: self.name(),
                        message,
                    }
                })
            },
            ContentTransferEncoding::QuotedPrintable => qp_decode_strict(data)
                .map(Cow::Owned)
                .map_err(|message| Error::TransferDecode {
                    encoding: self.name(),
                    message,
                }),
        }
    }
}

/// Decode `data` according to the raw `Content-Transfer-Encoding` header
/// value, if any.
pub fn decode_transfer<'a>(
    data: &'a [u8],
    content_transfer_encoding: Option<&str>,
) -> Result<Cow<'a, [u8]>, Error> {
    content_transfer_encoding
        .map(ContentTransferEncoding::from_header)
        .unwrap_or_default()
        .decode(data)
}

fn decode_base64(data: &[u8]) -> Result<Vec<u8>, String> {
    // Line breaks (and the odd bit of stray whitespace) are part of the
    // transport framing, not the payload. Anything else outside the alphabet
    // is left in so the decoder rejects it.
    let compact = data
        .iter()
        .copied()
        .filter(|&b| !matches!(b, b'\r' | b'\n' | b' ' | b'\t'))
        .collect::<Vec<u8>>();
    base64::decode_config(&compact, base64::STANDARD).map_err(|e| e.to_string())
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn header_values() {
        use super::ContentTransferEncoding as CTE;

        assert_eq!(CTE::Base64, CTE::from_header("base64"));
        assert_eq!(CTE::Base64, CTE::from_header(" BASE64\r\n"));
        assert_eq!(CTE::Base64, CTE::from_header("Base64"));
        assert_eq!(
            CTE::QuotedPrintable,
            CTE::from_header("Quoted-Printable")
        );
        assert_eq!(CTE::Identity, CTE::from_header("7bit"));
        assert_eq!(CTE::Identity, CTE::from_header("8BIT"));
        assert_eq!(CTE::Identity, CTE::from_header("binary"));
        assert_eq!(CTE::Identity, CTE::from_header("x-uuencode"));
        assert_eq!(CTE::Identity, CTE::from_header(""));
    }

    #[test]
    fn decode_untransformed() {
        assert_eq!(
            b"foo\xFE" as &[u8],
            &decode_transfer(b"foo\xFE", None).unwrap()[..]
        );
        assert_eq!(
            b"foo\xFE" as &[u8],
            &decode_transfer(b"foo\xFE", Some("8bit")).unwrap()[..]
        );
        assert_eq!(
            b"=ZZ not base64!" as &[u8],
            &decode_transfer(b"=ZZ not base64!", Some("x-unknown")).unwrap()
                [..]
        );
    }

    #[test]
    fn decode_base64_binary() {
        let decoded = decode_transfer(
            b"V\r\n\
              Gh\n\
              hdC\n\
              Bpcy\n\
              Bub3QgZ\n\
              GVhZCB3aGl\n\
              jaCBjYW4gZXRl\n\
              cm5hbCBsaWUuXG5Bbm\n\
              Qgd2l0aCBzdHJhbmdlIOZvb\n\
              nMgZXZlbiBkZWF0aCBtYXkgZGllLg==\r\n",
            Some("Base64"),
        )
        .unwrap();
        assert_eq!(
            b"That is not dead which can eternal lie.\\n\
              And with strange \xE6ons even death may die."
                as &[u8],
            &decoded[..]
        );
    }

    #[test]
    fn decode_base64_invalid() {
        assert_matches!(
            Err(Error::TransferDecode {
                encoding: "base64",
                ..
            }),
            decode_transfer(b"SGVsbG8*IQ==", Some("base64"))
        );
    }

    #[test]
    fn decode_qp_binary() {
        let decoded = decode_transfer(
            b"caf=C3=A9 au lait=\r\n\
              , merci",
            Some("quoted-printable"),
        )
        .unwrap();
        assert_eq!("café au lait, merci".as_bytes(), &decoded[..]);
    }

    #[test]
    fn decode_qp_invalid() {
        assert_matches!(
            Err(Error::TransferDecode {
                encoding: "quoted-printable",
                ..
            }),
            decode_transfer(b"broken =G1 escape", Some("QUOTED-PRINTABLE"))
        );
    }

    proptest! {
        #[test]
        fn base64_round_trip(
            data in prop::collection::vec(prop::num::u8::ANY, 0..400)
        ) {
            let encoded = base64::encode(&data);
            // Wrap the way mail agents do, at 76 columns with DOS endings
            let mut wrapped = Vec::new();
            for chunk in encoded.as_bytes().chunks(76) {
                wrapped.extend_from_slice(chunk);
                wrapped.extend_from_slice(b"\r\n");
            }

            let decoded = decode_transfer(&wrapped, Some("base64")).unwrap();
            prop_assert_eq!(&data[..], &decoded[..]);
        }
    }
}
