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

//! MIME handling: header blocks, structured headers, encoded words,
//! multipart splitting and transfer decoding.

pub mod content_encoding;
pub mod encoded_word;
pub mod extensions;
pub mod filename;
pub mod grovel;
pub mod header;
pub mod model;
pub mod multipart;
pub mod quoted_printable;
