//! PDF standard fonts and their advance widths.
//!
//! The standard fonts are available in every conforming PDF reader, so they
//! can be referenced by name without embedding a font program. Centering a
//! string still requires its advance width, which is computed here from the
//! Adobe font metrics (in 1/1000 em units).
//!
//! Text is encoded with `WinAnsiEncoding`: printable ASCII and the Latin-1
//! supplement map to themselves, everything else becomes `?`.

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// A non-symbolic standard font usable without embedding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum StandardFont {
    Helvetica,
    #[default]
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

/// Advance widths for WinAnsi codes 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, //
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, //
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, //
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const COURIER_WIDTH: u16 = 600;

// Latin-1 supplement glyphs are not tabulated; most of them are letters
// close to the average lowercase advance.
const FALLBACK_WIDTH: u16 = 556;

impl StandardFont {
    /// Returns the PostScript base font name, e.g. `Helvetica-Bold`.
    pub fn base_name(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Advance width of a WinAnsi-encoded byte, in 1/1000 em.
    pub fn advance(self, code: u8) -> u16 {
        let table = match self {
            Self::Helvetica | Self::HelveticaOblique => &HELVETICA_WIDTHS,
            Self::HelveticaBold | Self::HelveticaBoldOblique => &HELVETICA_BOLD_WIDTHS,
            Self::Courier
            | Self::CourierBold
            | Self::CourierOblique
            | Self::CourierBoldOblique => return COURIER_WIDTH,
        };

        match code {
            32..=126 => table[usize::from(code - 32)],
            _ => FALLBACK_WIDTH,
        }
    }

    /// Width of `text` set at `size` points.
    ///
    /// # Examples
    ///
    /// ```
    /// # use folio_core::font::StandardFont;
    /// // Courier is monospaced at 600/1000 em
    /// assert_eq!(StandardFont::Courier.text_width("abcd", 10.0), 24.0);
    /// ```
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|code| u32::from(self.advance(code)))
            .sum();
        units as f32 * size / 1000.0
    }
}

/// Encodes `text` as WinAnsi bytes, replacing unmappable characters with `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match u32::from(ch) {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => b'?',
        })
        .collect()
}

impl fmt::Display for StandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_name())
    }
}

impl FromStr for StandardFont {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let font = match s {
            "Helvetica" => Self::Helvetica,
            "Helvetica-Bold" => Self::HelveticaBold,
            "Helvetica-Oblique" => Self::HelveticaOblique,
            "Helvetica-BoldOblique" => Self::HelveticaBoldOblique,
            "Courier" => Self::Courier,
            "Courier-Bold" => Self::CourierBold,
            "Courier-Oblique" => Self::CourierOblique,
            "Courier-BoldOblique" => Self::CourierBoldOblique,
            _ => return Err(format!("unsupported standard font `{s}`")),
        };
        Ok(font)
    }
}

impl TryFrom<String> for StandardFont {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
