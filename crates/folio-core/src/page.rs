//! Standard paper sizes.
//!
//! All dimensions are portrait and expressed in PDF points (1/72 inch).

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::geometry::Size;

/// A named paper size.
///
/// # Examples
///
/// ```
/// # use folio_core::page::PageSize;
/// let letter: PageSize = "letter".parse().unwrap();
/// assert_eq!(letter.size().width(), 612.0);
/// assert_eq!(letter.size().height(), 792.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum PageSize {
    /// US Letter, 8.5 × 11 in.
    #[default]
    Letter,
    /// US Legal, 8.5 × 14 in.
    Legal,
    /// Tabloid, 11 × 17 in.
    Tabloid,
    /// ISO A4, 210 × 297 mm.
    A4,
    /// ISO A3, 297 × 420 mm.
    A3,
}

const MM: f32 = 72.0 / 25.4;

impl PageSize {
    /// Returns the page dimensions in points.
    pub fn size(self) -> Size {
        match self {
            Self::Letter => Size::new(612.0, 792.0),
            Self::Legal => Size::new(612.0, 1008.0),
            Self::Tabloid => Size::new(792.0, 1224.0),
            Self::A4 => Size::new(210.0 * MM, 297.0 * MM),
            Self::A3 => Size::new(297.0 * MM, 420.0 * MM),
        }
    }

    /// Returns the lowercase name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Letter => "letter",
            Self::Legal => "legal",
            Self::Tabloid => "tabloid",
            Self::A4 => "a4",
            Self::A3 => "a3",
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            "tabloid" | "ledger" => Ok(Self::Tabloid),
            "a4" => Ok(Self::A4),
            "a3" => Ok(Self::A3),
            _ => Err(format!(
                "unknown page size `{s}` (expected letter, legal, tabloid, a4 or a3)"
            )),
        }
    }
}

impl TryFrom<String> for PageSize {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_default_is_letter() {
        assert_eq!(PageSize::default(), PageSize::Letter);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("A4".parse::<PageSize>(), Ok(PageSize::A4));
        assert_eq!("Letter".parse::<PageSize>(), Ok(PageSize::Letter));
        assert_eq!("ledger".parse::<PageSize>(), Ok(PageSize::Tabloid));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "b5".parse::<PageSize>().unwrap_err();
        assert!(err.contains("b5"));
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for page in [
            PageSize::Letter,
            PageSize::Legal,
            PageSize::Tabloid,
            PageSize::A4,
            PageSize::A3,
        ] {
            assert_eq!(page.to_string().parse::<PageSize>(), Ok(page));
        }
    }

    #[test]
    fn test_iso_sizes_in_points() {
        let a4 = PageSize::A4.size();
        assert!(approx_eq!(f32, a4.width(), 595.2756, epsilon = 0.001));
        assert!(approx_eq!(f32, a4.height(), 841.8898, epsilon = 0.001));
    }
}
