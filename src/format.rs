//! Fixed-point coefficient formats.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use itertools::PeekingNext;

/// A fixed-point number format with `width` total bits and a scaling factor of
/// 2^`scale`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Format {
    pub scale: i32,
    pub width: u32,
    pub is_signed: bool,
}

impl Format {
    pub fn msb(&self) -> i64 {
        i64::from(self.scale) + i64::from(self.width) - 1
    }

    pub fn lsb(&self) -> i64 {
        i64::from(self.scale)
    }

    /// Number of hexadecimal digits needed to print a word of this format.
    ///
    /// # Examples
    ///
    /// ```
    /// # use minimax::format::Format;
    /// #
    /// let format: Format = "Q2.30".parse().ok().unwrap();
    ///
    /// assert_eq!(format.hex_digits(), 8);
    /// assert_eq!(Format { width: 33, ..format }.hex_digits(), 9);
    /// ```
    pub fn hex_digits(&self) -> usize {
        self.width.div_ceil(4) as usize
    }
}

impl FromStr for Format {
    type Err = ParseFormatError;

    /// Parses a fixed-point format in ARM-style Q notation.
    ///
    /// A leading `U` selects an unsigned format; the integer width of a signed
    /// format includes the sign bit.
    #[allow(clippy::from_str_radix_10)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut iter = s.chars();
        let is_signed = iter.peeking_next(|&x| x == 'U').is_none();

        if !matches!(iter.next(), Some('Q')) {
            return Err(ParseFormatError);
        }

        let rest = iter.as_str();
        let split = rest.find('.').ok_or(ParseFormatError)?;

        let int_width = u16::from_str_radix(&rest[..split], 10)?;
        let frac_width = u16::from_str_radix(&rest[split + 1..], 10)?;

        if int_width == 0 && frac_width == 0 {
            return Err(ParseFormatError);
        }

        Ok(Format {
            scale: -i32::from(frac_width),
            width: u32::from(int_width) + u32::from(frac_width),
            is_signed,
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let frac_width = self.scale.unsigned_abs();
        let int_width = self.width.saturating_sub(frac_width);

        if !self.is_signed {
            write!(f, "U")?;
        }

        write!(f, "Q{int_width}.{frac_width}")
    }
}

#[derive(Debug)]
pub struct ParseFormatError;

impl From<ParseIntError> for ParseFormatError {
    fn from(_: ParseIntError) -> Self {
        ParseFormatError
    }
}

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid format")
    }
}
