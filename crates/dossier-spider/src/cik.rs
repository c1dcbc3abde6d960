use crate::Error;
use std::fmt;

/// A registrant's Central Index Key, always held zero-padded to 10 digits.
///
/// ## Example
/// ```rust
/// use dossier_spider::Cik;
///
/// let cik = Cik::parse("320193").unwrap();
/// assert_eq!(cik.as_str(), "0000320193");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cik(String);

impl Cik {
    pub const WIDTH: usize = 10;

    /// Parse a CIK from its bare (`"320193"`) or padded (`"0000320193"`) form.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > Self::WIDTH || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidCik(raw.to_string()));
        }
        Ok(Self(format!("{raw:0>width$}", width = Self::WIDTH)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Cik {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_ten_digits() {
        assert_eq!(Cik::parse("789019").unwrap().as_str(), "0000789019");
        assert_eq!(Cik::parse("0001652044").unwrap().to_string(), "0001652044");
        assert_eq!(Cik::parse(" 51143 ").unwrap().as_str(), "0000051143");
    }

    #[test]
    fn rejects_malformed() {
        for raw in ["", "AAPL", "12-34", "12345678901"] {
            assert_eq!(
                Cik::parse(raw),
                Err(Error::InvalidCik(raw.to_string())),
                "{raw:?} should not parse"
            );
        }
    }
}
