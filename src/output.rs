//! Line oriented help output.
//!
//! Help text is written line by line. When the terminal cannot take UTF-8,
//! non-ASCII characters are dropped instead of failing the whole render.

use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEncoding {
    Utf8,
    Ascii,
}

impl OutputEncoding {
    /// Pick the encoding from the locale environment (`LC_ALL`, `LC_CTYPE`, `LANG`).
    pub fn detect() -> Self {
        let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty());
        Self::from_locale(locale.as_deref())
    }

    pub fn from_locale(locale: Option<&str>) -> Self {
        let Some(locale) = locale else {
            return OutputEncoding::Utf8;
        };
        let lower = locale.to_ascii_lowercase();
        if lower.contains("utf-8") || lower.contains("utf8") {
            OutputEncoding::Utf8
        } else {
            OutputEncoding::Ascii
        }
    }
}

pub struct HelpWriter<W: Write> {
    out: W,
    encoding: OutputEncoding,
}

impl<W: Write> HelpWriter<W> {
    pub fn new(out: W, encoding: OutputEncoding) -> Self {
        Self { out, encoding }
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        match self.encoding {
            OutputEncoding::Utf8 => writeln!(self.out, "{text}"),
            OutputEncoding::Ascii => {
                let ascii: String = text.chars().filter(char::is_ascii).collect();
                writeln!(self.out, "{ascii}")
            }
        }
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_encoding_from_locale_value() {
        assert_eq!(OutputEncoding::from_locale(None), OutputEncoding::Utf8);
        assert_eq!(
            OutputEncoding::from_locale(Some("en_US.UTF-8")),
            OutputEncoding::Utf8
        );
        assert_eq!(OutputEncoding::from_locale(Some("C.utf8")), OutputEncoding::Utf8);
        assert_eq!(OutputEncoding::from_locale(Some("C")), OutputEncoding::Ascii);
        assert_eq!(
            OutputEncoding::from_locale(Some("en_US.ISO-8859-1")),
            OutputEncoding::Ascii
        );
    }

    #[test]
    fn ascii_output_drops_non_ascii_characters() {
        let mut writer = HelpWriter::new(Vec::new(), OutputEncoding::Ascii);
        writer.line("Café → ok").unwrap();
        writer.blank().unwrap();
        assert_eq!(String::from_utf8(writer.into_inner()).unwrap(), "Caf  ok\n\n");
    }

    #[test]
    fn utf8_output_is_verbatim() {
        let mut writer = HelpWriter::new(Vec::new(), OutputEncoding::Utf8);
        writer.line("Café").unwrap();
        assert_eq!(String::from_utf8(writer.into_inner()).unwrap(), "Café\n");
    }
}
