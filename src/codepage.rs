use std::error::Error;
use std::fmt;

pub(crate) const LIST_BASE: i32 = 65536;

// ids below 65536 are host codepage numbers, with 0 and 1 standing for
// the host's default ANSI and OEM codepages; ids from 65536 up refer to
// built-in tables needing no host support; -1 means "use the font's own
// encoding" and only appears in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codepage(pub(crate) i32);

impl Codepage {
    pub const ACP: Codepage = Codepage(0);
    pub const OEMCP: Codepage = Codepage(1);
    pub const UTF8: Codepage = Codepage(65001);

    pub fn id(self) -> i32 {
        self.0
    }

    // names resolve to UTF-8; numeric ids pass through, except that list
    // entries backed by a plain host codepage normalize to it
    pub fn resolve(spec: impl Into<CodepageSpec>) -> Result<Codepage, UnknownCodepage> {
        match spec.into() {
            CodepageSpec::Name(_) => Ok(Codepage::UTF8),
            CodepageSpec::Id(id) if id < -1 => Err(UnknownCodepage(id)),
            CodepageSpec::Id(id) if id >= LIST_BASE => {
                match CP_LIST.get((id - LIST_BASE) as usize) {
                    Some(item) => match item.codepage {
                        Some(cp) => Ok(Codepage(cp)),
                        None => Ok(Codepage(id)),
                    },
                    None => Err(UnknownCodepage(id)),
                }
            }
            CodepageSpec::Id(id) => Ok(Codepage(id)),
        }
    }

    // nth built-in name, for configuration pickers
    pub fn enumerate(index: usize) -> Option<&'static str> {
        CP_LIST.get(index).map(|item| item.name)
    }
}

impl PartialEq<i32> for Codepage {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Codepage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 == -1 {
            return f.write_str("Use font encoding");
        }
        if self.0 >= LIST_BASE {
            if let Some(item) = CP_LIST.get((self.0 - LIST_BASE) as usize) {
                return f.write_str(item.name);
            }
            return Ok(());
        }
        for item in &CP_LIST {
            if item.codepage == Some(self.0) {
                return f.write_str(item.name);
            }
        }
        if self.0 >= 0 {
            return write!(f, "CP{:03}", self.0);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodepageSpec {
    Name(String),
    Id(i32),
}

impl From<&str> for CodepageSpec {
    fn from(name: &str) -> Self {
        CodepageSpec::Name(name.to_owned())
    }
}

impl From<String> for CodepageSpec {
    fn from(name: String) -> Self {
        CodepageSpec::Name(name)
    }
}

impl From<i32> for CodepageSpec {
    fn from(id: i32) -> Self {
        CodepageSpec::Id(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCodepage(pub(crate) i32);

impl UnknownCodepage {
    pub fn id(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UnknownCodepage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown codepage {}", self.0)
    }
}

impl Error for UnknownCodepage {}

struct CpListItem {
    name: &'static str,
    codepage: Option<i32>,
    table: Option<&'static [char]>,
}

static CP_LIST: [CpListItem; 3] = [
    CpListItem {
        name: "UTF-8",
        codepage: Some(65001),
        table: None,
    },
    CpListItem {
        name: "ISO-8859-1 (Latin-1, West Europe)",
        codepage: None,
        table: Some(&ISO_8859_1),
    },
    CpListItem {
        name: "ISO-8859-15 (Latin-9, \"euro\")",
        codepage: None,
        table: Some(&ISO_8859_15),
    },
];

// built-in table covering the top byte values of a list codepage
pub(crate) fn list_table(codepage: Codepage) -> Option<&'static [char]> {
    if codepage.0 < LIST_BASE {
        return None;
    }
    CP_LIST.get((codepage.0 - LIST_BASE) as usize)?.table
}

#[rustfmt::skip]
const ISO_8859_1: [char; 96] = [
    '\u{a0}', '¡', '¢', '£', '¤', '¥', '¦', '§', '¨', '©', 'ª', '«', '¬', '\u{ad}', '®', '¯',
    '°', '±', '²', '³', '´', 'µ', '¶', '·', '¸', '¹', 'º', '»', '¼', '½', '¾', '¿',
    'À', 'Á', 'Â', 'Ã', 'Ä', 'Å', 'Æ', 'Ç', 'È', 'É', 'Ê', 'Ë', 'Ì', 'Í', 'Î', 'Ï',
    'Ð', 'Ñ', 'Ò', 'Ó', 'Ô', 'Õ', 'Ö', '×', 'Ø', 'Ù', 'Ú', 'Û', 'Ü', 'Ý', 'Þ', 'ß',
    'à', 'á', 'â', 'ã', 'ä', 'å', 'æ', 'ç', 'è', 'é', 'ê', 'ë', 'ì', 'í', 'î', 'ï',
    'ð', 'ñ', 'ò', 'ó', 'ô', 'õ', 'ö', '÷', 'ø', 'ù', 'ú', 'û', 'ü', 'ý', 'þ', 'ÿ',
];

#[rustfmt::skip]
const ISO_8859_15: [char; 96] = [
    '\u{a0}', '¡', '¢', '£', '€', '¥', 'Š', '§', 'š', '©', 'ª', '«', '¬', '\u{ad}', '®', '¯',
    '°', '±', '²', '³', 'Ž', 'µ', '¶', '·', 'ž', '¹', 'º', '»', 'Œ', 'œ', 'Ÿ', '¿',
    'À', 'Á', 'Â', 'Ã', 'Ä', 'Å', 'Æ', 'Ç', 'È', 'É', 'Ê', 'Ë', 'Ì', 'Í', 'Î', 'Ï',
    'Ð', 'Ñ', 'Ò', 'Ó', 'Ô', 'Õ', 'Ö', '×', 'Ø', 'Ù', 'Ú', 'Û', 'Ü', 'Ý', 'Þ', 'ß',
    'à', 'á', 'â', 'ã', 'ä', 'å', 'æ', 'ç', 'è', 'é', 'ê', 'ë', 'ì', 'í', 'î', 'ï',
    'ð', 'ñ', 'ò', 'ó', 'ô', 'õ', 'ö', '÷', 'ø', 'ù', 'ú', 'û', 'ü', 'ý', 'þ', 'ÿ',
];
