use std::ops::Index;

use crate::codec::Codec;
use crate::codepage::{self, Codepage};

const REPLACEMENT: char = '\u{fffd}';

// what a byte stands for: a genuine code point, a byte passed through
// untranslated, or a position in one of the screen font banks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Mapped(char),
    DirectChar(u8),
    DirectFont(FontBank, u8),
}

impl Entry {
    pub fn to_char(self) -> Option<char> {
        match self {
            Entry::Mapped(ch) => Some(ch),
            _ => None,
        }
    }

    pub fn is_direct_font(self) -> bool {
        matches!(self, Entry::DirectFont(..))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontBank {
    Ansi,
    Oem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    CodePoints,
    Glyphs,
    // glyphs, low half only; for fonts in multibyte encodings
    Ascii,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnicodeTable([Entry; 256]);

impl UnicodeTable {
    pub(crate) fn blank() -> Self {
        UnicodeTable([Entry::Mapped(REPLACEMENT); 256])
    }

    // bytes the codepage leaves undefined map to U+FFFD
    pub fn build(codepage: Codepage, mode: TableMode, codec: &dyn Codec) -> Self {
        let glyphs = mode != TableMode::CodePoints;
        let max = match mode {
            TableMode::Ascii => 128,
            _ => 256,
        };
        let mut table = UnicodeTable::blank();

        if codepage == Codepage::UTF8 {
            for i in 0..max {
                table.0[i] = Entry::Mapped(i as u8 as char);
            }
            return table;
        }

        let codepage = match codepage {
            Codepage::ACP => codec.ansi_codepage(),
            Codepage::OEMCP => codec.oem_codepage(),
            other => other,
        };

        if codepage.id() > 0 && codepage.id() < codepage::LIST_BASE {
            for i in 0..max {
                let ch = codec
                    .decode_byte(codepage, glyphs, i as u8)
                    .unwrap_or(REPLACEMENT);
                table.0[i] = Entry::Mapped(ch);
            }
        } else {
            for i in 0..max {
                table.0[i] = Entry::Mapped(i as u8 as char);
            }
            if let Some(chars) = codepage::list_table(codepage) {
                let base = 256 - chars.len();
                for i in base..max {
                    table.0[i] = Entry::Mapped(chars[i - base]);
                }
            }
        }

        table
    }

    pub fn get(&self, byte: u8) -> Entry {
        self.0[byte as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = Entry> + '_ {
        self.0.iter().copied()
    }

    pub(crate) fn set(&mut self, index: usize, entry: Entry) {
        self.0[index] = entry;
    }

    // redirects entries to font positions holding the same value; the
    // scan starts at position 32 and wraps, preferring printable
    // positions over control ones, and already-linked entries stay put
    pub fn link(&mut self, font: &UnicodeTable, bank: FontBank) {
        for line_index in 0..256 {
            if self.0[line_index].is_direct_font() {
                continue;
            }
            for i in 0..256 {
                let font_index = (32 + i) & 0xff;
                if self.0[line_index] == font.0[font_index] {
                    self.0[line_index] = Entry::DirectFont(bank, font_index as u8);
                    break;
                }
            }
        }
    }
}

impl Index<u8> for UnicodeTable {
    type Output = Entry;

    fn index(&self, byte: u8) -> &Entry {
        &self.0[byte as usize]
    }
}
