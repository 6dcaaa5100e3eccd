use crate::codepage::Codepage;

// conversion seam, normally backed by the host's character conversion api
pub trait Codec {
    fn ansi_codepage(&self) -> Codepage;

    fn oem_codepage(&self) -> Codepage;

    // glyphs selects printable glyphs for control bytes on codepages
    // that have them; None means the codepage leaves the byte undefined
    fn decode_byte(&self, codepage: Codepage, glyphs: bool, byte: u8) -> Option<char>;

    // default (or '?' when absent) replaces characters the codepage
    // cannot express; the caller sizes out for the worst case
    fn encode(
        &self,
        codepage: Codepage,
        input: &str,
        out: &mut [u8],
        default: Option<&[u8]>,
    ) -> (usize, bool);
}

// host-independent codec carrying a few common codepages; encoding is
// the strict reverse of decoding, with no best-fit approximations
#[derive(Debug, Clone)]
pub struct BuiltinCodec {
    ansi: i32,
    oem: i32,
}

impl BuiltinCodec {
    pub fn new() -> Self {
        BuiltinCodec {
            ansi: 1252,
            oem: 437,
        }
    }

    pub fn with_codepages(ansi: i32, oem: i32) -> Self {
        BuiltinCodec { ansi, oem }
    }

    fn concrete(&self, codepage: Codepage) -> i32 {
        match codepage {
            Codepage::ACP => self.ansi,
            Codepage::OEMCP => self.oem,
            other => other.id(),
        }
    }

    fn encode_char(&self, codepage: i32, ch: char) -> Option<u8> {
        let cp = ch as u32;

        match codepage {
            437 => {
                if cp < 0x80 {
                    return Some(cp as u8);
                }
                if let Some(i) = CP437_HIGH.iter().position(|&c| c == ch) {
                    return Some(0x80 + i as u8);
                }
                if let Some(i) = CP437_GLYPHS.iter().position(|&c| c == ch) {
                    return Some(i as u8);
                }
                (ch == '⌂').then_some(0x7f)
            }
            1252 => {
                if cp < 0x80 || (0xa0..0x100).contains(&cp) {
                    return Some(cp as u8);
                }
                WIN1252_C1
                    .iter()
                    .position(|&c| c == ch && c != '\u{fffd}')
                    .map(|i| 0x80 + i as u8)
            }
            28591 => {
                if cp < 0x100 {
                    Some(cp as u8)
                } else {
                    None
                }
            }
            28605 => match ch {
                '€' => Some(0xa4),
                'Š' => Some(0xa6),
                'š' => Some(0xa8),
                'Ž' => Some(0xb4),
                'ž' => Some(0xb8),
                'Œ' => Some(0xbc),
                'œ' => Some(0xbd),
                'Ÿ' => Some(0xbe),
                '¤' | '¦' | '¨' | '´' | '¸' | '¼' | '½' | '¾' => None,
                _ if cp < 0x100 => Some(cp as u8),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Default for BuiltinCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for BuiltinCodec {
    fn ansi_codepage(&self) -> Codepage {
        Codepage(self.ansi)
    }

    fn oem_codepage(&self) -> Codepage {
        Codepage(self.oem)
    }

    fn decode_byte(&self, codepage: Codepage, glyphs: bool, byte: u8) -> Option<char> {
        match self.concrete(codepage) {
            437 => Some(cp437(byte, glyphs)),
            1252 => cp1252(byte),
            28591 => Some(byte as char),
            28605 => Some(cp28605(byte)),
            65001 => {
                if byte < 0x80 {
                    Some(byte as char)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn encode(
        &self,
        codepage: Codepage,
        input: &str,
        out: &mut [u8],
        default: Option<&[u8]>,
    ) -> (usize, bool) {
        let codepage = self.concrete(codepage);
        let mut written = 0;
        let mut substituted = false;

        for ch in input.chars() {
            if codepage == 65001 {
                let len = ch.len_utf8();
                ch.encode_utf8(&mut out[written..written + len]);
                written += len;
                continue;
            }

            match self.encode_char(codepage, ch) {
                Some(byte) => {
                    out[written] = byte;
                    written += 1;
                }
                None => {
                    for &byte in default.unwrap_or(b"?") {
                        out[written] = byte;
                        written += 1;
                    }
                    substituted = true;
                }
            }
        }

        (written, substituted)
    }
}

fn cp437(byte: u8, glyphs: bool) -> char {
    match byte {
        0x00..=0x1f if glyphs => CP437_GLYPHS[byte as usize],
        0x7f if glyphs => '⌂',
        0x00..=0x7f => byte as char,
        _ => CP437_HIGH[byte as usize - 0x80],
    }
}

fn cp1252(byte: u8) -> Option<char> {
    if (0x80..0xa0).contains(&byte) {
        let ch = WIN1252_C1[byte as usize - 0x80];
        (ch != '\u{fffd}').then_some(ch)
    } else {
        Some(byte as char)
    }
}

fn cp28605(byte: u8) -> char {
    match byte {
        0xa4 => '€',
        0xa6 => 'Š',
        0xa8 => 'š',
        0xb4 => 'Ž',
        0xb8 => 'ž',
        0xbc => 'Œ',
        0xbd => 'œ',
        0xbe => 'Ÿ',
        _ => byte as char,
    }
}

// CP437 control range under the host api's glyph-chars option
#[rustfmt::skip]
const CP437_GLYPHS: [char; 32] = [
    '\0', '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '◙', '♂', '♀', '♪', '♫', '☼',
    '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼',
];

#[rustfmt::skip]
const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}',
];

// Windows-1252 0x80..0xA0, U+FFFD marking undefined bytes
#[rustfmt::skip]
const WIN1252_C1: [char; 32] = [
    '€', '\u{fffd}', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\u{fffd}', 'Ž', '\u{fffd}',
    '\u{fffd}', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ', '\u{fffd}', 'ž', 'Ÿ',
];

#[cfg(test)]
mod tests {
    use super::{BuiltinCodec, Codec};
    use crate::codepage::Codepage;
    use pretty_assertions::assert_eq;

    #[test]
    fn cp437_control_glyphs() {
        let codec = BuiltinCodec::new();
        let cp = Codepage(437);

        assert_eq!(codec.decode_byte(cp, false, 0x03), Some('\x03'));
        assert_eq!(codec.decode_byte(cp, true, 0x03), Some('♥'));
        assert_eq!(codec.decode_byte(cp, false, 0x7f), Some('\x7f'));
        assert_eq!(codec.decode_byte(cp, true, 0x7f), Some('⌂'));
    }

    #[test]
    fn cp437_high_half() {
        let codec = BuiltinCodec::new();
        let cp = Codepage(437);

        assert_eq!(codec.decode_byte(cp, false, 0x80), Some('Ç'));
        assert_eq!(codec.decode_byte(cp, false, 0xb3), Some('│'));
        assert_eq!(codec.decode_byte(cp, false, 0xe1), Some('ß'));
        assert_eq!(codec.decode_byte(cp, false, 0xff), Some('\u{a0}'));
    }

    #[test]
    fn cp1252_c1_range() {
        let codec = BuiltinCodec::new();
        let cp = Codepage(1252);

        assert_eq!(codec.decode_byte(cp, false, 0x80), Some('€'));
        assert_eq!(codec.decode_byte(cp, false, 0x81), None);
        assert_eq!(codec.decode_byte(cp, false, 0x9f), Some('Ÿ'));
        assert_eq!(codec.decode_byte(cp, false, 0xe9), Some('é'));
    }

    #[test]
    fn latin9_remaps() {
        let codec = BuiltinCodec::new();
        let cp = Codepage(28605);

        assert_eq!(codec.decode_byte(cp, false, 0xa4), Some('€'));
        assert_eq!(codec.decode_byte(cp, false, 0xbe), Some('Ÿ'));
        assert_eq!(codec.decode_byte(cp, false, 0xe9), Some('é'));
    }

    #[test]
    fn sentinels_follow_configured_codepages() {
        let codec = BuiltinCodec::with_codepages(28591, 437);

        assert_eq!(codec.decode_byte(Codepage::ACP, false, 0x80), Some('\u{80}'));
        assert_eq!(codec.decode_byte(Codepage::OEMCP, false, 0x80), Some('Ç'));
    }

    #[test]
    fn unknown_codepage_decodes_nothing() {
        let codec = BuiltinCodec::new();

        assert_eq!(codec.decode_byte(Codepage(932), false, b'a'), None);
    }

    #[test]
    fn encode_reverses_decode() {
        let codec = BuiltinCodec::new();
        let mut out = [0u8; 16];

        let (n, subst) = codec.encode(Codepage(437), "a│ß☺", &mut out, None);
        assert_eq!(&out[..n], &[b'a', 0xb3, 0xe1, 0x01]);
        assert!(!subst);

        let (n, subst) = codec.encode(Codepage(1252), "€é", &mut out, None);
        assert_eq!(&out[..n], &[0x80, 0xe9]);
        assert!(!subst);
    }

    #[test]
    fn encode_substitutes_default() {
        let codec = BuiltinCodec::new();
        let mut out = [0u8; 16];

        let (n, subst) = codec.encode(Codepage(1252), "aπb", &mut out, None);
        assert_eq!(&out[..n], b"a?b");
        assert!(subst);

        let (n, subst) = codec.encode(Codepage(1252), "aπb", &mut out, Some(b"<?>"));
        assert_eq!(&out[..n], b"a<?>b");
        assert!(subst);
    }

    #[test]
    fn encode_utf8() {
        let codec = BuiltinCodec::new();
        let mut out = [0u8; 16];

        let (n, subst) = codec.encode(Codepage::UTF8, "a€", &mut out, None);
        assert_eq!(&out[..n], "a€".as_bytes());
        assert!(!subst);
    }
}
