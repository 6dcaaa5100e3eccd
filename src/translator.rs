use crate::codec::{BuiltinCodec, Codec};
use crate::codepage::{Codepage, CodepageSpec, UnknownCodepage};
use crate::table::{Entry, FontBank, TableMode, UnicodeTable};
use log::{debug, log_enabled, trace, Level};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use unicode_width::UnicodeWidthChar;

// how much the display leans on Unicode versus raw font banks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Unicode,
    OemAnsi,
    Xterm,
    OemOnly,
    PoorMan,
}

// VT100 line drawing set; the four scanline characters sit at their
// unicode 3.0 positions, which have no unicode 2.0 equivalents
#[rustfmt::skip]
const XTERM_GRAPHICS: [char; 32] = [
    '♦', '▒', '␉', '␌', '␍', '␊', '°', '±',
    '␤', '␋', '┘', '┐', '┌', '└', '┼', '⎺',
    '⎻', '─', '⎼', '⎽', '├', '┤', '┴', '┬',
    '│', '≤', '≥', 'π', '≠', '£', '·', ' ',
];

const POORMAN_LATIN1: &[u8; 96] =
    b" !cL.Y|S\"Ca<--R~o+23'u|.,1o>///?AAAAAAACEEEEIIIIDNOOOOOxOUUUUYPBaaaaaaaceeeeiiiionooooo/ouuuuypy";
const POORMAN_VT100: &[u8; 31] = b"*#****o~**+++++-----++++|****L.";
const POORMAN_SCOACS: &[u8; 128] =
    b"CueaaaaceeeiiiAAE**ooouuyOUc$YPsaiounNao?++**!<>###||||++||++++++--|-+||++--|-+----++++++++##||#aBTPEsyt******EN=+><++-=... n2* ";

// code point high byte to row of line codepage bytes; rows hold 0 for
// absent entries, so byte 0 only re-encodes through the ascii fast path
#[derive(Debug, Default)]
struct ReverseIndex(HashMap<u8, Box<[u8; 256]>>);

impl ReverseIndex {
    fn insert(&mut self, code: u16, byte: u8) {
        let row = self
            .0
            .entry((code >> 8) as u8)
            .or_insert_with(|| Box::new([0; 256]));

        row[(code & 0xff) as usize] = byte;
    }

    fn get(&self, ch: char) -> Option<u8> {
        let code = ch as u32;

        if code > 0xffff {
            return None;
        }

        let row = self.0.get(&((code >> 8) as u8))?;

        match row[(code & 0xff) as usize] {
            0 => None,
            byte => Some(byte),
        }
    }
}

// all tables are computed up front; a session reconfigures by building
// a fresh translator and swapping it in, never by mutating a live one
pub struct Translator {
    line_codepage: Codepage,
    font_codepage: Codepage,
    dbcs_screenfont: bool,
    mode: Mode,
    cjk_ambiguous_wide: bool,
    line: UnicodeTable,
    font: UnicodeTable,
    oem: UnicodeTable,
    scoacs: UnicodeTable,
    xterm: UnicodeTable,
    ctrl: [u8; 256],
    reverse: Option<ReverseIndex>,
    codec: Arc<dyn Codec + Send + Sync>,
}

impl Translator {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn decode_byte(&self, byte: u8) -> Entry {
        self.line.get(byte)
    }

    // encodes through the reverse index when codepage is the line
    // codepage, through the codec otherwise; out sizing is the caller's
    // contract and overflow is a panic
    pub fn encode(
        &self,
        codepage: Codepage,
        input: &str,
        out: &mut [u8],
        default: Option<&[u8]>,
    ) -> (usize, bool) {
        if codepage == self.line_codepage {
            if let Some(reverse) = &self.reverse {
                let mut written = 0;
                let mut defaulted = false;

                for ch in input.chars() {
                    if let Some(byte) = reverse.get(ch) {
                        out[written] = byte;
                        written += 1;
                    } else if (ch as u32) < 0x80 {
                        out[written] = ch as u8;
                        written += 1;
                    } else if let Some(default) = default {
                        out[written..written + default.len()].copy_from_slice(default);
                        written += default.len();
                        defaulted = true;
                    } else {
                        out[written] = b'.';
                        written += 1;
                    }

                    assert!(written < out.len());
                }

                return (written, defaulted);
            }
        }

        self.codec.encode(codepage, input, out, default)
    }

    // the control value to act on when byte decodes to a C0 or C1
    // control under the line codepage
    pub fn control(&self, byte: u8) -> Option<u8> {
        match self.ctrl[byte as usize] {
            0xff => None,
            ctrl => Some(ctrl),
        }
    }

    pub fn char_width(&self, ch: char) -> Option<usize> {
        if self.cjk_ambiguous_wide {
            ch.width_cjk()
        } else {
            ch.width()
        }
    }

    pub fn line_codepage(&self) -> Codepage {
        self.line_codepage
    }

    pub fn font_codepage(&self) -> Codepage {
        self.font_codepage
    }

    pub fn dbcs_screenfont(&self) -> bool {
        self.dbcs_screenfont
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn line(&self) -> &UnicodeTable {
        &self.line
    }

    pub fn font(&self) -> &UnicodeTable {
        &self.font
    }

    pub fn oem(&self) -> &UnicodeTable {
        &self.oem
    }

    pub fn scoacs(&self) -> &UnicodeTable {
        &self.scoacs
    }

    pub fn xterm(&self) -> &UnicodeTable {
        &self.xterm
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Translator")
            .field("line_codepage", &self.line_codepage)
            .field("font_codepage", &self.font_codepage)
            .field("dbcs_screenfont", &self.dbcs_screenfont)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct Builder {
    line_codepage: Option<CodepageSpec>,
    font_codepage: i32,
    dbcs_screenfont: bool,
    mode: Mode,
    cjk_ambiguous_wide: bool,
    codec: Arc<dyn Codec + Send + Sync>,
}

impl Builder {
    // defaults to UTF-8; ids at or below 0 defer to the font codepage
    pub fn line_codepage(&mut self, spec: impl Into<CodepageSpec>) -> &mut Self {
        self.line_codepage = Some(spec.into());

        self
    }

    // 0 or below when the font carries no codepage of its own
    pub fn font_codepage(&mut self, codepage: i32) -> &mut Self {
        self.font_codepage = codepage;

        self
    }

    pub fn dbcs_screenfont(&mut self, dbcs: bool) -> &mut Self {
        self.dbcs_screenfont = dbcs;

        self
    }

    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = mode;

        self
    }

    pub fn cjk_ambiguous_wide(&mut self, wide: bool) -> &mut Self {
        self.cjk_ambiguous_wide = wide;

        self
    }

    pub fn codec(&mut self, codec: impl Codec + Send + Sync + 'static) -> &mut Self {
        self.codec = Arc::new(codec);

        self
    }

    pub fn build(&self) -> Result<Translator, UnknownCodepage> {
        let codec = Arc::clone(&self.codec);

        let mut line_codepage = match &self.line_codepage {
            Some(spec) => Codepage::resolve(spec.clone())?,
            None => Codepage::UTF8,
        };

        let mut font_codepage = self.font_codepage;
        let mut dbcs = self.dbcs_screenfont;

        if font_codepage <= 0 {
            font_codepage = 0;
            dbcs = false;
        }

        if self.mode == Mode::OemOnly {
            font_codepage = 437;
            dbcs = false;

            if line_codepage.id() <= 0 {
                line_codepage = codec.ansi_codepage();
            }
        } else if line_codepage.id() <= 0 {
            line_codepage = Codepage(font_codepage);
        }

        let font_codepage = Codepage(font_codepage);

        // screen font table
        let mut font = if dbcs || font_codepage == 0 {
            let mut table = UnicodeTable::build(font_codepage, TableMode::Ascii, codec.as_ref());

            for i in 128..256 {
                table.set(i, Entry::DirectFont(FontBank::Ansi, i as u8));
            }

            table
        } else {
            let mut table = UnicodeTable::build(font_codepage, TableMode::Glyphs, codec.as_ref());

            // CP437 fonts tend to have broken glyphs at 0 and 255
            if font_codepage == 437 {
                table.set(0, Entry::Mapped('\u{ffff}'));
                table.set(255, Entry::Mapped('\u{ffff}'));
            }

            table
        };

        if self.mode == Mode::Xterm {
            for (i, &ch) in XTERM_GRAPHICS.iter().enumerate() {
                font.set(1 + i, Entry::Mapped(ch));
            }
        }

        // OEM table
        let oem = UnicodeTable::build(Codepage::OEMCP, TableMode::Glyphs, codec.as_ref());

        // SCO ACS table
        let mut scoacs = if matches!(self.mode, Mode::OemAnsi | Mode::Xterm) {
            oem.clone()
        } else {
            UnicodeTable::build(Codepage(437), TableMode::Glyphs, codec.as_ref())
        };

        // line table; DBCS fonts, poor man's mode and codepage-less
        // fonts go direct to the font bank
        let mut direct_to_font = false;

        let mut line = if line_codepage == font_codepage
            && (dbcs || self.mode == Mode::PoorMan || font_codepage == 0)
        {
            direct_to_font = true;
            let mut table = UnicodeTable::blank();

            for i in 0..32 {
                table.set(i, Entry::Mapped(i as u8 as char));
            }

            for i in 32..256 {
                table.set(i, Entry::DirectFont(FontBank::Ansi, i as u8));
            }

            table.set(127, Entry::Mapped('\x7f'));
            table
        } else {
            UnicodeTable::build(line_codepage, TableMode::CodePoints, codec.as_ref())
        };

        // VT100 graphics variant of the line table
        let mut xterm = line.clone();

        for (i, &ch) in XTERM_GRAPHICS.iter().enumerate() {
            xterm.set(0x60 + i, Entry::Mapped(ch));
        }

        xterm.set(0x5f, Entry::Mapped(' '));

        // reverse index for re-encoding into the line codepage
        let mut reverse: Option<ReverseIndex> = None;

        if !direct_to_font {
            for i in 0..256 {
                if let Entry::Mapped(ch) = line.get(i as u8) {
                    let code = ch as u32;

                    if code <= 0xffff {
                        reverse
                            .get_or_insert_with(ReverseIndex::default)
                            .insert(code as u16, i as u8);
                    }
                }
            }
        }

        // control classification
        let mut ctrl = [0xff; 256];

        for i in 0..256 {
            if let Entry::Mapped(ch) = line.get(i as u8) {
                let code = ch as u32;

                if code < 0x20 || (0x7f..0xa0).contains(&code) {
                    ctrl[i] = i as u8;
                }
            }
        }

        // direct links into the font banks
        if matches!(self.mode, Mode::OemAnsi | Mode::Xterm) {
            scoacs.link(&oem, FontBank::Oem);
        }

        line.link(&font, FontBank::Ansi);
        scoacs.link(&font, FontBank::Ansi);
        xterm.link(&font, FontBank::Ansi);

        if matches!(self.mode, Mode::OemAnsi | Mode::Xterm) {
            line.link(&oem, FontBank::Oem);
            xterm.link(&oem, FontBank::Oem);
        }

        // Japanese and Korean codepage fonts put a currency glyph at
        // 0x5C but report its value as U+005C rather than U+00A5
        if dbcs && font_codepage != line_codepage {
            line.set(0x5c, Entry::DirectFont(FontBank::Oem, 0x5c));
        }

        // last chance: non-Unicode modes fall back to ASCII
        // approximations for whatever is still unlinked
        if self.mode != Mode::Unicode {
            for i in 160..256 {
                if let Entry::Mapped(ch) = line.get(i as u8) {
                    let code = ch as u32;

                    if (160..256).contains(&code) {
                        let byte = POORMAN_LATIN1[code as usize - 160];
                        line.set(i, Entry::DirectFont(FontBank::Ansi, byte));
                    }
                }
            }

            for i in 96..127 {
                if !xterm.get(i as u8).is_direct_font() {
                    xterm.set(i, Entry::DirectFont(FontBank::Ansi, POORMAN_VT100[i - 96]));
                }
            }

            for i in 128..256 {
                if !scoacs.get(i as u8).is_direct_font() {
                    scoacs.set(i, Entry::DirectFont(FontBank::Ansi, POORMAN_SCOACS[i - 128]));
                }
            }
        }

        debug!(
            "line cp{}, font cp{}{}",
            line_codepage.id(),
            font_codepage.id(),
            if dbcs { " dbcs" } else { "" }
        );

        if log_enabled!(Level::Trace) {
            let entries: Vec<Entry> = line.iter().collect();

            for (row, chunk) in entries.chunks(16).enumerate() {
                let cells: Vec<String> = chunk
                    .iter()
                    .map(|entry| match entry {
                        Entry::Mapped(ch) => format!("{:04x}", *ch as u32),
                        Entry::DirectChar(byte) => format!("c|{:02x}", byte),
                        Entry::DirectFont(FontBank::Ansi, byte) => format!("a|{:02x}", byte),
                        Entry::DirectFont(FontBank::Oem, byte) => format!("o|{:02x}", byte),
                    })
                    .collect();

                trace!("line {:02x}: {}", row * 16, cells.join(" "));
            }
        }

        Ok(Translator {
            line_codepage,
            font_codepage,
            dbcs_screenfont: dbcs,
            mode: self.mode,
            cjk_ambiguous_wide: self.cjk_ambiguous_wide,
            line,
            font,
            oem,
            scoacs,
            xterm,
            ctrl,
            reverse,
            codec,
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            line_codepage: None,
            font_codepage: 0,
            dbcs_screenfont: false,
            mode: Mode::Unicode,
            cjk_ambiguous_wide: false,
            codec: Arc::new(BuiltinCodec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Mode, Translator};
    use crate::codepage::Codepage;
    use crate::table::{Entry, FontBank};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn default_is_unicode_utf8() {
        let t = Translator::builder().build().unwrap();

        assert_eq!(t.line_codepage(), Codepage::UTF8);
        assert_eq!(t.font_codepage(), Codepage::ACP);
        assert_eq!(t.mode(), Mode::Unicode);
        assert!(!t.dbcs_screenfont());
    }

    #[test]
    fn ascii_links_to_font_positions() {
        let t = Translator::builder().build().unwrap();

        assert_eq!(t.decode_byte(b'A'), Entry::DirectFont(FontBank::Ansi, b'A'));
        assert_eq!(t.decode_byte(b' '), Entry::DirectFont(FontBank::Ansi, b' '));
    }

    #[test]
    fn high_bytes_stay_mapped_in_unicode_mode() {
        let t = Translator::builder().build().unwrap();

        assert_eq!(t.decode_byte(0xe9), Entry::Mapped('é'));
        assert_eq!(t.decode_byte(0xa0), Entry::Mapped('\u{a0}'));
    }

    #[test]
    fn unknown_line_codepage_is_an_error() {
        assert!(Translator::builder().line_codepage(70000).build().is_err());

        assert!(Translator::builder().line_codepage(-2).build().is_err());
    }

    #[test]
    fn controls_classify_under_line_codepage() {
        let t = Translator::builder().build().unwrap();

        assert_eq!(t.control(0x07), Some(0x07));
        assert_eq!(t.control(0x7f), Some(0x7f));
        assert_eq!(t.control(0x9b), Some(0x9b));
        assert_eq!(t.control(b'A'), None);
        assert_eq!(t.control(0xff), None);
    }

    #[test]
    fn encode_uses_reverse_index_for_line_codepage() {
        let t = Translator::builder().build().unwrap();
        let mut out = [0u8; 16];

        let (n, defaulted) = t.encode(Codepage::UTF8, "Aé", &mut out, None);

        assert_eq!(&out[..n], &[0x41, 0xe9]);
        assert!(!defaulted);
    }

    #[test]
    fn encode_substitutes_outside_line_codepage() {
        let t = Translator::builder().build().unwrap();
        let mut out = [0u8; 16];

        let (n, defaulted) = t.encode(Codepage::UTF8, "a♥b", &mut out, None);
        assert_eq!(&out[..n], b"a.b");
        assert!(!defaulted);

        let (n, defaulted) = t.encode(Codepage::UTF8, "a♥b", &mut out, Some(b"?"));
        assert_eq!(&out[..n], b"a?b");
        assert!(defaulted);
    }

    #[test]
    fn encode_other_codepages_via_codec() {
        let t = Translator::builder().build().unwrap();
        let mut out = [0u8; 16];

        let (n, _) = t.encode(Codepage(437), "é│", &mut out, None);

        assert_eq!(&out[..n], &[0x82, 0xb3]);
    }

    #[test]
    #[should_panic]
    fn encode_panics_when_out_fills() {
        let t = Translator::builder().build().unwrap();
        let mut out = [0u8; 2];

        t.encode(Codepage::UTF8, "ab", &mut out, None);
    }

    #[test]
    fn xterm_mode_overlays_graphics() {
        let t = Translator::builder().mode(Mode::Xterm).build().unwrap();

        // '┘' sits at 0x6a in the drawing set and at 11 in the patched
        // screen font
        assert_eq!(t.xterm().get(0x6a), Entry::DirectFont(FontBank::Ansi, 11));
        assert_eq!(t.font().get(11), Entry::Mapped('┘'));
        assert_eq!(t.xterm().get(0x5f), Entry::DirectFont(FontBank::Ansi, b' '));
    }

    #[test]
    fn oem_only_forces_cp437_font() {
        let t = Translator::builder()
            .mode(Mode::OemOnly)
            .line_codepage(-1)
            .build()
            .unwrap();

        assert_eq!(t.font_codepage(), Codepage(437));
        assert_eq!(t.line_codepage(), Codepage(1252));
        assert_eq!(t.decode_byte(0xe9), Entry::DirectFont(FontBank::Ansi, 0x82));
    }

    #[test]
    fn poorman_approximates_unlinked_characters() {
        let t = Translator::builder()
            .mode(Mode::OemOnly)
            .line_codepage(-1)
            .build()
            .unwrap();

        // 1252 multiply sign has no CP437 glyph
        assert_eq!(t.decode_byte(0xd7), Entry::DirectFont(FontBank::Ansi, b'x'));
    }

    #[test]
    fn poorman_glyph_font_goes_direct() {
        let t = Translator::builder()
            .mode(Mode::PoorMan)
            .line_codepage(437)
            .font_codepage(437)
            .build()
            .unwrap();

        assert_eq!(t.line_codepage(), Codepage(437));
        assert_eq!(t.decode_byte(b'A'), Entry::DirectFont(FontBank::Ansi, b'A'));
        assert_eq!(t.decode_byte(0xe9), Entry::DirectFont(FontBank::Ansi, 0xe9));

        // the glyph font has no control code points, so controls stay
        // mapped and keep their meaning
        assert_eq!(t.decode_byte(0x07), Entry::Mapped('\x07'));
        assert_eq!(t.decode_byte(0x7f), Entry::Mapped('\x7f'));

        // no reverse index in this setup; encoding goes to the codec
        let mut out = [0u8; 4];
        let (n, _) = t.encode(Codepage(437), "é", &mut out, None);
        assert_eq!(&out[..n], &[0x82]);
    }

    #[test]
    fn line_defers_to_codepage_less_font() {
        let t = Translator::builder()
            .mode(Mode::PoorMan)
            .line_codepage(-1)
            .build()
            .unwrap();

        assert_eq!(t.line_codepage(), Codepage::ACP);
        assert_eq!(t.decode_byte(0xe9), Entry::DirectFont(FontBank::Ansi, 0xe9));

        // the ANSI font table carries the control code points, so even
        // controls link through to font positions
        assert_eq!(t.decode_byte(0x07), Entry::DirectFont(FontBank::Ansi, 0x07));
        assert_eq!(t.control(0x07), Some(0x07));
    }

    #[test]
    fn poorman_latin1_line_approximates_into_ascii_font() {
        let t = Translator::builder()
            .mode(Mode::PoorMan)
            .line_codepage(65537)
            .build()
            .unwrap();

        assert_eq!(t.line_codepage(), Codepage(65537));
        assert_eq!(t.decode_byte(0xe9), Entry::DirectFont(FontBank::Ansi, b'e'));
        assert_eq!(t.decode_byte(0xd7), Entry::DirectFont(FontBank::Ansi, b'x'));
    }

    #[test]
    fn poorman_xterm_graphics_fall_back_to_ascii() {
        let t = Translator::builder()
            .mode(Mode::PoorMan)
            .line_codepage(65537)
            .build()
            .unwrap();

        // '┘' at 0x6a approximates to '+'
        assert_eq!(t.xterm().get(0x6a), Entry::DirectFont(FontBank::Ansi, b'+'));
    }

    #[test]
    fn oem_ansi_clones_oem_into_scoacs() {
        let t = Translator::builder().mode(Mode::OemAnsi).build().unwrap();

        assert_eq!(t.scoacs().get(0xb3), Entry::DirectFont(FontBank::Oem, 0xb3));
    }

    #[test]
    fn unicode_mode_keeps_scoacs_mapped() {
        let t = Translator::builder().build().unwrap();

        assert_eq!(t.scoacs().get(0xb3), Entry::Mapped('│'));
    }

    #[test]
    fn dbcs_font_hides_currency_backslash() {
        let t = Translator::builder()
            .line_codepage(65001)
            .font_codepage(932)
            .dbcs_screenfont(true)
            .build()
            .unwrap();

        assert!(t.dbcs_screenfont());
        assert_eq!(t.decode_byte(0x5c), Entry::DirectFont(FontBank::Oem, 0x5c));
    }

    #[test]
    fn nonpositive_font_codepage_clears_dbcs() {
        let t = Translator::builder()
            .font_codepage(-7)
            .dbcs_screenfont(true)
            .build()
            .unwrap();

        assert_eq!(t.font_codepage(), Codepage::ACP);
        assert!(!t.dbcs_screenfont());
    }

    #[test]
    fn decode_is_total() {
        for mode in [
            Mode::Unicode,
            Mode::OemAnsi,
            Mode::Xterm,
            Mode::OemOnly,
            Mode::PoorMan,
        ] {
            let t = Translator::builder().mode(mode).build().unwrap();

            for byte in 0..=255u8 {
                let _ = t.decode_byte(byte);
                let _ = t.control(byte);
            }
        }
    }

    #[test]
    fn char_widths() {
        let narrow = Translator::builder().build().unwrap();
        let wide = Translator::builder().cjk_ambiguous_wide(true).build().unwrap();

        assert_eq!(narrow.char_width('A'), Some(1));
        assert_eq!(narrow.char_width('世'), Some(2));
        assert_eq!(narrow.char_width('\u{301}'), Some(0));
        assert_eq!(narrow.char_width('\x07'), None);
        assert_eq!(narrow.char_width('±'), Some(1));
        assert_eq!(wide.char_width('±'), Some(2));
    }

    proptest! {
        #[test]
        fn prop_build_is_total(line in -1i32..70000, font in -10i32..1300, mode_index in 0usize..5, dbcs: bool) {
            let modes = [
                Mode::Unicode,
                Mode::OemAnsi,
                Mode::Xterm,
                Mode::OemOnly,
                Mode::PoorMan,
            ];

            let mut builder = Translator::builder();
            builder.line_codepage(line).font_codepage(font).dbcs_screenfont(dbcs).mode(modes[mode_index]);

            if let Ok(t) = builder.build() {
                for byte in 0..=255u8 {
                    let _ = t.decode_byte(byte);
                    let _ = t.control(byte);
                }
            }
        }

        #[test]
        fn prop_unambiguous_bytes_round_trip(byte: u8) {
            let t = Translator::builder().line_codepage(1252).build().unwrap();

            if let Entry::Mapped(ch) = t.decode_byte(byte) {
                let preimages = (0..=255u8)
                    .filter(|&b| t.decode_byte(b) == Entry::Mapped(ch))
                    .count();

                if preimages == 1 {
                    let mut out = [0u8; 8];
                    let (n, defaulted) = t.encode(t.line_codepage(), &ch.to_string(), &mut out, None);

                    assert_eq!((n, defaulted), (1, false));
                    assert_eq!(out[0], byte);
                }
            }
        }
    }
}
