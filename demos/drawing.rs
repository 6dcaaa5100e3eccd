// Renders the VT100 line drawing range through an xterm-mode
// translator, resolving direct font links back to their glyphs, then
// re-encodes a string into the line codepage.

use unitab::{Codepage, Entry, Mode, Translator};

fn main() {
    let translator = Translator::builder()
        .mode(Mode::Xterm)
        .line_codepage("UTF-8")
        .build()
        .unwrap();

    for byte in 0x5f..0x7f {
        let glyph = match translator.xterm().get(byte) {
            Entry::Mapped(ch) => ch,
            Entry::DirectChar(byte) => byte as char,
            Entry::DirectFont(_, position) => {
                translator.font().get(position).to_char().unwrap_or('?')
            }
        };

        print!("{glyph}");
    }

    println!();

    let mut out = [0u8; 64];
    let (written, _) = translator.encode(Codepage::OEMCP, "résumé", &mut out, None);
    println!("{:02x?}", &out[..written]);
}
