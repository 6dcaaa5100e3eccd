mod codec;
mod codepage;
mod compose;
mod table;
mod translator;
pub use codec::{BuiltinCodec, Codec};
pub use codepage::{Codepage, CodepageSpec, UnknownCodepage};
pub use compose::{compose, us_to_cyrillic};
pub use table::{Entry, FontBank, TableMode, UnicodeTable};
pub use translator::{Builder, Mode, Translator};
