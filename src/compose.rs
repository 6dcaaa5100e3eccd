// the pair is tried as given, then swapped, then ASCII-uppercased in
// both orders; the first matching table entry wins
pub fn compose(first: char, second: char) -> Option<char> {
    lookup(first, second)
        .or_else(|| lookup(second, first))
        .or_else(|| {
            let (first, second) = (first.to_ascii_uppercase(), second.to_ascii_uppercase());
            lookup(first, second).or_else(|| lookup(second, first))
        })
}

fn lookup(first: char, second: char) -> Option<char> {
    COMPOSE_TABLE
        .iter()
        .find(|&&(a, b, _)| a as char == first && b as char == second)
        .map(|&(_, _, composed)| composed)
}

// US keyboard to Russian layout; input is folded to 7 bits first, and
// characters without a Cyrillic counterpart come back unchanged
pub fn us_to_cyrillic(ch: char) -> char {
    let folded = (ch as u32) & 0x7f;
    if folded < 0x20 {
        return folded as u8 as char;
    }
    CYRILLIC[folded as usize - 0x20]
}

#[rustfmt::skip]
const CYRILLIC: [char; 96] = [
    ' ', '!', 'Э', '#', '$', '%', '&', 'э', '(', ')', '*', 'І', 'б', 'є', 'ю', '.',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'Ж', 'ж', 'Б', 'і', 'Ю', ',',
    '@', 'Ф', 'И', 'С', 'В', 'У', 'А', 'П', 'Р', 'Ш', 'О', 'Л', 'Д', 'Ь', 'Т', 'Щ',
    'З', 'Й', 'К', 'Ы', 'Е', 'Г', 'М', 'Ц', 'Ч', 'Н', 'Я', 'х', 'ї', 'ъ', '^', 'Є',
    '`', 'ф', 'и', 'с', 'в', 'у', 'а', 'п', 'р', 'ш', 'о', 'л', 'д', 'ь', 'т', 'щ',
    'з', 'й', 'к', 'ы', 'е', 'г', 'м', 'ц', 'ч', 'н', 'я', 'Х', 'Ї', 'Ъ', '~', '\u{7f}',
];

#[rustfmt::skip]
const COMPOSE_TABLE: &[(u8, u8, char)] = &[
    (b'+', b'+', '#'), (b'A', b'A', '@'), (b'(', b'(', '['), (b'/', b'/', '\\'),
    (b')', b')', ']'), (b'(', b'-', '{'), (b'-', b')', '}'), (b'/', b'^', '|'),
    (b'!', b'!', '¡'), (b'C', b'/', '¢'), (b'C', b'|', '¢'), (b'L', b'-', '£'),
    (b'L', b'=', '₤'), (b'X', b'O', '¤'), (b'X', b'0', '¤'), (b'Y', b'-', '¥'),
    (b'Y', b'=', '¥'), (b'|', b'|', '¦'), (b'S', b'O', '§'), (b'S', b'!', '§'),
    (b'S', b'0', '§'), (b'"', b'"', '¨'), (b'C', b'O', '©'), (b'C', b'0', '©'),
    (b'A', b'_', 'ª'), (b'<', b'<', '«'), (b',', b'-', '¬'), (b'-', b'-', '\u{ad}'),
    (b'R', b'O', '®'), (b'-', b'^', '¯'), (b'0', b'^', '°'), (b'+', b'-', '±'),
    (b'2', b'^', '²'), (b'3', b'^', '³'), (b'\'', b'\'', '´'), (b'/', b'U', 'µ'),
    (b'P', b'!', '¶'), (b'.', b'^', '·'), (b',', b',', '¸'), (b'1', b'^', '¹'),
    (b'O', b'_', 'º'), (b'>', b'>', '»'), (b'1', b'4', '¼'), (b'1', b'2', '½'),
    (b'3', b'4', '¾'), (b'?', b'?', '¿'), (b'`', b'A', 'À'), (b'\'', b'A', 'Á'),
    (b'^', b'A', 'Â'), (b'~', b'A', 'Ã'), (b'"', b'A', 'Ä'), (b'*', b'A', 'Å'),
    (b'A', b'E', 'Æ'), (b',', b'C', 'Ç'), (b'`', b'E', 'È'), (b'\'', b'E', 'É'),
    (b'^', b'E', 'Ê'), (b'"', b'E', 'Ë'), (b'`', b'I', 'Ì'), (b'\'', b'I', 'Í'),
    (b'^', b'I', 'Î'), (b'"', b'I', 'Ï'), (b'-', b'D', 'Ð'), (b'~', b'N', 'Ñ'),
    (b'`', b'O', 'Ò'), (b'\'', b'O', 'Ó'), (b'^', b'O', 'Ô'), (b'~', b'O', 'Õ'),
    (b'"', b'O', 'Ö'), (b'X', b'X', '×'), (b'/', b'O', 'Ø'), (b'`', b'U', 'Ù'),
    (b'\'', b'U', 'Ú'), (b'^', b'U', 'Û'), (b'"', b'U', 'Ü'), (b'\'', b'Y', 'Ý'),
    (b'H', b'T', 'Þ'), (b's', b's', 'ß'), (b'`', b'a', 'à'), (b'\'', b'a', 'á'),
    (b'^', b'a', 'â'), (b'~', b'a', 'ã'), (b'"', b'a', 'ä'), (b'*', b'a', 'å'),
    (b'a', b'e', 'æ'), (b',', b'c', 'ç'), (b'`', b'e', 'è'), (b'\'', b'e', 'é'),
    (b'^', b'e', 'ê'), (b'"', b'e', 'ë'), (b'`', b'i', 'ì'), (b'\'', b'i', 'í'),
    (b'^', b'i', 'î'), (b'"', b'i', 'ï'), (b'-', b'd', 'ð'), (b'~', b'n', 'ñ'),
    (b'`', b'o', 'ò'), (b'\'', b'o', 'ó'), (b'^', b'o', 'ô'), (b'~', b'o', 'õ'),
    (b'"', b'o', 'ö'), (b':', b'-', '÷'), (b'o', b'/', 'ø'), (b'`', b'u', 'ù'),
    (b'\'', b'u', 'ú'), (b'^', b'u', 'û'), (b'"', b'u', 'ü'), (b'\'', b'y', 'ý'),
    (b'h', b't', 'þ'), (b'"', b'y', 'ÿ'), (b'o', b'e', 'œ'), (b'O', b'E', 'Œ'),
    (b'A', b'-', 'Ā'), (b'a', b'-', 'ā'), (b'C', b'\'', 'Ć'), (b'c', b'\'', 'ć'),
    (b'C', b'^', 'Ĉ'), (b'c', b'^', 'ĉ'), (b'E', b'-', 'Ē'), (b'e', b'-', 'ē'),
    (b'G', b'^', 'Ĝ'), (b'g', b'^', 'ĝ'), (b'G', b',', 'Ģ'), (b'g', b',', 'ģ'),
    (b'H', b'^', 'Ĥ'), (b'h', b'^', 'ĥ'), (b'I', b'~', 'Ĩ'), (b'i', b'~', 'ĩ'),
    (b'I', b'-', 'Ī'), (b'i', b'-', 'ī'), (b'J', b'^', 'Ĵ'), (b'j', b'^', 'ĵ'),
    (b'K', b',', 'Ķ'), (b'k', b',', 'ķ'), (b'L', b'\'', 'Ĺ'), (b'l', b'\'', 'ĺ'),
    (b'L', b',', 'Ļ'), (b'l', b',', 'ļ'), (b'N', b'\'', 'Ń'), (b'n', b'\'', 'ń'),
    (b'N', b',', 'Ņ'), (b'n', b',', 'ņ'), (b'O', b'-', 'Ō'), (b'o', b'-', 'ō'),
    (b'R', b'\'', 'Ŕ'), (b'r', b'\'', 'ŕ'), (b'R', b',', 'Ŗ'), (b'r', b',', 'ŗ'),
    (b'S', b'\'', 'Ś'), (b's', b'\'', 'ś'), (b'S', b'^', 'Ŝ'), (b's', b'^', 'ŝ'),
    (b'S', b',', 'Ş'), (b's', b',', 'ş'), (b'T', b',', 'Ţ'), (b't', b',', 'ţ'),
    (b'U', b'~', 'Ũ'), (b'u', b'~', 'ũ'), (b'U', b'-', 'Ū'), (b'u', b'-', 'ū'),
    (b'U', b'*', 'Ů'), (b'u', b'*', 'ů'), (b'W', b'^', 'Ŵ'), (b'w', b'^', 'ŵ'),
    (b'Y', b'^', 'Ŷ'), (b'y', b'^', 'ŷ'), (b'Y', b'"', 'Ÿ'), (b'Z', b'\'', 'Ź'),
    (b'z', b'\'', 'ź'), (b'G', b'\'', 'Ǵ'), (b'g', b'\'', 'ǵ'), (b'N', b'`', 'Ǹ'),
    (b'n', b'`', 'ǹ'), (b'E', b',', 'Ȩ'), (b'e', b',', 'ȩ'), (b'y', b'-', 'ȳ'),
    (b'D', b',', 'Ḑ'), (b'd', b',', 'ḑ'), (b'G', b'-', 'Ḡ'), (b'g', b'-', 'ḡ'),
    (b'H', b'"', 'Ḧ'), (b'h', b'"', 'ḧ'), (b'H', b',', 'Ḩ'), (b'h', b',', 'ḩ'),
    (b'K', b'\'', 'Ḱ'), (b'k', b'\'', 'ḱ'), (b'M', b'\'', 'Ḿ'), (b'm', b'\'', 'ḿ'),
    (b'P', b'\'', 'Ṕ'), (b'p', b'\'', 'ṕ'), (b'V', b'~', 'Ṽ'), (b'v', b'~', 'ṽ'),
    (b'W', b'`', 'Ẁ'), (b'w', b'`', 'ẁ'), (b'W', b'\'', 'Ẃ'), (b'w', b'\'', 'ẃ'),
    (b'W', b'"', 'Ẅ'), (b'w', b'"', 'ẅ'), (b'X', b'"', 'Ẍ'), (b'x', b'"', 'ẍ'),
    (b'Z', b'^', 'Ẑ'), (b'z', b'^', 'ẑ'), (b't', b'"', 'ẗ'), (b'w', b'*', 'ẘ'),
    (b'y', b'*', 'ẙ'), (b'E', b'~', 'Ẽ'), (b'e', b'~', 'ẽ'), (b'Y', b'`', 'Ỳ'),
    (b'y', b'`', 'ỳ'), (b'Y', b'~', 'Ỹ'), (b'y', b'~', 'ỹ'), (b'I', b'J', 'Ĳ'),
    (b'i', b'j', 'ĳ'), (b'L', b'J', 'Ǉ'), (b'L', b'j', 'ǈ'), (b'l', b'j', 'ǉ'),
    (b'N', b'J', 'Ǌ'), (b'N', b'j', 'ǋ'), (b'n', b'j', 'ǌ'), (b'D', b'Z', 'Ǳ'),
    (b'D', b'z', 'ǲ'), (b'd', b'z', 'ǳ'), (b'.', b'.', '‥'), (b'?', b'!', '⁈'),
    (b'!', b'?', '⁉'), (b'R', b's', '₨'), (b'N', b'o', '№'), (b'S', b'M', '℠'),
    (b'T', b'M', '™'), (b'I', b'I', 'Ⅱ'), (b'I', b'V', 'Ⅳ'), (b'V', b'I', 'Ⅵ'),
    (b'I', b'X', 'Ⅸ'), (b'X', b'I', 'Ⅺ'), (b'i', b'i', 'ⅱ'), (b'i', b'v', 'ⅳ'),
    (b'v', b'i', 'ⅵ'), (b'i', b'x', 'ⅸ'), (b'x', b'i', 'ⅺ'), (b'1', b'0', '⑩'),
    (b'1', b'1', '⑪'), (b'1', b'3', '⑬'), (b'1', b'5', '⑮'), (b'1', b'6', '⑯'),
    (b'1', b'7', '⑰'), (b'1', b'8', '⑱'), (b'1', b'9', '⑲'), (b'2', b'0', '⑳'),
    (b'1', b'.', '⒈'), (b'2', b'.', '⒉'), (b'3', b'.', '⒊'), (b'4', b'.', '⒋'),
    (b'5', b'.', '⒌'), (b'6', b'.', '⒍'), (b'7', b'.', '⒎'), (b'8', b'.', '⒏'),
    (b'9', b'.', '⒐'), (b'd', b'a', '㍲'), (b'A', b'U', '㍳'), (b'o', b'V', '㍵'),
    (b'p', b'c', '㍶'), (b'p', b'A', '㎀'), (b'n', b'A', '㎁'), (b'm', b'A', '㎃'),
    (b'k', b'A', '㎄'), (b'K', b'B', '㎅'), (b'M', b'B', '㎆'), (b'G', b'B', '㎇'),
    (b'p', b'F', '㎊'), (b'n', b'F', '㎋'), (b'm', b'g', '㎎'), (b'k', b'g', '㎏'),
    (b'H', b'z', '㎐'), (b'f', b'm', '㎙'), (b'n', b'm', '㎚'), (b'm', b'm', '㎜'),
    (b'c', b'm', '㎝'), (b'k', b'm', '㎞'), (b'P', b'a', '㎩'), (b'p', b's', '㎰'),
    (b'n', b's', '㎱'), (b'm', b's', '㎳'), (b'p', b'V', '㎴'), (b'n', b'V', '㎵'),
    (b'm', b'V', '㎷'), (b'k', b'V', '㎸'), (b'M', b'V', '㎹'), (b'p', b'W', '㎺'),
    (b'n', b'W', '㎻'), (b'm', b'W', '㎽'), (b'k', b'W', '㎾'), (b'M', b'W', '㎿'),
    (b'B', b'q', '㏃'), (b'c', b'c', '㏄'), (b'c', b'd', '㏅'), (b'd', b'B', '㏈'),
    (b'G', b'y', '㏉'), (b'h', b'a', '㏊'), (b'H', b'P', '㏋'), (b'i', b'n', '㏌'),
    (b'K', b'K', '㏍'), (b'K', b'M', '㏎'), (b'k', b't', '㏏'), (b'l', b'm', '㏐'),
    (b'l', b'n', '㏑'), (b'l', b'x', '㏓'), (b'm', b'b', '㏔'), (b'P', b'H', '㏗'),
    (b'P', b'R', '㏚'), (b's', b'r', '㏛'), (b'S', b'v', '㏜'), (b'W', b'b', '㏝'),
    (b'f', b'f', 'ﬀ'), (b'f', b'i', 'ﬁ'), (b'f', b'l', 'ﬂ'), (b's', b't', 'ﬆ'),
];
