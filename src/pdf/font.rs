//! Helvetica metrics and WinAnsi text encoding for generated pages
//!
//! Title pages use the standard Helvetica font, one of the 14 base fonts every
//! PDF reader ships, so no font program needs to be embedded. Text is written
//! as single-byte WinAnsiEncoding strings.

use lopdf::{Dictionary, Document, Object, ObjectId};

/// Resource name the generated content streams use for the font
pub const FONT_RESOURCE: &str = "F1";

/// Helvetica advance widths for WinAnsi codes 32..=255, in 1/1000 em
///
/// Codes that WinAnsiEncoding leaves undefined carry the bullet width so a
/// stray lookup never yields zero.
const HELVETICA_WIDTHS: [u16; 224] = [
    // 32..=47   space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 48..=63   0-9 : ; < = > ?
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    // 64..=79   @ A-O
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    // 80..=95   P-Z [ \ ] ^ _
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    // 96..=111  ` a-o
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // 112..=127 p-z { | } ~ DEL
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 350,
    // 128..=143 € undef ‚ ƒ „ … † ‡ ˆ ‰ Š ‹ Œ undef Ž undef
    556, 350, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    // 144..=159 undef ‘ ’ “ ” • – — ˜ ™ š › œ undef ž Ÿ
    350, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 350, 500, 667,
    // 160..=175 nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 176..=191 ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 192..=207 À-Ï
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 208..=223 Ð-ß
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 224..=239 à-ï
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // 240..=255 ð-ÿ
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Map one character to its WinAnsiEncoding byte
///
/// Returns `None` for characters the encoding cannot represent, including
/// control characters.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c {
        ' '..='~' => Some(c as u8),
        '\u{A0}'..='\u{FF}' => Some(c as u32 as u8),
        '€' => Some(128),
        '‚' => Some(130),
        'ƒ' => Some(131),
        '„' => Some(132),
        '…' => Some(133),
        '†' => Some(134),
        '‡' => Some(135),
        'ˆ' => Some(136),
        '‰' => Some(137),
        'Š' => Some(138),
        '‹' => Some(139),
        'Œ' => Some(140),
        'Ž' => Some(142),
        '‘' => Some(145),
        '’' => Some(146),
        '“' => Some(147),
        '”' => Some(148),
        '•' => Some(149),
        '–' => Some(150),
        '—' => Some(151),
        '˜' => Some(152),
        '™' => Some(153),
        'š' => Some(154),
        '›' => Some(155),
        'œ' => Some(156),
        'ž' => Some(158),
        'Ÿ' => Some(159),
        _ => None,
    }
}

/// Encode a line of text as WinAnsi bytes
///
/// On failure returns the first character that has no WinAnsi code.
pub fn encode_win_ansi(text: &str) -> std::result::Result<Vec<u8>, char> {
    text.chars()
        .map(|c| win_ansi_byte(c).ok_or(c))
        .collect()
}

/// Width of WinAnsi-encoded text set in Helvetica, in points
pub fn text_width(encoded: &[u8], font_size: f64) -> f64 {
    let units: u32 = encoded
        .iter()
        .filter(|&&b| b >= 32)
        .map(|&b| u32::from(HELVETICA_WIDTHS[usize::from(b) - 32]))
        .sum();
    f64::from(units) * font_size / 1000.0
}

/// Add a Helvetica font dictionary with WinAnsiEncoding to a document
pub fn add_helvetica(doc: &mut Document) -> ObjectId {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));

    doc.add_object(Object::Dictionary(font))
}
