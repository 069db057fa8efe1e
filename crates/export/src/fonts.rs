//! Helvetica advance widths, in thousandths of an em, for width estimates.

/// Printable ASCII 0x20..=0x7E, Helvetica
const REGULAR: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Printable ASCII 0x20..=0x7E, Helvetica-Bold
const BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const DEFAULT_WIDTH: u16 = 556;
const MM_PER_POINT: f64 = 25.4 / 72.0;

/// Accented Latin letters are as wide as their base letter
fn base_letter(c: char) -> Option<char> {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ÿ' | 'ý' => 'y',
        '’' | '‘' => '\'',
        '–' => '-',
        _ => return None,
    };
    Some(base)
}

fn glyph_width(c: char, bold: bool) -> u16 {
    let table = if bold { &BOLD } else { &REGULAR };
    let lookup = |ch: char| {
        let code = ch as u32;
        (0x20..=0x7E)
            .contains(&code)
            .then(|| table[(code - 0x20) as usize])
    };
    match c {
        'œ' | 'Œ' | '—' => 1000,
        '\u{a0}' | '\u{202f}' => table[0],
        _ => lookup(c)
            .or_else(|| base_letter(c).and_then(lookup))
            .unwrap_or(DEFAULT_WIDTH),
    }
}

/// Rendered width of `text` in millimetres at `size` points
pub fn text_width_mm(text: &str, size: f64, bold: bool) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c, bold))).sum();
    f64::from(units) / 1000.0 * size * MM_PER_POINT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        // "Hello" = 722 + 556 + 222 + 222 + 556 = 2278 units
        let expected = 2.278 * 12.0 * MM_PER_POINT;
        assert!((text_width_mm("Hello", 12.0, false) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_accents_use_base_width() {
        assert_eq!(
            text_width_mm("été", 11.0, false),
            text_width_mm("ete", 11.0, false)
        );
    }

    #[test]
    fn test_bold_is_wider() {
        assert!(text_width_mm("Rentabilité", 12.0, true) > text_width_mm("Rentabilité", 12.0, false));
    }

    #[test]
    fn test_empty_text_has_no_width() {
        assert_eq!(text_width_mm("", 16.0, true), 0.0);
    }
}
