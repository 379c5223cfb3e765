/// Advance widths of the printable ASCII characters (`' '` through `'~'`) in
/// the standard Helvetica font, in thousandths of an em
static HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' ..= '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' ..= '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' ..= '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' ..= 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' ..= 'Z'
    278, 278, 278, 469, 556, 333, // '[' ..= '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' ..= 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' ..= 'z'
    334, 260, 334, 584, // '{' ..= '~'
];

/// Width used for characters outside the table
const FALLBACK_WIDTH: u16 = 556;

const EN_DASH_WIDTH: u16 = 556;

fn char_width(ch: char) -> u16 {
    match ch {
        ' '..='~' => {
            let i = usize::from(u8::try_from(ch).unwrap_or(b'?') - b' ');
            HELVETICA_WIDTHS.get(i).copied().unwrap_or(FALLBACK_WIDTH)
        }
        '\u{2013}' => EN_DASH_WIDTH,
        _ => FALLBACK_WIDTH,
    }
}

/// Width in points of `text` set in regular Helvetica at `size` points
pub(crate) fn text_width(text: &str, size: f32) -> f32 {
    let units: f32 = text.chars().map(|ch| f32::from(char_width(ch))).sum();
    units * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert!((text_width("28", 8.0) - 8.896).abs() < 1e-4);
    }

    #[test]
    fn test_weekday_initials() {
        assert_eq!(char_width('S'), 667);
        assert_eq!(char_width('M'), 833);
        assert_eq!(char_width('T'), 611);
        assert_eq!(char_width('W'), 944);
        assert_eq!(char_width('F'), 611);
    }

    #[test]
    fn test_table_alignment() {
        assert_eq!(char_width(' '), 278);
        assert_eq!(char_width('@'), 1015);
        assert_eq!(char_width('a'), 556);
        assert_eq!(char_width('i'), 222);
        assert_eq!(char_width('~'), 584);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(char_width('\u{2013}'), 556);
        assert_eq!(char_width('é'), FALLBACK_WIDTH);
    }

    #[test]
    fn test_empty() {
        assert!(text_width("", 12.0).abs() < f32::EPSILON);
    }
}
