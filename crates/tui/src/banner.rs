use std::collections::HashMap;

use once_cell::sync::Lazy;

const ROWS: usize = 5;
const COLS: usize = 5;
const GAP: usize = 1;
const INK: char = '█';

type Glyph = [&'static str; ROWS];

// Only the letters the hero wordmark needs; anything else draws as a gap.
static GLYPHS: Lazy<HashMap<char, Glyph>> = Lazy::new(|| {
    HashMap::from([
        ('A', [" ### ", "#   #", "#####", "#   #", "#   #"]),
        ('E', ["#####", "#    ", "#### ", "#    ", "#####"]),
        ('N', ["#   #", "##  #", "# # #", "#  ##", "#   #"]),
        ('T', ["#####", "  #  ", "  #  ", "  #  ", "  #  "]),
        ('V', ["#   #", "#   #", "#   #", " # # ", "  #  "]),
        ('W', ["#   #", "#   #", "# # #", "## ##", "#   #"]),
        ('X', ["#   #", " # # ", "  #  ", " # # ", "#   #"]),
    ])
});

/// Render `text` as block letters, one string per row.
pub fn render(text: &str) -> Vec<String> {
    let letters: Vec<char> = text.chars().map(|c| c.to_ascii_uppercase()).collect();
    let mut rows = vec![String::new(); ROWS];

    for (index, letter) in letters.iter().enumerate() {
        let glyph = GLYPHS.get(letter);
        for (row_idx, row) in rows.iter_mut().enumerate() {
            if index > 0 {
                row.extend(std::iter::repeat(' ').take(GAP));
            }
            match glyph {
                Some(glyph) => row.extend(glyph[row_idx].chars().map(|cell| {
                    if cell == '#' {
                        INK
                    } else {
                        ' '
                    }
                })),
                None => row.extend(std::iter::repeat(' ').take(COLS)),
            }
        }
    }

    rows.into_iter()
        .map(|row| row.trim_end().to_string())
        .collect()
}

/// Width in cells of the rendered `text`.
pub fn width(text: &str) -> usize {
    let count = text.chars().count();
    count * COLS + count.saturating_sub(1) * GAP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wordmark_has_fixed_height_and_width() {
        let rows = render("NextWave");
        assert_eq!(rows.len(), ROWS);
        assert!(rows.iter().all(|row| row.chars().count() <= width("NextWave")));
        assert_eq!(rows[0].chars().next(), Some(INK));
    }

    #[test]
    fn unknown_letters_leave_a_gap() {
        let rows = render("N?");
        assert_eq!(rows[2], "█ █ █");
    }
}
