//! Line breaking rules for CJK text

/// Check if a character is a CJK character (ideographs, kana, hangul,
/// CJK punctuation and fullwidth forms)
pub fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3000}'..='\u{303F}' | // CJK symbols and punctuation
        '\u{3040}'..='\u{309F}' | // Hiragana
        '\u{30A0}'..='\u{30FF}' | // Katakana
        '\u{3400}'..='\u{4DBF}' | // Extension A
        '\u{4E00}'..='\u{9FFF}' | // Unified ideographs
        '\u{AC00}'..='\u{D7AF}' | // Hangul syllables
        '\u{F900}'..='\u{FAFF}' | // Compatibility ideographs
        '\u{FF00}'..='\u{FFEF}'   // Halfwidth and fullwidth forms
    )
}

/// Check if a character must not start a line (closing punctuation)
pub fn is_no_break_before(c: char) -> bool {
    matches!(
        c,
        '，' | '。'
            | '、'
            | '；'
            | '：'
            | '！'
            | '？'
            | '）'
            | '」'
            | '』'
            | '》'
            | '〉'
            | '】'
            | '〕'
            | '～'
            | '…'
            | '\u{201D}' // right double quotation mark
            | '\u{2019}' // right single quotation mark
            | ','
            | '.'
            | ';'
            | ':'
            | '!'
            | '?'
            | ')'
            | ']'
            | '}'
            | '%'
    )
}

/// Check if a character must not end a line (opening punctuation)
pub fn is_no_break_after(c: char) -> bool {
    matches!(
        c,
        '（' | '「'
            | '『'
            | '《'
            | '〈'
            | '【'
            | '〔'
            | '\u{201C}' // left double quotation mark
            | '\u{2018}' // left single quotation mark
            | '('
            | '['
            | '{'
    )
}

/// Check if breaking between two characters is allowed
///
/// Returns true if a line break is allowed between `left` and `right`.
pub fn can_break_between(left: char, right: char) -> bool {
    if is_no_break_before(right) || is_no_break_after(left) {
        return false;
    }

    // Dash and ellipsis pairs ("——", "……") stay together
    if left == right && matches!(left, '—' | '…') {
        return false;
    }

    // Spaces stay at the end of the unit they follow
    if right.is_whitespace() {
        return false;
    }
    if left.is_whitespace() {
        return true;
    }

    if is_cjk(left) || is_cjk(right) {
        return true;
    }

    // Hyphenated Latin words may break after the hyphen
    left == '-' && right.is_alphanumeric()
}

/// Find safe break points in text
///
/// Returns character indices where line breaks are allowed, including the
/// start and end of the text.
pub fn find_break_points(text: &str) -> Vec<usize> {
    let chars: Vec<char> = text.chars().collect();
    let mut break_points = Vec::new();

    break_points.push(0);

    for i in 1..chars.len() {
        if can_break_between(chars[i - 1], chars[i]) {
            break_points.push(i);
        }
    }

    if !chars.is_empty() {
        break_points.push(chars.len());
    }

    break_points
}
