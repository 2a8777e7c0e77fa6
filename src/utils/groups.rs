//! Five-letter output grouping.
//!
//! Cipher text is traditionally transmitted in blocks of five symbols so
//! that word lengths do not leak. Spaces in the input are dropped before
//! regrouping.

/// Number of symbols per output group.
pub const GROUP_SIZE: usize = 5;

/// Removes spaces from `msg` and re-emits it in groups of [`GROUP_SIZE`]
/// separated by single spaces. The last group may be shorter.
///
/// # Examples
///
/// ```
/// use enigma::utils::groups::five_letter_groups;
///
/// assert_eq!(five_letter_groups("QVPQ SOKOILP"), "QVPQS OKOIL P");
/// assert_eq!(five_letter_groups(""), "");
/// ```
pub fn five_letter_groups(msg: &str) -> String {
    let symbols: Vec<char> = msg.chars().filter(|&c| c != ' ').collect();
    let mut output = String::with_capacity(symbols.len() + symbols.len() / GROUP_SIZE);
    for (i, chunk) in symbols.chunks(GROUP_SIZE).enumerate() {
        if i > 0 {
            output.push(' ');
        }
        output.extend(chunk);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multiple() {
        assert_eq!(five_letter_groups("ABCDEFGHIJ"), "ABCDE FGHIJ");
    }

    #[test]
    fn test_short_last_group() {
        assert_eq!(
            five_letter_groups("QVPQSOKOILPUBKJZPISFXDW"),
            "QVPQS OKOIL PUBKJ ZPISF XDW"
        );
    }

    #[test]
    fn test_spaces_removed() {
        assert_eq!(five_letter_groups("  AB  CD EF "), "ABCDE F");
        assert_eq!(five_letter_groups("     "), "");
    }
}
