//! UTF-8 safe string preview helpers.
//!
//! Log lines show the start of knowledge text and visitor messages; these
//! helpers cut by character rather than byte so multibyte text never panics.

/// Return a preview of `s` up to `n` characters. If `s` is longer than `n`
/// characters, the returned string ends with `...`.
pub fn preview(s: &str, n: usize) -> String {
    let mut prefix: String = s.chars().take(n).collect();
    if s.chars().nth(n).is_some() {
        prefix.push_str("...");
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_basic_ascii() {
        let s = "hello world";
        assert_eq!(preview(s, 5), "hello...");
        assert_eq!(preview(s, 11), "hello world");
        assert_eq!(preview(s, 20), "hello world");
    }

    #[test]
    fn preview_multibyte() {
        let s = "Café résumé – naïve";
        let p = preview(s, 4);
        assert_eq!(p, "Café...");
    }

    #[test]
    fn preview_empty() {
        assert_eq!(preview("", 10), "");
    }
}
