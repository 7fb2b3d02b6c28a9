//! Greedy word wrap bounded by a measured width.
//!
//! Words are whitespace-delimited and appended to the current line until the
//! next one would overflow `max_width`. A word wider than the whole line is
//! placed alone on its own line (no hyphenation). Fragments are produced lazily
//! and a [`Wrap`] can be iterated any number of times.

use std::str::SplitWhitespace;

/// Wrap settings over borrowed text. Iterate it (by reference) to get lines.
pub struct Wrap<'a, F> {
    text: &'a str,
    max_width: f32,
    measure: F,
}

impl<'a, F> Wrap<'a, F>
where
    F: Fn(&str) -> f32,
{
    pub fn new(text: &'a str, max_width: f32, measure: F) -> Self {
        Wrap {
            text,
            max_width,
            measure,
        }
    }

    /// Starts a fresh pass over the text.
    pub fn lines(&self) -> WrapLines<'_, F> {
        WrapLines {
            words: self.text.split_whitespace(),
            carry: None,
            max_width: self.max_width,
            measure: &self.measure,
        }
    }
}

impl<'w, 'a, F> IntoIterator for &'w Wrap<'a, F>
where
    F: Fn(&str) -> f32,
{
    type Item = String;
    type IntoIter = WrapLines<'w, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}

/// Iterator over the wrapped fragments of one [`Wrap`].
pub struct WrapLines<'w, F> {
    words: SplitWhitespace<'w>,
    /// First word of the next line, pulled while filling the previous one.
    carry: Option<&'w str>,
    max_width: f32,
    measure: &'w F,
}

impl<F> Iterator for WrapLines<'_, F>
where
    F: Fn(&str) -> f32,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let first = self.carry.take().or_else(|| self.words.next())?;
        let mut line = first.to_string();

        for word in self.words.by_ref() {
            let candidate_len = line.len();
            line.push(' ');
            line.push_str(word);

            if (self.measure)(&line) > self.max_width {
                line.truncate(candidate_len);
                self.carry = Some(word);
                return Some(line);
            }
        }

        Some(line)
    }
}

/// Convenience: wraps and collects in one call.
pub fn wrap_lines<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    Wrap::new(text, max_width, measure).lines().collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
