//! The writable window handed to [`FormatTo::format_to`](super::FormatTo::format_to).

/// A fixed-size window into the output buffer.
///
/// The engine sizes the window from [`FormatTo::reserve`](super::FormatTo::reserve)
/// before calling `format_to`. Writes only ever copy whole UTF-8 encoded
/// strings or characters, so a window filled exactly is valid UTF-8. A write
/// that does not fit is dropped and marks the context as overflowed, which
/// the engine reports as a formatter contract violation.
#[derive(Debug)]
pub struct FormatContext<'a> {
    window: &'a mut [u8],
    cursor: usize,
    overflowed: bool,
}

impl<'a> FormatContext<'a> {
    /// Creates a context writing into `window` from its start.
    pub fn new(window: &'a mut [u8]) -> Self {
        Self {
            window,
            cursor: 0,
            overflowed: false,
        }
    }

    /// Writes a string.
    pub fn write_str(&mut self, text: &str) {
        let end = self.cursor + text.len();
        match self.window.get_mut(self.cursor..end) {
            Some(target) => {
                target.copy_from_slice(text.as_bytes());
                self.cursor = end;
            }
            None => self.overflowed = true,
        }
    }

    /// Writes a single character.
    pub fn write_char(&mut self, ch: char) {
        let mut encoded = [0; 4];
        self.write_str(ch.encode_utf8(&mut encoded));
    }

    /// Writes `ch` `count` times.
    pub fn fill(&mut self, ch: char, count: usize) {
        for _ in 0..count {
            self.write_char(ch);
        }
    }

    /// Returns the number of bytes written so far.
    pub fn written(&self) -> usize {
        self.cursor
    }

    /// Returns the size of the window in bytes.
    pub fn capacity(&self) -> usize {
        self.window.len()
    }

    /// Returns the number of bytes left in the window.
    pub fn remaining(&self) -> usize {
        self.window.len() - self.cursor
    }

    /// Returns `true` if a write did not fit into the window.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Returns `true` if the window was filled exactly.
    pub fn is_exact(&self) -> bool {
        !self.overflowed && self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fill() {
        let mut bytes = [0u8; 6];
        let mut context = FormatContext::new(&mut bytes);

        context.write_str("ab");
        context.write_char('é');
        context.fill('-', 2);

        assert!(context.is_exact());
        assert_eq!(context.written(), 6);
        assert_eq!(std::str::from_utf8(&bytes), Ok("abé--"));
    }

    #[test]
    fn test_overflow_is_recorded() {
        let mut bytes = [0u8; 3];
        let mut context = FormatContext::new(&mut bytes);

        context.write_str("ab");
        context.write_str("cd");

        assert!(context.overflowed());
        assert!(!context.is_exact());
        assert_eq!(context.written(), 2);
        assert_eq!(context.remaining(), 1);
        assert_eq!(context.capacity(), 3);
    }

    #[test]
    fn test_underfill_is_not_exact() {
        let mut bytes = [0u8; 4];
        let mut context = FormatContext::new(&mut bytes);
        context.write_str("abc");
        assert!(!context.overflowed());
        assert!(!context.is_exact());
    }
}
