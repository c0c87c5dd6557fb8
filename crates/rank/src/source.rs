use std::sync::Arc;

/// A scorable candidate: anything exposing its matchable text.
///
/// The driver reads the text for exactly the duration of one scoring call
/// and takes ownership of the value only when it matches; non-matching
/// candidates are dropped without copying.
pub trait Candidate {
    fn matchable_text(&self) -> &str;
}

impl Candidate for str {
    fn matchable_text(&self) -> &str {
        self
    }
}

impl Candidate for String {
    fn matchable_text(&self) -> &str {
        self
    }
}

impl Candidate for Arc<str> {
    fn matchable_text(&self) -> &str {
        self
    }
}

impl Candidate for Box<str> {
    fn matchable_text(&self) -> &str {
        self
    }
}

impl<T: Candidate + ?Sized> Candidate for &T {
    fn matchable_text(&self) -> &str {
        (**self).matchable_text()
    }
}

/// A candidate carrying an opaque caller payload through ranking.
///
/// The payload is never inspected by the driver; it rides along so the
/// caller can map accepted results back to richer data (an inode, an
/// editor buffer id, a row index) without a side table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadItem<P> {
    pub text: String,
    pub payload: P,
}

impl<P> PayloadItem<P> {
    pub fn new(text: impl Into<String>, payload: P) -> Self {
        Self {
            text: text.into(),
            payload,
        }
    }
}

impl<P> Candidate for PayloadItem<P> {
    fn matchable_text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_like_types_expose_their_text() {
        assert_eq!("a/b".matchable_text(), "a/b");
        assert_eq!(String::from("a/b").matchable_text(), "a/b");
        let arc: Arc<str> = Arc::from("a/b");
        assert_eq!(arc.matchable_text(), "a/b");
    }

    #[test]
    fn payload_item_exposes_text_and_keeps_payload() {
        let item = PayloadItem::new("src/lib.rs", 42u64);
        assert_eq!(item.matchable_text(), "src/lib.rs");
        assert_eq!(item.payload, 42);
    }

    #[test]
    fn references_delegate() {
        let s = String::from("x");
        let r: &String = &s;
        assert_eq!(r.matchable_text(), "x");
    }
}
