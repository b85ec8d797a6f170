use super::*;

#[test]
fn test_span_new() {
    let span = Span::new(5, 10);
    assert_eq!(span.start, 5);
    assert_eq!(span.end, 10);
    assert_eq!(span.len(), 5);
    assert!(!span.is_empty());
}

#[test]
fn test_span_at() {
    let span = Span::at(7);
    assert!(span.is_empty());
    assert_eq!(span.len(), 0);
}

#[test]
fn test_span_dummy() {
    let span = Span::dummy();
    assert!(span.is_dummy());
    assert!(!Span::new(0, 0).is_dummy());
    assert!(!Span::default().is_dummy());
}

#[test]
fn test_span_contains() {
    let span = Span::new(5, 10);
    assert!(!span.contains(4));
    assert!(span.contains(5));
    assert!(span.contains(9));
    assert!(!span.contains(10));
}

#[test]
fn test_span_merge() {
    let a = Span::new(5, 10);
    let b = Span::new(8, 20);
    assert_eq!(a.merge(b), Span::new(5, 20));
    assert_eq!(b.merge(a), Span::new(5, 20));
}

#[test]
fn test_span_slice() {
    let text = "hello world";
    assert_eq!(Span::new(0, 5).slice(text), "hello");
    assert_eq!(Span::new(6, 11).slice(text), "world");
    // Out-of-range spans slice to empty rather than panic
    assert_eq!(Span::new(6, 99).slice(text), "");
}

#[test]
fn test_spanned_trait() {
    let span = Span::new(3, 9);
    assert_eq!(span.start(), 3);
    assert_eq!(span.end(), 9);
}
