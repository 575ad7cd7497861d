use move_semantics::{Holder, OwningBuffer};

fn render(holder: &Holder) -> String {
    let mut out = Vec::new();
    holder.write_to(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_print_format() {
    let holder = Holder::from_owned(OwningBuffer::from_slice(&[1, 2, 3]));
    assert_eq!(render(&holder), "1 2 3 \n");
}

#[test]
fn test_print_is_repeatable() {
    let holder = Holder::from_owned(OwningBuffer::from_slice(&[9, 8, 7, 6]));
    let first = render(&holder);

    for _ in 0..3 {
        assert_eq!(render(&holder), first);
    }
}

#[test]
fn test_default_holder_prints_empty_line() {
    let holder = Holder::default();
    assert!(holder.buffer().is_empty());
    assert_eq!(render(&holder), "\n");
}

#[test]
fn test_from_borrowed_keeps_source() {
    let source = OwningBuffer::from_slice(&[1, 2, 3]);
    let mut holder = Holder::from_borrowed(&source);

    *holder.buffer_mut().element_at_mut(0).unwrap() = 100;

    assert_eq!(source.as_slice(), &[1, 2, 3]);
    assert_eq!(holder.buffer().as_slice(), &[100, 2, 3]);
}

#[test]
fn test_try_from_borrowed_copies() {
    let source = OwningBuffer::from_slice(&[4, 5]);
    let holder = Holder::try_from_borrowed(&source).unwrap();
    assert_eq!(holder.buffer(), &source);
}

#[test]
fn test_take_ownership_empties_source() {
    let mut source = OwningBuffer::from_slice(&[10, 20, 30, 40, 50]);
    let holder = Holder::take_ownership(&mut source);

    assert_eq!(source.len(), 0);
    assert_eq!(holder.buffer().len(), 5);
    assert_eq!(render(&holder), "10 20 30 40 50 \n");
}

#[test]
fn test_clone_delegates_to_buffer_copy() {
    let original = Holder::from_owned(OwningBuffer::from_slice(&[1, 1, 2, 3]));
    let mut copy = original.clone();

    *copy.buffer_mut().element_at_mut(3).unwrap() = 5;

    assert_eq!(original.buffer().as_slice(), &[1, 1, 2, 3]);
    assert_eq!(copy.buffer().as_slice(), &[1, 1, 2, 5]);
}

#[test]
fn test_into_buffer_round_trips_ownership() {
    let buffer = OwningBuffer::from_slice(&[7, 7, 7]);
    let holder = Holder::from_owned(buffer);
    let buffer = holder.into_buffer();
    assert_eq!(buffer.as_slice(), &[7, 7, 7]);
}
