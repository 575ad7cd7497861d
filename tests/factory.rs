use move_semantics::{Holder, OwningBuffer, Probe, Via, create};

#[test]
fn test_named_argument_selects_borrowed_constructor() {
    let i = 10;
    let probe = create::<Probe, _>(&i);

    assert_eq!(probe.via(), Via::Borrowed);
    assert_eq!(probe.value(), 10);
    assert_eq!(probe.signature(), "Probe(&i32)");
}

#[test]
fn test_temporary_selects_owned_constructor() {
    let probe = create::<Probe, i32>(10);

    assert_eq!(probe.via(), Via::Owned);
    assert_eq!(probe.value(), 10);
    assert_eq!(probe.signature(), "Probe(i32)");
}

#[test]
fn test_named_entry_points_match_factory() {
    let i = 3;
    assert_eq!(Probe::from_borrowed(&i), create::<Probe, _>(&i));
    assert_eq!(Probe::from_owned(3), create::<Probe, i32>(3));
}

#[test]
fn test_tuple_forwards_each_argument_category() {
    let i = 1;
    let (first, second) = create::<(Probe, Probe), _>((&i, 2_i32));
    assert_eq!(first.via(), Via::Borrowed);
    assert_eq!(second.via(), Via::Owned);

    let (a, b, c) = create::<(Probe, Probe, Probe), _>((4_i32, &i, &i));
    assert_eq!(
        [a.via(), b.via(), c.via()],
        [Via::Owned, Via::Borrowed, Via::Borrowed]
    );
}

#[test]
fn test_holder_from_borrowed_buffer_copies() {
    let buffer = OwningBuffer::from_slice(&[1, 2, 3]);
    let holder = create::<Holder, _>(&buffer);

    assert_eq!(buffer.len(), 3);
    assert_eq!(holder.buffer(), &buffer);
}

#[test]
fn test_holder_from_owned_buffer_moves() {
    let mut buffer = OwningBuffer::from_slice(&[1, 2, 3]);
    let holder = create::<Holder, _>(buffer.take());

    assert!(buffer.is_empty());
    assert_eq!(holder.buffer().as_slice(), &[1, 2, 3]);
}

#[test]
fn test_buffer_constructors() {
    let data = [5, 10, 15];
    let from_slice = create::<OwningBuffer, &[i32]>(&data);
    let copied = create::<OwningBuffer, _>(&from_slice);
    let moved = create::<OwningBuffer, _>(from_slice);

    assert_eq!(copied, moved);
    assert_eq!(moved.as_slice(), &data);
}

#[test]
fn test_via_display() {
    assert_eq!(Via::Borrowed.to_string(), "borrowed");
    assert_eq!(Via::Owned.to_string(), "owned");
}
