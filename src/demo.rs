//! The two walkthroughs behind `move-semantics forward` and
//! `move-semantics ownership`.

use crate::buffer::OwningBuffer;
use crate::factory::{Probe, create};
use crate::holder::Holder;
use std::io::{self, Write};

/// Builds one probe from a named local and one from a literal, printing the
/// local's address and the constructor each call selected.
pub fn forwarding<W: Write>(out: &mut W) -> io::Result<Vec<Probe>> {
    let i = 10;
    writeln!(out, "i = {:p}", &i)?;

    let borrowed = create::<Probe, &i32>(&i);
    writeln!(out, "{}", borrowed.signature())?;

    let owned = create::<Probe, i32>(10);
    writeln!(out, "{}", owned.signature())?;

    Ok(vec![borrowed, owned])
}

/// Copies and then moves a five-element buffer, printing each size and the
/// holder that ends up owning the data.
pub fn ownership<W: Write>(out: &mut W) -> io::Result<Holder> {
    let data = [1, 2, 3, 4, 5];
    let mut v1 = OwningBuffer::from_slice(&data);

    let v2 = v1.clone();
    let v3 = v1.take();

    writeln!(out, "v1.len() = {}", v1.len())?;
    writeln!(out, "v2.len() = {}", v2.len())?;
    writeln!(out, "v3.len() = {}", v3.len())?;

    let holder = Holder::from_owned(v3);
    holder.write_to(out)?;
    Ok(holder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::Via;

    #[test]
    fn forwarding_prints_one_line_per_construction() {
        let mut out = Vec::new();
        let probes = forwarding(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("i = 0x"));
        assert_eq!(lines[1], "Probe(&i32)");
        assert_eq!(lines[2], "Probe(i32)");
        assert_eq!(probes[0].via(), Via::Borrowed);
        assert_eq!(probes[1].via(), Via::Owned);
    }

    #[test]
    fn ownership_leaves_moved_from_buffer_empty() {
        let mut out = Vec::new();
        let holder = ownership(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("v1.len() = 0"));
        assert!(text.contains("v2.len() = 5"));
        assert!(text.contains("v3.len() = 5"));
        assert!(text.ends_with("1 2 3 4 5 \n"));
        assert_eq!(holder.buffer().as_slice(), &[1, 2, 3, 4, 5]);
    }
}
