use crate::buffer::OwningBuffer;
use crate::error::BufferError;
use std::io::{self, Write};

/// Wraps exactly one [`OwningBuffer`]. Copying or moving a holder copies or
/// moves its buffer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Holder {
    buffer: OwningBuffer,
}

impl Holder {
    /// Builds a holder around a deep copy of `buffer`.
    pub fn from_borrowed(buffer: &OwningBuffer) -> Self {
        Self {
            buffer: buffer.clone(),
        }
    }

    pub fn try_from_borrowed(buffer: &OwningBuffer) -> Result<Self, BufferError> {
        Ok(Self {
            buffer: buffer.try_clone()?,
        })
    }

    /// Builds a holder that takes over `buffer` without copying it.
    pub fn from_owned(buffer: OwningBuffer) -> Self {
        Self { buffer }
    }

    /// Moves the contents out of `buffer`, leaving it empty.
    pub fn take_ownership(buffer: &mut OwningBuffer) -> Self {
        Self::from_owned(buffer.take())
    }

    pub fn buffer(&self) -> &OwningBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut OwningBuffer {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> OwningBuffer {
        self.buffer
    }

    /// Writes every element followed by a space, then a newline.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for value in &self.buffer {
            write!(out, "{} ", value)?;
        }
        writeln!(out)
    }

    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_to(&mut out)
    }
}
