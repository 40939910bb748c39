//! Streaming encrypt/decrypt wrappers over arbitrary byte sinks and sources.
//!
//! CTR mode is self-inverse: the same keystream XOR transforms plaintext to
//! ciphertext and back. [`EncryptingWriter`] and [`DecryptingReader`] differ
//! only in which side of the I/O boundary the XOR happens on, and both are
//! chunk-size independent — the keystream position depends only on how many
//! bytes have passed through, never on how they were split across calls.

use std::io::{self, Read, Write};

use aes::cipher::StreamCipher;

use super::cipher::Aes128Ctr;

/// A writer that CTR-transforms every byte before forwarding it to `inner`.
pub struct EncryptingWriter<W: Write> {
    inner: W,
    stream: Aes128Ctr,
}

impl<W: Write> EncryptingWriter<W> {
    /// Wrap `inner` with `stream`, which must be positioned at offset 0.
    pub fn new(inner: W, stream: Aes128Ctr) -> Self {
        Self { inner, stream }
    }

    /// Unwrap, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for EncryptingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // The keystream advances for every byte accepted, so the whole
        // buffer is transformed and flushed in one step; a short write to
        // `inner` must not desynchronise the counter.
        let mut transformed = buf.to_vec();
        self.stream.apply_keystream(&mut transformed);
        self.inner.write_all(&transformed)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// A reader that CTR-transforms every byte handed out from `inner`.
pub struct DecryptingReader<R: Read> {
    inner: R,
    stream: Aes128Ctr,
}

impl<R: Read> DecryptingReader<R> {
    /// Wrap `inner` with `stream`, which must be positioned at offset 0 and
    /// carry the same (key, IV) used for the corresponding encryption.
    pub fn new(inner: R, stream: Aes128Ctr) -> Self {
        Self { inner, stream }
    }
}

impl<R: Read> Read for DecryptingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.stream.apply_keystream(&mut buf[..n]);
        Ok(n)
    }
}
