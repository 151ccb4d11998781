//! Caller-owned scratch storage, reused across many geometry constructions
//! to amortize allocation.
//!
//! Nothing retains a reference into the buffer after an upload call
//! returns; the driver copies the bytes into its own storage. The same
//! buffer must not be used by two constructions at once.

/// Grows `buf` so that at least `len` bytes are addressable and returns
/// the leading `len` bytes as a writable span. The existing allocation is
/// reused whenever it is already large enough; previous contents are
/// meaningless to the caller either way.
pub fn ensure_len(buf: &mut Vec<u8>, len: usize) -> &mut [u8] {
    if buf.len() < len {
        buf.resize(len, 0);
    }

    &mut buf[..len]
}
