//! Reading the request body from an input stream.

use std::io::{ErrorKind, Read};

use crate::error::{Error, Result};
use crate::logging::{debug, warn};

/// Buffer size used by [`ReadMode::SingleRead`].
pub const SINGLE_READ_BUFFER: usize = 1024;

/// How much of the input stream to consume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Read until end-of-stream into a growable buffer.
    #[default]
    ToEnd,
    /// Perform exactly one `read` into a 1024-byte buffer and return whatever
    /// it yielded. Anything beyond that first read is silently dropped.
    ///
    /// Kept only for byte-for-byte compatibility with the legacy tool.
    SingleRead,
}

/// Read the request bytes from `reader` according to `mode`.
pub fn read_input<R: Read>(mut reader: R, mode: ReadMode) -> Result<Vec<u8>> {
    match mode {
        ReadMode::ToEnd => {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).map_err(Error::Read)?;
            debug!(len = buf.len(), "read request to end of stream");
            Ok(buf)
        }
        ReadMode::SingleRead => {
            let mut buf = vec![0u8; SINGLE_READ_BUFFER];
            let n = loop {
                match reader.read(&mut buf) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(Error::Read(e)),
                }
            };
            buf.truncate(n);
            if n == SINGLE_READ_BUFFER {
                warn!("single read filled the whole buffer; request may be truncated");
            }
            debug!(len = n, "read request with a single read");
            Ok(buf)
        }
    }
}
