use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::domain::DocumentId;

const READ_BUFFER_BYTES: usize = 1 << 20;

/// Whole-file SHA-256, read in fixed-size blocks. Returns the id and the byte count.
pub fn hash_file(path: &Path) -> io::Result<(DocumentId, u64)> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_BUFFER_BYTES];
    let mut total = 0u64;

    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
        total += read as u64;
    }

    Ok((DocumentId::from_raw(format!("{:x}", hasher.finalize())), total))
}
