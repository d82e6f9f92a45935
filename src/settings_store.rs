//! Fixed-size settings record and the byte storage it lives in.
//!
//! The record uses whiteboard semantics: anything that does not carry this firmware's tag
//! (a blank or foreign region, an older layout) reads as "never saved".
//!
//! # Layout
//!
//! | bytes            | content                                      |
//! |------------------|----------------------------------------------|
//! | 0..4             | magic `'TIX1'`, little endian                |
//! | 4                | layout flag; bump when [`SettingsRecord`] changes |
//! | 5                | payload length                               |
//! | 6..6+len         | postcard-serialized [`SettingsRecord`]       |
//! | 6+len..10+len    | CRC-32 of everything before it               |
//! | rest             | `0xFF`                                       |

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Size of the region the record is stored in.
pub const RECORD_SIZE: usize = 64;

const MAGIC: u32 = 0x5449_5831; // 'TIX1'
const FLAG: u8 = 0b1011_0011;
const MAGIC_END: usize = 4;
const FLAG_OFFSET: usize = 4;
const LEN_OFFSET: usize = 5;
const HEADER_SIZE: usize = 6;
const CRC_SIZE: usize = 4;
const MAX_PAYLOAD_SIZE: usize = RECORD_SIZE - HEADER_SIZE - CRC_SIZE;

/// The persisted fields, exactly as stored. Validation happens when turning a record into
/// [`Settings`](crate::settings::Settings), so a record may hold out-of-range values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsRecord {
    pub update_interval_ms: u32,
    pub brightness: u8,
    pub military_time: bool,
    pub color_scheme: u8,
}

/// A fixed byte region at a constant offset: flash on the device, memory in tests.
/// No wear levelling and no partial writes.
pub trait RecordStorage {
    /// Reads the whole region.
    fn read_record(&mut self) -> Result<[u8; RECORD_SIZE]>;

    /// Replaces the whole region.
    fn write_record(&mut self, bytes: &[u8; RECORD_SIZE]) -> Result<()>;
}

/// Serializes `record` into a tagged, checksummed region image.
#[expect(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    reason = "Offsets are bounded by MAX_PAYLOAD_SIZE, which fits in RECORD_SIZE and a u8"
)]
pub fn encode_record(record: &SettingsRecord) -> Result<[u8; RECORD_SIZE]> {
    let mut payload_buffer = [0u8; MAX_PAYLOAD_SIZE];
    let payload_len = postcard::to_slice(record, &mut payload_buffer)
        .map_err(|_| {
            error!(
                "Settings: serialization failed or data too large (max {} bytes)",
                MAX_PAYLOAD_SIZE
            );
            Error::FormatError
        })?
        .len();

    let mut buffer = [0xFFu8; RECORD_SIZE];
    buffer[..MAGIC_END].copy_from_slice(&MAGIC.to_le_bytes());
    buffer[FLAG_OFFSET] = FLAG;
    buffer[LEN_OFFSET] = payload_len as u8;
    buffer[HEADER_SIZE..HEADER_SIZE + payload_len].copy_from_slice(&payload_buffer[..payload_len]);

    let crc_offset = HEADER_SIZE + payload_len;
    let crc = compute_crc(&buffer[..crc_offset]);
    buffer[crc_offset..crc_offset + CRC_SIZE].copy_from_slice(&crc.to_le_bytes());
    Ok(buffer)
}

/// Parses a region image. Returns `None` when the tag does not match (never saved) or when
/// a tagged record fails its checksum or deserialization (logged as corruption).
#[expect(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "payload_len is checked against MAX_PAYLOAD_SIZE before slicing"
)]
#[must_use]
pub fn decode_record(buffer: &[u8; RECORD_SIZE]) -> Option<SettingsRecord> {
    let mut magic = [0u8; MAGIC_END];
    magic.copy_from_slice(&buffer[..MAGIC_END]);
    let magic = u32::from_le_bytes(magic);
    let flag = buffer[FLAG_OFFSET];
    if magic != MAGIC || flag != FLAG {
        info!(
            "Settings: no record (magic {=u32:#x}, flag {=u8:#b}; expected flag {=u8:#b})",
            magic, flag, FLAG
        );
        return None;
    }

    let payload_len = usize::from(buffer[LEN_OFFSET]);
    if payload_len > MAX_PAYLOAD_SIZE {
        error!("Settings: invalid payload length {}", payload_len);
        return None;
    }

    let crc_offset = HEADER_SIZE + payload_len;
    let mut stored_crc = [0u8; CRC_SIZE];
    stored_crc.copy_from_slice(&buffer[crc_offset..crc_offset + CRC_SIZE]);
    let stored_crc = u32::from_le_bytes(stored_crc);
    let computed_crc = compute_crc(&buffer[..crc_offset]);
    if stored_crc != computed_crc {
        error!(
            "Settings: CRC mismatch (expected {}, found {})",
            computed_crc, stored_crc
        );
        return None;
    }

    match postcard::from_bytes(&buffer[HEADER_SIZE..crc_offset]) {
        Ok(record) => Some(record),
        Err(_) => {
            error!("Settings: deserialization failed");
            None
        }
    }
}

/// Compute CRC32 checksum.
fn compute_crc(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
