use chrono::{DateTime, Utc};

pub const KEY_SEPARATOR: u8 = 0;

/// Key of one response in the `rsvps` table:
/// `host_id \0 created_at(micros, order-preserving BE) rsvp_id`.
/// A prefix scan over one host therefore yields its responses oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsvpKey<'a> {
    pub host_id: &'a str,
    pub created_at: DateTime<Utc>,
    pub rsvp_id: &'a str,
}

impl<'a> RsvpKey<'a> {
    pub fn new(host_id: &'a str, created_at: DateTime<Utc>, rsvp_id: &'a str) -> Self {
        Self {
            host_id,
            created_at,
            rsvp_id,
        }
    }

    pub fn validate_id(id: &str) -> Result<(), crate::StorageError> {
        if id.is_empty() || id.as_bytes().contains(&KEY_SEPARATOR) {
            return Err(crate::StorageError::InvalidKey(id.to_string()));
        }
        Ok(())
    }

    /// Half-open `[start, end)` byte range covering every key of one host.
    pub fn range_for_host(host_id: &str) -> Result<(Vec<u8>, Vec<u8>), crate::StorageError> {
        Self::validate_id(host_id)?;
        let mut start = Vec::with_capacity(host_id.len() + 1);
        start.extend_from_slice(host_id.as_bytes());
        start.push(KEY_SEPARATOR);
        let mut end = start.clone();
        if let Some(last) = end.last_mut() {
            *last = KEY_SEPARATOR + 1;
        }
        Ok((start, end))
    }

    pub fn to_bytes(self) -> Vec<u8> {
        let ts = (self.created_at.timestamp_micros() as u64) ^ (1 << 63);
        let mut key = Vec::with_capacity(self.host_id.len() + 1 + 8 + self.rsvp_id.len());
        key.extend_from_slice(self.host_id.as_bytes());
        key.push(KEY_SEPARATOR);
        key.extend_from_slice(&ts.to_be_bytes());
        key.extend_from_slice(self.rsvp_id.as_bytes());
        key
    }
}
