use rsvp_core::{Host, RsvpResponse};

use crate::StorageError;

pub fn encode_host(host: &Host) -> Result<Vec<u8>, StorageError> {
    Ok(serde_json::to_vec(host)?)
}

pub fn decode_host(bytes: &[u8]) -> Result<Host, StorageError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn encode_rsvp(rsvp: &RsvpResponse) -> Result<Vec<u8>, StorageError> {
    Ok(serde_json::to_vec(rsvp)?)
}

pub fn decode_rsvp(bytes: &[u8]) -> Result<RsvpResponse, StorageError> {
    Ok(serde_json::from_slice(bytes)?)
}
