//! Cookie slot splitter / joiner
//!
//! Converts a compressed credential blob to and from a fixed number of
//! named string slots, each respecting an externally imposed maximum
//! length. Slot names are stable (`{base}_1..{base}_K`) so fragments
//! concatenate in write order regardless of request header ordering.

use crate::codec;
use crate::error::{CodecResult, SessionCodecError};

/// Stable name of overflow slot `index` (1-based).
#[must_use]
pub fn slot_name(base: &str, index: usize) -> String {
    format!("{base}_{index}")
}

/// Partition `blob`'s base64 representation into `slot_count` contiguous
/// fragments of at most `slot_capacity` characters each, in slot order.
///
/// Slots past the end of the encoded text receive an empty fragment. If
/// the blob needs more than `slot_count` slots the login cannot be
/// persisted without truncation, and [`SessionCodecError::SlotCapacityExceeded`]
/// is returned instead.
pub fn split(blob: &[u8], slot_count: usize, slot_capacity: usize) -> CodecResult<Vec<String>> {
    if slot_capacity == 0 {
        return Err(SessionCodecError::Encode(
            "slot capacity must be non-zero".to_string(),
        ));
    }

    let encoded = codec::encode_base64(blob);
    let required = encoded.len().div_ceil(slot_capacity);
    if required > slot_count {
        return Err(SessionCodecError::SlotCapacityExceeded {
            required,
            max: slot_count,
        });
    }

    // Base64 text is ASCII, so byte indexing is character indexing.
    let mut fragments = Vec::with_capacity(slot_count);
    for i in 0..slot_count {
        let start = (i * slot_capacity).min(encoded.len());
        let end = ((i + 1) * slot_capacity).min(encoded.len());
        fragments.push(encoded[start..end].to_string());
    }

    Ok(fragments)
}

/// Reassemble the encoded text from the fragments present on a request,
/// in slot order.
///
/// Absent (or empty) fragments are tolerated only at the tail, which is
/// where a short credential legitimately leaves slots unused. A gap in
/// the middle means a cookie went missing in transit and the remaining
/// text cannot be trusted; that fails with
/// [`SessionCodecError::CorruptFragmentSequence`].
pub fn join(fragments: &[Option<&str>]) -> CodecResult<String> {
    let mut text = String::new();
    let mut first_missing: Option<usize> = None;

    for (i, fragment) in fragments.iter().enumerate() {
        match fragment {
            Some(f) if !f.is_empty() => {
                if let Some(missing_slot) = first_missing {
                    return Err(SessionCodecError::CorruptFragmentSequence { missing_slot });
                }
                text.push_str(f);
            }
            _ => {
                if first_missing.is_none() {
                    first_missing = Some(i + 1);
                }
            }
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_name_is_stable() {
        assert_eq!(slot_name("authrelay_session", 1), "authrelay_session_1");
        assert_eq!(slot_name("authrelay_session", 2), "authrelay_session_2");
    }

    #[test]
    fn test_split_join_round_trip() {
        // 54 bytes encode to 72 chars: five slots of 16, the last partial.
        let blob = b"a compressed credential blob that spans multiple slots";
        let fragments = split(blob, 5, 16).unwrap();
        assert_eq!(fragments.len(), 5);
        assert!(fragments[..4].iter().all(|f| f.len() == 16));
        assert_eq!(fragments[4].len(), 8);

        let present: Vec<Option<&str>> = fragments.iter().map(|f| Some(f.as_str())).collect();
        let joined = join(&present).unwrap();
        assert_eq!(codec::decode_base64(&joined).unwrap(), blob);
    }

    #[test]
    fn test_split_small_blob_leaves_trailing_slots_empty() {
        let fragments = split(b"tiny", 3, 100).unwrap();
        assert!(!fragments[0].is_empty());
        assert!(fragments[1].is_empty());
        assert!(fragments[2].is_empty());
    }

    #[test]
    fn test_split_empty_blob() {
        let fragments = split(b"", 2, 100).unwrap();
        assert_eq!(fragments, vec![String::new(), String::new()]);
        let joined = join(&[Some(""), Some("")]).unwrap();
        assert!(joined.is_empty());
    }

    #[test]
    fn test_split_fills_slots_in_order() {
        let blob = [0xABu8; 60]; // encodes to 80 chars
        let fragments = split(&blob, 2, 50).unwrap();
        assert_eq!(fragments[0].len(), 50);
        assert_eq!(fragments[1].len(), 30);
    }

    #[test]
    fn test_split_capacity_exceeded() {
        let blob = [0u8; 300]; // encodes to 400 chars, needs 4 slots of 100
        let err = split(&blob, 2, 100).unwrap_err();
        match err {
            SessionCodecError::SlotCapacityExceeded { required, max } => {
                assert_eq!(required, 4);
                assert_eq!(max, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_join_tolerates_tail_absence() {
        let joined = join(&[Some("abc"), Some("def"), None]).unwrap();
        assert_eq!(joined, "abcdef");

        let joined = join(&[Some("abc"), None, None]).unwrap();
        assert_eq!(joined, "abc");
    }

    #[test]
    fn test_join_treats_empty_fragment_as_absent() {
        let joined = join(&[Some("abc"), Some(""), Some("")]).unwrap();
        assert_eq!(joined, "abc");
    }

    #[test]
    fn test_join_mid_gap_is_corrupt() {
        let err = join(&[Some("abc"), None, Some("ghi")]).unwrap_err();
        match err {
            SessionCodecError::CorruptFragmentSequence { missing_slot } => {
                assert_eq!(missing_slot, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_join_leading_gap_is_corrupt() {
        let err = join(&[None, Some("xyz")]).unwrap_err();
        match err {
            SessionCodecError::CorruptFragmentSequence { missing_slot } => {
                assert_eq!(missing_slot, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_join_all_absent_yields_empty_text() {
        assert!(join(&[None, None]).unwrap().is_empty());
    }
}
