use heapless::String as HeaplessString;
use serde::Serialize;
use std::hash::Hasher;
use std::str::FromStr;
use twox_hash::XxHash64;

/// Hashes serializable data into an i64 using CBOR serialization and XxHash64.
///
/// CBOR gives a deterministic binary representation and the seed is fixed,
/// so the hash is stable across runs and hosts.
pub fn hash_as_i64<T: Serialize>(data: &T) -> Result<i64, String> {
    let mut hasher = XxHash64::with_seed(0);
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor)
        .map_err(|e| format!("Failed to serialize data for hashing: {e}"))?;
    hasher.write(&cbor);
    Ok(hasher.finish() as i64)
}

/// Longest UTF-8 encoding of one character.
pub const MAX_UTF8_BYTES: usize = 4;

/// Copies `value` into a fixed-capacity string.
///
/// Capacities are in bytes and sized at [`MAX_UTF8_BYTES`] per character of the
/// column, so the limit enforced here is `N / 4` characters, the same one
/// `VARCHAR` and the request validation apply.
pub fn to_heapless<const N: usize>(value: &str, field: &str) -> Result<HeaplessString<N>, String> {
    let max_chars = N / MAX_UTF8_BYTES;
    if value.chars().count() > max_chars {
        return Err(format!("Value for '{field}' is too long (max {max_chars} chars)"));
    }
    HeaplessString::from_str(value)
        .map_err(|_| format!("Value for '{field}' is too long (max {max_chars} chars)"))
}

/// Like [`to_heapless`], mapping blank input to `None`.
pub fn to_optional_heapless<const N: usize>(
    value: Option<&str>,
    field: &str,
) -> Result<Option<HeaplessString<N>>, String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => to_heapless(v, field).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        id: u32,
        name: &'static str,
    }

    #[test]
    fn test_hash_is_stable() {
        let a = hash_as_i64(&Sample { id: 1, name: "KRW" }).unwrap();
        let b = hash_as_i64(&Sample { id: 1, name: "KRW" }).unwrap();
        let c = hash_as_i64(&Sample { id: 2, name: "KRW" }).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_heapless_conversion() {
        let code: HeaplessString<20> = to_heapless("KR-UZ", "direction_code").unwrap();
        assert_eq!(code.as_str(), "KR-UZ");

        let too_long: Result<HeaplessString<8>, String> = to_heapless("KRW", "currency_code");
        assert_eq!(too_long.unwrap_err(), "Value for 'currency_code' is too long (max 2 chars)");

        let blank: Option<HeaplessString<40>> = to_optional_heapless(Some("  "), "phone").unwrap();
        assert_eq!(blank, None);
        let trimmed: Option<HeaplessString<40>> = to_optional_heapless(Some(" 010 "), "phone").unwrap();
        assert_eq!(trimmed.as_deref(), Some("010"));
    }

    #[test]
    fn test_heapless_counts_characters() {
        // 60 characters, 114 bytes.
        let name = "Батэрдэнэ ".repeat(6);
        assert_eq!(name.chars().count(), 60);

        let stored: HeaplessString<400> = to_heapless(&name, "receiver_name").unwrap();
        assert_eq!(stored.as_str(), name);

        let hangul = "김".repeat(100);
        let fits: Result<HeaplessString<400>, String> = to_heapless(&hangul, "sender_name");
        assert!(fits.is_ok());

        let over = "김".repeat(101);
        let rejected: Result<HeaplessString<400>, String> = to_heapless(&over, "sender_name");
        assert_eq!(rejected.unwrap_err(), "Value for 'sender_name' is too long (max 100 chars)");
    }
}
