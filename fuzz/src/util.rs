/// Reinterprets fuzz input bytes as little endian i32 keys, dropping the
/// unaligned tail.
pub fn bytes_as_i32(data: &[u8]) -> Vec<i32> {
    data.chunks_exact(4)
        .map(|chunk| i32::from_le_bytes(chunk.try_into().unwrap()))
        .collect()
}
