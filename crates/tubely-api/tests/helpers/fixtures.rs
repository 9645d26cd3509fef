/// PNG signature followed by a truncated IHDR chunk; enough to be recognisable.
pub fn tiny_png() -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x0D]
}

/// An `ftyp` box header padded out to `len` bytes.
pub fn fake_mp4(len: usize) -> Vec<u8> {
    let mut data = vec![0x00, 0x00, 0x00, 0x18, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
    data.resize(len.max(data.len()), 0xAB);
    data
}
