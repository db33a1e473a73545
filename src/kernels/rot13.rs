//! ROT13: rotates ASCII letters by 13 places, leaving every other byte as is.

pub fn apply(input_bytes: &[u8], output_buf: &mut Vec<u8>) {
    output_buf.clear();
    output_buf.extend(input_bytes.iter().map(|&b| rotate(b)));
}

fn rotate(byte: u8) -> u8 {
    match byte {
        b'a'..=b'z' => (byte - b'a' + 13) % 26 + b'a',
        b'A'..=b'Z' => (byte - b'A' + 13) % 26 + b'A',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotates_letters_only() {
        let mut out = Vec::new();
        apply(b"Hello, World! 123", &mut out);
        assert_eq!(out, b"Uryyb, Jbeyq! 123");
    }

    #[test]
    fn test_non_ascii_bytes_pass_through() {
        let mut out = Vec::new();
        apply(&[0xC3, 0xA9, b'n'], &mut out);
        assert_eq!(out, vec![0xC3, 0xA9, b'a']);
    }
}
