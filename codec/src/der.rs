//! Definite-length tag-length-value reading and writing.
//!
//! Writers take `impl BufMut`; readers take `impl Buf` and consume exactly
//! the bytes of the value they return. Containers are written by first
//! assembling their content in a scratch buffer (lengths are definite, so
//! the content size must be known before the header is emitted) and read
//! by splitting the content off into its own buffer, which keeps malformed
//! nesting from silently bleeding into sibling fields.

use crate::{tag, Error};
use bytes::{Buf, BufMut, Bytes};
use num_bigint::BigInt;

/// Longest permitted long-form length encoding, in bytes. Eight bytes of
/// length covers anything addressable; more is malformed input.
const MAX_LENGTH_BYTES: usize = 8;

/// Writes a definite length: short form below 128, long form otherwise.
pub fn write_length(len: usize, buf: &mut impl BufMut) {
    if len < 0x80 {
        buf.put_u8(len as u8);
        return;
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    buf.put_u8(0x80 | (bytes.len() - skip) as u8);
    buf.put_slice(&bytes[skip..]);
}

/// Reads a definite length.
///
/// Indefinite (`0x80`) and reserved (`0xff`) forms are rejected, as are
/// long-form encodings wider than [`MAX_LENGTH_BYTES`].
pub fn read_length(buf: &mut impl Buf) -> Result<usize, Error> {
    if !buf.has_remaining() {
        return Err(Error::EndOfBuffer);
    }
    let first = buf.get_u8();
    if first < 0x80 {
        return Ok(first as usize);
    }
    let count = (first & 0x7f) as usize;
    if count == 0 || count > MAX_LENGTH_BYTES {
        return Err(Error::InvalidLength);
    }
    if buf.remaining() < count {
        return Err(Error::EndOfBuffer);
    }
    let mut len = 0usize;
    for _ in 0..count {
        len = (len << 8) | buf.get_u8() as usize;
    }
    Ok(len)
}

/// Writes one tag-length-value field with the given content.
pub fn write_tlv(tag: u8, content: &[u8], buf: &mut impl BufMut) {
    buf.put_u8(tag);
    write_length(content.len(), buf);
    buf.put_slice(content);
}

/// Reads a tag and length, without consuming the value.
pub fn read_header(buf: &mut impl Buf) -> Result<(u8, usize), Error> {
    if !buf.has_remaining() {
        return Err(Error::EndOfBuffer);
    }
    let tag = buf.get_u8();
    let len = read_length(buf)?;
    Ok((tag, len))
}

/// Reads a header, requiring the given tag, and returns the value length.
pub fn expect_tag(expected: u8, buf: &mut impl Buf) -> Result<usize, Error> {
    let (found, len) = read_header(buf)?;
    if found != expected {
        return Err(Error::UnexpectedTag { expected, found });
    }
    if buf.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(len)
}

/// Reads a constructed field with the given tag and splits its content off
/// into an owned buffer.
pub fn read_container(expected: u8, buf: &mut impl Buf) -> Result<Bytes, Error> {
    let len = expect_tag(expected, buf)?;
    Ok(buf.copy_to_bytes(len))
}

/// Writes an INTEGER in minimal two's-complement big-endian form.
pub fn write_integer(value: &BigInt, buf: &mut impl BufMut) {
    write_tlv(tag::INTEGER, &value.to_signed_bytes_be(), buf);
}

/// Reads an INTEGER. The value must be at least one byte wide.
pub fn read_integer(buf: &mut impl Buf) -> Result<BigInt, Error> {
    let len = expect_tag(tag::INTEGER, buf)?;
    if len == 0 {
        return Err(Error::InvalidInteger);
    }
    let bytes = buf.copy_to_bytes(len);
    Ok(BigInt::from_signed_bytes_be(&bytes))
}

/// Writes an OCTET STRING.
pub fn write_octet_string(value: &[u8], buf: &mut impl BufMut) {
    write_tlv(tag::OCTET_STRING, value, buf);
}

/// Reads an OCTET STRING.
pub fn read_octet_string(buf: &mut impl Buf) -> Result<Bytes, Error> {
    let len = expect_tag(tag::OCTET_STRING, buf)?;
    Ok(buf.copy_to_bytes(len))
}

/// Writes a UTF8String.
pub fn write_utf8_string(value: &str, buf: &mut impl BufMut) {
    write_tlv(tag::UTF8_STRING, value.as_bytes(), buf);
}

/// Reads a UTF8String.
pub fn read_utf8_string(buf: &mut impl Buf) -> Result<String, Error> {
    let len = expect_tag(tag::UTF8_STRING, buf)?;
    let bytes = buf.copy_to_bytes(len);
    String::from_utf8(bytes.to_vec()).map_err(|_| Error::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    fn encode_integer(value: i64) -> Vec<u8> {
        let mut buf = BytesMut::new();
        write_integer(&BigInt::from(value), &mut buf);
        buf.to_vec()
    }

    #[test]
    fn test_integer_minimal_encoding() {
        assert_eq!(encode_integer(0), vec![0x02, 0x01, 0x00]);
        assert_eq!(encode_integer(127), vec![0x02, 0x01, 0x7f]);
        assert_eq!(encode_integer(128), vec![0x02, 0x02, 0x00, 0x80]);
        assert_eq!(encode_integer(256), vec![0x02, 0x02, 0x01, 0x00]);
        assert_eq!(encode_integer(-1), vec![0x02, 0x01, 0xff]);
        assert_eq!(encode_integer(-128), vec![0x02, 0x01, 0x80]);
        assert_eq!(encode_integer(-129), vec![0x02, 0x02, 0xff, 0x7f]);
    }

    #[test]
    fn test_integer_round_trip() {
        let values = [
            BigInt::from(0),
            BigInt::from(-1),
            BigInt::from(i64::MAX),
            BigInt::from(i64::MIN),
            "57896044625259982827082014024491516445703215213774687456785671200359045162371"
                .parse()
                .unwrap(),
        ];
        for value in values {
            let mut buf = BytesMut::new();
            write_integer(&value, &mut buf);
            let mut read = buf.freeze();
            assert_eq!(read_integer(&mut read).unwrap(), value);
            assert!(!read.has_remaining());
        }
    }

    #[test]
    fn test_empty_integer_rejected() {
        let mut read = Bytes::from_static(&[0x02, 0x00]);
        assert_eq!(read_integer(&mut read), Err(Error::InvalidInteger));
    }

    #[test]
    fn test_length_forms() {
        let mut buf = BytesMut::new();
        write_length(0x7f, &mut buf);
        assert_eq!(buf.to_vec(), vec![0x7f]);

        let mut buf = BytesMut::new();
        write_length(0x80, &mut buf);
        assert_eq!(buf.to_vec(), vec![0x81, 0x80]);

        let mut buf = BytesMut::new();
        write_length(0x1234, &mut buf);
        assert_eq!(buf.to_vec(), vec![0x82, 0x12, 0x34]);

        for len in [0usize, 1, 127, 128, 255, 256, 65535, 65536] {
            let mut buf = BytesMut::new();
            write_length(len, &mut buf);
            let mut read = buf.freeze();
            assert_eq!(read_length(&mut read).unwrap(), len);
            assert!(!read.has_remaining());
        }
    }

    #[test]
    fn test_indefinite_length_rejected() {
        let mut read = Bytes::from_static(&[0x80]);
        assert_eq!(read_length(&mut read), Err(Error::InvalidLength));
    }

    #[test]
    fn test_truncated_input() {
        // Header claims two bytes of content, only one present.
        let mut read = Bytes::from_static(&[0x02, 0x02, 0x01]);
        assert_eq!(read_integer(&mut read), Err(Error::EndOfBuffer));

        // Length byte missing entirely.
        let mut read = Bytes::from_static(&[0x02]);
        assert_eq!(read_integer(&mut read), Err(Error::EndOfBuffer));

        let mut read = Bytes::from_static(&[]);
        assert_eq!(read_header(&mut read), Err(Error::EndOfBuffer));
    }

    #[test]
    fn test_tag_mismatch() {
        let mut read = Bytes::from_static(&[0x04, 0x01, 0x00]);
        assert_eq!(
            read_integer(&mut read),
            Err(Error::UnexpectedTag {
                expected: tag::INTEGER,
                found: tag::OCTET_STRING
            })
        );
    }

    #[test]
    fn test_nested_containers() {
        // SEQUENCE { SET { INTEGER 5 }, UTF8String "ok" }
        let mut set = BytesMut::new();
        write_integer(&BigInt::from(5), &mut set);
        let mut seq = BytesMut::new();
        write_tlv(tag::SET, &set, &mut seq);
        write_utf8_string("ok", &mut seq);
        let mut buf = BytesMut::new();
        write_tlv(tag::SEQUENCE, &seq, &mut buf);

        let mut read = buf.freeze();
        let mut seq = read_container(tag::SEQUENCE, &mut read).unwrap();
        assert!(!read.has_remaining());
        let mut set = read_container(tag::SET, &mut seq).unwrap();
        assert_eq!(read_integer(&mut set).unwrap(), BigInt::from(5));
        assert!(!set.has_remaining());
        assert_eq!(read_utf8_string(&mut seq).unwrap(), "ok");
        assert!(!seq.has_remaining());
    }

    #[test]
    fn test_octet_string_round_trip() {
        let mut buf = BytesMut::new();
        write_octet_string(&[0x80, 0x06, 0x07, 0x00], &mut buf);
        let mut read = buf.freeze();
        assert_eq!(
            read_octet_string(&mut read).unwrap(),
            Bytes::from_static(&[0x80, 0x06, 0x07, 0x00])
        );
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let mut read = Bytes::from_static(&[0x0c, 0x02, 0xff, 0xfe]);
        assert_eq!(read_utf8_string(&mut read), Err(Error::InvalidUtf8));
    }
}
