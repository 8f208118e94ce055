//! Decoding the output of an independent MessagePack encoder.

use bytes::Bytes;
use commonware_msgpack::{tag, Decode, Decoder, Error};
use rmp::encode;
use std::collections::HashMap;

fn decoder(buf: Vec<u8>) -> Decoder<Bytes> {
    Decoder::new(Bytes::from(buf))
}

#[test]
fn test_signed_boundaries() {
    let values = [
        0i64,
        1,
        -1,
        -32,
        -33,
        127,
        128,
        255,
        256,
        65535,
        65536,
        i64::from(i8::MIN),
        i64::from(i8::MAX),
        i64::from(i16::MIN),
        i64::from(i16::MAX),
        i64::from(i32::MIN),
        i64::from(i32::MAX),
        i64::MIN,
        i64::MAX,
    ];
    for value in values {
        let mut buf = Vec::new();
        encode::write_sint(&mut buf, value).unwrap();
        let mut decoder = decoder(buf);
        assert_eq!(decoder.read_i64(), Ok(value), "value {value}");
        assert_eq!(decoder.remaining(), 0);
    }
}

#[test]
fn test_unsigned_boundaries() {
    let values = [
        0u64,
        127,
        128,
        255,
        256,
        65535,
        65536,
        u64::from(u32::MAX),
        u64::from(u32::MAX) + 1,
        i64::MAX as u64,
        u64::MAX,
    ];
    for value in values {
        let mut buf = Vec::new();
        encode::write_uint(&mut buf, value).unwrap();
        let mut decoder = decoder(buf.clone());
        assert_eq!(decoder.read_u64(), Ok(value), "value {value}");
        assert_eq!(decoder.remaining(), 0);

        // The signed reader accepts unsigned tags up to i64::MAX
        let expected = i64::try_from(value).map_err(|_| Error::IntegerOverflow {
            value: i128::from(value),
            bits: 64,
        });
        assert_eq!(self::decoder(buf).read_i64(), expected);
    }
}

#[test]
fn test_narrow_widths() {
    // Forced-width tags exercise every sized tag against every reader
    let mut buf = Vec::new();
    encode::write_u8(&mut buf, 200).unwrap();
    encode::write_u16(&mut buf, 60000).unwrap();
    encode::write_u32(&mut buf, 4_000_000_000).unwrap();
    encode::write_i8(&mut buf, -100).unwrap();
    encode::write_i16(&mut buf, -30000).unwrap();
    encode::write_i32(&mut buf, -2_000_000_000).unwrap();
    encode::write_i64(&mut buf, 5).unwrap();
    encode::write_u64(&mut buf, 6).unwrap();

    let mut decoder = decoder(buf);
    assert_eq!(decoder.read_u8(), Ok(200));
    assert_eq!(decoder.read_u16(), Ok(60000));
    assert_eq!(decoder.read_u32(), Ok(4_000_000_000));
    assert_eq!(decoder.read_i8(), Ok(-100));
    assert_eq!(decoder.read_i16(), Ok(-30000));
    assert_eq!(decoder.read_i32(), Ok(-2_000_000_000));
    assert_eq!(decoder.read_u8(), Ok(5));
    assert_eq!(decoder.read_i8(), Ok(6));
    assert_eq!(decoder.remaining(), 0);
}

#[test]
fn test_narrow_width_errors() {
    let mut buf = Vec::new();
    encode::write_u16(&mut buf, 60000).unwrap();
    assert_eq!(
        i16::decode(&buf[..]),
        Err(Error::IntegerOverflow {
            value: 60000,
            bits: 16
        })
    );

    let mut buf = Vec::new();
    encode::write_i32(&mut buf, -1).unwrap();
    assert_eq!(
        u32::decode(&buf[..]),
        Err(Error::IntegerUnderflow { value: -1, bits: 32 })
    );

    let mut buf = Vec::new();
    encode::write_sint(&mut buf, -1).unwrap();
    assert!(matches!(
        u64::decode(&buf[..]),
        Err(Error::BadTag {
            family: "negative fixint",
            ..
        })
    ));
}

#[test]
fn test_floats() {
    for value in [0.0f32, -1.5, f32::MIN_POSITIVE, f32::MAX, f32::MIN] {
        let mut buf = Vec::new();
        encode::write_f32(&mut buf, value).unwrap();
        assert_eq!(f32::decode(&buf[..]), Ok(value));
        assert_eq!(f64::decode(&buf[..]), Ok(f64::from(value)));
    }
    for value in [0.0f64, 0.1, -1e300, f64::from(f32::MAX)] {
        let mut buf = Vec::new();
        encode::write_f64(&mut buf, value).unwrap();
        assert_eq!(f64::decode(&buf[..]), Ok(value));
    }

    let mut buf = Vec::new();
    encode::write_f64(&mut buf, 1e300).unwrap();
    assert_eq!(f32::decode(&buf[..]), Err(Error::FloatOverflow(1e300)));
}

#[test]
fn test_bool_and_nil() {
    let mut buf = Vec::new();
    encode::write_bool(&mut buf, true).unwrap();
    encode::write_bool(&mut buf, false).unwrap();
    encode::write_nil(&mut buf).unwrap();
    encode::write_nil(&mut buf).unwrap();

    let mut decoder = decoder(buf);
    assert_eq!(decoder.read_bool(), Ok(true));
    assert_eq!(decoder.read_bool(), Ok(false));
    assert_eq!(decoder.remaining(), 2);
    assert_eq!(decoder.is_next_nil(), Ok(true));
    assert_eq!(decoder.remaining(), 1);
    assert_eq!(decoder.read_array_size(), Ok(0));
    assert_eq!(decoder.remaining(), 0);
}

#[test]
fn test_string_widths() {
    for len in [0usize, 31, 32, 255, 256, 65535, 65536] {
        let value = "x".repeat(len);
        let mut buf = Vec::new();
        encode::write_str(&mut buf, &value).unwrap();
        let expected_tag = match len {
            0..=31 => 0xa0 | len as u8,
            32..=255 => tag::STR8,
            256..=65535 => tag::STR16,
            _ => tag::STR32,
        };
        assert_eq!(buf[0], expected_tag);

        let mut decoder = decoder(buf);
        assert_eq!(decoder.read_string(), Ok(value));
        assert_eq!(decoder.remaining(), 0);
    }
}

#[test]
fn test_utf8() {
    let mut buf = Vec::new();
    encode::write_str(&mut buf, "héllo, wörld ✓").unwrap();
    assert_eq!(String::decode(&buf[..]), Ok("héllo, wörld ✓".to_string()));
}

#[test]
fn test_binary_widths() {
    for len in [0usize, 1, 255, 256, 65535, 65536] {
        let value: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let mut buf = Vec::new();
        encode::write_bin(&mut buf, &value).unwrap();
        let mut decoder = decoder(buf);
        assert_eq!(decoder.read_bytes(), Ok(Bytes::from(value)));
        assert_eq!(decoder.remaining(), 0);
    }
}

#[test]
fn test_container_widths() {
    for len in [0u32, 15, 16, 65535, 65536] {
        let mut buf = Vec::new();
        encode::write_array_len(&mut buf, len).unwrap();
        for i in 0..len {
            encode::write_uint(&mut buf, u64::from(i % 300)).unwrap();
        }
        let decoded = Vec::<u16>::decode(&buf[..]).unwrap();
        assert_eq!(decoded.len(), len as usize);
        assert!(decoded.iter().enumerate().all(|(i, v)| *v == (i % 300) as u16));

        let mut buf = Vec::new();
        encode::write_map_len(&mut buf, len).unwrap();
        for i in 0..len {
            encode::write_uint(&mut buf, u64::from(i)).unwrap();
            encode::write_bool(&mut buf, i % 2 == 0).unwrap();
        }
        let decoded = HashMap::<u32, bool>::decode(&buf[..]).unwrap();
        assert_eq!(decoded.len(), len as usize);
        assert!(decoded.iter().all(|(k, v)| *v == (k % 2 == 0)));
    }
}

#[test]
fn test_structured() {
    // [{"a": [1, nil, -3]}, {}, nil]
    let mut buf = Vec::new();
    encode::write_array_len(&mut buf, 3).unwrap();
    encode::write_map_len(&mut buf, 1).unwrap();
    encode::write_str(&mut buf, "a").unwrap();
    encode::write_array_len(&mut buf, 3).unwrap();
    encode::write_sint(&mut buf, 1).unwrap();
    encode::write_nil(&mut buf).unwrap();
    encode::write_sint(&mut buf, -3).unwrap();
    encode::write_map_len(&mut buf, 0).unwrap();
    encode::write_nil(&mut buf).unwrap();

    type Item = Option<HashMap<String, Vec<Option<i32>>>>;
    let decoded = Vec::<Item>::decode(&buf[..]).unwrap();
    assert_eq!(decoded.len(), 3);
    assert_eq!(
        decoded[0].as_ref().unwrap()["a"],
        vec![Some(1), None, Some(-3)]
    );
    assert!(decoded[1].as_ref().unwrap().is_empty());
    assert!(decoded[2].is_none());
}
