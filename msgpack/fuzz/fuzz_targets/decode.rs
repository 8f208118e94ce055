#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use commonware_msgpack::{Config, Decoder, Error};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug, Clone, Copy)]
enum Op {
    PeekTag,
    I64,
    I32,
    I16,
    I8,
    U64,
    U32,
    U16,
    U8,
    Bool,
    F64,
    F32,
    IsNextNil,
    StringLength,
    String,
    BinLength,
    Bytes,
    ArraySize,
    MapSize,
    SkipSize,
    Skip,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput<'a> {
    data: &'a [u8],
    ops: Vec<Op>,
    max: u16,
    legacy_lengths: bool,
}

fn apply(decoder: &mut Decoder<Bytes>, op: Op) -> Result<(), Error> {
    match op {
        Op::PeekTag => decoder.peek_tag().map(drop),
        Op::I64 => decoder.read_i64().map(drop),
        Op::I32 => decoder.read_i32().map(drop),
        Op::I16 => decoder.read_i16().map(drop),
        Op::I8 => decoder.read_i8().map(drop),
        Op::U64 => decoder.read_u64().map(drop),
        Op::U32 => decoder.read_u32().map(drop),
        Op::U16 => decoder.read_u16().map(drop),
        Op::U8 => decoder.read_u8().map(drop),
        Op::Bool => decoder.read_bool().map(drop),
        Op::F64 => decoder.read_f64().map(drop),
        Op::F32 => decoder.read_f32().map(drop),
        Op::IsNextNil => decoder.is_next_nil().map(drop),
        Op::StringLength => decoder.read_string_length().map(drop),
        Op::String => decoder.read_string().map(drop),
        Op::BinLength => decoder.read_bin_length().map(drop),
        Op::Bytes => decoder.read_bytes().map(drop),
        Op::ArraySize => decoder.read_array_size().map(drop),
        Op::MapSize => decoder.read_map_size().map(drop),
        Op::SkipSize => decoder.skip_size().map(drop),
        Op::Skip => {
            let before = decoder.remaining();
            let skipped = decoder.skip()?;
            assert!(skipped >= 1);
            assert_eq!(before - skipped, decoder.remaining());
            Ok(())
        }
    }
}

fn fuzz(input: FuzzInput) {
    let data = Bytes::copy_from_slice(input.data);
    let cfg = Config {
        legacy_lengths: input.legacy_lengths,
        ..Config::bounded(input.max as usize)
    };

    // A sequence of reads never panics and tag errors never consume input
    let mut decoder = Decoder::with_config(data.clone(), cfg);
    for op in input.ops {
        let before = decoder.remaining();
        match apply(&mut decoder, op) {
            Ok(()) => assert!(decoder.remaining() <= before),
            Err(Error::BadTag { .. } | Error::InvalidLength { .. }) => {
                assert_eq!(decoder.remaining(), before)
            }
            Err(_) => break,
        }
    }

    // Skipping the whole buffer value by value ends exactly at its end
    let mut decoder = Decoder::new(data.clone());
    let mut total = 0;
    while decoder.remaining() > 0 {
        match decoder.skip() {
            Ok(skipped) => total += skipped,
            Err(Error::EndOfBuffer | Error::UnknownTag(_)) => return,
            Err(err) => panic!("unexpected skip error: {err}"),
        }
    }
    assert_eq!(total, data.len());
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
