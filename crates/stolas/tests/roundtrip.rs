//! End-to-end archive round-trips across input shapes.

use stolas::{Codec, Compressor, Decompressor, HuffmanCodec, WidthClass};

#[test]
fn roundtrip_text() {
    let input = b"The quick brown fox jumps over the lazy dog. \
                  Pack my box with five dozen liquor jugs.";
    let archive = stolas::compress(input);
    assert_eq!(stolas::decompress(&archive).unwrap(), input);
}

#[test]
fn roundtrip_empty() {
    let archive = stolas::compress(b"");
    assert_eq!(stolas::decompress(&archive).unwrap(), b"");
}

#[test]
fn roundtrip_single_repeated_byte() {
    for n in [1usize, 2, 7, 8, 9, 1000] {
        let input = vec![b'#'; n];
        let archive = stolas::compress(&input);
        assert_eq!(stolas::decompress(&archive).unwrap(), input, "n = {n}");
    }
}

#[test]
fn roundtrip_binary_with_all_values() {
    let input: Vec<u8> = (0..=255u8).flat_map(|b| std::iter::repeat(b).take(b as usize + 1)).collect();
    let archive = stolas::compress(&input);
    assert_eq!(stolas::decompress(&archive).unwrap(), input);
}

#[test]
fn roundtrip_incompressible_noise() {
    // xorshift noise: high-entropy input expands a little but must round-trip
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    let input: Vec<u8> = (0..8192)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state as u8
        })
        .collect();
    let archive = stolas::compress(&input);
    assert_eq!(stolas::decompress(&archive).unwrap(), input);
}

#[test]
fn example_scenario_shape_and_ratio() {
    // a=4 b=3 c=2 d=1: four codes, none wider than 4 bits, 8-bit class
    let (table, _) = stolas::CodeTable::parse(&stolas::compress(b"aaaabbbccd")).unwrap();
    assert_eq!(table.len(), 4);
    assert!(table.max_width() <= 4);
    assert_eq!(table.class(), WidthClass::B8);

    // on a large repeat the payload shrinks well below the input
    let input = b"aaaabbbccd".repeat(500);
    let archive = stolas::compress(&input);
    assert!(archive.len() < input.len() / 2);
    assert_eq!(stolas::decompress(&archive).unwrap(), input);
}

#[test]
fn compressed_size_stays_within_bound() {
    let codec = HuffmanCodec::new();
    for input in [
        &b""[..],
        &b"a"[..],
        &b"repetitive repetitive repetitive"[..],
        &(0..=255u8).collect::<Vec<u8>>()[..],
    ] {
        let archive = codec.compress(input).unwrap();
        assert!(archive.len() <= codec.max_compressed_size(input.len()));
    }
}

#[test]
fn trait_buffer_oriented_calls() {
    let codec = HuffmanCodec::new();
    let input = b"buffered operation round-trip";

    let mut archive = vec![0u8; codec.max_compressed_size(input.len())];
    let written = codec.compress_to(input, &mut archive).unwrap();

    let mut restored = vec![0u8; input.len()];
    let produced = codec.decompress_to(&archive[..written], &mut restored).unwrap();
    assert_eq!(&restored[..produced], input);
}

#[test]
fn codec_verify_and_measure() {
    let codec = HuffmanCodec::new();
    let input = b"mississippi".repeat(64);

    assert!(codec.verify_roundtrip(&input).unwrap());
    let ratio = codec.measure_ratio(&input).unwrap();
    assert!(ratio.is_effective());
    assert!(ratio.ratio() > 1.5);
}

#[test]
fn decompress_checked_is_some_on_valid_archive() {
    let archive = stolas::compress(b"kept intact");
    assert_eq!(stolas::decompress_checked(&archive).unwrap(), b"kept intact");
}
