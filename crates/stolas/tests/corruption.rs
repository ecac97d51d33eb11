//! Corrupt-archive handling: every failure is an error value, never a panic.

use stolas::{CodeTable, Error};

fn valid_archive() -> Vec<u8> {
    stolas::compress(b"an archive to be vandalized, at length and thoroughly")
}

#[test]
fn truncation_at_every_prefix_fails_cleanly() {
    let archive = valid_archive();
    for len in 0..archive.len() {
        match stolas::decompress(&archive[..len]) {
            Err(_) => {}
            Ok(out) => panic!("prefix of {len} bytes decoded to {} bytes", out.len()),
        }
    }
}

#[test]
fn unknown_class_tag_is_corrupted() {
    let mut archive = valid_archive();
    archive[0] = 7;
    assert!(matches!(
        stolas::decompress(&archive),
        Err(Error::CorruptedData { .. })
    ));
}

#[test]
fn inflated_symbol_count_is_corrupted() {
    let mut archive = valid_archive();
    archive[1] = 0xFF;
    archive[2] = 0xFF;
    assert!(stolas::decompress(&archive).is_err());
}

#[test]
fn zeroed_entry_width_is_corrupted() {
    let mut archive = valid_archive();
    // first entry's width byte: class tag + count + symbol
    archive[4] = 0;
    assert!(stolas::decompress(&archive).is_err());
}

#[test]
fn overdeclared_length_is_corrupted() {
    let mut archive = valid_archive();
    let (_, header_len) = CodeTable::parse(&archive).unwrap();
    archive[header_len..header_len + 8].copy_from_slice(&(u64::MAX / 2).to_le_bytes());
    assert!(stolas::decompress(&archive).is_err());
}

#[test]
fn header_byte_flips_never_panic() {
    let archive = valid_archive();
    let (_, header_len) = CodeTable::parse(&archive).unwrap();
    for pos in 0..header_len {
        for bit in 0..8 {
            let mut mutated = archive.clone();
            mutated[pos] ^= 1 << bit;
            // either cleanly rejected or decoded to *something*; both are
            // acceptable, panicking or hanging is not
            let _ = stolas::decompress(&mutated);
        }
    }
}

#[test]
fn empty_and_noise_inputs_are_rejected() {
    assert!(stolas::decompress(b"").is_err());
    assert!(stolas::decompress(&[0u8; 2]).is_err());
    assert!(stolas::decompress(&[0xAB; 512]).is_err());
    assert!(stolas::decompress_checked(&[0xAB; 512]).is_none());
}

#[test]
fn empty_table_with_declared_payload_is_corrupted() {
    // a hand-built archive claiming one symbol of output with no code table
    let mut archive = vec![0u8, 0, 0];
    archive.extend_from_slice(&1u64.to_le_bytes());
    archive.push(0);
    assert!(stolas::decompress(&archive).is_err());
}
