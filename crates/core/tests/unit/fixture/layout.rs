//! Task File Layout Tests.
//!
//! Verifies the serialized byte layout: register bank, code header, instruction
//! words and data triples, and byte-identical output for the stock fixture.

use pretty_assertions::assert_eq;
use rstest::rstest;

use rvtask_core::config::{FixtureConfig, ImmediateMode};
use rvtask_core::{FixtureBuilder, Instruction};

use crate::common::{STOCK_DATA, STOCK_WORDS, expected_stock_image, stock_fixture, word_at, words};

#[test]
fn stock_fixture_is_byte_identical_to_the_expected_image() {
    let bytes = stock_fixture(ImmediateMode::Truncate).to_bytes();
    assert_eq!(bytes, expected_stock_image());
}

#[test]
fn stock_fixture_has_the_documented_size() {
    let fixture = stock_fixture(ImmediateMode::Truncate);
    assert_eq!(fixture.encoded_len(), 236);
    assert_eq!(fixture.to_bytes().len(), 236);
}

#[test]
fn stock_registers_hold_pc_and_return_address() {
    let fixture = stock_fixture(ImmediateMode::Truncate);
    assert_eq!(fixture.pc(), 0x1000);
    assert_eq!(fixture.return_address(), 0x1034);

    let bytes = fixture.to_bytes();
    assert_eq!(word_at(&bytes, 0), 0x1000);
    assert_eq!(word_at(&bytes, 4), 0x1034);
    assert!(words(&bytes[8..128]).iter().all(|&w| w == 0));
}

#[test]
fn code_header_and_words_follow_the_register_bank() {
    let bytes = stock_fixture(ImmediateMode::Truncate).to_bytes();
    assert_eq!(word_at(&bytes, 128), 0x1000);
    assert_eq!(word_at(&bytes, 132), 52);
    assert_eq!(words(&bytes[136..136 + 52]), STOCK_WORDS.to_vec());
}

#[test]
fn data_triples_close_the_file() {
    let bytes = stock_fixture(ImmediateMode::Truncate).to_bytes();
    let tail = words(&bytes[188..]);
    let expected: Vec<u32> = STOCK_DATA.iter().flat_map(|&a| [a, 4, 0]).collect();
    assert_eq!(tail, expected);
}

#[rstest]
#[case(0, 0)]
#[case(1, 0)]
#[case(0, 3)]
#[case(13, 4)]
#[case(64, 17)]
fn encoded_len_formula(#[case] n: usize, #[case] m: u32) {
    let mut builder = FixtureBuilder::new(&FixtureConfig::default())
        .instructions((0..n).map(|_| Instruction::add(5, 6, 7)));
    for i in 0..m {
        builder = builder.data(0x4000 + i * 4, i);
    }
    let fixture = builder.build().unwrap();

    let expected = 128 + 8 + 4 * n + 12 * m as usize;
    assert_eq!(fixture.encoded_len(), expected);
    assert_eq!(fixture.to_bytes().len(), expected);
}

#[test]
fn empty_program_returns_to_the_code_base() {
    let fixture = FixtureBuilder::new(&FixtureConfig::default()).build().unwrap();
    assert_eq!(fixture.return_address(), 0x1000);

    let bytes = fixture.to_bytes();
    assert_eq!(words(&bytes[128..]), vec![0x1000, 0]);
}

#[test]
fn data_values_are_written_in_caller_order() {
    let fixture = FixtureBuilder::new(&FixtureConfig::default())
        .data(0x3000, 0xDEAD_BEEF)
        .data(0x2000, 0x1234_5678)
        .build()
        .unwrap();
    let bytes = fixture.to_bytes();
    assert_eq!(
        words(&bytes[136..]),
        vec![0x3000, 4, 0xDEAD_BEEF, 0x2000, 4, 0x1234_5678]
    );
}

#[test]
fn register_overrides_land_in_their_slots() {
    let fixture = FixtureBuilder::new(&FixtureConfig::default())
        .register(2, 0x2000)
        .register(31, 0xFFFF_FFFF)
        .build()
        .unwrap();
    let bytes = fixture.to_bytes();
    assert_eq!(word_at(&bytes, 2 * 4), 0x2000);
    assert_eq!(word_at(&bytes, 31 * 4), 0xFFFF_FFFF);
}

#[test]
fn building_twice_is_deterministic() {
    let a = stock_fixture(ImmediateMode::Expand).to_bytes();
    let b = stock_fixture(ImmediateMode::Expand).to_bytes();
    assert_eq!(a, b);
}

#[test]
fn write_to_matches_to_bytes() {
    let fixture = stock_fixture(ImmediateMode::Truncate);
    let mut out = Vec::new();
    fixture.write_to(&mut out).unwrap();
    assert_eq!(out, fixture.to_bytes());
}
