//! Edge case and stability tests for the rice codec
use librice::{decode, encode, Malformed, Parameter, RiceCodec, RiceError};

// Helper to encode and decode
fn roundtrip(value: i64, codec: &RiceCodec) -> i64 {
    let codeword = codec.encode(value).expect("Encoding failed");
    codec.decode(&codeword).expect("Decoding failed")
}

fn malformed(codeword: &str, m: u64) -> Malformed {
    match decode(codeword, m) {
        Err(RiceError::MalformedCodeword(reason)) => reason,
        other => panic!("expected malformed codeword, got {:?}", other),
    }
}

// ============================================================================
// Edge Case: Extreme Values
// ============================================================================

#[test]
fn test_i64_extremes_with_large_divisors() {
    for m in [1u64 << 44, (1 << 62) + 3, 1 << 63, u64::MAX - 1, u64::MAX] {
        let codec = RiceCodec::new(m).unwrap();
        for v in [i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX] {
            assert_eq!(roundtrip(v, &codec), v, "v={} m={}", v, m);
        }
    }
}

#[test]
fn test_zero_with_every_small_divisor() {
    for m in 1..=64u64 {
        assert_eq!(decode(&encode(0, m).unwrap(), m).unwrap(), 0);
    }
}

#[test]
fn test_long_unary_run() {
    // m = 1 puts the whole magnitude in unary
    let codec = RiceCodec::new(1).unwrap();
    let codeword = codec.encode(-200_000).unwrap();
    assert_eq!(codeword.len(), 200_002);
    assert_eq!(codec.decode(&codeword).unwrap(), -200_000);
}

#[test]
fn test_quotient_limit_rejects_instead_of_allocating() {
    let codec = RiceCodec::new(1).unwrap();
    assert_eq!(
        codec.encode(1_000_000_000),
        Err(RiceError::QuotientTooLarge {
            quotient: 1_000_000_000,
            limit: librice::DEFAULT_MAX_QUOTIENT
        })
    );

    let relaxed = codec.with_max_quotient(u64::MAX);
    assert_eq!(relaxed.max_quotient(), u64::MAX);
    assert_eq!(roundtrip(3_000_000, &relaxed), 3_000_000);
}

// ============================================================================
// Edge Case: Parameter Derivation
// ============================================================================

#[test]
fn test_k_and_diff_near_powers_of_two() {
    let cases: [(u64, u32, u64); 9] = [
        (1, 0, 0),
        (2, 1, 0),
        (3, 2, 1),
        (4, 2, 0),
        (5, 3, 3),
        (1023, 10, 1),
        (1024, 10, 0),
        (1025, 11, 1023),
        (u64::MAX, 64, 1),
    ];
    for (m, k, diff) in cases {
        let p = Parameter::new(m).unwrap();
        assert_eq!((p.k(), p.diff()), (k, diff), "m={}", m);
        assert_eq!(p.is_power_of_two(), m.is_power_of_two());
    }
}

#[test]
fn test_unit_divisor_never_emits_remainder_bits() {
    let p = Parameter::new(1).unwrap();
    assert_eq!(p.remainder_field(0), (0, 0));
    for v in 0..50i64 {
        let codeword = encode(v, 1).unwrap();
        assert!(codeword.ends_with('0'));
        assert_eq!(codeword.len() as i64, v + 2);
    }
}

// ============================================================================
// Edge Case: Malformed Input
// ============================================================================

#[test]
fn test_malformed_codewords() {
    assert_eq!(malformed("", 3), Malformed::MissingSign);
    assert_eq!(malformed("*010", 3), Malformed::MissingSign);
    assert_eq!(malformed("-", 3), Malformed::MissingTerminator);
    assert_eq!(malformed("+1111111", 3), Malformed::MissingTerminator);
    assert_eq!(
        malformed("+10 1", 3),
        Malformed::UnexpectedSymbol {
            position: 3,
            symbol: ' '
        }
    );
    assert_eq!(
        malformed("+0", 8),
        Malformed::RemainderTooShort {
            expected: 3,
            found: 0
        }
    );
    assert_eq!(
        malformed("+00000", 8),
        Malformed::TrailingSymbols { count: 1 }
    );
    // k - 1 bits holding a value >= diff is never produced by the encoder
    assert_eq!(malformed("+01", 3), Malformed::NonCanonicalRemainder);
}

#[test]
fn test_negative_zero_decodes_to_zero() {
    assert_eq!(decode("-000", 4).unwrap(), 0);
}

#[test]
fn test_sign_symbol_inside_body_is_rejected() {
    assert_eq!(
        malformed("+1+0", 2),
        Malformed::UnexpectedSymbol {
            position: 2,
            symbol: '+'
        }
    );
}
