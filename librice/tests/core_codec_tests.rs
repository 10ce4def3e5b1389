mod codec_tests {
    use librice::{decode, encode, Malformed, RiceCodec, RiceError};
    use test_case::test_case;

    fn sample_values() -> Vec<i64> {
        let mut values: Vec<i64> = (-300..=300).collect();
        values.extend_from_slice(&[
            1_000,
            -1_000,
            65_535,
            -65_536,
            123_456,
            -987_654,
            1 << 20,
            -(1 << 20),
        ]);
        values
    }

    #[test_case(1 ; "unit divisor")]
    #[test_case(2 ; "two")]
    #[test_case(3 ; "three")]
    #[test_case(4 ; "four")]
    #[test_case(5 ; "five")]
    #[test_case(7 ; "seven")]
    #[test_case(8 ; "eight")]
    #[test_case(16 ; "sixteen")]
    fn test_roundtrip(m: u64) {
        for v in sample_values() {
            let codeword = encode(v, m).unwrap();
            assert_eq!(decode(&codeword, m).unwrap(), v, "v={} m={} cw={}", v, m, codeword);
        }
    }

    #[test_case(1)]
    #[test_case(3)]
    #[test_case(5)]
    #[test_case(8)]
    fn test_length_monotonic_in_magnitude(m: u64) {
        let mut previous = 0;
        for magnitude in 0..=500i64 {
            let len = encode(magnitude, m).unwrap().len();
            assert!(len >= previous, "m={} |v|={} shrank", m, magnitude);
            assert_eq!(encode(-magnitude, m).unwrap().len(), len);
            previous = len;
        }
    }

    #[test]
    fn test_unary_run_is_quotient() {
        for m in [1u64, 3, 6, 16] {
            for v in [0i64, 1, 17, -250] {
                let codeword = encode(v, m).unwrap();
                let run = codeword[1..].chars().take_while(|&c| c == '1').count() as u64;
                assert_eq!(run, v.unsigned_abs() / m);
            }
        }
    }

    #[test]
    fn test_unit_divisor() {
        let codeword = encode(5, 1).unwrap();
        assert_eq!(codeword, "+111110");
        assert_eq!(decode(&codeword, 1).unwrap(), 5);
    }

    #[test]
    fn test_power_of_two() {
        assert_eq!(encode(5, 2).unwrap(), "+1101");
        assert_eq!(decode("+1101", 2).unwrap(), 5);
    }

    #[test]
    fn test_escape_branches() {
        // m = 5: k = 3, diff = 3
        let codec = RiceCodec::new(5).unwrap();
        assert_eq!(codec.parameter().k(), 3);
        assert_eq!(codec.parameter().diff(), 3);

        // remainder 1 < diff: k - 1 = 2 bits
        let short = codec.encode(6).unwrap();
        assert_eq!(short, "+1001");
        let parts = codec.inspect(&short).unwrap();
        assert_eq!((parts.remainder, parts.remainder_width), (1, 2));
        assert_eq!(parts.value, 6);

        // remainder 4 >= diff: k = 3 bits carrying 4 + 3
        let long = codec.encode(9).unwrap();
        assert_eq!(long, "+10111");
        let parts = codec.inspect(&long).unwrap();
        assert_eq!((parts.remainder, parts.remainder_width), (4, 3));
        assert_eq!(parts.value, 9);
    }

    #[test]
    fn test_negative() {
        let codeword = encode(-5, 2).unwrap();
        assert_eq!(codeword, "-1101");
        assert_eq!(decode(&codeword, 2).unwrap(), -5);
    }

    #[test]
    fn test_missing_terminator() {
        assert_eq!(
            decode("+1111", 2),
            Err(RiceError::MalformedCodeword(Malformed::MissingTerminator))
        );
    }

    #[test]
    fn test_invalid_parameter() {
        assert_eq!(encode(3, 0), Err(RiceError::InvalidParameter(0)));
        assert_eq!(decode("+0", 0), Err(RiceError::InvalidParameter(0)));
        assert!(RiceCodec::new(0).is_err());
    }

    #[test]
    fn test_mismatched_divisor_is_not_detected() {
        let codeword = encode(9, 4).unwrap();
        assert_eq!(codeword, "+11001");
        // same symbols read with m = 5 give a different value, no error
        assert_eq!(decode(&codeword, 5).unwrap(), 11);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RiceError::InvalidParameter(0).to_string(),
            "invalid parameter: M must be at least 1, got 0"
        );
        assert_eq!(
            decode("?0", 2).unwrap_err().to_string(),
            "malformed codeword: missing sign symbol"
        );
    }
}
