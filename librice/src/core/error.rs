//! error types for the rice codec

/// Ways a codeword can fail to match the codeword grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    /// first symbol is not `+` or `-` (or the codeword is empty)
    #[error("missing sign symbol")]
    MissingSign,
    /// a symbol other than `0` or `1` after the sign
    #[error("unexpected symbol {symbol:?} at position {position}")]
    UnexpectedSymbol { position: usize, symbol: char },
    /// the unary run never ends
    #[error("missing unary terminator")]
    MissingTerminator,
    /// remainder field shorter than the divisor allows
    #[error("remainder field too short: expected at least {expected} bits, found {found}")]
    RemainderTooShort { expected: u32, found: u32 },
    /// short remainder field holding a value only the long form may carry
    #[error("remainder field is not canonical for this divisor")]
    NonCanonicalRemainder,
    /// symbols left over after the remainder field
    #[error("{count} trailing symbols after remainder field")]
    TrailingSymbols { count: usize },
    /// packed stream ended in the middle of a codeword
    #[error("stream ended inside a codeword")]
    Truncated,
}

/// Errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RiceError {
    /// the divisor must be at least 1
    #[error("invalid parameter: M must be at least 1, got {0}")]
    InvalidParameter(u64),
    /// the codeword does not follow the grammar
    #[error("malformed codeword: {0}")]
    MalformedCodeword(#[from] Malformed),
    /// the unary run would exceed the configured limit
    #[error("quotient {quotient} exceeds the limit of {limit}")]
    QuotientTooLarge { quotient: u64, limit: u64 },
    /// the decoded magnitude does not fit an i64
    #[error("decoded value does not fit in a 64-bit signed integer")]
    Overflow,
    /// the total length of a stream does not fit a u64 bit count
    #[error("stream length does not fit in a 64-bit bit count")]
    LengthOverflow,
}

/// result type for rice stuff
pub type RiceResult<T> = Result<T, RiceError>;
