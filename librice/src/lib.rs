//! librice - Rice/Golomb coding for any divisor
//!
//! Values are split by a divisor M into a unary quotient and a
//! truncated-binary remainder, so M does not need to be a power of two.
//! Codewords come in two shapes: a textual form (`+1101`) handled by
//! [`RiceCodec`], and a packed bit stream handled by [`stream`].
//!
//! M is never stored alongside the data. Decoding needs the same M that
//! encoding used, and a different one is not detected.

use wasm_bindgen::prelude::*;

pub mod codec;
pub mod core;
pub mod estimate;
pub mod stream;

pub use crate::core::{
    BitReader, BitWriter, CodewordParts, Malformed, Parameter, RiceError, RiceResult, Sign,
};
pub use codec::{decode, encode, RiceCodec, DEFAULT_MAX_QUOTIENT};
pub use estimate::{best_parameter, codeword_len, estimate_parameter, stream_bits};
pub use stream::{decode_all, encode_all, StreamDecoder, StreamEncoder};

/// crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// result helpers

/// turn an error into js
fn to_js_err(e: RiceError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// api functions

/// encode one value to a textual codeword
///
/// # Arguments
/// * `value` - Signed value to encode
/// * `m` - Divisor, at least 1; decoding must use the same one
#[wasm_bindgen]
pub fn encode_value(value: i64, m: u64) -> Result<String, JsValue> {
    encode(value, m).map_err(to_js_err)
}

/// decode a textual codeword
#[wasm_bindgen]
pub fn decode_codeword(codeword: &str, m: u64) -> Result<i64, JsValue> {
    decode(codeword, m).map_err(to_js_err)
}

/// decode a codeword and return its fields as an object
///
/// `{ m, sign, quotient, remainder, remainder_width, value, length }`
#[wasm_bindgen]
pub fn inspect_codeword(codeword: &str, m: u64) -> Result<JsValue, JsValue> {
    let parts = RiceCodec::new(m)
        .and_then(|codec| codec.inspect(codeword))
        .map_err(to_js_err)?;
    serde_wasm_bindgen::to_value(&parts).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// pack values into a bit stream
#[wasm_bindgen]
pub fn pack_values(values: &[i64], m: u64) -> Result<Vec<u8>, JsValue> {
    encode_all(values, m).map_err(to_js_err)
}

/// unpack `count` values from a bit stream
#[wasm_bindgen]
pub fn unpack_values(data: &[u8], m: u64, count: usize) -> Result<Vec<i64>, JsValue> {
    decode_all(data, m, count).map_err(to_js_err)
}

/// suggest a divisor for the values
#[wasm_bindgen]
pub fn suggest_parameter(values: &[i64]) -> Result<u64, JsValue> {
    estimate_parameter(values).map_err(to_js_err)
}

/// get lib version
#[wasm_bindgen]
pub fn version() -> String {
    VERSION.to_string()
}

// streaming decoder wasm api

#[wasm_bindgen]
pub struct WasmStreamDecoder {
    inner: StreamDecoder,
}

#[wasm_bindgen]
impl WasmStreamDecoder {
    /// create a decoder for divisor `m`
    #[wasm_bindgen(constructor)]
    pub fn new(m: u64) -> Result<WasmStreamDecoder, JsValue> {
        let codec = RiceCodec::new(m).map_err(to_js_err)?;
        Ok(WasmStreamDecoder {
            inner: StreamDecoder::new(codec),
        })
    }

    /// feed more bytes
    #[wasm_bindgen]
    pub fn feed(&mut self, data: &[u8]) {
        self.inner.feed(data);
    }

    /// next value, or undefined if more bytes are needed
    #[wasm_bindgen]
    pub fn next_value(&mut self) -> Result<Option<i64>, JsValue> {
        self.inner.next_value().map_err(to_js_err)
    }

    /// values decoded so far
    #[wasm_bindgen]
    pub fn decoded(&self) -> u64 {
        self.inner.decoded()
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}
