//! IEEE 754 binary16 ("half") codec.
//!
//! [`F16`] is an opaque 16-bit tag. Conversions to and from `f32`/`f64` are done
//! with integer bit manipulation only: the exponent is rebiased by adding or
//! subtracting precomputed bias-difference constants and the mantissa is
//! truncated by shifting. Subnormals go through a single power-of-two multiply,
//! which is exact.

use std::fmt;

const MANTISSA_LEN_16: u32 = 10;
const MANTISSA_LEN_32: u32 = 23;
const MANTISSA_LEN_64: u32 = 52;

const SHIFT_32: u32 = MANTISSA_LEN_32 - MANTISSA_LEN_16;
const SHIFT_64: u32 = MANTISSA_LEN_64 - MANTISSA_LEN_16;

const SHIFT_SIGN_32: u32 = 32 - 16;
const SHIFT_SIGN_64: u32 = 64 - 16;

/// infinity, as f32 / f64 bits.
const INF_N_32: u32 = 0x7F80_0000;
const INF_N_64: u64 = 0x7FF0_0000_0000_0000;
/// largest finite half (65504), as f32 / f64 bits.
const MAX_N_32: u32 = 0x477F_E000;
const MAX_N_64: u64 = 0x40EF_FC00_0000_0000;
/// smallest normal half (2^-14), as f32 / f64 bits.
const MIN_N_32: u32 = 0x3880_0000;
const MIN_N_64: u64 = 0x3F10_0000_0000_0000;
const SIGN_N_32: u32 = 1 << 31;
const SIGN_N_64: u64 = 1 << 63;

const INF_C_32: u32 = INF_N_32 >> SHIFT_32;
const INF_C_64: u64 = INF_N_64 >> SHIFT_64;
/// smallest half NaN, as f32 / f64 bits.
const NAN_N_32: u32 = (INF_C_32 + 1) << SHIFT_32;
const NAN_N_64: u64 = (INF_C_64 + 1) << SHIFT_64;
const MAX_C_32: u32 = MAX_N_32 >> SHIFT_32;
const MAX_C_64: u64 = MAX_N_64 >> SHIFT_64;
const MIN_C_32: u32 = MIN_N_32 >> SHIFT_32;
const MIN_C_64: u64 = MIN_N_64 >> SHIFT_64;
const SIGN_C: u16 = 1 << 15;

/// 2^37 and 2^66: scale a sub-2^-14 magnitude so that its truncated integer
/// value, shifted down, is the half subnormal mantissa.
const MUL_N_32: u32 = 0x5200_0000;
const MUL_N_64: u64 = 0x4410_0000_0000_0000;
/// 2^-24: the value of one half subnormal step.
const MUL_C_32: u32 = 0x3380_0000;
const MUL_C_64: u64 = 0x3E70_0000_0000_0000;

/// largest subnormal half mantissa.
const SUB_C: u32 = (1 << MANTISSA_LEN_16) - 1;
/// smallest normal half, without sign.
const NOR_C: u32 = 1 << MANTISSA_LEN_16;

const MAX_D_32: u32 = INF_C_32 - MAX_C_32 - 1;
const MAX_D_64: u64 = INF_C_64 - MAX_C_64 - 1;
const MIN_D_32: u32 = MIN_C_32 - SUB_C - 1;
const MIN_D_64: u64 = MIN_C_64 - SUB_C as u64 - 1;

/// Half-precision float stored as its raw bit pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct F16(u16);

impl F16 {
    pub const ZERO: F16 = F16(0x0000);
    pub const NEG_ZERO: F16 = F16(0x8000);
    pub const INFINITY: F16 = F16(0x7C00);
    pub const NEG_INFINITY: F16 = F16(0xFC00);
    /// The NaN every NaN input is encoded to.
    pub const NAN: F16 = F16(0x7C01);
    pub const MAX: F16 = F16(0x7BFF);
    pub const MIN_POSITIVE: F16 = F16(0x0400);
    pub const MIN_POSITIVE_SUBNORMAL: F16 = F16(0x0001);

    pub const fn from_bits(bits: u16) -> Self {
        F16(bits)
    }

    pub const fn to_bits(self) -> u16 {
        self.0
    }

    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        F16(u16::from_le_bytes(bytes))
    }

    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        F16(u16::from_be_bytes(bytes))
    }

    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub fn is_nan(self) -> bool {
        self.0 & !SIGN_C > Self::INFINITY.0
    }

    pub fn is_sign_negative(self) -> bool {
        self.0 & SIGN_C != 0
    }

    /// Encodes an `f32`. Magnitudes above [`F16::MAX`] become infinity, magnitudes
    /// below the smallest subnormal become zero, and the mantissa is truncated.
    pub fn from_f32(x: f32) -> Self {
        let mut v = x.to_bits();
        let mut sign = v & SIGN_N_32;
        v ^= sign;
        sign >>= SHIFT_SIGN_32;

        if MIN_N_32 > v {
            // exact: power-of-two scaling of a value below 2^-14 stays below 2^23.
            v = (f32::from_bits(MUL_N_32) * f32::from_bits(v)) as u32;
        }
        if INF_N_32 > v && v > MAX_N_32 {
            v = INF_N_32;
        }
        if v > INF_N_32 {
            v = NAN_N_32;
        }
        v >>= SHIFT_32;
        if v > MAX_C_32 {
            v -= MAX_D_32;
        }
        if v > SUB_C {
            v -= MIN_D_32;
        }

        F16((v | sign) as u16)
    }

    /// Encodes an `f64`, with the same saturation rules as [`F16::from_f32`].
    pub fn from_f64(x: f64) -> Self {
        let mut v = x.to_bits();
        let mut sign = v & SIGN_N_64;
        v ^= sign;
        sign >>= SHIFT_SIGN_64;

        if MIN_N_64 > v {
            v = (f64::from_bits(MUL_N_64) * f64::from_bits(v)) as u64;
        }
        if INF_N_64 > v && v > MAX_N_64 {
            v = INF_N_64;
        }
        if v > INF_N_64 {
            v = NAN_N_64;
        }
        v >>= SHIFT_64;
        if v > MAX_C_64 {
            v -= MAX_D_64;
        }
        if v > SUB_C as u64 {
            v -= MIN_D_64;
        }

        F16((v | sign) as u16)
    }

    pub fn to_f32(self) -> f32 {
        let mut v = self.0 as u32;
        let mut sign = v & SIGN_C as u32;
        v ^= sign;
        sign <<= SHIFT_SIGN_32;

        // subnormals (and zero) are scaled instead of rebiased.
        if NOR_C > v {
            return f32::from_bits((f32::from_bits(MUL_C_32) * v as f32).to_bits() | sign);
        }
        v += MIN_D_32;
        if v > MAX_C_32 {
            v += MAX_D_32;
        }
        f32::from_bits((v << SHIFT_32) | sign)
    }

    pub fn to_f64(self) -> f64 {
        let mut v = self.0 as u64;
        let mut sign = v & SIGN_C as u64;
        v ^= sign;
        sign <<= SHIFT_SIGN_64;

        if NOR_C as u64 > v {
            return f64::from_bits((f64::from_bits(MUL_C_64) * v as f64).to_bits() | sign);
        }
        v += MIN_D_64;
        if v > MAX_C_64 {
            v += MAX_D_64;
        }
        f64::from_bits((v << SHIFT_64) | sign)
    }
}

impl From<F16> for f32 {
    fn from(h: F16) -> Self {
        h.to_f32()
    }
}

impl From<F16> for f64 {
    fn from(h: F16) -> Self {
        h.to_f64()
    }
}

/// Seven fractional digits of the decoded value, e.g. `0.5000000`.
/// Non-finite values print as `+Inf`, `-Inf` and `NaN`.
impl fmt::Display for F16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nan() {
            f.write_str("NaN")
        } else if self.0 & !SIGN_C == Self::INFINITY.0 {
            f.write_str(if self.is_sign_negative() { "-Inf" } else { "+Inf" })
        } else {
            write!(f, "{:.7}", self.to_f64())
        }
    }
}
