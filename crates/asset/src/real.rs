//! Locale-independent numeric literal reader.
//!
//! Hand-rolled float parsing for geometry streams: optional sign, digit run,
//! optional fraction and exponent. The decimal point is always `.` no matter
//! what the host locale says.

/// Weights for the first few fractional digits; `powi` takes over past the
/// table. (Repeated `powf` would cost precision here.)
const FRACTION_LUT: [f64; 8] = [1.0, 0.1, 0.01, 0.001, 0.0001, 1e-5, 1e-6, 1e-7];

/// Parse a real number from a whitespace-bounded token.
///
/// Grammar: `[+-] digits [. digits] [eE [+-] digits]`. Returns `None` when no
/// integer digits are consumed at all, or when an exponent marker is present
/// without digits. Trailing non-numeric characters after a valid prefix are
/// ignored.
pub fn try_parse_double(token: &str) -> Option<f64> {
    let s = token.as_bytes();
    let len = s.len();
    let mut curr = 0usize;

    let mut sign = 1.0f64;
    match s.first() {
        Some(b'+') => curr += 1,
        Some(b'-') => {
            sign = -1.0;
            curr += 1;
        }
        Some(c) if c.is_ascii_digit() => {}
        _ => return None,
    }

    // Integer part.
    let mut mantissa = 0.0f64;
    let mut read = 0usize;
    while curr < len && s[curr].is_ascii_digit() {
        mantissa = mantissa * 10.0 + f64::from(s[curr] - b'0');
        curr += 1;
        read += 1;
    }
    if read == 0 {
        return None;
    }

    // Fractional part.
    if curr < len && s[curr] == b'.' {
        curr += 1;
        let mut place = 1usize;
        while curr < len && s[curr].is_ascii_digit() {
            let weight = if place < FRACTION_LUT.len() {
                FRACTION_LUT[place]
            } else {
                10f64.powi(-(place as i32))
            };
            mantissa += f64::from(s[curr] - b'0') * weight;
            place += 1;
            curr += 1;
        }
    }

    // Exponent part.
    let mut exponent = 0i32;
    if curr < len && (s[curr] == b'e' || s[curr] == b'E') {
        curr += 1;
        let mut exp_sign = 1i32;
        match s.get(curr) {
            Some(b'+') => curr += 1,
            Some(b'-') => {
                exp_sign = -1;
                curr += 1;
            }
            Some(c) if c.is_ascii_digit() => {}
            // A bare exponent marker invalidates the whole token.
            _ => return None,
        }
        let mut read = 0usize;
        while curr < len && s[curr].is_ascii_digit() {
            exponent = exponent
                .saturating_mul(10)
                .saturating_add(i32::from(s[curr] - b'0'));
            curr += 1;
            read += 1;
        }
        if read == 0 {
            return None;
        }
        exponent *= exp_sign;
    }

    // 10^e applied as 5^e * 2^e; the power-of-two half is exact.
    let value = if exponent != 0 {
        mantissa * 5f64.powi(exponent) * f64::from(exponent).exp2()
    } else {
        mantissa
    };
    Some(sign * value)
}
