//! Kazakhstan IIN (Individual Identification Number) checksum.
//!
//! Validates format and checksum only, using the two-pass modulo-11 scheme.
//! The embedded birth date and the century/gender digit are not checked,
//! nor whether the number is actually assigned to a person.

/// Length of an IIN in digits.
pub const IIN_LENGTH: usize = 12;

const FIRST_PASS_WEIGHTS: [u32; 11] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
const SECOND_PASS_WEIGHTS: [u32; 11] = [3, 4, 5, 6, 7, 8, 9, 10, 11, 1, 2];

/// Returns `true` if `value` is exactly 12 ASCII digits.
pub fn has_iin_format(value: &str) -> bool {
    value.len() == IIN_LENGTH && value.bytes().all(|b| b.is_ascii_digit())
}

/// Returns `true` if `value` is a well-formed IIN with a matching control digit.
pub fn is_valid_iin(value: &str) -> bool {
    if !has_iin_format(value) {
        return false;
    }

    let digits: Vec<u32> = value.bytes().map(|b| u32::from(b - b'0')).collect();
    let control = digits[IIN_LENGTH - 1];

    let first = weighted_remainder(&digits, &FIRST_PASS_WEIGHTS);
    if first < 10 {
        return first == control;
    }

    // A second remainder of 10 has no representable control digit.
    match weighted_remainder(&digits, &SECOND_PASS_WEIGHTS) {
        10 => false,
        second => second == control,
    }
}

fn weighted_remainder(digits: &[u32], weights: &[u32; 11]) -> u32 {
    digits
        .iter()
        .zip(weights.iter())
        .map(|(d, w)| d * w)
        .sum::<u32>()
        % 11
}
