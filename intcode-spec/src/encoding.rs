//! # Instruction Encoding
//!
//! Intcode packs an instruction into one decimal word:
//!
//! ```text
//!   A B C D E
//!   | | | +-+-- opcode (two digits)
//!   | | +------ mode of parameter 1
//!   | +-------- mode of parameter 2
//!   +---------- mode of parameter 3
//! ```
//!
//! The word's sign is ignored when decoding.

use crate::error::{IntcodeError, Result};
use crate::instruction::{Instruction, Mode};
use crate::opcode::Opcode;
use crate::{Value, MAX_PARAMS, MAX_RAW_OPCODE};

/// Opcode field width (two decimal digits)
pub const OPCODE_RADIX: u64 = 100;

/// Place value of the first parameter's mode digit
pub const FIRST_MODE_PLACE: u64 = 100;

/// Extract the two-digit opcode field (sign ignored)
#[inline]
pub const fn extract_opcode(raw: Value) -> u8 {
    (raw.unsigned_abs() % OPCODE_RADIX) as u8
}

/// Extract the raw mode digits, indexed by parameter position.
///
/// Digits come from the hundreds, thousands and ten-thousands places of the
/// absolute value, so the rightmost mode digit belongs to the first
/// parameter.
pub fn mode_digits(raw: Value) -> [u8; MAX_PARAMS] {
    let abs = raw.unsigned_abs();
    let mut digits = [0u8; MAX_PARAMS];
    let mut place = FIRST_MODE_PLACE;
    for digit in digits.iter_mut() {
        *digit = ((abs / place) % 10) as u8;
        place *= 10;
    }
    digits
}

/// Decode a raw word into an instruction.
///
/// Fails with [`IntcodeError::InvalidOperation`] when the absolute value
/// exceeds [`MAX_RAW_OPCODE`] or the opcode field is undefined.
pub fn decode(raw: Value) -> Result<Instruction> {
    let abs = raw.unsigned_abs();
    if abs > MAX_RAW_OPCODE as u64 {
        return Err(IntcodeError::InvalidOperation(raw));
    }

    let opcode =
        Opcode::from_code(extract_opcode(raw)).ok_or(IntcodeError::InvalidOperation(raw))?;
    let modes = mode_digits(raw).map(Mode::from_digit);

    Ok(Instruction::with_modes(opcode, modes))
}

/// Encode an instruction into its canonical raw word.
///
/// Only the modes of parameters the opcode actually has are encoded.
pub fn encode(instr: &Instruction) -> Value {
    let mut raw = instr.opcode.code() as Value;
    let mut place = FIRST_MODE_PLACE as Value;
    for mode in &instr.modes[..instr.param_count()] {
        raw += mode.digit() as Value * place;
        place *= 10;
    }
    raw
}

/// Check if `raw` is exactly the canonical encoding of what it decodes to
pub fn is_canonical(raw: Value) -> bool {
    decode(raw).is_ok_and(|instr| encode(&instr) == raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_opcode() {
        assert_eq!(extract_opcode(1002), 2);
        assert_eq!(extract_opcode(-1002), 2);
        assert_eq!(extract_opcode(99), 99);
        assert_eq!(extract_opcode(21199), 99);
    }

    #[test]
    fn test_mode_digits() {
        assert_eq!(mode_digits(1002), [0, 1, 0]);
        assert_eq!(mode_digits(21202), [2, 1, 2]);
        assert_eq!(mode_digits(203), [2, 0, 0]);
        assert_eq!(mode_digits(-1101), [1, 1, 0]);
        assert_eq!(mode_digits(99), [0, 0, 0]);
    }

    #[test]
    fn test_decode_simple() {
        let instr = decode(1002).unwrap();
        assert_eq!(instr.opcode, Opcode::Multiply);
        assert_eq!(
            instr.modes,
            [Mode::Positional, Mode::Immediate, Mode::Positional]
        );
    }

    #[test]
    fn test_decode_ignores_sign() {
        assert_eq!(decode(-1002).unwrap(), decode(1002).unwrap());
        assert_eq!(decode(-99).unwrap().opcode, Opcode::Halt);
    }

    #[test]
    fn test_decode_bound() {
        assert!(decode(MAX_RAW_OPCODE).is_ok());
        assert!(decode(-MAX_RAW_OPCODE).is_ok());
        // Opcode 1 is fine, but the word is past the bound
        assert!(matches!(
            decode(22301),
            Err(IntcodeError::InvalidOperation(22301))
        ));
        assert!(decode(99999).is_err());
        assert!(decode(Value::MIN).is_err());
        assert!(decode(Value::MAX).is_err());
    }

    #[test]
    fn test_decode_undefined_opcode() {
        assert!(decode(0).is_err());
        assert!(decode(10).is_err());
        assert!(decode(98).is_err());
        assert!(decode(1010).is_err());
    }

    #[test]
    fn test_decode_high_mode_digit_is_immediate() {
        let instr = decode(1399).unwrap();
        assert_eq!(instr.opcode, Opcode::Halt);
        assert_eq!(instr.modes[0], Mode::Immediate);
        assert_eq!(instr.modes[1], Mode::Immediate);
    }

    #[test]
    fn test_encode() {
        let instr = Instruction::with_modes(
            Opcode::Add,
            [Mode::Relative, Mode::Immediate, Mode::Relative],
        );
        assert_eq!(encode(&instr), 21201);
        assert_eq!(encode(&Instruction::new(Opcode::Halt)), 99);
    }

    #[test]
    fn test_encode_ignores_unused_modes() {
        let instr = Instruction::with_modes(
            Opcode::Output,
            [Mode::Immediate, Mode::Relative, Mode::Relative],
        );
        assert_eq!(encode(&instr), 104);
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical(1002));
        assert!(is_canonical(99));
        assert!(!is_canonical(-1002));
        assert!(!is_canonical(1399));
        assert!(!is_canonical(10104));
        assert!(!is_canonical(99999));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_opcode() -> impl Strategy<Value = Opcode> {
        proptest::sample::select(Opcode::ALL.to_vec())
    }

    fn arb_mode() -> impl Strategy<Value = Mode> {
        prop_oneof![
            Just(Mode::Positional),
            Just(Mode::Immediate),
            Just(Mode::Relative)
        ]
    }

    proptest! {
        #[test]
        fn test_out_of_bound_words_never_decode(raw in any::<Value>()) {
            prop_assume!(raw.unsigned_abs() > MAX_RAW_OPCODE as u64);
            prop_assert!(decode(raw).is_err());
        }

        #[test]
        fn test_undefined_opcode_never_decodes(raw in -MAX_RAW_OPCODE..=MAX_RAW_OPCODE) {
            prop_assume!(Opcode::from_code(extract_opcode(raw)).is_none());
            prop_assert!(matches!(decode(raw), Err(IntcodeError::InvalidOperation(r)) if r == raw));
        }

        #[test]
        fn test_mode_digits_follow_padded_decimal(raw in -MAX_RAW_OPCODE..=MAX_RAW_OPCODE) {
            let padded = format!("{:05}", raw.unsigned_abs());
            let bytes = padded.as_bytes();
            let digits = mode_digits(raw);
            prop_assert_eq!(digits[2], bytes[0] - b'0');
            prop_assert_eq!(digits[1], bytes[1] - b'0');
            prop_assert_eq!(digits[0], bytes[2] - b'0');
            if let Ok(instr) = decode(raw) {
                for (mode, digit) in instr.modes.iter().zip(digits) {
                    prop_assert_eq!(*mode, Mode::from_digit(digit));
                }
            }
        }

        #[test]
        fn test_encoded_words_decode(
            opcode in arb_opcode(),
            modes in proptest::array::uniform3(arb_mode()),
        ) {
            let instr = Instruction::with_modes(opcode, modes);
            let raw = encode(&instr);
            prop_assert!(raw <= MAX_RAW_OPCODE);
            let decoded = decode(raw).unwrap();
            prop_assert_eq!(decoded.opcode, opcode);
            let used = opcode.param_count();
            prop_assert_eq!(&decoded.modes[..used], &modes[..used]);
        }
    }
}
