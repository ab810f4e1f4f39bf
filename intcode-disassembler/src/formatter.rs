//! Instruction formatting to assembly text

use intcode_spec::{Instruction, Mode, Value};

/// Format instruction as assembly text.
///
/// `operands` are the raw parameter words, in order; missing words are
/// shown as `?`.
pub fn format(instr: &Instruction, operands: &[Value]) -> String {
    let count = instr.param_count();
    if count == 0 {
        return instr.mnemonic().to_string();
    }

    let params: Vec<String> = (0..count)
        .map(|i| match operands.get(i) {
            Some(&raw) => format_operand(instr.mode(i), raw),
            None => "?".to_string(),
        })
        .collect();

    format!("{} {}", instr.mnemonic(), params.join(", "))
}

/// Format one parameter word in the given mode
pub fn format_operand(mode: Mode, raw: Value) -> String {
    match mode {
        Mode::Positional => format!("[{raw}]"),
        Mode::Immediate => raw.to_string(),
        Mode::Relative if raw == 0 => "[rb]".to_string(),
        Mode::Relative if raw < 0 => format!("[rb{raw}]"),
        Mode::Relative => format!("[rb+{raw}]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intcode_spec::Opcode;

    #[test]
    fn test_format_operand() {
        assert_eq!(format_operand(Mode::Positional, 12), "[12]");
        assert_eq!(format_operand(Mode::Immediate, -4), "-4");
        assert_eq!(format_operand(Mode::Relative, 0), "[rb]");
        assert_eq!(format_operand(Mode::Relative, 5), "[rb+5]");
        assert_eq!(format_operand(Mode::Relative, -5), "[rb-5]");
    }

    #[test]
    fn test_format_halt() {
        assert_eq!(format(&Instruction::new(Opcode::Halt), &[]), "halt");
    }

    #[test]
    fn test_format_io() {
        let input = Instruction::with_modes(
            Opcode::Input,
            [Mode::Relative, Mode::Positional, Mode::Positional],
        );
        assert_eq!(format(&input, &[1]), "in [rb+1]");

        let output = Instruction::with_modes(
            Opcode::Output,
            [Mode::Immediate, Mode::Positional, Mode::Positional],
        );
        assert_eq!(format(&output, &[7]), "out 7");
    }

    #[test]
    fn test_format_jumps() {
        let instr = Instruction::with_modes(
            Opcode::JumpIfFalse,
            [Mode::Positional, Mode::Immediate, Mode::Positional],
        );
        assert_eq!(format(&instr, &[101, 0]), "jz [101], 0");
    }

    #[test]
    fn test_format_missing_operands() {
        assert_eq!(format(&Instruction::new(Opcode::Add), &[1]), "add [1], ?, ?");
    }
}
