//! Integration tests for the Intcode assembler
//!
//! Tests the complete assembly workflow including:
//! - Operand modes and their encoding
//! - Label resolution
//! - `.word` data

use intcode_assembler::{assemble, parse, AssemblerError, Body};
use intcode_spec::{decode, Mode, Opcode};

// ============================================================================
// Basic Assembly Tests
// ============================================================================

#[test]
fn test_assemble_empty_program() {
    let program = assemble("").unwrap();
    assert!(program.is_empty());
}

#[test]
fn test_assemble_comments_only() {
    let source = r#"
        # This is a comment
        ; Another comment
    "#;
    assert!(assemble(source).unwrap().is_empty());
}

#[test]
fn test_assemble_every_mnemonic() {
    let source = r#"
        add [1], [2], [3]
        mul [1], [2], [3]
        in [0]
        out [0]
        jnz [0], [0]
        jz [0], [0]
        lt [0], [0], [0]
        eq [0], [0], [0]
        arb [0]
        halt
    "#;
    let program = assemble(source).unwrap();

    let mut opcodes = Vec::new();
    let mut pc = 0;
    while pc < program.len() {
        let instr = decode(program.words()[pc]).unwrap();
        opcodes.push(instr.opcode);
        pc += instr.width();
    }
    assert_eq!(opcodes, Opcode::ALL.to_vec());
}

#[test]
fn test_mnemonics_are_case_insensitive() {
    let lower = assemble("out 1\nhalt").unwrap();
    let upper = assemble("OUT 1\nHALT").unwrap();
    assert_eq!(lower, upper);
}

// ============================================================================
// Operand Mode Tests
// ============================================================================

#[test]
fn test_assemble_mode_digits() {
    let program = assemble("add [9], 10, [rb-3]").unwrap();
    assert_eq!(program.words(), &[21001, 9, 10, -3]);

    let instr = decode(program.words()[0]).unwrap();
    assert_eq!(
        instr.modes,
        [Mode::Positional, Mode::Immediate, Mode::Relative]
    );
}

#[test]
fn test_assemble_relative_offsets() {
    let program = assemble("out [rb]\nout [rb+4]\nout [rb-4]\nout [rb - 4]").unwrap();
    assert_eq!(program.words(), &[204, 0, 204, 4, 204, -4, 204, -4]);
}

#[test]
fn test_assemble_day2_program() {
    let source = r#"
        add [9], [10], [3]
        mul [3], [11], [0]
        halt
        .word 30, 40, 50
    "#;
    let program = assemble(source).unwrap();
    assert_eq!(program.words(), &[1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]);
}

// ============================================================================
// Label Tests
// ============================================================================

#[test]
fn test_labels_resolve_in_every_position() {
    let source = r#"
        start:  in [value]
                eq [value], 8, [value]
                out [value]
                jz 0, start
        value:  .word 0, start, value
    "#;
    let program = assemble(source).unwrap();
    assert_eq!(
        program.words(),
        &[3, 11, 1008, 11, 8, 11, 4, 11, 1106, 0, 0, 0, 0, 11]
    );
}

#[test]
fn test_label_on_own_line_binds_next_statement() {
    let source = r#"
        jnz 1, target
        halt
        target:

        out 5
    "#;
    let program = assemble(source).unwrap();
    assert_eq!(program.words(), &[1105, 1, 4, 99, 104, 5]);
}

#[test]
fn test_multiple_labels_same_address() {
    let program = assemble("a: b: .word a, b\n").unwrap();
    assert_eq!(program.words(), &[0, 0]);
}

#[test]
fn test_label_as_relative_offset() {
    let program = assemble("arb 1\nout [rb+data]\nhalt\ndata: .word 9").unwrap();
    assert_eq!(program.words(), &[109, 1, 204, 5, 99, 9]);
}

#[test]
fn test_undefined_label() {
    assert_eq!(
        assemble("jnz 1, nowhere"),
        Err(AssemblerError::UndefinedLabel("nowhere".to_string()))
    );
}

// ============================================================================
// Parser Output Tests
// ============================================================================

#[test]
fn test_parse_keeps_line_numbers() {
    let statements = parse("\n\nhalt\n\n.word 1").unwrap();
    let lines: Vec<usize> = statements.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![3, 5]);
    assert!(matches!(statements[1].body, Some(Body::Words(_))));
}
