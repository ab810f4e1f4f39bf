//! Main disassembler logic

use crate::formatter::format;
use intcode_spec::encoding::is_canonical;
use intcode_spec::{decode, Instruction, Value};

/// Column where the address comment starts
const COMMENT_COLUMN: usize = 28;

/// Disassemble a program into assembly text
pub fn disassemble(words: &[Value]) -> String {
    let mut output = String::new();

    output.push_str("; Intcode disassembly\n");
    output.push_str(&format!("; {} words\n", words.len()));
    output.push('\n');

    let mut addr = 0;
    while addr < words.len() {
        let width = match instruction_at(words, addr) {
            Some(instr) => {
                let end = addr + instr.width();
                let text = format(&instr, &words[addr + 1..end]);
                push_line(&mut output, &text, addr, &words[addr..end]);
                instr.width()
            }
            None => {
                let text = format!(".word {}", words[addr]);
                push_line(&mut output, &text, addr, &words[addr..addr + 1]);
                1
            }
        };
        addr += width;
    }

    output
}

/// Decode `words[addr]` if it can be shown as an instruction.
///
/// Immediate destinations execute but have no assembler syntax, so such
/// words stay data.
fn instruction_at(words: &[Value], addr: usize) -> Option<Instruction> {
    let raw = words[addr];
    if !is_canonical(raw) {
        return None;
    }
    let instr = decode(raw).ok()?;
    if instr.has_immediate_destination() {
        return None;
    }
    (addr + instr.width() <= words.len()).then_some(instr)
}

fn push_line(output: &mut String, text: &str, addr: usize, raw: &[Value]) {
    let raw: Vec<String> = raw.iter().map(Value::to_string).collect();
    output.push_str(&format!(
        "    {:<width$}; {:04}: {}\n",
        text,
        addr,
        raw.join(","),
        width = COMMENT_COLUMN
    ));
}
