use arch::inst::Inst;
use hkasm::{Assembler, Error};
use proptest::prelude::*;

fn assert(code: &str, expects: &[&str]) {
    let lines: Vec<&str> = code.lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        println!("{:>2}: {}", idx, line);
    }
    let out = Assembler::new().assemble(&lines).unwrap();
    for (idx, word) in out.iter().enumerate() {
        let inst = Inst::from_bin(u16::from_str_radix(word, 2).unwrap()).unwrap();
        println!("{:>2}: {} {}", idx, word, inst);
    }
    assert_eq!(out.len(), expects.len());
    for (idx, expect) in expects.iter().enumerate() {
        let word = u16::from_str_radix(&out[idx], 2).unwrap();
        assert_eq!(Inst::from_bin(word).unwrap().to_string(), *expect);
    }
}

macro_rules! case {
    ($name:ident, $code:expr, [$($expect:expr),* $(,)?]) => {
        #[test]
        fn $name() {
            assert($code, &[$($expect),*]);
        }
    };
}

case!(
    add_constants,
    "@2\nD=A\n@3\nD=D+A\n@0\nM=D",
    ["@2", "D=A", "@3", "D=D+A", "@0", "M=D"]
);

case!(
    predefined_symbols,
    "@SP\n@LCL\n@ARG\n@THIS\n@THAT\n@R13\n@SCREEN\n@KBD",
    ["@0", "@1", "@2", "@3", "@4", "@13", "@16384", "@24576"]
);

case!(
    comments_and_blank_lines,
    "// header\n\n   @7   // seven\n\tD=A\n// trailer",
    ["@7", "D=A"]
);

case!(
    variables_and_labels,
    "@i\nM=1\n(LOOP)\n@i\nD=M\n@sum\nM=D+M\n@LOOP\n0;JMP",
    ["@16", "M=1", "@16", "D=M", "@17", "M=D+M", "@2", "0;JMP"]
);

#[test]
fn scenario_word_two_is_d_plus_a() {
    let out = Assembler::new()
        .assemble_words(&["@2", "D=A", "@3", "D=D+A", "@0", "M=D"])
        .unwrap();
    assert_eq!(out.len(), 6);
    match Inst::from_bin(out[3]) {
        Some(Inst::C(dest, comp, None)) => {
            assert_eq!(dest.to_string(), "D");
            assert_eq!(comp.to_string(), "D+A");
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn reassembling_is_idempotent() {
    let source = [
        "@R0", "D=M", "@n", "M=D", "(LOOP)", "@n", "MD=M-1", "@END", "D;JLT", "@acc", "M=M+1",
        "@LOOP", "0;JMP", "(END)", "@END", "0;JMP",
    ];
    let mut asm = Assembler::new();
    let first = asm.assemble(&source).unwrap();
    let second = asm.assemble(&source).unwrap();
    let fresh = Assembler::new().assemble(&source).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, fresh);
}

#[test]
fn malformed_instruction_aborts() {
    let source = ["@1", "D=A", "AM=M<<1", "@2"];
    match Assembler::new().assemble(&source) {
        Err(Error::Line(3, inner)) => assert!(matches!(*inner, Error::UnknownComp(_))),
        other => panic!("unexpected: {:?}", other),
    }
}

proptest! {
    #[test]
    fn nth_variable_gets_16_plus_n(count in 1usize..40, repeats in 1usize..4) {
        let names: Vec<String> = (0..count).map(|n| format!("var{}", n)).collect();
        let mut source = vec![];
        for _ in 0..repeats {
            for name in &names {
                source.push(format!("@{}", name));
                source.push("M=0".to_string());
            }
        }
        let mut asm = Assembler::new();
        asm.assemble(&source).unwrap();
        for (n, name) in names.iter().enumerate() {
            prop_assert_eq!(asm.symbols().get_address(name), Some(16 + n as u16));
        }
    }

    #[test]
    fn labels_follow_instruction_count(before in 0usize..50, labels in 1usize..5) {
        let mut source: Vec<String> = (0..before).map(|_| "D=D+1".to_string()).collect();
        for n in 0..labels {
            source.push(format!("(L{})", n));
        }
        source.push("@L0".to_string());
        let mut asm = Assembler::new();
        let out = asm.assemble(&source).unwrap();
        prop_assert_eq!(out.len(), before + 1);
        for n in 0..labels {
            prop_assert_eq!(asm.symbols().get_address(&format!("L{}", n)), Some(before as u16));
        }
    }
}
