use hkemu::State;

fn run(code: &str, ram: &[(u16, u16)]) -> State {
    let lines: Vec<&str> = code.lines().collect();
    let words = hkasm::Assembler::new().assemble_words(&lines).unwrap();
    let mut state = State::new();
    state.load_rom(&words).unwrap();
    for (addr, val) in ram {
        state.set(*addr, *val);
    }
    state.run(100_000).unwrap();
    assert!(state.is_terminated());
    state
}

macro_rules! case {
    ($name:ident, $code:expr, [$(($addr:expr, $val:expr)),*] => [$(($out:expr, $expect:expr)),* $(,)?]) => {
        #[test]
        fn $name() {
            let state = run($code, &[$(($addr, $val)),*]);
            $(
                assert_eq!(state.get($out as u16), $expect as u16, "RAM[{}]", $out);
            )*
        }
    };
}

case!(
    add,
    "@2\nD=A\n@3\nD=D+A\n@0\nM=D",
    [] => [(0, 5)]
);

case!(
    max_first,
    "@R0\nD=M\n@R1\nD=D-M\n@FIRST\nD;JGT\n@R1\nD=M\n@R2\nM=D\n@END\n0;JMP\n(FIRST)\n@R0\nD=M\n@R2\nM=D\n(END)\n@END\n0;JMP",
    [(0, 9), (1, 4)] => [(2, 9)]
);

case!(
    max_second,
    "@R0\nD=M\n@R1\nD=D-M\n@FIRST\nD;JGT\n@R1\nD=M\n@R2\nM=D\n@END\n0;JMP\n(FIRST)\n@R0\nD=M\n@R2\nM=D\n(END)\n@END\n0;JMP",
    [(0, 3), (1, 8)] => [(2, 8)]
);

case!(
    sum_loop,
    "@i\nM=1\n@sum\nM=0\n(LOOP)\n@i\nD=M\n@R0\nD=D-M\n@STOP\nD;JGT\n@i\nD=M\n@sum\nM=D+M\n@i\nM=M+1\n@LOOP\n0;JMP\n(STOP)\n@sum\nD=M\n@R1\nM=D\n(END)\n@END\n0;JMP",
    [(0, 10)] => [(1, 55), (16, 11), (17, 55)]
);

case!(
    negative_multiply,
    "@R2\nM=0\n(LOOP)\n@R1\nD=M\n@END\nD;JEQ\n@R0\nD=M\n@R2\nM=D+M\n@R1\nM=M-1\n@LOOP\n0;JMP\n(END)\n@END\n0;JMP",
    [(0, -3i16 as u16), (1, 4)] => [(2, -12i16)]
);

#[test]
fn ram_nonzero_is_ordered() {
    let state = run("@5\nD=A\n@300\nM=D\n@20\nM=-1", &[]);
    let cells: Vec<(u16, u16)> = state.ram_nonzero().collect();
    assert_eq!(cells, [(20, 0xFFFF), (300, 5)]);
}
