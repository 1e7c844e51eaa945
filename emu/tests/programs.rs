use s8emu::{Error, Fault, State};

fn run(source: &str, input: &[u8], max_ticks: u64) -> Result<State, Error> {
    let program = s8asm::assemble(source).unwrap();
    s8emu::run(&program.image, input, max_ticks)
}

fn case(source: &str, input: &[u8], max_ticks: u64, expect: Result<&[u8], Fault>) {
    println!("{source}");
    match (run(source, input, max_ticks), expect) {
        (Ok(state), Ok(output)) => assert_eq!(state.output, output),
        (Err(err), Err(fault)) => assert_eq!(err, Error::Fault(fault)),
        (got, want) => panic!("got {:?}, want {:?}", got.map(|s| s.output), want),
    }
}

macro_rules! case {
    ($name:ident, $source:expr, $input:expr, $ticks:expr, $expect:expr) => {
        #[test]
        fn $name() {
            case($source, $input, $ticks, $expect);
        }
    };
}

/// `n` calls, each into the next instruction, then STOPP.
fn nested_calls(n: usize) -> String {
    let mut source: String = (0..n).map(|i| format!("TUR {}\n", 2 * (i + 1))).collect();
    source += "STOPP\n";
    source
}

case!(write_five, "SETT r0, 5\nSKRIV r0\nSTOPP", b"", 1000, Ok(&[5]));
case!(empty, "", b"", 1000, Ok(&[]));
case!(
    echo,
    "LES r0\nLES r1\nSKRIV r1\nSKRIV r0\nSTOPP",
    b"ab",
    1000,
    Ok(b"ba")
);
case!(
    read_past_input,
    "LES r0\nLES r1\nSTOPP",
    b"a",
    1000,
    Err(Fault::ReadAfterEndOfInput { pc: 2 })
);
case!(
    forward_label,
    "HOPP skip\nSETT r0, 1\nSKRIV r0\nskip:\nSETT r0, 2\nSKRIV r0\nSTOPP",
    b"",
    1000,
    Ok(&[2])
);
case!(
    count_down,
    "
    SETT r2, 3
    SETT r3, 1
    SETT r4, 0
loop:
    SKRIV r2
    MINUS r2, r3
    ULIK r2, r4
    BHOPP loop
    STOPP
    ",
    b"",
    1000,
    Ok(&[3, 2, 1])
);
case!(
    subroutine,
    "
    SETT r2, 7
    TUR double
    SKRIV r2
    STOPP
double:
    PLUSS r2, r2
    RETUR
    ",
    b"",
    1000,
    Ok(&[14])
);
case!(
    data_table,
    "
    FINN table
    LAST r2
    SKRIV r2
    SETT r3, 1
    PLUSS r0, r3
    LAST r2
    SKRIV r2
    STOPP
table:
    .DATA 0x41, 0x42
    ",
    b"",
    1000,
    Ok(b"AB")
);
case!(
    copy_register,
    "SETT r7, 0x2A\nSETT r2, r7\nSKRIV r2\nSKRIV r7\nSTOPP",
    b"",
    1000,
    Ok(&[0x2A, 0x2A])
);
case!(
    return_without_call,
    "RETUR",
    b"",
    1000,
    Err(Fault::NoReturnAddress { pc: 0 })
);
case!(
    spin_forever,
    "loop:\nHOPP loop",
    b"",
    1000,
    Err(Fault::ResourcesExhausted { max_ticks: 1000 })
);

#[test]
fn tick_budget() {
    // three NOPE and the halt read from zeroed memory
    let source = "NOPE\nNOPE\nNOPE";
    assert_eq!(run(source, b"", 4).unwrap().tick, 4);
    assert_eq!(
        run(source, b"", 3),
        Err(Error::Fault(Fault::ResourcesExhausted { max_ticks: 3 }))
    );
}

#[test]
fn recursion_limit() {
    let state = run(&nested_calls(1000), b"", 5000).unwrap();
    assert_eq!(state.backtrace.len(), 1000);

    assert_eq!(
        run(&nested_calls(1001), b"", 5000),
        Err(Error::Fault(Fault::RecursionLimit { limit: 1000 }))
    );
}

#[test]
fn snapshots() {
    let program = s8asm::assemble("SETT r0, 5\nSKRIV r0\nSTOPP").unwrap();
    let steps: Vec<_> = s8emu::step(&program.image, b"", 1000)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    let seen: Vec<_> = steps
        .iter()
        .map(|step| (step.state.pc, step.state.output.clone(), step.done))
        .collect();
    assert_eq!(
        seen,
        vec![
            (0, vec![], false),
            (2, vec![], false),
            (4, vec![5], false),
            (6, vec![5], true),
        ]
    );
}

#[test]
fn bad_image() {
    assert_eq!(
        s8emu::run(b"\x0c\x00", b"", 1000),
        Err(Error::Load(s8emu::LoadError::UnsupportedExecutable))
    );
}
