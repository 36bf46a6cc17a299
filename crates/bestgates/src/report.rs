//! Plain-text report, laid out as the gate tables have always been printed.
//!
//! ```text
//! basis #  4:
//!    A2X: 98F3F2480981A9FF   S2X: 8C7905EB12045153
//!  ncols =  8, gates = 42
//!   A2Xb: 0000000000012804100810224008808001
//!   S2Xb: 0028006200000100008800000102044010
//!  [0,2],  [0,3],  ...
//!  ncols = 17, gates = 20
//! ```

use std::io::{self, Write};

use xorshare_basis::MatrixPair;
use xorshare_gates::CircuitState;

pub(crate) fn write_header(out: &mut impl Write, id: u64) -> io::Result<()> {
    write!(out, "\nbasis #{id:3}:\n")
}

/// Writes the columns, merge history and gate count of `state`.  Optimized
/// states carry a `b` suffix on their tags.
pub(crate) fn write_state(
    out: &mut impl Write,
    pair: &MatrixPair,
    state: &CircuitState,
    optimized: bool,
) -> io::Result<()> {
    let suffix = if optimized { "b" } else { "" };
    let wrap = if state.num_columns() > 8 { "\n" } else { "" };

    for (tag, shift) in [(pair.low_tag, 0), (pair.high_tag, 8)] {
        write!(out, "{:>6}: ", format!("{tag}{suffix}"))?;
        for column in state.columns() {
            write!(out, "{:02X}", (column >> shift) & 0xFF)?;
        }
        write!(out, "{wrap}")?;
    }

    for merge in state.merges() {
        write!(out, " {merge}, ")?;
    }
    write!(
        out,
        "\n ncols = {:2}, gates = {:2}\n",
        state.num_columns(),
        state.gates()
    )
}

pub(crate) fn write_summary(out: &mut impl Write, id: u64, gates: [u32; 2]) -> io::Result<()> {
    let [a, b] = gates;
    writeln!(out, "***bestgates {id:3} = {:5}   ={a:5} +{b:5}", a + b)
}

/// Writes `table` as a C array initializer, sixteen entries per line.
pub(crate) fn write_c_table(out: &mut impl Write, name: &str, table: &[u8; 256]) -> io::Result<()> {
    writeln!(out, "char {name}[256] = {{")?;
    for row in table.chunks(16) {
        for entry in row {
            write!(out, "{entry:3}, ")?;
        }
        writeln!(out)?;
    }
    write!(out, "}};\n\n")
}

#[cfg(test)]
mod tests {
    use xorshare_gates::{GainTable, reconstruct};

    use super::*;

    fn pair() -> MatrixPair {
        MatrixPair::stack(
            "A2X",
            &[0x07, 0x0E, 0x30, 0xE0, 0x10, 0x08, 0x02, 0x01],
            "S2X",
            &[0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01],
        )
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_and_summary() {
        assert_eq!(render(|out| write_header(out, 4)), "\nbasis #  4:\n");
        assert_eq!(render(|out| write_header(out, 1234)), "\nbasis #1234:\n");
        assert_eq!(
            render(|out| write_summary(out, 0, [19, 21])),
            "***bestgates   0 =    40   =   19 +   21\n"
        );
    }

    #[test]
    fn test_baseline_state_fits_one_line() {
        let pair = pair();
        let state = CircuitState::new(&pair.columns);
        assert_eq!(
            render(|out| write_state(out, &pair, &state, false)),
            "   A2X: 070E30E010080201   S2X: 8040201008040201\n ncols =  8, gates =  7\n"
        );
    }

    #[test]
    fn test_optimized_state_wraps() {
        let pair = pair();
        let state = reconstruct(&pair.columns, &[(0, 1)], GainTable::shared()).unwrap();
        assert_eq!(
            render(|out| write_state(out, &pair, &state, true)),
            concat!(
                "  A2Xb: 010830E01008020106\n",
                "  S2Xb: 804020100804020100\n",
                " [0,1], \n",
                " ncols =  9, gates =  6\n",
            )
        );
    }

    #[test]
    fn test_c_table() {
        let table = std::array::from_fn(|x| x as u8);
        let text = render(|out| write_c_table(out, "T", &table));
        assert!(text.starts_with("char T[256] = {\n  0,   1,   2, "));
        assert!(text.contains(" 15, \n 16, "));
        assert!(text.ends_with("255, \n};\n\n"));
        assert_eq!(text.lines().count(), 19);
    }
}
