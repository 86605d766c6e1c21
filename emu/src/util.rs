use std::path::Path;

use crate::{error::Error, model::parse_image};

/// ROM words from a file: `.asm` sources are assembled, anything else is a binary image.
pub fn load_image(fname: &str) -> Result<Vec<u16>, Error> {
    let text = std::fs::read_to_string(fname).map_err(|e| Error::FileOpen(fname.to_string(), e))?;
    match Path::new(fname).extension().is_some_and(|ext| ext == "asm") {
        true => {
            let lines: Vec<&str> = text.lines().collect();
            hkasm::Assembler::new()
                .assemble_words(&lines)
                .map_err(|e| Error::Assemble(fname.to_string(), e))
        }
        false => parse_image(&text),
    }
}

/// `ADDR=VALUE` for `--set`. Values may be signed.
pub fn parse_set(s: &str) -> Result<(u16, u16), String> {
    let (addr, val) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDR=VALUE: `{}`", s))?;
    let addr = addr
        .trim()
        .parse::<u16>()
        .map_err(|e| format!("address `{}`: {}", addr, e))?;
    let val = val.trim();
    let val = match val.parse::<u16>() {
        Ok(val) => val,
        Err(_) => val
            .parse::<i16>()
            .map(|v| v as u16)
            .map_err(|e| format!("value `{}`: {}", val, e))?,
    };
    Ok((addr, val))
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_parse_set {
        ($($name:ident: $text:expr => $expect:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(parse_set($text), $expect);
                }
            )*
        }
    }

    test_parse_set! {
        test_set_sp: "0=256" => Ok((0, 256)),
        test_set_negative: "5=-1" => Ok((5, 0xFFFF)),
        test_set_min: "7=-32768" => Ok((7, 0x8000)),
        test_set_max: "8=65535" => Ok((8, 0xFFFF)),
        test_set_spaces: " 3 = 12 " => Ok((3, 12)),
    }

    #[test]
    fn parse_set_rejects() {
        for text in ["256", "x=1", "1=y", "70000=1", "1=70000", "1=-40000"] {
            assert!(parse_set(text).is_err(), "{}", text);
        }
    }

    fn scratch(name: &str, text: &str) -> String {
        let path = std::env::temp_dir().join(format!("hkemu-{}-{}", std::process::id(), name));
        std::fs::write(&path, text).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn load_asm_source() {
        let path = scratch("add.asm", "@2\nD=A\n@3\nD=D+A\n@0\nM=D\n");
        let words = load_image(&path).unwrap();
        assert_eq!(words.len(), 6);
        assert_eq!(words[0], 2);
        assert_eq!(words[1], 0b1110_1100_0001_0000);
    }

    #[test]
    fn load_binary_image() {
        let path = scratch("add.hack", "0000000000000010\n1110110000010000\n");
        assert_eq!(load_image(&path).unwrap(), [2, 0b1110_1100_0001_0000]);
    }

    #[test]
    fn load_bad_asm_source() {
        let path = scratch("bad.asm", "@1\nD=Q\n");
        assert!(matches!(load_image(&path), Err(Error::Assemble(..))));
    }
}
