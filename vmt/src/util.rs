use crate::error::Error;
use std::path::Path;

/// `.vm` files directly under `dir`, sorted by path.
pub fn list_vm_files(dir: &str) -> Result<Vec<String>, Error> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::FileOpen(dir.to_string(), e))?;
    let mut files = vec![];
    for entry in entries {
        let path = entry.map_err(|e| Error::FileOpen(dir.to_string(), e))?.path();
        if path.extension().is_some_and(|ext| ext == "vm") {
            files.push(path.to_string_lossy().to_string());
        }
    }
    if files.is_empty() {
        return Err(Error::NoInput(dir.to_string()));
    }
    files.sort();
    Ok(files)
}

/// Default output: `<dir>/<dirname>.asm` for a directory, `<stem>.asm` for a file.
pub fn output_path(input: &str, is_dir: bool) -> Result<String, Error> {
    let path = Path::new(input);
    if !is_dir {
        return Ok(path.with_extension("asm").to_string_lossy().to_string());
    }
    let full = std::fs::canonicalize(path).map_err(|e| Error::FileOpen(input.to_string(), e))?;
    let name = full
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "out".to_string());
    Ok(path.join(format!("{}.asm", name)).to_string_lossy().to_string())
}
