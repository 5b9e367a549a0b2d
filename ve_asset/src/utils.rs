use anyhow::{anyhow, Result};
use std::{
    ffi::OsStr,
    fs,
    io::{self, BufRead},
    path::{Path, PathBuf},
};

pub fn file_name(path: &Path) -> Result<&str> {
    path.file_stem()
        .ok_or_else(|| anyhow!("No file stem found"))?
        .to_str()
        .ok_or_else(|| anyhow!("Can't convert file stem to string"))
}

pub fn combine_path(directory: &Path, file_name: &str, extension: &str) -> Result<PathBuf> {
    Ok(directory.join(format!("{}.{}", file_name, extension)))
}

/// Case-insensitive check of the file extension.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map_or(false, |ext| ext.eq_ignore_ascii_case(extension))
}

/// Resolves `file` relative to the directory `path` lives in.
pub fn sibling_path(path: &Path, file: &str) -> PathBuf {
    match path.parent() {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}

/// Lines of a text file that may contain bytes outside of UTF-8.
/// Invalid sequences are replaced with `U+FFFD`, line endings are stripped.
pub struct LossyLines<B> {
    reader: B,
    buf: Vec<u8>,
}

impl<B: BufRead> LossyLines<B> {
    pub fn new(reader: B) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<B: BufRead> Iterator for LossyLines<B> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                    if self.buf.ends_with(b"\r") {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

// The output is wrapped in a Result to allow matching on errors
// Returns an Iterator to the Reader of the lines of the file.
pub fn read_lines<P>(filename: P) -> io::Result<LossyLines<io::BufReader<fs::File>>>
where
    P: AsRef<Path>,
{
    let file = fs::File::open(filename)?;
    Ok(LossyLines::new(io::BufReader::new(file)))
}
