use std::io::BufRead;

use super::client::validate_barcode;
use super::error::ScanError;

/// Something that can produce a scanned barcode.
pub trait BarcodeScanner {
    fn scan(&mut self) -> Result<String, ScanError>;
}

/// Reads one barcode per line, e.g. from a USB scanner acting as a
/// keyboard or from stdin.
///
/// End of input or a blank line counts as a cancelled scan.
pub struct ReaderScanner<R> {
    reader: R,
}

impl<R: BufRead> ReaderScanner<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> BarcodeScanner for ReaderScanner<R> {
    fn scan(&mut self) -> Result<String, ScanError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ScanError::Cancelled);
        }

        let code = line.trim();
        if code.is_empty() {
            return Err(ScanError::Cancelled);
        }
        validate_barcode(code)
            .map(str::to_string)
            .map_err(|_| ScanError::Invalid(code.to_string()))
    }
}
