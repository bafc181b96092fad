use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::VisionError;

/// Class indexes at or past this bound are never looked up.
const MAX_CLASSES: usize = 1000;

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Class descriptions, one per line of the label file.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    lines: Vec<String>,
}

impl Labels {
    pub fn load(path: &Path) -> Result<Self, VisionError> {
        let file = File::open(path).map_err(|e| VisionError::Labels(path.display().to_string(), e))?;
        Self::from_reader(BufReader::new(file))
            .map_err(|e| VisionError::Labels(path.display().to_string(), e))
    }

    pub fn from_reader(reader: impl BufRead) -> std::io::Result<Self> {
        let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self { lines })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Description of class `index`, or [`UNKNOWN_LABEL`].
    pub fn describe(&self, index: usize) -> &str {
        if index >= MAX_CLASSES {
            return UNKNOWN_LABEL;
        }
        self.lines.get(index).map_or(UNKNOWN_LABEL, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reads_one_label_per_line() {
        let labels = Labels::from_reader(Cursor::new("dummy\nkit fox\nEnglish setter\n")).unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.describe(1), "kit fox");
        assert_eq!(labels.describe(2), "English setter");
    }

    #[test]
    fn empty_file_has_no_labels() {
        let labels = Labels::from_reader(Cursor::new("")).unwrap();
        assert!(labels.is_empty());
        assert_eq!(labels.describe(0), UNKNOWN_LABEL);
    }

    #[test]
    fn last_line_without_newline_is_kept() {
        let labels = Labels::from_reader(Cursor::new("a\r\nb")).unwrap();
        assert_eq!(labels.describe(0), "a");
        assert_eq!(labels.describe(1), "b");
    }

    #[test]
    fn out_of_range_index_is_unknown() {
        let labels = Labels::from_reader(Cursor::new("only\n")).unwrap();
        assert_eq!(labels.describe(1), UNKNOWN_LABEL);
        assert_eq!(labels.describe(MAX_CLASSES), UNKNOWN_LABEL);
    }

    #[test]
    fn class_bound_applies_even_with_longer_file() {
        let text: String = (0..1005).map(|i| format!("class {i}\n")).collect();
        let labels = Labels::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(labels.describe(999), "class 999");
        assert_eq!(labels.describe(1001), UNKNOWN_LABEL);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Labels::load(Path::new("/no/such/labels.txt")).unwrap_err();
        assert!(err.to_string().contains("/no/such/labels.txt"));
    }
}
