use crate::InferError;
use std::path::Path;

/// Ordered class names; index `i` names model output `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Parses one label per line, in file order.
    ///
    /// Surrounding whitespace is trimmed and trailing blank lines are ignored. A blank line
    /// between labels would shift every later index, so it is rejected.
    pub fn parse(text: &str) -> Result<Self, InferError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines: Vec<&str> = text.lines().map(str::trim).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        if lines.is_empty() {
            return Err(InferError::Labels("no labels found".to_string()));
        }
        if let Some(blank) = lines.iter().position(|line| line.is_empty()) {
            return Err(InferError::Labels(format!("line {} is blank", blank + 1)));
        }

        Ok(Self {
            labels: lines.into_iter().map(str::to_string).collect(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| InferError::Io(format!("{}: {}", path.display(), e)))?;
        let labels = Self::parse(&text).map_err(|e| match e {
            InferError::Labels(msg) => InferError::Labels(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        log::info!("loaded {} labels from {}", labels.len(), path.display());
        Ok(labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
