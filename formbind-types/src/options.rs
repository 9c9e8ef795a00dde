/// Ordered mapping of option key to display label for `Select` and `Radio` fields.
///
/// The key is what the field stores and what ends up in the extracted
/// values; the label is only shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: Vec<(String, String)>,
}

impl Options {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an option. A key that already exists keeps its position and
    /// gets the new label.
    pub fn with(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        let key = key.into();
        let label = label.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((key, label)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, l)| (k.as_str(), l.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Display label for a key.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, l)| l.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Index of a key in display order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Key at a display index.
    pub fn key_at(&self, idx: usize) -> Option<&str> {
        self.entries.get(idx).map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, L: Into<String>, const N: usize> From<[(K, L); N]> for Options {
    fn from(entries: [(K, L); N]) -> Self {
        entries
            .into_iter()
            .fold(Options::new(), |options, (k, l)| options.with(k, l))
    }
}

impl<K: Into<String>, L: Into<String>> FromIterator<(K, L)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, L)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Options::new(), |options, (k, l)| options.with(k, l))
    }
}
