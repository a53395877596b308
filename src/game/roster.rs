use serde::{Deserialize, Serialize};

/// Active players in display order.
///
/// Duplicate names are kept as separate slots; they share one ledger entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<String>);

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replace the roster with the trimmed, non-blank names in the given order.
    pub fn set_players<I, S>(&mut self, raw_names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.0 = raw_names
            .into_iter()
            .filter_map(|name| {
                let trimmed = name.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();
    }
}
