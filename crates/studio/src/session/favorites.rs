//! Favorite prompts for one session.

use serde::Serialize;

/// A set of prompts compared by string equality.
///
/// Insertion order is kept so front ends can list favorites in the order
/// they were added. A prompt is never stored twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Favorites(Vec<String>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, prompt: &str) -> bool {
        self.0.iter().any(|p| p == prompt)
    }

    /// Flip membership of `prompt`. Returns `true` if it is now a favorite.
    pub fn toggle(&mut self, prompt: &str) -> bool {
        if self.remove(prompt) {
            false
        } else {
            self.0.push(prompt.to_string());
            true
        }
    }

    /// Remove `prompt`. Returns `true` if it was present.
    pub fn remove(&mut self, prompt: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|p| p != prompt);
        self.0.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut favs = Favorites::new();
        assert!(favs.toggle("Work with absence"));
        assert!(favs.contains("Work with absence"));
        assert!(!favs.toggle("Work with absence"));
        assert!(favs.is_empty());
    }

    #[test]
    fn never_holds_duplicates_under_mixed_toggles() {
        let mut favs = Favorites::new();
        let sequence = ["a", "b", "a", "a", "c", "b", "b", "a", "c", "c", "c"];
        for p in sequence {
            favs.toggle(p);
            let items: Vec<&str> = favs.iter().collect();
            for (i, x) in items.iter().enumerate() {
                assert!(!items[i + 1..].contains(x), "duplicate {x}");
            }
        }
        // a: 4 toggles, b: 3, c: 4
        assert_eq!(favs.iter().collect::<Vec<_>>(), ["b"]);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut favs = Favorites::new();
        favs.toggle("z");
        favs.toggle("a");
        favs.toggle("m");
        assert_eq!(favs.iter().collect::<Vec<_>>(), ["z", "a", "m"]);
    }

    #[test]
    fn serializes_as_list() {
        let mut favs = Favorites::new();
        favs.toggle("x");
        assert_eq!(serde_json::to_string(&favs).unwrap(), r#"["x"]"#);
    }
}
