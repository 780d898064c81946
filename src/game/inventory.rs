use std::collections::HashSet;

use crate::data::items::is_important;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acquisition {
    Duplicate,
    Added { first_important: bool },
}

/// Unique item names in pickup order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    items: Vec<String>,
    rewarded: HashSet<String>,
}

impl Inventory {
    /// Starting items never pay the important-item bonus.
    pub fn with_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inventory = Self::default();
        for item in items {
            let item = item.into();
            if !inventory.contains(&item) {
                inventory.rewarded.insert(item.clone());
                inventory.items.push(item);
            }
        }
        inventory
    }

    pub fn add(&mut self, item: &str) -> Acquisition {
        if self.contains(item) {
            return Acquisition::Duplicate;
        }
        self.items.push(item.to_string());
        let first_important = is_important(item) && self.rewarded.insert(item.to_string());
        Acquisition::Added { first_important }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|held| held == item)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.items.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut inventory = Inventory::default();
        assert_eq!(
            inventory.add("Old Lantern"),
            Acquisition::Added {
                first_important: true
            }
        );
        assert_eq!(inventory.add("Old Lantern"), Acquisition::Duplicate);
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_starting_items_are_not_rewarded() {
        let mut inventory = Inventory::with_items(["Lighthouse Key", "Old Journal", "Lighthouse Key"]);
        assert_eq!(inventory.items(), &["Lighthouse Key", "Old Journal"]);
        assert_eq!(inventory.add("Lighthouse Key"), Acquisition::Duplicate);
        assert_eq!(
            inventory.add("Cursed Tome"),
            Acquisition::Added {
                first_important: true
            }
        );
        assert_eq!(inventory.get(2), Some("Cursed Tome"));
    }

    #[test]
    fn test_ordinary_items_pay_nothing() {
        let mut inventory = Inventory::default();
        assert_eq!(
            inventory.add("Broken Compass"),
            Acquisition::Added {
                first_important: false
            }
        );
    }
}
