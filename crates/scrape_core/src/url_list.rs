use serde::{Deserialize, Serialize};

/// Ordered, editable URL input slots. Purely structural: no trimming,
/// dedupe or format checks happen here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlList {
    slots: Vec<String>,
}

impl Default for UrlList {
    fn default() -> Self {
        Self {
            slots: vec![String::new()],
        }
    }
}

impl UrlList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slots(slots: Vec<String>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Slots as displayed: an empty list still shows one blank slot.
    pub fn visible_slots(&self) -> Vec<String> {
        if self.slots.is_empty() {
            vec![String::new()]
        } else {
            self.slots.clone()
        }
    }

    pub fn append_slot(&mut self) {
        self.slots.push(String::new());
    }

    /// Returns false when `index` is out of range. Editing the placeholder
    /// slot of an empty list materializes it.
    pub fn update_slot(&mut self, index: usize, value: impl Into<String>) -> bool {
        if self.slots.is_empty() && index == 0 {
            self.slots.push(value.into());
            return true;
        }
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Returns false when `index` is out of range. Removing the last slot
    /// leaves the list empty.
    pub fn remove_slot(&mut self, index: usize) -> bool {
        if index < self.slots.len() {
            self.slots.remove(index);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UrlList;

    #[test]
    fn starts_with_one_blank_slot() {
        let list = UrlList::new();
        assert_eq!(list.slots(), [String::new()]);
    }

    #[test]
    fn append_update_remove_keep_order() {
        let mut list = UrlList::new();
        assert!(list.update_slot(0, "https://a.test"));
        list.append_slot();
        assert!(list.update_slot(1, "https://b.test"));
        list.append_slot();
        assert!(list.update_slot(2, "https://a.test"));

        assert!(list.remove_slot(1));
        assert_eq!(list.slots(), ["https://a.test", "https://a.test"]);
    }

    #[test]
    fn removing_last_slot_leaves_empty_list_with_visible_placeholder() {
        let mut list = UrlList::new();
        assert!(list.remove_slot(0));
        assert!(list.slots().is_empty());
        assert_eq!(list.visible_slots(), vec![String::new()]);

        assert!(list.update_slot(0, "https://a.test"));
        assert_eq!(list.slots(), ["https://a.test"]);
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut list = UrlList::new();
        assert!(!list.update_slot(3, "x"));
        assert!(!list.remove_slot(3));
        assert_eq!(list, UrlList::new());
    }
}
