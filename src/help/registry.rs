use std::collections::{BTreeMap, BTreeSet};

pub const GLOBAL_ARGUMENTS: &str = "Global Arguments";
pub const POSITIONAL_ARGUMENTS: &str = "Positional";

const UNGROUPED_PRIORITY: u32 = 0;
const GLOBAL_PRIORITY: u32 = 1000;
const FIRST_NAMED_PRIORITY: u32 = 2;

/// Orders argument groups: ungrouped arguments first, then named groups
/// alphabetically, then global arguments.
pub struct ArgumentGroupRegistry {
    priorities: BTreeMap<String, u32>,
}

impl ArgumentGroupRegistry {
    pub fn new<'a>(groups: impl IntoIterator<Item = &'a str>) -> Self {
        let mut priorities = BTreeMap::new();
        priorities.insert(GLOBAL_ARGUMENTS.to_string(), GLOBAL_PRIORITY);
        let others: BTreeSet<&str> = groups
            .into_iter()
            .filter(|group| *group != GLOBAL_ARGUMENTS)
            .collect();
        for (offset, group) in others.into_iter().enumerate() {
            priorities.insert(group.to_string(), FIRST_NAMED_PRIORITY + offset as u32);
        }
        Self { priorities }
    }

    pub fn priority(&self, group: Option<&str>) -> u32 {
        group
            .and_then(|name| self.priorities.get(name).copied())
            .unwrap_or(UNGROUPED_PRIORITY)
    }

    /// Zero padded priority, comparable as text.
    pub fn group_priority(&self, group: Option<&str>) -> String {
        format!("{:06}", self.priority(group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_groups_sort_alphabetically_between_ungrouped_and_global() {
        let registry = ArgumentGroupRegistry::new([
            "Resource Id Arguments",
            "Z Arguments",
            "B Arguments",
            "Global Arguments",
            "A Arguments",
            "Resource Id Arguments",
        ]);
        assert_eq!(registry.group_priority(None), "000000");
        assert_eq!(registry.group_priority(Some("A Arguments")), "000002");
        assert_eq!(registry.group_priority(Some("B Arguments")), "000003");
        assert_eq!(registry.group_priority(Some("Resource Id Arguments")), "000004");
        assert_eq!(registry.group_priority(Some("Z Arguments")), "000005");
        assert_eq!(registry.group_priority(Some("Global Arguments")), "001000");
    }

    #[test]
    fn unknown_group_is_treated_as_ungrouped() {
        let registry = ArgumentGroupRegistry::new(["A Arguments"]);
        assert_eq!(registry.priority(Some("Missing")), 0);
    }
}
