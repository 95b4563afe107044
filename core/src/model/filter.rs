use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};

use crate::model::task::Task;

/// Which subset of the list is on screen. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Tab order.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Filter::All => 0,
            Filter::Active => 1,
            Filter::Completed => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            Filter::All => "No tasks yet. Add one above!",
            Filter::Active => "No active tasks!",
            Filter::Completed => "No completed tasks!",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(anyhow!("Unknown filter '{}' (expected all, active or completed)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(completed: bool) -> Task {
        let mut t = Task::new("t".to_string());
        t.completed = completed;
        t
    }

    #[test]
    fn predicates() {
        let open = task(false);
        let done = task(true);
        assert!(Filter::All.matches(&open) && Filter::All.matches(&done));
        assert!(Filter::Active.matches(&open) && !Filter::Active.matches(&done));
        assert!(!Filter::Completed.matches(&open) && Filter::Completed.matches(&done));
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        assert_eq!(Filter::All.next(), Filter::Active);
        assert_eq!(Filter::Completed.next(), Filter::All);
        assert_eq!(Filter::All.previous(), Filter::Completed);
        assert_eq!(Filter::Active.previous(), Filter::All);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("ACTIVE".parse::<Filter>().unwrap(), Filter::Active);
        assert_eq!(" completed ".parse::<Filter>().unwrap(), Filter::Completed);
        assert!("done".parse::<Filter>().is_err());
    }

    #[test]
    fn default_is_all() {
        assert_eq!(Filter::default(), Filter::All);
    }
}
