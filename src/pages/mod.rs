pub mod calendar;
pub mod clients;
pub mod projects;
pub mod tasks;

use crate::fl;
use crate::view::Tab;

pub fn tab_title(tab: Tab) -> String {
    match tab {
        Tab::Clients => fl!("tab-clients"),
        Tab::Projects => fl!("tab-projects"),
        Tab::Tasks => fl!("tab-tasks"),
        Tab::Calendar => fl!("tab-calendar"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_tab_has_its_own_title() {
        let titles: HashSet<String> = Tab::ALL.iter().map(|tab| tab_title(*tab)).collect();
        assert_eq!(titles.len(), Tab::ALL.len());
        assert!(titles.contains("Clients"));
    }
}
