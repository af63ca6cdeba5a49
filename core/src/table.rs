//! Table presentation: id sort, status filters and fixed-size pages.

use crate::types::Task;

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTable {
    sort: Option<SortOrder>,
    status_filters: Vec<String>,
    page: usize,
}

impl TaskTable {
    pub fn sort(&self) -> Option<SortOrder> {
        self.sort
    }

    pub fn set_sort(&mut self, sort: Option<SortOrder>) {
        self.sort = sort;
        self.page = 0;
    }

    /// none -> ascending -> descending -> none
    pub fn cycle_sort(&mut self) {
        let next = match self.sort {
            None => Some(SortOrder::Ascending),
            Some(SortOrder::Ascending) => Some(SortOrder::Descending),
            Some(SortOrder::Descending) => None,
        };
        self.set_sort(next);
    }

    pub fn status_filters(&self) -> &[String] {
        &self.status_filters
    }

    pub fn toggle_status_filter(&mut self, value: &str) {
        if let Some(pos) = self.status_filters.iter().position(|f| f == value) {
            self.status_filters.remove(pos);
        } else {
            self.status_filters.push(value.to_string());
        }
        self.page = 0;
    }

    pub fn clear_status_filters(&mut self) {
        self.status_filters.clear();
        self.page = 0;
    }

    /// A row passes when its status contains any selected filter value,
    /// ignoring case. No filters means every row passes.
    pub fn matches(&self, task: &Task) -> bool {
        if self.status_filters.is_empty() {
            return true;
        }
        let status = task.status.to_lowercase();
        self.status_filters
            .iter()
            .any(|value| status.contains(&value.to_lowercase()))
    }

    /// Filtered and sorted rows across all pages.
    pub fn arranged<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut rows: Vec<&Task> = tasks.iter().filter(|t| self.matches(t)).collect();
        match self.sort {
            Some(SortOrder::Ascending) => rows.sort_by_key(|t| t.id),
            Some(SortOrder::Descending) => rows.sort_by(|a, b| b.id.cmp(&a.id)),
            None => {}
        }
        rows
    }

    /// The rows of the current page.
    pub fn visible<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let rows = self.arranged(tasks);
        let page = self.page.min(page_count(rows.len()) - 1);
        rows.into_iter()
            .skip(page * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self, tasks: &[Task]) -> usize {
        page_count(tasks.iter().filter(|t| self.matches(t)).count())
    }

    pub fn next_page(&mut self, tasks: &[Task]) {
        self.page = (self.page + 1).min(self.page_count(tasks) - 1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Pull the page back into range after rows were removed.
    pub fn clamp_page(&mut self, tasks: &[Task]) {
        self.page = self.page.min(self.page_count(tasks) - 1);
    }
}

fn page_count(rows: usize) -> usize {
    rows.div_ceil(PAGE_SIZE).max(1)
}
