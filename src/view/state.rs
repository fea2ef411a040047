//! View parameters and the transitions user actions drive

use crate::core::field::SortKey;
use crate::core::filter::{FilterParams, StatusFilter};
use crate::core::query::PageNav;
use crate::core::sort::SortParams;
use serde::{Deserialize, Serialize};

/// Filter, sort and page state of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub filter: FilterParams,
    pub sort: SortParams,
    /// 1-based page index
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(SortParams::default())
    }
}

impl ViewState {
    pub fn new(sort: SortParams) -> Self {
        Self {
            filter: FilterParams::default(),
            sort,
            page: 1,
        }
    }

    /// State after one user action.
    ///
    /// `page_count` is the page count of the view *before* the action; it
    /// bounds pager navigation.
    pub fn apply(&self, action: &ViewAction, page_count: usize) -> ViewState {
        match action {
            ViewAction::SearchChanged { text } => {
                let filter = self.filter.clone().with_search(text.clone());
                apply_filter_change(self, filter)
            }
            ViewAction::StatusSelected { status } => {
                let filter = self.filter.clone().with_status(*status);
                apply_filter_change(self, filter)
            }
            ViewAction::DateRangeChanged { start, end } => {
                let filter = self.filter.clone().with_date_range(start.clone(), end.clone());
                apply_filter_change(self, filter)
            }
            ViewAction::ColumnHeaderClicked { key } => ViewState {
                sort: self.sort.clicked(*key),
                ..self.clone()
            },
            ViewAction::PageClicked { page } => self.navigate(PageNav::Goto(*page), page_count),
            ViewAction::PreviousClicked => self.navigate(PageNav::Previous, page_count),
            ViewAction::NextClicked => self.navigate(PageNav::Next, page_count),
        }
    }

    fn navigate(&self, nav: PageNav, page_count: usize) -> ViewState {
        ViewState {
            page: nav.resolve(self.page, page_count),
            ..self.clone()
        }
    }
}

/// Replace the filter and go back to page 1 in a single transition
pub fn apply_filter_change(state: &ViewState, filter: FilterParams) -> ViewState {
    ViewState {
        filter,
        sort: state.sort,
        page: 1,
    }
}

/// A user action reported by the display layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ViewAction {
    SearchChanged { text: String },
    StatusSelected { status: StatusFilter },
    DateRangeChanged { start: String, end: String },
    ColumnHeaderClicked { key: SortKey },
    PageClicked { page: usize },
    PreviousClicked,
    NextClicked,
}

impl ViewAction {
    /// Whether this action edits the filter (and therefore resets the page)
    pub fn is_filter_change(&self) -> bool {
        matches!(
            self,
            ViewAction::SearchChanged { .. }
                | ViewAction::StatusSelected { .. }
                | ViewAction::DateRangeChanged { .. }
        )
    }
}
