//! Filter state backing the URL listing view.

use chrono::NaiveDate;

/// Sort direction applied to the `sort` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Prefix placed in front of the field name in `order_by`.
    pub fn prefix(self) -> &'static str {
        match self {
            SortOrder::Ascending => "",
            SortOrder::Descending => "-",
        }
    }
}

/// Date-group selection requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilterKind {
    Range,
    Date,
}

/// Date-filter UI mode derived from the state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilterMode {
    None,
    Range,
    Date,
}

/// Mutable record driving list-query construction.
///
/// One instance lives per listing view. Equality is structural and is what
/// the query builder uses to detect changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub date: Option<NaiveDate>,
    /// Earliest date offered for `to_date`; follows `from_date`.
    pub min_to_date: Option<NaiveDate>,
    pub filter_range: bool,
    pub filter_date: bool,
    pub sort: Option<String>,
    pub order: SortOrder,
    /// Raw user input; only positive values survive a query build.
    pub limit: Option<i64>,
}

impl FilterState {
    /// Creates a state with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DateFilterMode {
        if self.filter_range {
            DateFilterMode::Range
        } else if self.filter_date {
            DateFilterMode::Date
        } else {
            DateFilterMode::None
        }
    }

    /// Switches the date-filter mode and seeds the active group with `today`.
    ///
    /// Entering range mode clears `date`; entering date mode clears the range
    /// fields. There is no transition back to [`DateFilterMode::None`] other
    /// than [`FilterState::reset`].
    pub fn select_mode(&mut self, kind: DateFilterKind, today: NaiveDate) {
        match kind {
            DateFilterKind::Range => {
                self.filter_range = true;
                self.filter_date = false;
                self.date = None;
                self.from_date = Some(today);
                self.to_date = Some(today);
                self.min_to_date = Some(today);
            }
            DateFilterKind::Date => {
                self.filter_range = false;
                self.filter_date = true;
                self.date = Some(today);
                self.from_date = None;
                self.to_date = None;
                self.min_to_date = None;
            }
        }
    }

    /// Re-applies the `from_date` constraints after it changed.
    ///
    /// `min_to_date` follows `from_date`, and `to_date` is raised when it is
    /// unset or earlier. Clearing `from_date` leaves `to_date` alone.
    pub fn follow_from_date(&mut self) {
        self.min_to_date = self.from_date;
        if let Some(from) = self.from_date
            && self.to_date.is_none_or(|to| from > to)
        {
            self.to_date = Some(from);
        }
    }

    /// Sets the sort field; an empty or blank name clears sorting.
    pub fn set_sort(&mut self, field: Option<&str>, order: SortOrder) {
        self.sort = field
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        self.order = order;
    }

    /// Returns every field to its unset state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
