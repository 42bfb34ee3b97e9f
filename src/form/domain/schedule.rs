//! Date and time selection values: event windows, quick picks and the
//! month grid used by the due-date picker.

use super::FormDomainError;
use chrono::{
    Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday,
};
use serde::{Deserialize, Serialize};

/// Returns the first full hour strictly after the hour containing `now`.
#[must_use]
pub fn next_top_of_hour(now: NaiveDateTime) -> NaiveDateTime {
    let hour_start = now.date().and_hms_opt(now.hour(), 0, 0).unwrap_or(now);
    hour_start
        .checked_add_signed(TimeDelta::hours(1))
        .unwrap_or(hour_start)
}

/// Start and end of a calendar event.
///
/// A timed window always satisfies `end >= start`. When `all_day` is set the
/// times are ignored and the ordering is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
    all_day: bool,
}

impl EventWindow {
    /// Creates a validated window.
    ///
    /// # Errors
    ///
    /// Returns [`FormDomainError::EndBeforeStart`] when a timed window ends
    /// before it starts.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        all_day: bool,
    ) -> Result<Self, FormDomainError> {
        if !all_day && end < start {
            return Err(FormDomainError::EndBeforeStart { start, end });
        }
        Ok(Self {
            start,
            end,
            all_day,
        })
    }

    /// Creates a timed window of the given length.
    #[must_use]
    pub fn starting_at(start: NaiveDateTime, duration: TimeDelta) -> Self {
        let end = start.checked_add_signed(duration.abs()).unwrap_or(start);
        Self {
            start,
            end,
            all_day: false,
        }
    }

    /// Creates a window starting at the next full hour after `now`.
    #[must_use]
    pub fn next_full_hour(now: NaiveDateTime, duration: TimeDelta) -> Self {
        Self::starting_at(next_top_of_hour(now), duration)
    }

    /// Creates a window on `date` between two whole hours.
    ///
    /// Out-of-range hours fall back to midnight, and an end hour earlier than
    /// the start collapses the window to zero length.
    #[must_use]
    pub fn on_day(date: NaiveDate, start_hour: u32, end_hour: u32) -> Self {
        let start = date
            .and_hms_opt(start_hour, 0, 0)
            .unwrap_or_else(|| date.and_time(NaiveTime::MIN));
        let end = date
            .and_hms_opt(end_hour, 0, 0)
            .filter(|candidate| *candidate >= start)
            .unwrap_or(start);
        Self {
            start,
            end,
            all_day: false,
        }
    }

    /// Returns the start.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the end.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns whether the event spans whole days.
    #[must_use]
    pub const fn is_all_day(&self) -> bool {
        self.all_day
    }

    /// Returns the window length.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }

    /// Moves the start, pushing the end along when it would precede the new
    /// start.
    #[must_use]
    pub fn with_start(self, start: NaiveDateTime) -> Self {
        if self.all_day || self.end >= start {
            return Self { start, ..self };
        }
        let length = self.duration().max(TimeDelta::zero());
        Self {
            start,
            end: start.checked_add_signed(length).unwrap_or(start),
            all_day: self.all_day,
        }
    }

    /// Moves the end.
    ///
    /// # Errors
    ///
    /// Returns [`FormDomainError::EndBeforeStart`] when a timed window would
    /// end before it starts.
    pub fn with_end(self, end: NaiveDateTime) -> Result<Self, FormDomainError> {
        Self::new(self.start, end, self.all_day)
    }

    /// Toggles the all-day flag. Leaving all-day mode restores ordering.
    #[must_use]
    pub fn with_all_day(self, all_day: bool) -> Self {
        let end = if all_day { self.end } else { self.end.max(self.start) };
        Self {
            start: self.start,
            end,
            all_day,
        }
    }
}

/// Due-date shortcuts evaluated against the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickPick {
    /// The current day.
    Today,
    /// The day after the current day.
    Tomorrow,
    /// A configured number of days after the current day.
    NextWeek,
}

impl QuickPick {
    /// All quick picks in display order.
    pub const ALL: [Self; 3] = [Self::Today, Self::Tomorrow, Self::NextWeek];

    /// Returns the button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Tomorrow => "Tomorrow",
            Self::NextWeek => "Next Week",
        }
    }

    /// Resolves the pick relative to `today`.
    #[must_use]
    pub fn resolve(self, today: NaiveDate, next_week_days: u32) -> NaiveDate {
        let offset = match self {
            Self::Today => 0,
            Self::Tomorrow => 1,
            Self::NextWeek => next_week_days,
        };
        today
            .checked_add_days(Days::new(u64::from(offset)))
            .unwrap_or(today)
    }
}

/// Weekday shown in the first grid column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Weeks start on Sunday.
    #[default]
    Sunday,
    /// Weeks start on Monday.
    Monday,
}

impl WeekStart {
    /// Column index of `weekday` in a grid using this week start.
    #[must_use]
    pub fn offset(self, weekday: Weekday) -> u32 {
        match self {
            Self::Sunday => weekday.num_days_from_sunday(),
            Self::Monday => weekday.num_days_from_monday(),
        }
    }

    /// Column headers in grid order.
    #[must_use]
    pub const fn headers(self) -> [&'static str; 7] {
        match self {
            Self::Sunday => ["S", "M", "T", "W", "T", "F", "S"],
            Self::Monday => ["M", "T", "W", "T", "F", "S", "S"],
        }
    }
}

/// A concrete day in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// Calendar date of the cell.
    pub date: NaiveDate,
    /// Whether the cell is the current day.
    pub is_today: bool,
    /// Whether the cell is the selected due date.
    pub is_selected: bool,
}

/// One slot of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Empty slot before the first or after the last day of the month.
    Padding,
    /// A day of the displayed month.
    Day(DayCell),
}

impl Cell {
    /// Returns the day when the cell is not padding.
    #[must_use]
    pub const fn day(&self) -> Option<&DayCell> {
        match self {
            Self::Padding => None,
            Self::Day(day) => Some(day),
        }
    }
}

/// Day grid for one calendar month, padded to whole weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month_start: NaiveDate,
    leading_padding: usize,
    cells: Vec<Cell>,
}

impl MonthGrid {
    /// Number of columns in the grid.
    pub const WEEK_LEN: usize = 7;

    /// Builds the grid for the month containing `anchor`.
    ///
    /// The grid starts with exactly as many padding cells as the first day's
    /// column index and is padded at the end to a multiple of seven.
    #[must_use]
    pub fn build(
        anchor: NaiveDate,
        week_start: WeekStart,
        today: NaiveDate,
        selected: Option<NaiveDate>,
    ) -> Self {
        let month_start = first_of_month(anchor);
        let offset = week_start.offset(month_start.weekday());
        let mut cells: Vec<Cell> = (0..offset).map(|_| Cell::Padding).collect();
        let leading_padding = cells.len();

        cells.extend(
            month_start
                .iter_days()
                .take_while(|date| date.month() == month_start.month())
                .map(|date| {
                    Cell::Day(DayCell {
                        date,
                        is_today: date == today,
                        is_selected: selected == Some(date),
                    })
                }),
        );
        let padded_len = cells.len().next_multiple_of(Self::WEEK_LEN);
        cells.resize(padded_len, Cell::Padding);

        Self {
            month_start,
            leading_padding,
            cells,
        }
    }

    /// Returns the first day of the displayed month.
    #[must_use]
    pub const fn month_start(&self) -> NaiveDate {
        self.month_start
    }

    /// Returns the number of padding cells before day one.
    #[must_use]
    pub const fn leading_padding(&self) -> usize {
        self.leading_padding
    }

    /// Returns every cell in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates the grid one week row at a time.
    pub fn weeks(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(Self::WEEK_LEN)
    }

    /// Iterates the concrete days of the month.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(Cell::day)
    }

    /// Returns the header label, e.g. `Feb 2024`.
    #[must_use]
    pub fn title(&self) -> String {
        self.month_start.format("%b %Y").to_string()
    }
}

/// Month navigation state for the due-date picker.
///
/// The cursor keeps a focus day so that stepping months clamps to the last
/// valid day of shorter months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    focus: NaiveDate,
}

impl CalendarCursor {
    /// Creates a cursor focused on `focus`.
    #[must_use]
    pub const fn new(focus: NaiveDate) -> Self {
        Self { focus }
    }

    /// Returns the focus day.
    #[must_use]
    pub const fn focus(&self) -> NaiveDate {
        self.focus
    }

    /// Returns the first day of the displayed month.
    #[must_use]
    pub fn month_start(&self) -> NaiveDate {
        first_of_month(self.focus)
    }

    /// Steps back exactly one calendar month.
    pub fn previous_month(&mut self) {
        self.focus = self
            .focus
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.focus);
    }

    /// Steps forward exactly one calendar month.
    pub fn next_month(&mut self) {
        self.focus = self
            .focus
            .checked_add_months(Months::new(1))
            .unwrap_or(self.focus);
    }

    /// Builds the grid for the displayed month.
    #[must_use]
    pub fn grid(
        &self,
        week_start: WeekStart,
        today: NaiveDate,
        selected: Option<NaiveDate>,
    ) -> MonthGrid {
        MonthGrid::build(self.focus, week_start, today, selected)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
