use chrono::{Datelike, Months, NaiveDate, Weekday};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, text};
use cosmic::Element;

use crate::message::Message;

#[derive(Debug, Clone)]
pub struct DatePickerState {
    /// First day of the displayed month.
    pub displayed_month: NaiveDate,
    /// Day that will be applied on confirm.
    pub selected: NaiveDate,
}

impl DatePickerState {
    pub fn new(seed: NaiveDate) -> Self {
        Self {
            displayed_month: first_of_month(seed),
            selected: seed,
        }
    }

    pub fn prev_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.displayed_month);
    }

    pub fn next_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_add_months(Months::new(1))
            .unwrap_or(self.displayed_month);
    }

    pub fn select_day(&mut self, date: NaiveDate) {
        self.selected = date;
        self.displayed_month = first_of_month(date);
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// The Monday on or before the first of the displayed month.
fn grid_start(first: NaiveDate) -> NaiveDate {
    let offset = first.weekday().num_days_from_monday() as i64;
    first - chrono::Duration::days(offset)
}

/// Month grid for picking one day. Days outside the month are left blank.
pub fn date_picker<'a>(state: &DatePickerState, today: NaiveDate) -> Element<'a, Message> {
    let first = state.displayed_month;

    let header = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(
            button::icon(cosmic::widget::icon::from_name("go-previous-symbolic"))
                .on_press(Message::DatePrevMonth),
        )
        .push(
            text::body(first.format("%B %Y").to_string())
                .width(Length::Fill)
                .center(),
        )
        .push(
            button::icon(cosmic::widget::icon::from_name("go-next-symbolic"))
                .on_press(Message::DateNextMonth),
        );

    let mut day_labels = row().spacing(0);
    for weekday in [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ] {
        let label = weekday.to_string().chars().take(2).collect::<String>();
        day_labels = day_labels.push(
            container(text::caption(label).center())
                .width(Length::FillPortion(1))
                .center_x(Length::FillPortion(1)),
        );
    }

    let mut grid = column().spacing(2).push(header).push(day_labels);
    let start = grid_start(first);

    for week in 0..6 {
        let mut week_row = row().spacing(0);
        let mut any_in_month = false;

        for day_of_week in 0..7 {
            let date = start + chrono::Duration::days(week * 7 + day_of_week);
            let in_month = date.month() == first.month() && date.year() == first.year();

            let cell: Element<'a, Message> = if !in_month {
                container(text::body(" "))
                    .width(Length::FillPortion(1))
                    .center_x(Length::FillPortion(1))
                    .into()
            } else {
                any_in_month = true;
                let label = date.day().to_string();
                let txt = if date == today {
                    text::body(label).font(cosmic::iced::Font {
                        weight: cosmic::iced::font::Weight::Bold,
                        ..Default::default()
                    })
                } else {
                    text::body(label)
                };

                let class = if date == state.selected {
                    cosmic::theme::Button::Suggested
                } else {
                    cosmic::theme::Button::Text
                };

                button::custom(container(txt.center()).center_x(Length::Fill))
                    .class(class)
                    .on_press(Message::DateSelectDay(date))
                    .width(Length::FillPortion(1))
                    .into()
            };

            week_row = week_row.push(cell);
        }

        if any_in_month {
            grid = grid.push(week_row);
        }
    }

    container(grid).width(Length::Fill).padding(8).into()
}
