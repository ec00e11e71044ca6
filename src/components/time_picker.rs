use chrono::{NaiveTime, Timelike};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, text};
use cosmic::Element;

use crate::fl;
use crate::message::{Message, TimeField};

/// Hour and minute being edited in the time dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePickerState {
    pub hour: u32,
    pub minute: u32,
}

impl TimePickerState {
    pub fn new(seed: NaiveTime) -> Self {
        Self {
            hour: seed.hour(),
            minute: seed.minute(),
        }
    }

    /// Step a field, wrapping within its range without carrying into the other.
    pub fn adjust(&mut self, field: TimeField, delta: i32) {
        match field {
            TimeField::Hour => self.hour = wrap(self.hour, delta, 24),
            TimeField::Minute => self.minute = wrap(self.minute, delta, 60),
        }
    }

    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

fn wrap(value: u32, delta: i32, modulus: i32) -> u32 {
    (value as i32 + delta).rem_euclid(modulus) as u32
}

fn stepper<'a>(label: String, value: u32, field: TimeField, big_step: i32) -> Element<'a, Message> {
    let up = row()
        .spacing(4)
        .push(button::standard(format!("+{}", big_step)).on_press(Message::AdjustTime(field, big_step)))
        .push(button::icon(icon::from_name("go-up-symbolic")).on_press(Message::AdjustTime(field, 1)));
    let down = row()
        .spacing(4)
        .push(button::standard(format!("-{}", big_step)).on_press(Message::AdjustTime(field, -big_step)))
        .push(button::icon(icon::from_name("go-down-symbolic")).on_press(Message::AdjustTime(field, -1)));

    column()
        .spacing(8)
        .align_x(Alignment::Center)
        .push(text::caption(label))
        .push(up)
        .push(text::title2(format!("{:02}", value)))
        .push(down)
        .into()
}

/// 24-hour stepper for the time dialog.
pub fn time_picker<'a>(state: &TimePickerState) -> Element<'a, Message> {
    let content = row()
        .spacing(24)
        .align_y(Alignment::Center)
        .push(stepper(fl!("hour"), state.hour, TimeField::Hour, 6))
        .push(text::title2(":"))
        .push(stepper(fl!("minute"), state.minute, TimeField::Minute, 15));

    container(content).center_x(Length::Fill).padding(8).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_wraps_each_field() {
        let mut state = TimePickerState::new(NaiveTime::from_hms_opt(23, 50, 12).unwrap());
        assert_eq!((state.hour, state.minute), (23, 50));

        state.adjust(TimeField::Minute, 15);
        assert_eq!((state.hour, state.minute), (23, 5));
        state.adjust(TimeField::Hour, 1);
        assert_eq!(state.hour, 0);
        state.adjust(TimeField::Hour, -6);
        assert_eq!(state.hour, 18);
        state.adjust(TimeField::Minute, -6);
        assert_eq!(state.minute, 59);
        assert_eq!(state.time(), NaiveTime::from_hms_opt(18, 59, 0).unwrap());
    }
}
