//! Taskbar clock text

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Time and date lines shown in the taskbar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockText {
    /// e.g. `03:07 PM`
    pub time: String,
    /// e.g. `Oct 16`
    pub date: String,
}

impl ClockText {
    pub fn to_html(&self) -> String {
        format!(
            "<div>{}</div><div style=\"font-size: 10px;\">{}</div>",
            self.time, self.date
        )
    }
}

/// Format local time as 12-hour `hh:mm AM/PM` plus `Mon D`
///
/// `month0` is zero-based like `Date.getMonth()`.
pub fn format_clock(hour24: u32, minute: u32, month0: u32, day: u32) -> ClockText {
    let suffix = if hour24 % 24 < 12 { "AM" } else { "PM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    let month = MONTHS[(month0 % 12) as usize];
    ClockText {
        time: format!("{:02}:{:02} {}", hour12, minute % 60, suffix),
        date: format!("{} {}", month, day),
    }
}

/// Read the browser's local clock
#[cfg(target_arch = "wasm32")]
pub fn now() -> ClockText {
    let date = js_sys::Date::new_0();
    format_clock(date.get_hours(), date.get_minutes(), date.get_month(), date.get_date())
}
