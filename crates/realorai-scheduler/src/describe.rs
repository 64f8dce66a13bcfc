// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-readable rendering of five-field cron expressions, for logs and the CLI.

const INVALID: &str = "Invalid cron expression";

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Best-effort description of `cron`. Never fails.
pub fn describe_cron_expression(cron: &str) -> String {
    let fields: Vec<&str> = cron.split_whitespace().collect();
    let &[minute, hour, day, month, weekday] = fields.as_slice() else {
        return INVALID.to_string();
    };

    let minute_n = number(minute, 59);
    let hour_n = number(hour, 23);

    match (minute, hour, day, month, weekday) {
        ("*", "*", "*", "*", "*") => "Every minute".to_string(),
        (m, "*", "*", "*", "*") if m.starts_with("*/") => match number(&m[2..], 59) {
            Some(1) => "Every minute".to_string(),
            Some(n) if n > 0 => format!("Every {n} minutes"),
            _ => custom(cron),
        },
        (_, "*", "*", "*", "*") => match minute_n {
            Some(m) => format!("Hourly at minute {m}"),
            None => custom(cron),
        },
        (_, _, "*", "*", "*") => match (minute_n, hour_n) {
            (Some(m), Some(h)) => format!("Daily at {h:02}:{m:02} UTC"),
            _ => custom(cron),
        },
        (_, _, "*", "*", d) => match (minute_n, hour_n, number(d, 7)) {
            (Some(m), Some(h), Some(d)) => {
                format!("Weekly on {} at {h:02}:{m:02} UTC", WEEKDAYS[d as usize % 7])
            }
            _ => custom(cron),
        },
        (_, _, d, "*", "*") => match (minute_n, hour_n, number(d, 31)) {
            (Some(m), Some(h), Some(d)) if d >= 1 => {
                format!("Monthly on day {d} at {h:02}:{m:02} UTC")
            }
            _ => custom(cron),
        },
        _ => custom(cron),
    }
}

fn number(field: &str, max: u32) -> Option<u32> {
    field.parse::<u32>().ok().filter(|n| *n <= max)
}

fn custom(cron: &str) -> String {
    format!("Custom schedule: {}", cron.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_shapes() {
        assert_eq!(describe_cron_expression("* * * * *"), "Every minute");
        assert_eq!(describe_cron_expression("*/15 * * * *"), "Every 15 minutes");
        assert_eq!(describe_cron_expression("30 * * * *"), "Hourly at minute 30");
        assert_eq!(describe_cron_expression("0 0 * * *"), "Daily at 00:00 UTC");
        assert_eq!(describe_cron_expression("5 9 * * 1"), "Weekly on Monday at 09:05 UTC");
        assert_eq!(describe_cron_expression("0 12 * * 7"), "Weekly on Sunday at 12:00 UTC");
        assert_eq!(describe_cron_expression("0 3 15 * *"), "Monthly on day 15 at 03:00 UTC");
    }

    #[test]
    fn wrong_field_count_is_invalid() {
        assert_eq!(describe_cron_expression(""), INVALID);
        assert_eq!(describe_cron_expression("bad"), INVALID);
        assert_eq!(describe_cron_expression("0 0 0 * * *"), INVALID);
    }

    #[test]
    fn anything_else_is_custom() {
        assert_eq!(
            describe_cron_expression("0 9-17 * * 1-5"),
            "Custom schedule: 0 9-17 * * 1-5"
        );
        assert_eq!(
            describe_cron_expression("0 0 1 1 *"),
            "Custom schedule: 0 0 1 1 *"
        );
        assert_eq!(
            describe_cron_expression("*/0 * * * *"),
            "Custom schedule: */0 * * * *"
        );
    }
}
