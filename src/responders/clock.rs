use chrono::{DateTime, Datelike, TimeZone, Weekday};

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Thứ Hai",
        Weekday::Tue => "Thứ Ba",
        Weekday::Wed => "Thứ Tư",
        Weekday::Thu => "Thứ Năm",
        Weekday::Fri => "Thứ Sáu",
        Weekday::Sat => "Thứ Bảy",
        Weekday::Sun => "Chủ Nhật",
    }
}

pub fn format_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "Bây giờ là {} ngày {}",
        now.format("%H:%M:%S"),
        now.format("%d/%m/%Y")
    )
}

pub fn format_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "Hôm nay là {}, ngày {}",
        weekday_name(now.weekday()),
        now.format("%d/%m/%Y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_formats() {
        let at = Utc.with_ymd_and_hms(2024, 9, 2, 8, 5, 9).unwrap();
        assert_eq!(format_time(&at), "Bây giờ là 08:05:09 ngày 02/09/2024");
        assert_eq!(format_date(&at), "Hôm nay là Thứ Hai, ngày 02/09/2024");

        let sunday = Utc.with_ymd_and_hms(2024, 9, 8, 0, 0, 0).unwrap();
        assert_eq!(format_date(&sunday), "Hôm nay là Chủ Nhật, ngày 08/09/2024");
    }
}
