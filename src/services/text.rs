//! Display helpers for resolved text: dates, excerpts, HTML bodies.

use chrono::{Datelike, NaiveDate};
use scraper::Html;
use unicode_segmentation::UnicodeSegmentation;

use crate::locale::Locale;

const MONTHS_RU: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября",
    "октября", "ноября", "декабря",
];

const MONTHS_KG: [&str; 12] = [
    "январь", "февраль", "март", "апрель", "май", "июнь", "июль", "август", "сентябрь", "октябрь",
    "ноябрь", "декабрь",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Long-form date in the conventions of `locale`.
///
/// Accepts `YYYY-MM-DD` with an optional time suffix. Unparsable input is
/// returned unchanged.
pub fn format_date(raw: &str, locale: Locale) -> String {
    let date_part = raw.get(..10).unwrap_or(raw);
    let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") else {
        return raw.to_string();
    };

    let month = date.month0() as usize;
    let (day, year) = (date.day(), date.year());
    match locale {
        Locale::Ru => format!("{day} {} {year} г.", MONTHS_RU[month]),
        Locale::Kg => format!("{year}-ж., {day}-{}", MONTHS_KG[month]),
        Locale::En => format!("{} {day}, {year}", MONTHS_EN[month]),
    }
}

/// Shorten `text` to at most `max` grapheme clusters, adding `…` when cut.
pub fn excerpt(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let graphemes: Vec<&str> = normalized.graphemes(true).collect();
    if graphemes.len() <= max {
        return normalized;
    }

    let cut = graphemes[..max.saturating_sub(1)].concat();
    format!("{}…", cut.trim_end())
}

/// Visible text of an HTML fragment with whitespace collapsed.
pub fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_per_locale() {
        assert_eq!(format_date("2024-11-25", Locale::Ru), "25 ноября 2024 г.");
        assert_eq!(format_date("2024-11-25", Locale::En), "November 25, 2024");
        assert_eq!(format_date("2024-11-25", Locale::Kg), "2024-ж., 25-ноябрь");
    }

    #[test]
    fn test_format_date_with_time_suffix() {
        assert_eq!(
            format_date("2025-01-15T09:30:00Z", Locale::En),
            "January 15, 2025"
        );
    }

    #[test]
    fn test_format_date_passes_through_garbage() {
        assert_eq!(format_date("скоро", Locale::Ru), "скоро");
        assert_eq!(format_date("", Locale::Ru), "");
    }

    #[test]
    fn test_excerpt_short_text_unchanged() {
        assert_eq!(excerpt("Корпус  №1", 20), "Корпус №1");
    }

    #[test]
    fn test_excerpt_cuts_on_graphemes() {
        let cut = excerpt("Общежитие для студентов", 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
        assert!(cut.starts_with("Общежитие"));
    }

    #[test]
    fn test_excerpt_zero_width_is_empty() {
        assert_eq!(excerpt("Корпус", 0), "");
        assert_eq!(excerpt("Корпус", 1), "…");
    }

    #[test]
    fn test_plain_text_strips_markup() {
        assert_eq!(
            plain_text("<p>Приём <b>документов</b></p>\n<p>открыт</p>"),
            "Приём документов открыт"
        );
        assert_eq!(plain_text("no markup"), "no markup");
    }
}
