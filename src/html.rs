//! Shared page layout, styles and value formatting.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, html};
use numfmt::{Formatter, Precision};
use time::{
    OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description,
};

const HTMX_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/htmx.org@2.0.8/dist/htmx.min.js";
const HTMX_RESPONSE_TARGETS_URL: &str =
    "https://cdn.jsdelivr.net/npm/htmx-ext-response-targets@2.0.4/dist/response-targets.min.js";
const TAILWIND_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4";

// Card styles
pub const CARD_STYLE: &str = "p-5 rounded-xl border-2 border-red-900 bg-[#2d0a0a] shadow-lg";
pub const CARD_HEADING_STYLE: &str = "mb-4 text-lg font-bold text-red-200";

// Form styles
pub const FORM_TEXT_INPUT_STYLE: &str = "w-full px-3 py-2 rounded-lg text-sm \
    text-red-50 bg-[#1a0505] border border-red-900 placeholder-red-300/50 \
    focus:outline-none focus:ring-2 focus:ring-red-600 focus:border-red-600";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "px-6 py-2 rounded-lg font-semibold \
    text-white bg-red-700 hover:bg-red-600 cursor-pointer";

pub const BUTTON_SECONDARY_STYLE: &str = "px-4 py-2 rounded-lg text-sm \
    text-red-200 bg-transparent border border-red-800 hover:bg-red-900/40 cursor-pointer";

pub const BUTTON_ICON_STYLE: &str = "px-2 py-1 rounded bg-transparent \
    border-none cursor-pointer hover:bg-red-900/40";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs uppercase text-red-300 bg-[#1a0505]";

pub const TABLE_ROW_STYLE: &str = "border-b border-red-950 hover:bg-red-950/40";

pub const TABLE_CELL_STYLE: &str = "px-4 py-3";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "flex flex-col gap-6 max-w-5xl px-4 py-8 mx-auto";

/// Wrap `content` in the HTML document shared by every page.
///
/// The body enables the htmx response-targets extension so that error
/// responses from any element are swapped into `#alert-container`.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Quartel" }

                script src=(HTMX_SCRIPT_URL) {}
                script src=(HTMX_RESPONSE_TARGETS_URL) {}
                script src=(TAILWIND_SCRIPT_URL) {}
            }

            body
                hx-ext="response-targets"
                hx-target-error="#alert-container"
                class="min-h-screen bg-[#1a0505] text-red-50"
            {
                (content)

                div id="alert-container" {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class=(PAGE_CONTAINER_STYLE)
        {
            div class="py-16 text-center"
            {
                h1 class="mb-4 text-7xl lg:text-9xl font-extrabold tracking-tight text-red-600"
                {
                    (header)
                }

                p class="mb-4 text-3xl md:text-4xl font-bold tracking-tight"
                {
                    (description)
                }

                p class="mb-4 text-xl md:text-2xl tracking-tight text-red-200"
                {
                    (fix)
                }

                a href="/" class={ "inline-block my-4 " (BUTTON_PRIMARY_STYLE) }
                {
                    "Voltar para o início"
                }
            }
        }
    );

    base(title, &content)
}

fn get_thousands_separator_formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(0))
    })
}

/// Format `number` as Brazilian reais, e.g. "R$ 1.234,56".
///
/// The currency symbol is followed by a non-breaking space, thousands are
/// grouped with `.` and the two decimal places follow a `,`.
pub fn format_currency(number: f64) -> String {
    let cents = (number.abs() * 100.0).round() as u128;
    let whole = group_thousands(cents / 100);
    let sign = if number < 0.0 && cents > 0 { "-" } else { "" };

    format!("{sign}R$\u{a0}{whole},{:02}", cents % 100)
}

/// numfmt switches to scientific notation from twelve integer digits.
const GROUPING_LIMIT: u128 = 1_000_000_000_000;

/// Group `whole` into thousands with `.`, e.g. "1.234.567".
fn group_thousands(whole: u128) -> String {
    if whole < GROUPING_LIMIT {
        get_thousands_separator_formatter()
            .fmt_string(whole as u64)
            .replace(',', ".")
    } else {
        format!("{}.{:03}", group_thousands(whole / 1000), whole % 1000)
    }
}

const DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day]/[month]/[year], [hour]:[minute]");

/// Format `date_time` in the `local_offset` timezone as "dd/mm/aaaa, hh:mm".
pub fn format_date_time(date_time: OffsetDateTime, local_offset: UtcOffset) -> String {
    let local = date_time.to_offset(local_offset);

    local
        .format(DATE_TIME_FORMAT)
        .unwrap_or_else(|_| local.to_string())
}


#[cfg(test)]
mod format_date_time_tests {
    use time::macros::{datetime, offset};

    use super::format_date_time;

    #[test]
    fn converts_to_local_time() {
        let created_at = datetime!(2025-01-02 02:30 UTC);

        let got = format_date_time(created_at, offset!(-3));

        assert_eq!(got, "01/01/2025, 23:30");
    }

    #[test]
    fn pads_day_month_and_minutes() {
        let created_at = datetime!(2024-03-05 09:07 UTC);

        assert_eq!(format_date_time(created_at, offset!(UTC)), "05/03/2024, 09:07");
    }
}
