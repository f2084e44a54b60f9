use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Positive,
    Negative,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Positive => style(text).green(),
        StyleType::Negative => style(text).red(),
        StyleType::Error => style(text).red().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Formats an amount with two decimals behind the currency symbol.
pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{currency}{:.2}", amount.abs())
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned amount cell.
pub fn amount_cell(amount: f64, currency: &str) -> Cell {
    Cell::new(format_amount(amount, currency)).set_alignment(CellAlignment::Right)
}

/// Signed amount cell, green when the group owes the participant and red
/// when they owe the group.
pub fn balance_cell(amount: f64, currency: &str) -> Cell {
    // Sign follows the printed cents, so -0.004 shows as a plain zero.
    let negative = (amount * 100.0).round() < 0.0;
    let text = if negative {
        format!("-{}", format_amount(amount, currency))
    } else {
        format_amount(amount, currency)
    };
    let color = if negative { Color::Red } else { Color::Green };
    Cell::new(text)
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Creates a dimmed cell for missing values.
pub fn na_cell() -> Cell {
    Cell::new("N/A").fg(Color::DarkGrey)
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_rounds_to_cents() {
        assert_eq!(format_amount(42.756, "$"), "$42.76");
        assert_eq!(format_amount(-30.0, "€"), "€30.00");
    }

    #[test]
    fn test_balance_cell_sign_follows_cents() {
        assert_eq!(balance_cell(-0.004, "$").content(), "$0.00");
        assert_eq!(balance_cell(-0.006, "$").content(), "-$0.01");
        assert_eq!(balance_cell(-30.0, "$").content(), "-$30.00");
        assert_eq!(balance_cell(12.5, "$").content(), "$12.50");
    }
}
