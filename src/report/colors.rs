//! Colors and glyphs shared by the terminal, compact and catalogue output

use colored::{ColoredString, Colorize};

use crate::analysis::{Family, Severity};

/// Structural element colors
pub struct StructureColors;

impl StructureColors {
    /// File path header
    pub fn file_path(text: &str) -> ColoredString {
        text.cyan().bold()
    }

    /// Line/column numbers
    pub fn location(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Issue id, e.g. BindsMustBeAbstract
    pub fn rule_code(text: &str) -> ColoredString {
        text.magenta()
    }

    /// Declaration/symbol name
    pub fn symbol_name(text: &str) -> ColoredString {
        text.white().bold()
    }

    /// Category headers
    pub fn category(text: &str) -> ColoredString {
        text.cyan().bold()
    }

    /// Count/statistics numbers
    pub fn count(text: &str) -> ColoredString {
        text.white().bold()
    }

    pub fn family(family: Family) -> ColoredString {
        match family {
            Family::Dagger => family.as_str().blue(),
            Family::Anvil => family.as_str().green(),
            Family::Hilt => family.as_str().yellow(),
        }
    }
}

/// Severity symbols for compact display
pub struct SeveritySymbol;

impl SeveritySymbol {
    pub fn error() -> &'static str {
        "✖"
    }

    pub fn warning() -> &'static str {
        "⚠"
    }

    pub fn colored(severity: &Severity) -> ColoredString {
        match severity {
            Severity::Error => Self::error().red().bold(),
            Severity::Warning => Self::warning().yellow(),
        }
    }

    pub fn label(severity: &Severity) -> ColoredString {
        match severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        }
    }
}

/// Box drawing characters
pub struct BoxChars;

impl BoxChars {
    /// Heavy separator line
    pub fn heavy_line(width: usize) -> String {
        "━".repeat(width)
    }

    /// Light separator line
    pub fn light_line(width: usize) -> String {
        "─".repeat(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        assert_eq!(BoxChars::heavy_line(5), "━━━━━");
        assert_eq!(BoxChars::light_line(3), "───");
    }

    #[test]
    fn test_severity_symbols() {
        assert!(SeveritySymbol::colored(&Severity::Error).to_string().contains("✖"));
        assert!(SeveritySymbol::label(&Severity::Warning)
            .to_string()
            .contains("warning"));
    }
}
