//! Status vocabulary for consistent CLI output.

use super::theme::SetupTheme;

/// Status kinds shown next to dependencies and verification items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Present or installed.
    Success,
    /// Required and absent.
    Failed,
    /// Optional and absent.
    Skipped,
    /// Non-fatal warning.
    Warning,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Skipped => "○",
            Self::Warning => "⚠",
        }
    }

    /// Bracketed text for non-TTY output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Success => "[ok]",
            Self::Failed => "[FAIL]",
            Self::Skipped => "[skip]",
            Self::Warning => "[warn]",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &SetupTheme) -> String {
        let icon = self.icon();
        match self {
            Self::Success => theme.success.apply_to(icon).to_string(),
            Self::Failed => theme.error.apply_to(icon).to_string(),
            Self::Skipped => theme.dim.apply_to(icon).to_string(),
            Self::Warning => theme.warning.apply_to(icon).to_string(),
        }
    }

    /// Format a status line for non-TTY: bracketed + message.
    pub fn format_plain(self, msg: &str) -> String {
        format!("{} {}", self.bracketed(), msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icons_are_distinct() {
        let kinds = [
            StatusKind::Success,
            StatusKind::Failed,
            StatusKind::Skipped,
            StatusKind::Warning,
        ];
        let icons: std::collections::HashSet<_> = kinds.iter().map(|k| k.icon()).collect();
        assert_eq!(icons.len(), kinds.len());
    }

    #[test]
    fn plain_format_uses_brackets() {
        assert_eq!(StatusKind::Failed.format_plain("git"), "[FAIL] git");
        assert_eq!(StatusKind::Success.format_plain("aws"), "[ok] aws");
    }

    #[test]
    fn styled_with_plain_theme_is_icon() {
        let theme = SetupTheme::plain();
        assert_eq!(StatusKind::Skipped.styled(&theme), "○");
    }
}
