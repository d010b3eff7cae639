//! Formatting policy decisions.
//!
//! `FormatterRules` is a stateless wrapper around an immutable
//! options record: every method is a pure function from an input
//! fragment to its formatted form. All presentation decisions live
//! here; the generator only walks the tree and asks.

use crate::options::{
    BraceStyle, Casing, ContainerStyle, FormatterOptions, IndentStyle, LineEnding, PipelineStyle,
    QuoteStyle,
};

/// Operators that must never receive surrounding spaces, regardless
/// of configuration. Spacing any of these corrupts property access,
/// static-member access, indexers, or multi-word command names.
pub const NO_SPACE_OPERATORS: &[&str] = &[
    ".", "::", "[", "]", "(", ")", "{", "}", "@{", ";", "-", ",",
];

/// Pipelines longer than this go multiline in auto mode.
const PIPELINE_ONELINE_MAX: usize = 2;
/// Containers larger than this expand in auto mode.
const CONTAINER_COMPACT_MAX: usize = 5;

/// Pure formatting policy over an options record. Safe to share
/// read-only across concurrent formatting calls.
#[derive(Debug, Clone)]
pub struct FormatterRules {
    options: FormatterOptions,
}

impl FormatterRules {
    #[must_use]
    pub fn new(options: &FormatterOptions) -> Self {
        Self {
            options: options.clone(),
        }
    }

    #[must_use]
    pub const fn options(&self) -> &FormatterOptions {
        &self.options
    }

    /// The indent string for one nesting level, repeated.
    #[must_use]
    pub fn indent(&self, level: usize) -> String {
        match self.options.indent_style {
            IndentStyle::Spaces => " ".repeat(self.options.indent_size * level),
            IndentStyle::Tabs => "\t".repeat(level),
        }
    }

    #[must_use]
    pub const fn newline(&self) -> &'static str {
        match self.options.line_ending {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    #[must_use]
    pub fn is_no_space_operator(op: &str) -> bool {
        NO_SPACE_OPERATORS.contains(&op)
    }

    /// An operator with its configured spacing applied.
    #[must_use]
    pub fn spaced_operator(&self, op: &str) -> String {
        if Self::is_no_space_operator(op) {
            return op.to_string();
        }
        if self.options.space_around_operators {
            format!(" {op} ")
        } else {
            op.to_string()
        }
    }

    #[must_use]
    pub const fn comma(&self) -> &'static str {
        if self.options.space_after_comma {
            ", "
        } else {
            ","
        }
    }

    #[must_use]
    pub const fn entry_separator(&self) -> &'static str {
        if self.options.space_after_semicolon {
            "; "
        } else {
            ";"
        }
    }

    /// What to emit between a statement header and its opening brace.
    #[must_use]
    pub fn open_brace(&self, indent: &str) -> String {
        match self.options.brace_style {
            BraceStyle::SameLine => " {".to_string(),
            BraceStyle::NextLine => format!("{}{indent}{{", self.newline()),
        }
    }

    /// Case policy for command names. Hyphens are segment boundaries
    /// and are never removed or relocated; each segment is cased
    /// independently.
    #[must_use]
    pub fn command_case(&self, name: &str) -> String {
        apply_casing(name, self.options.command_casing)
    }

    /// Case policy for parameter names; the leading hyphen is part of
    /// the flag syntax, not a boundary to case across.
    #[must_use]
    pub fn parameter_case(&self, name: &str) -> String {
        match name.strip_prefix('-') {
            Some(rest) => format!("-{}", apply_casing(rest, self.options.parameter_casing)),
            None => apply_casing(name, self.options.parameter_casing),
        }
    }

    /// Case policy for variables. The transform applies only to the
    /// name after the sigil, never the sigil itself; brace-delimited
    /// names are left alone.
    #[must_use]
    pub fn variable_case(&self, text: &str) -> String {
        match text.strip_prefix('$') {
            Some(rest) if !rest.starts_with('{') => {
                format!("${}", apply_casing(rest, self.options.variable_casing))
            }
            _ => text.to_string(),
        }
    }

    /// Normalize a string literal's quoting. The existing quotes are
    /// stripped before the target quote is reapplied, and any
    /// embedded quote of the target style is doubled.
    #[must_use]
    pub fn normalize_quotes(&self, raw: &str) -> String {
        let target = match self.options.quote_style {
            QuoteStyle::Preserve => return raw.to_string(),
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        };
        let current = match raw.chars().next() {
            Some(c @ ('\'' | '"')) => c,
            _ => return raw.to_string(),
        };
        if current == target {
            return raw.to_string();
        }

        let inner = raw
            .strip_prefix(current)
            .and_then(|s| s.strip_suffix(current))
            .unwrap_or(raw);
        // Un-double the old quote's escape, then double the new one.
        let doubled_old = format!("{current}{current}");
        let undoubled = inner.replace(&doubled_old, &current.to_string());
        let doubled_new = format!("{target}{target}");
        let escaped = undoubled.replace(target, &doubled_new);
        format!("{target}{escaped}{target}")
    }

    /// Whether a pipeline of `count` elements lays out multiline.
    #[must_use]
    pub const fn pipeline_multiline(&self, count: usize) -> bool {
        match self.options.pipeline_style {
            PipelineStyle::OneLine => false,
            PipelineStyle::Multiline => true,
            PipelineStyle::Auto => count > PIPELINE_ONELINE_MAX,
        }
    }

    /// Whether an array of `count` elements expands one-per-line.
    #[must_use]
    pub const fn array_expanded(&self, count: usize) -> bool {
        container_expanded(self.options.array_style, count)
    }

    /// Whether a hashtable of `count` entries expands one-per-line.
    #[must_use]
    pub const fn hashtable_expanded(&self, count: usize) -> bool {
        container_expanded(self.options.hashtable_style, count)
    }
}

const fn container_expanded(style: ContainerStyle, count: usize) -> bool {
    match style {
        ContainerStyle::Compact => false,
        ContainerStyle::Expanded => true,
        ContainerStyle::Auto => count > CONTAINER_COMPACT_MAX,
    }
}

fn apply_casing(name: &str, casing: Casing) -> String {
    match casing {
        Casing::Preserve => name.to_string(),
        Casing::Lower => name.to_ascii_lowercase(),
        Casing::Upper => name.to_ascii_uppercase(),
        Casing::Pascal => case_segments(name, |seg, _| capitalize(seg)),
        Casing::Camel => case_segments(name, |seg, first| {
            if first {
                decapitalize(seg)
            } else {
                capitalize(seg)
            }
        }),
    }
}

/// Apply a per-segment transform across hyphen boundaries. The
/// hyphens themselves pass through untouched.
fn case_segments(name: &str, transform: impl Fn(&str, bool) -> String) -> String {
    name.split('-')
        .enumerate()
        .map(|(i, seg)| transform(seg, i == 0))
        .collect::<Vec<_>>()
        .join("-")
}

fn capitalize(seg: &str) -> String {
    let mut chars = seg.chars();
    chars.next().map_or_else(String::new, |c| {
        c.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

fn decapitalize(seg: &str) -> String {
    let mut chars = seg.chars();
    chars.next().map_or_else(String::new, |c| {
        c.to_ascii_lowercase().to_string() + chars.as_str()
    })
}
