//! Formatting configuration.
//!
//! A flat record of presentation choices, immutable once built.
//! `FormatterRules` wraps it and turns the raw settings into
//! per-fragment decisions; nothing here touches the tree.

/// Indentation character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    #[default]
    Spaces,
    Tabs,
}

/// Output line ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

/// Open-brace placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BraceStyle {
    /// One-true-brace style: `if ($x) {` on one line.
    #[default]
    SameLine,
    /// Allman style: the brace opens on the next line.
    NextLine,
}

/// Letter-casing policy for an identifier class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Casing {
    /// Leave the name exactly as written.
    #[default]
    Preserve,
    Lower,
    Upper,
    /// Capitalize each hyphen-separated segment (`get-childitem`
    /// becomes `Get-Childitem`); hyphens are never touched.
    Pascal,
    /// Pascal with a lowercase first segment.
    Camel,
}

/// Quote character policy for string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    #[default]
    Preserve,
    Single,
    Double,
}

/// Pipeline layout policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineStyle {
    /// One line up to two elements, one segment per line beyond.
    #[default]
    Auto,
    OneLine,
    Multiline,
}

/// Array and hashtable layout policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerStyle {
    /// Single line regardless of entry count.
    #[default]
    Compact,
    /// Single line up to five entries, one entry per line beyond.
    Auto,
    /// One entry per line.
    Expanded,
}

/// Formatting options.
///
/// The defaults are the documented host defaults; callers override
/// individual fields with struct-update syntax:
///
/// ```
/// use pwshfmt::{Casing, FormatterOptions};
///
/// let options = FormatterOptions {
///     indent_size: 2,
///     command_casing: Casing::Pascal,
///     ..FormatterOptions::default()
/// };
/// assert_eq!(options.print_width, 120);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterOptions {
    pub indent_size: usize,
    pub indent_style: IndentStyle,
    pub print_width: usize,
    pub line_ending: LineEnding,
    pub brace_style: BraceStyle,

    pub space_around_operators: bool,
    pub space_after_comma: bool,
    pub space_after_semicolon: bool,

    pub command_casing: Casing,
    pub parameter_casing: Casing,
    pub variable_casing: Casing,
    pub quote_style: QuoteStyle,

    pub pipeline_style: PipelineStyle,
    pub array_style: ContainerStyle,
    pub hashtable_style: ContainerStyle,

    pub blank_lines_around_functions: usize,
    pub max_consecutive_blank_lines: usize,
    pub insert_final_newline: bool,
    pub trim_trailing_whitespace: bool,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            indent_size: 4,
            indent_style: IndentStyle::Spaces,
            print_width: 120,
            line_ending: LineEnding::Lf,
            brace_style: BraceStyle::SameLine,
            space_around_operators: true,
            space_after_comma: true,
            space_after_semicolon: true,
            command_casing: Casing::Preserve,
            parameter_casing: Casing::Preserve,
            variable_casing: Casing::Preserve,
            quote_style: QuoteStyle::Preserve,
            pipeline_style: PipelineStyle::Auto,
            array_style: ContainerStyle::Compact,
            hashtable_style: ContainerStyle::Compact,
            blank_lines_around_functions: 1,
            max_consecutive_blank_lines: 1,
            insert_final_newline: true,
            trim_trailing_whitespace: true,
        }
    }
}
