pub struct LinkNotation;

impl LinkNotation {
    pub const OPEN: &'static str = "((";
    pub const CLOSE: &'static str = "))";
    /// Trimmed from both ends; the first one also separates URL from label.
    pub const WHITESPACE: &'static [char] = &['\r', '\n', '\t', ' '];
    /// Wraps placeholder tokens. Passes through every escaper unchanged.
    pub const PLACEHOLDER_SENTINEL: char = '$';
}
