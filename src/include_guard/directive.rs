//! Guard directives and the single-pass scanner that finds them.

/// In-line comment that exempts a guard line from rewriting.
pub const NOLINT_MARKER: &str = "// NOLINT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Ifndef,
    Define,
    Endif,
}

impl DirectiveKind {
    pub fn keyword(self) -> &'static str {
        match self {
            DirectiveKind::Ifndef => "#ifndef",
            DirectiveKind::Define => "#define",
            DirectiveKind::Endif => "#endif",
        }
    }

    fn render(self, macro_name: &str) -> String {
        match self {
            DirectiveKind::Ifndef | DirectiveKind::Define => {
                format!("{} {}", self.keyword(), macro_name)
            }
            DirectiveKind::Endif => format!("{}  // {}", self.keyword(), macro_name),
        }
    }
}

/// One guard line: where it was found, what it says, and what it should say.
#[derive(Debug, Clone)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub line: Option<usize>,
    pub text: String,
    pub expected: String,
    pub suppressed: bool,
}

impl Directive {
    pub fn new(kind: DirectiveKind) -> Self {
        Directive {
            kind,
            line: None,
            text: String::new(),
            expected: String::new(),
            suppressed: false,
        }
    }

    pub fn update(&mut self, line: usize, text: &str) {
        self.line = Some(line);
        self.text = text.to_string();
    }

    pub fn is_missing(&self) -> bool {
        self.line.is_none()
    }

    /// Compute the expected text for `macro_name`. A NOLINT comment on the
    /// line is carried over as the suffix; with `allow_nolint` it also
    /// suppresses the mismatch check for this line.
    pub fn prepare(&mut self, macro_name: &str, allow_nolint: bool) {
        let body = strip_cr(&self.text);
        let mut expected = self.kind.render(macro_name);
        match body.find(NOLINT_MARKER) {
            Some(at) => {
                expected.push_str("  ");
                expected.push_str(body[at..].trim_end());
                self.suppressed = allow_nolint;
            }
            None => self.suppressed = false,
        }
        self.expected = expected;
    }

    pub fn mismatch(&self) -> bool {
        !self.suppressed && strip_cr(&self.text) != self.expected
    }

    /// Replace the recorded line in `lines`, keeping a CR line ending.
    pub fn overwrite(&self, lines: &mut [String]) {
        let Some(at) = self.line else { return };
        let mut text = self.expected.clone();
        if self.text.ends_with('\r') {
            text.push('\r');
        }
        lines[at] = text;
    }
}

fn strip_cr(text: &str) -> &str {
    text.strip_suffix('\r').unwrap_or(text)
}

/// The three classic guard directives plus the pragma flag.
#[derive(Debug, Clone)]
pub struct IncludeGuard {
    pub ifndef: Directive,
    pub define: Directive,
    pub endif: Directive,
    pub has_pragma_once: bool,
}

impl Default for IncludeGuard {
    fn default() -> Self {
        IncludeGuard {
            ifndef: Directive::new(DirectiveKind::Ifndef),
            define: Directive::new(DirectiveKind::Define),
            endif: Directive::new(DirectiveKind::Endif),
            has_pragma_once: false,
        }
    }
}

impl IncludeGuard {
    /// Scan once: first `#ifndef`, first `#define`, last `#endif`.
    pub fn scan<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut guard = IncludeGuard::default();
        for (line, text) in lines.iter().enumerate() {
            let text = text.as_ref();
            if text.starts_with("#pragma once") {
                guard.has_pragma_once = true;
            }
            if text.starts_with("#ifndef") && guard.ifndef.is_missing() {
                guard.ifndef.update(line, text);
            }
            if text.starts_with("#define") && guard.define.is_missing() {
                guard.define.update(line, text);
            }
            if text.starts_with("#endif") {
                guard.endif.update(line, text);
            }
        }
        guard
    }

    pub fn items(&self) -> [&Directive; 3] {
        [&self.ifndef, &self.define, &self.endif]
    }

    fn items_mut(&mut self) -> [&mut Directive; 3] {
        [&mut self.ifndef, &mut self.define, &mut self.endif]
    }

    /// True when any of the three classic directives was not found.
    pub fn is_incomplete(&self) -> bool {
        self.items().iter().any(|d| d.is_missing())
    }

    /// A guard exists if all directives were found or pragma once is used.
    pub fn is_present(&self) -> bool {
        self.has_pragma_once || !self.is_incomplete()
    }

    pub fn prepare(&mut self, macro_name: &str, allow_nolint: bool) {
        for item in self.items_mut() {
            item.prepare(macro_name, allow_nolint);
        }
    }

    pub fn mismatch(&self) -> bool {
        self.items().iter().any(|d| d.mismatch())
    }

    /// Rewrite only the mismatched lines.
    pub fn overwrite(&self, lines: &mut [String]) {
        for item in self.items() {
            if item.mismatch() {
                item.overwrite(lines);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn test_scan_takes_first_opening_and_last_closing() {
        let src = lines(
            "#ifndef A_\n#define A_\n#ifndef B\n#define B 1\n#endif\n#endif  // A_\n",
        );
        let guard = IncludeGuard::scan(&src);
        assert_eq!(guard.ifndef.line, Some(0));
        assert_eq!(guard.define.line, Some(1));
        assert_eq!(guard.endif.line, Some(5));
        assert_eq!(guard.endif.text, "#endif  // A_");
        assert!(!guard.has_pragma_once);
        assert!(guard.is_present());
    }

    #[test]
    fn test_scan_detects_pragma_and_missing_directives() {
        let guard = IncludeGuard::scan(&lines("#pragma once\nint x;\n"));
        assert!(guard.has_pragma_once);
        assert!(guard.is_incomplete());
        assert!(guard.is_present());

        let guard = IncludeGuard::scan(&lines("#define X 1\nint x;\n"));
        assert!(guard.is_incomplete());
        assert!(!guard.is_present());
    }

    #[test]
    fn test_prepare_renders_expected_lines() {
        let mut guard = IncludeGuard::scan(&lines("#ifndef OLD\n#define OLD\n#endif\n"));
        guard.prepare("FOO__BAR_HPP_", false);
        assert_eq!(guard.ifndef.expected, "#ifndef FOO__BAR_HPP_");
        assert_eq!(guard.define.expected, "#define FOO__BAR_HPP_");
        assert_eq!(guard.endif.expected, "#endif  // FOO__BAR_HPP_");
        assert!(guard.mismatch());
    }

    #[test]
    fn test_nolint_suffix_is_preserved_on_rewrite() {
        let mut d = Directive::new(DirectiveKind::Ifndef);
        d.update(0, "#ifndef OLD  // NOLINT(build/header_guard)");
        d.prepare("NEW_", false);
        assert_eq!(d.expected, "#ifndef NEW_  // NOLINT(build/header_guard)");
        assert!(d.mismatch());
        assert!(!d.suppressed);
    }

    #[test]
    fn test_nolint_suppresses_when_allowed() {
        let mut d = Directive::new(DirectiveKind::Endif);
        d.update(9, "#endif // whatever  // NOLINT");
        d.prepare("NEW_", true);
        assert!(d.suppressed);
        assert!(!d.mismatch());
    }

    #[test]
    fn test_overwrite_keeps_crlf_and_skips_matching_lines() {
        let mut src = lines("#ifndef OLD\r\n#define NEW_\r\nint x;\r\n#endif  // NEW_\r\n");
        let mut guard = IncludeGuard::scan(&src);
        guard.prepare("NEW_", false);
        assert!(guard.ifndef.mismatch());
        assert!(!guard.define.mismatch());
        assert!(!guard.endif.mismatch());
        guard.overwrite(&mut src);
        assert_eq!(src.join("\n"), "#ifndef NEW_\r\n#define NEW_\r\nint x;\r\n#endif  // NEW_\r\n");
    }
}
