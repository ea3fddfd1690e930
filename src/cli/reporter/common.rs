use colored::*;

pub const SCENARIO_INDENTATION: usize = 2;
pub const STEP_INDENTATION: usize = 4;

pub fn format_spec(heading: &str) -> String {
    format!("# {}", heading)
}

pub fn format_scenario(heading: &str) -> String {
    format!("## {}", heading)
}

pub fn spaces(n: usize) -> String {
    " ".repeat(n)
}

/// Indents every line of `text`, not just the first
pub fn indent(text: &str, n: usize) -> String {
    let pad = spaces(n);
    format!("{}{}", pad, text.replace('\n', &format!("\n{}", pad)))
}

/// Shapes raw output into tab-indented lines, or `None` if there's nothing
/// left once surrounding blank space is stripped
pub fn tab_block(text: &str) -> Option<String> {
    let text = text.trim_matches(|c| c == '\n' || c == ' ');
    if text.is_empty() {
        return None;
    }
    Some(format!("\t{}\n", text.replace('\n', "\n\t")))
}

fn success_glyph() -> &'static str {
    if cfg!(windows) { "√" } else { "✔" }
}

fn failure_glyph() -> &'static str {
    if cfg!(windows) { "×" } else { "✘" }
}

pub fn step_symbol(failed: bool) -> String {
    if failed {
        format!("{}", failure_glyph().red())
    } else {
        format!("{}", success_glyph().green())
    }
}

pub fn step_label(failed: bool) -> &'static str {
    if failed { "\t ...[FAIL]\n" } else { "\t ...[PASS]\n" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent() {
        assert_eq!(indent("## Login", SCENARIO_INDENTATION), "  ## Login");
        assert_eq!(indent("a\nb", STEP_INDENTATION), "    a\n    b");
    }

    #[test]
    fn test_tab_block() {
        assert_eq!(tab_block("\n  hello\n world  \n").unwrap(), "\thello\n\t world\n");
        assert_eq!(tab_block("done"), Some("\tdone\n".to_string()));
        assert!(tab_block("\n   \n").is_none());
        assert!(tab_block("").is_none());
    }

    #[test]
    fn test_tab_block_keeps_inner_tabs() {
        assert_eq!(tab_block("\tx\n").unwrap(), "\t\tx\n");
    }

    #[test]
    fn test_step_symbol() {
        assert!(step_symbol(false).contains(success_glyph()));
        assert!(step_symbol(true).contains(failure_glyph()));
    }
}
