use serde::{Deserialize, Serialize};
use std::fmt;

/// One renderable emoji: a base character plus optional modifiers and joiners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Emoji {
    code_points: Vec<u32>,
    name: String,
}

impl Emoji {
    pub fn new(code_points: Vec<u32>, name: impl Into<String>) -> Self {
        Self {
            code_points,
            name: name.into(),
        }
    }

    pub fn unnamed(code_points: Vec<u32>) -> Self {
        Self::new(code_points, String::new())
    }

    pub fn code_points(&self) -> &[u32] {
        &self.code_points
    }

    /// Display name; empty for tables that carry no names.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Code points as `U+1F600` labels.
    pub fn hex_code_points(&self) -> Vec<String> {
        self.code_points.iter().map(|cp| format!("U+{cp:04X}")).collect()
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cp in &self.code_points {
            let c = char::from_u32(*cp).unwrap_or(char::REPLACEMENT_CHARACTER);
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_single_code_point() {
        let e = Emoji::unnamed(vec![0x1F413]);
        assert_eq!(e.to_string(), "\u{1F413}");
    }

    #[test]
    fn display_tag_sequence() {
        let e = Emoji::new(
            vec![0x1F3F4, 0xE0067, 0xE0062, 0xE0065, 0xE006E, 0xE0067, 0xE007F],
            "flag: England",
        );
        assert_eq!(
            e.to_string(),
            "\u{1F3F4}\u{E0067}\u{E0062}\u{E0065}\u{E006E}\u{E0067}\u{E007F}"
        );
    }

    #[test]
    fn surrogates_render_as_replacement() {
        let e = Emoji::unnamed(vec![0xD800]);
        assert_eq!(e.to_string(), "\u{FFFD}");
    }

    #[test]
    fn hex_labels_are_padded() {
        let e = Emoji::unnamed(vec![0xA9, 0xFE0F]);
        assert_eq!(e.hex_code_points(), vec!["U+00A9", "U+FE0F"]);
    }
}
