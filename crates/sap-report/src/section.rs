//! Structured text blocks and their markdown rendering.
//!
//! Sections render with `##` headings, subsections with `###`, and labelled
//! fields as `**Label**: value`, so downstream tooling can locate content by
//! heading text alone.

/// One block of content inside a section or subsection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    /// `**label**: value`
    Field { label: String, value: String },
    /// `**label**:` followed by a bullet list.
    FieldList { label: String, items: Vec<String> },
    List(Vec<String>),
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(text.into())
    }

    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        Block::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn field_list(label: impl Into<String>, items: Vec<String>) -> Self {
        Block::FieldList {
            label: label.into(),
            items,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Block::Paragraph(text) => text.clone(),
            Block::Field { label, value } => format!("**{label}**: {value}"),
            Block::FieldList { label, items } => {
                let mut out = format!("**{label}**:");
                for item in items {
                    out.push_str("\n- ");
                    out.push_str(item);
                }
                out
            }
            Block::List(items) => items
                .iter()
                .map(|item| format!("- {item}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsection {
    pub heading: String,
    pub blocks: Vec<Block>,
}

impl Subsection {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }
}

/// A top-level plan section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub blocks: Vec<Block>,
    pub subsections: Vec<Subsection>,
}

impl Section {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            blocks: Vec::new(),
            subsections: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    #[must_use]
    pub fn with_subsection(mut self, subsection: Subsection) -> Self {
        self.subsections.push(subsection);
        self
    }

    pub fn subsection(&self, heading: &str) -> Option<&Subsection> {
        self.subsections.iter().find(|s| s.heading == heading)
    }

    /// Markdown for the section, ending with a newline.
    pub fn render(&self) -> String {
        let mut parts = vec![format!("## {}", self.heading)];
        parts.extend(self.blocks.iter().map(Block::render));
        for subsection in &self.subsections {
            parts.push(format!("### {}", subsection.heading));
            parts.extend(subsection.blocks.iter().map(Block::render));
        }
        let mut out = parts.join("\n\n");
        out.push('\n');
        out
    }
}

/// Renders sections in order, separated by a blank line.
pub fn render_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(Section::render)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_renders_fixed_markers() {
        let section = Section::new("Interim Analysis")
            .with_block(Block::field("Number of interim analyses", "1"))
            .with_subsection(
                Subsection::new("Boundaries")
                    .with_block(Block::field_list("Looks", vec!["50%".to_string()])),
            );
        insta::assert_snapshot!(section.render(), @r"
        ## Interim Analysis

        **Number of interim analyses**: 1

        ### Boundaries

        **Looks**:
        - 50%
        ");
    }

    #[test]
    fn sections_are_separated_by_blank_lines() {
        let sections = vec![
            Section::new("A").with_block(Block::paragraph("first")),
            Section::new("B").with_block(Block::List(vec!["x".to_string(), "y".to_string()])),
        ];
        assert_eq!(
            render_sections(&sections),
            "## A\n\nfirst\n\n## B\n\n- x\n- y\n"
        );
    }
}
