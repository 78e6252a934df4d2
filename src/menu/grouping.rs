use crate::menu::types::{MenuItem, MenuSection};

pub const DEFAULT_SECTION: &str = "Other";

/// Splits a flat listing into sections at each titled marker.
///
/// Items before the first title land in [`DEFAULT_SECTION`]. Title markers
/// are never items themselves; blank titles are dropped and do not change
/// the current section. Sections keep first-seen order and a repeated title
/// appends to the existing section.
pub fn group(items: &[MenuItem]) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();
    let mut current = DEFAULT_SECTION.to_string();

    for item in items {
        match item {
            MenuItem::SectionTitle { text } => {
                let name = text.trim();
                if name.is_empty() {
                    continue;
                }
                current = name.to_string();
                section_mut(&mut sections, &current);
            }
            MenuItem::Food { .. } => {
                section_mut(&mut sections, &current).items.push(item.clone());
            }
        }
    }
    sections
}

fn section_mut<'a>(sections: &'a mut Vec<MenuSection>, name: &str) -> &'a mut MenuSection {
    let pos = match sections.iter().position(|s| s.name == name) {
        Some(pos) => pos,
        None => {
            sections.push(MenuSection {
                name: name.to_string(),
                items: Vec::new(),
            });
            sections.len() - 1
        }
    };
    &mut sections[pos]
}

/// Expand/collapse state for a grouped menu. At most one section is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionAccordion {
    open: Option<String>,
}

impl SectionAccordion {
    /// Opens `section` and closes every other one, or closes it if it was open.
    pub fn toggle(&mut self, section: &str) {
        if self.open.as_deref() == Some(section) {
            self.open = None;
        } else {
            self.open = Some(section.to_string());
        }
    }

    pub fn is_expanded(&self, section: &str) -> bool {
        self.open.as_deref() == Some(section)
    }

    pub fn expanded(&self) -> Option<&str> {
        self.open.as_deref()
    }
}
