use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity - a label shared between posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl Tag {
    /// Create a tag whose slug is derived from its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            slug: Self::slug_for(&name),
            name,
        }
    }

    /// The slug a tag named `name` is stored under.
    pub fn slug_for(name: &str) -> String {
        slug::slugify(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_derived_from_name() {
        let tag = Tag::new("Rust Web Dev");
        assert_eq!(tag.slug, "rust-web-dev");
        assert_eq!(tag.name, "Rust Web Dev");
    }
}
