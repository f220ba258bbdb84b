use crate::Span;
use serde::Serialize;
use std::fmt;

///
/// A property such as `@display("i=block/app")` or `@statistic[rtt](record=max)`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub index: Option<String>,
    pub tags: Option<PropertyTags>,
    pub span: Span,
}

///
/// The parenthesized tag list of a property.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyTags {
    pub tags: Vec<PropertyTag>,
    pub span: Span,
}

///
/// A single `key=v1,v2` tag. Keyless tags hold their values only.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyTag {
    pub key: Option<String>,
    pub values: Vec<String>,
}

impl Property {
    ///
    /// Builds a property from the raw annotation text `@name[index]`.
    ///
    pub(crate) fn from_raw(text: &str, span: Span) -> Property {
        let text = text.strip_prefix('@').unwrap_or(text);
        let (name, index) = match text.find('[') {
            Some(i) => {
                let index = text[i + 1..].trim_end_matches(']');
                (&text[..i], Some(index.to_string()))
            }
            None => (text, None),
        };

        Property {
            name: name.to_string(),
            index,
            tags: None,
            span,
        }
    }

    /// The value of the keyless first tag, e.g. the display string.
    pub fn default_value(&self) -> Option<&str> {
        let tag = self.tags.as_ref()?.tags.first()?;
        if tag.key.is_some() {
            return None;
        }
        tag.values.first().map(|v| v.as_str())
    }

    pub fn tag(&self, key: &str) -> Option<&PropertyTag> {
        self.tags
            .as_ref()?
            .tags
            .iter()
            .find(|t| t.key.as_deref() == Some(key))
    }
}

impl PropertyTags {
    ///
    /// Splits the raw text `(...)` into tags. Quoted strings and nested
    /// parens are kept intact.
    ///
    pub(crate) fn from_raw(text: &str, span: Span) -> PropertyTags {
        let inner = text.strip_prefix('(').unwrap_or(text);
        let inner = inner.strip_suffix(')').unwrap_or(inner);

        if inner.trim().is_empty() {
            return PropertyTags {
                tags: Vec::new(),
                span,
            };
        }

        let mut segments = split_top_level(inner, ';');
        if segments.len() > 1 && segments.last().map(|s| s.trim().is_empty()) == Some(true) {
            segments.pop();
        }

        let tags = segments
            .into_iter()
            .map(|segment| {
                let (key, values) = match find_top_level(segment, '=') {
                    Some(i) => (Some(segment[..i].trim().to_string()), &segment[i + 1..]),
                    None => (None, segment),
                };

                let values = if values.trim().is_empty() {
                    Vec::new()
                } else {
                    split_top_level(values, ',')
                        .into_iter()
                        .map(|v| v.trim().to_string())
                        .collect()
                };

                PropertyTag { key, values }
            })
            .collect();

        PropertyTags { tags, span }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

fn find_top_level(text: &str, sep: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_str = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_str = !in_str,
            '(' if !in_str => depth += 1,
            ')' if !in_str => depth = depth.saturating_sub(1),
            c if c == sep && !in_str && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_top_level(mut text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    while let Some(i) = find_top_level(text, sep) {
        parts.push(&text[..i]);
        text = &text[i + 1..];
    }
    parts.push(text);
    parts
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if let Some(index) = &self.index {
            write!(f, "[{}]", index)?;
        }
        if let Some(tags) = &self.tags {
            write!(f, "{}", tags)?;
        }
        Ok(())
    }
}

impl fmt::Display for PropertyTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, tag) in self.tags.iter().enumerate() {
            if i != 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", tag)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for PropertyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(key) = &self.key {
            write!(f, "{}=", key)?;
        }
        write!(f, "{}", self.values.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(raw: &str) -> Vec<PropertyTag> {
        PropertyTags::from_raw(raw, Span::default()).tags
    }

    fn tag(key: Option<&str>, values: &[&str]) -> PropertyTag {
        PropertyTag {
            key: key.map(str::to_string),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn property_names() {
        let prop = Property::from_raw("@statistic[rtt*]", Span::default());
        assert_eq!(prop.name, "statistic");
        assert_eq!(prop.index.as_deref(), Some("rtt*"));

        let prop = Property::from_raw("@class", Span::default());
        assert_eq!(prop.name, "class");
        assert_eq!(prop.index, None);
    }

    #[test]
    fn property_tag_lists() {
        // # Case 1
        assert_eq!(
            tags(r#"("i=block/app;p=10,20")"#),
            vec![tag(None, &[r#""i=block/app;p=10,20""#])]
        );

        // # Case 2
        assert_eq!(
            tags("(source=rtt; record=max,mean,vector; title=\"a, b\")"),
            vec![
                tag(Some("source"), &["rtt"]),
                tag(Some("record"), &["max", "mean", "vector"]),
                tag(Some("title"), &["\"a, b\""]),
            ]
        );

        // # Case 3
        assert_eq!(
            tags("(record=count(filter(x;y)),max;)"),
            vec![tag(Some("record"), &["count(filter(x;y))", "max"])]
        );

        // # Case 4
        assert!(tags("(  )").is_empty());
        assert_eq!(tags("(a=)"), vec![tag(Some("a"), &[])]);
    }

    #[test]
    fn property_display() {
        let mut prop = Property::from_raw("@statistic[rtt]", Span::default());
        prop.tags = Some(PropertyTags::from_raw(
            "(source=rtt;record=max,mean)",
            Span::default(),
        ));
        assert_eq!(prop.to_string(), "@statistic[rtt](source=rtt; record=max,mean)");
        assert_eq!(prop.tag("record").map(|t| t.values.len()), Some(2));
    }
}
