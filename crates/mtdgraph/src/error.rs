use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
///
/// Accumulates messages against a route (source path, nested field path)
/// instead of failing on the first problem. Children are keyed by route and
/// kept sorted, so rendering is deterministic regardless of load order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Record a message on this node.
    pub fn add(&mut self, message: impl ToString) {
        self.messages.push(message.to_string());
    }

    /// Record a message under a child route.
    pub fn add_for(&mut self, route: impl Into<String>, message: impl ToString) {
        self.children
            .entry(route.into())
            .or_default()
            .add(message);
    }

    /// Merge another tree under a child route.
    pub fn merge_for(&mut self, route: impl Into<String>, other: Self) {
        if other.is_empty() {
            return;
        }

        let child = self.children.entry(route.into()).or_default();
        child.messages.extend(other.messages);
        for (route, tree) in other.children {
            child.merge_for(route, tree);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Total number of messages in this tree, children included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[must_use]
    pub fn child(&self, route: &str) -> Option<&Self> {
        self.children.get(route)
    }

    /// Flatten into `(route, message)` pairs; nested routes are joined by ` > `.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into(None, &mut out);

        out
    }

    fn flatten_into(&self, prefix: Option<&str>, out: &mut Vec<(String, String)>) {
        let route = prefix.unwrap_or_default();
        for message in &self.messages {
            out.push((route.to_string(), message.clone()));
        }

        for (child_route, child) in &self.children {
            let joined = match prefix {
                Some(prefix) => format!("{prefix} > {child_route}"),
                None => child_route.clone(),
            };
            child.flatten_into(Some(&joined), out);
        }
    }

    /// Consume the tree, returning `Ok` when nothing was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (route, message) in self.flatten() {
            if route.is_empty() {
                writeln!(f, "{message}")?;
            } else {
                writeln!(f, "{route}: {message}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

/// Format a message and add it to an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {{
        $errs.add(format!($($arg)*));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_ok() {
        assert!(ErrorTree::new().result().is_ok());

        let mut errs = ErrorTree::new();
        errs.merge_for("a.mtd", ErrorTree::new());
        assert!(errs.is_empty(), "merging an empty tree must not create noise");
    }

    #[test]
    fn routes_render_sorted_and_nested() {
        let mut errs = ErrorTree::new();
        errs.add_for("b.mtd", "second");
        err!(errs, "top {}", 1);

        let mut nested = ErrorTree::new();
        nested.add_for("Properties[2]", "missing NameGuid");
        errs.merge_for("a.mtd", nested);

        assert_eq!(errs.len(), 3);
        assert_eq!(
            errs.flatten(),
            vec![
                (String::new(), "top 1".to_string()),
                (
                    "a.mtd > Properties[2]".to_string(),
                    "missing NameGuid".to_string()
                ),
                ("b.mtd".to_string(), "second".to_string()),
            ]
        );

        let rendered = errs.to_string();
        assert!(rendered.contains("a.mtd > Properties[2]: missing NameGuid"));
        assert!(errs.result().is_err());
    }
}
