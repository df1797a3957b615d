/// Extends string types with useful functions
pub trait StringExt {
    /// Capilalises the first letter in a string
    ///
    /// ```rust
    /// # use actnet_utils::StringExt;
    /// assert_eq!("test string".capitalise(), "Test string".to_string());
    /// ```
    fn capitalise(&self) -> String;

    /// Union of two comma separated lists, keeping the original order
    ///
    /// Entries already present are not repeated and empty entries are
    /// dropped.
    ///
    /// ```rust
    /// # use actnet_utils::StringExt;
    /// assert_eq!("n,2n".union_csv("2n,np"), "n,2n,np".to_string());
    /// assert_eq!("".union_csv("p"), "p".to_string());
    /// assert_eq!("p".union_csv("p"), "p".to_string());
    /// ```
    fn union_csv(&self, other: &str) -> String;
}

impl<T: AsRef<str>> StringExt for T {
    fn capitalise(&self) -> String {
        let mut c = self.as_ref().chars();
        match c.next() {
            Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
            None => String::new(),
        }
    }

    fn union_csv(&self, other: &str) -> String {
        let mut items: Vec<&str> = Vec::new();
        for item in self.as_ref().split(',').chain(other.split(',')) {
            if !item.is_empty() && !items.contains(&item) {
                items.push(item);
            }
        }
        items.join(",")
    }
}
