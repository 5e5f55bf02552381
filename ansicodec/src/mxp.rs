//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! MXP tag definitions.
//!
//! Only the structure of the tag table is kept here; nothing renders MXP.

use std::collections::BTreeMap;

/// Default value of an MXP tag argument.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MxpArgument {
    /// Text value
    Text(String),
    /// Boolean value
    Flag(bool),
}

impl From<&str> for MxpArgument {
    fn from(value: &str) -> Self {
        MxpArgument::Text(value.to_string())
    }
}

impl From<bool> for MxpArgument {
    fn from(value: bool) -> Self {
        MxpArgument::Flag(value)
    }
}

/// Definition of one MXP tag.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MxpTag {
    /// Built in rather than defined by the server
    pub default: bool,
    /// Only allowed in secure mode
    pub secure: bool,
    /// Handled by the client rather than passed through
    pub want: bool,
    /// Markup emitted for the opening tag; `&name;` refers to an argument
    pub open_tag: Option<String>,
    /// Markup emitted for the closing tag
    pub close_tag: Option<String>,
    /// Order positional arguments are assigned in
    pub arg_order: Vec<String>,
    /// Default argument values
    pub arguments: BTreeMap<String, MxpArgument>,
}

impl MxpTag {
    /// A built in tag with no markup or arguments.
    pub fn builtin() -> Self {
        MxpTag {
            default: true,
            ..MxpTag::default()
        }
    }

    /// Sets the open and close markup.
    pub fn with_markup(mut self, open: &str, close: &str) -> Self {
        self.open_tag = Some(open.to_string());
        self.close_tag = Some(close.to_string());
        self
    }

    /// Adds an argument, appending it to the positional order.
    pub fn with_argument<V: Into<MxpArgument>>(mut self, name: &str, value: V) -> Self {
        self.arg_order.push(name.to_string());
        self.arguments.insert(name.to_string(), value.into());
        self
    }
}

/// A table entry: a definition or another name for one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MxpEntry {
    /// A tag definition
    Tag(MxpTag),
    /// Alias of the named entry
    Alias(String),
}

/// Tag table keyed by upper case tag name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MxpTagTable {
    entries: BTreeMap<String, MxpEntry>,
}

impl MxpTagTable {
    /// An empty table.
    pub fn new() -> Self {
        MxpTagTable {
            entries: BTreeMap::new(),
        }
    }

    /// Adds or replaces a tag.
    pub fn insert_tag(&mut self, name: &str, tag: MxpTag) {
        self.entries.insert(name.to_ascii_uppercase(), MxpEntry::Tag(tag));
    }

    /// Adds or replaces an alias.
    pub fn insert_alias(&mut self, alias: &str, target: &str) {
        self.entries
            .insert(alias.to_ascii_uppercase(), MxpEntry::Alias(target.to_ascii_uppercase()));
    }

    /// Removes an entry.
    pub fn remove(&mut self, name: &str) -> Option<MxpEntry> {
        self.entries.remove(&name.to_ascii_uppercase())
    }

    /// The raw entry under `name`, alias or not.
    pub fn entry(&self, name: &str) -> Option<&MxpEntry> {
        self.entries.get(&name.to_ascii_uppercase())
    }

    /// Looks a tag up case insensitively, following aliases. A dangling or
    /// circular alias finds nothing.
    ///
    /// ```
    /// use decafmud_ansicodec::MxpTagTable;
    ///
    /// let table = MxpTagTable::default();
    /// let bold = table.get("strong").unwrap();
    /// assert_eq!(bold.open_tag.as_deref(), Some("<b class=\"mxp\">"));
    /// assert!(table.get("blink").is_none());
    /// ```
    pub fn get(&self, name: &str) -> Option<&MxpTag> {
        let mut name = name.to_ascii_uppercase();
        for _ in 0..=self.entries.len() {
            match self.entries.get(&name)? {
                MxpEntry::Tag(tag) => return Some(tag),
                MxpEntry::Alias(target) => name.clone_from(target),
            }
        }
        None
    }

    /// Whether `name` resolves to a tag.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Every entry name, aliases included, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries, aliases included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MxpTagTable {
    /// The built in tags: `VAR`, `B`, `I`, `U`, `S`, `COLOR` and `HIGH`
    /// with their aliases.
    fn default() -> Self {
        let mut table = MxpTagTable::new();

        let mut var = MxpTag::builtin()
            .with_argument("name", "")
            .with_argument("desc", "")
            .with_argument("private", false)
            .with_argument("publish", true)
            .with_argument("delete", false)
            .with_argument("add", true)
            .with_argument("remove", false);
        var.secure = true;
        var.want = true;
        table.insert_tag("VAR", var);

        for (name, element, aliases) in [
            ("B", "b", &["BOLD", "STRONG"][..]),
            ("I", "i", &["ITALIC", "EM"][..]),
            ("U", "u", &["UNDERLINE"][..]),
            ("S", "s", &["STRIKEOUT"][..]),
        ] {
            let open = format!("<{element} class=\"mxp\">");
            let close = format!("</{element}>");
            table.insert_tag(name, MxpTag::builtin().with_markup(&open, &close));
            for alias in aliases {
                table.insert_alias(alias, name);
            }
        }

        let color = MxpTag::builtin()
            .with_markup(
                "<span class=\"mxp mxp-color\" style=\"color:&fore;;background-color:&back;\">",
                "</span>",
            )
            .with_argument("fore", "inherit")
            .with_argument("back", "inherit");
        table.insert_tag("COLOR", color);
        table.insert_alias("C", "COLOR");

        let mut high = MxpTag::builtin();
        high.want = true;
        table.insert_tag("HIGH", high);

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_and_aliases() {
        let table = MxpTagTable::default();
        assert_eq!(table.len(), 14);
        for (alias, tag) in [("BOLD", "B"), ("em", "I"), ("Underline", "U"), ("STRIKEOUT", "S"), ("c", "COLOR")] {
            assert_eq!(table.get(alias), table.get(tag), "{alias}");
            assert!(table.get(alias).is_some());
        }
        assert_eq!(table.entry("C"), Some(&MxpEntry::Alias("COLOR".to_string())));
    }

    #[test]
    fn var_arguments_keep_order() {
        let table = MxpTagTable::default();
        let var = table.get("VAR").expect("VAR");
        assert!(var.secure && var.want && var.default);
        assert_eq!(
            var.arg_order,
            ["name", "desc", "private", "publish", "delete", "add", "remove"]
        );
        assert_eq!(var.arguments.get("publish"), Some(&MxpArgument::Flag(true)));
        assert_eq!(var.open_tag, None);
    }

    #[test]
    fn color_defaults_to_inherit() {
        let table = MxpTagTable::default();
        let color = table.get("COLOR").expect("COLOR");
        assert_eq!(color.arg_order, ["fore", "back"]);
        assert_eq!(color.arguments.get("back"), Some(&MxpArgument::from("inherit")));
        assert_eq!(color.close_tag.as_deref(), Some("</span>"));
    }

    #[test]
    fn high_is_wanted_without_markup() {
        let table = MxpTagTable::default();
        let high = table.get("high").expect("HIGH");
        assert!(high.want && !high.secure);
        assert!(high.open_tag.is_none());
    }

    #[test]
    fn bad_aliases_resolve_to_nothing() {
        let mut table = MxpTagTable::new();
        table.insert_alias("A", "B");
        table.insert_alias("B", "A");
        table.insert_alias("D", "MISSING");
        assert!(table.get("A").is_none());
        assert!(table.get("D").is_none());
        assert!(!table.contains("nope"));
    }

    #[test]
    fn custom_tags_replace_builtins() {
        let mut table = MxpTagTable::default();
        table.insert_tag("b", MxpTag::builtin().with_markup("<strong>", "</strong>"));
        assert_eq!(table.get("BOLD").and_then(|tag| tag.open_tag.as_deref()), Some("<strong>"));
        assert!(table.remove("BOLD").is_some());
        assert!(table.get("BOLD").is_none());
    }
}
