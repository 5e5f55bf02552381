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

use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Node<F> {
    Leaf(F),
    Branch(BTreeMap<String, Node<F>>),
}

/// Commands keyed by dotted path, e.g. `Core.Ping` or `zmp.check`.
///
/// Every segment but the last is a package. Inserting below an existing leaf
/// turns that leaf into a package.
#[derive(Clone, Debug)]
pub struct CommandTree<F> {
    root: BTreeMap<String, Node<F>>,
}

impl<F: Copy> CommandTree<F> {
    /// Creates an empty tree.
    pub fn new() -> CommandTree<F> {
        CommandTree {
            root: BTreeMap::new(),
        }
    }

    /// Adds `command` at `path`, replacing whatever was there.
    pub fn insert(&mut self, path: &str, command: F) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(last) = segments.pop() else {
            return;
        };
        let mut level = &mut self.root;
        for segment in segments {
            let node = level
                .entry(segment.to_string())
                .or_insert_with(|| Node::Branch(BTreeMap::new()));
            if let Node::Leaf(_) = node {
                *node = Node::Branch(BTreeMap::new());
            }
            let Node::Branch(children) = node else {
                return;
            };
            level = children;
        }
        level.insert(last.to_string(), Node::Leaf(command));
    }

    /// The command registered exactly at `path`.
    pub fn lookup(&self, path: &str) -> Option<F> {
        match self.walk(path)? {
            Node::Leaf(command) => Some(*command),
            Node::Branch(_) => None,
        }
    }

    /// Whether `path` names a command or, with `package_ok`, a package.
    pub fn contains(&self, path: &str, package_ok: bool) -> bool {
        match self.walk(path) {
            Some(Node::Leaf(_)) => true,
            Some(Node::Branch(_)) => package_ok,
            None => false,
        }
    }

    fn walk(&self, path: &str) -> Option<&Node<F>> {
        let mut segments = path.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            match node {
                Node::Branch(children) => node = children.get(segment)?,
                Node::Leaf(_) => return None,
            }
        }
        Some(node)
    }
}

impl<F: Copy> Default for CommandTree<F> {
    fn default() -> Self {
        CommandTree::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_leaves_only() {
        let mut tree = CommandTree::new();
        tree.insert("Core.Ping", 1);
        tree.insert("Core.Goodbye", 2);
        assert_eq!(tree.lookup("Core.Ping"), Some(1));
        assert_eq!(tree.lookup("Core.Goodbye"), Some(2));
        assert_eq!(tree.lookup("Core"), None);
        assert_eq!(tree.lookup("Core.Ping.Extra"), None);
        assert_eq!(tree.lookup("Char.Vitals"), None);
    }

    #[test]
    fn contains_accepts_packages_on_request() {
        let mut tree = CommandTree::new();
        tree.insert("zmp.check", ());
        assert!(tree.contains("zmp.check", false));
        assert!(!tree.contains("zmp", false));
        assert!(tree.contains("zmp", true));
        assert!(!tree.contains("mud", true));
    }

    #[test]
    fn insert_below_leaf_makes_package() {
        let mut tree = CommandTree::new();
        tree.insert("a", 1);
        tree.insert("a.b", 2);
        assert_eq!(tree.lookup("a"), None);
        assert_eq!(tree.lookup("a.b"), Some(2));
    }
}
