use std::fmt;

/// One edit step turning the "before" outline into the "after" outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Delete {
        name: String,
        /// Path in the before snapshot
        at_path: String,
    },
    Move {
        name: String,
        /// Path in the after snapshot
        to_path: String,
        /// New parent name, None for root level
        parent: Option<String>,
        /// Match key of the new parent
        depends_on: Option<String>,
    },
    Add {
        name: String,
        /// Match key of the added node
        key: String,
        /// Path in the after snapshot
        at_path: String,
        parent: Option<String>,
        depends_on: Option<String>,
    },
}

impl Operation {
    /// Match key that must be available before this step is valid.
    pub fn depends_on(&self) -> Option<&str> {
        match self {
            Operation::Delete { .. } => None,
            Operation::Move { depends_on, .. } | Operation::Add { depends_on, .. } => {
                depends_on.as_deref()
            }
        }
    }

    /// Structural path the redundancy filter compares.
    pub fn path(&self) -> &str {
        match self {
            Operation::Delete { at_path, .. } | Operation::Add { at_path, .. } => at_path,
            Operation::Move { to_path, .. } => to_path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Operation::Delete { name, .. }
            | Operation::Move { name, .. }
            | Operation::Add { name, .. } => name,
        }
    }

    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Delete { name, at_path } => {
                write!(f, "Delete '{name}' node (was at {at_path})")
            }
            Operation::Move {
                name,
                parent: Some(parent),
                ..
            } => write!(f, "Move '{name}' node to be a child of '{parent}' node"),
            Operation::Move { name, parent: None, .. } => {
                write!(f, "Move '{name}' node to root level")
            }
            Operation::Add {
                name,
                parent: Some(parent),
                ..
            } => write!(f, "Add '{name}' node as a child of '{parent}' node"),
            Operation::Add { name, parent: None, .. } => {
                write!(f, "Add '{name}' node at root level")
            }
        }
    }
}
