//! Declarative construction of nodes with guarded paths.
//!
//! Guards are declared up front and installed before the node is handed out,
//! so a built node either carries every declared guard or is not built at all.

use std::sync::Arc;

use super::{Kind, Node, NodeError, Slot, StoreHook, Value};

#[derive(Debug)]
struct Guard {
    path: String,
    kind: Kind,
    initial: Value,
    nullable: bool,
}

/// Builder for [`Node`]s with guarded paths and an optional store hook.
///
/// # Examples
///
/// ```
/// use datanode::{Kind, Node};
///
/// let node = Node::builder()
///     .protect("server.port", Kind::Int, 8080, false)
///     .protect("server.name", Kind::Text, None::<String>, true)
///     .build()?;
///
/// assert_eq!(node.get_as::<i64>("server.port")?, Some(8080));
/// assert!(node.has("server.name")?);
/// # Ok::<(), datanode::node::NodeError>(())
/// ```
#[derive(Default)]
pub struct NodeBuilder {
    guards: Vec<Guard>,
    hook: Option<Arc<dyn StoreHook>>,
}

impl NodeBuilder {
    /// Declares a guarded path.
    ///
    /// The slot at `path` will only ever hold instances of `kind`, or null if
    /// `nullable` is set. Declaring the same path twice keeps the first guard
    /// and assigns the later initial value through it.
    pub fn protect(
        mut self,
        path: impl Into<String>,
        kind: Kind,
        initial: impl Into<Value>,
        nullable: bool,
    ) -> Self {
        self.guards.push(Guard {
            path: path.into(),
            kind,
            initial: initial.into(),
            nullable,
        });
        self
    }

    /// Installs a hook notified after every store on the built node.
    pub fn on_store(mut self, hook: impl StoreHook + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    /// Builds the node, installing guards in declaration order.
    ///
    /// The hook is attached afterwards and does not observe guard
    /// installation.
    ///
    /// # Errors
    /// - [`NodeError::TypeMismatch`] if a guard refuses its own initial value
    /// - [`NodeError::ProtectionRefused`] if an earlier guard refuses the
    ///   nodes or value a later declaration needs
    /// - any error [`Node::put`] reports for the path or value
    pub fn build(self) -> Result<Node, NodeError> {
        let mut node = Node::new();

        for guard in self.guards {
            let slot = Slot::new(guard.kind, guard.nullable, guard.initial)?;
            if !node.put(&guard.path, slot)? {
                return Err(NodeError::ProtectionRefused { path: guard.path });
            }
        }

        node.set_hook(self.hook);
        Ok(node)
    }
}

impl std::fmt::Debug for NodeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeBuilder")
            .field("guards", &self.guards)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
