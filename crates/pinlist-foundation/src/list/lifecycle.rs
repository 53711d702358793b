//! Attach/detach protocol for child views.
//!
//! With an async layout strategy a child can reach the container before its
//! layout result does. Such a child is parked in
//! [`NodeLifecycle::PendingLayout`] and attached by the first layout update
//! that reaches it, instead of being added to the surface with zero size.

use super::config::ListContainerConfig;
use super::node::{ComponentNode, NodeLifecycle};
use super::surface::ContainerSurface;

/// What [`ChildLifecycle::insert_list_item_node`] did with a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachOutcome {
    Attached,
    AlreadyAttached,
    Deferred,
    AlreadyPending,
}

#[derive(Clone, Debug, Default)]
pub struct ChildLifecycle {
    batch_render: bool,
    fade_in: bool,
}

impl ChildLifecycle {
    pub fn new(config: &ListContainerConfig) -> Self {
        let mut lifecycle = Self::default();
        lifecycle.configure(config);
        lifecycle
    }

    pub fn configure(&mut self, config: &ListContainerConfig) {
        self.batch_render = config.batch_render;
        self.fade_in = config.enable_fade_in_animation && config.thread_strategy.is_async_layout();
    }

    pub fn batch_render(&self) -> bool {
        self.batch_render
    }

    pub fn insert_list_item_node(
        &self,
        node: &mut ComponentNode,
        surface: &mut ContainerSurface,
    ) -> AttachOutcome {
        if self.batch_render || node.has_layout() {
            return self.attach(node, surface);
        }
        match node.lifecycle() {
            NodeLifecycle::PendingLayout => AttachOutcome::AlreadyPending,
            NodeLifecycle::Attached => self.attach(node, surface),
            NodeLifecycle::Detached => {
                log::trace!("deferring attach of {} until it has a layout", node.id());
                node.set_lifecycle(NodeLifecycle::PendingLayout);
                AttachOutcome::Deferred
            }
        }
    }

    /// Attaches a node parked in `PendingLayout`; other nodes are untouched.
    pub fn on_layout_updated(
        &self,
        node: &mut ComponentNode,
        surface: &mut ContainerSurface,
    ) -> Option<AttachOutcome> {
        if node.lifecycle() != NodeLifecycle::PendingLayout {
            return None;
        }
        Some(self.attach(node, surface))
    }

    fn attach(&self, node: &mut ComponentNode, surface: &mut ContainerSurface) -> AttachOutcome {
        let added = surface.add_view(node.id());
        if added && self.fade_in {
            node.start_fade_in();
        }
        node.set_lifecycle(NodeLifecycle::Attached);
        node.set_translation_z(node.z_index());
        if added {
            log::debug!("attached {}", node.id());
            AttachOutcome::Attached
        } else {
            AttachOutcome::AlreadyAttached
        }
    }

    /// Takes the node off the surface and cancels anything still in flight
    /// for it.
    pub fn detach(&self, node: &mut ComponentNode, surface: &mut ContainerSurface) {
        if node.lifecycle() == NodeLifecycle::PendingLayout {
            log::trace!("cancelled pending attach of {}", node.id());
        }
        node.cancel_fade_in();
        surface.remove_view(node.id());
        node.set_lifecycle(NodeLifecycle::Detached);
    }
}
