//! Hooks into the host platform.

/// Requests another frame callback from the host.
///
/// The list container lives on the UI thread, so implementations do not need
/// to be `Send` or `Sync`.
pub trait FrameScheduler {
    fn schedule_frame(&self);
}

/// How the host splits layout and UI work between threads.
///
/// Under an async strategy a child can be handed to the container before its
/// layout result arrives, which is when attaching gets deferred and the
/// fade-in applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThreadStrategy {
    #[default]
    AllOnUi,
    PartOnLayout,
    MostOnBackground,
    MultiThreads,
}

impl ThreadStrategy {
    pub fn is_async_layout(self) -> bool {
        matches!(
            self,
            ThreadStrategy::MostOnBackground | ThreadStrategy::MultiThreads
        )
    }
}
