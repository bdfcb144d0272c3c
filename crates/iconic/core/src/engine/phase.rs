/// Observable state of a module instance.
///
/// `Uninitialized → AwaitingDataset → Idle ⇄ AwaitingSelection → Solved`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Before the host's activation signal.
    Uninitialized,
    /// Activated; waiting for the remote dataset check to finish.
    AwaitingDataset,
    /// Running with nothing to show.
    Idle,
    /// An icon and one of its parts are on display.
    AwaitingSelection,
    /// Terminal.
    Solved,
}

/// Progress towards completion.
///
/// The first time the solve threshold is met the module moves to
/// `AbsorbingIgnored` and queues the ignored units instead of finishing; the
/// second time it is met (queue drained again) the module is solved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompletionStage {
    /// Collecting solves from the host.
    #[default]
    Collecting,
    /// Ignored units have been queued; polling has stopped.
    AbsorbingIgnored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Lifecycle {
    Uninitialized,
    AwaitingDataset,
    Running,
    Solved,
}
